use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Configuration options for the catalog server.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path to the SQLite database file.
    pub database_url: String,
    /// Secret used to sign the flash message cookie. Must be at least
    /// 32 characters long.
    pub secret_key: String,
}

impl AppConfig {
    /// Loads configuration from `config.yaml` overlaid with environment
    /// variables (`DATABASE_URL`, `SECRET_KEY`, ...).
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::new("config", FileFormat::Yaml).required(false))
            .add_source(Environment::default())
            .build()?
            .try_deserialize()
    }
}
