//! Core library exports for the catalog web application.
//!
//! This crate exposes the domain, models, repositories, forms, services and
//! route layers used by the catalog/blog server binary.

pub mod db;
pub mod domain;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
