use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, VersionName};
use crate::domain::version::Version as DomainVersion;

/// Diesel model representing the `versions` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::versions)]
pub struct Version {
    pub id: i32,
    pub product_id: i32,
    pub name: String,
}

/// Insertable form of [`Version`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::versions)]
pub struct NewVersion {
    pub product_id: i32,
    pub name: String,
}

impl TryFrom<Version> for DomainVersion {
    type Error = TypeConstraintError;

    fn try_from(version: Version) -> Result<Self, Self::Error> {
        Ok(Self {
            id: version.id.try_into()?,
            product_id: version.product_id.try_into()?,
            name: VersionName::new(version.name)?,
        })
    }
}
