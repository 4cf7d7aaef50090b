use serde::{Deserialize, Serialize};

use crate::domain::types::{ProductId, VersionId, VersionName};

/// A named variant/release of a product. Owned by its product: deleting the
/// product deletes its versions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Version {
    pub id: VersionId,
    pub product_id: ProductId,
    pub name: VersionName,
}

/// One entry of a validated version form set, applied as a batch scoped to a
/// single product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionChange {
    /// Add a new version to the product.
    Insert { name: VersionName },
    /// Rename an existing version of the product.
    Update { id: VersionId, name: VersionName },
    /// Remove an existing version of the product.
    Delete { id: VersionId },
}
