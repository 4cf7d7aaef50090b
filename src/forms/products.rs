use std::collections::BTreeMap;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::domain::types::{
    CategoryId, ProductDescription, ProductName, ProductPrice, TypeConstraintError, VersionId,
    VersionName,
};
use crate::domain::version::VersionChange;

/// Raw parent fields of a product submission. Values stay strings until
/// [`ProductFormPayload`] conversion so a failed parse reports a form error
/// instead of a deserialization failure.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    #[validate(length(min = 1))]
    pub price: String,
    #[validate(length(min = 1))]
    pub category_id: String,
}

/// Validated product fields ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFormPayload {
    pub category_id: CategoryId,
    pub name: ProductName,
    pub description: Option<ProductDescription>,
    pub price: ProductPrice,
}

impl ProductFormPayload {
    pub fn into_new_product(self) -> NewProduct {
        let now = Utc::now().naive_utc();
        NewProduct {
            category_id: self.category_id,
            name: self.name,
            description: self.description,
            price: self.price,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_update_product(self) -> UpdateProduct {
        UpdateProduct {
            category_id: self.category_id,
            name: self.name,
            description: self.description,
            price: self.price,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("Product form validation failed: {0}")]
    Validation(String),
    #[error("Product form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ProductFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ProductFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ProductForm> for ProductFormPayload {
    type Error = ProductFormError;

    fn try_from(value: ProductForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let category_id = value
            .category_id
            .trim()
            .parse::<i32>()
            .map_err(|_| ProductFormError::Validation("category must be selected".to_string()))?;
        let price = value
            .price
            .trim()
            .parse::<f64>()
            .map_err(|_| ProductFormError::Validation("price must be a number".to_string()))?;

        let description = value.description.trim();
        let description = if description.is_empty() {
            None
        } else {
            Some(ProductDescription::new(description)?)
        };

        Ok(Self {
            category_id: CategoryId::new(category_id)?,
            name: ProductName::new(value.name)?,
            description,
            price: ProductPrice::new(price)?,
        })
    }
}

/// One raw row of the version form set, collected from
/// `versions-{i}-{id,name,delete}` fields.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VersionRowForm {
    pub id: String,
    pub name: String,
    pub delete: bool,
}

#[derive(Debug, Error)]
pub enum VersionFormSetError {
    #[error("version row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

/// A product submission: parent fields plus zero or more version rows,
/// submitted together and validated independently of each other.
#[derive(Debug, Clone)]
pub struct ProductSubmission {
    pub product: ProductForm,
    pub versions: Vec<VersionRowForm>,
}

fn split_version_key(key: &str) -> Option<(usize, &str)> {
    let rest = key.strip_prefix("versions-")?;
    let (index, field) = rest.split_once('-')?;
    Some((index.parse().ok()?, field))
}

impl ProductSubmission {
    /// Collects the urlencoded key/value pairs of a submission. Unknown keys
    /// are ignored; rows keep their submitted index order.
    pub fn parse<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut product = ProductForm::default();
        let mut rows: BTreeMap<usize, VersionRowForm> = BTreeMap::new();

        for (key, value) in pairs {
            match key.as_str() {
                "name" => product.name = value,
                "description" => product.description = value,
                "price" => product.price = value,
                "category_id" => product.category_id = value,
                other => {
                    if let Some((index, field)) = split_version_key(other) {
                        let row = rows.entry(index).or_default();
                        match field {
                            "id" => row.id = value,
                            "name" => row.name = value,
                            "delete" => row.delete = !value.trim().is_empty(),
                            _ => {}
                        }
                    }
                }
            }
        }

        Self {
            product,
            versions: rows.into_values().collect(),
        }
    }

    /// Validates the parent form on its own.
    pub fn validate_parent(&self) -> Result<ProductFormPayload, ProductFormError> {
        self.product.clone().try_into()
    }

    /// Classifies and validates the version rows on their own. Rows without
    /// an id and without a name are blank slots and are skipped.
    pub fn validate_versions(&self) -> Result<Vec<VersionChange>, VersionFormSetError> {
        let mut changes = Vec::new();

        for (position, row) in self.versions.iter().enumerate() {
            let id = row.id.trim();
            let name = row.name.trim();

            if id.is_empty() {
                if name.is_empty() {
                    continue;
                }
                let name = VersionName::new(name).map_err(|e| VersionFormSetError::InvalidRow {
                    row: position,
                    reason: e.to_string(),
                })?;
                changes.push(VersionChange::Insert { name });
                continue;
            }

            let id = id
                .parse::<i32>()
                .ok()
                .and_then(|raw| VersionId::new(raw).ok())
                .ok_or_else(|| VersionFormSetError::InvalidRow {
                    row: position,
                    reason: format!("invalid version id: {id}"),
                })?;

            if row.delete {
                changes.push(VersionChange::Delete { id });
            } else {
                let name = VersionName::new(name).map_err(|e| VersionFormSetError::InvalidRow {
                    row: position,
                    reason: e.to_string(),
                })?;
                changes.push(VersionChange::Update { id, name });
            }
        }

        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_collects_parent_and_rows() {
        let submission = ProductSubmission::parse(pairs(&[
            ("name", "Смартфон"),
            ("price", "19990"),
            ("category_id", "2"),
            ("versions-0-name", "16GB"),
            ("versions-1-id", "7"),
            ("versions-1-name", "32GB"),
            ("versions-1-delete", "on"),
        ]));

        assert_eq!(submission.product.name, "Смартфон");
        assert_eq!(submission.versions.len(), 2);
        assert_eq!(submission.versions[1].id, "7");
        assert!(submission.versions[1].delete);
    }

    #[test]
    fn validate_parent_rejects_bad_price() {
        let submission = ProductSubmission::parse(pairs(&[
            ("name", "Смартфон"),
            ("price", "дорого"),
            ("category_id", "2"),
        ]));

        let err = submission.validate_parent().unwrap_err();
        assert!(matches!(err, ProductFormError::Validation(_)));
    }

    #[test]
    fn validate_parent_treats_blank_description_as_none() {
        let submission = ProductSubmission::parse(pairs(&[
            ("name", "Смартфон"),
            ("description", "   "),
            ("price", "0"),
            ("category_id", "1"),
        ]));

        let payload = submission.validate_parent().unwrap();
        assert!(payload.description.is_none());
        assert_eq!(payload.price.get(), 0.0);
    }

    #[test]
    fn validate_versions_classifies_rows() {
        let submission = ProductSubmission::parse(pairs(&[
            ("name", "Смартфон"),
            ("price", "1"),
            ("category_id", "1"),
            ("versions-0-name", ""),
            ("versions-1-name", "16GB"),
            ("versions-2-id", "3"),
            ("versions-2-name", "64GB"),
            ("versions-3-id", "4"),
            ("versions-3-name", "128GB"),
            ("versions-3-delete", "on"),
        ]));

        let changes = submission.validate_versions().unwrap();
        assert_eq!(changes.len(), 3);
        assert!(matches!(&changes[0], VersionChange::Insert { name } if name.as_str() == "16GB"));
        assert!(matches!(
            &changes[1],
            VersionChange::Update { id, name } if id.get() == 3 && name.as_str() == "64GB"
        ));
        assert!(matches!(&changes[2], VersionChange::Delete { id } if id.get() == 4));
    }

    #[test]
    fn validate_versions_rejects_update_without_name() {
        let submission = ProductSubmission::parse(pairs(&[
            ("versions-0-id", "3"),
            ("versions-0-name", "  "),
        ]));

        let err = submission.validate_versions().unwrap_err();
        assert!(matches!(err, VersionFormSetError::InvalidRow { row: 0, .. }));
    }

    #[test]
    fn validate_versions_rejects_malformed_id() {
        let submission = ProductSubmission::parse(pairs(&[
            ("versions-0-id", "abc"),
            ("versions-0-name", "16GB"),
        ]));

        assert!(submission.validate_versions().is_err());
    }

    #[test]
    fn version_failure_does_not_affect_parent_validation() {
        let submission = ProductSubmission::parse(pairs(&[
            ("name", "Смартфон"),
            ("price", "10"),
            ("category_id", "1"),
            ("versions-0-id", "abc"),
            ("versions-0-name", "16GB"),
        ]));

        assert!(submission.validate_parent().is_ok());
        assert!(submission.validate_versions().is_err());
    }
}
