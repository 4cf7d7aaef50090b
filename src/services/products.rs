use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::domain::version::Version;
use crate::forms::products::ProductSubmission;
use crate::repository::{CategoryReader, ProductReader, ProductWriter};

use super::{ServiceError, ServiceResult};

/// Whether a submission creates a new product or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveProductTarget {
    Create,
    Update(ProductId),
}

/// Result of a product submission.
///
/// The parent form and the version form set are validated independently, so a
/// submission can end up persisting the product while rejecting its version
/// changes. That partial outcome is reported explicitly instead of silently
/// following the success path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductSaveOutcome {
    /// Product and version changes were all persisted.
    Saved { product_id: ProductId },
    /// The product was persisted but the version rows failed validation; the
    /// version changes were discarded.
    VersionsRejected { product_id: ProductId, reason: String },
    /// The parent form failed validation; nothing was persisted.
    Rejected { reason: String },
}

pub fn show_products<R>(repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader,
{
    match repo.list_products() {
        Ok(products) => Ok(products),
        Err(e) => {
            log::error!("Failed to list products: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Fetches a product with its category and versions for the detail page.
pub fn show_product<R>(product_id: i32, repo: &R) -> ServiceResult<(Product, Category, Vec<Version>)>
where
    R: ProductReader + CategoryReader,
{
    let product_id = match ProductId::new(product_id) {
        Ok(product_id) => product_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    let product = match repo.get_product_by_id(product_id) {
        Ok(Some(product)) => product,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let category = match repo.get_category_by_id(product.category_id) {
        Ok(Some(category)) => category,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let versions = match repo.list_versions(product_id) {
        Ok(versions) => versions,
        Err(e) => {
            log::error!("Failed to list versions: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok((product, category, versions))
}

/// Categories for the create form's select box.
pub fn new_product_page<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(categories) => Ok(categories),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Product, its versions and the category choices for the edit form. The
/// version rows are pre-populated with exactly the existing versions.
pub fn edit_product_page<R>(
    product_id: i32,
    repo: &R,
) -> ServiceResult<(Product, Vec<Version>, Vec<Category>)>
where
    R: ProductReader + CategoryReader,
{
    let product_id = match ProductId::new(product_id) {
        Ok(product_id) => product_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    let product = match repo.get_product_by_id(product_id) {
        Ok(Some(product)) => product,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let versions = match repo.list_versions(product_id) {
        Ok(versions) => versions,
        Err(e) => {
            log::error!("Failed to list versions: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let categories = match repo.list_categories() {
        Ok(categories) => categories,
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok((product, versions, categories))
}

/// Persists a product submission in two phases.
///
/// The parent form and the version rows are validated independently. A valid
/// parent is persisted first; the version changes are then applied as one
/// batch scoped to the persisted product, but only if the whole row set
/// validated. An invalid row set does not roll the parent back — the discard
/// is reported through [`ProductSaveOutcome::VersionsRejected`].
pub fn save_product<R>(
    target: SaveProductTarget,
    submission: ProductSubmission,
    repo: &R,
) -> ServiceResult<ProductSaveOutcome>
where
    R: ProductReader + ProductWriter + CategoryReader,
{
    let versions = submission.validate_versions();

    let payload = match submission.validate_parent() {
        Ok(payload) => payload,
        Err(e) => {
            return Ok(ProductSaveOutcome::Rejected {
                reason: e.to_string(),
            });
        }
    };

    match repo.get_category_by_id(payload.category_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(ProductSaveOutcome::Rejected {
                reason: "Категория не найдена.".to_string(),
            });
        }
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let product_id = match target {
        SaveProductTarget::Create => match repo.create_product(&payload.into_new_product()) {
            Ok(product) => product.id,
            Err(e) => {
                log::error!("Failed to create product: {e}");
                return Err(ServiceError::Internal);
            }
        },
        SaveProductTarget::Update(product_id) => {
            match repo.get_product_by_id(product_id) {
                Ok(Some(_)) => {}
                Ok(None) => return Err(ServiceError::NotFound),
                Err(e) => {
                    log::error!("Failed to get product: {e}");
                    return Err(ServiceError::Internal);
                }
            }
            match repo.update_product(product_id, &payload.into_update_product()) {
                Ok(_) => product_id,
                Err(e) => {
                    log::error!("Failed to update product: {e}");
                    return Err(ServiceError::Internal);
                }
            }
        }
    };

    match versions {
        Ok(changes) => match repo.apply_version_changes(product_id, &changes) {
            Ok(_) => Ok(ProductSaveOutcome::Saved { product_id }),
            Err(e) => {
                log::error!("Failed to apply version changes: {e}");
                Err(ServiceError::Internal)
            }
        },
        Err(e) => {
            log::warn!("Product {product_id} saved but version rows were discarded: {e}");
            Ok(ProductSaveOutcome::VersionsRejected {
                product_id,
                reason: e.to_string(),
            })
        }
    }
}

/// Deletes a product together with its versions.
pub fn delete_product<R>(product_id: i32, repo: &R) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter,
{
    let product_id = match ProductId::new(product_id) {
        Ok(product_id) => product_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.get_product_by_id(product_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_product(product_id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete product: {e}");
            Err(ServiceError::Internal)
        }
    }
}
