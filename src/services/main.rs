use crate::domain::category::Category;
use crate::forms::contact::ContactFormPayload;
use crate::repository::CategoryReader;

use super::{ServiceError, ServiceResult};

/// Core business logic for the index and category listing pages: fetch every
/// category ordered by name.
pub fn show_index<R>(repo: &R) -> ServiceResult<Vec<Category>>
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

/// Accepts a contact submission. There is no delivery backend; the message is
/// only written to the log and nothing is persisted.
pub fn submit_contact(payload: ContactFormPayload) -> ServiceResult<()> {
    log::info!(
        "Contact message from {} <{}>: {}",
        payload.name,
        payload.email,
        payload.message
    );
    Ok(())
}
