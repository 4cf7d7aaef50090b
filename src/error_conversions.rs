//! Error conversion glue between layers.
//!
//! The domain and form layers must not depend on service/repository error
//! types, so the `From` impls wiring them together live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::blogs::BlogFormError;
use crate::forms::contact::ContactFormError;
use crate::forms::products::{ProductFormError, VersionFormSetError};
use crate::repository::errors::RepositoryError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Validation(val.to_string())
    }
}

impl From<ProductFormError> for ServiceError {
    fn from(val: ProductFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<VersionFormSetError> for ServiceError {
    fn from(val: VersionFormSetError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<BlogFormError> for ServiceError {
    fn from(val: BlogFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<ContactFormError> for ServiceError {
    fn from(val: ContactFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
