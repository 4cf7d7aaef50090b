use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{NonEmptyString, TypeConstraintError};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactFormPayload {
    pub name: NonEmptyString,
    pub email: String,
    pub message: NonEmptyString,
}

#[derive(Debug, Error)]
pub enum ContactFormError {
    #[error("Contact form validation failed: {0}")]
    Validation(String),
    #[error("Contact form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ContactFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ContactFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ContactForm> for ContactFormPayload {
    type Error = ContactFormError;

    fn try_from(value: ContactForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: NonEmptyString::new_for_field(value.name, "name")?,
            email: value.email.trim().to_string(),
            message: NonEmptyString::new_for_field(value.message, "message")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_valid_form() {
        let form = ContactForm {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            message: "hi".to_string(),
        };

        let payload: ContactFormPayload = form.try_into().unwrap();
        assert_eq!(payload.email, "a@x.com");
    }

    #[test]
    fn rejects_malformed_email() {
        let form = ContactForm {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            message: "hi".to_string(),
        };

        let payload: Result<ContactFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(ContactFormError::Validation(_))));
    }
}
