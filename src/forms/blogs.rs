use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::blog::{NewBlog, UpdateBlog};
use crate::domain::types::{BlogBody, BlogTitle, Slug, TypeConstraintError};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BlogForm {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub slug: String,
    #[validate(length(min = 1))]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogFormPayload {
    pub title: BlogTitle,
    pub slug: Slug,
    pub body: BlogBody,
}

impl BlogFormPayload {
    pub fn into_new_blog(self) -> NewBlog {
        let now = Utc::now().naive_utc();
        NewBlog {
            title: self.title,
            slug: self.slug,
            body: self.body,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_update_blog(self) -> UpdateBlog {
        UpdateBlog {
            title: self.title,
            slug: self.slug,
            body: self.body,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error)]
pub enum BlogFormError {
    #[error("Blog form validation failed: {0}")]
    Validation(String),
    #[error("Blog form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for BlogFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for BlogFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<BlogForm> for BlogFormPayload {
    type Error = BlogFormError;

    fn try_from(value: BlogForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            title: BlogTitle::new(value.title)?,
            slug: Slug::new(value.slug)?,
            body: BlogBody::new(value.body)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_valid_form() {
        let form = BlogForm {
            title: " Первый пост ".to_string(),
            slug: "first-post".to_string(),
            body: "Привет, мир!".to_string(),
        };

        let payload: BlogFormPayload = form.try_into().unwrap();
        assert_eq!(payload.title.as_str(), "Первый пост");
        assert_eq!(payload.slug.as_str(), "first-post");
    }

    #[test]
    fn rejects_invalid_slug() {
        let form = BlogForm {
            title: "Первый пост".to_string(),
            slug: "Первый пост".to_string(),
            body: "Привет, мир!".to_string(),
        };

        let payload: Result<BlogFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(BlogFormError::TypeConstraint(_))));
    }

    #[test]
    fn rejects_empty_title() {
        let form = BlogForm {
            title: String::new(),
            slug: "first-post".to_string(),
            body: "Привет, мир!".to_string(),
        };

        let payload: Result<BlogFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(BlogFormError::Validation(_))));
    }
}
