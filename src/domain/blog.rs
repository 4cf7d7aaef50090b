use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{BlogBody, BlogId, BlogTitle, Slug, ViewCount};

/// A blog entry addressed by its slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: BlogId,
    pub title: BlogTitle,
    pub slug: Slug,
    pub body: BlogBody,
    /// Incremented exactly once per detail read.
    pub num_views: ViewCount,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Blog`]. The view counter starts at zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBlog {
    pub title: BlogTitle,
    pub slug: Slug,
    pub body: BlogBody,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Field values applied to an existing [`Blog`] on update. The slug may
/// change; the view counter is never touched by updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateBlog {
    pub title: BlogTitle,
    pub slug: Slug,
    pub body: BlogBody,
    pub updated_at: NaiveDateTime,
}
