use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::blog::{
    Blog as DomainBlog, NewBlog as DomainNewBlog, UpdateBlog as DomainUpdateBlog,
};
use crate::domain::types::{BlogBody, BlogTitle, Slug, TypeConstraintError, ViewCount};

/// Diesel model representing the `blogs` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::blogs)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub num_views: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Blog`]. `num_views` is left to its schema default.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::blogs)]
pub struct NewBlog {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Changeset applied to an existing blog row. The view counter is mutated
/// only by the detail-read path, never by updates.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::blogs)]
pub struct UpdateBlog {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Blog> for DomainBlog {
    type Error = TypeConstraintError;

    fn try_from(blog: Blog) -> Result<Self, Self::Error> {
        Ok(Self {
            id: blog.id.try_into()?,
            title: BlogTitle::new(blog.title)?,
            slug: Slug::new(blog.slug)?,
            body: BlogBody::new(blog.body)?,
            num_views: ViewCount::new(blog.num_views)?,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        })
    }
}

impl From<DomainNewBlog> for NewBlog {
    fn from(blog: DomainNewBlog) -> Self {
        Self {
            title: blog.title.into_inner(),
            slug: blog.slug.into_inner(),
            body: blog.body.into_inner(),
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

impl From<DomainUpdateBlog> for UpdateBlog {
    fn from(blog: DomainUpdateBlog) -> Self {
        Self {
            title: blog.title.into_inner(),
            slug: blog.slug.into_inner(),
            body: blog.body.into_inner(),
            updated_at: blog.updated_at,
        }
    }
}
