use crate::domain::blog::Blog;
use crate::domain::types::Slug;
use crate::forms::blogs::BlogFormPayload;
use crate::repository::errors::RepositoryError;
use crate::repository::{BlogReader, BlogWriter};

use super::{ServiceError, ServiceResult};

pub fn show_blogs<R>(repo: &R) -> ServiceResult<Vec<Blog>>
where
    R: BlogReader,
{
    match repo.list_blogs() {
        Ok(blogs) => Ok(blogs),
        Err(e) => {
            log::error!("Failed to list blogs: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Fetches a blog entry for its detail page and records the view.
///
/// The counter increment happens atomically at the data store on every read,
/// repeated reads by the same client included.
pub fn show_blog<R>(slug: &str, repo: &R) -> ServiceResult<Blog>
where
    R: BlogReader + BlogWriter,
{
    let slug = match Slug::new(slug) {
        Ok(slug) => slug,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.increment_blog_views(&slug) {
        Ok(Some(blog)) => Ok(blog),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to increment blog views: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Fetches a blog entry for the edit form without recording a view.
pub fn edit_blog_page<R>(slug: &str, repo: &R) -> ServiceResult<Blog>
where
    R: BlogReader,
{
    let slug = match Slug::new(slug) {
        Ok(slug) => slug,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.get_blog_by_slug(&slug) {
        Ok(Some(blog)) => Ok(blog),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get blog: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_blog<R>(payload: BlogFormPayload, repo: &R) -> ServiceResult<()>
where
    R: BlogWriter,
{
    match repo.create_blog(&payload.into_new_blog()) {
        Ok(_) => Ok(()),
        Err(RepositoryError::ConstraintViolation(_)) => Err(ServiceError::Form(
            "Запись с таким слагом уже существует.".to_string(),
        )),
        Err(e) => {
            log::error!("Failed to create blog: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Updates the blog entry currently addressed by `slug`. The submission may
/// change the slug; the returned value is the slug the entry is addressed by
/// after the update, for the detail-page redirect.
pub fn update_blog<R>(slug: &str, payload: BlogFormPayload, repo: &R) -> ServiceResult<Slug>
where
    R: BlogReader + BlogWriter,
{
    let slug = match Slug::new(slug) {
        Ok(slug) => slug,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.get_blog_by_slug(&slug) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get blog: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let new_slug = payload.slug.clone();
    match repo.update_blog(&slug, &payload.into_update_blog()) {
        Ok(_) => Ok(new_slug),
        Err(RepositoryError::ConstraintViolation(_)) => Err(ServiceError::Form(
            "Запись с таким слагом уже существует.".to_string(),
        )),
        Err(e) => {
            log::error!("Failed to update blog: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_blog<R>(slug: &str, repo: &R) -> ServiceResult<()>
where
    R: BlogReader + BlogWriter,
{
    let slug = match Slug::new(slug) {
        Ok(slug) => slug,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.get_blog_by_slug(&slug) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get blog: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_blog(&slug) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete blog: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{BlogBody, BlogId, BlogTitle, ViewCount};
    use crate::repository::test::TestRepository;
    use chrono::DateTime;

    fn sample_blog(id: i32, slug: &str) -> Blog {
        Blog {
            id: BlogId::new(id).unwrap(),
            title: BlogTitle::new("Первый пост").unwrap(),
            slug: Slug::new(slug).unwrap(),
            body: BlogBody::new("Привет, мир!").unwrap(),
            num_views: ViewCount::new(0).unwrap(),
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
            updated_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    fn sample_payload(slug: &str) -> BlogFormPayload {
        BlogFormPayload {
            title: BlogTitle::new("Первый пост").unwrap(),
            slug: Slug::new(slug).unwrap(),
            body: BlogBody::new("Привет, мир!").unwrap(),
        }
    }

    #[test]
    fn detail_read_increments_view_counter() {
        let repo = TestRepository::new().with_blogs(vec![sample_blog(1, "first-post")]);

        for expected in 1..=3 {
            let blog = show_blog("first-post", &repo).unwrap();
            assert_eq!(blog.num_views.get(), expected);
        }
    }

    #[test]
    fn missing_slug_is_not_found() {
        let repo = TestRepository::new();

        let err = show_blog("missing", &repo).unwrap_err();

        assert!(matches!(err, ServiceError::NotFound));
        assert!(repo.list_blogs().unwrap().is_empty());
    }

    #[test]
    fn edit_page_does_not_record_a_view() {
        let repo = TestRepository::new().with_blogs(vec![sample_blog(1, "first-post")]);

        edit_blog_page("first-post", &repo).unwrap();

        let blog = repo
            .get_blog_by_slug(&Slug::new("first-post").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(blog.num_views.get(), 0);
    }

    #[test]
    fn update_returns_new_slug_and_retires_old_one() {
        let repo = TestRepository::new().with_blogs(vec![sample_blog(1, "first-post")]);

        let new_slug = update_blog("first-post", sample_payload("renamed-post"), &repo).unwrap();

        assert_eq!(new_slug.as_str(), "renamed-post");
        assert!(matches!(
            show_blog("first-post", &repo).unwrap_err(),
            ServiceError::NotFound
        ));
        assert!(show_blog("renamed-post", &repo).is_ok());
    }

    #[test]
    fn duplicate_slug_surfaces_as_form_error() {
        let repo = TestRepository::new()
            .with_blogs(vec![sample_blog(1, "first-post"), sample_blog(2, "second-post")]);

        let err = update_blog("second-post", sample_payload("first-post"), &repo).unwrap_err();

        assert!(matches!(err, ServiceError::Form(_)));
    }

    #[test]
    fn create_rejects_duplicate_slug() {
        let repo = TestRepository::new().with_blogs(vec![sample_blog(1, "first-post")]);

        let err = create_blog(sample_payload("first-post"), &repo).unwrap_err();

        assert!(matches!(err, ServiceError::Form(_)));
    }

    #[test]
    fn delete_removes_entry() {
        let repo = TestRepository::new().with_blogs(vec![sample_blog(1, "first-post")]);

        delete_blog("first-post", &repo).unwrap();

        assert!(repo.list_blogs().unwrap().is_empty());
    }
}
