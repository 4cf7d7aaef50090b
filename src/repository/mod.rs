use crate::db::{DbConnection, DbPool};
use crate::domain::blog::{Blog, NewBlog, UpdateBlog};
use crate::domain::category::{Category, NewCategory};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::{CategoryId, ProductId, Slug};
use crate::domain::version::{Version, VersionChange};
use crate::repository::errors::RepositoryResult;

pub mod blog;
pub mod category;
pub mod errors;
pub mod product;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List all categories ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities. Categories have no mutating HTTP
/// route; this trait exists for seeding and tests.
pub trait CategoryWriter {
    /// Persist a new category and return it with its assigned identifier.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
}

/// Read-only operations for product entities and their versions.
pub trait ProductReader {
    /// List all products ordered by name.
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    /// List the versions owned by a product.
    fn list_versions(&self, product_id: ProductId) -> RepositoryResult<Vec<Version>>;
}

/// Write operations for product entities and their versions.
pub trait ProductWriter {
    /// Persist a new product and return it with its assigned identifier.
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    /// Update an existing product, returning the number of affected rows.
    fn update_product(&self, id: ProductId, update: &UpdateProduct) -> RepositoryResult<usize>;
    /// Delete a product and its versions in one transaction, returning the
    /// number of deleted product rows.
    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize>;
    /// Apply a batch of version changes scoped to one product in a single
    /// transaction. Changes referencing versions of other products are
    /// ignored by the ownership filter.
    fn apply_version_changes(
        &self,
        product_id: ProductId,
        changes: &[VersionChange],
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for blog entities.
pub trait BlogReader {
    /// List all blog entries ordered by title.
    fn list_blogs(&self) -> RepositoryResult<Vec<Blog>>;
    /// Retrieve a blog entry by its slug.
    fn get_blog_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Blog>>;
}

/// Write operations for blog entities.
pub trait BlogWriter {
    /// Persist a new blog entry and return it with its assigned identifier.
    fn create_blog(&self, blog: &NewBlog) -> RepositoryResult<Blog>;
    /// Update the blog entry currently addressed by `slug`, returning the
    /// number of affected rows.
    fn update_blog(&self, slug: &Slug, update: &UpdateBlog) -> RepositoryResult<usize>;
    /// Delete a blog entry by its slug, returning the number of deleted rows.
    fn delete_blog(&self, slug: &Slug) -> RepositoryResult<usize>;
    /// Atomically increment the view counter of the blog addressed by `slug`
    /// and return the updated entry, or `None` if no blog has that slug.
    fn increment_blog_views(&self, slug: &Slug) -> RepositoryResult<Option<Blog>>;
}
