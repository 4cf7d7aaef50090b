use diesel::prelude::*;

use crate::domain::blog::{Blog, NewBlog, UpdateBlog};
use crate::domain::types::Slug;
use crate::models::blog::{
    Blog as DbBlog, NewBlog as DbNewBlog, UpdateBlog as DbUpdateBlog,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{BlogReader, BlogWriter, DieselRepository};

impl BlogReader for DieselRepository {
    fn list_blogs(&self) -> RepositoryResult<Vec<Blog>> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;

        let items = blogs::table
            .order(blogs::title.asc())
            .load::<DbBlog>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Blog>, _>>()?;

        Ok(items)
    }

    fn get_blog_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Blog>> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;

        let blog = blogs::table
            .filter(blogs::slug.eq(slug.as_str()))
            .first::<DbBlog>(&mut conn)
            .optional()?;

        let blog = blog.map(TryInto::try_into).transpose()?;
        Ok(blog)
    }
}

impl BlogWriter for DieselRepository {
    fn create_blog(&self, blog: &NewBlog) -> RepositoryResult<Blog> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;
        let db_blog: DbNewBlog = blog.clone().into();

        let created = diesel::insert_into(blogs::table)
            .values(db_blog)
            .get_result::<DbBlog>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_blog(&self, slug: &Slug, update: &UpdateBlog) -> RepositoryResult<usize> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;
        let changeset: DbUpdateBlog = update.clone().into();

        let affected = diesel::update(blogs::table.filter(blogs::slug.eq(slug.as_str())))
            .set(changeset)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_blog(&self, slug: &Slug) -> RepositoryResult<usize> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;

        let affected = diesel::delete(blogs::table.filter(blogs::slug.eq(slug.as_str())))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn increment_blog_views(&self, slug: &Slug) -> RepositoryResult<Option<Blog>> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;

        // Single UPDATE .. RETURNING statement so concurrent reads cannot
        // lose increments.
        let updated = diesel::update(blogs::table.filter(blogs::slug.eq(slug.as_str())))
            .set(blogs::num_views.eq(blogs::num_views + 1))
            .get_result::<DbBlog>(&mut conn)
            .optional()?;

        let updated = updated.map(TryInto::try_into).transpose()?;
        Ok(updated)
    }
}
