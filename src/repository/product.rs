use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::ProductId;
use crate::domain::version::{Version, VersionChange};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::models::version::{NewVersion as DbNewVersion, Version as DbVersion};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let items = products::table
            .order(products::name.asc())
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok(items)
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let product = products::table
            .filter(products::id.eq(id.get()))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        let product = product.map(TryInto::try_into).transpose()?;
        Ok(product)
    }

    fn list_versions(&self, product_id: ProductId) -> RepositoryResult<Vec<Version>> {
        use crate::schema::versions;

        let mut conn = self.conn()?;

        let items = versions::table
            .filter(versions::product_id.eq(product_id.get()))
            .order(versions::id.asc())
            .load::<DbVersion>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Version>, _>>()?;

        Ok(items)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product: DbNewProduct = product.clone().into();

        let created = diesel::insert_into(products::table)
            .values(db_product)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_product(&self, id: ProductId, update: &UpdateProduct) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let changeset: DbUpdateProduct = update.clone().into();

        let affected = diesel::update(products::table.filter(products::id.eq(id.get())))
            .set(changeset)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize> {
        use crate::schema::{products, versions};

        let mut conn = self.conn()?;

        // Versions are removed in the same transaction; the FK cascade is a
        // schema-level backstop.
        let affected = conn.transaction(|conn| {
            diesel::delete(versions::table.filter(versions::product_id.eq(id.get())))
                .execute(conn)?;

            diesel::delete(products::table.filter(products::id.eq(id.get()))).execute(conn)
        })?;

        Ok(affected)
    }

    fn apply_version_changes(
        &self,
        product_id: ProductId,
        changes: &[VersionChange],
    ) -> RepositoryResult<usize> {
        use crate::schema::versions;

        let mut conn = self.conn()?;

        let affected = conn.transaction(|conn| {
            let mut affected = 0;
            for change in changes {
                affected += match change {
                    VersionChange::Insert { name } => diesel::insert_into(versions::table)
                        .values(DbNewVersion {
                            product_id: product_id.get(),
                            name: name.as_str().to_string(),
                        })
                        .execute(conn)?,
                    VersionChange::Update { id, name } => diesel::update(
                        versions::table
                            .filter(versions::id.eq(id.get()))
                            .filter(versions::product_id.eq(product_id.get())),
                    )
                    .set(versions::name.eq(name.as_str()))
                    .execute(conn)?,
                    VersionChange::Delete { id } => diesel::delete(
                        versions::table
                            .filter(versions::id.eq(id.get()))
                            .filter(versions::product_id.eq(product_id.get())),
                    )
                    .execute(conn)?,
                };
            }
            Ok::<usize, diesel::result::Error>(affected)
        })?;

        Ok(affected)
    }
}
