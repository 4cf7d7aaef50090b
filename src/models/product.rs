use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};
use crate::domain::types::{ProductDescription, ProductName, ProductPrice, TypeConstraintError};

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Product`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Changeset applied to an existing product row. Every field is always set,
/// so a `None` description clears the column.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProduct {
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: product.id.try_into()?,
            category_id: product.category_id.try_into()?,
            name: ProductName::new(product.name)?,
            description: product
                .description
                .map(ProductDescription::new)
                .transpose()?,
            price: ProductPrice::new(product.price)?,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl From<DomainNewProduct> for NewProduct {
    fn from(product: DomainNewProduct) -> Self {
        Self {
            category_id: product.category_id.get(),
            name: product.name.into_inner(),
            description: product.description.map(ProductDescription::into_inner),
            price: product.price.get(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<DomainUpdateProduct> for UpdateProduct {
    fn from(product: DomainUpdateProduct) -> Self {
        Self {
            category_id: product.category_id.get(),
            name: product.name.into_inner(),
            description: product.description.map(ProductDescription::into_inner),
            price: product.price.get(),
            updated_at: product.updated_at,
        }
    }
}
