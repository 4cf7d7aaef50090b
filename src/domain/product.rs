use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, ProductDescription, ProductId, ProductName, ProductPrice,
};

/// A catalog product belonging to a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: ProductName,
    pub description: Option<ProductDescription>,
    pub price: ProductPrice,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to create a new [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub category_id: CategoryId,
    pub name: ProductName,
    pub description: Option<ProductDescription>,
    pub price: ProductPrice,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Field values applied to an existing [`Product`] on update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateProduct {
    pub category_id: CategoryId,
    pub name: ProductName,
    pub description: Option<ProductDescription>,
    pub price: ProductPrice,
    pub updated_at: NaiveDateTime,
}
