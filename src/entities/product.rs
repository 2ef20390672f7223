//! Product entity - Represents items in the shop's catalog.
//!
//! Each product carries a display name, unit price, current stock level,
//! a category for menu grouping, and an optional opaque image reference.
//! Stock is only ever decremented through the checkout engine's conditional
//! update, so it can never go negative.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the product (e.g., "Espresso", "Iced Latte")
    pub name: String,
    /// Unit price in the shop's currency
    pub price: f64,
    /// Units currently available for sale; never negative
    pub stock: i32,
    /// Menu category (e.g., "coffee", "bakery"), defaults to "general"
    pub category: String,
    /// Opaque image reference, if one has been uploaded
    pub image: Option<String>,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Products have no owning relations. Order line items reference products
/// by plain id so catalog deletes never fail against sales history.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
