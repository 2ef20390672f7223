//! Order line item entity - One cart line of a committed order.
//!
//! Line items belong to exactly one order and capture the unit price at
//! sale time, independent of later catalog price changes. `product_id` is
//! a plain column, not a foreign key: the referenced product may be hard
//! deleted later and readers must tolerate the dangling id.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order line item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    /// Unique identifier for the line item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the order this line belongs to
    pub order_id: i64,
    /// ID of the product sold; may dangle after a catalog delete
    pub product_id: i64,
    /// Units sold on this line, always positive
    pub quantity: i32,
    /// Unit price captured at sale time
    pub price: f64,
}

/// Defines relationships between OrderItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line item belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
