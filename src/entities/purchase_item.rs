//! Purchase line item entity - One product line within a purchase.
//!
//! Line items drive the stock decrement when a purchase completes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase line item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_items")]
pub struct Model {
    /// Unique identifier for the line item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Purchase this line belongs to
    pub purchase_id: i64,
    /// Product sold on this line
    pub product_id: i64,
    /// Number of units sold
    pub quantity: i32,
    /// Unit price at time of sale
    pub unit_price: Decimal,
}

/// Defines relationships between PurchaseItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line item belongs to one purchase
    #[sea_orm(
        belongs_to = "super::purchase::Entity",
        from = "Column::PurchaseId",
        to = "super::purchase::Column::Id"
    )]
    Purchase,
    /// Each line item references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchase.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
