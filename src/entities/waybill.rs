//! Waybill entity - Delivery authorization for a fully paid purchase.
//!
//! At most one waybill exists per purchase; the unique index on
//! `purchase_id` backs the existence check performed before creation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Waybill database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "waybills")]
pub struct Model {
    /// Unique identifier for the waybill
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Purchase this waybill fulfils; unique, at most one waybill per purchase
    #[sea_orm(unique)]
    pub purchase_id: i64,
    /// Human-facing waybill number
    pub waybill_number: String,
    /// Recipient name, copied from the customer at generation time
    pub recipient_name: String,
    /// Recipient phone number
    pub recipient_phone: String,
    /// Delivery address
    pub recipient_address: String,
    /// Optional delivery instructions
    pub special_instructions: Option<String>,
    /// Admin whose confirmation triggered generation
    pub generated_by: String,
    /// When the waybill was generated
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Waybill and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each waybill belongs to one purchase
    #[sea_orm(
        belongs_to = "super::purchase::Entity",
        from = "Column::PurchaseId",
        to = "super::purchase::Column::Id"
    )]
    Purchase,
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchase.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
