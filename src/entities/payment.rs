//! Payment entity - Append-only record of funds applied to a purchase.
//!
//! One row is created per allocation unit during a deposit confirmation.
//! Rows are immutable after creation; corrections happen as new rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier for the payment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Purchase this payment was applied to
    pub purchase_id: i64,
    /// Amount applied
    pub amount: Decimal,
    /// How the payment was funded (e.g. `"WALLET"`, `"CASH"`)
    pub payment_method: String,
    /// Whether the payment has been confirmed
    pub is_confirmed: bool,
    /// Admin who confirmed it, if confirmed
    pub confirmed_by: Option<String>,
    /// When it was confirmed, if confirmed
    pub confirmed_at: Option<DateTimeUtc>,
    /// When the funds were applied
    pub paid_at: DateTimeUtc,
    /// Optional free-form notes
    pub notes: Option<String>,
}

/// Defines relationships between Payment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one purchase
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
