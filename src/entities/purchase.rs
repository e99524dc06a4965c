//! Purchase entity - A hire-purchase, layaway, or cash sale with a running
//! payment position.
//!
//! Invariant maintained by every write path: `outstanding_balance` equals
//! `max(0, total_amount - amount_paid)`, and `status` becomes `Completed`
//! exactly when the outstanding balance reaches zero.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a purchase
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PurchaseStatus {
    /// Created, no payment applied yet
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Partially paid
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    /// Fully paid
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// Cancelled before completion
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

/// How the purchase is financed
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PurchaseType {
    /// Paid in full at the counter; no delivery workflow
    #[sea_orm(string_value = "CASH")]
    Cash,
    /// Instalment credit purchase
    #[sea_orm(string_value = "CREDIT")]
    Credit,
    /// Goods held until fully paid
    #[sea_orm(string_value = "LAYAWAY")]
    Layaway,
}

/// Delivery workflow status for non-cash purchases
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum DeliveryStatus {
    /// Not yet fully paid, nothing scheduled
    #[sea_orm(string_value = "NOT_SCHEDULED")]
    NotScheduled,
    /// Waybill issued, awaiting delivery
    #[sea_orm(string_value = "SCHEDULED")]
    Scheduled,
    /// Goods delivered
    #[sea_orm(string_value = "DELIVERED")]
    Delivered,
}

/// Purchase database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    /// Unique identifier for the purchase
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Customer who made the purchase
    pub customer_id: i64,
    /// Shop scope of the purchase
    pub shop_id: i64,
    /// Human-facing purchase number (unique per platform)
    #[sea_orm(unique)]
    pub purchase_number: String,
    /// Total value of the purchase
    pub total_amount: Decimal,
    /// Sum of confirmed payments applied so far
    pub amount_paid: Decimal,
    /// `max(0, total_amount - amount_paid)`
    pub outstanding_balance: Decimal,
    /// Lifecycle status
    pub status: PurchaseStatus,
    /// Financing type
    pub purchase_type: PurchaseType,
    /// Date the outstanding balance falls due
    pub due_date: Date,
    /// Delivery workflow status
    pub delivery_status: DeliveryStatus,
    /// When the purchase was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Purchase and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each purchase belongs to one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    /// One purchase has many line items
    #[sea_orm(has_many = "super::purchase_item::Entity")]
    Items,
    /// One purchase has many payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::purchase_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
