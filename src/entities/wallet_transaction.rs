//! Wallet transaction entity - The ledger of customer wallet movements.
//!
//! Each row records a deposit, withdrawal, or refund with snapshot balances.
//! `balance_before`/`balance_after` are computed as a projection at creation
//! time and only become authoritative once the row reaches `Confirmed`.
//! `Confirmed` and `Rejected` are terminal; rows are never mutated afterwards.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// Kind of wallet movement
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum TransactionType {
    /// Funds loaded into the wallet by staff
    #[sea_orm(string_value = "DEPOSIT")]
    Deposit,
    /// Funds taken out of the wallet
    #[sea_orm(string_value = "WITHDRAWAL")]
    Withdrawal,
    /// Funds returned to the wallet from a reversed purchase
    #[sea_orm(string_value = "REFUND")]
    Refund,
}

impl TransactionType {
    /// Sign of the wallet-balance delta this movement carries when confirmed.
    pub const fn balance_sign(self) -> i64 {
        match self {
            Self::Deposit | Self::Refund => 1,
            Self::Withdrawal => -1,
        }
    }
}

/// Lifecycle status of a wallet transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum TransactionStatus {
    /// Created by staff, awaiting admin confirmation
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Confirmed by an admin; terminal
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    /// Rejected by an admin; terminal
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

/// Wallet transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallet_transactions")]
pub struct Model {
    /// Unique identifier for the wallet transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Customer whose wallet this movement belongs to
    pub customer_id: i64,
    /// Shop scope of the transaction
    pub shop_id: i64,
    /// Kind of movement: deposit, withdrawal, or refund
    pub transaction_type: TransactionType,
    /// Positive amount of the movement
    pub amount: Decimal,
    /// Customer balance at creation time
    pub balance_before: Decimal,
    /// Projected balance if this movement is confirmed
    pub balance_after: Decimal,
    /// Lifecycle status
    pub status: TransactionStatus,
    /// How the funds arrived (e.g. `"CASH"`, `"BANK_TRANSFER"`)
    pub payment_method: String,
    /// Optional external reference (bank slip number, etc.)
    pub reference: Option<String>,
    /// Optional free-form description
    pub description: Option<String>,
    /// Staff member who created the transaction
    pub created_by: String,
    /// Admin who confirmed it, if confirmed
    pub confirmed_by: Option<String>,
    /// When it was confirmed, if confirmed
    pub confirmed_at: Option<DateTimeUtc>,
    /// Reason recorded on rejection, if rejected
    pub rejected_reason: Option<String>,
    /// When the transaction was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between WalletTransaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each wallet transaction belongs to one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
