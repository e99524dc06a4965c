//! Customer entity - Represents a retail customer with a prepaid wallet.
//!
//! The `wallet_balance` column is the authoritative running balance. It is
//! only ever mutated inside a deposit-confirmation transaction; creating a
//! pending wallet transaction never touches it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Unique identifier for the customer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Shop this customer belongs to
    pub shop_id: i64,
    /// Customer's first name
    pub first_name: String,
    /// Customer's last name
    pub last_name: String,
    /// Contact phone number, used on generated waybills
    pub phone: String,
    /// Delivery address, used on generated waybills
    pub delivery_address: String,
    /// Authoritative wallet balance; mutated only on transaction confirmation
    pub wallet_balance: Decimal,
    /// Inactive customers cannot receive new wallet transactions
    pub is_active: bool,
    /// When the customer record was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Customer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One customer has many wallet transactions
    #[sea_orm(has_many = "super::wallet_transaction::Entity")]
    WalletTransactions,
    /// One customer has many purchases
    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchases,
}

impl Related<super::wallet_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WalletTransactions.def()
    }
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
