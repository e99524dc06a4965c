//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod audit_log;
pub mod customer;
pub mod payment;
pub mod product;
pub mod purchase;
pub mod purchase_item;
pub mod wallet_transaction;
pub mod waybill;

// Re-export specific types to avoid conflicts
pub use audit_log::{Column as AuditLogColumn, Entity as AuditLog, Model as AuditLogModel};
pub use customer::{Column as CustomerColumn, Entity as Customer, Model as CustomerModel};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use purchase::{Column as PurchaseColumn, Entity as Purchase, Model as PurchaseModel};
pub use purchase_item::{
    Column as PurchaseItemColumn, Entity as PurchaseItem, Model as PurchaseItemModel,
};
pub use wallet_transaction::{
    Column as WalletTransactionColumn, Entity as WalletTransaction, Model as WalletTransactionModel,
};
pub use waybill::{Column as WaybillColumn, Entity as Waybill, Model as WaybillModel};
