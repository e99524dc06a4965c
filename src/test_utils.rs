//! Shared test utilities for the wallet engine.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        auth::{Actor, StaffRole},
        catalog, customer as customer_core, purchase as purchase_core, wallet,
    },
    entities,
    entities::purchase::PurchaseType,
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use std::sync::atomic::{AtomicU64, Ordering};

static PURCHASE_SEQ: AtomicU64 = AtomicU64::new(1);

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A shop admin of shop 1; may confirm and reject wallet transactions.
pub fn test_admin() -> Actor {
    Actor {
        user_id: "admin1".to_string(),
        shop_id: 1,
        role: StaffRole::ShopAdmin,
    }
}

/// Counter staff of shop 1; may create deposits but not confirm them.
pub fn test_staff() -> Actor {
    Actor {
        user_id: "staff1".to_string(),
        shop_id: 1,
        role: StaffRole::Staff,
    }
}

/// A fixed due date within the test month.
pub fn test_due_date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap_or_default()
}

/// Creates a test customer with sensible defaults.
///
/// # Defaults
/// * name: `"Test Customer"`
/// * phone: `"555-0100"`
/// * delivery address: `"12 Harbour Rd"`
pub async fn create_test_customer(
    db: &DatabaseConnection,
    shop_id: i64,
) -> Result<entities::customer::Model> {
    customer_core::create_customer(
        db,
        shop_id,
        "Test".to_string(),
        "Customer".to_string(),
        "555-0100".to_string(),
        "12 Harbour Rd".to_string(),
    )
    .await
}

/// Creates a test product with the given starting stock.
pub async fn create_test_product(
    db: &DatabaseConnection,
    shop_id: i64,
    stock_on_hand: i32,
) -> Result<entities::product::Model> {
    catalog::create_product(
        db,
        shop_id,
        "Test Product".to_string(),
        Decimal::from(10),
        stock_on_hand,
    )
    .await
}

/// Creates a pending credit purchase with a unique purchase number.
pub async fn create_test_purchase(
    db: &DatabaseConnection,
    customer_id: i64,
    total_amount: Decimal,
    due_date: NaiveDate,
) -> Result<entities::purchase::Model> {
    let seq = PURCHASE_SEQ.fetch_add(1, Ordering::Relaxed);
    purchase_core::create_purchase(
        db,
        1,
        customer_id,
        format!("P-{seq:04}"),
        total_amount,
        PurchaseType::Credit,
        due_date,
    )
    .await
}

/// Creates a pending cash deposit for the customer, acting as shop-1 staff.
pub async fn create_pending_deposit(
    db: &DatabaseConnection,
    customer_id: i64,
    amount: Decimal,
) -> Result<entities::wallet_transaction::Model> {
    wallet::create_deposit(
        db,
        &test_staff(),
        customer_id,
        amount,
        "CASH".to_string(),
        None,
        None,
    )
    .await
}
