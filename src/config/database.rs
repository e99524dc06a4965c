//! Database configuration module.
//!
//! Handles `SQLite` database connection and table creation using `SeaORM`.
//! Table creation uses `Schema::create_table_from_entity` so the database
//! schema is generated from the entity definitions and cannot drift from the
//! Rust structs.

use crate::entities::{
    AuditLog, Customer, Payment, Product, Purchase, PurchaseItem, WalletTransaction, Waybill,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/wallet.sqlite".to_string())
}

/// Establishes a connection to the database using the `DATABASE_URL`
/// environment variable, falling back to a default local `SQLite` file.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
///
/// # Errors
/// Returns an error if any table creation statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let statements = [
        schema.create_table_from_entity(Customer),
        schema.create_table_from_entity(WalletTransaction),
        schema.create_table_from_entity(Product),
        schema.create_table_from_entity(Purchase),
        schema.create_table_from_entity(PurchaseItem),
        schema.create_table_from_entity(Payment),
        schema.create_table_from_entity(Waybill),
        schema.create_table_from_entity(AuditLog),
    ];

    for statement in &statements {
        db.execute(builder.build(statement)).await?;
    }

    Ok(())
}
