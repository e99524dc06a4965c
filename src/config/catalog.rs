//! Catalog seed configuration loading from config.toml
//!
//! The products defined in config.toml are used to seed a shop's catalog on
//! first run, so a fresh installation has stock to sell against.

use crate::{
    core::catalog,
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of products to seed
    pub products: Vec<ProductConfig>,
}

/// Configuration for a single catalog product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    /// Shop that carries the product
    pub shop_id: i64,
    /// Product name
    pub name: String,
    /// List price
    pub price: Decimal,
    /// Starting stock on hand
    pub stock_on_hand: i32,
}

/// Loads catalog configuration from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Seeds the product catalog from configuration, skipping products that
/// already exist by name within their shop.
///
/// # Errors
/// Returns an error if a lookup or insert fails.
pub async fn seed_products(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    use crate::entities::{Product, product};
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

    let mut seeded = 0;
    for entry in &config.products {
        let existing = Product::find()
            .filter(product::Column::ShopId.eq(entry.shop_id))
            .filter(product::Column::Name.eq(entry.name.as_str()))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        catalog::create_product(
            db,
            entry.shop_id,
            entry.name.clone(),
            entry.price,
            entry.stock_on_hand,
        )
        .await?;
        seeded += 1;
    }

    if seeded > 0 {
        info!(seeded, "seeded catalog products from configuration");
    }
    Ok(seeded)
}
