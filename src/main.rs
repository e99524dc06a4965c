//! Bootstrap binary: prepares the database schema and seeds the product
//! catalog so the admin portal has something to run against.

use layaway_wallet::{config, errors::Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenvy::dotenv().ok();

    // 3. Connect and prepare the schema
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ready."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 4. Seed the catalog if a config file is present
    match std::env::var("CATALOG_CONFIG") {
        Ok(path) => {
            let catalog = config::catalog::load_config(&path)
                .inspect_err(|e| error!("Failed to load catalog config {path}: {e}"))?;
            let seeded = config::catalog::seed_products(&db, &catalog).await?;
            info!(seeded, "Catalog seeding finished.");
        }
        Err(_) => info!("CATALOG_CONFIG not set; skipping catalog seeding."),
    }

    Ok(())
}
