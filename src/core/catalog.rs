//! Catalog business logic - Product records and on-hand stock movements.

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Retrieves a product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id<C>(conn: &C, product_id: i64) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(conn)
        .await
        .map_err(Into::into)
}

/// Creates a new catalog product, performing input validation.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    shop_id: i64,
    name: String,
    price: Decimal,
    stock_on_hand: i32,
) -> Result<product::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    if price < Decimal::ZERO {
        return Err(Error::InvalidAmount { amount: price });
    }

    let product = product::ActiveModel {
        shop_id: Set(shop_id),
        name: Set(name.trim().to_string()),
        price: Set(price),
        stock_on_hand: Set(stock_on_hand),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Atomically decrements a product's on-hand stock.
///
/// Uses a single database-level update
/// (`UPDATE products SET stock_on_hand = stock_on_hand - qty WHERE id = ?`).
/// Stock may go negative; oversold stock is an operational report concern,
/// not a reason to block a completed sale.
///
/// # Errors
/// Returns an error if the database update fails.
pub async fn decrement_stock<C>(conn: &C, product_id: i64, quantity: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    Product::update_many()
        .col_expr(
            product::Column::StockOnHand,
            Expr::col(product::Column::StockOnHand).sub(quantity),
        )
        .filter(product::Column::Id.eq(product_id))
        .exec(conn)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_create_product_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_product(&db, 1, "  ".to_string(), dec!(10.00), 5).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = create_product(&db, 1, "Fridge".to_string(), dec!(-1.00), 5).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_decrement_stock() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, 1, 10).await?;

        decrement_stock(&db, product.id, 3).await?;

        let updated = get_product_by_id(&db, product.id).await?.unwrap();
        assert_eq!(updated.stock_on_hand, 7);

        Ok(())
    }
}
