//! Customer business logic - Lookups and the atomic wallet-balance update.
//!
//! The balance update is the only write path for `wallet_balance` and is
//! generic over `ConnectionTrait` so it can run inside the deposit
//! confirmation transaction.

use crate::{
    entities::{Customer, customer},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Finds an active customer by id within a shop scope.
///
/// Inactive customers and customers of other shops are treated as missing,
/// so callers cannot distinguish "no such customer" from "not yours".
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_active_customer<C>(
    conn: &C,
    customer_id: i64,
    shop_id: i64,
) -> Result<Option<customer::Model>>
where
    C: ConnectionTrait,
{
    Ok(Customer::find_by_id(customer_id)
        .one(conn)
        .await?
        .filter(|c| c.shop_id == shop_id && c.is_active))
}

/// Creates a new customer with a zero wallet balance.
///
/// # Errors
/// Returns an error if the name is empty or the insert fails.
pub async fn create_customer(
    db: &DatabaseConnection,
    shop_id: i64,
    first_name: String,
    last_name: String,
    phone: String,
    delivery_address: String,
) -> Result<customer::Model> {
    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        return Err(Error::Config {
            message: "Customer name cannot be empty".to_string(),
        });
    }

    let customer = customer::ActiveModel {
        shop_id: Set(shop_id),
        first_name: Set(first_name.trim().to_string()),
        last_name: Set(last_name.trim().to_string()),
        phone: Set(phone),
        delivery_address: Set(delivery_address),
        wallet_balance: Set(Decimal::ZERO),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    customer.insert(db).await.map_err(Into::into)
}

/// Atomically adjusts a customer's wallet balance by a signed delta.
///
/// Performs a single database-level update
/// (`UPDATE customers SET wallet_balance = wallet_balance + delta WHERE id = ?`)
/// rather than read-modify-write, so concurrent adjustments cannot lose
/// updates.
///
/// # Errors
/// Returns [`Error::CustomerNotFound`] if the customer does not exist.
pub async fn adjust_wallet_balance<C>(
    conn: &C,
    customer_id: i64,
    delta: Decimal,
) -> Result<customer::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    // First verify the customer exists
    Customer::find_by_id(customer_id)
        .one(conn)
        .await?
        .ok_or(Error::CustomerNotFound { id: customer_id })?;

    Customer::update_many()
        .col_expr(
            customer::Column::WalletBalance,
            Expr::col(customer::Column::WalletBalance).add(delta),
        )
        .filter(customer::Column::Id.eq(customer_id))
        .exec(conn)
        .await?;

    Customer::find_by_id(customer_id)
        .one(conn)
        .await?
        .ok_or(Error::CustomerNotFound { id: customer_id })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_create_customer_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_customer(
            &db,
            1,
            "   ".to_string(),
            "Doe".to_string(),
            "555-0100".to_string(),
            "1 Main St".to_string(),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_customer_starts_with_zero_balance() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, 1).await?;

        assert_eq!(customer.wallet_balance, Decimal::ZERO);
        assert!(customer.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_active_customer_scoping() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, 1).await?;

        assert!(get_active_customer(&db, customer.id, 1).await?.is_some());
        // Wrong shop looks like a missing customer
        assert!(get_active_customer(&db, customer.id, 2).await?.is_none());
        assert!(get_active_customer(&db, 999, 1).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_wallet_balance_accumulates() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, 1).await?;

        let updated = adjust_wallet_balance(&db, customer.id, dec!(150.00)).await?;
        assert_eq!(updated.wallet_balance, dec!(150.00));

        let updated = adjust_wallet_balance(&db, customer.id, dec!(-40.25)).await?;
        assert_eq!(updated.wallet_balance, dec!(109.75));

        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_wallet_balance_missing_customer() -> Result<()> {
        let db = setup_test_db().await?;

        let result = adjust_wallet_balance(&db, 999, dec!(10.00)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::CustomerNotFound { id: 999 }
        ));

        Ok(())
    }
}
