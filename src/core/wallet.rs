//! Wallet engine - Deposit creation, confirmation with auto-allocation, and
//! rejection.
//!
//! Creating a wallet transaction only records intent: the customer's live
//! balance is untouched and the stored `balance_before`/`balance_after` pair
//! is a projection. All real effects happen in [`confirm_deposit`], inside a
//! single database transaction: the status flip, the wallet-balance delta,
//! payment rows against outstanding purchases, and completion side-effects.
//! A failure anywhere in that apply step rolls everything back and leaves the
//! wallet transaction pending for an explicit retry.

use crate::{
    core::{
        allocation::{self, AllocationPlan},
        audit,
        auth::Actor,
        customer as customer_core,
        purchase::{self as purchase_core, AppliedPayment},
    },
    entities::{
        WalletTransaction, customer,
        wallet_transaction::{self, TransactionStatus, TransactionType},
        waybill,
    },
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{DatabaseTransaction, QueryOrder, Set, TransactionTrait, prelude::*};

/// Everything a confirmed deposit changed, returned to the caller for
/// display and auditing.
#[derive(Clone, Debug)]
pub struct DepositConfirmation {
    /// The wallet transaction in its confirmed state
    pub transaction: wallet_transaction::Model,
    /// The customer with the updated wallet balance
    pub customer: customer::Model,
    /// Payments applied to purchases, in settlement order
    pub settled: Vec<AppliedPayment>,
    /// Waybills generated for purchases that just completed
    pub waybills: Vec<waybill::Model>,
    /// Deposit funds left as free wallet balance
    pub leftover: Decimal,
}

/// Creates a pending deposit for a customer.
///
/// The customer's live balance is not touched; the stored before/after pair
/// is a projection that only becomes authoritative on confirmation. Customers
/// outside the actor's wallet-load scope are reported as missing rather than
/// forbidden, so callers cannot probe other shops' customer ids.
///
/// # Errors
/// - [`Error::InvalidAmount`] if `amount` is not positive
/// - [`Error::CustomerNotFound`] if the customer is missing, inactive, or out
///   of scope
pub async fn create_deposit(
    db: &DatabaseConnection,
    actor: &Actor,
    customer_id: i64,
    amount: Decimal,
    payment_method: String,
    reference: Option<String>,
    description: Option<String>,
) -> Result<wallet_transaction::Model> {
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount { amount });
    }

    let customer = crate::entities::Customer::find_by_id(customer_id)
        .one(db)
        .await?
        .filter(|c| c.is_active && actor.can_load_wallet(c.shop_id))
        .ok_or(Error::CustomerNotFound { id: customer_id })?;

    let balance_before = customer.wallet_balance;
    let transaction = wallet_transaction::ActiveModel {
        customer_id: Set(customer.id),
        shop_id: Set(customer.shop_id),
        transaction_type: Set(TransactionType::Deposit),
        amount: Set(amount),
        balance_before: Set(balance_before),
        balance_after: Set(balance_before + amount),
        status: Set(TransactionStatus::Pending),
        payment_method: Set(payment_method),
        reference: Set(reference),
        description: Set(description),
        created_by: Set(actor.user_id.clone()),
        confirmed_by: Set(None),
        confirmed_at: Set(None),
        rejected_reason: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    audit::record(
        db,
        actor,
        "wallet.deposit.created",
        "wallet_transaction",
        &transaction.id.to_string(),
        serde_json::json!({
            "customer_id": customer.id,
            "amount": transaction.amount,
            "payment_method": transaction.payment_method,
        }),
    )
    .await;

    Ok(transaction)
}

/// Confirms a pending wallet transaction and auto-allocates deposit funds
/// across the customer's outstanding purchases.
///
/// The whole apply step runs in one database transaction. The status flip is
/// a conditional update keyed on the current `Pending` status, so of two
/// concurrent confirmations of the same id exactly one succeeds and the
/// other observes [`Error::TransactionNotFound`]. The audit entry is written
/// best-effort after commit.
///
/// # Errors
/// - [`Error::NotAuthorized`] if the actor cannot confirm for the
///   transaction's shop
/// - [`Error::TransactionNotFound`] if the transaction is missing or no
///   longer pending
/// - [`Error::DepositConfirmationFailed`] if the apply step failed; all
///   changes are rolled back and the transaction remains pending
pub async fn confirm_deposit(
    db: &DatabaseConnection,
    actor: &Actor,
    transaction_id: i64,
) -> Result<DepositConfirmation> {
    let pending = WalletTransaction::find_by_id(transaction_id)
        .one(db)
        .await?
        .ok_or(Error::TransactionNotFound { id: transaction_id })?;

    if !actor.can_confirm_deposit(pending.shop_id) {
        return Err(Error::NotAuthorized {
            action: format!("confirm wallet transaction {transaction_id}"),
        });
    }

    if pending.status != TransactionStatus::Pending {
        return Err(Error::TransactionNotFound { id: transaction_id });
    }

    let now = chrono::Utc::now();
    let txn = db.begin().await?;

    // Claim the transaction: the filter on the current status makes the
    // pending -> confirmed flip atomic, closing the double-confirm race.
    let claimed = WalletTransaction::update_many()
        .set(wallet_transaction::ActiveModel {
            status: Set(TransactionStatus::Confirmed),
            confirmed_by: Set(Some(actor.user_id.clone())),
            confirmed_at: Set(Some(now)),
            ..Default::default()
        })
        .filter(wallet_transaction::Column::Id.eq(transaction_id))
        .filter(wallet_transaction::Column::Status.eq(TransactionStatus::Pending))
        .exec(&txn)
        .await?;
    if claimed.rows_affected == 0 {
        return Err(Error::TransactionNotFound { id: transaction_id });
    }

    let outcome = match apply_confirmed(&txn, actor, &pending, now).await {
        Ok(outcome) => outcome,
        Err(err) => {
            // Drop would roll back too; be explicit about it.
            let _ = txn.rollback().await;
            return Err(Error::DepositConfirmationFailed {
                message: err.to_string(),
            });
        }
    };

    if let Err(err) = txn.commit().await {
        return Err(Error::DepositConfirmationFailed {
            message: err.to_string(),
        });
    }

    audit::record(
        db,
        actor,
        "wallet.deposit.confirmed",
        "wallet_transaction",
        &transaction_id.to_string(),
        serde_json::json!({
            "customer_id": outcome.customer.id,
            "amount": outcome.transaction.amount,
            "settled_purchases": outcome
                .settled
                .iter()
                .map(|s| serde_json::json!({
                    "purchase_id": s.purchase.id,
                    "amount": s.payment.amount,
                    "completed": s.just_completed,
                }))
                .collect::<Vec<_>>(),
            "leftover": outcome.leftover,
        }),
    )
    .await;

    Ok(outcome)
}

/// The apply step of a confirmation, run inside the open transaction after
/// the status claim. Any error here aborts the whole confirmation.
async fn apply_confirmed(
    txn: &DatabaseTransaction,
    actor: &Actor,
    pending: &wallet_transaction::Model,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<DepositConfirmation> {
    let sign = pending.transaction_type.balance_sign();
    let delta = pending.amount * Decimal::from(sign);
    let customer = customer_core::adjust_wallet_balance(txn, pending.customer_id, delta).await?;

    // Only inbound funds settle purchase debt; withdrawals just move balance.
    let plan = if sign > 0 {
        let outstanding = purchase_core::get_outstanding_purchases(txn, customer.id).await?;
        allocation::plan_allocation(pending.amount, &outstanding)
    } else {
        AllocationPlan {
            allocations: Vec::new(),
            leftover: Decimal::ZERO,
        }
    };

    let mut settled = Vec::with_capacity(plan.allocations.len());
    let mut waybills = Vec::new();
    for planned in &plan.allocations {
        let applied =
            purchase_core::apply_payment(txn, actor, planned.purchase_id, planned.amount, now)
                .await?;
        if applied.just_completed {
            if let Some(waybill) =
                purchase_core::settle_completed_purchase(txn, actor, &applied.purchase, &customer, now)
                    .await?
            {
                waybills.push(waybill);
            }
        }
        settled.push(applied);
    }

    let transaction = WalletTransaction::find_by_id(pending.id)
        .one(txn)
        .await?
        .ok_or(Error::TransactionNotFound { id: pending.id })?;

    Ok(DepositConfirmation {
        transaction,
        customer,
        settled,
        waybills,
        leftover: plan.leftover,
    })
}

/// Rejects a pending wallet transaction, recording the reason.
///
/// Symmetric to confirmation but with no balance or purchase effects: the
/// same conditional status flip guards against racing lifecycle changes.
///
/// # Errors
/// - [`Error::NotAuthorized`] if the actor cannot act for the transaction's
///   shop
/// - [`Error::TransactionNotFound`] if the transaction is missing or no
///   longer pending
pub async fn reject_deposit(
    db: &DatabaseConnection,
    actor: &Actor,
    transaction_id: i64,
    reason: String,
) -> Result<wallet_transaction::Model> {
    let pending = WalletTransaction::find_by_id(transaction_id)
        .one(db)
        .await?
        .ok_or(Error::TransactionNotFound { id: transaction_id })?;

    if !actor.can_confirm_deposit(pending.shop_id) {
        return Err(Error::NotAuthorized {
            action: format!("reject wallet transaction {transaction_id}"),
        });
    }

    let rejected = WalletTransaction::update_many()
        .set(wallet_transaction::ActiveModel {
            status: Set(TransactionStatus::Rejected),
            rejected_reason: Set(Some(reason)),
            ..Default::default()
        })
        .filter(wallet_transaction::Column::Id.eq(transaction_id))
        .filter(wallet_transaction::Column::Status.eq(TransactionStatus::Pending))
        .exec(db)
        .await?;
    if rejected.rows_affected == 0 {
        return Err(Error::TransactionNotFound { id: transaction_id });
    }

    audit::record(
        db,
        actor,
        "wallet.deposit.rejected",
        "wallet_transaction",
        &transaction_id.to_string(),
        serde_json::json!({ "customer_id": pending.customer_id }),
    )
    .await;

    WalletTransaction::find_by_id(transaction_id)
        .one(db)
        .await?
        .ok_or(Error::TransactionNotFound { id: transaction_id })
}

/// Retrieves a wallet transaction by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_wallet_transaction_by_id(
    db: &DatabaseConnection,
    transaction_id: i64,
) -> Result<Option<wallet_transaction::Model>> {
    WalletTransaction::find_by_id(transaction_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists a shop's pending wallet transactions, oldest first - the admin
/// confirmation queue.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_pending_transactions_for_shop(
    db: &DatabaseConnection,
    shop_id: i64,
) -> Result<Vec<wallet_transaction::Model>> {
    WalletTransaction::find()
        .filter(wallet_transaction::Column::ShopId.eq(shop_id))
        .filter(wallet_transaction::Column::Status.eq(TransactionStatus::Pending))
        .order_by_asc(wallet_transaction::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}
