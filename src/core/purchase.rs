//! Purchase ledger business logic - Outstanding-balance queries, payment
//! application, and the completion side-effect block.
//!
//! Every write path here maintains the ledger invariant
//! `outstanding_balance == max(0, total_amount - amount_paid)` and flips
//! status to `Completed` exactly when the outstanding balance reaches zero.
//! The payment-application helpers are generic over `ConnectionTrait` so the
//! wallet engine can run them inside its confirmation transaction.

use crate::{
    core::{auth::Actor, catalog},
    entities::{
        Purchase, PurchaseItem, Waybill, customer, payment,
        purchase::{self, DeliveryStatus, PurchaseStatus, PurchaseType},
        purchase_item, waybill,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};

/// The outcome of applying one allocation unit to a purchase
#[derive(Clone, Debug)]
pub struct AppliedPayment {
    /// The payment row that was created
    pub payment: payment::Model,
    /// The purchase after the update
    pub purchase: purchase::Model,
    /// Whether this application moved the purchase into `Completed`
    pub just_completed: bool,
}

/// Retrieves a customer's purchases that can still receive funds, in
/// settlement order (due date ascending, then id ascending).
///
/// This is the snapshot the allocation planner runs over; keeping the SQL
/// ordering identical to the planner's sort keeps plans reproducible.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_outstanding_purchases<C>(
    conn: &C,
    customer_id: i64,
) -> Result<Vec<purchase::Model>>
where
    C: ConnectionTrait,
{
    Purchase::find()
        .filter(purchase::Column::CustomerId.eq(customer_id))
        .filter(
            purchase::Column::Status.is_in([PurchaseStatus::Active, PurchaseStatus::Pending]),
        )
        .filter(purchase::Column::OutstandingBalance.gt(Decimal::ZERO))
        .order_by_asc(purchase::Column::DueDate)
        .order_by_asc(purchase::Column::Id)
        .all(conn)
        .await
        .map_err(Into::into)
}

/// Creates a new purchase with nothing paid yet, performing input validation.
///
/// # Errors
/// Returns an error if the total amount is not positive or the insert fails.
pub async fn create_purchase(
    db: &DatabaseConnection,
    shop_id: i64,
    customer_id: i64,
    purchase_number: String,
    total_amount: Decimal,
    purchase_type: PurchaseType,
    due_date: NaiveDate,
) -> Result<purchase::Model> {
    if total_amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount {
            amount: total_amount,
        });
    }

    let purchase = purchase::ActiveModel {
        shop_id: Set(shop_id),
        customer_id: Set(customer_id),
        purchase_number: Set(purchase_number),
        total_amount: Set(total_amount),
        amount_paid: Set(Decimal::ZERO),
        outstanding_balance: Set(total_amount),
        status: Set(PurchaseStatus::Pending),
        purchase_type: Set(purchase_type),
        due_date: Set(due_date),
        delivery_status: Set(DeliveryStatus::NotScheduled),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    purchase.insert(db).await.map_err(Into::into)
}

/// Adds a product line to a purchase.
///
/// # Errors
/// Returns an error if the quantity is not positive or the insert fails.
pub async fn add_purchase_item(
    db: &DatabaseConnection,
    purchase_id: i64,
    product_id: i64,
    quantity: i32,
    unit_price: Decimal,
) -> Result<purchase_item::Model> {
    if quantity <= 0 {
        return Err(Error::Config {
            message: format!("Line quantity must be positive, got {quantity}"),
        });
    }

    let item = purchase_item::ActiveModel {
        purchase_id: Set(purchase_id),
        product_id: Set(product_id),
        quantity: Set(quantity),
        unit_price: Set(unit_price),
        ..Default::default()
    };

    item.insert(db).await.map_err(Into::into)
}

/// Applies one allocation unit of wallet funds to a purchase.
///
/// Re-reads the purchase's current position from the store (never from a
/// planning snapshot, which may be stale within the same transaction),
/// creates the confirmed payment row, and updates the purchase's paid and
/// outstanding amounts. A pending purchase becomes active on its first
/// partial payment; any purchase becomes completed when its outstanding
/// balance reaches zero.
///
/// # Errors
/// Returns [`Error::PurchaseNotFound`] if the purchase is missing; any
/// database error otherwise.
pub async fn apply_payment<C>(
    conn: &C,
    actor: &Actor,
    purchase_id: i64,
    amount: Decimal,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<AppliedPayment>
where
    C: ConnectionTrait,
{
    let current = Purchase::find_by_id(purchase_id)
        .one(conn)
        .await?
        .ok_or(Error::PurchaseNotFound { id: purchase_id })?;

    let new_amount_paid = current.amount_paid + amount;
    let new_outstanding = (current.total_amount - new_amount_paid).max(Decimal::ZERO);
    let is_completed = new_outstanding <= Decimal::ZERO;
    let just_completed = is_completed && current.status != PurchaseStatus::Completed;

    let payment = payment::ActiveModel {
        purchase_id: Set(purchase_id),
        amount: Set(amount),
        payment_method: Set("WALLET".to_string()),
        is_confirmed: Set(true),
        confirmed_by: Set(Some(actor.user_id.clone())),
        confirmed_at: Set(Some(now)),
        paid_at: Set(now),
        notes: Set(None),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    let new_status = if is_completed {
        PurchaseStatus::Completed
    } else if current.status == PurchaseStatus::Pending {
        PurchaseStatus::Active
    } else {
        current.status
    };

    let mut active: purchase::ActiveModel = current.into();
    active.amount_paid = Set(new_amount_paid);
    active.outstanding_balance = Set(new_outstanding);
    active.status = Set(new_status);
    let purchase = active.update(conn).await?;

    Ok(AppliedPayment {
        payment,
        purchase,
        just_completed,
    })
}

/// Runs the completion side-effect block for a purchase that just became
/// fully paid: stock decrement per line item, waybill generation, and
/// delivery scheduling.
///
/// Cash purchases have no delivery workflow and are skipped. The waybill
/// existence check gates the whole block, so a retried completion neither
/// double-decrements stock nor issues a second waybill. Returns the waybill
/// if one was generated.
///
/// # Errors
/// Returns an error if any of the underlying store writes fail.
pub async fn settle_completed_purchase<C>(
    conn: &C,
    actor: &Actor,
    purchase: &purchase::Model,
    recipient: &customer::Model,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<Option<waybill::Model>>
where
    C: ConnectionTrait,
{
    if purchase.purchase_type == PurchaseType::Cash {
        return Ok(None);
    }

    // Idempotency guard for the whole block
    let existing = Waybill::find()
        .filter(waybill::Column::PurchaseId.eq(purchase.id))
        .one(conn)
        .await?;
    if existing.is_some() {
        return Ok(None);
    }

    let items = PurchaseItem::find()
        .filter(purchase_item::Column::PurchaseId.eq(purchase.id))
        .all(conn)
        .await?;
    for item in &items {
        catalog::decrement_stock(conn, item.product_id, item.quantity).await?;
    }

    let waybill = waybill::ActiveModel {
        purchase_id: Set(purchase.id),
        waybill_number: Set(format!("WB-{}", purchase.purchase_number)),
        recipient_name: Set(format!(
            "{} {}",
            recipient.first_name, recipient.last_name
        )),
        recipient_phone: Set(recipient.phone.clone()),
        recipient_address: Set(recipient.delivery_address.clone()),
        special_instructions: Set(None),
        generated_by: Set(actor.user_id.clone()),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    let mut active: purchase::ActiveModel = purchase.clone().into();
    active.delivery_status = Set(DeliveryStatus::Scheduled);
    active.update(conn).await?;

    Ok(Some(waybill))
}
