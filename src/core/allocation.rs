//! Allocation planner - Decides how a confirmed deposit settles outstanding
//! purchase debt.
//!
//! Planning is a pure function over a snapshot of the customer's purchases:
//! no database access, no side effects. The apply step in [`crate::core::wallet`]
//! re-reads each purchase inside its transaction before writing, so the plan
//! only decides *which* purchases receive *how much*, in *what order*.
//!
//! Ordering: oldest due date first, ties broken by ascending purchase id
//! (creation order). The same snapshot always yields the same plan, which is
//! what makes confirmations auditable and retryable.

use crate::entities::purchase::{self, PurchaseStatus};
use rust_decimal::Decimal;

/// One planned application of funds to a purchase
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedAllocation {
    /// Purchase receiving funds
    pub purchase_id: i64,
    /// Amount to apply; always positive and never above the purchase's
    /// outstanding balance at planning time
    pub amount: Decimal,
}

/// The full outcome of planning a deposit against outstanding purchases
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationPlan {
    /// Applications in settlement order
    pub allocations: Vec<PlannedAllocation>,
    /// Funds left over after all outstanding debt is covered; stays in the
    /// customer's wallet as free balance
    pub leftover: Decimal,
}

impl AllocationPlan {
    /// Total amount the plan applies to purchases.
    #[must_use]
    pub fn total_allocated(&self) -> Decimal {
        self.allocations.iter().map(|a| a.amount).sum()
    }
}

/// Returns whether a purchase can receive wallet funds.
fn is_allocatable(p: &purchase::Model) -> bool {
    matches!(p.status, PurchaseStatus::Active | PurchaseStatus::Pending)
        && p.outstanding_balance > Decimal::ZERO
}

/// Computes the deterministic allocation plan for a deposit.
///
/// Walks the customer's open purchases oldest-due-first and applies
/// `min(remaining, outstanding)` to each until the deposit is exhausted.
/// Whatever remains becomes free wallet balance.
#[must_use]
pub fn plan_allocation(deposit_amount: Decimal, purchases: &[purchase::Model]) -> AllocationPlan {
    let mut open: Vec<&purchase::Model> = purchases.iter().filter(|p| is_allocatable(p)).collect();
    open.sort_by_key(|p| (p.due_date, p.id));

    let mut remaining = deposit_amount;
    let mut allocations = Vec::new();

    for purchase in open {
        if remaining <= Decimal::ZERO {
            break;
        }
        let applied = remaining.min(purchase.outstanding_balance);
        if applied > Decimal::ZERO {
            allocations.push(PlannedAllocation {
                purchase_id: purchase.id,
                amount: applied,
            });
            remaining -= applied;
        }
    }

    AllocationPlan {
        allocations,
        leftover: remaining,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::purchase::{DeliveryStatus, PurchaseType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn open_purchase(id: i64, outstanding: Decimal, due: NaiveDate) -> purchase::Model {
        purchase::Model {
            id,
            customer_id: 1,
            shop_id: 1,
            purchase_number: format!("P-{id:04}"),
            total_amount: outstanding,
            amount_paid: Decimal::ZERO,
            outstanding_balance: outstanding,
            status: PurchaseStatus::Active,
            purchase_type: PurchaseType::Credit,
            due_date: due,
            delivery_status: DeliveryStatus::NotScheduled,
            created_at: chrono::Utc::now(),
        }
    }

    fn due(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[test]
    fn test_oldest_due_date_settled_first() {
        let purchases = vec![
            open_purchase(1, dec!(80.00), due(20)),
            open_purchase(2, dec!(30.00), due(5)),
        ];

        let plan = plan_allocation(dec!(50.00), &purchases);

        assert_eq!(plan.allocations.len(), 2);
        assert_eq!(plan.allocations[0].purchase_id, 2);
        assert_eq!(plan.allocations[0].amount, dec!(30.00));
        assert_eq!(plan.allocations[1].purchase_id, 1);
        assert_eq!(plan.allocations[1].amount, dec!(20.00));
        assert_eq!(plan.leftover, Decimal::ZERO);
    }

    #[test]
    fn test_equal_due_dates_break_ties_by_id() {
        let purchases = vec![
            open_purchase(7, dec!(40.00), due(10)),
            open_purchase(3, dec!(40.00), due(10)),
        ];

        let plan = plan_allocation(dec!(40.00), &purchases);

        assert_eq!(plan.allocations.len(), 1);
        assert_eq!(plan.allocations[0].purchase_id, 3);
    }

    #[test]
    fn test_leftover_stays_as_free_balance() {
        let purchases = vec![open_purchase(1, dec!(100.00), due(1))];

        let plan = plan_allocation(dec!(150.00), &purchases);

        assert_eq!(plan.allocations.len(), 1);
        assert_eq!(plan.allocations[0].amount, dec!(100.00));
        assert_eq!(plan.leftover, dec!(50.00));
    }

    #[test]
    fn test_no_outstanding_purchases_all_leftover() {
        let plan = plan_allocation(dec!(75.00), &[]);
        assert!(plan.allocations.is_empty());
        assert_eq!(plan.leftover, dec!(75.00));
    }

    #[test]
    fn test_completed_and_zero_outstanding_purchases_skipped() {
        let mut completed = open_purchase(1, dec!(50.00), due(1));
        completed.status = PurchaseStatus::Completed;
        completed.outstanding_balance = Decimal::ZERO;

        let mut cancelled = open_purchase(2, dec!(50.00), due(2));
        cancelled.status = PurchaseStatus::Cancelled;

        let open = open_purchase(3, dec!(25.00), due(3));

        let plan = plan_allocation(dec!(60.00), &[completed, cancelled, open]);

        assert_eq!(plan.allocations.len(), 1);
        assert_eq!(plan.allocations[0].purchase_id, 3);
        assert_eq!(plan.allocations[0].amount, dec!(25.00));
        assert_eq!(plan.leftover, dec!(35.00));
    }

    #[test]
    fn test_stops_early_once_exhausted() {
        let purchases = vec![
            open_purchase(1, dec!(10.00), due(1)),
            open_purchase(2, dec!(10.00), due(2)),
            open_purchase(3, dec!(10.00), due(3)),
        ];

        let plan = plan_allocation(dec!(15.00), &purchases);

        assert_eq!(plan.allocations.len(), 2);
        assert_eq!(plan.allocations[1].amount, dec!(5.00));
        assert_eq!(plan.leftover, Decimal::ZERO);
    }

    #[test]
    fn test_conservation_and_no_over_allocation() {
        let purchases = vec![
            open_purchase(1, dec!(33.33), due(4)),
            open_purchase(2, dec!(66.67), due(2)),
            open_purchase(3, dec!(12.50), due(2)),
        ];

        for deposit in [dec!(0.01), dec!(12.50), dec!(50.00), dec!(112.50), dec!(500.00)] {
            let plan = plan_allocation(deposit, &purchases);

            assert_eq!(plan.total_allocated() + plan.leftover, deposit);
            for allocation in &plan.allocations {
                let purchase = purchases
                    .iter()
                    .find(|p| p.id == allocation.purchase_id)
                    .unwrap();
                assert!(allocation.amount <= purchase.outstanding_balance);
                assert!(allocation.amount > Decimal::ZERO);
            }
        }
    }

    #[test]
    fn test_planning_is_deterministic() {
        let purchases = vec![
            open_purchase(5, dec!(20.00), due(8)),
            open_purchase(2, dec!(45.00), due(8)),
            open_purchase(9, dec!(30.00), due(1)),
        ];

        let first = plan_allocation(dec!(70.00), &purchases);
        for _ in 0..10 {
            assert_eq!(plan_allocation(dec!(70.00), &purchases), first);
        }
    }
}
