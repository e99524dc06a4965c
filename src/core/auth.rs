//! Capability checks for wallet operations.
//!
//! The surrounding portal resolves the caller into an [`Actor`] before any
//! core function runs; the core trusts that resolution and evaluates a single
//! capability predicate at operation entry. Role comparisons live here and
//! nowhere else.

use serde::{Deserialize, Serialize};

/// Staff role within a shop, ordered by authority
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffRole {
    /// Counter staff; may load customer wallets
    Staff,
    /// Shop administrator; may confirm and reject wallet transactions
    ShopAdmin,
    /// Platform administrator; full authority over every shop
    SuperAdmin,
}

/// The authenticated caller of a core operation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Opaque user id, stamped onto created and confirmed records
    pub user_id: String,
    /// Shop the actor's membership is scoped to
    pub shop_id: i64,
    /// Authority level
    pub role: StaffRole,
}

impl Actor {
    /// Whether this actor may create wallet transactions for customers of
    /// `shop_id`. Any staff member of the shop qualifies; super admins
    /// qualify everywhere.
    #[must_use]
    pub fn can_load_wallet(&self, shop_id: i64) -> bool {
        self.role == StaffRole::SuperAdmin || self.shop_id == shop_id
    }

    /// Whether this actor may confirm or reject wallet transactions for
    /// `shop_id`. Requires shop-admin authority over the shop, or super
    /// admin.
    #[must_use]
    pub fn can_confirm_deposit(&self, shop_id: i64) -> bool {
        match self.role {
            StaffRole::SuperAdmin => true,
            StaffRole::ShopAdmin => self.shop_id == shop_id,
            StaffRole::Staff => false,
        }
    }
}
