//! Audit log entity - Append-only record of administrative actions.
//!
//! Writes to this table are best-effort; a failed audit insert never rolls
//! back the operation that produced it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Audit log database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    /// Unique identifier for the audit entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Shop scope of the recorded action
    pub shop_id: i64,
    /// Staff member who performed the action
    pub actor_id: String,
    /// Action name, e.g. `"wallet.deposit.confirmed"`
    pub action: String,
    /// Entity type the action touched, e.g. `"wallet_transaction"`
    pub entity_type: String,
    /// Identifier of the touched entity
    pub entity_id: String,
    /// Structured action details
    pub metadata: Json,
    /// When the action happened
    pub created_at: DateTimeUtc,
}

/// Audit entries reference other rows only by string id; no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
