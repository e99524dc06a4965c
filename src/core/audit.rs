//! Audit sink - Fire-and-forget recording of administrative actions.
//!
//! Audit writes are best-effort: a failed insert is logged and swallowed so
//! it can never roll back or fail the operation being audited.

use crate::{
    core::auth::Actor,
    entities::{AuditLog, audit_log},
};
use sea_orm::{Set, prelude::*};
use tracing::warn;

/// Appends one audit entry. Never fails; storage errors are logged at `warn`.
pub async fn record<C>(
    conn: &C,
    actor: &Actor,
    action: &str,
    entity_type: &str,
    entity_id: &str,
    metadata: serde_json::Value,
) where
    C: ConnectionTrait,
{
    let entry = audit_log::ActiveModel {
        shop_id: Set(actor.shop_id),
        actor_id: Set(actor.user_id.clone()),
        action: Set(action.to_string()),
        entity_type: Set(entity_type.to_string()),
        entity_id: Set(entity_id.to_string()),
        metadata: Set(metadata),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    if let Err(err) = entry.insert(conn).await {
        warn!(action, entity_type, entity_id, %err, "audit entry dropped");
    }
}

/// Lists the most recent audit entries for a shop, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn recent_for_shop(
    db: &DatabaseConnection,
    shop_id: i64,
    limit: u64,
) -> crate::errors::Result<Vec<audit_log::Model>> {
    use sea_orm::{QueryOrder, QuerySelect};

    AuditLog::find()
        .filter(audit_log::Column::ShopId.eq(shop_id))
        .order_by_desc(audit_log::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_record_and_list() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let actor = test_admin();

        record(
            &db,
            &actor,
            "wallet.deposit.created",
            "wallet_transaction",
            "17",
            serde_json::json!({ "amount": "150.00" }),
        )
        .await;

        let entries = recent_for_shop(&db, actor.shop_id, 10).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "wallet.deposit.created");
        assert_eq!(entries[0].entity_id, "17");
        assert_eq!(entries[0].metadata["amount"], "150.00");

        Ok(())
    }

    #[tokio::test]
    async fn test_record_failure_is_swallowed() {
        // No tables created: the insert fails, but record still returns
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        record(
            &db,
            &test_admin(),
            "wallet.deposit.created",
            "wallet_transaction",
            "1",
            serde_json::json!({}),
        )
        .await;
    }
}
