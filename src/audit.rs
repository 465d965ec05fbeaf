use serde_json::Value;
use uuid::Uuid;

use crate::{db::DbPool, error::AppResult};

/// One row of `audit_logs`: who did what to which table.
#[derive(Debug, Clone)]
pub struct AuditEntry<'a> {
    pub user_id: Option<Uuid>,
    pub action: &'a str,
    pub resource: Option<&'a str>,
    pub metadata: Option<Value>,
}

impl AuditEntry<'_> {
    pub async fn insert(&self, pool: &DbPool) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO audit_logs (id, user_id, action, resource, metadata) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(self.user_id)
        .bind(self.action)
        .bind(self.resource)
        .bind(&self.metadata)
        .execute(pool)
        .await?;
        Ok(id)
    }
}

/// Audit a mutation after it committed. Failures are logged and swallowed.
pub async fn record(pool: &DbPool, user_id: Uuid, action: &str, resource: &str, metadata: Value) {
    let entry = AuditEntry {
        user_id: Some(user_id),
        action,
        resource: Some(resource),
        metadata: Some(metadata),
    };
    if let Err(err) = entry.insert(pool).await {
        tracing::warn!(error = %err, action, resource, "audit log failed");
    }
}
