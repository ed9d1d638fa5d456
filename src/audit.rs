use serde_json::Value;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppResult,
    middleware::auth::{AuthUser, Role},
};

/// Who performed an audited action. Registrations and logins record the identity
/// they produced, since no token exists yet.
#[derive(Debug, Clone)]
pub struct Actor {
    pub role: Role,
    pub subject: String,
}

impl Actor {
    pub fn new(role: Role, subject: impl ToString) -> Self {
        Self {
            role,
            subject: subject.to_string(),
        }
    }
}

impl From<&AuthUser> for Actor {
    fn from(user: &AuthUser) -> Self {
        Self {
            role: user.role,
            subject: user.subject.clone(),
        }
    }
}

pub async fn log_audit(
    pool: &DbPool,
    actor: Option<Actor>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) -> AppResult<()> {
    let id = Uuid::new_v4();
    let (role, subject) = match actor {
        Some(a) => (Some(a.role.as_str()), Some(a.subject)),
        None => (None, None),
    };
    sqlx::query(
        r#"
        INSERT INTO audit_logs (id, actor_role, actor_subject, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(role)
    .bind(subject)
    .bind(action)
    .bind(resource)
    .bind(metadata)
    .execute(pool)
    .await?;

    Ok(())
}

/// Audit writes are best-effort: a failure is logged and never fails the request.
pub async fn record(
    pool: &DbPool,
    actor: Actor,
    action: &str,
    resource: &str,
    metadata: Value,
) {
    if let Err(err) = log_audit(pool, Some(actor), action, Some(resource), Some(metadata)).await {
        tracing::warn!(error = %err, action, "audit log failed");
    }
}
