use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Subscription status value treated as authoritative
pub const STATUS_ACTIVE: &str = "active";

/// Identity record created on signup
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Argon2id PHC string; never leaves the auth layer
    pub password_hash: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

/// Named tier with a per-period caption quota
#[derive(Debug, Clone, FromRow)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub caption_limit: i32,
}

/// Link between a user and a plan
#[derive(Debug, Clone, FromRow)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub status: String,
    pub start_date: DateTime<Utc>,
}

/// Active subscription joined with its plan, as the quota logic
/// consumes it
#[derive(Debug, Clone, FromRow)]
pub struct ActivePlan {
    pub plan_name: String,
    pub status: String,
    pub caption_limit: i32,
}

/// Per-user, per-period caption counter
///
/// At most one row exists per (`user_id`, `period_start`); rows are
/// never deleted so historical periods stay auditable.
#[derive(Debug, Clone, FromRow)]
pub struct UsageRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub captions_generated: i32,
    pub last_generated_at: DateTime<Utc>,
}
