#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod error;
mod memory;
mod postgres;
mod types;

use std::sync::Arc;

use async_trait::async_trait;
use capgen_config::{DatabaseConfig, StorageBackend};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use types::{ActivePlan, Plan, STATUS_ACTIVE, Subscription, UsageRecord, User};

/// Relational persistence for users, plans, subscriptions, and usage
///
/// All rows are mutated only through these operations. Implementations
/// must make `record_caption` atomic per (`user_id`, `period_start`):
/// concurrent callers may neither lose an increment nor create a
/// duplicate usage row.
#[async_trait]
pub trait Store: Send + Sync {
    /// Connectivity probe for the health endpoint
    async fn ping(&self) -> Result<(), StoreError>;

    /// Insert a new user; `Conflict` when the email is taken
    async fn create_user(&self, email: &str, password_hash: &str, full_name: &str) -> Result<User, StoreError>;

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn plan_by_name(&self, name: &str) -> Result<Option<Plan>, StoreError>;

    /// Insert an active subscription; `Conflict` when the user already
    /// has one
    async fn create_subscription(&self, user_id: Uuid, plan_id: Uuid) -> Result<Subscription, StoreError>;

    /// The authoritative active subscription joined with its plan
    async fn active_plan(&self, user_id: Uuid) -> Result<Option<ActivePlan>, StoreError>;

    /// Usage counter for the period starting at `period_start`
    async fn usage_in_period(&self, user_id: Uuid, period_start: DateTime<Utc>) -> Result<Option<UsageRecord>, StoreError>;

    /// Increment-or-create the usage counter for the period, returning
    /// the new count
    async fn record_caption(
        &self,
        user_id: Uuid,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<i32, StoreError>;
}

/// Build a store from configuration
///
/// The postgres backend connects and runs pending migrations; the
/// memory backend starts empty apart from the seeded plans.
///
/// # Errors
///
/// Returns an error if the postgres connection or migration fails
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn Store>> {
    match config.backend {
        StorageBackend::Postgres => {
            let store = PgStore::connect(config).await?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory store; data will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
