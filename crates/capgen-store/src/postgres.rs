use std::time::Duration;

use async_trait::async_trait;
use capgen_config::DatabaseConfig;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use crate::{
    Store,
    error::StoreError,
    types::{ActivePlan, Plan, STATUS_ACTIVE, Subscription, UsageRecord, User},
};

/// Postgres-backed store
///
/// Every statement is parameterized; the uniqueness constraints from
/// the migrations carry the invariants (`users.email`, one active
/// subscription per user, one usage row per user and period).
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to Postgres and run pending migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is missing, the connection fails,
    /// or a migration cannot be applied
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let url = config
            .url
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("database.url is required for the postgres backend"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(url.expose_secret())
            .await
            .map_err(|e| anyhow::anyhow!("failed to connect to postgres: {e}"))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| anyhow::anyhow!("migration failed: {e}"))?;

        tracing::info!(max_connections = config.max_connections, "postgres store ready");

        Ok(Self { pool })
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, email: &str, password_hash: &str, full_name: &str) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, full_name) \
             VALUES ($1, $2, $3) \
             RETURNING id, email, password_hash, full_name, created_at",
        )
        .bind(email)
        .bind(password_hash)
        .bind(full_name)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_write)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, full_name, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, full_name, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn plan_by_name(&self, name: &str) -> Result<Option<Plan>, StoreError> {
        let plan = sqlx::query_as::<_, Plan>("SELECT id, name, caption_limit FROM plans WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(plan)
    }

    async fn create_subscription(&self, user_id: Uuid, plan_id: Uuid) -> Result<Subscription, StoreError> {
        sqlx::query_as::<_, Subscription>(
            "INSERT INTO subscriptions (user_id, plan_id, status) \
             VALUES ($1, $2, $3) \
             RETURNING id, user_id, plan_id, status, start_date",
        )
        .bind(user_id)
        .bind(plan_id)
        .bind(STATUS_ACTIVE)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_write)
    }

    async fn active_plan(&self, user_id: Uuid) -> Result<Option<ActivePlan>, StoreError> {
        let row = sqlx::query_as::<_, ActivePlan>(
            "SELECT p.name AS plan_name, s.status, p.caption_limit \
             FROM subscriptions s \
             JOIN plans p ON p.id = s.plan_id \
             WHERE s.user_id = $1 AND s.status = $2 \
             ORDER BY s.start_date DESC \
             LIMIT 1",
        )
        .bind(user_id)
        .bind(STATUS_ACTIVE)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn usage_in_period(
        &self,
        user_id: Uuid,
        period_start: DateTime<Utc>,
    ) -> Result<Option<UsageRecord>, StoreError> {
        let record = sqlx::query_as::<_, UsageRecord>(
            "SELECT id, user_id, period_start, period_end, captions_generated, last_generated_at \
             FROM caption_usage \
             WHERE user_id = $1 AND period_start = $2",
        )
        .bind(user_id)
        .bind(period_start)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn record_caption(
        &self,
        user_id: Uuid,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<i32, StoreError> {
        // Single-statement upsert under the (user_id, period_start)
        // unique constraint: concurrent first-calls of a month resolve
        // to one row and every increment lands.
        let count: i32 = sqlx::query_scalar(
            "INSERT INTO caption_usage (user_id, period_start, period_end, captions_generated, last_generated_at) \
             VALUES ($1, $2, $3, 1, $4) \
             ON CONFLICT (user_id, period_start) DO UPDATE \
             SET captions_generated = caption_usage.captions_generated + 1, \
                 last_generated_at = EXCLUDED.last_generated_at \
             RETURNING captions_generated",
        )
        .bind(user_id)
        .bind(period_start)
        .bind(period_end)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
