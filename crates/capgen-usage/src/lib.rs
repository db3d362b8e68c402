#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod error;
mod period;
mod routes;

use std::sync::Arc;

use capgen_store::Store;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub use error::{Result, UsageError};
pub use period::Period;
pub use routes::endpoint_router;

/// Result of a limit check
///
/// `captions_remaining` is the raw difference and goes negative once a
/// user is over quota; `has_remaining` is the authoritative flag.
#[derive(Debug, Clone, Serialize)]
pub struct LimitCheck {
    pub has_remaining: bool,
    pub captions_remaining: i32,
    pub captions_limit: i32,
    pub captions_used: i32,
}

/// Plan and usage summary for the account page
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionSummary {
    pub plan_name: String,
    pub status: String,
    pub captions_remaining: i32,
    pub captions_limit: i32,
}

/// Per-user, per-calendar-month caption quota accounting
///
/// Answers "can this user generate another caption" and "record that
/// they just did". The two are intentionally separate operations, not
/// an atomic check-and-increment: concurrent requests that all pass
/// `check_limit` before any `increment_usage` lands can overshoot the
/// limit. What IS guaranteed is that no increment is ever lost and no
/// duplicate period row is ever created — the store serializes the
/// upsert per (user, period).
pub struct UsageLedger {
    store: Arc<dyn Store>,
}

impl UsageLedger {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Check the current period's usage against the plan limit
    ///
    /// No side effects. Fails with `NoActiveSubscription` when the
    /// user has no active subscription.
    pub async fn check_limit(&self, user_id: Uuid) -> Result<LimitCheck> {
        self.check_limit_at(user_id, Utc::now()).await
    }

    /// `check_limit` against an explicit clock reading
    pub async fn check_limit_at(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<LimitCheck> {
        let plan = self
            .store
            .active_plan(user_id)
            .await?
            .ok_or(UsageError::NoActiveSubscription)?;

        let period = Period::containing(now);
        let used = self
            .store
            .usage_in_period(user_id, period.start)
            .await?
            .map_or(0, |record| record.captions_generated);

        Ok(LimitCheck {
            has_remaining: used < plan.caption_limit,
            captions_remaining: plan.caption_limit - used,
            captions_limit: plan.caption_limit,
            captions_used: used,
        })
    }

    /// Record one generated caption, returning the new period count
    ///
    /// Increment-or-create on the current period's row. Performs no
    /// limit check; callers that enforce quota call `check_limit`
    /// first.
    pub async fn increment_usage(&self, user_id: Uuid) -> Result<i32> {
        self.increment_usage_at(user_id, Utc::now()).await
    }

    /// `increment_usage` against an explicit clock reading
    pub async fn increment_usage_at(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<i32> {
        let period = Period::containing(now);
        let count = self
            .store
            .record_caption(user_id, period.start, period.end, now)
            .await?;

        tracing::debug!(%user_id, count, "caption usage recorded");

        Ok(count)
    }

    /// Plan and usage summary for the active subscription
    pub async fn summary(&self, user_id: Uuid) -> Result<SubscriptionSummary> {
        self.summary_at(user_id, Utc::now()).await
    }

    /// `summary` against an explicit clock reading
    pub async fn summary_at(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<SubscriptionSummary> {
        let plan = self
            .store
            .active_plan(user_id)
            .await?
            .ok_or(UsageError::NoActiveSubscription)?;

        let period = Period::containing(now);
        let used = self
            .store
            .usage_in_period(user_id, period.start)
            .await?
            .map_or(0, |record| record.captions_generated);

        Ok(SubscriptionSummary {
            plan_name: plan.plan_name,
            status: plan.status,
            captions_remaining: plan.caption_limit - used,
            captions_limit: plan.caption_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use capgen_store::MemoryStore;
    use chrono::TimeZone;

    use super::*;

    async fn subscribed_user(store: &Arc<dyn Store>, plan: &str) -> Uuid {
        let user = store.create_user("user@example.com", "hash", "User").await.unwrap();
        let plan = store.plan_by_name(plan).await.unwrap().unwrap();
        store.create_subscription(user.id, plan.id).await.unwrap();
        user.id
    }

    fn ledger() -> (UsageLedger, Arc<dyn Store>) {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        (UsageLedger::new(Arc::clone(&store)), store)
    }

    fn instant(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, month, day, 10, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn sequential_increments_accumulate() {
        let (ledger, store) = ledger();
        let user_id = subscribed_user(&store, "Free").await;
        let now = instant(8, 7);

        for expected in 1..=4 {
            let count = ledger.increment_usage_at(user_id, now).await.unwrap();
            assert_eq!(count, expected);
        }
    }

    #[tokio::test]
    async fn each_month_gets_its_own_record() {
        let (ledger, store) = ledger();
        let user_id = subscribed_user(&store, "Free").await;

        ledger.increment_usage_at(user_id, instant(8, 20)).await.unwrap();
        let count = ledger.increment_usage_at(user_id, instant(9, 2)).await.unwrap();

        // September starts from scratch
        assert_eq!(count, 1);

        let august = ledger.check_limit_at(user_id, instant(8, 25)).await.unwrap();
        assert_eq!(august.captions_used, 1);
    }

    #[tokio::test]
    async fn check_limit_reports_remaining_quota() {
        let (ledger, store) = ledger();
        let user_id = subscribed_user(&store, "Free").await;
        let now = instant(8, 7);

        for _ in 0..9 {
            ledger.increment_usage_at(user_id, now).await.unwrap();
        }

        let check = ledger.check_limit_at(user_id, now).await.unwrap();
        assert!(check.has_remaining);
        assert_eq!(check.captions_remaining, 1);
        assert_eq!(check.captions_limit, 10);
        assert_eq!(check.captions_used, 9);
    }

    #[tokio::test]
    async fn consuming_the_full_limit_flips_has_remaining() {
        let (ledger, store) = ledger();
        let user_id = subscribed_user(&store, "Free").await;
        let now = instant(8, 7);

        for _ in 0..10 {
            ledger.increment_usage_at(user_id, now).await.unwrap();
        }

        let check = ledger.check_limit_at(user_id, now).await.unwrap();
        assert!(!check.has_remaining);
        assert_eq!(check.captions_remaining, 0);
    }

    #[tokio::test]
    async fn over_limit_usage_passes_through_negative() {
        let (ledger, store) = ledger();
        let user_id = subscribed_user(&store, "Free").await;
        let now = instant(8, 7);

        // increment_usage enforces nothing by itself
        for _ in 0..11 {
            ledger.increment_usage_at(user_id, now).await.unwrap();
        }

        let check = ledger.check_limit_at(user_id, now).await.unwrap();
        assert!(!check.has_remaining);
        assert_eq!(check.captions_remaining, -1);
        assert_eq!(check.captions_used, 11);
    }

    #[tokio::test]
    async fn check_limit_has_no_side_effects() {
        let (ledger, store) = ledger();
        let user_id = subscribed_user(&store, "Free").await;
        let now = instant(8, 7);

        ledger.check_limit_at(user_id, now).await.unwrap();
        let check = ledger.check_limit_at(user_id, now).await.unwrap();
        assert_eq!(check.captions_used, 0);
    }

    #[tokio::test]
    async fn missing_subscription_is_reported() {
        let (ledger, store) = ledger();
        let user = store.create_user("lone@example.com", "hash", "Lone").await.unwrap();

        let err = ledger.check_limit_at(user.id, instant(8, 7)).await.unwrap_err();
        assert!(matches!(err, UsageError::NoActiveSubscription));
    }

    #[tokio::test]
    async fn summary_reflects_plan_and_usage() {
        let (ledger, store) = ledger();
        let user_id = subscribed_user(&store, "Free").await;
        let now = instant(8, 7);

        ledger.increment_usage_at(user_id, now).await.unwrap();

        let summary = ledger.summary_at(user_id, now).await.unwrap();
        assert_eq!(summary.plan_name, "Free");
        assert_eq!(summary.status, "active");
        assert_eq!(summary.captions_limit, 10);
        assert_eq!(summary.captions_remaining, 9);
    }
}
