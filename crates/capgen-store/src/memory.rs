use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    Store,
    error::StoreError,
    types::{ActivePlan, Plan, STATUS_ACTIVE, Subscription, UsageRecord, User},
};

/// In-memory store for development and tests
///
/// One mutex guards all tables, so every operation — including the
/// increment-or-create on usage rows — is serialized the same way the
/// postgres constraints serialize writers.
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    plans: Vec<Plan>,
    subscriptions: Vec<Subscription>,
    usage: HashMap<(Uuid, DateTime<Utc>), UsageRecord>,
}

impl MemoryStore {
    /// Create an empty store seeded with the same plans the postgres
    /// migration inserts
    pub fn new() -> Self {
        let plans = [("Free", 10), ("Pro", 500), ("Enterprise", 100_000)]
            .into_iter()
            .map(|(name, caption_limit)| Plan {
                id: Uuid::new_v4(),
                name: name.to_string(),
                caption_limit,
            })
            .collect();

        Self {
            inner: Mutex::new(Tables {
                plans,
                ..Tables::default()
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.inner.lock().expect("memory store mutex poisoned")
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create_user(&self, email: &str, password_hash: &str, full_name: &str) -> Result<User, StoreError> {
        let mut tables = self.lock();

        if tables.users.iter().any(|u| u.email == email) {
            return Err(StoreError::Conflict);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            full_name: full_name.to_string(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());

        Ok(user)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn plan_by_name(&self, name: &str) -> Result<Option<Plan>, StoreError> {
        Ok(self.lock().plans.iter().find(|p| p.name == name).cloned())
    }

    async fn create_subscription(&self, user_id: Uuid, plan_id: Uuid) -> Result<Subscription, StoreError> {
        let mut tables = self.lock();

        let has_active = tables
            .subscriptions
            .iter()
            .any(|s| s.user_id == user_id && s.status == STATUS_ACTIVE);
        if has_active {
            return Err(StoreError::Conflict);
        }

        let subscription = Subscription {
            id: Uuid::new_v4(),
            user_id,
            plan_id,
            status: STATUS_ACTIVE.to_string(),
            start_date: Utc::now(),
        };
        tables.subscriptions.push(subscription.clone());

        Ok(subscription)
    }

    async fn active_plan(&self, user_id: Uuid) -> Result<Option<ActivePlan>, StoreError> {
        let tables = self.lock();

        let subscription = tables
            .subscriptions
            .iter()
            .filter(|s| s.user_id == user_id && s.status == STATUS_ACTIVE)
            .max_by_key(|s| s.start_date);

        let Some(subscription) = subscription else {
            return Ok(None);
        };

        let plan = tables
            .plans
            .iter()
            .find(|p| p.id == subscription.plan_id)
            .ok_or(StoreError::NotFound)?;

        Ok(Some(ActivePlan {
            plan_name: plan.name.clone(),
            status: subscription.status.clone(),
            caption_limit: plan.caption_limit,
        }))
    }

    async fn usage_in_period(
        &self,
        user_id: Uuid,
        period_start: DateTime<Utc>,
    ) -> Result<Option<UsageRecord>, StoreError> {
        Ok(self.lock().usage.get(&(user_id, period_start)).cloned())
    }

    async fn record_caption(
        &self,
        user_id: Uuid,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<i32, StoreError> {
        let mut tables = self.lock();

        let record = tables.usage.entry((user_id, period_start)).or_insert_with(|| UsageRecord {
            id: Uuid::new_v4(),
            user_id,
            period_start,
            period_end,
            captions_generated: 0,
            last_generated_at: now,
        });

        record.captions_generated += 1;
        record.last_generated_at = now;

        Ok(record.captions_generated)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use super::*;

    fn period(year: i32, month: u32) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap();
        let end = if month == 12 {
            Utc.with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0).unwrap()
        } else {
            Utc.with_ymd_and_hms(year, month + 1, 1, 0, 0, 0).unwrap()
        };
        (start, end)
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        store.create_user("a@example.com", "hash", "A").await.unwrap();

        let err = store.create_user("a@example.com", "hash", "A again").await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
    }

    #[tokio::test]
    async fn second_active_subscription_is_a_conflict() {
        let store = MemoryStore::new();
        let user = store.create_user("a@example.com", "hash", "A").await.unwrap();
        let plan = store.plan_by_name("Free").await.unwrap().unwrap();

        store.create_subscription(user.id, plan.id).await.unwrap();
        let err = store.create_subscription(user.id, plan.id).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
    }

    #[tokio::test]
    async fn record_caption_creates_then_increments() {
        let store = MemoryStore::new();
        let user = store.create_user("a@example.com", "hash", "A").await.unwrap();
        let (start, end) = period(2026, 8);
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();

        assert_eq!(store.record_caption(user.id, start, end, now).await.unwrap(), 1);
        assert_eq!(store.record_caption(user.id, start, end, now).await.unwrap(), 2);

        let record = store.usage_in_period(user.id, start).await.unwrap().unwrap();
        assert_eq!(record.captions_generated, 2);
        assert_eq!(record.period_end, end);
    }

    #[tokio::test]
    async fn periods_are_bucketed_separately() {
        let store = MemoryStore::new();
        let user = store.create_user("a@example.com", "hash", "A").await.unwrap();

        let (aug_start, aug_end) = period(2026, 8);
        let (sep_start, sep_end) = period(2026, 9);
        let now = Utc.with_ymd_and_hms(2026, 8, 31, 23, 59, 59).unwrap();

        store.record_caption(user.id, aug_start, aug_end, now).await.unwrap();
        store.record_caption(user.id, sep_start, sep_end, now).await.unwrap();

        let august = store.usage_in_period(user.id, aug_start).await.unwrap().unwrap();
        let september = store.usage_in_period(user.id, sep_start).await.unwrap().unwrap();
        assert_eq!(august.captions_generated, 1);
        assert_eq!(september.captions_generated, 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_increments_all_land() {
        let store = Arc::new(MemoryStore::new());
        let user = store.create_user("a@example.com", "hash", "A").await.unwrap();
        let (start, end) = period(2026, 8);
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();

        let tasks: Vec<_> = (0..25)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.record_caption(user.id, start, end, now).await })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let record = store.usage_in_period(user.id, start).await.unwrap().unwrap();
        assert_eq!(record.captions_generated, 25);
    }
}
