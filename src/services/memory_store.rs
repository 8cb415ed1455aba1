use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::{error::ApiError, models::activity::Activity, services::database::ActivityStore};

/// Process-local store used when no database is configured.
pub struct MemoryStore {
    activities: DashMap<i64, Activity>,
    last_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            activities: DashMap::new(),
            last_id: AtomicI64::new(0),
        }
    }

    fn next_id(&self) -> i64 {
        self.last_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn create(&self, activity: &Activity) -> Result<Activity, ApiError> {
        let id = self.next_id();
        let stored = activity.clone().with_id(id);
        debug!("[MEM] create: Assigned id {}", id);
        self.activities.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Activity>, ApiError> {
        let mut activities: Vec<Activity> = self
            .activities
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        activities.sort_by_key(|a| a.id);
        Ok(activities)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Activity>, ApiError> {
        Ok(self.activities.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, activity: &Activity) -> Result<Activity, ApiError> {
        let Some(id) = activity.id else {
            return self.create(activity).await;
        };

        // keep later creates clear of explicitly saved ids
        self.last_id.fetch_max(id, Ordering::SeqCst);
        self.activities.insert(id, activity.clone());
        debug!("[MEM] save: Stored activity {}", id);
        Ok(activity.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ApiError> {
        let removed = self.activities.remove(&id).is_some();
        debug!("[MEM] delete_by_id: Activity {} removed: {}", id, removed);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let first = store.create(&Activity::new("A", "T", 1)).await.unwrap();
        let second = store.create(&Activity::new("B", "T", 2).with_id(99)).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(store.list_all().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn save_without_id_creates() {
        let store = MemoryStore::new();
        let saved = store.save(&Activity::new("A", "T", 1)).await.unwrap();

        assert_eq!(saved.id, Some(1));
        assert_eq!(store.find_by_id(1).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn save_with_id_replaces_record() {
        let store = MemoryStore::new();
        let created = store.create(&Activity::new("A", "T", 1)).await.unwrap();
        let id = created.id.unwrap();

        store.save(&Activity::new("B", "U", 4).with_id(id)).await.unwrap();

        assert_eq!(
            store.list_all().await.unwrap(),
            vec![Activity::new("B", "U", 4).with_id(id)]
        );
    }

    #[tokio::test]
    async fn save_with_explicit_id_advances_sequence() {
        let store = MemoryStore::new();
        store.save(&Activity::new("A", "T", 1).with_id(10)).await.unwrap();
        let created = store.create(&Activity::new("B", "T", 1)).await.unwrap();

        assert_eq!(created.id, Some(11));
    }

    #[tokio::test]
    async fn find_missing_id_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.find_by_id(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let created = store.create(&Activity::new("A", "T", 1)).await.unwrap();
        let id = created.id.unwrap();

        store.delete_by_id(id).await.unwrap();
        store.delete_by_id(id).await.unwrap();

        assert!(store.list_all().await.unwrap().is_empty());
    }
}
