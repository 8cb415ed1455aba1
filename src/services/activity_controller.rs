use std::sync::Arc;

use tracing::info;

use crate::{error::ApiError, models::activity::Activity, services::{bored_client::RandomActivitySource, database::ActivityStore}};

pub struct ActivityController {
    store: Arc<dyn ActivityStore>,
    random_source: Arc<dyn RandomActivitySource>,
}

impl ActivityController {
    pub fn new(store: Arc<dyn ActivityStore>, random_source: Arc<dyn RandomActivitySource>) -> Self {
        ActivityController {
            store,
            random_source,
        }
    }

    pub async fn create_activity(&self, activity: &Activity) -> Result<Activity, ApiError> {
        self.store.save(activity).await
    }

    pub async fn get_all_activities(&self) -> Result<Vec<Activity>, ApiError> {
        self.store.list_all().await
    }

    /// Returns `Ok(None)` without writing anything when `id` is unknown.
    pub async fn update_activity(&self, id: i64, updated_activity: Activity) -> Result<Option<Activity>, ApiError> {
        if self.store.find_by_id(id).await?.is_none() {
            info!("Activity {} not found, skipping update", id);
            return Ok(None);
        }

        let activity = Activity { id: Some(id), ..updated_activity };
        let saved = self.store.save(&activity).await?;
        Ok(Some(saved))
    }

    pub async fn delete_activity(&self, id: i64) -> Result<(), ApiError> {
        self.store.delete_by_id(id).await
    }

    pub async fn create_random_activity(&self) -> Result<Option<Activity>, ApiError> {
        let Some(dto) = self.random_source.fetch_random_activity().await? else {
            info!("Random activity API returned nothing, nothing persisted");
            return Ok(None);
        };

        let saved = self.store.save(&Activity::from(dto)).await?;
        info!("Persisted random activity {:?}", saved.id);
        Ok(Some(saved))
    }

    pub async fn health_check_store(&self) -> Result<(), ApiError> {
        self.store.health_check().await
    }
}
