use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::{error::ApiError, models::activity::Activity, utils::database_utils};

/// Persistence for activities, keyed by the store-assigned id.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Inserts a new record under a freshly assigned id. Any id on the input is ignored.
    async fn create(&self, activity: &Activity) -> Result<Activity, ApiError>;

    async fn list_all(&self) -> Result<Vec<Activity>, ApiError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Activity>, ApiError>;

    /// Upsert by id. Records without an id are created.
    async fn save(&self, activity: &Activity) -> Result<Activity, ApiError>;

    /// Removing an id that does not exist is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<(), ApiError>;

    async fn health_check(&self) -> Result<(), ApiError>;
}

pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Database { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), ApiError> {
        debug!("[DB] ensure_schema: Creating activities table if missing");
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS activities (
                id BIGSERIAL PRIMARY KEY,
                name TEXT,
                type TEXT,
                participants INTEGER
            )
            "#
        )
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::StartupError(format!("Failed to create activities table: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl ActivityStore for Database {
    async fn create(&self, activity: &Activity) -> Result<Activity, ApiError> {
        debug!("[DB] create: Inserting activity {:?}", activity.name);
        let row = sqlx::query(
            r#"
            INSERT INTO activities (name, type, participants)
            VALUES ($1, $2, $3)
            RETURNING id, name, type, participants
            "#
        )
        .bind(&activity.name)
        .bind(&activity.activity_type)
        .bind(activity.participants)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ApiError::DatabaseError(format!("Failed to insert activity: {}", e)))?;

        let created = database_utils::map_row_to_activity(row);
        debug!("[DB] create: Inserted activity with id {:?}", created.id);
        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<Activity>, ApiError> {
        debug!("[DB] list_all: Starting query for all activities");
        let rows = sqlx::query(
            r#"
            SELECT id, name, type, participants
            FROM activities
            ORDER BY id ASC
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::DatabaseError(format!("Failed to fetch activities: {}", e)))?;

        let activities: Vec<Activity> = rows
            .into_iter()
            .map(database_utils::map_row_to_activity)
            .collect();

        debug!("[DB] list_all: Query completed, returned {} activities", activities.len());
        Ok(activities)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Activity>, ApiError> {
        debug!("[DB] find_by_id: Querying activity {}", id);
        let result = sqlx::query(
            r#"
            SELECT id, name, type, participants
            FROM activities
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::DatabaseError(format!("Failed to get activity {}: {}", id, e)))?;

        debug!("[DB] find_by_id: Query completed for activity {}, found: {}", id, result.is_some());
        Ok(result.map(database_utils::map_row_to_activity))
    }

    async fn save(&self, activity: &Activity) -> Result<Activity, ApiError> {
        let Some(id) = activity.id else {
            return self.create(activity).await;
        };

        debug!("[DB] save: Upserting activity {}", id);
        let mut tx = self.pool.begin().await
            .map_err(|e| ApiError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        let row = sqlx::query(
            r#"
            INSERT INTO activities (id, name, type, participants)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                type = EXCLUDED.type,
                participants = EXCLUDED.participants
            RETURNING id, name, type, participants
            "#
        )
        .bind(id)
        .bind(&activity.name)
        .bind(&activity.activity_type)
        .bind(activity.participants)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| ApiError::DatabaseError(format!("Failed to save activity {}: {}", id, e)))?;

        // explicit ids bypass BIGSERIAL, so move the sequence past them
        sqlx::query(
            r#"
            SELECT setval(pg_get_serial_sequence('activities', 'id'), GREATEST($1, last_value))
            FROM activities_id_seq
            "#
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| ApiError::DatabaseError(format!("Failed to advance id sequence: {}", e)))?;

        tx.commit().await
            .map_err(|e| ApiError::DatabaseError(format!("Failed to commit activity {}: {}", id, e)))?;

        Ok(database_utils::map_row_to_activity(row))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::DatabaseError(format!("Failed to delete activity {}: {}", id, e)))?;

        debug!("[DB] delete_by_id: Removed {} rows for activity {}", result.rows_affected(), id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), ApiError> {
        debug!("[DB] health_check: Starting database health check");
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApiError::DatabaseError(format!("Health check failed: {}", e)))?;

        debug!("[DB] health_check: Health check completed successfully");
        Ok(())
    }
}
