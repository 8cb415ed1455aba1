use crate::models::activity::Activity;
use sqlx::Row;

/// Helper to map a database row to Activity
pub fn map_row_to_activity(row: sqlx::postgres::PgRow) -> Activity {
    Activity {
        id: row.get("id"),
        name: row.get("name"),
        activity_type: row.get("type"),
        participants: row.get("participants"),
    }
}
