use axum::{Json, extract::State};
use serde::Serialize;

use crate::utils::startup_utils::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    pub database: String,
    pub overall: String,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let db_status = match state.activity_controller.health_check_store().await {
        Ok(_) => "healthy".to_string(),
        Err(e) => format!("unhealthy: {:?}", e),
    };

    let overall = if db_status == "healthy" {
        "healthy".to_string()
    } else {
        "unhealthy".to_string()
    };

    Json(HealthStatus {
        database: db_status,
        overall,
    })
}
