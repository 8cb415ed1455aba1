use std::sync::Arc;

use axum::{Json, extract::{Path, State}, http::StatusCode, response::{IntoResponse, Response}};

use crate::{error::ApiError, models::activity::Activity, services::activity_controller::ActivityController};

pub async fn create_activity(
    State(controller): State<Arc<ActivityController>>,
    Json(activity): Json<Activity>,
) -> Result<Json<Activity>, ApiError> {
    let created = controller.create_activity(&activity).await?;
    Ok(Json(created))
}

/// Responds 200 with an empty body when the upstream had nothing to offer.
pub async fn create_random_activity(
    State(controller): State<Arc<ActivityController>>,
) -> Result<Response, ApiError> {
    let response = match controller.create_random_activity().await? {
        Some(created) => Json(created).into_response(),
        None => StatusCode::OK.into_response(),
    };
    Ok(response)
}

pub async fn read_activities(
    State(controller): State<Arc<ActivityController>>,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let activities = controller.get_all_activities().await?;
    Ok(Json(activities))
}

pub async fn update_activity(
    State(controller): State<Arc<ActivityController>>,
    Path(id): Path<i64>,
    Json(activity): Json<Activity>,
) -> Result<Json<Activity>, ApiError> {
    controller
        .update_activity(id, activity)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Activity {} not found", id)))
}

pub async fn delete_activity(
    State(controller): State<Arc<ActivityController>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    controller.delete_activity(id).await?;
    Ok(StatusCode::OK)
}
