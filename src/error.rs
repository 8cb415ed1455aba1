/*
error.rs
*/

use axum::{
    Json,
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    StartupError(String),
    DatabaseError(String),
    ExternalAPIError(String),
    NotFound(String),
}

/*
Axum uses the IntoResponse trait to turn values into HTTP responses.
By implementing this trait for ApiError, handlers can return these errors
directly and the caller receives a JSON body with the message.
*/
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            ApiError::StartupError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                msg
            ),
            ApiError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                msg
            ),
            ApiError::ExternalAPIError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                msg
            ),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                msg
            ),
        };

        if status.is_server_error() {
            tracing::error!(%status, "request failed: {}", error_message);
        }

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
