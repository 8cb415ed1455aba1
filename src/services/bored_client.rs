use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::models::activity::ActivityDto;

/// Source of randomly suggested activities.
#[async_trait]
pub trait RandomActivitySource: Send + Sync {
    /// `Ok(None)` means the upstream answered but had nothing to offer.
    async fn fetch_random_activity(&self) -> Result<Option<ActivityDto>, ApiError>;
}

pub struct BoredClient {
    http: reqwest::Client,
    url: String,
}

impl BoredClient {
    pub fn new(url: String) -> Self {
        BoredClient {
            http: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl RandomActivitySource for BoredClient {
    async fn fetch_random_activity(&self) -> Result<Option<ActivityDto>, ApiError> {
        debug!("Requesting random activity from {}", self.url);
        let response = self.http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| {
                ApiError::ExternalAPIError(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            warn!("Random activity API returned error {}: {}", status, error_text);
            return Err(ApiError::ExternalAPIError(error_text));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::ExternalAPIError(e.to_string()))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let activity: Option<ActivityDto> = serde_json::from_slice(&body)
            .map_err(|e| {
                warn!("Error deserializing random activity body: {}", e);
                ApiError::ExternalAPIError(e.to_string())
            })?;

        Ok(activity)
    }
}
