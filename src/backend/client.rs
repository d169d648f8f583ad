use std::time::Duration;

use super::types::{BackendHealth, BackendSearchRequest, BackendSearchResponse};
use super::BackendError;
use crate::config::BackendConfig;

/// HTTP client for the search backend.
///
/// Every exchange is a health check followed by one search call, and both
/// share a single timeout budget.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl BackendClient {
    pub fn new(http: reqwest::Client, config: &BackendConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// `GET /`. A non-2xx answer is [`BackendError::Unhealthy`]; a body that
    /// is not the expected JSON is tolerated.
    pub async fn health(&self) -> Result<BackendHealth, BackendError> {
        let resp = self.http.get(format!("{}/", self.base_url)).send().await?;

        if !resp.status().is_success() {
            return Err(BackendError::Unhealthy(resp.status().as_u16()));
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            tracing::warn!("Unexpected health check body from search backend: {e}");
            BackendHealth::default()
        }))
    }

    /// `POST /api/search`.
    pub async fn search(
        &self,
        req: &BackendSearchRequest<'_>,
    ) -> Result<BackendSearchResponse, BackendError> {
        let resp = self
            .http
            .post(format!("{}/api/search", self.base_url))
            .json(req)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, body });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| BackendError::Decode(e.to_string()))
    }

    /// Health check, then search, within the configured timeout.
    pub async fn checked_search(
        &self,
        req: &BackendSearchRequest<'_>,
    ) -> Result<BackendSearchResponse, BackendError> {
        let exchange = async {
            let health = self.health().await?;
            if !health.available_encoders.is_empty()
                && !health.available_encoders.iter().any(|e| e == req.encoder)
            {
                tracing::warn!(
                    "Encoder {:?} not in backend's available encoders {:?}",
                    req.encoder,
                    health.available_encoders
                );
            }
            self.search(req).await
        };

        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| BackendError::Timeout)?
    }
}
