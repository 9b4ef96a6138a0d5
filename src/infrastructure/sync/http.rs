use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::entities::alert::Alert;
use crate::domain::ports::synchronizer::{AlertSynchronizer, SyncError};

/// Pushes alert state to a monitoring backend over HTTP.
///
/// Each call issues one `PUT {endpoint}/alerts/{id}` with a JSON body. Any 2xx
/// status counts as success. There is no retry: a failed push is reported to
/// the caller, who decides whether to try again.
pub struct HttpSynchronizer {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpSynchronizer {
    /// Creates a synchronizer targeting the given backend base URL.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Misconfigured` if the URL is not http(s) or the HTTP
    /// client cannot be initialized (e.g. TLS backend failure).
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, SyncError> {
        let parsed = url::Url::parse(endpoint)
            .map_err(|e| SyncError::Misconfigured(format!("invalid endpoint {endpoint}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SyncError::Misconfigured(format!(
                "unsupported scheme {} in {endpoint}",
                parsed.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Misconfigured(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn alert_url(&self, alert: &Alert) -> String {
        format!("{}/alerts/{}", self.endpoint, alert.id)
    }

    fn payload(alert: &Alert) -> Value {
        json!({
            "id": alert.id,
            "name": &alert.name,
            "enabled": alert.enabled,
        })
    }
}

#[async_trait]
impl AlertSynchronizer for HttpSynchronizer {
    async fn synchronize(&self, alert: &Alert) -> Result<(), SyncError> {
        let resp = self
            .client
            .put(self.alert_url(alert))
            .json(&Self::payload(alert))
            .send()
            .await
            .map_err(|e| SyncError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            tracing::debug!(alert_id = alert.id, %status, "alert pushed to monitoring backend");
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(SyncError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
