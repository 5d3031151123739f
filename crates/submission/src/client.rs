//! Transport boundary to the backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use pharmademand_inventory::MedicineRecord;

use crate::error::TransportError;

/// Path of the submission endpoint, relative to the API base URL.
pub const SUBMIT_PATH: &str = "/submit-data";

/// Sends a record list to the backend.
///
/// One call is one request: implementations must not retry.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// POST the records and return the server's JSON response body.
    async fn submit(&self, records: &[MedicineRecord]) -> Result<Value, TransportError>;
}

/// HTTP client for `POST {base_url}/submit-data`.
///
/// The body is a flat JSON array of records (no envelope). No auth.
#[derive(Debug, Clone)]
pub struct HttpSubmissionClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpSubmissionClient {
    /// Build a client for `base_url`, with an optional per-request timeout.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (shared pools, tests).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, TransportError> {
        let endpoint = endpoint_url(base_url)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn endpoint_url(base_url: &str) -> Result<Url, TransportError> {
    let base = base_url.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{base}{SUBMIT_PATH}"))
        .map_err(|e| TransportError::InvalidUrl(format!("{base_url}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::InvalidUrl(format!(
            "{base_url}: unsupported scheme {}",
            url.scheme()
        )));
    }
    Ok(url)
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit(&self, records: &[MedicineRecord]) -> Result<Value, TransportError> {
        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(records)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let Ok(body) = serde_json::from_str::<Value>(&body) else {
                tracing::warn!(status = status.as_u16(), "submission rejected with a non-JSON body");
                return Err(TransportError::InvalidResponse(format!(
                    "HTTP {} with a non-JSON body",
                    status.as_u16()
                )));
            };
            // Servers report failures as `{ "error": "..." }`.
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string);
            tracing::warn!(status = status.as_u16(), ?message, "submission rejected");
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }
}
