//! HTTP client wrapper for the AnalytiCore REST API.
//!
//! Every operation takes minimal typed input and returns either a typed
//! payload or an [`ApiError`] carrying a human-readable message. No retries,
//! no backoff; each call either fully succeeds or reports an error.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::models::{ErrorBody, Job, JobListEnvelope, PurgeReceipt, SubmitReceipt};

/// Transport timeout applied to every request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure modes of a single API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected client-side; no network call was issued.
    #[error("{0}")]
    Validation(String),

    /// The service answered with a non-2xx status.
    #[error("server error: {message}")]
    Server { status: StatusCode, message: String },

    /// Connection, timeout, or malformed-response failure.
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

#[derive(Serialize)]
struct SubmitBody<'a> {
    text: &'a str,
}

/// Client for the analysis service. Cheap to clone; the base URL is injected
/// at construction.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Submit text for analysis. Empty or whitespace-only text is rejected
    /// without touching the network.
    pub async fn submit(&self, text: &str) -> Result<SubmitReceipt, ApiError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ApiError::Validation(
                "text must not be empty".to_string(),
            ));
        }

        tracing::debug!(len = text.len(), "submitting text for analysis");
        let response = self
            .http
            .post(self.endpoint("/api/submit"))
            .json(&SubmitBody { text })
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Fetch the current state of one job, including results when terminal.
    pub async fn status(&self, job_id: &str) -> Result<Job, ApiError> {
        let response = self
            .http
            .get(self.endpoint(&format!("/api/status/{job_id}")))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// List all jobs known to the service (most recent first).
    pub async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let response = self.http.get(self.endpoint("/api/jobs")).send().await?;

        let envelope: JobListEnvelope = Self::decode(response).await?;
        Ok(envelope.jobs)
    }

    /// Delete one job.
    pub async fn delete_job(&self, job_id: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("/api/jobs/{job_id}")))
            .send()
            .await?;

        Self::check(response).await?;
        tracing::info!(job_id, "job deleted");
        Ok(())
    }

    /// Delete every job (clear history). Returns how many were removed.
    pub async fn delete_all_jobs(&self) -> Result<PurgeReceipt, ApiError> {
        let response = self.http.delete(self.endpoint("/api/jobs")).send().await?;

        let receipt: PurgeReceipt = Self::decode(response).await?;
        tracing::info!(deleted = receipt.deleted_count, "history cleared");
        Ok(receipt)
    }

    /// Turn a response into a typed payload, mapping non-2xx statuses to
    /// [`ApiError::Server`] with the server's error field when available.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Transport(format!("invalid response body: {e}")))
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                format!(
                    "HTTP {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("")
                )
                .trim_end()
                .to_string()
            });

        tracing::warn!(%status, %message, "request failed");
        Err(ApiError::Server { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_rejects_blank_text_without_network() {
        // The base URL points nowhere; a network attempt would fail with a
        // transport error, so a Validation error proves no call was issued.
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();

        let err = client.submit("   \n\t ").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = client.submit("").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = ApiClient::new("http://localhost:5000///").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.endpoint("/api/jobs"), "http://localhost:5000/api/jobs");
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Validation("text must not be empty".to_string());
        assert_eq!(err.to_string(), "text must not be empty");

        let err = ApiError::Server {
            status: StatusCode::NOT_FOUND,
            message: "Job not found".to_string(),
        };
        assert_eq!(err.to_string(), "server error: Job not found");
    }
}
