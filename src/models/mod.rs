//! Data types for the AnalytiCore REST API.
//!
//! All types here mirror the JSON the service emits. Jobs are owned by the
//! server; the client only holds cached copies and trusts the status values
//! it is given.

mod config;

pub use config::{AppConfig, BehaviorConfig, DisplayConfig, RefreshConfig, ServerConfig};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-side job status.
///
/// Transitions are PENDING -> PROCESSING -> {COMPLETED | ERROR}, but the
/// client never enforces this; it displays whatever the server reports.
/// Older deployments of the service emit Spanish status strings, accepted
/// here as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    #[default]
    #[serde(alias = "PENDIENTE")]
    Pending,
    #[serde(alias = "PROCESANDO")]
    Processing,
    #[serde(alias = "COMPLETADO")]
    Completed,
    Error,
}

impl JobStatus {
    /// COMPLETED and ERROR are terminal; no further transitions expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Processing => "PROCESSING",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment label attached to a completed analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    #[serde(alias = "POSITIVO", alias = "positive", alias = "positivo")]
    Positive,
    #[serde(alias = "NEGATIVO", alias = "negative", alias = "negativo")]
    Negative,
    #[serde(alias = "neutral")]
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result payload for a completed job.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    /// Confidence score in [0, 1].
    pub confidence: f64,
    /// Keywords in the order the service ranked them.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// One analysis job as reported by the service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub job_id: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Original submitted text. The list endpoint omits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Present once the job is COMPLETED.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<AnalysisResult>,
}

/// Response to POST /api/submit.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    pub job_id: String,
    #[serde(default)]
    pub status: JobStatus,
}

/// Response to DELETE /api/jobs (delete-all).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeReceipt {
    #[serde(default)]
    pub deleted_count: u64,
}

/// Envelope around GET /api/jobs.
#[derive(Debug, Deserialize)]
pub struct JobListEnvelope {
    #[serde(default)]
    pub jobs: Vec<Job>,
}

/// Error body the service attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    /// Best human-readable message available in the body.
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_terminal() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Error.is_terminal());
    }

    #[test]
    fn test_status_accepts_legacy_spanish_strings() {
        let status: JobStatus = serde_json::from_str("\"PENDIENTE\"").unwrap();
        assert_eq!(status, JobStatus::Pending);

        let status: JobStatus = serde_json::from_str("\"COMPLETADO\"").unwrap();
        assert_eq!(status, JobStatus::Completed);

        // Canonical form round-trips
        assert_eq!(
            serde_json::to_string(&JobStatus::Processing).unwrap(),
            "\"PROCESSING\""
        );
    }

    #[test]
    fn test_sentiment_accepts_lowercase() {
        let s: Sentiment = serde_json::from_str("\"neutral\"").unwrap();
        assert_eq!(s, Sentiment::Neutral);

        let s: Sentiment = serde_json::from_str("\"POSITIVO\"").unwrap();
        assert_eq!(s, Sentiment::Positive);
    }

    #[test]
    fn test_job_deserialization() {
        let raw = r#"{
            "jobId": "4b1c6c0e-9f4e-4ab1-94a6-0c7c9c3a1f11",
            "status": "COMPLETED",
            "createdAt": "2025-06-01T12:00:00Z",
            "updatedAt": "2025-06-01T12:00:05Z",
            "text": "great service",
            "results": {
                "sentiment": "POSITIVE",
                "confidence": 0.87,
                "keywords": ["great", "service"]
            }
        }"#;

        let job: Job = serde_json::from_str(raw).unwrap();
        assert_eq!(job.job_id, "4b1c6c0e-9f4e-4ab1-94a6-0c7c9c3a1f11");
        assert_eq!(job.status, JobStatus::Completed);
        let results = job.results.unwrap();
        assert_eq!(results.sentiment, Sentiment::Positive);
        assert_eq!(results.keywords, vec!["great", "service"]);
    }

    #[test]
    fn test_job_list_entry_without_text_or_results() {
        // The list endpoint returns only id, status, and timestamps
        let raw = r#"{"jobs": [{"jobId": "abc", "status": "PENDING"}]}"#;
        let envelope: JobListEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.jobs.len(), 1);
        assert!(envelope.jobs[0].text.is_none());
        assert!(envelope.jobs[0].results.is_none());
    }

    #[test]
    fn test_error_body_prefers_error_field() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "Job not found", "message": "404"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Job not found"));
    }
}
