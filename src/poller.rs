//! Job status polling.
//!
//! After a submission the client queries `/api/status/{jobId}` until the job
//! reaches a terminal status (COMPLETED or ERROR) or a transport failure ends
//! the loop. The delay between queries is fixed; there is no attempt cap and
//! no backoff. Every poll session owns a cancellation token so a torn-down
//! consumer never leaves a timed continuation behind.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::{ApiClient, ApiError};
use crate::models::Job;

/// Source of job status reports. Implemented by [`ApiClient`]; tests use
/// scripted implementations.
pub trait StatusSource {
    fn status(&self, job_id: &str) -> impl Future<Output = Result<Job, ApiError>>;
}

impl StatusSource for ApiClient {
    fn status(&self, job_id: &str) -> impl Future<Output = Result<Job, ApiError>> {
        ApiClient::status(self, job_id)
    }
}

/// How a poll session ended.
#[derive(Debug)]
pub enum PollEnd {
    /// The job reached COMPLETED or ERROR; the final report is attached.
    Terminal(Box<Job>),
    /// The session's cancellation token fired between queries.
    Cancelled,
}

/// Poll `job_id` until a terminal status, a transport/server failure, or
/// cancellation.
///
/// The first query is issued immediately; each subsequent query after a fixed
/// `interval`. Non-terminal reports are passed to `on_update` so the caller
/// can surface PENDING/PROCESSING transitions.
pub async fn poll_until_terminal<S: StatusSource>(
    source: &S,
    job_id: &str,
    interval: Duration,
    cancel: &CancellationToken,
    mut on_update: impl FnMut(Job),
) -> Result<PollEnd, ApiError> {
    loop {
        let job = source.status(job_id).await?;

        if job.status.is_terminal() {
            tracing::debug!(job_id, status = %job.status, "poll reached terminal status");
            return Ok(PollEnd::Terminal(Box::new(job)));
        }

        on_update(job);

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(job_id, "poll session cancelled");
                return Ok(PollEnd::Cancelled);
            }
            _ = tokio::time::sleep(interval) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use crate::models::JobStatus;

    /// Status source that replays a fixed sequence of reports and counts
    /// how many queries it served.
    struct ScriptedSource {
        responses: RefCell<VecDeque<Result<JobStatus, ApiError>>>,
        queries: RefCell<usize>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<JobStatus, ApiError>>) -> Self {
            Self {
                responses: RefCell::new(script.into()),
                queries: RefCell::new(0),
            }
        }

        fn query_count(&self) -> usize {
            *self.queries.borrow()
        }
    }

    impl StatusSource for ScriptedSource {
        fn status(&self, job_id: &str) -> impl Future<Output = Result<Job, ApiError>> {
            *self.queries.borrow_mut() += 1;
            let next = self
                .responses
                .borrow_mut()
                .pop_front()
                .expect("script exhausted");
            let job_id = job_id.to_string();
            async move {
                next.map(|status| Job {
                    job_id,
                    status,
                    created_at: None,
                    updated_at: None,
                    text: None,
                    results: None,
                })
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_after_terminal_status() {
        // PENDING, PENDING, COMPLETED: exactly three queries, then stop.
        let source = ScriptedSource::new(vec![
            Ok(JobStatus::Pending),
            Ok(JobStatus::Pending),
            Ok(JobStatus::Completed),
        ]);
        let cancel = CancellationToken::new();
        let mut updates = Vec::new();

        let end = poll_until_terminal(
            &source,
            "job-1",
            Duration::from_secs(2),
            &cancel,
            |job| updates.push(job.status),
        )
        .await
        .unwrap();

        assert_eq!(source.query_count(), 3);
        assert_eq!(updates, vec![JobStatus::Pending, JobStatus::Pending]);
        match end {
            PollEnd::Terminal(job) => assert_eq!(job.status, JobStatus::Completed),
            PollEnd::Cancelled => panic!("expected terminal end"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_status_is_terminal() {
        let source = ScriptedSource::new(vec![
            Ok(JobStatus::Processing),
            Ok(JobStatus::Error),
        ]);
        let cancel = CancellationToken::new();

        let end = poll_until_terminal(
            &source,
            "job-2",
            Duration::from_secs(2),
            &cancel,
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(source.query_count(), 2);
        assert!(matches!(end, PollEnd::Terminal(job) if job.status == JobStatus::Error));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_ends_loop() {
        let source = ScriptedSource::new(vec![
            Ok(JobStatus::Pending),
            Err(ApiError::Transport("connection refused".to_string())),
        ]);
        let cancel = CancellationToken::new();

        let err = poll_until_terminal(
            &source,
            "job-3",
            Duration::from_secs(2),
            &cancel,
            |_| {},
        )
        .await
        .unwrap_err();

        assert_eq!(source.query_count(), 2);
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_between_queries() {
        let source = ScriptedSource::new(vec![Ok(JobStatus::Pending)]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let end = poll_until_terminal(
            &source,
            "job-4",
            Duration::from_secs(2),
            &cancel,
            |_| {},
        )
        .await
        .unwrap();

        // One query was already in flight; the cancel fires before the next.
        assert_eq!(source.query_count(), 1);
        assert!(matches!(end, PollEnd::Cancelled));
    }
}
