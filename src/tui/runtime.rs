//! Async runtime and task management for the TUI
//!
//! This module implements the dual-channel event-driven architecture:
//! - Input channel (priority): User input events that are never dropped
//! - Data channel: API responses that may be dropped under backpressure
//!
//! The main loop uses `tokio::select!` with bias toward the input channel to
//! prevent input starvation. The App queues [`ApiCommand`] values; the loop
//! drains them after every event and hands them to the [`CommandExecutor`],
//! which spawns one task per API call.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiClient, ApiError};
use crate::poller::{PollEnd, poll_until_terminal};
use crate::tui::app::{App, View};
use crate::tui::event::{ApiCommand, DataEvent, DataSource, EventResult, InputEvent};

/// Channel capacities
const INPUT_CHANNEL_CAPACITY: usize = 16;
const DATA_CHANNEL_CAPACITY: usize = 32;

/// TUI runtime managing all background tasks
pub struct TuiRuntime {
    cancel_token: CancellationToken,
    task_handles: Vec<JoinHandle<()>>,
}

impl TuiRuntime {
    /// Create a new TUI runtime
    pub fn new() -> Self {
        Self {
            cancel_token: CancellationToken::new(),
            task_handles: Vec::new(),
        }
    }

    /// Get a clone of the cancellation token for spawning tasks
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Add a task handle to track
    pub fn track(&mut self, handle: JoinHandle<()>) {
        self.task_handles.push(handle);
    }

    /// Signal shutdown and wait for tasks to complete
    pub async fn shutdown(self) {
        // Signal all tasks to stop
        self.cancel_token.cancel();

        // Wait for graceful shutdown with timeout
        let shutdown = async {
            for handle in self.task_handles {
                let _ = handle.await;
            }
        };

        tokio::select! {
            _ = shutdown => {}
            _ = tokio::time::sleep(Duration::from_secs(2)) => {
                // Tasks did not stop in time; they will be dropped
            }
        }
    }
}

impl Default for TuiRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the input event reader task
pub fn spawn_input_task(tx: mpsc::Sender<InputEvent>, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut reader = EventStream::new();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            let input_event = match event {
                                Event::Key(key) => Some(InputEvent::Key(key)),
                                Event::Mouse(mouse) => Some(InputEvent::Mouse(mouse)),
                                Event::Resize(w, h) => Some(InputEvent::Resize(w, h)),
                                _ => None,
                            };

                            if let Some(evt) = input_event {
                                // Input channel should never be full, but handle it gracefully
                                if tx.send(evt).await.is_err() {
                                    break; // Receiver dropped
                                }
                            }
                        }
                        Some(Err(e)) => {
                            // Fatal terminal errors trigger shutdown
                            let is_fatal = matches!(
                                e.kind(),
                                std::io::ErrorKind::BrokenPipe
                                    | std::io::ErrorKind::ConnectionReset
                                    | std::io::ErrorKind::UnexpectedEof
                            );

                            if is_fatal {
                                tracing::info!("Terminal disconnected: {:?}", e);
                                break;
                            } else {
                                tracing::warn!("Terminal event read error: {:?}", e);
                            }
                        }
                        None => break, // Stream ended
                    }
                }
            }
        }
    })
}

/// Spawn the background job list refresher
///
/// Refreshes at the configured interval, but only while the jobs view is
/// visible. The initial fetch on tab switch comes from the App itself, so
/// this task waits a full interval before its first fetch.
pub fn spawn_jobs_refresher(
    client: ApiClient,
    tx: mpsc::Sender<DataEvent>,
    cancel: CancellationToken,
    interval: Duration,
    jobs_visible: Arc<AtomicBool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {
                    if !jobs_visible.load(Ordering::Relaxed) {
                        continue;
                    }
                    let result = client.list_jobs().await;
                    send_outcome(&tx, result, DataSource::Jobs, DataEvent::JobsUpdated);
                }
            }
        }
    })
}

/// Report an API call outcome on the data channel.
///
/// Uses try_send so a slow consumer drops data events instead of blocking
/// the producing task.
fn send_outcome<T>(
    tx: &mpsc::Sender<DataEvent>,
    result: Result<T, ApiError>,
    source: DataSource,
    success_event: impl FnOnce(T) -> DataEvent,
) {
    match result {
        Ok(data) => {
            if tx.try_send(success_event(data)).is_err() {
                tracing::warn!("Dropped {} result (channel full)", source);
            }
        }
        Err(e) => {
            if tx
                .try_send(DataEvent::FetchError {
                    source,
                    error: e.to_string(),
                })
                .is_err()
            {
                tracing::warn!("Could not send {} error notification (channel full)", source);
            }
        }
    }
}

/// Executes queued API commands by spawning one task per call.
///
/// Holds the poll session token for the active submission: starting a new
/// submission cancels the previous session so at most one poll loop runs.
pub struct CommandExecutor {
    client: ApiClient,
    data_tx: mpsc::Sender<DataEvent>,
    cancel: CancellationToken,
    poll_interval: Duration,
    poll_session: Option<CancellationToken>,
}

impl CommandExecutor {
    pub fn new(
        client: ApiClient,
        data_tx: mpsc::Sender<DataEvent>,
        cancel: CancellationToken,
        poll_interval: Duration,
    ) -> Self {
        Self {
            client,
            data_tx,
            cancel,
            poll_interval,
            poll_session: None,
        }
    }

    /// Cancel any active poll session and start a fresh one.
    ///
    /// The new token is a child of the runtime token, so runtime shutdown
    /// also stops the poll loop.
    fn new_poll_session(&mut self) -> CancellationToken {
        if let Some(previous) = self.poll_session.take() {
            previous.cancel();
        }
        let session = self.cancel.child_token();
        self.poll_session = Some(session.clone());
        session
    }

    pub fn execute(&mut self, command: ApiCommand) {
        let client = self.client.clone();
        let tx = self.data_tx.clone();

        match command {
            ApiCommand::Submit { text } => {
                let session = self.new_poll_session();
                let interval = self.poll_interval;
                tokio::spawn(async move {
                    match client.submit(&text).await {
                        Ok(receipt) => {
                            let job_id = receipt.job_id.clone();
                            let _ = tx.send(DataEvent::SubmitAccepted(receipt)).await;

                            let updates_tx = tx.clone();
                            let result = poll_until_terminal(
                                &client,
                                &job_id,
                                interval,
                                &session,
                                |job| {
                                    let _ = updates_tx.try_send(DataEvent::PollUpdate(Box::new(job)));
                                },
                            )
                            .await;

                            match result {
                                Ok(PollEnd::Terminal(job)) => {
                                    let _ = tx.send(DataEvent::PollFinished(job)).await;
                                }
                                Ok(PollEnd::Cancelled) => {
                                    tracing::debug!("Poll session for {} cancelled", job_id);
                                }
                                Err(e) => {
                                    send_outcome::<()>(
                                        &tx,
                                        Err(e),
                                        DataSource::Poll,
                                        |_| unreachable!(),
                                    );
                                }
                            }
                        }
                        Err(e) => {
                            send_outcome::<()>(&tx, Err(e), DataSource::Submit, |_| unreachable!());
                        }
                    }
                });
            }
            ApiCommand::FetchJobs => {
                tokio::spawn(async move {
                    let result = client.list_jobs().await;
                    send_outcome(&tx, result, DataSource::Jobs, DataEvent::JobsUpdated);
                });
            }
            ApiCommand::FetchJob { job_id } => {
                tokio::spawn(async move {
                    let result = client.status(&job_id).await;
                    send_outcome(&tx, result, DataSource::Detail, |job| {
                        DataEvent::JobDetail(Box::new(job))
                    });
                });
            }
            ApiCommand::DeleteJob { job_id } => {
                tokio::spawn(async move {
                    let result = client.delete_job(&job_id).await;
                    send_outcome(&tx, result, DataSource::Delete, |()| {
                        DataEvent::JobDeleted { job_id }
                    });
                });
            }
            ApiCommand::DeleteAllJobs => {
                tokio::spawn(async move {
                    let result = client.delete_all_jobs().await;
                    send_outcome(&tx, result, DataSource::Purge, DataEvent::AllJobsDeleted);
                });
            }
        }
    }
}

/// Run the main TUI event loop
pub async fn run_event_loop(
    mut app: App,
    mut input_rx: mpsc::Receiver<InputEvent>,
    mut data_rx: mpsc::Receiver<DataEvent>,
    mut executor: CommandExecutor,
    jobs_visible: Arc<AtomicBool>,
    mut render_fn: impl FnMut(&App) -> Result<()>,
) -> Result<()> {
    let mut needs_render = true;

    loop {
        // Execute API calls the app queued while handling the last event
        for command in app.take_commands() {
            executor.execute(command);
        }
        jobs_visible.store(app.current_view == View::Jobs, Ordering::Relaxed);

        if needs_render {
            render_fn(&app)?;
            needs_render = false;
        }

        if !app.running {
            break;
        }

        tokio::select! {
            // Bias toward input channel to prevent input starvation
            biased;

            Some(input) = input_rx.recv() => {
                match app.handle_input(input) {
                    EventResult::Continue => needs_render = true,
                    EventResult::Unchanged => {}
                    EventResult::Quit => break,
                }
            }

            Some(data) = data_rx.recv() => {
                match app.handle_data(data) {
                    EventResult::Continue => needs_render = true,
                    EventResult::Unchanged => {}
                    EventResult::Quit => break,
                }
            }

            else => break,
        }
    }

    Ok(())
}

/// Create the dual channels for the TUI
pub fn create_channels() -> (
    mpsc::Sender<InputEvent>,
    mpsc::Receiver<InputEvent>,
    mpsc::Sender<DataEvent>,
    mpsc::Receiver<DataEvent>,
) {
    let (input_tx, input_rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
    let (data_tx, data_rx) = mpsc::channel(DATA_CHANNEL_CAPACITY);
    (input_tx, input_rx, data_tx, data_rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_poll_session_cancels_previous() {
        let (tx, _rx) = mpsc::channel(4);
        let mut executor = CommandExecutor::new(
            ApiClient::new("http://localhost:5000").unwrap(),
            tx,
            CancellationToken::new(),
            Duration::from_secs(2),
        );

        let first = executor.new_poll_session();
        assert!(!first.is_cancelled());

        let second = executor.new_poll_session();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }

    #[tokio::test]
    async fn test_runtime_shutdown_cancels_poll_sessions() {
        let (tx, _rx) = mpsc::channel(4);
        let runtime = TuiRuntime::new();
        let mut executor = CommandExecutor::new(
            ApiClient::new("http://localhost:5000").unwrap(),
            tx,
            runtime.cancel_token(),
            Duration::from_secs(2),
        );

        let session = executor.new_poll_session();
        runtime.shutdown().await;
        assert!(session.is_cancelled());
    }
}
