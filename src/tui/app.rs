//! Application state and core logic for the TUI
//!
//! This module contains the main App struct and all associated state
//! management. The architecture follows a TEA-inspired pattern with mutable
//! state and method-based updates. The App never performs I/O itself: user
//! intents queue [`ApiCommand`] values that the runtime drains and executes,
//! and API responses come back as [`DataEvent`] values.

use std::time::{Duration, Instant};

use crate::models::{AnalysisResult, AppConfig, Job, JobStatus};
use crate::tui::event::{ApiCommand, DataEvent, DataSource, EventResult, InputEvent, KeyAction};

/// Confirmation steps for destructive actions. Deleting the whole history
/// requires passing through both DeleteAll stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteJob { job_id: String },
    DeleteAllFirst,
    DeleteAllSecond,
}

impl ConfirmAction {
    pub fn description(&self) -> String {
        match self {
            ConfirmAction::DeleteJob { job_id } => {
                format!("Delete analysis {}?", crate::formatting::short_id(job_id))
            }
            ConfirmAction::DeleteAllFirst => {
                "Delete ALL history? This cannot be undone.".to_string()
            }
            ConfirmAction::DeleteAllSecond => {
                "This will remove EVERY analysis. Really continue?".to_string()
            }
        }
    }
}

/// Operation feedback toast shown briefly in the status bar
#[derive(Debug, Clone)]
pub struct Feedback {
    pub message: String,
    pub success: bool,
    pub timestamp: Instant,
}

impl Feedback {
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
            timestamp: Instant::now(),
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
            timestamp: Instant::now(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.timestamp.elapsed() < Duration::from_secs(3)
    }
}

/// List data plus the time it was fetched, for staleness display
#[derive(Debug)]
pub struct DataSlice<T> {
    pub data: Vec<T>,
    pub last_updated: Option<Instant>,
}

impl<T> Default for DataSlice<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            last_updated: None,
        }
    }
}

impl<T> DataSlice<T> {
    pub fn update(&mut self, data: Vec<T>) {
        self.data = data;
        self.last_updated = Some(Instant::now());
    }

    pub fn age(&self) -> Option<Duration> {
        self.last_updated.map(|t| t.elapsed())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Selection and scroll state for a list view
#[derive(Debug, Default)]
pub struct ListState {
    pub selected: usize,
    pub scroll_offset: usize,
}

impl ListState {
    /// Clamp selection to the valid range after data changes
    pub fn clamp(&mut self, list_len: usize) {
        if list_len == 0 {
            self.selected = 0;
            self.scroll_offset = 0;
        } else if self.selected >= list_len {
            self.selected = list_len - 1;
        }
    }

    pub fn move_up(&mut self, _list_len: usize) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.scroll_offset {
                self.scroll_offset = self.selected;
            }
        }
    }

    pub fn move_down(&mut self, list_len: usize) {
        if self.selected + 1 < list_len {
            self.selected += 1;
        }
    }

    pub fn move_to_top(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn move_to_bottom(&mut self, list_len: usize) {
        if list_len > 0 {
            self.selected = list_len - 1;
        }
    }
}

/// Phase of the submission poll loop, as observed by the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    AwaitingFirstResponse,
    Polling,
    Terminal,
}

/// State of the current (most recent) submission
#[derive(Debug, Default)]
pub struct Submission {
    pub phase: SubmitPhase,
    pub job_id: Option<String>,
    pub status: Option<JobStatus>,
    pub results: Option<AnalysisResult>,
}

impl Submission {
    pub fn in_flight(&self) -> bool {
        matches!(
            self.phase,
            SubmitPhase::AwaitingFirstResponse | SubmitPhase::Polling
        )
    }
}

/// Modal interaction modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Normal,
    /// Typing into the submit textarea
    Insert,
    /// Job detail overlay open
    Detail,
    /// Confirmation dialog open
    Confirm,
}

/// Top-level tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Submit = 0,
    Jobs = 1,
}

impl View {
    pub fn next(&self) -> Self {
        match self {
            View::Submit => View::Jobs,
            View::Jobs => View::Submit,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Submit => " New Analysis ",
            View::Jobs => " My Analyses ",
        }
    }
}

/// Main application state
pub struct App {
    // Lifecycle
    pub running: bool,

    // Mode and View
    pub mode: AppMode,
    pub current_view: View,

    // Submit tab
    pub input: String,
    pub submission: Submission,

    // Jobs tab
    pub jobs: DataSlice<Job>,
    pub jobs_state: ListState,
    pub jobs_loading: bool,

    // Detail overlay
    pub detail: Option<Job>,

    // Dialogs and overlays
    pub confirm_action: Option<ConfirmAction>,
    pub show_help: bool,
    pub feedback: Option<Feedback>,

    // Error display
    pub last_error: Option<(String, Instant)>,

    // Queued API calls, drained by the runtime
    pending_commands: Vec<ApiCommand>,

    // Configuration
    pub config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            running: true,
            mode: AppMode::Normal,
            current_view: View::Submit,

            input: String::new(),
            submission: Submission::default(),

            jobs: DataSlice::default(),
            jobs_state: ListState::default(),
            jobs_loading: false,

            detail: None,

            confirm_action: None,
            show_help: false,
            feedback: None,

            last_error: None,

            pending_commands: Vec::new(),

            config,
        }
    }

    /// Take the queued API commands for execution
    pub fn take_commands(&mut self) -> Vec<ApiCommand> {
        std::mem::take(&mut self.pending_commands)
    }

    /// Currently selected job in the jobs table
    pub fn selected_job(&self) -> Option<&Job> {
        self.jobs.data.get(self.jobs_state.selected)
    }

    /// Feedback toast if still within its display window
    pub fn current_feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref().filter(|f| f.is_visible())
    }

    /// Error if still within its display window
    pub fn current_error(&self) -> Option<&str> {
        self.last_error
            .as_ref()
            .filter(|(_, at)| at.elapsed() < Duration::from_secs(8))
            .map(|(msg, _)| msg.as_str())
    }

    /// Handle an input event
    pub fn handle_input(&mut self, event: InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key_event) => {
                let in_insert = self.mode == AppMode::Insert;
                let action = KeyAction::from_key_event(key_event, in_insert);
                self.handle_action(action)
            }
            InputEvent::Resize(_, _) => EventResult::Continue,
            InputEvent::Mouse(mouse_event) => {
                let action = KeyAction::from_mouse_event(mouse_event);
                self.handle_action(action)
            }
        }
    }

    /// Handle a key action
    pub fn handle_action(&mut self, action: KeyAction) -> EventResult {
        // Help overlay takes priority
        if self.show_help {
            return match action {
                KeyAction::Escape | KeyAction::ShowHelp | KeyAction::Quit => {
                    self.show_help = false;
                    EventResult::Continue
                }
                _ => EventResult::Unchanged,
            };
        }

        // Modal modes take priority over normal navigation
        match self.mode {
            AppMode::Insert => return self.handle_insert_action(action),
            AppMode::Confirm => return self.handle_confirm_action(action),
            AppMode::Detail => return self.handle_detail_action(action),
            AppMode::Normal => {}
        }

        match action {
            KeyAction::Quit => {
                self.running = false;
                EventResult::Quit
            }

            // Navigation (jobs table)
            KeyAction::MoveUp => {
                self.jobs_state.move_up(self.jobs.len());
                EventResult::Continue
            }
            KeyAction::MoveDown => {
                self.jobs_state.move_down(self.jobs.len());
                EventResult::Continue
            }
            KeyAction::MoveToTop => {
                self.jobs_state.move_to_top();
                EventResult::Continue
            }
            KeyAction::MoveToBottom => {
                self.jobs_state.move_to_bottom(self.jobs.len());
                EventResult::Continue
            }

            // View switching
            KeyAction::SwitchToSubmit => {
                self.switch_view(View::Submit);
                EventResult::Continue
            }
            KeyAction::SwitchToJobs => {
                self.switch_view(View::Jobs);
                EventResult::Continue
            }
            KeyAction::NextView => {
                self.switch_view(self.current_view.next());
                EventResult::Continue
            }

            // Submit tab actions
            KeyAction::EditText => {
                if self.current_view == View::Submit {
                    self.mode = AppMode::Insert;
                }
                EventResult::Continue
            }
            KeyAction::Submit => {
                if self.current_view == View::Submit {
                    self.submit_text();
                }
                EventResult::Continue
            }
            KeyAction::ResetForm => {
                if self.current_view == View::Submit && !self.submission.in_flight() {
                    self.input.clear();
                    self.submission = Submission::default();
                    self.last_error = None;
                }
                EventResult::Continue
            }

            // Jobs tab actions
            KeyAction::Select => {
                if self.current_view == View::Jobs
                    && let Some(job) = self.selected_job()
                {
                    self.pending_commands.push(ApiCommand::FetchJob {
                        job_id: job.job_id.clone(),
                    });
                }
                EventResult::Continue
            }
            KeyAction::Refresh => {
                if self.current_view == View::Jobs {
                    self.request_job_list();
                }
                EventResult::Continue
            }
            KeyAction::Delete => {
                if self.current_view == View::Jobs
                    && let Some(job) = self.selected_job()
                {
                    let job_id = job.job_id.clone();
                    self.request_delete(job_id);
                }
                EventResult::Continue
            }
            KeyAction::DeleteAll => {
                if self.current_view == View::Jobs && !self.jobs.is_empty() {
                    self.confirm_action = Some(ConfirmAction::DeleteAllFirst);
                    self.mode = AppMode::Confirm;
                }
                EventResult::Continue
            }
            KeyAction::YankJobId => {
                self.yank_job_id();
                EventResult::Continue
            }

            KeyAction::ShowHelp => {
                self.show_help = true;
                EventResult::Continue
            }
            KeyAction::Escape => {
                self.last_error = None;
                EventResult::Continue
            }

            _ => EventResult::Unchanged,
        }
    }

    /// Handle actions while typing into the submit textarea
    fn handle_insert_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape => {
                self.mode = AppMode::Normal;
                EventResult::Continue
            }
            KeyAction::Submit => {
                self.mode = AppMode::Normal;
                self.submit_text();
                EventResult::Continue
            }
            KeyAction::InsertChar(c) => {
                self.input.push(c);
                EventResult::Continue
            }
            KeyAction::InsertNewline => {
                self.input.push('\n');
                EventResult::Continue
            }
            KeyAction::InsertBackspace => {
                self.input.pop();
                EventResult::Continue
            }
            KeyAction::Quit => {
                self.running = false;
                EventResult::Quit
            }
            _ => EventResult::Unchanged,
        }
    }

    /// Handle actions in confirm dialog mode
    fn handle_confirm_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape | KeyAction::InsertChar('n') | KeyAction::InsertChar('N') => {
                self.confirm_action = None;
                self.close_confirm();
                EventResult::Continue
            }
            KeyAction::Select | KeyAction::InsertChar('y') | KeyAction::InsertChar('Y') => {
                match self.confirm_action.take() {
                    Some(ConfirmAction::DeleteJob { job_id }) => {
                        self.pending_commands.push(ApiCommand::DeleteJob { job_id });
                        self.close_confirm();
                    }
                    Some(ConfirmAction::DeleteAllFirst) => {
                        // Clearing the whole history needs a second confirmation
                        self.confirm_action = Some(ConfirmAction::DeleteAllSecond);
                    }
                    Some(ConfirmAction::DeleteAllSecond) => {
                        self.pending_commands.push(ApiCommand::DeleteAllJobs);
                        self.close_confirm();
                    }
                    None => self.close_confirm(),
                }
                EventResult::Continue
            }
            _ => EventResult::Unchanged,
        }
    }

    /// Handle actions while the job detail overlay is open
    fn handle_detail_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape | KeyAction::Select => {
                self.close_detail();
                EventResult::Continue
            }
            KeyAction::Delete => {
                if let Some(job) = &self.detail {
                    let job_id = job.job_id.clone();
                    self.request_delete(job_id);
                }
                EventResult::Continue
            }
            KeyAction::YankJobId => {
                self.yank_job_id();
                EventResult::Continue
            }
            KeyAction::Quit => {
                self.running = false;
                EventResult::Quit
            }
            _ => EventResult::Unchanged,
        }
    }

    /// Handle a data event
    pub fn handle_data(&mut self, event: DataEvent) -> EventResult {
        match event {
            DataEvent::SubmitAccepted(receipt) => {
                self.submission.phase = SubmitPhase::Polling;
                self.submission.status = Some(receipt.status);
                self.submission.job_id = Some(receipt.job_id);
                EventResult::Continue
            }
            DataEvent::PollUpdate(job) => {
                self.submission.status = Some(job.status);
                EventResult::Continue
            }
            DataEvent::PollFinished(job) => {
                self.submission.phase = SubmitPhase::Terminal;
                self.submission.status = Some(job.status);
                if job.status == JobStatus::Error {
                    self.set_error("The analysis failed during processing".to_string());
                }
                self.submission.results = job.results;
                EventResult::Continue
            }
            DataEvent::JobsUpdated(jobs) => {
                self.jobs.update(jobs);
                self.jobs_state.clamp(self.jobs.len());
                self.jobs_loading = false;
                EventResult::Continue
            }
            DataEvent::JobDetail(job) => {
                self.detail = Some(*job);
                self.mode = AppMode::Detail;
                EventResult::Continue
            }
            DataEvent::JobDeleted { job_id } => {
                // Remove locally; no follow-up list fetch
                self.jobs.data.retain(|j| j.job_id != job_id);
                self.jobs_state.clamp(self.jobs.len());

                if self.detail.as_ref().is_some_and(|j| j.job_id == job_id) {
                    self.close_detail();
                }

                self.feedback = Some(Feedback::success(format!(
                    "Deleted {}",
                    crate::formatting::short_id(&job_id)
                )));
                EventResult::Continue
            }
            DataEvent::AllJobsDeleted(receipt) => {
                self.jobs.data.clear();
                self.jobs_state.clamp(0);
                self.close_detail();

                self.feedback = Some(Feedback::success(format!(
                    "History cleared ({} deleted)",
                    receipt.deleted_count
                )));
                EventResult::Continue
            }
            DataEvent::FetchError { source, error } => {
                match source {
                    DataSource::Submit | DataSource::Poll => {
                        self.submission.phase = SubmitPhase::Terminal;
                    }
                    DataSource::Jobs => self.jobs_loading = false,
                    _ => {}
                }
                self.set_error(format!("{}: {}", source, error));
                EventResult::Continue
            }
        }
    }

    /// Submit the current textarea content
    fn submit_text(&mut self) {
        if self.submission.in_flight() {
            return;
        }

        if self.input.trim().is_empty() {
            // No network call for empty text
            self.set_error("Please enter some text to analyze".to_string());
            return;
        }

        self.last_error = None;
        self.submission = Submission {
            phase: SubmitPhase::AwaitingFirstResponse,
            ..Submission::default()
        };
        self.pending_commands.push(ApiCommand::Submit {
            text: self.input.clone(),
        });
    }

    /// Queue a job list fetch and mark the table as loading
    fn request_job_list(&mut self) {
        self.jobs_loading = true;
        self.pending_commands.push(ApiCommand::FetchJobs);
    }

    /// Start the delete flow for a job, honoring the confirm_delete setting
    fn request_delete(&mut self, job_id: String) {
        if self.config.behavior.confirm_delete {
            self.confirm_action = Some(ConfirmAction::DeleteJob { job_id });
            self.mode = AppMode::Confirm;
        } else {
            self.pending_commands.push(ApiCommand::DeleteJob { job_id });
        }
    }

    fn switch_view(&mut self, view: View) {
        let entering_jobs = view == View::Jobs && self.current_view != View::Jobs;
        self.current_view = view;
        if entering_jobs {
            // One list fetch per switch
            self.request_job_list();
        }
    }

    fn close_detail(&mut self) {
        self.detail = None;
        if self.mode == AppMode::Detail {
            self.mode = AppMode::Normal;
        }
    }

    /// Leave confirm mode, restoring the detail overlay if it is still open
    fn close_confirm(&mut self) {
        self.mode = if self.detail.is_some() {
            AppMode::Detail
        } else {
            AppMode::Normal
        };
    }

    fn set_error(&mut self, message: String) {
        self.last_error = Some((message, Instant::now()));
    }

    /// Copy the relevant job id to the system clipboard
    fn yank_job_id(&mut self) {
        let job_id = match self.mode {
            AppMode::Detail => self.detail.as_ref().map(|j| j.job_id.clone()),
            _ => match self.current_view {
                View::Jobs => self.selected_job().map(|j| j.job_id.clone()),
                View::Submit => self.submission.job_id.clone(),
            },
        };

        let Some(job_id) = job_id else {
            return;
        };

        match arboard::Clipboard::new() {
            Ok(mut clipboard) => match clipboard.set_text(job_id.clone()) {
                Ok(()) => {
                    self.feedback = Some(Feedback::success(format!("Copied: {}", job_id)));
                }
                Err(_) => {
                    self.feedback =
                        Some(Feedback::failure("Failed to copy to clipboard".to_string()));
                }
            },
            Err(_) => {
                self.feedback = Some(Feedback::failure("Clipboard not available".to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PurgeReceipt, SubmitReceipt};

    fn test_app() -> App {
        App::new(AppConfig::default())
    }

    fn job(id: &str, status: JobStatus) -> Job {
        Job {
            job_id: id.to_string(),
            status,
            created_at: None,
            updated_at: None,
            text: None,
            results: None,
        }
    }

    #[test]
    fn test_blank_submission_issues_no_command() {
        let mut app = test_app();
        app.input = "   \n\t  ".to_string();

        app.handle_action(KeyAction::Submit);

        assert!(app.take_commands().is_empty());
        assert!(app.current_error().unwrap().contains("enter some text"));
    }

    #[test]
    fn test_submission_queues_one_command_and_resets_results() {
        let mut app = test_app();
        app.input = "wonderful product".to_string();
        app.submission.results = Some(AnalysisResult {
            sentiment: crate::models::Sentiment::Neutral,
            confidence: 0.5,
            keywords: vec![],
        });

        app.handle_action(KeyAction::Submit);

        assert_eq!(
            app.take_commands(),
            vec![ApiCommand::Submit {
                text: "wonderful product".to_string()
            }]
        );
        assert!(app.submission.results.is_none());
        assert_eq!(app.submission.phase, SubmitPhase::AwaitingFirstResponse);
    }

    #[test]
    fn test_resubmit_while_in_flight_is_ignored() {
        let mut app = test_app();
        app.input = "some text".to_string();
        app.handle_action(KeyAction::Submit);
        app.take_commands();

        app.handle_action(KeyAction::Submit);
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn test_switching_to_jobs_tab_fetches_once_per_switch() {
        let mut app = test_app();

        app.handle_action(KeyAction::SwitchToJobs);
        assert_eq!(app.take_commands(), vec![ApiCommand::FetchJobs]);

        // Already on the tab: no additional fetch
        app.handle_action(KeyAction::SwitchToJobs);
        assert!(app.take_commands().is_empty());

        // Leave and return: one more fetch
        app.handle_action(KeyAction::SwitchToSubmit);
        app.handle_action(KeyAction::SwitchToJobs);
        assert_eq!(app.take_commands(), vec![ApiCommand::FetchJobs]);
    }

    #[test]
    fn test_delete_removes_job_locally_without_refetch() {
        let mut app = test_app();
        app.jobs.update(vec![
            job("job-a", JobStatus::Completed),
            job("job-b", JobStatus::Pending),
        ]);

        app.handle_data(DataEvent::JobDeleted {
            job_id: "job-a".to_string(),
        });

        assert_eq!(app.jobs.len(), 1);
        assert_eq!(app.jobs.data[0].job_id, "job-b");
        // No list fetch was queued
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn test_deleting_job_shown_in_overlay_closes_it() {
        let mut app = test_app();
        app.jobs.update(vec![job("job-a", JobStatus::Completed)]);
        app.detail = Some(job("job-a", JobStatus::Completed));
        app.mode = AppMode::Detail;

        app.handle_data(DataEvent::JobDeleted {
            job_id: "job-a".to_string(),
        });

        assert!(app.detail.is_none());
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_delete_all_requires_two_confirmations() {
        let mut app = test_app();
        app.current_view = View::Jobs;
        app.jobs.update(vec![job("job-a", JobStatus::Completed)]);

        app.handle_action(KeyAction::DeleteAll);
        assert_eq!(app.mode, AppMode::Confirm);
        assert_eq!(app.confirm_action, Some(ConfirmAction::DeleteAllFirst));

        // First yes advances to the second stage without issuing the call
        app.handle_action(KeyAction::InsertChar('y'));
        assert_eq!(app.confirm_action, Some(ConfirmAction::DeleteAllSecond));
        assert!(app.take_commands().is_empty());

        // Second yes issues the call
        app.handle_action(KeyAction::InsertChar('y'));
        assert_eq!(app.take_commands(), vec![ApiCommand::DeleteAllJobs]);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_delete_all_aborts_on_no() {
        let mut app = test_app();
        app.current_view = View::Jobs;
        app.jobs.update(vec![job("job-a", JobStatus::Completed)]);

        app.handle_action(KeyAction::DeleteAll);
        app.handle_action(KeyAction::InsertChar('y'));
        app.handle_action(KeyAction::InsertChar('n'));

        assert!(app.take_commands().is_empty());
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_delete_all_response_clears_list_and_overlay() {
        let mut app = test_app();
        app.jobs.update(vec![
            job("job-a", JobStatus::Completed),
            job("job-b", JobStatus::Pending),
        ]);
        app.detail = Some(job("job-b", JobStatus::Pending));
        app.mode = AppMode::Detail;

        app.handle_data(DataEvent::AllJobsDeleted(PurgeReceipt { deleted_count: 2 }));

        assert!(app.jobs.is_empty());
        assert!(app.detail.is_none());
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.current_feedback().unwrap().message.contains("2 deleted"));
    }

    #[test]
    fn test_single_delete_confirmation_flow() {
        let mut app = test_app();
        app.current_view = View::Jobs;
        app.jobs.update(vec![job("job-a", JobStatus::Completed)]);

        app.handle_action(KeyAction::Delete);
        assert_eq!(app.mode, AppMode::Confirm);

        app.handle_action(KeyAction::InsertChar('y'));
        assert_eq!(
            app.take_commands(),
            vec![ApiCommand::DeleteJob {
                job_id: "job-a".to_string()
            }]
        );
    }

    #[test]
    fn test_delete_without_confirmation_when_disabled() {
        let mut app = test_app();
        app.config.behavior.confirm_delete = false;
        app.current_view = View::Jobs;
        app.jobs.update(vec![job("job-a", JobStatus::Completed)]);

        app.handle_action(KeyAction::Delete);
        assert_eq!(
            app.take_commands(),
            vec![ApiCommand::DeleteJob {
                job_id: "job-a".to_string()
            }]
        );
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_select_on_jobs_view_fetches_detail_and_opens_overlay() {
        let mut app = test_app();
        app.current_view = View::Jobs;
        app.jobs.update(vec![job("job-a", JobStatus::Completed)]);

        app.handle_action(KeyAction::Select);
        assert_eq!(
            app.take_commands(),
            vec![ApiCommand::FetchJob {
                job_id: "job-a".to_string()
            }]
        );

        app.handle_data(DataEvent::JobDetail(Box::new(job(
            "job-a",
            JobStatus::Completed,
        ))));
        assert_eq!(app.mode, AppMode::Detail);
        assert!(app.detail.is_some());
    }

    #[test]
    fn test_poll_lifecycle_updates_submission() {
        let mut app = test_app();
        app.input = "good text".to_string();
        app.handle_action(KeyAction::Submit);
        app.take_commands();

        app.handle_data(DataEvent::SubmitAccepted(SubmitReceipt {
            job_id: "job-z".to_string(),
            status: JobStatus::Pending,
        }));
        assert_eq!(app.submission.phase, SubmitPhase::Polling);
        assert_eq!(app.submission.job_id.as_deref(), Some("job-z"));

        app.handle_data(DataEvent::PollUpdate(Box::new(job(
            "job-z",
            JobStatus::Processing,
        ))));
        assert_eq!(app.submission.status, Some(JobStatus::Processing));

        let mut finished = job("job-z", JobStatus::Completed);
        finished.results = Some(AnalysisResult {
            sentiment: crate::models::Sentiment::Positive,
            confidence: 0.9,
            keywords: vec!["good".to_string()],
        });
        app.handle_data(DataEvent::PollFinished(Box::new(finished)));

        assert_eq!(app.submission.phase, SubmitPhase::Terminal);
        assert!(app.submission.results.is_some());
        assert!(app.current_error().is_none());
    }

    #[test]
    fn test_poll_error_status_surfaces_message() {
        let mut app = test_app();
        app.submission.phase = SubmitPhase::Polling;

        app.handle_data(DataEvent::PollFinished(Box::new(job(
            "job-z",
            JobStatus::Error,
        ))));

        assert_eq!(app.submission.phase, SubmitPhase::Terminal);
        assert!(app.current_error().unwrap().contains("failed"));
    }

    #[test]
    fn test_transport_error_during_poll_stops_loading() {
        let mut app = test_app();
        app.submission.phase = SubmitPhase::Polling;

        app.handle_data(DataEvent::FetchError {
            source: DataSource::Poll,
            error: "connection refused".to_string(),
        });

        assert_eq!(app.submission.phase, SubmitPhase::Terminal);
        assert!(!app.submission.in_flight());
        assert!(app.current_error().unwrap().contains("connection refused"));
    }

    #[test]
    fn test_insert_mode_editing() {
        let mut app = test_app();

        app.handle_action(KeyAction::EditText);
        assert_eq!(app.mode, AppMode::Insert);

        app.handle_action(KeyAction::InsertChar('h'));
        app.handle_action(KeyAction::InsertChar('i'));
        app.handle_action(KeyAction::InsertNewline);
        app.handle_action(KeyAction::InsertChar('!'));
        app.handle_action(KeyAction::InsertBackspace);
        assert_eq!(app.input, "hi\n");

        app.handle_action(KeyAction::Escape);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_selection_clamped_after_update() {
        let mut app = test_app();
        app.jobs.update(vec![
            job("a", JobStatus::Pending),
            job("b", JobStatus::Pending),
            job("c", JobStatus::Pending),
        ]);
        app.jobs_state.selected = 2;

        app.handle_data(DataEvent::JobsUpdated(vec![job("a", JobStatus::Pending)]));
        assert_eq!(app.jobs_state.selected, 0);
    }
}
