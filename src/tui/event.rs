//! Event types for the TUI
//!
//! This module implements a dual-channel event architecture:
//! - InputEvent: Priority channel for user input (never dropped)
//! - DataEvent: Data channel for API responses (may be dropped under load)

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use crate::models::{Job, PurgeReceipt, SubmitReceipt};

/// Input events from the terminal (priority channel - never dropped)
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Keyboard input
    Key(KeyEvent),
    /// Mouse input
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// API operation identifiers for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Submit,
    Poll,
    Jobs,
    Detail,
    Delete,
    Purge,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Submit => write!(f, "submit"),
            DataSource::Poll => write!(f, "poll"),
            DataSource::Jobs => write!(f, "jobs"),
            DataSource::Detail => write!(f, "detail"),
            DataSource::Delete => write!(f, "delete"),
            DataSource::Purge => write!(f, "delete-all"),
        }
    }
}

/// API responses and control events (data channel)
#[derive(Debug)]
pub enum DataEvent {
    /// The submission was accepted; a poll session is starting
    SubmitAccepted(SubmitReceipt),

    /// A non-terminal status report from the active poll session
    PollUpdate(Box<Job>),

    /// The active poll session observed a terminal status
    PollFinished(Box<Job>),

    /// Job list fetched
    JobsUpdated(Vec<Job>),

    /// Detail for one job fetched
    JobDetail(Box<Job>),

    /// One job was deleted server-side
    JobDeleted { job_id: String },

    /// All jobs were deleted server-side
    AllJobsDeleted(PurgeReceipt),

    /// An API call failed
    FetchError { source: DataSource, error: String },
}

/// Result of processing an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running, UI needs redraw
    Continue,
    /// Continue running, no UI change needed
    Unchanged,
    /// Quit the application
    Quit,
}

/// API calls the app requests; drained and executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    Submit { text: String },
    FetchJobs,
    FetchJob { job_id: String },
    DeleteJob { job_id: String },
    DeleteAllJobs,
}

/// Key action mappings for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,

    // View switching
    SwitchToSubmit,
    SwitchToJobs,
    NextView,

    // Actions
    Select,
    Refresh,
    Submit,
    EditText,
    ResetForm,
    Delete,
    DeleteAll,
    YankJobId,

    // UI
    ShowHelp,
    Escape,
    Quit,

    // Text editing (insert mode and confirm shortcuts)
    InsertChar(char),
    InsertNewline,
    InsertBackspace,

    // Unknown/unhandled
    Unknown,
}

impl KeyAction {
    /// Map a key event to an action based on current mode
    pub fn from_key_event(event: KeyEvent, in_insert_mode: bool) -> Self {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        // Insert mode routes almost everything into the textarea
        if in_insert_mode {
            return match code {
                KeyCode::Esc => KeyAction::Escape,
                KeyCode::Enter => KeyAction::InsertNewline,
                KeyCode::Backspace => KeyAction::InsertBackspace,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
                KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
                    KeyAction::Submit
                }
                KeyCode::Char(c) => KeyAction::InsertChar(c),
                _ => KeyAction::Unknown,
            };
        }

        // Normal mode mappings
        match code {
            // Quit
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => KeyAction::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => KeyAction::MoveUp,
            KeyCode::Char('g') | KeyCode::Home => KeyAction::MoveToTop,
            KeyCode::Char('G') | KeyCode::End => KeyAction::MoveToBottom,

            // View switching
            KeyCode::Char('1') => KeyAction::SwitchToSubmit,
            KeyCode::Char('2') => KeyAction::SwitchToJobs,
            KeyCode::Tab => KeyAction::NextView,

            // Actions
            KeyCode::Enter => KeyAction::Select,
            KeyCode::Char('r') => KeyAction::Refresh,
            KeyCode::Char('s') => KeyAction::Submit,
            KeyCode::Char('i') | KeyCode::Char('e') => KeyAction::EditText,
            KeyCode::Char('n') => KeyAction::ResetForm,
            KeyCode::Char('d') => KeyAction::Delete,
            KeyCode::Char('D') => KeyAction::DeleteAll,
            KeyCode::Char('y') => KeyAction::YankJobId,

            // Help
            KeyCode::Char('?') | KeyCode::F(1) => KeyAction::ShowHelp,
            KeyCode::Esc => KeyAction::Escape,

            // Confirm dialogs read y/n via InsertChar
            KeyCode::Char(c) => KeyAction::InsertChar(c),

            _ => KeyAction::Unknown,
        }
    }

    /// Map a mouse event to an action
    pub fn from_mouse_event(event: MouseEvent) -> Self {
        use crossterm::event::MouseEventKind;

        match event.kind {
            MouseEventKind::ScrollUp => KeyAction::MoveUp,
            MouseEventKind::ScrollDown => KeyAction::MoveDown,
            _ => KeyAction::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_action_quit() {
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(KeyAction::from_key_event(event, false), KeyAction::Quit);
    }

    #[test]
    fn test_key_action_navigation() {
        let event = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(KeyAction::from_key_event(event, false), KeyAction::MoveDown);

        let event = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(KeyAction::from_key_event(event, false), KeyAction::MoveUp);
    }

    #[test]
    fn test_insert_mode_captures_characters() {
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(
            KeyAction::from_key_event(event, true),
            KeyAction::InsertChar('q')
        );

        let event = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            KeyAction::from_key_event(event, true),
            KeyAction::InsertNewline
        );
    }

    #[test]
    fn test_insert_mode_ctrl_s_submits() {
        let event = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(KeyAction::from_key_event(event, true), KeyAction::Submit);

        // Plain 's' in insert mode is text
        let event = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(
            KeyAction::from_key_event(event, true),
            KeyAction::InsertChar('s')
        );
    }
}
