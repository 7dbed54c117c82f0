//! Terminal User Interface for acore
//!
//! This module provides an interactive client for the AnalytiCore service.
//! It features:
//! - A submit tab with live status of the running analysis
//! - A jobs tab listing previous analyses with detail/delete actions
//! - Dual-channel event architecture (priority input, backpressure-aware data)
//! - Keyboard-driven navigation

pub mod app;
pub mod event;
pub mod runtime;
pub mod theme;
pub mod ui;

use std::io::{self, IsTerminal, stdout};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use anyhow::{Result, bail};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::api::ApiClient;
use crate::models::AppConfig;
use crate::tui::app::App;
use crate::tui::runtime::{
    CommandExecutor, TuiRuntime, create_channels, run_event_loop, spawn_input_task,
    spawn_jobs_refresher,
};

/// Terminal capability requirements for TUI mode
#[derive(Debug)]
pub struct TerminalCapabilities {
    pub is_tty: bool,
    pub term_type: String,
    pub supports_alternate_screen: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities
    pub fn detect() -> Self {
        let is_tty = stdout().is_terminal();
        let term_type = std::env::var("TERM").unwrap_or_default();

        // Check for known problematic terminals
        let supports_alternate_screen = !matches!(term_type.as_str(), "dumb" | "" | "unknown");

        Self {
            is_tty,
            term_type,
            supports_alternate_screen,
        }
    }

    /// Check if terminal is suitable for TUI mode
    pub fn is_suitable(&self) -> bool {
        self.is_tty && self.supports_alternate_screen
    }

    /// Get error message for unsuitable terminal
    pub fn error_message(&self) -> String {
        if !self.is_tty {
            "TUI mode requires an interactive terminal (stdout is not a TTY).\n\
             Hint: Use non-TUI commands like 'acore jobs' or 'acore submit' instead."
                .to_string()
        } else if !self.supports_alternate_screen {
            format!(
                "Terminal type '{}' may not support TUI mode.\n\
                 Hint: Set TERM to a supported value (e.g., xterm-256color) or use CLI mode.",
                if self.term_type.is_empty() {
                    "(unset)"
                } else {
                    &self.term_type
                }
            )
        } else {
            "Unknown terminal capability issue.".to_string()
        }
    }
}

/// Run the TUI application
pub async fn run_tui(config: AppConfig) -> Result<()> {
    // Check terminal capabilities before attempting TUI mode
    let capabilities = TerminalCapabilities::detect();
    if !capabilities.is_suitable() {
        bail!("{}", capabilities.error_message());
    }

    let client = ApiClient::new(&config.server.url)?;
    let jobs_interval = Duration::from_secs(config.refresh.jobs_interval);
    let poll_interval = Duration::from_secs(config.refresh.poll_interval);

    // Setup terminal
    let mut terminal = setup_terminal()?;

    // Create the application state
    let app = App::new(config);

    // Create dual channels
    let (input_tx, input_rx, data_tx, data_rx) = create_channels();

    // Create runtime and shared state
    let mut runtime = TuiRuntime::new();
    let jobs_visible = Arc::new(AtomicBool::new(false));

    // Spawn background tasks
    runtime.track(spawn_input_task(input_tx, runtime.cancel_token()));
    runtime.track(spawn_jobs_refresher(
        client.clone(),
        data_tx.clone(),
        runtime.cancel_token(),
        jobs_interval,
        jobs_visible.clone(),
    ));

    let executor = CommandExecutor::new(client, data_tx, runtime.cancel_token(), poll_interval);

    // Run the main event loop
    let result = run_event_loop(app, input_rx, data_rx, executor, jobs_visible, |app| {
        terminal.draw(|frame| ui::render(app, frame))?;
        Ok(())
    })
    .await;

    // Shutdown background tasks
    runtime.shutdown().await;

    // Restore terminal
    restore_terminal(&mut terminal)?;

    result
}

/// Setup the terminal for TUI mode
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
