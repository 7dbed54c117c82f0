//! UI rendering for the TUI
//!
//! This module handles all rendering using ratatui. The rendering is
//! event-driven: we only render when an event triggers a state change, not at
//! a fixed frame rate.

mod jobs;
mod overlays;
mod submit;
mod widgets;

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Tabs};

use crate::tui::app::{App, AppMode, SubmitPhase, View};
use crate::tui::theme::Theme;

use jobs::render_jobs_view;
use overlays::{
    render_confirm_dialog, render_feedback_toast, render_help_overlay, render_job_detail_popup,
};
use submit::render_submit_view;

/// Render the entire TUI
pub fn render(app: &App, frame: &mut Frame) {
    // Use theme from configuration
    let theme = Theme::from_name(&app.config.display.theme);
    let area = frame.area();

    // Main layout: header, content, footer
    let layout = Layout::vertical([
        Constraint::Length(1), // Tab bar
        Constraint::Length(1), // Info bar
        Constraint::Min(0),    // Main content
        Constraint::Length(2), // Status bar
    ])
    .split(area);

    render_tab_bar(app, frame, layout[0], &theme);
    render_info_bar(app, frame, layout[1], &theme);
    render_content(app, frame, layout[2], &theme);
    render_status_bar(app, frame, layout[3], &theme);

    // Overlays (render in order of z-index)
    match app.mode {
        AppMode::Detail => render_job_detail_popup(app, frame, area, &theme),
        AppMode::Confirm => render_confirm_dialog(app, frame, area, &theme),
        AppMode::Normal | AppMode::Insert => {}
    }

    if app.show_help {
        render_help_overlay(frame, area, &theme);
    }

    // Feedback toast (always on top)
    if let Some(feedback) = app.current_feedback() {
        render_feedback_toast(feedback, frame, area, &theme);
    }
}

fn render_tab_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let titles: Vec<Line> = [View::Submit, View::Jobs]
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let num = format!("[{}]", i + 1);
            let label = view.label();
            if *view == app.current_view {
                Line::from(vec![
                    Span::styled(num, Style::default().fg(theme.accent)),
                    Span::styled(label, Style::default().fg(theme.selected_fg).bold()),
                ])
            } else {
                Line::from(vec![
                    Span::styled(num, Style::default().fg(theme.border)),
                    Span::raw(label),
                ])
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view as usize)
        .divider(" | ")
        .style(Style::default().fg(theme.fg))
        .highlight_style(Style::default().fg(theme.selected_fg).bold());

    frame.render_widget(tabs, area);
}

fn render_info_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let info = format!(
        " AnalytiCore @ {} | {} analyses",
        app.config.server.url,
        app.jobs.len()
    );

    let para = Paragraph::new(info).style(Style::default().fg(theme.border));
    frame.render_widget(para, area);
}

fn render_content(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    match app.current_view {
        View::Submit => render_submit_view(app, frame, area, theme),
        View::Jobs => render_jobs_view(app, frame, area, theme),
    }
}

fn render_status_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let layout = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

    // Keybindings line - context-sensitive
    let keybinds = match (app.mode, app.current_view) {
        (AppMode::Insert, _) => " Esc:stop editing  Ctrl+S:submit  Ctrl+C:quit ",
        (AppMode::Detail, _) => " d:delete  y:yank  Esc:close ",
        (AppMode::Confirm, _) => " y:confirm  n/Esc:cancel ",
        (AppMode::Normal, View::Submit) => " i:edit  s:submit  n:reset  1/2/Tab:views  ?:help  q:quit ",
        (AppMode::Normal, View::Jobs) => {
            " j/k:move  Enter:detail  r:refresh  d:delete  D:delete-all  y:yank  ?:help  q:quit "
        }
    };
    let keybinds_para = Paragraph::new(keybinds).style(Style::default().fg(theme.border));
    frame.render_widget(keybinds_para, layout[0]);

    // Status line with more info
    let mut status_parts = Vec::new();

    if app.mode != AppMode::Normal {
        let mode_name = match app.mode {
            AppMode::Insert => "INSERT",
            AppMode::Detail => "DETAIL",
            AppMode::Confirm => "CONFIRM",
            AppMode::Normal => "",
        };
        status_parts.push(Span::styled(
            format!(" [{}]", mode_name),
            Style::default().fg(theme.accent).bold(),
        ));
    }

    if app.submission.phase == SubmitPhase::Polling {
        status_parts.push(Span::styled(
            " Analyzing...",
            Style::default().fg(theme.processing),
        ));
    }

    // Last list update time
    status_parts.push(Span::raw(" | "));
    if app.jobs_loading {
        status_parts.push(Span::styled(
            "Loading...",
            Style::default().fg(theme.pending),
        ));
    } else if let Some(age) = app.jobs.age() {
        status_parts.push(Span::styled(
            format!("Updated: {}", crate::formatting::format_age(age)),
            Style::default().fg(theme.border),
        ));
    } else {
        status_parts.push(Span::styled(
            "No list fetched yet",
            Style::default().fg(theme.border),
        ));
    }

    // Error display (temporary, auto-dismisses)
    if let Some(error) = app.current_error() {
        status_parts.push(Span::styled(
            format!(" | ERROR: {} ", error),
            Style::default().fg(theme.error),
        ));
    }

    let status_line = Line::from(status_parts);
    frame.render_widget(Paragraph::new(status_line), layout[1]);
}
