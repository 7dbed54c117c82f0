//! Overlay and popup rendering
//!
//! Handles rendering of the help overlay, job detail popup, confirm dialog,
//! and feedback toast notifications.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::formatting::{format_confidence, format_timestamp};
use crate::models::JobStatus;
use crate::tui::app::{App, ConfirmAction, Feedback};
use crate::tui::theme::Theme;

use super::widgets::{centered_rect, detail_row};

pub fn render_help_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = centered_rect(60, 75, area);

    // Clear the area first
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "acore TUI - Keyboard Shortcuts",
            Style::default().bold(),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Views",
            Style::default().fg(theme.accent).bold(),
        )]),
        Line::from("  1              New Analysis view"),
        Line::from("  2              My Analyses view"),
        Line::from("  Tab            Cycle to next view"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "New Analysis",
            Style::default().fg(theme.accent).bold(),
        )]),
        Line::from("  i / e          Edit text (Esc to stop editing)"),
        Line::from("  s / Ctrl+S     Submit for analysis"),
        Line::from("  n              Reset the form"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "My Analyses",
            Style::default().fg(theme.accent).bold(),
        )]),
        Line::from("  j / Down       Move selection down"),
        Line::from("  k / Up         Move selection up"),
        Line::from("  g / G          Jump to top / bottom"),
        Line::from("  Enter          View analysis details"),
        Line::from("  r              Refresh the list"),
        Line::from("  d              Delete selected analysis"),
        Line::from("  D              Delete ALL analyses"),
        Line::from("  y              Copy job ID to clipboard"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "General",
            Style::default().fg(theme.accent).bold(),
        )]),
        Line::from("  ?/F1           Show this help"),
        Line::from("  Esc            Close overlay / dismiss error"),
        Line::from("  q              Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press ? or Esc to close this help",
            Style::default().fg(theme.border),
        )]),
    ];

    let help_para = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .title(" Help "),
        )
        .style(Style::default().fg(theme.fg));

    frame.render_widget(help_para, popup_area);
}

/// Render the job detail popup
pub fn render_job_detail_popup(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let Some(job) = &app.detail else {
        return;
    };

    let popup_area = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup_area);

    let status_color = theme.status_color(job.status);
    let title = format!(" Analysis {} ", crate::formatting::short_id(&job.job_id));

    let border_color = match job.status {
        JobStatus::Error => theme.error,
        JobStatus::Completed => theme.completed,
        _ => theme.border_focused,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = Vec::new();

    lines.push(detail_row("ID:", job.job_id.clone(), theme));
    lines.push(Line::from(vec![
        Span::styled("  Status:     ", Style::default().fg(theme.dim)),
        Span::styled(
            job.status.as_str(),
            Style::default().fg(status_color).bold(),
        ),
    ]));
    lines.push(detail_row("Created:", format_timestamp(job.created_at), theme));
    lines.push(detail_row("Updated:", format_timestamp(job.updated_at), theme));

    if let Some(text) = &job.text {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Submitted Text",
            Style::default().bold(),
        )));
        for text_line in text.lines() {
            lines.push(Line::from(format!("  {}", text_line)));
        }
    }

    lines.push(Line::from(""));
    match (&job.results, job.status) {
        (Some(results), _) => {
            lines.push(Line::from(Span::styled("  Results", Style::default().bold())));
            lines.push(Line::from(vec![
                Span::styled("  Sentiment:  ", Style::default().fg(theme.dim)),
                Span::styled(
                    results.sentiment.as_str(),
                    Style::default()
                        .fg(theme.sentiment_color(results.sentiment))
                        .bold(),
                ),
                Span::styled(
                    format!("  (confidence {})", format_confidence(results.confidence)),
                    Style::default().fg(theme.dim),
                ),
            ]));
            let keywords = if results.keywords.is_empty() {
                "(none)".to_string()
            } else {
                results.keywords.join(", ")
            };
            lines.push(detail_row("Keywords:", keywords, theme));
        }
        (None, JobStatus::Error) => {
            lines.push(Line::from(Span::styled(
                "  The analysis failed during processing.",
                Style::default().fg(theme.error),
            )));
        }
        (None, _) => {
            lines.push(Line::from(Span::styled(
                "  The analysis has not completed yet.",
                Style::default().fg(theme.dim),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  d:delete  y:copy ID  Esc:close",
        Style::default().fg(theme.border),
    )));

    let para = Paragraph::new(lines)
        .style(Style::default().fg(theme.fg))
        .wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

/// Render the confirmation dialog
pub fn render_confirm_dialog(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let Some(action) = &app.confirm_action else {
        return;
    };

    let popup_area = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup_area);

    let (title, border_color) = match action {
        ConfirmAction::DeleteJob { .. } => (" Confirm Delete ", theme.error),
        ConfirmAction::DeleteAllFirst => (" Confirm Delete All ", theme.error),
        ConfirmAction::DeleteAllSecond => (" Are You Sure? ", theme.error),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::raw(format!("  {}", action.description()))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [y]", Style::default().fg(theme.error).bold()),
            Span::raw(" Yes    "),
            Span::styled("[n/Esc]", Style::default().fg(theme.accent).bold()),
            Span::raw(" No"),
        ]),
    ];

    let para = Paragraph::new(lines)
        .style(Style::default().fg(theme.fg))
        .wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

/// Render the feedback toast in the bottom-right corner
pub fn render_feedback_toast(feedback: &Feedback, frame: &mut Frame, area: Rect, theme: &Theme) {
    let width = (feedback.message.len() as u16 + 4).min(area.width);
    let toast_area = Rect {
        x: area.width.saturating_sub(width + 1),
        y: area.height.saturating_sub(4),
        width,
        height: 3,
    };

    frame.render_widget(Clear, toast_area);

    let color = if feedback.success {
        theme.completed
    } else {
        theme.error
    };

    let para = Paragraph::new(feedback.message.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);

    frame.render_widget(para, toast_area);
}
