//! Submit view rendering
//!
//! The "New Analysis" tab: a textarea for the input text, the status of the
//! active poll session, and the results grid once the analysis completes.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::formatting::format_confidence;
use crate::models::JobStatus;
use crate::tui::app::{App, AppMode, SubmitPhase};
use crate::tui::theme::Theme;

pub fn render_submit_view(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let layout = Layout::vertical([
        Constraint::Min(6),    // Textarea
        Constraint::Length(3), // Submission status
        Constraint::Min(8),    // Results
    ])
    .split(area);

    render_textarea(app, frame, layout[0], theme);
    render_submission_status(app, frame, layout[1], theme);
    render_results(app, frame, layout[2], theme);
}

fn render_textarea(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let editing = app.mode == AppMode::Insert;

    let title = if editing {
        " Text to Analyze (editing, Esc to stop, Ctrl+S to submit) "
    } else {
        " Text to Analyze (i to edit, s to submit) "
    };

    let border_color = if editing {
        theme.border_focused
    } else {
        theme.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.input.is_empty() && !editing {
        let placeholder = Paragraph::new("Type your text here...")
            .style(Style::default().fg(theme.dim))
            .wrap(Wrap { trim: false });
        frame.render_widget(placeholder, inner);
        return;
    }

    let text = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(theme.fg))
        .wrap(Wrap { trim: false });
    frame.render_widget(text, inner);

    if editing {
        // Place the cursor after the last character, accounting for wrapping
        let (cursor_x, cursor_y) = cursor_position(&app.input, inner.width);
        if cursor_y < inner.height {
            frame.set_cursor_position((inner.x + cursor_x, inner.y + cursor_y));
        }
    }
}

/// Cursor position for an append-only textarea with character wrapping
fn cursor_position(input: &str, width: u16) -> (u16, u16) {
    if width == 0 {
        return (0, 0);
    }

    let mut x: u16 = 0;
    let mut y: u16 = 0;
    for c in input.chars() {
        if c == '\n' {
            x = 0;
            y += 1;
        } else {
            x += 1;
            if x >= width {
                x = 0;
                y += 1;
            }
        }
    }
    (x, y)
}

fn render_submission_status(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Status ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = match app.submission.phase {
        SubmitPhase::Idle => Line::from(Span::styled(
            "No analysis in progress",
            Style::default().fg(theme.dim),
        )),
        SubmitPhase::AwaitingFirstResponse => Line::from(Span::styled(
            "Submitting...",
            Style::default().fg(theme.pending),
        )),
        SubmitPhase::Polling | SubmitPhase::Terminal => {
            let mut spans = Vec::new();
            if let Some(job_id) = &app.submission.job_id {
                spans.push(Span::styled(
                    format!("Job {}  ", crate::formatting::short_id(job_id)),
                    Style::default().fg(theme.dim),
                ));
            }
            if let Some(status) = app.submission.status {
                spans.push(Span::styled(
                    status.as_str(),
                    Style::default().fg(theme.status_color(status)).bold(),
                ));
                if !status.is_terminal() {
                    spans.push(Span::styled(
                        "  (checking every 2s)",
                        Style::default().fg(theme.dim),
                    ));
                }
            }
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line), inner);
}

fn render_results(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Results ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(results) = &app.submission.results else {
        let msg = match app.submission.status {
            Some(JobStatus::Error) => "The analysis failed.",
            Some(s) if !s.is_terminal() => "Waiting for the analysis to finish...",
            _ => "Results will appear here once an analysis completes.",
        };
        let para = Paragraph::new(msg)
            .style(Style::default().fg(theme.dim))
            .alignment(Alignment::Center);
        frame.render_widget(para, inner);
        return;
    };

    // Two panels side by side: sentiment/confidence and keywords
    let panels = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let sentiment_lines = vec![
        Line::from(Span::styled("Sentiment", Style::default().bold())),
        Line::from(""),
        Line::from(Span::styled(
            results.sentiment.as_str(),
            Style::default()
                .fg(theme.sentiment_color(results.sentiment))
                .bold(),
        )),
        Line::from(Span::styled(
            format!("confidence {}", format_confidence(results.confidence)),
            Style::default().fg(theme.dim),
        )),
    ];
    frame.render_widget(
        Paragraph::new(sentiment_lines).alignment(Alignment::Center),
        panels[0],
    );

    let mut keyword_lines = vec![
        Line::from(Span::styled("Keywords", Style::default().bold())),
        Line::from(""),
    ];
    if results.keywords.is_empty() {
        keyword_lines.push(Line::from(Span::styled(
            "(none)",
            Style::default().fg(theme.dim),
        )));
    } else {
        for kw in &results.keywords {
            keyword_lines.push(Line::from(Span::styled(
                kw.as_str(),
                Style::default().fg(theme.accent),
            )));
        }
    }
    frame.render_widget(
        Paragraph::new(keyword_lines).alignment(Alignment::Center),
        panels[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_position_wraps_at_width() {
        assert_eq!(cursor_position("", 10), (0, 0));
        assert_eq!(cursor_position("abc", 10), (3, 0));
        assert_eq!(cursor_position("abcdefghij", 10), (0, 1));
        assert_eq!(cursor_position("ab\ncd", 10), (2, 1));
    }
}
