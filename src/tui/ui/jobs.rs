//! Jobs view rendering
//!
//! Renders the "My Analyses" table: one row per job with id, status,
//! timestamps, and a text preview.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::formatting::{format_timestamp, preview_text, short_id};
use crate::models::Job;
use crate::tui::app::App;
use crate::tui::theme::Theme;

use super::widgets::{calculate_scroll_offset, create_table_header};

pub fn render_jobs_view(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" My Analyses ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.jobs.is_empty() {
        let msg = if app.jobs_loading && app.jobs.last_updated.is_none() {
            "Loading analyses..."
        } else {
            "No analyses yet. Switch to [1] and submit some text."
        };
        let para = Paragraph::new(msg)
            .style(Style::default().fg(theme.dim))
            .alignment(Alignment::Center);
        frame.render_widget(para, inner);
        return;
    }

    let header = create_table_header(&["ID", "Status", "Created", "Updated", "Text"], theme);

    let available_height = inner.height.saturating_sub(1) as usize; // -1 for header
    let selected = app.jobs_state.selected;
    let scroll_offset = calculate_scroll_offset(selected, available_height, app.jobs.len());

    let preview_len = app.config.display.text_preview_length;
    let rows: Vec<Row> = app
        .jobs
        .data
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(available_height)
        .map(|(idx, job)| job_to_row(job, idx == selected, preview_len, theme))
        .collect();

    let widths = [
        Constraint::Length(11), // ID (shortened)
        Constraint::Length(10), // Status
        Constraint::Length(19), // Created
        Constraint::Length(19), // Updated
        Constraint::Min(20),    // Text preview
    ];

    let table = Table::new(rows, widths).header(header);
    frame.render_widget(table, inner);
}

fn job_to_row<'a>(job: &'a Job, is_selected: bool, preview_len: usize, theme: &Theme) -> Row<'a> {
    let status_color = theme.status_color(job.status);

    let text = job
        .text
        .as_deref()
        .map(|t| preview_text(t, preview_len))
        .unwrap_or_else(|| "-".to_string());

    let cells = vec![
        Cell::from(short_id(&job.job_id)),
        Cell::from(job.status.as_str()).style(Style::default().fg(status_color)),
        Cell::from(format_timestamp(job.created_at)),
        Cell::from(format_timestamp(job.updated_at)),
        Cell::from(text),
    ];

    let row = Row::new(cells);
    if is_selected {
        row.style(
            Style::default()
                .bg(theme.selected_bg)
                .fg(theme.selected_fg),
        )
    } else {
        row
    }
}
