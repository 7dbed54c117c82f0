//! Display and formatting functions for CLI output

use owo_colors::OwoColorize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::formatting::{format_confidence, format_timestamp, preview_text, short_id};
use crate::models::{AnalysisResult, Job, JobStatus, Sentiment};

/// Format a job status with a colored badge, matching the TUI palette.
pub fn format_status(status: JobStatus) -> String {
    let label = status.as_str();
    match status {
        JobStatus::Completed => format!("{} {}", "●".green(), label.green()),
        JobStatus::Processing => format!("{} {}", "◐".yellow(), label.yellow()),
        JobStatus::Pending => format!("{} {}", "●".blue(), label.blue()),
        JobStatus::Error => format!("{} {}", "○".bright_red(), label.bright_red()),
    }
}

fn format_sentiment(sentiment: Sentiment) -> String {
    match sentiment {
        Sentiment::Positive => sentiment.as_str().green().to_string(),
        Sentiment::Negative => sentiment.as_str().bright_red().to_string(),
        Sentiment::Neutral => sentiment.as_str().yellow().to_string(),
    }
}

#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Updated")]
    updated: String,
    #[tabled(rename = "Text")]
    text: String,
}

/// Format the job list as a table.
pub fn format_jobs(jobs: &[Job], text_preview_length: usize) -> String {
    if jobs.is_empty() {
        return "No analyses yet. Submit one with 'acore submit <TEXT>'.".to_string();
    }

    let rows: Vec<JobRow> = jobs
        .iter()
        .map(|job| JobRow {
            id: short_id(&job.job_id),
            status: format_status(job.status),
            created: format_timestamp(job.created_at),
            updated: format_timestamp(job.updated_at),
            text: job
                .text
                .as_deref()
                .map(|t| preview_text(t, text_preview_length))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let count = jobs.len();
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    format!("{}\n{} job(s)", table, count)
}

/// Format the analysis results block shared by `job` and `submit --follow`.
pub fn format_results(results: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  Sentiment:  {} (confidence {})\n",
        format_sentiment(results.sentiment),
        format_confidence(results.confidence)
    ));
    if results.keywords.is_empty() {
        out.push_str("  Keywords:   (none)\n");
    } else {
        out.push_str(&format!("  Keywords:   {}\n", results.keywords.join(", ")));
    }
    out
}

/// Format full detail for a single job.
pub fn format_job_details(job: &Job) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "Analysis Job".bold()));
    out.push_str(&format!("  ID:         {}\n", job.job_id));
    out.push_str(&format!("  Status:     {}\n", format_status(job.status)));
    out.push_str(&format!(
        "  Created:    {}\n",
        format_timestamp(job.created_at)
    ));
    out.push_str(&format!(
        "  Updated:    {}\n",
        format_timestamp(job.updated_at)
    ));

    if let Some(text) = &job.text {
        out.push_str(&format!("\n{}\n  {}\n", "Submitted Text".bold(), text));
    }

    match (&job.results, job.status) {
        (Some(results), _) => {
            out.push_str(&format!("\n{}\n", "Results".bold()));
            out.push_str(&format_results(results));
        }
        (None, JobStatus::Error) => {
            out.push_str(&format!(
                "\n{}\n",
                "The analysis failed during processing.".bright_red()
            ));
        }
        (None, _) => {
            out.push_str("\nThe analysis has not completed yet.\n");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job(status: JobStatus) -> Job {
        Job {
            job_id: "4b1c6c0e-9f4e-4ab1-94a6-0c7c9c3a1f11".to_string(),
            status,
            created_at: None,
            updated_at: None,
            text: Some("the service was excellent".to_string()),
            results: None,
        }
    }

    #[test]
    fn test_format_jobs_empty() {
        let out = format_jobs(&[], 40);
        assert!(out.contains("No analyses yet"));
    }

    #[test]
    fn test_format_jobs_shortens_ids() {
        let out = format_jobs(&[sample_job(JobStatus::Pending)], 40);
        assert!(out.contains("4b1c6c0e..."));
        assert!(!out.contains("4b1c6c0e-9f4e"));
        assert!(out.contains("1 job(s)"));
    }

    #[test]
    fn test_format_job_details_includes_text_and_status() {
        let mut job = sample_job(JobStatus::Completed);
        job.results = Some(AnalysisResult {
            sentiment: Sentiment::Positive,
            confidence: 0.873,
            keywords: vec!["service".to_string(), "excellent".to_string()],
        });

        let out = format_job_details(&job);
        assert!(out.contains("the service was excellent"));
        assert!(out.contains("87.3%"));
        assert!(out.contains("service, excellent"));
    }

    #[test]
    fn test_format_job_details_error_without_results() {
        let out = format_job_details(&sample_job(JobStatus::Error));
        assert!(out.contains("failed during processing"));
    }
}
