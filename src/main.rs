//! acore - Terminal client for the AnalytiCore text-analysis service

use std::io::{self, Read as _, Write as _};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use acore::api::ApiClient;
use acore::display;
use acore::models::{AppConfig, JobStatus};
use acore::poller::{PollEnd, poll_until_terminal};

#[derive(Parser)]
#[command(name = "acore")]
#[command(about = "Terminal client for the AnalytiCore text-analysis service", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the AnalytiCore server (overrides config and ACORE_URL)
    #[arg(long, global = true, value_name = "URL")]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit text for analysis
    Submit {
        /// Text to analyze (reads stdin if neither TEXT nor --file is given)
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Wait for the analysis to finish and print the results
        #[arg(long)]
        follow: bool,
    },

    /// List all analyses
    Jobs {
        /// Filter by status (PENDING, PROCESSING, COMPLETED, ERROR)
        #[arg(short, long, value_name = "STATUS")]
        status: Option<String>,

        /// Watch mode: refresh every N seconds
        #[arg(short, long, value_name = "SECONDS", default_value = "0")]
        watch: f64,
    },

    /// Show detailed information for one analysis
    Job {
        /// Job ID to inspect
        job_id: String,
    },

    /// Delete one analysis
    Delete {
        /// Job ID to delete
        job_id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete ALL analyses
    DeleteAll {
        /// Skip both confirmation prompts
        #[arg(short, long)]
        yes: bool,
    },

    /// Launch interactive TUI mode
    #[command(alias = "ui")]
    Tui,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    let (mut config, warnings) = AppConfig::load();
    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }
    if let Some(url) = cli.url {
        config.server.url = url;
    }

    match cli.command {
        Some(Commands::Submit { text, file, follow }) => {
            let client = ApiClient::new(&config.server.url)?;
            let text = read_submit_text(text, file)?;
            handle_submit(&client, &text, follow, &config).await?;
        }
        Some(Commands::Jobs { status, watch }) => {
            let client = ApiClient::new(&config.server.url)?;
            let status = status.as_deref().map(parse_status).transpose()?;
            if watch > 0.0 {
                watch_jobs(&client, watch, status, config.display.text_preview_length).await?;
            } else {
                let output =
                    fetch_jobs_output(&client, status, config.display.text_preview_length).await?;
                println!("{}", output);
            }
        }
        Some(Commands::Job { job_id }) => {
            let client = ApiClient::new(&config.server.url)?;
            let job = client.status(&job_id).await?;
            println!("{}", display::format_job_details(&job));
        }
        Some(Commands::Delete { job_id, yes }) => {
            let client = ApiClient::new(&config.server.url)?;
            handle_delete(&client, &job_id, yes).await?;
        }
        Some(Commands::DeleteAll { yes }) => {
            let client = ApiClient::new(&config.server.url)?;
            handle_delete_all(&client, yes).await?;
        }
        Some(Commands::Tui) | None => {
            acore::tui::run_tui(config).await?;
        }
    }

    Ok(())
}

/// Set up file-based logging when ACORE_LOG names a log file.
///
/// Logging goes to a file rather than stderr so the TUI screen stays clean.
/// Verbosity is controlled with RUST_LOG (default: info).
fn init_tracing() -> Result<()> {
    let Ok(path) = std::env::var("ACORE_LOG") else {
        return Ok(());
    };
    if path.is_empty() {
        return Ok(());
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("could not open log file '{}'", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(file)
        .with_ansi(false)
        .init();

    Ok(())
}

fn parse_status(s: &str) -> Result<JobStatus> {
    match s.to_uppercase().as_str() {
        "PENDING" => Ok(JobStatus::Pending),
        "PROCESSING" => Ok(JobStatus::Processing),
        "COMPLETED" => Ok(JobStatus::Completed),
        "ERROR" => Ok(JobStatus::Error),
        other => bail!(
            "unknown status '{}' (expected PENDING, PROCESSING, COMPLETED, or ERROR)",
            other
        ),
    }
}

fn read_submit_text(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("could not read '{}'", path.display()));
    }

    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("could not read text from stdin")?;
    Ok(text)
}

async fn handle_submit(
    client: &ApiClient,
    text: &str,
    follow: bool,
    config: &AppConfig,
) -> Result<()> {
    let receipt = client.submit(text).await?;
    println!("Submitted. Job ID: {}", receipt.job_id);

    if !follow {
        println!("Check progress with 'acore job {}'", receipt.job_id);
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!("Status: {}", receipt.status));

    // Never cancelled here; Ctrl+C ends the whole process
    let cancel = CancellationToken::new();
    let interval = Duration::from_secs(config.refresh.poll_interval);
    let end = poll_until_terminal(client, &receipt.job_id, interval, &cancel, |job| {
        spinner.set_message(format!("Status: {}", job.status));
    })
    .await;

    spinner.finish_and_clear();

    match end? {
        PollEnd::Terminal(job) => println!("{}", display::format_job_details(&job)),
        PollEnd::Cancelled => {}
    }
    Ok(())
}

async fn fetch_jobs_output(
    client: &ApiClient,
    status: Option<JobStatus>,
    preview_len: usize,
) -> Result<String> {
    let mut jobs = client.list_jobs().await?;
    if let Some(status) = status {
        jobs.retain(|j| j.status == status);
    }
    Ok(display::format_jobs(&jobs, preview_len))
}

/// Watch loop that repeatedly fetches the job list with flicker-free updates
async fn watch_jobs(
    client: &ApiClient,
    interval: f64,
    status: Option<JobStatus>,
    preview_len: usize,
) -> Result<()> {
    // Set up Ctrl+C handler
    let running = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, std::sync::atomic::Ordering::SeqCst);
    })
    .context("Error setting Ctrl-C handler")?;

    // Enter alternate screen buffer and hide cursor for clean display
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = async {
        while running.load(std::sync::atomic::Ordering::SeqCst) {
            let now = chrono::Local::now();
            let timestamp = now.format("%Y-%m-%d %H:%M:%S");

            let output = match fetch_jobs_output(client, status, preview_len).await {
                Ok(s) => s,
                Err(e) => format!("Error: {}", e),
            };

            let screen_content = format!(
                "{}\n\nLast updated: {} | Refreshing every {}s | Press Ctrl+C to exit",
                output, timestamp, interval
            );

            // Write everything at once with synchronized update (DEC private mode)
            // so the terminal does not render a half-written frame
            write!(stdout, "\x1B[?2026h")?;
            write!(stdout, "\x1B[H{}\x1B[J", screen_content)?;
            write!(stdout, "\x1B[?2026l")?;
            stdout.flush()?;

            tokio::time::sleep(Duration::from_secs_f64(interval)).await;
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    // Always clean up terminal state
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    println!("Watch mode stopped.");

    result
}

async fn handle_delete(client: &ApiClient, job_id: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete analysis {}?", job_id))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    client.delete_job(job_id).await?;
    println!("Deleted {}", job_id);
    Ok(())
}

async fn handle_delete_all(client: &ApiClient, yes: bool) -> Result<()> {
    // Clearing the whole history asks twice
    if !yes {
        let first = Confirm::new()
            .with_prompt("Delete ALL analyses? This cannot be undone")
            .default(false)
            .interact()?;
        if !first {
            println!("Aborted.");
            return Ok(());
        }

        let second = Confirm::new()
            .with_prompt("This will remove every analysis. Really continue")
            .default(false)
            .interact()?;
        if !second {
            println!("Aborted.");
            return Ok(());
        }
    }

    let receipt = client.delete_all_jobs().await?;
    println!("Deleted {} analyses.", receipt.deleted_count);
    Ok(())
}
