// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Seatsweep CLI - export the full Smartsheet user roster.
//!
//! # Examples
//!
//! ```bash
//! # Export the roster as text (count + sample)
//! SMARTSHEET_ACCESS_TOKEN=... seatsweep
//!
//! # Full roster as JSON
//! seatsweep --format json --pretty > users.json
//!
//! # Tune paging and retries
//! seatsweep --page-size 50 --max-attempts 8
//! ```

mod output;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use seatsweep_fetch::{fetch_all_users, resolve_plan_id, ApiClient, FetchObserver, FetchSettings};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://api.smartsheet.com/2.0";

/// Environment variable supplying the bearer token.
const TOKEN_ENV: &str = "SMARTSHEET_ACCESS_TOKEN";

// ============================================================================
// CLI Definition
// ============================================================================

/// Export the complete user roster, including seat types, from Smartsheet.
#[derive(Parser)]
#[command(name = "seatsweep")]
#[command(about = "Export the full Smartsheet user roster")]
#[command(version)]
pub struct Cli {
    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Records requested per page.
    #[arg(long, default_value_t = 100)]
    pub page_size: u32,

    /// Retry budget per request before giving up.
    #[arg(long, default_value_t = 5)]
    pub max_attempts: u32,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// API base URL.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Verbose output (show debug info).
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode (no progress, no logging).
    #[arg(long, short)]
    pub quiet: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable summary with a record sample.
    #[default]
    Text,
    /// Full record list as JSON for scripting.
    Json,
}

// ============================================================================
// Progress Reporting
// ============================================================================

/// Observer writing fetch progress to stderr.
struct ProgressObserver {
    quiet: bool,
}

impl FetchObserver for ProgressObserver {
    fn on_page(&self, page_number: u32, total_pages: u32, records: usize) {
        if !self.quiet {
            let total = total_pages.max(1);
            eprintln!("Page {page_number}/{total}: {records} users");
        }
    }

    fn on_retry(&self, attempt: u32, wait: Duration, reason: &str) {
        if !self.quiet {
            eprintln!(
                "Retry {} in {}s ({reason})",
                attempt + 1,
                wait.as_secs()
            );
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("seatsweep=debug,info")
    } else {
        EnvFilter::new("seatsweep=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli).await {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: &Cli) -> Result<()> {
    let token = std::env::var(TOKEN_ENV)
        .with_context(|| format!("{TOKEN_ENV} is not set"))?;

    let settings = FetchSettings::default()
        .with_page_size(cli.page_size)
        .with_max_attempts(cli.max_attempts)
        .with_request_timeout(Duration::from_secs(cli.timeout));

    let client = ApiClient::over_http(&cli.base_url, &token, settings)?
        .with_observer(Arc::new(ProgressObserver { quiet: cli.quiet }));

    // Ctrl-C aborts the in-flight job, including mid-backoff.
    let cancel = client.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Interrupted, aborting fetch...");
            cancel.cancel();
        }
    });

    let plan_id = resolve_plan_id(&client).await?;
    let roster = fetch_all_users(&client, plan_id).await?;

    match cli.format {
        OutputFormat::Text => print!("{}", output::render_text(&roster)),
        OutputFormat::Json => println!("{}", output::render_json(&roster, cli.pretty)?),
    }

    Ok(())
}
