//! # newswatch
//!
//! A small monitoring service that periodically assesses whether each of a
//! fixed set of web pages has published content recently. For every
//! configured site it fetches the page, picks out the regions most likely to
//! hold the latest announcement, recognizes a date in any of several local
//! formats (including three-digit Minguo-era years), and classifies the site
//! as `ok`, `outdated`, or `unknown`.
//!
//! ## Usage
//!
//! ```sh
//! newswatch --targets targets.yaml --bind 0.0.0.0:8000
//! ```
//!
//! ## Architecture
//!
//! One check cycle runs as a pipeline per site:
//! 1. **Fetch**: bounded-timeout HTTP GET with redirect following
//! 2. **Select**: structural hints pick candidate announcement blocks
//! 3. **Extract**: an ordered strategy chain recognizes an embedded date
//! 4. **Classify**: the newest date is compared against a 30-day window
//!
//! A bounded worker pool runs the per-site pipelines concurrently; failures
//! never cross site boundaries, and the HTTP layer only ever sees complete,
//! input-ordered result sets.

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod checker;
mod classify;
mod cli;
mod extract;
mod fetch;
mod models;
mod runner;
mod server;
mod targets;
mod utils;

use checker::SiteChecker;
use cli::Cli;
use fetch::HttpFetcher;
use server::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("newswatch starting up");

    let args = Cli::parse();

    let targets = match targets::load_targets(&args.targets) {
        Ok(targets) => targets,
        Err(e) => {
            error!(path = %args.targets, error = %e, "failed to load target list");
            return Err(e.into());
        }
    };
    info!(
        count = targets.len(),
        workers = args.workers,
        timeout_secs = args.timeout_secs,
        "configuration loaded"
    );

    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout_secs));
    let state = AppState {
        targets: Arc::new(targets),
        checker: Arc::new(SiteChecker::new(fetcher)),
        workers: args.workers,
    };

    server::serve(state, &args.bind).await
}
