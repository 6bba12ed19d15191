//! Command-line interface definitions for newswatch.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! All arguments can be provided via command-line flags or environment
//! variables.

use clap::Parser;

/// Command-line arguments for the newswatch server.
///
/// # Examples
///
/// ```sh
/// # Serve the default target list on the default address
/// newswatch
///
/// # Custom target file, more workers, tighter fetch timeout
/// newswatch --targets ./sites.yaml --workers 16 --timeout-secs 10
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Address the HTTP server binds to
    #[arg(short, long, env = "NEWSWATCH_BIND", default_value = "0.0.0.0:8000")]
    pub bind: String,

    /// Path to the YAML file listing the sites to check
    #[arg(short, long, env = "NEWSWATCH_TARGETS", default_value = "targets.yaml")]
    pub targets: String,

    /// Number of sites checked concurrently per batch
    #[arg(short, long, env = "NEWSWATCH_WORKERS", default_value_t = 8)]
    pub workers: usize,

    /// Per-request fetch timeout in seconds
    #[arg(long, env = "NEWSWATCH_TIMEOUT_SECS", default_value_t = 20)]
    pub timeout_secs: u64,
}
