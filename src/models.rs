//! Data models for monitored sites and their check results.
//!
//! This module defines the core data structures used throughout the application:
//! - [`SiteTarget`]: A monitored site as supplied by external configuration
//! - [`DateCandidate`]: A recognized date paired with a short excerpt, produced per block
//! - [`CheckResult`]: The per-site outcome returned to API clients
//! - [`BatchResult`]: One full check cycle across all configured targets
//! - [`Status`]: The freshness classification attached to every result
//!
//! Everything here is created fresh for each check cycle and discarded once the
//! response has been produced; nothing is retained across cycles.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A site to be checked, as supplied by external configuration.
///
/// Targets are immutable once loaded; their identity is the `url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SiteTarget {
    /// Display name for the site (defaults to the URL when not configured).
    pub name: String,
    /// The URL fetched during a check.
    pub url: String,
}

/// A date recognized inside one candidate block, with the block's leading text.
///
/// Candidates are ephemeral: they exist only between extraction and
/// classification for a single site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCandidate {
    /// The recognized calendar date.
    pub date: NaiveDate,
    /// The first 40 characters of the block the date was found in.
    pub excerpt: String,
}

/// Freshness classification for a checked site.
///
/// Serialized lowercase on the wire: `"ok"`, `"outdated"`, `"unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The newest recognized date is at most 30 days old.
    Ok,
    /// The newest recognized date is more than 30 days old.
    Outdated,
    /// No date could be recognized, or the fetch/parse failed.
    Unknown,
}

/// The outcome of checking a single site.
///
/// Invariants upheld by construction:
/// - `status == Unknown` exactly when `latest_date` is absent
/// - `days_since` is present exactly when `latest_date` is present
/// - `status == Ok` exactly when `days_since <= 30`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub url: String,
    /// Newest date recognized on the page, `YYYY-MM-DD` on the wire.
    pub latest_date: Option<NaiveDate>,
    /// Excerpt of the block that carried the newest date.
    pub latest_title: Option<String>,
    /// Whole days elapsed between `latest_date` and the batch timestamp.
    pub days_since: Option<i64>,
    pub status: Status,
    /// Empty on success; a human-readable failure description otherwise.
    pub note: Option<String>,
}

impl CheckResult {
    /// Build the uniform indeterminate result used for every failure class.
    pub fn indeterminate(target: &SiteTarget, note: impl Into<String>) -> Self {
        Self {
            name: target.name.clone(),
            url: target.url.clone(),
            latest_date: None,
            latest_title: None,
            days_since: None,
            status: Status::Unknown,
            note: Some(note.into()),
        }
    }
}

/// One check cycle across every configured target.
///
/// `results[i]` always corresponds to `targets[i]`, and the length always
/// equals the number of configured targets, no matter which sites failed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchResult {
    /// Single timestamp captured at batch start, shared by all results.
    pub checked_at: DateTime<Utc>,
    pub results: Vec<CheckResult>,
}
