//! Freshness classification over the candidates found on one site.
//!
//! Selection policy: the candidate with the strictly greatest date wins, and
//! on equal dates the first-seen candidate keeps its excerpt. Elapsed days
//! are computed against the batch's shared timestamp with the recognized
//! date anchored at midnight UTC. A date exactly 30 days old still counts
//! as current; the boundary is inclusive.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{CheckResult, DateCandidate, SiteTarget, Status};

/// Days a site may go without a new announcement before it counts as stale.
const FRESH_WINDOW_DAYS: i64 = 30;

const NO_DATE_NOTE: &str = "no date could be recognized on the page; needs manual review";

/// Classify one site from the candidates its blocks produced.
///
/// Candidates must be given in block order; with none carrying a date the
/// result is the uniform indeterminate shape.
pub fn classify(
    target: &SiteTarget,
    candidates: &[DateCandidate],
    now: DateTime<Utc>,
) -> CheckResult {
    let mut best: Option<&DateCandidate> = None;
    for candidate in candidates {
        if best.is_none_or(|retained| candidate.date > retained.date) {
            best = Some(candidate);
        }
    }

    let Some(retained) = best else {
        return CheckResult::indeterminate(target, NO_DATE_NOTE);
    };

    let days_since = (now.date_naive() - retained.date).num_days();
    let status = if days_since <= FRESH_WINDOW_DAYS {
        Status::Ok
    } else {
        Status::Outdated
    };
    debug!(url = %target.url, latest = %retained.date, days_since, ?status, "classified site");

    CheckResult {
        name: target.name.clone(),
        url: target.url.clone(),
        latest_date: Some(retained.date),
        latest_title: Some(retained.excerpt.clone()),
        days_since: Some(days_since),
        status,
        note: Some(String::new()),
    }
}
