//! Batch execution over the configured target list.
//!
//! Targets are checked by a bounded pool of concurrent workers
//! (`buffer_unordered`), each fetch bounded by its own timeout, so a hung
//! site only ever delays its own slot. Results land in pre-sized slots
//! addressed by input index, which keeps output order deterministic no
//! matter the completion order. A single `checked_at` timestamp is captured
//! at batch start and shared with every worker as the classification clock.
//!
//! Each check runs in its own spawned task; a panicking task is caught at
//! the join and mapped to the same indeterminate shape as a network failure,
//! so one target can never take the batch down.

use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::checker::SiteChecker;
use crate::fetch::FetchPage;
use crate::models::{BatchResult, CheckResult, SiteTarget};

/// Run one check cycle over `targets`, at most `workers` sites in flight.
#[instrument(level = "info", skip_all, fields(targets = targets.len(), workers))]
pub async fn run_batch<F>(
    targets: &[SiteTarget],
    checker: Arc<SiteChecker<F>>,
    workers: usize,
) -> BatchResult
where
    F: FetchPage + 'static,
{
    let checked_at = Utc::now();
    let workers = workers.max(1);

    let mut slots: Vec<Option<CheckResult>> = Vec::with_capacity(targets.len());
    slots.resize_with(targets.len(), || None);

    let mut completions = stream::iter(targets.iter().cloned().enumerate())
        .map(|(index, target)| {
            let checker = Arc::clone(&checker);
            async move {
                let fallback = target.clone();
                let task =
                    tokio::spawn(async move { checker.check(&target, checked_at).await });
                let result = match task.await {
                    Ok(result) => result,
                    Err(e) => {
                        error!(url = %fallback.url, error = %e, "check task failed");
                        CheckResult::indeterminate(&fallback, format!("internal failure: {e}"))
                    }
                };
                (index, result)
            }
        })
        .buffer_unordered(workers);

    while let Some((index, result)) = completions.next().await {
        slots[index] = Some(result);
    }

    let results: Vec<CheckResult> = slots
        .into_iter()
        .zip(targets)
        .map(|(slot, target)| {
            slot.unwrap_or_else(|| CheckResult::indeterminate(target, "check never completed"))
        })
        .collect();

    info!(count = results.len(), "batch complete");
    BatchResult { checked_at, results }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use crate::models::Status;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Serves canned markup keyed by URL, with per-URL artificial latency so
    /// completion order differs from input order.
    struct ScriptedFetcher;

    #[async_trait]
    impl FetchPage for ScriptedFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            match url {
                "https://slow.example" => {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                    Ok(r#"<div class="news">slow site 2025/11/20</div>"#.to_string())
                }
                "https://down.example" => Err(FetchError::Connect("refused".to_string())),
                "https://fast.example" => {
                    Ok(r#"<div class="news">fast site 2025/11/25</div>"#.to_string())
                }
                other => Ok(format!("<p>{other} has no dates</p>")),
            }
        }
    }

    fn targets() -> Vec<SiteTarget> {
        ["https://slow.example", "https://down.example", "https://fast.example"]
            .iter()
            .map(|url| SiteTarget { name: url.to_string(), url: url.to_string() })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_match_input_order_and_length() {
        let targets = targets();
        let checker = Arc::new(SiteChecker::new(ScriptedFetcher));

        let batch = run_batch(&targets, checker, 3).await;

        assert_eq!(batch.results.len(), targets.len());
        for (result, target) in batch.results.iter().zip(&targets) {
            assert_eq!(result.url, target.url);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_failing_target_leaves_siblings_intact() {
        let targets = targets();
        let checker = Arc::new(SiteChecker::new(ScriptedFetcher));

        let batch = run_batch(&targets, checker, 2).await;

        assert_eq!(batch.results[1].status, Status::Unknown);
        assert!(
            batch.results[1]
                .note
                .as_deref()
                .unwrap()
                .contains("refused")
        );
        // Siblings of the failing target still classified from their own markup.
        assert!(batch.results[0].latest_date.is_some());
        assert_ne!(batch.results[0].status, Status::Unknown);
        assert!(batch.results[2].latest_date.is_some());
        assert_ne!(batch.results[2].status, Status::Unknown);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_worker_produces_same_ordering() {
        let targets = targets();
        let checker = Arc::new(SiteChecker::new(ScriptedFetcher));

        let wide = run_batch(&targets, Arc::clone(&checker), 8).await;
        let narrow = run_batch(&targets, checker, 1).await;

        let urls = |batch: &BatchResult| {
            batch.results.iter().map(|r| r.url.clone()).collect::<Vec<_>>()
        };
        assert_eq!(urls(&wide), urls(&narrow));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_target_list() {
        let checker = Arc::new(SiteChecker::new(ScriptedFetcher));
        let batch = run_batch(&[], checker, 4).await;
        assert!(batch.results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shared_timestamp_drives_classification() {
        let targets = vec![SiteTarget {
            name: "slow".to_string(),
            url: "https://slow.example".to_string(),
        }];
        let checker = Arc::new(SiteChecker::new(ScriptedFetcher));

        let batch = run_batch(&targets, checker, 1).await;
        let result = &batch.results[0];
        let expected = (batch.checked_at.date_naive() - result.latest_date.unwrap()).num_days();
        assert_eq!(result.days_since, Some(expected));
    }
}
