//! Per-site check orchestration.
//!
//! [`SiteChecker`] wires fetch → block selection → date extraction →
//! classification for a single target, and is the isolation boundary of the
//! pipeline: every stage failure is folded into the uniform indeterminate
//! [`CheckResult`] shape, and nothing escapes past `check`.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use crate::classify::classify;
use crate::extract::blocks::candidate_blocks;
use crate::extract::dates::extract_date;
use crate::fetch::FetchPage;
use crate::models::{CheckResult, DateCandidate, SiteTarget};
use crate::utils::excerpt;

/// Characters of block text retained as the candidate excerpt.
const EXCERPT_CHARS: usize = 40;

/// Checks one site end to end; generic over the fetcher so tests can feed
/// canned markup through the full pipeline.
pub struct SiteChecker<F> {
    fetcher: F,
}

impl<F: FetchPage> SiteChecker<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Check a single target against the shared batch timestamp.
    ///
    /// Always returns a [`CheckResult`]; fetch and parse failures become
    /// `status = unknown` with a note naming the failure class.
    #[instrument(level = "info", skip_all, fields(url = %target.url))]
    pub async fn check(&self, target: &SiteTarget, now: DateTime<Utc>) -> CheckResult {
        let markup = match self.fetcher.fetch(&target.url).await {
            Ok(markup) => markup,
            Err(e) => {
                warn!(url = %target.url, error = %e, "fetch failed");
                return CheckResult::indeterminate(target, format!("fetch failed: {e}"));
            }
        };

        let blocks = match candidate_blocks(&markup) {
            Ok(blocks) => blocks,
            Err(e) => {
                warn!(url = %target.url, error = %e, "markup could not be interpreted");
                return CheckResult::indeterminate(target, format!("parse failed: {e}"));
            }
        };

        let candidates: Vec<DateCandidate> = blocks
            .iter()
            .filter_map(|block| {
                extract_date(block).map(|date| DateCandidate {
                    date,
                    excerpt: excerpt(block, EXCERPT_CHARS),
                })
            })
            .collect();
        debug!(
            url = %target.url,
            blocks = blocks.len(),
            dated = candidates.len(),
            "extracted date candidates"
        );

        classify(target, &candidates, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use crate::models::Status;
    use async_trait::async_trait;
    use chrono::TimeZone;

    struct StubFetcher {
        response: Result<String, FetchError>,
    }

    #[async_trait]
    impl FetchPage for StubFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            self.response.clone()
        }
    }

    fn target() -> SiteTarget {
        SiteTarget {
            name: "Example".to_string(),
            url: "https://example.com".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap()
    }

    fn checker_for(markup: &str) -> SiteChecker<StubFetcher> {
        SiteChecker::new(StubFetcher {
            response: Ok(markup.to_string()),
        })
    }

    #[tokio::test]
    async fn test_recent_announcement_is_ok() {
        let checker = checker_for(
            r#"<div class="news">County fair opens 2025/11/26 at the plaza</div>"#,
        );
        let result = checker.check(&target(), now()).await;

        assert_eq!(result.status, Status::Ok);
        assert_eq!(
            result.latest_date,
            chrono::NaiveDate::from_ymd_opt(2025, 11, 26)
        );
        assert_eq!(result.days_since, Some(5));
        assert_eq!(
            result.latest_title.as_deref(),
            Some("County fair opens 2025/11/26 at the plaz")
        );
        assert_eq!(result.note.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_minguo_date_in_fallback_scan() {
        let checker = checker_for("<html><body><p>最新公告 114/11/26</p></body></html>");
        let result = checker.check(&target(), now()).await;

        assert_eq!(
            result.latest_date,
            chrono::NaiveDate::from_ymd_opt(2025, 11, 26)
        );
        assert_eq!(result.status, Status::Ok);
    }

    #[tokio::test]
    async fn test_newest_block_wins_across_blocks() {
        let checker = checker_for(
            r#"<div class="news">archive 2024/01/01</div>
               <div class="latest">fresh 2025/11/30</div>"#,
        );
        let result = checker.check(&target(), now()).await;

        assert_eq!(
            result.latest_date,
            chrono::NaiveDate::from_ymd_opt(2025, 11, 30)
        );
        assert!(result.latest_title.as_deref().unwrap().starts_with("fresh"));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_unknown_with_note() {
        let checker = SiteChecker::new(StubFetcher {
            response: Err(FetchError::Timeout),
        });
        let result = checker.check(&target(), now()).await;

        assert_eq!(result.status, Status::Unknown);
        assert!(result.latest_date.is_none());
        let note = result.note.as_deref().unwrap();
        assert!(note.contains("timed out"));
    }

    #[tokio::test]
    async fn test_dateless_page_is_unknown() {
        let checker = checker_for("<html><body><p>no dates anywhere</p></body></html>");
        let result = checker.check(&target(), now()).await;

        assert_eq!(result.status, Status::Unknown);
        assert!(result.days_since.is_none());
        assert!(!result.note.as_deref().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_body_is_unknown() {
        let checker = checker_for("");
        let result = checker.check(&target(), now()).await;

        assert_eq!(result.status, Status::Unknown);
        assert!(result.note.as_deref().unwrap().contains("parse failed"));
    }
}
