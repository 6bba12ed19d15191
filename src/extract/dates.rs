//! Date recognition over candidate-block text.
//!
//! Announcement dates on the monitored pages arrive in several shapes:
//! four-digit Gregorian years (`2025/11/26`, `2025-11-26`), three-digit
//! Minguo years counted from 1912 (`114/11/26` is 2025-11-26), and prose
//! forms ("Published January 5, 2025"). Recognition runs an ordered chain of
//! [`DateStrategy`] implementations; the first strategy that produces a date
//! wins, and each strategy only ever considers the first occurrence of its
//! pattern. The chain makes the precedence policy explicit and lets every
//! strategy be tested on its own.
//!
//! All strategies are pure: identical text always yields an identical result.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Gregorian-calendar offset of the Minguo (Republic of China) era.
const MINGUO_OFFSET: i32 = 1911;

/// One way of recognizing a date inside plain text.
pub trait DateStrategy: Send + Sync {
    fn attempt(&self, text: &str) -> Option<NaiveDate>;
}

/// `YYYY/MM/DD` or `YYYY-MM-DD`, one- or two-digit month and day tolerated.
struct GregorianNumeric;

/// `YYY/MM/DD` with a three-digit Minguo year; Gregorian year = year + 1911.
struct MinguoNumeric;

/// Last-resort scan for a date-like substring in surrounding prose.
struct FuzzyScan;

static GREGORIAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4})[/-]([0-9]{1,2})[/-]([0-9]{1,2})").unwrap());

static MINGUO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{3})[/-]([0-9]{1,2})[/-]([0-9]{1,2})").unwrap());

static FUZZY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)\b(?:
            [A-Za-z]{3,9}\.?\s+[0-9]{1,2}(?:st|nd|rd|th)?\s*,?\s+[0-9]{4}
          | [0-9]{1,2}(?:st|nd|rd|th)?\s+[A-Za-z]{3,9}\.?,?\s+[0-9]{4}
          | [0-9]{4}\.[0-9]{1,2}\.[0-9]{1,2}
        )\b",
    )
    .unwrap()
});

static ORDINAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b([0-9]{1,2})(?:st|nd|rd|th)\b").unwrap());

/// Prose formats tried in order against the cleaned fuzzy match.
const FUZZY_FORMATS: [&str; 5] = ["%B %d %Y", "%b %d %Y", "%d %B %Y", "%d %b %Y", "%Y %m %d"];

impl DateStrategy for GregorianNumeric {
    fn attempt(&self, text: &str) -> Option<NaiveDate> {
        let caps = GREGORIAN_RE.captures(text)?;
        let year: i32 = caps[1].parse().ok()?;
        reassemble(year, &caps[2], &caps[3])
    }
}

impl DateStrategy for MinguoNumeric {
    fn attempt(&self, text: &str) -> Option<NaiveDate> {
        let caps = MINGUO_RE.captures(text)?;
        let year: i32 = caps[1].parse::<i32>().ok()? + MINGUO_OFFSET;
        reassemble(year, &caps[2], &caps[3])
    }
}

impl DateStrategy for FuzzyScan {
    fn attempt(&self, text: &str) -> Option<NaiveDate> {
        let found = FUZZY_RE.find(text)?;
        let cleaned = clean_fuzzy_match(found.as_str());
        FUZZY_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(&cleaned, format).ok())
    }
}

/// Rebuild captured components as canonical `YYYY-MM-DD` and parse strictly,
/// so that out-of-range components fail the strategy instead of producing a
/// date.
fn reassemble(year: i32, month: &str, day: &str) -> Option<NaiveDate> {
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    let canonical = format!("{year:04}-{month:02}-{day:02}");
    NaiveDate::parse_from_str(&canonical, "%Y-%m-%d").ok()
}

/// Strip ordinal suffixes and punctuation, collapse whitespace.
fn clean_fuzzy_match(matched: &str) -> String {
    let without_ordinals = ORDINAL_RE.replace_all(matched, "$1");
    without_ordinals
        .replace([',', '.'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Recognize the date embedded in one block of text, if any.
///
/// Strategies run in fixed order (strict four-digit numeric, Minguo
/// numeric, permissive prose scan) and the first success wins.
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    static STRATEGIES: Lazy<[Box<dyn DateStrategy>; 3]> = Lazy::new(|| {
        [
            Box::new(GregorianNumeric),
            Box::new(MinguoNumeric),
            Box::new(FuzzyScan),
        ]
    });

    STRATEGIES
        .iter()
        .find_map(|strategy| strategy.attempt(text))
}
