//! Candidate-block selection and date recognition.
//!
//! Extraction runs in two stages for every fetched page:
//!
//! 1. **Block selection** ([`blocks`]): structural hints pick out the page
//!    regions most likely to hold the latest announcement, falling back to
//!    the whole document when nothing matches.
//! 2. **Date recognition** ([`dates`]): an ordered chain of strategies scans
//!    each block for an embedded date, strict numeric patterns first and a
//!    permissive natural-language scan last.
//!
//! Both stages are pure functions over text: identical input always yields
//! identical output, which keeps the whole pipeline idempotent. Only the
//! elapsed-days computation downstream depends on the clock.

pub mod blocks;
pub mod dates;
