//! Candidate-block selection from raw markup.
//!
//! Announcement lists on the monitored sites are almost always tagged with a
//! small set of class or id names. The selector walks that hint list in a
//! fixed order and collects the visible text of every matching node; pages
//! with none of the hints are scanned whole.

use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

/// Structural hints tried in order, attribute forms included.
const BLOCK_HINTS: [&str; 7] = [
    ".news",
    ".latest",
    ".list",
    ".announcement",
    "#news",
    "#latest",
    "#announcement",
];

static HINT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    BLOCK_HINTS
        .iter()
        .map(|hint| Selector::parse(hint).unwrap())
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("markup contains no visible text")]
    EmptyDocument,
}

/// Collect the candidate text blocks of a page.
///
/// Hints are applied in list order; matches within one hint keep document
/// order. Duplicate block texts are dropped, first occurrence kept. When no
/// hint matches, the result is a single block holding the whole document's
/// visible text, so the returned sequence is never empty.
///
/// # Errors
///
/// [`SelectError::EmptyDocument`] when the markup yields no visible text at
/// all, the one case no block can be produced from.
pub fn candidate_blocks(markup: &str) -> Result<Vec<String>, SelectError> {
    let document = Html::parse_document(markup);

    let blocks: Vec<String> = HINT_SELECTORS
        .iter()
        .flat_map(|selector| document.select(selector))
        .map(|element| visible_text(&element))
        .filter(|text| !text.is_empty())
        .unique()
        .collect();

    if !blocks.is_empty() {
        debug!(count = blocks.len(), "candidate blocks matched hints");
        return Ok(blocks);
    }

    let whole = visible_text(&document.root_element());
    if whole.is_empty() {
        return Err(SelectError::EmptyDocument);
    }

    debug!("no hint matched; scanning whole document");
    Ok(vec![whole])
}

/// Visible text of an element with whitespace collapsed to single spaces.
fn visible_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .join(" ")
}
