//! Target-list configuration.
//!
//! The sites to monitor live in a YAML file, one `{name, url}` entry per
//! site in check order; `name` may be omitted and defaults to the URL. The
//! list is loaded once at startup, validated, and passed into the batch
//! layer as plain data; the core keeps no process-wide target state.

use serde::Deserialize;
use std::fs;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::models::SiteTarget;

#[derive(Debug, Error)]
pub enum TargetsError {
    #[error("cannot read target file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("target file is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("target {index} has an invalid url {url:?}: {reason}")]
    InvalidUrl {
        index: usize,
        url: String,
        reason: String,
    },
    #[error("target file lists no sites")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct RawTarget {
    name: Option<String>,
    url: String,
}

/// Load and validate the ordered target list from a YAML file.
pub fn load_targets(path: &str) -> Result<Vec<SiteTarget>, TargetsError> {
    let raw = fs::read_to_string(path).map_err(|source| TargetsError::Io {
        path: path.to_string(),
        source,
    })?;
    let entries: Vec<RawTarget> = serde_yaml::from_str(&raw)?;
    if entries.is_empty() {
        return Err(TargetsError::Empty);
    }

    let mut targets = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        validate_url(index, &entry.url)?;
        let url = entry.url.trim().to_string();
        targets.push(SiteTarget {
            name: entry.name.unwrap_or_else(|| url.clone()),
            url,
        });
    }

    info!(count = targets.len(), path, "loaded target list");
    Ok(targets)
}

fn validate_url(index: usize, url: &str) -> Result<(), TargetsError> {
    let parsed = Url::parse(url.trim()).map_err(|e| TargetsError::InvalidUrl {
        index,
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(TargetsError::InvalidUrl {
            index,
            url: url.to_string(),
            reason: format!("unsupported scheme {:?}", parsed.scheme()),
        });
    }
    Ok(())
}
