//! Read captured API responses from a JSON Lines network log.
//!
//! Each line holds one `{"url": ..., "data": ...}` object as dumped by the
//! page capture hook.

use std::io::BufRead;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ticket_facets_model::{ApiDocument, DecodeError};

/// Substring that marks inventory API responses worth inspecting.
pub const DEFAULT_URL_FILTER: &str = "/api/";

/// One captured network response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureEntry {
    pub url: String,
    #[serde(default)]
    pub data: Value,
}

impl CaptureEntry {
    #[must_use]
    pub fn new(url: impl Into<String>, data: Value) -> Self {
        Self {
            url: url.into(),
            data,
        }
    }

    /// Return `true` when the entry URL contains `filter`. An empty filter
    /// matches everything.
    #[must_use]
    pub fn matches(&self, filter: &str) -> bool {
        self.url.contains(filter)
    }

    /// Decode the captured payload as an inventory API document.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when a known field has the wrong type.
    pub fn document(&self) -> Result<ApiDocument, DecodeError> {
        Ok(ApiDocument::deserialize(&self.data)?)
    }
}

/// Parse every non-blank line of `reader` as a [`CaptureEntry`].
///
/// # Errors
///
/// Returns an error naming the 1-based line number of the first line that
/// cannot be read or parsed.
pub fn read_captures(reader: impl BufRead) -> Result<Vec<CaptureEntry>> {
    let mut entries = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.with_context(|| format!("failed to read capture line {number}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: CaptureEntry = serde_json::from_str(&line)
            .with_context(|| format!("invalid capture entry on line {number}"))?;
        entries.push(entry);
    }
    tracing::debug!(entries = entries.len(), "read capture log");
    Ok(entries)
}
