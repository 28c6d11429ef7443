//! Loads the optional coverage document of a bundle. The figures are passed
//! through to the report untouched.

use crate::core::error::FormatError;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

/// Name of the coverage document inside a bundle directory.
pub const COVERAGE_DOCUMENT: &str = "coverage.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub line_coverage: f64,
    #[serde(default)]
    pub covered_lines: u64,
    #[serde(default)]
    pub executable_lines: u64,
    #[serde(default)]
    pub targets: Vec<TargetCoverage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetCoverage {
    pub name: String,
    pub line_coverage: f64,
    #[serde(default)]
    pub covered_lines: u64,
    #[serde(default)]
    pub executable_lines: u64,
}

/// Reads `coverage.json` from a bundle directory.
///
/// Returns `Ok(None)` when the bundle carries no coverage document, including
/// when `bundle` points directly at a test document rather than a directory.
pub async fn read_coverage(bundle: &Path) -> Result<Option<CoverageReport>, FormatError> {
    if !tokio::fs::metadata(bundle)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
    {
        return Ok(None);
    }

    let document = bundle.join(COVERAGE_DOCUMENT);
    let content = match tokio::fs::read_to_string(&document).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(FormatError::Io {
                path: document,
                source,
            });
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| FormatError::malformed_at(&document, e.to_string()))
}

/// Formats a 0.0..=1.0 coverage ratio as a percentage.
pub fn format_percentage(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}
