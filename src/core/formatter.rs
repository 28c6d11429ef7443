//! # Formatter / 格式化器
//!
//! The `format()` pipeline: read the bundle, group attempts, consolidate,
//! aggregate, render. Each call owns everything it derives; nothing is shared
//! between calls, so independent bundles can be formatted concurrently.
//!
//! `format()` 流水线：读取结果包、分组、合并、聚合、渲染。
//! 每次调用独立持有其数据，因此不同结果包可以并发格式化。

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::core::{
    aggregation::aggregate,
    config::{DEFAULT_TITLE, FormatOptions},
    consolidation::consolidate_all,
    error::FormatError,
    grouping::group_attempts,
    models::{AggregateCounts, ConsolidatedTestRecord, RawExecutionRecord, TestStatus},
};
use crate::infra::{
    bundle::{self, Device},
    coverage::{self, CoverageReport},
};
use crate::reporting::markdown;

/// The result of formatting one bundle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// `success` unless at least one test consolidated to failed.
    pub test_status: TestStatus,
    /// Heading, status line and the one-row counts table.
    pub report_summary: String,
    /// Per-test listing, filtered by `show_passed_tests`.
    pub report_detail: String,
    pub title: String,
    pub counts: AggregateCounts,
    /// Every consolidated record, regardless of `show_passed_tests`.
    pub records: Vec<ConsolidatedTestRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<Device>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageReport>,
}

impl Report {
    /// Summary and detail joined as one Markdown document.
    pub fn to_markdown(&self) -> String {
        format!("{}\n{}", self.report_summary, self.report_detail)
    }
}

/// Consolidated records together with their counts.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub records: Vec<ConsolidatedTestRecord>,
    pub counts: AggregateCounts,
}

impl RunSummary {
    pub fn status(&self) -> TestStatus {
        self.counts.status()
    }
}

/// Runs grouping, consolidation and aggregation over flat attempt records.
///
/// # Errors
/// Fails with [`FormatError::MalformedBundle`] if any group is inconsistent;
/// no test is ever silently dropped.
pub fn summarize(
    records: impl IntoIterator<Item = RawExecutionRecord>,
) -> Result<RunSummary, FormatError> {
    let groups = group_attempts(records);
    let records = consolidate_all(&groups)?;
    let counts = aggregate(&records);
    Ok(RunSummary { records, counts })
}

/// Formats the bundle at `path`.
/// 格式化位于 `path` 的结果包。
///
/// # Errors
/// Any reader or consolidation error aborts the call before anything is rendered.
pub async fn format_bundle(path: &Path, options: &FormatOptions) -> Result<Report, FormatError> {
    let tree = bundle::read_bundle(path).await?;
    let coverage = if options.show_code_coverage {
        coverage::read_coverage(path).await?
    } else {
        None
    };

    let summary = bundle::flatten_tree(&tree)
        .and_then(summarize)
        .map_err(|e| e.in_bundle(path))?;

    let title = options
        .title
        .clone()
        .or(tree.title)
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let report_summary =
        markdown::render_summary(&title, &summary.counts, &tree.devices, coverage.as_ref());
    let report_detail = markdown::render_detail(&summary.records, options.show_passed_tests);

    Ok(Report {
        test_status: summary.status(),
        report_summary,
        report_detail,
        title,
        counts: summary.counts,
        records: summary.records,
        devices: tree.devices,
        coverage,
    })
}

/// A formatter bound to one bundle path.
#[derive(Debug, Clone)]
pub struct Formatter {
    bundle_path: PathBuf,
}

impl Formatter {
    pub fn new(bundle_path: impl Into<PathBuf>) -> Self {
        Self {
            bundle_path: bundle_path.into(),
        }
    }

    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    /// See [`format_bundle`].
    pub async fn format(&self, options: &FormatOptions) -> Result<Report, FormatError> {
        format_bundle(&self.bundle_path, options).await
    }
}
