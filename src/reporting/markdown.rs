//! # Markdown Reporting Module / Markdown 报告模块
//!
//! Renders the two report artifacts: the summary (heading, status line and the
//! one-row counts table) and the per-test detail listing. Tables are emitted as
//! inline HTML built with `maud`, which is what CI job summaries render.
//!
//! 渲染两个报告产物：摘要（标题、状态行和单行计数表）
//! 以及逐个测试的详情列表。表格以 `maud` 生成的内联 HTML 输出。

use maud::{Markup, PreEscaped, html};

use crate::core::models::{AggregateCounts, ConsolidatedTestRecord, TestOutcome};
use crate::infra::bundle::Device;
use crate::infra::coverage::{CoverageReport, format_percentage};

/// Column headers of the counts table, left to right.
pub const SUMMARY_HEADERS: [&str; 6] = [
    "Total",
    "✅&nbsp;Passed",
    "❌&nbsp;Failed",
    "⏭️&nbsp;Skipped",
    "🔕&nbsp;Expected&nbsp;Failure",
    "🔄&nbsp;Retries",
];

const CELL_ALIGN: &str = "right";
const CELL_WIDTH: &str = "118px";

/// Renders the counts table. Always exactly one data row of six cells, the
/// failed count in bold, and a Retries column even when nothing was retried.
pub fn counts_table(counts: &AggregateCounts) -> Markup {
    html! {
        table {
            thead {
                tr {
                    @for header in SUMMARY_HEADERS {
                        th { (PreEscaped(header)) }
                    }
                }
            }
            tbody {
                tr {
                    td align=(CELL_ALIGN) width=(CELL_WIDTH) { (counts.total_tests) }
                    td align=(CELL_ALIGN) width=(CELL_WIDTH) { (counts.passed_count) }
                    td align=(CELL_ALIGN) width=(CELL_WIDTH) { b { (counts.failed_count) } }
                    td align=(CELL_ALIGN) width=(CELL_WIDTH) { (counts.skipped_count) }
                    td align=(CELL_ALIGN) width=(CELL_WIDTH) { (counts.expected_failure_count) }
                    td align=(CELL_ALIGN) width=(CELL_WIDTH) { (counts.total_retries) }
                }
            }
        }
    }
}

fn status_line(counts: &AggregateCounts) -> String {
    let retried = match counts.total_retries {
        0 => String::new(),
        1 => " (1 retry)".to_string(),
        n => format!(" ({} retries)", n),
    };

    match counts.failed_count {
        0 if counts.total_tests == 0 => ":warning: No tests were found.".to_string(),
        0 => format!(":white_check_mark: All tests passed{}.", retried),
        1 => format!(":x: 1 test failed{}.", retried),
        n => format!(":x: {} tests failed{}.", n, retried),
    }
}

fn coverage_table(coverage: &CoverageReport) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th { "Target" }
                    th { "Line Coverage" }
                    th { "Covered" }
                    th { "Executable" }
                }
            }
            tbody {
                tr {
                    td { b { "Total" } }
                    td align=(CELL_ALIGN) { b { (format_percentage(coverage.line_coverage)) } }
                    td align=(CELL_ALIGN) { (coverage.covered_lines) }
                    td align=(CELL_ALIGN) { (coverage.executable_lines) }
                }
                @for target in &coverage.targets {
                    tr {
                        td { (target.name) }
                        td align=(CELL_ALIGN) { (format_percentage(target.line_coverage)) }
                        td align=(CELL_ALIGN) { (target.covered_lines) }
                        td align=(CELL_ALIGN) { (target.executable_lines) }
                    }
                }
            }
        }
    }
}

fn device_label(device: &Device) -> String {
    match (&device.platform, &device.os_version) {
        (Some(platform), Some(version)) => format!("{} ({} {})", device.device_name, platform, version),
        (Some(platform), None) => format!("{} ({})", device.device_name, platform),
        (None, Some(version)) => format!("{} ({})", device.device_name, version),
        (None, None) => device.device_name.clone(),
    }
}

/// Renders the summary artifact.
/// 渲染摘要产物。
///
/// `coverage` is only passed when coverage display was requested and the
/// bundle carries a coverage document.
pub fn render_summary(
    title: &str,
    counts: &AggregateCounts,
    devices: &[Device],
    coverage: Option<&CoverageReport>,
) -> String {
    let mut summary = String::new();
    summary.push_str(&format!("### {}\n\n", title));
    summary.push_str(&status_line(counts));
    summary.push_str("\n\n");
    summary.push_str(&counts_table(counts).into_string());
    summary.push('\n');

    if !devices.is_empty() {
        let labels: Vec<String> = devices.iter().map(device_label).collect();
        summary.push_str(&format!("\nRan on: {}\n", labels.join(", ")));
    }

    if let Some(coverage) = coverage {
        summary.push_str("\n#### Code Coverage\n\n");
        summary.push_str(&coverage_table(coverage).into_string());
        summary.push('\n');
    }

    summary
}

/// Formats an optional duration for display. Returns "N/A" when absent.
pub fn format_duration(record: &ConsolidatedTestRecord) -> String {
    record
        .duration
        .map(|d| format!("{:.2}s", d.as_secs_f64()))
        .unwrap_or_else(|| "N/A".to_string())
}

fn retries_cell(record: &ConsolidatedTestRecord) -> Markup {
    html! {
        @if record.was_retried() {
            (PreEscaped("🔄&nbsp;")) (record.retry_count)
        } @else {
            (record.retry_count)
        }
    }
}

fn suite_table(records: &[&ConsolidatedTestRecord]) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th { "Status" }
                    th { "Test" }
                    th { "Retries" }
                    th { "Duration" }
                }
            }
            tbody {
                @for record in records {
                    tr {
                        td { (record.final_outcome.icon()) (PreEscaped("&nbsp;")) (record.final_outcome.label()) }
                        td { code { (record.test_identifier) } }
                        td align=(CELL_ALIGN) { (retries_cell(record)) }
                        td align=(CELL_ALIGN) { (format_duration(record)) }
                    }
                    @if let Some(detail) = record.surfaced_failure_detail() {
                        tr {
                            td colspan="4" { pre { (detail) } }
                        }
                    }
                }
            }
        }
    }
}

/// Groups records by suite, keeping the order in which suites first appear.
fn by_suite<'a>(
    records: impl IntoIterator<Item = &'a ConsolidatedTestRecord>,
) -> Vec<(&'a str, Vec<&'a ConsolidatedTestRecord>)> {
    let mut suites: Vec<(&str, Vec<&ConsolidatedTestRecord>)> = Vec::new();
    for record in records {
        match suites.iter_mut().find(|(suite, _)| *suite == record.suite()) {
            Some((_, members)) => members.push(record),
            None => suites.push((record.suite(), vec![record])),
        }
    }
    suites
}

/// Renders the detail artifact: one table per suite.
/// 渲染详情产物：每个测试套件一个表格。
///
/// Passed tests are listed only when `show_passed_tests` is set; every other
/// outcome is always listed.
pub fn render_detail(records: &[ConsolidatedTestRecord], show_passed_tests: bool) -> String {
    let visible: Vec<&ConsolidatedTestRecord> = records
        .iter()
        .filter(|r| show_passed_tests || r.final_outcome != TestOutcome::Passed)
        .collect();

    let mut detail = String::from("### Test Details\n\n");

    if visible.is_empty() {
        if records.is_empty() {
            detail.push_str("_No tests were found in this bundle._\n");
        } else {
            detail.push_str("_All tests passed. Passed tests are hidden._\n");
        }
        return detail;
    }

    for (suite, members) in by_suite(visible) {
        let heading = if suite.is_empty() { "Tests" } else { suite };
        detail.push_str(&format!("#### {}\n\n", heading));
        detail.push_str(&suite_table(&members).into_string());
        detail.push_str("\n\n");
    }

    detail
}
