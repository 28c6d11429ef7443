//! # HTML Reporting Module / HTML 报告模块
//!
//! This module renders one or more reports into a standalone, styled HTML page
//! with the counts of each bundle and a collapsible failure detail per test.
//!
//! 此模块将一个或多个报告渲染为独立的样式化 HTML 页面，
//! 包含每个结果包的计数以及每个测试可折叠的失败详情。

use anyhow::Result;
use chrono::Local;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::path::Path;

use crate::core::formatter::Report;
use crate::core::models::ConsolidatedTestRecord;
use crate::infra::fs::write_report;
use crate::reporting::markdown::{counts_table, format_duration};

/// Embedded CSS styles for HTML reports / HTML 报告的内嵌 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

fn record_row(record: &ConsolidatedTestRecord) -> Markup {
    html! {
        tr {
            td { code { (record.test_identifier) } }
            td class="status-col" {
                div class={ "status-cell " (record.final_outcome.status_class()) } {
                    (record.final_outcome.label())
                }
                @if let Some(detail) = record.surfaced_failure_detail() {
                    details class="output-toggle" {
                        summary { "Failure detail" }
                        pre class="output-content" { (detail) }
                    }
                }
            }
            td class="retries-cell" {
                @if record.was_retried() { (record.retry_count) }
            }
            td class="duration-cell" { (format_duration(record)) }
        }
    }
}

fn report_section(report: &Report) -> Markup {
    html! {
        section class={ "bundle " "bundle-" (report.test_status.as_str()) } {
            h2 { (report.title) }
            div class="summary-container" { (counts_table(&report.counts)) }
            table class="results" {
                thead {
                    tr {
                        th { "Test" }
                        th class="status-col" { "Status" }
                        th class="retries-cell" { "Retries" }
                        th class="duration-cell" { "Duration" }
                    }
                }
                tbody {
                    @for record in &report.records {
                        (record_row(record))
                    }
                }
            }
        }
    }
}

/// Renders the HTML page for a set of reports.
/// 为一组报告渲染 HTML 页面。
pub fn render_html_report(reports: &[Report]) -> String {
    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Test Report" }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { "Test Report" }
                p class="generated-at" { "Generated " (generated_at) }
                @for report in reports {
                    (report_section(report))
                }
            }
        }
    }
    .into_string()
}

/// Generates the HTML report and writes it to `output_path`.
/// 生成 HTML 报告并写入 `output_path`。
///
/// # Errors / 错误
/// This function will return an error if the output file cannot be written.
pub fn generate_html_report(reports: &[Report], output_path: &Path) -> Result<()> {
    write_report(output_path, &render_html_report(reports))
}
