//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints the consolidated results of a bundle to the console,
//! using color coding and localized status strings.
//!
//! 此模块将结果包的合并结果打印到控制台，
//! 使用颜色编码和本地化的状态字符串。

use colored::*;

use crate::core::formatter::Report;
use crate::core::models::{ConsolidatedTestRecord, TestOutcome, TestStatus};
use crate::infra::t;
use crate::reporting::markdown::format_duration;

fn colored_status(record: &ConsolidatedTestRecord, locale: &str) -> ColoredString {
    let status_str = record.final_outcome.localized(locale);
    match record.final_outcome {
        TestOutcome::Passed => status_str.green(),
        TestOutcome::Failed => status_str.red(),
        TestOutcome::ExpectedFailure => status_str.yellow(),
        TestOutcome::Skipped => status_str.dimmed(),
    }
}

/// Prints a formatted summary of one report to the console.
///
/// 在控制台打印单个报告的格式化摘要。
///
/// # Arguments / 参数
/// * `report` - The formatted report of one bundle
///              单个结果包的格式化报告
/// * `show_passed_tests` - Whether passed tests are listed individually
///                         是否逐个列出通过的测试
/// * `locale` - The language locale to use for messages
///              用于消息的语言区域设置
///
/// # Output Format / 输出格式
/// ```text
/// --- Test Summary: Test Results ---
///   - Failed             | LoginTests/testLogout()                  |      0.42s
///   - Passed             | LoginTests/testLogin()                   |      1.23s (2 retries)
/// Total: 2  Passed: 1  Failed: 1  Skipped: 0  Expected Failure: 0  Retries: 2
/// ```
pub fn print_summary(report: &Report, show_passed_tests: bool, locale: &str) {
    println!(
        "\n{}",
        t!("summary.banner", locale = locale, title = &report.title).bold()
    );

    for record in report
        .records
        .iter()
        .filter(|r| show_passed_tests || r.final_outcome != TestOutcome::Passed)
    {
        let retries_str = if record.was_retried() {
            format!(
                " {}",
                t!("summary.retries", locale = locale, count = record.retry_count)
            )
        } else {
            String::new()
        };

        println!(
            "  - {:<18} | {:<40} | {:>10}{}",
            colored_status(record, locale),
            record.test_identifier,
            format_duration(record),
            retries_str.yellow()
        );

        if let Some(detail) = record.surfaced_failure_detail() {
            for line in detail.lines() {
                println!("      {}", line.dimmed());
            }
        }
    }

    let counts = &report.counts;
    println!(
        "{}",
        t!(
            "summary.counts",
            locale = locale,
            total = counts.total_tests,
            passed = counts.passed_count,
            failed = counts.failed_count,
            skipped = counts.skipped_count,
            expected = counts.expected_failure_count,
            retries = counts.total_retries
        )
    );

    match report.test_status {
        TestStatus::Success => println!("{}", t!("summary.status_success", locale = locale).green().bold()),
        TestStatus::Failure => println!("{}", t!("summary.status_failure", locale = locale).red().bold()),
    }
}
