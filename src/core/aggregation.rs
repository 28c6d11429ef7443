//! # Aggregator / 聚合器
//!
//! Walks consolidated records once and produces the counts the report surfaces.
//!
//! 遍历合并后的记录一次，生成报告中展示的各项计数。

use crate::core::models::{AggregateCounts, ConsolidatedTestRecord, TestOutcome};

/// Accumulates outcome counters and retries over the consolidated records.
///
/// `total_tests` is the number of records, i.e. the number of distinct test
/// identifiers, so retried attempts never inflate it.
pub fn aggregate(records: &[ConsolidatedTestRecord]) -> AggregateCounts {
    let mut counts = AggregateCounts {
        total_tests: records.len(),
        ..AggregateCounts::default()
    };

    for record in records {
        match record.final_outcome {
            TestOutcome::Passed => counts.passed_count += 1,
            TestOutcome::Failed => counts.failed_count += 1,
            TestOutcome::Skipped => counts.skipped_count += 1,
            TestOutcome::ExpectedFailure => counts.expected_failure_count += 1,
        }
        counts.total_retries += record.retry_count;
    }

    counts
}
