//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures that flow through the consolidation
//! pipeline: raw attempts read from a bundle, attempt groups, consolidated
//! per-test records and the aggregate counts surfaced in the report.
//!
//! 此模块定义在合并流水线中流转的数据结构：
//! 从结果包读取的原始尝试、尝试分组、合并后的单测试记录以及报告中的汇总计数。

use crate::infra::t;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The outcome of a single attempt, or the consolidated outcome of a test.
/// 单次尝试的结果，或一个测试合并后的最终结果。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestOutcome {
    /// The attempt passed.
    /// 尝试通过。
    Passed,
    /// The attempt failed.
    /// 尝试失败。
    Failed,
    /// The attempt was skipped.
    /// 尝试被跳过。
    Skipped,
    /// The attempt failed in a way the test explicitly anticipated.
    /// 尝试以测试明确预期的方式失败。
    ExpectedFailure,
}

impl TestOutcome {
    /// Parses a result string as written in the bundle's test document
    /// (`"Passed"`, `"Failed"`, `"Skipped"`, `"Expected Failure"`).
    ///
    /// Comparison ignores case, spaces, dashes and underscores.
    pub fn from_result_str(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "passed" | "success" => Some(TestOutcome::Passed),
            "failed" | "failure" => Some(TestOutcome::Failed),
            "skipped" => Some(TestOutcome::Skipped),
            "expectedfailure" => Some(TestOutcome::ExpectedFailure),
            _ => None,
        }
    }

    /// The English label used in the rendered report.
    pub fn label(&self) -> &'static str {
        match self {
            TestOutcome::Passed => "Passed",
            TestOutcome::Failed => "Failed",
            TestOutcome::Skipped => "Skipped",
            TestOutcome::ExpectedFailure => "Expected Failure",
        }
    }

    /// The icon prefixed to the label in the rendered report.
    pub fn icon(&self) -> &'static str {
        match self {
            TestOutcome::Passed => "✅",
            TestOutcome::Failed => "❌",
            TestOutcome::Skipped => "⏭️",
            TestOutcome::ExpectedFailure => "🔕",
        }
    }

    /// Gets the appropriate CSS class for the HTML report.
    pub fn status_class(&self) -> &'static str {
        match self {
            TestOutcome::Passed => "status-Passed",
            TestOutcome::Failed => "status-Failed",
            TestOutcome::Skipped => "status-Skipped",
            TestOutcome::ExpectedFailure => "status-Expected-Failure",
        }
    }

    /// Gets the localized status string for console output.
    /// 获取用于控制台输出的本地化状态字符串。
    pub fn localized(&self, locale: &str) -> String {
        match self {
            TestOutcome::Passed => t!("status.passed", locale = locale).to_string(),
            TestOutcome::Failed => t!("status.failed", locale = locale).to_string(),
            TestOutcome::Skipped => t!("status.skipped", locale = locale).to_string(),
            TestOutcome::ExpectedFailure => {
                t!("status.expected_failure", locale = locale).to_string()
            }
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One observed attempt of one test, as flattened out of the bundle tree.
/// 从结果包测试树展开得到的某个测试的一次尝试。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExecutionRecord {
    /// Suite path and test name, e.g. `LoginTests/testLogin()`.
    pub test_identifier: String,
    /// 0-based position among the attempts of the same identifier.
    pub attempt_index: usize,
    /// Outcome of this attempt.
    pub outcome: TestOutcome,
    /// Diagnostic text. Only present when `outcome` is `Failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_detail: Option<String>,
    /// Wall time of this attempt, when the bundle recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
}

impl RawExecutionRecord {
    /// Creates a record without failure detail or duration.
    pub fn new(test_identifier: impl Into<String>, attempt_index: usize, outcome: TestOutcome) -> Self {
        Self {
            test_identifier: test_identifier.into(),
            attempt_index,
            outcome,
            failure_detail: None,
            duration: None,
        }
    }

    /// Attaches failure detail. Ignored unless the outcome is `Failed`.
    pub fn with_failure_detail(mut self, detail: impl Into<String>) -> Self {
        if self.outcome == TestOutcome::Failed {
            self.failure_detail = Some(detail.into());
        }
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// All attempts sharing one test identifier, in execution order.
/// 共享同一测试标识符的所有尝试，按执行顺序排列。
///
/// Groups built by [`group_attempts`](crate::core::grouping::group_attempts)
/// always hold at least one attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptGroup {
    pub test_identifier: String,
    pub attempts: Vec<RawExecutionRecord>,
}

/// The per-test result surfaced in the report.
/// 报告中展示的单个测试的合并结果。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedTestRecord {
    pub test_identifier: String,
    pub final_outcome: TestOutcome,
    /// Number of attempts beyond the first.
    pub retry_count: usize,
    /// Detail of the last failing attempt, kept even when a retry rescued the test.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_failure_detail: Option<String>,
    /// Sum of the attempt durations the bundle recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
}

impl ConsolidatedTestRecord {
    /// The suite path part of the identifier, or `""` for a bare test name.
    pub fn suite(&self) -> &str {
        self.test_identifier
            .rsplit_once('/')
            .map(|(suite, _)| suite)
            .unwrap_or("")
    }

    /// Failure detail as shown in the report: only for tests that ended up failing.
    pub fn surfaced_failure_detail(&self) -> Option<&str> {
        match self.final_outcome {
            TestOutcome::Failed => self.last_failure_detail.as_deref(),
            _ => None,
        }
    }

    pub fn was_retried(&self) -> bool {
        self.retry_count > 0
    }
}

/// Summary counts over the consolidated records of one bundle.
/// 一个结果包所有合并记录的汇总计数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateCounts {
    /// Number of distinct test identifiers, never the number of attempts.
    pub total_tests: usize,
    pub passed_count: usize,
    pub failed_count: usize,
    pub skipped_count: usize,
    pub expected_failure_count: usize,
    /// Sum of `retry_count` over all consolidated records.
    pub total_retries: usize,
}

impl AggregateCounts {
    /// Overall status: failure if and only if any test consolidated to `Failed`.
    pub fn status(&self) -> TestStatus {
        if self.failed_count == 0 {
            TestStatus::Success
        } else {
            TestStatus::Failure
        }
    }
}

/// Overall run status surfaced to the caller.
/// 返回给调用方的整体运行状态。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Success,
    Failure,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Success => "success",
            TestStatus::Failure => "failure",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Success)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_strings_are_parsed_loosely() {
        assert_eq!(TestOutcome::from_result_str("Passed"), Some(TestOutcome::Passed));
        assert_eq!(TestOutcome::from_result_str("failure"), Some(TestOutcome::Failed));
        assert_eq!(
            TestOutcome::from_result_str("Expected Failure"),
            Some(TestOutcome::ExpectedFailure)
        );
        assert_eq!(
            TestOutcome::from_result_str("expected_failure"),
            Some(TestOutcome::ExpectedFailure)
        );
        assert_eq!(TestOutcome::from_result_str("Exploded"), None);
    }

    #[test]
    fn test_suite_is_everything_before_the_last_slash() {
        let mut record = ConsolidatedTestRecord {
            test_identifier: "Bundle/Suite/testA()".to_string(),
            final_outcome: TestOutcome::Passed,
            retry_count: 0,
            last_failure_detail: Some("boom".to_string()),
            duration: None,
        };
        assert_eq!(record.suite(), "Bundle/Suite");
        assert_eq!(record.surfaced_failure_detail(), None);

        record.test_identifier = "testA()".to_string();
        record.final_outcome = TestOutcome::Failed;
        assert_eq!(record.suite(), "");
        assert_eq!(record.surfaced_failure_detail(), Some("boom"));
    }

    #[test]
    fn test_failure_detail_is_only_attached_to_failed_attempts() {
        let passed = RawExecutionRecord::new("Suite/testA()", 0, TestOutcome::Passed)
            .with_failure_detail("ignored");
        assert_eq!(passed.failure_detail, None);

        let failed = RawExecutionRecord::new("Suite/testA()", 1, TestOutcome::Failed)
            .with_failure_detail("kept");
        assert_eq!(failed.failure_detail.as_deref(), Some("kept"));
    }

    #[test]
    fn test_status_follows_failed_count() {
        let mut counts = AggregateCounts {
            total_tests: 2,
            passed_count: 1,
            skipped_count: 1,
            ..AggregateCounts::default()
        };
        assert_eq!(counts.status(), TestStatus::Success);

        counts.skipped_count = 0;
        counts.failed_count = 1;
        assert_eq!(counts.status(), TestStatus::Failure);
        assert_eq!(counts.status().to_string(), "failure");
    }
}
