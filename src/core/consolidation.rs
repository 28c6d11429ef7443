//! # Status Consolidator / 状态合并器
//!
//! Reduces the attempts of one logical test to a single reported outcome.
//!
//! 将同一逻辑测试的多次尝试归约为一个最终结果。
//!
//! Precedence, highest first:
//!
//! 1. any attempt passed: `Passed` (a retry that eventually succeeds is a pass)
//! 2. any attempt was an expected failure: `ExpectedFailure`
//! 3. any attempt failed: `Failed`
//! 4. otherwise every attempt was skipped: `Skipped`

use crate::core::error::FormatError;
use crate::core::models::{AttemptGroup, ConsolidatedTestRecord, TestOutcome};
use std::time::Duration;

/// Consolidates one attempt group.
/// 合并一个尝试分组。
///
/// # Errors
/// Returns [`FormatError::MalformedBundle`] for a group with no attempts.
pub fn consolidate(group: &AttemptGroup) -> Result<ConsolidatedTestRecord, FormatError> {
    if group.attempts.is_empty() {
        return Err(FormatError::malformed(format!(
            "test '{}' has an empty attempt group",
            group.test_identifier
        )));
    }

    let has = |outcome: TestOutcome| group.attempts.iter().any(|a| a.outcome == outcome);

    let final_outcome = if has(TestOutcome::Passed) {
        TestOutcome::Passed
    } else if has(TestOutcome::ExpectedFailure) {
        TestOutcome::ExpectedFailure
    } else if has(TestOutcome::Failed) {
        TestOutcome::Failed
    } else {
        TestOutcome::Skipped
    };

    let last_failure_detail = group
        .attempts
        .iter()
        .rev()
        .find(|a| a.outcome == TestOutcome::Failed)
        .and_then(|a| a.failure_detail.clone());

    let duration = group
        .attempts
        .iter()
        .filter_map(|a| a.duration)
        .fold(None, |acc: Option<Duration>, d| Some(acc.unwrap_or_default() + d));

    Ok(ConsolidatedTestRecord {
        test_identifier: group.test_identifier.clone(),
        final_outcome,
        retry_count: group.attempts.len() - 1,
        last_failure_detail,
        duration,
    })
}

/// Consolidates every group, failing the whole batch on the first malformed one.
pub fn consolidate_all(groups: &[AttemptGroup]) -> Result<Vec<ConsolidatedTestRecord>, FormatError> {
    groups.iter().map(consolidate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::RawExecutionRecord;

    fn group(outcomes: &[TestOutcome]) -> AttemptGroup {
        AttemptGroup {
            test_identifier: "Suite/testExample()".to_string(),
            attempts: outcomes
                .iter()
                .enumerate()
                .map(|(i, o)| {
                    RawExecutionRecord::new("Suite/testExample()", i, *o)
                        .with_failure_detail(format!("failure #{}", i))
                })
                .collect(),
        }
    }

    #[test]
    fn test_retry_rescue_reports_passed() {
        let record = consolidate(&group(&[
            TestOutcome::Failed,
            TestOutcome::Failed,
            TestOutcome::Passed,
        ]))
        .unwrap();

        assert_eq!(record.final_outcome, TestOutcome::Passed);
        assert_eq!(record.retry_count, 2);
        assert_eq!(record.last_failure_detail.as_deref(), Some("failure #1"));
        assert_eq!(record.surfaced_failure_detail(), None);
    }

    #[test]
    fn test_single_attempt_keeps_its_outcome() {
        for outcome in [
            TestOutcome::Passed,
            TestOutcome::Failed,
            TestOutcome::Skipped,
            TestOutcome::ExpectedFailure,
        ] {
            let record = consolidate(&group(&[outcome])).unwrap();
            assert_eq!(record.final_outcome, outcome);
            assert_eq!(record.retry_count, 0);
        }
    }

    #[test]
    fn test_pass_wins_regardless_of_position() {
        let record = consolidate(&group(&[TestOutcome::Passed, TestOutcome::Failed])).unwrap();
        assert_eq!(record.final_outcome, TestOutcome::Passed);
    }

    #[test]
    fn test_expected_failure_beats_failed() {
        let record =
            consolidate(&group(&[TestOutcome::Failed, TestOutcome::ExpectedFailure])).unwrap();
        assert_eq!(record.final_outcome, TestOutcome::ExpectedFailure);
    }

    #[test]
    fn test_failed_beats_skipped() {
        let record = consolidate(&group(&[TestOutcome::Skipped, TestOutcome::Failed])).unwrap();
        assert_eq!(record.final_outcome, TestOutcome::Failed);
        assert_eq!(record.surfaced_failure_detail(), Some("failure #1"));
    }

    #[test]
    fn test_all_skipped_is_skipped() {
        let record = consolidate(&group(&[TestOutcome::Skipped, TestOutcome::Skipped])).unwrap();
        assert_eq!(record.final_outcome, TestOutcome::Skipped);
        assert_eq!(record.retry_count, 1);
        assert_eq!(record.last_failure_detail, None);
    }

    #[test]
    fn test_empty_group_is_malformed() {
        let err = consolidate(&group(&[])).unwrap_err();
        assert!(matches!(err, FormatError::MalformedBundle { .. }));
    }

    #[test]
    fn test_durations_are_summed() {
        let mut g = group(&[TestOutcome::Failed, TestOutcome::Passed]);
        g.attempts[0].duration = Some(Duration::from_millis(300));
        g.attempts[1].duration = Some(Duration::from_millis(200));

        let record = consolidate(&g).unwrap();
        assert_eq!(record.duration, Some(Duration::from_millis(500)));
        assert_eq!(consolidate(&group(&[TestOutcome::Passed])).unwrap().duration, None);
    }
}
