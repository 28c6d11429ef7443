//! # Attempt Grouper / 尝试分组器
//!
//! Partitions raw execution records into one group per logical test.
//!
//! 将原始执行记录按逻辑测试划分为分组。

use crate::core::models::{AttemptGroup, RawExecutionRecord};
use std::collections::HashMap;

/// Groups records by their exact `test_identifier`.
///
/// Groups come back in order of first appearance. Within a group, attempts
/// are ordered by `attempt_index`; records sharing an index keep arrival order.
/// Identifiers are compared verbatim, with no normalization.
pub fn group_attempts(records: impl IntoIterator<Item = RawExecutionRecord>) -> Vec<AttemptGroup> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<AttemptGroup> = Vec::new();

    for record in records {
        match positions.get(&record.test_identifier) {
            Some(&pos) => groups[pos].attempts.push(record),
            None => {
                positions.insert(record.test_identifier.clone(), groups.len());
                groups.push(AttemptGroup {
                    test_identifier: record.test_identifier.clone(),
                    attempts: vec![record],
                });
            }
        }
    }

    for group in &mut groups {
        group.attempts.sort_by_key(|attempt| attempt.attempt_index);
    }

    groups
}
