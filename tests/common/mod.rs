// Shared test helpers for integration tests
#![allow(dead_code)]

use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SUMMARY_CELL: &str = r#"<td align="right" width="118px">"#;

/// Path to a bundle under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Writes `document` as the `tests.json` of a new bundle directory inside `temp_dir`.
pub fn write_bundle(temp_dir: &TempDir, name: &str, document: &Value) -> PathBuf {
    let bundle = temp_dir.path().join(name);
    fs::create_dir_all(&bundle).expect("Failed to create bundle directory");
    fs::write(
        bundle.join("tests.json"),
        serde_json::to_string_pretty(document).unwrap(),
    )
    .expect("Failed to write tests.json");
    bundle
}

/// A test case node with a single result and no repetitions.
pub fn test_case(name: &str, result: &str) -> Value {
    serde_json::json!({ "nodeType": "Test Case", "name": name, "result": result })
}

/// A test case node whose attempts are recorded as repetitions.
pub fn retried_case(name: &str, results: &[&str]) -> Value {
    let repetitions: Vec<Value> = results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            serde_json::json!({
                "nodeType": "Repetition",
                "name": format!("Retry {}", i + 1),
                "result": result,
                "children": [ { "nodeType": "Failure Message", "name": format!("attempt {} of {}", i + 1, name) } ]
            })
        })
        .collect();
    let last = results.last().copied().unwrap_or("Passed");
    serde_json::json!({ "nodeType": "Test Case", "name": name, "result": last, "children": repetitions })
}

/// A node of any other type, e.g. a target, device or run wrapper.
pub fn wrapper(node_type: &str, name: &str, children: Vec<Value>) -> Value {
    serde_json::json!({ "nodeType": node_type, "name": name, "children": children })
}

pub fn suite(name: &str, children: Vec<Value>) -> Value {
    serde_json::json!({ "nodeType": "Test Suite", "name": name, "children": children })
}

pub fn document(nodes: Vec<Value>) -> Value {
    serde_json::json!({ "testNodes": nodes })
}

/// Extracts the six numbers of the summary row, left to right, the way a CI
/// check scraping the table would.
pub fn summary_counts(summary: &str) -> Vec<usize> {
    summary
        .split(SUMMARY_CELL)
        .skip(1)
        .map(|cell| {
            let raw = cell.split("</td>").next().unwrap_or_default();
            raw.replace("<b>", "")
                .replace("</b>", "")
                .trim()
                .parse()
                .expect("summary cell is not a number")
        })
        .collect()
}
