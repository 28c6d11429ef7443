//! # Bundle Reader / 结果包读取器
//!
//! Reads a test-result bundle from disk and flattens its nested test tree into
//! [`RawExecutionRecord`]s. This is the only place that knows about the tree
//! shape; everything downstream works on flat records.
//!
//! 从磁盘读取测试结果包，并将其嵌套的测试树展开为扁平的执行记录。
//!
//! A bundle is a directory holding a `tests.json` document, or the document
//! itself:
//!
//! ```json
//! { "testNodes": [ { "nodeType": "Test Suite", "name": "LoginTests", "children": [
//!     { "nodeType": "Test Case", "name": "testLogin()", "result": "Passed", "children": [
//!         { "nodeType": "Repetition", "name": "Retry 1", "result": "Failed" },
//!         { "nodeType": "Repetition", "name": "Retry 2", "result": "Passed" } ] } ] } ] }
//! ```

use crate::core::error::FormatError;
use crate::core::models::{RawExecutionRecord, TestOutcome};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the test document inside a bundle directory.
pub const TESTS_DOCUMENT: &str = "tests.json";

/// The decoded test document of a bundle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestTree {
    /// Optional report title recorded by the platform.
    #[serde(default)]
    pub title: Option<String>,
    /// Devices the tests ran on.
    #[serde(default)]
    pub devices: Vec<Device>,
    /// Root nodes of the test hierarchy.
    #[serde(default)]
    pub test_nodes: Vec<TestNode>,
}

/// A run destination listed in the test document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_name: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub os_version: Option<String>,
}

/// One node of the test hierarchy. Containers (plans, bundles, suites) hold
/// children; test cases hold their repetitions and failure messages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestNode {
    pub node_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub node_identifier: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub children: Vec<TestNode>,
}

/// Node kinds the flattener cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    TestSuite,
    TestCase,
    Repetition,
    FailureMessage,
    /// Plans, bundles, configurations, devices: containers that do not
    /// contribute to the suite path.
    Container,
    /// Any node type not listed above. Walked like a container, so a test
    /// case is never lost behind a wrapper this reader does not know.
    Other,
}

impl TestNode {
    pub fn kind(&self) -> NodeKind {
        match self.node_type.as_str() {
            "Test Suite" => NodeKind::TestSuite,
            "Test Case" => NodeKind::TestCase,
            "Repetition" => NodeKind::Repetition,
            "Failure Message" => NodeKind::FailureMessage,
            "Test Plan" | "Test Plan Configuration" | "Unit test bundle" | "UI test bundle"
            | "Device" => NodeKind::Container,
            _ => NodeKind::Other,
        }
    }

    /// Failure messages recorded for this attempt, looking through
    /// intermediate nodes but not into nested repetitions or test cases.
    fn failure_messages(&self) -> Option<String> {
        let mut messages = Vec::new();
        self.collect_failure_messages(&mut messages);

        if messages.is_empty() {
            None
        } else {
            Some(messages.join("\n"))
        }
    }

    fn collect_failure_messages<'a>(&'a self, messages: &mut Vec<&'a str>) {
        for child in &self.children {
            match child.kind() {
                NodeKind::FailureMessage => messages.push(child.name.as_str()),
                NodeKind::Repetition | NodeKind::TestCase => {}
                _ => child.collect_failure_messages(messages),
            }
        }
    }

    /// Repetitions of a test case, whether they sit directly below it or
    /// behind run, device or argument nodes.
    fn repetitions(&self) -> Vec<&TestNode> {
        let mut repetitions = Vec::new();
        self.collect_repetitions(&mut repetitions);
        repetitions
    }

    fn collect_repetitions<'a>(&'a self, repetitions: &mut Vec<&'a TestNode>) {
        for child in &self.children {
            match child.kind() {
                NodeKind::Repetition => repetitions.push(child),
                NodeKind::TestCase | NodeKind::FailureMessage => {}
                _ => child.collect_repetitions(repetitions),
            }
        }
    }
}

/// Resolves and decodes the test document of a bundle.
///
/// # Errors
/// - [`FormatError::BundleNotFound`] if the path does not exist, or is a
///   directory without a test document
/// - [`FormatError::MalformedBundle`] if the document is not valid
/// - [`FormatError::Io`] for any other read failure
pub async fn read_bundle(path: &Path) -> Result<TestTree, FormatError> {
    let document = resolve_document(path).await?;

    let content = match tokio::fs::read_to_string(&document).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(FormatError::BundleNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(FormatError::Io {
                path: document,
                source,
            });
        }
    };

    serde_json::from_str(&content).map_err(|e| FormatError::malformed_at(&document, e.to_string()))
}

async fn resolve_document(path: &Path) -> Result<PathBuf, FormatError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(path.join(TESTS_DOCUMENT)),
        Ok(_) => Ok(path.to_path_buf()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(FormatError::BundleNotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(FormatError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Flattens the tree into one record per attempt, in bundle order.
///
/// A test case with `Repetition` descendants contributes one attempt per
/// repetition; otherwise it contributes a single attempt from its own result.
/// Node types this reader does not recognize are walked like containers.
/// A test case that occurs several times contributes further attempts, so
/// `attempt_index` counts across all occurrences of an identifier.
pub fn flatten_tree(tree: &TestTree) -> Result<Vec<RawExecutionRecord>, FormatError> {
    let mut flattener = Flattener::default();
    for node in &tree.test_nodes {
        flattener.visit(node)?;
    }
    Ok(flattener.records)
}

#[derive(Default)]
struct Flattener<'a> {
    suite_path: Vec<&'a str>,
    next_attempt: HashMap<String, usize>,
    records: Vec<RawExecutionRecord>,
}

impl<'a> Flattener<'a> {
    fn visit(&mut self, node: &'a TestNode) -> Result<(), FormatError> {
        match node.kind() {
            NodeKind::TestCase => self.emit_test_case(node),
            NodeKind::TestSuite => {
                self.suite_path.push(&node.name);
                let result = node.children.iter().try_for_each(|child| self.visit(child));
                self.suite_path.pop();
                result
            }
            NodeKind::Container | NodeKind::Other => {
                node.children.iter().try_for_each(|child| self.visit(child))
            }
            NodeKind::Repetition | NodeKind::FailureMessage => Ok(()),
        }
    }

    fn identifier_for(&self, node: &TestNode) -> Result<String, FormatError> {
        if let Some(id) = node.node_identifier.as_deref().filter(|id| !id.is_empty()) {
            return Ok(id.to_string());
        }
        if node.name.is_empty() {
            return Err(FormatError::malformed(format!(
                "test case without name or identifier under '{}'",
                self.suite_path.join("/")
            )));
        }
        if self.suite_path.is_empty() {
            Ok(node.name.clone())
        } else {
            Ok(format!("{}/{}", self.suite_path.join("/"), node.name))
        }
    }

    fn emit_test_case(&mut self, node: &TestNode) -> Result<(), FormatError> {
        let identifier = self.identifier_for(node)?;

        let repetitions = node.repetitions();

        if repetitions.is_empty() {
            self.push_attempt(&identifier, node)
        } else {
            repetitions
                .into_iter()
                .try_for_each(|repetition| self.push_attempt(&identifier, repetition))
        }
    }

    fn push_attempt(&mut self, identifier: &str, node: &TestNode) -> Result<(), FormatError> {
        let raw_result = node.result.as_deref().ok_or_else(|| {
            FormatError::malformed(format!("test '{}' has an attempt without a result", identifier))
        })?;
        let outcome = TestOutcome::from_result_str(raw_result).ok_or_else(|| {
            FormatError::malformed(format!(
                "test '{}' has an unknown result '{}'",
                identifier, raw_result
            ))
        })?;

        let counter = self.next_attempt.entry(identifier.to_string()).or_insert(0);
        let mut record = RawExecutionRecord::new(identifier, *counter, outcome);
        *counter += 1;

        if let Some(detail) = node.failure_messages() {
            record = record.with_failure_detail(detail);
        }
        if let Some(duration) = node.duration.as_deref().and_then(parse_duration) {
            record = record.with_duration(duration);
        }

        self.records.push(record);
        Ok(())
    }
}

/// Parses durations as the platform writes them: `"1.2s"`, `"350ms"`,
/// `"2m 3s"`, `"1h 2m"`, or a bare number of seconds.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    const NANOS_PER_SEC: f64 = 1e9;

    let mut total_nanos = 0.0_f64;
    let mut seen = false;

    for token in raw.split_whitespace() {
        let (number, scale) = if let Some(n) = token.strip_suffix("ms") {
            (n, NANOS_PER_SEC / 1000.0)
        } else if let Some(n) = token.strip_suffix('s') {
            (n, NANOS_PER_SEC)
        } else if let Some(n) = token.strip_suffix('m') {
            (n, 60.0 * NANOS_PER_SEC)
        } else if let Some(n) = token.strip_suffix('h') {
            (n, 3600.0 * NANOS_PER_SEC)
        } else {
            (token, NANOS_PER_SEC)
        };

        let value: f64 = number.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        total_nanos += value * scale;
        seen = true;
    }

    seen.then(|| Duration::from_nanos(total_nanos.round() as u64))
}
