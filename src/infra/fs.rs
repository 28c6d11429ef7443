//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides the file system helpers used by the command-line
//! front end: expanding user-supplied paths and writing report artifacts.
//!
//! 此模块提供命令行前端使用的文件系统辅助功能：
//! 展开用户提供的路径以及写入报告产物。

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable naming the job summary file on CI runners.
pub const STEP_SUMMARY_ENV: &str = "GITHUB_STEP_SUMMARY";

/// Expands `~` and environment variables in a user-supplied path.
///
/// # Arguments
/// * `raw` - The path as typed on the command line or in the config file
///
/// # Returns
/// The expanded path, or an error if a referenced variable is undefined
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).with_context(|| format!("Failed to expand path: {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Writes a report artifact, creating parent directories as needed.
///
/// # Arguments
/// * `path` - Destination file
/// * `content` - Full file content
pub fn write_report(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write report: {}", path.display()))
}

/// Appends content to the file named by `$GITHUB_STEP_SUMMARY`.
///
/// # Returns
/// The path written to, or `None` when the variable is unset or empty
pub fn append_step_summary(content: &str) -> Result<Option<PathBuf>> {
    let Some(path) = std::env::var_os(STEP_SUMMARY_ENV).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let path = PathBuf::from(path);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open step summary: {}", path.display()))?;
    writeln!(file, "{content}")
        .with_context(|| format!("Failed to append step summary: {}", path.display()))?;

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_plain_path_is_unchanged() {
        assert_eq!(
            expand_path("reports/Run.xcresult").unwrap(),
            PathBuf::from("reports/Run.xcresult")
        );
    }

    #[test]
    fn test_expand_undefined_variable_fails() {
        assert!(expand_path("$XCRESULT_REPORT_SURELY_UNDEFINED_VAR/x").is_err());
    }

    #[test]
    fn test_write_report_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/out/report.md");

        write_report(&target, "hello").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "hello");
    }
}
