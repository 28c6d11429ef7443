use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

mod common;
use common::{fixture, summary_counts};

/// Builds the binary command with a fixed language and no CI step summary,
/// so the results do not depend on the machine running the tests.
fn xcresult_report() -> Command {
    let mut cmd = Command::cargo_bin("xcresult-report").unwrap();
    cmd.env_remove("GITHUB_STEP_SUMMARY").arg("--lang").arg("en");
    cmd
}

/// A bundle whose only failure was rescued by a retry formats successfully
/// and prints the Markdown report, Retries column included, on stdout.
///
/// 仅有一次失败且被重试挽救的结果包应当成功格式化，并在标准输出中打印包含
/// Retries 列的 Markdown 报告。
#[test]
fn test_report_to_stdout() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = xcresult_report();
    cmd.current_dir(temp_dir.path())
        .arg("report")
        .arg(fixture("RetryExample.xcresult"));

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();

    assert!(stdout.contains("🔄&nbsp;Retries"));
    assert!(stdout.contains("### Test Details"));
    assert_eq!(summary_counts(&stdout), vec![8, 8, 0, 0, 0, 1]);
    assert!(!stdout.contains("ALL TESTS PASSED"));
}

/// A bundle with a test that failed on every attempt exits with a failure code.
///
/// 某个测试在所有尝试中均失败时，命令应以失败退出码结束。
#[test]
fn test_failing_bundle_exits_with_failure() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = xcresult_report();
    cmd.current_dir(temp_dir.path())
        .arg("report")
        .arg(fixture("Failing.xcresult"));

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("card &lt;declined&gt;"))
        .stderr(predicate::str::contains("reported test failures"));
}

#[test]
fn test_missing_bundle_is_reported() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = xcresult_report();
    cmd.current_dir(temp_dir.path())
        .arg("report")
        .arg("Missing.xcresult");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to process bundle"))
        .stderr(predicate::str::contains("Missing.xcresult"));
}

/// With `--output` the report goes to the file and stdout carries the
/// console summary instead.
///
/// 指定 `--output` 时报告写入文件，标准输出显示控制台摘要。
#[test]
fn test_report_to_output_file() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out/report.md");
    let mut cmd = xcresult_report();
    cmd.current_dir(temp_dir.path())
        .arg("report")
        .arg(fixture("RetryExample.xcresult"))
        .arg("--output")
        .arg(&output);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Report written to"))
        .stdout(predicate::str::contains("ALL TESTS PASSED"));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("### RetryExample\n"));
    assert!(written.contains("🔄&nbsp;Retries"));
}

#[test]
fn test_quiet_suppresses_console_summary() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("report.md");
    let mut cmd = xcresult_report();
    cmd.current_dir(temp_dir.path())
        .arg("report")
        .arg(fixture("NoRetries.xcresult"))
        .arg("--output")
        .arg(&output)
        .arg("--quiet");

    cmd.assert().success().stdout(predicate::str::is_empty());
    assert!(output.is_file());
}

#[test]
fn test_html_and_json_artifacts() {
    let temp_dir = tempdir().unwrap();
    let html = temp_dir.path().join("report.html");
    let json = temp_dir.path().join("report.json");
    let mut cmd = xcresult_report();
    cmd.current_dir(temp_dir.path())
        .arg("report")
        .arg(fixture("RetryExample.xcresult"))
        .arg(fixture("NoRetries.xcresult"))
        .arg("--html")
        .arg(&html)
        .arg("--json")
        .arg(&json);

    cmd.assert().success();

    let page = fs::read_to_string(&html).unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("RetryExample"));

    let results: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    let reports = results.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["testStatus"], "success");
    assert_eq!(reports[0]["counts"]["totalRetries"], 1);
    assert_eq!(reports[1]["counts"]["totalTests"], 5);
}

#[test]
fn test_step_summary_is_appended() {
    let temp_dir = tempdir().unwrap();
    let step_summary = temp_dir.path().join("step_summary.md");
    fs::write(&step_summary, "existing\n").unwrap();

    let mut cmd = xcresult_report();
    cmd.current_dir(temp_dir.path())
        .env("GITHUB_STEP_SUMMARY", &step_summary)
        .arg("report")
        .arg(fixture("RetryExample.xcresult"));

    cmd.assert().success();

    let content = fs::read_to_string(&step_summary).unwrap();
    assert!(content.starts_with("existing\n"));
    assert!(content.contains("🔄&nbsp;Retries"));
    assert!(!content.contains("### Test Details"));
}

/// Settings from the config file in the working directory apply, and
/// command-line flags switch further options on.
///
/// 工作目录中的配置文件生效，命令行参数可以额外开启选项。
#[test]
fn test_config_file_is_applied() {
    let temp_dir = tempdir().unwrap();
    fs::write(
        temp_dir.path().join("xcresult-report.toml"),
        "title = \"Nightly\"\nshow_passed_tests = true\n",
    )
    .unwrap();

    let mut cmd = xcresult_report();
    cmd.current_dir(temp_dir.path())
        .arg("report")
        .arg(fixture("RetryExample.xcresult"))
        .arg("--show-code-coverage");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("### Nightly"))
        .stdout(predicate::str::contains("NetworkTests/testUpload()"))
        .stdout(predicate::str::contains("#### Code Coverage"));
}

#[test]
fn test_invalid_config_file_fails() {
    let temp_dir = tempdir().unwrap();
    let config = temp_dir.path().join("broken.toml");
    fs::write(&config, "show_passed_tests = \"sometimes\"").unwrap();

    let mut cmd = xcresult_report();
    cmd.current_dir(temp_dir.path())
        .arg("report")
        .arg(fixture("RetryExample.xcresult"))
        .arg("--config")
        .arg(&config);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_init_writes_default_config() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = xcresult_report();
    cmd.current_dir(temp_dir.path())
        .arg("init")
        .arg("--non-interactive");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Configuration written to"));

    let content = fs::read_to_string(temp_dir.path().join("xcresult-report.toml")).unwrap();
    assert!(content.contains("show_passed_tests = false"));
}

#[test]
fn test_init_refuses_to_overwrite_without_force() {
    let temp_dir = tempdir().unwrap();
    let config = temp_dir.path().join("custom.toml");
    fs::write(&config, "language = \"zh-CN\"\n").unwrap();

    let mut cmd = xcresult_report();
    cmd.current_dir(temp_dir.path())
        .arg("init")
        .arg("--non-interactive")
        .arg("--output")
        .arg(&config);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&config).unwrap(), "language = \"zh-CN\"\n");

    let mut cmd = xcresult_report();
    cmd.current_dir(temp_dir.path())
        .arg("init")
        .arg("--non-interactive")
        .arg("--force")
        .arg("--output")
        .arg(&config);
    cmd.assert().success();
    assert!(fs::read_to_string(&config).unwrap().contains("language = \"en\""));
}

#[test]
fn test_report_requires_a_bundle() {
    let mut cmd = xcresult_report();
    cmd.arg("report");
    cmd.assert().failure();
}
