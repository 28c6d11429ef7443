//! # Report Command Module / 报告命令模块
//!
//! This module implements the `report` command, which formats one or more
//! test-result bundles and writes the resulting artifacts.
//!
//! 此模块实现 `report` 命令，
//! 格式化一个或多个测试结果包并写出生成的产物。

use anyhow::{Context, Result};
use colored::*;
use futures::{StreamExt, stream};
use std::{fs, path::Path, path::PathBuf};

use crate::{
    core::{
        config::{DEFAULT_CONFIG_FILE, FormatOptions, ReportConfig},
        error::FormatError,
        formatter::{Report, format_bundle},
    },
    infra::{fs as report_fs, t},
    reporting::{console::print_summary, html::generate_html_report},
};

/// Arguments of the `report` command, as parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct ReportArgs {
    pub bundles: Vec<String>,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub html: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub show_passed_tests: bool,
    pub show_code_coverage: bool,
    pub title: Option<String>,
    pub quiet: bool,
    /// Language given with `--lang`, which wins over the config file.
    pub lang: Option<String>,
}

/// Executes the report command.
///
/// The Markdown report goes to `--output` when given, otherwise to stdout.
/// The console summary is only printed alongside an `--output` file so that
/// stdout stays a clean Markdown document.
///
/// # Returns
/// An error if any bundle could not be processed or any bundle's status is failure
pub async fn execute(args: ReportArgs) -> Result<()> {
    let loaded = load_config(args.config.as_deref())?;
    let locale = match (&args.lang, &loaded) {
        (Some(lang), _) => crate::resolve_locale(lang).to_string(),
        (None, Some((config, _))) => crate::resolve_locale(&config.language).to_string(),
        (None, None) => {
            let system = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
            crate::resolve_locale(&system).to_string()
        }
    };
    rust_i18n::set_locale(&locale);

    let verbose = !args.quiet && args.output.is_some();
    if verbose {
        match &loaded {
            Some((_, path)) => println!(
                "{}",
                t!("report.loading_config", locale = &locale, path = path.display())
            ),
            None => println!("{}", t!("report.no_config", locale = &locale).dimmed()),
        }
    }

    let config = loaded.map(|(config, _)| config).unwrap_or_default();
    let options = merge_options(&config, &args);

    let paths = args
        .bundles
        .iter()
        .map(|raw| report_fs::expand_path(raw))
        .collect::<Result<Vec<_>>>()?;

    if verbose {
        for path in &paths {
            println!(
                "{}",
                t!("report.processing_bundle", locale = &locale, path = path.display()).blue()
            );
        }
    }

    let jobs = args.jobs.unwrap_or_else(num_cpus::get).max(1);
    let results = format_all(paths, &options, jobs).await;

    let mut reports = Vec::new();
    let mut failed_bundles = 0;
    for (path, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                failed_bundles += 1;
                eprintln!(
                    "{}",
                    t!(
                        "report.bundle_failed",
                        locale = &locale,
                        path = path.display(),
                        error = e.to_string()
                    )
                    .red()
                );
                if e.is_not_found() {
                    eprintln!(
                        "{}",
                        t!("report.bundle_not_found_hint", locale = &locale, path = path.display())
                            .yellow()
                    );
                }
            }
        }
    }

    write_artifacts(&reports, &args, &locale, verbose)?;

    if verbose {
        for report in &reports {
            print_summary(report, options.show_passed_tests, &locale);
        }
    }

    if failed_bundles > 0 {
        anyhow::bail!(t!("report.bundle_errors", locale = &locale, count = failed_bundles).to_string());
    }

    if reports.iter().any(|r| !r.test_status.is_success()) {
        if verbose {
            println!("\n{}", t!("report.failures_detected", locale = &locale).red().bold());
        }
        anyhow::bail!("One or more bundles reported test failures.");
    }

    if verbose {
        println!("\n{}", t!("report.all_passed", locale = &locale).green().bold());
    }
    Ok(())
}

/// Formats every bundle, at most `jobs` at a time. Results keep input order.
pub async fn format_all(
    paths: Vec<PathBuf>,
    options: &FormatOptions,
    jobs: usize,
) -> Vec<(PathBuf, Result<Report, FormatError>)> {
    stream::iter(paths.into_iter().map(|path| {
        let options = options.clone();
        async move {
            let result = format_bundle(&path, &options).await;
            (path, result)
        }
    }))
    .buffered(jobs.max(1))
    .collect()
    .await
}

/// Command-line flags override the config file; a flag can only switch an
/// option on.
pub fn merge_options(config: &ReportConfig, args: &ReportArgs) -> FormatOptions {
    let mut options = config.format_options();
    options.show_passed_tests |= args.show_passed_tests;
    options.show_code_coverage |= args.show_code_coverage;
    if args.title.is_some() {
        options.title = args.title.clone();
    }
    options
}

/// Loads the configuration file.
///
/// An explicit `--config` path must exist. Without one, `xcresult-report.toml`
/// in the working directory is used when present.
pub fn load_config(explicit: Option<&Path>) -> Result<Option<(ReportConfig, PathBuf)>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default_path.is_file() {
                return Ok(None);
            }
            default_path
        }
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: ReportConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(Some((config, path)))
}

fn write_artifacts(reports: &[Report], args: &ReportArgs, locale: &str, verbose: bool) -> Result<()> {
    let markdown = reports
        .iter()
        .map(Report::to_markdown)
        .collect::<Vec<_>>()
        .join("\n");

    match &args.output {
        Some(path) => {
            report_fs::write_report(path, &markdown)?;
            if verbose {
                println!("{}", t!("report.written", locale = locale, path = path.display()).green());
            }
        }
        None => println!("{}", markdown),
    }

    if let Some(path) = &args.html {
        generate_html_report(reports, path)?;
        if verbose {
            println!("{}", t!("report.html_written", locale = locale, path = path.display()).green());
        }
    }

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(reports).context("Failed to serialize results")?;
        report_fs::write_report(path, &json)?;
        if verbose {
            println!("{}", t!("report.json_written", locale = locale, path = path.display()).green());
        }
    }

    let summaries: Vec<&str> = reports.iter().map(|r| r.report_summary.as_str()).collect();
    if !summaries.is_empty() {
        if let Some(path) = report_fs::append_step_summary(&summaries.join("\n"))? {
            if verbose {
                println!(
                    "{}",
                    t!("report.step_summary_appended", locale = locale, path = path.display()).dimmed()
                );
            }
        }
    }

    Ok(())
}
