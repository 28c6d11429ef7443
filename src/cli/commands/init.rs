//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which creates a new
//! configuration file, either from a commented default or through a short
//! interactive wizard.
//!
//! 此模块实现 `init` 命令，
//! 通过带注释的默认内容或简短的交互式向导创建新的配置文件。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::{fs, path::PathBuf};

use crate::core::config::ReportConfig;
use crate::infra::t;

const DEFAULT_CONFIG: &str = r#"# xcresult-report configuration

# Language for console messages
language = "en"

# Heading of the report summary. Defaults to the bundle's own title,
# then to "Test Results".
# title = "Test Results"

# List passed tests in the detailed report (failed, skipped and
# expected-failure tests are always listed)
show_passed_tests = false

# Merge the bundle's coverage.json figures into the summary
show_code_coverage = false
"#;

/// Executes the init command.
///
/// # Arguments
/// * `output` - Path for the new configuration file
/// * `force` - Whether to overwrite an existing file
/// * `non_interactive` - Write the default file without prompting
/// * `locale` - Language for messages
pub fn execute(output: PathBuf, force: bool, non_interactive: bool, locale: &str) -> Result<()> {
    // Check if file already exists
    if output.exists() && !force {
        println!(
            "{}",
            t!("init.file_exists", locale = locale, path = output.display()).red()
        );
        println!("{}", t!("init.use_force", locale = locale).yellow());
        return Ok(());
    }

    let content = if non_interactive {
        DEFAULT_CONFIG.to_string()
    } else {
        let config = run_wizard(locale)?;
        toml::to_string(&config).context("Failed to serialize configuration")?
    };

    // Create parent directories if needed
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                t!("init.create_parent_dir_failed", locale = locale, path = parent.display())
                    .to_string()
            })?;
        }
    }

    fs::write(&output, content).with_context(|| {
        t!("init.write_failed", locale = locale, path = output.display()).to_string()
    })?;

    println!(
        "{}",
        t!("init.success", locale = locale, path = output.display()).green()
    );
    println!("{}", t!("init.next_steps", locale = locale));

    Ok(())
}

fn run_wizard(locale: &str) -> Result<ReportConfig> {
    let theme = ColorfulTheme::default();

    let language: String = Input::with_theme(&theme)
        .with_prompt(t!("init.prompt_language", locale = locale).to_string())
        .default(locale.to_string())
        .interact_text()?;

    let title: String = Input::with_theme(&theme)
        .with_prompt(t!("init.prompt_title", locale = locale).to_string())
        .allow_empty(true)
        .interact_text()?;

    let show_passed_tests = Confirm::with_theme(&theme)
        .with_prompt(t!("init.prompt_show_passed", locale = locale).to_string())
        .default(false)
        .interact()?;

    let show_code_coverage = Confirm::with_theme(&theme)
        .with_prompt(t!("init.prompt_show_coverage", locale = locale).to_string())
        .default(false)
        .interact()?;

    Ok(ReportConfig {
        language,
        title: Some(title).filter(|s| !s.trim().is_empty()),
        show_passed_tests,
        show_code_coverage,
    })
}
