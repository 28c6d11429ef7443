//! # xcresult-report Library / xcresult-report 库
//!
//! This library turns a test-result bundle into a human-readable report in which
//! retried test cases are consolidated into one logical result instead of being
//! counted once per attempt.
//!
//! 此库将测试结果包转换为易读的报告，
//! 其中重试的测试用例被合并为一个逻辑结果，而不是按每次尝试计数。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, grouping, consolidation, aggregation and the `format()` pipeline
//! - `infra` - Bundle reading, coverage loading and file system helpers
//! - `reporting` - Markdown, HTML and console renderers
//! - `cli` - Command-line interface and commands

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config;
pub use core::error::FormatError;
pub use core::formatter::{Formatter, Report, format_bundle};
pub use core::models;

/// Maps a requested locale onto one of the bundled translation files.
///
/// The full locale (e.g., "zh-CN") is tried first, then the language code alone
/// (e.g., "en" from "en-US"), and finally the default language ("en").
pub fn resolve_locale(requested: &str) -> &str {
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&requested) {
        return requested;
    }
    requested
        .split(['-', '_'])
        .next()
        .filter(|lang_code| available_locales.contains(lang_code))
        .unwrap_or("en")
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
