use serde::{Deserialize, Serialize};

/// Options for a single `format()` call.
///
/// Both flags only affect rendering; consolidation and the counts are the same
/// whichever way they are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormatOptions {
    /// If `true`, passed tests appear in the detailed listing.
    #[serde(default)]
    pub show_passed_tests: bool,
    /// If `true`, the bundle's coverage document is merged into the summary.
    #[serde(default)]
    pub show_code_coverage: bool,
    /// Heading of the summary. Falls back to the bundle's own title, then to
    /// [`DEFAULT_TITLE`].
    #[serde(default)]
    pub title: Option<String>,
}

pub const DEFAULT_TITLE: &str = "Test Results";

/// The default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "xcresult-report.toml";

/// The tool configuration, loaded from a TOML file.
/// Every field is optional; command-line flags override what is set here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReportConfig {
    /// The language for console messages (e.g., "en", "zh-CN").
    /// Defaults to "en" if not specified.
    #[serde(default = "default_language")]
    pub language: String,

    /// Heading of the rendered summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// List passed tests in the detailed report.
    #[serde(default)]
    pub show_passed_tests: bool,

    /// Include the bundle's coverage figures in the summary.
    #[serde(default)]
    pub show_code_coverage: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            title: None,
            show_passed_tests: false,
            show_code_coverage: false,
        }
    }
}

impl ReportConfig {
    /// Builds the per-call options from this configuration.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            show_passed_tests: self.show_passed_tests,
            show_code_coverage: self.show_code_coverage,
            title: self.title.clone(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}
