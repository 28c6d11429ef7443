//! Error types surfaced by the `format()` pipeline.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// An error that aborts a whole `format()` call.
///
/// No partial report is ever produced: a dropped test would corrupt the counts.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The bundle path does not resolve to a bundle.
    #[error("bundle not found: {}", path.display())]
    BundleNotFound { path: PathBuf },

    /// The bundle was readable but structurally inconsistent.
    ///
    /// `path` is the bundle or document at fault. Stages that only see decoded
    /// data leave it empty; `format()` fills it in before returning.
    #[error("malformed bundle{}: {reason}", location(.path))]
    MalformedBundle {
        path: Option<PathBuf>,
        reason: String,
    },

    /// Any other failure reading the bundle from disk.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FormatError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        FormatError::MalformedBundle {
            path: None,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_at(path: &Path, reason: impl Into<String>) -> Self {
        FormatError::MalformedBundle {
            path: Some(path.to_path_buf()),
            reason: reason.into(),
        }
    }

    /// Attaches `path` to a malformed-bundle error that does not name one yet.
    pub(crate) fn in_bundle(self, bundle: &Path) -> Self {
        match self {
            FormatError::MalformedBundle { path: None, reason } => {
                FormatError::malformed_at(bundle, reason)
            }
            other => other,
        }
    }

    /// The bundle or document the error refers to, when known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FormatError::BundleNotFound { path } | FormatError::Io { path, .. } => Some(path),
            FormatError::MalformedBundle { path, .. } => path.as_deref(),
        }
    }

    /// Returns true for [`FormatError::BundleNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, FormatError::BundleNotFound { .. })
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}
