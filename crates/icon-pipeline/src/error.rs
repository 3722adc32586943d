//! Error types for the icon pipeline
//!
//! Two tiers:
//! - [`PipelineError`]: fatal, aborts the run and maps to an exit code
//! - [`Warning`]: per-file problems collected into the run summary

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fatal pipeline error
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Source directory missing, not a directory, or unreadable
    #[error("source directory not found: {}: {reason}", .path.display())]
    SourceNotFound { path: PathBuf, reason: String },

    /// Destination directory cannot be created or written
    #[error("destination not writable: {}: {source}", .path.display())]
    DestUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Run exceeded its configured time limit
    #[error("run timed out after {}ms", .limit.as_millis())]
    Timeout { limit: Duration },

    /// Unexpected I/O failure
    #[error("internal I/O error at {}: {source}", .path.display())]
    Internal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration rejected
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PipelineError {
    /// Process exit code for this error
    #[inline]
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::SourceNotFound { .. } => 1,
            Self::DestUnwritable { .. } => 2,
            Self::Internal { .. } | Self::Config(_) => 3,
            Self::Timeout { .. } => 4,
        }
    }

    /// Offending path, when the error has one
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::SourceNotFound { path, .. }
            | Self::DestUnwritable { path, .. }
            | Self::Internal { path, .. } => Some(path.as_path()),
            Self::Config(ConfigError::Read { path, .. } | ConfigError::Parse { path, .. }) => {
                Some(path.as_path())
            }
            Self::Timeout { .. } | Self::Config(ConfigError::Invalid(_)) => None,
        }
    }

    pub(crate) fn source_not_found(path: &Path, reason: impl ToString) -> Self {
        Self::SourceNotFound {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn dest_unwritable(path: &Path, source: std::io::Error) -> Self {
        Self::DestUnwritable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn internal(path: &Path, source: std::io::Error) -> Self {
        Self::Internal {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for a pipeline config
    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value failed validation
    #[error("{0}")]
    Invalid(String),
}

/// Non-fatal, per-file problem
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Extension is not svg or png
    #[error("{file}: unsupported format, skipped")]
    UnsupportedFormat { file: String },

    /// Name collides with an earlier file
    #[error("{file}: name '{name}' already taken by {kept}, skipped")]
    DuplicateName {
        file: String,
        name: String,
        kept: String,
    },

    /// Stem has nothing to build a CSS name from
    #[error("{file}: no usable characters for a CSS name, skipped")]
    InvalidName { file: String },

    /// File could not be read
    #[error("{file}: unreadable ({reason}), skipped")]
    Unreadable { file: String, reason: String },

    /// Image header is damaged; the file is still emitted
    #[error("{file}: {reason}")]
    MalformedImage { file: String, reason: String },
}

impl Warning {
    /// Source filename the warning is about
    #[must_use]
    pub fn file(&self) -> &str {
        match self {
            Self::UnsupportedFormat { file }
            | Self::DuplicateName { file, .. }
            | Self::InvalidName { file }
            | Self::Unreadable { file, .. }
            | Self::MalformedImage { file, .. } => file,
        }
    }

    /// Whether the file was left out of the stylesheet
    #[must_use]
    pub fn skips_file(&self) -> bool {
        !matches!(self, Self::MalformedImage { .. })
    }
}
