//! Pipeline configuration
//!
//! [`PipelineConfig`] is built once per invocation, either in code through
//! the `with_*` builders or from a TOML file, and validated before any work
//! starts.

use crate::error::{ConfigError, PipelineError};
use icon_asset::IconFormat;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Conventional source directory
pub const DEFAULT_SOURCE_DIR: &str = "icons/";
/// Conventional destination directory
pub const DEFAULT_DEST_DIR: &str = "stylesheets/icons/";
/// Generated stylesheet filename
pub const DEFAULT_STYLESHEET: &str = "icons.css";
/// Generated preview page filename
pub const DEFAULT_PREVIEW: &str = "preview.html";
/// Class selector prefix
pub const DEFAULT_CSS_PREFIX: &str = ".icon-";
/// Assets strictly smaller than this many bytes are inlined
pub const DEFAULT_INLINE_THRESHOLD: u64 = 8 * 1024;

/// Configuration for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory holding the source icons (read non-recursively)
    pub source_dir: PathBuf,
    /// Directory receiving the stylesheet and copied assets
    pub dest_dir: PathBuf,
    /// Prefix prepended to each logical name to form the selector
    pub css_prefix: String,
    /// Stylesheet filename inside `dest_dir`
    pub stylesheet_name: String,
    /// Inlining cutoff in bytes
    pub inline_threshold: u64,
    /// Whether to write a preview page
    pub preview: bool,
    /// Preview page filename inside `dest_dir`
    pub preview_name: String,
    /// Optional time limit for the whole run, in milliseconds
    pub timeout_ms: Option<u64>,
}

impl PipelineConfig {
    /// Create configuration for a directory pair, other values defaulted
    #[inline]
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    ///
    /// Keys missing from the file keep their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read or parsed
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[inline]
    #[must_use]
    pub fn with_css_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.css_prefix = prefix.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_stylesheet_name(mut self, name: impl Into<String>) -> Self {
        self.stylesheet_name = name.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_inline_threshold(mut self, bytes: u64) -> Self {
        self.inline_threshold = bytes;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_preview(mut self, enabled: bool) -> Self {
        self.preview = enabled;
        self
    }

    /// With a time limit for the whole run
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout_ms = Some(limit.as_millis() as u64);
        self
    }

    /// Configured time limit
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Path of the generated stylesheet
    #[inline]
    #[must_use]
    pub fn stylesheet_path(&self) -> PathBuf {
        self.dest_dir.join(&self.stylesheet_name)
    }

    /// Path of the generated preview page
    #[inline]
    #[must_use]
    pub fn preview_path(&self) -> PathBuf {
        self.dest_dir.join(&self.preview_name)
    }

    /// Validate once before running
    ///
    /// Checks value shapes first, then that the source directory exists and
    /// can be listed. Nothing is written.
    ///
    /// # Errors
    /// - [`PipelineError::Config`] for malformed values
    /// - [`PipelineError::SourceNotFound`] if the source directory is missing
    ///   or unreadable
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(invalid("source_dir must not be empty"));
        }
        if self.dest_dir.as_os_str().is_empty() {
            return Err(invalid("dest_dir must not be empty"));
        }
        if self.css_prefix.trim().is_empty() {
            return Err(invalid("css_prefix must not be empty"));
        }
        if self.css_prefix.contains(|c: char| c.is_whitespace() || "{};,".contains(c)) {
            return Err(invalid(format!(
                "css_prefix '{}' is not a usable selector prefix",
                self.css_prefix
            )));
        }
        check_file_name("stylesheet_name", &self.stylesheet_name)?;
        if self.preview {
            check_file_name("preview_name", &self.preview_name)?;
            if self.preview_name == self.stylesheet_name {
                return Err(invalid("preview_name must differ from stylesheet_name"));
            }
        }

        let metadata = fs::metadata(&self.source_dir)
            .map_err(|e| PipelineError::source_not_found(&self.source_dir, e))?;
        if !metadata.is_dir() {
            return Err(PipelineError::source_not_found(
                &self.source_dir,
                "not a directory",
            ));
        }
        fs::read_dir(&self.source_dir)
            .map_err(|e| PipelineError::source_not_found(&self.source_dir, e))?;
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            css_prefix: DEFAULT_CSS_PREFIX.to_string(),
            stylesheet_name: DEFAULT_STYLESHEET.to_string(),
            inline_threshold: DEFAULT_INLINE_THRESHOLD,
            preview: true,
            preview_name: DEFAULT_PREVIEW.to_string(),
            timeout_ms: None,
        }
    }
}

fn invalid(message: impl Into<String>) -> PipelineError {
    PipelineError::Config(ConfigError::Invalid(message.into()))
}

fn check_file_name(field: &str, name: &str) -> Result<(), PipelineError> {
    let plain = Path::new(name)
        .file_name()
        .is_some_and(|f| f == name);
    if name.is_empty() || !plain {
        return Err(invalid(format!("{field} '{name}' must be a plain file name")));
    }
    // Copied icons land next to the stylesheet as `<name>.svg` / `<name>.png`.
    if let Some(format) = IconFormat::from_path(Path::new(name)) {
        return Err(invalid(format!(
            "{field} '{name}' must not use the .{format} icon extension"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_conventional_layout() {
        let config = PipelineConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("icons/"));
        assert_eq!(config.dest_dir, PathBuf::from("stylesheets/icons/"));
        assert_eq!(config.stylesheet_name, "icons.css");
        assert_eq!(config.inline_threshold, 8192);
        assert_eq!(config.css_prefix, ".icon-");
        assert!(config.preview);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn builders_override() {
        let config = PipelineConfig::new("in", "out")
            .with_css_prefix(".i-")
            .with_inline_threshold(10)
            .with_preview(false)
            .with_timeout(Duration::from_secs(2));
        assert_eq!(config.css_prefix, ".i-");
        assert_eq!(config.inline_threshold, 10);
        assert!(!config.preview);
        assert_eq!(config.timeout(), Some(Duration::from_secs(2)));
        assert_eq!(config.stylesheet_path(), PathBuf::from("out").join("icons.css"));
    }

    #[test]
    fn validate_missing_source() {
        let tmp = tempfile::tempdir().unwrap();
        let config = PipelineConfig::new(tmp.path().join("nope"), tmp.path().join("out"));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PipelineError::SourceNotFound { .. }));
    }

    #[test]
    fn validate_source_is_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("icons");
        std::fs::write(&file, b"x").unwrap();
        let err = PipelineConfig::new(&file, tmp.path().join("out"))
            .validate()
            .unwrap_err();
        assert!(matches!(err, PipelineError::SourceNotFound { ref reason, .. } if reason == "not a directory"));
    }

    #[test]
    fn validate_rejects_nested_stylesheet_name() {
        let tmp = tempfile::tempdir().unwrap();
        let err = PipelineConfig::new(tmp.path(), tmp.path().join("out"))
            .with_stylesheet_name("css/icons.css")
            .validate()
            .unwrap_err();
        assert!(matches!(err, PipelineError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn validate_rejects_icon_extension_output_names() {
        let tmp = tempfile::tempdir().unwrap();
        let err = PipelineConfig::new(tmp.path(), tmp.path().join("out"))
            .with_stylesheet_name("logo.png")
            .validate()
            .unwrap_err();
        assert!(matches!(err, PipelineError::Config(ConfigError::Invalid(ref m)) if m.contains(".png")));

        let mut config = PipelineConfig::new(tmp.path(), tmp.path().join("out"));
        config.preview_name = "Home.SVG".into();
        assert!(matches!(
            config.validate(),
            Err(PipelineError::Config(ConfigError::Invalid(_)))
        ));

        config.preview = false;
        config.validate().unwrap();
    }

    #[test]
    fn validate_rejects_bad_prefix() {
        let tmp = tempfile::tempdir().unwrap();
        let err = PipelineConfig::new(tmp.path(), tmp.path().join("out"))
            .with_css_prefix(".a b")
            .validate()
            .unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn validate_ok() {
        let tmp = tempfile::tempdir().unwrap();
        PipelineConfig::new(tmp.path(), tmp.path().join("out"))
            .validate()
            .unwrap();
    }

    #[test]
    fn toml_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "source_dir = \"assets/icons\"").unwrap();
        writeln!(file, "inline_threshold = 4096").unwrap();
        let config = PipelineConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.source_dir, PathBuf::from("assets/icons"));
        assert_eq!(config.inline_threshold, 4096);
        assert_eq!(config.dest_dir, PathBuf::from(DEFAULT_DEST_DIR));
    }

    #[test]
    fn toml_unknown_key_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sprite = true").unwrap();
        let err = PipelineConfig::from_toml_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn toml_missing_file_is_read_error() {
        let err = PipelineConfig::from_toml_file(Path::new("/definitely/not/here.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
