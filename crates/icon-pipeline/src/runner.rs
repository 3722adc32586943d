//! Icon pipeline runner
//!
//! `run` takes one validated (source, dest) pair to completion:
//! 1. Validate configuration (fatal on missing source, nothing written)
//! 2. Scan and read icons, collecting per-file warnings
//! 3. Inline small icons, copy large ones into the destination
//! 4. Write the stylesheet and, optionally, the preview page

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Warning};
use crate::preview;
use crate::scan::scan_source;
use crate::stylesheet::{BackgroundSource, Stylesheet};
use icon_asset::{ContentHash, IconAsset};
use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RunSummary {
    /// Icons emitted into the stylesheet
    pub processed: usize,
    /// Files left out
    pub skipped: usize,
    /// Every per-file warning raised
    pub warnings: Vec<Warning>,
    /// Icons embedded as data URIs
    pub inlined: usize,
    /// Icons referenced as copied files
    pub copied: usize,
    /// Hash of the written stylesheet bytes
    pub stylesheet_hash: ContentHash,
}

impl RunSummary {
    #[inline]
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Optional wall-clock limit, checked between files
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    /// Start the clock
    #[must_use]
    pub fn start(limit: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    /// Never expires
    #[must_use]
    pub fn none() -> Self {
        Self::start(None)
    }

    /// # Errors
    /// Returns [`PipelineError::Timeout`] once the limit has passed
    pub fn check(&self) -> Result<(), PipelineError> {
        match self.limit {
            Some(limit) if self.started.elapsed() >= limit => Err(PipelineError::Timeout { limit }),
            _ => Ok(()),
        }
    }
}

/// Run the pipeline once
///
/// Per-file problems end up in [`RunSummary::warnings`]; only the fatal
/// kinds of [`PipelineError`] abort.
///
/// # Errors
/// - [`PipelineError::SourceNotFound`] when the source directory is missing
///   or unreadable; nothing is written
/// - [`PipelineError::DestUnwritable`] when the destination cannot be
///   created or written
/// - [`PipelineError::Timeout`] when the configured limit passes
/// - [`PipelineError::Config`] for invalid configuration values
/// - [`PipelineError::Internal`] for other I/O failures
pub fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let deadline = Deadline::start(config.timeout());
    config.validate()?;

    tracing::info!(
        source = %config.source_dir.display(),
        dest = %config.dest_dir.display(),
        "building icon stylesheet"
    );

    let scan = scan_source(&config.source_dir, &deadline)?;

    fs::create_dir_all(&config.dest_dir)
        .map_err(|e| PipelineError::dest_unwritable(&config.dest_dir, e))?;
    if !config.dest_dir.is_dir() {
        return Err(PipelineError::dest_unwritable(
            &config.dest_dir,
            io::Error::new(io::ErrorKind::AlreadyExists, "exists and is not a directory"),
        ));
    }

    let mut sheet = Stylesheet::new();
    let mut inlined = 0;
    let mut copied = 0;

    for asset in &scan.assets {
        deadline.check()?;
        let source = if (asset.len() as u64) < config.inline_threshold {
            inlined += 1;
            BackgroundSource::inline(asset)
        } else {
            copy_asset(asset, &config.dest_dir)?;
            copied += 1;
            BackgroundSource::file(asset)
        };
        sheet.push(asset, &config.css_prefix, source);
    }

    let css = sheet.render();
    let stylesheet_hash = ContentHash::compute(css.as_bytes());
    write_output(&config.stylesheet_path(), css.as_bytes())?;

    if config.preview {
        let html = preview::render(&sheet, &config.stylesheet_name);
        write_output(&config.preview_path(), html.as_bytes())?;
    }

    let summary = RunSummary {
        processed: sheet.len(),
        skipped: scan.skipped,
        warnings: scan.warnings,
        inlined,
        copied,
        stylesheet_hash,
    };
    tracing::info!(
        processed = summary.processed,
        skipped = summary.skipped,
        warnings = summary.warnings.len(),
        inlined = summary.inlined,
        copied = summary.copied,
        hash = %summary.stylesheet_hash.short(),
        "icon stylesheet written"
    );
    Ok(summary)
}

/// Copy an asset next to the stylesheet, skipping identical files
fn copy_asset(asset: &IconAsset, dest_dir: &Path) -> Result<(), PipelineError> {
    let target = dest_dir.join(asset.output_file_name());
    match fs::read(&target) {
        Ok(existing) if ContentHash::compute(&existing) == *asset.hash() => {
            tracing::debug!(file = %target.display(), "copy up to date");
            return Ok(());
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            return Err(PipelineError::dest_unwritable(&target, e));
        }
        Err(e) => return Err(PipelineError::internal(&target, e)),
    }
    write_output(&target, asset.data())
}

fn write_output(path: &Path, data: &[u8]) -> Result<(), PipelineError> {
    fs::write(path, data).map_err(|e| PipelineError::dest_unwritable(path, e))?;
    tracing::debug!(file = %path.display(), bytes = data.len(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_without_limit_never_expires() {
        assert!(Deadline::none().check().is_ok());
    }

    #[test]
    fn zero_deadline_expires_immediately() {
        let deadline = Deadline::start(Some(Duration::ZERO));
        assert!(matches!(
            deadline.check(),
            Err(PipelineError::Timeout { .. })
        ));
    }

    #[test]
    fn copy_skips_identical_target() {
        let tmp = tempfile::tempdir().unwrap();
        let asset = IconAsset::from_bytes("big.svg", b"<svg/>".to_vec()).unwrap();
        copy_asset(&asset, tmp.path()).unwrap();
        let target = tmp.path().join("big.svg");
        let first = fs::metadata(&target).unwrap().modified().unwrap();
        copy_asset(&asset, tmp.path()).unwrap();
        let second = fs::metadata(&target).unwrap().modified().unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read(&target).unwrap(), b"<svg/>");
    }

    #[test]
    fn copy_overwrites_stale_target() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("big.svg"), b"old").unwrap();
        let asset = IconAsset::from_bytes("big.svg", b"<svg/>".to_vec()).unwrap();
        copy_asset(&asset, tmp.path()).unwrap();
        assert_eq!(fs::read(tmp.path().join("big.svg")).unwrap(), b"<svg/>");
    }
}
