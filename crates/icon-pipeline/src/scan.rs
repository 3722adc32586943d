//! Source directory enumeration
//!
//! Lists files directly under the source directory in lexical filename
//! order, reads recognized icons and resolves name collisions. Every
//! per-file problem becomes a [`Warning`]; only a failure to list the
//! directory itself is fatal.

use crate::error::{PipelineError, Warning};
use crate::runner::Deadline;
use icon_asset::{AssetError, IconAsset, IconFormat, LogicalName};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of scanning a source directory
#[derive(Debug, Default)]
pub struct Scan {
    /// Accepted assets, in lexical filename order
    pub assets: Vec<IconAsset>,
    /// Per-file warnings, in the order they were raised
    pub warnings: Vec<Warning>,
    /// Number of files left out
    pub skipped: usize,
}

impl Scan {
    fn skip(&mut self, warning: Warning) {
        tracing::warn!("{warning}");
        self.skipped += 1;
        self.warnings.push(warning);
    }
}

/// Scan `source_dir`
///
/// Hidden files and sub-directories are ignored without a warning.
///
/// # Errors
/// - [`PipelineError::SourceNotFound`] if the directory cannot be listed
/// - [`PipelineError::Internal`] if listing fails part way
/// - [`PipelineError::Timeout`] if the deadline passes
pub fn scan_source(source_dir: &Path, deadline: &Deadline) -> Result<Scan, PipelineError> {
    let mut files = list_files(source_dir)?;
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut scan = Scan::default();
    let mut taken: HashMap<LogicalName, String> = HashMap::new();

    for (file_name, path) in files {
        deadline.check()?;

        if IconFormat::from_path(&path).is_none() {
            scan.skip(Warning::UnsupportedFormat { file: file_name });
            continue;
        }

        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) => {
                scan.skip(Warning::Unreadable {
                    file: file_name,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let asset = match IconAsset::from_bytes(file_name.clone(), data) {
            Ok(asset) => asset,
            Err(AssetError::UnsupportedFormat(_)) => {
                scan.skip(Warning::UnsupportedFormat { file: file_name });
                continue;
            }
            Err(AssetError::InvalidName(_)) => {
                scan.skip(Warning::InvalidName { file: file_name });
                continue;
            }
        };

        if let Some(kept) = taken.get(asset.name()) {
            scan.skip(Warning::DuplicateName {
                file: file_name,
                name: asset.name().to_string(),
                kept: kept.clone(),
            });
            continue;
        }

        if let Err(e) = asset.inspect() {
            let warning = Warning::MalformedImage {
                file: file_name.clone(),
                reason: e.to_string(),
            };
            tracing::warn!("{warning}");
            scan.warnings.push(warning);
        }

        tracing::debug!(
            file = %file_name,
            name = %asset.name(),
            format = %asset.format(),
            bytes = asset.len(),
            hash = %asset.hash().short(),
            "accepted icon"
        );
        taken.insert(asset.name().clone(), file_name);
        scan.assets.push(asset);
    }

    Ok(scan)
}

fn list_files(source_dir: &Path) -> Result<Vec<(String, PathBuf)>, PipelineError> {
    let entries = fs::read_dir(source_dir)
        .map_err(|e| PipelineError::source_not_found(source_dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PipelineError::internal(source_dir, e))?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        // Follows symlinks, so a link to a file counts as a file.
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => files.push((file_name, path)),
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(file = %file_name, error = %e, "cannot stat entry");
                files.push((file_name, path));
            }
        }
    }
    Ok(files)
}
