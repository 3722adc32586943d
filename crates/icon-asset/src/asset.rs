//! Icon asset
//!
//! An [`IconAsset`] is one source image file, read fully into memory and
//! classified. It is immutable once constructed.

use crate::dimensions::{DimensionError, Dimensions};
use crate::format::IconFormat;
use crate::hash::ContentHash;
use crate::name::{LogicalName, NameError};
use std::path::Path;

/// A single source icon
///
/// # Invariants
/// - `hash` is always `ContentHash::compute(&data)`
/// - `name` is the normalized stem of `file_name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconAsset {
    file_name: String,
    name: LogicalName,
    format: IconFormat,
    data: Vec<u8>,
    hash: ContentHash,
    dimensions: Option<Dimensions>,
}

impl IconAsset {
    /// Build an asset from a filename and its bytes
    ///
    /// Dimensions are sniffed on a best-effort basis; a header that cannot be
    /// read is reported through [`IconAsset::inspect`] rather than here.
    ///
    /// # Errors
    /// Returns error if the extension is not a recognized format or the stem
    /// normalizes to an empty name
    pub fn from_bytes(file_name: impl Into<String>, data: Vec<u8>) -> Result<Self, AssetError> {
        let file_name = file_name.into();
        let path = Path::new(&file_name);

        let format = IconFormat::from_path(path)
            .ok_or_else(|| AssetError::UnsupportedFormat(file_name.clone()))?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let name = LogicalName::normalize(stem)?;
        let hash = ContentHash::compute(&data);
        let dimensions = Dimensions::sniff(format, &data).ok().flatten();

        Ok(Self {
            file_name,
            name,
            format,
            data,
            hash,
            dimensions,
        })
    }

    /// Re-check the image header
    ///
    /// # Errors
    /// Returns the header problem, if any
    pub fn inspect(&self) -> Result<(), DimensionError> {
        Dimensions::sniff(self.format, &self.data).map(|_| ())
    }

    /// Original filename within the source directory
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Logical (CSS-safe) name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &LogicalName {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn format(&self) -> IconFormat {
        self.format
    }

    /// Raw bytes
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Content hash of the raw bytes
    #[inline]
    #[must_use]
    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    /// Filename used when the asset is copied next to the stylesheet
    #[must_use]
    pub fn output_file_name(&self) -> String {
        format!("{}.{}", self.name, self.format.extension())
    }
}

/// Errors building an [`IconAsset`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    /// Extension not svg or png
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Stem could not produce a name
    #[error("invalid name: {0}")]
    InvalidName(#[from] NameError),
}
