//! Icon Asset Model
//!
//! Typed, content-hashed icon files ready to be turned into CSS.
//!
//! # Core Concepts
//!
//! - [`IconAsset`]: One source image with its bytes, format and logical name
//! - [`IconFormat`]: Recognized formats (SVG, PNG)
//! - [`LogicalName`]: CSS-safe name derived from the filename stem
//! - [`ContentHash`]: 32-byte Blake3 hash of the asset bytes
//! - [`Dimensions`]: Intrinsic pixel size sniffed from the file header
//!
//! # Example
//!
//! ```rust
//! use icon_asset::{IconAsset, IconFormat};
//!
//! let asset = IconAsset::from_bytes("Arrow Left.svg", b"<svg/>".to_vec()).unwrap();
//! assert_eq!(asset.name().as_str(), "arrow-left");
//! assert_eq!(asset.format(), IconFormat::Svg);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod asset;
mod dimensions;
mod format;
mod hash;
mod name;

pub use asset::{AssetError, IconAsset};
pub use dimensions::{DimensionError, Dimensions};
pub use format::IconFormat;
pub use hash::ContentHash;
pub use name::{LogicalName, NameError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
