//! Icon Pipeline
//!
//! Reads a directory of SVG/PNG icons and writes a CSS stylesheet that maps
//! each icon's logical name to a background image. Small icons are embedded
//! as base64 data URIs; larger ones are copied next to the stylesheet and
//! referenced by filename.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use icon_pipeline::{run, PipelineConfig};
//!
//! let config = PipelineConfig::new("icons/", "stylesheets/icons/");
//! let summary = run(&config)?;
//! println!("{} icons, {} warnings", summary.processed, summary.warnings.len());
//! ```
//!
//! Runs are synchronous and idempotent: unchanged inputs give a
//! byte-identical stylesheet.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod preview;
pub mod runner;
pub mod scan;
pub mod stylesheet;

pub use config::PipelineConfig;
pub use error::{ConfigError, PipelineError, Warning};
pub use runner::{run, RunSummary};
pub use stylesheet::{BackgroundSource, IconRule, Stylesheet};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
