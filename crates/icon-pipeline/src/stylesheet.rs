//! Stylesheet composition
//!
//! One rule block per accepted icon, in acceptance order. Output carries no
//! timestamps or absolute paths so identical inputs render identical bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use icon_asset::{Dimensions, IconAsset, LogicalName};
use std::fmt::Write;

const BANNER: &str = "/* Generated by icon-pipeline. Do not edit by hand. */\n";

/// Where an icon's background image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundSource {
    /// `data:` URI with base64 payload
    DataUri(String),
    /// File copied next to the stylesheet, relative to it
    File(String),
}

impl BackgroundSource {
    /// Inline an asset as a base64 data URI
    #[must_use]
    pub fn inline(asset: &IconAsset) -> Self {
        Self::DataUri(format!(
            "data:{};base64,{}",
            asset.format().mime_type(),
            STANDARD.encode(asset.data())
        ))
    }

    /// Reference the asset's copied file
    #[must_use]
    pub fn file(asset: &IconAsset) -> Self {
        Self::File(asset.output_file_name())
    }

    /// Value for `url(...)`
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::DataUri(uri) => uri,
            Self::File(name) => name,
        }
    }

    #[must_use]
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::DataUri(_))
    }
}

/// One rule block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRule {
    pub name: LogicalName,
    pub selector: String,
    pub source: BackgroundSource,
    pub dimensions: Option<Dimensions>,
}

impl IconRule {
    /// Class attribute value matching the selector
    #[must_use]
    pub fn class_name(&self) -> &str {
        self.selector.trim_start_matches('.')
    }

    fn render(&self, out: &mut String) {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{} {{", self.selector);
        let _ = writeln!(out, "  background-image: url(\"{}\");", self.source.url());
        if let Some(dims) = self.dimensions {
            let _ = writeln!(out, "  background-repeat: no-repeat;");
            let _ = writeln!(out, "  width: {}px;", dims.width);
            let _ = writeln!(out, "  height: {}px;", dims.height);
        }
        out.push_str("}\n");
    }
}

/// Generated stylesheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    rules: Vec<IconRule>,
}

impl Stylesheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule for `asset`
    pub fn push(&mut self, asset: &IconAsset, prefix: &str, source: BackgroundSource) {
        self.rules.push(IconRule {
            name: asset.name().clone(),
            selector: asset.name().selector(prefix),
            source,
            dimensions: asset.dimensions(),
        });
    }

    #[must_use]
    pub fn rules(&self) -> &[IconRule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render the full CSS text
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from(BANNER);
        for rule in &self.rules {
            out.push('\n');
            rule.render(&mut out);
        }
        out
    }
}
