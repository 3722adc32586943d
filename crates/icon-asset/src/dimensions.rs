//! Intrinsic icon dimensions
//!
//! PNG sizes come from the `IHDR` chunk; SVG sizes come from the root
//! element's `width`/`height` attributes, falling back to `viewBox`.

use crate::format::IconFormat;
use once_cell::sync::Lazy;
use regex::Regex;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

static SVG_ROOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<svg\b([^>]*)>").expect("static regex"));
static SVG_WIDTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)(?:^|\s)width\s*=\s*["']([^"']*)["']"#).expect("static regex"));
static SVG_HEIGHT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:^|\s)height\s*=\s*["']([^"']*)["']"#).expect("static regex")
});
static SVG_VIEWBOX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:^|\s)viewBox\s*=\s*["']([^"']*)["']"#).expect("static regex"));

/// Pixel size of an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Width in CSS pixels
    pub width: u32,
    /// Height in CSS pixels
    pub height: u32,
}

impl Dimensions {
    /// Create new dimensions
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Sniff dimensions from raw icon bytes
    ///
    /// `Ok(None)` means the file is well-formed enough but declares no usable
    /// size (e.g. an SVG sized in percentages).
    ///
    /// # Errors
    /// Returns [`DimensionError`] when a PNG has a bad signature or header
    pub fn sniff(format: IconFormat, data: &[u8]) -> Result<Option<Self>, DimensionError> {
        match format {
            IconFormat::Png => png_dimensions(data).map(Some),
            IconFormat::Svg => Ok(svg_dimensions(data)),
        }
    }
}

fn png_dimensions(data: &[u8]) -> Result<Dimensions, DimensionError> {
    if data.len() < 8 || data[..8] != PNG_SIGNATURE {
        return Err(DimensionError::BadSignature);
    }
    // length(4) + "IHDR"(4) + width(4) + height(4)
    if data.len() < 24 || &data[12..16] != b"IHDR" {
        return Err(DimensionError::MissingHeader);
    }
    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
    if width == 0 || height == 0 {
        return Err(DimensionError::MissingHeader);
    }
    Ok(Dimensions::new(width, height))
}

fn svg_dimensions(data: &[u8]) -> Option<Dimensions> {
    let text = String::from_utf8_lossy(data);
    let root = SVG_ROOT.captures(&text)?;
    let attrs = root.get(1)?.as_str();

    let width = attribute(&SVG_WIDTH, attrs).and_then(parse_length);
    let height = attribute(&SVG_HEIGHT, attrs).and_then(parse_length);
    if let (Some(width), Some(height)) = (width, height) {
        return Some(Dimensions::new(width, height));
    }

    let view_box = attribute(&SVG_VIEWBOX, attrs)?;
    let parts: Vec<f64> = view_box
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .map(str::parse::<f64>)
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [_, _, w, h] => Some(Dimensions::new(to_px(*w)?, to_px(*h)?)),
        _ => None,
    }
}

fn attribute<'a>(re: &Regex, attrs: &'a str) -> Option<&'a str> {
    re.captures(attrs).and_then(|c| c.get(1)).map(|m| m.as_str())
}

fn parse_length(value: &str) -> Option<u32> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    to_px(number.parse().ok()?)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_px(value: f64) -> Option<u32> {
    if value.is_finite() && value > 0.0 && value <= f64::from(u32::MAX) {
        Some(value.ceil() as u32)
    } else {
        None
    }
}

/// Errors raised while reading image headers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimensionError {
    /// PNG signature did not match
    #[error("not a PNG file (bad signature)")]
    BadSignature,

    /// PNG IHDR chunk missing or truncated
    #[error("PNG header chunk missing or truncated")]
    MissingHeader,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[8, 6, 0, 0, 0]);
        data
    }

    #[test]
    fn png_reads_ihdr() {
        let dims = Dimensions::sniff(IconFormat::Png, &png_header(32, 16)).unwrap();
        assert_eq!(dims, Some(Dimensions::new(32, 16)));
    }

    #[test]
    fn png_bad_signature() {
        let result = Dimensions::sniff(IconFormat::Png, b"definitely not a png");
        assert_eq!(result, Err(DimensionError::BadSignature));
    }

    #[test]
    fn png_truncated_header() {
        let result = Dimensions::sniff(IconFormat::Png, &png_header(1, 1)[..14]);
        assert_eq!(result, Err(DimensionError::MissingHeader));
    }

    #[test]
    fn svg_width_height_attributes() {
        let svg = br#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" width="24px" height="18"><path/></svg>"#;
        let dims = Dimensions::sniff(IconFormat::Svg, svg).unwrap();
        assert_eq!(dims, Some(Dimensions::new(24, 18)));
    }

    #[test]
    fn svg_falls_back_to_viewbox() {
        let svg = br#"<svg viewBox="0 0 48 32.5" width="100%"></svg>"#;
        let dims = Dimensions::sniff(IconFormat::Svg, svg).unwrap();
        assert_eq!(dims, Some(Dimensions::new(48, 33)));
    }

    #[test]
    fn svg_ignores_stroke_width() {
        let svg = br#"<svg stroke-width="2" viewBox="0 0 10 10"></svg>"#;
        let dims = Dimensions::sniff(IconFormat::Svg, svg).unwrap();
        assert_eq!(dims, Some(Dimensions::new(10, 10)));
    }

    #[test]
    fn svg_without_size() {
        let dims = Dimensions::sniff(IconFormat::Svg, b"<svg><g/></svg>").unwrap();
        assert_eq!(dims, None);
        let dims = Dimensions::sniff(IconFormat::Svg, b"plain text").unwrap();
        assert_eq!(dims, None);
    }
}
