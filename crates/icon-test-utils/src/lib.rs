//! Testing utilities for the icon pipeline workspace
//!
//! Shared fixtures: temporary source/destination trees and synthetic icon
//! bytes with known sizes.

#![allow(missing_docs)]

use icon_asset::IconAsset;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// A temporary workspace with an `icons/` source and an `out/` destination
///
/// The destination is not created; the pipeline must create it.
pub struct IconTree {
    root: TempDir,
}

impl IconTree {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("icons")).unwrap();
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn source(&self) -> PathBuf {
        self.root.path().join("icons")
    }

    pub fn dest(&self) -> PathBuf {
        self.root.path().join("out")
    }

    /// Write a source file, returning self for chaining
    pub fn with_file(self, name: &str, data: &[u8]) -> Self {
        self.write(name, data);
        self
    }

    pub fn write(&self, name: &str, data: &[u8]) {
        fs::write(self.source().join(name), data).unwrap();
    }

    /// Read a file from the destination
    pub fn read_output(&self, name: &str) -> Vec<u8> {
        fs::read(self.dest().join(name)).unwrap()
    }

    /// Read the generated stylesheet as text
    pub fn read_css(&self, name: &str) -> String {
        String::from_utf8(self.read_output(name)).unwrap()
    }

    pub fn output_exists(&self, name: &str) -> bool {
        self.dest().join(name).exists()
    }
}

impl Default for IconTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A valid PNG header for `width` x `height`, zero-padded to `total_len`
///
/// Only the signature and IHDR are meaningful; the rest is filler so tests
/// can control the byte size.
pub fn png_bytes(width: u32, height: u32, total_len: usize) -> Vec<u8> {
    let mut data = PNG_SIGNATURE.to_vec();
    data.extend_from_slice(&13u32.to_be_bytes());
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[8, 6, 0, 0, 0]);
    if data.len() < total_len {
        data.resize(total_len, 0);
    }
    data
}

/// An SVG document of exactly `total_len` bytes (padded with a comment)
pub fn svg_bytes(width: u32, height: u32, total_len: usize) -> Vec<u8> {
    let head = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\"><!--"
    );
    let tail = "--></svg>";
    let mut doc = head.into_bytes();
    let filler = total_len.saturating_sub(doc.len() + tail.len());
    doc.extend(std::iter::repeat(b'x').take(filler));
    doc.extend_from_slice(tail.as_bytes());
    doc
}

/// Build an in-memory asset for unit tests
pub fn asset(name: &str, data: &[u8]) -> IconAsset {
    IconAsset::from_bytes(name, data.to_vec()).unwrap()
}
