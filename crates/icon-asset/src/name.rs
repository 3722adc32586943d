//! CSS-safe logical names for icons
//!
//! Provides [`LogicalName`], the identifier an icon is known by in the
//! generated stylesheet.

use std::fmt::{self, Display, Formatter};

/// Normalized icon name
///
/// Only ever contains `[a-z0-9-]`, never starts or ends with a hyphen and
/// never contains two hyphens in a row.
///
/// # Examples
/// - `Icon One` → `icon-one`
/// - `arrow__left` → `arrow-left`
/// - `  Star!` → `star`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalName(String);

impl LogicalName {
    /// Normalize a filename stem into a logical name
    ///
    /// Lowercases ASCII letters and collapses every run of other characters
    /// into a single hyphen.
    ///
    /// # Errors
    /// Returns [`NameError::Empty`] if nothing alphanumeric remains
    pub fn normalize(stem: &str) -> Result<Self, NameError> {
        let mut out = String::with_capacity(stem.len());
        let mut pending_hyphen = false;

        for c in stem.chars() {
            if c.is_ascii_alphanumeric() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(c.to_ascii_lowercase());
            } else {
                pending_hyphen = true;
            }
        }

        if out.is_empty() {
            return Err(NameError::Empty(stem.to_string()));
        }
        Ok(Self(out))
    }

    /// Get the name as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build a class selector with the given prefix (e.g. `.icon-`)
    #[inline]
    #[must_use]
    pub fn selector(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.0)
    }
}

impl Display for LogicalName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LogicalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors related to logical names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// Stem has no alphanumeric characters
    #[error("'{0}' has no alphanumeric characters to build a name from")]
    Empty(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalize_lowercases() {
        assert_eq!(LogicalName::normalize("Arrow").unwrap().as_str(), "arrow");
    }

    #[test]
    fn normalize_spaces_become_hyphen() {
        assert_eq!(
            LogicalName::normalize("Icon One").unwrap().as_str(),
            "icon-one"
        );
    }

    #[test]
    fn normalize_collapses_runs() {
        assert_eq!(
            LogicalName::normalize("arrow__left--big").unwrap().as_str(),
            "arrow-left-big"
        );
    }

    #[test]
    fn normalize_trims_edges() {
        assert_eq!(LogicalName::normalize("  Star!").unwrap().as_str(), "star");
        assert_eq!(LogicalName::normalize("_x_").unwrap().as_str(), "x");
    }

    #[test]
    fn normalize_non_ascii_is_separator() {
        assert_eq!(
            LogicalName::normalize("café-au-lait").unwrap().as_str(),
            "caf-au-lait"
        );
    }

    #[test]
    fn normalize_empty_fails() {
        assert_eq!(
            LogicalName::normalize("__"),
            Err(NameError::Empty("__".to_string()))
        );
        assert!(LogicalName::normalize("").is_err());
    }

    #[test]
    fn collision_after_normalization() {
        let a = LogicalName::normalize("Icon One").unwrap();
        let b = LogicalName::normalize("icon-one").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn selector_uses_prefix() {
        let name = LogicalName::normalize("home").unwrap();
        assert_eq!(name.selector(".icon-"), ".icon-home");
    }

    proptest! {
        #[test]
        fn prop_normalized_is_css_safe(stem in ".{0,40}") {
            if let Ok(name) = LogicalName::normalize(&stem) {
                let s = name.as_str();
                prop_assert!(s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
                prop_assert!(!s.starts_with('-'));
                prop_assert!(!s.ends_with('-'));
                prop_assert!(!s.contains("--"));
            }
        }

        #[test]
        fn prop_normalize_is_idempotent(stem in "[a-zA-Z0-9 _.-]{1,40}") {
            if let Ok(name) = LogicalName::normalize(&stem) {
                let again = LogicalName::normalize(name.as_str()).unwrap();
                prop_assert_eq!(name, again);
            }
        }
    }
}
