//! Option projection strategies.
//!
//! Dropdown widgets are generic over an opaque option type `T`. Two
//! caller-supplied projections define how the widget sees an option:
//! [`LabelExtractor`] produces the display/search text, and the optional
//! [`KeyExtractor`] produces a stable identity. When no key extractor is
//! supplied, widgets fall back to label equality for selection matching
//! and positional tokens for row identity — a documented default, not an
//! error.
//!
//! Both traits are blanket-implemented for closures:
//!
//! ```ignore
//! struct Country { code: &'static str, name: &'static str }
//!
//! let select = Select::new(|c: &Country| c.name.to_string())
//!     .with_key(|c: &Country| OptionKey::from(c.code));
//! ```

use std::fmt;

/// Stable identity for an option: a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Text(String),
    Number(i64),
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKey::Text(s) => write!(f, "{s}"),
            OptionKey::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for OptionKey {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for OptionKey {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for OptionKey {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for OptionKey {
    fn from(n: u32) -> Self {
        Self::Number(n as i64)
    }
}

/// Strategy for extracting the display/search label of an option.
pub trait LabelExtractor<T>: Send + Sync {
    /// Display text for this option.
    ///
    /// This is what gets shown in the dropdown and matched when filtering.
    fn label_of(&self, option: &T) -> String;
}

impl<T, F> LabelExtractor<T> for F
where
    F: Fn(&T) -> String + Send + Sync,
{
    fn label_of(&self, option: &T) -> String {
        self(option)
    }
}

/// Strategy for extracting a stable identity from an option.
///
/// Used for selection matching and for row identity tokens.
pub trait KeyExtractor<T>: Send + Sync {
    /// Unique identifier for this option.
    fn key_of(&self, option: &T) -> OptionKey;
}

impl<T, F, K> KeyExtractor<T> for F
where
    F: Fn(&T) -> K + Send + Sync,
    K: Into<OptionKey>,
{
    fn key_of(&self, option: &T) -> OptionKey {
        self(option).into()
    }
}
