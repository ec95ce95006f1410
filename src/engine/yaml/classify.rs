//! Quoting decision for placeholders.

use serde::de::IgnoredAny;

/// How a placeholder is written into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    /// Value is already a typed token (number, bool, null, JSON string,
    /// array or object); the placeholder is emitted as is.
    Bare,
    /// Anything else; the placeholder is wrapped in double quotes.
    Double,
}

impl Quoting {
    pub fn apply(self, placeholder: &str) -> String {
        match self {
            Quoting::Bare => placeholder.to_string(),
            Quoting::Double => format!("\"{}\"", placeholder),
        }
    }
}

/// Decide the quoting of a placeholder from the raw value of its key.
///
/// Only whether `raw` is valid JSON matters; the parsed value is discarded.
pub fn classify(raw: &str) -> Quoting {
    if serde_json::from_str::<IgnoredAny>(raw).is_ok() {
        Quoting::Bare
    } else {
        Quoting::Double
    }
}
