//! Key records and path derivation.

use super::error::Error;

/// A key/value pair as reported by a key source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKey {
    pub name: String,
    pub value: String,
}

impl RawKey {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One item of a key stream. An `Err` item is terminal: sources emit at
/// most one and then close the stream.
pub type KeyRecord = Result<RawKey, Error>;

/// A key that went through the filter stage and is ready to be placed in
/// a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    /// Fully-qualified name, as the source reported it
    pub name: String,
    /// Name with the template prefix removed
    pub relative: String,
    pub value: String,
    /// Segments of `relative`, never empty
    pub path: Vec<String>,
}

/// Remove the first occurrence of `prefix` from `name`.
///
/// This is a plain substring replacement, not an anchored strip: a prefix
/// found in the middle of the name is removed as well.
pub fn strip_prefix(name: &str, prefix: &str) -> String {
    name.replacen(prefix, "", 1)
}

/// Split `relative`, the prefix-stripped form of the key `name`, into path
/// segments.
///
/// A single leading delimiter is ignored, so `/db/host` and `db/host` both
/// give `["db", "host"]`. Empty segments (`db//host`, `db/`, or an empty
/// name) are rejected since they cannot be rendered as mapping keys.
pub fn split_path(name: &str, relative: &str, delimiter: &str) -> Result<Vec<String>, Error> {
    let trimmed = relative.strip_prefix(delimiter).unwrap_or(relative);
    let path: Vec<String> = trimmed.split(delimiter).map(String::from).collect();
    if path.iter().any(|segment| segment.is_empty()) {
        return Err(Error::Path(format!(
            "invalid key '{}', empty path segment in '{}' with delimiter '{}'",
            name, relative, delimiter
        )));
    }
    Ok(path)
}
