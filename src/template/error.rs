//! Error types for template rendering.

use std::fmt;
use std::io;

/// Error type for every stage of a render.
#[derive(Debug)]
pub enum Error {
    /// Template configuration violations, all of them
    Validation(Vec<String>),
    /// Filter expression does not compile
    FilterCompile(String),
    /// Key source failure reported in the stream
    Backend(String),
    /// Key name yields an unusable path
    Path(String),
    /// Same segment used both as a container and as a value
    ConflictingKeyShape {
        segment: String,
        existing: String,
        incoming: String,
    },
    /// Output sink failure
    Io(String),
    /// Generic error
    Base(String),
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<fmt::Error> for Error {
    fn from(e: fmt::Error) -> Self {
        Error::Base(format!("failed to format document: {}", e))
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Self {
        Error::FilterCompile(e.to_string())
    }
}

impl From<String> for Error {
    fn from(e: String) -> Self {
        Error::Base(e)
    }
}

impl From<&str> for Error {
    fn from(e: &str) -> Self {
        Error::Base(e.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Validation(violations) => {
                write!(f, "invalid template: {}", violations.join("; "))
            }
            Error::FilterCompile(e) => write!(f, "unable to compile filter expression: {}", e),
            Error::Backend(e) => write!(f, "backend error: {}", e),
            Error::Path(e) => write!(f, "{}", e),
            Error::ConflictingKeyShape {
                segment,
                existing,
                incoming,
            } => write!(
                f,
                "conflicting key shape: '{}' and '{}' use '{}' both as a container and as a value",
                existing, incoming, segment
            ),
            Error::Io(e) => write!(f, "{}", e),
            Error::Base(e) => write!(f, "{}", e),
        }
    }
}
