//! Output sink for rendered documents.

use super::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where a rendered document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    /// Output for an optional target path; no path means stdout.
    pub fn from_target(target: Option<&Path>) -> Self {
        match target {
            Some(path) => Output::File(path.to_path_buf()),
            None => Output::Stdout,
        }
    }

    /// Open the sink. Files are created (or truncated) at this point, not
    /// before, so a render that fails early leaves no file behind.
    pub fn open(&self) -> Result<Box<dyn Write>, Error> {
        match self {
            Output::Stdout => Ok(Box::new(io::stdout().lock())),
            Output::File(path) => {
                let file = File::create(path).map_err(|e| {
                    Error::Io(format!(
                        "unable to create output file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

impl std::fmt::Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Output::Stdout => write!(f, "<stdout>"),
            Output::File(path) => write!(f, "{}", path.display()),
        }
    }
}
