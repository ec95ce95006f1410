//! YAML/JSON document key source.
//!
//! Each file holds one document whose nested mappings are flattened into
//! key paths: `{db: {host: x}}` yields `/db/host = x`, and sequence items
//! are addressed by index (`/hosts/0`).

use super::{spawn, Emitter, KeySource, KeyStream, Query};
use crate::template::{Error, RawKey};
use serde_yaml::Value;
use std::fs;
use std::path::PathBuf;

/// Key source reading documents from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    paths: Vec<PathBuf>,
}

impl FileSource {
    pub fn new(paths: Vec<PathBuf>) -> Result<Self, Error> {
        if paths.is_empty() {
            return Err(Error::Base(
                "file backend requires at least one --file".to_string(),
            ));
        }
        Ok(Self { paths })
    }
}

impl KeySource for FileSource {
    fn keys(&self, query: &Query) -> KeyStream {
        let paths = self.paths.clone();
        let query = query.clone();
        spawn("file", move |emitter| {
            for path in paths {
                log::debug!("reading keys from {}", path.display());
                let content = fs::read_to_string(&path).map_err(|e| {
                    Error::Backend(format!("unable to read '{}': {}", path.display(), e))
                })?;
                let document: Value = serde_yaml::from_str(&content).map_err(|e| {
                    Error::Backend(format!("unable to parse '{}': {}", path.display(), e))
                })?;
                if !matches!(document, Value::Mapping(_)) {
                    return Err(Error::Backend(format!(
                        "invalid document '{}': top level must be a mapping",
                        path.display()
                    )));
                }
                if !flatten(&document, "", &query, emitter)? {
                    break;
                }
            }
            Ok(())
        })
    }
}

/// Emit every scalar under `value`. Returns `false` once the consumer stops
/// listening.
fn flatten(value: &Value, name: &str, query: &Query, emitter: &mut Emitter) -> Result<bool, Error> {
    match value {
        Value::Mapping(map) => {
            for (k, v) in map {
                let segment = scalar_to_string(k).ok_or_else(|| {
                    Error::Backend(format!("unsupported mapping key under '{}'", name))
                })?;
                if !flatten(v, &format!("{}/{}", name, segment), query, emitter)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Value::Sequence(seq) => {
            for (i, v) in seq.iter().enumerate() {
                if !flatten(v, &format!("{}/{}", name, i), query, emitter)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Value::Tagged(tagged) => flatten(&tagged.value, name, query, emitter),
        scalar => {
            if !query.admits(name) {
                return Ok(true);
            }
            let value = scalar_to_string(scalar).unwrap_or_default();
            Ok(emitter.emit(RawKey::new(name, value)))
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
