//! Environment variable key source.
//!
//! Variables are mapped to key paths the way confd's env backend reads
//! them: `APP_DB_HOST` is the key `/app/db/host`.

use super::{spawn, KeySource, KeyStream, Query};
use crate::template::RawKey;

/// Key source reading the process environment.
#[derive(Debug, Default, Clone)]
pub struct EnvSource {
    vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source over a fixed set of variables instead of the live environment.
    pub fn with_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    fn snapshot(&self) -> Vec<(String, String)> {
        if let Some(vars) = &self.vars {
            return vars.clone();
        }
        std::env::vars_os()
            .filter_map(|(k, v)| match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => Some((k, v)),
                (k, _) => {
                    log::trace!("skipping non UTF-8 environment variable {:?}", k);
                    None
                }
            })
            .collect()
    }
}

/// Whether a variable name maps to a key without empty path segments.
///
/// Shells export names such as `_`, which would otherwise become `//`.
pub fn is_key_var(var: &str) -> bool {
    !var.is_empty() && !var.starts_with('_') && !var.ends_with('_') && !var.contains("__")
}

/// Key name for an environment variable name.
pub fn key_name(var: &str) -> String {
    format!("/{}", var.to_lowercase().replace('_', "/"))
}

impl KeySource for EnvSource {
    fn keys(&self, query: &Query) -> KeyStream {
        let mut vars = self.snapshot();
        let query = query.clone();
        spawn("env", move |emitter| {
            vars.sort();
            for (var, value) in vars {
                if !is_key_var(&var) {
                    log::trace!("skipping environment variable {}, not a key path", var);
                    continue;
                }
                let name = key_name(&var);
                if !query.admits(&name) {
                    continue;
                }
                if !emitter.emit(RawKey::new(name, value)) {
                    break;
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_name() {
        assert_eq!(key_name("APP_DB_HOST"), "/app/db/host");
        assert_eq!(key_name("PORT"), "/port");
    }

    #[test]
    fn test_keys_under_prefix() {
        let source = EnvSource::with_vars([
            ("CFG_DB_PORT", "5432"),
            ("HOME", "/root"),
            ("CFG_DB_HOST", "localhost"),
        ]);
        let keys: Vec<RawKey> = source
            .keys(&Query::new("/cfg/"))
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(
            keys,
            vec![
                RawKey::new("/cfg/db/host", "localhost"),
                RawKey::new("/cfg/db/port", "5432"),
            ]
        );
    }

    #[test]
    fn test_is_key_var() {
        assert!(is_key_var("APP_DB_HOST"));
        assert!(!is_key_var(""));
        assert!(!is_key_var("_"));
        assert!(!is_key_var("_APP"));
        assert!(!is_key_var("APP_"));
        assert!(!is_key_var("A__B"));
    }

    #[test]
    fn test_underscore_edges_are_skipped_at_root() {
        let source = EnvSource::with_vars([
            ("_", "/usr/bin/x"),
            ("A__B", "1"),
            ("PORT_", "2"),
            ("APP_PORT", "80"),
        ]);
        let keys: Vec<RawKey> = source
            .keys(&Query::new("/"))
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(keys, vec![RawKey::new("/app/port", "80")]);
    }

    #[test]
    fn test_live_environment_is_read() {
        std::env::set_var("CONFD_TEMPLATE_ENV_TEST_KEY", "42");
        let keys: Vec<RawKey> = EnvSource::new()
            .keys(&Query::new("/confd/template/env/test/"))
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(
            keys,
            vec![RawKey::new("/confd/template/env/test/key", "42")]
        );
    }
}
