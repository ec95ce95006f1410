//! YAML template engine.
//!
//! Keys are folded into a [`Tree`] one path segment per nesting level; each
//! leaf becomes a confd `getv` placeholder for the original key name.
//!
//! - [`tree`]: nested document tree and conflict detection
//! - [`classify`]: quoting decision from the raw value
//! - [`serialize`]: indented text rendering

pub mod classify;
pub mod serialize;
pub mod tree;

pub use classify::{classify, Quoting};
pub use serialize::serialize;
pub use tree::{Leaf, Node, Tree};

use super::Engine;
use crate::template::{Error, Key, Output};
use std::io::Write;

/// Renders keys as an indented YAML template for confd.
#[derive(Debug, Clone, Default)]
pub struct YamlEngine {
    /// Give every placeholder a `"null"` default so missing keys do not
    /// fail the confd render.
    optional: bool,
}

impl YamlEngine {
    pub fn new(optional: bool) -> Self {
        Self { optional }
    }

    /// confd expression reading `name`.
    pub fn placeholder(&self, name: &str) -> String {
        if self.optional {
            format!("{{{{ getv \"{}\" \"null\" }}}}", name)
        } else {
            format!("{{{{ getv \"{}\" }}}}", name)
        }
    }

    /// Leaf for a key: its placeholder, quoted unless the value is typed.
    pub fn leaf(&self, key: &Key) -> Leaf {
        let text = classify(&key.value).apply(&self.placeholder(&key.name));
        Leaf {
            key: key.name.clone(),
            text,
        }
    }

    /// Fold a key stream into a tree, stopping at the first error.
    pub fn build(
        &self,
        keys: &mut dyn Iterator<Item = Result<Key, Error>>,
    ) -> Result<Tree, Error> {
        let mut tree = Tree::new();
        for key in keys {
            let key = key?;
            if let Err(e) = tree.insert(&key.path, self.leaf(&key)) {
                log::error!("error appending key {}", key.relative);
                return Err(e);
            }
        }
        Ok(tree)
    }
}

impl Engine for YamlEngine {
    fn render(
        &self,
        keys: &mut dyn Iterator<Item = Result<Key, Error>>,
        output: &Output,
    ) -> Result<(), Error> {
        let tree = self.build(keys)?;
        log::debug!("serializing {} top level entries", tree.len());
        let document = serialize(&tree)?;

        let mut out = output.open()?;
        out.write_all(document.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| {
                log::error!("error writing rendered template to {}", output);
                Error::Io(format!("unable to write to {}: {}", output, e))
            })
    }
}
