//! Nested document tree built from key paths.

use crate::template::Error;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// A rendered value and the key it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub key: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(Leaf),
    Container(Tree),
}

/// Mapping from path segment to node, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: IndexMap<String, Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, segment: &str) -> Option<&Node> {
        self.entries.get(segment)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.entries.iter()
    }

    /// First leaf found under this tree, depth first.
    pub fn first_leaf(&self) -> Option<&Leaf> {
        self.entries.values().find_map(|node| match node {
            Node::Leaf(leaf) => Some(leaf),
            Node::Container(child) => child.first_leaf(),
        })
    }

    /// Place `leaf` at `path`, creating intermediate containers.
    ///
    /// A leaf already at `path` is replaced. A segment used as a value by one
    /// key and as a container by another is a `ConflictingKeyShape` error,
    /// whichever key came first.
    pub fn insert(&mut self, path: &[String], leaf: Leaf) -> Result<(), Error> {
        let Some((last, parents)) = path.split_last() else {
            return Err(Error::Path(format!("empty path for key '{}'", leaf.key)));
        };

        let mut entries = &mut self.entries;
        for segment in parents {
            let node = entries
                .entry(segment.clone())
                .or_insert_with(|| Node::Container(Tree::new()));
            entries = match node {
                Node::Container(child) => &mut child.entries,
                Node::Leaf(existing) => {
                    return Err(Error::ConflictingKeyShape {
                        segment: segment.clone(),
                        existing: existing.key.clone(),
                        incoming: leaf.key,
                    });
                }
            };
        }

        match entries.entry(last.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(Node::Leaf(leaf));
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Node::Leaf(existing) => {
                    log::debug!("key {} replaces {}", leaf.key, existing.key);
                    *existing = leaf;
                }
                Node::Container(child) => {
                    let existing = child
                        .first_leaf()
                        .map(|l| l.key.clone())
                        .unwrap_or_else(|| last.clone());
                    return Err(Error::ConflictingKeyShape {
                        segment: last.clone(),
                        existing,
                        incoming: leaf.key,
                    });
                }
            },
        }
        Ok(())
    }
}
