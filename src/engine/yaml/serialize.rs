//! Text rendering of a document tree.

use super::tree::{Node, Tree};
use crate::template::Error;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Render `tree` as YAML-shaped text.
///
/// Entries are visited in segment name order at every level, so the same
/// tree always renders to the same bytes whatever order its keys arrived
/// in. Leaf text is written verbatim.
pub fn serialize(tree: &Tree) -> Result<String, Error> {
    let mut out = String::new();
    render(tree, 0, &mut out)?;
    Ok(out)
}

/// Render `tree` at the given indent level, appending to `out`.
pub fn render(tree: &Tree, level: usize, out: &mut String) -> Result<(), Error> {
    let whitespace = INDENT.repeat(level);
    let mut entries: Vec<(&String, &Node)> = tree.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (segment, node) in entries {
        match node {
            Node::Container(child) => {
                writeln!(out, "{}{}:", whitespace, segment)?;
                render(child, level + 1, out).map_err(|e| {
                    log::error!("render error detected under {}: {}", segment, e);
                    e
                })?;
            }
            Node::Leaf(leaf) => {
                writeln!(out, "{}{}: {}", whitespace, segment, leaf.text)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::tree::Leaf;
    use super::*;
    use indoc::indoc;

    fn insert(tree: &mut Tree, segments: &[&str], text: &str) {
        let path: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
        let key = format!("/{}", segments.join("/"));
        tree.insert(&path, Leaf { key, text: text.to_string() })
            .unwrap();
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(serialize(&Tree::new()).unwrap(), "");
    }

    #[test]
    fn test_nested_indentation() {
        let mut tree = Tree::new();
        insert(&mut tree, &["a", "b", "c"], "1");
        insert(&mut tree, &["a", "d"], "2");
        insert(&mut tree, &["e"], "3");
        assert_eq!(
            serialize(&tree).unwrap(),
            indoc! {"
                a:
                  b:
                    c: 1
                  d: 2
                e: 3
            "}
        );
    }

    #[test]
    fn test_sorted_regardless_of_insertion_order() {
        let mut first = Tree::new();
        insert(&mut first, &["z", "b"], "1");
        insert(&mut first, &["a"], "2");
        insert(&mut first, &["z", "a"], "3");

        let mut second = Tree::new();
        insert(&mut second, &["a"], "2");
        insert(&mut second, &["z", "a"], "3");
        insert(&mut second, &["z", "b"], "1");

        let rendered = serialize(&first).unwrap();
        assert_eq!(rendered, serialize(&second).unwrap());
        assert_eq!(rendered, "a: 2\nz:\n  a: 3\n  b: 1\n");
    }

    #[test]
    fn test_serializing_twice_is_identical() {
        let mut tree = Tree::new();
        insert(&mut tree, &["db", "host"], "\"{{ getv \"/db/host\" }}\"");
        insert(&mut tree, &["db", "port"], "{{ getv \"/db/port\" }}");
        assert_eq!(serialize(&tree).unwrap(), serialize(&tree).unwrap());
    }

    #[test]
    fn test_render_at_level() {
        let mut tree = Tree::new();
        insert(&mut tree, &["k"], "v");
        let mut out = String::from("root:\n");
        render(&tree, 1, &mut out).unwrap();
        assert_eq!(out, "root:\n  k: v\n");
    }
}
