//! Path-addressed edits on the nested tree, plus the collapse filter on the flattened
//! form.
//!
//! Paths are matched id by id from the roots down, so every prefix of a path must be a
//! real ancestor chain of the current tree. An empty or unmatched path leaves the tree
//! unchanged. Edits return a new tree and never touch the input.

use std::collections::HashSet;

use crate::flatten::FlattenedNode;
use crate::node::{Node, Row, Tree};
use crate::path::{Path, PathKey};

/// Replace the node at `path` with `f(node)`.
pub fn update_at_path<P: Clone, R: Clone>(
    tree: &[Node<P, R>],
    path: &Path,
    f: impl FnOnce(Node<P, R>) -> Node<P, R>,
) -> Tree<P, R> {
    rewrite(tree.to_vec(), path.ids(), |node| Some(f(node)))
}

/// Drop the node at `path` together with its whole subtree.
pub fn remove_subtree<P: Clone, R: Clone>(tree: &[Node<P, R>], path: &Path) -> Tree<P, R> {
    rewrite(tree.to_vec(), path.ids(), |_| None)
}

pub fn toggle_collapsed<P: Clone, R: Clone>(tree: &[Node<P, R>], path: &Path) -> Tree<P, R> {
    update_at_path(tree, path, |mut node| {
        node.collapsed = !node.collapsed;
        node
    })
}

pub fn set_rows<P: Clone, R: Clone>(
    tree: &[Node<P, R>],
    path: &Path,
    rows: Vec<Row<R>>,
) -> Tree<P, R> {
    update_at_path(tree, path, |mut node| {
        node.rows = rows;
        node
    })
}

fn rewrite<P, R>(
    mut items: Vec<Node<P, R>>,
    ids: &[String],
    f: impl FnOnce(Node<P, R>) -> Option<Node<P, R>>,
) -> Vec<Node<P, R>> {
    let Some((head, rest)) = ids.split_first() else {
        return items;
    };
    let Some(ix) = items.iter().position(|node| node.id == *head) else {
        return items;
    };

    if rest.is_empty() {
        let node = items.remove(ix);
        if let Some(node) = f(node) {
            items.insert(ix, node);
        }
    } else {
        let children = std::mem::take(&mut items[ix].children);
        items[ix].children = rewrite(children, rest, f);
    }
    items
}

pub fn find_node<'a, P, R>(tree: &'a [Node<P, R>], path: &Path) -> Option<&'a Node<P, R>> {
    let (head, rest) = path.ids().split_first()?;
    let mut node = tree.iter().find(|node| node.id == *head)?;
    for id in rest {
        node = node.children.iter().find(|child| child.id == *id)?;
    }
    Some(node)
}

/// Number of terminal descendants below the node at `path`.
///
/// A childless descendant counts as one; a descendant with children contributes only
/// what its own children contribute. The node itself is not counted, and an unknown
/// path counts zero.
pub fn count_descendant_leaves<P, R>(tree: &[Node<P, R>], path: &Path) -> usize {
    find_node(tree, path).map_or(0, |node| count_leaves(&node.children))
}

fn count_leaves<P, R>(items: &[Node<P, R>]) -> usize {
    items
        .iter()
        .map(|node| {
            if node.children.is_empty() {
                1
            } else {
                count_leaves(&node.children)
            }
        })
        .sum()
}

/// Keys of the entries that are collapsed and have something to hide.
pub fn collapsed_path_keys<P, R>(items: &[FlattenedNode<P, R>]) -> Vec<PathKey> {
    items
        .iter()
        .filter(|item| item.hides_children())
        .map(|item| item.path_key.clone())
        .collect()
}

/// Remove the descendants of the given keys from a flattened list.
///
/// The entries named by `hidden_parents` stay; everything below them goes. Relies on
/// pre-order: a parent is always seen before its children.
pub fn filter_collapsed_descendants<P, R>(
    mut items: Vec<FlattenedNode<P, R>>,
    hidden_parents: impl IntoIterator<Item = PathKey>,
) -> Vec<FlattenedNode<P, R>> {
    let mut excluded: HashSet<PathKey> = hidden_parents.into_iter().collect();
    items.retain(|item| {
        let Some(parent) = item.parent_path_key.as_ref() else {
            return true;
        };
        if !excluded.contains(parent) {
            return true;
        }
        if item.has_children() {
            excluded.insert(item.path_key.clone());
        }
        false
    });
    items
}
