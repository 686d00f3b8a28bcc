use std::collections::HashMap;

use crate::node::{Node, Row, Tree};
use crate::path::{Path, PathKey};

/// A node in pre-order position, annotated with its address in the tree.
///
/// Children are not carried along: the nesting is expressed through
/// `parent_path_key`, which is what [`build`] reads when folding the list back into
/// a [`Tree`].
#[derive(Clone, Debug, PartialEq)]
pub struct FlattenedNode<P, R = P> {
    pub id: String,
    pub collapsed: bool,
    pub payload: P,
    pub rows: Vec<Row<R>>,
    /// Number of direct children in the tree this entry was flattened from.
    pub child_count: usize,
    pub parent_path_key: Option<PathKey>,
    pub depth: usize,
    /// Position in the flattened sequence at flatten time.
    pub index: usize,
    pub path: Path,
    pub path_key: PathKey,
}

impl<P, R> FlattenedNode<P, R> {
    #[inline]
    pub fn has_children(&self) -> bool {
        self.child_count > 0
    }

    #[inline]
    pub fn hides_children(&self) -> bool {
        self.collapsed && self.has_children()
    }
}

/// Flatten a tree in pre-order: every node is immediately followed by its subtree.
pub fn flatten<P: Clone, R: Clone>(tree: &[Node<P, R>]) -> Vec<FlattenedNode<P, R>> {
    let mut out = Vec::new();
    flatten_into(tree, None, &Path::default(), 0, &mut out);
    out
}

fn flatten_into<P: Clone, R: Clone>(
    items: &[Node<P, R>],
    parent_path_key: Option<&PathKey>,
    parent_path: &Path,
    depth: usize,
    out: &mut Vec<FlattenedNode<P, R>>,
) {
    for node in items {
        let path = parent_path.child(node.id.clone());
        let path_key = path.key();
        out.push(FlattenedNode {
            id: node.id.clone(),
            collapsed: node.collapsed,
            payload: node.payload.clone(),
            rows: node.rows.clone(),
            child_count: node.children.len(),
            parent_path_key: parent_path_key.cloned(),
            depth,
            index: out.len(),
            path: path.clone(),
            path_key: path_key.clone(),
        });
        flatten_into(&node.children, Some(&path_key), &path, depth + 1, out);
    }
}

/// Fold a flattened list back into a nested tree.
///
/// Each entry becomes a child of the entry whose `path_key` equals its
/// `parent_path_key`, or of the synthetic root when it has none. Siblings keep the
/// relative order they have in `items`. Only `parent_path_key` is consulted, so a list
/// in which one entry was re-parented (the commit step of a drag) builds the moved
/// tree, even if that entry now sits after its own descendants.
///
/// # Panics
///
/// Panics if a `parent_path_key` names a key that is not present in `items`, or if the
/// parent links form a cycle. Both mean the list was not derived from a tree.
pub fn build<P, R>(items: Vec<FlattenedNode<P, R>>) -> Tree<P, R> {
    let slots: HashMap<&PathKey, usize> = items
        .iter()
        .enumerate()
        .map(|(ix, item)| (&item.path_key, ix))
        .collect();

    let mut root_children = Vec::new();
    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); items.len()];
    for (ix, item) in items.iter().enumerate() {
        match item.parent_path_key.as_ref() {
            None => root_children.push(ix),
            Some(parent_key) => {
                let Some(&parent_ix) = slots.get(parent_key) else {
                    panic!(
                        "parent path key {parent_key} of {} is not in the flattened list",
                        item.path_key
                    );
                };
                children_of[parent_ix].push(ix);
            }
        }
    }
    drop(slots);

    let item_count = items.len();
    let mut pending: Vec<Option<FlattenedNode<P, R>>> = items.into_iter().map(Some).collect();
    let mut attached = 0;
    let tree: Tree<P, R> = root_children
        .into_iter()
        .map(|ix| assemble(ix, &mut pending, &children_of, &mut attached))
        .collect();

    assert_eq!(
        attached, item_count,
        "flattened list contains parent links that do not lead to the root"
    );
    tree
}

fn assemble<P, R>(
    ix: usize,
    pending: &mut [Option<FlattenedNode<P, R>>],
    children_of: &[Vec<usize>],
    attached: &mut usize,
) -> Node<P, R> {
    let Some(item) = pending[ix].take() else {
        unreachable!("every entry has exactly one parent");
    };
    *attached += 1;

    let children = children_of[ix]
        .iter()
        .map(|&child_ix| assemble(child_ix, pending, children_of, attached))
        .collect();

    Node {
        id: item.id,
        children,
        collapsed: item.collapsed,
        payload: item.payload,
        rows: item.rows,
    }
}
