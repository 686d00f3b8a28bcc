use serde::{Deserialize, Serialize};

/// Ordered sequence of root nodes.
pub type Tree<P, R = P> = Vec<Node<P, R>>;

/// A question in the tree.
///
/// `id` only has to be unique among the node's siblings. `rows` holds the node's own
/// sortable list (answer options), which is independent from `children`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node<P, R = P> {
    pub id: String,
    #[serde(default)]
    pub children: Vec<Node<P, R>>,
    #[serde(default)]
    pub collapsed: bool,
    pub payload: P,
    #[serde(default)]
    pub rows: Vec<Row<R>>,
}

impl<P, R> Node<P, R> {
    pub fn new(id: impl Into<String>, payload: P) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
            collapsed: false,
            payload,
            rows: Vec::new(),
        }
    }

    pub fn child(mut self, child: Node<P, R>) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl Into<Vec<Node<P, R>>>) -> Self {
        self.children.extend(children.into());
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn row(mut self, row: Row<R>) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl Into<Vec<Row<R>>>) -> Self {
        self.rows.extend(rows.into());
        self
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Collapsed and actually hiding something.
    #[inline]
    pub fn hides_children(&self) -> bool {
        self.collapsed && self.has_children()
    }
}

/// One entry of a node's row list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row<R> {
    pub id: String,
    pub content: R,
}

impl<R> Row<R> {
    pub fn new(id: impl Into<String>, content: R) -> Self {
        Self {
            id: id.into(),
            content,
        }
    }
}
