use crate::config::TreeConfig;
use crate::flatten::{FlattenedNode, build, flatten};
use crate::node::{Node, Row, Tree};
use crate::ops::{
    collapsed_path_keys, count_descendant_leaves, filter_collapsed_descendants, find_node,
    remove_subtree, set_rows, toggle_collapsed, update_at_path,
};
use crate::path::{Path, PathKey};
use crate::projection::{Projection, project, sibling_collision};
use crate::reorder::move_element;
use crate::rows::{RowDrop, RowReorder, plan_row_reorder};

/// What is being dragged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragPayload {
    Question { path_key: PathKey },
    Row { container: PathKey, row_id: String },
}

/// What the pointer is over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    Question(PathKey),
    Row { container: PathKey, row_id: String },
}

/// Result of [`QuestionTreeState::on_drag_end`].
#[derive(Clone, Debug, PartialEq)]
pub enum DragOutcome {
    /// The tree was rebuilt with the dragged node at `to`.
    Moved {
        from: PathKey,
        to: PathKey,
        projection: Projection,
    },
    /// The drop would have created duplicate siblings; the tree is unchanged.
    Rejected(Projection),
    RowsReordered {
        container: PathKey,
        reorder: RowReorder,
    },
    Unchanged,
}

#[derive(Clone, Debug, PartialEq)]
struct DragSession {
    payload: DragPayload,
    over: Option<PathKey>,
    offset_x: f32,
}

/// Owner of a question tree and the drag session in progress.
///
/// The drag collaborator forwards its lifecycle events to the `on_drag_*` handlers;
/// the renderer reads [`visible_nodes`](Self::visible_nodes),
/// [`projection`](Self::projection) and [`child_count`](Self::child_count), which are
/// recomputed on every call. The tree itself is only replaced, never edited in place,
/// and only [`on_drag_end`](Self::on_drag_end) replaces it during a drag.
#[derive(Clone, Debug)]
pub struct QuestionTreeState<P, R = P> {
    tree: Tree<P, R>,
    config: TreeConfig,
    drag: Option<DragSession>,
}

impl<P: Clone, R: Clone> QuestionTreeState<P, R> {
    pub fn new(tree: Tree<P, R>) -> Self {
        Self {
            tree,
            config: TreeConfig::default(),
            drag: None,
        }
    }

    /// An invalid indentation width is replaced by the default one; the toggles are kept.
    pub fn with_config(mut self, mut config: TreeConfig) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("{err}; using the default indentation width");
            config.indentation_width = TreeConfig::default().indentation_width;
        }
        self.config = config;
        self
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn tree(&self) -> &[Node<P, R>] {
        &self.tree
    }

    pub fn into_tree(self) -> Tree<P, R> {
        self.tree
    }

    /// Replace the whole tree. Any drag in progress is dropped.
    pub fn set_tree(&mut self, tree: Tree<P, R>) {
        self.tree = tree;
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Key of the question being dragged, if a question drag is in progress.
    pub fn active_path_key(&self) -> Option<&PathKey> {
        match self.drag.as_ref().map(|drag| &drag.payload) {
            Some(DragPayload::Question { path_key }) => Some(path_key),
            _ => None,
        }
    }

    /// Container and id of the row being dragged, if a row drag is in progress.
    pub fn active_row(&self) -> Option<(&PathKey, &str)> {
        match self.drag.as_ref().map(|drag| &drag.payload) {
            Some(DragPayload::Row { container, row_id }) => Some((container, row_id.as_str())),
            _ => None,
        }
    }

    pub fn over_path_key(&self) -> Option<&PathKey> {
        self.drag.as_ref().and_then(|drag| drag.over.as_ref())
    }

    pub fn drag_offset(&self) -> f32 {
        self.drag.as_ref().map_or(0., |drag| drag.offset_x)
    }

    /// The flattened rows to render: collapsed subtrees and the dragged node's own
    /// descendants are left out.
    pub fn visible_nodes(&self) -> Vec<FlattenedNode<P, R>> {
        visible_for(&self.tree, self.active_path_key())
    }

    pub fn visible_path_keys(&self) -> Vec<PathKey> {
        self.visible_nodes()
            .into_iter()
            .map(|node| node.path_key)
            .collect()
    }

    /// Live projection of the question drag, once it hovers something.
    pub fn projection(&self) -> Option<Projection> {
        let active = self.active_path_key()?;
        let over = self.over_path_key()?;
        let visible = self.visible_nodes();
        Some(project(
            &visible,
            active,
            over,
            self.drag_offset(),
            self.config.indentation_width,
        ))
    }

    /// Depth to draw `node` at: the projected depth for the dragged node, its own depth
    /// otherwise.
    pub fn display_depth(
        &self,
        node: &FlattenedNode<P, R>,
        projection: Option<&Projection>,
    ) -> usize {
        match (self.active_path_key(), projection) {
            (Some(active), Some(projection)) if *active == node.path_key => projection.depth,
            _ => node.depth,
        }
    }

    pub fn child_count(&self, path: &Path) -> usize {
        count_descendant_leaves(&self.tree, path)
    }

    pub fn active_node(&self) -> Option<FlattenedNode<P, R>> {
        let active = self.active_path_key()?;
        flatten(&self.tree)
            .into_iter()
            .find(|node| node.path_key == *active)
    }

    /// Badge count for the drag overlay.
    pub fn active_child_count(&self) -> usize {
        self.active_node()
            .map_or(0, |node| self.child_count(&node.path))
    }

    /// Begin a drag. A question that is not currently visible cannot be picked up, so
    /// such a start is ignored.
    pub fn on_drag_start(&mut self, payload: DragPayload) {
        if let DragPayload::Question { path_key } = &payload
            && !visible_for(&self.tree, None)
                .iter()
                .any(|node| node.path_key == *path_key)
        {
            log::debug!("ignoring drag start on {path_key}: not a visible question");
            return;
        }

        if let Some(previous) = self.drag.as_ref() {
            log::warn!(
                "drag started while {:?} was still active; discarding it",
                previous.payload
            );
        }

        let over = match &payload {
            DragPayload::Question { path_key } => {
                log::debug!("question drag started: {path_key}");
                Some(path_key.clone())
            }
            DragPayload::Row { container, row_id } => {
                log::debug!("row drag started: {row_id} in {container}");
                None
            }
        };

        self.drag = Some(DragSession {
            payload,
            over,
            offset_x: 0.,
        });
    }

    /// `delta_x` is the cumulative horizontal displacement since the drag started.
    pub fn on_drag_move(&mut self, delta_x: f32) {
        if let Some(drag) = self.drag.as_mut()
            && matches!(drag.payload, DragPayload::Question { .. })
        {
            drag.offset_x = delta_x;
        }
    }

    pub fn on_drag_over(&mut self, target: Option<DropTarget>) {
        let Some(active) = self.active_path_key().cloned() else {
            return;
        };

        let over = match target {
            Some(DropTarget::Question(key)) => {
                let visible = visible_for(&self.tree, Some(&active));
                if !visible.iter().any(|node| node.path_key == key) {
                    log::debug!("ignoring drag over {key}: not a visible question");
                    return;
                }
                Some(key)
            }
            Some(DropTarget::Row { .. }) | None => None,
        };

        if let Some(drag) = self.drag.as_mut() {
            drag.over = over;
        }
    }

    /// Finish the drag and commit it.
    ///
    /// The session is always cleared. A question dropped on a question is projected one
    /// last time and, if allowed, spliced into the tree; a row dropped on a row of the
    /// same node reorders that node's rows. Everything else leaves the tree alone.
    pub fn on_drag_end(&mut self, target: Option<DropTarget>) -> DragOutcome {
        let Some(drag) = self.drag.take() else {
            return DragOutcome::Unchanged;
        };

        match (drag.payload, target) {
            (DragPayload::Question { path_key }, Some(DropTarget::Question(over))) => {
                self.commit_move(&path_key, &over, drag.offset_x)
            }
            (
                DragPayload::Row { container, row_id },
                Some(DropTarget::Row {
                    container: over_container,
                    row_id: over_id,
                }),
            ) => self.commit_rows(RowDrop {
                active_container: container,
                active_id: row_id,
                over_container,
                over_id,
            }),
            (payload, target) => {
                log::debug!("drag of {payload:?} ended over {target:?}; nothing to do");
                DragOutcome::Unchanged
            }
        }
    }

    pub fn on_drag_cancel(&mut self) {
        if let Some(drag) = self.drag.take() {
            log::debug!("drag of {:?} cancelled", drag.payload);
        }
    }

    fn commit_move(&mut self, active: &PathKey, over: &PathKey, offset_x: f32) -> DragOutcome {
        let visible = visible_for(&self.tree, Some(active));
        let is_visible = |key: &PathKey| visible.iter().any(|node| node.path_key == *key);
        if !is_visible(active) || !is_visible(over) {
            log::debug!("drop of {active} on {over} does not match the visible tree");
            return DragOutcome::Unchanged;
        }

        let projection = project(
            &visible,
            active,
            over,
            offset_x,
            self.config.indentation_width,
        );

        let mut items = flatten(&self.tree);
        let (Some(active_index), Some(over_index)) = (
            items.iter().position(|item| item.path_key == *active),
            items.iter().position(|item| item.path_key == *over),
        ) else {
            return DragOutcome::Unchanged;
        };

        // Collapsed subtrees are not part of `visible`; check them too.
        let collides = sibling_collision(
            &items,
            &items[active_index],
            projection.parent_path_key.as_ref(),
        );
        if !projection.allowed || collides {
            log::warn!(
                "can't move {active} to level {}: {} already exists there",
                projection.depth,
                items[active_index].id
            );
            return DragOutcome::Rejected(projection);
        }

        let current_parent = items[active_index].parent_path_key.clone();
        if active_index == over_index && current_parent == projection.parent_path_key {
            return DragOutcome::Unchanged;
        }

        let new_path = match projection.parent_path_key.as_ref() {
            None => Path::default(),
            Some(parent_key) => items
                .iter()
                .find(|item| item.path_key == *parent_key)
                .map(|item| item.path.clone())
                .unwrap_or_default(),
        }
        .child(items[active_index].id.clone());

        let moved = &mut items[active_index];
        moved.depth = projection.depth;
        moved.parent_path_key = projection.parent_path_key.clone();

        self.tree = build(move_element(items, active_index, over_index));
        let to = new_path.key();
        log::debug!("moved {active} to {to}");

        DragOutcome::Moved {
            from: active.clone(),
            to,
            projection,
        }
    }

    fn commit_rows(&mut self, drop: RowDrop) -> DragOutcome {
        let container = drop.active_container.clone();
        let Some(path) = container.to_path() else {
            return DragOutcome::Unchanged;
        };
        let Some(node) = find_node(&self.tree, &path) else {
            return DragOutcome::Unchanged;
        };
        let Some(reorder) = plan_row_reorder(&node.rows, &container, &drop) else {
            return DragOutcome::Unchanged;
        };

        self.tree = update_at_path(&self.tree, &path, |mut node| {
            node.rows = reorder.apply(std::mem::take(&mut node.rows));
            node
        });
        log::debug!(
            "reordered row {} in {container}: {} -> {}",
            reorder.row_id,
            reorder.from,
            reorder.to
        );

        DragOutcome::RowsReordered { container, reorder }
    }

    /// Remove the node at `path` with its subtree. Returns `false` when removal is not
    /// enabled.
    pub fn remove(&mut self, path: &Path) -> bool {
        if !self.config.removable {
            return false;
        }
        self.tree = remove_subtree(&self.tree, path);
        true
    }

    /// Flip the collapsed flag of the node at `path`. Returns `false` when collapsing is
    /// not enabled or the node has nothing to collapse.
    pub fn toggle_collapse(&mut self, path: &Path) -> bool {
        if !self.config.collapsible {
            return false;
        }
        if !find_node(&self.tree, path).is_some_and(Node::has_children) {
            return false;
        }
        self.tree = toggle_collapsed(&self.tree, path);
        true
    }

    pub fn set_rows(&mut self, path: &Path, rows: Vec<Row<R>>) {
        self.tree = set_rows(&self.tree, path, rows);
    }

    /// Replace the rows of the node at `path` with `f(current rows)`.
    pub fn update_rows(&mut self, path: &Path, f: impl FnOnce(Vec<Row<R>>) -> Vec<Row<R>>) {
        self.tree = update_at_path(&self.tree, path, |mut node| {
            node.rows = f(std::mem::take(&mut node.rows));
            node
        });
    }
}

fn visible_for<P: Clone, R: Clone>(
    tree: &[Node<P, R>],
    active: Option<&PathKey>,
) -> Vec<FlattenedNode<P, R>> {
    let flattened = flatten(tree);
    let mut hidden = collapsed_path_keys(&flattened);
    if let Some(active) = active {
        hidden.push(active.clone());
    }
    filter_collapsed_descendants(flattened, hidden)
}
