use crate::flatten::FlattenedNode;
use crate::path::PathKey;
use crate::reorder::move_element;

/// Where the dragged node would land if it were dropped now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projection {
    pub depth: usize,
    pub min_depth: usize,
    pub max_depth: usize,
    /// `None` means the root level.
    pub parent_path_key: Option<PathKey>,
    /// `false` when the new parent already has a child with the dragged node's id.
    pub allowed: bool,
}

/// Quantize a horizontal drag distance into whole indentation levels.
///
/// Halves round towards positive infinity, so `-0.5` levels is `0` and `0.5` is `1`.
/// Non-finite quotients saturate, and `NaN` counts as no movement.
pub fn drag_depth(offset_x: f32, indentation_width: f32) -> i64 {
    let levels = f64::from(offset_x) / f64::from(indentation_width);
    let whole = levels.floor();
    let rounded = if levels - whole >= 0.5 { whole + 1. } else { whole };
    rounded as i64
}

/// Project the drop of `active_key` onto the slot of `over_key`.
///
/// `items` is the list the user sees (normally with collapsed subtrees and the
/// dragged node's own descendants filtered out). Nothing is mutated: the reorder is
/// only simulated to find the neighbours the node would have after the drop.
///
/// # Panics
///
/// Panics if either key is not present in `items`.
pub fn project<P, R>(
    items: &[FlattenedNode<P, R>],
    active_key: &PathKey,
    over_key: &PathKey,
    drag_offset_x: f32,
    indentation_width: f32,
) -> Projection {
    let active_index = position_of(items, active_key);
    let over_index = position_of(items, over_key);
    let active = &items[active_index];

    let simulated = move_element(items.iter().collect::<Vec<_>>(), active_index, over_index);
    let previous = over_index
        .checked_sub(1)
        .and_then(|ix| simulated.get(ix))
        .copied();
    let next = simulated.get(over_index + 1).copied();

    let projected_depth =
        (active.depth as i64).saturating_add(drag_depth(drag_offset_x, indentation_width));
    let max_depth = previous.map_or(0, |item| item.depth + 1);
    let min_depth = next.map_or(0, |item| item.depth);

    let depth = if projected_depth >= max_depth as i64 {
        max_depth
    } else if projected_depth < min_depth as i64 {
        min_depth
    } else {
        projected_depth as usize
    };

    let parent_path_key = parent_for_depth(&simulated[..over_index], previous, depth);
    let allowed = !sibling_collision(items, active, parent_path_key.as_ref());

    log::trace!(
        "projected {active_key} over {over_key}: depth {depth} in [{min_depth}, {max_depth}], parent {parent_path_key:?}, allowed {allowed}"
    );

    Projection {
        depth,
        min_depth,
        max_depth,
        parent_path_key,
        allowed,
    }
}

fn position_of<P, R>(items: &[FlattenedNode<P, R>], key: &PathKey) -> usize {
    let Some(ix) = items.iter().position(|item| item.path_key == *key) else {
        panic!("path key {key} is not in the flattened list");
    };
    ix
}

fn parent_for_depth<P, R>(
    before_over: &[&FlattenedNode<P, R>],
    previous: Option<&FlattenedNode<P, R>>,
    depth: usize,
) -> Option<PathKey> {
    let previous = previous?;
    if depth == 0 {
        return None;
    }
    if depth == previous.depth {
        return previous.parent_path_key.clone();
    }
    if depth > previous.depth {
        return Some(previous.path_key.clone());
    }

    // Pulled out to an ancestor level: adopt the parent of the closest item above that
    // already lives at that depth.
    before_over
        .iter()
        .rev()
        .find(|item| item.depth == depth)
        .and_then(|item| item.parent_path_key.clone())
}

/// Whether moving `active` under `parent` would give that parent two children with the
/// same id. Staying under the current parent never collides.
pub fn sibling_collision<P, R>(
    items: &[FlattenedNode<P, R>],
    active: &FlattenedNode<P, R>,
    parent: Option<&PathKey>,
) -> bool {
    if active.parent_path_key.as_ref() == parent {
        return false;
    }
    items.iter().any(|item| {
        item.path_key != active.path_key
            && item.id == active.id
            && item.parent_path_key.as_ref() == parent
    })
}
