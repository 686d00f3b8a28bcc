use crate::node::Row;
use crate::path::PathKey;
use crate::reorder::move_element;

/// A row dropped onto another row. Containers are the path keys of the nodes that own
/// the two row lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowDrop {
    pub active_container: PathKey,
    pub active_id: String,
    pub over_container: PathKey,
    pub over_id: String,
}

/// A reorder inside one row list: `from` is the index before the drop, `to` the index
/// after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowReorder {
    pub row_id: String,
    pub from: usize,
    pub to: usize,
}

impl RowReorder {
    pub fn apply<R>(&self, rows: Vec<Row<R>>) -> Vec<Row<R>> {
        move_element(rows, self.from, self.to)
    }
}

/// Work out the reorder a drop means for the row list owned by `container`.
///
/// Rows never leave their node: unless both ends of the drop belong to `container`
/// this returns `None`, as it does when either id is missing or nothing would move.
pub fn plan_row_reorder<R>(
    rows: &[Row<R>],
    container: &PathKey,
    drop: &RowDrop,
) -> Option<RowReorder> {
    if drop.active_container != *container || drop.over_container != *container {
        return None;
    }

    let from = rows.iter().position(|row| row.id == drop.active_id)?;
    let to = rows.iter().position(|row| row.id == drop.over_id)?;
    if from == to {
        return None;
    }

    Some(RowReorder {
        row_id: drop.active_id.clone(),
        from,
        to,
    })
}

/// The row list after applying `drop`, or `None` if the drop does not concern it.
pub fn reorder_rows<R: Clone>(
    rows: &[Row<R>],
    container: &PathKey,
    drop: &RowDrop,
) -> Option<Vec<Row<R>>> {
    plan_row_reorder(rows, container, drop).map(|reorder| reorder.apply(rows.to_vec()))
}
