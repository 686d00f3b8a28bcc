/// Move the element at `from` so that it ends up at index `to`.
///
/// Elements in between shift by one. `to` is clamped to the end of the list.
pub fn move_element<T>(mut items: Vec<T>, from: usize, to: usize) -> Vec<T> {
    if from >= items.len() || from == to {
        return items;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
    items
}
