//! Catch detection
//!
//! The basket catches an item when its catch point (a little below the basket
//! center) lies inside the item's bounding box. Several items can be caught on
//! the same tick.

use glam::Vec2;

use super::state::{Item, ItemState};

/// Return every falling item whose box contains `catch_point`, in the order
/// they appear in `items` (ascending id once the state is normalized).
pub fn resolve<'a>(catch_point: Vec2, items: &'a [Item], item_size: Vec2) -> Vec<&'a Item> {
    items
        .iter()
        .filter(|item| item.is_falling() && item.bounds(item_size).contains_point(catch_point))
        .collect()
}

/// Mark caught items and pull them out of the active set.
/// Returns the removed items in iteration order.
pub fn take_caught(catch_point: Vec2, items: &mut Vec<Item>, item_size: Vec2) -> Vec<Item> {
    let ids: Vec<u32> = resolve(catch_point, items, item_size)
        .into_iter()
        .map(|item| item.id)
        .collect();
    if ids.is_empty() {
        return Vec::new();
    }

    let mut caught = Vec::with_capacity(ids.len());
    items.retain_mut(|item| {
        if ids.contains(&item.id) {
            item.state = ItemState::Caught;
            caught.push(item.clone());
            false
        } else {
            true
        }
    });
    caught
}
