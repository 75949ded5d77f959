/// Confirmed layout order
/// Entries are persisted (and later rendered) in this order, and the layout
/// engine lets later entries win overlapping cells, so the order is part of
/// the layout itself.

use std::cmp::Ordering;

use crate::layout::OccupancyGrid;
use crate::model::{LayoutItem, MenuEntry};

/// Stable sort by tab order, then by the first cell the entry owns in
/// `grid` (row, then column). Entries absent from the grid sort as (0, 0).
pub fn sort_for_layout<F>(entries: &mut [MenuEntry], grid: &OccupancyGrid, tab_order_of: F)
where
    F: Fn(&MenuEntry) -> i64,
{
    entries.sort_by(|a, b| {
        match tab_order_of(a).cmp(&tab_order_of(b)) {
            Ordering::Equal => {}
            other => return other,
        }
        let pos_a = grid.position_of(&a.menu_id).unwrap_or((0, 0));
        let pos_b = grid.position_of(&b.menu_id).unwrap_or((0, 0));
        pos_a.cmp(&pos_b)
    });
}

/// Same ordering using what is already stored: each entry's `tabOrder` and
/// the grid built from the entries' own placements.
pub fn sort_by_stored_order(entries: &mut [MenuEntry], cols: u32) {
    let grid = OccupancyGrid::build(&LayoutItem::from_entries(entries), cols);
    sort_for_layout(entries, &grid, MenuEntry::tab_order);
}
