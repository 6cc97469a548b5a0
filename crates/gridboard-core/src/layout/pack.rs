//! Row-major first-fit bin packing of layout items into a fixed-column grid.

use super::LayoutItem;
use std::collections::BTreeMap;

/// Sparse cell occupancy for one grid.
#[derive(Debug, Clone)]
pub struct GridOccupancy {
    columns: u32,
    /// `rows[y][x]` is true when the cell is taken. Only touched rows are stored.
    rows: BTreeMap<u32, Vec<bool>>,
}

impl GridOccupancy {
    /// Create an empty grid. A zero column count is treated as one column.
    pub fn new(columns: u32) -> Self {
        debug_assert!(columns > 0, "grid must have at least one column");
        Self {
            columns: columns.max(1),
            rows: BTreeMap::new(),
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// First row below every taken cell.
    pub fn height(&self) -> u32 {
        self.rows
            .keys()
            .next_back()
            .map_or(0, |row| row.saturating_add(1))
    }

    /// Whether every cell of the rectangle is inside the columns and free.
    pub fn is_free(&self, x: u32, y: u32, width: u32, height: u32) -> bool {
        let right = x.saturating_add(width);
        if right > self.columns {
            return false;
        }
        self.rows
            .range(y..y.saturating_add(height))
            .all(|(_, cells)| cells[x as usize..right as usize].iter().all(|taken| !taken))
    }

    /// Mark a rectangle as taken. Cells past the last column are ignored.
    pub fn mark(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let columns = self.columns as usize;
        let end = x.saturating_add(width).min(self.columns) as usize;
        let start = (x as usize).min(end);
        for row in y..y.saturating_add(height) {
            let cells = self.rows.entry(row).or_insert_with(|| vec![false; columns]);
            for cell in &mut cells[start..end] {
                *cell = true;
            }
        }
    }

    /// First free position for a rectangle, scanning rows from `start_row` down
    /// and columns left to right.
    pub fn first_fit_from(&self, width: u32, height: u32, start_row: u32) -> (u32, u32) {
        let width = width.clamp(1, self.columns);
        let mut y = start_row;
        loop {
            for x in 0..=self.columns - width {
                if self.is_free(x, y, width, height) {
                    return (x, y);
                }
            }
            // Below the last occupied row every rectangle fits.
            y = y.saturating_add(1);
        }
    }

    pub fn first_fit(&self, width: u32, height: u32) -> (u32, u32) {
        self.first_fit_from(width, height, 0)
    }

    /// Fit an item to the columns, place it first-fit and mark it taken.
    pub fn place(&mut self, item: &mut LayoutItem) {
        item.fit_to_columns(self.columns);
        let (x, y) = self.first_fit(item.width, item.height);
        item.x = x;
        item.y = y;
        self.mark(x, y, item.width, item.height);
    }
}

/// Combined height of all items, the deepest row a packed layout can reach.
pub fn total_height(items: &[LayoutItem]) -> u32 {
    items
        .iter()
        .fold(0u32, |total, item| total.saturating_add(item.height))
}

/// Pack items into a grid of `columns` without overlap.
///
/// Items are stable-sorted by their source `(y, x)` so the packed result keeps
/// the top-to-bottom, left-to-right reading order of the input layout. The
/// output is in that sorted order.
pub fn pack(columns: u32, items: &[LayoutItem]) -> Vec<LayoutItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| (item.y, item.x));

    let mut grid = GridOccupancy::new(columns);
    for item in &mut sorted {
        grid.place(item);
    }
    sorted
}

/// Whether a layout fits inside `columns` and has no overlapping items.
pub fn is_valid(columns: u32, items: &[LayoutItem]) -> bool {
    let in_bounds = items
        .iter()
        .all(|item| item.width > 0 && item.height > 0 && item.right() <= columns);
    in_bounds
        && items
            .iter()
            .enumerate()
            .all(|(i, a)| items[i + 1..].iter().all(|b| !a.overlaps(b)))
}

/// Bring a layout inside `columns` without moving items that already fit.
///
/// Every item is clamped to the columns and its size constraints. Items may
/// still overlap each other. A layout with an item further down than the
/// combined height of all items is repacked.
pub fn fit_layout(columns: u32, items: &[LayoutItem]) -> Vec<LayoutItem> {
    let fitted: Vec<LayoutItem> = items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            item.fit_to_columns(columns);
            item
        })
        .collect();

    let limit = total_height(&fitted);
    if fitted.iter().any(|item| item.y > limit) {
        log::warn!("Layout reaches past row {}, repacking {} items", limit, fitted.len());
        return pack(columns, &fitted);
    }
    fitted
}

/// Insert new items into an existing layout.
///
/// Existing items stay anchored where they are and each incoming item takes
/// the first free slot around them, so new items never overlap anything.
pub fn splice(columns: u32, existing: &[LayoutItem], incoming: &[LayoutItem]) -> Vec<LayoutItem> {
    let mut grid = GridOccupancy::new(columns);
    for item in existing {
        grid.mark(item.x, item.y, item.width, item.height);
    }

    let mut result = existing.to_vec();
    let mut incoming = incoming.to_vec();
    incoming.sort_by_key(|item| (item.y, item.x));
    for mut item in incoming {
        grid.place(&mut item);
        result.push(item);
    }
    result
}

/// Place a dropped item at its requested position, or at the first free slot
/// at or below that row when the position is taken.
///
/// A row further down than the combined height of the layout and the item is
/// pulled up to the bottom of the layout.
pub fn place_drop(columns: u32, existing: &[LayoutItem], mut item: LayoutItem) -> Vec<LayoutItem> {
    let mut grid = GridOccupancy::new(columns);
    for placed in existing {
        grid.mark(placed.x, placed.y, placed.width, placed.height);
    }

    item.fit_to_columns(grid.columns());
    if item.y > total_height(existing).saturating_add(item.height) {
        item.y = grid.height();
    }
    if !grid.is_free(item.x, item.y, item.width, item.height) {
        let (x, y) = grid.first_fit_from(item.width, item.height, item.y);
        item.x = x;
        item.y = y;
    }

    let mut result = existing.to_vec();
    result.push(item);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_no_overlap(items: &[LayoutItem]) {
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                assert!(!a.overlaps(b), "{} overlaps {}", a.widget_id, b.widget_id);
            }
        }
    }

    fn assert_in_columns(items: &[LayoutItem], columns: u32) {
        for item in items {
            assert!(item.right() <= columns, "{} exceeds {} columns", item.widget_id, columns);
        }
    }

    fn sample() -> Vec<LayoutItem> {
        vec![
            LayoutItem::new("a", 0, 0, 3, 4).with_min(2, 3),
            LayoutItem::new("b", 3, 0, 3, 4).with_min(2, 3),
            LayoutItem::new("c", 6, 0, 6, 8).with_min(4, 6),
            LayoutItem::new("d", 0, 4, 6, 8).with_min(4, 6),
            LayoutItem::new("e", 0, 12, 3, 9).with_min(2, 5),
        ]
    }

    #[test]
    fn test_pack_places_in_reading_order() {
        let packed = pack(12, &sample());
        let positions: Vec<_> = packed.iter().map(|i| (i.widget_id.as_str(), i.x, i.y)).collect();
        assert_eq!(
            positions,
            vec![("a", 0, 0), ("b", 3, 0), ("c", 6, 0), ("d", 0, 4), ("e", 6, 8)]
        );
    }

    #[test]
    fn test_pack_respects_columns_and_overlap() {
        for columns in [1, 2, 4, 6, 10, 12] {
            let packed = pack(columns, &sample());
            assert_eq!(packed.len(), 5);
            assert_no_overlap(&packed);
            assert_in_columns(&packed, columns);
        }
    }

    #[test]
    fn test_pack_sorts_by_source_position() {
        let items = vec![
            LayoutItem::new("late", 0, 10, 2, 2),
            LayoutItem::new("right", 5, 0, 2, 2),
            LayoutItem::new("left", 0, 0, 2, 2),
        ];
        let packed = pack(4, &items);
        let order: Vec<_> = packed.iter().map(|i| i.widget_id.as_str()).collect();
        assert_eq!(order, vec!["left", "right", "late"]);
        assert_eq!((packed[1].x, packed[1].y), (2, 0));
        assert_eq!((packed[2].x, packed[2].y), (0, 2));
    }

    #[test]
    fn test_pack_is_deterministic() {
        assert_eq!(pack(6, &sample()), pack(6, &sample()));
    }

    #[test]
    fn test_wide_item_is_clamped_and_alone() {
        let items = vec![
            LayoutItem::new("wide", 0, 0, 12, 2).with_min(6, 1),
            LayoutItem::new("small", 0, 2, 1, 1),
        ];
        let packed = pack(4, &items);
        assert_eq!((packed[0].x, packed[0].y, packed[0].width, packed[0].min_width), (0, 0, 4, 4));
        assert_eq!((packed[1].x, packed[1].y), (0, 2));
    }

    #[test]
    fn test_pack_enforces_min_width() {
        let items = vec![LayoutItem::new("a", 0, 0, 1, 2).with_min(3, 1)];
        let packed = pack(12, &items);
        assert_eq!(packed[0].width, 3);
    }

    #[test]
    fn test_pack_fills_gaps_first_fit() {
        let items = vec![
            LayoutItem::new("tall", 0, 0, 2, 6),
            LayoutItem::new("x", 2, 0, 4, 2),
            LayoutItem::new("y", 2, 2, 4, 2),
            LayoutItem::new("z", 0, 6, 6, 1),
        ];
        let packed = pack(6, &items);
        assert_eq!((packed[3].x, packed[3].y), (0, 6));
        // A narrow item later in the order fills the gap beside `tall`.
        let mut more = items.clone();
        more.push(LayoutItem::new("gap", 0, 7, 4, 2));
        let packed = pack(6, &more);
        let gap = packed.iter().find(|i| i.widget_id == "gap").unwrap();
        assert_eq!((gap.x, gap.y), (2, 4));
    }

    #[test]
    fn test_splice_anchors_valid_layout() {
        let existing = pack(12, &sample());
        let incoming = vec![LayoutItem::new("new", 0, 0, 4, 4)];
        let spliced = splice(12, &existing, &incoming);
        assert_eq!(&spliced[..existing.len()], existing.as_slice());
        let new = spliced.last().unwrap();
        assert_eq!((new.x, new.y), (0, 12));
        assert_no_overlap(&spliced);
    }

    #[test]
    fn test_splice_keeps_overlapping_items_anchored() {
        let existing = vec![
            LayoutItem::new("a", 0, 0, 4, 4),
            LayoutItem::new("b", 2, 2, 4, 4),
        ];
        let spliced = splice(6, &existing, &[LayoutItem::new("c", 0, 0, 2, 2)]);
        assert_eq!(&spliced[..2], existing.as_slice());
        let c = &spliced[2];
        assert!(existing.iter().all(|item| !item.overlaps(c)));
        assert_in_columns(&spliced, 6);
    }

    #[test]
    fn test_fit_layout_keeps_items_that_fit() {
        let items = vec![
            LayoutItem::new("a", 0, 0, 4, 4),
            LayoutItem::new("b", 2, 2, 4, 4),
            LayoutItem::new("c", 5, 9, 3, 2),
        ];
        let fitted = fit_layout(6, &items);
        assert_eq!(&fitted[..2], &items[..2]);
        assert_eq!((fitted[2].x, fitted[2].y), (3, 9));
    }

    #[test]
    fn test_fit_layout_repacks_far_rows() {
        let items = vec![
            LayoutItem::new("b", 0, 0, 3, 6),
            LayoutItem::new("a", 0, u32::MAX - 1, 6, 8),
        ];
        let fitted = fit_layout(12, &items);
        let positions: Vec<_> = fitted.iter().map(|i| (i.widget_id.as_str(), i.x, i.y)).collect();
        assert_eq!(positions, vec![("b", 0, 0), ("a", 3, 0)]);
    }

    #[test]
    fn test_occupancy_handles_extreme_rows() {
        let mut grid = GridOccupancy::new(4);
        grid.mark(0, u32::MAX - 1, 4, 8);
        assert_eq!(grid.height(), u32::MAX);
        assert!(!grid.is_free(0, u32::MAX - 1, 2, 1));
        assert!(grid.is_free(0, 0, 4, 4));
        assert!(!grid.is_free(u32::MAX, 0, 2, 1));
    }

    #[test]
    fn test_place_drop_pulls_far_rows_up() {
        let existing = vec![LayoutItem::new("a", 0, 0, 4, 4), LayoutItem::new("b", 4, 0, 2, 7)];
        let placed = place_drop(6, &existing, LayoutItem::new("d", 0, u32::MAX, 3, 3));
        assert_eq!((placed[2].x, placed[2].y), (0, 7));
        assert_no_overlap(&placed);

        let placed = place_drop(6, &existing, LayoutItem::new("d", 0, 12, 3, 3));
        assert_eq!((placed[2].x, placed[2].y), (0, 12));
    }

    #[test]
    fn test_place_drop_uses_requested_position_when_free() {
        let existing = vec![LayoutItem::new("a", 0, 0, 4, 4)];
        let placed = place_drop(12, &existing, LayoutItem::new("d", 5, 1, 3, 3));
        assert_eq!((placed[1].x, placed[1].y), (5, 1));
    }

    #[test]
    fn test_place_drop_moves_off_collision() {
        let existing = vec![LayoutItem::new("a", 0, 0, 4, 4)];
        let placed = place_drop(6, &existing, LayoutItem::new("d", 2, 1, 4, 2));
        assert_eq!((placed[1].x, placed[1].y), (0, 4));
        assert_no_overlap(&placed);
    }

    #[test]
    fn test_first_fit_clamps_width() {
        let grid = GridOccupancy::new(1);
        assert_eq!(grid.first_fit(3, 1), (0, 0));
    }
}
