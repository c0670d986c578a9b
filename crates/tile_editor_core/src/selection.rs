//! Rectangular tile selection driven by a drag gesture

use crate::TilePos;

/// Selection rectangle in pixel units. Zero-area means "no selection".
///
/// Pixel values are clamped to the `i32` range, so at tile size 20 a
/// selection is exact only within roughly ±107 million tiles of the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl SelectionRect {
    pub const EMPTY: SelectionRect = SelectionRect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rect with neither width nor height selects nothing
    pub fn is_empty(&self) -> bool {
        !(self.width > 0 || self.height > 0)
    }

    /// Convert to the half-open tile range `[origin, origin + extent)`
    ///
    /// Returns None for an empty rect.
    pub fn tile_range(&self, tile_size: i32) -> Option<TileRange> {
        if self.is_empty() || tile_size <= 0 {
            return None;
        }
        let min = TilePos::new(self.x / tile_size, self.y / tile_size);
        let max = TilePos::new(
            min.x.saturating_add(self.width / tile_size),
            min.y.saturating_add(self.height / tile_size),
        );
        Some(TileRange { min, max })
    }
}

/// Half-open rectangle of tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    /// First cell (inclusive)
    pub min: TilePos,
    /// One past the last cell on each axis
    pub max: TilePos,
}

impl TileRange {
    /// Iterate every cell row-major (y outer, x inner)
    pub fn cells(&self) -> impl Iterator<Item = TilePos> {
        let (min, max) = (self.min, self.max);
        (min.y..max.y).flat_map(move |y| (min.x..max.x).map(move |x| TilePos::new(x, y)))
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        pos.x >= self.min.x && pos.x < self.max.x && pos.y >= self.min.y && pos.y < self.max.y
    }
}

/// Tracks an in-progress selection drag
#[derive(Debug, Clone, Default)]
pub struct TileSelection {
    anchor: TilePos,
    rect: SelectionRect,
    /// Whether a drag is currently updating the rect
    pub is_selecting: bool,
}

impl TileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag at `anchor`, clearing the previous rect
    pub fn begin(&mut self, anchor: TilePos) {
        self.anchor = anchor;
        self.rect = SelectionRect::EMPTY;
        self.is_selecting = true;
    }

    /// Recompute the rect for the cursor at `current`
    ///
    /// Both endpoints are included. Dragging up or left flips the rect so the
    /// origin is always the true top-left corner.
    pub fn update(&mut self, current: TilePos, tile_size: i32) -> SelectionRect {
        if !self.is_selecting {
            return self.rect;
        }

        let (x, width) = normalize_axis(self.anchor.x, current.x, tile_size);
        let (y, height) = normalize_axis(self.anchor.y, current.y, tile_size);

        self.rect = SelectionRect::new(x, y, width, height);
        self.rect
    }

    /// Stop tracking the drag. The rect is kept for copy/delete.
    pub fn end(&mut self) -> SelectionRect {
        self.is_selecting = false;
        self.rect
    }

    /// Reset to zero-area
    pub fn clear(&mut self) {
        self.rect = SelectionRect::EMPTY;
        self.is_selecting = false;
    }

    pub fn rect(&self) -> SelectionRect {
        self.rect
    }

    pub fn anchor(&self) -> TilePos {
        self.anchor
    }

    pub fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }
}

/// Pixel origin and extent along one axis, covering both endpoint cells
fn normalize_axis(anchor: i32, current: i32, tile_size: i32) -> (i32, i32) {
    let (anchor, current, tile_size) = (anchor as i64, current as i64, tile_size as i64);
    let dif = (current - anchor + 1) * tile_size;
    let (origin, extent) = if dif > 0 {
        (anchor * tile_size, dif)
    } else {
        // Dragged backwards: the rect starts at the cursor cell and ends after the anchor cell
        (current * tile_size, (anchor - current + 1) * tile_size)
    };
    (clamp_pixels(origin), clamp_pixels(extent))
}

fn clamp_pixels(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_down_right() {
        let mut selection = TileSelection::new();
        selection.begin(TilePos::new(1, 2));
        let rect = selection.update(TilePos::new(3, 2), 20);
        assert_eq!(rect, SelectionRect::new(20, 40, 60, 20));
    }

    #[test]
    fn test_drag_up_left_normalizes() {
        let mut selection = TileSelection::new();
        selection.begin(TilePos::new(2, 2));
        let rect = selection.update(TilePos::new(0, 0), 20);
        assert_eq!(rect, SelectionRect::new(0, 0, 60, 60));
    }

    #[test]
    fn test_drag_back_one_cell_covers_both_cells() {
        let mut selection = TileSelection::new();
        selection.begin(TilePos::new(2, 2));
        let rect = selection.update(TilePos::new(1, 1), 20);
        assert_eq!(rect, SelectionRect::new(20, 20, 40, 40));

        let range = rect.tile_range(20).unwrap();
        assert_eq!(range.cells().count(), 4);
    }

    #[test]
    fn test_selection_large_coordinates() {
        let mut selection = TileSelection::new();
        let far = TilePos::new(200_000_000, -200_000_000);
        selection.begin(far);
        let rect = selection.update(far, 20);
        assert_eq!(rect.x, i32::MAX);
        assert_eq!(rect.y, i32::MIN);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 20);

        // Spanning the whole coordinate range clamps instead of overflowing
        selection.begin(TilePos::new(i32::MIN, 0));
        let rect = selection.update(TilePos::new(i32::MAX, 0), 20);
        assert_eq!(rect.x, i32::MIN);
        assert_eq!(rect.width, i32::MAX);
        assert!(rect.tile_range(20).is_some());
    }

    #[test]
    fn test_single_click_selects_one_tile() {
        let mut selection = TileSelection::new();
        selection.begin(TilePos::new(4, 4));
        let rect = selection.update(TilePos::new(4, 4), 20);
        assert_eq!(rect, SelectionRect::new(80, 80, 20, 20));
        assert!(!selection.is_empty());
    }

    #[test]
    fn test_begin_without_update_is_empty() {
        let mut selection = TileSelection::new();
        selection.begin(TilePos::new(4, 4));
        assert!(selection.is_empty());
        assert_eq!(selection.end(), SelectionRect::EMPTY);
    }

    #[test]
    fn test_end_keeps_rect_and_stops_updates() {
        let mut selection = TileSelection::new();
        selection.begin(TilePos::new(0, 0));
        selection.update(TilePos::new(1, 1), 10);
        let rect = selection.end();
        assert_eq!(rect, SelectionRect::new(0, 0, 20, 20));

        selection.update(TilePos::new(5, 5), 10);
        assert_eq!(selection.rect(), rect);

        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_negative_coordinates() {
        let mut selection = TileSelection::new();
        selection.begin(TilePos::new(-1, -1));
        let rect = selection.update(TilePos::new(-3, -1), 20);
        assert_eq!(rect, SelectionRect::new(-60, -20, 60, 20));

        let range = rect.tile_range(20).unwrap();
        assert_eq!(range.min, TilePos::new(-3, -1));
        assert_eq!(range.max, TilePos::new(0, 0));
    }

    #[test]
    fn test_tile_range_cells_row_major() {
        let range = SelectionRect::new(20, 20, 40, 40).tile_range(20).unwrap();
        let cells: Vec<TilePos> = range.cells().collect();
        assert_eq!(
            cells,
            vec![
                TilePos::new(1, 1),
                TilePos::new(2, 1),
                TilePos::new(1, 2),
                TilePos::new(2, 2),
            ]
        );
        assert!(range.contains(TilePos::new(2, 2)));
        assert!(!range.contains(TilePos::new(3, 2)));
    }

    #[test]
    fn test_empty_rect_has_no_range() {
        assert_eq!(SelectionRect::EMPTY.tile_range(20), None);
    }
}
