//! Sparse tile grid with world bounds tracking

use crate::{Metadata, TileId, TilePos, TileRecord, EMPTY_TILE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rectangle (tile units, inclusive) known to have ever contained a placed tile
///
/// Bounds only widen. Erasing tiles never tightens them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl WorldBounds {
    /// Initial bounds for a fresh grid: `(0, tile_size, 0, tile_size)`
    pub fn initial(tile_size: i32) -> Self {
        Self {
            left: 0,
            right: tile_size,
            top: 0,
            bottom: tile_size,
        }
    }

    /// Check if a position lies inside the bounds (edges included)
    pub fn contains(&self, pos: TilePos) -> bool {
        pos.x >= self.left && pos.x <= self.right && pos.y >= self.top && pos.y <= self.bottom
    }

    /// Grow the bounds to include `pos`
    pub fn include(&mut self, pos: TilePos) {
        if pos.x < self.left {
            self.left = pos.x;
        }
        if pos.x > self.right {
            self.right = pos.x;
        }
        if pos.y < self.top {
            self.top = pos.y;
        }
        if pos.y > self.bottom {
            self.bottom = pos.y;
        }
    }

    /// Number of cells enclosed by the bounds
    pub fn area(&self) -> u64 {
        let w = (self.right as i64 - self.left as i64 + 1) as u64;
        let h = (self.bottom as i64 - self.top as i64 + 1) as u64;
        w * h
    }
}

/// Sparse grid mapping cell coordinates to tile records
#[derive(Debug, Clone)]
pub struct TileGrid {
    cells: HashMap<TilePos, TileRecord>,
    bounds: WorldBounds,
}

impl TileGrid {
    /// Create an empty grid; `tile_size` seeds the initial bounds
    pub fn new(tile_size: i32) -> Self {
        Self {
            cells: HashMap::new(),
            bounds: WorldBounds::initial(tile_size),
        }
    }

    /// Place a tile, skipping the write when the cell already holds `tile_id`
    ///
    /// Returns true if the grid changed. Bounds widen either way.
    pub fn place(&mut self, pos: TilePos, tile_id: TileId, metadata: Metadata) -> bool {
        self.bounds.include(pos);

        if self.tile_id_at(pos) == tile_id {
            return false;
        }
        self.cells
            .insert(pos, TileRecord::new(tile_id, pos, metadata));
        true
    }

    /// Place a tile unconditionally, overwriting any existing record
    pub fn insert(&mut self, pos: TilePos, tile_id: TileId, metadata: Metadata) {
        self.bounds.include(pos);
        self.cells
            .insert(pos, TileRecord::new(tile_id, pos, metadata));
    }

    /// Remove the tile at `pos`. Bounds are left untouched.
    pub fn erase(&mut self, pos: TilePos) -> Option<TileRecord> {
        self.cells.remove(&pos)
    }

    pub fn get(&self, pos: TilePos) -> Option<&TileRecord> {
        self.cells.get(&pos)
    }

    pub fn get_mut(&mut self, pos: TilePos) -> Option<&mut TileRecord> {
        self.cells.get_mut(&pos)
    }

    /// Tile id at `pos`, or `EMPTY_TILE` when the cell is empty
    pub fn tile_id_at(&self, pos: TilePos) -> TileId {
        self.cells
            .get(&pos)
            .map(|record| record.tile_id)
            .unwrap_or(EMPTY_TILE)
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        self.cells.contains_key(&pos)
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate records in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &TileRecord> {
        self.cells.values()
    }

    /// Records sorted row-major (y, then x), for deterministic rendering
    pub fn iter_ordered(&self) -> Vec<&TileRecord> {
        let mut records: Vec<&TileRecord> = self.cells.values().collect();
        records.sort_by_key(|record| (record.position.y, record.position.x));
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid() {
        let grid = TileGrid::new(20);
        assert!(grid.is_empty());
        assert_eq!(grid.bounds(), WorldBounds::initial(20));
        assert_eq!(grid.get(TilePos::new(0, 0)), None);
        assert_eq!(grid.tile_id_at(TilePos::new(0, 0)), EMPTY_TILE);
    }

    #[test]
    fn test_place_and_get() {
        let mut grid = TileGrid::new(20);
        assert!(grid.place(TilePos::new(3, 4), 7, Metadata::new()));

        let record = grid.get(TilePos::new(3, 4)).unwrap();
        assert_eq!(record.tile_id, 7);
        assert_eq!(record.position, TilePos::new(3, 4));
    }

    #[test]
    fn test_place_same_id_keeps_metadata() {
        let mut grid = TileGrid::new(20);
        let pos = TilePos::new(1, 1);
        let mut meta = Metadata::new();
        meta.insert("spawn".to_string(), true.into());

        assert!(grid.place(pos, 2, meta));
        assert!(!grid.place(pos, 2, Metadata::new()));
        assert_eq!(
            grid.get(pos).unwrap().metadata.get("spawn"),
            Some(&crate::Value::Bool(true))
        );

        // A different id overwrites
        assert!(grid.place(pos, 3, Metadata::new()));
        let record = grid.get(pos).unwrap();
        assert_eq!(record.tile_id, 3);
        assert!(record.metadata.is_empty());
    }

    #[test]
    fn test_insert_overwrites_same_id() {
        let mut grid = TileGrid::new(20);
        let pos = TilePos::new(1, 1);
        grid.place(pos, 2, Metadata::new());

        let mut meta = Metadata::new();
        meta.insert("note".to_string(), "pasted".into());
        grid.insert(pos, 2, meta.clone());
        assert_eq!(grid.get(pos).unwrap().metadata, meta);
    }

    #[test]
    fn test_bounds_widen_monotonically() {
        let mut grid = TileGrid::new(20);
        let placed = [(-5, 3), (40, -2), (7, 55), (-1, -9)];
        for (x, y) in placed {
            grid.place(TilePos::new(x, y), 1, Metadata::new());
        }

        let expected = WorldBounds {
            left: -5,
            right: 40,
            top: -9,
            bottom: 55,
        };
        assert_eq!(grid.bounds(), expected);

        for (x, y) in placed {
            grid.erase(TilePos::new(x, y));
        }
        assert!(grid.is_empty());
        assert_eq!(grid.bounds(), expected);
    }

    #[test]
    fn test_bounds_keep_initial_extent() {
        let mut grid = TileGrid::new(20);
        grid.place(TilePos::new(2, 2), 1, Metadata::new());
        assert_eq!(grid.bounds(), WorldBounds::initial(20));
    }

    #[test]
    fn test_erase_missing_is_noop() {
        let mut grid = TileGrid::new(20);
        assert_eq!(grid.erase(TilePos::new(9, 9)), None);
        assert_eq!(grid.bounds(), WorldBounds::initial(20));
    }

    #[test]
    fn test_iter_ordered_is_row_major() {
        let mut grid = TileGrid::new(20);
        grid.place(TilePos::new(5, 1), 1, Metadata::new());
        grid.place(TilePos::new(0, 2), 2, Metadata::new());
        grid.place(TilePos::new(1, 1), 3, Metadata::new());

        let order: Vec<TilePos> = grid.iter_ordered().iter().map(|r| r.position).collect();
        assert_eq!(
            order,
            vec![TilePos::new(1, 1), TilePos::new(5, 1), TilePos::new(0, 2)]
        );
    }

    #[test]
    fn test_bounds_area() {
        assert_eq!(WorldBounds::initial(20).area(), 21 * 21);
        assert!(WorldBounds::initial(0).contains(TilePos::new(0, 0)));
        assert!(!WorldBounds::initial(0).contains(TilePos::new(1, 0)));
    }
}
