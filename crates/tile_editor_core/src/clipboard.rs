//! Tile clipboard for copy/paste/delete of rectangular regions

use crate::{Metadata, SelectionRect, TileGrid, TileId, TilePos};

/// A copied tile, positioned relative to the copy region's origin
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardEntry {
    pub tile_id: TileId,
    pub offset: TilePos,
    pub metadata: Metadata,
}

/// Holds the most recent copy. Each non-empty copy replaces the contents.
#[derive(Debug, Clone, Default)]
pub struct TileClipboard {
    entries: Vec<ClipboardEntry>,
}

impl TileClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy every present tile inside `rect`
    ///
    /// Empty cells are skipped. An empty rect leaves the previous contents alone.
    /// Returns the number of tiles copied.
    pub fn copy(&mut self, rect: SelectionRect, grid: &TileGrid, tile_size: i32) -> usize {
        let Some(range) = rect.tile_range(tile_size) else {
            return 0;
        };

        self.entries = range
            .cells()
            .filter_map(|cell| grid.get(cell))
            .map(|record| ClipboardEntry {
                tile_id: record.tile_id,
                offset: record.position - range.min,
                metadata: record.metadata.clone(),
            })
            .collect();
        self.entries.len()
    }

    /// Write every entry at `target + offset`, overwriting whatever is there
    ///
    /// Entries that would land past the `i32` coordinate range are skipped.
    /// Returns the number of tiles written.
    pub fn paste(&self, target: TilePos, grid: &mut TileGrid) -> usize {
        let mut written = 0;
        for entry in &self.entries {
            let Some(cell) = target.checked_add(entry.offset) else {
                continue;
            };
            grid.insert(cell, entry.tile_id, entry.metadata.clone());
            written += 1;
        }
        written
    }

    /// Remove every present tile inside `rect`. Returns the number removed.
    pub fn delete(rect: SelectionRect, grid: &mut TileGrid, tile_size: i32) -> usize {
        let Some(range) = rect.tile_range(tile_size) else {
            return 0;
        };
        range
            .cells()
            .filter(|cell| grid.erase(*cell).is_some())
            .count()
    }

    pub fn has_content(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ClipboardEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
