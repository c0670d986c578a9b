//! Editor aggregate tying the grid, selection, clipboard and palette together

use crate::{
    flood_fill, Metadata, Palette, SelectionRect, TileClipboard, TileGrid, TileId, TilePos,
    TileRecord, TileSelection, WorldBounds, EMPTY_TILE,
};
use serde::{Deserialize, Serialize};

/// What the primary button does on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditMode {
    #[default]
    Place,
    Erase,
}

impl EditMode {
    pub fn label(&self) -> &'static str {
        match self {
            EditMode::Place => "Place",
            EditMode::Erase => "Erase",
        }
    }
}

/// All editing state for one map
///
/// `H` is the drawable handle type the palette hands out to the renderer.
#[derive(Debug, Clone)]
pub struct EditorState<H> {
    pub grid: TileGrid,
    pub selection: TileSelection,
    pub clipboard: TileClipboard,
    pub palette: Palette<H>,
    /// Tile edge length in pixels
    pub tile_size: i32,
    /// Tile id used by place and fill
    pub current_tile: TileId,
    pub mode: EditMode,
}

impl<H> EditorState<H> {
    pub fn new(palette: Palette<H>, tile_size: i32) -> Self {
        Self {
            grid: TileGrid::new(tile_size),
            selection: TileSelection::new(),
            clipboard: TileClipboard::new(),
            current_tile: palette.first_id().unwrap_or(1),
            palette,
            tile_size,
            mode: EditMode::Place,
        }
    }

    /// Place `tile_id` with empty metadata. Same-id placements are skipped.
    pub fn place(&mut self, cell: TilePos, tile_id: TileId) -> bool {
        self.grid.place(cell, tile_id, Metadata::new())
    }

    pub fn erase(&mut self, cell: TilePos) -> Option<TileRecord> {
        self.grid.erase(cell)
    }

    pub fn get(&self, cell: TilePos) -> Option<&TileRecord> {
        self.grid.get(cell)
    }

    pub fn bounds(&self) -> WorldBounds {
        self.grid.bounds()
    }

    /// Primary button action at `cell`, depending on the edit mode
    pub fn apply_primary(&mut self, cell: TilePos) -> bool {
        match self.mode {
            EditMode::Place => self.place(cell, self.current_tile),
            EditMode::Erase => self.erase(cell).is_some(),
        }
    }

    pub fn begin_selection(&mut self, cell: TilePos) {
        self.selection.begin(cell);
    }

    pub fn update_selection(&mut self, cell: TilePos) -> SelectionRect {
        self.selection.update(cell, self.tile_size)
    }

    pub fn end_selection(&mut self) -> SelectionRect {
        self.selection.end()
    }

    /// Copy the selected tiles, then reset the selection
    pub fn copy_selection(&mut self) -> usize {
        let copied = self
            .clipboard
            .copy(self.selection.rect(), &self.grid, self.tile_size);
        self.selection.clear();
        copied
    }

    /// Paste the clipboard anchored at `cell`
    pub fn paste_selection(&mut self, cell: TilePos) -> usize {
        self.clipboard.paste(cell, &mut self.grid)
    }

    /// Remove the selected tiles, then reset the selection
    pub fn delete_selection(&mut self) -> usize {
        let removed = TileClipboard::delete(self.selection.rect(), &mut self.grid, self.tile_size);
        self.selection.clear();
        removed
    }

    /// Fill the region under `start` with `new_tile_id`
    ///
    /// The replaced id is read from `start`; an empty start cell fills empty space.
    pub fn flood_fill(&mut self, start: TilePos, new_tile_id: TileId) -> usize {
        let old_tile_id = self
            .grid
            .get(start)
            .map(|record| record.tile_id)
            .unwrap_or(EMPTY_TILE);
        flood_fill(
            &mut self.grid,
            old_tile_id,
            new_tile_id,
            &Metadata::new(),
            start,
        )
    }

    pub fn fill_with_current(&mut self, start: TilePos) -> usize {
        self.flood_fill(start, self.current_tile)
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    /// Select a palette tile. Unknown ids are ignored.
    pub fn select_tile(&mut self, tile_id: TileId) -> bool {
        if !self.palette.contains(tile_id) {
            return false;
        }
        self.current_tile = tile_id;
        true
    }

    /// Step the current tile by `delta`, clamped to the palette's id range
    pub fn cycle_tile(&mut self, delta: i32) -> TileId {
        if let (Some(first), Some(last)) = (self.palette.first_id(), self.palette.last_id()) {
            let next = self.current_tile as i64 + delta as i64;
            self.current_tile = next.clamp(first as i64, last as i64) as TileId;
        }
        self.current_tile
    }
}
