//! Core data structures for tile_editor
//!
//! This crate provides the headless tile map model and every editing operation:
//! - `TileGrid` - Sparse infinite grid with monotonically widening world bounds
//! - `Palette` - Tile id to drawable handle mapping sliced from a sprite sheet
//! - `TileSelection` - Drag gesture to normalized pixel rectangle
//! - `TileClipboard` - Offset-relative copy/paste/delete of rectangular regions
//! - `flood_fill` - Breadth-first region fill fenced by the world bounds
//! - `EditorState` - The single owned aggregate the editor shell drives
//! - `Value` - Generic metadata value type

mod clipboard;
mod editor;
mod fill;
mod grid;
mod palette;
mod selection;
mod tile;
mod value;
mod viewport;

pub use clipboard::{ClipboardEntry, TileClipboard};
pub use editor::{EditMode, EditorState};
pub use fill::flood_fill;
pub use grid::{TileGrid, WorldBounds};
pub use palette::{Palette, PaletteError, PaletteLayout, PixelRect, SheetLayout};
pub use selection::{SelectionRect, TileRange, TileSelection};
pub use tile::{Metadata, TileId, TilePos, TileRecord, EMPTY_TILE};
pub use value::Value;
pub use viewport::{world_tile_coord, world_tile_pos};
