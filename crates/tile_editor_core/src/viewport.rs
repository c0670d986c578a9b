//! Screen to world tile conversion

use crate::TilePos;

/// Convert one screen axis to a world tile coordinate
///
/// Floors toward negative infinity so the cell left of (or above) the world
/// origin is -1 rather than 0.
pub fn world_tile_coord(screen: f32, scroll: f32, tile_size: f32) -> i32 {
    ((screen + scroll) / tile_size).floor() as i32
}

/// Convert a cursor position (top-left origin, y down) to the tile under it
pub fn world_tile_pos(screen: (f32, f32), scroll: (f32, f32), tile_size: f32) -> TilePos {
    TilePos::new(
        world_tile_coord(screen.0, scroll.0, tile_size),
        world_tile_coord(screen.1, scroll.1, tile_size),
    )
}
