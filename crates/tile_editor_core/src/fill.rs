//! Flood fill (bucket fill) over the sparse grid

use crate::{Metadata, TileGrid, TileId, TilePos, EMPTY_TILE};
use std::collections::VecDeque;

/// Breadth-first fill of the 4-connected region matching `old_tile_id`
///
/// `old_tile_id == EMPTY_TILE` fills empty cells. The fill never leaves the
/// grid's world bounds. Neighbors of each dequeued cell are written before
/// being enqueued, so the start cell itself is only recolored when it is
/// reached again through a neighbor; an isolated start cell stays as it was.
///
/// Returns the number of cells written.
pub fn flood_fill(
    grid: &mut TileGrid,
    old_tile_id: TileId,
    new_tile_id: TileId,
    new_metadata: &Metadata,
    start: TilePos,
) -> usize {
    if grid.get(start).map(|record| record.tile_id) == Some(new_tile_id) {
        return 0;
    }

    let bounds = grid.bounds();
    let is_valid = |grid: &TileGrid, pos: TilePos| -> bool {
        if !bounds.contains(pos) {
            return false;
        }
        match grid.get(pos) {
            None => old_tile_id == EMPTY_TILE,
            Some(record) => record.tile_id == old_tile_id && record.tile_id != new_tile_id,
        }
    };

    let mut written = 0;
    let mut queue = VecDeque::from([start]);

    while let Some(pos) = queue.pop_front() {
        for neighbor in pos.neighbors() {
            if is_valid(grid, neighbor) {
                grid.insert(neighbor, new_tile_id, new_metadata.clone());
                written += 1;
                queue.push_back(neighbor);
            }
        }
    }

    written
}
