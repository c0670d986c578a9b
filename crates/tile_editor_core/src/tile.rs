//! Tile identifiers, grid coordinates and stored tile records

use crate::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::{Add, Sub};

/// Palette tile identifier (1-based)
pub type TileId = u32;

/// Reserved id meaning "no tile". Only used in flood fill comparisons, never stored.
pub const EMPTY_TILE: TileId = 0;

/// Per-tile metadata payload
pub type Metadata = HashMap<String, Value>;

/// Integer cell coordinate on the infinite grid (tile units)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The 4-connected neighbors in fill order: left, right, up, down
    ///
    /// Neighbors past the `i32` range are skipped.
    pub fn neighbors(self) -> impl Iterator<Item = TilePos> {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(dx, dy)| self.checked_add(TilePos::new(dx, dy)))
    }

    /// `self + rhs`, or None if either axis overflows
    pub fn checked_add(self, rhs: TilePos) -> Option<TilePos> {
        Some(TilePos::new(
            self.x.checked_add(rhs.x)?,
            self.y.checked_add(rhs.y)?,
        ))
    }
}

impl From<(i32, i32)> for TilePos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<TilePos> for (i32, i32) {
    fn from(pos: TilePos) -> Self {
        (pos.x, pos.y)
    }
}

impl Add for TilePos {
    type Output = TilePos;

    fn add(self, rhs: TilePos) -> TilePos {
        TilePos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for TilePos {
    type Output = TilePos;

    fn sub(self, rhs: TilePos) -> TilePos {
        TilePos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A tile stored in the grid
///
/// `position` always equals the key the record is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    pub tile_id: TileId,
    pub position: TilePos,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
}

impl TileRecord {
    pub fn new(tile_id: TileId, position: TilePos, metadata: Metadata) -> Self {
        Self {
            tile_id,
            position,
            metadata,
        }
    }
}
