//! Tile palette sliced from a sprite sheet
//!
//! The sheet is cut row-major into equal cells and each cell gets a sequential
//! tile id starting at 1. Trailing partial rows/columns are dropped; a zero
//! cell size or a sheet smaller than one cell is rejected.

use crate::TileId;
use image::{imageops, Rgba, RgbaImage};

/// Errors raised while slicing a sprite sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// Cell width or height is zero
    ZeroCellSize,
    /// The sheet cannot hold a single cell
    SheetTooSmall {
        sheet_width: u32,
        sheet_height: u32,
        cell_width: u32,
        cell_height: u32,
    },
}

impl std::fmt::Display for PaletteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaletteError::ZeroCellSize => write!(f, "Cell size must be non-zero"),
            PaletteError::SheetTooSmall {
                sheet_width,
                sheet_height,
                cell_width,
                cell_height,
            } => write!(
                f,
                "Sheet {}x{} is smaller than one {}x{} cell",
                sheet_width, sheet_height, cell_width, cell_height
            ),
        }
    }
}

impl std::error::Error for PaletteError {}

/// Grid geometry of a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub sheet_width: u32,
    pub sheet_height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub columns: u32,
    pub rows: u32,
}

impl SheetLayout {
    pub fn new(
        sheet_width: u32,
        sheet_height: u32,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<Self, PaletteError> {
        if cell_width == 0 || cell_height == 0 {
            return Err(PaletteError::ZeroCellSize);
        }
        let columns = sheet_width / cell_width;
        let rows = sheet_height / cell_height;
        if columns == 0 || rows == 0 {
            return Err(PaletteError::SheetTooSmall {
                sheet_width,
                sheet_height,
                cell_width,
                cell_height,
            });
        }
        Ok(Self {
            sheet_width,
            sheet_height,
            cell_width,
            cell_height,
            columns,
            rows,
        })
    }

    /// Number of tiles the sheet yields
    pub fn tile_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// True if pixels at the right or bottom edge were dropped
    pub fn is_truncated(&self) -> bool {
        self.sheet_width % self.cell_width != 0 || self.sheet_height % self.cell_height != 0
    }

    /// Pixel origin of the cell at `index` (row-major)
    pub fn cell_origin(&self, index: u32) -> (u32, u32) {
        let col = index % self.columns;
        let row = index / self.columns;
        (col * self.cell_width, row * self.cell_height)
    }
}

/// Maps tile ids to drawable handles, in assignment order
#[derive(Debug, Clone)]
pub struct Palette<H> {
    /// Handle for tile id `i + 1` lives at index `i`
    tiles: Vec<H>,
}

impl<H> Default for Palette<H> {
    fn default() -> Self {
        Self { tiles: Vec::new() }
    }
}

impl Palette<RgbaImage> {
    /// Slice `sheet` into tiles. Pixels matching `colorkey` become transparent.
    pub fn build(
        sheet: &RgbaImage,
        cell_width: u32,
        cell_height: u32,
        colorkey: Option<[u8; 3]>,
    ) -> Result<Self, PaletteError> {
        let layout = SheetLayout::new(sheet.width(), sheet.height(), cell_width, cell_height)?;

        let tiles = (0..layout.tile_count())
            .map(|index| {
                let (x, y) = layout.cell_origin(index);
                let mut tile = imageops::crop_imm(sheet, x, y, cell_width, cell_height).to_image();
                if let Some(key) = colorkey {
                    apply_colorkey(&mut tile, key);
                }
                tile
            })
            .collect();

        Ok(Self { tiles })
    }
}

impl<H> Palette<H> {
    /// Build from handles already in id order (first handle gets id 1)
    pub fn from_handles(handles: Vec<H>) -> Self {
        Self { tiles: handles }
    }

    pub fn lookup(&self, tile_id: TileId) -> Option<&H> {
        let index = (tile_id as usize).checked_sub(1)?;
        self.tiles.get(index)
    }

    /// All `(tile_id, handle)` pairs in assignment order
    pub fn enumerate(&self) -> impl Iterator<Item = (TileId, &H)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, handle)| (index as TileId + 1, handle))
    }

    pub fn contains(&self, tile_id: TileId) -> bool {
        self.lookup(tile_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn first_id(&self) -> Option<TileId> {
        (!self.tiles.is_empty()).then_some(1)
    }

    pub fn last_id(&self) -> Option<TileId> {
        (!self.tiles.is_empty()).then_some(self.tiles.len() as TileId)
    }

    /// Convert every handle, keeping ids and order
    pub fn map_handles<H2>(self, f: impl FnMut(H) -> H2) -> Palette<H2> {
        Palette {
            tiles: self.tiles.into_iter().map(f).collect(),
        }
    }
}

fn apply_colorkey(tile: &mut RgbaImage, key: [u8; 3]) {
    for pixel in tile.pixels_mut() {
        let Rgba([r, g, b, _]) = *pixel;
        if [r, g, b] == key {
            *pixel = Rgba([r, g, b, 0]);
        }
    }
}

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// On-screen arrangement of palette buttons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteLayout {
    pub columns: u32,
    pub cell_width: f32,
    pub cell_height: f32,
    /// Multiplier applied to the cell size to space buttons apart
    pub spacing: f32,
    /// Offset of the first button from the panel corner
    pub margin: f32,
}

impl Default for PaletteLayout {
    fn default() -> Self {
        Self {
            columns: 4,
            cell_width: 20.0,
            cell_height: 20.0,
            spacing: 1.4,
            margin: 20.0,
        }
    }
}

impl PaletteLayout {
    /// Button rectangle for the entry at `index` in enumeration order
    pub fn button_rect(&self, index: usize) -> PixelRect {
        let columns = self.columns.max(1) as usize;
        let col = (index % columns) as f32;
        let row = (index / columns) as f32;
        PixelRect {
            x: col * self.cell_width * self.spacing + self.margin,
            y: row * self.cell_height * self.spacing + self.margin,
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    /// Find the tile id whose button contains the point
    pub fn hit_test<H>(&self, palette: &Palette<H>, px: f32, py: f32) -> Option<TileId> {
        palette
            .enumerate()
            .enumerate()
            .find(|(index, _)| self.button_rect(*index).contains(px, py))
            .map(|(_, (tile_id, _))| tile_id)
    }

    /// Number of button rows needed for `count` entries
    pub fn rows(&self, count: usize) -> usize {
        count.div_ceil(self.columns.max(1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sheet of 4px cells, each cell a solid shade
    fn checker_sheet(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let shade = ((x / 4) * 50 + (y / 4) * 100) as u8;
            Rgba([shade, shade, shade, 255])
        })
    }

    #[test]
    fn test_build_assigns_sequential_ids_row_major() {
        let palette = Palette::build(&checker_sheet(8, 8), 4, 4, None).unwrap();
        assert_eq!(palette.len(), 4);

        let shades: Vec<(TileId, u8)> = palette
            .enumerate()
            .map(|(id, tile)| (id, tile.get_pixel(0, 0).0[0]))
            .collect();
        assert_eq!(shades, vec![(1, 0), (2, 50), (3, 100), (4, 150)]);
        assert_eq!(palette.first_id(), Some(1));
        assert_eq!(palette.last_id(), Some(4));
    }

    #[test]
    fn test_lookup_miss() {
        let palette = Palette::build(&checker_sheet(8, 8), 4, 4, None).unwrap();
        assert!(palette.lookup(0).is_none());
        assert!(palette.lookup(5).is_none());
        assert!(palette.lookup(4).is_some());
    }

    #[test]
    fn test_uneven_sheet_is_truncated() {
        let layout = SheetLayout::new(10, 9, 4, 4).unwrap();
        assert_eq!((layout.columns, layout.rows), (2, 2));
        assert!(layout.is_truncated());

        let palette = Palette::build(&checker_sheet(10, 9), 4, 4, None).unwrap();
        assert_eq!(palette.len(), 4);
        assert_eq!(palette.lookup(1).unwrap().dimensions(), (4, 4));
    }

    #[test]
    fn test_invalid_sheet_dimensions() {
        assert_eq!(SheetLayout::new(8, 8, 0, 4), Err(PaletteError::ZeroCellSize));
        assert!(matches!(
            Palette::build(&checker_sheet(3, 8), 4, 4, None),
            Err(PaletteError::SheetTooSmall { .. })
        ));
    }

    #[test]
    fn test_colorkey_makes_pixels_transparent() {
        let mut sheet = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        sheet.put_pixel(1, 1, Rgba([10, 20, 30, 255]));

        let palette = Palette::build(&sheet, 4, 4, Some([255, 255, 255])).unwrap();
        let tile = palette.lookup(1).unwrap();
        assert_eq!(tile.get_pixel(0, 0).0[3], 0);
        assert_eq!(tile.get_pixel(1, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_map_handles_keeps_ids() {
        let palette = Palette::from_handles(vec!["a", "b"]).map_handles(|h| h.to_uppercase());
        assert_eq!(palette.lookup(2).map(String::as_str), Some("B"));
    }

    #[test]
    fn test_layout_button_rects() {
        let layout = PaletteLayout::default();
        assert_eq!(
            layout.button_rect(0),
            PixelRect {
                x: 20.0,
                y: 20.0,
                width: 20.0,
                height: 20.0
            }
        );
        let fifth = layout.button_rect(4);
        assert!((fifth.x - 20.0).abs() < 1e-4);
        assert!((fifth.y - 48.0).abs() < 1e-4);
        assert_eq!(layout.rows(5), 2);
    }

    #[test]
    fn test_layout_hit_test() {
        let layout = PaletteLayout::default();
        let palette = Palette::from_handles(vec![(); 6]);

        assert_eq!(layout.hit_test(&palette, 25.0, 25.0), Some(1));
        // Second button starts at 20 + 28 = 48
        assert_eq!(layout.hit_test(&palette, 50.0, 30.0), Some(2));
        // Gap between buttons
        assert_eq!(layout.hit_test(&palette, 42.0, 25.0), None);
        // Row 1, column 1 → index 5
        assert_eq!(layout.hit_test(&palette, 50.0, 50.0), Some(6));
    }
}
