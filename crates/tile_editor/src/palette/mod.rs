//! Sprite sheet loading into the editor palette
//!
//! Decodes the configured sheet with the `image` crate, slices it with
//! `Palette::build`, and uploads every tile as a Bevy `Image` asset.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use image::{DynamicImage, RgbaImage};
use std::path::{Path, PathBuf};
use tile_editor_core::{Palette, PaletteError, SheetLayout};

use crate::preferences::EditorPreferences;
use crate::{AssetsBasePath, Editor};

#[derive(Debug)]
pub enum SheetLoadError {
    IoError(String),
    DecodeError(String),
    Palette(PaletteError),
}

impl std::fmt::Display for SheetLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetLoadError::IoError(e) => write!(f, "IO error: {}", e),
            SheetLoadError::DecodeError(e) => write!(f, "Decode error: {}", e),
            SheetLoadError::Palette(e) => write!(f, "Invalid sheet: {}", e),
        }
    }
}

impl std::error::Error for SheetLoadError {}

impl From<PaletteError> for SheetLoadError {
    fn from(e: PaletteError) -> Self {
        SheetLoadError::Palette(e)
    }
}

/// A decoded sheet ready to be uploaded
pub struct LoadedSheet {
    pub palette: Palette<RgbaImage>,
    pub layout: SheetLayout,
}

/// Decode sheet bytes and slice them into palette tiles
pub fn decode_sheet(
    bytes: &[u8],
    cell_width: u32,
    cell_height: u32,
    colorkey: Option<[u8; 3]>,
) -> Result<LoadedSheet, SheetLoadError> {
    let sheet = image::load_from_memory(bytes)
        .map_err(|e| SheetLoadError::DecodeError(e.to_string()))?
        .to_rgba8();

    let layout = SheetLayout::new(sheet.width(), sheet.height(), cell_width, cell_height)?;
    let palette = Palette::build(&sheet, cell_width, cell_height, colorkey)?;
    Ok(LoadedSheet { palette, layout })
}

/// Read and decode the sheet at `path`
pub fn load_sheet(path: &Path, prefs: &EditorPreferences) -> Result<LoadedSheet, SheetLoadError> {
    let bytes = std::fs::read(path).map_err(|e| SheetLoadError::IoError(e.to_string()))?;
    decode_sheet(
        &bytes,
        prefs.sheet_cell_width,
        prefs.sheet_cell_height,
        prefs.colorkey,
    )
}

/// Resolve the configured sheet path: absolute paths as-is, relative paths
/// against the assets directory when the file exists there
pub fn resolve_sheet_path(sheet_path: &str, assets: &Path) -> PathBuf {
    let path = PathBuf::from(sheet_path);
    if path.is_absolute() {
        return path;
    }
    let in_assets = assets.join(&path);
    if in_assets.exists() {
        in_assets
    } else {
        path
    }
}

/// Startup system: build the palette from the configured sheet
pub fn load_palette(
    mut editor: ResMut<Editor>,
    mut images: ResMut<Assets<Image>>,
    preferences: Res<EditorPreferences>,
    assets_path: Res<AssetsBasePath>,
) {
    let path = resolve_sheet_path(&preferences.sheet_path, assets_path.path());

    let loaded = match load_sheet(&path, &preferences) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Failed to load sprite sheet {:?}: {}", path, e);
            return;
        }
    };

    if loaded.layout.is_truncated() {
        warn!(
            "Sprite sheet {}x{} is not a multiple of {}x{} cells; partial cells dropped",
            loaded.layout.sheet_width,
            loaded.layout.sheet_height,
            loaded.layout.cell_width,
            loaded.layout.cell_height
        );
    }

    let palette = loaded.palette.map_handles(|tile| {
        images.add(Image::from_dynamic(
            DynamicImage::ImageRgba8(tile),
            true,
            RenderAssetUsages::default(),
        ))
    });

    info!(
        "Loaded {} tiles ({}x{}) from {:?}",
        palette.len(),
        loaded.layout.columns,
        loaded.layout.rows,
        path
    );

    editor.palette = palette;
    if let Some(first) = editor.palette.first_id() {
        if !editor.palette.contains(editor.current_tile) {
            editor.current_tile = first;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let sheet = RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]));
        let mut bytes = Vec::new();
        sheet
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_sheet() {
        let loaded = decode_sheet(&png_bytes(40, 20), 20, 20, None).unwrap();
        assert_eq!(loaded.palette.len(), 2);
        assert!(!loaded.layout.is_truncated());
    }

    #[test]
    fn test_decode_truncated_sheet() {
        let loaded = decode_sheet(&png_bytes(50, 20), 20, 20, None).unwrap();
        assert_eq!(loaded.palette.len(), 2);
        assert!(loaded.layout.is_truncated());
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode_sheet(b"not an image", 20, 20, None),
            Err(SheetLoadError::DecodeError(_))
        ));
    }

    #[test]
    fn test_decode_sheet_too_small() {
        assert!(matches!(
            decode_sheet(&png_bytes(10, 10), 20, 20, None),
            Err(SheetLoadError::Palette(PaletteError::SheetTooSmall { .. }))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let prefs = EditorPreferences::default();
        assert!(matches!(
            load_sheet(Path::new("definitely/missing/sheet.png"), &prefs),
            Err(SheetLoadError::IoError(_))
        ));
    }

    #[test]
    fn test_resolve_sheet_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tiles.png"), png_bytes(20, 20)).unwrap();

        assert_eq!(
            resolve_sheet_path("tiles.png", dir.path()),
            dir.path().join("tiles.png")
        );
        assert_eq!(
            resolve_sheet_path("other.png", dir.path()),
            PathBuf::from("other.png")
        );
    }
}
