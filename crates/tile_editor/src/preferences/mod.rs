//! User preferences persisted between editor sessions

mod file;

pub use file::PreferencesError;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use tile_editor_core::PaletteLayout;

/// Editor settings loaded from the platform config directory
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// Map tile edge length in pixels
    pub tile_size: u32,
    /// Sprite sheet sliced into the palette
    pub sheet_path: String,
    pub sheet_cell_width: u32,
    pub sheet_cell_height: u32,
    /// Sheet color treated as transparent (RGB)
    pub colorkey: Option<[u8; 3]>,
    /// Palette buttons per row
    pub palette_columns: u32,
    /// Button pitch as a multiple of the cell size
    pub palette_spacing: f32,
    pub palette_margin: f32,
    /// Width of the palette sidebar; the viewport starts right of it
    pub sidebar_width: f32,
    /// Pixels scrolled per frame while an arrow key is held
    pub scroll_speed: f32,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            tile_size: 20,
            sheet_path: "20_20.png".to_string(),
            sheet_cell_width: 20,
            sheet_cell_height: 20,
            colorkey: Some([255, 255, 255]),
            palette_columns: 4,
            palette_spacing: 1.4,
            palette_margin: 20.0,
            sidebar_width: 200.0,
            scroll_speed: 5.0,
            window_width: 1200,
            window_height: 600,
        }
    }
}

impl EditorPreferences {
    /// Button grid for the palette panel
    pub fn palette_layout(&self) -> PaletteLayout {
        PaletteLayout {
            columns: self.palette_columns.max(1),
            cell_width: self.sheet_cell_width as f32,
            cell_height: self.sheet_cell_height as f32,
            spacing: self.palette_spacing,
            margin: self.palette_margin,
        }
    }

    /// Record the window size for the next session. Returns true if it changed.
    pub fn remember_window_size(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        if (self.window_width, self.window_height) == (width, height) {
            return false;
        }
        self.window_width = width;
        self.window_height = height;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences() {
        let prefs = EditorPreferences::default();
        assert_eq!(prefs.tile_size, 20);
        assert_eq!(prefs.sheet_path, "20_20.png");
        assert_eq!(prefs.colorkey, Some([255, 255, 255]));
        assert_eq!(prefs.palette_layout(), PaletteLayout::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let prefs: EditorPreferences =
            serde_json::from_str(r#"{ "tile_size": 32, "colorkey": null }"#).unwrap();
        assert_eq!(prefs.tile_size, 32);
        assert_eq!(prefs.colorkey, None);
        assert_eq!(prefs.palette_columns, 4);
    }

    #[test]
    fn test_remember_window_size() {
        let mut prefs = EditorPreferences::default();
        assert!(!prefs.remember_window_size(1200, 600));
        assert!(prefs.remember_window_size(1600, 900));
        assert_eq!((prefs.window_width, prefs.window_height), (1600, 900));

        // Minimized windows report zero and are ignored
        assert!(!prefs.remember_window_size(0, 0));
        assert_eq!((prefs.window_width, prefs.window_height), (1600, 900));
    }

    #[test]
    fn test_json_round_trip() {
        let mut prefs = EditorPreferences::default();
        prefs.sheet_path = "tiles/dungeon.png".to_string();
        prefs.scroll_speed = 12.0;

        let json = serde_json::to_string_pretty(&prefs).unwrap();
        let loaded: EditorPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, prefs);
    }
}
