//! Standalone tile editor binary
//!
//! Run with: tile_editor [sheet.png]

use bevy::image::{ImageFilterMode, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use tile_editor::preferences::EditorPreferences;
use tile_editor::EditorPlugin;

fn main() {
    let preferences = EditorPreferences::load();

    let mut editor = EditorPlugin::default();
    if let Some(sheet_path) = std::env::args().nth(1) {
        editor = editor.with_sheet_path(sheet_path);
    }

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Level Editor".to_string(),
                        resolution: WindowResolution::new(
                            preferences.window_width,
                            preferences.window_height,
                        )
                        .with_scale_factor_override(1.0),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin {
                    // Pixel-perfect rendering: use Nearest (point) sampling for crisp pixel art
                    default_sampler: ImageSamplerDescriptor {
                        mag_filter: ImageFilterMode::Nearest,
                        min_filter: ImageFilterMode::Nearest,
                        mipmap_filter: ImageFilterMode::Nearest,
                        ..default()
                    },
                }),
        )
        .add_plugins(editor)
        .run();
}
