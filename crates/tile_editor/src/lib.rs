//! tile_editor - Infinite-grid tile map editor for Bevy
//!
//! This crate wraps the headless `tile_editor_core` model in a Bevy app:
//! - Sprite sheet palette loading
//! - Place/erase painting with the mouse
//! - Rectangle selection with copy/paste/delete
//! - Flood fill
//! - Persisted editor preferences
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use tile_editor::EditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(EditorPlugin::new().with_sheet_path("tiles/20_20.png"))
//!         .run();
//! }
//! ```

pub mod commands;
pub mod palette;
pub mod preferences;
pub mod render;
pub mod tools;
pub mod ui;

pub use tile_editor_core;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use std::path::{Path, PathBuf};
use tile_editor_core::{EditMode, EditorState, Palette};

use commands::{handle_keyboard_shortcuts, process_edit_actions, PendingAction};
use preferences::EditorPreferences;
use render::TileRenderPlugin;
use tools::EditorToolsPlugin;
use ui::EditorUiPlugin;

/// Resource storing the assets directory used to resolve relative sheet paths
#[derive(Resource, Default)]
pub struct AssetsBasePath(pub PathBuf);

impl AssetsBasePath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Get the assets directory path
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Global editor state: the core model plus shell bookkeeping
#[derive(Resource, Deref, DerefMut)]
pub struct Editor {
    #[deref]
    pub state: EditorState<Handle<Image>>,
    /// Actions queued by shortcuts this frame, applied in order by `process_edit_actions`
    pub pending_actions: Vec<PendingAction>,
}

impl Editor {
    pub fn new(tile_size: i32) -> Self {
        Self {
            state: EditorState::new(Palette::default(), tile_size),
            pending_actions: Vec::new(),
        }
    }
}

/// Configuration for initial editor state
///
/// Explicit values take precedence over saved preferences.
#[derive(Clone, Debug, Default)]
pub struct EditorStateConfig {
    /// Sprite sheet to slice into the palette
    pub sheet_path: Option<String>,
    /// Map tile size in pixels
    pub tile_size: Option<u32>,
    /// Initial edit mode. Default: Place
    pub initial_mode: EditMode,
}

/// Main editor plugin with configurable assets path and initial state
///
/// # Example
///
/// ```rust,ignore
/// use bevy::prelude::*;
/// use tile_editor::{EditorPlugin, tile_editor_core::EditMode};
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         EditorPlugin::new()
///             .with_assets_path("my_assets")
///             .with_tile_size(32)
///             .with_initial_mode(EditMode::Erase)
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct EditorPlugin {
    /// Custom assets path. If None, defaults to `./assets`.
    pub assets_path: Option<PathBuf>,
    /// Initial editor state configuration.
    pub initial_state: EditorStateConfig,
}

impl EditorPlugin {
    /// Create an editor plugin with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the assets directory path
    pub fn with_assets_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.assets_path = Some(path.into());
        self
    }

    /// Set the sprite sheet used for the palette
    pub fn with_sheet_path(mut self, path: impl Into<String>) -> Self {
        self.initial_state.sheet_path = Some(path.into());
        self
    }

    /// Set the map tile size in pixels (minimum 1)
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.initial_state.tile_size = Some(tile_size.max(1));
        self
    }

    /// Set the initial edit mode (default: Place)
    pub fn with_initial_mode(mut self, mode: EditMode) -> Self {
        self.initial_state.initial_mode = mode;
        self
    }

    fn detect_assets_path(&self) -> PathBuf {
        if let Some(path) = &self.assets_path {
            return path.clone();
        }

        std::env::current_dir()
            .map(|p| p.join("assets"))
            .unwrap_or_else(|_| PathBuf::from("assets"))
    }

    /// Merge plugin configuration over the saved preferences
    fn apply_overrides(&self, mut preferences: EditorPreferences) -> EditorPreferences {
        if let Some(path) = &self.initial_state.sheet_path {
            preferences.sheet_path = path.clone();
        }
        if let Some(tile_size) = self.initial_state.tile_size {
            preferences.tile_size = tile_size;
        }
        preferences.tile_size = preferences.tile_size.max(1);
        preferences
    }
}

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        let assets_path = self.detect_assets_path();
        bevy::log::info!("EditorPlugin: Using assets path: {:?}", assets_path);

        let preferences = self.apply_overrides(EditorPreferences::load());
        bevy::log::info!(
            "Loaded editor preferences (tile size {}, sheet {})",
            preferences.tile_size,
            preferences.sheet_path
        );

        let mut editor = Editor::new(preferences.tile_size as i32);
        editor.set_mode(self.initial_state.initial_mode);

        app.add_plugins(EguiPlugin::default())
            .add_plugins(EditorUiPlugin)
            .add_plugins(TileRenderPlugin)
            .add_plugins(EditorToolsPlugin)
            .insert_resource(editor)
            .insert_resource(preferences)
            .insert_resource(AssetsBasePath::new(assets_path))
            .add_systems(Startup, (setup_editor_camera, palette::load_palette))
            .add_systems(
                Update,
                (handle_keyboard_shortcuts, process_edit_actions).chain(),
            )
            .add_systems(Last, save_preferences_on_exit);
    }
}

/// Persist preferences, including the last window size, when the app exits
fn save_preferences_on_exit(
    mut exit_events: MessageReader<AppExit>,
    windows: Query<&Window, With<bevy::window::PrimaryWindow>>,
    mut preferences: ResMut<EditorPreferences>,
) {
    if exit_events.read().next().is_none() {
        return;
    }

    if let Ok(window) = windows.single() {
        preferences.remember_window_size(
            window.resolution.physical_width(),
            window.resolution.physical_height(),
        );
    }

    if let Err(e) = preferences.save() {
        bevy::log::error!("Failed to save preferences: {}", e);
    }
}

/// Spawns the editor camera if one doesn't exist
fn setup_editor_camera(mut commands: Commands, camera_query: Query<&Camera2d>) {
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_overrides_preferences() {
        let plugin = EditorPlugin::new()
            .with_sheet_path("tiles/cave.png")
            .with_tile_size(0);
        let prefs = plugin.apply_overrides(EditorPreferences::default());

        assert_eq!(prefs.sheet_path, "tiles/cave.png");
        assert_eq!(prefs.tile_size, 1);
    }

    #[test]
    fn test_plugin_keeps_preferences_without_overrides() {
        let mut saved = EditorPreferences::default();
        saved.tile_size = 32;
        let prefs = EditorPlugin::new().apply_overrides(saved.clone());
        assert_eq!(prefs, saved);
    }

    #[test]
    fn test_editor_starts_empty() {
        let editor = Editor::new(20);
        assert!(editor.palette.is_empty());
        assert!(editor.grid.is_empty());
        assert!(editor.pending_actions.is_empty());
    }
}
