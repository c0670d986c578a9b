//! Map rendering for the editor viewport
//!
//! Tiles are drawn as one `Sprite` per placed cell using the palette's image
//! handles. World pixels grow downward like screen pixels, so Bevy's y axis
//! is flipped when placing sprites and the camera.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use tile_editor_core::{SelectionRect, TilePos};

use crate::tools::ViewportInputState;
use crate::Editor;

/// Plugin for map rendering
pub struct TileRenderPlugin;

impl Plugin for TileRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RenderState>().add_systems(
            Update,
            (
                sync_tile_sprites,
                sync_selection_preview,
                update_camera_from_scroll,
            ),
        );
    }
}

/// Tracks whether the tile sprites match the grid
#[derive(Resource)]
pub struct RenderState {
    /// Whether we need to rebuild the map
    pub needs_rebuild: bool,
    /// Palette size at the last rebuild, so a newly loaded sheet redraws
    pub rendered_palette_len: usize,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            needs_rebuild: true,
            rendered_palette_len: 0,
        }
    }
}

impl RenderState {
    /// Mark the viewport as needing a rebuild
    pub fn mark_dirty(&mut self) {
        self.needs_rebuild = true;
    }
}

/// Marker for tile sprites
#[derive(Component)]
pub struct TileSprite;

/// Marker for the selection rectangle
#[derive(Component)]
pub struct SelectionPreview;

/// Center of a tile in Bevy world space
pub fn tile_center(position: TilePos, tile_size: f32) -> Vec2 {
    Vec2::new(
        position.x as f32 * tile_size + tile_size / 2.0,
        -(position.y as f32 * tile_size + tile_size / 2.0),
    )
}

/// Center of a pixel-space selection rectangle in Bevy world space
pub fn rect_center(rect: SelectionRect) -> Vec2 {
    Vec2::new(
        rect.x as f32 + rect.width as f32 / 2.0,
        -(rect.y as f32 + rect.height as f32 / 2.0),
    )
}

/// Camera translation that shows `scroll` at the window's top-left corner
pub fn camera_translation(scroll: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(
        scroll.x + window_size.x / 2.0,
        -(scroll.y + window_size.y / 2.0),
    )
}

/// Rebuild tile sprites when the grid or palette changed
fn sync_tile_sprites(
    mut commands: Commands,
    editor: Res<Editor>,
    mut render_state: ResMut<RenderState>,
    existing: Query<Entity, With<TileSprite>>,
) {
    if render_state.rendered_palette_len != editor.palette.len() {
        render_state.rendered_palette_len = editor.palette.len();
        render_state.needs_rebuild = true;
    }
    if !render_state.needs_rebuild {
        return;
    }
    render_state.needs_rebuild = false;

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    let tile_size = editor.tile_size as f32;
    let mut missing = 0usize;
    for record in editor.grid.iter_ordered() {
        let Some(handle) = editor.palette.lookup(record.tile_id) else {
            missing += 1;
            continue;
        };
        let center = tile_center(record.position, tile_size);
        commands.spawn((
            Sprite {
                image: handle.clone(),
                custom_size: Some(Vec2::splat(tile_size)),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            TileSprite,
        ));
    }

    if missing > 0 {
        debug!("{} placed tiles have no palette image", missing);
    }
}

/// System to render the selection rectangle preview
fn sync_selection_preview(
    mut commands: Commands,
    editor: Res<Editor>,
    existing_preview: Query<Entity, With<SelectionPreview>>,
) {
    // Always despawn existing preview first
    for entity in existing_preview.iter() {
        commands.entity(entity).despawn();
    }

    let rect = editor.selection.rect();
    if rect.is_empty() {
        return;
    }

    let center = rect_center(rect);
    commands.spawn((
        Sprite {
            color: Color::srgba(0.2, 0.4, 0.8, 0.4),
            custom_size: Some(Vec2::new(rect.width as f32, rect.height as f32)),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 200.0), // Above all tiles
        SelectionPreview,
    ));
}

/// System to keep the camera in sync with the scroll offset
fn update_camera_from_scroll(
    input_state: Res<ViewportInputState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let translation = camera_translation(input_state.scroll, window.size());
    for mut transform in camera_query.iter_mut() {
        transform.translation.x = translation.x;
        transform.translation.y = translation.y;
    }
}
