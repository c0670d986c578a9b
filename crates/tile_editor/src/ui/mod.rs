//! Palette sidebar built with egui

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass, EguiTextureHandle};
use tile_editor_core::{Palette, PaletteLayout, PixelRect, TileId};

use crate::preferences::EditorPreferences;
use crate::Editor;

/// Main UI plugin
pub struct EditorUiPlugin;

impl Plugin for EditorUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PaletteTextureCache>()
            .add_systems(EguiPrimaryContextPass, render_palette_panel);
    }
}

/// Egui texture ids for the palette tiles, in palette order
#[derive(Resource, Default)]
pub struct PaletteTextureCache {
    pub textures: Vec<(TileId, egui::TextureId)>,
}

impl PaletteTextureCache {
    pub fn is_stale(&self, palette_len: usize) -> bool {
        self.textures.len() != palette_len
    }
}

/// Translate a layout rect into panel coordinates
fn to_egui_rect(rect: PixelRect, origin: egui::Pos2) -> egui::Rect {
    egui::Rect::from_min_size(
        origin + egui::vec2(rect.x, rect.y),
        egui::vec2(rect.width, rect.height),
    )
}

/// Tile id under a click at `pointer`, with the button grid drawn at `origin`
fn clicked_tile<H>(
    layout: &PaletteLayout,
    palette: &Palette<H>,
    origin: egui::Pos2,
    pointer: egui::Pos2,
) -> Option<TileId> {
    let local = pointer - origin;
    layout.hit_test(palette, local.x, local.y)
}

/// Height the button grid needs for `count` tiles
fn grid_height(layout: &PaletteLayout, count: usize) -> f32 {
    let rows = layout.rows(count);
    if rows == 0 {
        return 0.0;
    }
    layout.button_rect(rows.saturating_sub(1) * layout.columns.max(1) as usize).y
        + layout.cell_height
        + layout.margin
}

/// Render the palette side panel
fn render_palette_panel(
    mut contexts: EguiContexts,
    mut editor: ResMut<Editor>,
    mut cache: ResMut<PaletteTextureCache>,
    preferences: Res<EditorPreferences>,
) {
    // Register tile images with egui once the palette is loaded
    if cache.is_stale(editor.palette.len()) {
        cache.textures = editor
            .palette
            .enumerate()
            .map(|(tile_id, handle)| {
                (
                    tile_id,
                    contexts.add_image(EguiTextureHandle::Strong(handle.clone())),
                )
            })
            .collect();
        debug!("Registered {} palette textures", cache.textures.len());
    }

    let Ok(ctx) = contexts.ctx_mut() else { return };

    let layout = preferences.palette_layout();
    let mut clicked = None;

    egui::SidePanel::left("palette")
        .resizable(false)
        .exact_width(preferences.sidebar_width)
        .show(ctx, |ui| {
            ui.label(format!("Mode: {}", editor.mode.label()));
            ui.label(format!("Tile: {}", editor.current_tile));
            ui.separator();

            if cache.textures.is_empty() {
                ui.label("No tiles loaded");
                return;
            }

            let origin = ui.cursor().min;
            let height = grid_height(&layout, cache.textures.len());
            let grid_rect =
                egui::Rect::from_min_size(origin, egui::vec2(ui.available_width(), height));
            let response = ui.allocate_rect(grid_rect, egui::Sense::click());

            let full_uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            for (index, (tile_id, texture_id)) in cache.textures.iter().enumerate() {
                let rect = to_egui_rect(layout.button_rect(index), origin);
                ui.painter()
                    .image(*texture_id, rect, full_uv, egui::Color32::WHITE);

                if *tile_id == editor.current_tile {
                    ui.painter().rect_stroke(
                        rect.expand(2.0),
                        0.0,
                        egui::Stroke::new(2.0, egui::Color32::from_rgb(80, 140, 230)),
                        egui::StrokeKind::Outside,
                    );
                }
            }

            if response.clicked() {
                clicked = response
                    .interact_pointer_pos()
                    .and_then(|pointer| clicked_tile(&layout, &editor.palette, origin, pointer));
            }
        });

    if let Some(tile_id) = clicked {
        if editor.select_tile(tile_id) {
            debug!("Selected tile {}", tile_id);
        }
    }
}
