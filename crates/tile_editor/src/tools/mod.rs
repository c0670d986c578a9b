//! Editor tools - painting, selection, panning and tile cycling
//!
//! Handles viewport input and routes it into the core editor operations.

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;
use tile_editor_core::{world_tile_pos, TilePos};

use crate::preferences::EditorPreferences;
use crate::render::RenderState;
use crate::Editor;

/// Plugin for editor tools and viewport input
pub struct EditorToolsPlugin;

impl Plugin for EditorToolsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportInputState>().add_systems(
            Update,
            (
                update_cursor_tile,
                handle_scroll_keys,
                handle_viewport_input,
                handle_tile_wheel,
            )
                .chain(),
        );
    }
}

/// State for viewport input handling
#[derive(Resource, Default)]
pub struct ViewportInputState {
    /// Cursor position in window pixels (top-left origin, y down)
    pub cursor_screen: Option<Vec2>,
    /// World tile under the cursor
    pub cursor_tile: Option<TilePos>,
    /// World pixel shown at the top-left corner of the window
    pub scroll: Vec2,
    /// Whether we're currently panning
    pub is_panning: bool,
    /// Last cursor position for panning
    pub pan_start_pos: Option<Vec2>,
    /// Whether either Ctrl key is held
    pub ctrl: bool,
}

impl ViewportInputState {
    /// Whether the cursor is over the map rather than the palette sidebar
    pub fn cursor_in_viewport(&self, sidebar_width: f32) -> bool {
        self.cursor_screen
            .is_some_and(|pos| in_viewport(pos.x, sidebar_width))
    }
}

/// Painting is only allowed to the right of the palette sidebar
pub fn in_viewport(cursor_x: f32, sidebar_width: f32) -> bool {
    cursor_x > sidebar_width
}

/// Scroll offset after dragging the map from `last` to `current`
///
/// The world follows the cursor: dragging right reveals tiles to the left.
pub fn pan_scroll(scroll: Vec2, last: Vec2, current: Vec2) -> Vec2 {
    scroll - (current - last)
}

/// Per-frame scroll change for the held arrow keys
pub fn arrow_scroll_delta(left: bool, right: bool, up: bool, down: bool, speed: f32) -> Vec2 {
    let mut delta = Vec2::ZERO;
    if left {
        delta.x -= speed;
    }
    if right {
        delta.x += speed;
    }
    if up {
        delta.y -= speed;
    }
    if down {
        delta.y += speed;
    }
    delta
}

/// Tile id step for a wheel event: up selects the previous tile, down the next
pub fn wheel_step(wheel_y: f32) -> i32 {
    if wheel_y > 0.0 {
        -1
    } else if wheel_y < 0.0 {
        1
    } else {
        0
    }
}

/// Track the cursor and the world tile under it
fn update_cursor_tile(
    windows: Query<&Window, With<PrimaryWindow>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    editor: Res<Editor>,
    mut input_state: ResMut<ViewportInputState>,
) {
    input_state.ctrl =
        keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);

    let Ok(window) = windows.single() else {
        return;
    };

    let cursor = window.cursor_position();
    let scroll = input_state.scroll;
    input_state.cursor_screen = cursor;
    input_state.cursor_tile = cursor
        .map(|pos| world_tile_pos((pos.x, pos.y), (scroll.x, scroll.y), editor.tile_size as f32));
}

/// Scroll the viewport with the arrow keys
fn handle_scroll_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    preferences: Res<EditorPreferences>,
    mut input_state: ResMut<ViewportInputState>,
) {
    let delta = arrow_scroll_delta(
        keyboard.pressed(KeyCode::ArrowLeft),
        keyboard.pressed(KeyCode::ArrowRight),
        keyboard.pressed(KeyCode::ArrowUp),
        keyboard.pressed(KeyCode::ArrowDown),
        preferences.scroll_speed,
    );
    if delta != Vec2::ZERO {
        input_state.scroll += delta;
    }
}

/// Main viewport input system: painting, selection and panning
fn handle_viewport_input(
    mut contexts: EguiContexts,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    preferences: Res<EditorPreferences>,
    mut editor: ResMut<Editor>,
    mut input_state: ResMut<ViewportInputState>,
    mut render_state: ResMut<RenderState>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    // Releasing the button always ends a selection, even over a widget
    if mouse_buttons.just_released(MouseButton::Right) && editor.selection.is_selecting {
        editor.end_selection();
    }

    let (Some(cursor), Some(cell)) = (input_state.cursor_screen, input_state.cursor_tile) else {
        input_state.is_panning = false;
        input_state.pan_start_pos = None;
        return;
    };

    // Let egui keep clicks and drags that start on its widgets
    if ctx.is_using_pointer() {
        input_state.is_panning = false;
        return;
    }

    // Middle-button drag pans
    if mouse_buttons.pressed(MouseButton::Middle) {
        if !input_state.is_panning {
            input_state.is_panning = true;
            input_state.pan_start_pos = Some(cursor);
        } else if let Some(start_pos) = input_state.pan_start_pos {
            input_state.scroll = pan_scroll(input_state.scroll, start_pos, cursor);
            input_state.pan_start_pos = Some(cursor);
        }
    } else {
        input_state.is_panning = false;
        input_state.pan_start_pos = None;
    }

    if mouse_buttons.pressed(MouseButton::Left)
        && input_state.cursor_in_viewport(preferences.sidebar_width)
        && editor.apply_primary(cell)
    {
        render_state.mark_dirty();
    }

    if mouse_buttons.just_pressed(MouseButton::Right) {
        editor.begin_selection(cell);
    } else if mouse_buttons.pressed(MouseButton::Right)
        && !input_state.ctrl
        && editor.selection.is_selecting
    {
        editor.update_selection(cell);
    }
}

/// Mouse wheel steps through the palette
fn handle_tile_wheel(mut wheel_events: MessageReader<MouseWheel>, mut editor: ResMut<Editor>) {
    for event in wheel_events.read() {
        let step = wheel_step(event.y);
        if step != 0 {
            let tile_id = editor.cycle_tile(step);
            debug!("Current tile: {}", tile_id);
        }
    }
}
