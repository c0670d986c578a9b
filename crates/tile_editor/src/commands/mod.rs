//! Edit actions triggered by keyboard shortcuts

mod shortcuts;

pub use shortcuts::{handle_keyboard_shortcuts, shortcut_action, shortcut_actions};

use bevy::prelude::*;
use tile_editor_core::{EditMode, EditorState, TilePos};

use crate::render::RenderState;
use crate::tools::ViewportInputState;
use crate::Editor;

/// An edit requested by a shortcut, queued until `process_edit_actions` runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Copy,
    Paste,
    DeleteSelection,
    Fill,
    SetMode(EditMode),
}

/// Apply `action` at the cursor tile. Returns true if the grid changed.
///
/// Paste and fill need a cursor position and do nothing without one.
pub fn apply_action<H>(
    state: &mut EditorState<H>,
    action: PendingAction,
    cursor: Option<TilePos>,
) -> bool {
    match action {
        PendingAction::Copy => {
            let copied = state.copy_selection();
            debug!("Copied {} tiles", copied);
            false
        }
        PendingAction::Paste => {
            let Some(cell) = cursor else {
                return false;
            };
            let pasted = state.paste_selection(cell);
            debug!("Pasted {} tiles at ({}, {})", pasted, cell.x, cell.y);
            pasted > 0
        }
        PendingAction::DeleteSelection => {
            let removed = state.delete_selection();
            debug!("Deleted {} tiles", removed);
            removed > 0
        }
        PendingAction::Fill => {
            let Some(cell) = cursor else {
                return false;
            };
            let written = state.fill_with_current(cell);
            debug!("Filled {} tiles from ({}, {})", written, cell.x, cell.y);
            written > 0
        }
        PendingAction::SetMode(mode) => {
            state.set_mode(mode);
            false
        }
    }
}

/// Apply `actions` in order. Returns true if any of them changed the grid.
pub fn apply_actions<H>(
    state: &mut EditorState<H>,
    actions: impl IntoIterator<Item = PendingAction>,
    cursor: Option<TilePos>,
) -> bool {
    actions
        .into_iter()
        .fold(false, |changed, action| apply_action(state, action, cursor) || changed)
}

/// System to process edit-related pending actions
pub fn process_edit_actions(
    mut editor: ResMut<Editor>,
    input_state: Res<ViewportInputState>,
    mut render_state: ResMut<RenderState>,
) {
    if editor.pending_actions.is_empty() {
        return;
    }

    let actions = std::mem::take(&mut editor.pending_actions);
    if apply_actions(&mut editor.state, actions, input_state.cursor_tile) {
        render_state.mark_dirty();
    }
}
