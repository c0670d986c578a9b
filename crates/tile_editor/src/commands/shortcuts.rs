//! Keyboard shortcut handling

use bevy::prelude::*;
use tile_editor_core::EditMode;

use super::PendingAction;
use crate::Editor;

/// Map a freshly pressed key to an edit action
pub fn shortcut_action(key: KeyCode, ctrl: bool) -> Option<PendingAction> {
    match key {
        KeyCode::KeyC if ctrl => Some(PendingAction::Copy),
        KeyCode::KeyV if ctrl => Some(PendingAction::Paste),
        KeyCode::KeyB => Some(PendingAction::SetMode(EditMode::Place)),
        KeyCode::KeyE => Some(PendingAction::SetMode(EditMode::Erase)),
        KeyCode::KeyF => Some(PendingAction::Fill),
        KeyCode::Delete => Some(PendingAction::DeleteSelection),
        _ => None,
    }
}

/// Map every key pressed this frame, keeping one action per key
pub fn shortcut_actions<'a>(
    keys: impl IntoIterator<Item = &'a KeyCode>,
    ctrl: bool,
) -> Vec<PendingAction> {
    keys.into_iter()
        .filter_map(|key| shortcut_action(*key, ctrl))
        .collect()
}

/// Handle keyboard shortcuts
pub fn handle_keyboard_shortcuts(keyboard: Res<ButtonInput<KeyCode>>, mut editor: ResMut<Editor>) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);

    let actions = shortcut_actions(keyboard.get_just_pressed(), ctrl);
    editor.pending_actions.extend(actions);
}
