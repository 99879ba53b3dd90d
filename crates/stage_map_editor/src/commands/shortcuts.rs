//! Keyboard shortcut handling

use bevy::prelude::*;

use crate::ui::PendingAction;
use crate::EditorState;

/// Map key presses to pending editor actions
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut editor_state: ResMut<EditorState>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    if let Some(action) = shortcut_action(ctrl, shift, |key| keyboard.just_pressed(key)) {
        editor_state.pending_action = Some(action);
    }

    // Escape closes the error window
    if keyboard.just_pressed(KeyCode::Escape) {
        editor_state.error_message = None;
    }
}

/// Resolve the action bound to the keys pressed this frame
fn shortcut_action(
    ctrl: bool,
    shift: bool,
    just_pressed: impl Fn(KeyCode) -> bool,
) -> Option<PendingAction> {
    if !ctrl {
        return None;
    }
    if just_pressed(KeyCode::KeyS) {
        // Ctrl+Shift+S - Save As, Ctrl+S - Save
        return Some(if shift {
            PendingAction::SaveAs
        } else {
            PendingAction::Save
        });
    }
    if just_pressed(KeyCode::KeyO) {
        return Some(PendingAction::Open);
    }
    if just_pressed(KeyCode::KeyN) {
        return Some(PendingAction::New);
    }
    if just_pressed(KeyCode::KeyE) {
        return Some(PendingAction::ExportImage);
    }
    if just_pressed(KeyCode::KeyR) && shift {
        return Some(PendingAction::Reset);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(key: KeyCode) -> impl Fn(KeyCode) -> bool {
        move |k| k == key
    }

    #[test]
    fn test_save_shortcuts() {
        assert_eq!(
            shortcut_action(true, false, pressed(KeyCode::KeyS)),
            Some(PendingAction::Save)
        );
        assert_eq!(
            shortcut_action(true, true, pressed(KeyCode::KeyS)),
            Some(PendingAction::SaveAs)
        );
    }

    #[test]
    fn test_requires_ctrl() {
        assert_eq!(shortcut_action(false, false, pressed(KeyCode::KeyO)), None);
        assert_eq!(
            shortcut_action(true, false, pressed(KeyCode::KeyO)),
            Some(PendingAction::Open)
        );
    }

    #[test]
    fn test_reset_needs_shift() {
        assert_eq!(shortcut_action(true, false, pressed(KeyCode::KeyR)), None);
        assert_eq!(
            shortcut_action(true, true, pressed(KeyCode::KeyR)),
            Some(PendingAction::Reset)
        );
    }
}
