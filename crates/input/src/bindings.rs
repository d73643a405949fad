//! Logical actions and their default key bindings.

use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// A logical control the character responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    Sprint,
    Crouch,
    Jump,
    /// Lean toward +1 (roll left).
    LeanLeft,
    /// Lean toward -1 (roll right).
    LeanRight,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Sprint,
        Action::Crouch,
        Action::Jump,
        Action::LeanLeft,
        Action::LeanRight,
    ];

    /// Default keys: WASD plus arrows, Shift, C, Space/Numpad0, E/Q.
    pub fn default_keys(self) -> &'static [KeyCode] {
        match self {
            Action::MoveForward => &[KeyCode::KeyW, KeyCode::ArrowUp],
            Action::MoveBackward => &[KeyCode::KeyS, KeyCode::ArrowDown],
            Action::StrafeLeft => &[KeyCode::KeyA, KeyCode::ArrowLeft],
            Action::StrafeRight => &[KeyCode::KeyD, KeyCode::ArrowRight],
            Action::Sprint => &[KeyCode::ShiftLeft, KeyCode::ShiftRight],
            Action::Crouch => &[KeyCode::KeyC],
            Action::Jump => &[KeyCode::Space, KeyCode::Numpad0],
            Action::LeanLeft => &[KeyCode::KeyE],
            Action::LeanRight => &[KeyCode::KeyQ],
        }
    }
}

/// Action → keys table. Any bound key being held holds the action.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    keys: HashMap<Action, Vec<KeyCode>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = Action::ALL
            .iter()
            .map(|&action| (action, action.default_keys().to_vec()))
            .collect();
        Self { keys }
    }
}

impl KeyBindings {
    pub fn keys_for(&self, action: Action) -> &[KeyCode] {
        self.keys.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }
}
