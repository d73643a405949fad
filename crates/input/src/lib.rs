//! Input handling for keyboard and mouse, and the logical actions the
//! character controller reads.

mod bindings;

pub use bindings::*;

use glam::Vec2;
use std::collections::HashSet;

/// Anything that can answer "is this action held right now".
///
/// The controller only ever asks about levels; it derives its own edges so
/// that holding a key can never re-fire a one-shot action.
pub trait ActionSource {
    fn is_action_held(&self, action: Action) -> bool;
}

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,

    /// Mouse movement delta this frame.
    mouse_delta: Vec2,
    /// Accumulated mouse delta (for when cursor is locked).
    accumulated_delta: Vec2,

    bindings: KeyBindings,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_delta = self.accumulated_delta;
        self.accumulated_delta = Vec2::ZERO;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                if self.keys_held.remove(&key) {
                    self.keys_released.insert(key);
                }
            }
        }
    }

    /// Process mouse movement.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    /// Drop every held key without emitting releases.
    ///
    /// Used when a modal panel grabs the keyboard: the next frame sees nothing
    /// held and no release events are recorded.
    pub fn clear_held(&mut self) {
        if !self.keys_held.is_empty() {
            log::debug!("Clearing {} held keys", self.keys_held.len());
        }
        self.keys_held.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Get the mouse movement delta for this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

}

impl ActionSource for InputState {
    fn is_action_held(&self, action: Action) -> bool {
        self.bindings
            .keys_for(action)
            .iter()
            .any(|key| self.keys_held.contains(key))
    }
}

impl ActionSource for HashSet<Action> {
    fn is_action_held(&self, action: Action) -> bool {
        self.contains(&action)
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_reported_once_per_hold() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        assert!(input.is_key_pressed(KeyCode::KeyW));
        input.begin_frame();
        // OS auto-repeat sends another press while held.
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        assert!(!input.is_key_pressed(KeyCode::KeyW));
        assert!(input.is_key_held(KeyCode::KeyW));
    }

    #[test]
    fn actions_resolve_through_bindings() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::ArrowUp, ElementState::Pressed);
        assert!(input.is_action_held(Action::MoveForward));
        input.process_keyboard(KeyCode::ArrowUp, ElementState::Released);
        assert!(!input.is_action_held(Action::MoveForward));
        assert!(input.is_key_released(KeyCode::ArrowUp));

        input.process_keyboard(KeyCode::Numpad0, ElementState::Pressed);
        assert!(input.is_action_held(Action::Jump));
    }

    #[test]
    fn clear_held_emits_no_release() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        input.clear_held();
        assert!(!input.is_action_held(Action::Jump));
        assert!(!input.is_key_released(KeyCode::Space));
    }

    #[test]
    fn mouse_delta_is_latched_per_frame() {
        let mut input = InputState::new();
        input.process_mouse_motion((3.0, -2.0));
        input.process_mouse_motion((1.0, 0.5));
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::new(4.0, -1.5));
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
    }
}
