//! Input drivers for the headless harness. They play key and mouse events
//! into an [`InputState`] exactly as a window event loop would.

use glam::Vec2;
use input::{ElementState, InputState, KeyCode};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptEvent {
    Key(KeyCode, ElementState),
    /// Mouse motion in pixels.
    Look(Vec2),
}

impl ScriptEvent {
    fn apply(self, input: &mut InputState) {
        match self {
            ScriptEvent::Key(key, state) => input.process_keyboard(key, state),
            ScriptEvent::Look(delta) => input.process_mouse_motion((delta.x as f64, delta.y as f64)),
        }
    }
}

fn press(key: KeyCode) -> ScriptEvent {
    ScriptEvent::Key(key, ElementState::Pressed)
}

fn release(key: KeyCode) -> ScriptEvent {
    ScriptEvent::Key(key, ElementState::Released)
}

const MOVE_KEYS: [KeyCode; 4] = [KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyS, KeyCode::KeyD];

pub enum InputScript {
    /// Events at fixed times, sorted.
    Scripted {
        events: Vec<(f32, ScriptEvent)>,
        cursor: usize,
    },
    /// Picks a new random heading every so often.
    Wander {
        rng: StdRng,
        next_change: f32,
        held: Vec<KeyCode>,
        /// Tapped keys, released on the next frame.
        taps: Vec<KeyCode>,
    },
}

impl InputScript {
    pub fn scripted(mut events: Vec<(f32, ScriptEvent)>) -> Self {
        events.sort_by(|a, b| a.0.total_cmp(&b.0));
        InputScript::Scripted { events, cursor: 0 }
    }

    /// Walk, sprint, turn, jump, crouch-walk, lean, then try to walk while
    /// the inventory is open.
    pub fn demo() -> Self {
        use KeyCode::*;
        Self::scripted(vec![
            (0.0, press(KeyW)),
            (2.0, press(ShiftLeft)),
            (4.0, release(ShiftLeft)),
            (4.5, ScriptEvent::Look(Vec2::new(300.0, 0.0))),
            (5.0, press(Space)),
            (5.2, release(Space)),
            (6.5, release(KeyW)),
            // Turn far enough that the legs must catch up.
            (7.0, ScriptEvent::Look(Vec2::new(-900.0, -60.0))),
            (8.0, press(KeyC)),
            (8.1, release(KeyC)),
            (8.5, press(KeyD)),
            (10.5, release(KeyD)),
            (11.0, press(KeyC)),
            (11.1, release(KeyC)),
            (12.0, press(KeyE)),
            (13.5, release(KeyE)),
            (14.0, press(KeyW)),
            (14.0, press(KeyA)),
            (16.0, release(KeyA)),
            (16.2, press(KeyW)),
            (19.0, release(KeyW)),
        ])
    }

    pub fn wander(seed: u64) -> Self {
        InputScript::Wander {
            rng: StdRng::seed_from_u64(seed),
            next_change: 0.0,
            held: Vec::new(),
            taps: Vec::new(),
        }
    }

    /// Feed every event due by `elapsed` into `input`.
    pub fn drive(&mut self, elapsed: f32, input: &mut InputState) {
        match self {
            InputScript::Scripted { events, cursor } => {
                while let Some(&(at, event)) = events.get(*cursor) {
                    if at > elapsed {
                        break;
                    }
                    event.apply(input);
                    *cursor += 1;
                }
            }
            InputScript::Wander {
                rng,
                next_change,
                held,
                taps,
            } => {
                for key in taps.drain(..) {
                    release(key).apply(input);
                }
                if elapsed < *next_change {
                    return;
                }
                for key in held.drain(..) {
                    release(key).apply(input);
                }
                for key in MOVE_KEYS {
                    if rng.gen_bool(0.35) {
                        held.push(key);
                    }
                }
                if rng.gen_bool(0.25) {
                    held.push(KeyCode::ShiftLeft);
                }
                for key in held.iter() {
                    press(*key).apply(input);
                }
                for key in [KeyCode::Space, KeyCode::KeyC] {
                    if rng.gen_bool(0.15) {
                        press(key).apply(input);
                        taps.push(key);
                    }
                }
                let look = Vec2::new(rng.gen_range(-400.0..400.0), rng.gen_range(-40.0..40.0));
                ScriptEvent::Look(look).apply(input);
                *next_change = elapsed + rng.gen_range(0.5..2.0);
            }
        }
    }

    /// Scripted timelines end; wandering never does.
    pub fn is_finished(&self) -> bool {
        match self {
            InputScript::Scripted { events, cursor } => *cursor >= events.len(),
            InputScript::Wander { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input::{Action, ActionSource};

    #[test]
    fn scripted_events_fire_once_in_time_order() {
        let mut script = InputScript::scripted(vec![
            (1.0, release(KeyCode::KeyW)),
            (0.0, press(KeyCode::KeyW)),
        ]);
        let mut input = InputState::new();
        script.drive(0.5, &mut input);
        assert!(input.is_action_held(Action::MoveForward));
        assert!(!script.is_finished());
        script.drive(0.9, &mut input);
        assert!(input.is_action_held(Action::MoveForward));
        script.drive(1.0, &mut input);
        assert!(!input.is_action_held(Action::MoveForward));
        assert!(script.is_finished());
    }

    #[test]
    fn look_events_accumulate_into_mouse_delta() {
        let mut script = InputScript::scripted(vec![
            (0.0, ScriptEvent::Look(Vec2::new(10.0, 0.0))),
            (0.0, ScriptEvent::Look(Vec2::new(5.0, -2.0))),
        ]);
        let mut input = InputState::new();
        script.drive(0.0, &mut input);
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::new(15.0, -2.0));
    }

    #[test]
    fn demo_script_ends_with_nothing_held() {
        let mut script = InputScript::demo();
        let mut input = InputState::new();
        script.drive(100.0, &mut input);
        assert!(script.is_finished());
        assert!(Action::ALL.iter().all(|&a| !input.is_action_held(a)));
    }

    #[test]
    fn wander_is_deterministic_per_seed() {
        let mut a = InputScript::wander(3);
        let mut b = InputScript::wander(3);
        let mut input_a = InputState::new();
        let mut input_b = InputState::new();
        for frame in 0..600 {
            let t = frame as f32 / 60.0;
            a.drive(t, &mut input_a);
            b.drive(t, &mut input_b);
            for action in Action::ALL {
                assert_eq!(input_a.is_action_held(action), input_b.is_action_held(action));
            }
        }
        assert!(!a.is_finished());
    }

    #[test]
    fn wander_taps_release_on_next_frame() {
        let mut script = InputScript::wander(11);
        let mut input = InputState::new();
        for frame in 0..600 {
            script.drive(frame as f32 / 60.0, &mut input);
            if let InputScript::Wander { taps, .. } = &script {
                for key in taps {
                    assert!(input.is_key_held(*key));
                }
            }
        }
    }
}
