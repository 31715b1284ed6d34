use std::collections::HashSet;

use super::types::{InputEvent, Key};

/// Current input state accumulated from forwarded events.
///
/// The loop forwards every event to the renderer as-is. Renderers that poll input
/// once per frame (movement keys, pointer position) feed those events into a
/// `KeyboardState` and query it from `render`.
#[derive(Debug, Default)]
pub struct KeyboardState {
    keys_down: HashSet<Key>,
    pointer_pos: Option<(f64, f64)>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an event. Returns `true` when the held-key set or pointer changed.
    pub fn apply(&mut self, ev: &InputEvent) -> bool {
        match *ev {
            InputEvent::Key { code, pressed } => {
                let key = Key::from_code(code);
                if pressed {
                    self.keys_down.insert(key)
                } else {
                    self.keys_down.remove(&key)
                }
            }
            InputEvent::PointerMoved { x, y } => {
                let changed = self.pointer_pos != Some((x, y));
                self.pointer_pos = Some((x, y));
                changed
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn pointer_pos(&self) -> Option<(f64, f64)> {
        self.pointer_pos
    }

    /// `-1`, `0` or `1` depending on which of the two keys are held.
    pub fn axis(&self, negative: Key, positive: Key) -> f32 {
        self.key_down(positive) as i32 as f32 - self.key_down(negative) as i32 as f32
    }

    /// Clears held keys, e.g. on focus loss, to avoid stuck keys.
    pub fn release_all(&mut self) {
        self.keys_down.clear();
    }
}
