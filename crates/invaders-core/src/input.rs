//! Input boundary: the set of currently pressed logical keys.
//!
//! The host samples its keyboard and mirrors presses/releases into
//! `InputState`. The engine reads held keys for continuous actions
//! (movement) and consumes individual keys after one-shot actions
//! (state transitions, firing) so a single held press triggers once.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Logical keys the simulation reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Space,
    KeyP,
}

/// Queryable set of currently pressed keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputState {
    pressed: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    /// Remove a key from the pressed set. Used both for host key-up
    /// events and by the engine to consume a one-shot trigger until
    /// the user explicitly presses again.
    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}
