//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D point/displacement in play-area pixels.
/// x grows rightward, y grows downward (screen convention).
pub use glam::DVec2 as Vec2;

/// World position component. Newtype so it can coexist with other
/// `Vec2`-shaped components in the ECS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Simulation clock, driven by host-supplied frame deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GameTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl GameTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
