//! Simulation engine for the invaders game.
//!
//! Owns the hecs ECS world, advances it one synchronous tick per
//! host-supplied frame delta, and produces `FrameSnapshot`s for the
//! frontend. Completely headless, enabling deterministic testing.

pub mod assets;
pub mod engine;
pub mod formation;
pub mod systems;
pub mod world_setup;

pub use engine::{GameConfig, GameEngine};
pub use invaders_core as core;

#[cfg(test)]
mod tests;
