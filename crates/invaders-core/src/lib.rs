//! Core types and definitions for the invaders simulation.
//!
//! This crate defines the vocabulary shared across the workspace:
//! components, sprites, input state, snapshot views, events, and
//! constants. It has no dependency on hecs or any runtime framework.

pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod sprite;
pub mod state;
pub mod types;
