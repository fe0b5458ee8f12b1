//! Simulation systems, run in a fixed order each Play tick.

pub mod cleanup;
pub mod collision;
pub mod formation;
pub mod missile_flight;
pub mod player_control;
pub mod snapshot;
