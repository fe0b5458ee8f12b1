//! Events emitted by the simulation for the host's sound system.
//!
//! Fire-and-forget: they ride the frame snapshot, and a host that
//! fails to play one swallows the failure — gameplay never depends
//! on audio.

use serde::{Deserialize, Serialize};

/// Audio events for the frontend sound system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// The player fired a missile.
    PlayerShoot,
    /// A formation member fired a missile.
    EnemyShoot,
    /// A formation member was destroyed (position of the blast center).
    ShipExplosion { x: f64, y: f64 },
}
