//! Frame snapshot — the complete visible state sent to the frontend
//! each tick. The renderer replays it as draw-image and draw-text
//! calls; the core never touches a drawing surface directly.

use serde::{Deserialize, Serialize};

use crate::enums::{GameState, Side, SpriteId};
use crate::events::AudioEvent;
use crate::types::GameTime;

/// Complete visible state produced by one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: GameTime,
    pub state: GameState,
    pub player: Option<PlayerView>,
    pub enemies: Vec<ShipView>,
    pub missiles: Vec<MissileView>,
    pub bunkers: Vec<BunkerView>,
    /// One-tick blast visuals for ships destroyed this cycle.
    pub explosions: Vec<ExplosionView>,
    /// Fixed HUD/menu text for the current state.
    pub hud: Vec<TextView>,
    pub audio_events: Vec<AudioEvent>,
}

/// The player ship and its HUD-relevant state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f64,
    pub y: f64,
    pub lives: i32,
    pub sprite: SpriteId,
}

/// A live formation member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub x: f64,
    pub y: f64,
    pub sprite: SpriteId,
}

/// An in-flight missile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileView {
    pub x: f64,
    pub y: f64,
    pub side: Side,
    pub sprite: SpriteId,
}

/// A bunker with its current (eroded) alpha mask, so the renderer can
/// draw the damage the collision engine carved out of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BunkerView {
    pub x: f64,
    pub y: f64,
    pub width: u32,
    pub height: u32,
    /// Row-major alpha channel, `width * height` entries.
    pub alpha: Vec<u8>,
}

/// A one-tick explosion visual, centered on the dead ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub x: f64,
    pub y: f64,
    pub sprite: SpriteId,
}

/// Fixed text the renderer draws at a logical position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextView {
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Center the text horizontally on `x` instead of left-aligning.
    pub centered: bool,
}
