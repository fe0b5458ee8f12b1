//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic; systems in
//! the sim crate own all behavior. Nothing here references hecs —
//! cross-entity links use stable numeric ids, never runtime types.

use serde::{Deserialize, Serialize};

use crate::enums::{Side, SpriteId};
use crate::sprite::Sprite;

/// Life counter. An entity is alive iff `lives > 0`; every debit is
/// floored at zero so the counter is never observed negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub lives: i32,
}

impl Health {
    pub fn new(lives: i32) -> Self {
        Self { lives }
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    /// Debit `amount` lives, floored at zero.
    pub fn debit(&mut self, amount: i32) {
        self.lives = (self.lives - amount).max(0);
    }
}

/// Which side of the conflict an entity fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allegiance(pub Side);

/// Exclusively-owned visual: the sprite buffer plus the asset it was
/// built from. Only bunkers mutate their sprite post-construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graphic {
    pub id: SpriteId,
    pub sprite: Sprite,
}

/// Missile flight state: fixed linear speed, vertical-only motion,
/// direction determined by side (up for Ally, down for Enemy).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissileBody {
    /// Unique id for ownership comparison against `Launcher::outstanding`.
    pub missile_id: u32,
    /// Ship id of the shooter (for launcher clearing on missile death).
    pub fired_by: u32,
    /// Speed in pixels per second.
    pub speed: f64,
}

/// Shooting state of a ship. At most one outstanding missile per ship,
/// by construction: `fire` is refused while `outstanding` is set. The
/// outstanding-id comparison is also the sole self-fire exclusion in
/// collision handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Launcher {
    /// Stable id identifying this ship as a shooter.
    pub ship_id: u32,
    /// Missile id of the in-flight shot, if any.
    pub outstanding: Option<u32>,
    /// Elapsed-time deadline before the next shot is allowed.
    pub cooldown_until: f64,
}

impl Launcher {
    pub fn new(ship_id: u32) -> Self {
        Self {
            ship_id,
            outstanding: None,
            cooldown_until: 0.0,
        }
    }

    pub fn can_fire(&self, elapsed_secs: f64) -> bool {
        self.outstanding.is_none() && elapsed_secs >= self.cooldown_until
    }
}

/// Per-variant collision response, chosen at construction. Replaces
/// any runtime type inspection in the damage path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitResponse {
    /// Bunker: lives −= colliding pixel count, struck pixels erased;
    /// the missile is debited by the same count. Both floored at zero.
    Absorb,
    /// Missile: any overlap with an opposite-side missile kills both
    /// outright, regardless of prior lives.
    Annihilate,
    /// Ship: both ship and missile lose `min(ship.lives, missile.lives)`,
    /// unless the missile is the ship's own outstanding shot.
    Trade,
}

/// Marks the player's ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip;

/// Marks a formation member.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyShip;

/// Marks a bunker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BunkerBlock;
