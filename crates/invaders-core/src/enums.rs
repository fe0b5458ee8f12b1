//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Allegiance tag gating which entities can damage each other.
/// Same-side collision checks are skipped; `Neutral` (bunkers)
/// collides with both `Ally` and `Enemy` fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Ally,
    Enemy,
    Neutral,
}

/// Game state (top-level state machine).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Menu,
    Play,
    Pause,
    Win,
    Lost,
}

/// Horizontal heading of the enemy formation sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepDirection {
    Left,
    #[default]
    Right,
}

/// Named sprite assets supplied by the asset provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    PlayerShip,
    EnemyTier1,
    EnemyTier2,
    EnemyTier3,
    EnemyTier4,
    EnemyTier5,
    Missile,
    Bunker,
    Explosion,
    Heart,
}

impl SpriteId {
    /// All enemy tiers, top row first.
    pub const ENEMY_TIERS: [SpriteId; 5] = [
        SpriteId::EnemyTier1,
        SpriteId::EnemyTier2,
        SpriteId::EnemyTier3,
        SpriteId::EnemyTier4,
        SpriteId::EnemyTier5,
    ];

    /// Every asset the simulation draws.
    pub const ALL: [SpriteId; 10] = [
        SpriteId::PlayerShip,
        SpriteId::EnemyTier1,
        SpriteId::EnemyTier2,
        SpriteId::EnemyTier3,
        SpriteId::EnemyTier4,
        SpriteId::EnemyTier5,
        SpriteId::Missile,
        SpriteId::Bunker,
        SpriteId::Explosion,
        SpriteId::Heart,
    ];
}
