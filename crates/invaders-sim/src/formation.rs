//! The enemy formation: shared pacing state for the ships that march
//! and fire as one unit. Members live in the ECS world; the formation
//! itself is owned by the engine and drives them in lockstep.

use hecs::{Entity, World};

use invaders_core::constants::*;
use invaders_core::enums::SweepDirection;
use invaders_core::types::{Position, Vec2};

/// Collective state of the enemy block.
#[derive(Debug, Clone)]
pub struct Formation {
    /// Member entities in spawn order.
    pub members: Vec<Entity>,
    /// Top-left corner of the movable block. Only x shifts during the
    /// sweep; y is fixed at the spawn origin.
    pub position: Vec2,
    /// Width of the movable block, used for the right-wall check.
    pub base_width: f64,
    /// Vertical offset at which the next tier line is placed.
    pub next_row_y: f64,
    /// Horizontal sweep speed (pixels/second).
    pub speed: f64,
    /// Downward step applied on each left-wall bounce (pixels).
    pub forward_step: f64,
    /// Probability per second that a fire trial succeeds.
    pub fire_prob: f64,
    /// Independent fire trials per update.
    pub fire_trials: u32,
    /// Left-wall bounces so far; every 4th grants an extra fire trial.
    pub drop_count: u32,
    pub heading: SweepDirection,
}

impl Formation {
    pub fn new(position: Vec2, base_width: f64) -> Self {
        Self {
            members: Vec::new(),
            position,
            base_width,
            next_row_y: 0.0,
            speed: FORMATION_SPEED,
            forward_step: FORMATION_FORWARD_STEP,
            fire_prob: FORMATION_FIRE_PROB,
            fire_trials: FORMATION_FIRE_TRIALS,
            drop_count: 0,
            heading: SweepDirection::Right,
        }
    }

    /// The formation is alive while at least one member remains.
    /// Dead members are pruned by the cleanup sweep, so emptiness is
    /// the exhaustion signal the win check reads.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Vertical position of the foremost (lowest) member: an explicit
    /// max-y scan, independent of membership order.
    pub fn foremost_y(&self, world: &World) -> Option<f64> {
        self.members
            .iter()
            .filter_map(|&m| world.get::<&Position>(m).ok().map(|p| p.0.y))
            .fold(None, |front, y| Some(front.map_or(y, |f: f64| f.max(y))))
    }
}
