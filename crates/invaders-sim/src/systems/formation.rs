//! Enemy formation system: random fire, horizontal sweep, boundary
//! reversal, and the difficulty ratchet.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use invaders_core::constants::*;
use invaders_core::enums::SweepDirection;
use invaders_core::events::AudioEvent;
use invaders_core::types::Position;

use crate::formation::Formation;
use crate::world_setup::{self, PendingMissile};

/// Advance the formation by one tick.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    formation: &mut Formation,
    rng: &mut ChaCha8Rng,
    pending: &mut Vec<PendingMissile>,
    next_missile_id: &mut u32,
    audio_events: &mut Vec<AudioEvent>,
    play_width: f64,
    dt: f64,
) {
    // Random fire: each trial picks a uniformly random member, which
    // fires subject to its one-outstanding-missile limit.
    let fire_chance = (formation.fire_prob * dt).clamp(0.0, 1.0);
    for _ in 0..formation.fire_trials {
        if formation.members.is_empty() {
            break;
        }
        if rng.gen_bool(fire_chance) {
            let pick = rng.gen_range(0..formation.members.len());
            let member = formation.members[pick];
            world_setup::fire_missile(world, member, pending, next_missile_id, audio_events);
        }
    }

    // Left margin: reverse to rightward, drop every member by the
    // prior forward step, then ratchet the difficulty.
    if formation.position.x <= FORMATION_LEFT_MARGIN {
        formation.heading = SweepDirection::Right;
        let step = formation.forward_step;
        for &member in &formation.members {
            if let Ok(mut pos) = world.get::<&mut Position>(member) {
                pos.0.y += step;
            }
        }
        formation.forward_step += RATCHET_STEP_INCREMENT;
        formation.speed += RATCHET_SPEED_INCREMENT;
        if formation.fire_prob < FIRE_PROB_CAP {
            formation.fire_prob += RATCHET_FIRE_PROB_INCREMENT;
        }
        formation.drop_count += 1;
        if formation.drop_count % DROPS_PER_EXTRA_TRIAL == 0 {
            formation.fire_trials += 1;
        }
    }

    // Right wall: reverse to leftward. No drop, no ratchet.
    if formation.position.x + formation.base_width >= play_width {
        formation.heading = SweepDirection::Left;
    }

    // Sweep: formation position and every member move in lockstep.
    let dx = formation.speed
        * dt
        * match formation.heading {
            SweepDirection::Left => -1.0,
            SweepDirection::Right => 1.0,
        };
    for &member in &formation.members {
        if let Ok(mut pos) = world.get::<&mut Position>(member) {
            pos.0.x += dx;
        }
    }
    formation.position.x += dx;
}
