//! Cleanup system: the deferred dead sweep. Entities at zero lives
//! stay inert in the world until this pass removes them, releases
//! any launcher waiting on a spent missile, prunes the formation
//! roster, and records ship explosions.

use hecs::{Entity, World};

use invaders_core::components::{EnemyShip, Health, Launcher, MissileBody, PlayerShip};
use invaders_core::events::AudioEvent;
use invaders_core::types::{Position, Vec2};

use crate::formation::Formation;

/// Sweep dead entities out of the world.
pub fn run(
    world: &mut World,
    formation: &mut Formation,
    despawn_buffer: &mut Vec<Entity>,
    audio_events: &mut Vec<AudioEvent>,
    explosions: &mut Vec<Vec2>,
) {
    despawn_buffer.clear();
    for (entity, health) in world.query::<&Health>().iter() {
        if !health.is_alive() {
            despawn_buffer.push(entity);
        }
    }

    for &entity in despawn_buffer.iter() {
        // A spent missile frees its shooter to fire again.
        let missile_id = world
            .get::<&MissileBody>(entity)
            .ok()
            .map(|body| body.missile_id);
        if let Some(missile_id) = missile_id {
            release_launcher(world, missile_id);
        }

        let is_ship =
            world.get::<&PlayerShip>(entity).is_ok() || world.get::<&EnemyShip>(entity).is_ok();
        if is_ship {
            if let Ok(pos) = world.get::<&Position>(entity) {
                explosions.push(pos.0);
                audio_events.push(AudioEvent::ShipExplosion {
                    x: pos.0.x,
                    y: pos.0.y,
                });
            }
        }
    }

    formation
        .members
        .retain(|member| !despawn_buffer.contains(member));

    for entity in despawn_buffer.drain(..) {
        // The entity was found by query this tick, so despawn succeeds.
        let _ = world.despawn(entity);
    }
}

fn release_launcher(world: &mut World, missile_id: u32) {
    for (_entity, launcher) in world.query_mut::<&mut Launcher>() {
        if launcher.outstanding == Some(missile_id) {
            launcher.outstanding = None;
        }
    }
}
