//! Missile flight system: vertical-only motion by side, with the
//! vertical play bounds forcing lives to zero.

use hecs::World;

use invaders_core::components::{Allegiance, Health, MissileBody};
use invaders_core::enums::Side;
use invaders_core::types::Position;

/// Advance every missile by one tick.
pub fn run(world: &mut World, play_height: f64, dt: f64) {
    for (_entity, (pos, body, side, health)) in
        world.query_mut::<(&mut Position, &MissileBody, &Allegiance, &mut Health)>()
    {
        match side.0 {
            // Enemy fire travels down the screen, ally fire up.
            Side::Enemy => pos.0.y += body.speed * dt,
            Side::Ally => pos.0.y -= body.speed * dt,
            Side::Neutral => {}
        }
        if pos.0.y < 0.0 || pos.0.y > play_height {
            health.lives = 0;
        }
    }
}
