//! Player control system: held-key movement clamped to the play
//! width, and cooldown-gated firing with single-trigger Space.

use hecs::{Entity, World};

use invaders_core::components::{Graphic, Launcher, PlayerShip};
use invaders_core::constants::{PLAYER_FIRE_COOLDOWN_SECS, PLAYER_SPEED};
use invaders_core::events::AudioEvent;
use invaders_core::input::{InputState, Key};
use invaders_core::types::{GameTime, Position};

use crate::world_setup::{self, PendingMissile};

/// Advance the player ship by one tick.
pub fn run(
    world: &mut World,
    input: &mut InputState,
    pending: &mut Vec<PendingMissile>,
    next_missile_id: &mut u32,
    audio_events: &mut Vec<AudioEvent>,
    time: &GameTime,
    play_width: f64,
    dt: f64,
) {
    let mut shooter: Option<Entity> = None;

    for (entity, (pos, gfx, launcher, _player)) in world
        .query_mut::<(&mut Position, &Graphic, &Launcher, &PlayerShip)>()
    {
        let width = gfx.sprite.width() as f64;
        if input.is_pressed(Key::Left) {
            pos.0.x -= PLAYER_SPEED * dt;
        }
        if input.is_pressed(Key::Right) {
            pos.0.x += PLAYER_SPEED * dt;
        }
        pos.0.x = pos.0.x.clamp(0.0, play_width - width);

        if input.is_pressed(Key::Space) && launcher.can_fire(time.elapsed_secs) {
            shooter = Some(entity);
        }
    }

    if let Some(entity) = shooter {
        // Consume Space so one held press fires once per cooldown.
        input.release(Key::Space);
        if world_setup::fire_missile(world, entity, pending, next_missile_id, audio_events) {
            if let Ok(mut launcher) = world.get::<&mut Launcher>(entity) {
                launcher.cooldown_until = time.elapsed_secs + PLAYER_FIRE_COOLDOWN_SECS;
            }
        }
    }
}
