//! Snapshot system: projects the live world into the serializable
//! `FrameSnapshot` handed to the frontend each tick.

use hecs::World;

use invaders_core::components::{
    Allegiance, BunkerBlock, EnemyShip, Graphic, Health, MissileBody, PlayerShip,
};
use invaders_core::enums::{GameState, SpriteId};
use invaders_core::events::AudioEvent;
use invaders_core::state::{
    BunkerView, ExplosionView, FrameSnapshot, MissileView, PlayerView, ShipView, TextView,
};
use invaders_core::types::{GameTime, Position, Vec2};

/// Project the world into one frame's complete visible state. The
/// explosion and audio lists are this tick's drained buffers and are
/// moved into the snapshot.
pub fn build_snapshot(
    world: &World,
    time: GameTime,
    state: GameState,
    play_width: f64,
    play_height: f64,
    explosions: Vec<Vec2>,
    audio_events: Vec<AudioEvent>,
) -> FrameSnapshot {
    let mut snapshot = FrameSnapshot {
        time,
        state,
        audio_events,
        ..FrameSnapshot::default()
    };

    for (_entity, (pos, gfx, health, _player)) in world
        .query::<(&Position, &Graphic, &Health, &PlayerShip)>()
        .iter()
    {
        snapshot.player = Some(PlayerView {
            x: pos.0.x,
            y: pos.0.y,
            lives: health.lives,
            sprite: gfx.id,
        });
    }

    for (_entity, (pos, gfx, _enemy)) in
        world.query::<(&Position, &Graphic, &EnemyShip)>().iter()
    {
        snapshot.enemies.push(ShipView {
            x: pos.0.x,
            y: pos.0.y,
            sprite: gfx.id,
        });
    }

    for (_entity, (pos, gfx, side, _body)) in world
        .query::<(&Position, &Graphic, &Allegiance, &MissileBody)>()
        .iter()
    {
        snapshot.missiles.push(MissileView {
            x: pos.0.x,
            y: pos.0.y,
            side: side.0,
            sprite: gfx.id,
        });
    }

    for (_entity, (pos, gfx, _bunker)) in
        world.query::<(&Position, &Graphic, &BunkerBlock)>().iter()
    {
        snapshot.bunkers.push(BunkerView {
            x: pos.0.x,
            y: pos.0.y,
            width: gfx.sprite.width(),
            height: gfx.sprite.height(),
            alpha: gfx.sprite.alpha_channel().to_vec(),
        });
    }

    for blast in explosions {
        snapshot.explosions.push(ExplosionView {
            x: blast.x,
            y: blast.y,
            sprite: SpriteId::Explosion,
        });
    }

    let hud = hud_text(&snapshot, state, play_width, play_height);
    snapshot.hud = hud;
    snapshot
}

/// Fixed text for the current state, plus the in-play lives counter.
fn hud_text(
    snapshot: &FrameSnapshot,
    state: GameState,
    play_width: f64,
    play_height: f64,
) -> Vec<TextView> {
    let center_x = play_width / 2.0;
    let center_y = play_height / 2.0;
    match state {
        GameState::Menu => vec![
            centered("SPACE INVADERS", center_x, center_y - 40.0),
            centered("Press P to play", center_x, center_y + 10.0),
        ],
        GameState::Play => {
            let lives = snapshot.player.as_ref().map_or(0, |player| player.lives);
            vec![TextView {
                text: format!("Lives: {lives:02}"),
                x: 10.0,
                y: 20.0,
                centered: false,
            }]
        }
        GameState::Pause => vec![
            centered("PAUSED", center_x, center_y),
            centered("Press P to resume", center_x, center_y + 30.0),
        ],
        GameState::Win => vec![
            centered("YOU WIN", center_x, center_y),
            centered("Space to play again, P for menu", center_x, center_y + 30.0),
        ],
        GameState::Lost => vec![
            centered("GAME OVER", center_x, center_y),
            centered("Space to play again, P for menu", center_x, center_y + 30.0),
        ],
    }
}

fn centered(text: &str, x: f64, y: f64) -> TextView {
    TextView {
        text: text.to_string(),
        x,
        y,
        centered: true,
    }
}
