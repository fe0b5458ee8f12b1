//! Entity spawn factories for setting up the game world.
//!
//! Creates the player ship, the five enemy tier lines, and the
//! bunkers with appropriate component bundles. Missiles fired during
//! a tick are staged here as pending spawns and merged into the world
//! at the start of the next tick, never mid-iteration.

use hecs::{Entity, World};

use invaders_core::components::*;
use invaders_core::constants::*;
use invaders_core::enums::{Side, SpriteId};
use invaders_core::events::AudioEvent;
use invaders_core::types::{Position, Vec2};

use crate::assets::Assets;
use crate::engine::GameConfig;
use crate::formation::Formation;

/// A missile staged for spawning at the next tick boundary.
#[derive(Debug, Clone, Copy)]
pub struct PendingMissile {
    pub missile_id: u32,
    pub fired_by: u32,
    pub side: Side,
    pub position: Position,
}

/// Build the initial world: player ship at bottom center, the enemy
/// formation (five tier lines), and three evenly spaced bunkers.
pub fn setup_game(
    world: &mut World,
    assets: &Assets,
    config: &GameConfig,
    next_ship_id: &mut u32,
) -> (Entity, Formation) {
    let player = spawn_player(world, assets, config, next_ship_id);

    let mut formation = Formation::new(
        Vec2::new(FORMATION_ORIGIN_X, FORMATION_ORIGIN_Y),
        FORMATION_BASE_WIDTH,
    );
    for (tier, count) in SpriteId::ENEMY_TIERS.iter().zip(ENEMY_LINE_COUNTS) {
        spawn_enemy_line(
            world,
            &mut formation,
            assets,
            count,
            ENEMY_LIVES,
            *tier,
            next_ship_id,
        );
    }

    let bunker = assets.sprite(SpriteId::Bunker);
    let gap = (config.width - BUNKER_COUNT as f64 * bunker.width() as f64)
        / (BUNKER_COUNT + 1) as f64;
    for i in 0..BUNKER_COUNT {
        let x = (i + 1) as f64 * gap + i as f64 * bunker.width() as f64;
        let y = config.height - BUNKER_BOTTOM_OFFSET;
        spawn_bunker(world, assets, Position::new(x, y));
    }

    (player, formation)
}

/// Spawn the player ship at bottom center with full lives.
pub fn spawn_player(
    world: &mut World,
    assets: &Assets,
    config: &GameConfig,
    next_ship_id: &mut u32,
) -> Entity {
    let sprite = assets.sprite(SpriteId::PlayerShip).clone();
    let position = Position::new(
        (config.width - sprite.width() as f64) / 2.0,
        config.height - PLAYER_BOTTOM_OFFSET,
    );
    let ship_id = *next_ship_id;
    *next_ship_id += 1;

    world.spawn((
        PlayerShip,
        position,
        Allegiance(Side::Ally),
        Health::new(PLAYER_LIVES),
        Graphic {
            id: SpriteId::PlayerShip,
            sprite,
        },
        Launcher::new(ship_id),
        HitResponse::Trade,
    ))
}

/// Add one tier line of enemy ships to the formation, evenly spaced
/// across the block width. Widens the block first if the line would
/// not fit.
pub fn spawn_enemy_line(
    world: &mut World,
    formation: &mut Formation,
    assets: &Assets,
    count: u32,
    lives: i32,
    tier: SpriteId,
    next_ship_id: &mut u32,
) {
    let sprite = assets.sprite(tier);
    let ship_width = sprite.width() as f64;
    let total = ship_width * count as f64;
    if total > formation.base_width {
        formation.base_width = total + count as f64 * 10.0;
    }
    let padding = (formation.base_width - total) / count as f64;

    let y = formation.position.y + formation.next_row_y;
    let mut x = padding / 2.0;
    for _ in 0..count {
        let ship_id = *next_ship_id;
        *next_ship_id += 1;
        let member = world.spawn((
            EnemyShip,
            Position::new(formation.position.x + x, y),
            Allegiance(Side::Enemy),
            Health::new(lives),
            Graphic {
                id: tier,
                sprite: sprite.clone(),
            },
            Launcher::new(ship_id),
            HitResponse::Trade,
        ));
        formation.members.push(member);
        x += padding + ship_width;
    }
    formation.next_row_y += sprite.height() as f64 + ENEMY_ROW_GAP;
}

/// Spawn a bunker. Its lives equal the memoized opaque-pixel count of
/// the source asset; its sprite clone is the only entity image that
/// mutates after construction.
pub fn spawn_bunker(world: &mut World, assets: &Assets, position: Position) -> Entity {
    world.spawn((
        BunkerBlock,
        position,
        Allegiance(Side::Neutral),
        Health::new(assets.opaque_pixels(SpriteId::Bunker)),
        Graphic {
            id: SpriteId::Bunker,
            sprite: assets.sprite(SpriteId::Bunker).clone(),
        },
        HitResponse::Absorb,
    ))
}

/// Fire a missile from `shooter`, staging it on the pending queue.
/// Refused when the shooter already has an outstanding shot. Returns
/// whether a missile was staged.
pub fn fire_missile(
    world: &mut World,
    shooter: Entity,
    pending: &mut Vec<PendingMissile>,
    next_missile_id: &mut u32,
    audio_events: &mut Vec<AudioEvent>,
) -> bool {
    let (position, side) = {
        let Ok(pos) = world.get::<&Position>(shooter) else {
            return false;
        };
        let Ok(gfx) = world.get::<&Graphic>(shooter) else {
            return false;
        };
        let Ok(side) = world.get::<&Allegiance>(shooter) else {
            return false;
        };
        (
            Position::new(pos.0.x + gfx.sprite.width() as f64 / 2.0, pos.0.y),
            side.0,
        )
    };

    let Ok(mut launcher) = world.get::<&mut Launcher>(shooter) else {
        return false;
    };
    if launcher.outstanding.is_some() {
        return false;
    }

    let missile_id = *next_missile_id;
    *next_missile_id += 1;
    launcher.outstanding = Some(missile_id);

    pending.push(PendingMissile {
        missile_id,
        fired_by: launcher.ship_id,
        side,
        position,
    });
    audio_events.push(match side {
        Side::Ally => AudioEvent::PlayerShoot,
        _ => AudioEvent::EnemyShoot,
    });
    true
}

/// Merge staged missiles into the live world. Called at the tick
/// boundary so entities added mid-tick are first visited next tick.
pub fn flush_pending(world: &mut World, pending: &mut Vec<PendingMissile>, assets: &Assets) {
    for staged in pending.drain(..) {
        world.spawn((
            staged.position,
            Allegiance(staged.side),
            Health::new(MISSILE_LIVES),
            Graphic {
                id: SpriteId::Missile,
                sprite: assets.sprite(SpriteId::Missile).clone(),
            },
            MissileBody {
                missile_id: staged.missile_id,
                fired_by: staged.fired_by,
                speed: MISSILE_SPEED,
            },
            HitResponse::Annihilate,
        ));
    }
}
