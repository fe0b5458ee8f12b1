//! Tests for the game engine, collision protocol, formation pacing,
//! and the state machine.

use hecs::{Entity, World};

use invaders_core::components::*;
use invaders_core::constants::*;
use invaders_core::enums::{GameState, Side, SpriteId, SweepDirection};
use invaders_core::events::AudioEvent;
use invaders_core::input::Key;
use invaders_core::sprite::Sprite;
use invaders_core::types::Position;

use crate::assets::Assets;
use crate::engine::{GameConfig, GameEngine};
use crate::systems::collision::{self, overlap_clip};
use crate::world_setup;

const DT: f64 = 1.0 / 60.0;

fn engine_with_seed(seed: u64) -> GameEngine {
    GameEngine::new(GameConfig {
        seed,
        ..Default::default()
    })
}

/// Press P and tick once: enters Play and runs the first Play tick.
fn start_play(engine: &mut GameEngine) {
    engine.press_key(Key::KeyP);
    engine.tick(DT);
}

fn enemy_count(engine: &GameEngine) -> usize {
    let mut q = engine.world().query::<&EnemyShip>();
    q.iter().count()
}

fn ally_missile_count(engine: &GameEngine) -> usize {
    let mut q = engine.world().query::<(&MissileBody, &Allegiance)>();
    q.iter().filter(|(_, (_, side))| side.0 == Side::Ally).count()
}

fn spawn_missile(
    world: &mut World,
    assets: &Assets,
    side: Side,
    missile_id: u32,
    x: f64,
    y: f64,
) -> Entity {
    world.spawn((
        Position::new(x, y),
        Allegiance(side),
        Health::new(MISSILE_LIVES),
        Graphic {
            id: SpriteId::Missile,
            sprite: assets.sprite(SpriteId::Missile).clone(),
        },
        MissileBody {
            missile_id,
            fired_by: 999,
            speed: MISSILE_SPEED,
        },
        HitResponse::Annihilate,
    ))
}

fn spawn_ship(
    world: &mut World,
    assets: &Assets,
    side: Side,
    lives: i32,
    launcher: Launcher,
    x: f64,
    y: f64,
) -> Entity {
    world.spawn((
        EnemyShip,
        Position::new(x, y),
        Allegiance(side),
        Health::new(lives),
        Graphic {
            id: SpriteId::EnemyTier1,
            sprite: assets.sprite(SpriteId::EnemyTier1).clone(),
        },
        launcher,
        HitResponse::Trade,
    ))
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = engine_with_seed(12345);
    let mut engine_b = engine_with_seed(12345);

    engine_a.press_key(Key::KeyP);
    engine_b.press_key(Key::KeyP);

    for _ in 0..300 {
        let snap_a = engine_a.tick(DT);
        let snap_b = engine_b.tick(DT);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = engine_with_seed(111);
    let mut engine_b = engine_with_seed(222);

    engine_a.press_key(Key::KeyP);
    engine_b.press_key(Key::KeyP);

    // Enemy fire rolls differ between seeds; snapshots diverge once
    // the first fire decisions disagree.
    let mut diverged = false;
    for _ in 0..600 {
        let json_a = serde_json::to_string(&engine_a.tick(DT)).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(DT)).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Board setup ----

#[test]
fn test_initial_board() {
    let engine = engine_with_seed(1);
    assert_eq!(engine.state(), GameState::Menu);
    assert_eq!(engine.player_lives(), Some(PLAYER_LIVES));
    assert_eq!(enemy_count(&engine), 22);
    assert_eq!(engine.formation().members.len(), 22);

    let mut q = engine.world().query::<&BunkerBlock>();
    assert_eq!(q.iter().count(), BUNKER_COUNT as usize);
}

#[test]
fn test_bunker_lives_equal_opaque_pixels() {
    let engine = engine_with_seed(1);
    let expected = engine.assets().opaque_pixels(SpriteId::Bunker);
    let mut q = engine.world().query::<(&BunkerBlock, &Health)>();
    for (_entity, (_bunker, health)) in q.iter() {
        assert_eq!(health.lives, expected);
    }
}

// ---- State machine ----

#[test]
fn test_menu_play_pause_cycle() {
    let mut engine = engine_with_seed(1);
    start_play(&mut engine);
    assert_eq!(engine.state(), GameState::Play);

    engine.press_key(Key::KeyP);
    engine.tick(DT);
    assert_eq!(engine.state(), GameState::Pause);

    engine.press_key(Key::KeyP);
    engine.tick(DT);
    assert_eq!(engine.state(), GameState::Play);
}

#[test]
fn test_p_key_consumed_once() {
    let mut engine = engine_with_seed(1);
    // One press, never released by the host: exactly one transition.
    engine.press_key(Key::KeyP);
    engine.tick(DT);
    engine.tick(DT);
    assert_eq!(engine.state(), GameState::Play);
}

#[test]
fn test_pause_freezes_simulation() {
    let mut engine = engine_with_seed(1);
    start_play(&mut engine);
    engine.press_key(Key::KeyP);
    let paused = engine.tick(DT);

    let frozen = engine.tick(DT);
    assert_eq!(paused.time.tick, frozen.time.tick);
    assert_eq!(
        serde_json::to_string(&paused.enemies).unwrap(),
        serde_json::to_string(&frozen.enemies).unwrap()
    );
}

// ---- Player ----

#[test]
fn test_player_clamps_to_play_area() {
    let mut engine = engine_with_seed(1);
    start_play(&mut engine);

    engine.press_key(Key::Left);
    for _ in 0..45 {
        engine.tick(DT);
    }
    let snap = engine.tick(DT);
    assert_eq!(snap.player.as_ref().unwrap().x, 0.0);

    engine.release_key(Key::Left);
    engine.press_key(Key::Right);
    for _ in 0..90 {
        engine.tick(DT);
    }
    let snap = engine.tick(DT);
    let ship_width = engine.assets().sprite(SpriteId::PlayerShip).width() as f64;
    assert_eq!(
        snap.player.as_ref().unwrap().x,
        DEFAULT_PLAY_WIDTH - ship_width
    );
}

#[test]
fn test_player_fire_stages_missile_next_tick() {
    let mut engine = engine_with_seed(1);
    start_play(&mut engine);

    engine.press_key(Key::Space);
    let snap = engine.tick(DT);
    assert!(snap.audio_events.contains(&AudioEvent::PlayerShoot));
    // Staged at the tick boundary, not spawned mid-tick.
    assert_eq!(ally_missile_count(&engine), 0);

    engine.tick(DT);
    assert_eq!(ally_missile_count(&engine), 1);
}

#[test]
fn test_one_outstanding_missile_per_ship() {
    let mut engine = engine_with_seed(1);
    start_play(&mut engine);

    engine.press_key(Key::Space);
    engine.tick(DT);
    engine.tick(DT);
    assert_eq!(ally_missile_count(&engine), 1);

    // Retry while the shot is in flight: blocked, no new launch sound.
    engine.press_key(Key::Space);
    let snap = engine.tick(DT);
    assert!(!snap.audio_events.contains(&AudioEvent::PlayerShoot));
    assert_eq!(ally_missile_count(&engine), 1);
}

#[test]
fn test_launcher_released_when_missile_resolves() {
    let mut engine = engine_with_seed(1);
    start_play(&mut engine);

    engine.press_key(Key::Space);
    engine.tick(DT);
    // The shot resolves well inside a second, either against the
    // center bunker overhead or by leaving the top of the play area.
    for _ in 0..60 {
        engine.tick(DT);
    }
    assert_eq!(ally_missile_count(&engine), 0);

    let player = engine.player_entity().unwrap();
    let launcher = *engine.world().get::<&Launcher>(player).unwrap();
    assert_eq!(launcher.outstanding, None);

    engine.press_key(Key::Space);
    let snap = engine.tick(DT);
    assert!(snap.audio_events.contains(&AudioEvent::PlayerShoot));
}

// ---- Collision protocol ----

#[test]
fn test_overlap_clip_symmetric_and_disjoint() {
    let tall = Sprite::from_rows(&["##", "##", "##", "##"]);
    let wide = Sprite::from_rows(&["####", "####"]);

    let a = Position::new(10.0, 10.0);
    let b = Position::new(11.0, 12.0);
    let ab = overlap_clip(&a, &tall, &b, &wide).unwrap();
    let ba = overlap_clip(&b, &wide, &a, &tall).unwrap();
    assert_eq!(ab, ba);
    assert_eq!((ab.x0, ab.x1, ab.y0, ab.y1), (11, 12, 12, 14));

    // Vertically separated rectangles miss in both argument orders.
    let below = Position::new(10.0, 30.0);
    assert!(overlap_clip(&a, &tall, &below, &wide).is_none());
    assert!(overlap_clip(&below, &wide, &a, &tall).is_none());
}

#[test]
fn test_missile_mutual_annihilation() {
    let mut world = World::new();
    let assets = Assets::new();
    let up = spawn_missile(&mut world, &assets, Side::Ally, 0, 50.0, 50.0);
    let down = spawn_missile(&mut world, &assets, Side::Enemy, 1, 50.0, 53.0);

    collision::run(&mut world);

    assert_eq!(world.get::<&Health>(up).unwrap().lives, 0);
    assert_eq!(world.get::<&Health>(down).unwrap().lives, 0);
}

#[test]
fn test_same_side_missiles_pass_through() {
    let mut world = World::new();
    let assets = Assets::new();
    let first = spawn_missile(&mut world, &assets, Side::Ally, 0, 50.0, 50.0);
    let second = spawn_missile(&mut world, &assets, Side::Ally, 1, 50.0, 53.0);

    collision::run(&mut world);

    assert_eq!(world.get::<&Health>(first).unwrap().lives, MISSILE_LIVES);
    assert_eq!(world.get::<&Health>(second).unwrap().lives, MISSILE_LIVES);
}

#[test]
fn test_ship_trade_damage() {
    let mut world = World::new();
    let assets = Assets::new();
    let ship = spawn_ship(
        &mut world,
        &assets,
        Side::Enemy,
        3,
        Launcher::new(0),
        100.0,
        100.0,
    );
    // Centered on the ship body so opaque pixels certainly overlap.
    let missile = spawn_missile(&mut world, &assets, Side::Ally, 5, 104.0, 100.0);

    collision::run(&mut world);

    assert_eq!(world.get::<&Health>(ship).unwrap().lives, 2);
    assert_eq!(world.get::<&Health>(missile).unwrap().lives, 0);
}

#[test]
fn test_own_outstanding_shot_is_harmless() {
    let mut world = World::new();
    let assets = Assets::new();
    let mut launcher = Launcher::new(0);
    launcher.outstanding = Some(7);
    let ship = spawn_ship(&mut world, &assets, Side::Enemy, 3, launcher, 100.0, 100.0);
    // An enemy missile overlapping an enemy ship: same-side rule and
    // the ownership comparison both protect the shooter.
    let own = spawn_missile(&mut world, &assets, Side::Enemy, 7, 104.0, 100.0);

    collision::run(&mut world);

    assert_eq!(world.get::<&Health>(ship).unwrap().lives, 3);
    assert_eq!(world.get::<&Health>(own).unwrap().lives, MISSILE_LIVES);
}

#[test]
fn test_bunker_absorbs_and_erodes() {
    let mut world = World::new();
    let assets = Assets::new();
    let bunker = world_setup::spawn_bunker(&mut world, &assets, Position::new(100.0, 100.0));
    let full = assets.opaque_pixels(SpriteId::Bunker);
    let missile_pixels = assets.sprite(SpriteId::Missile).opaque_pixels();

    // Fully inside the solid middle of the bunker: every opaque
    // missile pixel collides.
    let missile = spawn_missile(&mut world, &assets, Side::Enemy, 0, 105.0, 105.0);
    collision::run(&mut world);

    let remaining = full - missile_pixels;
    assert_eq!(world.get::<&Health>(bunker).unwrap().lives, remaining);
    assert_eq!(world.get::<&Health>(missile).unwrap().lives, 0);
    assert_eq!(
        world.get::<&Graphic>(bunker).unwrap().sprite.opaque_pixels(),
        remaining
    );

    // A second missile through the hole finds nothing to hit.
    let through = spawn_missile(&mut world, &assets, Side::Enemy, 1, 105.0, 105.0);
    collision::run(&mut world);
    assert_eq!(world.get::<&Health>(bunker).unwrap().lives, remaining);
    assert_eq!(world.get::<&Health>(through).unwrap().lives, MISSILE_LIVES);
}

// ---- Formation ----

#[test]
fn test_left_margin_drop_and_ratchet() {
    let mut engine = engine_with_seed(1);
    let before: Vec<f64> = engine
        .formation()
        .members
        .iter()
        .map(|&m| engine.world().get::<&Position>(m).unwrap().0.y)
        .collect();

    // The formation spawns on the left margin, so the first Play tick
    // bounces immediately.
    start_play(&mut engine);

    let formation = engine.formation();
    assert_eq!(formation.heading, SweepDirection::Right);
    assert_eq!(formation.drop_count, 1);
    assert_eq!(formation.forward_step, FORMATION_FORWARD_STEP + RATCHET_STEP_INCREMENT);
    assert_eq!(formation.speed, FORMATION_SPEED + RATCHET_SPEED_INCREMENT);
    assert_eq!(
        formation.fire_prob,
        FORMATION_FIRE_PROB + RATCHET_FIRE_PROB_INCREMENT
    );
    assert_eq!(formation.fire_trials, FORMATION_FIRE_TRIALS);

    // The drop uses the step value from before the ratchet.
    let members: Vec<Entity> = engine.formation().members.clone();
    for (member, y_before) in members.iter().zip(before) {
        let y = engine.world().get::<&Position>(*member).unwrap().0.y;
        assert_eq!(y, y_before + FORMATION_FORWARD_STEP);
    }
}

#[test]
fn test_right_wall_reverses_without_ratchet() {
    let mut engine = engine_with_seed(1);
    start_play(&mut engine);
    let drops = engine.formation().drop_count;
    let speed = engine.formation().speed;

    let at_wall = DEFAULT_PLAY_WIDTH - engine.formation().base_width;
    engine.formation_mut().position.x = at_wall;
    engine.tick(DT);

    let formation = engine.formation();
    assert_eq!(formation.heading, SweepDirection::Left);
    assert_eq!(formation.drop_count, drops);
    assert_eq!(formation.speed, speed);
}

#[test]
fn test_every_fourth_drop_grants_extra_trial() {
    let mut engine = engine_with_seed(1);
    start_play(&mut engine); // drop 1
    assert_eq!(engine.formation().fire_trials, FORMATION_FIRE_TRIALS);

    for _ in 0..3 {
        engine.formation_mut().position.x = 0.0;
        engine.tick(DT);
    }
    let formation = engine.formation();
    assert_eq!(formation.drop_count, 4);
    assert_eq!(formation.fire_trials, FORMATION_FIRE_TRIALS + 1);
}

#[test]
fn test_fire_prob_capped() {
    let mut engine = engine_with_seed(1);
    start_play(&mut engine);
    for _ in 0..20 {
        engine.formation_mut().position.x = 0.0;
        engine.tick(DT);
    }
    assert!(engine.formation().fire_prob <= FIRE_PROB_CAP + 1e-9);
}

#[test]
fn test_members_sweep_in_lockstep() {
    let mut engine = engine_with_seed(1);
    start_play(&mut engine);
    // Away from both walls so this tick is a pure sweep.
    engine.formation_mut().position.x = 100.0;

    let members: Vec<Entity> = engine.formation().members.clone();
    let before: Vec<f64> = members
        .iter()
        .map(|&m| engine.world().get::<&Position>(m).unwrap().0.x)
        .collect();
    engine.tick(DT);

    let deltas: Vec<f64> = members
        .iter()
        .zip(&before)
        .map(|(&m, x)| engine.world().get::<&Position>(m).unwrap().0.x - x)
        .collect();
    assert!(deltas.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(deltas[0] > 0.0);
}

// ---- Endgame ----

#[test]
fn test_win_when_formation_cleared() {
    let mut engine = engine_with_seed(1);
    start_play(&mut engine);

    for (_entity, (health, _enemy)) in
        engine.world_mut().query_mut::<(&mut Health, &EnemyShip)>()
    {
        health.lives = 0;
    }
    let snap = engine.tick(DT);

    assert_eq!(engine.state(), GameState::Win);
    assert_eq!(snap.explosions.len(), 22);
    let blasts = snap
        .audio_events
        .iter()
        .filter(|event| matches!(event, AudioEvent::ShipExplosion { .. }))
        .count();
    assert_eq!(blasts, 22);
}

#[test]
fn test_lost_when_player_destroyed() {
    let mut engine = engine_with_seed(1);
    start_play(&mut engine);

    let player = engine.player_entity().unwrap();
    engine.world_mut().get::<&mut Health>(player).unwrap().lives = 0;
    let snap = engine.tick(DT);

    assert_eq!(engine.state(), GameState::Lost);
    assert!(snap.player.is_none());
    assert!(snap.enemies.is_empty(), "end states abandon all entities");
    assert_eq!(snap.explosions.len(), 1);
}

#[test]
fn test_lost_when_formation_reaches_player() {
    let mut engine = engine_with_seed(1);
    start_play(&mut engine);

    let member = engine.formation().members[0];
    engine.world_mut().get::<&mut Position>(member).unwrap().0.y = 560.0;
    engine.tick(DT);

    assert_eq!(engine.state(), GameState::Lost);
}

#[test]
fn test_space_restarts_after_game_over() {
    let mut engine = engine_with_seed(1);
    start_play(&mut engine);

    let player = engine.player_entity().unwrap();
    engine.world_mut().get::<&mut Health>(player).unwrap().lives = 0;
    engine.tick(DT);
    assert_eq!(engine.state(), GameState::Lost);

    engine.press_key(Key::Space);
    let snap = engine.tick(DT);
    assert_eq!(engine.state(), GameState::Play);
    assert_eq!(snap.player.as_ref().unwrap().lives, PLAYER_LIVES);
    assert_eq!(enemy_count(&engine), 22);
}

#[test]
fn test_p_returns_to_menu_after_game_over() {
    let mut engine = engine_with_seed(1);
    start_play(&mut engine);

    let player = engine.player_entity().unwrap();
    engine.world_mut().get::<&mut Health>(player).unwrap().lives = 0;
    engine.tick(DT);

    engine.press_key(Key::KeyP);
    engine.tick(DT);
    assert_eq!(engine.state(), GameState::Menu);
    assert_eq!(engine.player_lives(), Some(PLAYER_LIVES));
}

// ---- Snapshot ----

#[test]
fn test_menu_snapshot_hud() {
    let mut engine = engine_with_seed(1);
    let snap = engine.tick(DT);
    assert_eq!(snap.state, GameState::Menu);
    assert!(snap.hud.iter().any(|text| text.text == "SPACE INVADERS"));
}

#[test]
fn test_play_snapshot_contents() {
    let mut engine = engine_with_seed(1);
    engine.press_key(Key::KeyP);
    let snap = engine.tick(DT);

    assert_eq!(snap.state, GameState::Play);
    assert_eq!(snap.enemies.len(), 22);
    assert_eq!(snap.bunkers.len(), BUNKER_COUNT as usize);
    assert_eq!(snap.player.as_ref().unwrap().lives, PLAYER_LIVES);
    assert!(snap.hud.iter().any(|text| text.text == "Lives: 05"));

    let bunker = &snap.bunkers[0];
    assert_eq!(
        bunker.alpha.len(),
        (bunker.width * bunker.height) as usize
    );
}
