//! Game engine — the core of the game.
//!
//! `GameEngine` owns the hecs ECS world, the state machine, and the
//! input mirror; each `tick` runs all systems and produces a
//! `FrameSnapshot`. Completely headless, enabling deterministic
//! testing.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use invaders_core::components::Health;
use invaders_core::constants::{DEFAULT_PLAY_HEIGHT, DEFAULT_PLAY_WIDTH};
use invaders_core::enums::GameState;
use invaders_core::events::AudioEvent;
use invaders_core::input::{InputState, Key};
use invaders_core::state::FrameSnapshot;
use invaders_core::types::{GameTime, Position, Vec2};

use crate::assets::Assets;
use crate::formation::Formation;
use crate::systems;
use crate::world_setup::{self, PendingMissile};

/// Configuration for starting a new game.
pub struct GameConfig {
    /// RNG seed for determinism. Same seed + same inputs = same game.
    pub seed: u64,
    /// Play area width in pixels.
    pub width: f64,
    /// Play area height in pixels.
    pub height: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: DEFAULT_PLAY_WIDTH,
            height: DEFAULT_PLAY_HEIGHT,
        }
    }
}

/// The game engine. Owns the ECS world and all game state.
pub struct GameEngine {
    world: World,
    time: GameTime,
    state: GameState,
    config: GameConfig,
    rng: ChaCha8Rng,
    input: InputState,
    assets: Assets,
    formation: Formation,
    player: Option<Entity>,
    pending: Vec<PendingMissile>,
    despawn_buffer: Vec<Entity>,
    audio_events: Vec<AudioEvent>,
    explosions: Vec<Vec2>,
    next_missile_id: u32,
    next_ship_id: u32,
}

impl GameEngine {
    /// Create a new engine at the menu, with the world already built
    /// so the first Play tick starts a full board.
    pub fn new(config: GameConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut engine = Self {
            world: World::new(),
            time: GameTime::default(),
            state: GameState::Menu,
            rng,
            input: InputState::new(),
            assets: Assets::new(),
            formation: Formation::new(Vec2::ZERO, 0.0),
            player: None,
            pending: Vec::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            explosions: Vec::new(),
            next_missile_id: 0,
            next_ship_id: 0,
            config,
        };
        engine.restart();
        engine
    }

    /// Mirror a host key-down event.
    pub fn press_key(&mut self, key: Key) {
        self.input.press(key);
    }

    /// Mirror a host key-up event.
    pub fn release_key(&mut self, key: Key) {
        self.input.release(key);
    }

    /// Advance the game by `dt` seconds and return the resulting
    /// snapshot.
    pub fn tick(&mut self, dt: f64) -> FrameSnapshot {
        self.apply_transitions();

        if self.state == GameState::Play {
            // Missiles staged last tick enter the world now, so no
            // entity is ever added mid-iteration.
            world_setup::flush_pending(&mut self.world, &mut self.pending, &self.assets);
            self.run_systems(dt);
            self.time.advance(dt);
            self.check_endgame();
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        let explosions = std::mem::take(&mut self.explosions);
        systems::snapshot::build_snapshot(
            &self.world,
            self.time,
            self.state,
            self.config.width,
            self.config.height,
            explosions,
            audio_events,
        )
    }

    /// Get the current game state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Get the current game time.
    pub fn time(&self) -> GameTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player's remaining lives, while the ship exists.
    pub fn player_lives(&self) -> Option<i32> {
        let player = self.player?;
        self.world.get::<&Health>(player).ok().map(|h| h.lives)
    }

    /// Keyed state transitions. Each consumed key is released so a
    /// held press triggers exactly one transition.
    fn apply_transitions(&mut self) {
        if self.input.is_pressed(Key::KeyP) {
            self.input.release(Key::KeyP);
            self.state = match self.state {
                GameState::Menu | GameState::Pause => GameState::Play,
                GameState::Play => GameState::Pause,
                GameState::Win | GameState::Lost => {
                    self.restart();
                    GameState::Menu
                }
            };
        }
        if matches!(self.state, GameState::Win | GameState::Lost)
            && self.input.is_pressed(Key::Space)
        {
            self.input.release(Key::Space);
            self.restart();
            self.state = GameState::Play;
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Formation: fire trials, wall bounces, sweep.
        systems::formation::run(
            &mut self.world,
            &mut self.formation,
            &mut self.rng,
            &mut self.pending,
            &mut self.next_missile_id,
            &mut self.audio_events,
            self.config.width,
            dt,
        );
        // 2. Player: movement and cooldown-gated firing.
        systems::player_control::run(
            &mut self.world,
            &mut self.input,
            &mut self.pending,
            &mut self.next_missile_id,
            &mut self.audio_events,
            &self.time,
            self.config.width,
            dt,
        );
        // 3. Missile flight and out-of-bounds expiry.
        systems::missile_flight::run(&mut self.world, self.config.height, dt);
        // 4. Pixel collision and damage.
        systems::collision::run(&mut self.world);
        // 5. Cleanup: dead sweep, launcher release, explosions.
        systems::cleanup::run(
            &mut self.world,
            &mut self.formation,
            &mut self.despawn_buffer,
            &mut self.audio_events,
            &mut self.explosions,
        );
    }

    /// Win/Lost detection, checked once per Play tick after the dead
    /// sweep so this tick's casualties already count.
    fn check_endgame(&mut self) {
        let player_y = self
            .player
            .and_then(|p| self.world.get::<&Position>(p).ok().map(|pos| pos.0.y));

        let Some(player_y) = player_y else {
            // Ship destroyed and swept.
            self.enter_end_state(GameState::Lost);
            return;
        };
        if self.player_lives().unwrap_or(0) <= 0 {
            self.enter_end_state(GameState::Lost);
            return;
        }
        if self.formation.is_empty() {
            self.enter_end_state(GameState::Win);
            return;
        }
        if let Some(front) = self.formation.foremost_y(&self.world) {
            if front >= player_y {
                self.enter_end_state(GameState::Lost);
            }
        }
    }

    fn enter_end_state(&mut self, state: GameState) {
        self.state = state;
        self.world.clear();
        self.pending.clear();
        self.formation.members.clear();
        self.player = None;
    }

    /// Rebuild the board for a fresh run. The RNG stream and the input
    /// mirror carry over; everything else resets.
    fn restart(&mut self) {
        self.world.clear();
        self.time = GameTime::default();
        self.pending.clear();
        self.despawn_buffer.clear();
        self.audio_events.clear();
        self.explosions.clear();
        self.next_missile_id = 0;
        self.next_ship_id = 0;

        let (player, formation) = world_setup::setup_game(
            &mut self.world,
            &self.assets,
            &self.config,
            &mut self.next_ship_id,
        );
        self.player = Some(player);
        self.formation = formation;
    }

    /// Get a mutable reference to the ECS world (for testing).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Get a read-only reference to the formation (for testing).
    #[cfg(test)]
    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    /// Get a mutable reference to the formation (for testing).
    #[cfg(test)]
    pub fn formation_mut(&mut self) -> &mut Formation {
        &mut self.formation
    }

    /// The player entity while it exists (for testing).
    #[cfg(test)]
    pub fn player_entity(&self) -> Option<Entity> {
        self.player
    }

    /// Get a read-only reference to the asset table (for testing).
    #[cfg(test)]
    pub fn assets(&self) -> &Assets {
        &self.assets
    }
}
