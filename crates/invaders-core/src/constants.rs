//! Gameplay constants and tuning parameters.

// --- Play area defaults ---

/// Default play-area width in pixels.
pub const DEFAULT_PLAY_WIDTH: f64 = 600.0;

/// Default play-area height in pixels.
pub const DEFAULT_PLAY_HEIGHT: f64 = 600.0;

// --- Player ---

/// Player ship starting lives.
pub const PLAYER_LIVES: i32 = 5;

/// Player horizontal speed (pixels/second).
pub const PLAYER_SPEED: f64 = 600.0;

/// Cooldown between player shots (seconds).
pub const PLAYER_FIRE_COOLDOWN_SECS: f64 = 0.25;

/// Player ship vertical offset from the bottom edge.
pub const PLAYER_BOTTOM_OFFSET: f64 = 50.0;

// --- Missiles ---

/// Missile vertical speed (pixels/second).
pub const MISSILE_SPEED: f64 = 800.0;

/// Missile starting lives.
pub const MISSILE_LIVES: i32 = 1;

// --- Enemy formation ---

/// Formation spawn position (top-left corner).
pub const FORMATION_ORIGIN_X: f64 = 10.0;
pub const FORMATION_ORIGIN_Y: f64 = 10.0;

/// Initial width of the movable formation block.
pub const FORMATION_BASE_WIDTH: f64 = 300.0;

/// Initial horizontal sweep speed (pixels/second).
pub const FORMATION_SPEED: f64 = 200.0;

/// Initial downward step on each left-wall bounce (pixels).
pub const FORMATION_FORWARD_STEP: f64 = 15.0;

/// Initial probability of a fire trial succeeding, per second.
pub const FORMATION_FIRE_PROB: f64 = 0.4;

/// Initial number of independent fire trials per update.
pub const FORMATION_FIRE_TRIALS: u32 = 2;

/// Left margin at which the formation bounces and ratchets.
pub const FORMATION_LEFT_MARGIN: f64 = 10.0;

/// Ratchet increments applied on each left-wall bounce.
pub const RATCHET_STEP_INCREMENT: f64 = 5.0;
pub const RATCHET_SPEED_INCREMENT: f64 = 10.0;
pub const RATCHET_FIRE_PROB_INCREMENT: f64 = 0.1;

/// Cap on the per-second fire probability.
pub const FIRE_PROB_CAP: f64 = 0.9;

/// Every this many drops, the formation gains one extra fire trial.
pub const DROPS_PER_EXTRA_TRIAL: u32 = 4;

/// Lives per enemy ship.
pub const ENEMY_LIVES: i32 = 1;

/// Vertical gap between enemy rows (pixels).
pub const ENEMY_ROW_GAP: f64 = 10.0;

/// Ships per tier line, top row first.
pub const ENEMY_LINE_COUNTS: [u32; 5] = [5, 5, 5, 5, 2];

// --- Bunkers ---

/// Number of bunkers shielding the player.
pub const BUNKER_COUNT: u32 = 3;

/// Bunker vertical offset from the bottom edge.
pub const BUNKER_BOTTOM_OFFSET: f64 = 120.0;
