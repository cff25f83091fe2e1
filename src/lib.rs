//! Invaders Sim - simulation core for a fixed-formation arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, formation, collisions, waves)
//! - `settings`: Data-driven game configuration with validation

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Classic game constants. `Settings::default()` is built from these.
pub mod consts {
    /// Reference frame time (ms) used to normalize per-frame speeds (~60 Hz)
    pub const FRAME_TIME: f32 = 16.67;
    /// Largest delta the tick driver will feed the simulation (ms)
    pub const MAX_FRAME_MS: f32 = 32.0;

    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    pub const FIELD_MARGIN: f32 = 40.0;

    /// Player ship
    pub const PLAYER_SPEED: f32 = 6.0;
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    pub const PLAYER_INITIAL_LIVES: u32 = 3;
    pub const PLAYER_MAX_LIVES: u32 = 6;
    pub const PLAYER_SHOOT_COOLDOWN_MS: f64 = 200.0;
    /// Vertical line the ship sits on; aliens reaching it have landed
    pub const PLAYER_Y: f32 = 550.0;
    pub const PLAYER_INVINCIBILITY_MS: f64 = 1500.0;

    /// Alien formation
    pub const ALIEN_ROWS: usize = 5;
    pub const ALIEN_COLS: usize = 11;
    pub const ALIEN_WIDTH: f32 = 32.0;
    pub const ALIEN_HEIGHT: f32 = 32.0;
    pub const ALIEN_HORIZONTAL_SPACING: f32 = 48.0;
    pub const ALIEN_VERTICAL_SPACING: f32 = 44.0;
    pub const ALIEN_INITIAL_Y: f32 = 100.0;
    /// March interval with a full formation (ms)
    pub const ALIEN_MAX_MOVE_INTERVAL: f32 = 900.0;
    /// March interval floor (ms)
    pub const ALIEN_MIN_MOVE_INTERVAL: f32 = 50.0;
    pub const ALIEN_STEP_X: f32 = 12.0;
    pub const ALIEN_STEP_DROP: f32 = 16.0;
    pub const ALIEN_POINTS_TOP: u32 = 30;
    pub const ALIEN_POINTS_MIDDLE: u32 = 20;
    pub const ALIEN_POINTS_BOTTOM: u32 = 10;
    /// Per-second fire chance of an eligible alien before the wave bonus
    pub const ALIEN_BASE_SHOOT_CHANCE: f32 = 0.012;
    /// Added to the fire chance for every wave
    pub const ALIEN_WAVE_SHOOT_MULTIPLIER: f32 = 0.003;

    /// Barriers
    pub const BARRIER_COUNT: usize = 4;
    pub const BARRIER_WIDTH: f32 = 72.0;
    pub const BARRIER_HEIGHT: f32 = 54.0;
    pub const BARRIER_Y: f32 = 480.0;
    /// World units per barrier grid cell
    pub const BARRIER_CELL_SIZE: f32 = 2.0;
    pub const BARRIER_DAMAGE_STATES: u32 = 4;
    /// Blast radius of a projectile impact (world units)
    pub const BARRIER_IMPACT_RADIUS: f32 = 5.0;
    /// Barrier is gone once less than this fraction of its cells remain
    pub const BARRIER_DESTROYED_RATIO: f32 = 0.1;

    /// Projectiles (speeds are per reference frame, negative is up)
    pub const PLAYER_PROJECTILE_SPEED: f32 = -10.0;
    pub const ALIEN_PROJECTILE_SPEED: f32 = 4.5;
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 14.0;
    pub const PLAYER_PROJECTILE_MAX: usize = 1;
    pub const ALIEN_PROJECTILE_MAX: usize = 3;

    /// Bonus target (flying saucer)
    pub const BONUS_WIDTH: f32 = 48.0;
    pub const BONUS_HEIGHT: f32 = 22.0;
    pub const BONUS_SPEED: f32 = 2.5;
    pub const BONUS_Y: f32 = 55.0;
    pub const BONUS_MIN_SPAWN_MS: f64 = 10_000.0;
    pub const BONUS_MAX_SPAWN_MS: f64 = 25_000.0;
    /// Classic saucer table, indexed by player shot count mod 15
    pub const BONUS_SCORE_TABLE: [u32; 15] = [
        100, 50, 50, 100, 150, 100, 100, 50, 300, 100, 100, 100, 50, 150, 100,
    ];

    /// Score at which one extra life is awarded
    pub const EXTRA_LIFE_SCORE: u64 = 1500;
}
