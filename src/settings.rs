//! Game configuration
//!
//! Every tunable of the simulation lives here. Defaults reproduce the classic
//! constants in [`crate::consts`]; hosts may override any subset from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration. These are construction-time programmer errors,
/// never raised while a game is running.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{what} must be greater than zero (got {value})")]
    NonPositive { what: &'static str, value: f64 },
    #[error("alien formation needs at least one row and one column (got {rows}x{cols})")]
    EmptyFormation { rows: usize, cols: usize },
    #[error("play-field margins leave no room for the player ({available} < {needed})")]
    FieldTooNarrow { available: f32, needed: f32 },
    #[error("alien march interval floor {min} exceeds ceiling {max}")]
    InvertedMoveInterval { min: f32, max: f32 },
    #[error("bonus spawn window [{min}, {max}] is inverted")]
    InvertedSpawnWindow { min: f64, max: f64 },
    #[error("bonus score table is empty")]
    EmptyScoreTable,
    #[error("barrier destroyed ratio {0} must lie in (0, 1)")]
    DestroyedRatioOutOfRange(f32),
    #[error("player projectile must travel upward and alien projectile downward")]
    ProjectileDirection,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Play-field geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    pub width: f32,
    pub height: f32,
    /// Horizontal margin kept free on both sides
    pub margin: f32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            margin: FIELD_MARGIN,
        }
    }
}

/// Player ship tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Units per reference frame
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    pub initial_lives: u32,
    pub max_lives: u32,
    pub shoot_cooldown_ms: f64,
    pub y_position: f32,
    pub invincibility_ms: f64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            initial_lives: PLAYER_INITIAL_LIVES,
            max_lives: PLAYER_MAX_LIVES,
            shoot_cooldown_ms: PLAYER_SHOOT_COOLDOWN_MS,
            y_position: PLAYER_Y,
            invincibility_ms: PLAYER_INVINCIBILITY_MS,
        }
    }
}

/// Alien grid and march tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlienSettings {
    pub rows: usize,
    pub cols: usize,
    pub width: f32,
    pub height: f32,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    pub initial_y: f32,
    pub max_move_interval_ms: f32,
    pub min_move_interval_ms: f32,
    pub step_x: f32,
    pub step_drop: f32,
    pub base_shoot_chance: f32,
    pub wave_shoot_multiplier: f32,
}

impl Default for AlienSettings {
    fn default() -> Self {
        Self {
            rows: ALIEN_ROWS,
            cols: ALIEN_COLS,
            width: ALIEN_WIDTH,
            height: ALIEN_HEIGHT,
            horizontal_spacing: ALIEN_HORIZONTAL_SPACING,
            vertical_spacing: ALIEN_VERTICAL_SPACING,
            initial_y: ALIEN_INITIAL_Y,
            max_move_interval_ms: ALIEN_MAX_MOVE_INTERVAL,
            min_move_interval_ms: ALIEN_MIN_MOVE_INTERVAL,
            step_x: ALIEN_STEP_X,
            step_drop: ALIEN_STEP_DROP,
            base_shoot_chance: ALIEN_BASE_SHOOT_CHANCE,
            wave_shoot_multiplier: ALIEN_WAVE_SHOOT_MULTIPLIER,
        }
    }
}

impl AlienSettings {
    /// Size of a full formation
    pub fn total(&self) -> usize {
        self.rows * self.cols
    }
}

/// Destructible barrier tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarrierSettings {
    pub count: usize,
    pub width: f32,
    pub height: f32,
    pub y_position: f32,
    pub cell_size: f32,
    pub damage_states: u32,
    pub impact_radius: f32,
    pub destroyed_ratio: f32,
}

impl Default for BarrierSettings {
    fn default() -> Self {
        Self {
            count: BARRIER_COUNT,
            width: BARRIER_WIDTH,
            height: BARRIER_HEIGHT,
            y_position: BARRIER_Y,
            cell_size: BARRIER_CELL_SIZE,
            damage_states: BARRIER_DAMAGE_STATES,
            impact_radius: BARRIER_IMPACT_RADIUS,
            destroyed_ratio: BARRIER_DESTROYED_RATIO,
        }
    }
}

/// Projectile tuning shared by both owners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileSettings {
    pub player_speed: f32,
    pub alien_speed: f32,
    pub width: f32,
    pub height: f32,
    /// Player projectiles allowed in flight at once
    pub player_max: usize,
    /// Alien projectiles allowed in flight at once
    pub alien_max: usize,
}

impl Default for ProjectileSettings {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_PROJECTILE_SPEED,
            alien_speed: ALIEN_PROJECTILE_SPEED,
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            player_max: PLAYER_PROJECTILE_MAX,
            alien_max: ALIEN_PROJECTILE_MAX,
        }
    }
}

/// Bonus target (saucer) tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusSettings {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub y_position: f32,
    pub min_spawn_ms: f64,
    pub max_spawn_ms: f64,
    pub score_table: Vec<u32>,
}

impl Default for BonusSettings {
    fn default() -> Self {
        Self {
            width: BONUS_WIDTH,
            height: BONUS_HEIGHT,
            speed: BONUS_SPEED,
            y_position: BONUS_Y,
            min_spawn_ms: BONUS_MIN_SPAWN_MS,
            max_spawn_ms: BONUS_MAX_SPAWN_MS,
            score_table: BONUS_SCORE_TABLE.to_vec(),
        }
    }
}

impl BonusSettings {
    /// Score for a kill, indexed by the player's cumulative shot count
    pub fn score_for_shot_count(&self, shot_count: u32) -> u32 {
        if self.score_table.is_empty() {
            return 0;
        }
        self.score_table[shot_count as usize % self.score_table.len()]
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub field: FieldSettings,
    pub player: PlayerSettings,
    pub aliens: AlienSettings,
    pub barriers: BarrierSettings,
    pub projectiles: ProjectileSettings,
    pub bonus: BonusSettings,
    /// Score that awards one extra life (0 disables)
    pub extra_life_score: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field: FieldSettings::default(),
            player: PlayerSettings::default(),
            aliens: AlienSettings::default(),
            barriers: BarrierSettings::default(),
            projectiles: ProjectileSettings::default(),
            bonus: BonusSettings::default(),
            extra_life_score: EXTRA_LIFE_SCORE,
        }
    }
}

fn positive(what: &'static str, value: f64) -> Result<(), SettingsError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::NonPositive { what, value })
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields fall back to defaults) and validate
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("field width", self.field.width as f64)?;
        positive("field height", self.field.height as f64)?;
        positive("player width", self.player.width as f64)?;
        positive("player height", self.player.height as f64)?;
        positive("player speed", self.player.speed as f64)?;
        positive("alien width", self.aliens.width as f64)?;
        positive("alien height", self.aliens.height as f64)?;
        positive("alien step", self.aliens.step_x as f64)?;
        positive("alien drop", self.aliens.step_drop as f64)?;
        positive("alien horizontal spacing", self.aliens.horizontal_spacing as f64)?;
        positive("alien vertical spacing", self.aliens.vertical_spacing as f64)?;
        positive("barrier width", self.barriers.width as f64)?;
        positive("barrier height", self.barriers.height as f64)?;
        positive("barrier cell size", self.barriers.cell_size as f64)?;
        positive("barrier damage states", f64::from(self.barriers.damage_states))?;
        positive("projectile width", self.projectiles.width as f64)?;
        positive("projectile height", self.projectiles.height as f64)?;
        positive("bonus width", self.bonus.width as f64)?;
        positive("bonus height", self.bonus.height as f64)?;
        positive("bonus speed", self.bonus.speed as f64)?;
        positive("minimum march interval", self.aliens.min_move_interval_ms as f64)?;

        if self.field.margin < 0.0 {
            return Err(SettingsError::NonPositive {
                what: "field margin",
                value: self.field.margin as f64,
            });
        }

        let available = self.field.width - 2.0 * self.field.margin;
        if available < self.player.width {
            return Err(SettingsError::FieldTooNarrow {
                available,
                needed: self.player.width,
            });
        }

        if self.aliens.rows == 0 || self.aliens.cols == 0 {
            return Err(SettingsError::EmptyFormation {
                rows: self.aliens.rows,
                cols: self.aliens.cols,
            });
        }

        if self.aliens.min_move_interval_ms > self.aliens.max_move_interval_ms {
            return Err(SettingsError::InvertedMoveInterval {
                min: self.aliens.min_move_interval_ms,
                max: self.aliens.max_move_interval_ms,
            });
        }

        if self.bonus.min_spawn_ms < 0.0 || self.bonus.min_spawn_ms > self.bonus.max_spawn_ms {
            return Err(SettingsError::InvertedSpawnWindow {
                min: self.bonus.min_spawn_ms,
                max: self.bonus.max_spawn_ms,
            });
        }

        if self.bonus.score_table.is_empty() {
            return Err(SettingsError::EmptyScoreTable);
        }

        if !(self.barriers.destroyed_ratio > 0.0 && self.barriers.destroyed_ratio < 1.0) {
            return Err(SettingsError::DestroyedRatioOutOfRange(
                self.barriers.destroyed_ratio,
            ));
        }

        if self.projectiles.player_speed >= 0.0 || self.projectiles.alien_speed <= 0.0 {
            return Err(SettingsError::ProjectileDirection);
        }

        Ok(())
    }
}
