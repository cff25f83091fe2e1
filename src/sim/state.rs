//! Session state
//!
//! Wraps the entity manager with the progression a single run needs: the
//! session clock, current phase, wave number, score and the one-off extra
//! life.

use serde::{Deserialize, Serialize};

use super::collision::CollisionEvent;
use super::manager::EntityManager;
use crate::settings::{Settings, SettingsError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ticks are ignored until unpaused
    Paused,
    /// Run ended (no lives left or the formation landed)
    GameOver,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    pub entities: EntityManager,
    pub phase: GamePhase,
    /// Current wave (1-based)
    pub wave: u32,
    pub score: u64,
    /// Monotonic session clock (ms)
    pub clock_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    extra_life_awarded: bool,
}

impl GameSession {
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        Ok(Self {
            entities: EntityManager::new(settings, seed)?,
            phase: GamePhase::Playing,
            wave: 1,
            score: 0,
            clock_ms: 0.0,
            time_ticks: 0,
            extra_life_awarded: false,
        })
    }

    pub fn lives(&self) -> u32 {
        self.entities.player.lives
    }

    pub fn extra_life_awarded(&self) -> bool {
        self.extra_life_awarded
    }

    /// Start a new game with the same entity manager. The clock keeps running.
    pub fn restart(&mut self) {
        self.entities.reset(true);
        self.phase = GamePhase::Playing;
        self.wave = 1;
        self.score = 0;
        self.extra_life_awarded = false;
        log::info!("Game restarted");
    }

    /// Fold one collision event into the session progression. Returns the
    /// `ExtraLife` event when this event's points earned one.
    pub fn apply_event(&mut self, event: &CollisionEvent) -> Option<CollisionEvent> {
        match event {
            CollisionEvent::AlienKilled { points, .. } | CollisionEvent::BonusKilled { points, .. } => {
                return self.add_score(*points);
            }
            CollisionEvent::PlayerHit { lives, .. } => {
                log::debug!("Player hit, {} lives left", lives);
            }
            CollisionEvent::BarrierHit { .. } => {}
            CollisionEvent::AlienLanded => {
                log::info!("Formation landed on wave {}", self.wave);
            }
            CollisionEvent::GameOver => {
                if self.phase != GamePhase::GameOver {
                    log::info!("Game over: wave {}, score {}", self.wave, self.score);
                }
                self.phase = GamePhase::GameOver;
            }
            CollisionEvent::ExtraLife { .. } => {}
        }
        None
    }

    /// Points still count after game over, lives do not
    fn add_score(&mut self, points: u32) -> Option<CollisionEvent> {
        self.score += u64::from(points);

        let threshold = self.entities.settings().extra_life_score;
        if threshold == 0 || self.extra_life_awarded || self.score < threshold {
            return None;
        }
        if self.phase == GamePhase::GameOver || self.entities.player.lives == 0 {
            return None;
        }

        self.extra_life_awarded = true;
        let max_lives = self.entities.settings().player.max_lives;
        let player = &mut self.entities.player;
        player.lives = (player.lives + 1).min(max_lives);
        log::info!("Extra life at {} points ({} lives)", self.score, player.lives);
        Some(CollisionEvent::ExtraLife { lives: player.lives })
    }

    /// Advance to the next wave: new formation, barriers and lives kept
    pub fn advance_wave(&mut self) {
        self.wave += 1;
        self.entities.reset(false);
        log::info!("Wave {} begins", self.wave);
    }
}
