//! Entity manager
//!
//! Owns every entity collection of one game session plus the formation clock
//! and the session RNG. `update` advances everything in a fixed order:
//! player, formation, aliens (with fire rolls), barriers, bonus target, then
//! projectile motion and expiry. Collisions are resolved afterwards by the
//! caller through [`EntityManager::resolve_collisions`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::alien::{Alien, AlienType};
use super::barrier::Barrier;
use super::bonus::{BonusTarget, next_spawn_time};
use super::collision::{CollisionEvent, CollisionWorld, ResolveContext, resolve};
use super::entity::{Body, Entity};
use super::formation::Formation;
use super::player::{Direction, Player};
use super::projectile::{Owner, Projectile};
use crate::settings::{Settings, SettingsError};

/// Render-relevant per-kind state of a snapshot entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Barrier { damage_state: u32 },
    Projectile { owner: Owner },
    Alien { alien_type: AlienType },
    BonusTarget,
    Player { invincible: bool },
}

/// Read-only view of one live entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub position: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone)]
pub struct EntityManager {
    pub player: Player,
    pub aliens: Vec<Alien>,
    pub barriers: Vec<Barrier>,
    pub projectiles: Vec<Projectile>,
    pub bonus: Option<BonusTarget>,
    pub formation: Formation,
    /// Cumulative player shots, cleared only by a full reset
    shot_count: u32,
    /// When the next bonus target appears; scheduled on the first update
    next_bonus_at: Option<f64>,
    rng: Pcg32,
    settings: Settings,
}

impl EntityManager {
    /// Build a fresh session. Settings are validated here.
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        log::info!(
            "Entity manager: {}x{} formation, {} barriers, seed {}",
            settings.aliens.rows,
            settings.aliens.cols,
            settings.barriers.count,
            seed
        );
        Ok(Self {
            player: Player::new(&settings),
            aliens: Alien::grid(&settings),
            barriers: Barrier::row(&settings),
            projectiles: Vec::new(),
            bonus: None,
            formation: Formation::new(&settings),
            shot_count: 0,
            next_bonus_at: None,
            rng: Pcg32::seed_from_u64(seed),
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn shot_count(&self) -> u32 {
        self.shot_count
    }

    /// Scheduled bonus spawn time, if one is pending
    pub fn next_bonus_at(&self) -> Option<f64> {
        self.next_bonus_at
    }

    /// Advance all entities by `dt_ms`. `now` is the session clock (ms).
    pub fn update(&mut self, dt_ms: f32, now: f64, wave: u32) {
        self.player.update(dt_ms);

        self.formation.update(&mut self.aliens, dt_ms);

        self.update_aliens(dt_ms, wave);

        for barrier in self.barriers.iter_mut().filter(|b| !b.is_destroyed()) {
            barrier.update(dt_ms);
        }

        self.update_bonus(dt_ms, now);

        for projectile in &mut self.projectiles {
            projectile.update(dt_ms);
        }
        self.projectiles.retain(|p| p.body.active && p.in_field());
    }

    fn update_aliens(&mut self, dt_ms: f32, wave: u32) {
        let config = &self.settings.aliens;
        let chance = (config.base_shoot_chance + config.wave_shoot_multiplier * wave as f32) * (dt_ms / 1000.0);
        let mut alien_shots = self.projectiles.iter().filter(|p| p.owner == Owner::Alien).count();

        for i in 0..self.aliens.len() {
            if !self.aliens[i].is_alive() {
                continue;
            }
            self.aliens[i].update(dt_ms);

            if self.rng.random::<f32>() >= chance {
                continue;
            }
            if alien_shots >= self.settings.projectiles.alien_max {
                continue;
            }
            if !self.aliens[i].can_shoot(i, &self.aliens) {
                continue;
            }
            let shot = self.aliens[i].shoot(&self.settings);
            log::trace!("Alien r{}c{} fires", self.aliens[i].row, self.aliens[i].column);
            self.projectiles.push(shot);
            alien_shots += 1;
        }
    }

    fn update_bonus(&mut self, dt_ms: f32, now: f64) {
        let spawn_at = match self.next_bonus_at {
            Some(t) => t,
            None => {
                let t = next_spawn_time(now, &self.settings.bonus, &mut self.rng);
                self.next_bonus_at = Some(t);
                t
            }
        };

        if self.bonus.is_none() && now >= spawn_at {
            let from_left = self.rng.random_bool(0.5);
            log::debug!("Bonus target spawned from the {}", if from_left { "left" } else { "right" });
            self.bonus = Some(BonusTarget::new(from_left, &self.settings));
        }

        if let Some(ufo) = &mut self.bonus {
            ufo.update(dt_ms);
            if !ufo.is_active() {
                self.bonus = None;
                self.next_bonus_at = Some(next_spawn_time(now, &self.settings.bonus, &mut self.rng));
            }
        }
    }

    /// Append a projectile; player shots bump the cumulative shot counter
    pub fn add_projectile(&mut self, projectile: Projectile) {
        if projectile.is_player_projectile() {
            self.shot_count += 1;
        }
        self.projectiles.push(projectile);
    }

    /// Movement intent from the input layer
    pub fn move_player(&mut self, direction: Direction, active: bool) {
        self.player.set_moving(direction, active);
    }

    /// Fire intent from the input layer. Respects the in-flight cap and the
    /// player's cooldown; returns whether a projectile was produced.
    pub fn fire(&mut self, now: f64) -> bool {
        let in_flight = self.projectiles.iter().filter(|p| p.is_player_projectile()).count();
        if in_flight >= self.settings.projectiles.player_max {
            return false;
        }
        match self.player.shoot(now, &self.settings) {
            Some(projectile) => {
                self.add_projectile(projectile);
                true
            }
            None => false,
        }
    }

    /// Run the collision resolver over the current collections
    pub fn resolve_collisions(&mut self, now: f64) -> Vec<CollisionEvent> {
        let ctx = ResolveContext {
            now,
            shot_count: self.shot_count,
            settings: &self.settings,
        };
        let world = CollisionWorld {
            player: &mut self.player,
            aliens: &mut self.aliens,
            barriers: &mut self.barriers,
            projectiles: &mut self.projectiles,
            bonus: self.bonus.as_mut(),
        };
        resolve(world, &ctx, &mut self.rng)
    }

    pub fn alive_alien_count(&self) -> usize {
        self.aliens.iter().filter(|a| a.is_alive()).count()
    }

    pub fn all_aliens_destroyed(&self) -> bool {
        self.alive_alien_count() == 0
    }

    /// Rebuild for a new wave (`full == false`) or a new game (`full == true`).
    /// A wave reset keeps barriers, the shot counter and the player's lives.
    pub fn reset(&mut self, full: bool) {
        let lives = self.player.lives;
        self.player = Player::new(&self.settings);
        if full {
            self.barriers = Barrier::row(&self.settings);
            self.shot_count = 0;
        } else {
            self.player.lives = lives;
        }
        self.aliens = Alien::grid(&self.settings);
        self.projectiles.clear();
        self.bonus = None;
        self.next_bonus_at = None;
        self.formation.reset();
        log::info!("Entities reset ({})", if full { "full" } else { "wave" });
    }

    /// Live entities in draw order: barriers, projectiles, aliens, bonus, player
    pub fn snapshot(&self, now: f64) -> Vec<EntityView> {
        let mut views = Vec::with_capacity(
            self.barriers.len() + self.projectiles.len() + self.aliens.len() + 2,
        );
        let view = |kind, body: &Body| EntityView {
            kind,
            position: body.pos,
            size: body.size,
        };

        for barrier in self.barriers.iter().filter(|b| b.is_live()) {
            views.push(view(
                EntityKind::Barrier {
                    damage_state: barrier.damage_state,
                },
                &barrier.body,
            ));
        }
        for projectile in self.projectiles.iter().filter(|p| p.is_live()) {
            views.push(view(
                EntityKind::Projectile {
                    owner: projectile.owner,
                },
                &projectile.body,
            ));
        }
        for alien in self.aliens.iter().filter(|a| a.is_live()) {
            views.push(view(
                EntityKind::Alien {
                    alien_type: alien.alien_type,
                },
                &alien.body,
            ));
        }
        if let Some(ufo) = self.bonus.as_ref().filter(|u| u.is_live()) {
            views.push(view(EntityKind::BonusTarget, &ufo.body));
        }
        views.push(view(
            EntityKind::Player {
                invincible: self.player.is_invincible(now),
            },
            &self.player.body,
        ));
        views
    }
}
