//! The player's ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use super::projectile::{Owner, Projectile};
use crate::consts::FRAME_TIME;
use crate::settings::Settings;

/// Horizontal movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub lives: u32,
    /// Timestamp (ms) of the last successful shot
    pub last_shot: Option<f64>,
    pub moving_left: bool,
    pub moving_right: bool,
    /// Hits are ignored while the clock is below this timestamp (ms)
    pub invincible_until: f64,
    speed: f32,
    min_x: f32,
    max_x: f32,
    shoot_cooldown_ms: f64,
    invincibility_ms: f64,
}

impl Player {
    /// Ship centred horizontally on its line
    pub fn new(settings: &Settings) -> Self {
        let field = &settings.field;
        let config = &settings.player;
        let pos = Vec2::new(field.width / 2.0 - config.width / 2.0, config.y_position);
        Self {
            body: Body::new(pos, Vec2::new(config.width, config.height)),
            lives: config.initial_lives,
            last_shot: None,
            moving_left: false,
            moving_right: false,
            invincible_until: 0.0,
            speed: config.speed,
            min_x: field.margin,
            max_x: field.width - field.margin - config.width,
            shoot_cooldown_ms: config.shoot_cooldown_ms,
            invincibility_ms: config.invincibility_ms,
        }
    }

    /// Horizontal range the ship is clamped to
    pub fn x_range(&self) -> (f32, f32) {
        (self.min_x, self.max_x)
    }

    /// Raw movement intent from the input layer
    pub fn set_moving(&mut self, direction: Direction, active: bool) {
        match direction {
            Direction::Left => self.moving_left = active,
            Direction::Right => self.moving_right = active,
        }
    }

    /// Fire if the cooldown has elapsed. `None` is the normal outcome inside it.
    pub fn shoot(&mut self, now: f64, settings: &Settings) -> Option<Projectile> {
        if let Some(last) = self.last_shot {
            if now - last < self.shoot_cooldown_ms {
                return None;
            }
        }
        self.last_shot = Some(now);
        let muzzle_x = self.body.pos.x + self.body.size.x / 2.0;
        Some(Projectile::new(
            Owner::Player,
            muzzle_x,
            self.body.pos.y,
            &settings.projectiles,
            settings.field.height,
        ))
    }

    pub fn is_invincible(&self, now: f64) -> bool {
        now < self.invincible_until
    }

    /// Open an invincibility window starting at `now`
    pub fn set_invincible(&mut self, now: f64) {
        self.invincible_until = now + self.invincibility_ms;
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt_ms: f32) {
        let step = self.speed * dt_ms / FRAME_TIME;
        if self.moving_left {
            self.body.pos.x = (self.body.pos.x - step).max(self.min_x);
        }
        if self.moving_right {
            self.body.pos.x = (self.body.pos.x + step).min(self.max_x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_centred() {
        let settings = Settings::default();
        let player = Player::new(&settings);
        assert_eq!(player.body.pos, Vec2::new(376.0, 550.0));
        assert_eq!(player.lives, 3);
    }

    #[test]
    fn test_shoot_cooldown() {
        let settings = Settings::default();
        let mut player = Player::new(&settings);

        assert!(player.shoot(0.0, &settings).is_some());
        assert!(player.shoot(150.0, &settings).is_none());
        assert!(player.shoot(199.9, &settings).is_none());
        assert!(player.shoot(200.0, &settings).is_some());
        assert!(player.shoot(500.0, &settings).is_some());
    }

    #[test]
    fn test_shot_leaves_from_nose() {
        let settings = Settings::default();
        let mut player = Player::new(&settings);
        let shot = player.shoot(10.0, &settings).unwrap();
        assert!(shot.is_player_projectile());
        assert_eq!(shot.body.center().x, player.body.center().x);
        assert_eq!(shot.body.pos.y, player.body.pos.y);
    }

    #[test]
    fn test_invincibility_window() {
        let settings = Settings::default();
        let mut player = Player::new(&settings);
        assert!(!player.is_invincible(0.0));
        player.set_invincible(1000.0);
        assert!(player.is_invincible(1000.0));
        assert!(player.is_invincible(2499.0));
        assert!(!player.is_invincible(2500.0));
    }

    #[test]
    fn test_movement_stops_at_margin() {
        let settings = Settings::default();
        let mut player = Player::new(&settings);
        player.set_moving(Direction::Left, true);
        for _ in 0..200 {
            player.update(FRAME_TIME);
        }
        assert_eq!(player.body.pos.x, settings.field.margin);

        player.set_moving(Direction::Left, false);
        player.set_moving(Direction::Right, true);
        for _ in 0..200 {
            player.update(FRAME_TIME);
        }
        assert_eq!(player.body.pos.x, 800.0 - 40.0 - 48.0);
    }

    proptest! {
        #[test]
        fn prop_position_stays_clamped(
            moves in proptest::collection::vec((any::<bool>(), any::<bool>(), 0.0f32..64.0), 0..64)
        ) {
            let settings = Settings::default();
            let mut player = Player::new(&settings);
            let (min_x, max_x) = player.x_range();
            for (left, right, dt) in moves {
                player.set_moving(Direction::Left, left);
                player.set_moving(Direction::Right, right);
                player.update(dt);
                prop_assert!(player.body.pos.x >= min_x);
                prop_assert!(player.body.pos.x <= max_x);
            }
        }
    }
}
