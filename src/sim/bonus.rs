//! Bonus target ("flying saucer") that crosses the top of the field

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use crate::consts::FRAME_TIME;
use crate::settings::{BonusSettings, Settings};

/// Off-screen slack before the saucer despawns
const EXIT_SLACK: f32 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusTarget {
    pub body: Body,
    pub from_left: bool,
    field_width: f32,
}

impl BonusTarget {
    /// Enter just outside the chosen edge, heading for the opposite one
    pub fn new(from_left: bool, settings: &Settings) -> Self {
        let config = &settings.bonus;
        let x = if from_left {
            -config.width
        } else {
            settings.field.width
        };
        let dir = if from_left { 1.0 } else { -1.0 };
        Self {
            body: Body::new(Vec2::new(x, config.y_position), Vec2::new(config.width, config.height))
                .with_velocity(Vec2::new(config.speed * dir, 0.0)),
            from_left,
            field_width: settings.field.width,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.body.active
    }
}

impl Entity for BonusTarget {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt_ms: f32) {
        self.body.pos += self.body.vel * (dt_ms / FRAME_TIME);
        let x = self.body.pos.x;
        if x < -self.body.size.x - EXIT_SLACK || x > self.field_width + EXIT_SLACK {
            self.body.active = false;
        }
    }
}

/// Timestamp (ms) of the next spawn, uniformly inside the configured window
pub fn next_spawn_time<R: Rng>(now: f64, config: &BonusSettings, rng: &mut R) -> f64 {
    let span = config.max_spawn_ms - config.min_spawn_ms;
    now + config.min_spawn_ms + rng.random::<f64>() * span
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_crosses_left_to_right() {
        let settings = Settings::default();
        let mut ufo = BonusTarget::new(true, &settings);
        assert_eq!(ufo.body.pos.x, -48.0);

        let mut frames = 0;
        while ufo.is_active() {
            ufo.update(FRAME_TIME);
            frames += 1;
            assert!(frames < 1000);
        }
        assert!(ufo.body.pos.x > 800.0);
        // (800 + 48 + 4) / 2.5 frames to clear the far edge
        assert_eq!(frames, 341);
    }

    #[test]
    fn test_crosses_right_to_left() {
        let settings = Settings::default();
        let mut ufo = BonusTarget::new(false, &settings);
        assert_eq!(ufo.body.pos.x, 800.0);
        ufo.update(FRAME_TIME);
        assert!(ufo.body.pos.x < 800.0);
        assert!(ufo.is_active());
    }

    #[test]
    fn test_spawn_time_within_window() {
        let config = BonusSettings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            let t = next_spawn_time(1000.0, &config, &mut rng);
            assert!(t >= 11_000.0 && t <= 26_000.0);
        }
    }
}
