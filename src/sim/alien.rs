//! Aliens of the marching formation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use super::projectile::{Owner, Projectile};
use crate::consts::{ALIEN_POINTS_BOTTOM, ALIEN_POINTS_MIDDLE, ALIEN_POINTS_TOP};
use crate::settings::Settings;

/// Alien variant, fixed by its starting row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlienType {
    Top,
    Middle,
    Bottom,
}

impl AlienType {
    /// Row 0 is the top variant, the next two rows are middle, the rest bottom
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => AlienType::Top,
            1 | 2 => AlienType::Middle,
            _ => AlienType::Bottom,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            AlienType::Top => ALIEN_POINTS_TOP,
            AlienType::Middle => ALIEN_POINTS_MIDDLE,
            AlienType::Bottom => ALIEN_POINTS_BOTTOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alien {
    pub body: Body,
    pub alien_type: AlienType,
    pub row: usize,
    pub column: usize,
    /// Grid slot at wave start
    pub baseline: Vec2,
}

impl Alien {
    pub fn new(row: usize, column: usize, settings: &Settings) -> Self {
        let config = &settings.aliens;
        let baseline = Vec2::new(
            column as f32 * config.horizontal_spacing + settings.field.margin,
            row as f32 * config.vertical_spacing + config.initial_y,
        );
        Self {
            body: Body::new(baseline, Vec2::new(config.width, config.height)),
            alien_type: AlienType::for_row(row),
            row,
            column,
            baseline,
        }
    }

    /// Build the full R×C grid, row-major from the top-left
    pub fn grid(settings: &Settings) -> Vec<Alien> {
        let rows = settings.aliens.rows;
        let cols = settings.aliens.cols;
        let mut aliens = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                aliens.push(Alien::new(row, col, settings));
            }
        }
        aliens
    }

    #[inline]
    pub fn points(&self) -> u32 {
        self.alien_type.points()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.body.destroyed
    }

    /// Only the lowest living alien whose span covers this alien's centre may fire
    pub fn can_shoot(&self, index: usize, aliens: &[Alien]) -> bool {
        let center_x = self.body.pos.x + self.body.size.x / 2.0;
        !aliens.iter().enumerate().any(|(i, other)| {
            i != index
                && other.is_alive()
                && other.body.pos.y > self.body.pos.y
                && other.body.pos.x < center_x
                && other.body.pos.x + other.body.size.x > center_x
        })
    }

    /// Projectile dropped from the alien's underside
    pub fn shoot(&self, settings: &Settings) -> Projectile {
        Projectile::new(
            Owner::Alien,
            self.body.pos.x + self.body.size.x / 2.0,
            self.body.pos.y + self.body.size.y,
            &settings.projectiles,
            settings.field.height,
        )
    }
}

impl Entity for Alien {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Aliens only move with the formation
    fn update(&mut self, _dt_ms: f32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_types_and_points() {
        let settings = Settings::default();
        let aliens = Alien::grid(&settings);
        assert_eq!(aliens.len(), 55);
        assert_eq!(aliens[0].alien_type, AlienType::Top);
        assert_eq!(aliens[0].points(), 30);
        assert_eq!(aliens[11].alien_type, AlienType::Middle);
        assert_eq!(aliens[33].alien_type, AlienType::Bottom);
        assert_eq!(aliens[54].points(), 10);
        assert_eq!(aliens[12].baseline, Vec2::new(88.0, 144.0));
        assert_eq!(aliens[12].body.pos, aliens[12].baseline);
    }

    #[test]
    fn test_only_bottom_of_column_can_shoot() {
        let settings = Settings::default();
        let mut aliens = Alien::grid(&settings);
        let top = 0;
        let bottom = 44;
        assert!(!aliens[top].can_shoot(top, &aliens));
        assert!(aliens[bottom].can_shoot(bottom, &aliens));

        for row in 1..5 {
            aliens[row * 11].body.destroyed = true;
        }
        assert!(aliens[top].can_shoot(top, &aliens));
    }

    #[test]
    fn test_shot_starts_below_alien() {
        let settings = Settings::default();
        let alien = Alien::new(4, 0, &settings);
        let shot = alien.shoot(&settings);
        assert_eq!(shot.owner, Owner::Alien);
        assert_eq!(shot.body.pos.y, alien.body.pos.y + alien.body.size.y);
        assert!(shot.body.vel.y > 0.0);
    }
}
