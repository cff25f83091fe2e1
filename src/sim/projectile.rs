//! Projectiles fired by the player or by aliens

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use crate::consts::FRAME_TIME;
use crate::settings::ProjectileSettings;

/// Who fired a projectile. Decides velocity and which collision branch applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Alien,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub owner: Owner,
    /// Bottom of the vertical play-field
    field_height: f32,
}

impl Projectile {
    /// Spawn a projectile horizontally centred on `muzzle_x` with its top at `top_y`
    pub fn new(owner: Owner, muzzle_x: f32, top_y: f32, config: &ProjectileSettings, field_height: f32) -> Self {
        let speed = match owner {
            Owner::Player => config.player_speed,
            Owner::Alien => config.alien_speed,
        };
        let pos = Vec2::new(muzzle_x - config.width / 2.0, top_y);
        Self {
            body: Body::new(pos, Vec2::new(config.width, config.height)).with_velocity(Vec2::new(0.0, speed)),
            owner,
            field_height,
        }
    }

    #[inline]
    pub fn is_player_projectile(&self) -> bool {
        self.owner == Owner::Player
    }

    /// Point that strikes a barrier first: top-centre going up, bottom-centre going down
    pub fn impact_point(&self) -> Vec2 {
        let x = self.body.pos.x + self.body.size.x / 2.0;
        let y = match self.owner {
            Owner::Player => self.body.pos.y,
            Owner::Alien => self.body.pos.y + self.body.size.y,
        };
        Vec2::new(x, y)
    }

    /// Inside the vertical play-field
    pub fn in_field(&self) -> bool {
        self.body.pos.y >= 0.0 && self.body.pos.y <= self.field_height
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt_ms: f32) {
        let frames = dt_ms / FRAME_TIME;
        self.body.pos += self.body.vel * frames;
        if !self.in_field() {
            self.body.active = false;
        }
    }
}
