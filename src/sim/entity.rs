//! Shared entity geometry
//!
//! Every gameplay object is an axis-aligned rectangle with a velocity and two
//! liveness flags. Concrete kinds implement [`Entity`] on top of a [`Body`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds derived from a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl BoundingBox {
    /// Strict overlap: touching edges do not collide
    #[inline]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        !(self.left >= other.right
            || self.right <= other.left
            || self.top >= other.bottom
            || self.bottom <= other.top)
    }

    /// Half-open containment: left/top edges inside, right/bottom outside
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

/// Position (top-left corner), size and velocity of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// Width in `x`, height in `y`
    pub size: Vec2,
    pub vel: Vec2,
    pub active: bool,
    pub destroyed: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            active: true,
            destroyed: false,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            left: self.pos.x,
            right: self.pos.x + self.size.x,
            top: self.pos.y,
            bottom: self.pos.y + self.size.y,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Active and not destroyed
    #[inline]
    pub fn is_live(&self) -> bool {
        self.active && !self.destroyed
    }

    /// Overlap test that ignores dead bodies
    pub fn collides_with(&self, other: &Body) -> bool {
        if !self.is_live() || !other.is_live() {
            return false;
        }
        self.bounding_box().overlaps(&other.bounding_box())
    }
}

/// Capability every simulated object provides. No drawing here.
pub trait Entity {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    /// Advance by `dt_ms` milliseconds
    fn update(&mut self, dt_ms: f32);

    fn bounding_box(&self) -> BoundingBox {
        self.body().bounding_box()
    }

    fn center(&self) -> Vec2 {
        self.body().center()
    }

    fn is_live(&self) -> bool {
        self.body().is_live()
    }

    fn collides_with<E: Entity + ?Sized>(&self, other: &E) -> bool {
        self.body().collides_with(other.body())
    }
}
