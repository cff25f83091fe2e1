//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt_ms`/`now` values passed in
//! - Seeded RNG only (one `Pcg32` per entity manager)
//! - Stable iteration order (collections are plain `Vec`s in spawn order)
//! - No rendering, audio or platform dependencies

pub mod alien;
pub mod barrier;
pub mod bonus;
pub mod collision;
pub mod entity;
pub mod formation;
pub mod manager;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

pub use alien::{Alien, AlienType};
pub use barrier::Barrier;
pub use bonus::BonusTarget;
pub use collision::CollisionEvent;
pub use entity::{Body, BoundingBox, Entity};
pub use formation::{Formation, MarchStep};
pub use manager::{EntityKind, EntityManager, EntityView};
pub use player::{Direction, Player};
pub use projectile::{Owner, Projectile};
pub use state::{GamePhase, GameSession};
pub use tick::{TickInput, tick};
