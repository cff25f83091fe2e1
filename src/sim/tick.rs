//! Per-frame simulation step
//!
//! One call runs one complete tick: input intents, entity update, collision
//! resolution, event bookkeeping and the wave-clear transition. A tick always
//! runs to completion; stopping the game means not calling `tick` again.

use super::collision::CollisionEvent;
use super::player::Direction;
use super::state::{GamePhase, GameSession};
use crate::consts::MAX_FRAME_MS;

/// Input intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left movement held
    pub move_left: bool,
    /// Right movement held
    pub move_right: bool,
    /// Fire requested this tick
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the session by `dt_ms` milliseconds of wall time and return the
/// collision events produced, in resolution order, followed by an
/// `ExtraLife` event when the tick's points earned one.
pub fn tick(session: &mut GameSession, input: &TickInput, dt_ms: f32) -> Vec<CollisionEvent> {
    if input.pause {
        match session.phase {
            GamePhase::Playing => {
                session.phase = GamePhase::Paused;
                return Vec::new();
            }
            GamePhase::Paused => session.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    if session.phase != GamePhase::Playing {
        return Vec::new();
    }

    let dt = dt_ms.clamp(0.0, MAX_FRAME_MS);
    session.clock_ms += f64::from(dt);
    session.time_ticks += 1;
    let now = session.clock_ms;

    let entities = &mut session.entities;
    entities.move_player(Direction::Left, input.move_left);
    entities.move_player(Direction::Right, input.move_right);
    if input.fire {
        entities.fire(now);
    }

    entities.update(dt, now, session.wave);
    let mut events = entities.resolve_collisions(now);

    let awarded: Vec<CollisionEvent> = events.iter().filter_map(|e| session.apply_event(e)).collect();
    events.extend(awarded);

    if session.phase == GamePhase::Playing && session.entities.all_aliens_destroyed() {
        session.advance_wave();
    }

    events
}
