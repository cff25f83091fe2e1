//! Synchronized formation march
//!
//! All living aliens move as one rigid block on a shared clock. The block
//! shifts sideways one step per interval; when its leading edge reaches the
//! field bound it drops instead and reverses. The interval shrinks with the
//! alive ratio, so the last few aliens march fastest.

use serde::{Deserialize, Serialize};

use super::alien::Alien;
use crate::settings::Settings;

/// Outcome of a formation update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarchStep {
    /// Interval not elapsed or nothing alive
    Idle,
    /// Block shifted horizontally
    Shifted,
    /// Block dropped and reversed
    Dropped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    /// +1 marching right, -1 marching left
    pub direction: f32,
    /// Elapsed time since the last step (ms)
    pub move_timer: f32,
    /// Time between steps (ms)
    pub current_interval: f32,
    total: usize,
    min_interval: f32,
    max_interval: f32,
    step_x: f32,
    step_drop: f32,
    left_bound: f32,
    right_bound: f32,
}

impl Formation {
    pub fn new(settings: &Settings) -> Self {
        let config = &settings.aliens;
        Self {
            direction: 1.0,
            move_timer: 0.0,
            current_interval: config.max_move_interval_ms,
            total: config.total(),
            min_interval: config.min_move_interval_ms,
            max_interval: config.max_move_interval_ms,
            step_x: config.step_x,
            step_drop: config.step_drop,
            left_bound: settings.field.margin,
            right_bound: settings.field.width - settings.field.margin,
        }
    }

    /// Back to a fresh wave: marching right at full interval
    pub fn reset(&mut self) {
        self.direction = 1.0;
        self.move_timer = 0.0;
        self.current_interval = self.max_interval;
    }

    /// Step interval for a given number of living aliens
    pub fn interval_for(&self, alive: usize) -> f32 {
        let ratio = alive as f32 / self.total as f32;
        let scaled = self.min_interval + (self.max_interval - self.min_interval) * ratio;
        scaled.floor().max(self.min_interval)
    }

    /// Advance the shared clock and move the block if an interval elapsed
    pub fn update(&mut self, aliens: &mut [Alien], dt_ms: f32) -> MarchStep {
        self.move_timer += dt_ms;
        if self.move_timer < self.current_interval {
            return MarchStep::Idle;
        }
        self.move_timer = 0.0;

        let mut left_most = f32::INFINITY;
        let mut right_most = f32::NEG_INFINITY;
        let mut alive = 0;
        for alien in aliens.iter().filter(|a| a.is_alive()) {
            alive += 1;
            left_most = left_most.min(alien.body.pos.x);
            right_most = right_most.max(alien.body.pos.x + alien.body.size.x);
        }

        if alive == 0 {
            return MarchStep::Idle;
        }

        let hit_edge = (self.direction > 0.0 && right_most >= self.right_bound)
            || (self.direction < 0.0 && left_most <= self.left_bound);

        let step = if hit_edge {
            for alien in aliens.iter_mut().filter(|a| a.is_alive()) {
                alien.body.pos.y += self.step_drop;
            }
            self.direction = -self.direction;
            MarchStep::Dropped
        } else {
            let dx = self.step_x * self.direction;
            for alien in aliens.iter_mut().filter(|a| a.is_alive()) {
                alien.body.pos.x += dx;
            }
            MarchStep::Shifted
        };

        self.current_interval = self.interval_for(alive);
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn setup() -> (Settings, Formation, Vec<Alien>) {
        let settings = Settings::default();
        let formation = Formation::new(&settings);
        let aliens = Alien::grid(&settings);
        (settings, formation, aliens)
    }

    #[test]
    fn test_waits_for_interval() {
        let (_, mut formation, mut aliens) = setup();
        let before: Vec<_> = aliens.iter().map(|a| a.body.pos).collect();
        assert_eq!(formation.update(&mut aliens, 899.0), MarchStep::Idle);
        let after: Vec<_> = aliens.iter().map(|a| a.body.pos).collect();
        assert_eq!(before, after);
        assert_eq!(formation.update(&mut aliens, 1.0), MarchStep::Shifted);
        assert_eq!(formation.move_timer, 0.0);
    }

    #[test]
    fn test_shift_moves_only_living_aliens() {
        let (_, mut formation, mut aliens) = setup();
        aliens[3].body.destroyed = true;
        let dead_before = aliens[3].body.pos;
        let x_before = aliens[0].body.pos.x;

        assert_eq!(formation.update(&mut aliens, 900.0), MarchStep::Shifted);
        assert_eq!(aliens[0].body.pos.x, x_before + 12.0);
        assert_eq!(aliens[3].body.pos, dead_before);
        assert_eq!(formation.current_interval, formation.interval_for(54));
    }

    #[test]
    fn test_drops_and_reverses_at_right_edge() {
        let (_, mut formation, mut aliens) = setup();
        let mut steps = 0;
        loop {
            let y_before = aliens[0].body.pos.y;
            let x_before = aliens[0].body.pos.x;
            let step = formation.update(&mut aliens, 1000.0);
            steps += 1;
            if step == MarchStep::Dropped {
                assert_eq!(aliens[0].body.pos.y, y_before + 16.0);
                assert_eq!(aliens[0].body.pos.x, x_before);
                break;
            }
            assert_eq!(aliens[0].body.pos.y, y_before);
            assert!(steps < 100, "formation never reached the edge");
        }
        assert_eq!(formation.direction, -1.0);
        let right = aliens.iter().map(|a| a.body.pos.x + a.body.size.x).fold(f32::MIN, f32::max);
        assert!(right >= 760.0);

        let x_before = aliens[0].body.pos.x;
        assert_eq!(formation.update(&mut aliens, 1000.0), MarchStep::Shifted);
        assert_eq!(aliens[0].body.pos.x, x_before - 12.0);
    }

    #[test]
    fn test_no_aliens_is_noop() {
        let (_, mut formation, mut aliens) = setup();
        for alien in &mut aliens {
            alien.body.destroyed = true;
        }
        assert_eq!(formation.update(&mut aliens, 5000.0), MarchStep::Idle);
        assert_eq!(formation.direction, 1.0);
        assert_eq!(formation.current_interval, 900.0);
    }

    #[test]
    fn test_interval_endpoints() {
        let (_, formation, _) = setup();
        assert_eq!(formation.interval_for(55), 900.0);
        assert_eq!(formation.interval_for(1), (50.0f32 + 850.0 / 55.0).floor());
        assert_eq!(formation.interval_for(0), 50.0);
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let (_, mut formation, mut aliens) = setup();
        aliens.truncate(3);
        for _ in 0..40 {
            formation.update(&mut aliens, 1000.0);
        }
        formation.reset();
        assert_eq!(formation.direction, 1.0);
        assert_eq!(formation.move_timer, 0.0);
        assert_eq!(formation.current_interval, 900.0);
    }

    proptest! {
        #[test]
        fn prop_interval_monotone_in_alive_count(alive in 1usize..=55) {
            let (_, formation, _) = setup();
            let here = formation.interval_for(alive);
            let fewer = formation.interval_for(alive - 1);
            prop_assert!(fewer <= here);
            prop_assert!(fewer >= 50.0);
        }

        #[test]
        fn prop_step_is_shift_xor_drop(
            kills in proptest::collection::vec(0usize..55, 0..54),
            steps in 1usize..120,
        ) {
            let (_, mut formation, mut aliens) = setup();
            for k in kills {
                aliens[k].body.destroyed = true;
            }
            for _ in 0..steps {
                let before: Vec<_> = aliens.iter().map(|a| a.body.pos).collect();
                let direction = formation.direction;
                let living: Vec<_> = aliens.iter().filter(|a| a.is_alive()).collect();
                let left = living.iter().map(|a| a.body.pos.x).fold(f32::INFINITY, f32::min);
                let right = living.iter().map(|a| a.body.pos.x + a.body.size.x).fold(f32::NEG_INFINITY, f32::max);
                let at_bound = (direction > 0.0 && right >= 760.0) || (direction < 0.0 && left <= 40.0);

                let step = formation.update(&mut aliens, 1000.0);
                for (alien, old) in aliens.iter().zip(&before) {
                    if !alien.is_alive() {
                        prop_assert_eq!(alien.body.pos, *old);
                        continue;
                    }
                    match step {
                        MarchStep::Shifted => {
                            prop_assert_eq!(alien.body.pos.y, old.y);
                            prop_assert!((alien.body.pos.x - (old.x + 12.0 * direction)).abs() < 1e-3);
                        }
                        MarchStep::Dropped => {
                            prop_assert_eq!(alien.body.pos.x, old.x);
                            prop_assert_eq!(alien.body.pos.y, old.y + 16.0);
                        }
                        MarchStep::Idle => prop_assert!(false, "living aliens must move"),
                    }
                }
                prop_assert_eq!(step == MarchStep::Dropped, at_bound);
                if step == MarchStep::Dropped {
                    prop_assert_eq!(formation.direction, -direction);
                }
            }
        }
    }
}
