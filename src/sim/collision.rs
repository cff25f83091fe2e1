//! Collision resolution
//!
//! One pass over the projectiles, each resolving against at most one target
//! in priority order, followed by the landing check. The resolver destroys or
//! deactivates whatever it hits and reports everything else as events; score
//! and wave bookkeeping belong to the caller.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::alien::{Alien, AlienType};
use super::barrier::Barrier;
use super::bonus::BonusTarget;
use super::entity::Entity;
use super::player::Player;
use super::projectile::{Owner, Projectile};
use crate::settings::Settings;

/// Everything a tick's collisions can produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CollisionEvent {
    AlienKilled {
        alien_type: AlienType,
        points: u32,
        position: Vec2,
    },
    BonusKilled {
        points: u32,
        position: Vec2,
    },
    PlayerHit {
        lives: u32,
        position: Vec2,
    },
    BarrierHit {
        destroyed: bool,
        position: Vec2,
    },
    AlienLanded,
    GameOver,
    /// Raised by the session, never by [`resolve`], when the score earns a life
    ExtraLife {
        lives: u32,
    },
}

/// Mutable view of the collections taking part in resolution
pub struct CollisionWorld<'a> {
    pub player: &'a mut Player,
    pub aliens: &'a mut [Alien],
    pub barriers: &'a mut [Barrier],
    pub projectiles: &'a mut [Projectile],
    pub bonus: Option<&'a mut BonusTarget>,
}

/// Read-only inputs of one resolution pass
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Current clock (ms), compared against invincibility windows
    pub now: f64,
    /// Cumulative player shots, selects the bonus score
    pub shot_count: u32,
    pub settings: &'a Settings,
}

/// Resolve all collisions of the current tick
pub fn resolve<R: Rng>(world: CollisionWorld<'_>, ctx: &ResolveContext<'_>, rng: &mut R) -> Vec<CollisionEvent> {
    let CollisionWorld {
        player,
        aliens,
        barriers,
        projectiles,
        mut bonus,
    } = world;
    let mut events = Vec::new();

    for projectile in projectiles.iter_mut() {
        if !projectile.is_live() {
            continue;
        }
        match projectile.owner {
            Owner::Player => {
                resolve_player_shot(projectile, aliens, bonus.as_deref_mut(), barriers, ctx, rng, &mut events)
            }
            Owner::Alien => resolve_alien_shot(projectile, player, barriers, ctx, rng, &mut events),
        }
    }

    check_landing(aliens, ctx.settings.player.y_position, &mut events);
    events
}

fn resolve_player_shot<R: Rng>(
    projectile: &mut Projectile,
    aliens: &mut [Alien],
    bonus: Option<&mut BonusTarget>,
    barriers: &mut [Barrier],
    ctx: &ResolveContext<'_>,
    rng: &mut R,
    events: &mut Vec<CollisionEvent>,
) {
    if let Some(alien) = aliens.iter_mut().find(|a| a.is_alive() && projectile.collides_with(&**a)) {
        alien.body.destroyed = true;
        projectile.body.active = false;
        events.push(CollisionEvent::AlienKilled {
            alien_type: alien.alien_type,
            points: alien.points(),
            position: alien.center(),
        });
        return;
    }

    if let Some(ufo) = bonus {
        if ufo.is_active() && projectile.collides_with(&*ufo) {
            ufo.body.active = false;
            projectile.body.active = false;
            let points = ctx.settings.bonus.score_for_shot_count(ctx.shot_count);
            log::debug!("Bonus target down for {} (shot {})", points, ctx.shot_count);
            events.push(CollisionEvent::BonusKilled {
                points,
                position: ufo.center(),
            });
            return;
        }
    }

    resolve_barrier_hit(projectile, barriers, ctx, rng, events);
}

fn resolve_alien_shot<R: Rng>(
    projectile: &mut Projectile,
    player: &mut Player,
    barriers: &mut [Barrier],
    ctx: &ResolveContext<'_>,
    rng: &mut R,
    events: &mut Vec<CollisionEvent>,
) {
    if !player.is_invincible(ctx.now) && projectile.collides_with(&*player) {
        projectile.body.active = false;
        player.lives = player.lives.saturating_sub(1);
        player.set_invincible(ctx.now);
        events.push(CollisionEvent::PlayerHit {
            lives: player.lives,
            position: Vec2::new(player.center().x, player.body.pos.y),
        });
        if player.lives == 0 {
            events.push(CollisionEvent::GameOver);
        }
        return;
    }

    resolve_barrier_hit(projectile, barriers, ctx, rng, events);
}

/// Cell-exact barrier test, first barrier whose grid the impact point lands on
fn resolve_barrier_hit<R: Rng>(
    projectile: &mut Projectile,
    barriers: &mut [Barrier],
    ctx: &ResolveContext<'_>,
    rng: &mut R,
    events: &mut Vec<CollisionEvent>,
) {
    let hit = projectile.impact_point();
    for barrier in barriers.iter_mut() {
        if barrier.is_destroyed() || !projectile.collides_with(&*barrier) {
            continue;
        }
        if !barrier.hits_pixel(hit.x, hit.y) {
            continue;
        }
        projectile.body.active = false;
        barrier.damage(hit.x, hit.y, ctx.settings.barriers.impact_radius, rng);
        events.push(CollisionEvent::BarrierHit {
            destroyed: barrier.is_destroyed(),
            position: hit,
        });
        return;
    }
}

fn check_landing(aliens: &[Alien], player_line: f32, events: &mut Vec<CollisionEvent>) {
    let landed = aliens
        .iter()
        .any(|a| a.is_alive() && a.body.pos.y + a.body.size.y >= player_line);
    if landed {
        events.push(CollisionEvent::AlienLanded);
        events.push(CollisionEvent::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Fixture {
        settings: Settings,
        player: Player,
        aliens: Vec<Alien>,
        barriers: Vec<Barrier>,
        projectiles: Vec<Projectile>,
        bonus: Option<BonusTarget>,
        rng: Pcg32,
    }

    impl Fixture {
        fn new() -> Self {
            let settings = Settings::default();
            Self {
                player: Player::new(&settings),
                aliens: Alien::grid(&settings),
                barriers: Barrier::row(&settings),
                projectiles: Vec::new(),
                bonus: None,
                rng: Pcg32::seed_from_u64(5),
                settings,
            }
        }

        fn shot(&self, owner: Owner, x: f32, y: f32) -> Projectile {
            let mut p = Projectile::new(owner, 0.0, 0.0, &self.settings.projectiles, self.settings.field.height);
            p.body.pos = Vec2::new(x, y);
            p
        }

        fn resolve(&mut self, now: f64, shot_count: u32) -> Vec<CollisionEvent> {
            let ctx = ResolveContext {
                now,
                shot_count,
                settings: &self.settings,
            };
            resolve(
                CollisionWorld {
                    player: &mut self.player,
                    aliens: &mut self.aliens,
                    barriers: &mut self.barriers,
                    projectiles: &mut self.projectiles,
                    bonus: self.bonus.as_mut(),
                },
                &ctx,
                &mut self.rng,
            )
        }

        fn alive(&self) -> usize {
            self.aliens.iter().filter(|a| a.is_alive()).count()
        }
    }

    #[test]
    fn test_bottom_left_alien_kill() {
        let mut f = Fixture::new();
        let target = 4 * 11;
        let pos = f.aliens[target].body.pos;
        let shot = f.shot(Owner::Player, pos.x, pos.y);
        f.projectiles.push(shot);

        let events = f.resolve(0.0, 0);
        assert_eq!(
            events,
            vec![CollisionEvent::AlienKilled {
                alien_type: AlienType::Bottom,
                points: 10,
                position: f.aliens[target].center(),
            }]
        );
        assert_eq!(f.alive(), 54);
        assert!(!f.aliens[target].is_alive());
        assert!(!f.projectiles[0].body.active);
    }

    #[test]
    fn test_first_alien_in_order_wins() {
        let mut f = Fixture::new();
        // straddles rows 0 and 1 of column 0
        let a0 = f.aliens[0].body.pos;
        let shot = f.shot(Owner::Player, a0.x + 2.0, a0.y + 31.0);
        f.projectiles.push(shot);

        let events = f.resolve(0.0, 0);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            CollisionEvent::AlienKilled { alien_type: AlienType::Top, points: 30, .. }
        ));
        assert!(f.aliens[11].is_alive());
    }

    #[test]
    fn test_bonus_score_follows_shot_count() {
        let mut f = Fixture::new();
        let mut ufo = BonusTarget::new(true, &f.settings);
        ufo.body.pos.x = 300.0;
        let shot = f.shot(Owner::Player, 310.0, ufo.body.pos.y + 2.0);
        f.bonus = Some(ufo);
        f.projectiles.push(shot);

        let events = f.resolve(0.0, 8);
        assert!(matches!(events[..], [CollisionEvent::BonusKilled { points: 300, .. }]));
        assert!(!f.bonus.as_ref().unwrap().is_active());
    }

    #[test]
    fn test_player_hit_and_invincibility() {
        let mut f = Fixture::new();
        let p = f.player.body.pos;

        let shot = f.shot(Owner::Alien, p.x + 10.0, p.y + 5.0);
        f.projectiles.push(shot);
        let events = f.resolve(1000.0, 0);
        assert_eq!(
            events,
            vec![CollisionEvent::PlayerHit {
                lives: 2,
                position: Vec2::new(p.x + 24.0, p.y),
            }]
        );
        assert!(!f.projectiles[0].body.active);

        // inside the window the same shot passes harmlessly
        f.projectiles = vec![f.shot(Owner::Alien, p.x + 10.0, p.y + 5.0)];
        let events = f.resolve(2000.0, 0);
        assert!(events.is_empty());
        assert_eq!(f.player.lives, 2);
        assert!(f.projectiles[0].body.active);

        f.projectiles = vec![f.shot(Owner::Alien, p.x + 10.0, p.y + 5.0)];
        let events = f.resolve(2600.0, 0);
        assert!(matches!(events[..], [CollisionEvent::PlayerHit { lives: 1, .. }]));
    }

    #[test]
    fn test_last_life_emits_game_over() {
        let mut f = Fixture::new();
        f.player.lives = 1;
        let p = f.player.body.pos;
        let shot = f.shot(Owner::Alien, p.x, p.y);
        f.projectiles.push(shot);
        let events = f.resolve(0.0, 0);
        assert!(matches!(
            events[..],
            [CollisionEvent::PlayerHit { lives: 0, .. }, CollisionEvent::GameOver]
        ));
    }

    #[test]
    fn test_barrier_hit_needs_intact_cell() {
        let mut f = Fixture::new();
        let b = f.barriers[0].body.pos;

        // top-left arch cutout: overlaps the box but not an intact cell
        let shot = f.shot(Owner::Player, b.x - 1.0, b.y);
        f.projectiles.push(shot);
        assert!(f.resolve(0.0, 0).is_empty());
        assert!(f.projectiles[0].body.active);

        // solid middle
        f.projectiles = vec![f.shot(Owner::Player, b.x + 34.0, b.y + 20.0)];
        let impact = f.projectiles[0].impact_point();
        let events = f.resolve(0.0, 0);
        assert_eq!(
            events,
            vec![CollisionEvent::BarrierHit {
                destroyed: false,
                position: impact,
            }]
        );
        assert!((impact.x - (b.x + 36.0)).abs() < 1e-3);
        assert!(!f.projectiles[0].body.active);
        assert!(f.barriers[0].remaining() < f.barriers[0].total());
    }

    #[test]
    fn test_alien_shot_hits_barrier_with_leading_edge() {
        let mut f = Fixture::new();
        let b = f.barriers[1].body.pos;
        // bottom edge just inside the barrier top
        let shot = f.shot(Owner::Alien, b.x + 34.0, b.y + 20.0 - 14.0);
        f.projectiles.push(shot);
        let events = f.resolve(0.0, 0);
        assert!(matches!(events[..], [CollisionEvent::BarrierHit { .. }]));
    }

    #[test]
    fn test_inactive_projectiles_are_skipped() {
        let mut f = Fixture::new();
        let pos = f.aliens[44].body.pos;
        let mut shot = f.shot(Owner::Player, pos.x, pos.y);
        shot.body.active = false;
        f.projectiles.push(shot);
        assert!(f.resolve(0.0, 0).is_empty());
        assert_eq!(f.alive(), 55);
    }

    #[test]
    fn test_landing_ends_game() {
        let mut f = Fixture::new();
        f.aliens[50].body.pos.y = 550.0 - 32.0;
        let events = f.resolve(0.0, 0);
        assert_eq!(events, vec![CollisionEvent::AlienLanded, CollisionEvent::GameOver]);

        f.aliens[50].body.destroyed = true;
        assert!(f.resolve(0.0, 0).is_empty());
    }
}
