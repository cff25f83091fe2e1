//! Invaders Sim headless runner
//!
//! Plays one game with a simple autopilot and prints a JSON summary.
//!
//! Usage: `invaders-sim [seed] [max_ticks] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use std::error::Error;

#[cfg(not(target_arch = "wasm32"))]
use invaders_sim::Settings;
#[cfg(not(target_arch = "wasm32"))]
use invaders_sim::consts::FRAME_TIME;
#[cfg(not(target_arch = "wasm32"))]
use invaders_sim::sim::{CollisionEvent, EntityView, GamePhase, GameSession, TickInput, tick};

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, serde::Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    clock_ms: f64,
    phase: GamePhase,
    wave: u32,
    score: u64,
    lives: u32,
    aliens_killed: u32,
    bonus_kills: u32,
    player_shots: u32,
    entities: Vec<EntityView>,
}

/// Chase the lowest live alien column nearest the ship and keep firing
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(session: &GameSession) -> TickInput {
    let player = &session.entities.player.body;
    let ship_x = player.pos.x + player.size.x / 2.0;
    let target = session
        .entities
        .aliens
        .iter()
        .filter(|a| a.is_alive())
        .map(|a| a.body.pos.x + a.body.size.x / 2.0)
        .min_by(|a, b| (a - ship_x).abs().total_cmp(&(b - ship_x).abs()));

    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };
    if let Some(x) = target {
        input.move_left = x < ship_x - 2.0;
        input.move_right = x > ship_x + 2.0;
    }
    input
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(1);
    let max_ticks = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(36_000);
    let settings = match args.next() {
        Some(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
        None => Settings::default(),
    };

    log::info!("Invaders Sim (headless) starting, seed {}", seed);
    let mut session = GameSession::new(settings, seed)?;

    let mut aliens_killed = 0;
    let mut bonus_kills = 0;
    while session.phase != GamePhase::GameOver && session.time_ticks < max_ticks {
        let input = autopilot(&session);
        for event in tick(&mut session, &input, FRAME_TIME) {
            match event {
                CollisionEvent::AlienKilled { .. } => aliens_killed += 1,
                CollisionEvent::BonusKilled { points, .. } => {
                    bonus_kills += 1;
                    log::info!("Bonus target down for {} points", points);
                }
                CollisionEvent::ExtraLife { lives } => log::info!("Extra life, {} lives", lives),
                _ => {}
            }
        }
    }

    let summary = RunSummary {
        seed,
        ticks: session.time_ticks,
        clock_ms: session.clock_ms,
        phase: session.phase,
        wave: session.wave,
        score: session.score,
        lives: session.lives(),
        aliens_killed,
        bonus_kills,
        player_shots: session.entities.shot_count(),
        entities: session.entities.snapshot(session.clock_ms),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on wasm
}
