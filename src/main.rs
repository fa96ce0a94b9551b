//! Barrage headless match runner
//!
//! Pits two planner-driven opponents against each other on a generated
//! battlefield and prints the outcome. Used for balance work and
//! smoke-testing the core without a renderer:
//!
//! ```text
//! barrage [seed] [easy|medium|hard]
//! ```

use std::env;

use barrage::consts::SIM_DT;
use barrage::sim::{Phase, Simulation, TickEvent};
use barrage::{Difficulty, MatchSettings};

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xB4C3);
    let difficulty = args
        .next()
        .and_then(|s| Difficulty::from_str(&s))
        .unwrap_or_default();

    let mut sim = Simulation::new(MatchSettings::with_seed(seed));
    println!("barrage: seed {seed}, difficulty {}", difficulty.as_str());

    // Hard stop well past any plausible match length
    let max_ticks = 120 * 600;
    let mut ticks = 0u32;
    while sim.phase != Phase::RoundOver && ticks < max_ticks {
        if sim.phase == Phase::Aim {
            let player = sim.current;
            match sim.plan(player, difficulty) {
                Some(shot) => {
                    if let Err(err) = sim.fire(player, shot.weapon_index, shot.angle, shot.power) {
                        log::warn!("fire rejected: {err}");
                        break;
                    }
                }
                None => log::info!("player {player} has no shot available, skipping"),
            }
        }

        for event in sim.tick(SIM_DT) {
            match event {
                TickEvent::Impact { x, y, weapon } => {
                    log::info!("impact: {weapon:?} at ({x:.0}, {y:.0})");
                }
                TickEvent::ScoreChange { player, delta } => {
                    log::info!("score: player {player} {delta:+.1}");
                }
                TickEvent::TurnEnded { next_player } => {
                    log::info!("turn: player {next_player} to fire");
                }
                TickEvent::MatchEnded { winner } => match winner {
                    Some(p) => println!("player {p} wins"),
                    None => println!("draw"),
                },
                TickEvent::TerrainChanged { .. } => {}
            }
        }
        ticks += 1;
    }

    let (p0, p1) = (sim.player(0), sim.player(1));
    println!("final score: {:.0} - {:.0}", p0.score, p1.score);
}
