//! Grid-search trajectory planner for the scripted opponent
//!
//! Evaluates the Cartesian product of (weapon, angle, power) candidates with
//! a running best-score accumulator - no intermediate candidate collection,
//! so a fine grid costs no memory. Each candidate is forward-simulated
//! read-only against the current terrain; nothing here mutates the match.

use rand::Rng;

use glam::Vec2;

use super::damage::falloff;
use super::state::{PlayerId, Simulation, Tank};
use super::terrain::Terrain;
use super::weapons::{Behavior, WeaponSpec};
use crate::consts::*;
use crate::dist_sq;
use crate::settings::Difficulty;

/// Coarse timestep for candidate trajectories
const EST_DT: f32 = 1.0 / 30.0;
/// Step cap per candidate (well past any real flight time)
const EST_MAX_STEPS: u32 = 400;

/// A committed aim choice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub weapon_index: usize,
    pub angle: f32,
    pub power: f32,
}

/// Where a candidate trajectory would land, if anywhere inside the world
struct Estimate {
    hit_quality: f32,
    self_risk: f32,
}

/// Pick the best shot for `me` against `foe`, or `None` with an empty
/// loadout (the turn machine then skips the turn). Noise injection makes
/// the planner nondeterministic unless the caller seeds `rng`.
pub fn plan(
    terrain: &Terrain,
    me: &Tank,
    foe: &Tank,
    wind: f32,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Option<Shot> {
    let angle_steps = difficulty.angle_steps();
    let power_steps = difficulty.power_steps();
    let noise_amp = difficulty.noise_amp();

    let mut best: Option<(f32, Shot)> = None;
    for (weapon_index, weapon) in me.loadout.iter().enumerate() {
        let spec = weapon.spec();
        for ai in 0..angle_steps {
            let angle = lerp_step(ANGLE_MIN, ANGLE_MAX, ai, angle_steps);
            for pi in 0..power_steps {
                let power = lerp_step(POWER_MIN, POWER_MAX, pi, power_steps);
                let est = estimate(terrain, me, foe, wind, spec, angle, power);
                let noise = if noise_amp > 0.0 {
                    rng.random_range(-noise_amp..noise_amp)
                } else {
                    0.0
                };
                let score = score_candidate(est.hit_quality, est.self_risk, spec) + noise;
                // Strict comparison keeps the first candidate on ties
                if best.as_ref().is_none_or(|(s, _)| score > *s) {
                    best = Some((
                        score,
                        Shot {
                            weapon_index,
                            angle,
                            power,
                        },
                    ));
                }
            }
        }
    }

    if let Some((score, shot)) = &best {
        log::debug!(
            "planner: weapon {} angle {:.2} power {:.0} (score {score:.1})",
            shot.weapon_index,
            shot.angle,
            shot.power
        );
    }
    best.map(|(_, shot)| shot)
}

/// Expected value of a candidate before noise: damage potential weighted by
/// hit quality, minus the self-risk penalty. Radius buys value on top of
/// damage, so of two otherwise-equal weapons the bigger blast wins.
pub(crate) fn score_candidate(hit_quality: f32, self_risk: f32, spec: &WeaponSpec) -> f32 {
    hit_quality * (spec.damage + spec.radius * 0.2) - self_risk * SELF_RISK_WEIGHT
}

#[inline]
fn lerp_step(lo: f32, hi: f32, i: usize, steps: usize) -> f32 {
    let t = i as f32 / (steps - 1).max(1) as f32;
    lo + (hi - lo) * t
}

/// Read-only forward simulation of one candidate
fn estimate(
    terrain: &Terrain,
    me: &Tank,
    foe: &Tank,
    wind: f32,
    spec: &WeaponSpec,
    angle: f32,
    power: f32,
) -> Estimate {
    let impact = match spec.behavior {
        Behavior::Beam { max_range } => beam_impact(terrain, me, foe, angle, max_range),
        // The carrier releases directly over the foe; score the drop point
        Behavior::Airstrike { .. } => Some(Vec2::new(foe.pos.x, terrain.height_at(foe.pos.x))),
        _ => ballistic_impact(terrain, me, foe, wind, spec, angle, power),
    };

    let reach = spec.radius + TANK_HIT_RADIUS;
    match impact {
        Some(p) => Estimate {
            hit_quality: falloff(dist_sq(p, foe.pos).sqrt(), reach),
            self_risk: falloff(dist_sq(p, me.pos).sqrt(), reach),
        },
        None => Estimate {
            hit_quality: 0.0,
            self_risk: 0.0,
        },
    }
}

/// Coarse ballistic arc against the live terrain (never mutated)
fn ballistic_impact(
    terrain: &Terrain,
    me: &Tank,
    foe: &Tank,
    wind: f32,
    spec: &WeaponSpec,
    angle: f32,
    power: f32,
) -> Option<Vec2> {
    let mut pos = me.muzzle(angle);
    let mut vel = me.aim_dir(angle) * power * spec.speed_mul;
    let hit_r_sq = TANK_HIT_RADIUS * TANK_HIT_RADIUS;
    for _ in 0..EST_MAX_STEPS {
        vel.y -= GRAVITY * EST_DT;
        vel.x += wind * EST_DT;
        pos += vel * EST_DT;
        if dist_sq(pos, foe.pos) <= hit_r_sq {
            // Mirror the simulator: direct contact detonates at the tank
            return Some(foe.pos);
        }
        if pos.y <= terrain.height_at(pos.x) {
            return Some(Vec2::new(pos.x, terrain.height_at(pos.x)));
        }
        if pos.x < 0.0 || pos.x >= terrain.width() as f32 || pos.y < -60.0 {
            return None;
        }
    }
    None
}

/// Deterministic ray-march, the same shape the live beam uses
fn beam_impact(
    terrain: &Terrain,
    me: &Tank,
    foe: &Tank,
    angle: f32,
    max_range: f32,
) -> Option<Vec2> {
    let start = me.muzzle(angle);
    let dir = me.aim_dir(angle);
    let hit_r_sq = TANK_HIT_RADIUS * TANK_HIT_RADIUS;
    let mut t = 0.0;
    while t < max_range {
        let p = start + dir * t;
        if dist_sq(p, foe.pos) <= hit_r_sq {
            return Some(foe.pos);
        }
        if p.y <= terrain.height_at(p.x) {
            return Some(p);
        }
        if p.x < 0.0 || p.x >= terrain.width() as f32 {
            return Some(p);
        }
        t += 3.0;
    }
    Some(start + dir * max_range)
}

impl Simulation {
    /// Plan a shot for `player` against the live match state. Planner noise
    /// is seeded from the match seed and current tick, so replays stay
    /// reproducible.
    pub fn plan(&self, player: PlayerId, difficulty: Difficulty) -> Option<Shot> {
        let mut rng = self.rng_state.stream(0x706C_616E ^ self.time_ticks);
        plan(
            &self.terrain,
            &self.tanks[player],
            &self.tanks[Simulation::other(player)],
            self.wind,
            difficulty,
            &mut rng,
        )
    }
}
