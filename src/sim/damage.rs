//! Blast resolution: terrain carving, score falloff, knockback, win check
//!
//! Scores double as the health model: damage dealt to the opponent scores
//! for the shooter, self-inflicted splash scores against them. There is no
//! separate hit-point pool, and the win condition reads scores directly.

use glam::Vec2;

use super::state::{PlayerId, Tank};
use super::terrain::Terrain;
use crate::consts::*;
use crate::dist_sq;

/// One blast to resolve
#[derive(Debug, Clone, Copy)]
pub struct Blast {
    pub center: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub owner: PlayerId,
    /// Scales the knockback impulse
    pub knockback: f32,
    /// Dirt weapons pile a mound instead of carving a crater
    pub deposits: bool,
}

/// What a blast did, for the event stream
#[derive(Debug, Clone, Default)]
pub struct BlastOutcome {
    /// Terrain columns touched, if any
    pub terrain_range: Option<(usize, usize)>,
    /// Score deltas actually applied (post-clamp), in application order
    pub score_changes: Vec<(PlayerId, f32)>,
    /// `Some` when the blast decided the match; inner `None` is a draw
    pub match_end: Option<Option<PlayerId>>,
}

/// Linear damage falloff: 1 at the blast center, 0 at `reach` and beyond.
/// A degenerate zero reach only scores a perfectly centered hit.
#[inline]
pub fn falloff(distance: f32, reach: f32) -> f32 {
    if reach <= 0.0 {
        if distance == 0.0 { 1.0 } else { 0.0 }
    } else {
        (1.0 - distance / reach).max(0.0)
    }
}

/// Resolve one explosion against terrain and both tanks
pub fn apply_explosion(
    terrain: &mut Terrain,
    tanks: &mut [Tank; 2],
    blast: Blast,
    target_score: f32,
) -> BlastOutcome {
    let terrain_range = if blast.deposits {
        terrain.deposit(blast.center.x, blast.center.y, blast.radius, 1.0)
    } else {
        terrain.carve(blast.center.x, blast.center.y, blast.radius, 1.0)
    };

    let mut score_changes = Vec::new();
    let reach = blast.radius + TANK_HIT_RADIUS;
    for i in 0..tanks.len() {
        let d = dist_sq(tanks[i].pos, blast.center).sqrt();
        let t = falloff(d, reach);
        if t <= 0.0 {
            continue;
        }
        let dealt = (blast.damage * t).max(0.0);

        if i == blast.owner {
            // Self-hit: reduced score penalty against the shooter
            let before = tanks[i].score;
            tanks[i].score = (before - dealt * SELF_DAMAGE_PENALTY).max(0.0);
            let delta = tanks[i].score - before;
            if delta != 0.0 {
                score_changes.push((i, delta));
            }
        } else {
            tanks[blast.owner].score += dealt;
            if dealt > 0.0 {
                score_changes.push((blast.owner, dealt));
            }
        }

        // Knockback: away from the blast horizontally, upward vertically
        let dx = tanks[i].pos.x - blast.center.x;
        let away = if dx == 0.0 { 1.0 } else { dx.signum() };
        let impulse = KNOCKBACK_IMPULSE * t * blast.knockback;
        tanks[i].vel += Vec2::new(away * impulse, impulse * KNOCKBACK_UP_FACTOR);
    }

    let match_end = if tanks.iter().any(|t| t.score >= target_score) {
        let (a, b) = (tanks[0].score, tanks[1].score);
        Some(if a > b {
            Some(0)
        } else if b > a {
            Some(1)
        } else {
            None
        })
    } else {
        None
    };

    BlastOutcome {
        terrain_range,
        score_changes,
        match_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MatchSettings;
    use crate::sim::state::Simulation;
    use proptest::prelude::*;

    fn flat_setup() -> (Terrain, [Tank; 2]) {
        let sim = Simulation::new(MatchSettings::with_seed(1));
        let terrain = Terrain::flat(1000, 100.0);
        let mut tanks = sim.tanks.clone();
        tanks[0].pos = Vec2::new(120.0, 100.0);
        tanks[1].pos = Vec2::new(880.0, 100.0);
        (terrain, tanks)
    }

    fn shell_blast(center: Vec2, owner: PlayerId) -> Blast {
        Blast {
            center,
            radius: 40.0,
            damage: 30.0,
            owner,
            knockback: 1.0,
            deposits: false,
        }
    }

    #[test]
    fn test_direct_hit_credits_shooter_only() {
        let (mut terrain, mut tanks) = flat_setup();
        let victim_pos = tanks[1].pos;
        let outcome =
            apply_explosion(&mut terrain, &mut tanks, shell_blast(victim_pos, 0), 300.0);

        // Full-falloff damage to the shooter's score; the victim's score
        // only tracks damage they deal, so it stays put
        assert!((tanks[0].score - 30.0).abs() < 0.001);
        assert_eq!(tanks[1].score, 0.0);
        assert_eq!(outcome.score_changes, vec![(0, 30.0)]);

        // Crater centered on the victim
        let (start, end) = outcome.terrain_range.unwrap();
        let center = (start + end) / 2;
        assert!((center as f32 - victim_pos.x).abs() < 2.0);
        assert!(terrain.height_at(victim_pos.x) < 100.0);
    }

    #[test]
    fn test_self_hit_charges_reduced_penalty() {
        let (mut terrain, mut tanks) = flat_setup();
        tanks[0].score = 50.0;
        let own_pos = tanks[0].pos;
        apply_explosion(&mut terrain, &mut tanks, shell_blast(own_pos, 0), 300.0);
        // 30 dealt * 0.2 penalty
        assert!((tanks[0].score - 44.0).abs() < 0.001);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let (mut terrain, mut tanks) = flat_setup();
        tanks[0].score = 1.0;
        let own_pos = tanks[0].pos;
        let outcome = apply_explosion(&mut terrain, &mut tanks, shell_blast(own_pos, 0), 300.0);
        assert_eq!(tanks[0].score, 0.0);
        assert_eq!(outcome.score_changes, vec![(0, -1.0)]);
    }

    #[test]
    fn test_knockback_points_away_and_up() {
        let (mut terrain, mut tanks) = flat_setup();
        let left_of_victim = tanks[1].pos - Vec2::new(20.0, 0.0);
        apply_explosion(&mut terrain, &mut tanks, shell_blast(left_of_victim, 0), 300.0);
        assert!(tanks[1].vel.x > 0.0);
        assert!(tanks[1].vel.y > 0.0);
        // Vertical component is the documented fraction of horizontal
        assert!((tanks[1].vel.y / tanks[1].vel.x - KNOCKBACK_UP_FACTOR).abs() < 0.001);
    }

    #[test]
    fn test_win_check_favors_higher_scorer() {
        let (mut terrain, mut tanks) = flat_setup();
        tanks[0].score = 290.0;
        let victim_pos = tanks[1].pos;
        let outcome =
            apply_explosion(&mut terrain, &mut tanks, shell_blast(victim_pos, 0), 300.0);
        assert_eq!(outcome.match_end, Some(Some(0)));
    }

    #[test]
    fn test_deposit_blast_raises_terrain() {
        let (mut terrain, mut tanks) = flat_setup();
        let mid = Vec2::new(500.0, 100.0);
        let blast = Blast {
            deposits: true,
            ..shell_blast(mid, 0)
        };
        apply_explosion(&mut terrain, &mut tanks, blast, 300.0);
        assert!(terrain.height_at(500.0) > 100.0);
    }

    #[test]
    fn test_degenerate_reach_never_divides() {
        assert_eq!(falloff(0.0, 0.0), 1.0);
        assert_eq!(falloff(5.0, 0.0), 0.0);
        assert_eq!(falloff(10.0, -1.0), 0.0);
    }

    proptest! {
        #[test]
        fn falloff_monotone_and_zero_beyond_reach(
            reach in 0.0f32..200.0,
            d1 in 0.0f32..400.0,
            d2 in 0.0f32..400.0,
        ) {
            let (near, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            prop_assert!(falloff(near, reach) >= falloff(far, reach));
            if far >= reach {
                prop_assert_eq!(falloff(far, reach), 0.0);
            }
        }
    }
}
