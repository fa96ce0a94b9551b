//! In-flight munitions and their per-weapon behavior
//!
//! One exhaustive match over [`Behavior`] drives all flight physics. Every
//! projectile advances with sub-stepping so fast shells cannot tunnel
//! through thin terrain ridges or a tank's hit-circle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{PlayerId, Tank};
use super::terrain::Terrain;
use super::weapons::{Behavior, BurrowAxis, Weapon};
use crate::consts::*;
use crate::dist_sq;

/// Ground speed of a converted roller
const ROLL_SPEED: f32 = 90.0;
/// Tunneling speed of groundhog/drill
const BURROW_SPEED: f32 = 70.0;
/// Radius of the trench a burrower carves per sub-step
const TRENCH_RADIUS: f32 = 6.0;
/// Altitude airstrike carriers cruise at
const CRUISE_ALTITUDE: f32 = TERRAIN_MAX_HEIGHT + 80.0;
/// Horizontal spacing between released bomblets
const BOMBLET_SPACING: f32 = 18.0;
/// Bomblets drop for at most this long
const BOMBLET_LIFETIME: f32 = 6.0;
/// Ray-march step for the laser
const BEAM_STEP: f32 = 3.0;

/// What one advance produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Still flying
    InFlight,
    /// Detonate here: remove the projectile and apply its blast
    Impact(Vec2),
    /// Remove silently, no blast (left the world, or an airstrike carrier
    /// that finished its run)
    Despawn,
}

/// Shared context for one projectile advance; fields borrow disjoint parts
/// of the simulation so the advance loop can run without cloning
pub struct AdvanceCtx<'a> {
    pub terrain: &'a mut Terrain,
    pub tanks: &'a [Tank; 2],
    pub wind: f32,
    /// Children created this tick, drained by the caller afterwards
    pub spawned: &'a mut Vec<Projectile>,
    pub next_id: &'a mut u32,
    /// Column ranges a burrower carved this tick
    pub terrain_changed: &'a mut Vec<(usize, usize)>,
}

impl AdvanceCtx<'_> {
    fn alloc_id(&mut self) -> u32 {
        let id = *self.next_id;
        *self.next_id += 1;
        id
    }
}

/// A transient munition, exclusively owned by the simulator's collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub owner: PlayerId,
    pub weapon: Weapon,
    pub pos: Vec2,
    pub vel: Vec2,
    pub age: f32,
    pub lifetime: f32,
    /// Bounces remaining (bouncer only)
    #[serde(default)]
    pub bounces_left: u8,
    /// Remaining roll time once a roller has touched down
    #[serde(default)]
    pub roll_timer: Option<f32>,
    /// Remaining tunnel time once a burrower has bitten in
    #[serde(default)]
    pub burrow_timer: Option<f32>,
    /// A mirv may split only once
    #[serde(default)]
    pub split_done: bool,
    /// Children fly plain-ballistic with a reduced blast
    #[serde(default)]
    pub child: bool,
}

impl Projectile {
    pub fn spawn(id: u32, owner: PlayerId, weapon: Weapon, pos: Vec2, vel: Vec2) -> Self {
        let bounces = match weapon.spec().behavior {
            Behavior::Bouncer { bounces, .. } => bounces,
            _ => 0,
        };
        Self {
            id,
            owner,
            weapon,
            pos,
            vel,
            age: 0.0,
            lifetime: PROJECTILE_LIFETIME,
            bounces_left: bounces,
            roll_timer: None,
            burrow_timer: None,
            split_done: false,
            child: false,
        }
    }

    /// Airstrike carriers enter at cruise altitude above the shooter and fly
    /// level toward the foe
    pub fn spawn_carrier(id: u32, owner: PlayerId, weapon: Weapon, x: f32, dir: f32, speed: f32) -> Self {
        Self::spawn(
            id,
            owner,
            weapon,
            Vec2::new(x, CRUISE_ALTITUDE),
            Vec2::new(dir * speed, 0.0),
        )
    }

    fn spawn_child(id: u32, parent: &Projectile, pos: Vec2, vel: Vec2, lifetime: f32) -> Self {
        Self {
            id,
            owner: parent.owner,
            weapon: parent.weapon,
            pos,
            vel,
            age: 0.0,
            lifetime,
            bounces_left: 0,
            roll_timer: None,
            burrow_timer: None,
            split_done: true,
            child: true,
        }
    }

    /// Damage at blast center, reduced for children
    pub fn blast_damage(&self) -> f32 {
        let d = self.weapon.spec().damage;
        if self.child { d * CHILD_BLAST_SCALE } else { d }
    }

    /// Blast radius, reduced for children
    pub fn blast_radius(&self) -> f32 {
        let r = self.weapon.spec().radius;
        if self.child { r * CHILD_BLAST_SCALE } else { r }
    }

    /// Advance by one fixed step, sub-stepped against tunneling
    pub fn advance(&mut self, dt: f32, ctx: &mut AdvanceCtx) -> StepOutcome {
        if let Behavior::Beam { max_range } = self.weapon.spec().behavior {
            return self.march_beam(max_range, ctx);
        }
        let sub_dt = dt / PROJECTILE_SUBSTEPS as f32;
        for _ in 0..PROJECTILE_SUBSTEPS {
            let outcome = self.step(sub_dt, ctx);
            if outcome != StepOutcome::InFlight {
                return outcome;
            }
        }
        StepOutcome::InFlight
    }

    /// One movement sub-step
    fn step(&mut self, dt: f32, ctx: &mut AdvanceCtx) -> StepOutcome {
        self.age += dt;

        // Children of any weapon fall back to the plain arc
        let behavior = if self.child {
            Behavior::Ballistic { deposits: false }
        } else {
            self.weapon.spec().behavior
        };

        if let Behavior::Airstrike { bomblets } = behavior {
            return self.fly_carrier(dt, bomblets, ctx);
        }

        // Ground-locked modes run their own movement
        if self.roll_timer.is_some() {
            return self.roll(dt, ctx);
        }
        if self.burrow_timer.is_some() {
            return self.burrow(dt, ctx);
        }

        match behavior {
            Behavior::Homing {
                arm_delay,
                turn_rate,
            } if self.age >= arm_delay => {
                // Armed: steer toward the foe, speed preserved, gravity off
                let foe = &ctx.tanks[1 - self.owner];
                self.steer_toward(foe.pos, turn_rate * dt);
                self.pos += self.vel * dt;
            }
            Behavior::Mirv { children, spread } => {
                if !self.split_done && self.vel.y < 0.0 {
                    self.split(children, spread, ctx);
                }
                self.integrate(dt, ctx.wind);
            }
            _ => self.integrate(dt, ctx.wind),
        }

        self.resolve_collisions(behavior, ctx)
    }

    /// Gravity + wind integration
    fn integrate(&mut self, dt: f32, wind: f32) {
        self.vel.y -= GRAVITY * dt;
        self.vel.x += wind * dt;
        self.pos += self.vel * dt;
    }

    /// Rotate velocity toward `target` by at most `max_turn` radians
    fn steer_toward(&mut self, target: Vec2, max_turn: f32) {
        let speed = self.vel.length();
        if speed < 1.0 {
            return;
        }
        let current = self.vel.y.atan2(self.vel.x);
        let wanted = (target - self.pos).y.atan2((target - self.pos).x);
        let mut delta = wanted - current;
        while delta > std::f32::consts::PI {
            delta -= std::f32::consts::TAU;
        }
        while delta < -std::f32::consts::PI {
            delta += std::f32::consts::TAU;
        }
        let turned = current + delta.clamp(-max_turn, max_turn);
        self.vel = Vec2::new(turned.cos(), turned.sin()) * speed;
    }

    /// Spawn the diverging ballistic children, exactly once
    fn split(&mut self, children: u8, spread: f32, ctx: &mut AdvanceCtx) {
        self.split_done = true;
        let n = children as f32;
        for i in 0..children {
            let frac = i as f32 - (n - 1.0) / 2.0;
            let vel = Vec2::new(self.vel.x + frac * spread, self.vel.y);
            let id = ctx.alloc_id();
            ctx.spawned
                .push(Projectile::spawn_child(id, self, self.pos, vel, PROJECTILE_LIFETIME));
        }
        log::debug!("mirv {} split into {} children", self.id, children);
    }

    /// Level flight to above the foe, then release bomblets and despawn
    fn fly_carrier(&mut self, dt: f32, bomblets: u8, ctx: &mut AdvanceCtx) -> StepOutcome {
        self.pos += self.vel * dt;
        let foe_x = ctx.tanks[1 - self.owner].pos.x;
        let crossed = (foe_x - self.pos.x) * self.vel.x.signum() <= 0.0;
        if crossed || self.age >= self.lifetime {
            let n = bomblets as f32;
            for i in 0..bomblets {
                let frac = i as f32 - (n - 1.0) / 2.0;
                let pos = Vec2::new(self.pos.x + frac * BOMBLET_SPACING, self.pos.y);
                let id = ctx.alloc_id();
                ctx.spawned.push(Projectile::spawn_child(
                    id,
                    self,
                    pos,
                    Vec2::new(0.0, -30.0),
                    BOMBLET_LIFETIME,
                ));
            }
            // The carrier itself never blasts
            return StepOutcome::Despawn;
        }
        if self.out_of_bounds(ctx.terrain) {
            return StepOutcome::Despawn;
        }
        StepOutcome::InFlight
    }

    /// Ground-locked rolling until the fuse runs out
    fn roll(&mut self, dt: f32, ctx: &mut AdvanceCtx) -> StepOutcome {
        let timer = self.roll_timer.get_or_insert(0.0);
        *timer -= dt;
        let expired = *timer <= 0.0;
        self.pos.x += self.vel.x * dt;
        let edge = ctx.terrain.width() as f32 - 1.0;
        if self.pos.x <= 0.0 || self.pos.x >= edge {
            // Rolled into the field wall
            self.pos.x = self.pos.x.clamp(0.0, edge);
            return StepOutcome::Impact(self.pos);
        }
        self.pos.y = ctx.terrain.height_at(self.pos.x);
        if let Some(hit) = self.tank_hit(ctx.tanks) {
            return StepOutcome::Impact(hit);
        }
        if expired {
            return StepOutcome::Impact(self.pos);
        }
        StepOutcome::InFlight
    }

    /// Tunneling through terrain, carving a thin trench as it goes
    fn burrow(&mut self, dt: f32, ctx: &mut AdvanceCtx) -> StepOutcome {
        let timer = self.burrow_timer.get_or_insert(0.0);
        *timer -= dt;
        let expired = *timer <= 0.0;
        self.pos += self.vel * dt;
        if let Some(range) = ctx.terrain.carve(self.pos.x, self.pos.y, TRENCH_RADIUS, 1.0) {
            ctx.terrain_changed.push(range);
        }
        if let Some(hit) = self.tank_hit(ctx.tanks) {
            return StepOutcome::Impact(hit);
        }
        if expired || self.pos.y <= TERRAIN_MIN_HEIGHT || self.out_of_bounds(ctx.terrain) {
            self.pos.x = self.pos.x.clamp(0.0, ctx.terrain.width() as f32 - 1.0);
            self.pos.y = self.pos.y.max(TERRAIN_MIN_HEIGHT);
            return StepOutcome::Impact(self.pos);
        }
        StepOutcome::InFlight
    }

    /// Terrain/tank/bounds/lifetime checks shared by the airborne behaviors
    fn resolve_collisions(&mut self, behavior: Behavior, ctx: &mut AdvanceCtx) -> StepOutcome {
        if let Some(hit) = self.tank_hit(ctx.tanks) {
            return StepOutcome::Impact(hit);
        }

        let ground = ctx.terrain.height_at(self.pos.x);
        if self.pos.y <= ground {
            match behavior {
                Behavior::Bouncer { restitution, .. } if self.bounces_left > 0 => {
                    self.bounces_left -= 1;
                    self.pos.y = ground + 0.5;
                    self.vel.y = -self.vel.y * restitution;
                    return StepOutcome::InFlight;
                }
                Behavior::Roller { duration } => {
                    self.roll_timer = Some(duration);
                    self.pos.y = ground;
                    self.vel = Vec2::new(self.vel.x.signum() * ROLL_SPEED, 0.0);
                    return StepOutcome::InFlight;
                }
                Behavior::Burrower { axis, duration } => {
                    self.burrow_timer = Some(duration);
                    self.vel = match axis {
                        BurrowAxis::Horizontal => {
                            Vec2::new(self.vel.x.signum() * BURROW_SPEED, 0.0)
                        }
                        BurrowAxis::Vertical => Vec2::new(0.0, -BURROW_SPEED),
                    };
                    return StepOutcome::InFlight;
                }
                _ => return StepOutcome::Impact(Vec2::new(self.pos.x, ground)),
            }
        }

        if self.out_of_bounds(ctx.terrain) {
            return StepOutcome::Despawn;
        }
        if self.age >= self.lifetime {
            return StepOutcome::Impact(self.pos);
        }
        StepOutcome::InFlight
    }

    /// Single-tick laser resolution: march the ray until terrain, a tank or
    /// max range, and blast there
    fn march_beam(&mut self, max_range: f32, ctx: &mut AdvanceCtx) -> StepOutcome {
        let dir = self.vel.normalize_or_zero();
        let mut t = 0.0;
        while t < max_range {
            let p = self.pos + dir * t;
            for tank in ctx.tanks {
                if tank.id != self.owner && dist_sq(p, tank.pos) <= TANK_HIT_RADIUS * TANK_HIT_RADIUS
                {
                    return StepOutcome::Impact(p);
                }
            }
            if p.y <= ctx.terrain.height_at(p.x) {
                return StepOutcome::Impact(p);
            }
            if p.x < 0.0 || p.x >= ctx.terrain.width() as f32 {
                return StepOutcome::Impact(p);
            }
            t += BEAM_STEP;
        }
        StepOutcome::Impact(self.pos + dir * max_range)
    }

    /// Hit-circle test against both tanks, honoring the muzzle grace window.
    /// A direct hit detonates at the struck tank's center, so contact deals
    /// full blast damage and craters under the victim.
    fn tank_hit(&self, tanks: &[Tank; 2]) -> Option<Vec2> {
        for tank in tanks {
            if tank.id == self.owner && self.age < MUZZLE_GRACE {
                continue;
            }
            if dist_sq(self.pos, tank.pos) <= TANK_HIT_RADIUS * TANK_HIT_RADIUS {
                return Some(tank.pos);
            }
        }
        None
    }

    fn out_of_bounds(&self, terrain: &Terrain) -> bool {
        self.pos.x < 0.0 || self.pos.x >= terrain.width() as f32 || self.pos.y < -60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MatchSettings;
    use crate::sim::state::Simulation;

    fn flat_ctx_parts() -> (Terrain, [Tank; 2]) {
        let sim = Simulation::new(MatchSettings::with_seed(1));
        let terrain = Terrain::flat(1000, 100.0);
        let mut tanks = sim.tanks.clone();
        for tank in &mut tanks {
            tank.pos.y = terrain.height_at(tank.pos.x);
        }
        (terrain, tanks)
    }

    fn run_until_done(
        proj: &mut Projectile,
        terrain: &mut Terrain,
        tanks: &[Tank; 2],
        max_ticks: u32,
    ) -> (StepOutcome, Vec<Projectile>, u32) {
        let mut spawned = Vec::new();
        let mut next_id = 100;
        let mut changed = Vec::new();
        for tick_no in 0..max_ticks {
            let mut ctx = AdvanceCtx {
                terrain,
                tanks,
                wind: 0.0,
                spawned: &mut spawned,
                next_id: &mut next_id,
                terrain_changed: &mut changed,
            };
            let outcome = proj.advance(SIM_DT, &mut ctx);
            if outcome != StepOutcome::InFlight {
                return (outcome, spawned, tick_no);
            }
        }
        (StepOutcome::InFlight, spawned, max_ticks)
    }

    #[test]
    fn test_ballistic_arc_lands() {
        let (mut terrain, tanks) = flat_ctx_parts();
        let mut proj = Projectile::spawn(
            1,
            0,
            Weapon::Shell,
            Vec2::new(200.0, 130.0),
            Vec2::new(120.0, 120.0),
        );
        let (outcome, _, _) = run_until_done(&mut proj, &mut terrain, &tanks, 2000);
        match outcome {
            StepOutcome::Impact(p) => {
                assert!((p.y - 100.0).abs() < 2.0);
                assert!(p.x > 200.0);
            }
            other => panic!("expected impact, got {other:?}"),
        }
    }

    #[test]
    fn test_wind_pushes_trajectory() {
        let terrain = Terrain::flat(1000, 100.0);
        let (_, tanks) = flat_ctx_parts();
        let land = |wind: f32| {
            let mut terrain = terrain.clone();
            let mut proj = Projectile::spawn(
                1,
                0,
                Weapon::Shell,
                Vec2::new(300.0, 130.0),
                Vec2::new(80.0, 120.0),
            );
            let mut spawned = Vec::new();
            let mut next_id = 10;
            let mut changed = Vec::new();
            for _ in 0..4000 {
                let mut ctx = AdvanceCtx {
                    terrain: &mut terrain,
                    tanks: &tanks,
                    wind,
                    spawned: &mut spawned,
                    next_id: &mut next_id,
                    terrain_changed: &mut changed,
                };
                if let StepOutcome::Impact(p) = proj.advance(SIM_DT, &mut ctx) {
                    return p.x;
                }
            }
            panic!("never landed");
        };
        assert!(land(30.0) > land(0.0));
        assert!(land(-30.0) < land(0.0));
    }

    #[test]
    fn test_bouncer_bounces_exactly_n_times() {
        let (mut terrain, mut tanks) = flat_ctx_parts();
        // Park the tanks far away so only the ground terminates the shot
        tanks[0].pos = Vec2::new(5.0, 100.0);
        tanks[1].pos = Vec2::new(995.0, 100.0);
        let mut proj = Projectile::spawn(
            1,
            0,
            Weapon::BouncyBomb,
            Vec2::new(300.0, 160.0),
            Vec2::new(40.0, 0.0),
        );
        proj.bounces_left = 2;

        let mut bounce_speeds = Vec::new();
        let mut spawned = Vec::new();
        let mut next_id = 10;
        let mut changed = Vec::new();
        let mut last_bounces = proj.bounces_left;
        let mut fall_speed = 0.0f32;
        let outcome = loop {
            let pre_vy = proj.vel.y;
            fall_speed = fall_speed.min(pre_vy);
            let mut ctx = AdvanceCtx {
                terrain: &mut terrain,
                tanks: &tanks,
                wind: 0.0,
                spawned: &mut spawned,
                next_id: &mut next_id,
                terrain_changed: &mut changed,
            };
            let outcome = proj.advance(SIM_DT, &mut ctx);
            if proj.bounces_left < last_bounces {
                last_bounces = proj.bounces_left;
                bounce_speeds.push((fall_speed.abs(), proj.vel.y));
                fall_speed = 0.0;
            }
            if outcome != StepOutcome::InFlight {
                break outcome;
            }
        };

        assert!(matches!(outcome, StepOutcome::Impact(_)));
        assert_eq!(bounce_speeds.len(), 2);
        for (down, up) in bounce_speeds {
            // Each reflection scales vertical speed by the restitution factor
            // (tolerance covers sub-step sampling of the impact speed)
            assert!((up - down * 0.65).abs() < 4.0);
        }
    }

    #[test]
    fn test_mirv_splits_exactly_once() {
        let (mut terrain, mut tanks) = flat_ctx_parts();
        tanks[0].pos = Vec2::new(5.0, 100.0);
        tanks[1].pos = Vec2::new(995.0, 100.0);
        let mut proj = Projectile::spawn(
            1,
            0,
            Weapon::Mirv,
            Vec2::new(400.0, 130.0),
            Vec2::new(60.0, 150.0),
        );
        let mut spawned = Vec::new();
        let mut next_id = 10;
        let mut changed = Vec::new();
        for _ in 0..4000 {
            let mut ctx = AdvanceCtx {
                terrain: &mut terrain,
                tanks: &tanks,
                wind: 0.0,
                spawned: &mut spawned,
                next_id: &mut next_id,
                terrain_changed: &mut changed,
            };
            if proj.advance(SIM_DT, &mut ctx) != StepOutcome::InFlight {
                break;
            }
        }
        // Children spawn exactly once no matter how long past apex it flies
        assert_eq!(spawned.len(), 4);
        assert!(proj.split_done);
        assert!(spawned.iter().all(|c| c.child));
        // Diverging horizontal velocities
        let mut xs: Vec<f32> = spawned.iter().map(|c| c.vel.x).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_roller_converts_and_expires() {
        let (mut terrain, mut tanks) = flat_ctx_parts();
        tanks[0].pos = Vec2::new(5.0, 100.0);
        tanks[1].pos = Vec2::new(995.0, 100.0);
        let mut proj = Projectile::spawn(
            1,
            0,
            Weapon::Roller,
            Vec2::new(300.0, 120.0),
            Vec2::new(50.0, 0.0),
        );
        let (outcome, _, _) = run_until_done(&mut proj, &mut terrain, &tanks, 4000);
        match outcome {
            StepOutcome::Impact(p) => {
                // Rolled downrange along the ground before detonating
                assert!(p.x > 350.0);
                assert!((p.y - 100.0).abs() < 1.0);
            }
            other => panic!("expected impact, got {other:?}"),
        }
    }

    #[test]
    fn test_burrower_carves_a_trench() {
        let (mut terrain, mut tanks) = flat_ctx_parts();
        tanks[0].pos = Vec2::new(5.0, 100.0);
        tanks[1].pos = Vec2::new(995.0, 100.0);
        let mut proj = Projectile::spawn(
            1,
            0,
            Weapon::Groundhog,
            Vec2::new(400.0, 130.0),
            Vec2::new(60.0, -80.0),
        );
        let before = terrain.height_at(430.0);
        let (outcome, _, _) = run_until_done(&mut proj, &mut terrain, &tanks, 4000);
        assert!(matches!(outcome, StepOutcome::Impact(_)));
        // The tunnel lowered columns along its path
        assert!(terrain.height_at(430.0) < before);
    }

    #[test]
    fn test_airstrike_releases_over_foe_without_blast() {
        let (mut terrain, tanks) = flat_ctx_parts();
        let foe_x = tanks[1].pos.x;
        let mut proj = Projectile::spawn(
            1,
            0,
            Weapon::Airstrike,
            Vec2::new(100.0, CRUISE_ALTITUDE),
            Vec2::new(300.0, 0.0),
        );
        let (outcome, spawned, _) = run_until_done(&mut proj, &mut terrain, &tanks, 4000);
        assert_eq!(outcome, StepOutcome::Despawn);
        assert_eq!(spawned.len(), 5);
        let mean_x: f32 = spawned.iter().map(|b| b.pos.x).sum::<f32>() / 5.0;
        assert!((mean_x - foe_x).abs() < 20.0);
    }

    #[test]
    fn test_homing_turns_toward_foe() {
        let (mut terrain, mut tanks) = flat_ctx_parts();
        tanks[1].pos = Vec2::new(700.0, 100.0);
        let mut proj = Projectile::spawn(
            1,
            0,
            Weapon::Seeker,
            Vec2::new(200.0, 200.0),
            // Fired steeply away from the foe
            Vec2::new(-20.0, 160.0),
        );
        let (outcome, _, _) = run_until_done(&mut proj, &mut terrain, &tanks, 6000);
        match outcome {
            StepOutcome::Impact(p) => {
                // Steering dragged it back toward the foe's side of the field
                assert!(p.x > 200.0);
            }
            other => panic!("expected impact, got {other:?}"),
        }
    }

    #[test]
    fn test_beam_resolves_in_single_tick() {
        let (mut terrain, tanks) = flat_ctx_parts();
        let mut proj = Projectile::spawn(
            1,
            0,
            Weapon::Laser,
            Vec2::new(200.0, 130.0),
            Vec2::new(1.0, -0.3).normalize(),
        );
        let (outcome, _, ticks) = run_until_done(&mut proj, &mut terrain, &tanks, 10);
        assert_eq!(ticks, 0);
        match outcome {
            StepOutcome::Impact(p) => assert!(p.y <= 102.0),
            other => panic!("expected impact, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_bounds_despawns_silently() {
        let (mut terrain, mut tanks) = flat_ctx_parts();
        tanks[0].pos = Vec2::new(900.0, 100.0);
        tanks[1].pos = Vec2::new(950.0, 100.0);
        let mut proj = Projectile::spawn(
            1,
            0,
            Weapon::Shell,
            Vec2::new(10.0, 300.0),
            Vec2::new(-200.0, 50.0),
        );
        let (outcome, _, _) = run_until_done(&mut proj, &mut terrain, &tanks, 2000);
        assert_eq!(outcome, StepOutcome::Despawn);
    }
}
