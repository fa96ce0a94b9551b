//! Match state and core simulation types
//!
//! Everything that describes a match lives here and is serde-serializable,
//! so a whole match can be captured as a plain snapshot (see the `snapshot`
//! module). The turn/physics logic that mutates it lives in `tick.rs`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::projectile::Projectile;
use super::terrain::Terrain;
use super::weapons::Weapon;
use crate::consts::*;
use crate::settings::MatchSettings;

/// Index into [`Simulation::tanks`]; always 0 or 1
pub type PlayerId = usize;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Active player is choosing weapon/angle/power
    Aim,
    /// Projectiles are in the air; firing is locked
    InFlight,
    /// Terminal: match decided (or drawn)
    RoundOver,
}

/// Which way a tank faces (and therefore fires)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Horizontal sign of the firing direction
    #[inline]
    pub fn dir(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// A player's tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub id: PlayerId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Side,
    /// Last committed turret angle, radians from horizontal
    pub turret_angle: f32,
    /// Last committed shot power
    pub power: f32,
    /// Single-score model: damage dealt scores up, self-hits score down.
    /// There is no separate hit-point pool.
    pub score: f32,
    /// Ordered weapons still available this match
    pub loadout: Vec<Weapon>,
    /// Cursor into `loadout`
    pub selected: usize,
}

impl Tank {
    fn new(id: PlayerId, x: f32, facing: Side, terrain: &Terrain) -> Self {
        Self {
            id,
            pos: Vec2::new(x, terrain.height_at(x)),
            vel: Vec2::ZERO,
            facing,
            turret_angle: std::f32::consts::FRAC_PI_4,
            power: (POWER_MIN + POWER_MAX) * 0.5,
            score: 0.0,
            loadout: Weapon::default_loadout(),
            selected: 0,
        }
    }

    /// World-space direction a shot leaves the barrel, given a canonical
    /// angle in [ANGLE_MIN, ANGLE_MAX] measured from horizontal
    #[inline]
    pub fn aim_dir(&self, angle: f32) -> Vec2 {
        Vec2::new(angle.cos() * self.facing.dir(), angle.sin())
    }

    /// Barrel tip, where projectiles spawn and the laser ray starts
    pub fn muzzle(&self, angle: f32) -> Vec2 {
        self.pos + self.aim_dir(angle) * (TANK_HIT_RADIUS + 6.0)
    }

    /// Apply gravity while airborne and settle back onto the terrain.
    /// The position invariant: after every physics step, `pos.y` is resolved
    /// against the terrain height at `pos.x`.
    pub fn integrate(&mut self, terrain: &Terrain, dt: f32) {
        let ground = terrain.height_at(self.pos.x);
        if self.pos.y > ground || self.vel != Vec2::ZERO {
            self.vel.y -= GRAVITY * dt;
            self.pos += self.vel * dt;
            self.pos.x = self.pos.x.clamp(0.0, terrain.width() as f32 - 1.0);
        }
        let ground = terrain.height_at(self.pos.x);
        if self.pos.y <= ground {
            self.pos.y = ground;
            self.vel = Vec2::ZERO;
        }
    }

    /// True once every shell has been fired
    #[inline]
    pub fn depleted(&self) -> bool {
        self.loadout.is_empty()
    }
}

/// Read-only per-player view for the HUD/renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub score: f32,
    pub loadout: Vec<Weapon>,
    pub selected_weapon: Option<Weapon>,
    pub facing: Side,
}

/// Handle to the shot just fired; resolves to the primary projectile id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotHandle(pub u32);

/// Why a `fire` call was rejected. Rejection never mutates match state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FireError {
    #[error("it is not this player's turn")]
    NotYourTurn,
    #[error("a shot is already in flight")]
    AlreadyInFlight,
    #[error("no weapon available at that loadout index")]
    NoWeapon,
    #[error("angle or power outside the legal range")]
    AimOutOfRange,
    #[error("the match is over")]
    MatchOver,
}

/// Everything the renderer/audio layers need to react to one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TickEvent {
    /// A blast (or dirt mound) resolved at this point
    Impact { x: f32, y: f32, weapon: Weapon },
    /// A player's score moved
    ScoreChange { player: PlayerId, delta: f32 },
    /// Terrain columns in `start..=end` changed
    TerrainChanged { start: usize, end: usize },
    /// Control passed to the next player
    TurnEnded { next_player: PlayerId },
    /// Terminal; `None` means a draw
    MatchEnded { winner: Option<PlayerId> },
}

/// RNG seed wrapper kept in the snapshot, same shape as the match seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Derive a deterministic stream for a labelled purpose (terrain, wind
    /// per round, planner per tick) without sharing mutable RNG state
    pub fn stream(&self, label: u64) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed.wrapping_add(label.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
    }
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    pub settings: MatchSettings,
    pub rng_state: RngState,
    pub terrain: Terrain,
    pub tanks: [Tank; 2],
    /// Active projectiles, exclusively owned by the simulator
    pub projectiles: Vec<Projectile>,
    /// Children created mid-tick (mirv, airstrike), drained after the
    /// advance loop
    pub(crate) spawn_queue: Vec<Projectile>,
    pub phase: Phase,
    /// Whose turn it is (meaningful in Aim/InFlight)
    pub current: PlayerId,
    /// Total shots fired this match; every second shot ends a round
    pub shots_fired: u32,
    pub round: u32,
    /// Wind acceleration, re-rolled once per round, same for both players
    pub wind: f32,
    /// Winner once `phase == RoundOver`; `None` is a draw
    pub winner: Option<PlayerId>,
    pub time_ticks: u64,
    pub(crate) settle_timer: f32,
    pub(crate) accumulator: f32,
    pub(crate) next_id: u32,
}

impl Simulation {
    /// Set up a fresh match: generate terrain, place tanks, roll round-0 wind
    pub fn new(settings: MatchSettings) -> Self {
        let rng_state = RngState::new(settings.seed);
        let mut terrain_rng = rng_state.stream(0);
        let terrain = Terrain::generate(settings.field_width, &mut terrain_rng);

        let width = settings.field_width as f32;
        let tanks = [
            Tank::new(0, width * TANK_SPAWN_MARGIN, Side::Right, &terrain),
            Tank::new(1, width * (1.0 - TANK_SPAWN_MARGIN), Side::Left, &terrain),
        ];

        let wind_max = settings.wind_max;
        let mut sim = Self {
            settings,
            rng_state,
            terrain,
            tanks,
            projectiles: Vec::new(),
            spawn_queue: Vec::new(),
            phase: Phase::Aim,
            current: 0,
            shots_fired: 0,
            round: 0,
            wind: 0.0,
            winner: None,
            time_ticks: 0,
            settle_timer: 0.0,
            accumulator: 0.0,
            next_id: 1,
        };
        sim.wind = sim.roll_wind(0, wind_max);
        log::info!(
            "match start: seed={} width={} wind={:.1}",
            sim.settings.seed,
            sim.settings.field_width,
            sim.wind
        );
        sim
    }

    /// Abort/restart: discard terrain, projectiles and scores, keep nothing.
    /// Nothing needs unwinding; no computation outlives a tick.
    pub fn reset(&mut self, settings: MatchSettings) {
        *self = Simulation::new(settings);
    }

    /// Wind for a given round, derived from the match seed
    pub(crate) fn roll_wind(&self, round: u32, wind_max: f32) -> f32 {
        let mut rng = self.rng_state.stream(1 + round as u64);
        if wind_max <= 0.0 {
            0.0
        } else {
            rng.random_range(-wind_max..wind_max)
        }
    }

    /// Allocate a projectile id
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Read-only terrain snapshot for rendering
    #[inline]
    pub fn terrain_profile(&self) -> &[f32] {
        self.terrain.profile()
    }

    /// Read-only player snapshot for the HUD
    pub fn player(&self, id: PlayerId) -> PlayerView {
        let tank = &self.tanks[id];
        PlayerView {
            position: tank.pos,
            score: tank.score,
            loadout: tank.loadout.clone(),
            selected_weapon: tank.loadout.get(tank.selected).copied(),
            facing: tank.facing,
        }
    }

    /// Move a player's loadout cursor (aim-phase UI)
    pub fn select_weapon(&mut self, player: PlayerId, index: usize) -> Result<(), FireError> {
        if index >= self.tanks[player].loadout.len() {
            return Err(FireError::NoWeapon);
        }
        self.tanks[player].selected = index;
        Ok(())
    }

    /// The opponent of `player`
    #[inline]
    pub fn other(player: PlayerId) -> PlayerId {
        1 - player
    }
}
