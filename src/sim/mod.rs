//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies
//!
//! The outer layers drive it through [`Simulation::fire`] and
//! [`Simulation::tick`] and react to the returned [`TickEvent`]s.

pub mod damage;
pub mod planner;
pub mod projectile;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod weapons;

pub use planner::Shot;
pub use projectile::Projectile;
pub use state::{
    FireError, Phase, PlayerId, PlayerView, ShotHandle, Side, Simulation, Tank, TickEvent,
};
pub use terrain::Terrain;
pub use weapons::{Behavior, BurrowAxis, Weapon, WeaponSpec};
