//! Static weapon catalog
//!
//! Each archetype is an immutable record shared by every projectile that
//! references it. Behavior is a closed tagged variant so the projectile
//! simulator can dispatch all physics through one exhaustive match instead
//! of scattered string checks.

use serde::{Deserialize, Serialize};

/// Which way a burrowing weapon tunnels after first ground contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurrowAxis {
    Horizontal,
    Vertical,
}

/// Per-weapon flight behavior, with the knobs that drive it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    /// Plain gravity + wind arc. `deposits` turns the blast into a dirt
    /// mound instead of a crater.
    Ballistic { deposits: bool },
    /// Ballistic until armed, then steers toward the opposing tank at a
    /// bounded turn rate, preserving speed.
    Homing { arm_delay: f32, turn_rate: f32 },
    /// Reflects vertical velocity off the ground, losing speed each time.
    Bouncer { restitution: f32, bounces: u8 },
    /// Sticks to the ground on contact and rolls for a while, then blows.
    Roller { duration: f32 },
    /// Tunnels through terrain for a while, carving a trench, then blows.
    Burrower { axis: BurrowAxis, duration: f32 },
    /// Splits into diverging ballistic children once past apex.
    Mirv { children: u8, spread: f32 },
    /// Flies level to above the opponent, releases a burst of vertical-drop
    /// bomblets, and despawns without a blast of its own.
    Airstrike { bomblets: u8 },
    /// Not a moving entity: ray-marched from the muzzle in a single tick.
    Beam { max_range: f32 },
}

/// Weapon identifiers; also the loadout entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weapon {
    Shell,
    HeavyShell,
    Dirtball,
    Seeker,
    BouncyBomb,
    Roller,
    Groundhog,
    Drill,
    Mirv,
    Airstrike,
    Laser,
}

/// Immutable stats for one archetype; shared, never serialized (the
/// [`Weapon`] identifier is what goes into snapshots)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponSpec {
    pub weapon: Weapon,
    pub name: &'static str,
    pub behavior: Behavior,
    /// Damage at the blast center
    pub damage: f32,
    /// Blast radius
    pub radius: f32,
    /// Multiplier on the muzzle speed picked by the shooter
    pub speed_mul: f32,
}

/// The full catalog, ordered as presented to the draft UI
pub const CATALOG: &[WeaponSpec] = &[
    WeaponSpec {
        weapon: Weapon::Shell,
        name: "Shell",
        behavior: Behavior::Ballistic { deposits: false },
        damage: 30.0,
        radius: 40.0,
        speed_mul: 1.0,
    },
    WeaponSpec {
        weapon: Weapon::HeavyShell,
        name: "Heavy Shell",
        behavior: Behavior::Ballistic { deposits: false },
        damage: 55.0,
        radius: 70.0,
        speed_mul: 0.85,
    },
    WeaponSpec {
        weapon: Weapon::Dirtball,
        name: "Dirtball",
        behavior: Behavior::Ballistic { deposits: true },
        damage: 6.0,
        radius: 45.0,
        speed_mul: 1.0,
    },
    WeaponSpec {
        weapon: Weapon::Seeker,
        name: "Seeker",
        behavior: Behavior::Homing {
            arm_delay: 0.6,
            turn_rate: 1.8,
        },
        damage: 25.0,
        radius: 35.0,
        speed_mul: 0.9,
    },
    WeaponSpec {
        weapon: Weapon::BouncyBomb,
        name: "Bouncy Bomb",
        behavior: Behavior::Bouncer {
            restitution: 0.65,
            bounces: 3,
        },
        damage: 28.0,
        radius: 38.0,
        speed_mul: 1.0,
    },
    WeaponSpec {
        weapon: Weapon::Roller,
        name: "Roller",
        behavior: Behavior::Roller { duration: 2.5 },
        damage: 32.0,
        radius: 36.0,
        speed_mul: 1.0,
    },
    WeaponSpec {
        weapon: Weapon::Groundhog,
        name: "Groundhog",
        behavior: Behavior::Burrower {
            axis: BurrowAxis::Horizontal,
            duration: 1.2,
        },
        damage: 34.0,
        radius: 42.0,
        speed_mul: 1.0,
    },
    WeaponSpec {
        weapon: Weapon::Drill,
        name: "Drill",
        behavior: Behavior::Burrower {
            axis: BurrowAxis::Vertical,
            duration: 0.9,
        },
        damage: 34.0,
        radius: 38.0,
        speed_mul: 1.0,
    },
    WeaponSpec {
        weapon: Weapon::Mirv,
        name: "MIRV",
        behavior: Behavior::Mirv {
            children: 4,
            spread: 55.0,
        },
        damage: 18.0,
        radius: 28.0,
        speed_mul: 1.0,
    },
    WeaponSpec {
        weapon: Weapon::Airstrike,
        name: "Airstrike",
        behavior: Behavior::Airstrike { bomblets: 5 },
        damage: 12.0,
        radius: 24.0,
        speed_mul: 1.1,
    },
    WeaponSpec {
        weapon: Weapon::Laser,
        name: "Laser",
        behavior: Behavior::Beam { max_range: 900.0 },
        damage: 26.0,
        radius: 30.0,
        speed_mul: 1.0,
    },
];

impl Weapon {
    /// Catalog lookup. CATALOG is ordered by discriminant.
    #[inline]
    pub fn spec(self) -> &'static WeaponSpec {
        &CATALOG[self as usize]
    }

    /// The ordered loadout both players start a match with
    pub fn default_loadout() -> Vec<Weapon> {
        vec![
            Weapon::Shell,
            Weapon::Shell,
            Weapon::Shell,
            Weapon::BouncyBomb,
            Weapon::Seeker,
            Weapon::Roller,
            Weapon::Groundhog,
            Weapon::Mirv,
            Weapon::Airstrike,
            Weapon::Laser,
            Weapon::HeavyShell,
            Weapon::Dirtball,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_weapon_has_a_spec() {
        for spec in CATALOG {
            assert_eq!(spec.weapon.spec().weapon, spec.weapon);
        }
    }

    #[test]
    fn test_default_loadout_is_fireable() {
        for w in Weapon::default_loadout() {
            let spec = w.spec();
            assert!(spec.damage >= 0.0);
            assert!(spec.radius > 0.0);
            assert!(spec.speed_mul > 0.0);
        }
    }
}
