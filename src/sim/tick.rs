//! Firing, fixed-timestep advance and the turn state machine
//!
//! `tick` accepts wall-clock time and consumes it in fixed `SIM_DT` steps
//! (accumulator pattern, capped to avoid the spiral of death). All events a
//! renderer or audio layer could react to come back in the returned list.

use super::damage::{self, Blast};
use super::projectile::{AdvanceCtx, Projectile, StepOutcome};
use super::state::{FireError, Phase, PlayerId, ShotHandle, Simulation, TickEvent};
use super::weapons::Behavior;
use crate::consts::*;

impl Simulation {
    /// Commit the active player's shot. Rejections mutate nothing.
    pub fn fire(
        &mut self,
        player: PlayerId,
        weapon_index: usize,
        angle: f32,
        power: f32,
    ) -> Result<ShotHandle, FireError> {
        match self.phase {
            Phase::RoundOver => return Err(FireError::MatchOver),
            Phase::InFlight => return Err(FireError::AlreadyInFlight),
            Phase::Aim => {}
        }
        if player != self.current {
            return Err(FireError::NotYourTurn);
        }
        if weapon_index >= self.tanks[player].loadout.len() {
            return Err(FireError::NoWeapon);
        }
        if !(ANGLE_MIN..=ANGLE_MAX).contains(&angle)
            || !(POWER_MIN..=POWER_MAX).contains(&power)
        {
            return Err(FireError::AimOutOfRange);
        }

        let weapon = self.tanks[player].loadout.remove(weapon_index);
        let id = self.next_entity_id();
        let tank = &mut self.tanks[player];
        tank.selected = tank.selected.min(tank.loadout.len().saturating_sub(1));
        tank.turret_angle = angle;
        tank.power = power;

        let spec = weapon.spec();
        let speed = power * spec.speed_mul;
        let projectile = match spec.behavior {
            Behavior::Airstrike { .. } => {
                Projectile::spawn_carrier(id, player, weapon, tank.pos.x, tank.facing.dir(), speed)
            }
            Behavior::Beam { .. } => {
                // The beam ray-marches from the muzzle; velocity is direction only
                Projectile::spawn(id, player, weapon, tank.muzzle(angle), tank.aim_dir(angle))
            }
            _ => Projectile::spawn(
                id,
                player,
                weapon,
                tank.muzzle(angle),
                tank.aim_dir(angle) * speed,
            ),
        };
        self.projectiles.push(projectile);

        self.phase = Phase::InFlight;
        self.shots_fired += 1;
        self.settle_timer = 0.0;
        log::info!(
            "player {player} fires {} (angle {angle:.2}, power {power:.0})",
            spec.name
        );
        Ok(ShotHandle(id))
    }

    /// Advance the match by `dt` seconds of wall-clock time
    pub fn tick(&mut self, dt: f32) -> Vec<TickEvent> {
        let mut events = Vec::new();
        if self.phase == Phase::RoundOver {
            return events;
        }
        self.accumulator += dt.min(0.1);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step_fixed(&mut events);
            self.accumulator -= SIM_DT;
            substeps += 1;
            if self.phase == Phase::RoundOver {
                break;
            }
        }
        events
    }

    /// One fixed physics step
    fn step_fixed(&mut self, events: &mut Vec<TickEvent>) {
        self.time_ticks += 1;

        // Tanks settle under gravity/knockback; position invariant holds
        // after every step
        for i in 0..self.tanks.len() {
            let (tanks, terrain) = (&mut self.tanks, &self.terrain);
            tanks[i].integrate(terrain, SIM_DT);
        }

        // Advance every projectile; resolve terminal ones
        let mut trenches: Vec<(usize, usize)> = Vec::new();
        let mut i = 0;
        while i < self.projectiles.len() {
            let outcome = {
                let mut ctx = AdvanceCtx {
                    terrain: &mut self.terrain,
                    tanks: &self.tanks,
                    wind: self.wind,
                    spawned: &mut self.spawn_queue,
                    next_id: &mut self.next_id,
                    terrain_changed: &mut trenches,
                };
                self.projectiles[i].advance(SIM_DT, &mut ctx)
            };
            match outcome {
                StepOutcome::InFlight => i += 1,
                StepOutcome::Despawn => {
                    self.projectiles.swap_remove(i);
                }
                StepOutcome::Impact(at) => {
                    let projectile = self.projectiles.swap_remove(i);
                    self.resolve_blast(&projectile, at, events);
                    if self.phase == Phase::RoundOver {
                        break;
                    }
                }
            }
        }
        for (start, end) in trenches {
            events.push(TickEvent::TerrainChanged { start, end });
        }
        if self.phase == Phase::RoundOver {
            return;
        }

        // Children conceived this step join the active collection
        self.projectiles.append(&mut self.spawn_queue);

        // Quiet field + settle delay ⇒ the turn passes
        if self.phase == Phase::InFlight && self.projectiles.is_empty() {
            self.settle_timer += SIM_DT;
            if self.settle_timer >= SETTLE_DELAY {
                self.finish_turn(events);
            }
        }
    }

    /// Apply one projectile's blast and fan out the resulting events
    fn resolve_blast(
        &mut self,
        projectile: &Projectile,
        at: glam::Vec2,
        events: &mut Vec<TickEvent>,
    ) {
        let deposits = matches!(
            projectile.weapon.spec().behavior,
            Behavior::Ballistic { deposits: true }
        );
        let blast = Blast {
            center: at,
            radius: projectile.blast_radius(),
            damage: projectile.blast_damage(),
            owner: projectile.owner,
            knockback: 1.0,
            deposits,
        };
        let outcome = damage::apply_explosion(
            &mut self.terrain,
            &mut self.tanks,
            blast,
            self.settings.target_score,
        );

        events.push(TickEvent::Impact {
            x: at.x,
            y: at.y,
            weapon: projectile.weapon,
        });
        if let Some((start, end)) = outcome.terrain_range {
            events.push(TickEvent::TerrainChanged { start, end });
        }
        for (player, delta) in outcome.score_changes {
            events.push(TickEvent::ScoreChange { player, delta });
        }

        if let Some(winner) = outcome.match_end {
            self.end_match(winner, events);
        }
    }

    /// Terminal transition; emitted exactly once
    fn end_match(&mut self, winner: Option<PlayerId>, events: &mut Vec<TickEvent>) {
        self.phase = Phase::RoundOver;
        self.winner = winner;
        self.projectiles.clear();
        self.spawn_queue.clear();
        events.push(TickEvent::MatchEnded { winner });
        match winner {
            Some(p) => log::info!("match over: player {p} wins"),
            None => log::info!("match over: draw"),
        }
    }

    /// The shot has fully settled: advance rounds/wind and hand over the turn
    fn finish_turn(&mut self, events: &mut Vec<TickEvent>) {
        self.settle_timer = 0.0;

        // Two shots make a round; wind re-rolls exactly once per round and
        // both players see the same wind within it
        let round = self.shots_fired / 2;
        if round != self.round {
            self.round = round;
            self.wind = self.roll_wind(round, self.settings.wind_max);
            log::debug!("round {round}: wind {:.1}", self.wind);
        }

        if self.tanks[0].depleted() && self.tanks[1].depleted() {
            let (a, b) = (self.tanks[0].score, self.tanks[1].score);
            let winner = if a > b {
                Some(0)
            } else if b > a {
                Some(1)
            } else {
                None
            };
            self.end_match(winner, events);
            return;
        }

        // Pass to the opponent unless they are out of shells
        let other = Simulation::other(self.current);
        let next = if self.tanks[other].depleted() {
            self.current
        } else {
            other
        };
        self.current = next;
        self.phase = Phase::Aim;
        events.push(TickEvent::TurnEnded { next_player: next });
    }
}
