//! Ship controller: controls, motion integration and the lifecycle state
//! machine (invulnerable → flying → exploding → respawn or dead)

use super::geometry::{heading_vector, wrap_with_margin};
use super::state::{GameEvent, GameState, Laser, Ship, ShipState};
use super::tick::TickInput;
use crate::normalize_angle;
use crate::tuning::Tuning;

/// Result of advancing the ship's state machine by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipTransition {
    None,
    /// Blinking finished; collisions apply from now on
    BecameVulnerable,
    /// Explosion animation ran out; a life must be spent
    ExplosionOver,
}

impl Ship {
    /// Latch held controls. Turning both ways at once cancels out.
    pub fn apply_controls(&mut self, input: &TickInput, tuning: &Tuning) {
        let turn = tuning.turn_per_tick();
        self.rot = match (input.turn_left, input.turn_right) {
            (true, false) => turn,
            (false, true) => -turn,
            _ => 0.0,
        };
        self.thrusting = input.thrust;
    }

    /// Fire from the nose if allowed. Returns true if a laser was added.
    ///
    /// Every press consumes the trigger: `can_shoot` stays false until
    /// [`Ship::release_fire`], even when the laser cap blocked the shot.
    pub fn shoot_laser(&mut self, tuning: &Tuning) -> bool {
        let fired = self.can_shoot && self.lasers.len() < tuning.laser_max;
        if fired {
            let vel = heading_vector(self.angle) * tuning.laser_speed_per_tick();
            self.lasers.push(Laser::new(self.nose(), vel));
        }
        self.can_shoot = false;
        fired
    }

    /// Fire control released; re-arms the trigger
    pub fn release_fire(&mut self) {
        self.can_shoot = true;
    }

    /// Start the explosion countdown
    pub fn explode(&mut self, tuning: &Tuning) {
        self.state = ShipState::Exploding {
            ticks_left: tuning.ship_explode_ticks(),
        };
        self.thrusting = false;
        self.rot = 0.0;
    }

    /// Thrust or coast, then turn and move. No-op unless controllable.
    pub fn integrate(&mut self, tuning: &Tuning) {
        if !self.is_controllable() {
            return;
        }
        if self.thrusting {
            self.thrust += heading_vector(self.angle) * tuning.thrust_per_tick();
        } else {
            self.thrust -= self.thrust * tuning.friction_per_tick();
        }
        self.angle = normalize_angle(self.angle + self.rot);
        self.pos += self.thrust;
    }

    /// Wrap around the field once fully off screen
    pub fn wrap(&mut self, tuning: &Tuning) {
        self.pos = wrap_with_margin(
            self.pos,
            tuning.field_width,
            tuning.field_height,
            self.radius,
        );
    }

    /// Count down blink or explosion timers. All state changes other than
    /// `explode` and death go through here.
    pub fn advance_state(&mut self, tuning: &Tuning) -> ShipTransition {
        match self.state {
            ShipState::Invulnerable {
                blink_num,
                blink_time,
            } => {
                let mut blink_num = blink_num;
                let mut blink_time = blink_time.saturating_sub(1);
                if blink_time == 0 {
                    blink_time = tuning.blink_ticks();
                    blink_num = blink_num.saturating_sub(1);
                }
                if blink_num == 0 {
                    self.state = ShipState::Flying;
                    ShipTransition::BecameVulnerable
                } else {
                    self.state = ShipState::Invulnerable {
                        blink_num,
                        blink_time,
                    };
                    ShipTransition::None
                }
            }
            ShipState::Exploding { ticks_left } => {
                let ticks_left = ticks_left.saturating_sub(1);
                self.state = ShipState::Exploding { ticks_left };
                if ticks_left == 0 {
                    ShipTransition::ExplosionOver
                } else {
                    ShipTransition::None
                }
            }
            ShipState::Flying | ShipState::Dead => ShipTransition::None,
        }
    }
}

impl GameState {
    /// Blow up the ship (collision engine calls this on impact)
    pub fn explode_ship(&mut self) {
        self.ship.explode(&self.tuning);
        log::debug!(
            "Ship exploded at ({:.0}, {:.0}), {} lives left",
            self.ship.pos.x,
            self.ship.pos.y,
            self.lives
        );
        self.emit(GameEvent::ShipExploded);
    }

    /// One tick of ship physics and lifecycle
    pub fn update_ship(&mut self) {
        self.ship.integrate(&self.tuning);

        let engine = self.ship.is_controllable() && self.ship.thrusting;
        if engine != self.ship.engine_on {
            self.ship.engine_on = engine;
            self.emit(if engine {
                GameEvent::ThrustStarted
            } else {
                GameEvent::ThrustStopped
            });
        }

        match self.ship.advance_state(&self.tuning) {
            ShipTransition::ExplosionOver => {
                self.lives = self.lives.saturating_sub(1);
                if self.lives == 0 {
                    self.game_over();
                } else {
                    log::debug!("Respawning, {} lives left", self.lives);
                    self.ship = Ship::spawn(&self.tuning);
                    self.emit(GameEvent::ShipRespawned);
                }
            }
            ShipTransition::BecameVulnerable | ShipTransition::None => {}
        }

        self.ship.wrap(&self.tuning);
    }
}
