//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one frame. Order within a
//! tick is fixed: music, controls, ship, lasers, asteroids, collisions,
//! then banner bookkeeping (which may restart the game).

use super::lasers::update_lasers;
use super::state::{GameEvent, GameState};

/// Held controls for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    /// Fire control held. Shots trigger on the press, not while held.
    pub fire: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    tick_music(state);

    // Controls only reach a live, non-exploding ship
    if state.ship.is_controllable() {
        state.ship.apply_controls(input, &state.tuning);
        if input.fire {
            if state.ship.shoot_laser(&state.tuning) {
                state.emit(GameEvent::LaserFired);
            }
        } else {
            state.ship.release_fire();
        }
    }

    state.update_ship();
    update_lasers(&mut state.ship.lasers, &state.tuning);
    state.field.advance(&state.tuning);

    // A ship hit can clear the level too; the fresh belt sits out this tick
    let level = state.level;
    state.detect_ship_collision();
    if state.level == level {
        state.detect_laser_hits();
    }

    if state.banner.is_visible() {
        state.banner.alpha -= state.tuning.text_fade_per_tick();
    } else if state.ship.is_dead() {
        state.new_game();
    }
}

/// Alternate low/high beats at the configured tempo
fn tick_music(state: &mut GameState) {
    if state.beat.ticks_left == 0 {
        let high = !state.beat.low;
        state.beat.low = !state.beat.low;
        state.beat.ticks_left = state.tuning.beat_ticks().saturating_sub(1);
        state.emit(GameEvent::MusicBeat { high });
    } else {
        state.beat.ticks_left -= 1;
    }
}
