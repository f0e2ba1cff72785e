//! Keyboard to control mapping
//!
//! Keys are held, not queued: a press sets the control and a release clears
//! it. The simulation decides what a held control means (fire only triggers
//! on the press edge).

use crate::sim::TickInput;

/// A gameplay control a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    TurnLeft,
    TurnRight,
    Thrust,
    Fire,
}

impl Control {
    /// Legacy DOM `keyCode` values
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Control::TurnLeft),
            39 => Some(Control::TurnRight),
            38 => Some(Control::Thrust),
            32 => Some(Control::Fire),
            _ => None,
        }
    }

    /// DOM `KeyboardEvent.key` values
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Control::TurnLeft),
            "ArrowRight" | "Right" => Some(Control::TurnRight),
            "ArrowUp" | "Up" => Some(Control::Thrust),
            " " | "Spacebar" => Some(Control::Fire),
            _ => None,
        }
    }
}

/// Currently held controls
#[derive(Debug, Clone, Copy, Default)]
pub struct Controls {
    input: TickInput,
}

impl Controls {
    pub fn set(&mut self, control: Control, held: bool) {
        match control {
            Control::TurnLeft => self.input.turn_left = held,
            Control::TurnRight => self.input.turn_right = held,
            Control::Thrust => self.input.thrust = held,
            Control::Fire => self.input.fire = held,
        }
    }

    /// Returns true if the key is bound (caller should prevent default)
    pub fn key_down(&mut self, code: u32) -> bool {
        match Control::from_key_code(code) {
            Some(control) => {
                self.set(control, true);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, code: u32) -> bool {
        match Control::from_key_code(code) {
            Some(control) => {
                self.set(control, false);
                true
            }
            None => false,
        }
    }

    /// Same as `key_down`/`key_up`, keyed by `KeyboardEvent.key`
    pub fn key_event(&mut self, key: &str, held: bool) -> bool {
        match Control::from_key(key) {
            Some(control) => {
                self.set(control, held);
                true
            }
            None => false,
        }
    }

    /// Release everything, e.g. when the page loses focus
    pub fn clear(&mut self) {
        self.input = TickInput::default();
    }

    pub fn input(&self) -> TickInput {
        self.input
    }
}
