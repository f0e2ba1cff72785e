//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so a JSON file can override
//! them without a rebuild. Durations are stored in seconds and speeds in
//! pixels per second; the simulation only ever sees the per-tick values
//! returned by the helper methods.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Guards `ceil` against float noise (e.g. `0.3 * 30.0` landing a hair above 9)
const TICK_EPSILON: f32 = 1e-4;

/// Round a (possibly fractional) tick count up, ignoring float noise
#[inline]
fn ceil_ticks(value: f32) -> u32 {
    (value - TICK_EPSILON).ceil().max(0.0) as u32
}

/// Gameplay balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub fps: u32,
    pub field_width: f32,
    pub field_height: f32,
    pub friction: f32,
    pub text_fade_time: f32,

    pub game_lives: u32,
    pub points_large: u64,
    pub points_medium: u64,
    pub points_small: u64,

    pub ship_size: f32,
    pub turn_speed: f32,
    pub ship_thrust: f32,
    pub ship_explode_dur: f32,
    pub ship_invulnerability_dur: f32,
    pub ship_blink_dur: f32,

    pub laser_max: usize,
    pub laser_speed: f32,
    pub laser_dist: f32,
    pub laser_explode_dur: f32,

    pub num_roids: u32,
    pub roids_size: f32,
    pub roids_speed: f32,
    pub roids_vert: u32,
    pub roids_jag: f32,

    pub music_tempo: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fps: FPS,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            friction: FRICTION,
            text_fade_time: TEXT_FADE_TIME,

            game_lives: GAME_LIVES,
            points_large: POINTS_LRG,
            points_medium: POINTS_MED,
            points_small: POINTS_SML,

            ship_size: SHIP_SIZE,
            turn_speed: TURN_SPEED,
            ship_thrust: SHIP_THRUST,
            ship_explode_dur: SHIP_EXPLODE_DUR,
            ship_invulnerability_dur: SHIP_INVULNERABILITY_DUR,
            ship_blink_dur: SHIP_BLINK_DUR,

            laser_max: LASER_MAX,
            laser_speed: LASER_SPD,
            laser_dist: LASER_DIST,
            laser_explode_dur: LASER_EXPLODE_DUR,

            num_roids: NUM_ROIDS,
            roids_size: ROIDS_SIZE,
            roids_speed: ROIDS_SPD,
            roids_vert: ROIDS_VERT,
            roids_jag: ROIDS_JAG,

            music_tempo: MUSIC_TEMPO,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the values can drive a playable simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::OutOfRange {
                    name,
                    value,
                    expected: "> 0",
                })
            }
        }

        if self.fps == 0 {
            return Err(ConfigError::OutOfRange {
                name: "fps",
                value: 0.0,
                expected: "> 0",
            });
        }
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("text_fade_time", self.text_fade_time)?;
        positive("ship_size", self.ship_size)?;
        positive("ship_explode_dur", self.ship_explode_dur)?;
        positive("ship_blink_dur", self.ship_blink_dur)?;
        positive("laser_speed", self.laser_speed)?;
        positive("laser_dist", self.laser_dist)?;
        positive("laser_explode_dur", self.laser_explode_dur)?;
        positive("roids_size", self.roids_size)?;
        positive("music_tempo", self.music_tempo)?;

        if !(0.0..=1.0).contains(&self.friction) {
            return Err(ConfigError::OutOfRange {
                name: "friction",
                value: self.friction,
                expected: "0..=1",
            });
        }
        if !(0.0..1.0).contains(&self.roids_jag) {
            return Err(ConfigError::OutOfRange {
                name: "roids_jag",
                value: self.roids_jag,
                expected: "0..1",
            });
        }
        if self.roids_vert < 3 {
            return Err(ConfigError::OutOfRange {
                name: "roids_vert",
                value: self.roids_vert as f32,
                expected: ">= 3",
            });
        }
        if self.game_lives == 0 {
            return Err(ConfigError::OutOfRange {
                name: "game_lives",
                value: 0.0,
                expected: ">= 1",
            });
        }

        // The ship always spawns at the centre; some integer position must
        // fall outside the exclusion circle.
        let exclusion = self.spawn_exclusion_radius();
        let half_diag = (self.field_width / 2.0).hypot(self.field_height / 2.0);
        if exclusion >= half_diag {
            return Err(ConfigError::NoSpawnRoom {
                exclusion,
                width: self.field_width,
                height: self.field_height,
            });
        }
        Ok(())
    }

    /// Seconds per tick
    #[inline]
    pub fn dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Convert a duration in seconds to a whole number of ticks (rounded up)
    pub fn secs_to_ticks(&self, secs: f32) -> u32 {
        ceil_ticks(secs * self.fps as f32)
    }

    /// Collision radius of the ship
    pub fn ship_radius(&self) -> f32 {
        self.ship_size / 2.0
    }

    /// Heading change per tick while a turn control is held (radians)
    pub fn turn_per_tick(&self) -> f32 {
        self.turn_speed.to_radians() / self.fps as f32
    }

    /// Thrust added per tick along the heading
    pub fn thrust_per_tick(&self) -> f32 {
        self.ship_thrust / self.fps as f32
    }

    /// Fraction of thrust lost per tick when coasting
    pub fn friction_per_tick(&self) -> f32 {
        self.friction / self.fps as f32
    }

    pub fn ship_explode_ticks(&self) -> u32 {
        self.secs_to_ticks(self.ship_explode_dur)
    }

    /// Ticks between blink toggles during invulnerability
    pub fn blink_ticks(&self) -> u32 {
        self.secs_to_ticks(self.ship_blink_dur).max(1)
    }

    /// Number of blink intervals making up the invulnerability window
    pub fn blink_count(&self) -> u32 {
        ceil_ticks(self.ship_invulnerability_dur / self.ship_blink_dur)
    }

    /// Laser displacement per tick
    pub fn laser_speed_per_tick(&self) -> f32 {
        self.laser_speed / self.fps as f32
    }

    /// Distance after which a laser fizzles out
    pub fn laser_max_travel(&self) -> f32 {
        self.laser_dist * self.field_width
    }

    pub fn laser_explode_ticks(&self) -> u32 {
        self.secs_to_ticks(self.laser_explode_dur).max(1)
    }

    /// Max asteroid speed per tick, before the level multiplier
    pub fn roids_speed_per_tick(&self) -> f32 {
        self.roids_speed / self.fps as f32
    }

    /// Asteroid speed multiplier for a level
    pub fn level_speed_multiplier(&self, level: u32) -> f32 {
        1.0 + 0.1 * level as f32
    }

    /// Number of asteroids in a fresh belt for a level
    pub fn belt_size(&self, level: u32) -> u32 {
        self.num_roids + level
    }

    /// Asteroids may not spawn closer than this to the ship
    pub fn spawn_exclusion_radius(&self) -> f32 {
        self.roids_size * 2.0 + self.ship_radius()
    }

    /// Banner alpha lost per tick
    pub fn text_fade_per_tick(&self) -> f32 {
        1.0 / self.text_fade_time / self.fps as f32
    }

    pub fn beat_ticks(&self) -> u32 {
        self.secs_to_ticks(self.music_tempo)
    }
}
