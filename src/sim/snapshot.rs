//! Read-only per-frame view of the game for renderers
//!
//! Everything a canvas renderer needs to draw a frame, already resolved to
//! screen-space geometry. Serializes to JSON for the web front end.

use glam::Vec2;
use serde::Serialize;

use super::state::{AsteroidTier, GameState};

#[derive(Debug, Clone, Serialize)]
pub struct ShipSnapshot {
    pub pos: Vec2,
    pub angle: f32,
    pub radius: f32,
    /// Nose, rear-left, rear-right
    pub outline: [Vec2; 3],
    /// False during the "off" half of an invulnerability blink
    pub visible: bool,
    /// Engine flame should be drawn
    pub thrusting: bool,
    pub exploding: bool,
    pub dead: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AsteroidSnapshot {
    pub pos: Vec2,
    pub radius: f32,
    pub tier: AsteroidTier,
    pub outline: Vec<Vec2>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LaserSnapshot {
    pub pos: Vec2,
    pub exploding: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BannerSnapshot {
    pub text: String,
    pub alpha: f32,
}

/// Debug drawing toggles, filled in from player settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DebugOverlay {
    /// Collision circles around ship and asteroids
    pub bounding: bool,
    pub center_dot: bool,
}

/// One frame's worth of drawable state
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub width: f32,
    pub height: f32,
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    pub high_score: u64,
    pub ship: ShipSnapshot,
    pub asteroids: Vec<AsteroidSnapshot>,
    pub lasers: Vec<LaserSnapshot>,
    /// Present while the banner is still fading
    pub banner: Option<BannerSnapshot>,
    pub debug: DebugOverlay,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let ship = &state.ship;
        Self {
            tick: state.time_ticks,
            width: state.tuning.field_width,
            height: state.tuning.field_height,
            level: state.level,
            lives: state.lives,
            score: state.score,
            high_score: state.high_score,
            ship: ShipSnapshot {
                pos: ship.pos,
                angle: ship.angle,
                radius: ship.radius,
                outline: ship.outline(),
                visible: ship.is_visible(),
                thrusting: ship.engine_on,
                exploding: ship.is_exploding(),
                dead: ship.is_dead(),
            },
            asteroids: state
                .field
                .iter()
                .map(|roid| AsteroidSnapshot {
                    pos: roid.pos,
                    radius: roid.radius,
                    tier: roid.tier,
                    outline: roid.outline(),
                })
                .collect(),
            lasers: ship
                .lasers
                .iter()
                .map(|laser| LaserSnapshot {
                    pos: laser.pos,
                    exploding: laser.is_exploding(),
                })
                .collect(),
            banner: state.banner.is_visible().then(|| BannerSnapshot {
                text: state.banner.text.clone(),
                alpha: state.banner.alpha.clamp(0.0, 1.0),
            }),
            debug: DebugOverlay::default(),
        }
    }

    pub fn with_overlay(mut self, debug: DebugOverlay) -> Self {
        self.debug = debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_matches_state() {
        let state = GameState::new(5, Tuning::default(), 120);
        let snap = FrameSnapshot::capture(&state);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.lives, 3);
        assert_eq!(snap.high_score, 120);
        assert_eq!(snap.asteroids.len(), state.field.len());
        assert!(snap.lasers.is_empty());
        assert_eq!(snap.banner.as_ref().map(|b| b.text.as_str()), Some("Level 1"));
        assert!(snap.ship.visible);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(5, Tuning::default(), 0);
        let json = serde_json::to_value(FrameSnapshot::capture(&state)).unwrap();
        assert_eq!(json["ship"]["pos"], serde_json::json!([380.0, 285.0]));
        assert_eq!(json["asteroids"][0]["tier"], "Large");
        assert_eq!(json["debug"]["bounding"], false);
    }
}
