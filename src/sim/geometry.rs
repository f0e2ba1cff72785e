//! Field geometry
//!
//! Screen space: origin at the top-left, +y pointing down. Headings are
//! measured counter-clockwise as seen on screen, so a heading of π/2 points
//! up and the y component of a heading vector is negated.

use glam::Vec2;

/// Euclidean distance between two points
#[inline]
pub fn dist_between_points(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector for a heading in screen space
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

/// Toroidal wrap with a margin: anything more than `margin` past an edge
/// reappears `margin` beyond the opposite edge. Used for bodies with extent
/// (ship, asteroids) so they slide fully off screen before wrapping.
pub fn wrap_with_margin(pos: Vec2, width: f32, height: f32, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_axis_with_margin(pos.x, width, margin),
        wrap_axis_with_margin(pos.y, height, margin),
    )
}

#[inline]
fn wrap_axis_with_margin(v: f32, extent: f32, margin: f32) -> f32 {
    if v < -margin {
        extent + margin
    } else if v > extent + margin {
        -margin
    } else {
        v
    }
}

/// Toroidal wrap at the exact field edges (lasers)
pub fn wrap_hard(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        wrap_axis_hard(pos.x, width),
        wrap_axis_hard(pos.y, height),
    )
}

#[inline]
fn wrap_axis_hard(v: f32, extent: f32) -> f32 {
    if v < 0.0 {
        extent
    } else if v > extent {
        0.0
    } else {
        v
    }
}

/// Do two circles overlap (strictly)?
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    dist_between_points(a, b) < ra + rb
}
