//! Fire color ramp
//!
//! Piecewise-linear ramp over five stops. The last stop is "hot" (components
//! above 1) and only reads as yellow-white once the output is clamped.

use crate::math::lerp;
use glam::Vec3;

pub const GRAY: Vec3 = Vec3::new(0.4, 0.4, 0.4);
pub const DARK_GRAY: Vec3 = Vec3::new(0.2, 0.2, 0.2);
pub const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
pub const ORANGE: Vec3 = Vec3::new(1.0, 0.6, 0.0);
pub const YELLOW: Vec3 = Vec3::new(1.7, 1.3, 1.0);

/// Ramp stops in order, evenly spaced over `[0, 1]`
pub const FIRE_STOPS: [Vec3; 5] = [GRAY, DARK_GRAY, RED, ORANGE, YELLOW];

/// Map `d` (clamped to `[0, 1]`) onto the fire ramp
pub fn palette_fire(d: f32) -> Vec3 {
    let segments = FIRE_STOPS.len() - 1;
    let x = d.clamp(0.0, 1.0) * segments as f32;
    // x == 1.0 belongs to the last segment
    let segment = (x as usize).min(segments - 1);
    lerp(FIRE_STOPS[segment], FIRE_STOPS[segment + 1], x - segment as f32)
}
