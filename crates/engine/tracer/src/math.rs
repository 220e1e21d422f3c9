//! Vector helpers on top of `glam::Vec3`
//!
//! `Vec3` is used for positions, directions, colors and normals alike.
//! glam already covers add/sub/scale/dot/length/normalize; this module adds
//! the few operations the tracer needs that glam spells differently.

use glam::Vec3;
use std::ops::{Add, Mul, Sub};

/// Extension methods for `Vec3`
pub trait Vec3Ext {
    /// Scale the vector to `length` along its own direction.
    ///
    /// A zero vector stays zero rather than turning into NaN.
    fn normalize_to(self, length: f32) -> Self;

    /// Componentwise `(floor, fractional part)`, with the fractional part in `[0, 1)`.
    fn floor_fract(self) -> (Self, Self)
    where
        Self: Sized;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn normalize_to(self, length: f32) -> Self {
        self.normalize_or_zero() * length
    }

    #[inline]
    fn floor_fract(self) -> (Self, Self) {
        let i = self.floor();
        (i, self - i)
    }
}

/// Linear interpolation with `t` clamped into `[0, 1]`
#[inline]
pub fn lerp<T>(v0: T, v1: T, t: f32) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>,
{
    v0 + (v1 - v0) * t.clamp(0.0, 1.0)
}
