//! Lighting and shading
//!
//! A single point light with a diffuse term floored at an ambient level.
//! No falloff, no specular.

use crate::palette::palette_fire;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Floor on the diffuse term
pub const AMBIENT: f32 = 0.4;

/// Color rendered when a ray misses the surface
pub const BACKGROUND_COLOR: Vec3 = Vec3::new(0.2, 0.7, 0.8);

/// Scale applied to the normalized penetration depth before the palette lookup
pub const DEPTH_GAIN: f32 = 1.3;

/// How a hit is colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    /// Fire palette by depth, times diffuse intensity
    #[default]
    Fire,
    /// White, times diffuse intensity
    Lambert,
    /// Flat white
    Unlit,
}

impl ShadingMode {
    pub fn name(self) -> &'static str {
        match self {
            ShadingMode::Fire => "fire",
            ShadingMode::Lambert => "lambert",
            ShadingMode::Unlit => "unlit",
        }
    }
}

/// Diffuse intensity `max(n . l, AMBIENT)`
#[inline]
pub fn diffuse(normal: Vec3, light_dir: Vec3) -> f32 {
    normal.dot(light_dir).max(AMBIENT)
}

/// Inputs for shading one hit
#[derive(Debug, Clone, Copy)]
pub struct ShadeInput {
    pub point: Vec3,
    pub normal: Vec3,
    pub light: Vec3,
    pub center: Vec3,
    pub radius: f32,
}

impl ShadeInput {
    /// How far below the base sphere the hit lies, as a fraction of the radius
    pub fn depth(&self) -> f32 {
        (self.radius - (self.point - self.center).length()) / self.radius
    }

    pub fn light_dir(&self) -> Vec3 {
        (self.light - self.point).normalize_or_zero()
    }
}

/// Color for a hit under `mode`
pub fn shade(mode: ShadingMode, input: &ShadeInput) -> Vec3 {
    match mode {
        ShadingMode::Fire => {
            palette_fire(DEPTH_GAIN * input.depth()) * diffuse(input.normal, input.light_dir())
        }
        ShadingMode::Lambert => Vec3::ONE * diffuse(input.normal, input.light_dir()),
        ShadingMode::Unlit => Vec3::ONE,
    }
}
