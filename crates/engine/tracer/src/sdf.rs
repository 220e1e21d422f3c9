//! Signed distance fields for the perturbed sphere
//!
//! The tracer, normal estimator and render loop only see the [`Sdf`]
//! capability. Which surface is active is a configuration choice
//! ([`SurfaceKind`]), not something the marcher knows about.

use crate::math::Vec3Ext;
use crate::noise::fbm;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Amplitude of the trigonometric ripple
const RIPPLE_AMPLITUDE: f32 = 0.2;

/// Angular frequency of the trigonometric ripple
const RIPPLE_FREQUENCY: f32 = 16.0;

/// Domain scale fed to fBm by the fractal surface
const FRACTAL_FREQUENCY: f32 = 3.4;

/// A signed distance estimate: negative inside, positive outside
pub trait Sdf: Send + Sync {
    /// Distance from `p` to the surface
    fn distance(&self, p: Vec3) -> f32;

    /// Sphere `(center, radius)` that encloses the whole surface
    fn bounding_sphere(&self) -> (Vec3, f32);
}

/// Exact sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Sdf for Sphere {
    #[inline]
    fn distance(&self, p: Vec3) -> f32 {
        (p - self.center).length() - self.radius
    }

    fn bounding_sphere(&self) -> (Vec3, f32) {
        (self.center, self.radius)
    }
}

/// Sphere whose radius is modulated by `0.2*sin(16x)*sin(16y)*sin(16z)`
/// sampled at the projection of `p` onto the base sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl RippleSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    fn perturbation(&self, p: Vec3) -> f32 {
        let s = (p - self.center).normalize_to(self.radius);
        RIPPLE_AMPLITUDE
            * (RIPPLE_FREQUENCY * s.x).sin()
            * (RIPPLE_FREQUENCY * s.y).sin()
            * (RIPPLE_FREQUENCY * s.z).sin()
    }
}

impl Sdf for RippleSphere {
    fn distance(&self, p: Vec3) -> f32 {
        (p - self.center).length() - (self.radius + self.perturbation(p))
    }

    fn bounding_sphere(&self) -> (Vec3, f32) {
        (self.center, self.radius + RIPPLE_AMPLITUDE)
    }
}

/// Sphere whose radius is pushed inward by `fbm(3.4 * p)`.
///
/// Not a true distance: the displacement can change faster than the
/// distance it claims, which the marcher's damping absorbs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl FractalSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Sdf for FractalSphere {
    fn distance(&self, p: Vec3) -> f32 {
        (p - self.center).length() - (self.radius - fbm(p * FRACTAL_FREQUENCY))
    }

    fn bounding_sphere(&self) -> (Vec3, f32) {
        // fbm is non-negative, so the displacement only shrinks the sphere
        (self.center, self.radius)
    }
}

/// Which surface a scene renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    /// Exact sphere
    Sphere,
    /// Trigonometric ripple
    Ripple,
    /// fBm-displaced "explosion"
    #[default]
    Fractal,
}

impl SurfaceKind {
    /// Instantiate the surface around `center` with base `radius`
    pub fn build(self, center: Vec3, radius: f32) -> Box<dyn Sdf> {
        match self {
            SurfaceKind::Sphere => Box::new(Sphere::new(center, radius)),
            SurfaceKind::Ripple => Box::new(RippleSphere::new(center, radius)),
            SurfaceKind::Fractal => Box::new(FractalSphere::new(center, radius)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SurfaceKind::Sphere => "sphere",
            SurfaceKind::Ripple => "ripple",
            SurfaceKind::Fractal => "fractal",
        }
    }
}
