//! Sphere tracing
//!
//! Marches a ray through an [`Sdf`] with a damped, floored step until the
//! field goes negative (Hit) or the step budget runs out (Miss). The hit is
//! reported on the first step that has already penetrated the surface, so
//! the point sits slightly inside it by at most one step.

use crate::sdf::Sdf;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Ray with a unit-length direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// How the field value is turned into a step length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Damping {
    /// `d * k`
    Linear(f32),
    /// `sqrt(d) * k`
    Sqrt(f32),
}

impl Damping {
    #[inline]
    fn step(self, d: f32) -> f32 {
        match self {
            Damping::Linear(k) => d * k,
            Damping::Sqrt(k) => d.sqrt() * k,
        }
    }
}

impl Default for Damping {
    fn default() -> Self {
        Damping::Linear(0.1)
    }
}

/// Marching configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchConfig {
    /// Step budget before reporting a miss
    pub max_steps: u32,
    /// Floor on the step length; guarantees forward progress
    pub min_step: f32,
    /// Step damping against overshoot
    pub damping: Damping,
    /// Reject rays that pass outside the surface's bounding sphere
    pub early_discard: bool,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            max_steps: 128,
            min_step: 0.01,
            damping: Damping::default(),
            early_discard: false,
        }
    }
}

/// Result of marching one ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarchOutcome {
    /// Field went negative at `point` after `steps` evaluations
    Hit { point: Vec3, steps: u32 },
    /// No penetration within the budget (or discarded up front)
    Miss { steps: u32 },
}

impl MarchOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, MarchOutcome::Hit { .. })
    }

    pub fn point(&self) -> Option<Vec3> {
        match *self {
            MarchOutcome::Hit { point, .. } => Some(point),
            MarchOutcome::Miss { .. } => None,
        }
    }

    pub fn steps(&self) -> u32 {
        match *self {
            MarchOutcome::Hit { steps, .. } | MarchOutcome::Miss { steps } => steps,
        }
    }
}

/// True if the ray's line passes further from the bounding sphere center
/// than its radius
fn misses_bounds<S: Sdf + ?Sized>(sdf: &S, ray: &Ray) -> bool {
    let (center, radius) = sdf.bounding_sphere();
    let oc = ray.origin - center;
    oc.length_squared() - oc.dot(ray.direction).powi(2) > radius * radius
}

/// March `ray` through `sdf`.
///
/// `ray.direction` must be unit length.
pub fn sphere_trace<S: Sdf + ?Sized>(sdf: &S, ray: &Ray, config: &MarchConfig) -> MarchOutcome {
    if config.early_discard && misses_bounds(sdf, ray) {
        return MarchOutcome::Miss { steps: 0 };
    }

    let mut pos = ray.origin;
    for step in 0..config.max_steps {
        let d = sdf.distance(pos);
        if d < 0.0 {
            return MarchOutcome::Hit {
                point: pos,
                steps: step + 1,
            };
        }
        pos += ray.direction * config.damping.step(d).max(config.min_step);
    }

    MarchOutcome::Miss {
        steps: config.max_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::{FractalSphere, Sphere};

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::ZERO, 1.5)
    }

    #[test]
    fn test_ray_toward_center_hits_just_inside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z);
        let outcome = sphere_trace(&sphere, &ray, &MarchConfig::default());

        let point = outcome.point().expect("central ray should hit");
        let d = sphere.distance(point);
        assert!(d < 0.0, "hit point must be past the surface, got {}", d);
        assert!(d > -0.011, "hit point overshot by more than one step: {}", d);
    }

    #[test]
    fn test_tangent_ray_misses_after_full_budget() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 100.0), Vec3::X);
        let outcome = sphere_trace(&unit_sphere(), &ray, &MarchConfig::default());
        assert_eq!(outcome, MarchOutcome::Miss { steps: 128 });
    }

    #[test]
    fn test_origin_inside_hits_immediately() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let outcome = sphere_trace(&unit_sphere(), &ray, &MarchConfig::default());
        assert_eq!(
            outcome,
            MarchOutcome::Hit {
                point: Vec3::ZERO,
                steps: 1
            }
        );
    }

    #[test]
    fn test_sqrt_damping_hits() {
        let config = MarchConfig {
            damping: Damping::Sqrt(0.1),
            ..Default::default()
        };
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z);
        assert!(sphere_trace(&unit_sphere(), &ray, &config).is_hit());
    }

    #[test]
    fn test_early_discard_skips_marching() {
        let config = MarchConfig {
            early_discard: true,
            ..Default::default()
        };
        let away = Ray::new(Vec3::new(0.0, 0.0, 100.0), Vec3::X);
        assert_eq!(
            sphere_trace(&unit_sphere(), &away, &config),
            MarchOutcome::Miss { steps: 0 }
        );

        let toward = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z);
        assert!(sphere_trace(&unit_sphere(), &toward, &config).is_hit());
    }

    #[test]
    fn test_fractal_central_ray_hits() {
        let fractal = FractalSphere::new(Vec3::ZERO, 1.5);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z);
        let outcome = sphere_trace(&fractal, &ray, &MarchConfig::default());
        assert!(outcome.is_hit());
        assert!(outcome.steps() <= 128);
    }
}
