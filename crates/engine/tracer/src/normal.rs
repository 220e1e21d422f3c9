//! Surface normals from the distance field gradient

use crate::sdf::Sdf;
use glam::Vec3;

/// Finite difference step
pub const NORMAL_EPSILON: f32 = 0.1;

/// Estimate the unit normal at `p` with forward differences along each axis.
///
/// Returns `Vec3::ZERO` where the gradient vanishes (e.g. at the center of an
/// exact sphere); callers shade such points at the ambient floor.
pub fn estimate_normal<S: Sdf + ?Sized>(sdf: &S, p: Vec3) -> Vec3 {
    let d = sdf.distance(p);
    let dx = sdf.distance(p + Vec3::new(NORMAL_EPSILON, 0.0, 0.0)) - d;
    let dy = sdf.distance(p + Vec3::new(0.0, NORMAL_EPSILON, 0.0)) - d;
    let dz = sdf.distance(p + Vec3::new(0.0, 0.0, NORMAL_EPSILON)) - d;
    Vec3::new(dx, dy, dz).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::{FractalSphere, RippleSphere, Sphere};

    #[test]
    fn test_sphere_normal_points_outward() {
        let sphere = Sphere::new(Vec3::ZERO, 1.5);
        let n = estimate_normal(&sphere, Vec3::new(0.0, 0.0, 1.5));
        assert!((n.length() - 1.0).abs() < 1e-5);
        // Forward differences bias the normal slightly toward +x/+y
        assert!(n.z > 0.99, "normal {:?}", n);
    }

    #[test]
    fn test_normals_are_unit_length() {
        let surfaces: [&dyn Sdf; 3] = [
            &Sphere::new(Vec3::ZERO, 1.5),
            &RippleSphere::new(Vec3::ZERO, 1.5),
            &FractalSphere::new(Vec3::ZERO, 1.5),
        ];
        for sdf in surfaces {
            for i in 0..50 {
                let t = i as f32 * 0.13;
                let p = Vec3::new(t.cos(), t.sin(), (t * 0.5).cos()) * 1.4;
                let n = estimate_normal(sdf, p);
                assert!((n.length() - 1.0).abs() < 1e-4, "normal {:?} at {:?}", n, p);
            }
        }
    }

    #[test]
    fn test_flat_field_gives_zero_normal() {
        struct Flat;
        impl Sdf for Flat {
            fn distance(&self, _p: Vec3) -> f32 {
                1.0
            }
            fn bounding_sphere(&self) -> (Vec3, f32) {
                (Vec3::ZERO, 0.0)
            }
        }
        assert_eq!(estimate_normal(&Flat, Vec3::ONE), Vec3::ZERO);
    }
}
