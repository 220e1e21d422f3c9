//! Value noise and fractal Brownian motion
//!
//! Deterministic 3D value noise built from a sine hash over a scalar lattice
//! index (`x + 57*y + 113*z`), and a 4-octave fBm that rotates the domain
//! before sampling to break up axis-aligned artifacts.

use crate::math::{Vec3Ext, lerp};
use glam::{Mat3, Vec3};

/// Lattice index weights for the x, y and z cell coordinates
const LATTICE_STRIDE: Vec3 = Vec3::new(1.0, 57.0, 113.0);

/// Domain rotation applied once before the first octave.
///
/// Rows are `(0, .8, .6)`, `(-.8, .36, -.48)`, `(-.6, -.48, .64)`; glam
/// stores columns.
const OCTAVE_ROTATION: Mat3 = Mat3::from_cols(
    Vec3::new(0.00, -0.80, -0.60),
    Vec3::new(0.80, 0.36, -0.48),
    Vec3::new(0.60, -0.48, 0.64),
);

/// Per-octave amplitudes
const OCTAVE_AMPLITUDES: [f32; 4] = [0.5, 0.25, 0.125, 0.0625];

/// Domain scale applied after each of the first three octaves
const OCTAVE_LACUNARITY: [f32; 3] = [2.32, 3.03, 2.61];

/// Sum of `OCTAVE_AMPLITUDES`
const AMPLITUDE_SUM: f32 = 0.9375;

/// Pseudo-random scalar hash in `[0, 1)`: `fract(sin(n) * 43758.5453)`
#[inline]
pub fn hash(n: f32) -> f32 {
    let x = n.sin() * 43758.5453;
    // `f32::fract` truncates toward zero, which is negative for negative x
    x - x.floor()
}

/// Hermite smoothstep `f*f*(3-2f)`, componentwise
#[inline]
fn smooth(f: Vec3) -> Vec3 {
    f * f * (Vec3::splat(3.0) - 2.0 * f)
}

/// Trilinearly interpolated value noise in `[0, 1)`
pub fn noise(p: Vec3) -> f32 {
    let (i, f) = p.floor_fract();
    let f = smooth(f);
    let n = i.dot(LATTICE_STRIDE);

    lerp(
        lerp(
            lerp(hash(n), hash(n + 1.0), f.x),
            lerp(hash(n + 57.0), hash(n + 58.0), f.x),
            f.y,
        ),
        lerp(
            lerp(hash(n + 113.0), hash(n + 114.0), f.x),
            lerp(hash(n + 170.0), hash(n + 171.0), f.x),
            f.y,
        ),
        f.z,
    )
}

/// Four-octave fractal Brownian motion, normalized to roughly `[0, 1]`
pub fn fbm(p: Vec3) -> f32 {
    let mut p = OCTAVE_ROTATION * p;
    let mut sum = 0.0;
    for (octave, amplitude) in OCTAVE_AMPLITUDES.iter().enumerate() {
        sum += amplitude * noise(p);
        if let Some(scale) = OCTAVE_LACUNARITY.get(octave) {
            p *= *scale;
        }
    }
    sum / AMPLITUDE_SUM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_range() {
        for i in -500..500 {
            let n = i as f32 * 0.37;
            let h = hash(n);
            assert!((0.0..=1.0).contains(&h), "hash({}) = {} out of range", n, h);
        }
    }

    #[test]
    fn test_hash_matches_formula() {
        let n = 12.5_f32;
        let x = n.sin() * 43758.5453;
        assert_eq!(hash(n), x - x.floor());
    }

    #[test]
    fn test_noise_at_lattice_point_is_corner_hash() {
        // Smoothstep weights are exactly zero at integer coordinates
        let p = Vec3::new(2.0, -1.0, 3.0);
        let n = 2.0 - 57.0 + 3.0 * 113.0;
        assert!((noise(p) - hash(n)).abs() < 1e-6);
    }

    #[test]
    fn test_noise_deterministic() {
        let p = Vec3::new(1.5, 2.3, 3.7);
        assert_eq!(noise(p), noise(p));
    }

    #[test]
    fn test_noise_continuity_across_cells() {
        let axes = [Vec3::X, Vec3::Y, Vec3::Z];
        let base = Vec3::new(0.3, -1.7, 2.45);
        for axis in axes {
            let mut prev = noise(base);
            for i in 1..3000 {
                let curr = noise(base + axis * (i as f32 * 0.001));
                let diff = (curr - prev).abs();
                assert!(
                    diff < 0.01,
                    "Noise jump along {:?} at step {}: {} -> {}",
                    axis,
                    i,
                    prev,
                    curr
                );
                prev = curr;
            }
        }
    }

    #[test]
    fn test_noise_matches_at_boundary() {
        let below = noise(Vec3::new(1.0 - 1e-4, 0.5, 0.5));
        let at = noise(Vec3::new(1.0, 0.5, 0.5));
        assert!((below - at).abs() < 1e-3, "{} vs {}", below, at);
    }

    #[test]
    fn test_fbm_range() {
        for i in 0..20 {
            for j in 0..20 {
                for k in 0..5 {
                    let p = Vec3::new(
                        i as f32 * 0.31 - 3.0,
                        j as f32 * 0.17 - 1.5,
                        k as f32 * 0.53,
                    );
                    let v = fbm(p);
                    assert!((0.0..=1.0).contains(&v), "fbm({:?}) = {} out of range", p, v);
                }
            }
        }
    }

    #[test]
    fn test_octave_rotation_rows() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let rotated = OCTAVE_ROTATION * v;
        let expected = Vec3::new(
            Vec3::new(0.00, 0.80, 0.60).dot(v),
            Vec3::new(-0.80, 0.36, -0.48).dot(v),
            Vec3::new(-0.60, -0.48, 0.64).dot(v),
        );
        assert!((rotated - expected).length() < 1e-5);
    }
}
