//! Pinhole camera looking down -Z

use crate::march::Ray;
use glam::Vec3;

/// Fixed pinhole projection derived from the vertical field of view and the
/// image height. Pixel `(0, 0)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeCamera {
    pub origin: Vec3,
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in radians
    pub fov: f32,
}

impl PinholeCamera {
    pub fn new(origin: Vec3, width: u32, height: u32, fov: f32) -> Self {
        Self {
            origin,
            width,
            height,
            fov,
        }
    }

    /// Distance from the eye to the image plane, in pixels
    pub fn focal_length(&self) -> f32 {
        self.height as f32 / (2.0 * (self.fov / 2.0).tan())
    }

    /// Unnormalized view direction through pixel `(i, j)`
    pub fn direction(&self, i: u32, j: u32) -> Vec3 {
        let x = i as f32 - self.width as f32 / 2.0;
        // Flip so that row 0 is the top of the image
        let y = -(j as f32 - self.height as f32 / 2.0);
        let z = -self.focal_length();
        Vec3::new(x, y, z)
    }

    /// Unit ray through pixel `(i, j)`
    pub fn ray(&self, i: u32, j: u32) -> Ray {
        Ray::new(self.origin, self.direction(i, j))
    }
}
