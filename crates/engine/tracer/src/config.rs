//! Scene configuration
//!
//! Everything the core reads during a render lives in [`SceneConfig`] and is
//! passed in explicitly. Defaults reproduce the fireball scene; a RON file
//! can override any subset of fields.

use crate::error::{Error, Result};
use crate::lighting::ShadingMode;
use crate::march::{Damping, MarchConfig};
use crate::sdf::SurfaceKind;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Immutable description of a single-object, single-light scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Camera position; the camera looks down -Z
    pub camera: Vec3,
    /// Point light position
    pub light: Vec3,
    /// Center of the base sphere
    pub center: Vec3,
    /// Radius of the base sphere
    pub radius: f32,
    /// Distance field policy
    pub surface: SurfaceKind,
    /// Hit coloring
    pub shading: ShadingMode,
    /// Sphere tracing parameters
    pub march: MarchConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fov: std::f32::consts::FRAC_PI_3,
            camera: Vec3::new(0.0, 0.0, 3.0),
            light: Vec3::new(10.0, 10.0, 10.0),
            center: Vec3::ZERO,
            radius: 1.5,
            surface: SurfaceKind::default(),
            shading: ShadingMode::default(),
            march: MarchConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Load a scene from a RON file and validate it
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Parse a scene from RON text and validate it
    pub fn from_ron(content: &str) -> Result<Self> {
        let config: SceneConfig = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the scene as pretty RON
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize scene: {}", e)))
    }

    /// Reject values the renderer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.fov > 0.0 && self.fov < std::f32::consts::PI) {
            return Err(Error::InvalidConfig(format!(
                "fov must be in (0, pi) radians, got {}",
                self.fov
            )));
        }
        if !positive(self.radius) {
            return Err(Error::InvalidConfig(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        if self.march.max_steps == 0 {
            return Err(Error::InvalidConfig("max_steps must be at least 1".into()));
        }
        if !positive(self.march.min_step) {
            return Err(Error::InvalidConfig(format!(
                "min_step must be positive, got {}",
                self.march.min_step
            )));
        }
        let k = match self.march.damping {
            Damping::Linear(k) | Damping::Sqrt(k) => k,
        };
        if !positive(k) {
            return Err(Error::InvalidConfig(format!(
                "damping factor must be positive, got {}",
                k
            )));
        }
        Ok(())
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// False for zero, negatives and NaN
fn positive(v: f32) -> bool {
    v > 0.0
}
