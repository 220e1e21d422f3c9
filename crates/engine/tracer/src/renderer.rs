//! CPU sphere tracer
//!
//! Renders a [`SceneConfig`] into a [`Framebuffer`]. Rows are shaded in
//! parallel with rayon; each worker owns a disjoint row slice, so no locking
//! is needed and the frame is complete when `render` returns.

use crate::camera::PinholeCamera;
use crate::config::SceneConfig;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::lighting::{BACKGROUND_COLOR, ShadeInput, shade};
use crate::march::{MarchOutcome, sphere_trace};
use crate::normal::estimate_normal;
use crate::sdf::Sdf;
use glam::Vec3;
use rayon::prelude::*;
use std::ops::Add;
use std::time::Instant;
use tracing::{debug, info};

/// Hit/miss counts for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub hits: u64,
    pub misses: u64,
    /// Sum of marching steps over all pixels
    pub total_steps: u64,
}

impl RenderStats {
    fn record(&mut self, outcome: &MarchOutcome) {
        match outcome {
            MarchOutcome::Hit { .. } => self.hits += 1,
            MarchOutcome::Miss { .. } => self.misses += 1,
        }
        self.total_steps += u64::from(outcome.steps());
    }

    pub fn pixels(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn mean_steps(&self) -> f64 {
        if self.pixels() == 0 {
            0.0
        } else {
            self.total_steps as f64 / self.pixels() as f64
        }
    }
}

impl Add for RenderStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            hits: self.hits + other.hits,
            misses: self.misses + other.misses,
            total_steps: self.total_steps + other.total_steps,
        }
    }
}

/// Renders one scene on the CPU
pub struct CpuTracer {
    config: SceneConfig,
    camera: PinholeCamera,
    surface: Box<dyn Sdf>,
    framebuffer: Option<Framebuffer>,
    stats: RenderStats,
}

impl CpuTracer {
    /// Validate `config` and build its surface and camera
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        debug!(?config, "Creating CPU tracer");

        let camera = PinholeCamera::new(config.camera, config.width, config.height, config.fov);
        let surface = config.surface.build(config.center, config.radius);

        Ok(Self {
            config,
            camera,
            surface,
            framebuffer: None,
            stats: RenderStats::default(),
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> &PinholeCamera {
        &self.camera
    }

    pub fn surface(&self) -> &dyn Sdf {
        self.surface.as_ref()
    }

    /// The last rendered frame
    pub fn framebuffer(&self) -> Option<&Framebuffer> {
        self.framebuffer.as_ref()
    }

    /// Statistics of the last rendered frame
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Trace and shade pixel `(i, j)`
    pub fn trace_pixel(&self, i: u32, j: u32) -> (Vec3, MarchOutcome) {
        let ray = self.camera.ray(i, j);
        let outcome = sphere_trace(self.surface.as_ref(), &ray, &self.config.march);

        let color = match outcome {
            MarchOutcome::Hit { point, .. } => {
                let input = ShadeInput {
                    point,
                    normal: estimate_normal(self.surface.as_ref(), point),
                    light: self.config.light,
                    center: self.config.center,
                    radius: self.config.radius,
                };
                shade(self.config.shading, &input)
            }
            MarchOutcome::Miss { .. } => BACKGROUND_COLOR,
        };

        (color, outcome)
    }

    /// Render the full frame
    pub fn render(&mut self) -> &Framebuffer {
        let started = Instant::now();
        let width = self.config.width;
        let mut framebuffer = Framebuffer::new(width, self.config.height);

        let this = &*self;
        let stats = framebuffer
            .pixels_mut()
            .par_chunks_mut(width as usize)
            .enumerate()
            .map(|(j, row)| {
                let mut stats = RenderStats::default();
                for (i, pixel) in row.iter_mut().enumerate() {
                    let (color, outcome) = this.trace_pixel(i as u32, j as u32);
                    *pixel = color;
                    stats.record(&outcome);
                }
                stats
            })
            .reduce(RenderStats::default, |a, b| a + b);

        info!(
            width,
            height = self.config.height,
            surface = self.config.surface.name(),
            shading = self.config.shading.name(),
            hits = stats.hits,
            misses = stats.misses,
            mean_steps = stats.mean_steps(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Rendered frame"
        );

        self.stats = stats;
        self.framebuffer.insert(framebuffer)
    }

    /// Save the last rendered frame; does nothing if nothing was rendered
    pub fn save_image<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        if let Some(framebuffer) = &self.framebuffer {
            framebuffer.save(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::SurfaceKind;

    fn small_scene(surface: SurfaceKind) -> SceneConfig {
        SceneConfig {
            width: 32,
            height: 24,
            surface,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_fills_every_pixel() {
        let mut tracer = CpuTracer::new(small_scene(SurfaceKind::Sphere)).unwrap();
        let fb = tracer.render();
        assert_eq!(fb.pixels().len(), 32 * 24);
        assert_eq!(fb.get(0, 0), BACKGROUND_COLOR);
        assert_ne!(fb.get(16, 12), BACKGROUND_COLOR);

        let stats = tracer.stats();
        assert_eq!(stats.pixels(), 32 * 24);
        assert!(stats.hits > 0 && stats.misses > 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut tracer = CpuTracer::new(small_scene(SurfaceKind::Fractal)).unwrap();
        let fb = tracer.render().clone();
        for j in 0..24 {
            for i in 0..32 {
                assert_eq!(fb.get(i, j), tracer.trace_pixel(i, j).0);
            }
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SceneConfig {
            height: 0,
            ..Default::default()
        };
        assert!(CpuTracer::new(config).is_err());
    }

    #[test]
    fn test_stats_add() {
        let a = RenderStats {
            hits: 1,
            misses: 2,
            total_steps: 10,
        };
        let b = RenderStats {
            hits: 3,
            misses: 0,
            total_steps: 5,
        };
        let sum = a + b;
        assert_eq!(sum.pixels(), 6);
        assert!((sum.mean_steps() - 2.5).abs() < 1e-9);
    }
}
