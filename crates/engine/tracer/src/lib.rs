//! Sphere Tracer Library
//!
//! Renders a noise-displaced sphere by marching rays through a signed
//! distance field, shading hits with a diffuse term and a fire palette.
//!
//! # Architecture
//!
//! - **math**: `glam::Vec3` extensions and clamped `lerp`
//! - **noise**: sine hash, value noise and 4-octave fBm
//! - **sdf**: the `Sdf` capability and its sphere / ripple / fractal surfaces
//! - **normal**: finite-difference normal estimation
//! - **march**: the sphere tracing loop
//! - **palette** / **lighting**: color ramp, diffuse term and shading modes
//! - **camera**: pinhole projection from pixel to ray
//! - **config**: scene description, loadable from RON
//! - **framebuffer**: linear color buffer and PPM / image output
//! - **renderer**: parallel per-row render loop (`CpuTracer`)

// Core math
pub mod math;
pub mod noise;
pub mod normal;
pub mod sdf;

// Tracing and shading
pub mod camera;
pub mod lighting;
pub mod march;
pub mod palette;

// Scene, output and render loop
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod renderer;

// Re-export commonly used types at crate root
pub use camera::PinholeCamera;
pub use config::SceneConfig;
pub use error::{Error, Result};
pub use framebuffer::Framebuffer;
pub use lighting::{AMBIENT, BACKGROUND_COLOR, ShadingMode};
pub use march::{Damping, MarchConfig, MarchOutcome, Ray, sphere_trace};
pub use normal::estimate_normal;
pub use renderer::{CpuTracer, RenderStats};
pub use sdf::{FractalSphere, RippleSphere, Sdf, Sphere, SurfaceKind};

// Re-export glam for convenience
pub use glam;
