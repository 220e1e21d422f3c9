//! Error types for the tracer

use thiserror::Error;

/// Result type for tracer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring a render or writing its output.
///
/// Marching misses and degenerate normals are ordinary outcomes, not errors.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// RON parse error in a scene file
    #[error("Config parse error: {0}")]
    Config(#[from] ron::error::SpannedError),

    /// Scene values that cannot be rendered
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Framebuffer dimensions don't match its pixel count
    #[error("Framebuffer size mismatch: {width}x{height} needs {expected} pixels, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
