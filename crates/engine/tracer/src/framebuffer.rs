//! Linear-light framebuffer and image output
//!
//! Pixels are stored as unbounded `Vec3` colors, row-major. Conversion to
//! 8 bits happens only at write time: `round(255 * v)` clamped to `[0, 255]`.

use crate::error::{Error, Result};
use glam::Vec3;
use image::{ImageBuffer, Rgb, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Dense row-major color buffer, indexed by `x + y * width`
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

/// Convert one linear channel to a byte
#[inline]
pub fn to_byte(v: f32) -> u8 {
    (255.0 * v).round().clamp(0.0, 255.0) as u8
}

impl Framebuffer {
    /// Black framebuffer of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; width as usize * height as usize],
        }
    }

    /// Wrap existing pixels; `pixels.len()` must equal `width * height`
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Vec3>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::SizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Vec3] {
        &self.pixels
    }

    /// Mutable access for the render loop
    pub(crate) fn pixels_mut(&mut self) -> &mut [Vec3] {
        &mut self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.width as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Vec3) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Clamp to 8 bits per channel
    pub fn to_rgb8(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let c = self.get(x, y);
            Rgb([to_byte(c.x), to_byte(c.y), to_byte(c.z)])
        })
    }

    /// Write a binary PPM: `P6\n<w> <h>\n255\n` followed by RGB bytes
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "P6\n{} {}\n255\n", self.width, self.height)?;
        writer.write_all(self.to_rgb8().as_raw())?;
        writer.flush()?;
        Ok(())
    }

    /// Save to `path`. `.ppm` (or no extension) uses [`Framebuffer::write_ppm`];
    /// anything else is encoded by the `image` crate from its extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let is_ppm = path
            .extension()
            .is_none_or(|ext| ext.eq_ignore_ascii_case("ppm"));

        debug!(path = %path.display(), is_ppm, "Writing framebuffer");
        if is_ppm {
            let file = File::create(path)?;
            self.write_ppm(BufWriter::new(file))
        } else {
            self.to_rgb8().save(path)?;
            Ok(())
        }
    }
}
