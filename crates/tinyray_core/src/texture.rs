//! Environment image loading.
//!
//! Environment maps are kept as raw 8-bit RGB samples; conversion to a
//! color (divide by 255) happens at lookup time.

use std::path::Path;

use thiserror::Error;
use tinyray_math::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("Texture has no pixels: {0}")]
    Empty(String),

    #[error("Pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// An equirectangular environment image.
///
/// Pixels are stored row-major as `[R, G, B]` bytes, row 0 at the top.
#[derive(Clone, Debug)]
pub struct EnvironmentImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl EnvironmentImage {
    /// Wrap an RGB byte buffer of `width * height * 3` samples.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty(format!("{}x{}", width, height)));
        }

        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Load an image file and convert it to 8-bit RGB.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| {
            TextureError::LoadError(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let image = Self::from_rgb8(width, height, rgb.into_raw())?;

        log::debug!(
            "Loaded environment: {} ({}x{}, {:.1} KB)",
            path.display(),
            width,
            height,
            image.size_bytes() as f32 / 1024.0
        );

        Ok(image)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color of the pixel at integer coordinates; out-of-range values clamp
    /// to the nearest edge.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let idx = (y * self.width as usize + x) * 3;

        Color::new(
            self.data[idx] as f32 / 255.0,
            self.data[idx + 1] as f32 / 255.0,
            self.data[idx + 2] as f32 / 255.0,
        )
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
