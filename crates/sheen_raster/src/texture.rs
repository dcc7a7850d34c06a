//! Texture sources
//!
//! The kernel only ever sees an already-sampled texel. Hosts resolve texture
//! slots and UVs through a [`TextureSource`].

use std::path::Path;

use image::RgbaImage;
use sheen_core::{Color, Point};

use crate::error::{RasterError, Result};

/// Resolves `(texture slot, uv)` to a straight-alpha texel
pub trait TextureSource: Send + Sync {
    /// Sample `texture` at `uv`; `None` when the slot is unknown
    fn sample(&self, texture: u32, uv: Point) -> Option<Color>;

    fn has_texture(&self, texture: u32) -> bool {
        self.sample(texture, Point::ZERO).is_some()
    }
}

/// A source with no textures; textured quads fall back to their tint
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTextures;

impl TextureSource for NoTextures {
    fn sample(&self, _texture: u32, _uv: Point) -> Option<Color> {
        None
    }

    fn has_texture(&self, _texture: u32) -> bool {
        false
    }
}

/// In-memory RGBA8 images sampled bilinearly with clamp-to-edge addressing
#[derive(Clone, Debug, Default)]
pub struct ImageTextures {
    images: Vec<RgbaImage>,
}

impl ImageTextures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image and return its slot
    pub fn insert(&mut self, image: RgbaImage) -> u32 {
        self.images.push(image);
        (self.images.len() - 1) as u32
    }

    /// Add raw RGBA8 pixels and return their slot
    pub fn insert_rgba(&mut self, pixels: Vec<u8>, width: u32, height: u32) -> Result<u32> {
        let len = pixels.len();
        let image = RgbaImage::from_raw(width, height, pixels).ok_or(RasterError::BufferSize {
            width,
            height,
            len,
        })?;
        Ok(self.insert(image))
    }

    /// Decode an image file and return its slot
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<u32> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgba8();
        tracing::debug!(
            "Loaded texture {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(self.insert(image))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn texel(image: &RgbaImage, x: i64, y: i64) -> Color {
        let x = x.clamp(0, image.width() as i64 - 1) as u32;
        let y = y.clamp(0, image.height() as i64 - 1) as u32;
        Color::from_rgba8(image.get_pixel(x, y).0)
    }
}

impl TextureSource for ImageTextures {
    fn sample(&self, texture: u32, uv: Point) -> Option<Color> {
        let image = self.images.get(texture as usize)?;
        if image.width() == 0 || image.height() == 0 {
            return None;
        }

        // Texel centers sit at (i + 0.5) / size
        let fx = uv.x * image.width() as f32 - 0.5;
        let fy = uv.y * image.height() as f32 - 0.5;
        if !fx.is_finite() || !fy.is_finite() {
            return Some(Self::texel(image, 0, 0));
        }
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        // Interpolate premultiplied so transparent texels do not bleed color
        let c00 = Self::texel(image, x0, y0).premultiplied();
        let c10 = Self::texel(image, x0 + 1, y0).premultiplied();
        let c01 = Self::texel(image, x0, y0 + 1).premultiplied();
        let c11 = Self::texel(image, x0 + 1, y0 + 1).premultiplied();

        let top = Color::lerp(&c00, &c10, tx);
        let bottom = Color::lerp(&c01, &c11, tx);
        Some(Color::lerp(&top, &bottom, ty).unpremultiplied())
    }

    fn has_texture(&self, texture: u32) -> bool {
        (texture as usize) < self.images.len()
    }
}
