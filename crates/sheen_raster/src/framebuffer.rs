//! CPU render target

use std::path::Path;

use image::RgbaImage;
use sheen_core::Color;

use crate::coords::Viewport;
use crate::error::{RasterError, Result};

/// RGBA float framebuffer, stored premultiplied in row-major order
#[derive(Clone, Debug)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a framebuffer filled with `clear`
    pub fn new(width: u32, height: u32, clear: Color) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyFramebuffer { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![clear.premultiplied(); width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.premultiplied());
    }

    /// Straight-alpha color at `(x, y)`
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)].unpremultiplied())
    }

    /// Source-over a straight-alpha color onto `(x, y)`
    pub fn blend(&mut self, x: u32, y: u32, src: Color) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            blend_premultiplied(&mut self.pixels[i], src);
        }
    }

    /// Rows of premultiplied pixels, for hosts that fill in parallel
    pub(crate) fn rows_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Quantized straight-alpha RGBA8 bytes
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| p.unpremultiplied().to_rgba8())
            .collect()
    }

    pub fn to_image(&self) -> Result<RgbaImage> {
        let bytes = self.to_rgba8();
        let len = bytes.len();
        RgbaImage::from_raw(self.width, self.height, bytes).ok_or(RasterError::BufferSize {
            width: self.width,
            height: self.height,
            len,
        })
    }

    /// Write the framebuffer as a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.to_image()?
            .save_with_format(path, image::ImageFormat::Png)?;
        tracing::debug!("Saved {}x{} framebuffer to {}", self.width, self.height, path.display());
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// `dst = src + dst * (1 - src.a)` with `dst` premultiplied and `src` straight
pub(crate) fn blend_premultiplied(dst: &mut Color, src: Color) {
    if src.a <= 0.0 {
        return;
    }
    let s = src.premultiplied();
    let k = 1.0 - s.a;
    *dst = Color::rgba(s.r + dst.r * k, s.g + dst.g * k, s.b + dst.b * k, s.a + dst.a * k);
}
