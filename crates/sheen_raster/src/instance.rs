//! Quad instances
//!
//! [`QuadInstance`] is the capability-flagged description of one shape: every
//! optional feature (border, shadow, texture) is an `Option`, and the
//! compositor branches on which ones are present. [`GpuQuad`] is the same
//! record flattened into a `#[repr(C)]` layout for GPU storage buffers.

use serde::{Deserialize, Serialize};
use sheen_core::{Color, Point, Rect, Size, Vec2};

/// Border drawn inside the shape boundary
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Border {
    /// Width of the border band, in SDF units
    pub width: f32,
    pub color: Color,
}

impl Border {
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Gaussian drop shadow
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxShadow {
    /// Blur standard deviation
    pub sigma: f32,
    pub offset: Vec2,
    /// Grows (or shrinks, if negative) the shadow rect on every side
    pub spread: f32,
    pub color: Color,
    /// Use the rounded-corner estimator instead of the separable closed form
    pub corner_aware: bool,
}

impl Default for BoxShadow {
    fn default() -> Self {
        Self {
            sigma: 0.0,
            offset: Vec2::ZERO,
            spread: 0.0,
            color: Color::BLACK.with_alpha(0.25),
            corner_aware: true,
        }
    }
}

impl BoxShadow {
    pub fn new(offset_x: f32, offset_y: f32, sigma: f32, color: Color) -> Self {
        Self {
            sigma,
            offset: Vec2::new(offset_x, offset_y),
            color,
            ..Default::default()
        }
    }

    pub fn with_spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }

    /// Use the separable closed form even when the shape is rounded
    pub fn separable(mut self) -> Self {
        self.corner_aware = false;
        self
    }
}

/// Shadow presets for convenience
pub mod shadow_presets {
    use super::*;

    /// Small shadow (1px offset, 2px blur)
    pub fn sm() -> BoxShadow {
        BoxShadow::new(0.0, 1.0, 2.0, Color::BLACK.with_alpha(0.1))
    }

    /// Medium shadow (4px offset, 6px blur)
    pub fn md() -> BoxShadow {
        BoxShadow::new(0.0, 4.0, 6.0, Color::BLACK.with_alpha(0.1)).with_spread(-1.0)
    }

    /// Large shadow (10px offset, 15px blur)
    pub fn lg() -> BoxShadow {
        BoxShadow::new(0.0, 10.0, 15.0, Color::BLACK.with_alpha(0.1)).with_spread(-3.0)
    }
}

/// How a sampled texel is combined with the tint color
#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureMode {
    /// RGBA image, multiplied by the tint
    #[default]
    Image = 0,
    /// Coverage mask (glyph): texel alpha scales the tint alpha
    Glyph = 1,
}

/// Texture lookup for a quad
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureMapping {
    /// Host-side texture slot
    ///
    /// GPU records carry 16 bits of slot; anything above
    /// [`quad_flags::MAX_TEXTURE_INDEX`] is clamped to it when flattened.
    pub texture: u32,
    /// UV at the quad's top-left corner
    pub uv_min: Point,
    /// UV at the quad's bottom-right corner
    pub uv_max: Point,
    pub mode: TextureMode,
}

impl TextureMapping {
    /// Map the whole texture onto the quad
    pub fn full(texture: u32, mode: TextureMode) -> Self {
        Self {
            texture,
            uv_min: Point::ZERO,
            uv_max: Point::new(1.0, 1.0),
            mode,
        }
    }

    /// Map an atlas sub-rect (u_min, v_min, u_max, v_max)
    pub fn atlas(texture: u32, uv_bounds: [f32; 4], mode: TextureMode) -> Self {
        Self {
            texture,
            uv_min: Point::new(uv_bounds[0], uv_bounds[1]),
            uv_max: Point::new(uv_bounds[2], uv_bounds[3]),
            mode,
        }
    }

    /// UV for a position normalized to the quad (0..1 on both axes)
    pub fn uv_at(&self, t: Point) -> Point {
        Point::new(
            self.uv_min.x + t.x * (self.uv_max.x - self.uv_min.x),
            self.uv_min.y + t.y * (self.uv_max.y - self.uv_min.y),
        )
    }
}

/// One shape to draw
///
/// `origin` and `size` are interpreted in the frame's
/// [`CoordinateSpace`](crate::CoordinateSpace); corner radius, border width
/// and shadow parameters are always in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuadInstance {
    pub origin: Point,
    pub size: Size,
    #[serde(default)]
    pub corner_radius: f32,
    /// Fill color, or the tint for textured quads
    pub fill_color: Color,
    #[serde(default)]
    pub border: Option<Border>,
    #[serde(default)]
    pub shadow: Option<BoxShadow>,
    #[serde(default)]
    pub texture: Option<TextureMapping>,
}

impl Default for QuadInstance {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            size: Size::new(100.0, 100.0),
            corner_radius: 0.0,
            fill_color: Color::WHITE,
            border: None,
            shadow: None,
            texture: None,
        }
    }
}

impl QuadInstance {
    /// Create a new rectangle instance
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
            ..Default::default()
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self {
            origin: rect.origin,
            size: rect.size,
            ..Default::default()
        }
    }

    /// Glyph quad sampling a coverage atlas, tinted with `color`
    pub fn glyph(bounds: Rect, texture: u32, uv_bounds: [f32; 4], color: Color) -> Self {
        Self::from_rect(bounds)
            .with_color(color)
            .with_texture(TextureMapping::atlas(texture, uv_bounds, TextureMode::Glyph))
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Set the fill color
    pub fn with_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    /// Set uniform corner radius
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set border
    pub fn with_border(mut self, width: f32, color: Color) -> Self {
        self.border = Some(Border::new(width, color));
        self
    }

    /// Set shadow
    pub fn with_shadow(mut self, shadow: BoxShadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    /// Set texture mapping (the fill color becomes the tint)
    pub fn with_texture(mut self, mapping: TextureMapping) -> Self {
        self.texture = Some(mapping);
        self
    }

    pub fn border_width(&self) -> f32 {
        self.border.map_or(0.0, |b| b.width)
    }

    /// Flatten into the GPU record layout
    pub fn to_gpu(&self) -> GpuQuad {
        GpuQuad::from(self)
    }
}

/// Capability bits stored in [`GpuQuad::flags`] (must match shader constants)
pub mod quad_flags {
    pub const BORDER: u32 = 1 << 0;
    pub const SHADOW: u32 = 1 << 1;
    pub const SHADOW_CORNER_AWARE: u32 = 1 << 2;
    pub const TEXTURE: u32 = 1 << 3;
    pub const GLYPH: u32 = 1 << 4;
    /// Texture slot lives in the upper 16 bits
    pub const TEXTURE_INDEX_SHIFT: u32 = 16;
    pub const CAPABILITY_MASK: u32 = (1 << TEXTURE_INDEX_SHIFT) - 1;
    /// Largest texture slot a GPU record can address
    pub const MAX_TEXTURE_INDEX: u32 = u32::MAX >> TEXTURE_INDEX_SHIFT;
}

/// A quad ready for a GPU storage buffer (matches shader `Quad` struct)
///
/// Memory layout:
/// - origin: `vec2<f32>`        (8 bytes)
/// - size: `vec2<f32>`          (8 bytes)
/// - corner_radius: f32         (4 bytes)
/// - border_width: f32          (4 bytes)
/// - shadow_sigma: f32          (4 bytes)
/// - flags: u32                 (4 bytes) - capability bits | texture slot << 16
/// - fill_color: `vec4<f32>`    (16 bytes)
/// - border_color: `vec4<f32>`  (16 bytes)
/// - tex_coords: `vec4<f32>`    (16 bytes) - (u_min, v_min, u_max, v_max)
/// - shadow: `vec4<f32>`        (16 bytes) - (offset_x, offset_y, spread, 0)
/// - shadow_color: `vec4<f32>`  (16 bytes)
/// Total: 112 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuQuad {
    pub origin: [f32; 2],
    pub size: [f32; 2],
    pub corner_radius: f32,
    pub border_width: f32,
    pub shadow_sigma: f32,
    pub flags: u32,
    pub fill_color: [f32; 4],
    pub border_color: [f32; 4],
    pub tex_coords: [f32; 4],
    pub shadow: [f32; 4],
    pub shadow_color: [f32; 4],
}

impl From<&QuadInstance> for GpuQuad {
    fn from(quad: &QuadInstance) -> Self {
        let mut flags = 0;
        let mut gpu = GpuQuad {
            origin: [quad.origin.x, quad.origin.y],
            size: [quad.size.width, quad.size.height],
            corner_radius: quad.corner_radius,
            fill_color: quad.fill_color.to_array(),
            tex_coords: [0.0, 0.0, 1.0, 1.0],
            ..bytemuck::Zeroable::zeroed()
        };

        if let Some(border) = quad.border {
            flags |= quad_flags::BORDER;
            gpu.border_width = border.width;
            gpu.border_color = border.color.to_array();
        }

        if let Some(shadow) = quad.shadow {
            flags |= quad_flags::SHADOW;
            if shadow.corner_aware {
                flags |= quad_flags::SHADOW_CORNER_AWARE;
            }
            gpu.shadow_sigma = shadow.sigma;
            gpu.shadow = [shadow.offset.x, shadow.offset.y, shadow.spread, 0.0];
            gpu.shadow_color = shadow.color.to_array();
        }

        if let Some(tex) = quad.texture {
            flags |= quad_flags::TEXTURE;
            if tex.mode == TextureMode::Glyph {
                flags |= quad_flags::GLYPH;
            }
            if tex.texture > quad_flags::MAX_TEXTURE_INDEX {
                tracing::warn!(
                    "Texture slot {} exceeds {}, clamped",
                    tex.texture,
                    quad_flags::MAX_TEXTURE_INDEX
                );
            }
            let slot = tex.texture.min(quad_flags::MAX_TEXTURE_INDEX);
            flags |= slot << quad_flags::TEXTURE_INDEX_SHIFT;
            gpu.tex_coords = [tex.uv_min.x, tex.uv_min.y, tex.uv_max.x, tex.uv_max.y];
        }

        gpu.flags = flags;
        gpu
    }
}

impl GpuQuad {
    pub fn has(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }

    pub fn texture_index(&self) -> u32 {
        self.flags >> quad_flags::TEXTURE_INDEX_SHIFT
    }

    /// Rebuild the instance this record was flattened from
    pub fn to_instance(&self) -> QuadInstance {
        let border = self.has(quad_flags::BORDER).then(|| Border {
            width: self.border_width,
            color: Color::from_array(self.border_color),
        });

        let shadow = self.has(quad_flags::SHADOW).then(|| BoxShadow {
            sigma: self.shadow_sigma,
            offset: Vec2::new(self.shadow[0], self.shadow[1]),
            spread: self.shadow[2],
            color: Color::from_array(self.shadow_color),
            corner_aware: self.has(quad_flags::SHADOW_CORNER_AWARE),
        });

        let texture = self.has(quad_flags::TEXTURE).then(|| {
            let mode = if self.has(quad_flags::GLYPH) {
                TextureMode::Glyph
            } else {
                TextureMode::Image
            };
            TextureMapping::atlas(self.texture_index(), self.tex_coords, mode)
        });

        QuadInstance {
            origin: Point::new(self.origin[0], self.origin[1]),
            size: Size::new(self.size[0], self.size[1]),
            corner_radius: self.corner_radius,
            fill_color: Color::from_array(self.fill_color),
            border,
            shadow,
            texture,
        }
    }
}
