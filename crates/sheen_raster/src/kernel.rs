//! Per-sample pipeline
//!
//! [`evaluate`] is the whole kernel for one sample: SDF, anti-aliasing,
//! region selection, texturing and shadow, in that order. It reads nothing but
//! its arguments, so any number of samples can be evaluated concurrently.

use sheen_core::{Color, Point, Size};

use crate::composite::{composite_with_shadow, Coverage};
use crate::config::RasterConfig;
use crate::instance::QuadInstance;

/// One sample position plus the texel already fetched for it
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SampleContext {
    /// Pixel-space position
    pub position: Point,
    /// Sampled texel for textured instances
    pub texel: Option<Color>,
}

impl SampleContext {
    pub fn at(position: Point) -> Self {
        Self {
            position,
            texel: None,
        }
    }

    pub fn with_texel(mut self, texel: Color) -> Self {
        self.texel = Some(texel);
        self
    }
}

/// Texture coordinate of `point` on a textured instance
///
/// The instance's uv rect is interpolated across the quad. Points outside the
/// quad extrapolate; the texture source clamps. Degenerate axes map to `uv_min`.
pub fn texture_coords(instance: &QuadInstance, point: Point) -> Option<Point> {
    let mapping = instance.texture?;
    let axis = |p: f32, origin: f32, extent: f32| {
        if extent > 0.0 {
            (p - origin) / extent
        } else {
            0.0
        }
    };
    let t = Point::new(
        axis(point.x, instance.origin.x, instance.size.width),
        axis(point.y, instance.origin.y, instance.size.height),
    );
    Some(mapping.uv_at(t))
}

/// Evaluate one pixel-space instance at one sample
pub fn evaluate(instance: &QuadInstance, sample: &SampleContext, config: &RasterConfig) -> Coverage {
    let instance = QuadInstance {
        size: Size::new(instance.size.width.max(0.0), instance.size.height.max(0.0)),
        ..*instance
    };
    composite_with_shadow(&instance, sample.position, sample.texel, config)
}
