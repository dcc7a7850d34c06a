//! Region compositing
//!
//! Turns a signed distance into a color. Region priority is fixed: the inner
//! fill wins over the border band, which wins over the background. The edge
//! band then feathers the selected region toward whatever is underneath.
//!
//! All colors here are straight alpha. Layers are combined with [`over`].

use sheen_core::{Color, Point};

use crate::aa::{edge_coverage, fill_coverage};
use crate::config::RasterConfig;
use crate::instance::{QuadInstance, TextureMode};
use crate::sdf::{clamp_corner_radius, sd_rect};
use crate::shadow::{box_shadow, rounded_box_shadow};

/// Output of one sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coverage {
    /// Final straight-alpha color
    pub color: Color,
    /// How much of the sample the shape covers, in `[0, 1]`
    pub coverage: f32,
}

impl Coverage {
    pub fn new(color: Color, coverage: f32) -> Self {
        Self { color, coverage }
    }

    /// Nothing drawn: the background with zero coverage
    pub fn background(config: &RasterConfig) -> Self {
        Self::new(config.background, 0.0)
    }
}

/// Straight-alpha source-over
pub fn over(top: Color, bottom: Color) -> Color {
    if top.a >= 1.0 || bottom.a <= 0.0 {
        return top;
    }
    if top.a <= 0.0 {
        return bottom;
    }
    let t = top.premultiplied();
    let b = bottom.premultiplied();
    let k = 1.0 - t.a;
    Color::rgba(t.r + b.r * k, t.g + b.g * k, t.b + b.b * k, t.a + b.a * k).unpremultiplied()
}

/// Color of the region `distance` falls in, before edge feathering
fn region_color(
    distance: f32,
    instance: &QuadInstance,
    texel: Option<Color>,
    config: &RasterConfig,
) -> Color {
    let tint = instance.fill_color;

    if let Some(texture) = instance.texture {
        let Some(texel) = texel else {
            return tint;
        };
        return match texture.mode {
            TextureMode::Image => texel.modulate(&tint),
            TextureMode::Glyph => {
                let gamma = config.glyph_gamma;
                let coverage = if gamma == 1.0 || !(gamma.is_finite() && gamma > 0.0) {
                    texel.a
                } else {
                    texel.a.max(0.0).powf(gamma)
                };
                tint.with_alpha(tint.a * coverage)
            }
        };
    }

    match instance.border {
        // The border occupies the band `-width <= distance < 0`
        Some(border) if distance >= -border.width.max(0.0) => border.color,
        _ => tint,
    }
}

/// The shape alone on a transparent background
fn shape_layer(
    distance: f32,
    instance: &QuadInstance,
    texel: Option<Color>,
    config: &RasterConfig,
) -> (Color, f32) {
    let coverage = fill_coverage(distance);
    if coverage <= 0.0 {
        return (Color::TRANSPARENT, 0.0);
    }
    let region = region_color(distance, instance, texel, config);
    (region.with_alpha(region.a * coverage), coverage)
}

/// Composite one shape sample over the configured background
///
/// `distance < -border_width` selects the fill (or texture), `distance < 0` the
/// border, anything else the background. Inside the shape the edge band blends
/// the region toward the background; for an opaque region this is exactly
/// `lerp(region, background, edge_coverage(distance))`.
pub fn composite(
    distance: f32,
    instance: &QuadInstance,
    texel: Option<Color>,
    config: &RasterConfig,
) -> Coverage {
    if !(distance < 0.0) {
        return Coverage::background(config);
    }
    if edge_coverage(distance) <= 0.0 {
        let region = region_color(distance, instance, texel, config);
        return Coverage::new(over(region, config.background), 1.0);
    }
    let (layer, coverage) = shape_layer(distance, instance, texel, config);
    Coverage::new(over(layer, config.background), coverage)
}

/// Shadow color at `point`, or transparent when the instance has no shadow
///
/// The shadow rect is the instance rect moved by the shadow offset and grown
/// by its spread. `shape_coverage` masks the shadow out underneath the shape.
pub fn shadow_layer(
    instance: &QuadInstance,
    point: Point,
    shape_coverage: f32,
    config: &RasterConfig,
) -> Color {
    let Some(shadow) = instance.shadow else {
        return Color::TRANSPARENT;
    };

    let rect = instance
        .rect()
        .offset(shadow.offset.x, shadow.offset.y)
        .outset(shadow.spread);
    // Sharp shapes keep sharp shadows; rounded ones grow their radius with the spread
    let corner = if instance.corner_radius > 0.0 {
        clamp_corner_radius(instance.corner_radius + shadow.spread, rect.size)
    } else {
        0.0
    };

    let coverage = if shadow.corner_aware && corner > 0.0 {
        rounded_box_shadow(
            rect.min(),
            rect.max(),
            point,
            shadow.sigma,
            corner,
            config.shadow_samples,
        )
    } else {
        box_shadow(rect.min(), rect.max(), point, shadow.sigma)
    };

    let mask = (1.0 - shape_coverage).clamp(0.0, 1.0);
    let alpha = shadow.color.a * coverage.clamp(0.0, 1.0) * mask;
    shadow.color.with_alpha(alpha)
}

/// Full shape + shadow composite at a pixel-space point
pub(crate) fn composite_with_shadow(
    instance: &QuadInstance,
    point: Point,
    texel: Option<Color>,
    config: &RasterConfig,
) -> Coverage {
    let rect = instance.rect();
    let distance = sd_rect(point, &rect, instance.corner_radius);

    if instance.shadow.is_none() {
        return composite(distance, instance, texel, config);
    }

    let (layer, coverage) = shape_layer(distance, instance, texel, config);
    let shadow = shadow_layer(instance, point, coverage, config);
    let color = over(layer, over(shadow, config.background));
    Coverage::new(color, coverage)
}
