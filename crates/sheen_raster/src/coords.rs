//! Coordinate mapping
//!
//! Instances are placed by scaling a unit quad by `size` and translating it by
//! `origin`. The placed position is optionally transformed by a camera matrix
//! and finally expressed in normalized device coordinates.
//!
//! Two conventions are supported:
//!
//! - [`CoordinateSpace::Pixels`]: top-left origin, one unit per pixel, y down.
//!   NDC is `2 * p / viewport - 1` per axis.
//! - [`CoordinateSpace::Centered`]: positions are already NDC, origin at the
//!   screen center, both axes in `[-1, 1]`.
//!
//! Corner radius, border width and shadow parameters stay in pixels under
//! both conventions.
//!
//! NDC is y-down in both conventions: `y = -1` is the top edge of the screen,
//! matching pixel rows. Hosts targeting a y-up clip space negate y when they
//! write clip positions; the unit quad keeps texture `(0, 0)` at its top-left.
//!
//! A camera acts on placed positions in the instance's own convention, so a
//! `Centered` camera translates in NDC units. [`pixel_camera`] re-expresses it
//! for hosts that rasterize in pixels.

use serde::{Deserialize, Serialize};
use sheen_core::{Mat4, Point, Rect, Size};

use crate::instance::QuadInstance;

/// Which convention instance positions are expressed in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSpace {
    /// NDC with the origin at the screen center
    Centered,
    /// Pixels from the top-left corner
    #[default]
    Pixels,
}

/// Render target size in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Both dimensions strictly positive
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

impl From<Size> for Viewport {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Pixel position to NDC. A zero (or negative) viewport axis maps to 0.
pub fn pixels_to_ndc(p: Point, viewport: Viewport) -> Point {
    let axis = |v: f32, extent: f32| {
        if extent > 0.0 {
            2.0 * v / extent - 1.0
        } else {
            0.0
        }
    };
    Point::new(axis(p.x, viewport.width), axis(p.y, viewport.height))
}

/// NDC to pixel position, the inverse of [`pixels_to_ndc`]
pub fn ndc_to_pixels(ndc: Point, viewport: Viewport) -> Point {
    Point::new(
        (ndc.x + 1.0) * 0.5 * viewport.width,
        (ndc.y + 1.0) * 0.5 * viewport.height,
    )
}

/// Scale a unit-quad position by the instance size, then translate by its origin
pub fn place(local: Point, instance: &QuadInstance) -> Point {
    Point::new(
        instance.origin.x + local.x * instance.size.width,
        instance.origin.y + local.y * instance.size.height,
    )
}

/// Map a unit-quad position of `instance` to NDC
pub fn map(
    local: Point,
    instance: &QuadInstance,
    viewport: Viewport,
    camera: Option<&Mat4>,
    space: CoordinateSpace,
) -> Point {
    let mut p = place(local, instance);
    if let Some(camera) = camera {
        p = camera.transform_point(p);
    }
    match space {
        CoordinateSpace::Pixels => pixels_to_ndc(p, viewport),
        CoordinateSpace::Centered => p,
    }
}

/// Camera that acts on pixel-space positions the way `camera` acts on
/// positions placed in `space`
///
/// `Pixels` cameras are returned unchanged. `Centered` cameras are wrapped as
/// `ndc_to_pixels * camera * pixels_to_ndc`, so that
/// `ndc_to_pixels(map(..))` and the pixel-space host agree.
pub fn pixel_camera(camera: &Mat4, space: CoordinateSpace, viewport: Viewport) -> Mat4 {
    match space {
        CoordinateSpace::Pixels => *camera,
        CoordinateSpace::Centered => {
            let (hw, hh) = (viewport.width * 0.5, viewport.height * 0.5);
            let recip = |h: f32| if h > 0.0 { 1.0 / h } else { 0.0 };
            let to_pixels = Mat4::translation(hw, hh, 0.0).mul(&Mat4::scale(hw, hh, 1.0));
            let to_ndc = Mat4::scale(recip(hw), recip(hh), 1.0).mul(&Mat4::translation(-hw, -hh, 0.0));
            to_pixels.mul(camera).mul(&to_ndc)
        }
    }
}

/// Unit quad vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

/// Two triangles over the unit quad: (0, 1, 2) and (0, 2, 3)
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Unit quad corners in the given convention
///
/// ```text
/// 0   3
/// +---+
/// |\  |
/// | \ |
/// |  \|
/// +---+
/// 1   2
/// ```
///
/// `Pixels` spans `[0, 1]` so that `origin` is the top-left corner; `Centered`
/// spans `[-0.5, 0.5]` so that `origin` is the center. Texture coordinates
/// are `(0, 0)` at corner 0 in both.
pub fn unit_quad(space: CoordinateSpace) -> [QuadVertex; 4] {
    let shift = match space {
        CoordinateSpace::Pixels => 0.0,
        CoordinateSpace::Centered => -0.5,
    };
    [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]].map(|uv| QuadVertex {
        position: [uv[0] + shift, uv[1] + shift],
        tex_coords: uv,
    })
}

/// Express `instance` in pixel units with a top-left origin
///
/// Only the placement changes; radius, border and shadow are already pixels.
pub fn to_pixel_space(
    instance: &QuadInstance,
    space: CoordinateSpace,
    viewport: Viewport,
) -> QuadInstance {
    match space {
        CoordinateSpace::Pixels => *instance,
        CoordinateSpace::Centered => {
            let center = ndc_to_pixels(instance.origin, viewport);
            let size = Size::new(
                instance.size.width * 0.5 * viewport.width,
                instance.size.height * 0.5 * viewport.height,
            );
            QuadInstance {
                origin: Point::new(center.x - size.width * 0.5, center.y - size.height * 0.5),
                size,
                ..*instance
            }
        }
    }
}

/// Pixel-space rect a host must cover to draw `instance` (already in pixels)
///
/// A shadow grows the rect by `3σ + |offset.x| + |offset.y|` plus any positive
/// spread, which contains everything the blur can reach.
pub fn quad_bounds(instance: &QuadInstance) -> Rect {
    let rect = instance.rect();
    match instance.shadow {
        Some(shadow) => {
            let blur = if shadow.sigma > 0.0 { shadow.sigma * 3.0 } else { 0.0 };
            let expand =
                blur + shadow.offset.x.abs() + shadow.offset.y.abs() + shadow.spread.max(0.0);
            rect.outset(expand)
        }
        None => rect,
    }
}
