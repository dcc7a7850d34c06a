//! Signed distance functions
//!
//! Distances are negative inside a shape, zero on its boundary and positive
//! outside, measured in the units of the sample position (pixels for every
//! host in this workspace).

use sheen_core::{Point, Rect, Size, Vec2};

/// Rounded rectangle SDF
///
/// `radius` is used as given. A radius larger than `min(half_size)` over-rounds
/// the shape; callers that want the usual clamp apply [`clamp_corner_radius`]
/// first.
pub fn sd_rounded_rect(sample: Point, center: Point, half_size: Vec2, radius: f32) -> f32 {
    let d = (sample - center).abs() - half_size + Vec2::splat(radius);
    d.max(Vec2::ZERO).length() - radius + d.max_element().min(0.0)
}

/// Rounded rectangle SDF for a top-left origin rect
pub fn sd_rect(sample: Point, rect: &Rect, radius: f32) -> f32 {
    sd_rounded_rect(sample, rect.center(), rect.size.half(), radius)
}

/// Clamp a corner radius to `[0, min(width, height) / 2]`
pub fn clamp_corner_radius(radius: f32, size: Size) -> f32 {
    radius.clamp(0.0, (size.min_side() * 0.5).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 50.0)
    }

    #[test]
    fn test_center_distance_is_min_half_extent() {
        let r = rect();
        assert_eq!(sd_rect(r.center(), &r, 0.0), -25.0);

        let tall = Rect::new(10.0, 10.0, 20.0, 80.0);
        assert_eq!(sd_rect(tall.center(), &tall, 0.0), -10.0);
    }

    #[test]
    fn test_sharp_corners_are_on_boundary() {
        let r = rect();
        for corner in [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(0.0, 50.0),
        ] {
            assert_eq!(sd_rect(corner, &r, 0.0), 0.0, "corner {:?}", corner);
        }
    }

    #[test]
    fn test_sign_convention() {
        let r = rect();
        assert!(sd_rect(Point::new(10.0, 10.0), &r, 0.0) < 0.0);
        assert_eq!(sd_rect(Point::new(50.0, 0.0), &r, 0.0), 0.0);
        assert_eq!(sd_rect(Point::new(110.0, 25.0), &r, 0.0), 10.0);
        // Diagonal distance from the corner
        assert_eq!(sd_rect(Point::new(103.0, 54.0), &r, 0.0), 5.0);
    }

    #[test]
    fn test_rounded_corner() {
        let r = rect();
        // The sharp corner lies outside the rounded shape
        let d = sd_rect(Point::new(0.0, 0.0), &r, 10.0);
        assert!((d - (2.0f32.sqrt() * 10.0 - 10.0)).abs() < 1e-4);

        // Edge midpoints are unaffected by rounding
        assert_eq!(sd_rect(Point::new(50.0, 0.0), &r, 10.0), 0.0);

        // A point on the corner arc
        let on_arc = Point::new(10.0 - 10.0 * 0.6, 10.0 - 10.0 * 0.8);
        assert!(sd_rect(on_arc, &r, 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_radius_is_not_clamped() {
        let r = Rect::new(0.0, 0.0, 20.0, 20.0);
        let over = sd_rect(r.center(), &r, 50.0);
        let clamped = sd_rect(r.center(), &r, clamp_corner_radius(50.0, r.size));
        assert_ne!(over, clamped);
        assert_eq!(clamp_corner_radius(50.0, r.size), 10.0);
        assert_eq!(clamp_corner_radius(-3.0, r.size), 0.0);
    }

    #[test]
    fn test_degenerate_size_is_finite() {
        let d = sd_rounded_rect(Point::new(1.0, 1.0), Point::ZERO, Vec2::new(-5.0, -5.0), 0.0);
        assert!(d.is_finite());
        assert!(d > 0.0);
    }
}
