//! Gaussian box shadows
//!
//! A blurred rectangle mask has a closed form: the 2D Gaussian is separable,
//! so the blurred box is the product of two 1D Gaussian CDF differences. The
//! CDF needs `erf`, which is replaced by a cheap rational approximation
//! (max error around 5e-4, plenty for a visual blur).
//!
//! Rounded corners break separability. [`rounded_box_shadow`] keeps the
//! closed form horizontally, with a per-row extent that follows the corner
//! arc, and integrates vertically with a fixed midpoint rule. The default of
//! [`DEFAULT_SHADOW_SAMPLES`] steps is an approximation on purpose: raising it
//! changes the look of every rounded shadow.

use std::f32::consts::{FRAC_1_SQRT_2, PI};

use sheen_core::{Point, Vec2};

use crate::sdf::sd_rounded_rect;

/// Vertical integration steps for rounded shadows
pub const DEFAULT_SHADOW_SAMPLES: u32 = 4;

/// Half-width of the vertical integration window, in standard deviations
const INTEGRATION_SPAN_SIGMAS: f32 = 3.0;

// Abramowitz & Stegun 7.1.27 with the cubic term dropped
const ERF_A1: f32 = 0.278393;
const ERF_A2: f32 = 0.230389;
const ERF_A4: f32 = 0.078108;

/// Rational approximation of the error function
///
/// `sign(x) * (1 - 1 / (1 + a1|x| + a2|x|^2 + a4|x|^4)^4)`
pub fn erf_approx(x: f32) -> f32 {
    let s = if x < 0.0 { -1.0 } else { 1.0 };
    let a = x.abs();
    let p = 1.0 + (ERF_A1 + (ERF_A2 + ERF_A4 * a * a) * a) * a;
    let p2 = p * p;
    s - s / (p2 * p2)
}

/// Normalized Gaussian density
pub fn gaussian(x: f32, sigma: f32) -> f32 {
    if !(sigma > 0.0) {
        return 0.0;
    }
    (-(x * x) / (2.0 * sigma * sigma)).exp() / ((2.0 * PI).sqrt() * sigma)
}

/// Blurred coverage of the axis-aligned box `[lower, upper]` at `point`
///
/// Separable closed form. `sigma <= 0` (or NaN) gives the hard box mask.
pub fn box_shadow(lower: Point, upper: Point, point: Point, sigma: f32) -> f32 {
    if !(sigma > 0.0) {
        return hard_axis(lower.x, upper.x, point.x) * hard_axis(lower.y, upper.y, point.y);
    }

    let k = FRAC_1_SQRT_2 / sigma;
    blurred_axis(lower.x, upper.x, point.x, k) * blurred_axis(lower.y, upper.y, point.y, k)
}

/// Blurred coverage of a rounded box with corner radius `corner`
///
/// The vertical Gaussian integral runs over `[-3σ, 3σ]`, clipped to the box
/// extent relative to `point`, in `samples` equal midpoint steps (0 is treated
/// as 1). `sigma <= 0` gives the hard rounded-rect mask.
pub fn rounded_box_shadow(
    lower: Point,
    upper: Point,
    point: Point,
    sigma: f32,
    corner: f32,
    samples: u32,
) -> f32 {
    let center = Point::new((lower.x + upper.x) * 0.5, (lower.y + upper.y) * 0.5);
    let half = (upper - lower) * 0.5;

    if !(sigma > 0.0) {
        let d = sd_rounded_rect(point, center, half, corner);
        return if d < 0.0 { 1.0 } else { 0.0 };
    }

    let p = point - center;
    let low = p.y - half.y;
    let high = p.y + half.y;
    let span = INTEGRATION_SPAN_SIGMAS * sigma;
    // GLSL clamp order so an inverted box stays finite
    let start = (-span).max(low).min(high);
    let end = span.max(low).min(high);

    let n = samples.max(1);
    let step = (end - start) / n as f32;
    let mut y = start + step * 0.5;
    let mut value = 0.0;
    for _ in 0..n {
        value += row_coverage(p.x, p.y - y, sigma, corner, half) * gaussian(y, sigma) * step;
        y += step;
    }
    value
}

/// Horizontal blurred coverage of one row of a rounded box
fn row_coverage(x: f32, y: f32, sigma: f32, corner: f32, half: Vec2) -> f32 {
    let delta = (half.y - corner - y.abs()).min(0.0);
    let curved = half.x - corner + (corner * corner - delta * delta).max(0.0).sqrt();
    let k = FRAC_1_SQRT_2 / sigma;
    0.5 * (erf_approx((x + curved) * k) - erf_approx((x - curved) * k))
}

fn blurred_axis(lower: f32, upper: f32, p: f32, k: f32) -> f32 {
    0.5 * (erf_approx((p - lower) * k) - erf_approx((p - upper) * k))
}

/// Zero-blur limit of [`blurred_axis`]: 1 inside, 1/2 on an edge, 0 outside
fn hard_axis(lower: f32, upper: f32, p: f32) -> f32 {
    if p > lower && p < upper {
        1.0
    } else if lower < upper && (p == lower || p == upper) {
        0.5
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOWER: Point = Point::new(0.0, 0.0);
    const UPPER: Point = Point::new(100.0, 60.0);

    fn center() -> Point {
        Point::new(50.0, 30.0)
    }

    #[test]
    fn test_erf_reference_values() {
        assert_eq!(erf_approx(0.0), 0.0);
        for (x, expected) in [(0.5, 0.5205), (1.0, 0.8427), (2.0, 0.9953), (3.0, 1.0)] {
            assert!((erf_approx(x) - expected).abs() < 1e-3, "erf({})", x);
            assert!((erf_approx(-x) + expected).abs() < 1e-3, "erf(-{})", x);
        }
        assert_eq!(erf_approx(1.0e20), 1.0);
    }

    #[test]
    fn test_erf_is_monotonic() {
        let mut prev = erf_approx(-4.0);
        for i in -39..=40 {
            let v = erf_approx(i as f32 * 0.1);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_gaussian_integrates_to_one() {
        let sigma = 2.0;
        let step = 0.01;
        let mut sum = 0.0;
        let mut x = -20.0;
        while x < 20.0 {
            sum += gaussian(x, sigma) * step;
            x += step;
        }
        assert!((sum - 1.0).abs() < 1e-3);
        assert_eq!(gaussian(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_hard_edge_limit() {
        let c = box_shadow(LOWER, UPPER, center(), 1e-4);
        assert!((c - 1.0).abs() < 1e-4);

        // Mid-edge on each side approaches one half
        for edge in [
            Point::new(0.0, 30.0),
            Point::new(100.0, 30.0),
            Point::new(50.0, 0.0),
            Point::new(50.0, 60.0),
        ] {
            let c = box_shadow(LOWER, UPPER, edge, 1e-4);
            assert!((c - 0.5).abs() < 1e-3, "edge {:?} -> {}", edge, c);
        }
    }

    #[test]
    fn test_zero_sigma_matches_hard_mask() {
        for (p, expected) in [
            (center(), 1.0),
            (Point::new(1.0, 1.0), 1.0),
            (Point::new(99.5, 59.5), 1.0),
            (Point::new(-1.0, 30.0), 0.0),
            (Point::new(50.0, 61.0), 0.0),
            (Point::new(1000.0, 1000.0), 0.0),
        ] {
            assert_eq!(box_shadow(LOWER, UPPER, p, 0.0), expected, "{:?}", p);
            assert_eq!(box_shadow(LOWER, UPPER, p, -3.0), expected, "{:?}", p);
            assert_eq!(box_shadow(LOWER, UPPER, p, f32::NAN), expected, "{:?}", p);
        }
    }

    #[test]
    fn test_coverage_decreases_outward() {
        let sigma = 8.0;
        let directions = [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(-0.6, 0.8),
        ];
        for dir in directions {
            let mut prev = box_shadow(LOWER, UPPER, center(), sigma);
            for i in 1..=40 {
                let p = center() + dir * (i as f32 * 2.5);
                let c = box_shadow(LOWER, UPPER, p, sigma);
                assert!(c <= prev + 1e-6, "{:?} at step {}", dir, i);
                assert!((0.0..=1.0).contains(&c));
                prev = c;
            }
            assert!(prev < 1e-3);
        }
    }

    #[test]
    fn test_rounded_matches_hard_mask_at_zero_sigma() {
        let corner = 20.0;
        assert_eq!(rounded_box_shadow(LOWER, UPPER, center(), 0.0, corner, 4), 1.0);
        // The sharp corner is cut away by the rounding
        assert_eq!(rounded_box_shadow(LOWER, UPPER, Point::new(1.0, 1.0), 0.0, corner, 4), 0.0);
        assert_eq!(rounded_box_shadow(LOWER, UPPER, Point::new(1.0, 1.0), 0.0, 0.0, 4), 1.0);
    }

    #[test]
    fn test_rounded_center_near_full() {
        let c = rounded_box_shadow(LOWER, UPPER, center(), 0.01, 10.0, DEFAULT_SHADOW_SAMPLES);
        assert!((c - 1.0).abs() < 0.01, "{}", c);

        let c = rounded_box_shadow(LOWER, UPPER, center(), 4.0, 10.0, DEFAULT_SHADOW_SAMPLES);
        assert!((c - 1.0).abs() < 0.01, "{}", c);
    }

    #[test]
    fn test_rounded_decreases_horizontally() {
        let sigma = 6.0;
        let mut prev = rounded_box_shadow(LOWER, UPPER, center(), sigma, 12.0, 4);
        for i in 1..=40 {
            let p = Point::new(50.0 + i as f32 * 2.5, 30.0);
            let c = rounded_box_shadow(LOWER, UPPER, p, sigma, 12.0, 4);
            assert!(c <= prev + 1e-6, "step {}", i);
            prev = c;
        }
        assert!(prev < 1e-3);
    }

    #[test]
    fn test_zero_corner_agrees_with_separable_form() {
        let sigma = 5.0;
        for p in [center(), Point::new(100.0, 30.0), Point::new(105.0, 62.0)] {
            let closed = box_shadow(LOWER, UPPER, p, sigma);
            let sampled = rounded_box_shadow(LOWER, UPPER, p, sigma, 0.0, 64);
            assert!((closed - sampled).abs() < 0.02, "{:?}: {} vs {}", p, closed, sampled);
        }
    }

    #[test]
    fn test_sample_count_is_tunable() {
        let p = Point::new(102.0, 2.0);
        let four = rounded_box_shadow(LOWER, UPPER, p, 6.0, 12.0, 4);
        let default = rounded_box_shadow(LOWER, UPPER, p, 6.0, 12.0, DEFAULT_SHADOW_SAMPLES);
        let many = rounded_box_shadow(LOWER, UPPER, p, 6.0, 12.0, 32);
        assert_eq!(four, default);
        assert_ne!(four, many);

        let none = rounded_box_shadow(LOWER, UPPER, p, 6.0, 12.0, 0);
        let one = rounded_box_shadow(LOWER, UPPER, p, 6.0, 12.0, 1);
        assert_eq!(none, one);
    }

    #[test]
    fn test_inverted_box_stays_finite() {
        let c = rounded_box_shadow(UPPER, LOWER, center(), 4.0, 5.0, 4);
        assert!(c.is_finite());
        let c = box_shadow(UPPER, LOWER, center(), 4.0);
        assert!(c.is_finite());
    }
}
