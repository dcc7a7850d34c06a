//! Edge anti-aliasing
//!
//! Maps a signed distance to a coverage value with a smooth falloff over a
//! fixed band, so shape edges are feathered without supersampling.

/// Width of the anti-aliasing band, in SDF units (one pixel)
pub const EDGE_BAND_WIDTH: f32 = 1.0;

/// Hermite smoothstep, as in WGSL/GLSL
///
/// A zero-width edge degrades to a hard step at `edge0`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Edge band coverage: 1 on the boundary, 0 at one band width or more away.
///
/// Symmetric in the sign of `distance`. NaN distances get no coverage.
pub fn edge_coverage(distance: f32) -> f32 {
    if distance.is_nan() {
        return 0.0;
    }
    1.0 - smoothstep(0.0, EDGE_BAND_WIDTH, distance.abs())
}

/// Coverage of the shape itself: the edge band feathers the inside of the
/// boundary, samples on or outside it are uncovered.
pub fn fill_coverage(distance: f32) -> f32 {
    if distance < 0.0 {
        1.0 - edge_coverage(distance)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_coverage_on_boundary() {
        assert_eq!(edge_coverage(0.0), 1.0);
        assert_eq!(edge_coverage(-0.0), 1.0);
    }

    #[test]
    fn test_falls_off_within_one_unit() {
        assert_eq!(edge_coverage(1.0), 0.0);
        assert_eq!(edge_coverage(-1.0), 0.0);
        assert_eq!(edge_coverage(7.5), 0.0);
        assert_eq!(edge_coverage(f32::INFINITY), 0.0);
        assert_eq!(edge_coverage(f32::NAN), 0.0);

        let half = edge_coverage(0.5);
        assert!((half - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_symmetric_and_monotonic() {
        let mut prev = edge_coverage(0.0);
        for i in 1..=20 {
            let d = i as f32 * 0.05;
            let c = edge_coverage(d);
            assert_eq!(c, edge_coverage(-d));
            assert!(c <= prev);
            assert!((0.0..=1.0).contains(&c));
            prev = c;
        }
    }

    #[test]
    fn test_fill_coverage() {
        assert_eq!(fill_coverage(-10.0), 1.0);
        assert_eq!(fill_coverage(0.0), 0.0);
        assert_eq!(fill_coverage(3.0), 0.0);
        assert!((fill_coverage(-0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_smoothstep_degenerate_edges() {
        assert_eq!(smoothstep(1.0, 1.0, 0.5), 0.0);
        assert_eq!(smoothstep(1.0, 1.0, 1.0), 1.0);
        assert_eq!(smoothstep(0.0, 2.0, 1.0), 0.5);
    }
}
