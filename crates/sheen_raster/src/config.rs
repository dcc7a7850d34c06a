//! Rasterizer configuration
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! coordinate_space = "centered"
//! shadow_samples = 8
//! background = { r = 1.0, g = 1.0, b = 1.0, a = 1.0 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sheen_core::Color;

use crate::coords::CoordinateSpace;
use crate::error::{RasterError, Result};
use crate::shadow::DEFAULT_SHADOW_SAMPLES;

/// Configuration shared by the kernel and the CPU rasterizer
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RasterConfig {
    /// Convention instance positions are expressed in
    pub coordinate_space: CoordinateSpace,
    /// Vertical integration steps for corner-aware shadows
    pub shadow_samples: u32,
    /// Color outside every shape (and outside the AA band)
    pub background: Color,
    /// Exponent applied to glyph coverage; 1.0 leaves it linear
    ///
    /// Must be finite and positive.
    pub glyph_gamma: f32,
    /// Rasterize rows on the rayon thread pool
    pub parallel: bool,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            coordinate_space: CoordinateSpace::Pixels,
            shadow_samples: DEFAULT_SHADOW_SAMPLES,
            background: Color::TRANSPARENT,
            glyph_gamma: 1.0,
            parallel: true,
        }
    }
}

impl RasterConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the kernel cannot evaluate without producing NaN
    pub fn validate(&self) -> Result<()> {
        if !(self.glyph_gamma.is_finite() && self.glyph_gamma > 0.0) {
            return Err(RasterError::InvalidConfig {
                field: "glyph_gamma",
                reason: format!("expected a finite positive exponent, got {}", self.glyph_gamma),
            });
        }
        Ok(())
    }

    /// Load a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded raster config from {}", path.display());
        Ok(config)
    }

    pub fn with_coordinate_space(mut self, space: CoordinateSpace) -> Self {
        self.coordinate_space = space;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_shadow_samples(mut self, samples: u32) -> Self {
        self.shadow_samples = samples;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RasterConfig::default();
        assert_eq!(config.coordinate_space, CoordinateSpace::Pixels);
        assert_eq!(config.shadow_samples, 4);
        assert_eq!(config.background, Color::TRANSPARENT);
        assert_eq!(config.glyph_gamma, 1.0);
        assert!(config.parallel);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(RasterConfig::from_toml_str("").unwrap(), RasterConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = RasterConfig::from_toml_str(
            r#"
            coordinate_space = "centered"
            shadow_samples = 8
            background = { r = 1.0, g = 1.0, b = 1.0, a = 1.0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.coordinate_space, CoordinateSpace::Centered);
        assert_eq!(config.shadow_samples, 8);
        assert_eq!(config.background, Color::WHITE);
        assert_eq!(config.glyph_gamma, 1.0);
    }

    #[test]
    fn test_invalid_toml() {
        let err = RasterConfig::from_toml_str("shadow_samples = \"many\"").unwrap_err();
        assert!(matches!(err, RasterError::Config(_)));

        let err = RasterConfig::load("/nonexistent/sheen.toml").unwrap_err();
        assert!(matches!(err, RasterError::Io(_)));
    }

    #[test]
    fn test_rejects_non_positive_glyph_gamma() {
        for text in ["glyph_gamma = 0.0", "glyph_gamma = -1.0", "glyph_gamma = nan"] {
            let err = RasterConfig::from_toml_str(text).unwrap_err();
            assert!(
                matches!(err, RasterError::InvalidConfig { field: "glyph_gamma", .. }),
                "{text}: {err}"
            );
        }
        assert_eq!(RasterConfig::from_toml_str("glyph_gamma = 2.2").unwrap().glyph_gamma, 2.2);
        assert!(RasterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RasterConfig::default()
            .with_coordinate_space(CoordinateSpace::Centered)
            .with_shadow_samples(16)
            .sequential();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(RasterConfig::from_toml_str(&text).unwrap(), config);
    }
}
