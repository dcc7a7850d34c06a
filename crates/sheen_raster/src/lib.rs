//! Sheen Raster Kernel
//!
//! Per-sample coverage and compositing for anti-aliased quads.
//!
//! # Features
//!
//! - **SDF Primitives**: Rounded rectangles with exact signed distance
//! - **Anti-aliasing**: One-pixel smoothstep edge band, no supersampling
//! - **Shadows**: Gaussian box shadows via an error function approximation,
//!   closed form or corner-aware with a fixed-sample vertical integral
//! - **Compositing**: Fill, border, texture and glyph tinting in one pass
//! - **Reference host**: A rayon-parallel CPU rasterizer that drives the
//!   kernel over a framebuffer in submission order
//!
//! The kernel functions (`sdf`, `aa`, `shadow`, `composite`, `kernel`) are
//! pure and never fail: malformed instances degrade to deterministic output.
//!
//! # Example
//!
//! ```rust
//! use sheen_core::{Color, Point};
//! use sheen_raster::{evaluate, QuadInstance, RasterConfig, SampleContext};
//!
//! let quad = QuadInstance::new(0.0, 0.0, 100.0, 50.0).with_color(Color::RED);
//! let config = RasterConfig::default();
//!
//! let inside = evaluate(&quad, &SampleContext::at(Point::new(50.0, 25.0)), &config);
//! assert_eq!(inside.color, Color::RED);
//!
//! let outside = evaluate(&quad, &SampleContext::at(Point::new(1000.0, 1000.0)), &config);
//! assert_eq!(outside.coverage, 0.0);
//! ```

pub mod aa;
pub mod composite;
pub mod config;
pub mod coords;
pub mod error;
pub mod framebuffer;
pub mod instance;
pub mod kernel;
pub mod raster;
pub mod sdf;
pub mod shadow;
pub mod texture;
pub mod uniforms;

pub use aa::{edge_coverage, fill_coverage, smoothstep};
pub use composite::{composite, over, shadow_layer, Coverage};
pub use config::RasterConfig;
pub use coords::{
    map, ndc_to_pixels, pixel_camera, pixels_to_ndc, place, quad_bounds, to_pixel_space,
    unit_quad, CoordinateSpace, QuadVertex, Viewport, QUAD_INDICES,
};
pub use error::RasterError;
pub use framebuffer::Framebuffer;
pub use instance::{
    quad_flags, shadow_presets, Border, BoxShadow, GpuQuad, QuadInstance, TextureMapping,
    TextureMode,
};
pub use kernel::{evaluate, texture_coords, SampleContext};
pub use raster::Rasterizer;
pub use sdf::{clamp_corner_radius, sd_rect, sd_rounded_rect};
pub use shadow::{box_shadow, erf_approx, gaussian, rounded_box_shadow, DEFAULT_SHADOW_SAMPLES};
pub use texture::{ImageTextures, NoTextures, TextureSource};
pub use uniforms::{CameraUniforms, FrameUniforms};
