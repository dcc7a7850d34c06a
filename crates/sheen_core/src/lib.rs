//! Sheen Core Types
//!
//! Value types shared by the Sheen raster kernel and its hosts:
//!
//! - **Geometry**: `Point`, `Size`, `Rect`, `Vec2` and a column-major `Mat4`
//! - **Color**: linear RGBA with interpolation and 8-bit conversion
//!
//! All types are `Copy` and carry no identity; they are plain values that can
//! be shared freely between threads.
//!
//! # Example
//!
//! ```rust
//! use sheen_core::{Color, Point, Rect};
//!
//! let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
//! assert_eq!(rect.center(), Point::new(60.0, 45.0));
//!
//! let half_red = Color::lerp(&Color::TRANSPARENT, &Color::RED, 0.5);
//! assert_eq!(half_red.a, 0.5);
//! ```

pub mod color;
pub mod geometry;

pub use color::Color;
pub use geometry::{Mat4, Point, Rect, Size, Vec2};
