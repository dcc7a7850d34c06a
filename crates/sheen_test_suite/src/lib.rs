//! Sheen Visual Test Suite
//!
//! Headless visual regression tests for the Sheen CPU rasterizer.
//!
//! # Test Categories
//!
//! - **Shapes**: fills, rounded corners, overlap order
//! - **Borders**: border bands and their interaction with rounding
//! - **Shadows**: separable and corner-aware Gaussian shadows
//! - **Textures**: tinted images and glyph coverage masks
//! - **Layout**: horizontal box layouts built from nested containers
//!
//! Each case renders to `test_output/<category>_<name>.png` and is compared
//! against a reference image. Missing references are created from the output.

pub mod harness;
pub mod layout;
pub mod runner;
pub mod tests;

pub use harness::{TestContext, TestHarness, TestHarnessConfig, TestResult};
pub use runner::TestRunner;
