//! Rasterizer error types

use std::io;
use thiserror::Error;

/// Errors from host-side operations (framebuffers, output, configuration)
///
/// The per-sample kernel never fails; only the surrounding host code does.
#[derive(Error, Debug)]
pub enum RasterError {
    /// Framebuffer with a zero dimension
    #[error("Framebuffer must be non-empty, got {width}x{height}")]
    EmptyFramebuffer { width: u32, height: u32 },

    /// Pixel buffer did not match the framebuffer dimensions
    #[error("Pixel buffer of {len} bytes does not fit {width}x{height}")]
    BufferSize { width: u32, height: u32, len: usize },

    /// Image encoding or decoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// IO error when reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration value outside its valid range
    #[error("Invalid config value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Malformed configuration file
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RasterError>;
