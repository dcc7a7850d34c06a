//! Per-frame uniform blocks
//!
//! Plain-old-data records for hosts that upload frame state to a GPU. The CPU
//! rasterizer reads the same values from [`Viewport`] and the camera matrix.

use sheen_core::Mat4;

use crate::coords::Viewport;

/// Uniform buffer for viewport information
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub viewport_size: [f32; 2],
    pub _padding: [f32; 2],
}

impl FrameUniforms {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport_size: [viewport.width, viewport.height],
            _padding: [0.0; 2],
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_size[0], self.viewport_size[1])
    }
}

/// Uniform buffer for the optional camera transform (column-major)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub camera: [[f32; 4]; 4],
}

impl From<Mat4> for CameraUniforms {
    fn from(m: Mat4) -> Self {
        Self { camera: m.cols }
    }
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Mat4::IDENTITY.into()
    }
}

impl CameraUniforms {
    pub fn matrix(&self) -> Mat4 {
        Mat4 { cols: self.camera }
    }
}
