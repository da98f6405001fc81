use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Per-frame scalars and the camera matrix, laid out for a uniform buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Column-major view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Simulated seconds, drives shader-side animation.
    pub phase: f32,
    pub aspect: f32,
    _pad: [f32; 2],
}

impl FrameUniforms {
    pub fn new(view_proj: Mat4, phase: f32, aspect: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            phase,
            aspect,
            _pad: [0.0; 2],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
