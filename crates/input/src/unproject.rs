use cubescene_common::{Ray, RayError};
use glam::{Mat4, Vec2};

/// Errors from turning screen input into world-space queries.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("viewport must have a positive size, got {width}x{height}")]
    DegenerateViewport { width: f32, height: f32 },
    #[error("view-projection matrix is not invertible")]
    SingularViewProjection,
    #[error(transparent)]
    Ray(#[from] RayError),
}

/// Window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, InputError> {
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(InputError::DegenerateViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Pixel coordinates (origin top-left, y down) to normalized device
/// coordinates (origin center, y up, both in [-1, 1]).
pub fn screen_to_ndc(x: f32, y: f32, viewport: &Viewport) -> Vec2 {
    Vec2::new(
        2.0 * x / viewport.width - 1.0,
        1.0 - 2.0 * y / viewport.height,
    )
}

/// World-space ray through an NDC point: from the near plane toward the far
/// plane. Depth range is [0, 1], matching `perspective_rh`.
pub fn unproject(ndc: Vec2, inverse_view_projection: &Mat4) -> Result<Ray, InputError> {
    if !inverse_view_projection.is_finite() {
        return Err(InputError::SingularViewProjection);
    }
    let near = inverse_view_projection.project_point3(ndc.extend(0.0));
    let far = inverse_view_projection.project_point3(ndc.extend(1.0));
    Ok(Ray::new(near, far - near)?)
}

/// [`unproject`] from a view-projection matrix, inverting it first.
pub fn unproject_with(ndc: Vec2, view_projection: &Mat4) -> Result<Ray, InputError> {
    if view_projection.determinant().abs() <= f32::EPSILON * f32::EPSILON {
        return Err(InputError::SingularViewProjection);
    }
    unproject(ndc, &view_projection.inverse())
}
