use cubescene_common::InputSnapshot;
use glam::{Mat4, Quat, Vec3};

/// Camera pitch below the horizon used when building a view from input.
const DEFAULT_PITCH_DEG: f32 = -30.0;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: InputSnapshot::default().camera_position,
            target: Vec3::ZERO,
            fov_degrees: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl RenderView {
    /// Eye at the input camera position, looking toward -Z rotated by the
    /// turn angle about +Y and pitched down.
    pub fn from_input(input: &InputSnapshot, aspect: f32) -> Self {
        let pitch = DEFAULT_PITCH_DEG.to_radians();
        let heading = Quat::from_rotation_y(input.turn_deg.to_radians());
        let forward = heading * Vec3::new(0.0, pitch.sin(), -pitch.cos());
        Self {
            eye: input.camera_position,
            target: input.camera_position + forward,
            aspect,
            ..Self::default()
        }
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
