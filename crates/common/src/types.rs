use std::fmt;
use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::Ray;

/// Stable identifier of a model in the scene tree.
///
/// Used for animation bookkeeping and reported back by picking. Backed by an
/// `Arc<str>` so rebuilding the tree every tick only bumps a refcount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModelId(Arc<str>);

impl ModelId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build a child id by appending a path segment: `parent/segment`.
    pub fn child(&self, segment: &str) -> Self {
        Self::new(format!("{}/{segment}", self.0))
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// Local transform of a node relative to its parent.
///
/// The local matrix is `T(translation) * T(pivot) * R * S * T(-pivot)`, so
/// rotation and scale happen about the pivot rather than the origin.
/// Rotation is given as Euler angles in degrees and composed as
/// `Rz * Ry * Rx`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trs {
    pub translation: Vec3,
    pub pivot: Vec3,
    pub rotation_deg: Vec3,
    pub scale: Vec3,
}

impl Default for Trs {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            pivot: Vec3::ZERO,
            rotation_deg: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Trs {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    pub fn with_pivot(mut self, pivot: Vec3) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_rotation_deg(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation_deg = Vec3::new(x, y, z);
        self
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotation as a quaternion, equivalent to `Rz * Ry * Rx`.
    pub fn rotation(&self) -> Quat {
        let r = self.rotation_deg;
        Quat::from_rotation_z(r.z.to_radians())
            * Quat::from_rotation_y(r.y.to_radians())
            * Quat::from_rotation_x(r.x.to_radians())
    }

    pub fn rotation_matrix(&self) -> Mat4 {
        let r = self.rotation_deg;
        Mat4::from_rotation_z(r.z.to_radians())
            * Mat4::from_rotation_y(r.y.to_radians())
            * Mat4::from_rotation_x(r.x.to_radians())
    }

    /// Local-to-parent matrix. Zero scale yields a singular matrix; that is
    /// accepted and simply collapses the geometry.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_translation(self.pivot)
            * self.rotation_matrix()
            * Mat4::from_scale(self.scale)
            * Mat4::from_translation(-self.pivot)
    }
}

/// Latest input values handed to the core. Only the newest snapshot matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    pub camera_position: Vec3,
    /// Heading in degrees around +Y.
    pub turn_deg: f32,
    /// Movement per second in world units, applied once per fixed tick.
    pub movement: Vec3,
    pub pick_ray: Option<Ray>,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            camera_position: Vec3::new(0.0, 10.0, 15.0),
            turn_deg: 0.0,
            movement: Vec3::ZERO,
            pick_ray: None,
        }
    }
}
