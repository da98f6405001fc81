use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::Ray;

/// Axis-aligned bounding box stored as componentwise min/max corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// The box of the unit cube centered on the origin.
    pub const UNIT: Self = Self {
        min: Vec3::splat(-0.5),
        max: Vec3::splat(0.5),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point. `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        }))
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// True when `other` lies entirely inside `self` (boundaries included).
    pub fn contains(&self, other: &Self) -> bool {
        other.min.cmpge(self.min).all() && other.max.cmple(self.max).all()
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// World box of this local box under `matrix`: the eight corners are
    /// transformed and re-boxed.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let [first, rest @ ..] = self.corners().map(|c| matrix.transform_point3(c));
        rest.into_iter().fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        })
    }

    /// Slab test. Returns the entry distance along the ray, or `None` on a
    /// miss.
    ///
    /// The interval starts at `[0, inf)`, so a ray starting inside the box
    /// hits at distance `0.0`. Axis-parallel rays get infinite inverse
    /// components from IEEE division; `f32::max`/`f32::min` drop the NaN
    /// that appears when the origin sits exactly on a slab plane.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let origin = ray.origin();
        let inv = ray.inv_direction();
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let mut t0 = (self.min[axis] - origin[axis]) * inv[axis];
            let mut t1 = (self.max[axis] - origin[axis]) * inv[axis];
            if inv[axis] < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t0.max(t_min);
            t_max = t1.min(t_max);
            if t_max <= t_min {
                return None;
            }
        }

        Some(t_min)
    }
}
