use std::cmp::Ordering;

use glam::Vec3;

use crate::ModelId;

/// Errors from constructing a ray.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RayError {
    #[error("ray origin is not finite: {0:?}")]
    NonFiniteOrigin(Vec3),
    #[error("ray direction cannot be normalized: {0:?}")]
    DegenerateDirection(Vec3),
}

/// A half-line with a finite origin and a unit-length direction.
///
/// Fields are private so a zero-length direction can never reach the slab
/// test, where it would turn every comparison into NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self, RayError> {
        if !origin.is_finite() {
            return Err(RayError::NonFiniteOrigin(origin));
        }
        let direction = direction
            .try_normalize()
            .ok_or(RayError::DegenerateDirection(direction))?;
        Ok(Self { origin, direction })
    }

    /// Ray from `from` through `to`.
    pub fn through(from: Vec3, to: Vec3) -> Result<Self, RayError> {
        Self::new(from, to - from)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Componentwise `1 / direction`; zero components become +/- infinity.
    pub fn inv_direction(&self) -> Vec3 {
        self.direction.recip()
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// One model whose box a pick ray entered, with the entry distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub id: ModelId,
    pub distance: f32,
}

impl Hit {
    pub fn new(id: ModelId, distance: f32) -> Self {
        Self { id, distance }
    }

    /// Sort ascending by distance. Ties keep their relative order.
    pub fn sort_by_distance(hits: &mut [Hit]) {
        hits.sort_by(Self::cmp_distance);
    }

    /// The nearest hit, if any. The first of equally near hits wins.
    pub fn closest(hits: impl IntoIterator<Item = Hit>) -> Option<Hit> {
        hits.into_iter().min_by(Self::cmp_distance)
    }

    fn cmp_distance(a: &Hit, b: &Hit) -> Ordering {
        a.distance.total_cmp(&b.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_normalized() {
        let r = Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 4.0)).unwrap();
        assert!((r.direction().length() - 1.0).abs() < 1e-6);
        assert!((r.at(5.0) - Vec3::new(0.0, 3.0, 4.0)).length() < 1e-5);
    }

    #[test]
    fn zero_direction_is_rejected() {
        let err = Ray::new(Vec3::ONE, Vec3::ZERO).unwrap_err();
        assert!(matches!(err, RayError::DegenerateDirection(_)));
    }

    #[test]
    fn nan_direction_is_rejected() {
        let err = Ray::new(Vec3::ZERO, Vec3::new(f32::NAN, 1.0, 0.0)).unwrap_err();
        assert!(matches!(err, RayError::DegenerateDirection(_)));
    }

    #[test]
    fn infinite_origin_is_rejected() {
        let err = Ray::new(Vec3::new(f32::INFINITY, 0.0, 0.0), Vec3::X).unwrap_err();
        assert!(matches!(err, RayError::NonFiniteOrigin(_)));
    }

    #[test]
    fn through_points() {
        let r = Ray::through(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0)).unwrap();
        assert_eq!(r.direction(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn inverse_direction_of_axis_ray_is_infinite_off_axis() {
        let r = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
        let inv = r.inv_direction();
        assert_eq!(inv.x, 1.0);
        assert!(inv.y.is_infinite());
        assert!(inv.z.is_infinite());
    }

    #[test]
    fn closest_hit_prefers_zero_distance() {
        let hits = vec![
            Hit::new(ModelId::from("far"), 3.0),
            Hit::new(ModelId::from("inside"), 0.0),
            Hit::new(ModelId::from("near"), 1.0),
        ];
        let best = Hit::closest(hits).unwrap();
        assert_eq!(best.id.as_str(), "inside");
        assert_eq!(best.distance, 0.0);
    }

    #[test]
    fn closest_of_nothing_is_none() {
        assert!(Hit::closest(Vec::new()).is_none());
    }

    #[test]
    fn sort_by_distance_orders_ascending() {
        let mut hits = vec![
            Hit::new(ModelId::from("b"), 2.0),
            Hit::new(ModelId::from("a"), 1.0),
            Hit::new(ModelId::from("c"), 5.0),
        ];
        Hit::sort_by_distance(&mut hits);
        let ids: Vec<_> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
