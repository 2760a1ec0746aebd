//! Axis-aligned bounding boxes, the only collision primitive in the game.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Box bounded by `min` and `max` corners with `min <= max` componentwise.
///
/// Boundaries are inclusive: boxes that merely touch intersect, and points on
/// a face are contained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Lower corner.
    pub min: Vec3,
    /// Upper corner.
    pub max: Vec3,
}

impl Aabb {
    /// Builds a box from its corners.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all(), "inverted box {min:?}..{max:?}");
        Self { min, max }
    }

    /// Builds a box centred on `centre`.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec3;
    /// use grovefire::Aabb;
    /// let b = Aabb::from_centre(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.5, 1.0, 0.5));
    /// assert_eq!(b.min, Vec3::new(-0.5, 0.0, -0.5));
    /// assert_eq!(b.max, Vec3::new(0.5, 2.0, 0.5));
    /// ```
    #[must_use]
    pub fn from_centre(centre: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self::new(centre - half, centre + half)
    }

    /// Returns a copy moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Whether the two boxes overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Whether `point` lies inside the box or on its surface.
    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.min.cmple(point).all() && point.cmple(self.max).all()
    }

    /// Whether the `x`/`z` footprint widened by `margin` contains `point`.
    #[must_use]
    pub fn footprint_contains(&self, point: Vec3, margin: f32) -> bool {
        point.x >= self.min.x - margin
            && point.x <= self.max.x + margin
            && point.z >= self.min.z - margin
            && point.z <= self.max.z + margin
    }

    /// Centre of the box.
    #[must_use]
    pub fn centre(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn unit_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::from_centre(Vec3::new(x, y, z), Vec3::splat(0.5))
    }

    #[rstest]
    #[case(unit_at(0.5, 0.0, 0.0), true)]
    #[case(unit_at(1.0, 0.0, 0.0), true)]
    #[case(unit_at(1.01, 0.0, 0.0), false)]
    #[case(unit_at(0.0, -1.5, 0.0), false)]
    #[case(unit_at(0.0, 0.0, 0.99), true)]
    fn intersection_includes_touching_faces(#[case] other: Aabb, #[case] expected: bool) {
        let origin = unit_at(0.0, 0.0, 0.0);
        assert_eq!(origin.intersects(&other), expected);
        assert_eq!(other.intersects(&origin), expected);
    }

    #[rstest]
    #[case(Vec3::ZERO, true)]
    #[case(Vec3::new(0.5, 0.5, 0.5), true)]
    #[case(Vec3::new(0.5, 0.51, 0.5), false)]
    fn point_containment_is_inclusive(#[case] point: Vec3, #[case] expected: bool) {
        assert_eq!(unit_at(0.0, 0.0, 0.0).contains_point(point), expected);
    }

    #[test]
    fn translation_moves_both_corners() {
        let moved = unit_at(0.0, 0.0, 0.0).translated(Vec3::new(2.0, 0.0, -1.0));
        assert_eq!(moved.centre(), Vec3::new(2.0, 0.0, -1.0));
        assert_eq!(moved.max - moved.min, Vec3::ONE);
    }

    #[test]
    fn footprint_margin_ignores_height() {
        let roof = Aabb::new(Vec3::ZERO, Vec3::new(10.0, 50.0, 10.0));
        assert!(roof.footprint_contains(Vec3::new(-1.5, 200.0, 5.0), 2.0));
        assert!(!roof.footprint_contains(Vec3::new(-2.5, 0.0, 5.0), 2.0));
    }
}
