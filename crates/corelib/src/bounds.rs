//! Axis-aligned bounds and the oriented containment test.

use crate::{Transform, Vec3};

/// Slack added on both sides of every axis to absorb floating-point and
/// sampling error in containment queries.
const CONTAINS_MARGIN: f32 = 0.05;

/// Axis-aligned box in model space. Starts inverted (`+inf`/`-inf`) and only
/// ever widens as points are added; it never shrinks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Widen the box to include `point`.
    #[inline]
    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// True while no point has been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Oriented containment: does a world-space point fall inside this box
    /// carried by `transform`?
    ///
    /// The point is shifted into the object frame and projected onto the
    /// rotated basis axes; each projection is compared against the box extent
    /// scaled by that axis's scale factor. This is three dot products, not a
    /// full inverse transform, and is exact only while the basis stays
    /// orthonormal.
    pub fn contains_world_point(&self, transform: &Transform, point: Vec3) -> bool {
        let rel = point - transform.translation;
        let s = transform.scale;

        let d = rel.dot(transform.right());
        if d < self.min.x * s.x - CONTAINS_MARGIN || d > self.max.x * s.x + CONTAINS_MARGIN {
            return false;
        }
        let d = rel.dot(transform.up());
        if d < self.min.y * s.y - CONTAINS_MARGIN || d > self.max.y * s.y + CONTAINS_MARGIN {
            return false;
        }
        // front looks down -Z; the z extent of the box is measured along +Z.
        let d = -rel.dot(transform.front());
        if d < self.min.z * s.z - CONTAINS_MARGIN || d > self.max.z * s.z + CONTAINS_MARGIN {
            return false;
        }
        true
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3;

    #[test]
    fn grow_widens_per_axis() {
        let mut aabb = Aabb::EMPTY;
        assert!(aabb.is_empty());
        aabb.grow(vec3(-1.0, 0.0, 2.0));
        aabb.grow(vec3(1.0, 3.0, -2.0));
        aabb.grow(vec3(0.0, -1.0, 0.0));
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, vec3(-1.0, -1.0, -2.0));
        assert_eq!(aabb.max, vec3(1.0, 3.0, 2.0));
    }

    #[test]
    fn contains_at_identity_with_margin() {
        let aabb = Aabb {
            min: Vec3::ZERO,
            max: Vec3::ONE,
        };
        let t = Transform::identity();
        assert!(aabb.contains_world_point(&t, vec3(0.5, 0.5, 0.5)));
        // Just inside the 0.05 slack on one axis.
        assert!(aabb.contains_world_point(&t, vec3(1.04, 0.5, 0.5)));
        assert!(aabb.contains_world_point(&t, vec3(-0.04, 0.5, 0.5)));
        // Outside by more than the slack.
        assert!(!aabb.contains_world_point(&t, vec3(1.06, 0.5, 0.5)));
        assert!(!aabb.contains_world_point(&t, vec3(0.5, -0.06, 0.5)));
        assert!(!aabb.contains_world_point(&t, vec3(0.5, 0.5, 1.06)));
    }

    #[test]
    fn contains_translated() {
        let aabb = Aabb {
            min: vec3(-1.0, -1.0, -1.0),
            max: vec3(1.0, 1.0, 1.0),
        };
        let t = Transform::from_trs(vec3(5.0, 0.0, 0.0), Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains_world_point(&t, vec3(5.5, 0.0, 0.0)));
        assert!(!aabb.contains_world_point(&t, vec3(3.0, 0.0, 0.0)));
        assert!(!aabb.contains_world_point(&t, vec3(0.0, 0.0, 0.0)));
    }

    #[test]
    fn contains_scaled() {
        let aabb = Aabb {
            min: vec3(-1.0, -1.0, -1.0),
            max: vec3(1.0, 1.0, 1.0),
        };
        let t = Transform::from_trs(Vec3::ZERO, Vec3::ZERO, vec3(2.0, 1.0, 1.0));
        assert!(aabb.contains_world_point(&t, vec3(1.9, 0.0, 0.0)));
        assert!(!aabb.contains_world_point(&t, vec3(2.1, 0.0, 0.0)));
        // y is not scaled up.
        assert!(!aabb.contains_world_point(&t, vec3(0.0, 1.9, 0.0)));
    }

    #[test]
    fn contains_rotated_quarter_turn() {
        // Long axis along x; rotate 90 degrees about Y so it lies along z.
        let aabb = Aabb {
            min: vec3(-2.0, -1.0, -0.5),
            max: vec3(2.0, 1.0, 0.5),
        };
        let t = Transform::from_trs(
            Vec3::ZERO,
            vec3(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            Vec3::ONE,
        );
        assert!(aabb.contains_world_point(&t, vec3(0.0, 0.0, -1.5)));
        assert!(aabb.contains_world_point(&t, vec3(0.0, 0.0, 1.5)));
        // The formerly-long world x direction is now the short one.
        assert!(!aabb.contains_world_point(&t, vec3(1.5, 0.0, 0.0)));
    }
}
