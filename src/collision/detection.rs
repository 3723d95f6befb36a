//! Narrow-phase sphere tests and exhaustive pair enumeration.
//!
//! There is no broad phase: every unordered pair is tested once per
//! substep, so the cost grows with the square of the body count.

use glam::Vec3;

use crate::{core::body::PhysicsBody, utils::math::VectorExt};

/// Geometry of an overlapping pair, seen from body A.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from B's center towards A's center. Zero when the
    /// centers coincide.
    pub normal: Vec3,
    pub distance: f32,
    /// Overlap depth; positive while the spheres interpenetrate.
    pub penetration: f32,
}

impl Contact {
    pub fn between(a: &PhysicsBody, b: &PhysicsBody) -> Self {
        let offset = a.position - b.position;
        let distance = offset.magnitude();
        Self {
            normal: offset.normalized(),
            distance,
            penetration: (a.radius + b.radius) - distance,
        }
    }
}

/// Both bodies active and center distance strictly below the radius sum.
#[inline]
pub fn colliding(a: &PhysicsBody, b: &PhysicsBody) -> bool {
    a.is_colliding_with(b)
}

/// Every unordered index pair `(i, j)` with `i < j`, in enumeration order.
pub fn candidate_pairs(count: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..count).flat_map(move |i| (i + 1..count).map(move |j| (i, j)))
}

/// Number of pairs [`candidate_pairs`] yields for `count` bodies.
pub fn pair_count(count: usize) -> usize {
    count * count.saturating_sub(1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_unique_and_ordered() {
        let pairs: Vec<_> = candidate_pairs(4).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert_eq!(pairs.len(), pair_count(4));
        assert_eq!(candidate_pairs(1).count(), 0);
        assert_eq!(pair_count(0), 0);
    }

    #[test]
    fn contact_normal_points_from_b_to_a() {
        let a = PhysicsBody::new(Vec3::new(0.0, 1.0, 0.0), 1.0, 0.5);
        let b = PhysicsBody::new(Vec3::new(0.0, 0.2, 0.0), 1.0, 0.5);
        let contact = Contact::between(&a, &b);

        assert_eq!(contact.normal, Vec3::Y);
        assert!((contact.penetration - 0.2).abs() < 1e-6);
        assert!(colliding(&a, &b));
    }

    #[test]
    fn coincident_centers_give_zero_normal() {
        let a = PhysicsBody::new(Vec3::ONE, 1.0, 0.5);
        let b = PhysicsBody::new(Vec3::ONE, 1.0, 0.5);
        let contact = Contact::between(&a, &b);
        assert_eq!(contact.normal, Vec3::ZERO);
        assert_eq!(contact.penetration, 1.0);
    }
}
