//! Impulse-based response for overlapping sphere pairs.

use glam::Vec3;
use rand::Rng;

use super::detection::Contact;
use crate::core::body::PhysicsBody;

/// Fraction of the penetration removed per resolution.
pub const CORRECTION_PERCENT: f32 = 0.8;

/// Penetration tolerated without positional correction.
pub const CORRECTION_SLOP: f32 = 0.01;

/// What happened to a colliding pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOutcome {
    /// Already moving apart; nothing was changed.
    Separating,
    /// Neither body can move (combined inverse mass is zero).
    Immovable,
    Resolved { impulse: f32, correction: Vec3 },
}

impl CollisionOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, CollisionOutcome::Resolved { .. })
    }
}

/// Resolves one colliding pair in place.
///
/// Applies a restitution impulse along the contact normal (the lower of the
/// two restitutions wins), then pushes the bodies apart in proportion to
/// their inverse masses. Ball-ball pairs additionally receive a symmetric
/// random velocity kick drawn uniformly from `[-perturbation, perturbation]`
/// per axis; pass zero to keep the response deterministic.
///
/// Held balls take part as immovable obstacles: their motion state is
/// never touched, so a dropped ball starts from rest.
pub fn resolve_collision<R: Rng + ?Sized>(
    a: &mut PhysicsBody,
    b: &mut PhysicsBody,
    rng: &mut R,
    perturbation: f32,
) -> CollisionOutcome {
    let contact = Contact::between(a, b);
    let normal = contact.normal;

    let velocity_along_normal = (a.velocity - b.velocity).dot(normal);
    if velocity_along_normal > 0.0 {
        return CollisionOutcome::Separating;
    }

    let inv_mass_a = contact_inverse_mass(a);
    let inv_mass_b = contact_inverse_mass(b);
    let inv_mass_sum = inv_mass_a + inv_mass_b;
    if inv_mass_sum == 0.0 {
        return CollisionOutcome::Immovable;
    }

    let restitution = a.restitution.min(b.restitution);
    let impulse = -(1.0 + restitution) * velocity_along_normal / inv_mass_sum;
    let impulse_vec = normal * impulse;
    a.velocity += impulse_vec * inv_mass_a;
    b.velocity -= impulse_vec * inv_mass_b;

    let mut correction = Vec3::ZERO;
    if contact.penetration > 0.0 {
        correction = normal
            * (CORRECTION_PERCENT * (contact.penetration - CORRECTION_SLOP).max(0.0)
                / inv_mass_sum);
        a.position += correction * inv_mass_a;
        b.position -= correction * inv_mass_b;
    }

    if perturbation > 0.0 && a.is_ball() && b.is_ball() {
        let kick = Vec3::new(
            rng.random_range(-perturbation..=perturbation),
            rng.random_range(-perturbation..=perturbation),
            rng.random_range(-perturbation..=perturbation),
        );
        if inv_mass_a > 0.0 {
            a.velocity += kick;
        }
        if inv_mass_b > 0.0 {
            b.velocity -= kick;
        }
    }

    CollisionOutcome::Resolved {
        impulse,
        correction,
    }
}

fn contact_inverse_mass(body: &PhysicsBody) -> f32 {
    if body.is_held() {
        0.0
    } else {
        body.inverse_mass()
    }
}
