//! Vector helpers layered on top of `glam`.
//!
//! `glam::Vec3` already covers the arithmetic the simulation needs. The
//! helpers here pin down the few places where the simulation wants a
//! different rule than glam's defaults, most importantly normalisation of
//! near-zero vectors.

use glam::Vec3;

/// Magnitude at or below which a vector is treated as having no direction.
pub const NORMALIZE_EPSILON: f32 = 1e-4;

/// Direction constants (Y-up, right-handed, camera looks down -Z).
pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const DOWN: Vec3 = Vec3::new(0.0, -1.0, 0.0);
pub const LEFT: Vec3 = Vec3::new(-1.0, 0.0, 0.0);
pub const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);
pub const BACK: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Extra vector operations used throughout the physics core.
pub trait VectorExt: Sized {
    fn magnitude(self) -> f32;

    /// Squared length, for comparisons that don't need the square root.
    fn magnitude_squared(self) -> f32;

    /// Unit vector in the same direction, or zero when the magnitude is at
    /// most [`NORMALIZE_EPSILON`]. Never produces NaN.
    fn normalized(self) -> Self;

    /// In-place variant of [`VectorExt::normalized`]. Leaves near-zero
    /// vectors untouched.
    fn normalize_in_place(&mut self);

    /// True when the magnitude is strictly below `epsilon`.
    fn is_zero(self, epsilon: f32) -> bool;

    fn is_near_zero(self) -> bool {
        self.is_zero(NORMALIZE_EPSILON)
    }
}

impl VectorExt for Vec3 {
    #[inline]
    fn magnitude(self) -> f32 {
        self.length()
    }

    #[inline]
    fn magnitude_squared(self) -> f32 {
        self.length_squared()
    }

    fn normalized(self) -> Self {
        let mag = self.length();
        if mag > NORMALIZE_EPSILON {
            self / mag
        } else {
            Vec3::ZERO
        }
    }

    fn normalize_in_place(&mut self) {
        let mag = self.length();
        if mag > NORMALIZE_EPSILON {
            *self /= mag;
        }
    }

    #[inline]
    fn is_zero(self, epsilon: f32) -> bool {
        self.length() < epsilon
    }
}

/// Formats a vector as `(x, y, z)` with six decimals.
pub fn format_vec3(v: Vec3) -> String {
    format!("({:.6}, {:.6}, {:.6})", v.x, v.y, v.z)
}
