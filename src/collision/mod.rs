//! Collision handling: pair detection, impulse resolution and room bounds.

pub mod boundary;
pub mod detection;
pub mod resolution;

pub use boundary::WorldBounds;
pub use detection::Contact;
pub use resolution::{resolve_collision, CollisionOutcome};
