//! Simulated bodies: the generic sphere and its ball variant.

pub mod ball;
pub mod body;

pub use ball::{BallState, Color};
pub use body::{BodyKind, PhysicsBody};
