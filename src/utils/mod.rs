//! Utility helpers: vector math, the body arena, logging and step statistics.

pub mod allocator;
pub mod logging;
pub mod math;
pub mod profiling;

pub use allocator::{Arena, BodyHandle};
pub use math::VectorExt;
pub use profiling::StepStats;
