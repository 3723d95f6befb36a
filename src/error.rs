//! Error types for the fallible edges of the crate.
//!
//! Stepping the simulation never fails; these cover loading configuration
//! and player commands that take untrusted input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse world config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f32),
    #[error("max_substeps must be at least 1")]
    NoSubsteps,
    #[error("world bounds are inverted on the {axis} axis ({min} > {max})")]
    InvertedBounds { axis: char, min: f32, max: f32 },
    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },
    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummonError {
    #[error("number of balls must be positive")]
    NotPositive,
    #[error("at most {max} balls can be summoned at once, asked for {requested}")]
    TooMany { requested: usize, max: usize },
}
