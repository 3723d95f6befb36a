//! Time integration.

pub mod integrator;

pub use integrator::{Integrator, StepParams, SubstepPlan};
