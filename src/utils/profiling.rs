use log::info;
use std::time::Duration;

/// Counters gathered over a single [`crate::PhysicsWorld::update`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct StepStats {
    pub substeps: u32,
    pub simulated_time: f32,
    /// Frame time left over once the substep budget ran out.
    pub dropped_time: f32,
    pub pair_tests: usize,
    pub contacts_resolved: usize,
    pub boundary_hits: usize,
    pub elapsed: Duration,
}

impl StepStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when the world could not keep up with the requested frame time.
    pub fn fell_behind(&self) -> bool {
        self.dropped_time > 0.0
    }

    pub fn report(&self, body_count: usize) {
        info!(
            "physics: {} bodies, {} substeps ({:.4}s simulated, {:.4}s dropped), {} pair tests, {} contacts, {} boundary hits, {:.3} ms",
            body_count,
            self.substeps,
            self.simulated_time,
            self.dropped_time,
            self.pair_tests,
            self.contacts_resolved,
            self.boundary_hits,
            self.elapsed.as_secs_f64() * 1000.0
        );
    }
}
