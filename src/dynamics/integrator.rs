use glam::Vec3;

use crate::{
    config::{
        DEFAULT_GRAVITY, DEFAULT_LINEAR_DRAG, DEFAULT_MAX_SUBSTEPS, DEFAULT_RESTING_SPEED,
        DEFAULT_TIME_STEP,
    },
    core::body::PhysicsBody,
    utils::allocator::Arena,
};

/// Parameters shared by every body during one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    pub gravity: Vec3,
    /// Velocity multiplier applied once per step.
    pub linear_drag: f32,
    /// Floor used by the ball's own floor clamp.
    pub floor_height: f32,
    pub ball_floor_clamp: bool,
    pub resting_speed: f32,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            gravity: Vec3::from_array(DEFAULT_GRAVITY),
            linear_drag: DEFAULT_LINEAR_DRAG,
            floor_height: 0.0,
            ball_floor_clamp: true,
            resting_speed: DEFAULT_RESTING_SPEED,
        }
    }
}

/// Splits frame time into fixed substeps and steps bodies through them.
#[derive(Debug, Clone)]
pub struct Integrator {
    pub time_step: f32,
    pub max_substeps: u32,
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_STEP, DEFAULT_MAX_SUBSTEPS)
    }
}

impl Integrator {
    pub fn new(time_step: f32, max_substeps: u32) -> Self {
        let time_step = if time_step > 0.0 {
            time_step
        } else {
            DEFAULT_TIME_STEP
        };
        Self {
            time_step,
            max_substeps: max_substeps.max(1),
        }
    }

    /// Substep lengths for a frame of `dt` seconds.
    ///
    /// Each step is at most `time_step` long, the last one takes whatever is
    /// left. Once `max_substeps` steps are planned the remainder is dropped
    /// and the simulation runs slower than real time.
    pub fn plan(&self, dt: f32) -> SubstepPlan {
        SubstepPlan {
            remaining: dt,
            time_step: self.time_step,
            substeps_left: self.max_substeps,
        }
    }

    /// Longest frame the world can simulate without dropping time.
    pub fn max_frame_time(&self) -> f32 {
        self.time_step * self.max_substeps as f32
    }

    pub fn integrate_all(&self, bodies: &mut Arena<PhysicsBody>, dt: f32, params: &StepParams) {
        bodies.for_each_mut(|body| body.integrate(dt, params));
    }
}

/// Iterator over the substep lengths of one frame.
#[derive(Debug, Clone)]
pub struct SubstepPlan {
    remaining: f32,
    time_step: f32,
    substeps_left: u32,
}

impl SubstepPlan {
    /// Time that will not be simulated once the plan is exhausted.
    pub fn dropped_time(&self) -> f32 {
        if self.substeps_left == 0 {
            self.remaining.max(0.0)
        } else {
            0.0
        }
    }
}

impl Iterator for SubstepPlan {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        // NaN frame times simulate nothing.
        if self.remaining.is_nan() || self.remaining <= 0.0 || self.substeps_left == 0 {
            return None;
        }
        let step = self.remaining.min(self.time_step);
        self.remaining -= step;
        self.substeps_left -= 1;
        Some(step)
    }
}
