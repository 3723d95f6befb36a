//! Configuration for the ball room: defaults, and a serde-backed
//! [`WorldConfig`] that can be loaded from TOML.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{collision::boundary::WorldBounds, error::ConfigError};

/// Default gravity vector applied in the physics world (Y-up).
pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, -9.81, 0.0];

/// Fixed integration timestep (in seconds).
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Maximum number of substeps taken per `update` call.
pub const DEFAULT_MAX_SUBSTEPS: u32 = 4;

/// Velocity multiplier applied once per substep as air drag.
pub const DEFAULT_LINEAR_DRAG: f32 = 0.999;

/// Room bounds `[minX, maxX, minY, maxY, minZ, maxZ]`: 30x30 floor, 10m high.
pub const DEFAULT_WORLD_BOUNDS: [f32; 6] = [-15.0, 15.0, 0.0, 10.0, -15.0, 15.0];

/// Incoming speed below which a wall or floor contact stops the body instead
/// of bouncing it.
pub const DEFAULT_RESTING_SPEED: f32 = 0.25;

/// Half-width of the per-axis velocity jitter added to ball-ball contacts.
pub const DEFAULT_BALL_PERTURBATION: f32 = 0.05;

/// Largest frame delta the [`crate::Playground`] feeds the world.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Ball defaults.
pub const BALL_MASS: f32 = 0.5;
pub const BALL_RADIUS: f32 = 0.25;
pub const BALL_RESTITUTION: f32 = 0.8;
pub const BALL_FRICTION: f32 = 0.3;
pub const BALL_SPIN_DAMPING: f32 = 0.95;
/// Vertical velocity added to every throw.
pub const BALL_THROW_LIFT: f32 = 2.0;

/// Generic body defaults.
pub const BODY_RESTITUTION: f32 = 0.7;
pub const BODY_FRICTION: f32 = 0.5;

/// Player hand defaults.
pub const DEFAULT_PICKUP_RANGE: f32 = 3.0;
pub const DEFAULT_THROW_SPEED: f32 = 15.0;
pub const DEFAULT_HOLD_DISTANCE: f32 = 2.0;
pub const MAX_SUMMON: usize = 100;
pub const INITIAL_BALLS: usize = 5;

/// Tunables for a [`crate::PhysicsWorld`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub gravity: Vec3,
    pub bounds: WorldBounds,
    pub time_step: f32,
    pub max_substeps: u32,
    pub linear_drag: f32,
    /// Balls run their own floor clamp right after integrating.
    pub ball_floor_clamp: bool,
    pub resting_speed: f32,
    /// Zero disables the ball-ball jitter entirely.
    pub ball_perturbation: f32,
    /// Seed for the world's random source; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::from_array(DEFAULT_GRAVITY),
            bounds: WorldBounds::default(),
            time_step: DEFAULT_TIME_STEP,
            max_substeps: DEFAULT_MAX_SUBSTEPS,
            linear_drag: DEFAULT_LINEAR_DRAG,
            ball_floor_clamp: true,
            resting_speed: DEFAULT_RESTING_SPEED,
            ball_perturbation: DEFAULT_BALL_PERTURBATION,
            seed: None,
        }
    }
}

impl WorldConfig {
    /// Parses and validates a TOML document. Missing keys take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = toml::from_str(source)?;
        config.validate()?;
        log::debug!("loaded world config: {config:?}");
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Deterministic setup for tests: fixed seed, no ball jitter.
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ball_perturbation: 0.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::InvalidTimeStep(self.time_step));
        }
        if self.max_substeps == 0 {
            return Err(ConfigError::NoSubsteps);
        }
        self.bounds.validate()?;
        if !(0.0..=1.0).contains(&self.linear_drag) {
            return Err(ConfigError::OutOfUnitRange {
                name: "linear_drag",
                value: self.linear_drag,
            });
        }
        if self.resting_speed < 0.0 {
            return Err(ConfigError::Negative {
                name: "resting_speed",
                value: self.resting_speed,
            });
        }
        if self.ball_perturbation < 0.0 {
            return Err(ConfigError::Negative {
                name: "ball_perturbation",
                value: self.ball_perturbation,
            });
        }
        Ok(())
    }
}
