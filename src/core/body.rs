use glam::Vec3;
use std::fmt;

use super::ball::BallState;
use crate::{
    collision::boundary::reflect_component,
    config::{BODY_FRICTION, BODY_RESTITUTION},
    dynamics::integrator::StepParams,
    utils::math::{format_vec3, VectorExt},
};

/// What kind of simulated object a body is.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyKind {
    Generic,
    Ball(BallState),
}

/// A non-rotating point-mass sphere.
///
/// Static bodies behave as infinite mass: forces and impulses are ignored
/// and their motion state stays zero. Inactive bodies are skipped by the
/// integrator and never collide.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Force accumulated since the last integration step.
    pub force: Vec3,
    pub mass: f32,
    pub restitution: f32,
    pub friction: f32,
    pub radius: f32,
    pub is_static: bool,
    pub is_active: bool,
    pub kind: BodyKind,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 1.0, 0.5)
    }
}

impl PhysicsBody {
    /// Creates a dynamic generic body at rest.
    ///
    /// `mass` is not validated; a non-positive mass produces non-finite
    /// motion once forces or impulses are applied.
    pub fn new(position: Vec3, mass: f32, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            force: Vec3::ZERO,
            mass,
            restitution: BODY_RESTITUTION,
            friction: BODY_FRICTION,
            radius,
            is_static: false,
            is_active: true,
            kind: BodyKind::Generic,
        }
    }

    pub fn apply_force(&mut self, force: Vec3) {
        if self.is_static {
            return;
        }
        self.force += force;
    }

    /// Instantaneous change in momentum, bypassing the force accumulator.
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        if self.is_static {
            return;
        }
        self.velocity += impulse / self.mass;
    }

    /// Zero for static bodies, `1 / mass` otherwise.
    pub fn inverse_mass(&self) -> f32 {
        if self.is_static {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Advances the body by `dt` with default step parameters.
    pub fn update(&mut self, dt: f32) {
        self.integrate(dt, &StepParams::default());
    }

    /// One explicit Euler step.
    ///
    /// Drag and ball spin damping are applied once per call, so their
    /// effective strength depends on how many substeps a frame is split
    /// into rather than on elapsed time.
    pub fn integrate(&mut self, dt: f32, params: &StepParams) {
        if !self.is_active || self.is_static || self.is_held() {
            return;
        }

        self.acceleration = self.force / self.mass;
        self.acceleration += params.gravity;
        self.velocity += self.acceleration * dt;
        self.velocity *= params.linear_drag;
        self.position += self.velocity * dt;
        self.force = Vec3::ZERO;

        if let Some(spin_damping) = self.as_ball().map(|ball| ball.spin_damping) {
            self.velocity *= spin_damping;
            if params.ball_floor_clamp {
                self.clamp_to_floor(params.floor_height, params.resting_speed);
            }
        }
    }

    fn clamp_to_floor(&mut self, floor: f32, resting_speed: f32) {
        let lowest = floor + self.radius;
        if self.position.y < lowest {
            self.position.y = lowest;
            if self.velocity.y < 0.0 {
                self.velocity.y =
                    reflect_component(self.velocity.y, self.restitution, resting_speed);
            }
        }
    }

    /// Sphere-sphere overlap test. Touching spheres do not collide.
    pub fn is_colliding_with(&self, other: &PhysicsBody) -> bool {
        if !self.is_active || !other.is_active {
            return false;
        }
        let reach = self.radius + other.radius;
        (self.position - other.position).magnitude_squared() < reach * reach
    }

    pub fn distance_to(&self, other: &PhysicsBody) -> f32 {
        (self.position - other.position).magnitude()
    }

    /// Making a body static freezes it in place.
    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
        if is_static {
            self.velocity = Vec3::ZERO;
            self.acceleration = Vec3::ZERO;
            self.force = Vec3::ZERO;
        }
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = restitution.clamp(0.0, 1.0);
    }

    pub fn set_friction(&mut self, friction: f32) {
        self.friction = friction.clamp(0.0, 1.0);
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        if self.is_static {
            return;
        }
        self.velocity = velocity;
    }

    pub fn is_ball(&self) -> bool {
        matches!(self.kind, BodyKind::Ball(_))
    }

    pub fn as_ball(&self) -> Option<&BallState> {
        match &self.kind {
            BodyKind::Ball(ball) => Some(ball),
            BodyKind::Generic => None,
        }
    }

    pub fn as_ball_mut(&mut self) -> Option<&mut BallState> {
        match &mut self.kind {
            BodyKind::Ball(ball) => Some(ball),
            BodyKind::Generic => None,
        }
    }

    /// Speed above 0.1 m/s.
    pub fn is_moving(&self) -> bool {
        self.velocity.magnitude() > 0.1
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }
}

impl fmt::Display for PhysicsBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            BodyKind::Ball(ball) => {
                write!(
                    f,
                    "Ball {} at {} with velocity {}",
                    ball.ball_id,
                    format_vec3(self.position),
                    format_vec3(self.velocity)
                )?;
                if ball.is_held {
                    f.write_str(" (HELD)")?;
                }
                Ok(())
            }
            BodyKind::Generic => write!(
                f,
                "Body at {} with velocity {}",
                format_vec3(self.position),
                format_vec3(self.velocity)
            ),
        }
    }
}
