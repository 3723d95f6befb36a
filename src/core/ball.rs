//! Balls: the bodies the player summons, carries and throws.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use super::body::{BodyKind, PhysicsBody};
use crate::config::{
    BALL_FRICTION, BALL_MASS, BALL_RADIUS, BALL_RESTITUTION, BALL_SPIN_DAMPING, BALL_THROW_LIFT,
};

/// Process-wide ball counter. Only used for display.
static BALL_COUNT: AtomicU64 = AtomicU64::new(0);

/// Darkest value a random color channel can take.
const MIN_COLOR_CHANNEL: f32 = 0.3;

/// RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Random bright color: every channel drawn from `[0.3, 1.0]`.
    pub fn random_bright<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.random_range(MIN_COLOR_CHANNEL..=1.0),
            g: rng.random_range(MIN_COLOR_CHANNEL..=1.0),
            b: rng.random_range(MIN_COLOR_CHANNEL..=1.0),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Vec3> for Color {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Ball-only state carried by [`BodyKind::Ball`].
#[derive(Debug, Clone, PartialEq)]
pub struct BallState {
    pub color: Color,
    /// Held balls are frozen: integration skips them entirely.
    pub is_held: bool,
    /// Velocity multiplier applied after every integration step, in `(0, 1]`.
    pub spin_damping: f32,
    pub ball_id: u64,
}

impl BallState {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            is_held: false,
            spin_damping: BALL_SPIN_DAMPING,
            ball_id: BALL_COUNT.fetch_add(1, Ordering::Relaxed) + 1,
        }
    }
}

impl PhysicsBody {
    /// A ball with a random bright color.
    pub fn ball<R: Rng + ?Sized>(position: Vec3, rng: &mut R) -> Self {
        Self::ball_with_color(position, Color::random_bright(rng))
    }

    pub fn ball_with_color(position: Vec3, color: Color) -> Self {
        let mut body = Self::new(position, BALL_MASS, BALL_RADIUS);
        body.restitution = BALL_RESTITUTION;
        body.friction = BALL_FRICTION;
        body.kind = BodyKind::Ball(BallState::new(color));
        body
    }

    pub fn is_held(&self) -> bool {
        self.as_ball().is_some_and(|ball| ball.is_held)
    }

    pub fn color(&self) -> Option<Color> {
        self.as_ball().map(|ball| ball.color)
    }

    pub fn ball_id(&self) -> Option<u64> {
        self.as_ball().map(|ball| ball.ball_id)
    }

    /// Picks the ball up or lets go of it. Picking up kills all motion, so a
    /// dropped ball starts from rest. Returns false for non-ball bodies.
    pub fn set_held(&mut self, held: bool) -> bool {
        let Some(ball) = self.as_ball_mut() else {
            return false;
        };
        ball.is_held = held;
        if held {
            self.velocity = Vec3::ZERO;
            self.acceleration = Vec3::ZERO;
            self.force = Vec3::ZERO;
        }
        true
    }

    /// Releases a held ball with `velocity` plus a small upward lift.
    /// Does nothing unless the ball is currently held.
    pub fn throw_ball(&mut self, velocity: Vec3) -> bool {
        let Some(ball) = self.as_ball_mut() else {
            return false;
        };
        if !ball.is_held {
            return false;
        }
        ball.is_held = false;
        self.velocity = velocity;
        self.velocity.y += BALL_THROW_LIFT;
        true
    }

    /// Teleports the body and clears all motion. Held balls are released.
    pub fn reset_to_position(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
        self.acceleration = Vec3::ZERO;
        self.force = Vec3::ZERO;
        if let Some(ball) = self.as_ball_mut() {
            ball.is_held = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::integrator::StepParams;
    use rand::{rngs::StdRng, SeedableRng};

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn ball_defaults() {
        let mut rng = StdRng::seed_from_u64(1);
        let ball = PhysicsBody::ball(Vec3::new(0.0, 2.0, 0.0), &mut rng);

        assert_eq!(ball.mass, 0.5);
        assert_eq!(ball.radius, 0.25);
        assert_eq!(ball.restitution, 0.8);
        assert_eq!(ball.friction, 0.3);
        let state = ball.as_ball().expect("ball kind");
        assert_eq!(state.spin_damping, 0.95);
        assert!(!state.is_held);
        for channel in state.color.to_array() {
            assert!((0.3..=1.0).contains(&channel));
        }
    }

    #[test]
    fn ids_increase_monotonically() {
        let a = PhysicsBody::ball_with_color(Vec3::ZERO, Color::new(1.0, 0.0, 0.0));
        let b = PhysicsBody::ball_with_color(Vec3::ZERO, Color::new(0.0, 1.0, 0.0));
        assert!(b.ball_id().unwrap() > a.ball_id().unwrap());
    }

    #[test]
    fn held_ball_is_frozen() {
        let mut ball = PhysicsBody::ball_with_color(Vec3::new(1.0, 3.0, 1.0), Color::new(1.0, 1.0, 1.0));
        ball.velocity = Vec3::new(5.0, 5.0, 5.0);
        assert!(ball.set_held(true));
        assert_eq!(ball.velocity, Vec3::ZERO);

        ball.apply_force(Vec3::new(0.0, 10.0, 0.0));
        ball.update(DT);
        assert_eq!(ball.position, Vec3::new(1.0, 3.0, 1.0));
        assert_eq!(ball.velocity, Vec3::ZERO);
    }

    #[test]
    fn dropping_does_not_restore_momentum() {
        let mut ball = PhysicsBody::ball_with_color(Vec3::new(0.0, 3.0, 0.0), Color::new(1.0, 1.0, 1.0));
        ball.velocity = Vec3::new(3.0, 0.0, 0.0);
        ball.set_held(true);
        ball.set_held(false);
        assert_eq!(ball.velocity, Vec3::ZERO);
        assert!(!ball.is_held());
    }

    #[test]
    fn throw_requires_held_and_adds_lift() {
        let mut ball = PhysicsBody::ball_with_color(Vec3::ZERO, Color::new(1.0, 1.0, 1.0));
        assert!(!ball.throw_ball(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(ball.velocity, Vec3::ZERO);

        ball.set_held(true);
        assert!(ball.throw_ball(Vec3::new(10.0, 1.0, 0.0)));
        assert_eq!(ball.velocity, Vec3::new(10.0, 3.0, 0.0));
        assert!(!ball.is_held());
    }

    #[test]
    fn generic_bodies_reject_ball_actions() {
        let mut body = PhysicsBody::default();
        assert!(!body.set_held(true));
        assert!(!body.throw_ball(Vec3::X));
        assert!(!body.is_held());
        assert_eq!(body.color(), None);
    }

    #[test]
    fn spin_damping_compounds_after_drag() {
        let mut ball = PhysicsBody::ball_with_color(Vec3::new(0.0, 5.0, 0.0), Color::new(1.0, 1.0, 1.0));
        ball.velocity = Vec3::new(2.0, 0.0, 0.0);
        ball.update(DT);
        assert!((ball.velocity.x - 2.0 * 0.999 * 0.95).abs() < 1e-6);
    }

    #[test]
    fn floor_clamp_bounces_falling_ball() {
        let mut ball = PhysicsBody::ball_with_color(Vec3::new(0.0, 0.26, 0.0), Color::new(1.0, 1.0, 1.0));
        ball.velocity = Vec3::new(0.0, -4.0, 0.0);
        ball.update(DT);

        assert_eq!(ball.position.y, 0.25);
        assert!(ball.velocity.y > 0.0);
        let expected = (4.0 + 9.81 * DT) * 0.999 * 0.95 * 0.8;
        assert!((ball.velocity.y - expected).abs() < 1e-4);
    }

    #[test]
    fn floor_clamp_follows_floor_height_and_can_be_disabled() {
        let mut ball = PhysicsBody::ball_with_color(Vec3::new(0.0, -1.0, 0.0), Color::new(1.0, 1.0, 1.0));
        let raised = StepParams {
            floor_height: 2.0,
            ..StepParams::default()
        };
        ball.integrate(DT, &raised);
        assert_eq!(ball.position.y, 2.25);

        let mut free = PhysicsBody::ball_with_color(Vec3::new(0.0, 0.1, 0.0), Color::new(1.0, 1.0, 1.0));
        let unclamped = StepParams {
            ball_floor_clamp: false,
            ..StepParams::default()
        };
        free.integrate(DT, &unclamped);
        assert!(free.position.y < 0.1);
    }

    #[test]
    fn energy_motion_and_reset() {
        let mut ball = PhysicsBody::ball_with_color(Vec3::ZERO, Color::new(1.0, 1.0, 1.0));
        ball.velocity = Vec3::new(0.0, 2.0, 0.0);
        assert!(ball.is_moving());
        assert!((ball.kinetic_energy() - 1.0).abs() < 1e-6);

        ball.set_held(true);
        ball.reset_to_position(Vec3::new(0.0, 4.0, 0.0));
        assert!(!ball.is_moving());
        assert!(!ball.is_held());
        assert_eq!(ball.position, Vec3::new(0.0, 4.0, 0.0));
    }

    #[test]
    fn display_marks_held_balls() {
        let mut ball = PhysicsBody::ball_with_color(Vec3::new(1.0, 0.5, 0.0), Color::new(1.0, 1.0, 1.0));
        let id = ball.ball_id().unwrap();
        ball.set_held(true);
        assert_eq!(
            ball.to_string(),
            format!(
                "Ball {id} at (1.000000, 0.500000, 0.000000) with velocity (0.000000, 0.000000, 0.000000) (HELD)"
            )
        );
    }
}
