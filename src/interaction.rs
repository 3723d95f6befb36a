//! First-person interaction with balls: picking up, carrying, dropping,
//! throwing, and summoning new ones.

use glam::Vec3;
use log::debug;
use rand::Rng;

use crate::{
    config::{DEFAULT_HOLD_DISTANCE, DEFAULT_PICKUP_RANGE, DEFAULT_THROW_SPEED, MAX_SUMMON},
    error::SummonError,
    utils::{allocator::BodyHandle, math::VectorExt},
    world::PhysicsWorld,
};

/// Horizontal scatter around the summon point.
const SUMMON_SPREAD: f32 = 5.0;
const SUMMON_MIN_HEIGHT: f32 = 2.0;
const SUMMON_MAX_HEIGHT: f32 = 8.0;
/// Largest horizontal speed a summoned ball starts with.
const SUMMON_SPEED: f32 = 2.0;

/// Where the viewer stands and looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPose {
    pub eye: Vec3,
    /// Unit view direction.
    pub front: Vec3,
}

impl ViewPose {
    pub fn new(eye: Vec3, front: Vec3) -> Self {
        Self {
            eye,
            front: front.normalized(),
        }
    }
}

/// What a grab toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabAction {
    PickedUp(BodyHandle),
    Dropped(BodyHandle),
    Nothing,
}

/// The viewer's hand: holds at most one ball at a time.
#[derive(Debug, Clone)]
pub struct Hand {
    pub pickup_range: f32,
    pub throw_speed: f32,
    /// Distance in front of the eye a carried ball floats at.
    pub hold_distance: f32,
    held: Option<BodyHandle>,
}

impl Default for Hand {
    fn default() -> Self {
        Self {
            pickup_range: DEFAULT_PICKUP_RANGE,
            throw_speed: DEFAULT_THROW_SPEED,
            hold_distance: DEFAULT_HOLD_DISTANCE,
            held: None,
        }
    }
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Option<BodyHandle> {
        self.held
    }

    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    /// Closest free ball strictly within pickup range of `eye`.
    pub fn nearest_ball(&self, world: &PhysicsWorld, eye: Vec3) -> Option<BodyHandle> {
        let range_sq = self.pickup_range * self.pickup_range;
        world
            .balls()
            .filter(|(_, ball)| !ball.is_held())
            .map(|(handle, ball)| (handle, (ball.position - eye).magnitude_squared()))
            .filter(|&(_, dist_sq)| dist_sq < range_sq)
            .fold(None, |best: Option<(BodyHandle, f32)>, candidate| match best {
                Some((_, best_sq)) if best_sq <= candidate.1 => best,
                _ => Some(candidate),
            })
            .map(|(handle, _)| handle)
    }

    /// Drops the held ball, or picks up the nearest one if the hand is empty.
    pub fn toggle_grab(&mut self, world: &mut PhysicsWorld, eye: Vec3) -> GrabAction {
        self.forget_stale(world);

        if let Some(handle) = self.held.take() {
            if let Some(ball) = world.ball_mut(handle) {
                ball.set_held(false);
            }
            debug!("dropped ball {handle}");
            return GrabAction::Dropped(handle);
        }

        match self.nearest_ball(world, eye) {
            Some(handle) => {
                if let Some(ball) = world.ball_mut(handle) {
                    ball.set_held(true);
                }
                self.held = Some(handle);
                debug!("picked up ball {handle}");
                GrabAction::PickedUp(handle)
            }
            None => GrabAction::Nothing,
        }
    }

    /// Throws the held ball along `front`. Returns the thrown ball, if any.
    pub fn throw(&mut self, world: &mut PhysicsWorld, front: Vec3) -> Option<BodyHandle> {
        self.forget_stale(world);
        let handle = self.held.take()?;
        let velocity = front.normalized() * self.throw_speed;
        let thrown = world
            .ball_mut(handle)
            .is_some_and(|ball| ball.throw_ball(velocity));
        if thrown {
            debug!("threw ball {handle} at {velocity}");
        }
        thrown.then_some(handle)
    }

    /// Pins the held ball in front of the viewer. Call after each world
    /// update so the carried ball follows the camera.
    pub fn carry(&mut self, world: &mut PhysicsWorld, pose: &ViewPose) {
        self.forget_stale(world);
        let Some(handle) = self.held else {
            return;
        };
        if let Some(ball) = world.ball_mut(handle) {
            ball.position = pose.eye + pose.front * self.hold_distance;
        }
    }

    /// Lets go of a handle whose ball was removed or is no longer held.
    pub fn forget_stale(&mut self, world: &PhysicsWorld) {
        if let Some(handle) = self.held {
            let still_held = world.ball(handle).is_some_and(|ball| ball.is_held());
            if !still_held {
                self.held = None;
            }
        }
    }
}

/// Spawns `count` balls scattered around `around` at random heights, each
/// with a small random horizontal velocity. Returns their handles.
pub fn summon_balls(
    world: &mut PhysicsWorld,
    count: usize,
    around: Vec3,
) -> Result<Vec<BodyHandle>, SummonError> {
    if count == 0 {
        return Err(SummonError::NotPositive);
    }
    if count > MAX_SUMMON {
        return Err(SummonError::TooMany {
            requested: count,
            max: MAX_SUMMON,
        });
    }

    let mut handles = Vec::with_capacity(count);
    for _ in 0..count {
        let rng = world.rng_mut();
        let position = Vec3::new(
            around.x + rng.random_range(-SUMMON_SPREAD..=SUMMON_SPREAD),
            rng.random_range(SUMMON_MIN_HEIGHT..=SUMMON_MAX_HEIGHT),
            around.z + rng.random_range(-SUMMON_SPREAD..=SUMMON_SPREAD),
        );
        let velocity = Vec3::new(
            rng.random_range(-SUMMON_SPEED..=SUMMON_SPEED),
            0.0,
            rng.random_range(-SUMMON_SPEED..=SUMMON_SPEED),
        );

        let handle = world.create_ball(position);
        if let Some(ball) = world.body_mut(handle) {
            ball.velocity = velocity;
        }
        handles.push(handle);
    }
    debug!("summoned {count} balls around {around}");
    Ok(handles)
}
