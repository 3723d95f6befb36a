//! Ballpit – a fixed-step sphere physics core for a walkable ball room.
//!
//! Balls and generic spheres fall under gravity, bounce off each other with
//! impulse-based collision response and stay inside an axis-aligned room.
//! A first-person [`Hand`] can pick balls up, carry them and throw them.
//! Windowing, rendering and input are left to the embedding application,
//! which drives [`PhysicsWorld::update`] once per frame and reads body
//! positions back.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod interaction;
pub mod utils;
pub mod world;

pub use glam::Vec3;

pub use collision::{CollisionOutcome, Contact, WorldBounds};
pub use config::WorldConfig;
pub use crate::core::{BallState, BodyKind, Color, PhysicsBody};
pub use dynamics::{Integrator, StepParams};
pub use error::{ConfigError, SummonError};
pub use interaction::{summon_balls, GrabAction, Hand, ViewPose};
pub use utils::{BodyHandle, StepStats, VectorExt};
pub use world::PhysicsWorld;

use config::{INITIAL_BALLS, MAX_FRAME_DELTA};

/// High-level wrapper pairing a [`PhysicsWorld`] with the viewer's [`Hand`].
///
/// Mirrors one frame of the interactive loop: clamp the frame time, step
/// the world, then move the carried ball to the viewer.
pub struct Playground {
    world: PhysicsWorld,
    hand: Hand,
}

impl Playground {
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            world: PhysicsWorld::from_config(config)?,
            hand: Hand::new(),
        })
    }

    /// A playground with the opening handful of balls scattered around `around`.
    pub fn with_initial_scene(config: WorldConfig, around: Vec3) -> Result<Self, ConfigError> {
        let mut playground = Self::new(config)?;
        if let Err(err) = playground.summon(INITIAL_BALLS, around) {
            log::warn!("initial scene not populated: {err}");
        }
        Ok(playground)
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Advances one frame. Frame time is capped at [`MAX_FRAME_DELTA`].
    pub fn step(&mut self, frame_time: f32, pose: &ViewPose) {
        self.world.update(frame_time.min(MAX_FRAME_DELTA));
        self.hand.carry(&mut self.world, pose);
    }

    pub fn summon(&mut self, count: usize, around: Vec3) -> Result<Vec<BodyHandle>, SummonError> {
        summon_balls(&mut self.world, count, around)
    }

    pub fn toggle_grab(&mut self, pose: &ViewPose) -> GrabAction {
        self.hand.toggle_grab(&mut self.world, pose.eye)
    }

    pub fn throw(&mut self, pose: &ViewPose) -> Option<BodyHandle> {
        self.hand.throw(&mut self.world, pose.front)
    }

    /// Removes every body; the hand lets go of whatever it held.
    pub fn clear(&mut self) {
        self.world.clear();
        self.hand.forget_stale(&self.world);
    }

    /// One-line summary: ball count and whether a ball is held.
    pub fn status(&self) -> String {
        format!(
            "balls: {}, held ball: {}",
            self.world.ball_count(),
            if self.hand.is_holding() { "yes" } else { "no" }
        )
    }
}
