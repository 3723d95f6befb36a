use glam::Vec3;
use log::{debug, trace};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Instant;

use crate::{
    collision::{
        boundary::{apply_bounds, WorldBounds},
        detection::{candidate_pairs, colliding},
        resolution::resolve_collision,
    },
    config::WorldConfig,
    core::{ball::Color, body::PhysicsBody},
    dynamics::integrator::{Integrator, StepParams},
    error::ConfigError,
    utils::{
        allocator::{Arena, BodyHandle},
        logging::ScopedTimer,
        profiling::StepStats,
    },
};

/// Owns every body in the room and advances them in fixed substeps.
///
/// Bodies are addressed through [`BodyHandle`]s; a handle stops resolving
/// once its body is removed or the world is cleared. Bodies keep their
/// insertion order, which is also the order collision pairs are visited in.
pub struct PhysicsWorld {
    bodies: Arena<PhysicsBody>,
    integrator: Integrator,
    config: WorldConfig,
    rng: StdRng,
    stats: StepStats,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Default room, seeded from the operating system.
    pub fn new() -> Self {
        Self::build(WorldConfig::default())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::build(WorldConfig::default().with_seed(seed))
    }

    pub fn from_config(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: WorldConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            bodies: Arena::new(),
            integrator: Integrator::new(config.time_step, config.max_substeps),
            config,
            rng,
            stats: StepStats::default(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    /// The world's random source: ball colors, contact jitter, summoning.
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Counters from the most recent [`PhysicsWorld::update`].
    pub fn last_step_stats(&self) -> &StepStats {
        &self.stats
    }

    pub fn add_body(&mut self, body: PhysicsBody) -> BodyHandle {
        let handle = self.bodies.insert(body);
        debug!("added body {handle} ({} total)", self.bodies.len());
        handle
    }

    /// Spawns a ball with a random bright color.
    pub fn create_ball(&mut self, position: Vec3) -> BodyHandle {
        let ball = PhysicsBody::ball(position, &mut self.rng);
        self.add_body(ball)
    }

    pub fn create_ball_with_color(&mut self, position: Vec3, color: Color) -> BodyHandle {
        self.add_body(PhysicsBody::ball_with_color(position, color))
    }

    /// Removes a body. Unknown or stale handles are ignored.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<PhysicsBody> {
        let removed = self.bodies.remove(handle);
        if removed.is_some() {
            debug!("removed body {handle} ({} left)", self.bodies.len());
        }
        removed
    }

    pub fn clear(&mut self) {
        debug!("clearing {} bodies", self.bodies.len());
        self.bodies.clear();
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&PhysicsBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut PhysicsBody> {
        self.bodies.get_mut(handle)
    }

    /// Like [`PhysicsWorld::body`], but only resolves balls.
    pub fn ball(&self, handle: BodyHandle) -> Option<&PhysicsBody> {
        self.body(handle).filter(|body| body.is_ball())
    }

    pub fn ball_mut(&mut self, handle: BodyHandle) -> Option<&mut PhysicsBody> {
        self.body_mut(handle).filter(|body| body.is_ball())
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    /// All bodies in insertion order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &PhysicsBody)> + '_ {
        self.bodies.iter()
    }

    pub fn balls(&self) -> impl Iterator<Item = (BodyHandle, &PhysicsBody)> + '_ {
        self.bodies.iter().filter(|(_, body)| body.is_ball())
    }

    pub fn handles(&self) -> Vec<BodyHandle> {
        self.bodies.handles().collect()
    }

    pub fn ball_handles(&self) -> Vec<BodyHandle> {
        self.balls().map(|(handle, _)| handle).collect()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn ball_count(&self) -> usize {
        self.balls().count()
    }

    pub fn gravity(&self) -> Vec3 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.config.gravity = gravity;
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.config.bounds
    }

    pub fn set_bounds(&mut self, bounds: WorldBounds) {
        self.config.bounds = bounds;
    }

    /// Sets the room to `[min_x, max_x] x [min_y, max_y] x [min_z, max_z]`.
    /// The floor is `min_y`. Bounds are taken as given.
    pub fn set_world_bounds(
        &mut self,
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
        min_z: f32,
        max_z: f32,
    ) {
        self.set_bounds(WorldBounds::new(min_x, max_x, min_y, max_y, min_z, max_z));
    }

    /// `[minX, maxX, minY, maxY, minZ, maxZ]`.
    pub fn world_bounds(&self) -> [f32; 6] {
        self.config.bounds.as_array()
    }

    pub fn set_ball_perturbation(&mut self, half_width: f32) {
        self.config.ball_perturbation = half_width.max(0.0);
    }

    pub fn step_params(&self) -> StepParams {
        StepParams {
            gravity: self.config.gravity,
            linear_drag: self.config.linear_drag,
            floor_height: self.config.bounds.floor(),
            ball_floor_clamp: self.config.ball_floor_clamp,
            resting_speed: self.config.resting_speed,
        }
    }

    /// Advances the simulation by `delta_time` seconds.
    ///
    /// Time is consumed in substeps of at most one fixed timestep, each one
    /// integrating all bodies, then resolving contacts, then enforcing the
    /// room bounds. At most `max_substeps` substeps run; any remaining time
    /// is dropped rather than carried into the next frame, so callers should
    /// clamp very long frames themselves.
    pub fn update(&mut self, delta_time: f32) {
        let started = Instant::now();
        self.stats.reset();
        let params = self.step_params();

        let mut plan = self.integrator.plan(delta_time);
        for step in plan.by_ref() {
            let _timer = ScopedTimer::new("substep");
            self.integrator.integrate_all(&mut self.bodies, step, &params);
            self.stats.contacts_resolved += self.handle_collisions();
            self.stats.boundary_hits += self.handle_world_boundaries();
            self.stats.substeps += 1;
            self.stats.simulated_time += step;
        }

        self.stats.dropped_time = plan.dropped_time();
        if self.stats.fell_behind() {
            trace!(
                "frame of {delta_time:.4}s exceeds substep budget, dropping {:.4}s",
                self.stats.dropped_time
            );
        }
        self.stats.elapsed = started.elapsed();
    }

    /// Tests every unordered pair once and resolves each overlap on the
    /// spot. Returns how many pairs received an impulse.
    pub fn handle_collisions(&mut self) -> usize {
        let _timer = ScopedTimer::new("collisions");
        let perturbation = self.config.ball_perturbation;
        let count = self.bodies.ordered_len();
        let mut resolved = 0;

        for (i, j) in candidate_pairs(count) {
            self.stats.pair_tests += 1;
            let Some((a, b)) = self.bodies.nth_pair_mut(i, j) else {
                continue;
            };
            if !colliding(a, b) {
                continue;
            }
            if resolve_collision(a, b, &mut self.rng, perturbation).is_resolved() {
                resolved += 1;
            }
        }
        resolved
    }

    /// Keeps every non-static body inside the room. Returns how many bodies
    /// touched a wall, the floor or the ceiling.
    pub fn handle_world_boundaries(&mut self) -> usize {
        let _timer = ScopedTimer::new("boundaries");
        let bounds = self.config.bounds;
        let resting_speed = self.config.resting_speed;
        let mut hits = 0;
        self.bodies.for_each_mut(|body| {
            if apply_bounds(body, &bounds, resting_speed) {
                hits += 1;
            }
        });
        hits
    }
}
