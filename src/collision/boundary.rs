//! Axis-aligned room bounds and the response of bodies hitting them.

use serde::{Deserialize, Serialize};

use crate::{config::DEFAULT_WORLD_BOUNDS, core::body::PhysicsBody, error::ConfigError};

/// Height above the floor contact point still counted as standing on it.
pub const GROUND_CONTACT_TOLERANCE: f32 = 0.1;

/// Axis-aligned box the bodies live in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::from_array(DEFAULT_WORLD_BOUNDS)
    }
}

impl WorldBounds {
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        }
    }

    /// Builds bounds from `[minX, maxX, minY, maxY, minZ, maxZ]`.
    pub fn from_array(b: [f32; 6]) -> Self {
        Self::new(b[0], b[1], b[2], b[3], b[4], b[5])
    }

    pub fn as_array(&self) -> [f32; 6] {
        [
            self.min_x, self.max_x, self.min_y, self.max_y, self.min_z, self.max_z,
        ]
    }

    pub fn floor(&self) -> f32 {
        self.min_y
    }

    /// True when a sphere of `radius` at `position` fits inside on every axis.
    pub fn contains(&self, position: glam::Vec3, radius: f32) -> bool {
        position.x - radius >= self.min_x
            && position.x + radius <= self.max_x
            && position.y - radius >= self.min_y
            && position.y + radius <= self.max_y
            && position.z - radius >= self.min_z
            && position.z + radius <= self.max_z
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, min, max) in [
            ('x', self.min_x, self.max_x),
            ('y', self.min_y, self.max_y),
            ('z', self.min_z, self.max_z),
        ] {
            if min > max {
                return Err(ConfigError::InvertedBounds { axis, min, max });
            }
        }
        Ok(())
    }
}

/// Bounces a velocity component off a surface, scaled by `restitution`.
///
/// Contacts slower than `resting_speed` are stopped rather than reflected,
/// which keeps resting bodies from hopping by one gravity step forever.
#[inline]
pub fn reflect_component(velocity: f32, restitution: f32, resting_speed: f32) -> f32 {
    if velocity.abs() < resting_speed {
        0.0
    } else {
        -velocity * restitution
    }
}

/// Clamps one axis. Returns true when the body was moving into the bound.
///
/// `floor_resting` only applies to the lower bound; walls and ceilings
/// always reflect.
fn clamp_axis(
    position: &mut f32,
    velocity: &mut f32,
    radius: f32,
    min: f32,
    max: f32,
    restitution: f32,
    floor_resting: f32,
) -> bool {
    if *position - radius < min {
        *position = min + radius;
        if *velocity < 0.0 {
            *velocity = reflect_component(*velocity, restitution, floor_resting);
            return true;
        }
    } else if *position + radius > max {
        *position = max - radius;
        if *velocity > 0.0 {
            *velocity = -*velocity * restitution;
            return true;
        }
    }
    false
}

/// Keeps `body` inside `bounds`, bouncing it off walls, floor and ceiling.
///
/// Ground friction scales horizontal velocity by `1 - friction` once when
/// the body hit any bound this call while sitting on the floor. Static
/// bodies are ignored. `resting_speed` stops slow floor contacts only.
/// Returns whether any bound was hit.
pub fn apply_bounds(body: &mut PhysicsBody, bounds: &WorldBounds, resting_speed: f32) -> bool {
    if body.is_static {
        return false;
    }

    let radius = body.radius;
    let restitution = body.restitution;
    let mut collided = false;

    collided |= clamp_axis(
        &mut body.position.x,
        &mut body.velocity.x,
        radius,
        bounds.min_x,
        bounds.max_x,
        restitution,
        0.0,
    );
    collided |= clamp_axis(
        &mut body.position.y,
        &mut body.velocity.y,
        radius,
        bounds.min_y,
        bounds.max_y,
        restitution,
        resting_speed,
    );
    collided |= clamp_axis(
        &mut body.position.z,
        &mut body.velocity.z,
        radius,
        bounds.min_z,
        bounds.max_z,
        restitution,
        0.0,
    );

    if collided && body.position.y <= bounds.min_y + radius + GROUND_CONTACT_TOLERANCE {
        let keep = 1.0 - body.friction;
        body.velocity.x *= keep;
        body.velocity.z *= keep;
    }

    collided
}
