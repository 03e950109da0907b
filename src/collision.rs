//! Raycast result structures.
//!
//! These structures hold the results of physics queries used for ground
//! probing and look targeting, independent of the physics backend that
//! produced them.

use bevy::prelude::*;

/// Information about a raycast hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionData {
    /// Distance from the cast origin to the hit point.
    pub distance: f32,
    /// Normal of the surface at the hit point.
    pub normal: Vec3,
    /// World position of the hit point.
    pub point: Vec3,
    /// Entity that was hit (if any).
    pub entity: Option<Entity>,
}

impl CollisionData {
    /// Create a raycast result.
    pub fn new(distance: f32, normal: Vec3, point: Vec3, entity: Option<Entity>) -> Self {
        Self {
            distance,
            normal,
            point,
            entity,
        }
    }
}
