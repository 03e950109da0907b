//! Cached sensor samples.
//!
//! The physics backend writes these components once per frame tick; the
//! controller systems read them. The ground sample crosses the frame/physics
//! rate boundary, so it carries the frame index it was taken in; the fixed
//! tick knowingly consumes a sample up to one frame old.

use bevy::prelude::*;

use crate::collision::CollisionData;

/// Downward ground probe sample.
///
/// Written by the backend's ground sensor system each frame tick from a ray
/// cast straight down from the body position, bounded to
/// [`ControllerConfig::probe_range`](crate::config::ControllerConfig).
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct GroundProbe {
    /// Whether the ray hit a surface within probe range.
    pub detected: bool,
    /// Distance from the body position to the surface (valid when detected).
    pub distance: f32,
    /// Surface normal at the hit point (valid when detected).
    pub normal: Vec3,
    /// Hit point in world space (valid when detected).
    pub point: Vec3,
    /// Entity the ray hit.
    pub ground_entity: Option<Entity>,
    /// Frame index this sample was taken in.
    pub sampled_frame: u32,
}

impl GroundProbe {
    /// Record a hit for this frame.
    pub fn record_hit(&mut self, hit: CollisionData, frame: u32) {
        self.detected = true;
        self.distance = hit.distance;
        self.normal = hit.normal;
        self.point = hit.point;
        self.ground_entity = hit.entity;
        self.sampled_frame = frame;
    }

    /// Record a miss for this frame.
    pub fn record_miss(&mut self, frame: u32) {
        self.detected = false;
        self.distance = 0.0;
        self.normal = Vec3::ZERO;
        self.point = Vec3::ZERO;
        self.ground_entity = None;
        self.sampled_frame = frame;
    }

    /// Airborne predicate: no surface found, or the surface is farther than
    /// the hover height.
    pub fn is_airborne(&self, hover_height: f32) -> bool {
        !self.detected || self.distance > hover_height
    }

    /// Height deficit relative to the target hover height (positive when the
    /// body sits below target). Zero when no surface was found.
    pub fn height_error(&self, hover_height: f32) -> f32 {
        if self.detected {
            hover_height - self.distance
        } else {
            0.0
        }
    }
}

/// Forward look-target sample.
///
/// Written by the backend's look sensor system each frame tick, after
/// orientation has been applied, from a ray cast along the camera's forward
/// axis. The `in_reach` flag comes from a second, independent cast bounded to
/// the configured reach, so a target can be visible at range without being in
/// reach.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct LookTarget {
    /// Entity currently under the crosshair, if any. Cleared on miss, never
    /// held across frames.
    pub entity: Option<Entity>,
    /// Distance to the targeted entity (valid when `entity` is set).
    pub distance: f32,
    /// Hit point in world space (valid when `entity` is set).
    pub point: Vec3,
    /// Whether the reach-bounded cast currently succeeds.
    pub in_reach: bool,
}

impl LookTarget {
    /// Record this frame's casts: the look-range hit (or miss) and the
    /// outcome of the separate reach-bounded cast.
    pub fn record(&mut self, hit: Option<CollisionData>, in_reach: bool) {
        match hit {
            Some(hit) => {
                self.entity = hit.entity;
                self.distance = hit.distance;
                self.point = hit.point;
            }
            None => {
                self.entity = None;
                self.distance = 0.0;
                self.point = Vec3::ZERO;
            }
        }
        self.in_reach = in_reach;
    }

    /// Check if anything is currently targeted.
    pub fn has_target(&self) -> bool {
        self.entity.is_some()
    }
}
