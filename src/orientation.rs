//! Look orientation state.
//!
//! Yaw and pitch live here as degree accumulators with the pitch clamp
//! applied before commit. The body's visible facing gets yaw only; the
//! camera gets the combined pitch+yaw, no roll.

use bevy::prelude::*;

/// Lower pitch bound in degrees, exclusive. Negative pitch tilts the view
/// upward, so the camera can travel almost straight up.
pub const PITCH_MIN_DEGREES: f32 = -85.0;

/// Upper pitch bound in degrees, exclusive. Positive pitch tilts the view
/// downward.
pub const PITCH_MAX_DEGREES: f32 = 45.0;

/// Yaw/pitch accumulator for a hover character.
///
/// Angles are stored in degrees. Positive yaw turns the view rightward
/// (clockwise seen from above), positive pitch tilts it downward; the
/// conversion to Bevy's rotation handedness happens inside
/// [`body_rotation`](Orientation::body_rotation) and
/// [`camera_rotation`](Orientation::camera_rotation).
///
/// Pitch always stays strictly inside
/// (`PITCH_MIN_DEGREES`, `PITCH_MAX_DEGREES`): a look update whose resulting
/// pitch would land outside is rejected outright rather than saturated, so a
/// large single-frame delta cannot stick the pitch to the boundary. Yaw is
/// unbounded and wraps implicitly through the quaternion representation.
///
/// There are two writers: the frame-tick look update
/// ([`apply_look`](Orientation::apply_look)) and the portal override
/// ([`adjust_yaw`](Orientation::adjust_yaw)). Both commit immediately; the
/// next read sees the new value.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Orientation {
    yaw_degrees: f32,
    pitch_degrees: f32,
}

impl Orientation {
    /// Create an orientation facing the given yaw, level pitch.
    pub fn with_yaw(yaw_degrees: f32) -> Self {
        Self {
            yaw_degrees,
            pitch_degrees: 0.0,
        }
    }

    /// Current yaw in degrees (unbounded accumulator).
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw_degrees
    }

    /// Current pitch in degrees, strictly inside the clamp range.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch_degrees
    }

    /// Apply one frame of pointer input.
    ///
    /// `delta` is the pointer delta with x right-positive and y up-positive
    /// (negate the y of screen-space motion events, which grow downward).
    /// Pitch moves opposite to vertical pointer motion; the update is
    /// dropped if the result would leave the clamp range. Yaw accumulates
    /// regardless of the pitch outcome.
    pub fn apply_look(&mut self, delta: Vec2, sensitivity: f32, dt: f32) {
        let pitch_candidate = self.pitch_degrees + -delta.y * sensitivity * dt;
        if pitch_candidate > PITCH_MIN_DEGREES && pitch_candidate < PITCH_MAX_DEGREES {
            self.pitch_degrees = pitch_candidate;
        }
        self.yaw_degrees += delta.x * sensitivity * dt;
    }

    /// Instantaneous external yaw offset in degrees.
    ///
    /// Used by portal realignment. Commits immediately and leaves pitch
    /// untouched; the transforms are re-derived by whichever system invoked
    /// it, not deferred to the next frame tick.
    pub fn adjust_yaw(&mut self, degrees: f32) {
        self.yaw_degrees += degrees;
    }

    /// Body facing: yaw-only rotation about the vertical axis.
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw_degrees.to_radians())
    }

    /// Camera orientation: combined pitch and yaw, no roll.
    pub fn camera_rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            -self.yaw_degrees.to_radians(),
            -self.pitch_degrees.to_radians(),
            0.0,
        )
    }

    /// World-space view direction derived from the camera orientation.
    pub fn forward(&self) -> Vec3 {
        self.camera_rotation() * Vec3::NEG_Z
    }
}

/// Links a camera entity to the hover character it views from.
///
/// The orientation system positions the camera at the body translation plus
/// `eye_offset` and writes the combined look rotation to it every frame.
/// Spawn this on a separate entity from the body so the body's physics
/// rotation never bleeds into the view.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct ControllerCamera {
    /// The hover character entity this camera follows.
    pub body: Entity,
    /// Offset from the body translation to the eye point.
    pub eye_offset: Vec3,
}

impl Default for ControllerCamera {
    fn default() -> Self {
        Self {
            body: Entity::PLACEHOLDER,
            eye_offset: Vec3::new(0.0, 0.6, 0.0),
        }
    }
}

impl ControllerCamera {
    /// Attach to a body with the default eye offset.
    pub fn new(body: Entity) -> Self {
        Self {
            body,
            ..default()
        }
    }

    /// Builder: set the eye offset.
    pub fn with_eye_offset(mut self, offset: Vec3) -> Self {
        self.eye_offset = offset;
        self
    }
}
