//! Controller configuration and the central character component.
//!
//! This module defines the hub component every hover character carries and
//! the tunable set that shapes movement, hovering, look control, and
//! interaction reach.

use bevy::prelude::*;

/// Core hover character component.
///
/// This is the **central hub** for the controller: it marks an entity as a
/// hover character (portal areas and the generic systems filter on it) and
/// carries the force bookkeeping the physics backend uses to keep controller
/// forces isolated from user-applied forces.
///
/// The cached sensor samples live in their own components
/// ([`GroundProbe`](crate::detection::GroundProbe),
/// [`LookTarget`](crate::detection::LookTarget)); this component only owns
/// what the fixed tick accumulates.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct HoverCharacter {
    /// Force accumulated by controller systems during the current fixed tick,
    /// in the backend's engine units. The Rapier backend scales accelerations
    /// by body mass as it accumulates them here.
    pub(crate) accumulated_force: Vec3,
    /// Force handed to the physics engine last tick, kept so the backend can
    /// subtract it again before the next accumulation pass.
    pub(crate) applied_force: Vec3,
}

impl Default for HoverCharacter {
    fn default() -> Self {
        Self {
            accumulated_force: Vec3::ZERO,
            applied_force: Vec3::ZERO,
        }
    }
}

impl HoverCharacter {
    /// Create a new hover character component.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate a controller force for this tick. Backend plumbing; called
    /// from [`ControllerPhysicsBackend::apply_force`] implementations.
    ///
    /// [`ControllerPhysicsBackend::apply_force`]: crate::backend::ControllerPhysicsBackend::apply_force
    pub fn add_force(&mut self, force: Vec3) {
        self.accumulated_force += force;
    }

    /// Start a new tick: returns the force applied last tick so the backend
    /// can subtract it, and clears the accumulator.
    pub fn prepare_new_tick(&mut self) -> Vec3 {
        let previous = self.applied_force;
        self.accumulated_force = Vec3::ZERO;
        previous
    }

    /// Finish the tick: returns the force to hand to the physics engine and
    /// records it for next tick's subtraction.
    pub fn finalize_tick(&mut self) -> Vec3 {
        self.applied_force = self.accumulated_force;
        self.accumulated_force
    }
}

/// Configuration parameters for the hover character controller.
///
/// Distances are in world units (meters for the shipped Rapier backend),
/// angles in degrees, forces in acceleration units (the backend scales by
/// body mass).
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct ControllerConfig {
    // === Movement ===
    /// Horizontal movement speed (units/second). Input axes are scaled by
    /// this and written to the horizontal velocity directly.
    pub speed: f32,

    /// Upward velocity added by a jump (units/second). Applied once per
    /// qualifying jump request, independent of tick rate.
    pub jump_impulse: f32,

    // === Look ===
    /// Pointer sensitivity (degrees/second per unit of pointer delta).
    pub sensitivity: f32,

    // === Hover ===
    /// Target standoff distance between the body and the ground below it.
    /// The probe reporting more than this means the character is airborne.
    pub hover_height: f32,

    /// Spring gain of the hover force: acceleration per unit of height
    /// deficit below `hover_height`.
    pub hover_strength: f32,

    /// Damping applied to vertical velocity while the hover force is active,
    /// preventing overshoot and oscillation.
    pub vertical_damping: f32,

    // === Interaction ===
    /// Maximum distance at which a targeted object can be switched. Must be
    /// less than or equal to `look_range`.
    pub reach_length: f32,

    /// Maximum distance of the look-target raycast. Objects beyond
    /// `reach_length` but within this range are still reported as targeted.
    pub look_range: f32,

    // === Sensors ===
    /// Maximum length of the downward ground probe. Anything deeper reads as
    /// "no surface".
    pub probe_range: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Movement
            speed: 5.0,
            jump_impulse: 5.0,
            // Look
            sensitivity: 120.0,
            // Hover (tuned for a 60 Hz fixed step). Underdamped: the spring
            // only acts below hover_height, so environment gravity is what
            // arrests an overshoot past the cutoff. Zero-gravity setups need
            // vertical_damping >= 2 * sqrt(hover_strength).
            hover_height: 1.5,
            hover_strength: 40.0,
            vertical_damping: 8.0,
            // Interaction
            reach_length: 2.0,
            look_range: 50.0,
            // Sensors
            probe_range: 200.0,
        }
    }
}

impl ControllerConfig {
    /// Create a config tuned for a responsive player character.
    pub fn player() -> Self {
        Self {
            speed: 6.0,
            jump_impulse: 6.0,
            hover_strength: 60.0,
            vertical_damping: 10.0,
            ..default()
        }
    }

    /// Builder: set horizontal movement speed.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Builder: set jump impulse (velocity units).
    pub fn with_jump_impulse(mut self, impulse: f32) -> Self {
        self.jump_impulse = impulse;
        self
    }

    /// Builder: set pointer sensitivity.
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Builder: set the target hover height.
    pub fn with_hover_height(mut self, height: f32) -> Self {
        self.hover_height = height;
        self
    }

    /// Builder: set hover spring gain and vertical damping together.
    pub fn with_hover(mut self, strength: f32, damping: f32) -> Self {
        self.hover_strength = strength;
        self.vertical_damping = damping;
        self
    }

    /// Builder: set interaction reach.
    pub fn with_reach_length(mut self, reach: f32) -> Self {
        self.reach_length = reach;
        self
    }

    /// Builder: set the look-target raycast range.
    pub fn with_look_range(mut self, range: f32) -> Self {
        self.look_range = range;
        self
    }

    /// Builder: set the ground probe range.
    pub fn with_probe_range(mut self, range: f32) -> Self {
        self.probe_range = range;
        self
    }
}
