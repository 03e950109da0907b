//! Controller input component.
//!
//! The host feeds raw input state into [`ControllerInput`] every frame; the
//! controller systems read it and handle edge detection internally. Any
//! source of axes and booleans works: keyboard, gamepad, replay, AI.

use bevy::prelude::*;

/// Per-character input state.
///
/// Continuous axes (`movement`, `look_delta`) are written by the host each
/// frame. Digital actions (jump, interact) are fed as held state via
/// `set_*_pressed`; the controller detects rising edges and raises one-shot
/// requests from them, so holding a key never repeats the action.
///
/// # Example
///
/// ```rust
/// use fps_hover_controller::prelude::*;
/// use bevy::math::Vec2;
///
/// let mut input = ControllerInput::new();
/// input.set_movement(Vec2::new(0.0, 1.0)); // forward
/// input.add_look_delta(Vec2::new(3.0, -1.0));
/// input.set_jump_pressed(true);
/// assert!(input.is_jump_pressed());
/// ```
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct ControllerInput {
    /// Movement axes: `x` = strafe (right positive), `y` = forward.
    /// Each axis is clamped to `[-1, 1]`.
    pub movement: Vec2,
    /// Pointer delta accumulated since the last frame tick, x right-positive
    /// and y up-positive (negate the y of screen-space motion events).
    /// Consumed (reset to zero) by the orientation system each frame.
    pub look_delta: Vec2,
    /// Whether the jump action is currently held.
    ///
    /// You handle input detection, the controller just receives a bool:
    ///
    /// ```rust,ignore
    /// input.set_jump_pressed(keyboard.pressed(KeyCode::Space));
    /// ```
    pub jump_pressed: bool,
    /// Whether the interact action is currently held.
    pub interact_pressed: bool,
    /// Previous frame's jump held state (for edge detection).
    pub(crate) jump_pressed_prev: bool,
    /// Previous frame's interact held state (for edge detection).
    pub(crate) interact_pressed_prev: bool,
    /// Pending jump request. Raised on the jump rising edge, cleared by the
    /// first physics tick that observes it.
    pub(crate) jump_requested: bool,
    /// Pending interact request. Raised on the interact rising edge, cleared
    /// by the frame-tick dispatch.
    pub(crate) interact_requested: bool,
}

impl Default for ControllerInput {
    fn default() -> Self {
        Self {
            movement: Vec2::ZERO,
            look_delta: Vec2::ZERO,
            jump_pressed: false,
            interact_pressed: false,
            jump_pressed_prev: false,
            interact_pressed_prev: false,
            jump_requested: false,
            interact_requested: false,
        }
    }
}

impl ControllerInput {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the movement axes. Each axis is clamped to `[-1, 1]`.
    pub fn set_movement(&mut self, movement: Vec2) {
        self.movement = movement.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    /// Replace the pointer delta for this frame.
    pub fn set_look_delta(&mut self, delta: Vec2) {
        self.look_delta = delta;
    }

    /// Accumulate a pointer delta. Hosts reading multiple motion events per
    /// frame add each one; the orientation system consumes the sum.
    pub fn add_look_delta(&mut self, delta: Vec2) {
        self.look_delta += delta;
    }

    /// Take the accumulated pointer delta, resetting it to zero.
    pub fn take_look_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.look_delta)
    }

    /// Set the jump held state. Call every frame with the current state.
    pub fn set_jump_pressed(&mut self, pressed: bool) {
        self.jump_pressed = pressed;
    }

    /// Check if jump is currently held.
    pub fn is_jump_pressed(&self) -> bool {
        self.jump_pressed
    }

    /// Set the interact held state. Call every frame with the current state.
    pub fn set_interact_pressed(&mut self, pressed: bool) {
        self.interact_pressed = pressed;
    }

    /// Check if interact is currently held.
    pub fn is_interact_pressed(&self) -> bool {
        self.interact_pressed
    }

    /// Check if a jump request is pending.
    pub fn has_jump_request(&self) -> bool {
        self.jump_requested
    }

    /// Check if an interact request is pending.
    pub fn has_interact_request(&self) -> bool {
        self.interact_requested
    }

    /// Take and consume the pending jump request.
    ///
    /// Returns `true` if one was pending. The physics tick calls this once;
    /// a request that arrives while airborne is consumed without effect.
    pub fn take_jump_request(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    /// Take and consume the pending interact request.
    pub fn take_interact_request(&mut self) -> bool {
        std::mem::take(&mut self.interact_requested)
    }

    /// Clear the continuous axes. Digital state and pending requests are
    /// left untouched.
    pub fn clear_axes(&mut self) {
        self.movement = Vec2::ZERO;
        self.look_delta = Vec2::ZERO;
    }

    /// Run edge detection over the held states, raising one-shot requests on
    /// rising edges. Called once per frame tick by the input system.
    pub(crate) fn detect_edges(&mut self) {
        if self.jump_pressed && !self.jump_pressed_prev {
            self.jump_requested = true;
        }
        self.jump_pressed_prev = self.jump_pressed;

        if self.interact_pressed && !self.interact_pressed_prev {
            self.interact_requested = true;
        }
        self.interact_pressed_prev = self.interact_pressed;
    }
}
