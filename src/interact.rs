//! Toggleable interactable objects.
//!
//! Any entity with a collider can opt into interaction by carrying
//! [`Interactable`]: a two-state machine flipped by the controller's
//! interaction dispatch. Per-variant behavior hangs off the [`Switched`]
//! observer event instead of subclassing.

use bevy::prelude::*;

/// Two-state (pressed/unpressed) toggle capability.
///
/// Starts unpressed; every [`switch`](Interactable::switch) flips it. The
/// machine has no terminal state and cycles indefinitely. Entities without
/// this component are silently skipped by interaction dispatch.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Interactable {
    pressed: bool,
}

impl Interactable {
    /// Create an unpressed interactable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Flip the state unconditionally. Returns the state after the flip.
    pub fn switch(&mut self) -> bool {
        self.pressed = !self.pressed;
        self.pressed
    }
}

/// Entity-targeted event fired on every [`Interactable::switch`].
///
/// Attach an observer to the interactable entity to define what the toggle
/// does; each variant gets its own effect without any shared base type:
///
/// ```rust,ignore
/// commands
///     .spawn((Interactable::new(), Collider::cuboid(0.5, 0.5, 0.5)))
///     .observe(|trigger: Trigger<Switched>, mut doors: Query<&mut Door>| {
///         if trigger.pressed {
///             // open the linked door
///         }
///     });
/// ```
#[derive(Event, Debug, Clone, Copy)]
pub struct Switched {
    /// State after the toggle.
    pub pressed: bool,
}
