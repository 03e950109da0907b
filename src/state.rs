//! State marker components.
//!
//! These components mirror the ground probe's airborne predicate so hosts
//! can filter queries on the character's physical state. They are added and
//! removed by the controller systems; do not insert them yourself.

use bevy::prelude::*;

/// Marker component indicating the character is grounded.
///
/// Present while the ground probe finds a surface within the hover height.
/// Mutually exclusive with [`Airborne`].
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use fps_hover_controller::prelude::*;
///
/// fn footstep_audio(characters: Query<&GroundProbe, With<Grounded>>) {
///     for _probe in &characters {
///         // grounded characters only
///     }
/// }
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Grounded;

/// Marker component indicating the character is airborne.
///
/// Present while the ground probe finds no surface, or one farther than the
/// hover height. Mutually exclusive with [`Grounded`].
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Airborne;
