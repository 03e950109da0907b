//! # `fps_hover_controller`
//!
//! A physically-simulated first-person hover character controller with
//! physics backend abstraction.
//!
//! This crate provides a tuneable first-person controller that:
//! - Hovers above ground on a spring-damper force instead of standing on a
//!   collider
//! - Writes horizontal velocity directly from movement axes, yaw-aligned
//! - Applies single-impulse jumps gated on a downward ground probe
//! - Drives a pitch-clamped look camera from pointer deltas
//! - Targets interactable objects along the view ray, with a separate reach
//!   limit for actually switching them
//! - Teleports characters through portal volumes to linked destinations
//! - Abstracts the physics backend for easy swapping (Rapier3D included)
//!
//! ## Architecture
//!
//! The controller splits its work across Bevy's two main schedules:
//!
//! 1. `Update` owns everything tied to the frame: input edge detection,
//!    sensor sampling, look orientation, interaction dispatch, and portal
//!    transitions.
//! 2. `FixedUpdate` owns movement: the horizontal velocity write, jump
//!    impulses, and the hover spring force that holds the body at its
//!    configured standoff height.
//!
//! The body is an ordinary dynamic rigidbody; it collides normally but never
//! rests on the ground, because the hover spring keeps it floating at
//! `hover_height`. All physics access goes through
//! [`ControllerPhysicsBackend`](backend::ControllerPhysicsBackend), so the
//! movement systems are engine-agnostic.
//!
//! ## Usage
//!
//! ```rust
//! use bevy::prelude::*;
//! use fps_hover_controller::prelude::*;
//!
//! // Components for a hover character body
//! let character = HoverCharacter::new();
//! let config = ControllerConfig::player();
//! let input = ControllerInput::new();
//! let orientation = Orientation::default();
//!
//! // These are spawned together with the backend's physics components;
//! // the Rapier backend ships a ready-made bundle.
//! ```

use bevy::prelude::*;

pub mod backend;
pub mod collision;
pub mod config;
pub mod detection;
pub mod input;
pub mod interact;
pub mod orientation;
pub mod portal;
pub mod state;
pub mod systems;

#[cfg(feature = "rapier3d")]
pub mod rapier;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::backend::{ControllerPhysicsBackend, NoOpBackendPlugin};
    pub use crate::collision::CollisionData;
    pub use crate::config::{ControllerConfig, HoverCharacter};
    pub use crate::detection::{GroundProbe, LookTarget};
    pub use crate::input::ControllerInput;
    pub use crate::interact::{Interactable, Switched};
    pub use crate::orientation::{ControllerCamera, Orientation};
    pub use crate::portal::{Portal, PortalOverlapEvent};
    pub use crate::state::{Airborne, Grounded};
    pub use crate::{ControllerSet, HoverControllerPlugin};

    #[cfg(feature = "rapier3d")]
    pub use crate::rapier::{Rapier3dBackend, Rapier3dCharacterBundle, Rapier3dPortalBundle};
}

/// System sets the controller schedules its work in.
///
/// The `Update` sets run in declaration order, as do the `FixedUpdate`
/// sets. Backend plugins hook their sensor systems into [`Sensors`] and
/// [`Targeting`] and their force bookkeeping into [`Preparation`] and
/// [`FinalApplication`]; host systems that feed [`ControllerInput`] should
/// run before [`Input`].
///
/// [`Sensors`]: ControllerSet::Sensors
/// [`Targeting`]: ControllerSet::Targeting
/// [`Preparation`]: ControllerSet::Preparation
/// [`FinalApplication`]: ControllerSet::FinalApplication
/// [`Input`]: ControllerSet::Input
/// [`ControllerInput`]: input::ControllerInput
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerSet {
    /// `Update`: edge detection over the held action state.
    Input,
    /// `Update`: backend ground probing and overlap event translation.
    Sensors,
    /// `Update`: look accumulation and body/camera rotation writes.
    Orientation,
    /// `Update`: backend look-target raycasts (after orientation so the
    /// casts use this frame's view direction).
    Targeting,
    /// `Update`: interact request dispatch against the look target.
    Interaction,
    /// `Update`: portal occupancy and teleportation.
    Portals,
    /// `FixedUpdate`: backend force bookkeeping before movement runs.
    Preparation,
    /// `FixedUpdate`: horizontal velocity write and jump impulses.
    Locomotion,
    /// `FixedUpdate`: the hover spring force.
    Hover,
    /// `FixedUpdate`: backend force application to the physics engine.
    FinalApplication,
}

/// Main plugin for the hover character controller.
///
/// This plugin is generic over a physics backend `B` which provides the
/// actual physics operations (velocity access, force application) and the
/// sensor systems (ground probe, look raycasts, portal overlap events).
///
/// The physics engine's own plugin is not added here; the host app adds it
/// alongside, which keeps engine configuration (timestep mode, gravity,
/// interpolation) in one place.
///
/// # Type Parameters
/// - `B`: The physics backend implementation (e.g., `Rapier3dBackend`)
///
/// # Examples
///
/// With the Rapier3D backend:
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_rapier3d::prelude::*;
/// use fps_hover_controller::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
///     .add_plugins(HoverControllerPlugin::<Rapier3dBackend>::default())
///     .run();
/// ```
pub struct HoverControllerPlugin<B: backend::ControllerPhysicsBackend> {
    _marker: std::marker::PhantomData<B>,
}

impl<B: backend::ControllerPhysicsBackend> Default for HoverControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: backend::ControllerPhysicsBackend> Plugin for HoverControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        // Register core types
        app.register_type::<config::HoverCharacter>();
        app.register_type::<config::ControllerConfig>();
        app.register_type::<input::ControllerInput>();
        app.register_type::<detection::GroundProbe>();
        app.register_type::<detection::LookTarget>();
        app.register_type::<orientation::Orientation>();
        app.register_type::<orientation::ControllerCamera>();
        app.register_type::<interact::Interactable>();
        app.register_type::<portal::Portal>();
        app.register_type::<state::Grounded>();
        app.register_type::<state::Airborne>();

        app.add_event::<portal::PortalOverlapEvent>();

        app.configure_sets(
            Update,
            (
                ControllerSet::Input,
                ControllerSet::Sensors,
                ControllerSet::Orientation,
                ControllerSet::Targeting,
                ControllerSet::Interaction,
                ControllerSet::Portals,
            )
                .chain(),
        );
        app.configure_sets(
            FixedUpdate,
            (
                ControllerSet::Preparation,
                ControllerSet::Locomotion,
                ControllerSet::Hover,
                ControllerSet::FinalApplication,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                systems::detect_input_edges.in_set(ControllerSet::Input),
                systems::sync_state_markers.after(ControllerSet::Sensors),
                systems::apply_orientation.in_set(ControllerSet::Orientation),
                systems::dispatch_interaction.in_set(ControllerSet::Interaction),
                (systems::validate_portals, systems::portal_transitions)
                    .chain()
                    .in_set(ControllerSet::Portals),
            ),
        );
        app.add_systems(
            FixedUpdate,
            (
                (systems::apply_locomotion::<B>, systems::apply_jump::<B>)
                    .chain()
                    .in_set(ControllerSet::Locomotion),
                systems::apply_hover_force::<B>.in_set(ControllerSet::Hover),
            ),
        );

        // Add the physics backend plugin
        app.add_plugins(B::plugin());
    }
}
