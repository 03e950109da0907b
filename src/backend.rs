//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement
//! to work with the hover controller. The generic movement systems talk to
//! the physics engine exclusively through it, so swapping engines (Rapier3D,
//! XPBD, a test double) never touches controller logic.
//!
//! Backends also own the sensor side: a backend plugin is expected to
//! register systems that fill [`GroundProbe`](crate::detection::GroundProbe)
//! and [`LookTarget`](crate::detection::LookTarget) in
//! [`ControllerSet::Sensors`](crate::ControllerSet) and
//! [`ControllerSet::Targeting`](crate::ControllerSet), and to translate its
//! trigger-volume callbacks into
//! [`PortalOverlapEvent`](crate::portal::PortalOverlapEvent)s.

use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// Implement this trait to integrate a physics engine with the hover
/// controller. The shipped implementation is the `rapier` module's
/// `Rapier3dBackend`; the unit conventions below are part of the contract:
///
/// - [`apply_force`](Self::apply_force) takes an **acceleration**
///   (units/second²). Backends working in newtons scale by body mass so the
///   same config produces the same motion on light and heavy bodies.
/// - [`apply_impulse`](Self::apply_impulse) takes a **velocity change**
///   (units/second), applied once, independent of the tick rate.
///
/// # Example
///
/// A minimal kinematic backend that integrates velocity by hand:
///
/// ```rust
/// use bevy::prelude::*;
/// use fps_hover_controller::prelude::*;
///
/// #[derive(Component, Default)]
/// struct KinematicVelocity(Vec3);
///
/// struct KinematicBackend;
///
/// impl ControllerPhysicsBackend for KinematicBackend {
///     type VelocityComponent = KinematicVelocity;
///
///     fn plugin() -> impl Plugin {
///         NoOpBackendPlugin
///     }
///
///     fn get_velocity(world: &World, entity: Entity) -> Vec3 {
///         world
///             .get::<KinematicVelocity>(entity)
///             .map(|v| v.0)
///             .unwrap_or_default()
///     }
///
///     fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3) {
///         if let Some(mut v) = world.get_mut::<KinematicVelocity>(entity) {
///             v.0 = velocity;
///         }
///     }
///
///     fn apply_force(world: &mut World, entity: Entity, force: Vec3) {
///         let dt = Self::get_fixed_timestep(world);
///         let velocity = Self::get_velocity(world, entity);
///         Self::set_velocity(world, entity, velocity + force * dt);
///     }
///
///     fn apply_impulse(world: &mut World, entity: Entity, impulse: Vec3) {
///         let velocity = Self::get_velocity(world, entity);
///         Self::set_velocity(world, entity, velocity + impulse);
///     }
/// }
/// ```
pub trait ControllerPhysicsBackend: 'static + Send + Sync {
    /// The velocity component type used by this backend.
    ///
    /// The movement systems only touch entities carrying it, so bodies the
    /// backend does not simulate are never written to.
    type VelocityComponent: Component;

    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Get the current linear velocity of an entity.
    ///
    /// Returns zero if the entity has no velocity state.
    fn get_velocity(world: &World, entity: Entity) -> Vec3;

    /// Set the linear velocity of an entity.
    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3);

    /// Apply a force to an entity, expressed as an acceleration
    /// (units/second²). The force acts over the current physics tick.
    fn apply_force(world: &mut World, entity: Entity, force: Vec3);

    /// Apply an instantaneous impulse to an entity, expressed as a velocity
    /// change (units/second).
    fn apply_impulse(world: &mut World, entity: Entity, impulse: Vec3);

    /// Get the fixed timestep delta time.
    ///
    /// The default implementation reads `Time<Fixed>`, falling back to 60 Hz
    /// when the resource is missing or has not ticked yet.
    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|t| t.delta_secs())
            .filter(|&d| d > 0.0)
            .unwrap_or(1.0 / 60.0)
    }
}

/// Empty plugin for backends that don't need additional setup.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}
