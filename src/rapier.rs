//! Rapier3D physics backend implementation.
//!
//! This module provides the physics backend for Bevy Rapier3D.
//! Enable with the `rapier3d` feature.
//!
//! The backend expects the host app to add `RapierPhysicsPlugin` itself;
//! `in_fixed_schedule()` is recommended so the physics step runs right after
//! the controller's `FixedUpdate` force application. Controller forces are
//! accumulated on [`HoverCharacter`] during the tick and moved into
//! `ExternalForce` at the end of it, then subtracted again at the start of
//! the next tick, so forces applied by other systems are never clobbered.

use bevy::diagnostic::FrameCount;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::backend::ControllerPhysicsBackend;
use crate::collision::CollisionData;
use crate::config::{ControllerConfig, HoverCharacter};
use crate::detection::{GroundProbe, LookTarget};
use crate::orientation::{ControllerCamera, Orientation};
use crate::portal::{Portal, PortalOverlapEvent};

/// Rapier3D physics backend for the hover controller.
///
/// This backend uses `bevy_rapier3d` for force application and velocity
/// manipulation. Sensor raycasts (ground probe, look targeting) are handled
/// by dedicated Rapier systems that receive `RapierContext` as a system
/// parameter, and Rapier's collision events are translated into
/// [`PortalOverlapEvent`]s.
pub struct Rapier3dBackend;

impl ControllerPhysicsBackend for Rapier3dBackend {
    type VelocityComponent = Velocity;

    fn plugin() -> impl Plugin {
        Rapier3dBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<Velocity>(entity)
            .map(|v| v.linvel)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3) {
        if let Some(mut vel) = world.get_mut::<Velocity>(entity) {
            vel.linvel = velocity;
        }
    }

    fn apply_force(world: &mut World, entity: Entity, force: Vec3) {
        // Accumulate on the hub instead of writing ExternalForce directly;
        // apply_controller_forces moves the sum over at the end of the tick.
        // Rapier works in newtons, so the acceleration is scaled by mass here.
        let mass = body_mass(world, entity);
        if let Some(mut character) = world.get_mut::<HoverCharacter>(entity) {
            character.add_force(force * mass);
        }
    }

    fn apply_impulse(world: &mut World, entity: Entity, impulse: Vec3) {
        // The contract expresses impulses as velocity changes; Rapier expects
        // mass-scaled impulses.
        let mass = body_mass(world, entity);
        if let Some(mut ext_impulse) = world.get_mut::<ExternalImpulse>(entity) {
            ext_impulse.impulse += impulse * mass;
        } else if let Some(mut vel) = world.get_mut::<Velocity>(entity) {
            // Fallback: apply as a direct velocity change if no ExternalImpulse
            // component is present.
            vel.linvel += impulse;
        }
    }
}

/// Mass for force scaling, with a fallback for bodies whose mass properties
/// are missing or not yet computed (Rapier fills `ReadMassProperties` after
/// the first physics step).
fn body_mass(world: &World, entity: Entity) -> f32 {
    world
        .get::<ReadMassProperties>(entity)
        .map(|props| props.mass)
        .filter(|&mass| mass > 0.0 && mass.is_finite())
        .unwrap_or(1.0)
}

/// Plugin that sets up Rapier3D-specific systems for the hover controller.
pub struct Rapier3dBackendPlugin;

impl Plugin for Rapier3dBackendPlugin {
    fn build(&self, app: &mut App) {
        use crate::ControllerSet;

        // Frame tick: sensors and overlap translation, then look targeting
        // after orientation so the casts use this frame's view direction.
        app.add_systems(
            Update,
            (
                (rapier_ground_probe, rapier_portal_overlaps).in_set(ControllerSet::Sensors),
                rapier_look_targeting.in_set(ControllerSet::Targeting),
            ),
        );

        // Physics tick: restore ExternalForce before movement systems run,
        // hand the accumulated controller forces to Rapier after them.
        app.add_systems(
            FixedUpdate,
            (
                clear_controller_forces.in_set(ControllerSet::Preparation),
                apply_controller_forces.in_set(ControllerSet::FinalApplication),
            ),
        );
    }
}

/// Perform a raycast using RapierContext, excluding the caster's own body
/// and all sensor volumes.
fn rapier_view_raycast(
    context: &RapierContext,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    exclude_entity: Entity,
) -> Option<CollisionData> {
    let filter = QueryFilter::default()
        .exclude_rigid_body(exclude_entity)
        .exclude_sensors();

    context
        .cast_ray_and_get_normal(origin, direction, max_distance, true, filter)
        .map(|(hit_entity, hit)| {
            CollisionData::new(hit.time_of_impact, hit.normal, hit.point, Some(hit_entity))
        })
}

/// Refresh every controller's ground probe from a straight-down raycast.
///
/// The sample is tagged with the current frame index; the fixed tick
/// knowingly consumes a sample up to one frame old.
fn rapier_ground_probe(
    rapier_context: ReadRapierContext,
    frames: Res<FrameCount>,
    mut q_controllers: Query<
        (Entity, &Transform, &ControllerConfig, &mut GroundProbe),
        With<HoverCharacter>,
    >,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    for (entity, transform, config, mut probe) in &mut q_controllers {
        match rapier_view_raycast(
            &context,
            transform.translation,
            Vec3::NEG_Y,
            config.probe_range,
            entity,
        ) {
            Some(hit) => probe.record_hit(hit, frames.0),
            None => probe.record_miss(frames.0),
        }
    }
}

/// Refresh every controller's look target from two forward raycasts.
///
/// The first cast is bounded to `look_range` and fills the target cache;
/// the second is bounded to `reach_length` and only answers whether the
/// target is close enough to switch. Casts originate at the linked camera's
/// eye point when one exists, else at the body origin.
fn rapier_look_targeting(
    rapier_context: ReadRapierContext,
    mut q_controllers: Query<
        (
            Entity,
            &Transform,
            &Orientation,
            &ControllerConfig,
            &mut LookTarget,
        ),
        With<HoverCharacter>,
    >,
    q_cameras: Query<(&ControllerCamera, &Transform), Without<HoverCharacter>>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    for (entity, transform, orientation, config, mut target) in &mut q_controllers {
        let mut origin = transform.translation;
        for (camera, camera_transform) in &q_cameras {
            if camera.body == entity {
                origin = camera_transform.translation;
                break;
            }
        }
        let direction = orientation.forward();

        let look = rapier_view_raycast(&context, origin, direction, config.look_range, entity);
        let in_reach =
            rapier_view_raycast(&context, origin, direction, config.reach_length, entity)
                .is_some();
        target.record(look, in_reach);
    }
}

/// Translate Rapier collision events on portal volumes into
/// [`PortalOverlapEvent`]s.
fn rapier_portal_overlaps(
    mut collision_events: EventReader<CollisionEvent>,
    mut overlap_events: EventWriter<PortalOverlapEvent>,
    q_portals: Query<(), With<Portal>>,
) {
    for event in collision_events.read() {
        let (a, b, started) = match *event {
            CollisionEvent::Started(a, b, _) => (a, b, true),
            CollisionEvent::Stopped(a, b, _) => (a, b, false),
        };
        let (portal, body) = if q_portals.contains(a) {
            (a, b)
        } else if q_portals.contains(b) {
            (b, a)
        } else {
            continue;
        };

        if started {
            overlap_events.write(PortalOverlapEvent::Started { portal, body });
        } else {
            overlap_events.write(PortalOverlapEvent::Stopped { portal, body });
        }
    }
}

/// Clear controller forces at the start of each physics tick.
///
/// Subtracts what the controller applied last tick from `ExternalForce`,
/// restoring it to the "external-only" state so forces applied by other
/// systems persist untouched.
pub fn clear_controller_forces(mut q: Query<(&mut ExternalForce, &mut HoverCharacter)>) {
    for (mut ext_force, mut character) in &mut q {
        ext_force.force -= character.prepare_new_tick();
    }
}

/// Apply accumulated controller forces at the end of each physics tick.
///
/// Moves the tick's accumulated forces into `ExternalForce` and records
/// them for next tick's subtraction, so they are integrated by Rapier's
/// physics step exactly once.
pub fn apply_controller_forces(mut q: Query<(&mut ExternalForce, &mut HoverCharacter)>) {
    for (mut ext_force, mut character) in &mut q {
        ext_force.force += character.finalize_tick();
    }
}

/// Bundle for creating a hover character with Rapier3D physics.
///
/// This bundle provides the Rapier components a hover character body needs:
/// a dynamic rigid body with rotation locked, velocity tracking, external
/// force/impulse accumulators, damping, and mass properties. Controller
/// components and the collider are spawned alongside it.
///
/// # Defaults
///
/// - Rigid body: [`RigidBody::Dynamic`]
/// - Rotation: locked on all axes (the controller owns the body's facing)
/// - Damping: zero; the hover law's `vertical_damping` and the direct
///   horizontal velocity writes make engine damping redundant
/// - Gravity scale: 1.0, so the body falls when airborne
///
/// # Example
///
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_rapier3d::prelude::*;
/// use fps_hover_controller::prelude::*;
///
/// fn spawn_player(mut commands: Commands) {
///     let body = commands
///         .spawn((
///             Transform::from_xyz(0.0, 2.0, 0.0),
///             HoverCharacter::new(),
///             ControllerConfig::player(),
///             ControllerInput::new(),
///             Orientation::default(),
///             GroundProbe::default(),
///             LookTarget::default(),
///             Rapier3dCharacterBundle::new(),
///             Collider::capsule_y(0.5, 0.4),
///         ))
///         .id();
///
///     commands.spawn((
///         Camera3d::default(),
///         Transform::default(),
///         ControllerCamera::new(body),
///     ));
/// }
/// ```
#[derive(Bundle)]
pub struct Rapier3dCharacterBundle {
    /// The rigid body type. Should typically be [`RigidBody::Dynamic`].
    pub rigid_body: RigidBody,
    /// Current linear and angular velocity. Updated by Rapier each step.
    pub velocity: Velocity,
    /// Accumulated forces. The controller's force bookkeeping writes these.
    pub external_force: ExternalForce,
    /// Accumulated impulses. Used for jumps.
    pub external_impulse: ExternalImpulse,
    /// Which axes are locked. The controller assumes rotation stays locked.
    pub locked_axes: LockedAxes,
    /// Damping coefficients for velocity reduction.
    pub damping: Damping,
    /// Gravity multiplier for this body.
    pub gravity_scale: GravityScale,
    /// Computed mass properties. Rapier fills this from the collider.
    pub mass_properties: ReadMassProperties,
}

impl Rapier3dCharacterBundle {
    /// Create a character bundle with the defaults listed above.
    pub fn new() -> Self {
        Self {
            rigid_body: RigidBody::Dynamic,
            velocity: Velocity::default(),
            external_force: ExternalForce::default(),
            external_impulse: ExternalImpulse::default(),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            damping: Damping {
                linear_damping: 0.0,
                angular_damping: 0.0,
            },
            gravity_scale: GravityScale(1.0),
            mass_properties: ReadMassProperties::default(),
        }
    }

    /// Set the rigid body type.
    pub fn with_body(mut self, body: RigidBody) -> Self {
        self.rigid_body = body;
        self
    }

    /// Set the damping coefficients.
    pub fn with_damping(mut self, damping: Damping) -> Self {
        self.damping = damping;
        self
    }

    /// Set the locked axes.
    pub fn with_locked_axes(mut self, locked_axes: LockedAxes) -> Self {
        self.locked_axes = locked_axes;
        self
    }
}

impl Default for Rapier3dCharacterBundle {
    fn default() -> Self {
        Self::new()
    }
}

/// Bundle for creating a portal trigger volume with Rapier3D physics.
///
/// The volume is a sensor collider: bodies pass through it freely while
/// Rapier reports the overlaps that drive teleportation. Position it with a
/// `Transform` spawned alongside.
///
/// # Example
///
/// ```ignore
/// // A doorway-sized portal leading to `anchor`
/// commands.spawn((
///     Transform::from_xyz(8.0, 1.0, 0.0),
///     Rapier3dPortalBundle::new(anchor),
/// ));
/// ```
#[derive(Bundle)]
pub struct Rapier3dPortalBundle {
    /// Portal state: destination link and occupancy.
    pub portal: Portal,
    /// The trigger volume shape.
    pub collider: Collider,
    /// Marks the collider as a sensor so bodies pass through.
    pub sensor: Sensor,
    /// Enables the collision events the overlap translation reads.
    pub active_events: ActiveEvents,
}

impl Rapier3dPortalBundle {
    /// Create a portal volume leading to the given destination entity,
    /// with a doorway-sized default collider.
    pub fn new(destination: Entity) -> Self {
        Self {
            portal: Portal::new(destination),
            collider: Collider::cuboid(1.0, 1.0, 0.25),
            sensor: Sensor,
            active_events: ActiveEvents::COLLISION_EVENTS,
        }
    }

    /// Set the trigger volume shape.
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = collider;
        self
    }
}
