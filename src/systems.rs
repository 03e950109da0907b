//! Core controller systems.
//!
//! Frame-tick systems (input edges, orientation, interaction dispatch,
//! portal transitions) run in `Update`; movement systems run in
//! `FixedUpdate` and are generic over the physics backend so different
//! physics engines can be used.

use bevy::prelude::*;

use crate::backend::ControllerPhysicsBackend;
use crate::config::{ControllerConfig, HoverCharacter};
use crate::detection::{GroundProbe, LookTarget};
use crate::input::ControllerInput;
use crate::interact::{Interactable, Switched};
use crate::orientation::{ControllerCamera, Orientation};
use crate::portal::{Portal, PortalOverlapEvent};
use crate::state::{Airborne, Grounded};

/// Run rising-edge detection over every controller's held action state.
///
/// This turns held jump/interact booleans into one-shot requests. It runs
/// first in the frame so a press registered this frame is visible to this
/// frame's dispatch and to the next physics tick.
pub fn detect_input_edges(mut q_inputs: Query<&mut ControllerInput>) {
    for mut input in &mut q_inputs {
        input.detect_edges();
    }
}

/// Consume pointer deltas and write the derived rotations out.
///
/// The body transform receives the yaw-only facing; any camera linked
/// through [`ControllerCamera`] is moved to the body's eye point and gets
/// the combined pitch+yaw rotation. Both are rewritten every frame; the
/// controller owns the body's rotation and the camera's full transform.
pub fn apply_orientation(
    time: Res<Time>,
    mut q_bodies: Query<
        (
            &ControllerConfig,
            &mut ControllerInput,
            &mut Orientation,
            &mut Transform,
        ),
        With<HoverCharacter>,
    >,
    mut q_cameras: Query<(&ControllerCamera, &mut Transform), Without<HoverCharacter>>,
) {
    let dt = time.delta_secs();

    for (config, mut input, mut orientation, mut transform) in &mut q_bodies {
        let delta = input.take_look_delta();
        if delta != Vec2::ZERO {
            orientation.apply_look(delta, config.sensitivity, dt);
        }
        transform.rotation = orientation.body_rotation();
    }

    for (camera, mut camera_transform) in &mut q_cameras {
        let Ok((_, _, orientation, body_transform)) = q_bodies.get(camera.body) else {
            continue;
        };
        camera_transform.translation =
            body_transform.translation + body_transform.rotation * camera.eye_offset;
        camera_transform.rotation = orientation.camera_rotation();
    }
}

/// Sync the [`Grounded`]/[`Airborne`] marker pair from the ground probe.
pub fn sync_state_markers(
    mut commands: Commands,
    q_probes: Query<
        (
            Entity,
            &GroundProbe,
            &ControllerConfig,
            Has<Grounded>,
            Has<Airborne>,
        ),
        With<HoverCharacter>,
    >,
) {
    for (entity, probe, config, has_grounded, has_airborne) in &q_probes {
        if probe.is_airborne(config.hover_height) {
            if has_grounded {
                commands.entity(entity).remove::<Grounded>();
            }
            if !has_airborne {
                commands.entity(entity).insert(Airborne);
            }
        } else {
            if has_airborne {
                commands.entity(entity).remove::<Airborne>();
            }
            if !has_grounded {
                commands.entity(entity).insert(Grounded);
            }
        }
    }
}

/// Dispatch pending interact requests against the current look target.
///
/// The request is consumed whether or not it lands on anything, mirroring
/// a one-shot button event. A switch only happens when the reach-bounded
/// cast currently succeeds and the targeted entity is an [`Interactable`];
/// the flip is announced through a [`Switched`] trigger on that entity.
pub fn dispatch_interaction(
    mut commands: Commands,
    mut q_controllers: Query<(&mut ControllerInput, &LookTarget), With<HoverCharacter>>,
    mut q_interactables: Query<&mut Interactable>,
) {
    for (mut input, target) in &mut q_controllers {
        if !input.take_interact_request() {
            continue;
        }
        if !target.in_reach {
            continue;
        }
        let Some(entity) = target.entity else {
            continue;
        };
        let Ok(mut interactable) = q_interactables.get_mut(entity) else {
            continue;
        };

        let pressed = interactable.switch();
        debug!("switched {entity} to pressed={pressed}");
        commands.trigger_targets(Switched { pressed }, entity);
    }
}

/// Report portals whose destination cannot work, as soon as they appear.
///
/// A broken destination is a configuration error: it is logged and the
/// portal is left in place as an inert trigger volume.
pub fn validate_portals(
    q_portals: Query<(Entity, &Portal), Added<Portal>>,
    q_anchors: Query<(), With<Transform>>,
) {
    for (entity, portal) in &q_portals {
        if portal.destination() == Entity::PLACEHOLDER {
            error!("portal {entity} has no destination configured");
        } else if q_anchors.get(portal.destination()).is_err() {
            error!(
                "portal {entity} destination {} does not exist or has no transform",
                portal.destination()
            );
        }
    }
}

/// Drive portal occupancy and teleportation from backend overlap events.
///
/// A hover character entering a portal volume is recorded as the occupant,
/// moved to the destination entity's translation, and turned around by 180
/// degrees of yaw; the body and camera transforms are re-derived in place so
/// the new facing is visible the same frame. Bodies that are not hover
/// characters pass through without any effect on entry. Any body leaving the
/// volume clears the occupancy record.
///
/// The destination must be a plain transform entity, not a controller body
/// or camera. A destination that has gone missing at transition time is
/// logged and the entry teleports nothing; occupancy still tracks the volume.
pub fn portal_transitions(
    mut events: EventReader<PortalOverlapEvent>,
    mut q_portals: Query<&mut Portal>,
    mut q_bodies: Query<(&mut Transform, &mut Orientation), With<HoverCharacter>>,
    mut q_cameras: Query<(&ControllerCamera, &mut Transform), Without<HoverCharacter>>,
    q_anchors: Query<&Transform, (Without<HoverCharacter>, Without<ControllerCamera>)>,
) {
    for event in events.read() {
        match *event {
            PortalOverlapEvent::Started { portal, body } => {
                if !q_bodies.contains(body) {
                    continue;
                }
                let Ok(mut portal_state) = q_portals.get_mut(portal) else {
                    continue;
                };
                portal_state.set_occupant(body);

                let destination = portal_state.destination();
                let Ok(anchor) = q_anchors.get(destination) else {
                    warn!(
                        "portal {portal} destination {destination} is missing; \
                         occupant not teleported"
                    );
                    continue;
                };
                let target_translation = anchor.translation;

                let Ok((mut body_transform, mut orientation)) = q_bodies.get_mut(body) else {
                    continue;
                };
                orientation.adjust_yaw(180.0);
                body_transform.translation = target_translation;
                body_transform.rotation = orientation.body_rotation();
                info!("teleported {body} through portal {portal} to {target_translation}");

                for (camera, mut camera_transform) in &mut q_cameras {
                    if camera.body != body {
                        continue;
                    }
                    camera_transform.translation =
                        body_transform.translation + body_transform.rotation * camera.eye_offset;
                    camera_transform.rotation = orientation.camera_rotation();
                }
            }
            PortalOverlapEvent::Stopped { portal, .. } => {
                if let Ok(mut portal_state) = q_portals.get_mut(portal) {
                    portal_state.clear_occupant();
                }
            }
        }
    }
}

/// Write the desired horizontal velocity from the movement axes.
///
/// Runs every physics tick, grounded or not: the input axes are rotated by
/// the body's yaw, scaled by the configured speed, and written directly to
/// the horizontal velocity. Vertical velocity is left to gravity, the hover
/// force, and jumps. The axes are intentionally not normalized, so a
/// diagonal runs faster than a cardinal by a factor of √2.
pub fn apply_locomotion<B: ControllerPhysicsBackend>(world: &mut World) {
    let entities: Vec<(Entity, ControllerConfig, Vec2, Quat)> = world
        .query_filtered::<(Entity, &ControllerConfig, &ControllerInput, &Orientation), (
            With<HoverCharacter>,
            With<B::VelocityComponent>,
        )>()
        .iter(world)
        .map(|(e, config, input, orientation)| {
            (e, *config, input.movement, orientation.body_rotation())
        })
        .collect();

    for (entity, config, movement, facing) in entities {
        let current = B::get_velocity(world, entity);
        // Forward input points down the body's -Z axis.
        let horizontal = facing * Vec3::new(movement.x, 0.0, -movement.y) * config.speed;
        B::set_velocity(world, entity, Vec3::new(horizontal.x, current.y, horizontal.z));
    }
}

/// Apply the jump impulse for pending jump requests.
///
/// The request is consumed on first observation whether or not the jump
/// fires; a press while airborne is simply lost (no buffering, no coyote
/// window). A qualifying jump applies a single velocity-change impulse, so
/// jump height does not depend on the tick rate.
pub fn apply_jump<B: ControllerPhysicsBackend>(world: &mut World) {
    let candidates: Vec<(Entity, f32, bool)> = world
        .query_filtered::<(Entity, &ControllerConfig, &ControllerInput, &GroundProbe), (
            With<HoverCharacter>,
            With<B::VelocityComponent>,
        )>()
        .iter(world)
        .filter(|(_, _, input, _)| input.has_jump_request())
        .map(|(e, config, _, probe)| {
            (e, config.jump_impulse, probe.is_airborne(config.hover_height))
        })
        .collect();

    for (entity, jump_impulse, airborne) in candidates {
        let Some(mut input) = world.get_mut::<ControllerInput>(entity) else {
            continue;
        };
        if !input.take_jump_request() {
            continue;
        }
        if airborne {
            continue;
        }

        B::apply_impulse(world, entity, Vec3::Y * jump_impulse);
        debug!("jump impulse applied to {entity}");
    }
}

/// Apply the hover spring force against the last ground probe sample.
///
/// The force is the continuous spring-damper law
/// `strength * (hover_height - distance) - damping * vertical_velocity`,
/// applied along +Y. It is skipped entirely while airborne: beyond the
/// hover height the spring neither pushes nor pulls, which is what lets a
/// jump leave the ground instead of being reeled back in.
///
/// The probe sample is refreshed once per frame tick, so a fixed tick may
/// act on a sample up to one frame old.
pub fn apply_hover_force<B: ControllerPhysicsBackend>(world: &mut World) {
    let entities: Vec<(Entity, ControllerConfig, GroundProbe)> = world
        .query_filtered::<(Entity, &ControllerConfig, &GroundProbe), (
            With<HoverCharacter>,
            With<B::VelocityComponent>,
        )>()
        .iter(world)
        .map(|(e, config, probe)| (e, *config, *probe))
        .collect();

    for (entity, config, probe) in entities {
        if probe.is_airborne(config.hover_height) {
            continue;
        }

        let vertical_velocity = B::get_velocity(world, entity).y;
        let lift = config.hover_strength * probe.height_error(config.hover_height)
            - config.vertical_damping * vertical_velocity;
        B::apply_force(world, entity, Vec3::Y * lift);
    }
}
