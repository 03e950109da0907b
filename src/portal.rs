//! Portal areas.
//!
//! A portal is a trigger volume that relocates any hover character entering
//! it to a linked destination entity and spins it around by 180 degrees.
//! The volume itself is supplied by the physics backend (a sensor collider
//! for the Rapier backend); this module owns the occupancy state machine.

use bevy::prelude::*;

/// Portal area state.
///
/// `destination` is fixed at creation: the entity whose translation the
/// occupant is teleported to. Occupancy tracks zero or one current hover
/// character; there is no queue, and a second character entering overwrites the
/// record (last-writer-wins). The occupant reference is observational only
/// and never manages that entity's lifetime.
///
/// A portal constructed via `Default` has no destination and is reported as
/// a configuration error when it is added to the world.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct Portal {
    destination: Entity,
    occupant: Option<Entity>,
}

impl Default for Portal {
    fn default() -> Self {
        Self {
            destination: Entity::PLACEHOLDER,
            occupant: None,
        }
    }
}

impl Portal {
    /// Create a portal leading to the given destination entity.
    pub fn new(destination: Entity) -> Self {
        Self {
            destination,
            occupant: None,
        }
    }

    /// The destination entity configured at creation.
    #[inline]
    pub fn destination(&self) -> Entity {
        self.destination
    }

    /// The hover character currently inside the volume, if any.
    #[inline]
    pub fn occupant(&self) -> Option<Entity> {
        self.occupant
    }

    pub(crate) fn set_occupant(&mut self, body: Entity) {
        self.occupant = Some(body);
    }

    pub(crate) fn clear_occupant(&mut self) {
        self.occupant = None;
    }
}

/// Overlap events feeding portal areas.
///
/// The physics backend translates its trigger-volume callbacks into these
/// (tests may also write them directly). `Started`/`Stopped` carry the
/// portal entity and the body that crossed the volume boundary.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalOverlapEvent {
    /// A body began overlapping the portal volume.
    Started {
        /// The portal entity.
        portal: Entity,
        /// The body that entered.
        body: Entity,
    },
    /// A body stopped overlapping the portal volume.
    Stopped {
        /// The portal entity.
        portal: Entity,
        /// The body that left.
        body: Entity,
    },
}
