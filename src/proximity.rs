//! Active-object selection and orbit freezing.
//!
//! The craft is "at" a body when it lies strictly inside that body's
//! pulsed boundary. The central body is checked first and wins outright.
//! Otherwise the first orbiting body in creation order wins, not the
//! nearest one, so overlapping boundaries resolve predictably.

use bevy::prelude::*;

use crate::bodies::{BodyRef, SolarSystem};
use crate::craft::Craft;
use crate::types::FlightSet;

/// The body the craft is currently at, if any.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActiveObject(pub Option<BodyRef>);

/// Raised when the craft enters or leaves every boundary.
///
/// Moving directly from one boundary into an overlapping one changes
/// [`ActiveObject`] without raising anything.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProximityChanged {
    BecameActive(BodyRef),
    BecameInactive,
}

/// Pick the active body for a craft at `craft`.
pub fn resolve_active(craft: Vec3, system: &SolarSystem) -> Option<BodyRef> {
    let central_radius = system.central.boundary_radius * system.pulse;
    if craft.distance_squared(system.central.position) < central_radius * central_radius {
        return Some(BodyRef::Central);
    }

    system
        .orbiting
        .iter()
        .position(|body| {
            let radius = body.boundary_radius * system.pulse;
            craft.distance_squared(body.world_position()) < radius * radius
        })
        .map(BodyRef::Orbiting)
}

/// Freeze exactly the active orbiting body and release the rest.
pub fn apply_freeze(system: &mut SolarSystem, active: Option<BodyRef>) {
    for (index, body) in system.orbiting.iter_mut().enumerate() {
        body.frozen = active == Some(BodyRef::Orbiting(index));
    }
}

/// Edge message for a change of active body, if one is due.
pub fn transition(previous: Option<BodyRef>, current: Option<BodyRef>) -> Option<ProximityChanged> {
    match (previous, current) {
        (None, Some(body)) => Some(ProximityChanged::BecameActive(body)),
        (Some(_), None) => Some(ProximityChanged::BecameInactive),
        _ => None,
    }
}

/// Plugin providing proximity detection.
pub struct ProximityPlugin;

impl Plugin for ProximityPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveObject>()
            .add_message::<ProximityChanged>()
            .add_systems(Update, detect_proximity.in_set(FlightSet::Proximity));
    }
}

fn detect_proximity(
    craft: Res<Craft>,
    mut system: ResMut<SolarSystem>,
    mut active: ResMut<ActiveObject>,
    mut changes: MessageWriter<ProximityChanged>,
) {
    let current = resolve_active(craft.position, &system);
    apply_freeze(&mut system, current);

    if let Some(change) = transition(active.0, current) {
        match change {
            ProximityChanged::BecameActive(body) => {
                info!("Approaching {}", system.name(body).unwrap_or("unknown body"));
            }
            ProximityChanged::BecameInactive => info!("Left interaction range"),
        }
        changes.write(change);
    } else if active.0 != current {
        debug!("Active object switched to {:?}", current);
    }

    active.set_if_neq(ActiveObject(current));
}
