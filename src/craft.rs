//! Craft motion and the central-body collision.
//!
//! The craft moves along its local forward axis, then turns. A move that
//! ends inside the collision sphere of the central body is rejected
//! outright: the position snaps back to where the tick started and a
//! [`ForcefieldFlash`] is raised for the renderer. There is no velocity and
//! no bounce.

use bevy::prelude::*;

use crate::bodies::{CentralBody, SolarSystem};
use crate::config::{CollisionPolicy, FlightConfig};
use crate::input::FlightIntent;
use crate::types::FlightSet;

/// The player's craft.
///
/// Inserted once the craft asset is ready and never removed.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct Craft {
    pub position: Vec3,
    /// Rotation about +Y in radians.
    pub heading: f32,
    /// Collision sphere radius.
    pub radius: f32,
    /// Scene entity the renderer created for the craft.
    pub entity: Entity,
}

/// Result of one motion tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// The translation was rolled back.
    Blocked,
}

/// Raised every tick a move is blocked by the central body.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ForcefieldFlash {
    /// Craft position after the rollback.
    pub position: Vec3,
}

impl Craft {
    pub fn new(entity: Entity, config: &FlightConfig) -> Self {
        Self {
            position: config.craft.start_position,
            heading: config.craft.start_heading,
            radius: config.craft.radius,
            entity,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.heading)
    }

    /// Unit vector the craft flies along.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation())
    }

    /// Distance below which the craft touches the central body.
    pub fn collision_threshold(&self, central: &CentralBody) -> f32 {
        self.radius + central.collision_radius
    }

    /// Advance one tick: translate by `forward`, turn by `turn`, then
    /// reject the translation if it entered the central body.
    pub fn step(
        &mut self,
        forward: f32,
        turn: f32,
        central: &CentralBody,
        policy: CollisionPolicy,
    ) -> MoveOutcome {
        let previous_position = self.position;
        let previous_heading = self.heading;

        self.position += self.forward() * forward;
        self.heading += turn;

        if self.position.distance(central.position) < self.collision_threshold(central) {
            self.position = previous_position;
            if policy == CollisionPolicy::RollbackPose {
                self.heading = previous_heading;
            }
            return MoveOutcome::Blocked;
        }

        MoveOutcome::Moved
    }
}

/// Plugin providing craft motion.
pub struct CraftPlugin;

impl Plugin for CraftPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ForcefieldFlash>()
            .add_systems(Update, move_craft.in_set(FlightSet::Motion));
    }
}

fn move_craft(
    intent: Res<FlightIntent>,
    config: Res<FlightConfig>,
    system: Res<SolarSystem>,
    mut craft: ResMut<Craft>,
    mut flashes: MessageWriter<ForcefieldFlash>,
) {
    let outcome = craft.step(
        intent.forward,
        intent.turn,
        &system.central,
        config.craft.collision_policy,
    );

    if outcome == MoveOutcome::Blocked {
        debug!("Craft blocked by {} at {:?}", system.central.name, craft.position);
        flashes.write(ForcefieldFlash {
            position: craft.position,
        });
    }
}
