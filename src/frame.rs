//! Frame scheduler and the top-level flight plugin.
//!
//! Every playing frame runs the [`FlightSet`] stages in order. While
//! loading, only the warp tunnel moves; while paused, nothing in the chain
//! runs. The last stage publishes a [`FrameSnapshot`] for the renderer so
//! that it never has to read core state mid-frame.

use bevy::prelude::*;

use crate::bodies::{BodyRef, SolarSystem, pulse_phase};
use crate::camera::{CameraPlugin, CameraRig};
use crate::config::FlightConfig;
use crate::craft::{Craft, CraftPlugin};
use crate::input::InputPlugin;
use crate::orbit::{OrbitPlugin, SceneClock};
use crate::proximity::{ActiveObject, ProximityPlugin};
use crate::session::{LoadingStatus, SessionPlugin};
use crate::types::{AppState, FlightSet};

/// Length of the warp tunnel particle field along its axis.
pub const WARP_TUNNEL_LENGTH: f32 = 800.0;

/// Scroll position of the loading-scene particle field.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct WarpTunnel {
    pub offset: f32,
}

impl WarpTunnel {
    /// Scroll by one tick. Faster as loading progresses; wraps at the far
    /// end of the tunnel.
    pub fn advance(&mut self, progress: f32) {
        self.offset += (progress * 0.05 + 0.01) * 20.0;
        if self.offset > WARP_TUNNEL_LENGTH / 2.0 {
            self.offset = -WARP_TUNNEL_LENGTH / 2.0;
        }
    }
}

/// Render-facing view of one orbiting body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodySnapshot {
    pub pivot_angle: f32,
    pub position: Vec3,
    pub frozen: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub scene_time: f64,
    pub craft: Transform,
    /// Creation order, same indices as [`SolarSystem::orbiting`].
    pub bodies: Vec<BodySnapshot>,
    pub active: Option<BodyRef>,
    pub pivot_yaw: f32,
    pub holder_pitch: f32,
    pub zoom: f32,
    /// Camera transform relative to the rig holder.
    pub camera_local: Transform,
    /// Boundary scale applied to every boundary ring.
    pub pulse: f32,
    pub boundary_opacity: f32,
}

/// The flight core. Headless: add `MinimalPlugins` and `StatesPlugin` (or
/// `DefaultPlugins`) alongside it.
#[derive(Default)]
pub struct FlightPlugin {
    pub config: FlightConfig,
}

impl FlightPlugin {
    pub fn new(config: FlightConfig) -> Self {
        Self { config }
    }
}

impl Plugin for FlightPlugin {
    fn build(&self, app: &mut App) {
        if let Err(err) = self.config.validate() {
            panic!("invalid flight configuration: {err}");
        }
        for overlap in self.config.boundary_overlaps() {
            warn!(
                "Boundaries of {:?} and {:?} can overlap by {:.2}; the first listed wins",
                overlap.first, overlap.second, overlap.depth
            );
        }

        app.insert_resource(self.config.clone())
            .insert_resource(SolarSystem::from_config(&self.config))
            .init_resource::<WarpTunnel>()
            .init_resource::<FrameSnapshot>()
            .configure_sets(
                Update,
                (
                    FlightSet::Clock,
                    FlightSet::Input,
                    FlightSet::Motion,
                    FlightSet::Proximity,
                    FlightSet::Orbit,
                    FlightSet::Camera,
                    FlightSet::Handoff,
                )
                    .chain()
                    .run_if(flight_active),
            )
            .add_plugins((
                SessionPlugin,
                InputPlugin,
                CraftPlugin,
                ProximityPlugin,
                OrbitPlugin,
                CameraPlugin,
            ))
            .add_systems(
                Update,
                advance_warp_tunnel.run_if(in_state(AppState::Loading)),
            )
            .add_systems(Update, publish_snapshot.in_set(FlightSet::Handoff));

        info!(
            "Flight core ready with {} orbiting bodies",
            self.config.bodies.orbiting.len()
        );
    }
}

/// Run condition for the flight chain: playing, with a craft and rig.
pub fn flight_active(
    state: Option<Res<State<AppState>>>,
    craft: Option<Res<Craft>>,
    rig: Option<Res<CameraRig>>,
) -> bool {
    matches!(state.as_deref().map(State::get), Some(AppState::Playing))
        && craft.is_some()
        && rig.is_some()
}

fn advance_warp_tunnel(status: Res<LoadingStatus>, mut tunnel: ResMut<WarpTunnel>) {
    tunnel.advance(status.progress);
}

fn publish_snapshot(
    craft: Res<Craft>,
    rig: Res<CameraRig>,
    system: Res<SolarSystem>,
    active: Res<ActiveObject>,
    clock: Res<SceneClock>,
    config: Res<FlightConfig>,
    mut snapshot: ResMut<FrameSnapshot>,
) {
    let phase = pulse_phase(clock.elapsed(), config.boundary.pulse_frequency);

    snapshot.tick += 1;
    snapshot.scene_time = clock.elapsed();
    snapshot.craft = craft.transform();
    snapshot.bodies = system
        .orbiting
        .iter()
        .map(|body| BodySnapshot {
            pivot_angle: body.pivot_angle,
            position: body.world_position(),
            frozen: body.frozen,
        })
        .collect();
    snapshot.active = active.0;
    snapshot.pivot_yaw = rig.yaw;
    snapshot.holder_pitch = rig.pitch;
    snapshot.zoom = rig.zoom;
    snapshot.camera_local = rig.camera_local();
    snapshot.pulse = system.pulse;
    snapshot.boundary_opacity = config.boundary.opacity_base + config.boundary.opacity_range * phase;
}
