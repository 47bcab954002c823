//! Rendering collaborator for the flight core.
//!
//! Spawns the scene, loads the craft model, and mirrors the core's
//! [`FrameSnapshot`](crate::frame::FrameSnapshot) onto entity transforms
//! and materials. Nothing here feeds back into the core except the asset
//! load events.

mod effects;
mod labels;
pub mod loader;
mod scene;
mod sync;

use bevy::prelude::*;

use crate::craft::Craft;
use crate::types::{AppState, FlightSet};

use self::effects::{
    ForcefieldFade, decay_forcefield, flash_forcefield, scroll_warp_tunnel, spin_accretion_disk,
    switch_cameras,
};
use self::labels::LabelPlugin;
use self::loader::{begin_craft_load, poll_craft_load};
use self::scene::{
    spawn_camera_rig, spawn_lighting, spawn_loading_scene, spawn_solar_system, spawn_starfield,
};
use self::sync::{sync_bodies, sync_boundaries, sync_camera_rig, sync_craft};

pub use self::loader::CraftModel;

/// Marks the orbit pivot entity of the orbiting body with this index.
#[derive(Component, Clone, Copy, Debug)]
pub struct OrbitPivot(pub usize);

/// Marks a boundary ring. All rings share one material.
#[derive(Component, Clone, Copy, Debug)]
pub struct BoundaryRing;

/// Rig entity rotated by the pivot yaw.
#[derive(Component)]
pub struct CameraPivot;

/// Rig entity rotated by the holder pitch.
#[derive(Component)]
pub struct CameraHolder;

/// The chase camera.
#[derive(Component)]
pub struct MainCamera;

/// The camera looking down the warp tunnel while loading.
#[derive(Component)]
pub struct LoadingCamera;

/// Particle field of the warp tunnel.
#[derive(Component)]
pub struct WarpParticles;

/// The translucent sphere shown when the craft hits the central body.
#[derive(Component)]
pub struct Forcefield;

/// The spinning disk around the central body.
#[derive(Component)]
pub struct AccretionDisk;

/// Material shared by every boundary ring, so one write pulses them all.
#[derive(Resource)]
pub struct BoundaryMaterial(pub Handle<StandardMaterial>);

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CraftModel>()
            .init_resource::<ForcefieldFade>()
            .add_plugins(LabelPlugin)
            .add_systems(
                Startup,
                (
                    spawn_lighting,
                    spawn_starfield,
                    spawn_solar_system,
                    spawn_loading_scene,
                    begin_craft_load,
                ),
            )
            .add_systems(
                Update,
                (
                    poll_craft_load.run_if(in_state(AppState::Loading)),
                    scroll_warp_tunnel.run_if(in_state(AppState::Loading)),
                    spawn_camera_rig.run_if(resource_added::<Craft>),
                ),
            )
            .add_systems(
                OnTransition {
                    exited: AppState::Loading,
                    entered: AppState::Playing,
                },
                switch_cameras,
            )
            .add_systems(
                Update,
                (
                    sync_craft,
                    sync_bodies,
                    sync_boundaries,
                    sync_camera_rig,
                    flash_forcefield,
                    spin_accretion_disk,
                )
                    .after(FlightSet::Handoff)
                    .run_if(in_state(AppState::Playing)),
            )
            .add_systems(Update, decay_forcefield.after(flash_forcefield));
    }
}
