//! Transient visuals: the collision forcefield, the accretion disk spin,
//! and the loading-to-flight camera switch.

use bevy::prelude::*;

use super::scene::WARP_ORIGIN;
use super::{AccretionDisk, Forcefield, LoadingCamera, MainCamera, WarpParticles};
use crate::craft::ForcefieldFlash;
use crate::frame::WarpTunnel;

/// Opacity lost per second after a flash.
const FORCEFIELD_FADE_PER_SEC: f32 = 1.5;
/// Disk rotation per frame.
const ACCRETION_SPIN: f32 = 0.005;

/// Current forcefield opacity.
#[derive(Resource, Debug, Default)]
pub struct ForcefieldFade {
    pub opacity: f32,
}

impl ForcefieldFade {
    /// Fade by `dt` seconds; returns whether anything is still visible.
    pub fn decay(&mut self, dt: f32) -> bool {
        self.opacity = (self.opacity - dt * FORCEFIELD_FADE_PER_SEC).max(0.0);
        self.opacity > 0.0
    }
}

pub fn flash_forcefield(
    mut flashes: MessageReader<ForcefieldFlash>,
    mut fade: ResMut<ForcefieldFade>,
) {
    if flashes.read().count() > 0 {
        fade.opacity = 1.0;
    }
}

pub fn decay_forcefield(
    time: Res<Time>,
    mut fade: ResMut<ForcefieldFade>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut fields: Query<(&MeshMaterial3d<StandardMaterial>, &mut Visibility), With<Forcefield>>,
) {
    if fade.opacity <= 0.0 {
        return;
    }
    let visible = fade.decay(time.delta_secs());

    for (material, mut visibility) in &mut fields {
        if let Some(mut material) = materials.get_mut(&material.0) {
            material.base_color.set_alpha(fade.opacity);
        }
        *visibility = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

pub fn spin_accretion_disk(mut disks: Query<&mut Transform, With<AccretionDisk>>) {
    for mut transform in &mut disks {
        transform.rotate_local_y(ACCRETION_SPIN);
    }
}

pub fn scroll_warp_tunnel(
    tunnel: Res<WarpTunnel>,
    mut particles: Query<&mut Transform, With<WarpParticles>>,
) {
    for mut transform in &mut particles {
        transform.translation.z = WARP_ORIGIN.z + tunnel.offset;
    }
}

/// Leave the warp tunnel for the chase camera.
pub fn switch_cameras(
    mut loading: Query<&mut Camera, (With<LoadingCamera>, Without<MainCamera>)>,
    mut main: Query<&mut Camera, (With<MainCamera>, Without<LoadingCamera>)>,
    mut particles: Query<&mut Visibility, With<WarpParticles>>,
) {
    for mut camera in &mut loading {
        camera.is_active = false;
    }
    for mut camera in &mut main {
        camera.is_active = true;
    }
    for mut visibility in &mut particles {
        *visibility = Visibility::Hidden;
    }
    info!("Dropped out of warp");
}
