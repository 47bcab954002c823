//! Mirror the frame snapshot onto scene entities.

use bevy::prelude::*;

use super::{BoundaryMaterial, BoundaryRing, CameraHolder, CameraPivot, MainCamera, OrbitPivot};
use crate::craft::Craft;
use crate::frame::FrameSnapshot;

pub fn sync_craft(
    craft: Res<Craft>,
    snapshot: Res<FrameSnapshot>,
    mut transforms: Query<&mut Transform>,
) {
    if let Ok(mut transform) = transforms.get_mut(craft.entity) {
        transform.translation = snapshot.craft.translation;
        transform.rotation = snapshot.craft.rotation;
    }
}

pub fn sync_bodies(
    snapshot: Res<FrameSnapshot>,
    mut pivots: Query<(&OrbitPivot, &mut Transform)>,
) {
    for (pivot, mut transform) in &mut pivots {
        if let Some(body) = snapshot.bodies.get(pivot.0) {
            transform.rotation = Quat::from_rotation_y(body.pivot_angle);
        }
    }
}

/// Scale every ring in its own plane and fade the shared material.
pub fn sync_boundaries(
    snapshot: Res<FrameSnapshot>,
    material: Option<Res<BoundaryMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rings: Query<&mut Transform, With<BoundaryRing>>,
) {
    let scale = Vec3::new(snapshot.pulse, 1.0, snapshot.pulse);
    for mut transform in &mut rings {
        transform.scale = scale;
    }

    if let Some(material) = material
        && let Some(mut material) = materials.get_mut(&material.0)
    {
        material.base_color.set_alpha(snapshot.boundary_opacity);
    }
}

pub fn sync_camera_rig(
    snapshot: Res<FrameSnapshot>,
    mut pivots: Query<
        &mut Transform,
        (With<CameraPivot>, Without<CameraHolder>, Without<MainCamera>),
    >,
    mut holders: Query<
        &mut Transform,
        (With<CameraHolder>, Without<CameraPivot>, Without<MainCamera>),
    >,
    mut cameras: Query<
        &mut Transform,
        (With<MainCamera>, Without<CameraPivot>, Without<CameraHolder>),
    >,
) {
    for mut transform in &mut pivots {
        transform.rotation = Quat::from_rotation_y(snapshot.pivot_yaw);
    }
    for mut transform in &mut holders {
        transform.rotation = Quat::from_rotation_x(snapshot.holder_pitch);
    }
    for mut transform in &mut cameras {
        *transform = snapshot.camera_local;
    }
}
