//! Damped chase camera.
//!
//! The rig hangs off the craft: a pivot yawing about +Y, a holder pitching
//! about +X, and the camera itself on a fixed offset direction, scaled by
//! the zoom distance and looking back at the holder. Gestures only push
//! velocities; the rig then recenters, springs back inside soft limits and
//! damps on its own.

use bevy::prelude::*;

use crate::config::{CameraTuning, FlightConfig};
use crate::input::{CameraImpulse, FlightIntent};
use crate::types::{FlightSet, lerp};

/// State of the camera rig.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct CameraRig {
    /// Pivot rotation about +Y.
    pub yaw: f32,
    /// Holder rotation about +X.
    pub pitch: f32,
    /// Camera distance from the holder.
    pub zoom: f32,
    /// Angular velocity, `x` for pitch and `y` for yaw.
    pub velocity: Vec2,
    pub zoom_velocity: f32,
    /// Unit direction from the holder to the camera.
    pub offset_dir: Vec3,
}

impl CameraRig {
    /// Rig as it is while the loading overlay is still up.
    pub fn new(tuning: &CameraTuning) -> Self {
        Self {
            yaw: tuning.waiting_yaw,
            pitch: 0.0,
            zoom: tuning.zoom_initial,
            velocity: Vec2::ZERO,
            zoom_velocity: 0.0,
            offset_dir: tuning.camera_offset.normalize_or(Vec3::NEG_Z),
        }
    }

    /// Fold in the velocity changes gestures asked for.
    pub fn apply_impulse(&mut self, impulse: &CameraImpulse) {
        if impulse.reset_orbit {
            self.velocity = Vec2::ZERO;
        }
        if impulse.reset_zoom {
            self.zoom_velocity = 0.0;
        }
        self.velocity.x += impulse.pitch;
        self.velocity.y += impulse.yaw;
        self.zoom_velocity += impulse.zoom;
    }

    /// One relaxation tick: recenter, soft limits, integrate, damp, zoom.
    pub fn step(&mut self, dragging: bool, tuning: &CameraTuning) {
        if !dragging {
            self.pitch = lerp(self.pitch, 0.0, tuning.recenter_factor);
            self.yaw = lerp(self.yaw, 0.0, tuning.recenter_factor);
        }

        self.velocity.x -= overshoot(self.pitch, tuning.rotation_limit) * tuning.spring_stiffness;
        self.velocity.y -= overshoot(self.yaw, tuning.rotation_limit) * tuning.spring_stiffness;

        self.pitch += self.velocity.x;
        self.yaw += self.velocity.y;
        self.velocity *= tuning.damping;

        self.zoom += self.zoom_velocity;
        self.zoom_velocity *= tuning.damping;
        self.zoom = self.zoom.clamp(tuning.zoom_min, tuning.zoom_max);
        if self.zoom == tuning.zoom_min || self.zoom == tuning.zoom_max {
            self.zoom_velocity = 0.0;
        }
    }

    pub fn pivot_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    pub fn holder_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch)
    }

    /// Camera transform relative to the holder.
    pub fn camera_local(&self) -> Transform {
        Transform::from_translation(self.offset_dir * self.zoom).looking_at(Vec3::ZERO, Vec3::Y)
    }

    /// Camera transform in world space for a craft pose.
    pub fn camera_world(&self, craft: &Transform) -> Transform {
        let rig = Transform::from_rotation(self.pivot_rotation() * self.holder_rotation());
        craft.mul_transform(rig).mul_transform(self.camera_local())
    }
}

/// How far `angle` lies beyond `±limit`, signed; zero inside.
fn overshoot(angle: f32, limit: f32) -> f32 {
    if angle > limit {
        angle - limit
    } else if angle < -limit {
        angle + limit
    } else {
        0.0
    }
}

/// Plugin providing the camera stabilizer.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, stabilize_camera.in_set(FlightSet::Camera));
    }
}

fn stabilize_camera(
    intent: Res<FlightIntent>,
    config: Res<FlightConfig>,
    mut rig: ResMut<CameraRig>,
) {
    rig.apply_impulse(&intent.camera);
    rig.step(intent.dragging, &config.camera);
}
