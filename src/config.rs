//! Tuning parameters for the flight core.
//!
//! Every number the navigation feel depends on lives here so that hosts can
//! tweak it without touching the systems. `Default` reproduces the shipped
//! portfolio scene. All per-tick quantities are expressed per display frame,
//! not per second: the core is frame-driven.

use std::f32::consts::PI;

use bevy::prelude::*;

/// Errors raised by [`FlightConfig::validate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("zoom range is empty (min {min}, max {max})")]
    InvalidZoomRange { min: f32, max: f32 },

    #[error("initial zoom {initial} outside [{min}, {max}]")]
    InitialZoomOutOfRange { initial: f32, min: f32, max: f32 },

    #[error("{name} = {value} must lie in (0, 1]")]
    FactorOutOfRange { name: &'static str, value: f32 },

    #[error("{name} = {value} must be positive")]
    NonPositive { name: &'static str, value: f32 },

    #[error("body catalogue is empty")]
    EmptyCatalogue,

    #[error("duplicate body name {0:?} (names are content lookup keys)")]
    DuplicateName(String),
}

/// Design-time description of one orbiting body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDescriptor {
    /// Display name, also the content lookup key.
    pub name: String,
    /// Visual sphere radius.
    pub radius: f32,
    /// Distance from the central body.
    pub orbit: f32,
    /// Angular speed in radians per second of scene time.
    pub speed: f32,
}

impl BodyDescriptor {
    pub fn new(name: impl Into<String>, radius: f32, orbit: f32, speed: f32) -> Self {
        Self {
            name: name.into(),
            radius,
            orbit,
            speed,
        }
    }
}

/// Design-time description of the central body.
#[derive(Clone, Debug, PartialEq)]
pub struct CentralDescriptor {
    pub name: String,
    /// Radius used for the craft collision test.
    pub collision_radius: f32,
    /// Base radius of the interaction boundary (the pacing ring).
    pub boundary_radius: f32,
}

impl Default for CentralDescriptor {
    fn default() -> Self {
        Self {
            name: "Project_Mariner (This Site)".to_string(),
            collision_radius: 1.5,
            boundary_radius: 12.0,
        }
    }
}

/// The bodies making up the scene, in creation order.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyCatalogue {
    pub central: CentralDescriptor,
    pub orbiting: Vec<BodyDescriptor>,
}

impl Default for BodyCatalogue {
    fn default() -> Self {
        Self {
            central: CentralDescriptor::default(),
            orbiting: vec![
                BodyDescriptor::new("Infos", 1.0, 20.0, 0.04),
                BodyDescriptor::new("SURGE (The autonomous Robottaxi)", 1.5, 35.0, 0.025),
                BodyDescriptor::new(
                    "OpenImageLabel (A website to label images for professional photography)",
                    1.2,
                    50.0,
                    0.015,
                ),
                BodyDescriptor::new(
                    "Project Cablerack (A smarter way to cable-manage)",
                    0.8,
                    65.0,
                    0.03,
                ),
                BodyDescriptor::new("Socials/Other Sites", 2.0, 80.0, 0.01),
                BodyDescriptor::new(
                    "HA-Lightswitch (Making analog Lightswitches smart)",
                    1.8,
                    95.0,
                    0.012,
                ),
                BodyDescriptor::new(
                    "My Creative Work (Filming, flying, photography)",
                    1.4,
                    110.0,
                    0.008,
                ),
                BodyDescriptor::new(
                    "3D-Printing (The ultimate engineering-tool)",
                    1.6,
                    125.0,
                    0.006,
                ),
            ],
        }
    }
}

/// What a blocked move undoes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Restore the position only; the turn of the blocked tick still
    /// applies, so the player can steer away while pressed against the
    /// central body.
    #[default]
    RollbackPosition,
    /// Restore position and heading.
    RollbackPose,
}

/// Craft spawn pose and collision size.
#[derive(Clone, Debug, PartialEq)]
pub struct CraftTuning {
    pub start_position: Vec3,
    /// Rotation about +Y. At π the local forward axis points at the origin
    /// from the default start position.
    pub start_heading: f32,
    pub radius: f32,
    pub collision_policy: CollisionPolicy,
}

impl Default for CraftTuning {
    fn default() -> Self {
        Self {
            start_position: Vec3::new(0.0, 0.0, 30.0),
            start_heading: PI,
            radius: 5.0,
            collision_policy: CollisionPolicy::default(),
        }
    }
}

/// Gains for every input source.
#[derive(Clone, Debug, PartialEq)]
pub struct InputTuning {
    pub key_forward: f32,
    pub key_turn: f32,
    pub stick_forward: f32,
    pub stick_turn: f32,
    pub tilt_forward_factor: f32,
    pub tilt_turn_factor: f32,
    pub tilt_max_forward: f32,
    pub tilt_max_turn: f32,
    pub tilt_smoothing: f32,
    /// Camera velocity added per pixel of drag.
    pub drag_sensitivity: f32,
    /// Zoom velocity added per pixel of pinch distance change.
    pub pinch_sensitivity: f32,
    /// Zoom velocity added per wheel delta unit.
    pub wheel_sensitivity: f32,
    /// Wheel sensitivity while ctrl is held (trackpad pinch on desktop).
    pub wheel_fine_sensitivity: f32,
}

impl Default for InputTuning {
    fn default() -> Self {
        Self {
            key_forward: 0.3,
            key_turn: 0.05,
            stick_forward: 0.3,
            stick_turn: 0.05,
            tilt_forward_factor: 0.015,
            tilt_turn_factor: 0.003,
            tilt_max_forward: 0.35,
            tilt_max_turn: 0.06,
            tilt_smoothing: 0.12,
            drag_sensitivity: 0.0002,
            pinch_sensitivity: 0.03,
            wheel_sensitivity: 0.05,
            wheel_fine_sensitivity: 0.01,
        }
    }
}

/// Damped camera rig parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraTuning {
    /// Symmetric soft limit for pivot yaw and holder pitch.
    pub rotation_limit: f32,
    /// Restoring force per radian of overshoot beyond the limit.
    pub spring_stiffness: f32,
    /// Recentering ease factor applied while nobody is dragging.
    pub recenter_factor: f32,
    /// Multiplicative velocity decay per tick.
    pub damping: f32,
    pub zoom_initial: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Camera position relative to the holder; only its direction matters.
    pub camera_offset: Vec3,
    /// Pivot yaw while the loading overlay is still up.
    pub waiting_yaw: f32,
    /// Pivot yaw applied on the start click, relaxed back to zero afterwards.
    pub intro_yaw: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            rotation_limit: PI * 0.33,
            spring_stiffness: 0.03,
            recenter_factor: 0.05,
            damping: 0.90,
            zoom_initial: 15.0,
            zoom_min: 8.0,
            zoom_max: 25.0,
            camera_offset: Vec3::new(0.0, 4.0, -15.0),
            waiting_yaw: PI,
            intro_yaw: PI / 2.0,
        }
    }
}

/// Orbit easing parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitTuning {
    /// Fraction of the remaining angle error closed per tick.
    pub ease_factor: f32,
}

impl Default for OrbitTuning {
    fn default() -> Self {
        Self { ease_factor: 0.02 }
    }
}

/// Interaction boundary sizing and pulse.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryTuning {
    /// Added to an orbiting body's radius to get its base boundary radius.
    pub margin: f32,
    pub pulse_amplitude: f32,
    /// Angular frequency of the pulse in radians per second.
    pub pulse_frequency: f32,
    pub opacity_base: f32,
    pub opacity_range: f32,
}

impl Default for BoundaryTuning {
    fn default() -> Self {
        Self {
            margin: 6.0,
            pulse_amplitude: 0.1,
            pulse_frequency: 0.8,
            opacity_base: 0.3,
            opacity_range: 0.4,
        }
    }
}

impl BoundaryTuning {
    /// Largest scale the pulse ever reaches.
    pub fn max_scale(&self) -> f32 {
        1.0 + self.pulse_amplitude
    }
}

/// Complete configuration of the flight core.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct FlightConfig {
    pub bodies: BodyCatalogue,
    pub craft: CraftTuning,
    pub input: InputTuning,
    pub camera: CameraTuning,
    pub orbit: OrbitTuning,
    pub boundary: BoundaryTuning,
}

/// Two interaction boundaries that can intersect at some point of the orbit.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryOverlap {
    pub first: String,
    pub second: String,
    /// How far the boundaries can interpenetrate at worst.
    pub depth: f32,
}

impl FlightConfig {
    /// Check the configuration for values the systems cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cam = &self.camera;
        if cam.zoom_min >= cam.zoom_max {
            return Err(ConfigError::InvalidZoomRange {
                min: cam.zoom_min,
                max: cam.zoom_max,
            });
        }
        if !(cam.zoom_min..=cam.zoom_max).contains(&cam.zoom_initial) {
            return Err(ConfigError::InitialZoomOutOfRange {
                initial: cam.zoom_initial,
                min: cam.zoom_min,
                max: cam.zoom_max,
            });
        }

        for (name, value) in [
            ("camera.damping", cam.damping),
            ("camera.recenter_factor", cam.recenter_factor),
            ("camera.spring_stiffness", cam.spring_stiffness),
            ("orbit.ease_factor", self.orbit.ease_factor),
            ("input.tilt_smoothing", self.input.tilt_smoothing),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::FactorOutOfRange { name, value });
            }
        }

        for (name, value) in [
            ("craft.radius", self.craft.radius),
            ("camera.rotation_limit", cam.rotation_limit),
            ("central.collision_radius", self.bodies.central.collision_radius),
            ("central.boundary_radius", self.bodies.central.boundary_radius),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.bodies.orbiting.is_empty() {
            return Err(ConfigError::EmptyCatalogue);
        }

        let mut seen = std::collections::HashSet::new();
        seen.insert(self.bodies.central.name.as_str());
        for body in &self.bodies.orbiting {
            if body.radius <= 0.0 {
                return Err(ConfigError::NonPositive {
                    name: "body.radius",
                    value: body.radius,
                });
            }
            if body.orbit <= 0.0 {
                return Err(ConfigError::NonPositive {
                    name: "body.orbit",
                    value: body.orbit,
                });
            }
            if !seen.insert(body.name.as_str()) {
                return Err(ConfigError::DuplicateName(body.name.clone()));
            }
        }

        Ok(())
    }

    /// Base boundary radius of an orbiting body.
    pub fn boundary_radius(&self, body: &BodyDescriptor) -> f32 {
        body.radius + self.boundary.margin
    }

    /// Pairs of boundaries that can intersect at the pulse peak.
    ///
    /// Orbiting bodies are compared at closest approach (aligned pivots),
    /// the central boundary against each body's innermost reach. Overlaps
    /// are legal: proximity resolves them by central precedence first and
    /// creation order second.
    pub fn boundary_overlaps(&self) -> Vec<BoundaryOverlap> {
        let peak = self.boundary.max_scale();
        let central = &self.bodies.central;
        let central_reach = central.boundary_radius * peak;
        let mut overlaps = Vec::new();

        for (i, body) in self.bodies.orbiting.iter().enumerate() {
            let reach = self.boundary_radius(body) * peak;

            let depth = central_reach - (body.orbit - reach);
            if depth > 0.0 {
                overlaps.push(BoundaryOverlap {
                    first: central.name.clone(),
                    second: body.name.clone(),
                    depth,
                });
            }

            for other in &self.bodies.orbiting[i + 1..] {
                let other_reach = self.boundary_radius(other) * peak;
                let depth = reach + other_reach - (other.orbit - body.orbit).abs();
                if depth > 0.0 {
                    overlaps.push(BoundaryOverlap {
                        first: body.name.clone(),
                        second: other.name.clone(),
                        depth,
                    });
                }
            }
        }

        overlaps
    }
}
