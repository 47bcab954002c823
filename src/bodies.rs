//! The central body and the orbiting bodies the craft can analyze.
//!
//! Bodies are kept in a single resource in creation order. That order is
//! part of the proximity contract (first match wins), so it must never be
//! rebuilt from an ECS query, whose iteration order is unspecified.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::config::FlightConfig;

/// Reference to one body of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyRef {
    Central,
    /// Index into [`SolarSystem::orbiting`] (creation order).
    Orbiting(usize),
}

/// The body fixed at the origin.
#[derive(Clone, Debug)]
pub struct CentralBody {
    pub name: String,
    pub position: Vec3,
    pub collision_radius: f32,
    pub boundary_radius: f32,
}

/// A body circling the central body on a flat orbit.
#[derive(Clone, Debug)]
pub struct OrbitingBody {
    pub name: String,
    /// Visual sphere radius.
    pub radius: f32,
    pub orbit_radius: f32,
    /// Radians per second of scene time.
    pub angular_speed: f32,
    /// Current rotation of the orbit pivot about +Y.
    pub pivot_angle: f32,
    /// `index / N · 2π`, fixed at creation.
    pub phase_offset: f32,
    /// Boundary radius before the pulse is applied.
    pub boundary_radius: f32,
    /// Set while this body is the active object; suspends orbital easing.
    pub frozen: bool,
}

impl OrbitingBody {
    /// World position derived from the live pivot angle.
    pub fn world_position(&self) -> Vec3 {
        Quat::from_rotation_y(self.pivot_angle) * Vec3::new(self.orbit_radius, 0.0, 0.0)
    }

    /// Target pivot angle at scene time `t`.
    pub fn target_angle(&self, t: f64) -> f32 {
        (self.phase_offset as f64 + t * self.angular_speed as f64) as f32
    }
}

/// Every body in the scene plus the current boundary pulse.
#[derive(Resource, Clone, Debug)]
pub struct SolarSystem {
    pub central: CentralBody,
    /// Creation order; proximity scans in this order.
    pub orbiting: Vec<OrbitingBody>,
    /// Current boundary scale, see [`pulse_scale`].
    pub pulse: f32,
}

impl SolarSystem {
    /// Build the scene from the catalogue. Each pivot starts at its phase.
    pub fn from_config(config: &FlightConfig) -> Self {
        let central = &config.bodies.central;
        let count = config.bodies.orbiting.len();

        let orbiting = config
            .bodies
            .orbiting
            .iter()
            .enumerate()
            .map(|(index, descriptor)| {
                let phase_offset = index as f32 / count as f32 * TAU;
                OrbitingBody {
                    name: descriptor.name.clone(),
                    radius: descriptor.radius,
                    orbit_radius: descriptor.orbit,
                    angular_speed: descriptor.speed,
                    pivot_angle: phase_offset,
                    phase_offset,
                    boundary_radius: config.boundary_radius(descriptor),
                    frozen: false,
                }
            })
            .collect();

        Self {
            central: CentralBody {
                name: central.name.clone(),
                position: Vec3::ZERO,
                collision_radius: central.collision_radius,
                boundary_radius: central.boundary_radius,
            },
            orbiting,
            pulse: 1.0,
        }
    }

    /// Display name used as the content lookup key.
    pub fn name(&self, body: BodyRef) -> Option<&str> {
        match body {
            BodyRef::Central => Some(self.central.name.as_str()),
            BodyRef::Orbiting(i) => self.orbiting.get(i).map(|b| b.name.as_str()),
        }
    }

    /// World position of a body.
    pub fn position(&self, body: BodyRef) -> Option<Vec3> {
        match body {
            BodyRef::Central => Some(self.central.position),
            BodyRef::Orbiting(i) => self.orbiting.get(i).map(OrbitingBody::world_position),
        }
    }

    /// Boundary radius with the current pulse applied.
    pub fn current_boundary(&self, body: BodyRef) -> Option<f32> {
        match body {
            BodyRef::Central => Some(self.central.boundary_radius * self.pulse),
            BodyRef::Orbiting(i) => self.orbiting.get(i).map(|b| b.boundary_radius * self.pulse),
        }
    }

    /// Number of frozen orbiting bodies.
    pub fn frozen_count(&self) -> usize {
        self.orbiting.iter().filter(|b| b.frozen).count()
    }
}

/// Boundary scale at scene time `t`: `1 + a·(0.5 + 0.5·sin(ω·t))`.
pub fn pulse_scale(t: f64, amplitude: f32, frequency: f32) -> f32 {
    1.0 + amplitude * pulse_phase(t, frequency)
}

/// Normalized pulse in [0, 1].
pub fn pulse_phase(t: f64, frequency: f32) -> f32 {
    ((t * frequency as f64).sin() * 0.5 + 0.5) as f32
}
