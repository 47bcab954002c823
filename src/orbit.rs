//! Orbital easing, the scene clock and the boundary pulse.
//!
//! The clock and pulse are updated at the start of the frame so that
//! proximity sees the current boundary size; pivots ease later, after the
//! freeze flags are written.
//!
//! Each orbiting body has a target pivot angle `phase + t·ω` on the scene
//! clock. Unfrozen bodies close a fixed fraction of the remaining error
//! every tick; frozen bodies keep their angle. Because the target moves on
//! while a body is frozen, releasing it makes the body glide back onto its
//! schedule instead of jumping.

use bevy::prelude::*;

use crate::bodies::{SolarSystem, pulse_scale};
use crate::config::FlightConfig;
use crate::types::{FlightSet, lerp};

/// Seconds since the first playing frame.
///
/// Wall-clock based: it keeps advancing while the content panel is open.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneClock {
    /// Bevy elapsed time at the first playing frame.
    origin: Option<f64>,
    elapsed: f64,
}

impl SceneClock {
    /// Update from Bevy's elapsed time and return scene time. The first
    /// call pins the origin.
    pub fn tick(&mut self, now: f64) -> f64 {
        let origin = *self.origin.get_or_insert(now);
        self.elapsed = (now - origin).max(0.0);
        self.elapsed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_started(&self) -> bool {
        self.origin.is_some()
    }
}

/// Ease every unfrozen pivot toward its target at scene time `t`.
pub fn ease_orbits(system: &mut SolarSystem, t: f64, factor: f32) {
    for body in system.orbiting.iter_mut().filter(|b| !b.frozen) {
        body.pivot_angle = lerp(body.pivot_angle, body.target_angle(t), factor);
    }
}

/// Plugin providing the orbit scheduler.
pub struct OrbitPlugin;

impl Plugin for OrbitPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneClock>()
            .add_systems(Update, tick_scene_clock.in_set(FlightSet::Clock))
            .add_systems(Update, advance_orbits.in_set(FlightSet::Orbit));
    }
}

fn tick_scene_clock(
    time: Res<Time>,
    config: Res<FlightConfig>,
    mut clock: ResMut<SceneClock>,
    mut system: ResMut<SolarSystem>,
) {
    if !clock.is_started() {
        info!("Scene clock started");
    }
    let t = clock.tick(time.elapsed_secs_f64());

    system.pulse = pulse_scale(
        t,
        config.boundary.pulse_amplitude,
        config.boundary.pulse_frequency,
    );
}

fn advance_orbits(
    config: Res<FlightConfig>,
    clock: Res<SceneClock>,
    mut system: ResMut<SolarSystem>,
) {
    ease_orbits(&mut system, clock.elapsed(), config.orbit.ease_factor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::default_system;
    use approx::assert_relative_eq;

    #[test]
    fn test_clock_starts_at_first_tick() {
        let mut clock = SceneClock::default();
        assert!(!clock.is_started());
        assert_eq!(clock.tick(12.5), 0.0);
        assert_eq!(clock.tick(13.0), 0.5);
        assert_eq!(clock.elapsed(), 0.5);
    }

    #[test]
    fn test_frozen_body_keeps_angle() {
        let mut system = default_system();
        system.orbiting[1].frozen = true;
        let before = system.orbiting[1].pivot_angle;
        ease_orbits(&mut system, 100.0, 0.02);
        assert_eq!(system.orbiting[1].pivot_angle, before);
        assert!(system.orbiting[0].pivot_angle > 0.0);
    }

    #[test]
    fn test_ease_closes_fixed_fraction() {
        let mut system = default_system();
        let body = &mut system.orbiting[0];
        body.pivot_angle = 0.0;
        // Infos: phase 0, ω = 0.04, so the target at t = 25 is 1 rad.
        ease_orbits(&mut system, 25.0, 0.02);
        assert_relative_eq!(system.orbiting[0].pivot_angle, 0.02, epsilon = 1e-6);
    }

    #[test]
    fn test_tracking_lag_is_bounded() {
        let mut system = default_system();
        let dt = 1.0 / 60.0;
        for tick in 1..=600 {
            ease_orbits(&mut system, tick as f64 * dt, 0.02);
        }
        let body = &system.orbiting[0];
        let error = (body.pivot_angle - body.target_angle(10.0)).abs();
        assert!(error <= 0.4, "lag {error}");
    }
}
