//! Test utilities for flight core tests.
//!
//! Provides fixtures for the default scene and assertions for the
//! invariants every frame has to keep.

use bevy::prelude::*;

use crate::bodies::SolarSystem;
use crate::config::FlightConfig;
use crate::craft::Craft;

pub use fixtures::{default_craft, default_system, park_bodies};

/// Fixtures for building scenes and craft.
pub mod fixtures {
    use super::*;

    /// The default catalogue, pivots at their creation phase, no pulse.
    pub fn default_system() -> SolarSystem {
        SolarSystem::from_config(&FlightConfig::default())
    }

    /// A craft at the default start pose with no scene entity.
    pub fn default_craft() -> Craft {
        Craft::new(Entity::PLACEHOLDER, &FlightConfig::default())
    }

    /// Put every orbiting body at the same pivot angle so positions are
    /// easy to reason about (angle 0 puts them on +X).
    pub fn park_bodies(system: &mut SolarSystem, angle: f32) {
        for body in &mut system.orbiting {
            body.pivot_angle = angle;
            body.phase_offset = angle;
        }
    }
}

/// Assertions for flight invariants.
pub mod assertions {
    use super::*;

    /// Assert the craft is not inside the central collision sphere.
    ///
    /// # Panics
    /// Panics if the craft centre is closer than collision radius plus
    /// craft radius.
    pub fn assert_outside_central(craft: &Craft, system: &SolarSystem) {
        let distance = craft.position.distance(system.central.position);
        let threshold = craft.collision_threshold(&system.central);
        assert!(
            distance >= threshold - 1e-4,
            "Craft penetrated the central body: distance={distance:.4}, threshold={threshold:.4}"
        );
    }

    /// Assert no more than one orbiting body is frozen.
    pub fn assert_single_freeze(system: &SolarSystem) {
        let frozen = system.frozen_count();
        assert!(frozen <= 1, "{frozen} bodies frozen at once");
    }
}

/// Utilities for creating headless Bevy apps for testing.
pub mod bevy_test {
    use bevy::prelude::*;
    use bevy::state::app::StatesPlugin;

    use crate::config::FlightConfig;
    use crate::frame::FlightPlugin;

    /// Create a minimal Bevy app with the flight core and no rendering.
    pub fn headless_app(config: FlightConfig) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .add_plugins(FlightPlugin::new(config));
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_craft_is_outside_central() {
        assertions::assert_outside_central(&default_craft(), &default_system());
    }

    #[test]
    fn test_parked_bodies_sit_on_x_axis() {
        let mut system = default_system();
        park_bodies(&mut system, 0.0);
        for body in &system.orbiting {
            let position = body.world_position();
            assert!((position.x - body.orbit_radius).abs() < 1e-4);
            assert!(position.z.abs() < 1e-4);
        }
    }

    #[test]
    fn test_headless_app_starts_loading() {
        let mut app = bevy_test::headless_app(FlightConfig::default());
        app.update();
        let state = app.world().resource::<State<crate::types::AppState>>();
        assert_eq!(*state.get(), crate::types::AppState::Loading);
    }
}
