//! Property-based tests for the flight core using proptest.
//!
//! These tests check the per-frame invariants across arbitrary inputs.

use bevy::prelude::*;
use proptest::prelude::*;

use crate::bodies::BodyRef;
use crate::camera::CameraRig;
use crate::config::{CameraTuning, CollisionPolicy};
use crate::input::CameraImpulse;
use crate::orbit::ease_orbits;
use crate::proximity::{apply_freeze, resolve_active};
use crate::test_utils::{assertions, fixtures};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Zoom never leaves its range, whatever the gestures, and a clamped
    /// zoom has no velocity left.
    #[test]
    fn prop_zoom_stays_in_range(
        impulses in prop::collection::vec(-5.0f32..5.0, 1..200),
        dragging in any::<bool>(),
    ) {
        let tuning = CameraTuning::default();
        let mut rig = CameraRig::new(&tuning);

        for zoom in impulses {
            rig.apply_impulse(&CameraImpulse { zoom, ..default() });
            rig.step(dragging, &tuning);

            prop_assert!(rig.zoom >= tuning.zoom_min && rig.zoom <= tuning.zoom_max);
            if rig.zoom == tuning.zoom_min || rig.zoom == tuning.zoom_max {
                prop_assert_eq!(rig.zoom_velocity, 0.0);
            }
        }
    }

    /// Released camera angles always settle back toward zero.
    #[test]
    fn prop_camera_recenters(
        pitch in -0.5f32..0.5,
        yaw in -0.5f32..0.5,
    ) {
        let tuning = CameraTuning::default();
        let mut rig = CameraRig::new(&tuning);
        rig.apply_impulse(&CameraImpulse { pitch, yaw, ..default() });

        for _ in 0..600 {
            rig.step(false, &tuning);
        }

        prop_assert!(rig.pitch.abs() < 1e-3, "pitch {}", rig.pitch);
        prop_assert!(rig.yaw.abs() < 1e-3, "yaw {}", rig.yaw);
    }

    /// Whatever the inputs, the craft never ends a tick inside the central
    /// body.
    #[test]
    fn prop_craft_never_penetrates(
        steps in prop::collection::vec((-1.0f32..1.0, -0.2f32..0.2), 1..400),
        rollback_pose in any::<bool>(),
    ) {
        let system = fixtures::default_system();
        let mut craft = fixtures::default_craft();
        let policy = if rollback_pose {
            CollisionPolicy::RollbackPose
        } else {
            CollisionPolicy::RollbackPosition
        };

        for (forward, turn) in steps {
            craft.step(forward, turn, &system.central, policy);
            assertions::assert_outside_central(&craft, &system);
        }
    }

    /// At most one body is frozen, and only the one that is active.
    #[test]
    fn prop_single_freeze(
        x in -130.0f32..130.0,
        z in -130.0f32..130.0,
        angle in 0.0f32..std::f32::consts::TAU,
        pulse in 1.0f32..1.1,
    ) {
        let mut system = fixtures::default_system();
        fixtures::park_bodies(&mut system, angle);
        system.pulse = pulse;

        let active = resolve_active(Vec3::new(x, 0.0, z), &system);
        apply_freeze(&mut system, active);

        assertions::assert_single_freeze(&system);
        match active {
            Some(BodyRef::Orbiting(index)) => prop_assert!(system.orbiting[index].frozen),
            _ => prop_assert_eq!(system.frozen_count(), 0),
        }
    }

    /// The active body is the first containing body in creation order, and
    /// the central body takes precedence.
    #[test]
    fn prop_first_match_wins(
        x in -130.0f32..130.0,
        z in -130.0f32..130.0,
        angle in 0.0f32..std::f32::consts::TAU,
    ) {
        let mut system = fixtures::default_system();
        fixtures::park_bodies(&mut system, angle);
        let craft = Vec3::new(x, 0.0, z);

        let contains = |body: BodyRef| {
            let (Some(position), Some(radius)) =
                (system.position(body), system.current_boundary(body))
            else {
                return false;
            };
            craft.distance_squared(position) < radius * radius
        };

        let expected = if contains(BodyRef::Central) {
            Some(BodyRef::Central)
        } else {
            (0..system.orbiting.len())
                .map(BodyRef::Orbiting)
                .find(|body| contains(*body))
        };
        prop_assert_eq!(resolve_active(craft, &system), expected);
    }

    /// After a freeze, the catch-up error shrinks every tick until the body
    /// is back within its steady tracking lag.
    #[test]
    fn prop_catch_up_is_monotone(
        index in 0usize..8,
        frozen_for in 30.0f64..300.0,
    ) {
        let mut system = fixtures::default_system();
        let dt = 1.0 / 60.0;
        let factor = 0.02;
        let steady_lag = {
            let body = &system.orbiting[index];
            (1.0 - factor) * body.angular_speed * dt as f32 / factor
        };

        // Pivot left at its phase while the scene clock ran on.
        let mut t = frozen_for;
        let error_at = |system: &crate::bodies::SolarSystem, t: f64| {
            let body = &system.orbiting[index];
            (body.target_angle(t) - body.pivot_angle).abs()
        };
        let mut previous = error_at(&system, t);

        for _ in 0..2000 {
            t += dt;
            ease_orbits(&mut system, t, factor);
            let error = error_at(&system, t);
            if previous > steady_lag + 1e-3 {
                prop_assert!(error <= previous + 1e-5, "error rose {} -> {}", previous, error);
            }
            previous = error;
        }
    }
}
