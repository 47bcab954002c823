//! Proximity detection and orbit freezing in a running app.

mod common;

use bevy::prelude::*;
use common::{click_start, create_app, flying_app, record, recorded, report_ready, run};
use mariner::bodies::{BodyRef, SolarSystem};
use mariner::config::FlightConfig;
use mariner::craft::Craft;
use mariner::proximity::{ActiveObject, ProximityChanged};

fn place_craft(app: &mut App, position: Vec3) {
    app.world_mut().resource_mut::<Craft>().position = position;
}

fn infos_position(app: &App) -> Vec3 {
    app.world().resource::<SolarSystem>().orbiting[0].world_position()
}

fn active(app: &App) -> Option<BodyRef> {
    app.world().resource::<ActiveObject>().0
}

/// Well above the orbital plane, clear of every boundary.
const OPEN_SPACE: Vec3 = Vec3::new(0.0, 50.0, 0.0);

#[test]
fn test_approach_freezes_body_until_departure() {
    let mut app = flying_app();
    record::<ProximityChanged>(&mut app);

    let infos = infos_position(&app);
    place_craft(&mut app, infos);
    app.update();
    assert_eq!(active(&app), Some(BodyRef::Orbiting(0)));

    let held = app.world().resource::<SolarSystem>().orbiting[0].pivot_angle;
    run(&mut app, 120);
    let system = app.world().resource::<SolarSystem>();
    assert_eq!(system.orbiting[0].pivot_angle, held);
    assert!(system.orbiting[0].frozen);
    assert_eq!(system.frozen_count(), 1);

    place_craft(&mut app, OPEN_SPACE);
    app.update();
    assert_eq!(active(&app), None);
    assert_eq!(app.world().resource::<SolarSystem>().frozen_count(), 0);

    assert_eq!(
        recorded::<ProximityChanged>(&app),
        &[
            ProximityChanged::BecameActive(BodyRef::Orbiting(0)),
            ProximityChanged::BecameInactive,
        ]
    );
}

#[test]
fn test_released_body_glides_back_on_schedule() {
    let mut app = flying_app();
    let infos = infos_position(&app);
    place_craft(&mut app, infos);
    run(&mut app, 600);

    place_craft(&mut app, OPEN_SPACE);
    app.update();

    let lag = |app: &App| {
        let world = app.world();
        let t = world.resource::<mariner::orbit::SceneClock>().elapsed();
        let body = &world.resource::<SolarSystem>().orbiting[0];
        (body.target_angle(t) - body.pivot_angle).abs()
    };

    let mut previous = lag(&app);
    assert!(previous > 0.3, "lag after freeze {previous}");
    for _ in 0..60 {
        app.update();
        let current = lag(&app);
        assert!(current < previous, "lag rose {previous} -> {current}");
        previous = current;
    }
}

#[test]
fn test_switching_between_overlapping_boundaries_is_silent() {
    let mut app = flying_app();
    record::<ProximityChanged>(&mut app);

    let direction = infos_position(&app).normalize();
    // Inside the pacing ring only.
    place_craft(&mut app, direction * 11.5);
    app.update();
    assert_eq!(active(&app), Some(BodyRef::Central));

    // Past the pacing ring, inside the Infos boundary.
    place_craft(&mut app, direction * 14.0);
    app.update();
    assert_eq!(active(&app), Some(BodyRef::Orbiting(0)));
    assert!(app.world().resource::<SolarSystem>().orbiting[0].frozen);

    assert_eq!(
        recorded::<ProximityChanged>(&app),
        &[ProximityChanged::BecameActive(BodyRef::Central)]
    );
}

#[test]
fn test_central_body_never_freezes_anything() {
    let mut app = flying_app();
    place_craft(&mut app, Vec3::new(0.0, 0.0, 10.0));
    run(&mut app, 10);

    assert_eq!(active(&app), Some(BodyRef::Central));
    assert_eq!(app.world().resource::<SolarSystem>().frozen_count(), 0);
}

#[test]
fn test_first_playing_frame_uses_current_pulse() {
    let mut app = create_app(FlightConfig::default());
    app.update();
    report_ready(&mut app);

    // Outside the unpulsed pacing ring (12.0), inside it at t = 0 (12.6).
    place_craft(&mut app, Vec3::new(0.0, 0.0, 12.3));
    click_start(&mut app);

    assert_eq!(active(&app), Some(BodyRef::Central));
    assert!((app.world().resource::<SolarSystem>().pulse - 1.05).abs() < 1e-6);
}
