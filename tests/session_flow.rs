//! Session state machine: loading, start, pause for the content panel.

mod common;

use bevy::prelude::*;
use common::{FRAME, click_start, create_app, flying_app, report_ready, run, send, state};
use mariner::camera::CameraRig;
use mariner::config::FlightConfig;
use mariner::craft::Craft;
use mariner::frame::{FrameSnapshot, WarpTunnel};
use mariner::input::{DeviceInput, FlightKey};
use mariner::orbit::SceneClock;
use mariner::proximity::ActiveObject;
use mariner::session::{
    AnalyzeRequest, AssetLoadEvent, ClosePanel, ContentPanel, LoadingStatus, SessionError,
    StartFlight,
};
use mariner::types::AppState;
use std::f32::consts::PI;

fn loading_app() -> App {
    let mut app = create_app(FlightConfig::default());
    app.update();
    app
}

/// Park the craft inside the central boundary and let proximity pick it up.
fn analyze_central(app: &mut App) {
    app.world_mut().resource_mut::<Craft>().position = Vec3::new(0.0, 0.0, 10.0);
    app.update();
    assert!(app.world().resource::<ActiveObject>().0.is_some());

    app.world_mut().write_message(AnalyzeRequest);
    app.update();
    app.update();
}

#[test]
fn test_session_starts_loading() {
    let app = loading_app();
    assert_eq!(state(&app), AppState::Loading);
    assert!(app.world().get_resource::<Craft>().is_none());
}

#[test]
fn test_progress_is_reported() {
    let mut app = loading_app();
    app.world_mut().write_message(AssetLoadEvent::Progress(0.4));
    app.update();

    let status = app.world().resource::<LoadingStatus>();
    assert_eq!(status.progress, 0.4);
    assert!(!status.ready);
}

#[test]
fn test_warp_tunnel_scrolls_only_while_loading() {
    let mut app = loading_app();
    let before = app.world().resource::<WarpTunnel>().offset;
    run(&mut app, 5);
    let after = app.world().resource::<WarpTunnel>().offset;
    assert!(after > before);

    report_ready(&mut app);
    click_start(&mut app);
    let playing = app.world().resource::<WarpTunnel>().offset;
    run(&mut app, 5);
    assert_eq!(app.world().resource::<WarpTunnel>().offset, playing);
}

#[test]
fn test_start_before_ready_is_ignored() {
    let mut app = loading_app();
    app.world_mut().write_message(StartFlight);
    run(&mut app, 3);
    assert_eq!(state(&app), AppState::Loading);

    // The early click is not remembered.
    report_ready(&mut app);
    run(&mut app, 3);
    assert_eq!(state(&app), AppState::Loading);

    click_start(&mut app);
    assert_eq!(state(&app), AppState::Playing);
}

#[test]
fn test_ready_creates_craft_and_waiting_camera() {
    let mut app = loading_app();
    let entity = report_ready(&mut app);

    let world = app.world();
    assert_eq!(world.resource::<Craft>().entity, entity);
    assert_eq!(world.resource::<Craft>().position, Vec3::new(0.0, 0.0, 30.0));
    assert_eq!(world.resource::<CameraRig>().yaw, PI);
    assert!(world.resource::<LoadingStatus>().can_start());
}

#[test]
fn test_duplicate_ready_is_ignored() {
    let mut app = loading_app();
    let first = report_ready(&mut app);
    report_ready(&mut app);
    assert_eq!(app.world().resource::<Craft>().entity, first);
}

#[test]
fn test_start_swings_camera_into_place() {
    let mut app = loading_app();
    report_ready(&mut app);
    click_start(&mut app);

    // Intro yaw of π/2, already relaxed by one frame.
    let yaw = app.world().resource::<CameraRig>().yaw;
    assert!(yaw < PI / 2.0 && yaw > 1.0, "yaw {yaw}");

    run(&mut app, 600);
    assert!(app.world().resource::<CameraRig>().yaw.abs() < 1e-2);
}

#[test]
fn test_load_failure_blocks_start() {
    let mut app = loading_app();
    app.world_mut()
        .write_message(AssetLoadEvent::Failed("craft.glb not found".into()));
    app.update();

    let status = app.world().resource::<LoadingStatus>();
    assert_eq!(
        status.error,
        Some(SessionError::AssetLoad("craft.glb not found".into()))
    );

    app.world_mut().write_message(StartFlight);
    run(&mut app, 3);
    assert_eq!(state(&app), AppState::Loading);
}

#[test]
fn test_analyze_without_active_object_is_ignored() {
    let mut app = flying_app();
    app.world_mut().write_message(AnalyzeRequest);
    run(&mut app, 2);
    assert_eq!(state(&app), AppState::Playing);
    assert!(!app.world().resource::<ContentPanel>().is_open());
}

#[test]
fn test_analyze_pauses_with_panel_open() {
    let mut app = flying_app();
    analyze_central(&mut app);

    assert_eq!(state(&app), AppState::Paused);
    assert_eq!(
        app.world().resource::<ContentPanel>().open_key.as_deref(),
        Some("Project_Mariner (This Site)")
    );
}

#[test]
fn test_pause_freezes_the_frame_loop() {
    let mut app = flying_app();
    analyze_central(&mut app);

    let craft = app.world().resource::<Craft>().clone();
    let rig = app.world().resource::<CameraRig>().clone();
    let tick = app.world().resource::<FrameSnapshot>().tick;

    send(&mut app, DeviceInput::KeyDown(FlightKey::Forward));
    run(&mut app, 30);

    let world = app.world();
    assert_eq!(world.resource::<Craft>().position, craft.position);
    assert_eq!(*world.resource::<CameraRig>(), rig);
    assert_eq!(world.resource::<FrameSnapshot>().tick, tick);
}

#[test]
fn test_close_resumes_and_scene_clock_kept_running() {
    let mut app = flying_app();
    analyze_central(&mut app);
    let paused_at = app.world().resource::<SceneClock>().elapsed();

    run(&mut app, 60);
    app.world_mut().write_message(ClosePanel);
    run(&mut app, 2);

    assert_eq!(state(&app), AppState::Playing);
    assert!(!app.world().resource::<ContentPanel>().is_open());

    let resumed_at = app.world().resource::<SceneClock>().elapsed();
    assert!(resumed_at - paused_at >= 60.0 * FRAME.as_secs_f64() * 0.99);
}
