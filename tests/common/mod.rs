//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use mariner::FlightPlugin;
use mariner::config::FlightConfig;
use mariner::input::DeviceInput;
use mariner::session::{AssetLoadEvent, StartFlight};
use mariner::types::AppState;

/// Fixed frame length used by every headless app.
pub const FRAME: Duration = Duration::from_micros(16_667);

/// Create a headless app running the flight core with fixed frame times.
pub fn create_app(config: FlightConfig) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .add_plugins(FlightPlugin::new(config));
    app
}

/// Spawn a stand-in craft entity and report it loaded.
pub fn report_ready(app: &mut App) -> Entity {
    let entity = app.world_mut().spawn(Transform::default()).id();
    app.world_mut().write_message(AssetLoadEvent::Ready(entity));
    app.update();
    entity
}

/// Click through the loading overlay and run until the first playing frame
/// has completed.
pub fn click_start(app: &mut App) {
    app.world_mut().write_message(StartFlight);
    app.update();
    app.update();
}

/// Default app, loaded and flying.
pub fn flying_app() -> App {
    let mut app = create_app(FlightConfig::default());
    app.update();
    report_ready(&mut app);
    click_start(&mut app);
    assert_eq!(state(&app), AppState::Playing);
    app
}

pub fn state(app: &App) -> AppState {
    *app.world().resource::<State<AppState>>().get()
}

/// Send one device event.
pub fn send(app: &mut App, input: DeviceInput) {
    app.world_mut().write_message(input);
}

/// Run `frames` updates.
pub fn run(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Messages of type `M` seen so far, collected in `Last`.
#[derive(Resource)]
pub struct Recorded<M: Message + Clone>(pub Vec<M>);

/// Start collecting messages of type `M` into [`Recorded`].
pub fn record<M: Message + Clone>(app: &mut App) {
    app.insert_resource(Recorded::<M>(Vec::new())).add_systems(
        Last,
        |mut reader: MessageReader<M>, mut out: ResMut<Recorded<M>>| {
            out.0.extend(reader.read().cloned());
        },
    );
}

pub fn recorded<M: Message + Clone>(app: &App) -> &[M] {
    &app.world().resource::<Recorded<M>>().0
}
