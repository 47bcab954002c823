//! Mariner - Portfolio Solar System
//!
//! Fly a small craft around a black hole and its planets; approach a planet
//! and analyze it to read about the project it stands for.
//!
//! Usage: `mariner [path/to/craft.glb]`. Without a model path a built-in
//! placeholder hull is used.

use bevy::prelude::*;
use bevy_egui::{EguiGlobalSettings, EguiPlugin};

use mariner::FlightPlugin;
use mariner::config::FlightConfig;
use mariner::input::DesktopInputPlugin;
use mariner::render::{CraftModel, RenderPlugin};
use mariner::ui::UiPlugin;

fn main() {
    let model = std::env::args()
        .nth(1)
        .map(CraftModel::Gltf)
        .unwrap_or_default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Mariner".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // The UI camera is spawned explicitly by UiPlugin
        .insert_resource(EguiGlobalSettings {
            auto_create_primary_context: false,
            ..default()
        })
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(model)
        .add_plugins((
            FlightPlugin::new(FlightConfig::default()),
            DesktopInputPlugin,
            RenderPlugin,
            UiPlugin,
        ))
        .run();
}
