//! UI module providing the egui overlays: loading screen, flight HUD and
//! content panel.

mod hud;
pub mod icons;
mod loading;
pub mod panel;

use bevy::camera::ClearColorConfig;
use bevy::prelude::*;
use bevy_egui::{EguiPrimaryContextPass, PrimaryEguiContext};

use crate::types::{AppState, FlightSet};

pub use hud::{AnalyzeAffordance, analyze_label};
pub use loading::loading_title;
pub use panel::{ContentEntry, ContentLibrary};

/// Shared palette.
mod colors {
    use bevy_egui::egui::Color32;

    pub const TEXT: Color32 = Color32::from_rgb(230, 230, 240);
    pub const MUTED: Color32 = Color32::from_rgb(150, 150, 170);
    pub const ACCENT: Color32 = Color32::from_rgb(120, 200, 255);
    pub const ERROR: Color32 = Color32::from_rgb(224, 85, 85);
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(18, 18, 28, 240);
    pub const DOCK_BG: Color32 = Color32::from_rgba_premultiplied(12, 12, 20, 210);
    pub const JOYSTICK_BASE: Color32 = Color32::from_rgba_premultiplied(30, 30, 45, 120);
    pub const JOYSTICK_KNOB: Color32 = Color32::from_rgba_premultiplied(90, 150, 200, 200);
}

/// Marker for the overlay camera that owns the primary egui context.
#[derive(Component)]
pub struct UiCamera;

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<icons::FontsInitialized>()
            .init_resource::<AnalyzeAffordance>()
            .insert_resource(ContentLibrary::portfolio())
            .add_systems(Startup, spawn_ui_camera)
            .add_systems(Update, hud::track_proximity.after(FlightSet::Proximity))
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    loading::loading_overlay_system.run_if(in_state(AppState::Loading)),
                    (hud::hud_system, hud::joystick_system)
                        .run_if(in_state(AppState::Playing)),
                    panel::content_panel_system.run_if(in_state(AppState::Paused)),
                )
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}

/// The scene cameras switch on and off across the session, so egui gets its
/// own camera drawn on top of whichever one is live.
fn spawn_ui_camera(mut commands: Commands) {
    commands.spawn((
        UiCamera,
        Camera2d,
        Camera {
            order: 10,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        PrimaryEguiContext,
    ));
}
