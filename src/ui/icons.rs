//! Phosphor icon definitions for the HUD.
//!
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// Install the Phosphor icon font into the egui context.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

// Browse all icons at https://phosphoricons.com/

/// Analyze the body the craft is at.
pub const ANALYZE: &str = egui_phosphor::regular::SCAN;
/// Close the content panel.
pub const CLOSE: &str = egui_phosphor::regular::X;
/// Tilt steering toggle.
pub const TILT: &str = egui_phosphor::regular::DEVICE_MOBILE_SPEAKER;
/// Craft / flight hint.
pub const CRAFT: &str = egui_phosphor::regular::ROCKET_LAUNCH;
/// Keyboard hint.
pub const KEYBOARD: &str = egui_phosphor::regular::KEYBOARD;
/// Drag-to-look hint.
pub const DRAG: &str = egui_phosphor::regular::HAND_GRABBING;
/// Load failure.
pub const WARNING: &str = egui_phosphor::regular::WARNING;
/// Central body marker.
pub const CENTRAL: &str = egui_phosphor::regular::SUN_HORIZON;
/// Orbiting body marker.
pub const PLANET: &str = egui_phosphor::regular::GLOBE;
