//! Flight HUD: bottom bar with the analyze button and tilt toggle, a
//! controls hint, and the on-screen joystick.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{EguiContexts, egui};

use super::{colors, icons};
use crate::bodies::{BodyRef, SolarSystem};
use crate::input::{InputState, JoystickZone, TiltRequest};
use crate::proximity::{ActiveObject, ProximityChanged};
use crate::session::AnalyzeRequest;

/// Whether the analyze button is offered.
///
/// Entering and leaving interaction range toggle it. The label itself
/// follows [`ActiveObject`], so a direct hop between overlapping boundaries
/// renames the button without hiding it.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnalyzeAffordance {
    pub shown: bool,
}

pub fn track_proximity(
    mut changes: MessageReader<ProximityChanged>,
    mut affordance: ResMut<AnalyzeAffordance>,
) {
    for change in changes.read() {
        affordance.shown = matches!(change, ProximityChanged::BecameActive(_));
    }
}

/// Label for the analyze button, if it should be shown.
pub fn analyze_label(active: Option<BodyRef>, system: &SolarSystem) -> Option<String> {
    let body = active?;
    let icon = match body {
        BodyRef::Central => icons::CENTRAL,
        BodyRef::Orbiting(_) => icons::PLANET,
    };
    let name = system.name(body)?;
    Some(format!("{} Analyze {icon} {name}", icons::ANALYZE))
}

pub fn hud_system(
    mut contexts: EguiContexts,
    affordance: Res<AnalyzeAffordance>,
    active: Res<ActiveObject>,
    system: Res<SolarSystem>,
    input: Res<InputState>,
    mut analyze: MessageWriter<AnalyzeRequest>,
    mut tilt: MessageWriter<TiltRequest>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::bottom("flight_bar")
        .exact_height(52.0)
        .frame(
            egui::Frame::new()
                .fill(colors::DOCK_BG)
                .inner_margin(egui::Margin::symmetric(20, 8)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 16.0;

                ui.label(
                    egui::RichText::new(format!(
                        "{} WASD / arrows   {} drag to look",
                        icons::KEYBOARD,
                        icons::DRAG
                    ))
                    .color(colors::MUTED),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let tilt_on = input.tilt.is_active();
                    let tilt_text = egui::RichText::new(format!("{} Tilt", icons::TILT)).color(
                        if tilt_on {
                            colors::ACCENT
                        } else {
                            colors::TEXT
                        },
                    );
                    let tilt_button = egui::Button::new(tilt_text).selected(tilt_on);
                    if ui.add_enabled(!input.tilt.is_pending(), tilt_button).clicked() {
                        tilt.write(if tilt_on {
                            TiltRequest::Disable
                        } else {
                            TiltRequest::Enable
                        });
                    }

                    let label = affordance
                        .shown
                        .then(|| analyze_label(active.0, &system))
                        .flatten();
                    if let Some(label) = label {
                        let button = egui::Button::new(
                            egui::RichText::new(label).color(colors::ACCENT).strong(),
                        )
                        .stroke(egui::Stroke::new(1.5, colors::ACCENT));
                        if ui.add(button).clicked() {
                            analyze.write(AnalyzeRequest);
                        }
                    }
                });
            });
        });
}

/// Draw the joystick base and knob where the bridge expects them.
pub fn joystick_system(
    mut contexts: EguiContexts,
    zone: Option<Res<JoystickZone>>,
    input: Res<InputState>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(zone) = zone else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let center = zone.center(window.height());
    let stick = input.joystick.stick();
    let center = egui::pos2(center.x, center.y);
    let knob = center + egui::vec2(stick.x, -stick.y) * zone.radius;

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("joystick"),
    ));
    painter.circle(
        center,
        zone.radius,
        colors::JOYSTICK_BASE,
        egui::Stroke::new(1.5, colors::MUTED),
    );
    painter.circle_filled(knob, zone.radius * 0.4, colors::JOYSTICK_KNOB);
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        icons::CRAFT,
        egui::FontId::proportional(18.0),
        colors::TEXT,
    );
}
