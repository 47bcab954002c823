//! Body name labels drawn with egui over the 3D view.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use super::MainCamera;
use crate::bodies::{BodyRef, SolarSystem};
use crate::proximity::ActiveObject;
use crate::types::AppState;

/// Plugin providing body label rendering.
pub struct LabelPlugin;

impl Plugin for LabelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LabelSettings>().add_systems(
            EguiPrimaryContextPass,
            draw_body_labels.run_if(not(in_state(AppState::Loading))),
        );
    }
}

/// Settings for label rendering.
#[derive(Resource)]
pub struct LabelSettings {
    pub visible: bool,
    /// World-space height above the body centre, added to its radius.
    pub lift: f32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            visible: true,
            lift: 3.0,
        }
    }
}

fn draw_body_labels(
    mut egui_ctx: EguiContexts,
    system: Res<SolarSystem>,
    active: Res<ActiveObject>,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    settings: Res<LabelSettings>,
) {
    if !settings.visible {
        return;
    }
    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };
    let Ok(ctx) = egui_ctx.ctx_mut() else {
        return;
    };

    let central = (
        BodyRef::Central,
        system.central.position + Vec3::Y * (system.central.collision_radius + 5.5),
    );
    let orbiting = system.orbiting.iter().enumerate().map(|(i, body)| {
        (
            BodyRef::Orbiting(i),
            body.world_position() + Vec3::Y * (body.radius + settings.lift),
        )
    });

    egui::Area::new(egui::Id::new("body_labels"))
        .fixed_pos(egui::pos2(0.0, 0.0))
        .order(egui::Order::Background)
        .interactable(false)
        .show(ctx, |ui| {
            let painter = ui.painter();

            for (body, anchor) in std::iter::once(central).chain(orbiting) {
                let Ok(screen) = camera.world_to_viewport(camera_transform, anchor) else {
                    continue;
                };
                let Some(text) = system.name(body) else {
                    continue;
                };

                let highlighted = active.0 == Some(body);
                let color = if highlighted {
                    egui::Color32::from_rgb(140, 220, 255)
                } else {
                    egui::Color32::from_rgba_unmultiplied(220, 220, 220, 230)
                };
                let pos = egui::pos2(screen.x, screen.y);
                let font = egui::FontId::proportional(14.0);

                painter.text(
                    pos + egui::vec2(1.0, 1.0),
                    egui::Align2::CENTER_BOTTOM,
                    text,
                    font.clone(),
                    egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180),
                );
                painter.text(pos, egui::Align2::CENTER_BOTTOM, text, font, color);
            }
        });
}
