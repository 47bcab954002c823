//! Loading overlay: progress while the craft loads, then the start prompt.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{colors, icons};
use crate::session::{LoadingStatus, StartFlight};

/// Headline for the current loading status.
pub fn loading_title(status: &LoadingStatus) -> String {
    if let Some(err) = &status.error {
        format!("{} {err}", icons::WARNING)
    } else if status.ready {
        "Tap to drop out of warp speed".to_string()
    } else {
        "Travelling at warp speed".to_string()
    }
}

pub fn loading_overlay_system(
    mut contexts: EguiContexts,
    status: Res<LoadingStatus>,
    keys: Res<ButtonInput<KeyCode>>,
    mut start: MessageWriter<StartFlight>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Area::new(egui::Id::new("loading_overlay"))
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.set_width(320.0);
            ui.vertical_centered(|ui| {
                let color = if status.error.is_some() {
                    colors::ERROR
                } else {
                    colors::TEXT
                };
                ui.label(
                    egui::RichText::new(loading_title(&status))
                        .color(color)
                        .size(20.0),
                );
                ui.add_space(10.0);
                ui.add(
                    egui::ProgressBar::new(status.progress)
                        .desired_width(280.0)
                        .fill(colors::ACCENT),
                );
                ui.label(
                    egui::RichText::new(format!("{:.0}%", status.progress * 100.0))
                        .color(colors::MUTED),
                );
            });
        });

    if !status.can_start() {
        return;
    }
    let clicked = ctx.input(|input| input.pointer.primary_clicked());
    if clicked || keys.any_just_pressed([KeyCode::Space, KeyCode::Enter]) {
        start.write(StartFlight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionError;

    #[test]
    fn test_title_follows_status() {
        let mut status = LoadingStatus::default();
        assert!(loading_title(&status).contains("warp speed"));

        status.ready = true;
        assert!(loading_title(&status).starts_with("Tap"));

        status.error = Some(SessionError::AssetLoad("missing file".into()));
        assert!(loading_title(&status).contains("missing file"));
    }
}
