//! Content panel shown while the session is paused on a body.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{colors, icons};
use crate::session::{ClosePanel, ContentPanel};

/// Text shown for one body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentEntry {
    pub title: String,
    pub body: String,
}

impl ContentEntry {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Panel contents keyed by body display name.
#[derive(Resource, Clone, Debug, Default)]
pub struct ContentLibrary {
    entries: HashMap<String, ContentEntry>,
}

impl ContentLibrary {
    pub fn insert(&mut self, key: impl Into<String>, entry: ContentEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Entry for `key`, or a placeholder naming the key when none exists.
    pub fn lookup(&self, key: &str) -> ContentEntry {
        self.entries.get(key).cloned().unwrap_or_else(|| {
            ContentEntry::new(
                key,
                format!("No text or images have been added for {key} yet."),
            )
        })
    }

    /// Short descriptions for the default catalogue.
    pub fn portfolio() -> Self {
        let mut library = Self::default();
        library.insert(
            "Project_Mariner (This Site)",
            ContentEntry::new(
                "Project Mariner",
                "An interactive universe used as a portfolio. Fly close to a planet to \
                 freeze its orbit and open its section.",
            ),
        );
        library.insert(
            "Infos",
            ContentEntry::new("Infos", "This is My Universe, version 1.0."),
        );
        library.insert(
            "SURGE (The autonomous Robottaxi)",
            ContentEntry::new(
                "SURGE - Autonomous Robotaxi",
                "An autonomous, electrically powered mini robotic taxi running on a Jetson \
                 Nano with camera-based navigation and 3D-printed modular parts.",
            ),
        );
        library.insert(
            "OpenImageLabel (A website to label images for professional photography)",
            ContentEntry::new(
                "OpenImageLabel",
                "Turns EXIF data into clean overlays you can tweak and batch-export.",
            ),
        );
        library.insert(
            "Project Cablerack (A smarter way to cable-manage)",
            ContentEntry::new(
                "Project Cablerack",
                "A custom sheet-metal rack for five laptops with one-cable desk setup, \
                 HDMI switching and smart-home integration.",
            ),
        );
        library.insert(
            "Socials/Other Sites",
            ContentEntry::new(
                "Socials & Links",
                "GitHub: github.com/ProfessorEngineergit\n\
                 School GitHub: github.com/makerLab314\n\
                 YouTube: youtube.com/@droneXplorer-t1n\n\
                 Skypixel: skypixel.com/users/till-bahrian",
            ),
        );
        library.insert(
            "HA-Lightswitch (Making analog Lightswitches smart)",
            ContentEntry::new(
                "HA-Lightswitch",
                "A 3D-printed, servo-driven add-on that flips analog wall switches, \
                 controlled through Home Assistant and MQTT.",
            ),
        );
        library.insert(
            "My Creative Work (Filming, flying, photography)",
            ContentEntry::new(
                "Creative Work",
                "Drone storytelling and photography for clients and personal projects.",
            ),
        );
        library.insert(
            "3D-Printing (The ultimate engineering-tool)",
            ContentEntry::new(
                "3D-Printing",
                "Additive manufacturing as the everyday tool for turning concepts into parts.",
            ),
        );
        library
    }
}

pub fn content_panel_system(
    mut contexts: EguiContexts,
    panel: Res<ContentPanel>,
    library: Res<ContentLibrary>,
    keys: Res<ButtonInput<KeyCode>>,
    mut close: MessageWriter<ClosePanel>,
) {
    let Some(key) = panel.open_key.as_deref() else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let entry = library.lookup(key);

    let mut close_clicked = keys.just_pressed(KeyCode::Escape);
    egui::Window::new(egui::RichText::new(&entry.title).color(colors::TEXT).strong())
        .id(egui::Id::new("content_panel"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .default_width(420.0)
        .frame(
            egui::Frame::new()
                .fill(colors::PANEL_BG)
                .corner_radius(10)
                .inner_margin(egui::Margin::same(18)),
        )
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(&entry.body).color(colors::TEXT).size(15.0));
            ui.add_space(12.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(format!("{} Close", icons::CLOSE)).clicked() {
                    close_clicked = true;
                }
            });
        });

    if close_clicked {
        close.write(ClosePanel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlightConfig;

    #[test]
    fn test_known_key_returns_entry() {
        let library = ContentLibrary::portfolio();
        assert_eq!(library.lookup("Infos").title, "Infos");
    }

    #[test]
    fn test_unknown_key_falls_back() {
        let library = ContentLibrary::portfolio();
        let entry = library.lookup("Unlisted Body");
        assert_eq!(entry.title, "Unlisted Body");
        assert!(entry.body.contains("Unlisted Body"));
    }

    #[test]
    fn test_every_catalogue_body_has_content() {
        let library = ContentLibrary::portfolio();
        let catalogue = FlightConfig::default().bodies;
        let names = std::iter::once(&catalogue.central.name)
            .chain(catalogue.orbiting.iter().map(|body| &body.name));
        for name in names {
            let entry = library.lookup(name);
            assert!(
                !entry.body.starts_with("No text or images"),
                "missing content for {name}"
            );
        }
    }
}
