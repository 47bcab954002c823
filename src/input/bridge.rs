//! Desktop adapter from Bevy window input to [`DeviceInput`].
//!
//! Only the binary adds this plugin; headless hosts write `DeviceInput`
//! messages themselves.

use bevy::{
    input::{
        mouse::{MouseScrollUnit, MouseWheel},
        touch::Touches,
    },
    platform::collections::HashMap,
    prelude::*,
    window::{PrimaryWindow, WindowFocused},
};
use bevy_egui::EguiContexts;

use super::{DeviceInput, FlightKey, JoystickZone, TiltPermission, TiltRequest};
use crate::types::FlightSet;

/// Browsers report one wheel notch as roughly this many pixels.
const PIXELS_PER_LINE: f32 = 100.0;

/// Physical keys bound to each flight key.
#[derive(Resource, Clone, Debug)]
pub struct KeyBindings {
    pub bindings: HashMap<KeyCode, FlightKey>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = [
            (KeyCode::KeyW, FlightKey::Forward),
            (KeyCode::ArrowUp, FlightKey::Forward),
            (KeyCode::KeyS, FlightKey::Back),
            (KeyCode::ArrowDown, FlightKey::Back),
            (KeyCode::KeyA, FlightKey::Left),
            (KeyCode::ArrowLeft, FlightKey::Left),
            (KeyCode::KeyD, FlightKey::Right),
            (KeyCode::ArrowRight, FlightKey::Right),
        ]
        .into_iter()
        .collect();
        Self { bindings }
    }
}

/// Which pointers are currently owned by the joystick widget.
#[derive(Default)]
struct StickOwner {
    mouse: bool,
    touch: Option<u64>,
}

/// Plugin translating window input into device messages.
pub struct DesktopInputPlugin;

impl Plugin for DesktopInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .init_resource::<JoystickZone>()
            .add_systems(
                Update,
                (
                    keyboard_to_device,
                    pointer_to_device,
                    touches_to_device,
                    answer_tilt_requests,
                )
                    .before(FlightSet::Input),
            );
    }
}

fn keyboard_to_device(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut focus: MessageReader<WindowFocused>,
    mut out: MessageWriter<DeviceInput>,
) {
    for key in keys.get_just_pressed() {
        if let Some(&flight_key) = bindings.bindings.get(key) {
            out.write(DeviceInput::KeyDown(flight_key));
        }
    }
    for key in keys.get_just_released() {
        if let Some(&flight_key) = bindings.bindings.get(key) {
            out.write(DeviceInput::KeyUp(flight_key));
        }
    }
    if focus.read().any(|event| !event.focused) {
        out.write(DeviceInput::FocusLost);
    }
}

fn pointer_to_device(
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut wheel: MessageReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    zone: Res<JoystickZone>,
    mut owner: Local<StickOwner>,
    mut contexts: EguiContexts,
    mut out: MessageWriter<DeviceInput>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let height = window.height();
    let cursor = window.cursor_position();

    if mouse.just_pressed(MouseButton::Left)
        && let Some(position) = cursor
    {
        // Clicks on egui widgets never reach the scene.
        let over_ui = contexts
            .ctx_mut()
            .is_ok_and(|ctx| ctx.wants_pointer_input());
        if zone.contains(position, height) {
            owner.mouse = true;
            out.write(DeviceInput::Stick(zone.stick_vector(position, height)));
        } else if !over_ui {
            out.write(DeviceInput::PointerDown(position));
        }
    } else if mouse.pressed(MouseButton::Left)
        && let Some(position) = cursor
    {
        if owner.mouse {
            out.write(DeviceInput::Stick(zone.stick_vector(position, height)));
        } else {
            out.write(DeviceInput::PointerMove(position));
        }
    }

    if mouse.just_released(MouseButton::Left) {
        if std::mem::take(&mut owner.mouse) {
            out.write(DeviceInput::StickReleased);
        } else {
            out.write(DeviceInput::PointerUp);
        }
    }

    let fine = keys.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]);
    for event in wheel.read() {
        let lines_to_pixels = match event.unit {
            MouseScrollUnit::Line => PIXELS_PER_LINE,
            MouseScrollUnit::Pixel => 1.0,
        };
        // Bevy reports scrolling away from the user as positive y; the zoom
        // convention is the opposite.
        out.write(DeviceInput::Wheel {
            delta_y: -event.y * lines_to_pixels,
            fine,
        });
    }
}

fn touches_to_device(
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    zone: Res<JoystickZone>,
    mut owner: Local<StickOwner>,
    mut out: MessageWriter<DeviceInput>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let height = window.height();

    for touch in touches.iter_just_pressed() {
        if owner.touch.is_none() && zone.contains(touch.position(), height) {
            owner.touch = Some(touch.id());
            out.write(DeviceInput::Stick(zone.stick_vector(touch.position(), height)));
        } else {
            out.write(DeviceInput::TouchStart {
                id: touch.id(),
                position: touch.position(),
            });
        }
    }

    for touch in touches.iter() {
        if touch.delta() == Vec2::ZERO {
            continue;
        }
        if owner.touch == Some(touch.id()) {
            out.write(DeviceInput::Stick(zone.stick_vector(touch.position(), height)));
        } else {
            out.write(DeviceInput::TouchMove {
                id: touch.id(),
                position: touch.position(),
            });
        }
    }

    for touch in touches.iter_just_released().chain(touches.iter_just_canceled()) {
        if owner.touch == Some(touch.id()) {
            owner.touch = None;
            out.write(DeviceInput::StickReleased);
        } else {
            out.write(DeviceInput::TouchEnd { id: touch.id() });
        }
    }
}

/// Desktop builds have no orientation sensor.
fn answer_tilt_requests(
    mut requests: MessageReader<TiltRequest>,
    mut answers: MessageWriter<TiltPermission>,
) {
    for request in requests.read() {
        if *request == TiltRequest::Enable {
            answers.write(TiltPermission::Unsupported);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_cover_wasd_and_arrows() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.bindings.get(&KeyCode::KeyW), Some(&FlightKey::Forward));
        assert_eq!(bindings.bindings.get(&KeyCode::ArrowDown), Some(&FlightKey::Back));
        assert_eq!(bindings.bindings.get(&KeyCode::KeyA), Some(&FlightKey::Left));
        assert_eq!(bindings.bindings.get(&KeyCode::ArrowRight), Some(&FlightKey::Right));
        assert_eq!(bindings.bindings.len(), 8);
    }
}
