//! Input aggregation for the flight core.
//!
//! Every device reaches the core as a [`DeviceInput`] message. The messages
//! are folded into [`InputState`] as they arrive, and once per playing frame
//! the state is summed into a single [`FlightIntent`]. No source is
//! exclusive: keyboard, joystick and tilt add up.
//!
//! The core never reads Bevy's window input directly; see [`bridge`] for
//! the desktop adapter.

pub mod bridge;
pub mod joystick;
pub mod keyboard;
pub mod pointer;
pub mod tilt;

use bevy::prelude::*;

use crate::config::FlightConfig;
use crate::session::SessionError;
use crate::types::FlightSet;

pub use bridge::{DesktopInputPlugin, KeyBindings};
pub use joystick::{JoystickZone, VirtualJoystick};
pub use keyboard::{FlightKey, KeyboardState};
pub use pointer::{CameraImpulse, PointerState};
pub use tilt::{TiltPermission, TiltRequest, TiltSample, TiltSensor};

/// Raw device event, already filtered by the host.
///
/// Positions are window logical pixels. Pointers and touches that started
/// on the joystick must be reported as `Stick` instead.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum DeviceInput {
    KeyDown(FlightKey),
    KeyUp(FlightKey),
    /// The window lost focus; held keys and pointers are released.
    FocusLost,
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    TouchStart { id: u64, position: Vec2 },
    TouchMove { id: u64, position: Vec2 },
    TouchEnd { id: u64 },
    /// Scroll amount in pixels, positive away from the scene. `fine` is set
    /// while ctrl is held.
    Wheel { delta_y: f32, fine: bool },
    Stick(Vec2),
    StickReleased,
    Tilt(TiltSample),
}

/// Live state of every input source.
#[derive(Resource, Clone, Debug, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub joystick: VirtualJoystick,
    pub tilt: TiltSensor,
    pub pointer: PointerState,
}

impl InputState {
    /// Fold one device event into the state.
    pub fn apply(&mut self, event: DeviceInput, config: &FlightConfig) {
        let tuning = &config.input;
        match event {
            DeviceInput::KeyDown(key) => self.keyboard.set(key, true),
            DeviceInput::KeyUp(key) => self.keyboard.set(key, false),
            DeviceInput::FocusLost => {
                self.keyboard.clear();
                self.joystick.release();
                self.pointer.cancel();
            }
            DeviceInput::PointerDown(position) => self.pointer.mouse_down(position),
            DeviceInput::PointerMove(position) => self.pointer.mouse_move(position, tuning),
            DeviceInput::PointerUp => self.pointer.mouse_up(),
            DeviceInput::TouchStart { id, position } => self.pointer.touch_start(id, position),
            DeviceInput::TouchMove { id, position } => {
                self.pointer.touch_move(id, position, tuning)
            }
            DeviceInput::TouchEnd { id } => self.pointer.touch_end(id),
            DeviceInput::Wheel { delta_y, fine } => self.pointer.wheel(delta_y, fine, tuning),
            DeviceInput::Stick(stick) => self.joystick.set(stick.x, stick.y),
            DeviceInput::StickReleased => self.joystick.release(),
            DeviceInput::Tilt(sample) => self.tilt.sample(sample, tuning),
        }
    }

    /// Sum every source into this frame's intent and drain gesture impulses.
    pub fn intent(&mut self, config: &FlightConfig) -> FlightIntent {
        let (key_forward, key_turn) = self.keyboard.contribution(&config.input);
        let (stick_forward, stick_turn) = self.joystick.contribution(&config.input);
        let (tilt_forward, tilt_turn) = self.tilt.contribution();

        FlightIntent {
            forward: key_forward + stick_forward + tilt_forward,
            turn: key_turn + stick_turn + tilt_turn,
            camera: self.pointer.drain(),
            dragging: self.pointer.is_dragging(),
        }
    }
}

/// What the player asked for this frame.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct FlightIntent {
    /// Distance along the craft's local forward axis.
    pub forward: f32,
    /// Heading change in radians, positive turns left.
    pub turn: f32,
    pub camera: CameraImpulse,
    /// A camera drag is in progress.
    pub dragging: bool,
}

/// Plugin providing the input aggregator.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DeviceInput>()
            .add_message::<TiltRequest>()
            .add_message::<TiltPermission>()
            .init_resource::<InputState>()
            .init_resource::<FlightIntent>()
            .add_systems(
                Update,
                (handle_tilt_requests, collect_device_input)
                    .chain()
                    .before(FlightSet::Input),
            )
            .add_systems(Update, aggregate_intent.in_set(FlightSet::Input));
    }
}

/// Drive the tilt lifecycle from UI requests and host answers.
fn handle_tilt_requests(
    mut requests: MessageReader<TiltRequest>,
    mut answers: MessageReader<TiltPermission>,
    mut state: ResMut<InputState>,
) {
    for request in requests.read() {
        match request {
            TiltRequest::Enable if !state.tilt.is_active() => {
                info!("Tilt steering requested");
                state.tilt.request();
            }
            TiltRequest::Enable => {}
            TiltRequest::Disable => {
                if state.tilt.is_active() || state.tilt.is_pending() {
                    info!("Tilt steering disabled");
                }
                state.tilt.stop();
            }
        }
    }

    for answer in answers.read() {
        if !state.tilt.is_pending() {
            continue;
        }
        match answer {
            TiltPermission::Granted => {
                info!("Tilt steering enabled, next sample sets the neutral pose");
                state.tilt.start();
            }
            TiltPermission::Denied => {
                warn!("{}", SessionError::TiltDenied);
                state.tilt.reject();
            }
            TiltPermission::Unsupported => {
                warn!("{}", SessionError::TiltUnsupported);
                state.tilt.reject();
            }
        }
    }
}

fn collect_device_input(
    mut events: MessageReader<DeviceInput>,
    mut state: ResMut<InputState>,
    config: Res<FlightConfig>,
) {
    for event in events.read() {
        state.apply(*event, &config);
    }
}

fn aggregate_intent(
    mut state: ResMut<InputState>,
    config: Res<FlightConfig>,
    mut intent: ResMut<FlightIntent>,
) {
    *intent = state.intent(&config);
}
