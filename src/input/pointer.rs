//! Camera gestures: mouse drag, single-finger drag, two-finger pinch and
//! the scroll wheel.
//!
//! Gestures do not move the camera directly. They accumulate a
//! [`CameraImpulse`] that the camera stabilizer drains once per playing
//! frame, so gestures made while paused take effect on resume.

use bevy::prelude::*;

use crate::config::InputTuning;

/// Velocity changes requested by gestures since the last drain.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraImpulse {
    /// Added to the holder pitch velocity.
    pub pitch: f32,
    /// Added to the pivot yaw velocity.
    pub yaw: f32,
    /// Added to the zoom velocity.
    pub zoom: f32,
    /// Zero the orbit velocity before applying `pitch` and `yaw`.
    pub reset_orbit: bool,
    /// Zero the zoom velocity before applying `zoom`.
    pub reset_zoom: bool,
}

impl CameraImpulse {
    fn reset_orbit(&mut self) {
        self.pitch = 0.0;
        self.yaw = 0.0;
        self.reset_orbit = true;
    }

    fn reset_zoom(&mut self) {
        self.zoom = 0.0;
        self.reset_zoom = true;
    }

    fn drag(&mut self, delta: Vec2, sensitivity: f32) {
        self.pitch += delta.y * sensitivity;
        self.yaw -= delta.x * sensitivity;
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Tracks pointers and touches that belong to the camera.
///
/// Touches are expected to be pre-filtered: anything that started on the
/// joystick never reaches this state.
#[derive(Clone, Debug, Default)]
pub struct PointerState {
    /// Last mouse position while the button is held.
    mouse: Option<Vec2>,
    /// Active touches in the order they went down.
    touches: Vec<(u64, Vec2)>,
    /// The touch steering the camera, if any.
    camera_finger: Option<u64>,
    /// Distance between the first two touches at the last pinch update.
    pinch_distance: Option<f32>,
    pending: CameraImpulse,
}

impl PointerState {
    /// A mouse or finger drag is in progress; recentering is suspended.
    pub fn is_dragging(&self) -> bool {
        self.mouse.is_some() || self.camera_finger.is_some()
    }

    pub fn mouse_down(&mut self, position: Vec2) {
        self.mouse = Some(position);
        self.pending.reset_orbit();
    }

    pub fn mouse_move(&mut self, position: Vec2, tuning: &InputTuning) {
        let Some(previous) = self.mouse else {
            return;
        };
        self.mouse = Some(position);
        self.pending.drag(position - previous, tuning.drag_sensitivity);
    }

    pub fn mouse_up(&mut self) {
        self.mouse = None;
    }

    pub fn touch_start(&mut self, id: u64, position: Vec2) {
        if self.touches.iter().any(|(t, _)| *t == id) {
            return;
        }
        self.touches.push((id, position));

        if self.camera_finger.is_none() {
            self.camera_finger = Some(id);
            self.pending.reset_orbit();
        }
        if self.touches.len() >= 2 {
            self.pinch_distance = self.current_pinch();
            self.pending.reset_zoom();
        }
    }

    pub fn touch_move(&mut self, id: u64, position: Vec2, tuning: &InputTuning) {
        let Some(slot) = self.touches.iter_mut().find(|(t, _)| *t == id) else {
            return;
        };
        let previous = std::mem::replace(&mut slot.1, position);

        if self.camera_finger == Some(id) {
            self.pending.drag(position - previous, tuning.drag_sensitivity);
        }

        if let (Some(last), Some(current)) = (self.pinch_distance, self.current_pinch()) {
            self.pending.zoom -= (current - last) * tuning.pinch_sensitivity;
            self.pinch_distance = Some(current);
        }
    }

    pub fn touch_end(&mut self, id: u64) {
        self.touches.retain(|(t, _)| *t != id);
        if self.camera_finger == Some(id) {
            self.camera_finger = None;
        }
        if self.touches.len() < 2 {
            self.pinch_distance = None;
        } else {
            // The pair changed; measure from the new pair without a jump.
            self.pinch_distance = self.current_pinch();
        }
    }

    pub fn wheel(&mut self, delta_y: f32, fine: bool, tuning: &InputTuning) {
        let sensitivity = if fine {
            tuning.wheel_fine_sensitivity
        } else {
            tuning.wheel_sensitivity
        };
        self.pending.zoom += delta_y * sensitivity;
    }

    /// Drop every tracked pointer, e.g. when the window loses focus.
    pub fn cancel(&mut self) {
        self.mouse = None;
        self.touches.clear();
        self.camera_finger = None;
        self.pinch_distance = None;
    }

    /// Take the impulse accumulated since the last call.
    pub fn drain(&mut self) -> CameraImpulse {
        std::mem::take(&mut self.pending)
    }

    fn current_pinch(&self) -> Option<f32> {
        match self.touches.as_slice() {
            [(_, a), (_, b), ..] => Some(a.distance(*b)),
            _ => None,
        }
    }
}
