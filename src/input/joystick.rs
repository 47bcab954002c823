//! On-screen virtual joystick.

use bevy::prelude::*;

use crate::config::InputTuning;

/// Last stick vector reported by the joystick widget.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VirtualJoystick {
    stick: Vec2,
}

impl VirtualJoystick {
    /// Store a new stick vector, clamped to the unit square.
    pub fn set(&mut self, x: f32, y: f32) {
        self.stick = Vec2::new(x, y).clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    pub fn release(&mut self) {
        self.stick = Vec2::ZERO;
    }

    pub fn stick(&self) -> Vec2 {
        self.stick
    }

    /// Up pushes forward, right turns right (negative turn).
    pub fn contribution(&self, tuning: &InputTuning) -> (f32, f32) {
        (
            self.stick.y * tuning.stick_forward,
            -self.stick.x * tuning.stick_turn,
        )
    }
}

/// Screen region owned by the joystick widget.
///
/// Pointers that go down inside it steer the stick and never drag the
/// camera. Coordinates are window logical pixels with the origin at the
/// top-left corner.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct JoystickZone {
    /// Distance of the stick centre from the left and bottom window edges.
    pub margin: f32,
    /// Full-deflection radius.
    pub radius: f32,
}

impl Default for JoystickZone {
    fn default() -> Self {
        Self {
            margin: 110.0,
            radius: 60.0,
        }
    }
}

impl JoystickZone {
    pub fn center(&self, window_height: f32) -> Vec2 {
        Vec2::new(self.margin, window_height - self.margin)
    }

    pub fn contains(&self, point: Vec2, window_height: f32) -> bool {
        point.distance_squared(self.center(window_height)) <= self.radius * self.radius
    }

    /// Stick vector for a pointer at `point`, y up, length at most one.
    pub fn stick_vector(&self, point: Vec2, window_height: f32) -> Vec2 {
        let offset = (point - self.center(window_height)) / self.radius;
        Vec2::new(offset.x, -offset.y).clamp_length_max(1.0)
    }
}
