//! Held-key tracking for the four flight directions.

use crate::config::InputTuning;

/// Logical flight key, independent of the physical binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlightKey {
    Forward,
    Back,
    Left,
    Right,
}

/// Which flight keys are currently held.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KeyboardState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyboardState {
    pub fn set(&mut self, key: FlightKey, held: bool) {
        match key {
            FlightKey::Forward => self.forward = held,
            FlightKey::Back => self.back = held,
            FlightKey::Left => self.left = held,
            FlightKey::Right => self.right = held,
        }
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// `(forward, turn)` contribution. Opposite keys cancel out.
    pub fn contribution(&self, tuning: &InputTuning) -> (f32, f32) {
        let axis = |pos: bool, neg: bool| match (pos, neg) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        (
            axis(self.forward, self.back) * tuning.key_forward,
            axis(self.left, self.right) * tuning.key_turn,
        )
    }
}
