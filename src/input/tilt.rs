//! Device-orientation steering.
//!
//! The sensor is opt-in. Enabling goes through the host, which may have to
//! ask the user for permission; the answer comes back as a
//! [`TiltPermission`] message. Every start recalibrates: the first sample
//! after it becomes the neutral pose.

use bevy::prelude::*;

use crate::config::InputTuning;

/// Request from the UI to switch tilt steering on or off.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TiltRequest {
    Enable,
    Disable,
}

/// Host answer to [`TiltRequest::Enable`].
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TiltPermission {
    Granted,
    Denied,
    Unsupported,
}

/// Orientation sample in degrees: `beta` is front-back pitch, `gamma` is
/// left-right roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltSample {
    pub beta: f32,
    pub gamma: f32,
}

/// Smoothed tilt steering source.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TiltSensor {
    active: bool,
    /// Enable was requested and the host has not answered yet.
    pending: bool,
    baseline: Option<TiltSample>,
    forward: f32,
    turn: f32,
}

impl TiltSensor {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn request(&mut self) {
        if !self.active {
            self.pending = true;
        }
    }

    /// Begin listening. The next sample is taken as the baseline.
    pub fn start(&mut self) {
        self.active = true;
        self.pending = false;
        self.baseline = None;
        self.forward = 0.0;
        self.turn = 0.0;
    }

    /// Stop listening and drop the contribution immediately.
    pub fn stop(&mut self) {
        self.active = false;
        self.pending = false;
        self.baseline = None;
        self.forward = 0.0;
        self.turn = 0.0;
    }

    /// Abandon a pending request the host refused.
    pub fn reject(&mut self) {
        self.pending = false;
    }

    /// Feed one orientation sample. Ignored while inactive.
    pub fn sample(&mut self, sample: TiltSample, tuning: &InputTuning) {
        if !self.active {
            return;
        }
        let Some(baseline) = self.baseline else {
            self.baseline = Some(sample);
            return;
        };

        let d_beta = sample.beta - baseline.beta;
        let d_gamma = sample.gamma - baseline.gamma;

        let target_forward = (-d_beta * tuning.tilt_forward_factor)
            .clamp(-tuning.tilt_max_forward, tuning.tilt_max_forward);
        let target_turn = (-d_gamma * tuning.tilt_turn_factor)
            .clamp(-tuning.tilt_max_turn, tuning.tilt_max_turn);

        self.forward += (target_forward - self.forward) * tuning.tilt_smoothing;
        self.turn += (target_turn - self.turn) * tuning.tilt_smoothing;
    }

    /// `(forward, turn)` contribution, zero while inactive.
    pub fn contribution(&self) -> (f32, f32) {
        if self.active {
            (self.forward, self.turn)
        } else {
            (0.0, 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample(beta: f32, gamma: f32) -> TiltSample {
        TiltSample { beta, gamma }
    }

    #[test]
    fn test_inactive_sensor_ignores_samples() {
        let tuning = InputTuning::default();
        let mut tilt = TiltSensor::default();
        tilt.sample(sample(10.0, 10.0), &tuning);
        tilt.sample(sample(50.0, 50.0), &tuning);
        assert_eq!(tilt.contribution(), (0.0, 0.0));
    }

    #[test]
    fn test_first_sample_is_baseline() {
        let tuning = InputTuning::default();
        let mut tilt = TiltSensor::default();
        tilt.start();
        tilt.sample(sample(40.0, -5.0), &tuning);
        assert_eq!(tilt.contribution(), (0.0, 0.0));

        // Tilting forward (beta decreasing) flies forward.
        tilt.sample(sample(30.0, -5.0), &tuning);
        let (forward, turn) = tilt.contribution();
        assert_relative_eq!(forward, 0.15 * 0.12, epsilon = 1e-6);
        assert_eq!(turn, 0.0);
    }

    #[test]
    fn test_targets_are_clamped() {
        let tuning = InputTuning::default();
        let mut tilt = TiltSensor::default();
        tilt.start();
        tilt.sample(sample(0.0, 0.0), &tuning);
        for _ in 0..500 {
            tilt.sample(sample(-90.0, -90.0), &tuning);
        }
        let (forward, turn) = tilt.contribution();
        assert_relative_eq!(forward, 0.35, epsilon = 1e-4);
        assert_relative_eq!(turn, 0.06, epsilon = 1e-4);
    }

    #[test]
    fn test_stop_zeroes_and_restart_recalibrates() {
        let tuning = InputTuning::default();
        let mut tilt = TiltSensor::default();
        tilt.start();
        tilt.sample(sample(0.0, 0.0), &tuning);
        tilt.sample(sample(-20.0, 0.0), &tuning);
        assert!(tilt.contribution().0 > 0.0);

        tilt.stop();
        assert_eq!(tilt.contribution(), (0.0, 0.0));
        assert!(!tilt.is_active());

        // New neutral pose is wherever the device is held now.
        tilt.start();
        tilt.sample(sample(-20.0, 0.0), &tuning);
        tilt.sample(sample(-20.0, 0.0), &tuning);
        assert_eq!(tilt.contribution(), (0.0, 0.0));
    }

    #[test]
    fn test_request_lifecycle() {
        let mut tilt = TiltSensor::default();
        tilt.request();
        assert!(tilt.is_pending());
        tilt.reject();
        assert!(!tilt.is_pending());
        assert!(!tilt.is_active());

        tilt.request();
        tilt.start();
        assert!(tilt.is_active());
        assert!(!tilt.is_pending());

        // Requests while running are no-ops.
        tilt.request();
        assert!(!tilt.is_pending());
    }
}
