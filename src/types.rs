//! Application state and system ordering shared by every flight module.

use bevy::prelude::*;

/// Coarse application mode driving the frame scheduler.
///
/// `Loading` renders the warp tunnel until the craft asset is ready and the
/// player clicks through. `Paused` is entered while the content panel is
/// open; every flight system is skipped but the scene clock keeps running.
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppState {
    #[default]
    Loading,
    Playing,
    Paused,
}

/// Per-frame stages of the flight core, chained in this order.
///
/// Clock runs first so proximity tests against this tick's boundary
/// pulse. Proximity writes the freeze flags that Orbit reads, so the two
/// must never be reordered.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlightSet {
    /// Tick the scene clock and recompute the boundary pulse.
    Clock,
    /// Merge every input source into a single flight intent.
    Input,
    /// Integrate the craft pose and resolve the central-body collision.
    Motion,
    /// Pick the active object and write freeze flags.
    Proximity,
    /// Ease orbital pivots toward their schedule.
    Orbit,
    /// Relax the damped camera rig.
    Camera,
    /// Publish the frame snapshot for the renderer.
    Handoff,
}

/// Exponential interpolation step used by every easing in the core.
#[inline]
pub fn lerp(from: f32, to: f32, factor: f32) -> f32 {
    from + (to - from) * factor
}
