//! Mariner - Portfolio Solar System
//!
//! The flight core of an explorable solar system: a craft steered through
//! orbiting bodies, each of which opens a content panel when approached.
//! The library is headless so the whole frame loop can be driven from
//! tests; `render` and `ui` add the 3D scene and overlays on top.

pub mod bodies;
pub mod camera;
pub mod config;
pub mod craft;
pub mod frame;
pub mod input;
pub mod orbit;
pub mod proximity;
pub mod render;
pub mod session;
pub mod types;
pub mod ui;

#[cfg(test)]
mod proptest_flight;
#[cfg(test)]
pub mod test_utils;

pub use config::FlightConfig;
pub use frame::FlightPlugin;
