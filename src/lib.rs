//! Traffic Signal Simulation Library
//!
//! A single-intersection traffic signal simulation that can run independently
//! or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
