//! Standalone traffic signal simulation module
//!
//! This module contains all the core simulation logic that can run
//! independently of the Bevy game engine. It can be tested via console
//! without needing to boot up a window.

mod light;
mod types;
mod vehicle;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use light::{PhaseTable, SimLight};
#[allow(unused_imports)]
pub use types::{
    Axis, Heading, Phase, Position, SimId, VehicleId, DETECTION_WINDOW, FIELD_HEIGHT, FIELD_WIDTH,
    INTERSECTION_MAX, INTERSECTION_MIN, MIN_FOLLOWING_GAP, VEHICLE_LENGTH, VEHICLE_SPEED,
    VEHICLE_WIDTH,
};
#[allow(unused_imports)]
pub use vehicle::SimVehicle;
#[allow(unused_imports)]
pub use world::{SimWorld, WorldConfig, DEFAULT_SPAWN_INTERVAL};
