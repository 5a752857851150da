//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the
//! `simulation` module. The UI reads state from `SimWorld` and renders it
//! using Bevy's 3D graphics; the only mutation it performs is driving the
//! fixed-rate tick.

mod components;
mod input;
mod spawner;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{EntityMappings, SimWorldResource, SimulationControl};

use input::handle_input;
use spawner::spawn_initial_visuals;
use sync::{sync_vehicles, tick_simulation, update_light_indicators};
use world::setup_world;

/// Seconds of simulated time per fixed tick (the host cadence)
const TICK_SECONDS: f64 = 0.05;

/// Plugin to register all UI systems
pub struct SignalSimUIPlugin;

impl Plugin for SignalSimUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimWorldResource>()
            .init_resource::<EntityMappings>()
            .init_resource::<SimulationControl>()
            .insert_resource(Time::<Fixed>::from_seconds(TICK_SECONDS))
            .add_systems(Startup, (setup_world, spawn_initial_visuals))
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(
                Update,
                (sync_vehicles, update_light_indicators, handle_input),
            );
    }
}
