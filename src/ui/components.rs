//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::simulation::{Axis, SimWorld, VehicleId, FIELD_HEIGHT, FIELD_WIDTH};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

impl Default for SimWorldResource {
    fn default() -> Self {
        Self(SimWorld::new())
    }
}

/// Resource controlling the fixed-rate tick. Pausing is a pure pause: no
/// timers keep running, and resuming continues exactly where it left off.
#[derive(Resource, Default)]
pub struct SimulationControl {
    pub paused: bool,
}

/// Marker component for ground plane
#[derive(Component)]
pub struct Ground;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for entities synced from simulation
#[derive(Component)]
pub struct SimSynced;

/// Links a Bevy entity to a simulation vehicle
#[derive(Component)]
pub struct VehicleLink(pub VehicleId);

/// Marks a signal indicator and the axis whose light it displays
#[derive(Component)]
pub struct LightIndicator(pub Axis);

/// Resource to track Bevy entities mapped to simulation entities
#[derive(Resource, Default)]
pub struct EntityMappings {
    pub vehicles: HashMap<VehicleId, Entity>,
}

/// Convert a field coordinate (y growing southward) to a world translation
/// centered on the origin, at the given height above the ground plane.
pub fn field_to_world(x: f32, y: f32, height: f32) -> Vec3 {
    Vec3::new(x - FIELD_WIDTH / 2.0, height, y - FIELD_HEIGHT / 2.0)
}
