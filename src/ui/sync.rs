//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;

use super::components::{
    field_to_world, EntityMappings, LightIndicator, SimSynced, SimWorldResource, SimulationControl,
    VehicleLink,
};
use crate::simulation::{Axis, Heading, Phase, SimVehicle, VehicleId};

const VEHICLE_BODY_HEIGHT: f32 = 8.0;

/// System to run the simulation tick at the fixed cadence
pub fn tick_simulation(
    time: Res<Time>,
    control: Res<SimulationControl>,
    mut sim_world: ResMut<SimWorldResource>,
) {
    if control.paused {
        return;
    }
    sim_world.0.advance(time.delta_secs());
}

fn vehicle_translation(vehicle: &SimVehicle) -> Vec3 {
    let center_x = vehicle.position.x + vehicle.draw_width() / 2.0;
    let center_y = vehicle.position.y + vehicle.draw_height() / 2.0;
    field_to_world(center_x, center_y, 1.0 + VEHICLE_BODY_HEIGHT / 2.0)
}

/// System to sync vehicle visuals from simulation state
pub fn sync_vehicles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
    mut vehicle_query: Query<(Entity, &VehicleLink, &mut Transform)>,
) {
    let world = &sim_world.0;

    // Update existing vehicles and track which ones still exist
    let mut existing_ids: std::collections::HashSet<VehicleId> = std::collections::HashSet::new();

    for (entity, link, mut transform) in vehicle_query.iter_mut() {
        if let Some(vehicle) = world.vehicles.get(&link.0) {
            existing_ids.insert(link.0);
            transform.translation = vehicle_translation(vehicle);
        } else {
            // Vehicle no longer exists in simulation, despawn
            commands.entity(entity).despawn();
            mappings.vehicles.remove(&link.0);
        }
    }

    // Spawn new vehicles
    for (id, vehicle) in &world.vehicles {
        if existing_ids.contains(id) {
            continue;
        }

        let color = match vehicle.axis {
            Axis::NorthSouth => Color::srgb(0.8, 0.3, 0.2),
            Axis::EastWest => Color::srgb(0.2, 0.4, 0.8),
        };

        let entity = commands
            .spawn((
                SimSynced,
                VehicleLink(*id),
                Mesh3d(meshes.add(Cuboid::new(
                    vehicle.draw_width(),
                    VEHICLE_BODY_HEIGHT,
                    vehicle.draw_height(),
                ))),
                MeshMaterial3d(materials.add(color)),
                Transform::from_translation(vehicle_translation(vehicle)),
            ))
            .id();

        // Leading-edge marker so the heading is readable from above
        let marker_offset = match (vehicle.axis, vehicle.heading) {
            (Axis::NorthSouth, Heading::Positive) => Vec3::new(0.0, VEHICLE_BODY_HEIGHT, -17.0),
            (Axis::NorthSouth, Heading::Negative) => Vec3::new(0.0, VEHICLE_BODY_HEIGHT, 17.0),
            (Axis::EastWest, Heading::Positive) => Vec3::new(17.0, VEHICLE_BODY_HEIGHT, 0.0),
            (Axis::EastWest, Heading::Negative) => Vec3::new(-17.0, VEHICLE_BODY_HEIGHT, 0.0),
        };
        commands.entity(entity).with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(10.0, 2.0, 10.0))),
                MeshMaterial3d(materials.add(Color::srgb(0.95, 0.9, 0.3))),
                Transform::from_translation(marker_offset),
            ));
        });

        mappings.vehicles.insert(*id, entity);
    }
}

/// System to recolor the signal indicators from the lights' phases
pub fn update_light_indicators(
    sim_world: Res<SimWorldResource>,
    indicator_query: Query<(&LightIndicator, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (indicator, material_handle) in indicator_query.iter() {
        let phase = sim_world.0.light(indicator.0).phase();
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color = match phase {
                Phase::Go => Color::srgb(0.1, 0.85, 0.2),
                Phase::Caution => Color::srgb(0.95, 0.85, 0.1),
                Phase::Stop => Color::srgb(0.9, 0.1, 0.1),
            };
        }
    }
}
