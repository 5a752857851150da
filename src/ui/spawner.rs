//! Systems for spawning the static visual scene

use bevy::prelude::*;

use super::components::{field_to_world, LightIndicator};
use crate::simulation::{
    Axis, FIELD_HEIGHT, FIELD_WIDTH, INTERSECTION_MAX, INTERSECTION_MIN,
};

const ROAD_HEIGHT: f32 = 1.0;
const MARKER_HEIGHT: f32 = 0.6;
const INDICATOR_RADIUS: f32 = 10.0;
const INDICATOR_Y: f32 = 20.0;

/// System to create the static visual entities: road strips, stop-line
/// markers, and one signal indicator per approach
pub fn spawn_initial_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_roads(&mut commands, &mut meshes, &mut materials);
    spawn_stop_lines(&mut commands, &mut meshes, &mut materials);
    spawn_light_indicators(&mut commands, &mut meshes, &mut materials);
}

fn spawn_roads(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let road_color = Color::srgb(0.2, 0.2, 0.2);
    let road_width = INTERSECTION_MAX - INTERSECTION_MIN;
    let road_center = (INTERSECTION_MIN + INTERSECTION_MAX) / 2.0;

    // North-south road strip
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(road_width, ROAD_HEIGHT, FIELD_HEIGHT))),
        MeshMaterial3d(materials.add(road_color)),
        Transform::from_translation(field_to_world(
            road_center,
            FIELD_HEIGHT / 2.0,
            ROAD_HEIGHT / 2.0,
        )),
    ));

    // East-west road strip
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(FIELD_WIDTH, ROAD_HEIGHT, road_width))),
        MeshMaterial3d(materials.add(road_color)),
        Transform::from_translation(field_to_world(
            FIELD_WIDTH / 2.0,
            road_center,
            ROAD_HEIGHT / 2.0,
        )),
    ));
}

fn spawn_stop_lines(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let line_color = Color::srgb(0.9, 0.9, 0.9);
    let half_road = (INTERSECTION_MAX - INTERSECTION_MIN) / 2.0;
    let west_half = INTERSECTION_MIN + half_road / 2.0;
    let east_half = INTERSECTION_MAX - half_road / 2.0;

    // One marker per approach lane, spanning that heading's half of the
    // road just before the intersection box. Field (x, y) centers with
    // whether the line runs across the north-south road.
    let lines = [
        // Northbound approach, south edge of the box
        (west_half, INTERSECTION_MAX, true),
        // Southbound approach, north edge of the box
        (east_half, INTERSECTION_MIN, true),
        // Eastbound approach, west edge of the box
        (INTERSECTION_MIN, east_half, false),
        // Westbound approach, east edge of the box
        (INTERSECTION_MAX, west_half, false),
    ];

    for (x, y, across_ns_road) in lines {
        let size = if across_ns_road {
            Cuboid::new(half_road, MARKER_HEIGHT, 4.0)
        } else {
            Cuboid::new(4.0, MARKER_HEIGHT, half_road)
        };
        commands.spawn((
            Mesh3d(meshes.add(size)),
            MeshMaterial3d(materials.add(line_color)),
            Transform::from_translation(field_to_world(x, y, ROAD_HEIGHT + MARKER_HEIGHT / 2.0)),
        ));
    }
}

fn spawn_light_indicators(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let near = INTERSECTION_MIN - 2.0 * INDICATOR_RADIUS;
    let far = INTERSECTION_MAX + 2.0 * INDICATOR_RADIUS;

    // One indicator per approach direction, placed at the crossing corner
    // facing that approach; color is synced to the phase every frame
    let indicators = [
        (near, near, Axis::NorthSouth),
        (far, far, Axis::NorthSouth),
        (far, near, Axis::EastWest),
        (near, far, Axis::EastWest),
    ];

    for (x, y, axis) in indicators {
        commands.spawn((
            LightIndicator(axis),
            Mesh3d(meshes.add(Sphere::new(INDICATOR_RADIUS))),
            MeshMaterial3d(materials.add(Color::srgb(0.9, 0.1, 0.1))),
            Transform::from_translation(field_to_world(x, y, INDICATOR_Y)),
        ));
    }
}
