//! Simulation core validation tests
//!
//! These tests exercise the lights, the vehicle model, and the world's
//! movement permission rule directly through the library API.

use signal_sim::simulation::{
    Axis, Heading, Phase, PhaseTable, SimId, SimLight, SimVehicle, SimWorld, VehicleId,
    WorldConfig, DETECTION_WINDOW, FIELD_HEIGHT, FIELD_WIDTH,
};

/// Config whose lights hold their initial phase for the whole test run and
/// whose spawner never fires, so tests control the vehicle population.
fn pinned_config(ns_initial: Phase, ew_initial: Phase) -> WorldConfig {
    WorldConfig {
        spawn_interval: 1e9,
        ns_initial,
        ns_durations: PhaseTable::new(1e9, 1e9, 1e9),
        ew_initial,
        ew_durations: PhaseTable::new(1e9, 1e9, 1e9),
    }
}

fn pinned_world(ns_initial: Phase, ew_initial: Phase) -> SimWorld {
    SimWorld::with_config(pinned_config(ns_initial, ew_initial))
        .expect("pinned config should validate")
}

#[test]
fn test_light_transitions_exactly_once_per_phase_duration() {
    let mut light = SimLight::new(Axis::NorthSouth, Phase::Go, PhaseTable::new(15.0, 3.0, 22.0));

    light.advance(7.5);
    assert_eq!(light.phase(), Phase::Go);
    assert_eq!(light.time_remaining(), 7.5);

    // Deltas summing to exactly the GO duration: one transition, and the
    // timer holds the next phase's full duration.
    light.advance(7.5);
    assert_eq!(light.phase(), Phase::Caution);
    assert_eq!(light.time_remaining(), 3.0);
}

#[test]
fn test_light_cycle_order_from_any_start() {
    for (start, expected) in [
        (Phase::Go, Phase::Caution),
        (Phase::Caution, Phase::Stop),
        (Phase::Stop, Phase::Go),
    ] {
        let mut light = SimLight::new(Axis::EastWest, start, PhaseTable::new(1.0, 1.0, 1.0));
        light.advance(1.0);
        assert_eq!(light.phase(), expected);
    }
}

#[test]
fn test_light_steps_one_phase_even_for_oversized_delta() {
    let mut light = SimLight::new(Axis::NorthSouth, Phase::Go, PhaseTable::new(15.0, 3.0, 22.0));

    // A delta spanning several phases still produces a single transition
    // with the new phase's full duration loaded.
    light.advance(100.0);
    assert_eq!(light.phase(), Phase::Caution);
    assert_eq!(light.time_remaining(), 3.0);
}

#[test]
fn test_light_ignores_non_positive_deltas() {
    let mut light = SimLight::new(Axis::NorthSouth, Phase::Go, PhaseTable::new(15.0, 3.0, 22.0));

    light.advance(0.0);
    light.advance(-5.0);
    light.advance(f32::NAN);

    assert_eq!(light.phase(), Phase::Go);
    assert_eq!(light.time_remaining(), 15.0);
}

#[test]
fn test_vehicle_entry_geometry() {
    // Every approach enters with the body off-field and the leading edge on
    // the boundary, in its own lane.
    let cases = [
        (Axis::NorthSouth, Heading::Positive, 415.0, 800.0, -800.0),
        (Axis::NorthSouth, Heading::Negative, 465.0, -50.0, 0.0),
        (Axis::EastWest, Heading::Positive, -50.0, 465.0, 0.0),
        (Axis::EastWest, Heading::Negative, 800.0, 415.0, -800.0),
    ];

    for (axis, heading, x, y, leading) in cases {
        let vehicle = SimVehicle::new(VehicleId(SimId(0)), axis, heading);
        assert_eq!(vehicle.position.x, x, "{axis:?} {heading:?} x");
        assert_eq!(vehicle.position.y, y, "{axis:?} {heading:?} y");
        assert_eq!(vehicle.leading_coord(), leading, "{axis:?} {heading:?}");
        assert!(!vehicle.is_out_of_bounds(FIELD_WIDTH, FIELD_HEIGHT));
    }
}

#[test]
fn test_vehicle_draw_extents_follow_axis() {
    let ns = SimVehicle::new(VehicleId(SimId(0)), Axis::NorthSouth, Heading::Positive);
    assert_eq!(ns.draw_width(), 20.0);
    assert_eq!(ns.draw_height(), 50.0);

    let ew = SimVehicle::new(VehicleId(SimId(1)), Axis::EastWest, Heading::Positive);
    assert_eq!(ew.draw_width(), 50.0);
    assert_eq!(ew.draw_height(), 20.0);
}

#[test]
fn test_free_running_vehicle_crosses_field_and_exits() {
    let mut world = pinned_world(Phase::Go, Phase::Go);
    let id = world.spawn_vehicle(Axis::NorthSouth, Heading::Positive);

    // ceil((field + length) / speed) = 425 ticks to reach y = -50, which is
    // exactly its own extent past the edge: still live there.
    for _ in 0..425 {
        world.advance(0.05);
    }
    assert_eq!(world.vehicles[&id].position.y, -50.0);

    // One more tick puts it beyond its extent and out of the live set.
    world.advance(0.05);
    assert!(world.vehicles.is_empty());
    assert_eq!(world.exited_total, 1);
}

#[test]
fn test_close_follower_is_held_until_gap_opens() {
    let mut world = pinned_world(Phase::Go, Phase::Go);
    let leader = world.spawn_vehicle(Axis::NorthSouth, Heading::Positive);
    let follower = world.spawn_vehicle(Axis::NorthSouth, Heading::Positive);

    // Gap of 9 units, just under the length/5 = 10 threshold.
    world.vehicles.get_mut(&leader).unwrap().position.y = 300.0;
    world.vehicles.get_mut(&follower).unwrap().position.y = 359.0;

    world.advance(0.05);
    assert_eq!(world.vehicles[&leader].position.y, 298.0);
    assert_eq!(world.vehicles[&follower].position.y, 359.0, "follower held");

    // The leader moving away opened the gap to 11; next evaluation clears
    // the follower.
    world.advance(0.05);
    assert_eq!(world.vehicles[&leader].position.y, 296.0);
    assert_eq!(world.vehicles[&follower].position.y, 357.0);
}

#[test]
fn test_following_ignores_other_lanes_and_axes() {
    let mut world = pinned_world(Phase::Go, Phase::Go);
    let northbound = world.spawn_vehicle(Axis::NorthSouth, Heading::Positive);
    let southbound = world.spawn_vehicle(Axis::NorthSouth, Heading::Negative);
    let eastbound = world.spawn_vehicle(Axis::EastWest, Heading::Positive);

    // Pack everything near the middle of the field; none of these share an
    // (axis, heading) lane, so nobody blocks anybody.
    world.vehicles.get_mut(&northbound).unwrap().position.y = 400.0;
    world.vehicles.get_mut(&southbound).unwrap().position.y = 360.0;
    world.vehicles.get_mut(&eastbound).unwrap().position.x = 380.0;

    world.advance(0.05);
    assert_eq!(world.vehicles[&northbound].position.y, 398.0);
    assert_eq!(world.vehicles[&southbound].position.y, 362.0);
    assert_eq!(world.vehicles[&eastbound].position.x, 382.0);
}

#[test]
fn test_signal_gate_window_under_stop() {
    let mut world = pinned_world(Phase::Stop, Phase::Go);
    let id = world.spawn_vehicle(Axis::NorthSouth, Heading::Positive);

    // Approaching but still outside the detection window: free to move.
    world.vehicles.get_mut(&id).unwrap().position.y = 560.0;
    world.advance(0.05);
    assert_eq!(world.vehicles[&id].position.y, 558.0);

    // Inside the window, short of the line: held.
    world.vehicles.get_mut(&id).unwrap().position.y = 552.0;
    world.advance(0.05);
    assert_eq!(world.vehicles[&id].position.y, 552.0);

    // Past the stop line: clears the intersection even under STOP.
    world.vehicles.get_mut(&id).unwrap().position.y = 548.0;
    world.advance(0.05);
    assert_eq!(world.vehicles[&id].position.y, 546.0);
}

#[test]
fn test_signal_gate_blocks_under_caution() {
    let mut world = pinned_world(Phase::Caution, Phase::Go);
    let id = world.spawn_vehicle(Axis::NorthSouth, Heading::Positive);

    world.vehicles.get_mut(&id).unwrap().position.y = 552.0;
    world.advance(0.05);
    assert_eq!(world.vehicles[&id].position.y, 552.0);
}

#[test]
fn test_vehicle_halts_at_window_edge_under_stop() {
    let mut world = pinned_world(Phase::Stop, Phase::Go);
    let id = world.spawn_vehicle(Axis::NorthSouth, Heading::Positive);

    // From the field edge the vehicle advances until its leading edge enters
    // the detection window, then holds there as long as the light does.
    for _ in 0..200 {
        world.advance(0.05);
    }
    assert_eq!(world.vehicles[&id].position.y, 554.0);
}

#[test]
fn test_signal_gate_applies_on_every_approach() {
    for (axis, heading) in [
        (Axis::NorthSouth, Heading::Positive),
        (Axis::NorthSouth, Heading::Negative),
        (Axis::EastWest, Heading::Positive),
        (Axis::EastWest, Heading::Negative),
    ] {
        let mut world = pinned_world(Phase::Stop, Phase::Stop);
        let id = world.spawn_vehicle(axis, heading);
        for _ in 0..300 {
            world.advance(0.05);
        }
        let vehicle = &world.vehicles[&id];
        // Held just inside the detection window, one window-width short of
        // this approach's stop line.
        let line = axis.stop_line_coord(heading);
        assert_eq!(
            vehicle.leading_coord(),
            line - DETECTION_WINDOW,
            "{axis:?} {heading:?} should hold at the window edge"
        );
    }
}

#[test]
fn test_spawner_fires_once_per_interval() {
    let mut world = SimWorld::new_with_seed(42);

    // A single delta equal to the interval spawns exactly one vehicle.
    world.advance(2.0);
    assert_eq!(world.vehicles.len(), 1);
    assert_eq!(world.spawned_total, 1);
}

#[test]
fn test_spawner_accumulates_across_ticks() {
    let mut world = SimWorld::new_with_seed(7);

    world.advance(1.0);
    assert_eq!(world.spawned_total, 0);
    world.advance(1.0);
    assert_eq!(world.spawned_total, 1);

    // Accumulator restarted from zero after the spawn.
    world.advance(1.0);
    assert_eq!(world.spawned_total, 1);
    world.advance(1.0);
    assert_eq!(world.spawned_total, 2);
}

#[test]
fn test_spawner_discards_remainder_beyond_interval() {
    let mut world = SimWorld::new_with_seed(3);

    // 10 seconds in one tick still yields a single spawn, and the 8 surplus
    // seconds are discarded rather than credited to the next interval.
    world.advance(10.0);
    assert_eq!(world.spawned_total, 1);

    world.advance(1.5);
    assert_eq!(world.spawned_total, 1);
    world.advance(0.5);
    assert_eq!(world.spawned_total, 2);
}

#[test]
fn test_non_positive_delta_is_a_noop() {
    let mut world = SimWorld::new_with_seed(9);
    world.advance(2.0);
    assert_eq!(world.vehicles.len(), 1);

    let id = *world.vehicles.keys().next().unwrap();
    let position = world.vehicles[&id].position;
    let ns_phase = world.ns_light.phase();
    let ns_remaining = world.ns_light.time_remaining();
    let time = world.time;

    for delta in [0.0, -3.0, f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        world.advance(delta);
    }

    assert_eq!(world.vehicles.len(), 1);
    assert_eq!(world.spawned_total, 1);
    assert_eq!(world.vehicles[&id].position, position);
    assert_eq!(world.ns_light.phase(), ns_phase);
    assert_eq!(world.ns_light.time_remaining(), ns_remaining);
    assert_eq!(world.time, time);
}

#[test]
fn test_config_rejects_bad_timings() {
    let config = WorldConfig {
        spawn_interval: 0.0,
        ..WorldConfig::default()
    };
    assert!(SimWorld::with_config(config).is_err());

    let config = WorldConfig {
        ns_durations: PhaseTable::new(15.0, -1.0, 22.0),
        ..WorldConfig::default()
    };
    assert!(SimWorld::with_config(config).is_err());

    let config = WorldConfig {
        ew_durations: PhaseTable::new(15.0, f32::NAN, 22.0),
        ..WorldConfig::default()
    };
    assert!(SimWorld::with_config(config).is_err());
}

#[test]
fn test_reference_configuration() {
    let world = SimWorld::new();

    assert_eq!(world.light(Axis::NorthSouth).phase(), Phase::Go);
    assert_eq!(world.light(Axis::EastWest).phase(), Phase::Stop);
    assert!(world.vehicles.is_empty());

    // Equal 40s cycles keep the lights' relative offset stable.
    let table = PhaseTable::new(15.0, 3.0, 22.0);
    assert_eq!(table.cycle_length(), 40.0);
}
