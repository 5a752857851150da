//! Main simulation world that ties everything together
//!
//! This is the entry point for running the traffic signal simulation
//! without any Bevy dependencies.

use anyhow::{ensure, Result};
use log::{debug, warn};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::collections::HashMap;

use super::light::{PhaseTable, SimLight};
use super::types::{
    Axis, Heading, Phase, SimId, VehicleId, DETECTION_WINDOW, FIELD_HEIGHT, FIELD_WIDTH,
    INTERSECTION_MAX, INTERSECTION_MIN, MIN_FOLLOWING_GAP,
};
use super::vehicle::SimVehicle;

/// Seconds between spawn checks in the reference configuration
pub const DEFAULT_SPAWN_INTERVAL: f32 = 2.0;

/// Construction-time configuration for a [`SimWorld`].
///
/// Field geometry and the movement rule thresholds are fixed constants; the
/// configurable surface is the spawn cadence and the two lights' cycles.
#[derive(Debug, Clone)]
pub struct WorldConfig {
    pub spawn_interval: f32,
    pub ns_initial: Phase,
    pub ns_durations: PhaseTable,
    pub ew_initial: Phase,
    pub ew_durations: PhaseTable,
}

impl Default for WorldConfig {
    fn default() -> Self {
        // Equal 40s cycles with opposite starting phases keep the two GO
        // windows disjoint and the relative offset stable.
        Self {
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            ns_initial: Phase::Go,
            ns_durations: PhaseTable::new(15.0, 3.0, 22.0),
            ew_initial: Phase::Stop,
            ew_durations: PhaseTable::new(15.0, 3.0, 22.0),
        }
    }
}

impl WorldConfig {
    /// Reject timings the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.spawn_interval.is_finite() && self.spawn_interval > 0.0,
            "spawn interval must be a positive number of seconds, got {}",
            self.spawn_interval
        );

        for (label, table) in [
            ("north-south", &self.ns_durations),
            ("east-west", &self.ew_durations),
        ] {
            for phase in [Phase::Go, Phase::Caution, Phase::Stop] {
                let duration = table.duration(phase);
                ensure!(
                    duration.is_finite() && duration > 0.0,
                    "{} light has a non-positive {:?} duration: {}",
                    label,
                    phase,
                    duration
                );
            }
        }

        let ns_cycle = self.ns_durations.cycle_length();
        let ew_cycle = self.ew_durations.cycle_length();
        if (ns_cycle - ew_cycle).abs() > f32::EPSILON {
            warn!(
                "light cycle lengths differ ({ns_cycle:.1}s vs {ew_cycle:.1}s); \
                 their relative offset will drift"
            );
        }

        Ok(())
    }
}

/// The main simulation world
pub struct SimWorld {
    /// Light governing the north-south road
    pub ns_light: SimLight,

    /// Light governing the east-west road
    pub ew_light: SimLight,

    /// All live vehicles
    pub vehicles: HashMap<VehicleId, SimVehicle>,

    /// Simulation time
    pub time: f32,

    /// Vehicles spawned since construction
    pub spawned_total: usize,

    /// Vehicles removed after fully leaving the field
    pub exited_total: usize,

    /// Seconds between spawn checks
    spawn_interval: f32,

    /// Seconds accumulated since the last spawn
    spawn_accumulator: f32,

    /// Next ID to assign
    next_id: usize,

    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimWorld {
    fn new_internal(config: WorldConfig, rng: Option<StdRng>) -> Self {
        Self {
            ns_light: SimLight::new(Axis::NorthSouth, config.ns_initial, config.ns_durations),
            ew_light: SimLight::new(Axis::EastWest, config.ew_initial, config.ew_durations),
            vehicles: HashMap::new(),
            time: 0.0,
            spawned_total: 0,
            exited_total: 0,
            spawn_interval: config.spawn_interval,
            spawn_accumulator: 0.0,
            next_id: 0,
            rng,
        }
    }

    /// Create a world with the reference configuration
    pub fn new() -> Self {
        Self::new_internal(WorldConfig::default(), None)
    }

    /// Create a world with the reference configuration and a seeded RNG for
    /// reproducible simulations
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_internal(WorldConfig::default(), Some(StdRng::seed_from_u64(seed)))
    }

    /// Create a world from a validated custom configuration
    pub fn with_config(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new_internal(config, None))
    }

    /// Create a world from a validated custom configuration with a seeded RNG
    pub fn with_config_seeded(config: WorldConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::new_internal(config, Some(StdRng::seed_from_u64(seed))))
    }

    /// Choose a random element from a slice, using seeded RNG if available
    fn choose_random<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        match &mut self.rng {
            Some(rng) => slice.choose(rng),
            None => slice.choose(&mut rand::rng()),
        }
    }

    fn next_sim_id(&mut self) -> SimId {
        let id = SimId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The light governing the given axis
    pub fn light(&self, axis: Axis) -> &SimLight {
        match axis {
            Axis::NorthSouth => &self.ns_light,
            Axis::EastWest => &self.ew_light,
        }
    }

    /// Spawn a vehicle at the entry point of the given approach
    pub fn spawn_vehicle(&mut self, axis: Axis, heading: Heading) -> VehicleId {
        let id = VehicleId(self.next_sim_id());
        let vehicle = SimVehicle::new(id, axis, heading);
        debug!(
            "spawned vehicle {:?} on {:?} {:?}",
            id.0, vehicle.axis, vehicle.heading
        );
        self.vehicles.insert(id, vehicle);
        self.spawned_total += 1;
        id
    }

    /// Spawn a vehicle on a uniformly random approach (axis and heading
    /// both uniform over their two-valued domains)
    fn spawn_random_vehicle(&mut self) {
        const APPROACHES: [(Axis, Heading); 4] = [
            (Axis::NorthSouth, Heading::Positive),
            (Axis::NorthSouth, Heading::Negative),
            (Axis::EastWest, Heading::Positive),
            (Axis::EastWest, Heading::Negative),
        ];
        if let Some(&(axis, heading)) = self.choose_random(&APPROACHES) {
            self.spawn_vehicle(axis, heading);
        }
    }

    /// Signal gate: a vehicle is held only while its light shows CAUTION or
    /// STOP and its leading edge sits inside the detection window short of
    /// the approach's stop line. Anything already across the line clears
    /// the intersection regardless of phase.
    fn signal_permits(&self, vehicle: &SimVehicle) -> bool {
        if self.light(vehicle.axis).phase() == Phase::Go {
            return true;
        }
        let line = vehicle.axis.stop_line_coord(vehicle.heading);
        let lead = vehicle.leading_coord();
        !(lead >= line - DETECTION_WINDOW && lead < line)
    }

    /// Car-following gate: a vehicle is held when the nearest same-lane
    /// vehicle ahead of it leaves less than the safety gap between its
    /// trailing edge and this vehicle's leading edge. Opposite headings and
    /// the other axis never block each other here; cross traffic is the
    /// signal gate's job.
    fn following_permits(&self, vehicle: &SimVehicle) -> bool {
        let leader = self
            .vehicles
            .values()
            .filter(|other| {
                other.id != vehicle.id
                    && other.axis == vehicle.axis
                    && other.heading == vehicle.heading
                    && other.leading_coord() > vehicle.leading_coord()
            })
            .min_by_key(|other| OrderedFloat(other.leading_coord()));

        match leader {
            Some(leader) => leader.trailing_coord() - vehicle.leading_coord() >= MIN_FOLLOWING_GAP,
            None => true,
        }
    }

    /// Advance the simulation by `delta_secs`.
    ///
    /// Order per tick: lights, spawner, movement permission for every
    /// vehicle, motion, boundary removal. Non-finite and non-positive
    /// deltas are a strict no-op so a misbehaving driver cannot corrupt
    /// the timers.
    pub fn advance(&mut self, delta_secs: f32) {
        if !delta_secs.is_finite() || delta_secs <= 0.0 {
            return;
        }

        self.time += delta_secs;
        self.ns_light.advance(delta_secs);
        self.ew_light.advance(delta_secs);

        // At most one spawn per tick; the accumulator zeroes on spawn,
        // discarding any remainder beyond the interval.
        self.spawn_accumulator += delta_secs;
        if self.spawn_accumulator >= self.spawn_interval {
            self.spawn_random_vehicle();
            self.spawn_accumulator = 0.0;
        }

        // Permission is decided for every vehicle against the tick-start
        // snapshot before any of them moves, so earlier movers cannot
        // unblock (or re-block) later ones within the same tick.
        let permitted: Vec<VehicleId> = self
            .vehicles
            .values()
            .filter(|v| self.signal_permits(v) && self.following_permits(v))
            .map(|v| v.id)
            .collect();

        for id in permitted {
            if let Some(vehicle) = self.vehicles.get_mut(&id) {
                vehicle.advance_position();
            }
        }

        let before = self.vehicles.len();
        self.vehicles
            .retain(|_, v| !v.is_out_of_bounds(FIELD_WIDTH, FIELD_HEIGHT));
        let exited = before - self.vehicles.len();
        if exited > 0 {
            debug!("{exited} vehicle(s) left the field");
            self.exited_total += exited;
        }
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Traffic Signal Simulation Summary ===");
        println!("Time: {:.2}s", self.time);
        println!(
            "North-south light: {:?} ({:.1}s remaining)",
            self.ns_light.phase(),
            self.ns_light.time_remaining()
        );
        println!(
            "East-west light:   {:?} ({:.1}s remaining)",
            self.ew_light.phase(),
            self.ew_light.time_remaining()
        );
        println!(
            "Vehicles on field: {} (spawned {}, exited {})",
            self.vehicles.len(),
            self.spawned_total,
            self.exited_total
        );

        if !self.vehicles.is_empty() {
            println!("--- Active Vehicles ---");
            for vehicle in self.vehicles.values() {
                println!(
                    "  Vehicle {:?}: {:?} {:?} at ({:.0}, {:.0})",
                    vehicle.id.0,
                    vehicle.axis,
                    vehicle.heading,
                    vehicle.position.x,
                    vehicle.position.y
                );
            }
        }
    }

    /// Draw a visual map of the field in the terminal
    pub fn draw_map(&self) {
        const SCALE: f32 = 20.0; // field units per character
        let cols = (FIELD_WIDTH / SCALE) as usize;
        let rows = (FIELD_HEIGHT / SCALE) as usize;

        let mut grid = vec![vec![' '; cols]; rows];

        // Helper to convert field coords to grid coords
        let to_grid = |x: f32, y: f32| -> (usize, usize) {
            let col = (x / SCALE) as usize;
            let row = (y / SCALE) as usize;
            (row.min(rows - 1), col.min(cols - 1))
        };

        // Draw the two road strips
        for (row, grid_row) in grid.iter_mut().enumerate() {
            for (col, cell) in grid_row.iter_mut().enumerate() {
                let x = (col as f32 + 0.5) * SCALE;
                let y = (row as f32 + 0.5) * SCALE;
                let on_ns_road = x >= INTERSECTION_MIN && x < INTERSECTION_MAX;
                let on_ew_road = y >= INTERSECTION_MIN && y < INTERSECTION_MAX;
                if on_ns_road || on_ew_road {
                    *cell = '.';
                }
            }
        }

        let phase_char = |phase: Phase| match phase {
            Phase::Go => 'G',
            Phase::Caution => 'C',
            Phase::Stop => 'S',
        };

        // One indicator per approach, at the corners of the crossing
        let ns = phase_char(self.ns_light.phase());
        let ew = phase_char(self.ew_light.phase());
        for (x, y, glyph) in [
            (INTERSECTION_MIN - SCALE, INTERSECTION_MIN - SCALE, ns),
            (INTERSECTION_MAX + SCALE, INTERSECTION_MAX + SCALE, ns),
            (INTERSECTION_MAX + SCALE, INTERSECTION_MIN - SCALE, ew),
            (INTERSECTION_MIN - SCALE, INTERSECTION_MAX + SCALE, ew),
        ] {
            let (row, col) = to_grid(x, y);
            grid[row][col] = glyph;
        }

        // Draw vehicles as heading glyphs
        for vehicle in self.vehicles.values() {
            let center_x = vehicle.position.x + vehicle.draw_width() / 2.0;
            let center_y = vehicle.position.y + vehicle.draw_height() / 2.0;
            let (row, col) = to_grid(center_x.max(0.0), center_y.max(0.0));
            grid[row][col] = match (vehicle.axis, vehicle.heading) {
                (Axis::NorthSouth, Heading::Positive) => '^',
                (Axis::NorthSouth, Heading::Negative) => 'v',
                (Axis::EastWest, Heading::Positive) => '>',
                (Axis::EastWest, Heading::Negative) => '<',
            };
        }

        println!("=== Field Map ===");
        println!("Legend: G/C/S=Light phase, ^v<>=Vehicle heading, .=Road");
        for row in &grid {
            let line: String = row.iter().collect();
            println!("{}", line);
        }
        println!();
    }
}
