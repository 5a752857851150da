//! Core types for the traffic signal simulation
//!
//! These are standalone types that don't depend on Bevy.

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimId(pub usize);

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId(pub SimId);

/// One of the two perpendicular roads crossing at the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    NorthSouth,
    EastWest,
}

/// Signed direction of travel along an axis.
///
/// `Positive` is the canonical direction: south-to-north on the north-south
/// road, west-to-east on the east-west road.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Positive,
    Negative,
}

impl Heading {
    pub fn sign(self) -> f32 {
        match self {
            Heading::Positive => 1.0,
            Heading::Negative => -1.0,
        }
    }
}

/// One state of a traffic light's cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Advance permitted (green)
    Go,
    /// Stop required, light about to change (yellow)
    Caution,
    /// Stop required (red)
    Stop,
}

impl Phase {
    /// The next phase in the fixed cyclic order GO -> CAUTION -> STOP -> GO
    pub fn next(self) -> Phase {
        match self {
            Phase::Go => Phase::Caution,
            Phase::Caution => Phase::Stop,
            Phase::Stop => Phase::Go,
        }
    }
}

/// A 2D position on the simulation field.
///
/// For vehicles this is the min-corner of the drawn rectangle, with the
/// y axis growing southward as a renderer would draw it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width of the simulation field in world units
pub const FIELD_WIDTH: f32 = 800.0;

/// Height of the simulation field in world units
pub const FIELD_HEIGHT: f32 = 800.0;

/// Vehicle extent along its axis of travel
pub const VEHICLE_LENGTH: f32 = 50.0;

/// Vehicle extent across its axis of travel
pub const VEHICLE_WIDTH: f32 = 20.0;

/// Distance a permitted vehicle steps per tick
pub const VEHICLE_SPEED: f32 = 2.0;

/// Near edge of the central intersection box on both axes
pub const INTERSECTION_MIN: f32 = 350.0;

/// Far edge of the central intersection box on both axes
pub const INTERSECTION_MAX: f32 = 550.0;

/// Centerline shared by both roads
pub const ROAD_CENTER: f32 = (INTERSECTION_MIN + INTERSECTION_MAX) / 2.0;

/// Offset from the road centerline to each lane's centerline
pub const LANE_OFFSET: f32 = 25.0;

/// How far short of a stop line an approaching vehicle is held by a
/// CAUTION or STOP phase. Sized so a vehicle at full speed is caught at
/// least one tick before it would cross the line.
pub const DETECTION_WINDOW: f32 = 2.0 * VEHICLE_SPEED;

/// Minimum gap enforced between a vehicle's leading edge and the trailing
/// edge of the nearest same-lane vehicle ahead
pub const MIN_FOLLOWING_GAP: f32 = VEHICLE_LENGTH / 5.0;

impl Axis {
    /// The stop line for one approach, as a coordinate along the direction
    /// of travel (see [`crate::simulation::SimVehicle::leading_coord`]).
    /// Vehicles past this value no longer answer to the light.
    pub fn stop_line_coord(self, heading: Heading) -> f32 {
        match (self, heading) {
            // Northbound traffic enters from y = FIELD_HEIGHT and meets the
            // south edge of the box first; travel coordinate is -y.
            (Axis::NorthSouth, Heading::Positive) => -INTERSECTION_MAX,
            (Axis::NorthSouth, Heading::Negative) => INTERSECTION_MIN,
            (Axis::EastWest, Heading::Positive) => INTERSECTION_MIN,
            (Axis::EastWest, Heading::Negative) => -INTERSECTION_MAX,
        }
    }
}
