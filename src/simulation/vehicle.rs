//! Vehicle movement logic for the traffic signal simulation
//!
//! Standalone implementation that doesn't depend on Bevy.

use super::types::{
    Axis, Heading, Position, VehicleId, FIELD_HEIGHT, FIELD_WIDTH, LANE_OFFSET, ROAD_CENTER,
    VEHICLE_LENGTH, VEHICLE_SPEED, VEHICLE_WIDTH,
};

/// A vehicle in the simulation
#[derive(Debug, Clone)]
pub struct SimVehicle {
    pub id: VehicleId,
    pub axis: Axis,
    pub heading: Heading,
    /// Min-corner of the vehicle's rectangle on the field
    pub position: Position,
    pub speed: f32,
}

impl SimVehicle {
    /// Create a vehicle at the entry point for its approach: the body sits
    /// fully off-field with the leading edge on the field boundary.
    pub fn new(id: VehicleId, axis: Axis, heading: Heading) -> Self {
        // Traffic keeps left: each heading gets its own side of the road.
        let lane = match (axis, heading) {
            (Axis::NorthSouth, Heading::Positive) | (Axis::EastWest, Heading::Negative) => {
                ROAD_CENTER - LANE_OFFSET - VEHICLE_WIDTH / 2.0
            }
            _ => ROAD_CENTER + LANE_OFFSET - VEHICLE_WIDTH / 2.0,
        };

        let position = match (axis, heading) {
            (Axis::NorthSouth, Heading::Positive) => Position::new(lane, FIELD_HEIGHT),
            (Axis::NorthSouth, Heading::Negative) => Position::new(lane, -VEHICLE_LENGTH),
            (Axis::EastWest, Heading::Positive) => Position::new(-VEHICLE_LENGTH, lane),
            (Axis::EastWest, Heading::Negative) => Position::new(FIELD_WIDTH, lane),
        };

        Self {
            id,
            axis,
            heading,
            position,
            speed: VEHICLE_SPEED,
        }
    }

    /// Unconditionally step the vehicle along its axis.
    ///
    /// The world only calls this for vehicles the movement permission rule
    /// has cleared; no precondition is enforced here.
    pub fn advance_position(&mut self) {
        match self.axis {
            Axis::NorthSouth => self.position.y -= self.speed * self.heading.sign(),
            Axis::EastWest => self.position.x += self.speed * self.heading.sign(),
        }
    }

    /// Horizontal extent of the drawn rectangle
    pub fn draw_width(&self) -> f32 {
        match self.axis {
            Axis::NorthSouth => VEHICLE_WIDTH,
            Axis::EastWest => VEHICLE_LENGTH,
        }
    }

    /// Vertical extent of the drawn rectangle
    pub fn draw_height(&self) -> f32 {
        match self.axis {
            Axis::NorthSouth => VEHICLE_LENGTH,
            Axis::EastWest => VEHICLE_WIDTH,
        }
    }

    /// The vehicle's leading edge as a signed coordinate that increases in
    /// the direction of travel. Both permission gates compare these values,
    /// which keeps the four approaches symmetric.
    pub fn leading_coord(&self) -> f32 {
        match (self.axis, self.heading) {
            (Axis::NorthSouth, Heading::Positive) => -self.position.y,
            (Axis::NorthSouth, Heading::Negative) => self.position.y + VEHICLE_LENGTH,
            (Axis::EastWest, Heading::Positive) => self.position.x + VEHICLE_LENGTH,
            (Axis::EastWest, Heading::Negative) => -self.position.x,
        }
    }

    /// The vehicle's trailing edge in the same travel coordinate as
    /// [`Self::leading_coord`]
    pub fn trailing_coord(&self) -> f32 {
        self.leading_coord() - VEHICLE_LENGTH
    }

    /// True once the vehicle has fully left the field: every part of its
    /// rectangle is beyond the boundary, not merely touching it.
    pub fn is_out_of_bounds(&self, field_width: f32, field_height: f32) -> bool {
        self.position.x < -self.draw_width()
            || self.position.x > field_width
            || self.position.y < -self.draw_height()
            || self.position.y > field_height
    }
}
