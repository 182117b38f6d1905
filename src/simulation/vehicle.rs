//! Vehicle movement logic for the traffic simulation
//!
//! Standalone implementation that doesn't depend on Bevy.

use super::types::{VehicleId, VEHICLE_RADIUS};

/// A vehicle in the traffic simulation
///
/// Position is a scalar offset along the owning lane's travel axis; the lane
/// knows the cross coordinate and travel direction.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct SimVehicle {
    pub id: VehicleId,
    /// Offset along the lane's travel axis
    pub offset: f32,
    pub speed: f32,
    pub acceleration: f32,
    pub max_speed: f32,
    pub radius: f32,
    /// Whether the vehicle is permitted to accelerate this tick
    pub moving: bool,
}

impl SimVehicle {
    pub fn new(id: VehicleId, offset: f32, acceleration: f32, max_speed: f32) -> Self {
        Self {
            id,
            offset,
            speed: 0.0,
            acceleration,
            max_speed,
            radius: VEHICLE_RADIUS,
            moving: true,
        }
    }

    /// Advances the vehicle by `dt_secs` of simulated time.
    ///
    /// While movement is enabled the speed ramps toward the cap; the
    /// displacement then uses the end-of-step speed. A stopped vehicle has
    /// its speed forced to zero by [`stop`](Self::stop), so the displacement
    /// is a no-op for it.
    pub fn integrate(&mut self, dt_secs: f32) {
        if self.moving && self.speed < self.max_speed {
            self.speed = (self.speed + self.acceleration * dt_secs).min(self.max_speed);
        }
        self.offset += self.speed * dt_secs;
    }

    /// Immediate full stop: speed drops to zero and movement is disabled.
    /// This is a deliberate simplification, not a deceleration model.
    pub fn stop(&mut self) {
        self.moving = false;
        self.speed = 0.0;
    }

    /// Re-enables movement; the speed ramps back up from standstill on the
    /// next integration step
    pub fn resume(&mut self) {
        self.moving = true;
    }

    /// Front edge of the vehicle along the travel axis
    pub fn leading_edge(&self) -> f32 {
        self.offset + self.radius
    }

    /// Rear edge of the vehicle along the travel axis
    pub fn trailing_edge(&self) -> f32 {
        self.offset - self.radius
    }
}
