//! Core types for the traffic simulation
//!
//! These are standalone types that don't depend on Bevy.

/// A unique identifier for vehicles
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId(pub usize);

/// Travel axis of a lane. Horizontal lanes run left to right,
/// vertical lanes run top to bottom, as in a canvas coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// The color a signal cycle is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalColor {
    Green,
    Yellow,
    Red,
}

/// Radius of a vehicle in scene units
pub const VEHICLE_RADIUS: f32 = 8.0;

/// Minimum required gap between a vehicle's leading edge and its leader's
/// trailing edge; the per-tick queue check uses `SAFE_DISTANCE + 2 * radius`
pub const SAFE_DISTANCE: f32 = 15.0;

/// Start of the signal approach window, measured before the stop line
pub const APPROACH_BEFORE: f32 = 30.0;

/// End of the signal approach window, measured past the stop line
pub const APPROACH_AFTER: f32 = 10.0;

/// Upper bound of the uniform jitter added to the spawn interval each tick
pub const SPAWN_JITTER_MS: f64 = 1000.0;

/// Offset at which vehicles enter a lane, just off the near track boundary
pub const SPAWN_ENTRY_OFFSET: f32 = -10.0;

/// Default green phase duration in ms
pub const DEFAULT_GREEN_MS: f64 = 6000.0;

/// Default yellow phase duration in ms
pub const DEFAULT_YELLOW_MS: f64 = 2000.0;

/// Tolerance when matching an intersection to a lane's cross coordinate
pub(crate) const LANE_ALIGN_EPSILON: f32 = 1.0;
