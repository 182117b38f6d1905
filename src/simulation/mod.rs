//! Standalone traffic simulation module
//!
//! This module contains all the core simulation logic that can run
//! independently of the Bevy game engine. It can be tested via console
//! without needing to boot up the full game.

mod intersection;
mod lane;
mod params;
mod signal;
mod snapshot;
mod types;
mod vehicle;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use intersection::SimIntersection;
#[allow(unused_imports)]
pub use lane::{SimLane, SpawnPlacement};
#[allow(unused_imports)]
pub use params::{
    ParamSource, SimParams, DEFAULT_ACCELERATION, DEFAULT_MAX_SPEED, DEFAULT_SPAWN_INTERVAL_MS,
};
#[allow(unused_imports)]
pub use signal::{SignalCycle, SignalPhase};
#[allow(unused_imports)]
pub use snapshot::{LaneView, SceneSnapshot, SignalView, VehicleView};
#[allow(unused_imports)]
pub use types::{
    Axis, SignalColor, VehicleId, APPROACH_AFTER, APPROACH_BEFORE, DEFAULT_GREEN_MS,
    DEFAULT_YELLOW_MS, SAFE_DISTANCE, SPAWN_ENTRY_OFFSET, SPAWN_JITTER_MS, VEHICLE_RADIUS,
};
#[allow(unused_imports)]
pub use vehicle::SimVehicle;
pub use world::SimWorld;
