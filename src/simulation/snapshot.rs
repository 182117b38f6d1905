//! Renderable scene snapshot
//!
//! The boundary between the simulation core and any renderer: after each
//! step the engine can emit this value type, and the renderer consumes it
//! without touching engine state.

use super::types::{Axis, SignalColor, VehicleId};

/// Render descriptor for one vehicle, in scene coordinates
#[derive(Debug, Clone, Copy)]
pub struct VehicleView {
    pub id: VehicleId,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Render descriptor for one lane and its ordered vehicle queue
#[derive(Debug, Clone)]
pub struct LaneView {
    pub axis: Axis,
    pub cross: f32,
    pub vehicles: Vec<VehicleView>,
}

/// Render descriptor for one intersection's signal pair
#[derive(Debug, Clone, Copy)]
pub struct SignalView {
    pub x: f32,
    pub y: f32,
    pub horizontal: SignalColor,
    pub vertical: SignalColor,
}

/// Everything a renderer needs to draw one frame of the simulation
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    pub width: f32,
    pub height: f32,
    pub lanes: Vec<LaneView>,
    pub signals: Vec<SignalView>,
}
