//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;

use crate::simulation::{Axis, SimParams, SimWorld, VehicleId};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

impl Default for SimWorldResource {
    fn default() -> Self {
        Self(SimWorld::grid(4, 4, 800.0, 600.0).expect("default grid world is valid"))
    }
}

/// Resource holding the live-adjustable parameters sampled each tick
#[derive(Resource, Default)]
pub struct LiveParams(pub SimParams);

/// Links a Bevy entity to a simulation vehicle
#[derive(Component)]
pub struct VehicleDot(pub VehicleId);

/// Links a Bevy entity to one axis of an intersection's signal pair
#[derive(Component)]
pub struct SignalBox {
    pub index: usize,
    pub axis: Axis,
}

/// Converts scene coordinates (top-left origin, y down) to Bevy world
/// coordinates (center origin, y up)
pub fn scene_to_world(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(x - width / 2.0, height / 2.0 - y)
}
