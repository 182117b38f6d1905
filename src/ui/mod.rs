//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the
//! `simulation` module. The UI consumes the engine's scene snapshot and
//! renders it with Bevy's 2D graphics.

mod components;
mod input;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{LiveParams, SimWorldResource};

use input::handle_input;
use sync::{sync_signals, sync_vehicles, tick_simulation};
use world::setup_scene;

/// Plugin to register all UI systems
pub struct SignalSimUiPlugin;

impl Plugin for SignalSimUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimWorldResource>()
            .init_resource::<LiveParams>()
            .add_systems(Startup, setup_scene)
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(Update, (sync_vehicles, sync_signals, handle_input));
    }
}
