//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;
use std::collections::HashMap;

use super::components::{scene_to_world, LiveParams, SignalBox, SimWorldResource, VehicleDot};
use crate::simulation::{SignalColor, VehicleId};

/// System to run the simulation tick
pub fn tick_simulation(
    time: Res<Time>,
    mut sim_world: ResMut<SimWorldResource>,
    params: Res<LiveParams>,
) {
    let delta_ms = f64::from(time.delta_secs()) * 1000.0;
    if let Err(err) = sim_world.0.step(delta_ms, &params.0) {
        warn!("simulation step failed: {err:#}");
    }
}

/// System to sync vehicle visuals from the scene snapshot
pub fn sync_vehicles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    sim_world: Res<SimWorldResource>,
    mut dot_query: Query<(Entity, &VehicleDot, &mut Transform)>,
) {
    let snapshot = sim_world.0.snapshot();

    let mut views: HashMap<VehicleId, (f32, f32, f32)> = HashMap::new();
    for lane in &snapshot.lanes {
        for vehicle in &lane.vehicles {
            views.insert(vehicle.id, (vehicle.x, vehicle.y, vehicle.radius));
        }
    }

    // Update existing dots, despawning the ones whose vehicle has left
    for (entity, dot, mut transform) in dot_query.iter_mut() {
        match views.remove(&dot.0) {
            Some((x, y, _)) => {
                let position = scene_to_world(x, y, snapshot.width, snapshot.height);
                transform.translation = position.extend(1.0);
            }
            None => {
                commands.entity(entity).despawn();
            }
        }
    }

    // Spawn dots for newly admitted vehicles
    for (id, (x, y, radius)) in views {
        let position = scene_to_world(x, y, snapshot.width, snapshot.height);
        commands.spawn((
            VehicleDot(id),
            Mesh2d(meshes.add(Circle::new(radius))),
            MeshMaterial2d(materials.add(Color::srgb(0.2, 0.4, 0.9))),
            Transform::from_translation(position.extend(1.0)),
        ));
    }
}

/// System to recolor signal boxes from the scene snapshot
pub fn sync_signals(sim_world: Res<SimWorldResource>, mut box_query: Query<(&SignalBox, &mut Sprite)>) {
    let snapshot = sim_world.0.snapshot();

    for (signal_box, mut sprite) in box_query.iter_mut() {
        let Some(view) = snapshot.signals.get(signal_box.index) else {
            continue;
        };
        let color = match signal_box.axis {
            crate::simulation::Axis::Horizontal => view.horizontal,
            crate::simulation::Axis::Vertical => view.vertical,
        };
        sprite.color = match color {
            SignalColor::Green => Color::srgb(0.1, 0.8, 0.2),
            SignalColor::Yellow => Color::srgb(0.9, 0.8, 0.1),
            SignalColor::Red => Color::srgb(0.9, 0.15, 0.1),
        };
    }
}
