//! Initial scene setup: camera, lane stripes and signal boxes

use bevy::prelude::*;

use super::components::{scene_to_world, SignalBox, SimWorldResource};
use crate::simulation::Axis;

const LANE_STRIPE_WIDTH: f32 = 4.0;
const SIGNAL_BOX_SIZE: f32 = 12.0;
/// How far a signal box sits from its intersection center
const SIGNAL_BOX_OFFSET: f32 = 20.0;

/// System to set up the static scene
pub fn setup_scene(mut commands: Commands, sim_world: Res<SimWorldResource>) {
    commands.spawn(Camera2d);

    let snapshot = sim_world.0.snapshot();

    for lane in &snapshot.lanes {
        let (size, center) = match lane.axis {
            Axis::Horizontal => (
                Vec2::new(snapshot.width, LANE_STRIPE_WIDTH),
                scene_to_world(
                    snapshot.width / 2.0,
                    lane.cross,
                    snapshot.width,
                    snapshot.height,
                ),
            ),
            Axis::Vertical => (
                Vec2::new(LANE_STRIPE_WIDTH, snapshot.height),
                scene_to_world(
                    lane.cross,
                    snapshot.height / 2.0,
                    snapshot.width,
                    snapshot.height,
                ),
            ),
        };
        commands.spawn((
            Sprite::from_color(Color::srgb(0.45, 0.45, 0.45), size),
            Transform::from_translation(center.extend(0.0)),
        ));
    }

    // One box per axis per intersection; sync_signals recolors them
    for (index, signal) in snapshot.signals.iter().enumerate() {
        let horizontal_pos = scene_to_world(
            signal.x - SIGNAL_BOX_OFFSET,
            signal.y + SIGNAL_BOX_OFFSET,
            snapshot.width,
            snapshot.height,
        );
        commands.spawn((
            SignalBox {
                index,
                axis: Axis::Horizontal,
            },
            Sprite::from_color(
                Color::srgb(0.3, 0.3, 0.3),
                Vec2::splat(SIGNAL_BOX_SIZE),
            ),
            Transform::from_translation(horizontal_pos.extend(0.5)),
        ));

        let vertical_pos = scene_to_world(
            signal.x + SIGNAL_BOX_OFFSET,
            signal.y - SIGNAL_BOX_OFFSET,
            snapshot.width,
            snapshot.height,
        );
        commands.spawn((
            SignalBox {
                index,
                axis: Axis::Vertical,
            },
            Sprite::from_color(
                Color::srgb(0.3, 0.3, 0.3),
                Vec2::splat(SIGNAL_BOX_SIZE),
            ),
            Transform::from_translation(vertical_pos.extend(0.5)),
        ));
    }
}
