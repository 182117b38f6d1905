//! Lane logic: vehicle queue, spawn policy and per-tick gating
//!
//! Standalone implementation that doesn't depend on Bevy.

use ordered_float::OrderedFloat;

use super::intersection::SimIntersection;
use super::params::SimParams;
use super::types::{
    Axis, VehicleId, APPROACH_AFTER, APPROACH_BEFORE, SAFE_DISTANCE, SPAWN_ENTRY_OFFSET,
    VEHICLE_RADIUS,
};
use super::vehicle::SimVehicle;

/// Where a lane places newly admitted vehicles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnPlacement {
    /// Always spawn at the entry boundary; the per-tick following check
    /// resolves any overlap with a queued rear vehicle
    #[default]
    Boundary,
    /// Spawn at the entry boundary unless the rearmost vehicle has not yet
    /// cleared a safety margin past it, in which case the new vehicle is
    /// placed immediately behind the queue
    BehindQueue,
}

/// A single directional track carrying an ordered queue of vehicles
///
/// Vehicles are kept in spawn order, which is also position order along the
/// travel direction: index 0 is the front-most vehicle, closest to the exit.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct SimLane {
    pub axis: Axis,
    /// Fixed coordinate on the perpendicular axis
    pub cross: f32,
    /// Far track boundary; vehicles are evicted once their trailing edge
    /// passes it
    pub length: f32,
    pub vehicles: Vec<SimVehicle>,
    pub last_spawn_ms: f64,
    /// Stop line coordinates of the intersections on this lane, as
    /// (intersection index, stop coordinate), sorted by stop coordinate.
    /// Rebuilt at setup time whenever the world layout changes.
    signal_stops: Vec<(usize, f32)>,
}

impl SimLane {
    pub fn new(axis: Axis, cross: f32, length: f32) -> Self {
        Self {
            axis,
            cross,
            length,
            vehicles: Vec::new(),
            last_spawn_ms: 0.0,
            signal_stops: Vec::new(),
        }
    }

    /// Rebuilds the sorted stop line lookup from the world's intersections
    pub fn link_intersections(&mut self, intersections: &[SimIntersection]) {
        self.signal_stops = intersections
            .iter()
            .enumerate()
            .filter(|(_, intersection)| intersection.crosses(self.axis, self.cross))
            .map(|(index, intersection)| (index, intersection.stop_line(self.axis)))
            .collect();
        self.signal_stops.sort_by_key(|(_, stop)| OrderedFloat(*stop));
    }

    /// Runs the spawn admission test and, when it passes, adds a vehicle
    /// carrying the current tick's parameters. Returns whether a vehicle was
    /// admitted.
    ///
    /// Admission requires `now - last_spawn > interval + jitter`, so the mean
    /// inter-arrival time stays strictly above the interval parameter.
    pub fn try_spawn(
        &mut self,
        now_ms: f64,
        params: &SimParams,
        placement: SpawnPlacement,
        jitter_ms: f64,
        id: VehicleId,
    ) -> bool {
        if now_ms - self.last_spawn_ms <= params.spawn_interval_ms + jitter_ms {
            return false;
        }
        let offset = match placement {
            SpawnPlacement::Boundary => SPAWN_ENTRY_OFFSET,
            SpawnPlacement::BehindQueue => match self.vehicles.last() {
                Some(rear)
                    if rear.offset - SPAWN_ENTRY_OFFSET
                        < SAFE_DISTANCE + 2.0 * VEHICLE_RADIUS =>
                {
                    rear.offset - SAFE_DISTANCE - 2.0 * VEHICLE_RADIUS
                }
                _ => SPAWN_ENTRY_OFFSET,
            },
        };
        self.vehicles
            .push(SimVehicle::new(id, offset, params.acceleration, params.max_speed));
        self.last_spawn_ms = now_ms;
        true
    }

    /// Adds a vehicle directly, bypassing the admission test.
    /// The caller is responsible for keeping the queue in front-first order.
    pub fn push_vehicle(&mut self, vehicle: SimVehicle) {
        self.vehicles.push(vehicle);
    }

    /// Applies the per-tick vehicle policy to the whole queue, front-most
    /// vehicle first: signal gating, then following-distance gating, then
    /// kinematic integration.
    ///
    /// Once either rule stops a vehicle nothing re-enables it within the
    /// same tick.
    pub fn update_vehicles(&mut self, dt_secs: f32, intersections: &[SimIntersection]) {
        for index in 0..self.vehicles.len() {
            let leader_offset = if index > 0 {
                Some(self.vehicles[index - 1].offset)
            } else {
                None
            };
            let next_stop = self.next_stop_ahead(self.vehicles[index].offset);
            let vehicle = &mut self.vehicles[index];

            // Signal gating against the nearest upcoming stop line. A vehicle
            // past all intersections, or outside the approach window, always
            // has movement enabled here.
            match next_stop {
                Some((intersection_index, stop))
                    if in_approach_window(vehicle.leading_edge(), stop)
                        && intersections[intersection_index].is_blocking(self.axis) =>
                {
                    vehicle.stop()
                }
                _ => vehicle.resume(),
            }

            // Queue behavior: hold when too close to the vehicle ahead
            if let Some(leader_offset) = leader_offset {
                if leader_offset - vehicle.offset < SAFE_DISTANCE + 2.0 * vehicle.radius {
                    vehicle.stop();
                }
            }

            vehicle.integrate(dt_secs);
        }
    }

    /// Removes vehicles whose trailing edge has passed the far track
    /// boundary, preserving the relative order of the survivors.
    /// Returns the number of evicted vehicles.
    pub fn evict(&mut self) -> usize {
        let before = self.vehicles.len();
        let length = self.length;
        self.vehicles.retain(|vehicle| vehicle.trailing_edge() < length);
        before - self.vehicles.len()
    }

    /// Scene coordinates of a point at the given offset along this lane
    pub fn scene_position(&self, offset: f32) -> (f32, f32) {
        match self.axis {
            Axis::Horizontal => (offset, self.cross),
            Axis::Vertical => (self.cross, offset),
        }
    }

    /// The nearest stop line strictly ahead of the given offset.
    /// `signal_stops` is sorted, so the first match is the nearest.
    fn next_stop_ahead(&self, offset: f32) -> Option<(usize, f32)> {
        self.signal_stops
            .iter()
            .find(|(_, stop)| *stop > offset)
            .copied()
    }
}

fn in_approach_window(leading_edge: f32, stop: f32) -> bool {
    leading_edge >= stop - APPROACH_BEFORE && leading_edge <= stop + APPROACH_AFTER
}
