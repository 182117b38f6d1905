//! Main simulation world that ties everything together
//!
//! This is the entry point for running the traffic simulation
//! without any Bevy dependencies.

use anyhow::{bail, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::ops::Range;

use super::intersection::SimIntersection;
use super::lane::{SimLane, SpawnPlacement};
use super::params::{ParamSource, SimParams};
use super::snapshot::{LaneView, SceneSnapshot, SignalView, VehicleView};
use super::types::{
    Axis, SignalColor, VehicleId, DEFAULT_GREEN_MS, DEFAULT_YELLOW_MS, SPAWN_JITTER_MS,
};
use super::vehicle::SimVehicle;

/// The main simulation world
///
/// Owns all lanes and intersections and advances the whole scene by one time
/// step per external tick. Single-threaded by construction: the whole update
/// completes synchronously before the next tick's elapsed time is sampled.
pub struct SimWorld {
    /// Track extent on the horizontal axis
    pub width: f32,
    /// Track extent on the vertical axis
    pub height: f32,
    /// All lanes; each owns its vehicle queue exclusively
    pub lanes: Vec<SimLane>,
    /// All signal-controlled intersections
    pub intersections: Vec<SimIntersection>,
    /// Spawn placement rule applied to every lane
    pub placement: SpawnPlacement,
    /// Simulated time in ms
    pub time_ms: f64,
    /// Total vehicles admitted since construction
    pub vehicles_spawned: usize,
    /// Total vehicles that left past the far boundary
    pub vehicles_completed: usize,
    /// Next vehicle ID to assign
    next_vehicle_id: usize,
    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,
}

impl SimWorld {
    fn new_internal(width: f32, height: f32, rng: Option<StdRng>) -> Self {
        Self {
            width,
            height,
            lanes: Vec::new(),
            intersections: Vec::new(),
            placement: SpawnPlacement::Boundary,
            time_ms: 0.0,
            vehicles_spawned: 0,
            vehicles_completed: 0,
            next_vehicle_id: 0,
            rng,
        }
    }

    /// Creates an empty world covering the given scene extent
    pub fn new(width: f32, height: f32) -> Self {
        Self::new_internal(width, height, None)
    }

    /// Creates an empty world with a seeded RNG for reproducible simulations
    pub fn new_with_seed(width: f32, height: f32, seed: u64) -> Self {
        Self::new_internal(width, height, Some(StdRng::seed_from_u64(seed)))
    }

    /// Get a random value in the given range, using the seeded RNG if one
    /// is attached
    fn random_range(&mut self, range: Range<f64>) -> f64 {
        match &mut self.rng {
            Some(rng) => rng.random_range(range),
            None => rand::rng().random_range(range),
        }
    }

    /// Adds a lane traveling along the given axis at the given cross
    /// coordinate. Returns its index.
    pub fn add_lane(&mut self, axis: Axis, cross: f32) -> usize {
        let length = match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        };
        let mut lane = SimLane::new(axis, cross, length);
        lane.link_intersections(&self.intersections);
        self.lanes.push(lane);
        self.lanes.len() - 1
    }

    /// Adds an intersection with the default signal timings and relinks all
    /// lanes. Returns its index.
    pub fn add_intersection(&mut self, x: f32, y: f32) -> Result<usize> {
        let intersection = SimIntersection::new(x, y, DEFAULT_GREEN_MS, DEFAULT_YELLOW_MS)?;
        self.intersections.push(intersection);
        for lane in &mut self.lanes {
            lane.link_intersections(&self.intersections);
        }
        Ok(self.intersections.len() - 1)
    }

    /// Adds a vehicle directly to a lane, bypassing the spawn policy.
    /// Used by world builders and tests; the caller keeps the lane's
    /// front-first ordering intact.
    pub fn spawn_vehicle(&mut self, lane: usize, offset: f32, params: &SimParams) -> VehicleId {
        let id = VehicleId(self.next_vehicle_id);
        self.next_vehicle_id += 1;
        self.vehicles_spawned += 1;
        self.lanes[lane].push_vehicle(SimVehicle::new(
            id,
            offset,
            params.acceleration,
            params.max_speed,
        ));
        id
    }

    /// Creates a grid world: `rows` horizontal lanes and `cols` vertical
    /// lanes, evenly spaced, with a signal-controlled intersection at every
    /// crossing. Each intersection starts at a random offset into its first
    /// phase so the grid is not synchronized.
    pub fn grid(rows: usize, cols: usize, width: f32, height: f32) -> Result<Self> {
        Self::build_grid(Self::new(width, height), rows, cols)
    }

    /// Creates a grid world with a seeded RNG for reproducible simulations
    pub fn grid_with_seed(
        rows: usize,
        cols: usize,
        width: f32,
        height: f32,
        seed: u64,
    ) -> Result<Self> {
        Self::build_grid(Self::new_with_seed(width, height, seed), rows, cols)
    }

    fn build_grid(mut world: SimWorld, rows: usize, cols: usize) -> Result<SimWorld> {
        if rows == 0 || cols == 0 {
            bail!("grid world needs at least one lane per axis");
        }

        let ys: Vec<f32> = (0..rows)
            .map(|i| world.height / (rows + 1) as f32 * (i + 1) as f32)
            .collect();
        let xs: Vec<f32> = (0..cols)
            .map(|j| world.width / (cols + 1) as f32 * (j + 1) as f32)
            .collect();

        for &y in &ys {
            world.add_lane(Axis::Horizontal, y);
        }
        for &x in &xs {
            world.add_lane(Axis::Vertical, x);
        }

        for &y in &ys {
            for &x in &xs {
                let index = world.add_intersection(x, y)?;
                let offset = world.random_range(0.0..DEFAULT_GREEN_MS);
                world.intersections[index].set_offset(offset);
            }
        }

        Ok(world)
    }

    /// Creates the single-crossing world: one lane per axis meeting at the
    /// center, with queued spawn placement
    pub fn single_crossing(width: f32, height: f32) -> Result<Self> {
        Self::build_single_crossing(Self::new(width, height))
    }

    /// Creates the single-crossing world with a seeded RNG
    pub fn single_crossing_with_seed(width: f32, height: f32, seed: u64) -> Result<Self> {
        Self::build_single_crossing(Self::new_with_seed(width, height, seed))
    }

    fn build_single_crossing(mut world: SimWorld) -> Result<SimWorld> {
        world.placement = SpawnPlacement::BehindQueue;
        let center_x = world.width / 2.0;
        let center_y = world.height / 2.0;
        world.add_lane(Axis::Horizontal, center_y);
        world.add_lane(Axis::Vertical, center_x);
        let index = world.add_intersection(center_x, center_y)?;
        let offset = world.random_range(0.0..DEFAULT_GREEN_MS);
        world.intersections[index].set_offset(offset);
        Ok(world)
    }

    /// Advances the whole world by one time step.
    ///
    /// Order within the tick: sample parameters, advance every signal, run
    /// the spawn policy per lane, run the per-vehicle policy per lane, evict
    /// vehicles past the far boundary. Gating depends on up-to-date signal
    /// state, so this order is load-bearing.
    pub fn step(&mut self, delta_ms: f64, source: &dyn ParamSource) -> Result<()> {
        if delta_ms < 0.0 {
            bail!("step elapsed time must be non-negative, got {delta_ms}ms");
        }
        let params = source.sample();
        self.time_ms += delta_ms;

        for intersection in &mut self.intersections {
            intersection.advance(delta_ms);
        }

        for index in 0..self.lanes.len() {
            let jitter = self.random_range(0.0..SPAWN_JITTER_MS);
            let id = VehicleId(self.next_vehicle_id);
            if self.lanes[index].try_spawn(self.time_ms, &params, self.placement, jitter, id) {
                self.next_vehicle_id += 1;
                self.vehicles_spawned += 1;
                debug!("lane {} admitted vehicle {:?}", index, id);
            }
        }

        let dt_secs = (delta_ms / 1000.0) as f32;
        let mut completed = 0;
        for lane in &mut self.lanes {
            lane.update_vehicles(dt_secs, &self.intersections);
            completed += lane.evict();
        }
        self.vehicles_completed += completed;

        Ok(())
    }

    /// Number of vehicles currently on the tracks
    pub fn vehicle_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.vehicles.len()).sum()
    }

    /// Emits the render descriptors for the current frame
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            width: self.width,
            height: self.height,
            lanes: self
                .lanes
                .iter()
                .map(|lane| LaneView {
                    axis: lane.axis,
                    cross: lane.cross,
                    vehicles: lane
                        .vehicles
                        .iter()
                        .map(|vehicle| {
                            let (x, y) = lane.scene_position(vehicle.offset);
                            VehicleView {
                                id: vehicle.id,
                                x,
                                y,
                                radius: vehicle.radius,
                            }
                        })
                        .collect(),
                })
                .collect(),
            signals: self
                .intersections
                .iter()
                .map(|intersection| SignalView {
                    x: intersection.x,
                    y: intersection.y,
                    horizontal: intersection.color(Axis::Horizontal),
                    vertical: intersection.color(Axis::Vertical),
                })
                .collect(),
        }
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Signal Sim Summary ===");
        println!("Time: {:.2}s", self.time_ms / 1000.0);
        println!(
            "Lanes: {}, Intersections: {}",
            self.lanes.len(),
            self.intersections.len()
        );
        println!(
            "Active vehicles: {}, spawned: {}, completed: {}",
            self.vehicle_count(),
            self.vehicles_spawned,
            self.vehicles_completed
        );
        for (index, lane) in self.lanes.iter().enumerate() {
            let axis = match lane.axis {
                Axis::Horizontal => "horizontal",
                Axis::Vertical => "vertical",
            };
            println!(
                "  Lane {} ({} @ {:.0}): {} vehicles",
                index,
                axis,
                lane.cross,
                lane.vehicles.len()
            );
        }
    }

    /// Draw a visual map of the world in the terminal
    pub fn draw_map(&self) {
        const MAP_W: usize = 72;
        const MAP_H: usize = 28;

        let width = self.width;
        let height = self.height;
        let to_col = |x: f32| -> usize {
            ((x / width * (MAP_W - 1) as f32).round() as isize).clamp(0, MAP_W as isize - 1)
                as usize
        };
        let to_row = |y: f32| -> usize {
            ((y / height * (MAP_H - 1) as f32).round() as isize).clamp(0, MAP_H as isize - 1)
                as usize
        };

        let mut grid = vec![vec![' '; MAP_W]; MAP_H];

        // Draw lanes
        for lane in &self.lanes {
            match lane.axis {
                Axis::Horizontal => {
                    let row = to_row(lane.cross);
                    for cell in &mut grid[row] {
                        if *cell == ' ' {
                            *cell = '-';
                        }
                    }
                }
                Axis::Vertical => {
                    let col = to_col(lane.cross);
                    for row in &mut grid {
                        if row[col] == ' ' {
                            row[col] = '|';
                        }
                    }
                }
            }
        }

        // Draw intersections, marked with the axis currently showing green
        for intersection in &self.intersections {
            let marker = if intersection.color(Axis::Horizontal) == SignalColor::Green {
                'H'
            } else if intersection.color(Axis::Vertical) == SignalColor::Green {
                'V'
            } else {
                '+'
            };
            grid[to_row(intersection.y)][to_col(intersection.x)] = marker;
        }

        // Draw vehicles
        for lane in &self.lanes {
            for vehicle in &lane.vehicles {
                let (x, y) = lane.scene_position(vehicle.offset);
                if x < 0.0 || x > self.width || y < 0.0 || y > self.height {
                    continue;
                }
                let (row, col) = (to_row(y), to_col(x));
                if matches!(grid[row][col], ' ' | '-' | '|') {
                    grid[row][col] = 'o';
                }
            }
        }

        println!("\n=== World Map ===");
        println!("Legend: o=vehicle, H=horizontal green, V=vertical green, +=all red");
        println!();
        for row in &grid {
            let line: String = row.iter().collect();
            println!("{}", line);
        }
        println!();
    }
}
