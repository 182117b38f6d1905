//! Live-tunable simulation parameters
//!
//! The engine samples a [`ParamSource`] once per tick and applies the values
//! to vehicles spawned during that tick only; already-spawned vehicles keep
//! the parameters they were constructed with.

use anyhow::{bail, Result};

/// Default spawn interval in ms
pub const DEFAULT_SPAWN_INTERVAL_MS: f64 = 2000.0;

/// Default vehicle acceleration in scene units per second squared
pub const DEFAULT_ACCELERATION: f32 = 50.0;

/// Default vehicle speed cap in scene units per second
pub const DEFAULT_MAX_SPEED: f32 = 100.0;

/// Validated set of live-tunable parameters
#[derive(Debug, Clone, Copy)]
pub struct SimParams {
    pub spawn_interval_ms: f64,
    pub acceleration: f32,
    pub max_speed: f32,
}

impl SimParams {
    /// Creates a parameter set, rejecting non-positive values up front
    pub fn new(spawn_interval_ms: f64, acceleration: f32, max_speed: f32) -> Result<Self> {
        if spawn_interval_ms <= 0.0 {
            bail!("spawn interval must be positive, got {spawn_interval_ms}ms");
        }
        if acceleration <= 0.0 {
            bail!("acceleration must be positive, got {acceleration}");
        }
        if max_speed <= 0.0 {
            bail!("max speed must be positive, got {max_speed}");
        }
        Ok(Self {
            spawn_interval_ms,
            acceleration,
            max_speed,
        })
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            acceleration: DEFAULT_ACCELERATION,
            max_speed: DEFAULT_MAX_SPEED,
        }
    }
}

/// A configuration provider the engine samples once per tick.
///
/// Decouples the engine from whatever holds the live values (CLI arguments,
/// a UI panel, a test fixture).
pub trait ParamSource {
    fn sample(&self) -> SimParams;
}

impl ParamSource for SimParams {
    fn sample(&self) -> SimParams {
        *self
    }
}
