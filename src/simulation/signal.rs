//! Timed signal phase machine
//!
//! Standalone implementation that doesn't depend on Bevy.

use anyhow::{bail, Result};

use super::types::SignalColor;

/// One timed color phase of a signal cycle
#[derive(Debug, Clone, Copy)]
pub struct SignalPhase {
    pub color: SignalColor,
    pub duration_ms: f64,
}

impl SignalPhase {
    pub fn new(color: SignalColor, duration_ms: f64) -> Self {
        Self { color, duration_ms }
    }
}

/// A repeating, ordered sequence of timed color phases for one traffic
/// direction
#[derive(Debug, Clone)]
pub struct SignalCycle {
    phases: Vec<SignalPhase>,
    current: usize,
    elapsed_ms: f64,
}

impl SignalCycle {
    /// Creates a cycle from its phase table.
    /// Rejects an empty table and any non-positive phase duration.
    pub fn new(phases: Vec<SignalPhase>) -> Result<Self> {
        if phases.is_empty() {
            bail!("signal cycle needs at least one phase");
        }
        for (index, phase) in phases.iter().enumerate() {
            if phase.duration_ms <= 0.0 {
                bail!(
                    "signal phase {} has non-positive duration {}ms",
                    index,
                    phase.duration_ms
                );
            }
        }
        Ok(Self {
            phases,
            current: 0,
            elapsed_ms: 0.0,
        })
    }

    /// Advances the cycle timing by `delta_ms`.
    ///
    /// On overflow of the current phase the elapsed time resets to zero and
    /// the cursor moves forward exactly one phase; carry-over time above a
    /// single phase duration is dropped, never accumulated forward.
    pub fn advance(&mut self, delta_ms: f64) {
        self.elapsed_ms += delta_ms;
        if self.elapsed_ms >= self.phases[self.current].duration_ms {
            self.elapsed_ms = 0.0;
            self.current = (self.current + 1) % self.phases.len();
        }
    }

    /// The color of the active phase
    pub fn current_color(&self) -> SignalColor {
        self.phases[self.current].color
    }

    /// Rewinds the cycle to the start of its first phase
    pub fn reset(&mut self) {
        self.current = 0;
        self.elapsed_ms = 0.0;
    }

    /// Positions the cursor `offset_ms` into the first phase, wrapping so the
    /// result always lands inside it. Used to desynchronize intersections.
    pub fn set_offset(&mut self, offset_ms: f64) {
        self.current = 0;
        self.elapsed_ms = offset_ms.rem_euclid(self.phases[0].duration_ms);
    }

    /// Index of the active phase
    pub fn phase_index(&self) -> usize {
        self.current
    }

    /// Time spent in the active phase so far
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Total duration of one full cycle
    pub fn cycle_ms(&self) -> f64 {
        self.phases.iter().map(|phase| phase.duration_ms).sum()
    }
}
