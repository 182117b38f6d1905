//! Intersection logic for the traffic simulation
//!
//! Standalone implementation that doesn't depend on Bevy.

use anyhow::Result;

use super::signal::{SignalCycle, SignalPhase};
use super::types::{Axis, SignalColor, LANE_ALIGN_EPSILON};

/// A signal-controlled intersection in the traffic simulation
///
/// Pairs two complementary signal cycles, one per axis, so only one axis is
/// ever permitted to flow.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct SimIntersection {
    pub x: f32,
    pub y: f32,
    horizontal: SignalCycle,
    vertical: SignalCycle,
}

impl SimIntersection {
    /// Creates an intersection with the complementary phase tables
    /// `[G, Y, R, R]` (horizontal) and `[R, R, G, Y]` (vertical).
    ///
    /// Both cycles use the identical duration table `[g, y, g, y]`, so they
    /// cross phase boundaries on the same tick. The overflow rule drops
    /// excess time at each boundary; with identical boundaries both cycles
    /// drop the same amount and stay in lockstep, which is what keeps the
    /// two axes from ever showing green at the same time.
    pub fn new(x: f32, y: f32, green_ms: f64, yellow_ms: f64) -> Result<Self> {
        use SignalColor::{Green, Red, Yellow};
        let horizontal = SignalCycle::new(vec![
            SignalPhase::new(Green, green_ms),
            SignalPhase::new(Yellow, yellow_ms),
            SignalPhase::new(Red, green_ms),
            SignalPhase::new(Red, yellow_ms),
        ])?;
        let vertical = SignalCycle::new(vec![
            SignalPhase::new(Red, green_ms),
            SignalPhase::new(Red, yellow_ms),
            SignalPhase::new(Green, green_ms),
            SignalPhase::new(Yellow, yellow_ms),
        ])?;
        Ok(Self {
            x,
            y,
            horizontal,
            vertical,
        })
    }

    /// Advances both signal cycles by the same elapsed time
    pub fn advance(&mut self, delta_ms: f64) {
        self.horizontal.advance(delta_ms);
        self.vertical.advance(delta_ms);
    }

    /// The color currently shown to traffic on the given axis
    pub fn color(&self, axis: Axis) -> SignalColor {
        self.cycle(axis).current_color()
    }

    /// Whether traffic on the given axis must hold at the stop line.
    /// Red and yellow both block; only green permits flow.
    pub fn is_blocking(&self, axis: Axis) -> bool {
        self.color(axis) != SignalColor::Green
    }

    /// Applies the same initial offset to both cycles, keeping them in
    /// lockstep while desynchronizing this intersection from its neighbors
    pub fn set_offset(&mut self, offset_ms: f64) {
        self.horizontal.set_offset(offset_ms);
        self.vertical.set_offset(offset_ms);
    }

    /// The stop line coordinate along a lane traveling on the given axis
    pub fn stop_line(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Whether this intersection sits on a lane with the given axis and
    /// cross coordinate
    pub fn crosses(&self, axis: Axis, cross: f32) -> bool {
        match axis {
            Axis::Horizontal => (self.y - cross).abs() < LANE_ALIGN_EPSILON,
            Axis::Vertical => (self.x - cross).abs() < LANE_ALIGN_EPSILON,
        }
    }

    fn cycle(&self, axis: Axis) -> &SignalCycle {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }
}
