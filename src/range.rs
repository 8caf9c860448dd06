//! Interpolated state behind one range slider.
//!
//! The committed value changes in discrete steps; what the user sees (the
//! counter label, the counter's position along the track and the fill line)
//! eases toward it once per frame. `tick` is the only place the eased values
//! move, and it is pure in the sense that it only reads and writes `self`, so
//! tests drive it with a plain loop instead of a clock.

use crate::config::{EASING_FACTOR, LABEL_SNAP_WINDOW};

/// Linear interpolation `(1 - amount) * start + amount * end`.
#[inline]
pub fn lerp(start: f64, end: f64, amount: f64) -> f64 {
    (1.0 - amount) * start + amount * end
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedRange {
    min: u32,
    max: u32,
    amount: u32,
    range: f64,
    label: f64,
    position: f64,
    line_size: f64,
    track_width: f64,
    last_good: u32,
    snap_window: f64,
}

impl InterpolatedRange {
    /// Bind to a slider with fixed bounds, starting at `initial`.
    ///
    /// The label starts at the initial value; the counter position and the
    /// fill line start at zero and ease in on the first frames.
    pub fn new(min: u32, max: u32, initial: u32) -> Self {
        let max = max.max(min);
        let mut state = Self {
            min,
            max,
            amount: min,
            range: 0.0,
            label: 0.0,
            position: 0.0,
            line_size: 0.0,
            track_width: 0.0,
            last_good: min,
            snap_window: LABEL_SNAP_WINDOW,
        };
        state.set_value(initial);
        state.label = state.amount as f64;
        state.last_good = state.amount;
        state
    }

    /// Gap below which the label shows the target instead of the eased value.
    pub fn with_snap_window(mut self, window: f64) -> Self {
        self.snap_window = window.max(0.0);
        self
    }

    pub fn set_track_width(&mut self, width_px: f64) {
        self.track_width = width_px.max(0.0);
    }

    /// Accept `value` as the new target, clamped to the slider bounds.
    ///
    /// Used for live dragging, for commits and for rolling back.
    pub fn set_value(&mut self, value: u32) {
        self.amount = value.clamp(self.min, self.max);
        let span = self.max - self.min;
        self.range = if span == 0 {
            0.0
        } else {
            (self.amount - self.min) as f64 / span as f64
        };
    }

    /// Remember `value` as the one to fall back to after a failed save.
    pub fn mark_committed(&mut self, value: u32) {
        self.last_good = value.clamp(self.min, self.max);
    }

    /// Snap the target back to the last committed value.
    pub fn revert(&mut self) {
        self.set_value(self.last_good);
    }

    /// Advance the easing by one frame.
    pub fn tick(&mut self) {
        self.label = lerp(self.label, self.amount as f64, EASING_FACTOR);
        self.position = lerp(self.position, self.track_width * self.range, EASING_FACTOR);
        self.line_size = lerp(self.line_size, self.range, EASING_FACTOR);
    }

    /// Integer shown in the counter overlay.
    pub fn label(&self) -> u32 {
        let gap = self.amount as f64 - self.label;
        if gap > 0.0 && gap < self.snap_window {
            self.amount
        } else {
            self.label.max(0.0).floor() as u32
        }
    }

    pub fn value(&self) -> u32 {
        self.amount
    }

    /// Normalized position of the target within the bounds, 0.0..=1.0.
    pub fn fraction(&self) -> f64 {
        self.range
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn line_size(&self) -> f64 {
        self.line_size
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.min, self.max)
    }
}

/// Frames needed for an eased value to come within one unit of its target.
pub fn frames_to_settle(gap: f64, easing: f64) -> u32 {
    if gap.abs() < 1.0 || easing <= 0.0 {
        return 0;
    }
    if easing >= 1.0 {
        return 1;
    }
    (gap.abs().ln() / (1.0 / (1.0 - easing)).ln()).ceil() as u32 + 1
}
