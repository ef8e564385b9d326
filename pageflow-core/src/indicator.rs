//! Dot-strip page indicator model.
//!
//! [`DotStrip`] keeps the per-dot heights a host renders and resolves taps
//! on the strip into page steps. The focused dot rests at twice the base
//! size; during a drag it shrinks while the neighbour on the travel side
//! grows by the same amount.

use pageflow_contracts::indicator::{PageIndicator, PageStep};

use crate::constants::indicator::{DOT_PITCH, DOT_SIZE, TAP_SLOP};

/// Horizontal placement of the dots, centred in a strip of `width`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotLayout {
    pub dot_size: f32,
    /// Centre-to-centre distance, in dot sizes.
    pub pitch: f32,
    pub tap_slop: f32,
}

impl Default for DotLayout {
    fn default() -> Self {
        Self {
            dot_size: DOT_SIZE,
            pitch: DOT_PITCH,
            tap_slop: TAP_SLOP,
        }
    }
}

impl DotLayout {
    pub fn center_x(&self, index: usize, count: usize, width: f32) -> f32 {
        let middle = (count as f32 - 1.0) / 2.0;
        width / 2.0 + (index as f32 - middle) * self.pitch * self.dot_size
    }

    /// Horizontal range that accepts taps: the dot row plus slop on both
    /// sides.
    pub fn tap_zone(&self, count: usize, width: f32) -> Option<(f32, f32)> {
        if count == 0 {
            return None;
        }
        let half = self.dot_size / 2.0;
        let min = self.center_x(0, count, width) - half - self.tap_slop;
        let max = self.center_x(count - 1, count, width) + half + self.tap_slop;
        Some((min, max))
    }
}

/// Heights for the focused dot and its travel-side neighbour at a given
/// offset ratio. `|ratio|` is clamped to one page.
pub fn dot_scales(dot_size: f32, offset_ratio: f32) -> (f32, f32) {
    let r = offset_ratio.abs().min(1.0);
    (dot_size * (2.0 - r), dot_size * (1.0 + r))
}

#[derive(Debug, Clone)]
pub struct DotStrip {
    layout: DotLayout,
    current: usize,
    heights: Vec<f32>,
}

impl Default for DotStrip {
    fn default() -> Self {
        Self::new(DotLayout::default())
    }
}

impl DotStrip {
    pub fn new(layout: DotLayout) -> Self {
        Self {
            layout,
            current: 0,
            heights: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.heights.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn layout(&self) -> &DotLayout {
        &self.layout
    }

    /// Resolve a tap at `x` within a strip of `width`. Taps right of the
    /// zone's centre step forward, taps left of it step back; steps past
    /// either end and taps outside the zone resolve to nothing.
    pub fn tap(&self, x: f32, width: f32) -> Option<PageStep> {
        let (min, max) = self.layout.tap_zone(self.count(), width)?;
        if x < min || x > max {
            return None;
        }
        let middle = (min + max) / 2.0;
        if x > middle {
            (self.current + 1 < self.count()).then_some(PageStep::Next)
        } else {
            (self.current > 0).then_some(PageStep::Previous)
        }
    }

    fn rest(&mut self) {
        let size = self.layout.dot_size;
        self.heights.iter_mut().for_each(|h| *h = size);
        if let Some(h) = self.heights.get_mut(self.current) {
            *h = size * 2.0;
        }
    }
}

impl PageIndicator for DotStrip {
    fn set_count(&mut self, count: usize) {
        self.heights = vec![self.layout.dot_size; count];
        self.current = 0;
        self.rest();
    }

    fn jump_to(&mut self, index: usize) {
        if index >= self.count() {
            tracing::debug!(index, count = self.count(), "indicator jump ignored");
            return;
        }
        self.current = index;
        self.rest();
    }

    fn update_continuous(&mut self, offset_ratio: f32) {
        if self.heights.is_empty() {
            return;
        }
        self.rest();
        let (focused, neighbour) = dot_scales(self.layout.dot_size, offset_ratio);
        self.heights[self.current] = focused;

        let side = if offset_ratio > 0.0 {
            self.current.checked_add(1)
        } else {
            self.current.checked_sub(1)
        };
        if let Some(h) = side.and_then(|i| self.heights.get_mut(i)) {
            *h = neighbour;
        }
    }
}
