//! Scroll state shared by layout and gesture handling.

use serde::{Deserialize, Serialize};

use crate::config::Axis;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
    Settling,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselState {
    /// Scroll offset along the axis; unbounded when looped.
    pub offset: f64,
    pub child_count: usize,
    /// Page size along the axis.
    pub extent: f64,
    pub looped: bool,
    pub axis: Axis,
    pub drag: DragState,
    /// Destination of the running settle, if any.
    pub target: Option<f64>,
}

impl CarouselState {
    pub fn new(axis: Axis, looped: bool) -> Self {
        Self {
            offset: 0.0,
            child_count: 0,
            extent: 0.0,
            looped,
            axis,
            drag: DragState::Idle,
            target: None,
        }
    }

    /// Wraparound span in loop mode.
    #[inline]
    pub fn period(&self) -> f64 {
        self.child_count as f64 * self.extent
    }

    /// Layout is only meaningful with children and a positive extent.
    pub fn is_measurable(&self) -> bool {
        self.child_count > 0 && self.extent.is_finite() && self.extent > 0.0
    }

    /// Offset of the last page.
    pub fn max_offset(&self) -> f64 {
        if self.child_count == 0 {
            0.0
        } else {
            (self.child_count - 1) as f64 * self.extent.max(0.0)
        }
    }

    pub fn clamp_offset(&self, offset: f64) -> f64 {
        if !offset.is_finite() {
            return self.offset;
        }
        if self.looped {
            offset
        } else {
            offset.clamp(0.0, self.max_offset())
        }
    }

    /// Nearest exact multiple of the extent, clamped outside loop mode.
    pub fn nearest_page_offset(&self, offset: f64) -> f64 {
        if !self.is_measurable() {
            return self.clamp_offset(offset);
        }
        self.clamp_offset((offset / self.extent).round() * self.extent)
    }

    /// Index of the page nearest `offset`.
    pub fn page_at(&self, offset: f64) -> usize {
        if !self.is_measurable() {
            return 0;
        }
        let page = (offset / self.extent).round();
        let n = self.child_count as f64;
        let page = if self.looped {
            page.rem_euclid(n)
        } else {
            page.clamp(0.0, n - 1.0)
        };
        page as usize
    }

    pub fn is_settling(&self) -> bool {
        self.drag == DragState::Settling
    }

    /// Back to the first page with no drag or settle in flight.
    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.drag = DragState::Idle;
        self.target = None;
    }
}
