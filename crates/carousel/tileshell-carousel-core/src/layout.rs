//! Per-child placement for the paged viewport.
//!
//! Non-loop: child `i` sits at `i * extent - offset`. Loop: among the copies
//! `i * extent + k * period` the one nearest the offset is used, so children
//! recycle around the viewport and scrolling never runs out of pages.

use log::debug;
use serde::{Deserialize, Serialize};

use tileshell_motion_core::format_number;

use crate::element::ChildItem;
use crate::state::CarouselState;

/// Digits kept in generated CSS lengths.
pub const CSS_PRECISION: usize = 3;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
}

impl Transform {
    /// `translate3d(Xpx, Ypx, 0px)`; the z component keeps the element on
    /// its own compositing layer.
    pub fn css(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0px)",
            format_number(self.x, CSS_PRECISION),
            format_number(self.y, CSS_PRECISION)
        )
    }
}

/// Copy of `natural` (modulo `period`) nearest to `offset`. Exact ties go to
/// the smaller position.
pub fn wrap_position(natural: f64, offset: f64, period: f64) -> f64 {
    if period <= 0.0 || !period.is_finite() {
        return natural;
    }
    let half = period / 2.0;
    let relative = (natural - offset + half).rem_euclid(period) - half;
    offset + relative
}

/// Where one child ends up for the current offset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub index: usize,
    /// Unwrapped position, `index * extent`.
    pub natural: f64,
    /// Chosen position in content space.
    pub position: f64,
    /// Distance from the viewport origin along the axis.
    pub translate: f64,
    pub transform: Transform,
}

/// Placement for every child, or `None` when there is nothing to measure
/// (no children or a zero extent).
pub fn compute_layout(state: &CarouselState) -> Option<Vec<Placement>> {
    if !state.is_measurable() {
        debug!(
            "layout skipped: {} children, extent {}",
            state.child_count, state.extent
        );
        return None;
    }
    let period = state.period();
    let placements = (0..state.child_count)
        .map(|index| {
            let natural = index as f64 * state.extent;
            let position = if state.looped {
                wrap_position(natural, state.offset, period)
            } else {
                natural
            };
            let translate = position - state.offset;
            Placement {
                index,
                natural,
                position,
                translate,
                transform: state.axis.transform(translate),
            }
        })
        .collect();
    Some(placements)
}

/// Layout work collected during one frame.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutTrigger {
    /// Child list replaced.
    Mutation(Vec<ChildItem>),
    /// Viewport resized to a new page extent.
    Resize(f64),
    /// Scroll offset written by the host.
    Scroll(f64),
}

impl LayoutTrigger {
    /// Lower runs first: structure, then size, then scroll.
    pub fn priority(&self) -> u8 {
        match self {
            LayoutTrigger::Mutation(_) => 0,
            LayoutTrigger::Resize(_) => 1,
            LayoutTrigger::Scroll(_) => 2,
        }
    }
}

/// Coalesces triggers until the next frame. Only the latest trigger of each
/// kind is kept; [`LayoutQueue::drain`] yields them in priority order.
#[derive(Clone, Debug, Default)]
pub struct LayoutQueue {
    mutation: Option<Vec<ChildItem>>,
    resize: Option<f64>,
    scroll: Option<f64>,
}

impl LayoutQueue {
    pub fn push(&mut self, trigger: LayoutTrigger) {
        match trigger {
            LayoutTrigger::Mutation(children) => self.mutation = Some(children),
            LayoutTrigger::Resize(extent) => self.resize = Some(extent),
            LayoutTrigger::Scroll(offset) => self.scroll = Some(offset),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mutation.is_none() && self.resize.is_none() && self.scroll.is_none()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = LayoutTrigger> {
        let mutation = self.mutation.take().map(LayoutTrigger::Mutation);
        let resize = self.resize.take().map(LayoutTrigger::Resize);
        let scroll = self.scroll.take().map(LayoutTrigger::Scroll);
        mutation.into_iter().chain(resize).chain(scroll)
    }
}
