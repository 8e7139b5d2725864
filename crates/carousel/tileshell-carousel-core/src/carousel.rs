//! The paging engine shared by every carousel component.
//!
//! Owns the child list, scroll state, gesture controller and layout queue.
//! Hosts feed it pointer events and frame ticks; it answers with per-child
//! transforms and queued [`CarouselEvent`]s.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use tileshell_motion_core::{AnimationHandle, ElementId};

use crate::config::CarouselConfig;
use crate::element::ChildItem;
use crate::error::CarouselError;
use crate::events::CarouselEvent;
use crate::frame::{FrameRequest, FrameScheduler};
use crate::gesture::{GestureController, GestureOutcome, PointerInput, SettleStep};
use crate::layout::{compute_layout, wrap_position, LayoutQueue, LayoutTrigger, Placement, Transform};
use crate::state::{CarouselState, DragState};
use crate::Result;

/// Transform to write onto one child element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChildTransform {
    pub element: ElementId,
    pub transform: Transform,
    pub css: String,
}

pub struct Carousel {
    config: CarouselConfig,
    children: Vec<ChildItem>,
    state: CarouselState,
    gesture: GestureController,
    queue: LayoutQueue,
    placements: Vec<Placement>,
    events: Vec<CarouselEvent>,
    transitions: Vec<Box<dyn AnimationHandle>>,
    scheduler: Option<Box<dyn FrameScheduler>>,
    frame: Option<FrameRequest>,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(CarouselConfig::default())
    }
}

impl Carousel {
    pub fn new(config: CarouselConfig) -> Self {
        let state = CarouselState::new(config.axis, config.looped());
        let gesture = GestureController::new(config.gesture.clone());
        Self {
            config,
            children: Vec::new(),
            state,
            gesture,
            queue: LayoutQueue::default(),
            placements: Vec::new(),
            events: Vec::new(),
            transitions: Vec::new(),
            scheduler: None,
            frame: None,
        }
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn children(&self) -> &[ChildItem] {
        &self.children
    }

    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    // ---- lifecycle ----

    pub fn attach_scheduler(&mut self, scheduler: Box<dyn FrameScheduler>) {
        self.scheduler = Some(scheduler);
        if self.state.is_settling() {
            self.request_frame();
        }
    }

    pub fn detach_scheduler(&mut self) -> Option<Box<dyn FrameScheduler>> {
        self.cancel_frame();
        self.scheduler.take()
    }

    pub fn scheduler_mut(&mut self) -> Option<&mut (dyn FrameScheduler + 'static)> {
        self.scheduler.as_deref_mut()
    }

    /// Apply an attribute change. Invalid values are logged and ignored.
    pub fn apply_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        match self.config.apply_attribute(name, value) {
            Ok(false) => false,
            Ok(true) => {
                self.state.axis = self.config.axis;
                self.state.looped = self.config.looped();
                if !self.state.looped && self.state.is_measurable() {
                    // leave loop space: fold the offset back onto a real page,
                    // shifting a running settle target by the same amount
                    let period = self.state.period();
                    let folded = self.state.offset.rem_euclid(period);
                    let shift = folded - self.state.offset;
                    self.state.offset = self.state.clamp_offset(folded);
                    self.state.target = self
                        .state
                        .target
                        .map(|t| self.state.nearest_page_offset(t + shift));
                }
                self.layout();
                true
            }
            Err(err) => {
                warn!("{err}; keeping {name}={:?}", self.attribute(name));
                false
            }
        }
    }

    /// Current value of a configuration attribute.
    pub fn attribute(&self, name: &str) -> Option<String> {
        match name {
            crate::config::ATTR_DIRECTION => Some(self.config.axis.as_str().to_string()),
            crate::config::ATTR_OVERSCROLL => Some(
                if self.config.looped() { "loop" } else { "clamp" }.to_string(),
            ),
            _ => None,
        }
    }

    // ---- structure ----

    /// Replace the child list. Cancels any drag, settle and page transition
    /// and returns to the first page.
    pub fn set_children(&mut self, children: Vec<ChildItem>) {
        self.cancel_motion();
        self.state.child_count = children.len();
        self.state.reset();
        self.children = children;
        self.placements.clear();
        self.layout();
    }

    /// Set the page extent (viewport size along the axis). Offsets scale with
    /// it so the same page stays in view.
    pub fn resize(&mut self, extent: f64) -> Result<()> {
        if !extent.is_finite() || extent < 0.0 {
            return Err(CarouselError::InvalidExtent { extent });
        }
        let old = self.state.extent;
        if old > 0.0 && extent > 0.0 && old != extent {
            let ratio = extent / old;
            self.state.offset *= ratio;
            self.state.target = self.state.target.map(|t| t * ratio);
            self.gesture.rescale(ratio);
        }
        self.state.extent = extent;
        self.layout();
        Ok(())
    }

    /// Queue a trigger for the next [`Carousel::flush`].
    pub fn queue(&mut self, trigger: LayoutTrigger) {
        self.queue.push(trigger);
        self.request_frame();
    }

    /// Apply queued triggers (structure, then size, then scroll) and lay out.
    pub fn flush(&mut self) -> Result<&[Placement]> {
        let mut result = Ok(());
        let triggers: Vec<LayoutTrigger> = self.queue.drain().collect();
        for trigger in triggers {
            match trigger {
                LayoutTrigger::Mutation(children) => self.set_children(children),
                LayoutTrigger::Resize(extent) => {
                    if let Err(err) = self.resize(extent) {
                        result = Err(err);
                    }
                }
                LayoutTrigger::Scroll(offset) => self.set_scroll_offset(offset),
            }
        }
        result?;
        Ok(self.layout())
    }

    // ---- layout ----

    /// Recompute placements for the current state. Idempotent; leaves the
    /// previous placements in place when nothing can be measured.
    pub fn layout(&mut self) -> &[Placement] {
        if let Some(placements) = compute_layout(&self.state) {
            self.placements = placements;
        }
        &self.placements
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn transforms(&self) -> Vec<ChildTransform> {
        self.placements
            .iter()
            .filter_map(|p| {
                let child = self.children.get(p.index)?;
                Some(ChildTransform {
                    element: child.element,
                    transform: p.transform,
                    css: p.transform.css(),
                })
            })
            .collect()
    }

    // ---- scrolling ----

    /// Jump to `offset` (clamped outside loop mode), stopping any settle.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        if self.state.is_settling() {
            self.gesture.cancel_settle(&mut self.state);
            self.cancel_frame();
        }
        self.state.offset = self.state.clamp_offset(offset);
        self.layout();
    }

    /// Settle onto the page nearest the current offset; returns the target.
    pub fn snap_to_nearest(&mut self) -> f64 {
        let target = self.state.nearest_page_offset(self.state.offset);
        self.settle_to(target);
        target
    }

    /// Destination of the running settle, or the offset when at rest.
    pub fn target_offset(&self) -> f64 {
        self.state.target.unwrap_or(self.state.offset)
    }

    /// Settle onto page `index`, taking the short way round in loop mode.
    pub fn go_to(&mut self, index: usize) -> Result<f64> {
        let target = self.page_offset(index)?;
        self.settle_to(target);
        Ok(target)
    }

    /// Offset at which page `index` is centred, nearest the current offset.
    pub fn page_offset(&self, index: usize) -> Result<f64> {
        let count = self.children.len();
        if index >= count {
            return Err(CarouselError::IndexOutOfRange { index, count });
        }
        let natural = index as f64 * self.state.extent;
        Ok(if self.state.looped {
            wrap_position(natural, self.state.offset, self.state.period())
        } else {
            natural
        })
    }

    /// Move by `pages` from the page nearest the current offset.
    pub fn step(&mut self, pages: i32) -> f64 {
        let here = self.state.nearest_page_offset(self.state.offset);
        let target = self.state.clamp_offset(here + pages as f64 * self.state.extent);
        self.settle_to(target);
        target
    }

    fn settle_to(&mut self, target: f64) {
        if !self.state.is_measurable() {
            return;
        }
        self.gesture.settle_to(&mut self.state, target);
        self.request_frame();
    }

    pub fn selected_index(&self) -> Option<usize> {
        if self.children.is_empty() {
            None
        } else {
            Some(self.state.page_at(self.state.offset))
        }
    }

    // ---- input ----

    pub fn pointer(&mut self, input: &PointerInput) -> GestureOutcome {
        let outcome = self.gesture.handle(&mut self.state, input);
        match outcome {
            GestureOutcome::Started => {
                self.cancel_frame();
                self.cancel_transitions();
            }
            GestureOutcome::Moved { .. } => {
                self.layout();
            }
            GestureOutcome::Released { .. } => {
                self.layout();
                self.request_frame();
            }
            GestureOutcome::Ignored => {}
        }
        outcome
    }

    /// Frame callback. Returns true while another frame is wanted.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.frame = None;
        if !self.queue.is_empty() {
            if let Err(err) = self.flush() {
                warn!("layout flush: {err}");
            }
        }
        match self.gesture.tick(&mut self.state, now_ms) {
            SettleStep::Idle => false,
            SettleStep::Moving { .. } => {
                self.layout();
                self.request_frame();
                true
            }
            SettleStep::Landed { offset } => {
                self.layout();
                self.events.push(CarouselEvent::Settled { offset });
                if let Some(index) = self.selected_index() {
                    let child = &self.children[index];
                    self.events.push(CarouselEvent::ItemSelected {
                        index,
                        data: child.data.clone(),
                        element: child.element,
                    });
                }
                false
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.state.drag != DragState::Idle || !self.transitions.is_empty()
    }

    // ---- events ----

    pub fn push_event(&mut self, event: CarouselEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<CarouselEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- page transitions ----

    pub fn track_transition(&mut self, handle: Box<dyn AnimationHandle>) {
        self.transitions.push(handle);
    }

    /// Drop finished transitions; true when none remain.
    pub fn poll_transitions(&mut self) -> bool {
        self.transitions.retain(|h| !h.is_finished());
        self.transitions.is_empty()
    }

    pub fn cancel_transitions(&mut self) {
        for mut handle in self.transitions.drain(..) {
            if !handle.is_finished() {
                handle.cancel();
            }
        }
    }

    /// Stop every drag, settle and transition, leaving the offset as is.
    pub fn cancel_motion(&mut self) {
        self.gesture.cancel(&mut self.state);
        self.cancel_frame();
        self.cancel_transitions();
    }

    fn request_frame(&mut self) {
        if self.frame.is_some() {
            return;
        }
        if let Some(scheduler) = self.scheduler.as_mut() {
            self.frame = Some(scheduler.request_frame());
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(request) = self.frame.take() {
            if let Some(scheduler) = self.scheduler.as_mut() {
                debug!("cancel frame {request:?}");
                scheduler.cancel_frame(request);
            }
        }
    }
}
