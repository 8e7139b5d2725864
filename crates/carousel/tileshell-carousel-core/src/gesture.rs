//! Pointer-driven paging.
//!
//! `Idle → Dragging` on a primary pointer down, `Dragging → Settling` on
//! release or cancel, `Settling → Idle` once the offset lands on its target.
//! A pointer down while settling stops the settle where it is and starts a
//! new drag from that offset.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::GestureConfig;
use crate::state::{CarouselState, DragState};
use crate::velocity::VelocityTracker;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// One pointer event as delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerInput {
    #[serde(default)]
    pub pointer_id: i32,
    #[serde(default = "default_primary")]
    pub is_primary: bool,
    pub phase: PointerPhase,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(rename = "t", alias = "timestampMs")]
    pub timestamp_ms: f64,
}

fn default_primary() -> bool {
    true
}

impl PointerInput {
    pub fn primary(phase: PointerPhase, x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self {
            pointer_id: 1,
            is_primary: true,
            phase,
            x,
            y,
            timestamp_ms,
        }
    }
}

/// One drag, from pointer down to release.
#[derive(Clone, Debug)]
pub struct GestureSession {
    pub pointer_id: i32,
    pub start_position: f64,
    pub start_offset: f64,
    pub last_position: f64,
    tracker: VelocityTracker,
}

impl GestureSession {
    /// Pointer travel since the drag started.
    pub fn delta(&self) -> f64 {
        self.last_position - self.start_position
    }

    /// Pointer velocity, px/ms.
    pub fn velocity(&self) -> f64 {
        self.tracker.velocity()
    }
}

/// What a pointer event did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureOutcome {
    Ignored,
    Started,
    Moved { offset: f64 },
    Released { target: f64 },
}

/// Result of one settle step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SettleStep {
    /// Nothing is settling.
    Idle,
    /// Still approaching the target; another frame is needed.
    Moving { offset: f64 },
    /// Arrived exactly on the target.
    Landed { offset: f64 },
}

#[derive(Clone, Debug, Default)]
pub struct GestureController {
    config: GestureConfig,
    session: Option<GestureSession>,
    last_tick: Option<f64>,
}

impl GestureController {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
            last_tick: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn handle(&mut self, state: &mut CarouselState, input: &PointerInput) -> GestureOutcome {
        match input.phase {
            PointerPhase::Down => self.pointer_down(state, input),
            PointerPhase::Move => self.pointer_move(state, input),
            PointerPhase::Up | PointerPhase::Cancel => self.pointer_up(state, input),
        }
    }

    pub fn pointer_down(&mut self, state: &mut CarouselState, input: &PointerInput) -> GestureOutcome {
        if !input.is_primary || self.session.is_some() || !state.is_measurable() {
            return GestureOutcome::Ignored;
        }
        if state.is_settling() {
            // stop where we are; the drag continues from the live offset
            self.cancel_settle(state);
        }
        let position = state.axis.along(input.x, input.y);
        let mut tracker =
            VelocityTracker::new(self.config.velocity_window_ms, self.config.velocity_samples);
        tracker.push(position, input.timestamp_ms);
        self.session = Some(GestureSession {
            pointer_id: input.pointer_id,
            start_position: position,
            start_offset: state.offset,
            last_position: position,
            tracker,
        });
        state.drag = DragState::Dragging;
        state.target = None;
        GestureOutcome::Started
    }

    pub fn pointer_move(&mut self, state: &mut CarouselState, input: &PointerInput) -> GestureOutcome {
        let Some(session) = self.session.as_mut() else {
            return GestureOutcome::Ignored;
        };
        if session.pointer_id != input.pointer_id {
            return GestureOutcome::Ignored;
        }
        let position = state.axis.along(input.x, input.y);
        session.last_position = position;
        session.tracker.push(position, input.timestamp_ms);
        state.offset = state.clamp_offset(session.start_offset - session.delta());
        GestureOutcome::Moved {
            offset: state.offset,
        }
    }

    pub fn pointer_up(&mut self, state: &mut CarouselState, input: &PointerInput) -> GestureOutcome {
        let matches = self
            .session
            .as_ref()
            .is_some_and(|s| s.pointer_id == input.pointer_id);
        if !matches {
            return GestureOutcome::Ignored;
        }
        if input.phase == PointerPhase::Up {
            self.pointer_move(state, input);
        }
        let Some(session) = self.session.take() else {
            return GestureOutcome::Ignored;
        };
        let target = self.release_target(state, &session);
        debug!(
            "release at {} (v={:.3}px/ms) -> {}",
            state.offset,
            session.velocity(),
            target
        );
        self.settle_to(state, target);
        GestureOutcome::Released { target }
    }

    /// Page the settle should head for after `session` ends.
    pub fn release_target(&self, state: &CarouselState, session: &GestureSession) -> f64 {
        // content moves opposite to the pointer
        let velocity = -session.velocity();
        let flick = velocity.abs() >= self.config.min_flick_velocity
            && session.delta().abs() >= self.config.min_flick_distance;
        let resting = if flick {
            state.offset + velocity * self.config.projection_ms
        } else {
            state.offset
        };

        let here = state.nearest_page_offset(state.offset);
        let reach = self.config.max_flick_pages as f64 * state.extent;
        let target = state.nearest_page_offset(resting).clamp(here - reach, here + reach);
        state.clamp_offset(target)
    }

    /// Begin settling toward `target`.
    pub fn settle_to(&mut self, state: &mut CarouselState, target: f64) {
        state.target = Some(state.clamp_offset(target));
        state.drag = DragState::Settling;
        self.last_tick = None;
    }

    /// Advance the settle to `now_ms`.
    pub fn tick(&mut self, state: &mut CarouselState, now_ms: f64) -> SettleStep {
        if state.drag != DragState::Settling {
            return SettleStep::Idle;
        }
        let Some(target) = state.target else {
            state.drag = DragState::Idle;
            return SettleStep::Idle;
        };
        let dt = match self.last_tick {
            Some(last) => (now_ms - last).max(0.0),
            None => self.config.frame_interval_ms,
        };
        self.last_tick = Some(now_ms);

        let tau = self.config.settle_time_constant_ms.max(f64::EPSILON);
        let alpha = 1.0 - (-dt / tau).exp();
        state.offset += (target - state.offset) * alpha;

        if (target - state.offset).abs() <= self.config.settle_epsilon {
            state.offset = target;
            state.drag = DragState::Idle;
            state.target = None;
            self.last_tick = None;
            SettleStep::Landed { offset: target }
        } else {
            SettleStep::Moving {
                offset: state.offset,
            }
        }
    }

    /// Stop settling; the offset stays at its current value.
    pub fn cancel_settle(&mut self, state: &mut CarouselState) {
        if state.is_settling() {
            debug!("settle toward {:?} canceled at {}", state.target, state.offset);
            state.drag = DragState::Idle;
            state.target = None;
        }
        self.last_tick = None;
    }

    /// Drop any drag and settle.
    pub fn cancel(&mut self, state: &mut CarouselState) {
        self.session = None;
        self.cancel_settle(state);
        if state.drag == DragState::Dragging {
            state.drag = DragState::Idle;
        }
    }

    /// Keep an ongoing drag consistent after the page extent changes by `ratio`.
    pub fn rescale(&mut self, ratio: f64) {
        if let Some(session) = self.session.as_mut() {
            session.start_offset *= ratio;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Axis;

    fn state(looped: bool) -> CarouselState {
        let mut s = CarouselState::new(Axis::Horizontal, looped);
        s.child_count = 3;
        s.extent = 200.0;
        s
    }

    fn input(phase: PointerPhase, x: f64, t: f64) -> PointerInput {
        PointerInput::primary(phase, x, 0.0, t)
    }

    fn settle(g: &mut GestureController, s: &mut CarouselState, mut now: f64) -> f64 {
        for _ in 0..200 {
            now += 16.0;
            if let SettleStep::Landed { offset } = g.tick(s, now) {
                return offset;
            }
        }
        panic!("settle did not finish");
    }

    #[test]
    fn drag_moves_against_pointer_and_clamps() {
        let mut g = GestureController::default();
        let mut s = state(false);
        g.handle(&mut s, &input(PointerPhase::Down, 300.0, 0.0));
        g.handle(&mut s, &input(PointerPhase::Move, 250.0, 10.0));
        assert_eq!(s.offset, 50.0);
        g.handle(&mut s, &input(PointerPhase::Move, 900.0, 20.0));
        assert_eq!(s.offset, 0.0);
        assert_eq!(s.drag, DragState::Dragging);
    }

    #[test]
    fn slow_release_snaps_to_nearest_page() {
        let mut g = GestureController::default();
        let mut s = state(false);
        g.handle(&mut s, &input(PointerPhase::Down, 500.0, 0.0));
        g.handle(&mut s, &input(PointerPhase::Move, 340.0, 1000.0));
        let out = g.handle(&mut s, &input(PointerPhase::Up, 340.0, 2000.0));
        assert_eq!(out, GestureOutcome::Released { target: 200.0 });
        assert_eq!(settle(&mut g, &mut s, 2000.0), 200.0);
        assert_eq!(s.offset, 200.0);
        assert_eq!(s.drag, DragState::Idle);
    }

    #[test]
    fn flick_advances_at_most_one_page() {
        let mut g = GestureController::default();
        let mut s = state(true);
        g.handle(&mut s, &input(PointerPhase::Down, 500.0, 0.0));
        g.handle(&mut s, &input(PointerPhase::Move, 400.0, 10.0));
        let out = g.handle(&mut s, &input(PointerPhase::Up, 300.0, 20.0));
        // 200px at 10px/ms projects far beyond the next page
        assert_eq!(out, GestureOutcome::Released { target: 400.0 });
    }

    #[test]
    fn long_slow_drag_is_not_projected() {
        let mut g = GestureController::default();
        let mut s = state(false);
        g.handle(&mut s, &input(PointerPhase::Down, 500.0, 0.0));
        g.handle(&mut s, &input(PointerPhase::Move, 402.0, 1000.0));
        g.handle(&mut s, &input(PointerPhase::Move, 401.0, 1050.0));
        let out = g.handle(&mut s, &input(PointerPhase::Up, 401.0, 1100.0));
        assert_eq!(s.offset, 99.0);
        assert_eq!(out, GestureOutcome::Released { target: 0.0 });
    }

    #[test]
    fn short_fast_drag_is_not_a_flick() {
        let mut g = GestureController::default();
        let mut s = state(false);
        g.handle(&mut s, &input(PointerPhase::Down, 500.0, 0.0));
        g.handle(&mut s, &input(PointerPhase::Move, 490.0, 5.0));
        let out = g.handle(&mut s, &input(PointerPhase::Up, 480.0, 10.0));
        assert_eq!(out, GestureOutcome::Released { target: 0.0 });
    }

    #[test]
    fn secondary_pointers_are_ignored() {
        let mut g = GestureController::default();
        let mut s = state(false);
        let mut touch = input(PointerPhase::Down, 0.0, 0.0);
        touch.is_primary = false;
        assert_eq!(g.handle(&mut s, &touch), GestureOutcome::Ignored);
        g.handle(&mut s, &input(PointerPhase::Down, 100.0, 0.0));
        let mut other = input(PointerPhase::Move, 0.0, 5.0);
        other.pointer_id = 9;
        assert_eq!(g.handle(&mut s, &other), GestureOutcome::Ignored);
        assert_eq!(s.offset, 0.0);
    }

    #[test]
    fn redrag_mid_settle_does_not_jump() {
        let mut g = GestureController::default();
        let mut s = state(false);
        g.settle_to(&mut s, 400.0);
        g.tick(&mut s, 16.0);
        g.tick(&mut s, 32.0);
        let mid = s.offset;
        assert!(mid > 0.0 && mid < 400.0);

        g.handle(&mut s, &input(PointerPhase::Down, 250.0, 40.0));
        assert_eq!(s.offset, mid);
        assert_eq!(s.target, None);
        assert_eq!(g.tick(&mut s, 48.0), SettleStep::Idle);
        g.handle(&mut s, &input(PointerPhase::Move, 249.0, 50.0));
        assert!((s.offset - (mid + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn cancel_settles_like_release_without_final_sample() {
        let mut g = GestureController::default();
        let mut s = state(false);
        g.handle(&mut s, &input(PointerPhase::Down, 500.0, 0.0));
        g.handle(&mut s, &input(PointerPhase::Move, 380.0, 500.0));
        let out = g.handle(&mut s, &input(PointerPhase::Cancel, 0.0, 900.0));
        assert_eq!(out, GestureOutcome::Released { target: 200.0 });
        assert!(s.is_settling());
    }
}
