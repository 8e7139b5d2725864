//! Release velocity from recent pointer samples.

use std::collections::VecDeque;

/// Bounded history of `(position, timestamp_ms)` samples.
///
/// Velocity is the displacement between the oldest and newest sample still
/// inside the time window, divided by the time between them.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: VecDeque<(f64, f64)>,
    window_ms: f64,
    max_samples: usize,
}

impl VelocityTracker {
    pub fn new(window_ms: f64, max_samples: usize) -> Self {
        let max_samples = max_samples.max(2);
        Self {
            samples: VecDeque::with_capacity(max_samples),
            window_ms,
            max_samples,
        }
    }

    pub fn push(&mut self, position: f64, timestamp_ms: f64) {
        if !position.is_finite() || !timestamp_ms.is_finite() {
            return;
        }
        // out-of-order timestamps restart the estimate
        if self.samples.back().is_some_and(|&(_, t)| timestamp_ms < t) {
            self.samples.clear();
        }
        self.samples.push_back((position, timestamp_ms));
        let horizon = timestamp_ms - self.window_ms;
        while self.samples.front().is_some_and(|&(_, t)| t < horizon) {
            self.samples.pop_front();
        }
        while self.samples.len() > self.max_samples {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Position units per millisecond; 0 with fewer than two samples.
    pub fn velocity(&self) -> f64 {
        let (Some(&(p0, t0)), Some(&(p1, t1))) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };
        let dt = t1 - t0;
        if self.samples.len() < 2 || dt <= 0.0 {
            return 0.0;
        }
        (p1 - p0) / dt
    }
}
