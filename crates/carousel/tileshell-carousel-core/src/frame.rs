//! Animation-frame scheduling seam.

use serde::{Deserialize, Serialize};

/// Handle for a requested frame callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameRequest(pub u64);

/// Host facility that calls back once on the next animation frame
/// (`requestAnimationFrame` in a browser).
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequest;
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Scheduler for hosts that poll: requests are recorded and the host calls
/// `tick` while [`QueuedFrames::has_pending`] is true.
#[derive(Clone, Debug, Default)]
pub struct QueuedFrames {
    next: u64,
    pending: Vec<FrameRequest>,
}

impl QueuedFrames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending(&self) -> &[FrameRequest] {
        &self.pending
    }

    /// Take every pending request, as the host does when a frame fires.
    pub fn take(&mut self) -> Vec<FrameRequest> {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for QueuedFrames {
    fn request_frame(&mut self) -> FrameRequest {
        self.next += 1;
        let request = FrameRequest(self.next);
        self.pending.push(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.pending.retain(|r| *r != request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_unique_and_cancellable() {
        let mut frames = QueuedFrames::new();
        let a = frames.request_frame();
        let b = frames.request_frame();
        assert_ne!(a, b);
        frames.cancel_frame(a);
        assert_eq!(frames.pending(), &[b]);
        assert_eq!(frames.take(), vec![b]);
        assert!(!frames.has_pending());
    }
}
