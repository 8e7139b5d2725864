use serde::{Deserialize, Serialize};

use tileshell_motion_core::ElementId;

/// Semantic signals queued for the host; drained with `drain_events`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CarouselEvent {
    /// A settle landed on a page.
    ItemSelected {
        index: usize,
        data: serde_json::Value,
        element: ElementId,
    },
    /// Settling finished at `offset`.
    Settled { offset: f64 },
    /// A pivot header was activated.
    HeaderInvoked { index: usize },
}
