//! Tileshell Carousel Core (host-agnostic)
//!
//! Paged layout (clamped or looping), pointer gesture physics with
//! flick-and-settle, parallax decoration, and the Hub / Pivot / FlipView
//! components built on them. Hosts feed pointer events and frame ticks and
//! write back the returned transforms; page transitions go through
//! `tileshell_motion_core`'s [`AnimationHost`](tileshell_motion_core::AnimationHost).

pub mod carousel;
pub mod component;
pub mod config;
pub mod element;
pub mod error;
pub mod events;
pub mod flip_view;
pub mod frame;
pub mod gesture;
pub mod hub;
pub mod layout;
pub mod parallax;
pub mod pivot;
pub mod state;
pub mod velocity;

// Re-exports for consumers (adapters)
pub use carousel::{Carousel, ChildTransform};
pub use component::{Component, Slots, SLOT_BACKGROUND, SLOT_HEADER, SLOT_TITLE, SLOT_VIEWPORT};
pub use config::{
    Axis, CarouselConfig, GestureConfig, OverscrollMode, ParallaxConfig, ATTR_DIRECTION,
    ATTR_OVERSCROLL,
};
pub use element::{ChildItem, ATTR_HEADER};
pub use error::CarouselError;
pub use events::CarouselEvent;
pub use flip_view::FlipView;
pub use frame::{FrameRequest, FrameScheduler, QueuedFrames};
pub use gesture::{GestureController, GestureOutcome, GestureSession, PointerInput, PointerPhase, SettleStep};
pub use hub::{Hub, ATTR_ANIMATING, ATTR_APP_TITLE};
pub use layout::{compute_layout, wrap_position, LayoutQueue, LayoutTrigger, Placement, Transform};
pub use parallax::{ParallaxFrame, SectionBackground, HEADER_TRANSLATE_PROPERTY};
pub use pivot::{HeaderItem, Pivot};
pub use state::{CarouselState, DragState};
pub use velocity::VelocityTracker;

pub use tileshell_motion_core::ElementId;

pub type Result<T> = core::result::Result<T, CarouselError>;
