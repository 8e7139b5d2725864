//! Tileshell Motion Core (host-agnostic)
//!
//! Keyframe interpolation and spline expansion, named easing curves, and the
//! animation driver that feeds a host's native declarative animation
//! primitive. The host (DOM, test double, ...) is reached only through the
//! [`AnimationHost`] / [`AnimationHandle`] traits and opaque [`ElementId`]s.

pub mod driver;
pub mod easing;
pub mod error;
pub mod expand;
pub mod ids;
pub mod keyframe;
pub mod options;
pub mod page;
pub mod presets;
pub mod spline;
pub mod template;
pub mod value;

// Re-exports for consumers (adapters)
pub use driver::{
    animate, prepare_frames, AnimationHandle, AnimationHost, AnimationOptions, AnimationTiming,
    Completion, FillMode, PlaybackDirection, Ready, SplineMode, Transition,
};
pub use easing::{perspective, Easing, EASING_NAMES};
pub use error::MotionError;
pub use expand::{linear_keyframes, spline_keyframes, Interpolation, KeyframeCurve};
pub use ids::{ElementId, IdAllocator};
pub use keyframe::{fill_missing_values, normalize_offsets, validate_offsets, Keyframe};
pub use options::{classify_property, infer_spline_options, SplineOptions, ValueTransform};
pub use page::{NavigationFrame, PageElement, PageStack, PageTransition, PageTransitioner};
pub use presets::{AnimationPreset, AnimationSet, TransitionDirection};
pub use spline::{
    build_clamped_knots, map_time_to_param, sample_linear, spline_basis_point, spline_sample,
    spline_sample_nd, SegmentParam,
};
pub use template::{format_number, StringTemplate};
pub use value::{PropKind, PropValue};

pub type Result<T> = core::result::Result<T, MotionError>;
