//! Animation driver over a host's native declarative animation primitive.
//!
//! The host only knows how to play a keyframe list linearly between frames.
//! [`animate`] optionally densifies the keyframes along a spline first and
//! hands the rest of the timing through untouched.

use std::borrow::Cow;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::expand::spline_keyframes;
use crate::ids::ElementId;
use crate::keyframe::Keyframe;
use crate::options::SplineOptions;

/// A running native animation.
pub trait AnimationHandle {
    /// True once the animation has played to its end or was canceled.
    fn is_finished(&self) -> bool;
    /// Stop and leave the element at its current visual state.
    fn cancel(&mut self);
    /// Jump to the final frame.
    fn finish(&mut self);
}

impl<H: AnimationHandle + ?Sized> AnimationHandle for Box<H> {
    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }

    fn finish(&mut self) {
        (**self).finish()
    }
}

/// Host-side animation facility (e.g. `Element.animate` in a browser).
pub trait AnimationHost {
    type Handle: AnimationHandle;

    fn play(
        &mut self,
        target: ElementId,
        frames: &[Keyframe],
        timing: &AnimationTiming,
    ) -> Self::Handle;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    #[default]
    None,
    Forwards,
    Backwards,
    Both,
    Auto,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackDirection {
    #[default]
    Normal,
    Reverse,
    Alternate,
    AlternateReverse,
}

/// Timing passed to the host verbatim. Field names follow the Web Animations
/// `KeyframeAnimationOptions` dictionary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationTiming {
    #[serde(rename = "duration")]
    pub duration_ms: f64,
    #[serde(rename = "delay")]
    pub delay_ms: f64,
    /// CSS timing function applied by the host.
    pub easing: String,
    pub fill: FillMode,
    pub iterations: f64,
    pub direction: PlaybackDirection,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            duration_ms: 0.0,
            delay_ms: 0.0,
            easing: "linear".to_string(),
            fill: FillMode::None,
            iterations: 1.0,
            direction: PlaybackDirection::Normal,
        }
    }
}

impl AnimationTiming {
    pub fn with_duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_fill(mut self, fill: FillMode) -> Self {
        self.fill = fill;
        self
    }

    /// Use a named curve; curves without a CSS form fall back to linear.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = match easing.css() {
            Some(css) => css.to_string(),
            None => {
                debug!("easing '{}' has no css equivalent; using linear", easing.name());
                "linear".to_string()
            }
        };
        self
    }
}

/// Whether keyframes are spline-expanded before reaching the host.
///
/// Serialized as `false`, `true` or an options object.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "SplineModeRepr", into = "SplineModeRepr")]
pub enum SplineMode {
    #[default]
    Off,
    /// Expand with options inferred from the keyframes.
    Auto,
    Options(SplineOptions),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SplineModeRepr {
    Flag(bool),
    Options(SplineOptions),
}

impl From<SplineModeRepr> for SplineMode {
    fn from(repr: SplineModeRepr) -> Self {
        match repr {
            SplineModeRepr::Flag(false) => SplineMode::Off,
            SplineModeRepr::Flag(true) => SplineMode::Auto,
            SplineModeRepr::Options(opts) => SplineMode::Options(opts),
        }
    }
}

impl From<SplineMode> for SplineModeRepr {
    fn from(mode: SplineMode) -> Self {
        match mode {
            SplineMode::Off => SplineModeRepr::Flag(false),
            SplineMode::Auto => SplineModeRepr::Flag(true),
            SplineMode::Options(opts) => SplineModeRepr::Options(opts),
        }
    }
}

impl SplineMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, SplineMode::Off)
    }

    /// Options to expand with, or `None` when expansion is off.
    pub fn resolve(&self) -> Option<Cow<'_, SplineOptions>> {
        match self {
            SplineMode::Off => None,
            SplineMode::Auto => Some(Cow::Owned(SplineOptions::default())),
            SplineMode::Options(opts) => Some(Cow::Borrowed(opts)),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnimationOptions {
    #[serde(flatten)]
    pub timing: AnimationTiming,
    #[serde(default)]
    pub spline: SplineMode,
}

impl AnimationOptions {
    pub fn new(timing: AnimationTiming) -> Self {
        Self {
            timing,
            spline: SplineMode::Off,
        }
    }

    pub fn with_spline(mut self, spline: SplineMode) -> Self {
        self.spline = spline;
        self
    }
}

/// Frames the host will actually receive for `keyframes` under `options`.
pub fn prepare_frames<'a>(keyframes: &'a [Keyframe], spline: &SplineMode) -> Cow<'a, [Keyframe]> {
    match spline.resolve() {
        None => Cow::Borrowed(keyframes),
        Some(opts) => Cow::Owned(spline_keyframes(keyframes, &opts)),
    }
}

/// Drive `target` through `keyframes`.
pub fn animate<H: AnimationHost + ?Sized>(
    host: &mut H,
    target: ElementId,
    keyframes: &[Keyframe],
    options: &AnimationOptions,
) -> H::Handle {
    let frames = prepare_frames(keyframes, &options.spline);
    debug!(
        "animate {:?}: {} keyframes -> {} frames over {}ms",
        target,
        keyframes.len(),
        frames.len(),
        options.timing.duration_ms
    );
    host.play(target, &frames, &options.timing)
}

/// Something that eventually settles (finishes or gets canceled).
pub trait Completion {
    fn is_settled(&self) -> bool;
}

/// Completion signal for one animation.
#[derive(Debug)]
pub struct Transition<H: AnimationHandle> {
    handle: H,
    canceled: bool,
}

impl<H: AnimationHandle> Transition<H> {
    pub fn new(handle: H) -> Self {
        Self {
            handle,
            canceled: false,
        }
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    pub fn cancel(&mut self) {
        if !self.canceled && !self.handle.is_finished() {
            self.handle.cancel();
        }
        self.canceled = true;
    }

    pub fn finish(&mut self) {
        if !self.canceled {
            self.handle.finish();
        }
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn into_handle(self) -> H {
        self.handle
    }
}

impl<H: AnimationHandle> Completion for Transition<H> {
    fn is_settled(&self) -> bool {
        self.canceled || self.handle.is_finished()
    }
}

/// A completion that is settled from the start.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Ready;

impl Completion for Ready {
    fn is_settled(&self) -> bool {
        true
    }
}
