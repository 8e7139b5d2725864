//! Named page-transition presets.

use serde::{Deserialize, Serialize};

use crate::driver::{
    animate, AnimationHost, AnimationOptions, AnimationTiming, FillMode, SplineMode, Transition,
};
use crate::easing::{perspective, Easing};
use crate::ids::ElementId;
use crate::keyframe::Keyframe;

/// Horizontal travel of a sliding page, px.
pub const PAGE_SLIDE_DISTANCE: f64 = 60.0;
/// Rotation of a turnstiling page, degrees.
pub const PAGE_ROTATION: f64 = 60.0;
pub const PAGE_IN_DURATION_MS: f64 = 350.0;
pub const PAGE_OUT_DURATION_MS: f64 = 250.0;
pub const FADE_DURATION_MS: f64 = 200.0;

/// Direction of travel through the navigation stack.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionDirection {
    #[default]
    Forward,
    Back,
}

impl TransitionDirection {
    /// +1 when moving forward, -1 when going back.
    pub fn sign(self) -> f64 {
        match self {
            TransitionDirection::Forward => 1.0,
            TransitionDirection::Back => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            TransitionDirection::Forward => TransitionDirection::Back,
            TransitionDirection::Back => TransitionDirection::Forward,
        }
    }
}

/// Keyframes plus the options to play them with.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnimationPreset {
    pub keyframes: Vec<Keyframe>,
    pub options: AnimationOptions,
}

impl AnimationPreset {
    pub fn duration_ms(&self) -> f64 {
        self.options.timing.duration_ms
    }

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.options.timing.delay_ms = delay_ms;
        self
    }

    pub fn play<H: AnimationHost + ?Sized>(
        &self,
        host: &mut H,
        target: ElementId,
    ) -> Transition<H::Handle> {
        Transition::new(animate(host, target, &self.keyframes, &self.options))
    }
}

fn page_transform(translate: f64, rotate: f64) -> String {
    format!(
        "perspective({}) translateX({}px) rotateY({}deg)",
        perspective(),
        translate,
        rotate
    )
}

fn page_frame(opacity: f64, translate: f64, rotate: f64) -> Keyframe {
    Keyframe::new()
        .with("opacity", opacity)
        .with("transform", page_transform(translate, rotate))
}

/// Preset catalogue.
pub struct AnimationSet;

impl AnimationSet {
    /// Page enter: forward slides in from the trailing edge, back from the
    /// leading edge, turning toward the viewer while it fades in.
    pub fn page_in(direction: TransitionDirection) -> AnimationPreset {
        let s = direction.sign();
        let keyframes = vec![
            page_frame(0.0, s * PAGE_SLIDE_DISTANCE, -s * PAGE_ROTATION),
            page_frame(
                0.8,
                s * PAGE_SLIDE_DISTANCE * 0.25,
                -s * PAGE_ROTATION * 0.25,
            ),
            page_frame(1.0, 0.0, 0.0),
        ];
        let timing = AnimationTiming::default()
            .with_duration(PAGE_IN_DURATION_MS)
            .with_easing(Easing::EaseOutCubic)
            .with_fill(FillMode::Both);
        AnimationPreset {
            keyframes,
            options: AnimationOptions::new(timing).with_spline(SplineMode::Auto),
        }
    }

    /// Page exit, the mirror of [`AnimationSet::page_in`]: forward exits
    /// toward the leading edge.
    pub fn page_out(direction: TransitionDirection) -> AnimationPreset {
        let s = direction.sign();
        let keyframes = vec![
            page_frame(1.0, 0.0, 0.0),
            page_frame(
                0.8,
                -s * PAGE_SLIDE_DISTANCE * 0.25,
                s * PAGE_ROTATION * 0.25,
            ),
            page_frame(0.0, -s * PAGE_SLIDE_DISTANCE, s * PAGE_ROTATION),
        ];
        let timing = AnimationTiming::default()
            .with_duration(PAGE_OUT_DURATION_MS)
            .with_easing(Easing::EaseInCubic)
            .with_fill(FillMode::Forwards);
        AnimationPreset {
            keyframes,
            options: AnimationOptions::new(timing).with_spline(SplineMode::Auto),
        }
    }

    /// Rotation only, hinged on the leading edge.
    pub fn turnstile_in(direction: TransitionDirection) -> AnimationPreset {
        let s = direction.sign();
        let frame = |opacity: f64, rotate: f64| {
            Keyframe::new()
                .with("opacity", opacity)
                .with("transform-origin", "0% 50%")
                .with(
                    "transform",
                    format!("perspective({}) rotateY({}deg)", perspective(), rotate),
                )
        };
        let timing = AnimationTiming::default()
            .with_duration(PAGE_IN_DURATION_MS)
            .with_easing(Easing::EaseOutQuart)
            .with_fill(FillMode::Both);
        AnimationPreset {
            keyframes: vec![frame(0.0, -s * 80.0), frame(1.0, 0.0)],
            options: AnimationOptions::new(timing).with_spline(SplineMode::Auto),
        }
    }

    pub fn turnstile_out(direction: TransitionDirection) -> AnimationPreset {
        let mut preset = Self::turnstile_in(direction.reversed());
        preset.keyframes.reverse();
        preset.options.timing = preset
            .options
            .timing
            .with_duration(PAGE_OUT_DURATION_MS)
            .with_easing(Easing::EaseInQuart)
            .with_fill(FillMode::Forwards);
        preset
    }

    /// Plain opacity cross-fade; `visible` selects fade-in or fade-out.
    pub fn fade(visible: bool) -> AnimationPreset {
        let (from, to) = if visible { (0.0, 1.0) } else { (1.0, 0.0) };
        let timing = AnimationTiming::default()
            .with_duration(FADE_DURATION_MS)
            .with_easing(Easing::EaseInOutSine)
            .with_fill(FillMode::Both);
        AnimationPreset {
            keyframes: vec![
                Keyframe::new().with("opacity", from),
                Keyframe::new().with("opacity", to),
            ],
            options: AnimationOptions::new(timing),
        }
    }
}
