//! Carousel configuration.
//!
//! Host attributes (`direction`, `overscroll-mode`) map onto these structs;
//! wasm constructors accept the same shape as a JS object.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CarouselError;
use crate::layout::Transform;
use crate::Result;

pub const ATTR_DIRECTION: &str = "direction";
pub const ATTR_OVERSCROLL: &str = "overscroll-mode";

/// Scroll axis of the paged viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    /// Coordinate of a point along this axis.
    #[inline]
    pub fn along(self, x: f64, y: f64) -> f64 {
        match self {
            Axis::Horizontal => x,
            Axis::Vertical => y,
        }
    }

    /// Translation by `distance` along this axis.
    pub fn transform(self, distance: f64) -> Transform {
        match self {
            Axis::Horizontal => Transform { x: distance, y: 0.0 },
            Axis::Vertical => Transform { x: 0.0, y: distance },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }
}

impl FromStr for Axis {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "horizontal" | "" => Ok(Axis::Horizontal),
            "vertical" => Ok(Axis::Vertical),
            other => Err(CarouselError::InvalidAttribute {
                name: ATTR_DIRECTION.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behaviour past the first and last page.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverscrollMode {
    #[default]
    Clamp,
    Loop,
}

impl FromStr for OverscrollMode {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "clamp" | "" => Ok(OverscrollMode::Clamp),
            "loop" => Ok(OverscrollMode::Loop),
            other => Err(CarouselError::InvalidAttribute {
                name: ATTR_OVERSCROLL.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Drag, flick and settle tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureConfig {
    /// Only samples this recent (relative to the newest) feed the velocity.
    pub velocity_window_ms: f64,
    /// Upper bound on retained samples.
    pub velocity_samples: usize,
    /// How far ahead a release velocity is projected, ms.
    pub projection_ms: f64,
    /// Below this speed (px/ms) a release snaps to the page nearest the
    /// release offset.
    pub min_flick_velocity: f64,
    /// A fast release must also have travelled this far (px) to be projected.
    pub min_flick_distance: f64,
    /// Pages a flick may advance past the page nearest the release point.
    pub max_flick_pages: u32,
    /// Time constant of the exponential settle, ms.
    pub settle_time_constant_ms: f64,
    /// Distance (px) at which settling snaps onto its target.
    pub settle_epsilon: f64,
    /// Frame interval assumed for the first settle step.
    pub frame_interval_ms: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            velocity_window_ms: 100.0,
            velocity_samples: 5,
            projection_ms: 150.0,
            min_flick_velocity: 0.3,
            min_flick_distance: 30.0,
            max_flick_pages: 1,
            settle_time_constant_ms: 80.0,
            settle_epsilon: 0.5,
            frame_interval_ms: 1000.0 / 60.0,
        }
    }
}

/// Fractions of the content scroll applied to decoration layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParallaxConfig {
    pub background_ratio: f64,
    pub header_ratio: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            background_ratio: 0.3,
            header_ratio: 0.5,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    #[serde(rename = "direction")]
    pub axis: Axis,
    #[serde(rename = "overscrollMode")]
    pub overscroll: OverscrollMode,
    pub gesture: GestureConfig,
    pub parallax: ParallaxConfig,
}

impl CarouselConfig {
    pub fn looped(&self) -> bool {
        self.overscroll == OverscrollMode::Loop
    }

    /// Apply a host attribute change. `None` (attribute removed) restores the
    /// default. Returns whether the configuration changed; attributes this
    /// struct does not own are ignored.
    pub fn apply_attribute(&mut self, name: &str, value: Option<&str>) -> Result<bool> {
        match name {
            ATTR_DIRECTION => {
                let axis: Axis = value.map(str::parse).transpose()?.unwrap_or_default();
                let changed = axis != self.axis;
                self.axis = axis;
                Ok(changed)
            }
            ATTR_OVERSCROLL => {
                let mode: OverscrollMode = value.map(str::parse).transpose()?.unwrap_or_default();
                let changed = mode != self.overscroll;
                self.overscroll = mode;
                Ok(changed)
            }
            _ => Ok(false),
        }
    }
}
