//! Decoration layers that trail the content scroll.

use serde::{Deserialize, Serialize};

use tileshell_motion_core::{format_number, ElementId};

use crate::config::ParallaxConfig;
use crate::element::ChildItem;
use crate::layout::{compute_layout, CSS_PRECISION};
use crate::state::CarouselState;

/// CSS custom property carrying the header strip offset.
pub const HEADER_TRANSLATE_PROPERTY: &str = "--translate-x";

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallaxFrame {
    /// `left` of the background layer, px.
    pub background_left: f64,
    /// Value for [`HEADER_TRANSLATE_PROPERTY`], px.
    pub header_translate: f64,
}

impl ParallaxFrame {
    pub fn compute(offset: f64, config: &ParallaxConfig) -> Self {
        Self {
            background_left: -offset * config.background_ratio,
            header_translate: -offset * config.header_ratio,
        }
    }

    /// Frame for `state`. Loop offsets are folded into one period first so
    /// the layers stay within reach however far the carousel has wrapped.
    pub fn for_state(state: &CarouselState, config: &ParallaxConfig) -> Self {
        let period = state.period();
        let offset = if state.looped && period > 0.0 {
            state.offset.rem_euclid(period)
        } else {
            state.offset
        };
        Self::compute(offset, config)
    }

    pub fn background_left_css(&self) -> String {
        format!("{}px", format_number(self.background_left, CSS_PRECISION))
    }

    pub fn header_translate_css(&self) -> String {
        format!("{}px", format_number(self.header_translate, CSS_PRECISION))
    }
}

/// Background layer owned by one hub section.
///
/// The layer drifts with its section at the background ratio and fades with
/// the section's distance from the viewport: fully opaque when the section
/// is in view, transparent a page or more away. Between two pages the
/// neighbouring layers' opacities sum to one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionBackground {
    pub index: usize,
    /// The section element the layer belongs to.
    pub section: ElementId,
    /// `left` of the layer, px.
    pub left: f64,
    pub opacity: f64,
}

impl SectionBackground {
    /// One layer per child, or none when the state cannot be measured.
    pub fn compute(
        state: &CarouselState,
        children: &[ChildItem],
        config: &ParallaxConfig,
    ) -> Vec<SectionBackground> {
        let Some(placements) = compute_layout(state) else {
            return Vec::new();
        };
        placements
            .iter()
            .filter_map(|p| {
                let child = children.get(p.index)?;
                let distance = (p.translate / state.extent).abs();
                Some(SectionBackground {
                    index: p.index,
                    section: child.element,
                    left: p.translate * config.background_ratio,
                    opacity: (1.0 - distance).clamp(0.0, 1.0),
                })
            })
            .collect()
    }

    pub fn left_css(&self) -> String {
        format!("{}px", format_number(self.left, CSS_PRECISION))
    }

    pub fn opacity_css(&self) -> String {
        format_number(self.opacity, CSS_PRECISION)
    }
}
