//! Keyframe records and offset/value normalisation.
//!
//! JSON form follows the Web Animations shape:
//! `[{ "offset": 0, "opacity": 0 }, { "opacity": 1, "transform": "translateX(0px)" }]`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::MotionError;
use crate::value::PropValue;
use crate::Result;

/// Keys that describe the frame itself rather than an animated property.
pub const RESERVED_KEYS: [&str; 3] = ["offset", "easing", "composite"];

/// One keyframe: optional normalized offset plus property values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(flatten)]
    pub props: IndexMap<String, PropValue>,
}

impl Keyframe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(offset: f64) -> Self {
        Self {
            offset: Some(offset),
            props: IndexMap::new(),
        }
    }

    /// Builder-style property insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.props.get(name).and_then(PropValue::as_number)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.props.get(name).and_then(PropValue::as_text)
    }

    /// Parse a JSON array of keyframes.
    pub fn parse_list(json: &str) -> Result<Vec<Keyframe>> {
        let frames: Vec<Keyframe> = serde_json::from_str(json)?;
        Ok(frames)
    }

    /// Serialize a keyframe list to JSON.
    pub fn to_json(frames: &[Keyframe]) -> Result<String> {
        Ok(serde_json::to_string(frames)?)
    }
}

/// Check explicit offsets are finite, in [0,1] and non-decreasing.
///
/// The engine itself tolerates violations (offsets are clamped and forced
/// monotonic); adapters use this to reject bad input early.
pub fn validate_offsets(frames: &[Keyframe]) -> Result<()> {
    let mut last = f64::NEG_INFINITY;
    for (index, frame) in frames.iter().enumerate() {
        if let Some(offset) = frame.offset {
            if !offset.is_finite() || !(0.0..=1.0).contains(&offset) {
                return Err(MotionError::InvalidOffset { index, offset });
            }
            if offset < last {
                return Err(MotionError::UnorderedOffsets { index });
            }
            last = offset;
        }
    }
    Ok(())
}

/// Computed offsets for every keyframe.
///
/// Missing offsets are spaced evenly between the nearest explicit neighbours;
/// the first frame defaults to 0 and the last to 1. A single frame sits at 1,
/// as in Web Animations.
pub fn normalize_offsets(frames: &[Keyframe]) -> Vec<f64> {
    let n = frames.len();
    if n == 0 {
        return Vec::new();
    }

    let mut explicit: Vec<Option<f64>> = Vec::with_capacity(n);
    let mut floor = 0.0_f64;
    for frame in frames {
        let offset = frame
            .offset
            .filter(|o| o.is_finite())
            .map(|o| o.clamp(0.0, 1.0).max(floor));
        if let Some(o) = offset {
            floor = o;
        }
        explicit.push(offset);
    }

    if n == 1 {
        return vec![explicit[0].unwrap_or(1.0)];
    }
    if explicit[0].is_none() {
        explicit[0] = Some(0.0);
    }
    if explicit[n - 1].is_none() {
        explicit[n - 1] = Some(1.0);
    }

    let mut out = vec![0.0; n];
    let mut left = 0;
    out[0] = explicit[0].unwrap_or(0.0);
    for right in 1..n {
        let Some(right_offset) = explicit[right] else {
            continue;
        };
        let left_offset = out[left];
        let gap = (right - left) as f64;
        for (k, slot) in out.iter_mut().enumerate().take(right).skip(left + 1) {
            *slot = left_offset + (right_offset - left_offset) * (k - left) as f64 / gap;
        }
        out[right] = right_offset.max(left_offset);
        left = right;
    }
    out
}

/// Fill gaps in one property's per-keyframe values.
///
/// Gaps between two defined values are interpolated linearly in offset
/// space; gaps at either end hold the nearest defined value. Returns an empty
/// vector when no keyframe defines the property.
pub fn fill_missing_values(values: &[Option<f64>], offsets: &[f64]) -> Vec<f64> {
    if values.iter().all(Option::is_none) {
        return Vec::new();
    }

    let n = values.len();
    let mut out = Vec::with_capacity(n);
    for k in 0..n {
        if let Some(v) = values[k] {
            out.push(v);
            continue;
        }
        let prev = (0..k).rev().find_map(|i| values[i].map(|v| (i, v)));
        let next = (k + 1..n).find_map(|i| values[i].map(|v| (i, v)));
        let filled = match (prev, next) {
            (Some((i, a)), Some((j, b))) => {
                let oi = offsets.get(i).copied().unwrap_or(i as f64);
                let oj = offsets.get(j).copied().unwrap_or(j as f64);
                let ok = offsets.get(k).copied().unwrap_or(k as f64);
                let span = oj - oi;
                if span > f64::EPSILON {
                    a + (b - a) * ((ok - oi) / span)
                } else {
                    // Coincident neighbours: fall back to index spacing.
                    a + (b - a) * (k - i) as f64 / (j - i) as f64
                }
            }
            (Some((_, a)), None) => a,
            (None, Some((_, b))) => b,
            (None, None) => 0.0,
        };
        out.push(filled);
    }
    out
}

/// Carry a static property forward (last keyframe wins), back-filling any
/// leading gap from the first keyframe that defines it.
pub(crate) fn carry_static_values(values: Vec<Option<PropValue>>) -> Vec<Option<PropValue>> {
    let first = values.iter().find_map(|v| v.clone());
    let mut current = first;
    values
        .into_iter()
        .map(|v| {
            if v.is_some() {
                current = v;
            }
            current.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn frames(offsets: &[Option<f64>]) -> Vec<Keyframe> {
        offsets
            .iter()
            .map(|o| Keyframe {
                offset: *o,
                props: IndexMap::new(),
            })
            .collect()
    }

    #[test]
    fn offsets_default_to_even_spacing() {
        let got = normalize_offsets(&frames(&[None, None, None, None, None]));
        assert_eq!(got, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn offsets_fill_between_explicit_neighbours() {
        let got = normalize_offsets(&frames(&[None, Some(0.2), None, None, Some(0.8), None]));
        assert_abs_diff_eq!(got[0], 0.0);
        assert_abs_diff_eq!(got[1], 0.2);
        assert_abs_diff_eq!(got[2], 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(got[3], 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(got[4], 0.8);
        assert_abs_diff_eq!(got[5], 1.0);
    }

    #[test]
    fn offsets_are_forced_monotonic_and_clamped() {
        let got = normalize_offsets(&frames(&[Some(-1.0), Some(0.7), Some(0.3), Some(4.0)]));
        assert_eq!(got, vec![0.0, 0.7, 0.7, 1.0]);
    }

    #[test]
    fn single_and_empty_frames() {
        assert!(normalize_offsets(&[]).is_empty());
        assert_eq!(normalize_offsets(&frames(&[None])), vec![1.0]);
        assert_eq!(normalize_offsets(&frames(&[Some(0.4)])), vec![0.4]);
    }

    #[test]
    fn fill_interpolates_in_offset_space() {
        let values = [Some(0.0), None, Some(10.0)];
        let offsets = [0.0, 0.8, 1.0];
        let got = fill_missing_values(&values, &offsets);
        assert_abs_diff_eq!(got[1], 8.0, epsilon = 1e-12);
    }

    #[test]
    fn fill_extrapolates_flat_at_edges() {
        let got = fill_missing_values(&[None, Some(3.0), None], &[0.0, 0.5, 1.0]);
        assert_eq!(got, vec![3.0, 3.0, 3.0]);
        assert!(fill_missing_values(&[None, None], &[0.0, 1.0]).is_empty());
    }

    #[test]
    fn static_values_carry_forward() {
        let carried = carry_static_values(vec![
            None,
            Some(PropValue::from("block")),
            None,
            Some(PropValue::from("none")),
        ]);
        let texts: Vec<_> = carried
            .iter()
            .map(|v| v.as_ref().and_then(|p| p.as_text()).unwrap_or(""))
            .collect();
        assert_eq!(texts, vec!["block", "block", "block", "none"]);
    }

    #[test]
    fn validation_rejects_out_of_order_offsets() {
        let bad = frames(&[Some(0.5), Some(0.2)]);
        assert!(matches!(
            validate_offsets(&bad),
            Err(MotionError::UnorderedOffsets { index: 1 })
        ));
        let out_of_range = frames(&[Some(1.5)]);
        assert!(matches!(
            validate_offsets(&out_of_range),
            Err(MotionError::InvalidOffset { .. })
        ));
        assert!(validate_offsets(&frames(&[None, Some(0.5), None])).is_ok());
    }

    #[test]
    fn parse_flat_json_keyframes() {
        let frames =
            Keyframe::parse_list(r#"[{"offset":0,"opacity":0},{"opacity":1,"transform":"scale(2)"}]"#)
                .unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].offset, Some(0.0));
        assert_eq!(frames[1].number("opacity"), Some(1.0));
        assert_eq!(frames[1].text("transform"), Some("scale(2)"));
        assert!(!frames[0].props.contains_key("offset"));
    }
}
