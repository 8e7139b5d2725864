//! Dense keyframe generation.
//!
//! A host's native animation facility interpolates linearly between the
//! frames it is given. Emitting many frames sampled from a spline through the
//! original keyframes makes that linear playback trace the curve instead.

use indexmap::IndexMap;
use log::debug;

use crate::keyframe::{carry_static_values, fill_missing_values, normalize_offsets, Keyframe};
use crate::options::{infer_spline_options, SplineOptions, ValueTransform};
use crate::spline::{
    map_time_to_param, sample_linear, sample_linear_nd, spline_sample_nd,
    spline_sample_with_degree, SegmentParam,
};
use crate::template::StringTemplate;
use crate::value::PropValue;

/// How values between keyframes are produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Interpolation {
    Spline,
    Linear,
}

struct NumericTrack {
    name: String,
    values: Vec<f64>,
}

struct TemplateTrack {
    name: String,
    template: StringTemplate,
    /// One coordinate vector per keyframe.
    points: Vec<Vec<f64>>,
}

struct StaticTrack {
    name: String,
    values: Vec<Option<PropValue>>,
}

/// Keyframes prepared for sampling: offsets computed, gaps filled, every
/// property assigned a track.
pub struct KeyframeCurve {
    offsets: Vec<f64>,
    numeric: Vec<NumericTrack>,
    templates: Vec<TemplateTrack>,
    statics: Vec<StaticTrack>,
    mode: Interpolation,
    degree: usize,
    precision: usize,
    transform: Option<ValueTransform>,
}

impl KeyframeCurve {
    /// Prepare `frames` using `options` (property lists must already be
    /// resolved, see [`infer_spline_options`]).
    pub fn new(frames: &[Keyframe], options: &SplineOptions, mode: Interpolation) -> Self {
        let offsets = normalize_offsets(frames);
        let mut curve = Self {
            offsets,
            numeric: Vec::new(),
            templates: Vec::new(),
            statics: Vec::new(),
            mode,
            degree: options.degree.max(1),
            precision: options.precision,
            transform: options.transform.clone(),
        };

        for name in options.props.iter().flatten() {
            let raw: Vec<Option<f64>> = frames.iter().map(|f| f.number(name)).collect();
            let values = fill_missing_values(&raw, &curve.offsets);
            if values.is_empty() {
                curve.push_static(frames, name);
            } else {
                curve.numeric.push(NumericTrack {
                    name: name.clone(),
                    values,
                });
            }
        }

        for name in options.string_props.iter().flatten() {
            match template_track(frames, name, &curve.offsets) {
                Some(track) => curve.templates.push(track),
                None => {
                    debug!("string property '{name}' has no interpolable tokens; treating as static");
                    curve.push_static(frames, name);
                }
            }
        }

        for name in options.static_props.iter().flatten() {
            curve.push_static(frames, name);
        }
        curve
    }

    fn push_static(&mut self, frames: &[Keyframe], name: &str) {
        if self.statics.iter().any(|s| s.name == name) {
            return;
        }
        let values = frames.iter().map(|f| f.get(name).cloned()).collect();
        self.statics.push(StaticTrack {
            name: name.to_string(),
            values: carry_static_values(values),
        });
    }

    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Sample at normalized time `t`.
    pub fn sample(&self, t: f64) -> Keyframe {
        let at = map_time_to_param(&self.offsets, t);
        let offset = if t.is_finite() {
            t.clamp(
                self.offsets.first().copied().unwrap_or(0.0),
                self.offsets.last().copied().unwrap_or(1.0),
            )
        } else {
            self.offsets.first().copied().unwrap_or(0.0)
        };
        self.evaluate(at, offset)
    }

    /// Build the output frame at a resolved curve position.
    pub fn evaluate(&self, at: SegmentParam, offset: f64) -> Keyframe {
        let mut props = IndexMap::new();

        for track in &self.numeric {
            let value = match self.mode {
                Interpolation::Spline => {
                    spline_sample_with_degree(&track.values, at.param, self.degree)
                }
                Interpolation::Linear => sample_linear(&track.values, at.param),
            };
            if let Some(mut v) = value {
                if let Some(transform) = &self.transform {
                    v = transform.apply(&track.name, v);
                }
                props.insert(track.name.clone(), PropValue::Number(v));
            }
        }

        for track in &self.templates {
            let coords = match self.mode {
                Interpolation::Spline => spline_sample_nd(&track.points, at.param, self.degree),
                Interpolation::Linear => sample_linear_nd(&track.points, at.param),
            };
            if let Some(coords) = coords {
                props.insert(
                    track.name.clone(),
                    PropValue::Text(track.template.build(&coords, self.precision)),
                );
            }
        }

        // last keyframe wins at the end of the curve
        let static_index = if at.param >= 1.0 {
            self.offsets.len().saturating_sub(1)
        } else {
            at.segment
        };
        for track in &self.statics {
            if let Some(Some(value)) = track.values.get(static_index) {
                props.insert(track.name.clone(), value.clone());
            }
        }

        Keyframe {
            offset: Some(offset),
            props,
        }
    }
}

fn template_track(frames: &[Keyframe], name: &str, offsets: &[f64]) -> Option<TemplateTrack> {
    let parsed: Vec<Option<StringTemplate>> = frames
        .iter()
        .map(|f| f.text(name).and_then(StringTemplate::parse))
        .collect();
    let reference = parsed.iter().flatten().next()?.clone();

    // every keyframe that sets the property must be a compatible template
    for (frame, template) in frames.iter().zip(&parsed) {
        let present = frame.get(name).is_some();
        match template {
            Some(t) if !reference.is_compatible(t) => return None,
            None if present => return None,
            _ => {}
        }
    }

    let mut columns = Vec::with_capacity(reference.tokens.len());
    for token in 0..reference.tokens.len() {
        let raw: Vec<Option<f64>> = parsed
            .iter()
            .map(|t| t.as_ref().map(|t| t.tokens[token].value))
            .collect();
        columns.push(fill_missing_values(&raw, offsets));
    }
    let points = (0..frames.len())
        .map(|k| columns.iter().map(|c| c[k]).collect())
        .collect();

    Some(TemplateTrack {
        name: name.to_string(),
        template: reference,
        points,
    })
}

/// Expand keyframes along a clamped spline.
///
/// Produces `steps` frames per input segment plus the final frame. Inputs
/// with fewer than two keyframes are returned unchanged.
pub fn spline_keyframes(frames: &[Keyframe], options: &SplineOptions) -> Vec<Keyframe> {
    expand(frames, options, Interpolation::Spline)
}

/// Same frame layout as [`spline_keyframes`] but with straight-line values.
pub fn linear_keyframes(frames: &[Keyframe], options: &SplineOptions) -> Vec<Keyframe> {
    expand(frames, options, Interpolation::Linear)
}

fn expand(frames: &[Keyframe], options: &SplineOptions, mode: Interpolation) -> Vec<Keyframe> {
    if frames.len() < 2 {
        return frames.to_vec();
    }
    let resolved = infer_spline_options(frames, options);
    let curve = KeyframeCurve::new(frames, &resolved, mode);
    let steps = resolved.steps.max(1);
    let n = curve.offsets.len();

    let mut out = Vec::with_capacity((n - 1) * steps + 1);
    for segment in 0..n - 1 {
        let (start, end) = (curve.offsets[segment], curve.offsets[segment + 1]);
        // a zero-length segment is a jump: one frame is enough
        let segment_steps = if end > start { steps } else { 1 };
        for step in 0..segment_steps {
            let local = step as f64 / segment_steps as f64;
            let at = SegmentParam::from_segment(segment, local, n);
            out.push(curve.evaluate(at, start + (end - start) * local));
        }
    }
    let last = SegmentParam::from_segment(n - 2, 1.0, n);
    out.push(curve.evaluate(last, curve.offsets[n - 1]));
    out
}
