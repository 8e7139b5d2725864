//! Spline expansion options and property classification.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::MotionError;
use crate::keyframe::{Keyframe, RESERVED_KEYS};
use crate::spline::DEFAULT_DEGREE;
use crate::template::{StringTemplate, DEFAULT_PRECISION};
use crate::value::{PropKind, PropValue};
use crate::Result;

/// Output frames generated per input segment unless configured otherwise.
pub const DEFAULT_STEPS: usize = 10;

/// Hook applied to every interpolated numeric property value before it is
/// written into an output frame. Receives the property name and value.
#[derive(Clone)]
pub struct ValueTransform(Arc<dyn Fn(&str, f64) -> f64 + Send + Sync>);

impl ValueTransform {
    pub fn new(f: impl Fn(&str, f64) -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn apply(&self, prop: &str, value: f64) -> f64 {
        (self.0)(prop, value)
    }
}

impl fmt::Debug for ValueTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueTransform(..)")
    }
}

/// Which properties are interpolated and how densely.
///
/// `None` for a property list means "not given"; [`infer_spline_options`]
/// fills those in from the keyframes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SplineOptions {
    /// Numeric properties interpolated along the spline.
    pub props: Option<Vec<String>>,
    /// Properties copied verbatim per segment.
    pub static_props: Option<Vec<String>>,
    /// String properties with embedded numeric tokens.
    pub string_props: Option<Vec<String>>,
    /// Output frames per input segment.
    pub steps: usize,
    /// Spline degree; lowered automatically for short keyframe lists.
    pub degree: usize,
    /// Decimal digits kept when rebuilding string properties.
    pub precision: usize,
    #[serde(skip)]
    pub transform: Option<ValueTransform>,
}

impl Default for SplineOptions {
    fn default() -> Self {
        Self {
            props: None,
            static_props: None,
            string_props: None,
            steps: DEFAULT_STEPS,
            degree: DEFAULT_DEGREE,
            precision: DEFAULT_PRECISION,
            transform: None,
        }
    }
}

impl SplineOptions {
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_transform(mut self, f: impl Fn(&str, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.transform = Some(ValueTransform::new(f));
        self
    }

    pub fn with_props<I, S>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.props = Some(props.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_static_props<I, S>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.static_props = Some(props.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_string_props<I, S>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.string_props = Some(props.into_iter().map(Into::into).collect());
        self
    }

    /// Strict check used by adapters; the engine itself clamps bad values.
    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(MotionError::InvalidOptions {
                reason: "steps must be at least 1".into(),
            });
        }
        if self.degree == 0 {
            return Err(MotionError::InvalidOptions {
                reason: "degree must be at least 1".into(),
            });
        }
        let lists = [&self.props, &self.static_props, &self.string_props];
        let mut seen = IndexSet::new();
        for name in lists.iter().filter_map(|l| l.as_ref()).flatten() {
            if !seen.insert(name.as_str()) {
                return Err(MotionError::InvalidOptions {
                    reason: format!("property '{name}' listed more than once"),
                });
            }
        }
        Ok(())
    }

    /// Kind assigned to `name` by the explicit lists, if any.
    pub fn kind_of(&self, name: &str) -> Option<PropKind> {
        let has = |list: &Option<Vec<String>>| list.as_ref().is_some_and(|l| l.iter().any(|p| p == name));
        if has(&self.props) {
            Some(PropKind::Numeric)
        } else if has(&self.string_props) {
            Some(PropKind::Template)
        } else if has(&self.static_props) {
            Some(PropKind::Static)
        } else {
            None
        }
    }
}

/// Complete `base` by classifying every property the keyframes mention.
///
/// Lists already given in `base` are kept as they are; only missing lists are
/// populated, and a property already named in any list is not reclassified.
/// Reserved keys (`offset`, `easing`, `composite`) are never animated.
pub fn infer_spline_options(frames: &[Keyframe], base: &SplineOptions) -> SplineOptions {
    let mut names: IndexSet<&str> = IndexSet::new();
    for frame in frames {
        for name in frame.props.keys() {
            if !RESERVED_KEYS.contains(&name.as_str()) {
                names.insert(name.as_str());
            }
        }
    }

    let mut props = Vec::new();
    let mut string_props = Vec::new();
    let mut static_props = Vec::new();
    for name in names {
        if base.kind_of(name).is_some() {
            continue;
        }
        // A property whose natural list was given explicitly (and does not
        // name it) is kept as static rather than dropped.
        match classify_property(frames, name) {
            PropKind::Numeric if base.props.is_none() => props.push(name.to_string()),
            PropKind::Template if base.string_props.is_none() => {
                string_props.push(name.to_string())
            }
            _ => static_props.push(name.to_string()),
        }
    }

    let mut out = base.clone();
    out.props.get_or_insert(props);
    out.string_props.get_or_insert(string_props);
    out.static_props
        .get_or_insert_with(Vec::new)
        .extend(static_props);
    out
}

/// Classify one property by sampling its values across the keyframes.
pub fn classify_property(frames: &[Keyframe], name: &str) -> PropKind {
    let values: Vec<&PropValue> = frames.iter().filter_map(|f| f.get(name)).collect();
    if values.is_empty() {
        return PropKind::Static;
    }
    if values.iter().all(|v| v.is_number() && v.as_number().is_some()) {
        return PropKind::Numeric;
    }

    let mut first: Option<StringTemplate> = None;
    for value in &values {
        let Some(template) = value.as_text().and_then(StringTemplate::parse) else {
            return PropKind::Static;
        };
        match &first {
            Some(reference) if !reference.is_compatible(&template) => return PropKind::Static,
            Some(_) => {}
            None => first = Some(template),
        }
    }
    PropKind::Template
}
