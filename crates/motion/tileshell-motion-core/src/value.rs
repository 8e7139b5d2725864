//! Property values carried by keyframes.
//!
//! A keyframe property is either a plain number (`opacity: 0.5`) or a string
//! that may embed numeric tokens (`transform: "translateX(10px)"`). Anything
//! else a host might send is represented as text and animated as static.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Number(f64),
    Text(String),
}

/// Classification used when deciding how a property is animated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PropKind {
    /// Interpolated as a scalar.
    Numeric,
    /// String template with embedded numeric tokens.
    Template,
    /// Copied verbatim per segment.
    Static,
}

impl PropValue {
    /// Numeric view of the value. Strings that are a bare number (`"0.5"`)
    /// count as numbers; templates with units do not.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) if n.is_finite() => Some(*n),
            PropValue::Number(_) => None,
            PropValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            PropValue::Number(_) => None,
        }
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, PropValue::Number(_))
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        PropValue::Number(v)
    }
}

impl From<f32> for PropValue {
    fn from(v: f32) -> Self {
        PropValue::Number(v as f64)
    }
}

impl From<i32> for PropValue {
    fn from(v: i32) -> Self {
        PropValue::Number(v as f64)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        PropValue::Text(v.to_string())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        PropValue::Text(v)
    }
}
