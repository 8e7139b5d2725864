//! Error types for the fallible edges of the motion core.
//!
//! The numeric engine itself is fail-soft; these errors only surface from
//! parsing and option validation.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MotionError {
    /// Keyframe list could not be parsed.
    #[error("keyframe parse error: {reason}")]
    KeyframeParse { reason: String },

    /// Keyframe offset outside [0,1] or not finite.
    #[error("keyframe {index} has invalid offset {offset}")]
    InvalidOffset { index: usize, offset: f64 },

    /// Keyframe offsets decrease.
    #[error("keyframe offsets must be non-decreasing (index {index})")]
    UnorderedOffsets { index: usize },

    /// Spline options rejected.
    #[error("invalid spline options: {reason}")]
    InvalidOptions { reason: String },

    /// Easing name not known.
    #[error("unknown easing curve: {name}")]
    UnknownEasing { name: String },
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::KeyframeParse {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_become_parse_errors() {
        let err: MotionError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, MotionError::KeyframeParse { .. }));
    }
}
