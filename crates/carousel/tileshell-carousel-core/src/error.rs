//! Errors for carousel configuration and navigation.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CarouselError {
    /// Attribute value not understood; the previous value stays in effect.
    #[error("invalid value '{value}' for attribute '{name}'")]
    InvalidAttribute { name: String, value: String },

    /// Page extent must be finite and non-negative.
    #[error("invalid page extent {extent}")]
    InvalidExtent { extent: f64 },

    #[error("index {index} out of range for {count} items")]
    IndexOutOfRange { index: usize, count: usize },
}
