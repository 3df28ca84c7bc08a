pub mod color;
pub mod dermoscopic;
pub mod features;
pub mod preprocess;
pub mod shape;

pub use features::*;
pub use preprocess::*;

use thiserror::Error;

/// The only error that escapes a classification call.
///
/// Contour and numeric anomalies inside the pipeline are recovered with
/// documented defaults and never reach the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Image buffer is empty")]
    EmptyBuffer,

    #[error("Image has zero area: {width}x{height}")]
    ZeroArea { width: u32, height: u32 },

    #[error("Buffer holds {actual} bytes, expected {expected} for an RGB image")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Image data exceeds {limit_mb}MB limit")]
    InputTooLarge { limit_mb: usize },

    #[error("Failed to decode image: {0}")]
    Decode(String),
}
