//! Error types for gaussblur.

use thiserror::Error;

/// Result alias for gaussblur operations.
pub type BlurResult<T> = std::result::Result<T, BlurError>;

/// Errors that can occur when building rasters, convolving, or benchmarking.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlurError {
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is shorter than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer does not cover the declared dimensions.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Destination was not pre-sized to match the source.
    #[error(
        "destination is {dst_width}x{dst_height} but source is {src_width}x{src_height}"
    )]
    DestinationSizeMismatch {
        src_width: usize,
        src_height: usize,
        dst_width: usize,
        dst_height: usize,
    },
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// The requested behavior needs a cargo feature that was not compiled in.
    #[error("feature `{0}` is not enabled")]
    FeatureDisabled(&'static str),
    /// A harness operation was called out of order.
    #[error("harness is {found}, expected {expected}")]
    HarnessState {
        expected: &'static str,
        found: &'static str,
    },
    /// Decoding or encoding an image file failed.
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
}
