use thiserror::Error;

/// Error type for mask construction and mask-to-mask operations
///
/// Covers failures when converting a raw probability buffer into an
/// 8-bit mask and when merging masks of mismatched dimensions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MaskError {
    /// The probability buffer length does not match the declared dimensions
    #[error("Probability buffer length {actual} does not match {width}x{height}")]
    LengthMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },

    /// Mask dimensions must be non-zero
    #[error("Mask dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },

    /// A probability value is NaN or infinite
    ///
    /// Well-formed model output is normalized to [0, 1]; a non-finite
    /// value indicates a defect upstream, not a recoverable condition.
    #[error("Probability at index {index} is not finite")]
    NonFiniteProbability { index: usize },

    /// Two masks that must align have different dimensions
    #[error("Mask dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },
}

/// Error type for resampling operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResizeError {
    /// Target dimensions must be at least 1x1
    #[error("Target dimensions must be at least 1x1, got {width}x{height}")]
    InvalidTargetDimensions { width: u32, height: u32 },

    /// The source image has a zero-sized dimension
    #[error("Source image is empty: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

/// Error type for distance-transform feathering
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatherError {
    /// Feathering over a zero radius is undefined
    #[error("Feather radius must be greater than zero")]
    ZeroRadius,

    /// The distance transform produced a NaN alpha factor
    ///
    /// This cannot happen with well-formed inputs and is treated as a
    /// defect rather than a recoverable condition.
    #[error("Distance transform produced a non-finite alpha factor at ({x}, {y})")]
    NonFiniteDistance { x: u32, y: u32 },
}

/// Error type for compositing operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositeError {
    /// Image and mask dimensions do not match
    ///
    /// Mismatched inputs are rejected rather than silently resized;
    /// aligning the mask to the image is the caller's responsibility.
    #[error("Image and mask dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },
}

/// Error type surfaced by the background-removal pipeline
///
/// The pipeline aborts on the first stage failure and reports it
/// unchanged; there is no partial output and no internal retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// A configuration value is outside its accepted range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Mask(#[from] MaskError),

    #[error(transparent)]
    Resize(#[from] ResizeError),

    #[error(transparent)]
    Feather(#[from] FeatherError),

    #[error(transparent)]
    Composite(#[from] CompositeError),
}
