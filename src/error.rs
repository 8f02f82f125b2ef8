use alloc::string::String;

/// Errors from building source images and from limit-checked conversion.
///
/// Conversion itself never fails; these come from validating buffers up
/// front and from [`crate::Limits`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("stride {stride} is shorter than a row of {min} bytes")]
    InvalidStride { stride: usize, min: usize },

    #[error("palette has {0} entries, at most 256 are addressable")]
    PaletteTooLarge(usize),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}
