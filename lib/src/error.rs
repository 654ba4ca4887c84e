//! Error type shared by every stage of the conversion pipeline.

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, BrailleError>;

/// Errors that abort a conversion before any output is produced
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrailleError {
    /// The sample buffer length does not match its declared dimensions
    #[error("pixel buffer of {width}x{height} needs {expected} bytes, got {actual}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Target size is not a positive multiple of the 2x4 glyph cell
    #[error(
        "target size {width}x{height} is invalid: width must be a positive multiple of 2 and height a positive multiple of 4"
    )]
    Dimension { width: u32, height: u32 },

    /// Threshold percentage outside 1..=99
    #[error("threshold must be between 1 and 99, got {threshold}")]
    OptionRange { threshold: u8 },

    /// The selected region (or the buffer it produced) has no pixels
    #[error("region of {width}x{height} contains no pixels")]
    EmptyRegion { width: u32, height: u32 },
}
