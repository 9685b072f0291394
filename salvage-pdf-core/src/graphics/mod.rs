//! Sampled Image Decoding Module
//!
//! Reconstructs per-pixel sample rasters from the raw, row-padded sample
//! streams of PDF images (ISO 32000-1 Section 8.9) and converts them to RGB
//! through a color-space capability. Handles arbitrary bit depths, decode
//! arrays, color-key masking and stencil masks.

pub mod bits;
pub mod color;
pub mod image;
pub mod raster;

pub use self::color::{Color, ColorSpace, DeviceGray, DeviceRgb, Indexed};
pub use self::image::{
    apply_stencil, read_rgb_image, read_stencil_image, DecodedImage, SampleDescriptor,
};
pub use self::raster::{Raster, RgbImage, RgbaImage};

/// Result type for decoding operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Sample decoding failures.
///
/// Mis-sized decode arrays and color-key ranges are not failures; they are
/// logged and replaced with the color-space defaults.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Image stream is empty")]
    EmptyStream,

    #[error("Image width or height is zero")]
    ZeroDimension,

    #[error("Unsupported bits per component: {0}")]
    UnsupportedBitDepth(u8),

    #[error("Sample data ended inside row {0}")]
    Truncated(u32),

    #[error("Raster has {actual} components, color space expects {expected}")]
    ComponentMismatch { expected: usize, actual: usize },
}
