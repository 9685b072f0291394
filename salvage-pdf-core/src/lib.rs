//! # salvage-pdf
//!
//! A lenient, salvage-first decoding layer for PDF content streams: a
//! byte-exact content-stream tokenizer and a sampled-image decoder, in pure
//! Rust.
//!
//! Real-world PDF content streams are frequently non-conformant, so this
//! library prefers maximal salvage over total failure: only one structural
//! defect (a mangled inline-image `ID` keyword) aborts a parse; everything
//! else is logged and substituted with a safe default.
//!
//! ## Features
//!
//! - **Content-stream tokenizing**: operands, operators, inline-image
//!   payloads, in source order, drained at once or pulled one at a time
//! - **Inline images**: parameter accumulation and raw payload recovery,
//!   including the bounded binary lookahead that keeps `EI` bytes inside
//!   pixel data from ending the image early
//! - **Sample decoding**: 1/2/4/8/16 bits per component, row padding,
//!   decode-array remapping, color-key masking, stencil masks
//! - **Pure Rust**: no C dependencies or external PDF libraries
//!
//! ## Tokenizing a content stream
//!
//! ```rust
//! use salvage_pdf::parser::ContentStreamParser;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tokens = ContentStreamParser::from_bytes(b"BT /F1 12 Tf (Hi) Tj ET").parse_all()?;
//!
//! for token in &tokens {
//!     if let Some(name) = token.operator_name() {
//!         println!("operator: {}", name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Decoding an image
//!
//! ```rust
//! use salvage_pdf::graphics::{read_rgb_image, DeviceGray, SampleDescriptor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let descriptor = SampleDescriptor {
//!     width: 1,
//!     height: 2,
//!     bits_per_component: 1,
//!     num_components: 1,
//!     decode: None,
//!     indexed: false,
//!     stencil: false,
//!     color_key: None,
//! };
//!
//! // two one-pixel rows, each padded to a whole byte
//! let image = read_rgb_image(&descriptor, &DeviceGray, &[0b1000_0000, 0b0000_0000])?;
//! let rgb = image.as_rgb().unwrap();
//! assert_eq!(rgb.pixel(0, 0), [255, 255, 255]);
//! # Ok(())
//! # }
//! ```

pub mod graphics;
pub mod parser;

// Re-export parsing types
pub use parser::{
    ContentStreamParser, ImageParameters, Operator, ParseError, ParseResult, PdfArray,
    PdfDictionary, PdfName, PdfObject, PdfStream, PdfString, Token,
};

// Re-export decoding types
pub use graphics::{
    apply_stencil, read_rgb_image, read_stencil_image, Color, ColorSpace, DecodeError,
    DecodeResult, DecodedImage, DeviceGray, DeviceRgb, Indexed, Raster, RgbImage, RgbaImage,
    SampleDescriptor,
};

/// Current version of salvage-pdf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_parse_and_decode_inline_image() {
        let tokens = ContentStreamParser::from_bytes(b"q BI /W 2 /H 2 /BPC 8 ID \x00\x40\x80\xC0 EI Q")
            .parse_all()
            .unwrap();

        let operator = tokens[1].as_operator().unwrap();
        let descriptor = SampleDescriptor::from_image_parameters(
            operator.image_parameters().unwrap(),
            &DeviceGray,
        );
        let image =
            read_rgb_image(&descriptor, &DeviceGray, operator.image_data().unwrap()).unwrap();
        let rgb = image.as_rgb().unwrap();
        assert_eq!(rgb.pixel(0, 0), [0x00, 0x00, 0x00]);
        assert_eq!(rgb.pixel(1, 1), [0xC0, 0xC0, 0xC0]);
    }
}
