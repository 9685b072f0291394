//! Sampled image reading
//!
//! Rebuilds per-pixel samples from a raw (already filter-decoded) byte
//! stream and an image descriptor, applies per-component decode remapping,
//! and converts the result to RGB through the color-space capability.
//! Color-key masking and stencil masks compose a fourth, alpha channel.

use super::bits::BitReader;
use super::color::{Color, ColorSpace};
use super::raster::{Raster, RgbImage, RgbaImage};
use super::{DecodeError, DecodeResult};
use crate::parser::ImageParameters;
use tracing::warn;

/// Everything the decoder needs to know about one image.
///
/// Resolved once per decode request; the decoder never mutates it.
#[derive(Debug, Clone)]
pub struct SampleDescriptor {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Bits per component: 1, 2, 4, 8 or 16.
    pub bits_per_component: u8,
    /// Components per pixel, from the color space.
    pub num_components: usize,
    /// Explicit decode array, exactly 2 entries per component, or absent.
    pub decode: Option<Vec<f32>>,
    /// Samples are palette indices rather than intensities.
    pub indexed: bool,
    /// The image is a 1-bit stencil mask.
    pub stencil: bool,
    /// Color-key mask ranges, `[lower, upper]` per component, applied to
    /// raw pre-decode values.
    pub color_key: Option<Vec<f32>>,
}

impl SampleDescriptor {
    /// Build a descriptor from the parameters of an inline image,
    /// honoring both long and abbreviated key forms.
    ///
    /// Missing entries get the usual defaults (8 bits per component, or 1
    /// for a stencil); zero dimensions are rejected later, at decode time.
    pub fn from_image_parameters(params: &ImageParameters, color_space: &dyn ColorSpace) -> Self {
        let width = params
            .get_resolved("Width")
            .and_then(|v| v.as_integer())
            .unwrap_or(0)
            .max(0) as u32;
        let height = params
            .get_resolved("Height")
            .and_then(|v| v.as_integer())
            .unwrap_or(0)
            .max(0) as u32;

        let stencil = params
            .get_resolved("ImageMask")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let bits_per_component = params
            .get_resolved("BitsPerComponent")
            .and_then(|v| v.as_integer())
            .map(|v| v as u8)
            .unwrap_or(if stencil { 1 } else { 8 });

        let decode = params
            .get_resolved("Decode")
            .and_then(|v| v.as_array())
            .and_then(|a| a.to_float_vec());

        let (num_components, indexed) = if stencil {
            (1, false)
        } else {
            (color_space.number_of_components(), color_space.is_indexed())
        };

        Self {
            width,
            height,
            bits_per_component,
            num_components,
            decode,
            indexed,
            stencil,
            color_key: None,
        }
    }
}

/// A decoded image: plain RGB, or RGBA when a color-key mask was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedImage {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl DecodedImage {
    pub fn as_rgb(&self) -> Option<&RgbImage> {
        match self {
            DecodedImage::Rgb(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_rgba(&self) -> Option<&RgbaImage> {
        match self {
            DecodedImage::Rgba(image) => Some(image),
            _ => None,
        }
    }
}

/// Read an image as RGB; with color-key masking requested the result is
/// RGBA instead.
///
/// The raster is allocated up front and filled in one pass; an empty byte
/// source is rejected before any decode work and a partial raster is never
/// returned.
pub fn read_rgb_image(
    image: &SampleDescriptor,
    color_space: &dyn ColorSpace,
    data: &[u8],
) -> DecodeResult<DecodedImage> {
    let (rgb, mask) = decode_to_rgb(image, color_space, data, true)?;
    match mask {
        Some(mask) => Ok(DecodedImage::Rgba(apply_color_key_mask(&rgb, &mask))),
        None => Ok(DecodedImage::Rgb(rgb)),
    }
}

/// Read a stencil mask and fill it with the given paint: mask-on pixels
/// become fully transparent, everything else is the fill color at full
/// opacity.
pub fn read_stencil_image(
    image: &SampleDescriptor,
    color_space: &dyn ColorSpace,
    data: &[u8],
    fill: Color,
) -> DecodeResult<RgbaImage> {
    let (mask, _) = decode_to_rgb(image, color_space, data, false)?;
    Ok(apply_stencil(&mask, fill))
}

/// Compose an already-decoded stencil mask with a fill color.
///
/// A pixel is "on" when its first channel equals 255.
pub fn apply_stencil(mask: &RgbImage, fill: Color) -> RgbaImage {
    let rgb = fill.to_rgb8();
    let mut out = RgbaImage::new(mask.width(), mask.height());
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.pixel(x, y)[0] == 255 {
                out.set_pixel(x, y, [0, 0, 0, 0]);
            } else {
                out.set_pixel(x, y, [rgb[0], rgb[1], rgb[2], 255]);
            }
        }
    }
    out
}

// Decode the sample stream and convert to RGB, optionally producing the
// color-key mask plane.
fn decode_to_rgb(
    image: &SampleDescriptor,
    color_space: &dyn ColorSpace,
    data: &[u8],
    use_color_key: bool,
) -> DecodeResult<(RgbImage, Option<Vec<u8>>)> {
    if data.is_empty() {
        return Err(DecodeError::EmptyStream);
    }
    if image.width == 0 || image.height == 0 {
        return Err(DecodeError::ZeroDimension);
    }
    if !matches!(image.bits_per_component, 1 | 2 | 4 | 8 | 16) {
        return Err(DecodeError::UnsupportedBitDepth(image.bits_per_component));
    }

    let decode = resolve_decode_array(image, color_space);
    let color_key = if use_color_key {
        resolve_color_key(image)
    } else {
        None
    };

    let mut raster = Raster::new(image.width, image.height, image.num_components);

    // faster path for plain 8-bit images
    let default_decode = color_space.default_decode(8);
    if image.bits_per_component == 8 && decode == default_decode && color_key.is_none() {
        from_8bit(image, data, &mut raster)?;
        return Ok((color_space.to_rgb(&raster)?, None));
    }

    let mask = from_any(image, data, &decode, color_key, &mut raster)?;
    Ok((color_space.to_rgb(&raster)?, mask))
}

// 8-bit samples with default decode are already the output bytes; just
// de-interleave them into the bands.
fn from_8bit(image: &SampleDescriptor, data: &[u8], raster: &mut Raster) -> DecodeResult<()> {
    let pixels = image.width as usize * image.height as usize;
    let n = image.num_components;
    if data.len() < pixels * n {
        return Err(DecodeError::Truncated(
            (data.len() / (image.width as usize * n)) as u32,
        ));
    }

    for c in 0..n {
        let band = raster.band_mut(c);
        let mut offset = c;
        for sample in band.iter_mut().take(pixels) {
            *sample = data[offset];
            offset += n;
        }
    }
    Ok(())
}

// General path: any bit depth, any decode array, optional color key.
fn from_any(
    image: &SampleDescriptor,
    data: &[u8],
    decode: &[f32],
    color_key: Option<&[f32]>,
    raster: &mut Raster,
) -> DecodeResult<Option<Vec<u8>>> {
    let bits = image.bits_per_component as u32;
    let n = image.num_components;
    let sample_max = ((1u32 << bits) - 1) as f32;

    let mut mask =
        color_key.map(|_| vec![0u8; image.width as usize * image.height as usize]);

    // rows are padded to the nearest byte
    let row_bits = image.width as usize * n * bits as usize;
    let padding = ((8 - row_bits % 8) % 8) as u32;

    let mut reader = BitReader::new(data);
    for y in 0..image.height {
        for x in 0..image.width {
            let mut masked = true;
            for c in 0..n {
                let value = reader
                    .read_bits(bits)
                    .ok_or(DecodeError::Truncated(y))?;

                // the color key applies to raw values, before decoding
                if let Some(ranges) = color_key {
                    masked &= value as f32 >= ranges[c * 2] && value as f32 <= ranges[c * 2 + 1];
                }

                let d_min = decode[c * 2];
                let d_max = decode[c * 2 + 1];

                // interpolate to the decode domain
                let output = d_min + value as f32 * ((d_max - d_min) / sample_max);

                let byte = if image.indexed {
                    // indexed spaces keep the raw index; the palette lookup
                    // happens in the color space
                    output.round().clamp(0.0, 255.0) as u8
                } else {
                    let scaled =
                        (output - d_min.min(d_max)) / (d_max - d_min).abs() * 255.0;
                    scaled.round().clamp(0.0, 255.0) as u8
                };
                raster.set_sample(x, y, c, byte);
            }

            if let Some(mask) = mask.as_mut() {
                mask[(y * image.width + x) as usize] = if masked { 255 } else { 0 };
            }
        }

        reader
            .skip_bits(padding)
            .ok_or(DecodeError::Truncated(y))?;
    }

    Ok(mask)
}

// RGB + mask plane -> RGBA: masked pixels become fully transparent.
fn apply_color_key_mask(image: &RgbImage, mask: &[u8]) -> RgbaImage {
    let mut out = RgbaImage::new(image.width(), image.height());
    for y in 0..image.height() {
        for x in 0..image.width() {
            let [r, g, b] = image.pixel(x, y);
            let alpha = 255 - mask[(y * image.width() + x) as usize];
            out.set_pixel(x, y, [r, g, b, alpha]);
        }
    }
    out
}

// Explicit decode arrays must match the component count exactly; stencils
// additionally allow only the identity and inverted mappings. Anything
// else falls back to the color-space default.
fn resolve_decode_array(image: &SampleDescriptor, color_space: &dyn ColorSpace) -> Vec<f32> {
    if let Some(decode) = &image.decode {
        if image.stencil {
            if decode.as_slice() == [0.0, 1.0] || decode.as_slice() == [1.0, 0.0] {
                return decode.clone();
            }
            warn!("ignored invalid decode array: not compatible with a stencil mask");
        } else if decode.len() == 2 * image.num_components {
            return decode.clone();
        } else {
            warn!(
                "ignored invalid decode array: {} entries for {} components",
                decode.len(),
                image.num_components
            );
        }
    }

    color_space.default_decode(image.bits_per_component)
}

fn resolve_color_key(image: &SampleDescriptor) -> Option<&[f32]> {
    let ranges = image.color_key.as_deref()?;
    if ranges.len() != 2 * image.num_components {
        warn!(
            "ignored color key mask: {} entries for {} components",
            ranges.len(),
            image.num_components
        );
        return None;
    }
    Some(ranges)
}
