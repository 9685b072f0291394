//! Color spaces and fill paint
//!
//! The decoder consumes color conversion as a capability: anything that can
//! report its component count, supply a default decode array and turn a
//! banded raster into RGB. The device spaces and the palette-indexed space
//! below are enough to drive every decoder path; richer color math (ICC,
//! Lab, separations) lives outside this layer.

use super::raster::{Raster, RgbImage};
use super::{DecodeError, DecodeResult};

/// Represents a fill color for stencil painting.
///
/// Supports RGB, Grayscale, and CMYK color spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// RGB color (red, green, blue) with values from 0.0 to 1.0
    Rgb(f64, f64, f64),
    /// Grayscale color with value from 0.0 (black) to 1.0 (white)
    Gray(f64),
    /// CMYK color (cyan, magenta, yellow, key/black) with values from 0.0 to 1.0
    Cmyk(f64, f64, f64, f64),
}

impl Color {
    /// Creates an RGB color with values clamped to 0.0-1.0.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color::Rgb(r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }

    /// Creates a grayscale color with value clamped to 0.0-1.0.
    pub fn gray(value: f64) -> Self {
        Color::Gray(value.clamp(0.0, 1.0))
    }

    /// Creates a CMYK color with values clamped to 0.0-1.0.
    pub fn cmyk(c: f64, m: f64, y: f64, k: f64) -> Self {
        Color::Cmyk(
            c.clamp(0.0, 1.0),
            m.clamp(0.0, 1.0),
            y.clamp(0.0, 1.0),
            k.clamp(0.0, 1.0),
        )
    }

    /// Black color (gray 0.0).
    pub fn black() -> Self {
        Color::Gray(0.0)
    }

    /// White color (gray 1.0).
    pub fn white() -> Self {
        Color::Gray(1.0)
    }

    /// The color as interleaved 8-bit RGB.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let (r, g, b) = match *self {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Gray(v) => (v, v, v),
            Color::Cmyk(c, m, y, k) => {
                ((1.0 - c) * (1.0 - k), (1.0 - m) * (1.0 - k), (1.0 - y) * (1.0 - k))
            }
        };
        [
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
        ]
    }
}

/// Color-space capability consumed by the sample decoder.
pub trait ColorSpace {
    /// Number of components per pixel.
    fn number_of_components(&self) -> usize;

    /// Default decode array for the given bit depth: 2 entries per
    /// component.
    fn default_decode(&self, bits_per_component: u8) -> Vec<f32>;

    /// Whether sample values are palette indices rather than intensities.
    fn is_indexed(&self) -> bool {
        false
    }

    /// Convert a banded raster of decoded samples to RGB.
    fn to_rgb(&self, raster: &Raster) -> DecodeResult<RgbImage>;
}

fn check_components(raster: &Raster, expected: usize) -> DecodeResult<()> {
    if raster.num_components() != expected {
        return Err(DecodeError::ComponentMismatch {
            expected,
            actual: raster.num_components(),
        });
    }
    Ok(())
}

/// Single-component grayscale.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceGray;

impl ColorSpace for DeviceGray {
    fn number_of_components(&self) -> usize {
        1
    }

    fn default_decode(&self, _bits_per_component: u8) -> Vec<f32> {
        vec![0.0, 1.0]
    }

    fn to_rgb(&self, raster: &Raster) -> DecodeResult<RgbImage> {
        check_components(raster, 1)?;
        let mut image = RgbImage::new(raster.width(), raster.height());
        for y in 0..raster.height() {
            for x in 0..raster.width() {
                let v = raster.sample(x, y, 0);
                image.set_pixel(x, y, [v, v, v]);
            }
        }
        Ok(image)
    }
}

/// Three-component RGB.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceRgb;

impl ColorSpace for DeviceRgb {
    fn number_of_components(&self) -> usize {
        3
    }

    fn default_decode(&self, _bits_per_component: u8) -> Vec<f32> {
        vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0]
    }

    fn to_rgb(&self, raster: &Raster) -> DecodeResult<RgbImage> {
        check_components(raster, 3)?;
        let mut image = RgbImage::new(raster.width(), raster.height());
        for y in 0..raster.height() {
            for x in 0..raster.width() {
                image.set_pixel(
                    x,
                    y,
                    [
                        raster.sample(x, y, 0),
                        raster.sample(x, y, 1),
                        raster.sample(x, y, 2),
                    ],
                );
            }
        }
        Ok(image)
    }
}

/// Palette-indexed color space: samples are indices into an RGB lookup
/// table, and the default decode spans the full index range of the bit
/// depth.
#[derive(Debug, Clone)]
pub struct Indexed {
    palette: Vec<[u8; 3]>,
}

impl Indexed {
    pub fn new(palette: Vec<[u8; 3]>) -> Self {
        Self { palette }
    }
}

impl ColorSpace for Indexed {
    fn number_of_components(&self) -> usize {
        1
    }

    fn default_decode(&self, bits_per_component: u8) -> Vec<f32> {
        vec![0.0, ((1u32 << bits_per_component) - 1) as f32]
    }

    fn is_indexed(&self) -> bool {
        true
    }

    fn to_rgb(&self, raster: &Raster) -> DecodeResult<RgbImage> {
        check_components(raster, 1)?;
        let mut image = RgbImage::new(raster.width(), raster.height());
        if self.palette.is_empty() {
            return Ok(image);
        }
        for y in 0..raster.height() {
            for x in 0..raster.width() {
                // out-of-range indices clamp to the last palette entry
                let index = (raster.sample(x, y, 0) as usize).min(self.palette.len() - 1);
                image.set_pixel(x, y, self.palette[index]);
            }
        }
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(Color::rgb(1.0, 0.0, 0.5).to_rgb8(), [255, 0, 128]);
        assert_eq!(Color::gray(0.5).to_rgb8(), [128, 128, 128]);
        assert_eq!(Color::black().to_rgb8(), [0, 0, 0]);
        assert_eq!(Color::cmyk(0.0, 0.0, 0.0, 1.0).to_rgb8(), [0, 0, 0]);
        assert_eq!(Color::cmyk(1.0, 0.0, 0.0, 0.0).to_rgb8(), [0, 255, 255]);
    }

    #[test]
    fn test_color_constructors_clamp() {
        assert_eq!(Color::rgb(2.0, -1.0, 0.5), Color::Rgb(1.0, 0.0, 0.5));
        assert_eq!(Color::gray(7.0), Color::Gray(1.0));
    }

    #[test]
    fn test_device_gray_expands_to_rgb() {
        let mut raster = Raster::new(2, 1, 1);
        raster.set_sample(0, 0, 0, 0);
        raster.set_sample(1, 0, 0, 200);
        let image = DeviceGray.to_rgb(&raster).unwrap();
        assert_eq!(image.pixel(0, 0), [0, 0, 0]);
        assert_eq!(image.pixel(1, 0), [200, 200, 200]);
    }

    #[test]
    fn test_device_rgb_interleaves_bands() {
        let mut raster = Raster::new(1, 1, 3);
        raster.set_sample(0, 0, 0, 10);
        raster.set_sample(0, 0, 1, 20);
        raster.set_sample(0, 0, 2, 30);
        let image = DeviceRgb.to_rgb(&raster).unwrap();
        assert_eq!(image.pixel(0, 0), [10, 20, 30]);
    }

    #[test]
    fn test_component_mismatch_is_detected() {
        let raster = Raster::new(1, 1, 2);
        assert!(matches!(
            DeviceRgb.to_rgb(&raster),
            Err(DecodeError::ComponentMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_indexed_palette_lookup() {
        let palette = vec![[255, 0, 0], [0, 255, 0]];
        let space = Indexed::new(palette);
        assert_eq!(space.default_decode(4), vec![0.0, 15.0]);
        assert!(space.is_indexed());

        let mut raster = Raster::new(3, 1, 1);
        raster.set_sample(0, 0, 0, 0);
        raster.set_sample(1, 0, 0, 1);
        raster.set_sample(2, 0, 0, 9); // out of range, clamps
        let image = space.to_rgb(&raster).unwrap();
        assert_eq!(image.pixel(0, 0), [255, 0, 0]);
        assert_eq!(image.pixel(1, 0), [0, 255, 0]);
        assert_eq!(image.pixel(2, 0), [0, 255, 0]);
    }
}
