extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use rgb::alt::GrayAlpha;
use rgb::RGBA;

use crate::error::Error;

/// Pixel encoding of an image buffer. Fixed per buffer, never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 4 channels (r, g, b, a), each 0..=255.
    Rgb,
    /// 2 channels (value, alpha), each 0..=255.
    Grayscale,
    /// A single palette index per pixel.
    Indexed,
}

#[derive(Debug, Clone)]
enum Pixels {
    Rgb(Vec<RGBA<u8>>),
    Grayscale(Vec<GrayAlpha<u8>>),
    Indexed(Vec<u8>),
}

/// A rectangular pixel buffer in one of the three formats.
///
/// Conversion routines take sources by shared reference and never mutate
/// them; destination buffers have a single writer for the duration of one
/// call. The mask color is the transparent sentinel for indexed buffers
/// (0 by default, by convention only).
#[derive(Debug, Clone)]
pub struct Image {
    width: usize,
    height: usize,
    mask_color: u8,
    pixels: Pixels,
}

impl Image {
    /// Create a zero-filled image of the given format and dimensions.
    pub fn new(format: PixelFormat, width: usize, height: usize) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::ZeroDimension);
        }
        let len = width * height;
        let pixels = match format {
            PixelFormat::Rgb => Pixels::Rgb(vec![RGBA::new(0, 0, 0, 0); len]),
            PixelFormat::Grayscale => Pixels::Grayscale(vec![GrayAlpha(0, 0); len]),
            PixelFormat::Indexed => Pixels::Indexed(vec![0; len]),
        };
        Ok(Self {
            width,
            height,
            mask_color: 0,
            pixels,
        })
    }

    /// Wrap an RGB pixel buffer. The buffer length must match the dimensions.
    pub fn from_rgb(width: usize, height: usize, pixels: Vec<RGBA<u8>>) -> Result<Self, Error> {
        validate_len(pixels.len(), width, height)?;
        Ok(Self {
            width,
            height,
            mask_color: 0,
            pixels: Pixels::Rgb(pixels),
        })
    }

    /// Wrap a grayscale pixel buffer.
    pub fn from_grayscale(
        width: usize,
        height: usize,
        pixels: Vec<GrayAlpha<u8>>,
    ) -> Result<Self, Error> {
        validate_len(pixels.len(), width, height)?;
        Ok(Self {
            width,
            height,
            mask_color: 0,
            pixels: Pixels::Grayscale(pixels),
        })
    }

    /// Wrap an indexed pixel buffer.
    pub fn from_indexed(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, Error> {
        validate_len(pixels.len(), width, height)?;
        Ok(Self {
            width,
            height,
            mask_color: 0,
            pixels: Pixels::Indexed(pixels),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels in the buffer.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn format(&self) -> PixelFormat {
        match self.pixels {
            Pixels::Rgb(_) => PixelFormat::Rgb,
            Pixels::Grayscale(_) => PixelFormat::Grayscale,
            Pixels::Indexed(_) => PixelFormat::Indexed,
        }
    }

    /// The transparent sentinel value for indexed buffers.
    pub fn mask_color(&self) -> u8 {
        self.mask_color
    }

    pub fn set_mask_color(&mut self, mask_color: u8) {
        self.mask_color = mask_color;
    }

    /// RGB pixel data, if this is an RGB image.
    pub fn rgb_pixels(&self) -> Option<&[RGBA<u8>]> {
        match &self.pixels {
            Pixels::Rgb(p) => Some(p),
            _ => None,
        }
    }

    pub fn rgb_pixels_mut(&mut self) -> Option<&mut [RGBA<u8>]> {
        match &mut self.pixels {
            Pixels::Rgb(p) => Some(p),
            _ => None,
        }
    }

    /// Grayscale pixel data, if this is a grayscale image.
    pub fn grayscale_pixels(&self) -> Option<&[GrayAlpha<u8>]> {
        match &self.pixels {
            Pixels::Grayscale(p) => Some(p),
            _ => None,
        }
    }

    pub fn grayscale_pixels_mut(&mut self) -> Option<&mut [GrayAlpha<u8>]> {
        match &mut self.pixels {
            Pixels::Grayscale(p) => Some(p),
            _ => None,
        }
    }

    /// Index pixel data, if this is an indexed image.
    pub fn indexed_pixels(&self) -> Option<&[u8]> {
        match &self.pixels {
            Pixels::Indexed(p) => Some(p),
            _ => None,
        }
    }

    pub fn indexed_pixels_mut(&mut self) -> Option<&mut [u8]> {
        match &mut self.pixels {
            Pixels::Indexed(p) => Some(p),
            _ => None,
        }
    }
}

fn validate_len(len: usize, width: usize, height: usize) -> Result<(), Error> {
    if width == 0 || height == 0 {
        return Err(Error::ZeroDimension);
    }
    if len != width * height {
        return Err(Error::DimensionMismatch { len, width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zero_filled() {
        let img = Image::new(PixelFormat::Rgb, 4, 3).unwrap();
        assert_eq!(img.len(), 12);
        assert!(img.rgb_pixels().unwrap().iter().all(|p| p.a == 0));
    }

    #[test]
    fn format_matches_buffer() {
        let img = Image::new(PixelFormat::Indexed, 2, 2).unwrap();
        assert_eq!(img.format(), PixelFormat::Indexed);
        assert!(img.rgb_pixels().is_none());
        assert!(img.indexed_pixels().is_some());
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            Image::new(PixelFormat::Rgb, 0, 4),
            Err(Error::ZeroDimension)
        ));
        assert!(matches!(
            Image::from_indexed(3, 0, Vec::new()),
            Err(Error::ZeroDimension)
        ));
    }

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(matches!(
            Image::from_indexed(4, 4, vec![0; 10]),
            Err(Error::DimensionMismatch { len: 10, .. })
        ));
    }
}
