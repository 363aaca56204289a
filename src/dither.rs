use crate::error::Error;
use crate::image::{Image, PixelFormat};
use crate::rgbmap::NearestColor;

/// How RGB data is reduced to palette indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitheringMethod {
    /// Flat nearest-color mapping.
    None,
    /// Bayer-matrix ordered dithering.
    Ordered,
}

const MATRIX_SIZE: usize = 8;

// Classic 8x8 Bayer index matrix, values 0..=63 distributed so the repeating
// tile approximates a uniform threshold.
#[rustfmt::skip]
const BAYER8: [[u8; MATRIX_SIZE]; MATRIX_SIZE] = [
    [ 0, 32,  8, 40,  2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44,  4, 36, 14, 46,  6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [ 3, 35, 11, 43,  1, 33,  9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47,  7, 39, 13, 45,  5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Fixed 8x8 ordered threshold matrix. Coordinates wrap modulo the matrix
/// size, so the pattern tiles seamlessly.
#[derive(Debug, Clone, Copy, Default)]
pub struct BayerMatrix;

impl BayerMatrix {
    pub fn new() -> Self {
        Self
    }

    pub fn size(&self) -> usize {
        MATRIX_SIZE
    }

    pub fn threshold(&self, x: usize, y: usize) -> u8 {
        BAYER8[y & (MATRIX_SIZE - 1)][x & (MATRIX_SIZE - 1)]
    }
}

/// Signed per-channel perturbation for a matrix value, ~uniform over ±16.
/// Integer math keeps the output identical across platforms.
fn perturbation(threshold: u8) -> i32 {
    (2 * threshold as i32 - 63) * 16 / 63
}

/// Convert an RGB image to indexed with ordered dithering.
///
/// Each pixel's channels are perturbed by the Bayer threshold at
/// `(x + offset_x, y + offset_y)` before the nearest-color lookup, trading
/// flat banding for a patterned approximation. Fully transparent pixels
/// collapse to index 0, the mask sentinel, exactly as in the undithered
/// RGB-to-indexed path.
pub fn dither_rgb_to_indexed(
    matrix: &BayerMatrix,
    src: &Image,
    dst: &mut Image,
    offset_x: usize,
    offset_y: usize,
    rgbmap: &dyn NearestColor,
) -> Result<(), Error> {
    let src_pixels = src.rgb_pixels().ok_or(Error::FormatMismatch {
        expected: PixelFormat::Rgb,
        actual: src.format(),
    })?;
    if src.width() != dst.width() || src.height() != dst.height() {
        return Err(Error::SizeMismatch {
            src_width: src.width(),
            src_height: src.height(),
            dst_width: dst.width(),
            dst_height: dst.height(),
        });
    }
    let dst_format = dst.format();
    let dst_pixels = dst.indexed_pixels_mut().ok_or(Error::FormatMismatch {
        expected: PixelFormat::Indexed,
        actual: dst_format,
    })?;

    let width = src.width();
    for (i, (pixel, out)) in src_pixels.iter().zip(dst_pixels.iter_mut()).enumerate() {
        if pixel.a == 0 {
            *out = 0;
            continue;
        }

        let x = i % width;
        let y = i / width;
        let d = perturbation(matrix.threshold(x + offset_x, y + offset_y));

        let r = (pixel.r as i32 + d).clamp(0, 255) as u8;
        let g = (pixel.g as i32 + d).clamp(0, 255) as u8;
        let b = (pixel.b as i32 + d).clamp(0, 255) as u8;

        *out = rgbmap.map_color(r, g, b);
    }

    Ok(())
}
