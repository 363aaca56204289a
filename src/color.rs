use rgb::alt::GrayAlpha;
use rgb::RGBA;

/// HSV "value" channel of an RGB color as an integer percentage (0..=100).
///
/// `round(max(r, g, b) * 100 / 255)`. The scaled max never lands on an exact
/// .5 remainder over 255, so +127 rounding is exact.
fn hsv_value(r: u8, g: u8, b: u8) -> u32 {
    let max = r.max(g).max(b) as u32;
    (max * 100 + 127) / 255
}

/// Grayscale value of an RGB color via the HSV value channel.
///
/// The value percentage is rescaled to 0..=255 with truncating division,
/// so results are bit-reproducible across platforms.
pub fn luma_from_rgb(r: u8, g: u8, b: u8) -> u8 {
    (255 * hsv_value(r, g, b) / 100) as u8
}

/// Expand a grayscale pixel to RGB. The value is replicated into every
/// channel; alpha is carried through unchanged.
pub fn gray_to_rgb(pixel: GrayAlpha<u8>) -> RGBA<u8> {
    RGBA::new(pixel.0, pixel.0, pixel.0, pixel.1)
}

/// Collapse an RGB pixel to grayscale. Alpha is carried through unchanged.
pub fn rgb_to_gray(pixel: RGBA<u8>) -> GrayAlpha<u8> {
    GrayAlpha(luma_from_rgb(pixel.r, pixel.g, pixel.b), pixel.a)
}
