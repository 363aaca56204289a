use rgb::alt::GrayAlpha;
use rgb::RGBA;

use crate::color::{gray_to_rgb, luma_from_rgb, rgb_to_gray};
use crate::dither::{dither_rgb_to_indexed, BayerMatrix, DitheringMethod};
use crate::error::Error;
use crate::image::{Image, PixelFormat};
use crate::palette::Palette;
use crate::rgbmap::NearestColor;

/// Convert a source image into a destination format.
///
/// When `dst` is `None` a new buffer with the source's dimensions is
/// allocated; a supplied destination must already match the source size and
/// the requested format. `rgbmap` is required for any conversion that ends in
/// indexed pixels, `palette` for any that starts from them. For
/// indexed-to-indexed re-palettization, `palette` is the source image's
/// palette and `rgbmap` searches the destination palette.
///
/// `is_background` disables the mask-color rule: on a background layer the
/// source mask value is an ordinary color.
///
/// RGB to indexed with [`DitheringMethod::Ordered`] takes the ordered-dither
/// path with an 8x8 Bayer matrix; every other pair converts per pixel.
pub fn convert_pixel_format(
    src: &Image,
    dst: Option<Image>,
    dst_format: PixelFormat,
    dithering_method: DitheringMethod,
    rgbmap: Option<&dyn NearestColor>,
    palette: Option<&Palette>,
    is_background: bool,
) -> Result<Image, Error> {
    let mut dst = match dst {
        Some(image) => {
            if image.width() != src.width() || image.height() != src.height() {
                return Err(Error::SizeMismatch {
                    src_width: src.width(),
                    src_height: src.height(),
                    dst_width: image.width(),
                    dst_height: image.height(),
                });
            }
            if image.format() != dst_format {
                return Err(Error::FormatMismatch {
                    expected: dst_format,
                    actual: image.format(),
                });
            }
            image
        }
        None => Image::new(dst_format, src.width(), src.height())?,
    };

    // RGB -> Indexed with ordered dithering
    if src.format() == PixelFormat::Rgb
        && dst_format == PixelFormat::Indexed
        && dithering_method == DitheringMethod::Ordered
    {
        let rgbmap = rgbmap.ok_or(Error::MissingRgbMap)?;
        let matrix = BayerMatrix::new();
        dither_rgb_to_indexed(&matrix, src, &mut dst, 0, 0, rgbmap)?;
        return Ok(dst);
    }

    match (src.format(), dst_format) {
        // RGB -> RGB
        (PixelFormat::Rgb, PixelFormat::Rgb) => {
            if let (Some(s), Some(d)) = (src.rgb_pixels(), dst.rgb_pixels_mut()) {
                d.copy_from_slice(s);
            }
        }

        // RGB -> Grayscale
        (PixelFormat::Rgb, PixelFormat::Grayscale) => {
            if let (Some(s), Some(d)) = (src.rgb_pixels(), dst.grayscale_pixels_mut()) {
                for (pixel, out) in s.iter().zip(d.iter_mut()) {
                    *out = rgb_to_gray(*pixel);
                }
            }
        }

        // RGB -> Indexed
        (PixelFormat::Rgb, PixelFormat::Indexed) => {
            let rgbmap = rgbmap.ok_or(Error::MissingRgbMap)?;
            if let (Some(s), Some(d)) = (src.rgb_pixels(), dst.indexed_pixels_mut()) {
                for (pixel, out) in s.iter().zip(d.iter_mut()) {
                    *out = if pixel.a == 0 {
                        0
                    } else {
                        rgbmap.map_color(pixel.r, pixel.g, pixel.b)
                    };
                }
            }
        }

        // Grayscale -> RGB
        (PixelFormat::Grayscale, PixelFormat::Rgb) => {
            if let (Some(s), Some(d)) = (src.grayscale_pixels(), dst.rgb_pixels_mut()) {
                for (pixel, out) in s.iter().zip(d.iter_mut()) {
                    *out = gray_to_rgb(*pixel);
                }
            }
        }

        // Grayscale -> Grayscale
        (PixelFormat::Grayscale, PixelFormat::Grayscale) => {
            if let (Some(s), Some(d)) = (src.grayscale_pixels(), dst.grayscale_pixels_mut()) {
                d.copy_from_slice(s);
            }
        }

        // Grayscale -> Indexed: the value itself is the index, grayscale
        // images use a direct-mapped palette layout.
        (PixelFormat::Grayscale, PixelFormat::Indexed) => {
            if let (Some(s), Some(d)) = (src.grayscale_pixels(), dst.indexed_pixels_mut()) {
                for (pixel, out) in s.iter().zip(d.iter_mut()) {
                    *out = if pixel.1 == 0 { 0 } else { pixel.0 };
                }
            }
        }

        // Indexed -> RGB
        (PixelFormat::Indexed, PixelFormat::Rgb) => {
            let palette = palette.ok_or(Error::MissingPalette)?;
            let mask = src.mask_color();
            if let (Some(s), Some(d)) = (src.indexed_pixels(), dst.rgb_pixels_mut()) {
                for (index, out) in s.iter().zip(d.iter_mut()) {
                    *out = if !is_background && *index == mask {
                        RGBA::new(0, 0, 0, 0)
                    } else {
                        let e = palette.entry(*index as usize);
                        RGBA::new(e.r, e.g, e.b, 255)
                    };
                }
            }
        }

        // Indexed -> Grayscale
        (PixelFormat::Indexed, PixelFormat::Grayscale) => {
            let palette = palette.ok_or(Error::MissingPalette)?;
            let mask = src.mask_color();
            if let (Some(s), Some(d)) = (src.indexed_pixels(), dst.grayscale_pixels_mut()) {
                for (index, out) in s.iter().zip(d.iter_mut()) {
                    *out = if !is_background && *index == mask {
                        GrayAlpha(0, 0)
                    } else {
                        let e = palette.entry(*index as usize);
                        GrayAlpha(luma_from_rgb(e.r, e.g, e.b), 255)
                    };
                }
            }
        }

        // Indexed -> Indexed: re-palettization against a new palette
        (PixelFormat::Indexed, PixelFormat::Indexed) => {
            let palette = palette.ok_or(Error::MissingPalette)?;
            let rgbmap = rgbmap.ok_or(Error::MissingRgbMap)?;
            let src_mask = src.mask_color();
            let dst_mask = dst.mask_color();
            if let (Some(s), Some(d)) = (src.indexed_pixels(), dst.indexed_pixels_mut()) {
                for (index, out) in s.iter().zip(d.iter_mut()) {
                    *out = if !is_background && *index == src_mask {
                        dst_mask
                    } else {
                        let e = palette.entry(*index as usize);
                        rgbmap.map_color(e.r, e.g, e.b)
                    };
                }
            }
        }
    }

    Ok(dst)
}
