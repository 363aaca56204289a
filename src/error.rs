use thiserror::Error;

use crate::image::PixelFormat;

#[derive(Debug, Error)]
pub enum Error {
    #[error("image dimensions cannot be zero")]
    ZeroDimension,

    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error("destination image is {dst_width}x{dst_height}, expected {src_width}x{src_height}")]
    SizeMismatch {
        src_width: usize,
        src_height: usize,
        dst_width: usize,
        dst_height: usize,
    },

    #[error("unexpected pixel format {actual:?}, expected {expected:?}")]
    FormatMismatch {
        expected: PixelFormat,
        actual: PixelFormat,
    },

    #[error("conversion involving indexed pixels requires a palette")]
    MissingPalette,

    #[error("conversion to indexed pixels requires a nearest-color map")]
    MissingRgbMap,
}
