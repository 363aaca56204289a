//! Color-space conversion and palette optimization for sprite images.
//!
//! Supports three pixel formats (RGB, grayscale, indexed), a histogram-fed
//! median-cut palette optimizer, and ordered (Bayer) dithering. The intended
//! flow: feed rendered frames into a [`PaletteOptimizer`] (or call one of the
//! `create_palette_*` helpers), build an [`RgbMap`] over the resulting
//! [`Palette`], then rewrite pixel buffers with [`convert_pixel_format`].
//!
//! The crate is a pure computational core: no I/O, single-threaded,
//! deterministic output for a given input on every platform.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod color;
pub mod convert;
pub mod dither;
pub mod error;
pub mod histogram;
pub mod image;
mod median_cut;
pub mod optimizer;
pub mod palette;
pub mod rgbmap;

pub use convert::convert_pixel_format;
pub use dither::{dither_rgb_to_indexed, BayerMatrix, DitheringMethod};
pub use error::Error;
pub use histogram::Histogram;
pub use image::{Image, PixelFormat};
pub use optimizer::{
    create_palette_from_images, create_palette_from_sprite, PaletteOptimizer, SpriteSource,
};
pub use palette::{Palette, MAX_PALETTE_SIZE};
pub use rgbmap::{NearestColor, RgbMap};
