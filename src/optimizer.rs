use rgb::RGBA;

use crate::error::Error;
use crate::histogram::Histogram;
use crate::image::{Image, PixelFormat};
use crate::palette::{Palette, MAX_PALETTE_SIZE};

/// Collects color samples from one or more images and turns them into an
/// optimized palette.
///
/// Two-step API: feed every source image, then calculate once. Feeding order
/// does not affect the result.
#[derive(Debug, Clone, Default)]
pub struct PaletteOptimizer {
    histogram: Histogram,
}

impl PaletteOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate the image's opaque pixels into the histogram.
    ///
    /// Alpha is forced to full opacity before insertion; palette entries
    /// never encode partial transparency. Grayscale values feed as neutral
    /// RGB. Indexed images carry no color information to learn from and are
    /// a caller contract violation.
    pub fn feed_with_image(&mut self, image: &Image) {
        match image.format() {
            PixelFormat::Rgb => {
                if let Some(pixels) = image.rgb_pixels() {
                    for pixel in pixels {
                        if pixel.a > 0 {
                            self.histogram
                                .add_samples(RGBA::new(pixel.r, pixel.g, pixel.b, 255), 1);
                        }
                    }
                }
            }

            PixelFormat::Grayscale => {
                if let Some(pixels) = image.grayscale_pixels() {
                    for pixel in pixels {
                        if pixel.1 > 0 {
                            let v = pixel.0;
                            self.histogram.add_samples(RGBA::new(v, v, v, 255), 1);
                        }
                    }
                }
            }

            PixelFormat::Indexed => {
                debug_assert!(false, "cannot feed an indexed image into the histogram");
            }
        }
    }

    /// Write the optimized colors into `palette` and trim unused slots.
    ///
    /// Without a background layer, index 0 stays reserved as the mask
    /// sentinel and colors start at index 1; with one, every slot is usable.
    /// The palette is resized to `max(1, first_usable + used)`.
    pub fn calculate(&self, palette: &mut Palette, has_background_layer: bool) {
        let first_usable = usize::from(!has_background_layer);
        let requested = palette.len().saturating_sub(first_usable);
        let used = self
            .histogram
            .create_optimized_palette(palette, first_usable, requested);
        palette.resize((first_usable + used).max(1));
    }

    /// Read access to the accumulated histogram.
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }
}

/// Feed every image, then calculate once.
pub fn create_palette_from_images(
    images: &[&Image],
    palette: &mut Palette,
    has_background_layer: bool,
) {
    let mut optimizer = PaletteOptimizer::new();
    for image in images {
        optimizer.feed_with_image(image);
    }
    optimizer.calculate(palette, has_background_layer);
}

/// An animation source that can compose full frames on demand.
///
/// The editor/view collaborator implements this; the optimizer only needs
/// the sprite dimensions, the background-layer flag, and a way to render one
/// composed frame.
pub trait SpriteSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn has_background_layer(&self) -> bool;

    /// Render the fully composed frame into `dest`, an RGB image of the
    /// sprite's dimensions. Every pixel must be written; the buffer is
    /// reused across frames.
    fn render_frame(&self, frame: usize, dest: &mut Image);
}

/// Build an optimized palette from the composed RGB content of an inclusive
/// frame range.
///
/// A single scratch frame is allocated and reused for every render, so
/// memory stays bounded for long animations. When `palette` is `None` a
/// fresh 256-entry palette is allocated.
pub fn create_palette_from_sprite<S: SpriteSource>(
    sprite: &S,
    from_frame: usize,
    to_frame: usize,
    palette: Option<Palette>,
) -> Result<Palette, Error> {
    let mut palette = palette.unwrap_or_else(|| Palette::new(MAX_PALETTE_SIZE));
    let mut optimizer = PaletteOptimizer::new();

    let mut scratch = Image::new(PixelFormat::Rgb, sprite.width(), sprite.height())?;
    for frame in from_frame..=to_frame {
        sprite.render_frame(frame, &mut scratch);
        optimizer.feed_with_image(&scratch);
    }

    optimizer.calculate(&mut palette, sprite.has_background_layer());
    Ok(palette)
}
