extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use rgb::RGBA;

/// Maximum number of entries usable through an 8-bit indexed image.
pub const MAX_PALETTE_SIZE: usize = 256;

/// An ordered sequence of RGB entries, indexable by an 8-bit pixel value.
///
/// Entries produced by the optimizer always carry full alpha; index 0 is the
/// mask (transparency) sentinel by convention when the sprite has no opaque
/// background layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<RGBA<u8>>,
}

impl Palette {
    /// Create a palette of `size` opaque black entries.
    /// The size is clamped to `1..=MAX_PALETTE_SIZE`.
    pub fn new(size: usize) -> Self {
        Self {
            entries: vec![RGBA::new(0, 0, 0, 255); size.clamp(1, MAX_PALETTE_SIZE)],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry. Out-of-range indices are a caller contract
    /// violation and panic, like any slice access.
    pub fn entry(&self, index: usize) -> RGBA<u8> {
        self.entries[index]
    }

    pub fn set_entry(&mut self, index: usize, color: RGBA<u8>) {
        self.entries[index] = color;
    }

    pub fn entries(&self) -> &[RGBA<u8>] {
        &self.entries
    }

    /// Grow (with opaque black) or shrink to `size`, clamped to
    /// `1..=MAX_PALETTE_SIZE`. Used to trim trailing unused slots after
    /// optimization.
    pub fn resize(&mut self, size: usize) {
        self.entries
            .resize(size.clamp(1, MAX_PALETTE_SIZE), RGBA::new(0, 0, 0, 255));
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(MAX_PALETTE_SIZE)
    }
}
