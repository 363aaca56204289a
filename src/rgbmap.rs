extern crate alloc;
use alloc::vec::Vec;

use crate::palette::Palette;

/// Nearest-color query contract consumed by the converter and the ordered
/// dither. Implementations return the index of the palette entry closest to
/// the given RGB value.
pub trait NearestColor {
    fn map_color(&self, r: u8, g: u8, b: u8) -> u8;
}

const MAP_BITS: u32 = 5;
const MAP_SHIFT: u32 = 8 - MAP_BITS;
const MAP_SIDE: usize = 1 << MAP_BITS;

/// Precomputed nearest-entry table over a palette.
///
/// The RGB cube is reduced to 32 levels per channel and every cell stores the
/// index of the nearest palette entry to the cell's center, so lookups are a
/// single table read. An optional mask index is excluded from matching so the
/// transparency sentinel never wins a color search.
#[derive(Debug, Clone)]
pub struct RgbMap {
    table: Vec<u8>,
}

impl RgbMap {
    pub fn new(palette: &Palette, mask_index: Option<usize>) -> Self {
        let mut table = Vec::with_capacity(MAP_SIDE * MAP_SIDE * MAP_SIDE);

        for r_cell in 0..MAP_SIDE {
            for g_cell in 0..MAP_SIDE {
                for b_cell in 0..MAP_SIDE {
                    let r = expand(r_cell);
                    let g = expand(g_cell);
                    let b = expand(b_cell);
                    table.push(nearest_entry(palette, mask_index, r, g, b));
                }
            }
        }

        Self { table }
    }
}

impl NearestColor for RgbMap {
    fn map_color(&self, r: u8, g: u8, b: u8) -> u8 {
        let r = (r >> MAP_SHIFT) as usize;
        let g = (g >> MAP_SHIFT) as usize;
        let b = (b >> MAP_SHIFT) as usize;
        self.table[(r << (MAP_BITS * 2)) | (g << MAP_BITS) | b]
    }
}

/// Expand a 5-bit cell coordinate back to the 8-bit center of its cell.
fn expand(cell: usize) -> u8 {
    ((cell << MAP_SHIFT) | (cell >> (MAP_BITS - MAP_SHIFT))) as u8
}

/// Brute-force nearest palette entry by squared RGB distance.
/// The first minimum wins, so equal-distance entries resolve to the lowest
/// index.
fn nearest_entry(palette: &Palette, mask_index: Option<usize>, r: u8, g: u8, b: u8) -> u8 {
    let mut best_idx = 0u8;
    let mut best_dist = u32::MAX;

    for (i, entry) in palette.entries().iter().enumerate() {
        if Some(i) == mask_index {
            continue;
        }
        let dr = entry.r as i32 - r as i32;
        let dg = entry.g as i32 - g as i32;
        let db = entry.b as i32 - b as i32;
        let dist = (dr * dr + dg * dg + db * db) as u32;
        if dist < best_dist {
            best_dist = dist;
            best_idx = i as u8;
        }
    }

    best_idx
}
