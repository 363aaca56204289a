extern crate alloc;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use rgb::{RGB, RGBA};

use crate::median_cut;
use crate::palette::Palette;

/// Bits kept per channel when bucketing samples. 32 levels per channel keeps
/// the populated cell count tractable for the box-splitting pass while each
/// cell still averages its exact 8-bit samples.
pub(crate) const HIST_BITS: u32 = 5;

const CHANNEL_SHIFT: u32 = 8 - HIST_BITS;

/// A histogram cell: exact integer channel sums plus the sample count.
///
/// Sums are kept at full 8-bit precision so the centroid is the weighted
/// average of the actual samples, not of the reduced cell coordinate.
#[derive(Debug, Clone, Default)]
struct HistEntry {
    r_sum: u64,
    g_sum: u64,
    b_sum: u64,
    count: u64,
}

impl HistEntry {
    fn add(&mut self, color: RGBA<u8>, count: u64) {
        self.r_sum += color.r as u64 * count;
        self.g_sum += color.g as u64 * count;
        self.b_sum += color.b as u64 * count;
        self.count += count;
    }

    /// Weighted centroid, rounded to the nearest integer channel value.
    fn centroid(&self) -> RGB<u8> {
        if self.count == 0 {
            return RGB::new(0, 0, 0);
        }
        let half = self.count / 2;
        RGB::new(
            ((self.r_sum + half) / self.count) as u8,
            ((self.g_sum + half) / self.count) as u8,
            ((self.b_sum + half) / self.count) as u8,
        )
    }
}

/// Pack a color into its reduced-cube cell key. Keys order cells
/// lexicographically by (r, g, b), which fixes the iteration order the
/// box-splitting pass sees.
fn cell_key(color: RGBA<u8>) -> u32 {
    let r = (color.r >> CHANNEL_SHIFT) as u32;
    let g = (color.g >> CHANNEL_SHIFT) as u32;
    let b = (color.b >> CHANNEL_SHIFT) as u32;
    (r << (HIST_BITS * 2)) | (g << HIST_BITS) | b
}

/// Frequency table over the RGB color cube at reduced per-channel depth.
///
/// Accumulation is commutative and associative: the optimized palette for a
/// given set of samples does not depend on feeding order.
#[derive(Debug, Clone, Default)]
pub struct Histogram {
    cells: BTreeMap<u32, HistEntry>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `count` samples of `color` into its cell.
    /// The alpha channel is ignored; callers skip transparent pixels.
    pub fn add_samples(&mut self, color: RGBA<u8>, count: u64) {
        if count == 0 {
            return;
        }
        self.cells
            .entry(cell_key(color))
            .or_default()
            .add(color, count);
    }

    /// Number of populated cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Total accumulated sample count.
    pub fn total_samples(&self) -> u64 {
        self.cells.values().map(|e| e.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Fill palette slots `[start_index, start_index + max_entries)` with
    /// representative colors and return the number of entries actually used.
    ///
    /// Runs a weighted median-cut over the populated cells; fewer entries
    /// than requested are produced when the histogram has fewer distinct
    /// cells than slots, or when no splittable region remains. An empty
    /// histogram uses zero entries.
    pub fn create_optimized_palette(
        &self,
        palette: &mut Palette,
        start_index: usize,
        max_entries: usize,
    ) -> usize {
        let slots = max_entries.min(palette.len().saturating_sub(start_index));
        if slots == 0 || self.cells.is_empty() {
            return 0;
        }

        // BTreeMap iteration gives cell-key order, so the cut is
        // deterministic for a given accumulated histogram.
        let entries: Vec<(RGB<u8>, u64)> = self
            .cells
            .values()
            .map(|e| (e.centroid(), e.count))
            .collect();

        let colors = median_cut::median_cut(entries, slots);
        for (i, color) in colors.iter().enumerate() {
            palette.set_entry(start_index + i, RGBA::new(color.r, color.g, color.b, 255));
        }
        colors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_color_one_cell() {
        let mut hist = Histogram::new();
        for _ in 0..100 {
            hist.add_samples(RGBA::new(128, 128, 128, 255), 1);
        }
        assert_eq!(hist.cell_count(), 1);
        assert_eq!(hist.total_samples(), 100);
    }

    #[test]
    fn counts_accumulate() {
        let mut hist = Histogram::new();
        hist.add_samples(RGBA::new(10, 20, 30, 255), 3);
        hist.add_samples(RGBA::new(10, 20, 30, 255), 4);
        assert_eq!(hist.total_samples(), 7);
    }

    #[test]
    fn nearby_colors_share_a_cell() {
        // 5-bit cells are 8 levels wide per channel
        let mut hist = Histogram::new();
        hist.add_samples(RGBA::new(100, 100, 100, 255), 1);
        hist.add_samples(RGBA::new(103, 101, 98, 255), 1);
        assert_eq!(hist.cell_count(), 1);
    }

    #[test]
    fn distinct_colors_separate_cells() {
        let mut hist = Histogram::new();
        hist.add_samples(RGBA::new(0, 0, 0, 255), 1);
        hist.add_samples(RGBA::new(255, 255, 255, 255), 1);
        assert_eq!(hist.cell_count(), 2);
    }

    #[test]
    fn cell_centroid_averages_samples() {
        let mut hist = Histogram::new();
        hist.add_samples(RGBA::new(100, 100, 100, 255), 1);
        hist.add_samples(RGBA::new(102, 102, 102, 255), 1);
        let mut palette = Palette::new(4);
        let used = hist.create_optimized_palette(&mut palette, 0, 4);
        assert_eq!(used, 1);
        assert_eq!(palette.entry(0), RGBA::new(101, 101, 101, 255));
    }

    #[test]
    fn empty_histogram_uses_no_entries() {
        let hist = Histogram::new();
        let mut palette = Palette::new(16);
        assert_eq!(hist.create_optimized_palette(&mut palette, 1, 15), 0);
    }

    #[test]
    fn never_exceeds_requested_entries() {
        let mut hist = Histogram::new();
        for i in 0..64u8 {
            hist.add_samples(RGBA::new(i.wrapping_mul(4), 255 - i, i, 255), 1);
        }
        let mut palette = Palette::new(16);
        let used = hist.create_optimized_palette(&mut palette, 0, 8);
        assert!(used <= 8);
        assert!(used > 0);
    }
}
