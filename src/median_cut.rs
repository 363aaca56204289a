extern crate alloc;
use alloc::vec::Vec;

use rgb::RGB;

/// A box of histogram entries for median-cut subdivision.
#[derive(Debug, Clone)]
struct ColorBox {
    entries: Vec<(RGB<u8>, u64)>, // (cell centroid, accumulated count)
}

impl ColorBox {
    fn new(entries: Vec<(RGB<u8>, u64)>) -> Self {
        Self { entries }
    }

    fn total_weight(&self) -> u64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Extent (max - min) along each channel.
    fn ranges(&self) -> (u32, u32, u32) {
        let mut r_min = u8::MAX;
        let mut r_max = u8::MIN;
        let mut g_min = u8::MAX;
        let mut g_max = u8::MIN;
        let mut b_min = u8::MAX;
        let mut b_max = u8::MIN;

        for (color, _) in &self.entries {
            r_min = r_min.min(color.r);
            r_max = r_max.max(color.r);
            g_min = g_min.min(color.g);
            g_max = g_max.max(color.g);
            b_min = b_min.min(color.b);
            b_max = b_max.max(color.b);
        }

        (
            (r_max - r_min) as u32,
            (g_max - g_min) as u32,
            (b_max - b_min) as u32,
        )
    }

    /// Split priority: heavier boxes with more color spread split first.
    fn priority(&self) -> u64 {
        let (rr, rg, rb) = self.ranges();
        self.total_weight() * rr.max(rg).max(rb) as u64
    }

    /// Population-weighted centroid, rounded to the nearest channel value.
    fn centroid(&self) -> RGB<u8> {
        let mut r_sum = 0u64;
        let mut g_sum = 0u64;
        let mut b_sum = 0u64;
        let mut w_sum = 0u64;

        for (color, w) in &self.entries {
            r_sum += color.r as u64 * w;
            g_sum += color.g as u64 * w;
            b_sum += color.b as u64 * w;
            w_sum += w;
        }

        if w_sum == 0 {
            return RGB::new(0, 0, 0);
        }

        let half = w_sum / 2;
        RGB::new(
            ((r_sum + half) / w_sum) as u8,
            ((g_sum + half) / w_sum) as u8,
            ((b_sum + half) / w_sum) as u8,
        )
    }

    /// Split along the widest channel at the weighted median.
    /// Both halves keep at least one entry.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let (rr, rg, rb) = self.ranges();

        // Widest channel wins; ties prefer r, then g.
        let axis = if rr >= rg && rr >= rb {
            0
        } else if rg >= rb {
            1
        } else {
            2
        };

        // Total order on (axis value, r, g, b) keeps equal-valued entries in
        // a fixed relative position regardless of input permutation.
        self.entries.sort_unstable_by_key(|(c, _)| {
            let v = match axis {
                0 => c.r,
                1 => c.g,
                _ => c.b,
            };
            (v, c.r, c.g, c.b)
        });

        let half_weight = self.total_weight() / 2;
        let mut accumulated = 0u64;
        let mut split_idx = 1;

        for (i, (_, w)) in self.entries.iter().enumerate() {
            accumulated += w;
            if accumulated >= half_weight && i + 1 < self.entries.len() {
                split_idx = i + 1;
                break;
            }
        }

        split_idx = split_idx.clamp(1, self.entries.len() - 1);

        let right = self.entries.split_off(split_idx);
        (ColorBox::new(self.entries), ColorBox::new(right))
    }
}

/// Weighted median-cut over histogram entries.
///
/// Takes (centroid, count) pairs in a deterministic order and produces up to
/// `max_colors` representative colors. Splitting stops early when every
/// remaining box holds a single entry (zero spread in all channels).
pub(crate) fn median_cut(entries: Vec<(RGB<u8>, u64)>, max_colors: usize) -> Vec<RGB<u8>> {
    if entries.is_empty() || max_colors == 0 {
        return Vec::new();
    }

    if entries.len() <= max_colors {
        return entries.into_iter().map(|(color, _)| color).collect();
    }

    let mut boxes = Vec::with_capacity(max_colors);
    boxes.push(ColorBox::new(entries));

    while boxes.len() < max_colors {
        // First box with the highest priority wins ties.
        let mut best: Option<(usize, u64)> = None;
        for (i, b) in boxes.iter().enumerate() {
            if b.entries.len() < 2 {
                continue;
            }
            let p = b.priority();
            if best.map_or(true, |(_, bp)| p > bp) {
                best = Some((i, p));
            }
        }

        let Some((idx, _)) = best else {
            break; // no splittable box left
        };

        // Stable removal keeps the output palette order reproducible.
        let to_split = boxes.remove(idx);
        let (left, right) = to_split.split();
        boxes.insert(idx, right);
        boxes.insert(idx, left);
    }

    boxes.iter().map(|b| b.centroid()).collect()
}
