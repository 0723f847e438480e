// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Atlas packing
//!
//! Glyphs are packed into rows ("shelves") left-to-right in import order. A
//! glyph which would extend the current row beyond the maximum row width
//! starts a new row. Packing happens in two passes: [`atlas_size`] computes
//! the atlas dimensions, then [`Placements`] assigns each glyph its offset.
//! Both passes wrap via the same predicate and advance rows by the same
//! height, thus every placement lies within the computed dimensions.
//!
//! A glyph wider than the maximum row width occupies a row alone; the atlas
//! width grows to fit it.

use crate::import::GlyphRecord;
use crate::pixmap::Pixmap;

/// A glyph placed in the atlas
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PackedGlyph {
    /// The character, as a single byte
    pub character: u8,
    /// Offset of the glyph's left edge in the atlas
    pub x: u32,
    /// Offset of the glyph's top edge in the atlas
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A packed atlas with its glyphs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Atlas {
    pub pixmap: Pixmap,
    /// Glyphs, in the order given to [`pack`]
    pub glyphs: Vec<PackedGlyph>,
}

/// True if a glyph of `width` does not fit after `row_width` in a row
#[inline]
fn wraps(row_width: u32, width: u32, max_row_width: u32) -> bool {
    u64::from(row_width) + u64::from(width) > u64::from(max_row_width)
}

/// Height by which each new row is offset from the last
///
/// This is the font's `line_height`, or the tallest glyph if taller, thus
/// rows never overlap.
pub fn row_height(line_height: u32, sizes: &[(u32, u32)]) -> u32 {
    sizes
        .iter()
        .map(|size| size.1)
        .fold(line_height, u32::max)
}

/// Compute atlas dimensions `(width, height)` for glyphs of the given `sizes`
///
/// Each size is `(width, height)`. The first row is as tall as the tallest
/// glyph; each further row adds `row_height`. The width is that of the widest
/// row. No glyphs yields `(0, 0)`.
pub fn atlas_size(sizes: &[(u32, u32)], max_row_width: u32, row_height: u32) -> (u32, u32) {
    let Some(max_height) = sizes.iter().map(|size| size.1).max() else {
        return (0, 0);
    };

    let mut width = 0;
    let mut height = max_height;
    let mut row_width = 0;
    for &(w, _) in sizes {
        if wraps(row_width, w, max_row_width) {
            row_width = 0;
            height += row_height;
        }
        row_width += w;
        width = width.max(row_width);
    }
    (width, height)
}

/// Iterator over glyph offsets `(x, y)`
///
/// Yields one offset per input size, in order.
#[derive(Clone, Debug)]
pub struct Placements<I> {
    sizes: I,
    max_row_width: u32,
    row_height: u32,
    x: u32,
    y: u32,
}

impl<I: Iterator<Item = (u32, u32)>> Placements<I> {
    /// Construct
    ///
    /// Parameters must match those passed to [`atlas_size`].
    pub fn new(sizes: I, max_row_width: u32, row_height: u32) -> Self {
        Placements {
            sizes,
            max_row_width,
            row_height,
            x: 0,
            y: 0,
        }
    }
}

impl<I: Iterator<Item = (u32, u32)>> Iterator for Placements<I> {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let (w, _) = self.sizes.next()?;
        if wraps(self.x, w, self.max_row_width) {
            self.x = 0;
            self.y += self.row_height;
        }
        let pos = (self.x, self.y);
        self.x += w;
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.sizes.size_hint()
    }
}

/// Pack `glyphs` into a new atlas
///
/// Glyph pixels are copied verbatim (all four channels).
pub fn pack(glyphs: &[GlyphRecord], max_row_width: u32, line_height: u32) -> Atlas {
    let sizes: Vec<(u32, u32)> = glyphs.iter().map(|g| (g.width(), g.height())).collect();
    let row_height = row_height(line_height, &sizes);
    let (width, height) = atlas_size(&sizes, max_row_width, row_height);
    log::debug!(
        "pack: {} glyphs into {width}×{height} atlas (row height {row_height})",
        glyphs.len()
    );

    let mut pixmap = Pixmap::new(width, height);
    let placements = Placements::new(sizes.iter().copied(), max_row_width, row_height);
    let glyphs = glyphs
        .iter()
        .zip(placements)
        .map(|(glyph, (x, y))| {
            glyph.pixmap.blit(&mut pixmap, x, y);
            PackedGlyph {
                character: glyph.character,
                x,
                y,
                width: glyph.width(),
                height: glyph.height(),
            }
        })
        .collect();

    Atlas { pixmap, glyphs }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Small deterministic PRNG (xorshift64*)
    struct Rng(u64);
    impl Rng {
        fn next(&mut self) -> u64 {
            self.0 ^= self.0 >> 12;
            self.0 ^= self.0 << 25;
            self.0 ^= self.0 >> 27;
            self.0.wrapping_mul(0x2545_F491_4F6C_DD1D)
        }
        fn range(&mut self, lo: u32, hi: u32) -> u32 {
            lo + (self.next() % u64::from(hi - lo + 1)) as u32
        }
    }

    fn layout(
        sizes: &[(u32, u32)],
        max_row_width: u32,
        line_height: u32,
    ) -> (u32, u32, Vec<(u32, u32)>) {
        let rh = row_height(line_height, sizes);
        let (w, h) = atlas_size(sizes, max_row_width, rh);
        let pos = Placements::new(sizes.iter().copied(), max_row_width, rh).collect();
        (w, h, pos)
    }

    fn record(character: u8, width: u32, height: u32, fill: [u8; 4]) -> GlyphRecord {
        let mut pixmap = Pixmap::new(width, height);
        pixmap.clear(fill);
        GlyphRecord { character, pixmap }
    }

    #[test]
    fn three_glyph_scenario() {
        let sizes = [(10, 20), (10, 20), (4090, 20)];
        let (w, h, pos) = layout(&sizes, 4096, 20);
        assert_eq!(pos, vec![(0, 0), (10, 0), (0, 20)]);
        assert_eq!((w, h), (4090, 40));
    }

    #[test]
    fn empty() {
        let (w, h, pos) = layout(&[], 4096, 20);
        assert_eq!((w, h), (0, 0));
        assert!(pos.is_empty());

        let atlas = pack(&[], 4096, 20);
        assert!(atlas.pixmap.is_empty());
        assert!(atlas.glyphs.is_empty());
    }

    #[test]
    fn exact_fit_does_not_wrap() {
        let (w, h, pos) = layout(&[(60, 5), (40, 5), (1, 5)], 100, 5);
        assert_eq!(pos, vec![(0, 0), (60, 0), (0, 5)]);
        assert_eq!((w, h), (100, 10));
    }

    #[test]
    fn oversized_glyph_has_own_row() {
        let (w, h, pos) = layout(&[(30, 8), (150, 8), (30, 8)], 100, 10);
        assert_eq!(pos, vec![(0, 0), (0, 10), (0, 20)]);
        assert_eq!((w, h), (150, 28));

        // as first glyph, an empty row is left above it
        let (w, h, pos) = layout(&[(150, 8), (30, 8)], 100, 10);
        assert_eq!(pos, vec![(0, 10), (0, 20)]);
        assert_eq!((w, h), (150, 28));
    }

    #[test]
    fn rows_grow_to_tallest_glyph() {
        let sizes = [(50, 30), (50, 12), (50, 12)];
        let (w, h, pos) = layout(&sizes, 100, 12);
        assert_eq!(pos, vec![(0, 0), (50, 0), (0, 30)]);
        assert_eq!((w, h), (100, 60));
    }

    #[test]
    fn random_layouts_in_bounds_without_overlap() {
        let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
        for _ in 0..300 {
            let n = rng.range(1, 120) as usize;
            let max_row_width = rng.range(16, 1024);
            let line_height = rng.range(1, 48);
            let sizes: Vec<(u32, u32)> = (0..n)
                .map(|_| {
                    let w = if rng.range(0, 20) == 0 {
                        rng.range(max_row_width, max_row_width * 2)
                    } else {
                        rng.range(1, max_row_width / 4 + 1)
                    };
                    (w, rng.range(1, 64))
                })
                .collect();

            let (aw, ah, pos) = layout(&sizes, max_row_width, line_height);
            assert_eq!(pos.len(), n);

            let rects: Vec<_> = sizes
                .iter()
                .zip(&pos)
                .map(|(&(w, h), &(x, y))| (x, y, x + w, y + h))
                .collect();
            for &(x0, y0, x1, y1) in &rects {
                assert!(x1 <= aw && y1 <= ah, "out of bounds");
                assert!(x0 < x1 && y0 < y1);
            }
            for (i, a) in rects.iter().enumerate() {
                for b in &rects[i + 1..] {
                    let disjoint = a.2 <= b.0 || b.2 <= a.0 || a.3 <= b.1 || b.3 <= a.1;
                    assert!(disjoint, "overlap: {a:?}, {b:?}");
                }
            }

            let mut rows: Vec<(u32, u32, usize)> = vec![];
            for (&(w, _), &(_, y)) in sizes.iter().zip(&pos) {
                match rows.iter_mut().find(|row| row.0 == y) {
                    Some(row) => {
                        row.1 += w;
                        row.2 += 1;
                    }
                    None => rows.push((y, w, 1)),
                }
            }
            for (_, sum, count) in rows {
                assert!(sum <= max_row_width || count == 1);
            }
        }
    }

    #[test]
    fn pack_copies_pixels() {
        let glyphs = [
            record(b'a', 3, 2, [1, 2, 3, 4]),
            record(b'b', 2, 4, [5, 6, 7, 8]),
            record(b'c', 4, 1, [9, 10, 11, 12]),
        ];
        let atlas = pack(&glyphs, 6, 3);
        let p = &atlas.pixmap;
        assert_eq!((p.width(), p.height()), (5, 8));

        let placed: Vec<_> = atlas
            .glyphs
            .iter()
            .map(|g| (g.character, g.x, g.y, g.width, g.height))
            .collect();
        assert_eq!(
            placed,
            vec![(b'a', 0, 0, 3, 2), (b'b', 3, 0, 2, 4), (b'c', 0, 4, 4, 1)]
        );

        for (glyph, record) in atlas.glyphs.iter().zip(&glyphs) {
            let fill = record.pixmap.pixel(0, 0);
            for y in glyph.y..glyph.y + glyph.height {
                for x in glyph.x..glyph.x + glyph.width {
                    assert_eq!(p.pixel(x, y), fill);
                }
            }
        }
        assert_eq!(p.pixel(0, 2), Some([0; 4]));
        assert_eq!(p.pixel(4, 4), Some([0; 4]));
    }
}
