// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph source abstraction

use crate::error::Result;
use crate::pixmap::Pixmap;

/// Horizontal spacing of a glyph (ABC widths)
///
/// All values are in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AbcSpacing {
    /// Whitespace before the glyph's ink (may be negative)
    pub a: f32,
    /// Width of the glyph's ink
    pub b: f32,
    /// Whitespace after the glyph's ink (may be negative)
    pub c: f32,
}

impl AbcSpacing {
    /// Total advance width: `a + b + c`
    #[inline]
    pub fn advance(&self) -> f32 {
        self.a + self.b + self.c
    }
}

/// A provider of rastered glyphs for one font at one size
///
/// Sources are driven synchronously, one character at a time.
pub trait GlyphSource {
    /// Font family name, for diagnostics
    fn font_name(&self) -> &str;

    /// Distance between consecutive baselines, in pixels
    fn line_spacing(&self) -> f32;

    /// Measure the extents `(width, height)` of `c`, in pixels
    ///
    /// Characters not covered by the font must not be substituted from
    /// another font.
    fn measure_glyph(&self, c: char) -> Result<(f32, f32)>;

    /// Get the [`AbcSpacing`] of `c`
    fn horizontal_spacing(&self, c: char) -> Result<AbcSpacing>;

    /// Raster `c` onto `canvas` at the origin
    ///
    /// The canvas is cleared to black first; the glyph is drawn in white.
    fn render_glyph(&self, c: char, canvas: &mut Pixmap) -> Result<()>;
}
