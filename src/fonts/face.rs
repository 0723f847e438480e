// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font face types

use crate::conv::DPU;
use ttf_parser::{Face, GlyphId};

/// Handle to a parsed font face
#[derive(Copy, Clone, Debug)]
pub struct FaceRef<'a>(pub(crate) &'a Face<'a>);

impl<'a> FaceRef<'a> {
    /// Get glyph identifier for a char
    ///
    /// Returns `None` if the face does not cover `c`.
    #[inline]
    pub fn glyph_index(&self, c: char) -> Option<GlyphId> {
        self.0.glyph_index(c)
    }

    /// Convert `dpem` to `dpu`
    ///
    /// Output: a font-specific scale.
    ///
    /// Input: `dpem` is pixels/em
    ///
    /// ```none
    /// dpem
    ///   = pt_size × dpp
    ///   = pt_size × dpi / 72
    /// ```
    #[inline]
    pub fn dpu(self, dpem: f32) -> DPU {
        DPU(dpem / f32::from(self.0.units_per_em()))
    }

    /// Get a scaled reference
    ///
    /// Units: `dpem` is dots (pixels) per Em (module documentation).
    #[inline]
    pub fn scale_by_dpem(self, dpem: f32) -> ScaledFaceRef<'a> {
        ScaledFaceRef(self.0, self.dpu(dpem))
    }
}

/// Handle to a parsed font face with a scale
#[derive(Copy, Clone, Debug)]
pub struct ScaledFaceRef<'a>(&'a Face<'a>, DPU);
impl<'a> ScaledFaceRef<'a> {
    /// Unscaled face
    #[inline]
    pub fn face(&self) -> FaceRef<'a> {
        FaceRef(self.0)
    }

    /// Scale
    #[inline]
    pub fn dpu(&self) -> DPU {
        self.1
    }

    /// Horizontal advancement after this glyph, without shaping or kerning
    ///
    /// Returns `None` if the face has no horizontal metrics for `id`.
    #[inline]
    pub fn h_advance(&self, id: GlyphId) -> Option<f32> {
        let x = self.0.glyph_hor_advance(id)?;
        Some(self.1.u16_to_px(x))
    }

    /// Horizontal side bearing
    ///
    /// If unspecified by the font this resolves to 0.
    #[inline]
    pub fn h_side_bearing(&self, id: GlyphId) -> f32 {
        let x = self.0.glyph_hor_side_bearing(id).unwrap_or(0);
        self.1.i16_to_px(x)
    }

    /// Width of the glyph's ink (bounding box)
    ///
    /// This is zero for glyphs without an outline, such as space.
    #[inline]
    pub fn ink_width(&self, id: GlyphId) -> f32 {
        self.0
            .glyph_bounding_box(id)
            .map(|rect| self.1.i16_to_px(rect.width()))
            .unwrap_or(0.0)
    }

    /// Ascender
    #[inline]
    pub fn ascent(&self) -> f32 {
        self.1.i16_to_px(self.0.ascender())
    }

    /// Descender
    #[inline]
    pub fn descent(&self) -> f32 {
        self.1.i16_to_px(self.0.descender())
    }

    /// Line gap
    #[inline]
    pub fn line_gap(&self) -> f32 {
        self.1.i16_to_px(self.0.line_gap())
    }

    /// Height of a line of text, excluding line gap
    #[inline]
    pub fn height(&self) -> f32 {
        self.1.i16_to_px(self.0.height())
    }

    /// Distance between consecutive baselines
    #[inline]
    pub fn line_spacing(&self) -> f32 {
        self.height() + self.line_gap()
    }
}
