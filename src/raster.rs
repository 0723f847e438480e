// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Support for rastering glyphs
//!
//! [`Rasterizer`] implements [`GlyphSource`] over a loaded [`FontData`] using
//! `ttf-parser` for metrics and `ab_glyph` and/or `fontdue` for rastering
//! (depending on crate features).
//!
//! # Example
//!
//! ```no_run
//! use kas_font_atlas::fonts::FontLibrary;
//! use kas_font_atlas::raster::Rasterizer;
//! use kas_font_atlas::{Config, GlyphSource, Pixmap};
//!
//! # fn main() -> kas_font_atlas::Result<()> {
//! let library = FontLibrary::with_system_fonts();
//! let font = library.load("DejaVu Sans")?;
//! let config = Config::default();
//! let source = Rasterizer::new(&font, &config, 16.0)?;
//!
//! let mut canvas = Pixmap::new(config.staging_size, config.staging_size);
//! source.render_glyph('A', &mut canvas)?;
//! # Ok(())
//! # }
//! ```

use crate::config::{Config, RasterMode};
use crate::error::{Error, FontError, Result};
use crate::fonts::{FaceRef, FontData, ScaledFaceRef};
use crate::pixmap::Pixmap;
use crate::source::{AbcSpacing, GlyphSource};
use easy_cast::*;
use ttf_parser::{Face, GlyphId};

/// A [`GlyphSource`] over a font face at a fixed size
pub struct Rasterizer<'a> {
    font: &'a FontData,
    face: Face<'a>,
    dpem: f32,
    mode: RasterMode,
    #[cfg(feature = "ab_glyph")]
    ab_glyph: ab_glyph::FontRef<'a>,
    /// Present only when rastering with [`RasterMode::Fontdue`]
    #[cfg(feature = "fontdue")]
    fontdue: Option<fontdue::Font>,
}

impl<'a> std::fmt::Debug for Rasterizer<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("font", &self.font.family())
            .field("dpem", &self.dpem)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl<'a> Rasterizer<'a> {
    /// Construct for `font` at `pt_size` points
    ///
    /// The size is converted to pixels per Em using [`Config::dpp`].
    pub fn new(font: &'a FontData, config: &Config, pt_size: f32) -> Result<Self> {
        let load_err = |source: FontError| Error::FontLoad {
            font: font.family().to_string(),
            source,
        };

        let dpem = config.dpem(pt_size);
        let face = Face::parse(font.data(), font.index()).map_err(|e| load_err(e.into()))?;

        let mode;
        cfg_if::cfg_if! {
            if #[cfg(all(feature = "fontdue", feature = "ab_glyph"))] {
                mode = config.raster_mode(dpem);
            } else if #[cfg(feature = "ab_glyph")] {
                mode = RasterMode::AbGlyph;
            } else {
                mode = RasterMode::Fontdue;
            }
        }
        log::debug!(
            "Rasterizer: font {:?} at {dpem} px/em using {mode:?}",
            font.family()
        );

        Ok(Rasterizer {
            font,
            face,
            dpem,
            mode,
            #[cfg(feature = "ab_glyph")]
            ab_glyph: ab_glyph::FontRef::try_from_slice_and_index(font.data(), font.index())
                .map_err(|e| load_err(e.into()))?,
            #[cfg(feature = "fontdue")]
            fontdue: if mode == RasterMode::Fontdue {
                let settings = fontdue::FontSettings {
                    collection_index: font.index(),
                    scale: dpem,
                    ..Default::default()
                };
                let font = fontdue::Font::from_bytes(font.data(), settings)
                    .map_err(|e| load_err(FontError::Fontdue(e)))?;
                Some(font)
            } else {
                None
            },
        })
    }

    /// Size in pixels per Em
    #[inline]
    pub fn dpem(&self) -> f32 {
        self.dpem
    }

    /// Unscaled face
    #[inline]
    pub fn face(&self) -> FaceRef<'_> {
        FaceRef(&self.face)
    }

    /// Scaled face metrics
    #[inline]
    pub fn scaled_face(&self) -> ScaledFaceRef<'_> {
        self.face().scale_by_dpem(self.dpem)
    }

    // Missing characters map to the face's own `.notdef` glyph.
    fn glyph_id(&self, c: char) -> GlyphId {
        self.face().glyph_index(c).unwrap_or(GlyphId(0))
    }

    fn baseline(&self) -> i32 {
        i32::conv_nearest(self.scaled_face().ascent())
    }

    #[cfg(feature = "ab_glyph")]
    fn raster_ab(&self, c: char, id: GlyphId, canvas: &mut Pixmap) -> Result<()> {
        use ab_glyph::Font;

        let font = &self.ab_glyph;
        let upem = font.units_per_em().ok_or_else(|| Error::Metrics {
            c,
            font: self.font_name().to_string(),
        })?;
        let scale = self.dpem * font.height_unscaled() / upem;
        let glyph = ab_glyph::Glyph {
            id: ab_glyph::GlyphId(id.0),
            scale: scale.into(),
            position: ab_glyph::point(0.0, self.baseline() as f32),
        };
        let Some(outline) = font.outline_glyph(glyph) else {
            return Ok(()); // nothing to draw
        };

        let bounds = outline.px_bounds();
        let x0 = i32::conv_trunc(bounds.min.x);
        let y0 = i32::conv_trunc(bounds.min.y);
        outline.draw(|x, y, cov| {
            // Convert to u8 with saturating conversion, rounding down:
            let v = (cov * 256.0) as u8;
            put_coverage(canvas, x0 + i32::conv(x), y0 + i32::conv(y), v);
        });
        Ok(())
    }

    #[cfg(feature = "fontdue")]
    fn raster_fontdue(&self, font: &fontdue::Font, id: GlyphId, canvas: &mut Pixmap) {
        let (metrics, data) = font.rasterize_indexed(id.0, self.dpem);
        if metrics.width == 0 {
            return;
        }

        let x0 = metrics.xmin;
        let y0 = self.baseline() - metrics.ymin - i32::conv(metrics.height);
        for (row, line) in data.chunks_exact(metrics.width).enumerate() {
            for (col, v) in line.iter().enumerate() {
                put_coverage(canvas, x0 + i32::conv(col), y0 + i32::conv(row), *v);
            }
        }
    }
}

/// Draw white with coverage `v` over black; pixels off-canvas are clipped
fn put_coverage(canvas: &mut Pixmap, x: i32, y: i32, v: u8) {
    if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
        canvas.set_pixel(x, y, [v, v, v, 0xFF]);
    }
}

impl<'a> GlyphSource for Rasterizer<'a> {
    fn font_name(&self) -> &str {
        self.font.family()
    }

    fn line_spacing(&self) -> f32 {
        self.scaled_face().line_spacing()
    }

    fn measure_glyph(&self, c: char) -> Result<(f32, f32)> {
        let id = match self.face().glyph_index(c) {
            Some(id) => id,
            None => {
                log::warn!("Font {:?} has no glyph for {c:?}; using .notdef", self.font_name());
                GlyphId(0)
            }
        };
        let sf = self.scaled_face();
        let width = sf.h_advance(id).unwrap_or_else(|| sf.ink_width(id));
        Ok((width, sf.height()))
    }

    fn horizontal_spacing(&self, c: char) -> Result<AbcSpacing> {
        let id = self.glyph_id(c);
        let sf = self.scaled_face();
        let advance = sf.h_advance(id).ok_or_else(|| Error::Spacing {
            c,
            font: self.font_name().to_string(),
        })?;
        let a = sf.h_side_bearing(id);
        let b = sf.ink_width(id);
        Ok(AbcSpacing {
            a,
            b,
            c: advance - a - b,
        })
    }

    fn render_glyph(&self, c: char, canvas: &mut Pixmap) -> Result<()> {
        canvas.clear([0, 0, 0, 0xFF]);
        let id = self.glyph_id(c);

        cfg_if::cfg_if! {
            if #[cfg(all(feature = "fontdue", feature = "ab_glyph"))] {
                match &self.fontdue {
                    Some(font) => {
                        self.raster_fontdue(font, id, canvas);
                        Ok(())
                    }
                    None => self.raster_ab(c, id, canvas),
                }
            } else if #[cfg(feature = "ab_glyph")] {
                self.raster_ab(c, id, canvas)
            } else {
                // mode is always Fontdue here, thus the font is loaded
                let _ = c;
                if let Some(font) = &self.fontdue {
                    self.raster_fontdue(font, id, canvas);
                }
                Ok(())
            }
        }
    }
}
