// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph import

use crate::config::Config;
use crate::error::{Error, Result};
use crate::pixmap::Pixmap;
use crate::source::GlyphSource;
use easy_cast::ConvFloat;

/// A rastered glyph, prior to packing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphRecord {
    /// The character, as a single byte
    pub character: u8,
    /// RGBA image of the glyph, sized to its advance and line height
    pub pixmap: Pixmap,
}

impl GlyphRecord {
    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }
}

/// Import each character of [`Config::chars`] from `source`, in order
///
/// A single staging canvas of [`Config::staging_size`] is used for all
/// characters. Any failure aborts the whole import.
pub fn import_glyphs<S: GlyphSource + ?Sized>(
    source: &S,
    config: &Config,
) -> Result<Vec<GlyphRecord>> {
    let mut canvas = Pixmap::new(config.staging_size, config.staging_size);
    config
        .chars
        .clone()
        .map(|character| import_glyph(source, config, &mut canvas, character))
        .collect()
}

fn import_glyph<S: GlyphSource + ?Sized>(
    source: &S,
    config: &Config,
    canvas: &mut Pixmap,
    character: u8,
) -> Result<GlyphRecord> {
    let c = char::from(character);
    let metrics_err = || Error::Metrics {
        c,
        font: source.font_name().to_string(),
    };

    let (_, ink_height) = source.measure_glyph(c)?;
    let spacing = source.horizontal_spacing(c)?;

    // Zero-advance glyphs still occupy one column of the atlas
    let width = u32::try_conv_ceil(spacing.advance())
        .map_err(|_| metrics_err())?
        .max(1);
    let height = u32::try_conv_ceil(ink_height)
        .map_err(|_| metrics_err())?
        .max(1);

    let limit = config.staging_size;
    if width >= limit || height >= limit {
        return Err(Error::GlyphTooLarge {
            c,
            font: source.font_name().to_string(),
            width,
            height,
            limit,
        });
    }

    source.render_glyph(c, canvas)?;
    Ok(GlyphRecord {
        character,
        pixmap: canvas.crop(width, height),
    })
}
