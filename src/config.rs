// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Conversion configuration

use crate::conv::DPP;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Selection of the raster backend
///
/// Depending on crate features, not all backends will be available; an
/// unavailable backend falls back to whichever is compiled in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RasterMode {
    /// Choose by font size (see [`Config::large_text_threshold`])
    #[default]
    Auto,
    /// Use `ab_glyph` for rastering
    AbGlyph,
    /// Use `fontdue` for rastering
    Fontdue,
}

/// Configuration of a font conversion
///
/// A `Config` is constructed once per conversion and passed by reference to
/// each stage. It can be default-constructed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Range of characters to import
    ///
    /// Characters are imported in ascending order. Each character is stored
    /// as a single byte, hence the `u8` range. Default: `32..128`.
    pub chars: Range<u8>,
    /// Maximum atlas row width in pixels
    ///
    /// A glyph which would extend a row beyond this width starts a new row.
    /// Default: 4096.
    pub max_row_width: u32,
    /// Side length of the square staging canvas in pixels
    ///
    /// Each glyph is rastered onto this canvas before being copied out; glyph
    /// dimensions must be strictly less than this. Default: 1024.
    pub staging_size: u32,
    /// Pixels-per-point
    ///
    /// Converts font sizes (in points) to pixels per Em:
    /// ```none
    /// dpem = pt_size × dpp
    /// ```
    /// Default: `96 / 72`.
    pub dpp: f32,
    /// Raster backend
    pub mode: RasterMode,
    /// Threshold font size (pixels per Em) for [`RasterMode::Auto`]
    ///
    /// Fonts larger than this are rastered with `ab_glyph`; smaller fonts
    /// with `fontdue` (if available). Default: 60.
    pub large_text_threshold: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            chars: 32..128,
            max_row_width: 4096,
            staging_size: 1024,
            dpp: DPP,
            mode: RasterMode::Auto,
            large_text_threshold: 60.0,
        }
    }
}

impl Config {
    /// Alternative default constructor
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of characters in [`Config::chars`]
    #[inline]
    pub fn num_chars(&self) -> usize {
        self.chars.len()
    }

    /// Convert a font size in points to pixels per Em
    #[inline]
    pub fn dpem(&self, pt_size: f32) -> f32 {
        pt_size * self.dpp
    }

    /// Resolve [`RasterMode::Auto`] for the given font size
    ///
    /// Never returns [`RasterMode::Auto`].
    pub fn raster_mode(&self, dpem: f32) -> RasterMode {
        match self.mode {
            RasterMode::Auto if dpem > self.large_text_threshold => RasterMode::AbGlyph,
            RasterMode::Auto => RasterMode::Fontdue,
            mode => mode,
        }
    }
}
