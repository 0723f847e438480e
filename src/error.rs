// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Error types

use std::io;
use thiserror::Error;

/// Failure to parse a font face with one of the backends
#[derive(Error, Debug)]
pub enum FontError {
    #[error("font parse error")]
    TtfParser(#[from] ttf_parser::FaceParsingError),
    #[cfg(feature = "ab_glyph")]
    #[error("font parse error")]
    AbGlyph(#[from] ab_glyph::InvalidFont),
    #[error("font parse error: {0}")]
    Fontdue(&'static str),
}

/// Conversion error
///
/// All errors are fatal to the conversion in progress. Where a character is
/// involved it is reported together with the font family name.
#[derive(Error, Debug)]
pub enum Error {
    /// No installed or loaded font has the requested family name
    #[error("no font matching family name {0:?}")]
    FontNotFound(String),
    /// The font was found but could not be loaded
    #[error("failed to load font {font:?}")]
    FontLoad {
        font: String,
        #[source]
        source: FontError,
    },
    /// A glyph does not fit the staging canvas
    #[error("glyph {c:?} of font {font:?} is {width}×{height} px; staging canvas is {limit}×{limit} px")]
    GlyphTooLarge {
        c: char,
        font: String,
        width: u32,
        height: u32,
        limit: u32,
    },
    /// Horizontal spacing is not available for a glyph
    #[error("horizontal spacing query failed for {c:?} of font {font:?}")]
    Spacing { c: char, font: String },
    /// Measured metrics are not finite or are negative
    #[error("invalid metrics for {c:?} of font {font:?}")]
    Metrics { c: char, font: String },
    /// The font's line spacing is not finite or is negative
    #[error("invalid line spacing for font {font:?}")]
    LineSpacing { font: String },
    /// Font asset data is malformed
    #[error("invalid font asset: {0}")]
    InvalidAsset(&'static str),
    #[error("I/O error")]
    Io(#[from] io::Error),
    #[cfg(feature = "png")]
    #[error("PNG encoding error")]
    Png(#[from] png::EncodingError),
}

/// Result type with [`Error`] as the default error
pub type Result<T, E = Error> = std::result::Result<T, E>;
