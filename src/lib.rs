// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! KAS bitmap font atlas library
//!
//! Converts a named font at a given size into a self-contained bitmap font:
//! an RGBA glyph atlas together with per-glyph metrics, written in a compact
//! binary format (see [`asset`]) which can be drawn from without any
//! font-rendering dependency.
//!
//! The conversion is a strict sequence of stages:
//!
//! 1.  [`import`]: raster each character of [`Config::chars`] via a
//!     [`GlyphSource`] (usually a [`raster::Rasterizer`])
//! 2.  [`pack`]: arrange glyphs into rows of an atlas
//! 3.  [`alpha`]: derive an opacity mask from the white-on-black glyphs
//! 4.  [`asset`]: serialize the atlas and metrics
//!
//! ```no_run
//! # fn main() -> kas_font_atlas::Result<()> {
//! let path = kas_font_atlas::convert_font("DejaVu Sans", 16.0, "assets".as_ref())?;
//! let asset = kas_font_atlas::FontAsset::load(&path)?;
//! assert_eq!(asset.glyphs.len(), 96);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(any(feature = "ab_glyph", feature = "fontdue")))]
compile_error!("at least one of the features \"ab_glyph\" or \"fontdue\" is required");

pub mod alpha;
pub mod asset;
pub mod conv;
pub mod fonts;
pub mod import;
pub mod pack;
pub mod raster;

mod config;
mod convert;
mod error;
mod pixmap;
mod source;

pub use asset::FontAsset;
pub use config::{Config, RasterMode};
pub use convert::{build_asset, convert_font, convert_font_with};
pub use error::{Error, FontError, Result};
pub use pixmap::Pixmap;
pub use source::{AbcSpacing, GlyphSource};
