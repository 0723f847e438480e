// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The font asset file format
//!
//! All integers are little-endian. Fields are positional; there is no magic
//! number, version or checksum:
//!
//! ```none
//! i32     atlas width
//! i32     atlas height
//! [u8]    atlas pixels: RGBA, row major, width × height × 4 bytes
//! i32     glyph count
//! repeated glyph count times:
//!     u8      character
//!     u32     x offset
//!     u32     y offset
//!     u32     glyph width
//!     u32     glyph height
//! u32     line spacing
//! ```
//!
//! A partially written file is not a valid asset; the format has no means of
//! recovery.

use crate::conv::to_usize;
use crate::error::{Error, Result};
use crate::pack::{Atlas, PackedGlyph};
use crate::pixmap::{Pixmap, BPP};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A bitmap font: glyph atlas and metrics
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontAsset {
    /// The atlas image
    pub pixmap: Pixmap,
    /// Glyph metrics, in import order
    pub glyphs: Vec<PackedGlyph>,
    /// Distance between consecutive baselines in pixels
    pub line_spacing: u32,
}

impl FontAsset {
    /// Construct from a packed atlas
    pub fn from_atlas(atlas: Atlas, line_spacing: u32) -> Self {
        FontAsset {
            pixmap: atlas.pixmap,
            glyphs: atlas.glyphs,
            line_spacing,
        }
    }

    /// Find the metrics of a character
    ///
    /// Lookup is by character value, not by position.
    pub fn glyph(&self, c: char) -> Option<&PackedGlyph> {
        let c = u8::try_from(c).ok()?;
        self.glyphs.iter().find(|glyph| glyph.character == c)
    }

    /// Serialize to `writer`
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let too_large = || Error::InvalidAsset("dimension exceeds i32::MAX");
        let width = i32::try_from(self.pixmap.width()).map_err(|_| too_large())?;
        let height = i32::try_from(self.pixmap.height()).map_err(|_| too_large())?;
        let count = i32::try_from(self.glyphs.len()).map_err(|_| too_large())?;

        writer.write_all(&width.to_le_bytes())?;
        writer.write_all(&height.to_le_bytes())?;
        writer.write_all(self.pixmap.data())?;

        writer.write_all(&count.to_le_bytes())?;
        for glyph in &self.glyphs {
            writer.write_all(&[glyph.character])?;
            writer.write_all(&glyph.x.to_le_bytes())?;
            writer.write_all(&glyph.y.to_le_bytes())?;
            writer.write_all(&glyph.width.to_le_bytes())?;
            writer.write_all(&glyph.height.to_le_bytes())?;
        }

        writer.write_all(&self.line_spacing.to_le_bytes())?;
        Ok(())
    }

    /// Deserialize from `reader`
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let width = read_dimension(&mut reader)?;
        let height = read_dimension(&mut reader)?;
        let len = to_usize(width)
            .checked_mul(to_usize(height))
            .and_then(|n| n.checked_mul(BPP))
            .ok_or(Error::InvalidAsset("atlas too large"))?;

        let mut data = Vec::new();
        (&mut reader).take(len as u64).read_to_end(&mut data)?;
        let pixmap =
            Pixmap::from_vec(width, height, data).ok_or(Error::InvalidAsset("truncated atlas"))?;

        let count = read_dimension(&mut reader)?;
        let glyphs = (0..count)
            .map(|_| -> Result<PackedGlyph> {
                Ok(PackedGlyph {
                    character: read_array::<1, _>(&mut reader)?[0],
                    x: read_u32(&mut reader)?,
                    y: read_u32(&mut reader)?,
                    width: read_u32(&mut reader)?,
                    height: read_u32(&mut reader)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let line_spacing = read_u32(&mut reader)?;
        Ok(FontAsset {
            pixmap,
            glyphs,
            line_spacing,
        })
    }

    /// Write to a file at `path`
    ///
    /// On error the file may be left partially written; callers should
    /// remove it.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Read from a file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        Self::read_from(BufReader::new(File::open(path)?))
    }

    /// Encode the atlas as an RGBA PNG image
    #[cfg(feature = "png")]
    #[cfg_attr(docsrs, doc(cfg(feature = "png")))]
    pub fn write_png<W: Write>(&self, writer: W) -> Result<()> {
        if self.pixmap.is_empty() {
            return Err(Error::InvalidAsset("empty atlas"));
        }
        let mut encoder = png::Encoder::new(writer, self.pixmap.width(), self.pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(self.pixmap.data())?;
        writer.finish()?;
        Ok(())
    }
}

fn read_array<const N: usize, R: Read>(reader: &mut R) -> Result<[u8; N]> {
    let mut buf = [0; N];
    reader.read_exact(&mut buf).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => Error::InvalidAsset("unexpected end of data"),
        _ => Error::Io(err),
    })?;
    Ok(buf)
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    read_array(reader).map(u32::from_le_bytes)
}

/// Read an `i32` which must be non-negative
fn read_dimension<R: Read>(reader: &mut R) -> Result<u32> {
    let x = read_array(reader).map(i32::from_le_bytes)?;
    u32::try_from(x).map_err(|_| Error::InvalidAsset("negative size or count"))
}
