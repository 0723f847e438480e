// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font conversion
//!
//! The pipeline runs strictly in sequence: import → pack → derive alpha →
//! serialize. Each conversion owns its staging canvas and atlas.

use crate::alpha::derive_alpha;
use crate::asset::FontAsset;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fonts::FontLibrary;
use crate::import::import_glyphs;
use crate::pack::pack;
use crate::raster::Rasterizer;
use crate::source::GlyphSource;
use easy_cast::ConvFloat;
use std::io;
use std::path::{Path, PathBuf};

/// Build a [`FontAsset`] in memory from a glyph source
pub fn build_asset<S: GlyphSource + ?Sized>(source: &S, config: &Config) -> Result<FontAsset> {
    let glyphs = import_glyphs(source, config)?;

    let line_spacing = source.line_spacing();
    let line_spacing = u32::try_conv_trunc(line_spacing).map_err(|_| Error::LineSpacing {
        font: source.font_name().to_string(),
    })?;

    let mut atlas = pack(&glyphs, config.max_row_width, line_spacing);
    drop(glyphs);
    derive_alpha(atlas.pixmap.data_mut());
    Ok(FontAsset::from_atlas(atlas, line_spacing))
}

/// Convert a system font to `<font_name>.font` in `output_dir`
///
/// Uses [`Config::default()`]. Returns the path of the written file.
pub fn convert_font(font_name: &str, pt_size: f32, output_dir: &Path) -> Result<PathBuf> {
    let library = FontLibrary::with_system_fonts();
    convert_font_with(&library, &Config::default(), font_name, pt_size, output_dir)
}

/// Convert a font from `library` to `<font_name>.font` in `output_dir`
///
/// If writing fails, the partially written file is removed.
pub fn convert_font_with(
    library: &FontLibrary,
    config: &Config,
    font_name: &str,
    pt_size: f32,
    output_dir: &Path,
) -> Result<PathBuf> {
    let font = library.load(font_name)?;
    let source = Rasterizer::new(&font, config, pt_size)?;
    let asset = build_asset(&source, config)?;
    log::debug!(
        "Font {font_name:?}: {}×{} atlas, {} glyphs, line spacing {}",
        asset.pixmap.width(),
        asset.pixmap.height(),
        asset.glyphs.len(),
        asset.line_spacing
    );

    let path = output_dir.join(format!("{font_name}.font"));
    save_or_remove(&path, |path| asset.save(path))?;
    log::info!("Wrote {}", path.display());
    Ok(path)
}

/// Run `write` on `path`, removing whatever it left behind on failure
fn save_or_remove(path: &Path, write: impl FnOnce(&Path) -> Result<()>) -> Result<()> {
    let result = write(path);
    if result.is_err() {
        match std::fs::remove_file(path) {
            Ok(()) => log::debug!("Removed partial file {}", path.display()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => (),
            Err(err) => log::warn!("Failed to remove {}: {err}", path.display()),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::tests::FakeSource;
    use std::io::Write;

    #[test]
    fn builds_full_range() {
        let source = FakeSource::new(|c| if c == '~' { 300.0 } else { 9.0 }, 14.0);
        let config = Config {
            max_row_width: 400,
            ..Config::default()
        };
        let asset = build_asset(&source, &config).unwrap();

        assert_eq!(asset.glyphs.len(), 96);
        assert!(asset.glyphs.iter().map(|g| g.character).eq(32u8..128));
        // 14.0 + 1.5, truncated
        assert_eq!(asset.line_spacing, 15);

        let (w, h) = (asset.pixmap.width(), asset.pixmap.height());
        for g in &asset.glyphs {
            assert!(g.x + g.width <= w && g.y + g.height <= h);
        }

        // top-left pixel of each glyph carries its character, with alpha
        // derived from it
        for g in &asset.glyphs {
            let v = g.character;
            let px = asset.pixmap.pixel(g.x, g.y).unwrap();
            assert_eq!(&px[..3], &[v, v, v]);
            assert_eq!(px[3], crate::alpha::luma_alpha(v, v, v));
        }
    }

    #[test]
    fn unknown_font() {
        let library = FontLibrary::new();
        let dir = std::env::temp_dir();
        let result = convert_font_with(&library, &Config::default(), "No Such Font", 12.0, &dir);
        assert!(matches!(result, Err(Error::FontNotFound(_))));
        assert!(!dir.join("No Such Font.font").exists());
    }

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kas-font-atlas-{tag}-{}.font", std::process::id()))
    }

    #[test]
    fn failed_write_removes_file() {
        let path = temp_path("partial");
        let result = save_or_remove(&path, |path| {
            let mut file = std::fs::File::create(path)?;
            file.write_all(&[1, 2, 3, 4])?;
            Err(Error::InvalidAsset("write interrupted"))
        });
        assert!(matches!(result, Err(Error::InvalidAsset(_))));
        assert!(!path.exists());
    }

    #[test]
    fn failed_create_reports_original_error() {
        let path = temp_path("missing-dir").join("nested.font");
        let asset = FontAsset::from_atlas(pack(&[], 1, 1), 0);
        let result = save_or_remove(&path, |path| asset.save(path));
        assert!(matches!(
            result,
            Err(Error::Io(ref err)) if err.kind() == io::ErrorKind::NotFound
        ));
        assert!(!path.exists());
    }

    #[test]
    fn successful_write_is_kept() {
        let path = temp_path("complete");
        save_or_remove(&path, |path| {
            std::fs::write(path, [5, 6])?;
            Ok(())
        })
        .unwrap();
        let data = std::fs::read(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(data.unwrap(), vec![5, 6]);
    }
}
