// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Batch font conversion tool

use clap::Parser;
use kas_font_atlas::fonts::FontLibrary;
use kas_font_atlas::{convert_font_with, Config, FontAsset, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Convert fonts to bitmap font atlases (<family>.font)")]
struct Args {
    /// Directory in which to write font assets
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Font to convert, as "<family>:<point size>" (repeatable)
    #[arg(long = "font", value_name = "FAMILY:SIZE", value_parser = parse_font, required = true)]
    fonts: Vec<(String, f32)>,

    /// Additional font file to make available (repeatable)
    #[arg(long = "font-file", value_name = "PATH")]
    font_files: Vec<PathBuf>,

    /// Also write each atlas as "<family>.png"
    #[arg(long)]
    png: bool,
}

fn parse_font(s: &str) -> Result<(String, f32), String> {
    let (family, size) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected FAMILY:SIZE, found {s:?}"))?;
    let size: f32 = size.trim().parse().map_err(|e| format!("bad size {size:?}: {e}"))?;
    if family.is_empty() || !(size > 0.0) {
        return Err(format!("expected FAMILY:SIZE, found {s:?}"));
    }
    Ok((family.to_string(), size))
}

fn write_png(path: &Path) -> Result<()> {
    let asset = FontAsset::load(path)?;
    let out = std::fs::File::create(path.with_extension("png"))?;
    asset.write_png(std::io::BufWriter::new(out))
}

fn run(args: &Args) -> Result<()> {
    let mut library = FontLibrary::with_system_fonts();
    for path in &args.font_files {
        library.load_font_file(path)?;
    }
    let config = Config::default();

    for (family, size) in &args.fonts {
        log::info!("Processing font: {family}, size {size}.");
        let path = convert_font_with(&library, &config, family, *size, &args.output_dir)?;
        if args.png {
            write_png(&path)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                log::error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
