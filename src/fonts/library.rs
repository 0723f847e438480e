// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font library

#![allow(clippy::len_without_is_empty)]

use crate::error::{Error, Result};
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use std::path::Path;

/// Loaded font data for a single face
///
/// This owns a copy of the font file's bytes together with the face index
/// within the file (for font collections).
#[derive(Clone)]
pub struct FontData {
    family: String,
    data: Vec<u8>,
    index: u32,
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("family", &self.family)
            .field("len", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}

impl FontData {
    /// Construct from font file data
    ///
    /// The `family` name is used in diagnostics only.
    pub fn new(family: impl Into<String>, data: Vec<u8>, index: u32) -> Self {
        FontData {
            family: family.into(),
            data,
            index,
        }
    }

    /// Family name
    #[inline]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Font file data
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Face index within the font file
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Library of available fonts
///
/// Fonts are matched by exact family name. No fallback is attempted: if the
/// named family is not present, loading fails.
pub struct FontLibrary {
    db: Database,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    /// Construct an empty library
    pub fn new() -> Self {
        FontLibrary { db: Database::new() }
    }

    /// Construct a library with system fonts loaded
    pub fn with_system_fonts() -> Self {
        let mut lib = Self::new();
        lib.db.load_system_fonts();
        log::info!("Found {} fonts", lib.db.len());
        lib
    }

    /// Load a font file (or collection)
    pub fn load_font_file(&mut self, path: &Path) -> Result<()> {
        self.db.load_font_file(path)?;
        Ok(())
    }

    /// Load font data from memory
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
    }

    /// Number of font faces available
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Iterate over family names of all faces
    ///
    /// Names may repeat (once per face).
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.db
            .faces()
            .filter_map(|face| face.families.first().map(|(name, _)| name.as_str()))
    }

    /// Load the regular face of the family `name`
    pub fn load(&self, name: &str) -> Result<FontData> {
        let families = [Family::Name(name)];
        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self
            .db
            .query(&query)
            .ok_or_else(|| Error::FontNotFound(name.to_string()))?;

        let family = self
            .db
            .face(id)
            .and_then(|info| info.families.first())
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| name.to_string());
        log::info!("Loading font {name}. Loaded font name: {family}.");

        let (data, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| Error::FontNotFound(name.to_string()))?;
        Ok(FontData::new(family, data, index))
    }
}
