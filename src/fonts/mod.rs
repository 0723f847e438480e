// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font selection and loading
//!
//! Fonts are resolved by family name through a [`FontLibrary`]. Each caller
//! owns its library; there is no global instance.
//!
//! ### Font sizes
//!
//! Font sizes are specified in *points*, where 1 point = 1/72 inch. The
//! *point size* of a font is the number of points per *em*. To translate to
//! pixels we use:
//!
//! -   DPP (Dots Per Point): `dpp = dpi / 72`, by default `96 / 72`
//! -   DPEM (Dots Per Em): `dpem = point_size × dpp`
//!
//! Digital font files have an internally defined *font unit*, thus we also
//! use [`crate::conv::DPU`]: pixels per font unit.

mod face;
mod library;

pub use face::{FaceRef, ScaledFaceRef};
pub use library::{FontData, FontLibrary};
