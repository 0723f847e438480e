// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Alpha derivation
//!
//! Glyphs are rastered white-on-black. This converts the colour channels of
//! each pixel to an opacity value stored in the alpha channel, using the
//! ITU-R BT.709 luma weights.

use crate::pixmap::BPP;

/// Luma of an RGB triple, rounded up to a byte
#[inline]
pub fn luma_alpha(r: u8, g: u8, b: u8) -> u8 {
    let luma = 0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b);
    // Saturating conversion: luma of white may round up past 255
    luma.ceil() as u8
}

#[inline]
fn derive_pixel(px: &mut [u8]) {
    px[3] = luma_alpha(px[0], px[1], px[2]);
}

/// Overwrite the alpha channel of every RGBA pixel in `data` with its luma
///
/// Colour channels are unchanged. Trailing bytes not forming a whole pixel
/// are ignored.
pub fn derive_alpha(data: &mut [u8]) {
    cfg_if::cfg_if! {
        if #[cfg(feature = "parallel")] {
            use rayon::prelude::*;
            data.par_chunks_exact_mut(BPP).for_each(derive_pixel);
        } else {
            data.chunks_exact_mut(BPP).for_each(derive_pixel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes() {
        assert_eq!(luma_alpha(255, 255, 255), 255);
        assert_eq!(luma_alpha(0, 0, 0), 0);
    }

    #[test]
    fn weights() {
        // 0.2126 × 100 = 21.26
        assert_eq!(luma_alpha(100, 0, 0), 22);
        // 0.7152 × 100 = 71.52
        assert_eq!(luma_alpha(0, 100, 0), 72);
        // 0.0722 × 100 = 7.22
        assert_eq!(luma_alpha(0, 0, 100), 8);
    }

    #[test]
    fn in_place() {
        let mut data = vec![
            255, 255, 255, 0, //
            0, 0, 0, 255, //
            100, 0, 0, 7, //
            0, 0, 100, 1,
        ];
        derive_alpha(&mut data);
        assert_eq!(
            data,
            vec![255, 255, 255, 255, 0, 0, 0, 0, 100, 0, 0, 22, 0, 0, 100, 8]
        );
    }

    #[test]
    fn twice_equals_once() {
        let mut once: Vec<u8> = (0..1024u32).map(|i| (i * 37 % 251) as u8).collect();
        derive_alpha(&mut once);
        let mut twice = once.clone();
        derive_alpha(&mut twice);
        assert_eq!(once, twice);
    }
}
