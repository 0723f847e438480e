// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Owned RGBA pixel buffers

use crate::conv::to_usize;

/// Bytes per pixel
pub const BPP: usize = 4;

/// An owned RGBA8 image
///
/// Pixels are stored row-major and tightly packed: the row stride is
/// `4 × width` bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Pixmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Pixmap {
    /// Construct, zero-filled
    pub fn new(width: u32, height: u32) -> Self {
        let len = to_usize(width) * to_usize(height) * BPP;
        Pixmap {
            width,
            height,
            data: vec![0; len],
        }
    }

    /// Construct from existing data
    ///
    /// Returns `None` unless `data.len() == 4 × width × height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let len = to_usize(width) * to_usize(height) * BPP;
        (data.len() == len).then_some(Pixmap {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes
    #[inline]
    pub fn stride(&self) -> usize {
        to_usize(self.width) * BPP
    }

    /// True if the image has zero area
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Extract the pixel data
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Fill every pixel with `rgba`
    pub fn clear(&mut self, rgba: [u8; 4]) {
        for px in self.data.chunks_exact_mut(BPP) {
            px.copy_from_slice(&rgba);
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| to_usize(y) * self.stride() + to_usize(x) * BPP)
    }

    /// Read a pixel, if within bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.index(x, y)?;
        let mut px = [0; 4];
        px.copy_from_slice(&self.data[i..i + BPP]);
        Some(px)
    }

    /// Write a pixel
    ///
    /// Coordinates outside the image are ignored. Returns true if written.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.data[i..i + BPP].copy_from_slice(&rgba);
                true
            }
            None => false,
        }
    }

    /// Copy the top-left `width × height` rectangle into a new image
    ///
    /// Panics if the rectangle exceeds the bounds of `self`.
    pub fn crop(&self, width: u32, height: u32) -> Pixmap {
        assert!(
            width <= self.width && height <= self.height,
            "Pixmap::crop: {width}×{height} exceeds {}×{}",
            self.width,
            self.height
        );
        let mut out = Pixmap::new(width, height);
        let row_len = out.stride();
        if row_len == 0 {
            return out;
        }
        for (dst, src) in out
            .data
            .chunks_exact_mut(row_len)
            .zip(self.data.chunks_exact(self.stride()))
        {
            dst.copy_from_slice(&src[..row_len]);
        }
        out
    }

    /// Copy all of `self` into `dst` with top-left corner at `(x, y)`
    ///
    /// Rows are read with the stride of `self` and written with the stride of
    /// `dst`. All four channels are copied verbatim.
    ///
    /// Panics if the destination rectangle exceeds the bounds of `dst`.
    pub fn blit(&self, dst: &mut Pixmap, x: u32, y: u32) {
        assert!(
            u64::from(x) + u64::from(self.width) <= u64::from(dst.width)
                && u64::from(y) + u64::from(self.height) <= u64::from(dst.height),
            "Pixmap::blit: {}×{} at ({x}, {y}) exceeds {}×{}",
            self.width,
            self.height,
            dst.width,
            dst.height
        );
        let row_len = self.stride();
        if row_len == 0 {
            return;
        }
        let dst_stride = dst.stride();
        let x0 = to_usize(x) * BPP;
        let y0 = to_usize(y);
        for (row, src) in self.data.chunks_exact(row_len).enumerate() {
            let start = (y0 + row) * dst_stride + x0;
            dst.data[start..start + row_len].copy_from_slice(src);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: u32, height: u32) -> Pixmap {
        let len = to_usize(width * height) * BPP;
        let data = (0..len).map(|i| i as u8).collect();
        Pixmap::from_vec(width, height, data).unwrap()
    }

    #[test]
    fn from_vec_checks_len() {
        assert!(Pixmap::from_vec(2, 2, vec![0; 16]).is_some());
        assert!(Pixmap::from_vec(2, 2, vec![0; 15]).is_none());
        assert!(Pixmap::from_vec(0, 5, vec![]).is_some());
    }

    #[test]
    fn pixel_access() {
        let mut p = Pixmap::new(3, 2);
        assert!(p.set_pixel(2, 1, [1, 2, 3, 4]));
        assert!(!p.set_pixel(3, 0, [9; 4]));
        assert_eq!(p.pixel(2, 1), Some([1, 2, 3, 4]));
        assert_eq!(p.pixel(0, 2), None);
        assert_eq!(&p.data()[20..24], &[1, 2, 3, 4]);
    }

    #[test]
    fn clear() {
        let mut p = Pixmap::new(2, 2);
        p.clear([0, 0, 0, 255]);
        assert!(p.data().chunks(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn crop_uses_source_stride() {
        let src = numbered(4, 3);
        let out = src.crop(2, 2);
        assert_eq!(out.width(), 2);
        assert_eq!(out.pixel(0, 0), src.pixel(0, 0));
        assert_eq!(out.pixel(1, 0), src.pixel(1, 0));
        assert_eq!(out.pixel(0, 1), src.pixel(0, 1));
        assert_eq!(out.pixel(1, 1), src.pixel(1, 1));
        assert_eq!(src.crop(0, 3).data().len(), 0);
    }

    #[test]
    fn blit_distinct_strides() {
        let src = numbered(2, 2);
        let mut dst = Pixmap::new(5, 4);
        src.blit(&mut dst, 3, 2);
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(dst.pixel(3 + x, 2 + y), src.pixel(x, y));
            }
        }
        assert_eq!(dst.pixel(2, 2), Some([0; 4]));
        assert_eq!(dst.pixel(3, 1), Some([0; 4]));
        let written = dst.data().iter().filter(|b| **b != 0).count();
        // only byte 0 of src is zero
        assert_eq!(written, 15);
    }

    #[test]
    #[should_panic]
    fn blit_out_of_bounds() {
        let src = Pixmap::new(2, 2);
        let mut dst = Pixmap::new(3, 3);
        src.blit(&mut dst, 2, 0);
    }
}
