//! One-bit-per-pixel bitmaps
//!
//! A [`BinaryBitmap`] is what thresholding produces and what the Braille
//! encoder consumes. `true` means ink (a raised dot), `false` background.

use crate::filters::is_ink;
use image::{GrayImage, Luma};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryBitmap {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BinaryBitmap {
    /// An all-background bitmap
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    /// Build a bitmap by evaluating `f(x, y)` for every pixel
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Threshold a luminance image: pixels darker than `cutoff` become ink
    pub fn threshold(img: &GrayImage, cutoff: u8) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            bits: img.pixels().map(|p| is_ink(p[0], cutoff)).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "Pixel ({x}, {y}) outside {}x{} bitmap",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Whether the pixel at (x, y) is ink
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, ink: bool) {
        let idx = self.index(x, y);
        self.bits[idx] = ink;
    }

    /// Number of ink pixels
    pub fn ink_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Nearest-neighbor resample to exactly `width`x`height`
    ///
    /// Destination pixel (x, y) reads source pixel
    /// (x * src_width / width, y * src_height / height), integer floor.
    /// An empty source yields an all-background bitmap.
    pub fn resample(&self, width: u32, height: u32) -> Self {
        if (width, height) == self.dimensions() {
            return self.clone();
        }
        if self.width == 0 || self.height == 0 {
            return Self::new(width, height);
        }

        let src_x = |x: u32| (u64::from(x) * u64::from(self.width) / u64::from(width)) as u32;
        let src_y = |y: u32| (u64::from(y) * u64::from(self.height) / u64::from(height)) as u32;

        Self::from_fn(width, height, |x, y| self.get(src_x(x), src_y(y)))
    }

    /// Render as a black-on-white grayscale image for previews
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.get(x, y) {
                Luma([0])
            } else {
                Luma([255])
            }
        })
    }
}
