//! Cropped RGBA input buffers

use crate::error::{BrailleError, Result};
use image::{RgbaImage, imageops};

/// Number of 8-bit components per pixel (R, G, B, A)
pub const CHANNELS: usize = 4;

/// A rectangle in source image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle covering a whole `width`x`height` image
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Clip the rectangle to an image of the given size
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Row-major RGBA pixels of a cropped region
///
/// `data.len()` must equal `width * height * 4`; [`PixelBuffer::validate`]
/// checks this and every pipeline entry point calls it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA samples, rejecting a length that does not match the size
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let buffer = Self {
            width,
            height,
            data,
        };
        buffer.validate()?;
        Ok(buffer)
    }

    /// A buffer filled with a single color
    pub fn from_pixel(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            data: rgba.repeat(count),
        }
    }

    /// Copy `rect` out of `image`
    ///
    /// The rectangle is clipped to the image bounds first. The source image is
    /// left untouched.
    ///
    /// # Errors
    /// [`BrailleError::EmptyRegion`] if nothing is left after clipping.
    pub fn from_region(image: &RgbaImage, rect: CropRect) -> Result<Self> {
        let (img_width, img_height) = image.dimensions();
        let clipped = rect.clamp_to(img_width, img_height);
        if clipped.is_empty() {
            return Err(BrailleError::EmptyRegion {
                width: clipped.width,
                height: clipped.height,
            });
        }

        let cropped =
            imageops::crop_imm(image, clipped.x, clipped.y, clipped.width, clipped.height)
                .to_image();
        Ok(cropped.into())
    }

    /// Expected sample count for the declared size
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * CHANNELS
    }

    pub fn validate(&self) -> Result<()> {
        let expected = self.expected_len();
        if self.data.len() != expected {
            return Err(BrailleError::BufferSize {
                width: self.width,
                height: self.height,
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// View the samples as an [`RgbaImage`]
    pub fn to_image(&self) -> Result<RgbaImage> {
        self.validate()?;
        RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or(
            BrailleError::BufferSize {
                width: self.width,
                height: self.height,
                expected: self.expected_len(),
                actual: self.data.len(),
            },
        )
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_new_rejects_short_data() {
        let err = PixelBuffer::new(2, 4, vec![0; 31]).unwrap_err();
        assert_eq!(
            err,
            BrailleError::BufferSize {
                width: 2,
                height: 4,
                expected: 32,
                actual: 31
            }
        );
    }

    #[test]
    fn test_from_pixel_length() {
        let buffer = PixelBuffer::from_pixel(3, 5, [1, 2, 3, 4]);
        assert_eq!(buffer.data.len(), 3 * 5 * 4);
        assert_eq!(&buffer.data[..4], &[1, 2, 3, 4]);
        assert!(buffer.validate().is_ok());
    }

    #[test]
    fn test_from_region_copies_pixels() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        img.put_pixel(3, 2, Rgba([0, 0, 0, 255]));

        let buffer = PixelBuffer::from_region(&img, CropRect::new(3, 2, 4, 4)).unwrap();
        assert_eq!((buffer.width, buffer.height), (4, 4));
        assert_eq!(&buffer.data[..4], &[0, 0, 0, 255]);
        assert_eq!(&buffer.data[4..8], &[255, 255, 255, 255]);
        // source is unchanged
        assert_eq!(img.get_pixel(3, 2), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_from_region_clips_to_bounds() {
        let img = RgbaImage::new(10, 8);
        let buffer = PixelBuffer::from_region(&img, CropRect::new(6, 4, 100, 100)).unwrap();
        assert_eq!((buffer.width, buffer.height), (4, 4));
    }

    #[test]
    fn test_from_region_empty() {
        let img = RgbaImage::new(10, 8);
        let err = PixelBuffer::from_region(&img, CropRect::new(12, 0, 5, 5)).unwrap_err();
        assert!(matches!(err, BrailleError::EmptyRegion { .. }));

        let err = PixelBuffer::from_region(&img, CropRect::new(0, 0, 0, 5)).unwrap_err();
        assert!(matches!(err, BrailleError::EmptyRegion { .. }));
    }

    #[test]
    fn test_to_image_round_trip_dimensions() {
        let buffer = PixelBuffer::from_pixel(6, 2, [9, 9, 9, 255]);
        let img = buffer.to_image().unwrap();
        assert_eq!(img.dimensions(), (6, 2));
    }
}
