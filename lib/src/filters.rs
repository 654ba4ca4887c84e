use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::gradients::prewitt_gradients;
use imageproc::map::map_pixels;

/// Luminance of one RGBA pixel, alpha ignored
///
/// Formula: L = 0.2126*R + 0.7152*G + 0.0722*B in 8.8 fixed point
/// (weights 54, 183, 19 out of 256), so black maps to 0 and white to 255
/// exactly and the result never depends on float rounding.
pub fn luminance(pixel: Rgba<u8>) -> u8 {
    let [r, g, b, _] = pixel.0;
    let sum = 54 * u32::from(r) + 183 * u32::from(g) + 19 * u32::from(b) + 128;
    (sum >> 8) as u8
}

/// Convert an RGBA image to a grayscale luminance image
///
/// # Arguments
/// * `img` - Input RGBA image
///
/// # Returns
/// Grayscale image with one luminance value per pixel
pub fn grayscale(img: &RgbaImage) -> GrayImage {
    map_pixels(img, |p| Luma([luminance(p)]))
}

/// Apply the 3x3 Prewitt operator and return the gradient magnitude
///
/// Kernels:
/// ```text
/// Gx:            Gy:
/// [-1  0  1]     [-1 -1 -1]
/// [-1  0  1]     [ 0  0  0]
/// [-1  0  1]     [ 1  1  1]
/// ```
///
/// Pixels outside the image are sampled from the nearest edge pixel
/// (clamp-to-edge), so border pixels of a flat image stay at 0.
/// Magnitude is sqrt(Gx² + Gy²), clamped to 255.
pub fn prewitt_edges(img: &GrayImage) -> GrayImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return GrayImage::new(width, height);
    }

    let gradients = prewitt_gradients(img);
    map_pixels(&gradients, |p| Luma([p[0].min(255) as u8]))
}

/// Replace every luminance value `v` with `255 - v`
pub fn invert(img: &GrayImage) -> GrayImage {
    map_pixels(img, |p: Luma<u8>| Luma([u8::MAX - p[0]]))
}

/// Whether a luminance value counts as ink for the given cutoff
///
/// Darker than the cutoff is ink, so dark strokes on a light background
/// become raised dots.
#[inline]
pub fn is_ink(luminance: u8, cutoff: u8) -> bool {
    luminance < cutoff
}
