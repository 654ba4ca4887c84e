use crate::bitmap::BinaryBitmap;
use crate::braille::{GlyphGrid, encode};
use crate::buffer::{CropRect, PixelBuffer};
use crate::config::BrailleConfig;
use crate::error::{BrailleError, Result};
use crate::filters::{grayscale, invert, prewitt_edges};
use image::RgbaImage;
use log::{debug, trace};
use rayon::prelude::*;

/// Turns a cropped pixel buffer into a binary bitmap of the configured size
///
/// Stages, in order:
/// 1. Grayscale conversion
/// 2. Prewitt edge magnitude (if `detect_edges`)
/// 3. Luminance inversion (if `invert_colors`)
/// 4. Threshold at floor(threshold * 255 / 100), darker pixels become ink
/// 5. Nearest-neighbor resample to `target_width` x `target_height`
///
/// # Errors
/// Everything is checked before the first stage runs:
/// * [`BrailleError::OptionRange`] - threshold outside 1..=99
/// * [`BrailleError::Dimension`] - target size not a positive multiple of 2x4
/// * [`BrailleError::BufferSize`] - data length does not match width*height*4
/// * [`BrailleError::EmptyRegion`] - buffer has no pixels
pub fn preprocess(buffer: &PixelBuffer, config: &BrailleConfig) -> Result<BinaryBitmap> {
    config.validate()?;
    buffer.validate()?;
    if buffer.is_empty() {
        return Err(BrailleError::EmptyRegion {
            width: buffer.width,
            height: buffer.height,
        });
    }

    debug!(
        "Preprocessing {}x{} buffer: {:?}",
        buffer.width, buffer.height, config
    );

    let rgba = buffer.to_image()?;

    // Step 1: grayscale
    let mut lum = grayscale(&rgba);
    trace!("grayscale done");

    // Step 2: edges
    if config.detect_edges {
        lum = prewitt_edges(&lum);
        trace!("edge detection done");
    }

    // Step 3: inversion
    if config.invert_colors {
        lum = invert(&lum);
        trace!("inversion done");
    }

    // Step 4: threshold
    let cutoff = config.cutoff();
    let bitmap = BinaryBitmap::threshold(&lum, cutoff);
    trace!("threshold at {} gave {} ink pixels", cutoff, bitmap.ink_count());

    // Step 5: scale to the requested glyph-aligned size
    let scaled = bitmap.resample(config.target_width, config.target_height);
    debug!(
        "Bitmap resampled to {}x{}",
        scaled.width(),
        scaled.height()
    );

    Ok(scaled)
}

/// Preprocesses a buffer and encodes the result as Braille glyphs
///
/// The grid has `target_height / 4` rows of `target_width / 2` characters.
pub fn process_buffer(buffer: &PixelBuffer, config: &BrailleConfig) -> Result<GlyphGrid> {
    let bitmap = preprocess(buffer, config)?;
    Ok(encode(&bitmap))
}

/// Crops `rect` out of `image` and converts it to Braille glyphs
///
/// The source image is not modified.
pub fn process_region(
    image: &RgbaImage,
    rect: CropRect,
    config: &BrailleConfig,
) -> Result<GlyphGrid> {
    let buffer = PixelBuffer::from_region(image, rect)?;
    process_buffer(&buffer, config)
}

/// Converts independent (buffer, config) pairs in parallel
///
/// Each job runs the same single-threaded conversion as [`process_buffer`];
/// results come back in input order and one failing job does not affect
/// the others.
pub fn render_batch(jobs: &[(PixelBuffer, BrailleConfig)]) -> Vec<Result<GlyphGrid>> {
    jobs.par_iter()
        .map(|(buffer, config)| process_buffer(buffer, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use image::Rgba;

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn config(width: u32, height: u32) -> BrailleConfig {
        BrailleConfig {
            target_width: width,
            target_height: height,
            ..Default::default()
        }
    }

    /// Horizontal gradient from black on the left to white on the right
    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let img = RgbaImage::from_fn(width, height, |x, _| {
            let v = (x * 255 / (width - 1)) as u8;
            Rgba([v, v, v, 255])
        });
        img.into()
    }

    #[test]
    fn test_all_black_is_full_cell() {
        let buffer = PixelBuffer::from_pixel(2, 4, BLACK);
        let grid = process_buffer(&buffer, &config(2, 4)).unwrap();
        assert_eq!(grid.to_string(), "\u{28FF}");
    }

    #[test]
    fn test_all_white_is_blank_cell() {
        let buffer = PixelBuffer::from_pixel(2, 4, WHITE);
        let grid = process_buffer(&buffer, &config(2, 4)).unwrap();
        assert_eq!(grid.to_string(), "\u{2800}");
    }

    #[test]
    fn test_grid_dimensions_match_target() {
        let buffer = gradient(37, 23);
        for (w, h) in [(60, 64), (60, 24), (2, 4), (10, 8)] {
            let grid = process_buffer(&buffer, &config(w, h)).unwrap();
            assert_eq!(grid.height(), (h / 4) as usize);
            assert!(grid.rows().iter().all(|row| row.len() == (w / 2) as usize));
        }
    }

    #[test]
    fn test_preprocess_output_size() {
        let buffer = gradient(100, 100);
        let bitmap = preprocess(&buffer, &config(60, 24)).unwrap();
        assert_eq!(bitmap.dimensions(), (60, 24));
    }

    #[test]
    fn test_threshold_monotonicity() {
        let buffer = gradient(64, 8);
        let mut last = 0;
        for threshold in 1..=99 {
            let opts = BrailleConfig {
                threshold,
                ..config(64, 8)
            };
            let ink = preprocess(&buffer, &opts).unwrap().ink_count();
            assert!(ink >= last, "threshold {threshold}: {ink} < {last}");
            last = ink;
        }
        assert!(last > 0);
    }

    #[test]
    fn test_gradient_ink_on_dark_side() {
        let buffer = gradient(64, 8);
        let bitmap = preprocess(&buffer, &config(64, 8)).unwrap();
        assert!(bitmap.get(0, 0));
        assert!(!bitmap.get(63, 0));
    }

    #[test]
    fn test_inversion_complements_classification() {
        let buffer = gradient(64, 8);
        let plain = preprocess(&buffer, &config(64, 8)).unwrap();
        let inverted = preprocess(
            &buffer,
            &BrailleConfig {
                invert_colors: true,
                ..config(64, 8)
            },
        )
        .unwrap();

        // black becomes background, white becomes ink
        assert!(plain.get(0, 0) && !inverted.get(0, 0));
        assert!(!plain.get(63, 0) && inverted.get(63, 0));
    }

    #[test]
    fn test_double_inversion_restores_luminance() {
        let buffer = gradient(64, 8);
        let lum = grayscale(&buffer.to_image().unwrap());
        assert_eq!(invert(&invert(&lum)), lum);
    }

    #[test]
    fn test_edges_on_flat_image() {
        // flat image: no edges, edge magnitude 0 everywhere, all below cutoff
        let buffer = PixelBuffer::from_pixel(8, 8, WHITE);
        let opts = BrailleConfig {
            detect_edges: true,
            ..config(8, 8)
        };
        let bitmap = preprocess(&buffer, &opts).unwrap();
        assert_eq!(bitmap.ink_count(), 64);

        let opts = BrailleConfig {
            invert_colors: true,
            ..opts
        };
        assert_eq!(preprocess(&buffer, &opts).unwrap().ink_count(), 0);
    }

    #[test]
    fn test_edges_mark_boundary() {
        let img = RgbaImage::from_fn(8, 8, |x, _| {
            if x < 4 {
                Rgba(BLACK)
            } else {
                Rgba(WHITE)
            }
        });
        let opts = BrailleConfig {
            detect_edges: true,
            invert_colors: true,
            ..config(8, 8)
        };
        let bitmap = preprocess(&img.into(), &opts).unwrap();
        assert!(bitmap.get(3, 4));
        assert!(bitmap.get(4, 4));
        assert!(!bitmap.get(0, 4));
        assert!(!bitmap.get(7, 4));
    }

    #[test]
    fn test_odd_target_width_is_rejected() {
        let buffer = PixelBuffer::from_pixel(4, 4, BLACK);
        let err = preprocess(&buffer, &config(61, 64)).unwrap_err();
        assert_eq!(
            err,
            BrailleError::Dimension {
                width: 61,
                height: 64
            }
        );
    }

    #[test]
    fn test_threshold_out_of_range() {
        let buffer = PixelBuffer::from_pixel(4, 4, BLACK);
        for threshold in [0, 100] {
            let opts = BrailleConfig {
                threshold,
                ..config(2, 4)
            };
            assert_eq!(
                preprocess(&buffer, &opts),
                Err(BrailleError::OptionRange { threshold })
            );
        }
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let buffer = PixelBuffer {
            width: 2,
            height: 4,
            data: vec![0; 30],
        };
        assert!(matches!(
            preprocess(&buffer, &config(2, 4)),
            Err(BrailleError::BufferSize {
                expected: 32,
                actual: 30,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = PixelBuffer::from_pixel(0, 4, BLACK);
        assert!(matches!(
            preprocess(&buffer, &config(2, 4)),
            Err(BrailleError::EmptyRegion { .. })
        ));
    }

    #[test]
    fn test_process_region_leaves_source_untouched() {
        let img = RgbaImage::from_fn(20, 20, |x, y| {
            if x >= 10 && y >= 10 {
                Rgba(BLACK)
            } else {
                Rgba(WHITE)
            }
        });
        let before = img.clone();

        let grid = process_region(&img, CropRect::new(10, 10, 10, 10), &config(2, 4)).unwrap();
        assert_eq!(grid.to_string(), "\u{28FF}");

        let grid = process_region(&img, CropRect::new(0, 0, 10, 10), &config(2, 4)).unwrap();
        assert_eq!(grid.to_string(), "\u{2800}");
        assert_eq!(img, before);
    }

    #[test]
    fn test_process_region_custom_preset() {
        let img = RgbaImage::from_pixel(41, 23, Rgba(BLACK));
        let opts = BrailleConfig::for_region(Preset::Custom, 41, 23);
        let grid = process_region(&img, CropRect::full(41, 23), &opts).unwrap();
        assert_eq!((grid.width(), grid.height()), (20, 5));
    }

    #[test]
    fn test_render_batch_preserves_order() {
        let jobs = vec![
            (PixelBuffer::from_pixel(2, 4, BLACK), config(2, 4)),
            (PixelBuffer::from_pixel(2, 4, WHITE), config(2, 4)),
            (PixelBuffer::from_pixel(2, 4, WHITE), config(3, 4)),
        ];
        let results = render_batch(&jobs);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().to_string(), "\u{28FF}");
        assert_eq!(results[1].as_ref().unwrap().to_string(), "\u{2800}");
        assert!(matches!(results[2], Err(BrailleError::Dimension { .. })));
    }
}
