//! Braille Renderer - image region to Unicode Braille art converter
//!
//! Each output character is a Braille pattern (U+2800..=U+28FF) covering a
//! 2x4 block of pixels, giving eight times the resolution of one-glyph-per-pixel
//! ASCII art at the same character count.
//!
//! # Example
//! ```no_run
//! use braille_rendr::{BrailleConfig, CropRect, Preset, process_region};
//!
//! let input = image::open("photo.jpg").unwrap().to_rgba8();
//! let (width, height) = input.dimensions();
//! let config = BrailleConfig::for_region(Preset::Twitch, width, height);
//! let grid = process_region(&input, CropRect::full(width, height), &config).unwrap();
//! println!("{grid}");
//! ```

pub mod bitmap;
pub mod braille;
pub mod buffer;
pub mod config;
pub mod error;
pub mod filters;
pub mod processor;

// Re-export main types for convenience
pub use bitmap::BinaryBitmap;
pub use braille::{GlyphGrid, encode};
pub use buffer::{CropRect, PixelBuffer};
pub use config::{BrailleConfig, Preset};
pub use error::{BrailleError, Result};
pub use processor::{preprocess, process_buffer, process_region, render_batch};
