use crate::error::{BrailleError, Result};

/// Width of one Braille glyph cell in pixels
pub const CELL_WIDTH: u32 = 2;
/// Height of one Braille glyph cell in pixels
pub const CELL_HEIGHT: u32 = 4;

/// Valid threshold percentages
pub const THRESHOLD_RANGE: std::ops::RangeInclusive<u8> = 1..=99;

/// Options for one Braille conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrailleConfig {
    /// Threshold percentage, 1-99, default 50
    pub threshold: u8,
    /// Run the Prewitt edge operator before thresholding, default false
    pub detect_edges: bool,
    /// Invert luminance before thresholding, default false
    pub invert_colors: bool,

    /// Output bitmap size in pixels, default 60x64 (the Twitch preset)
    pub target_width: u32,  // multiple of 2
    pub target_height: u32, // multiple of 4
}

impl Default for BrailleConfig {
    fn default() -> Self {
        Self {
            threshold: 50,
            detect_edges: false,
            invert_colors: false,

            // Twitch preset
            target_width: 60,
            target_height: 64,
        }
    }
}

impl BrailleConfig {
    /// Build a config sized for a crop of `crop_width`x`crop_height` under `preset`
    ///
    /// Threshold and flags keep their defaults.
    pub fn for_region(preset: Preset, crop_width: u32, crop_height: u32) -> Self {
        let (target_width, target_height) = preset.target_dimensions(crop_width, crop_height);
        Self {
            target_width,
            target_height,
            ..Default::default()
        }
    }

    /// Validates the configuration parameters
    ///
    /// Nothing is rounded here: a target size that is not a multiple of the
    /// glyph cell is rejected and must be fixed by the caller.
    pub fn validate(&self) -> Result<()> {
        if !THRESHOLD_RANGE.contains(&self.threshold) {
            return Err(BrailleError::OptionRange {
                threshold: self.threshold,
            });
        }
        let width_ok = self.target_width > 0 && self.target_width.is_multiple_of(CELL_WIDTH);
        let height_ok = self.target_height > 0 && self.target_height.is_multiple_of(CELL_HEIGHT);
        if !width_ok || !height_ok {
            return Err(BrailleError::Dimension {
                width: self.target_width,
                height: self.target_height,
            });
        }
        Ok(())
    }

    /// The 8-bit luminance cutoff for this config's threshold
    pub fn cutoff(&self) -> u8 {
        cutoff(self.threshold)
    }

    /// Number of glyph columns and rows the output grid will have
    pub fn grid_size(&self) -> (u32, u32) {
        (
            self.target_width / CELL_WIDTH,
            self.target_height / CELL_HEIGHT,
        )
    }
}

/// Output size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// 30 characters wide, at most 500 characters: 60x64 pixels
    #[default]
    Twitch,
    /// Same width, at most 200 characters: 60x24 pixels
    YouTube,
    /// Derived from the crop size
    Custom,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Twitch, Preset::YouTube, Preset::Custom];

    /// Fixed pixel size of the preset, `None` for `Custom`
    pub fn dimensions(self) -> Option<(u32, u32)> {
        match self {
            Preset::Twitch => Some((60, 64)),
            Preset::YouTube => Some((60, 24)),
            Preset::Custom => None,
        }
    }

    /// Width over height of the preset, `None` for `Custom` (free aspect)
    pub fn aspect_ratio(self) -> Option<f32> {
        self.dimensions().map(|(w, h)| w as f32 / h as f32)
    }

    /// Target bitmap size for a crop of the given size
    ///
    /// Fixed presets ignore the crop. `Custom` rounds the crop down to the
    /// nearest multiples of the glyph cell, which can yield zero for tiny crops.
    pub fn target_dimensions(self, crop_width: u32, crop_height: u32) -> (u32, u32) {
        self.dimensions().unwrap_or_else(|| {
            (
                round_down(crop_width, CELL_WIDTH),
                round_down(crop_height, CELL_HEIGHT),
            )
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::Twitch => "Twitch (60x64)",
            Preset::YouTube => "YouTube (60x24)",
            Preset::Custom => "Custom",
        }
    }
}

/// Convert a threshold percentage into an 8-bit cutoff: floor(threshold * 255 / 100)
pub fn cutoff(threshold: u8) -> u8 {
    (u32::from(threshold) * 255 / 100).min(255) as u8
}

/// Round `side` down to the nearest multiple of `to`
pub fn round_down(side: u32, to: u32) -> u32 {
    side - side % to
}
