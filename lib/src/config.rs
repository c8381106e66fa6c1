use std::str::FromStr;

use crate::error::RenderError;

/// Error-diffusion / pattern strategy applied when dithering is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherAlgorithm {
    /// Classic error diffusion: 7/16 right, 3/16 down-left, 5/16 down,
    /// 1/16 down-right.
    #[default]
    FloydSteinberg,
    /// Six neighbors receive error/8 each; the remaining quarter is
    /// dropped, which lightens the result.
    Atkinson,
    /// Uniform random offset per cell, no propagation. Seedable via
    /// [`RenderConfig::noise_seed`].
    Noise,
    /// Positional thresholding against a 4x4 Bayer matrix.
    Ordered,
}

impl FromStr for DitherAlgorithm {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "floyd" => Ok(Self::FloydSteinberg),
            "atkinson" => Ok(Self::Atkinson),
            "noise" => Ok(Self::Noise),
            "ordered" => Ok(Self::Ordered),
            other => Err(RenderError::InvalidConfig(format!(
                "unknown dither algorithm '{other}' (expected floyd, atkinson, noise or ordered)"
            ))),
        }
    }
}

/// Edge rendering mode. Any mode other than `None` supersedes the
/// dithering selection for that render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeMode {
    /// Straight luminance quantization (or dithering, if enabled).
    #[default]
    None,
    /// Threshold the normalized Sobel gradient magnitude; edge cells
    /// quantize to the darkest glyph of the ramp, the rest to the lightest.
    Sobel,
    /// Directional contours: stroke characters chosen by gradient angle,
    /// everything else blank. Output shrinks by one cell on each side.
    Contour,
}

impl FromStr for EdgeMode {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "sobel" => Ok(Self::Sobel),
            "dog" => Ok(Self::Contour),
            other => Err(RenderError::InvalidConfig(format!(
                "unknown edge mode '{other}' (expected none, sobel or dog)"
            ))),
        }
    }
}

/// Glyph ramp selection. Every ramp is ordered darkest (most ink) to
/// lightest, so a black cell renders as the ramp's first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RampKind {
    /// 9-level general purpose ramp (`@%#*+=-:.`).
    Standard,
    /// Shaded block glyphs plus space.
    Blocks,
    /// Just `0` and `1`.
    Binary,
    /// The 16 hex digits.
    Hex,
    /// A single user-supplied character plus space: a two-level ramp.
    Manual(char),
    /// 69-level ramp, the default.
    #[default]
    Detailed,
}

impl FromStr for RampKind {
    type Err = RenderError;

    /// Parses a ramp name. `manual` yields `Manual('0')`; replace the
    /// character afterwards with the user's choice.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "blocks" => Ok(Self::Blocks),
            "binary" => Ok(Self::Binary),
            "hex" => Ok(Self::Hex),
            "manual" => Ok(Self::Manual('0')),
            "detailed" => Ok(Self::Detailed),
            other => Err(RenderError::InvalidConfig(format!(
                "unknown character ramp '{other}' (expected standard, blocks, binary, hex, manual or detailed)"
            ))),
        }
    }
}

/// Immutable settings for one render.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output width in characters (20-300).
    pub width: u32,
    /// Brightness offset added after contrast (-100 to 100).
    pub brightness: f32,
    /// Contrast amount (-100 to 100).
    pub contrast: f32,
    /// Gaussian pre-blur sigma in source pixels (0-10), consumed by the
    /// resampling step, not by the per-cell numerics.
    pub blur: f32,
    /// Master switch for the dithering strategies.
    pub dithering: bool,
    /// Strategy used when `dithering` is set and no edge mode is active.
    pub dither: DitherAlgorithm,
    /// Invert luminance before contrast/brightness.
    pub invert: bool,
    /// Render cells whose pre-dither luminance is exactly 255 as blanks.
    pub ignore_white: bool,
    /// Glyph ramp used for quantization.
    pub ramp: RampKind,
    /// Edge rendering mode; supersedes `dithering` when not `None`.
    pub edge_mode: EdgeMode,
    /// Sobel mode threshold on the normalized gradient magnitude (0-255).
    pub edge_threshold: f32,
    /// Contour mode threshold on the raw gradient magnitude (0-255).
    pub contour_threshold: f32,
    /// Seed for the noise dither; `None` draws from OS entropy, making
    /// those renders nondeterministic.
    pub noise_seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 100,
            brightness: 0.0,
            contrast: 0.0,
            blur: 0.0,
            dithering: true,
            dither: DitherAlgorithm::FloydSteinberg,
            invert: false,
            ignore_white: true,
            ramp: RampKind::Detailed,
            edge_mode: EdgeMode::None,
            edge_threshold: 100.0,
            contour_threshold: 100.0,
            noise_seed: None,
        }
    }
}

impl RenderConfig {
    /// Validates all numeric fields against their documented ranges.
    pub fn validate(&self) -> Result<(), RenderError> {
        if !(20..=300).contains(&self.width) {
            return Err(RenderError::InvalidConfig(format!(
                "width must be between 20 and 300, got {}",
                self.width
            )));
        }
        if !(-100.0..=100.0).contains(&self.brightness) {
            return Err(RenderError::InvalidConfig(format!(
                "brightness must be between -100 and 100, got {}",
                self.brightness
            )));
        }
        if !(-100.0..=100.0).contains(&self.contrast) {
            return Err(RenderError::InvalidConfig(format!(
                "contrast must be between -100 and 100, got {}",
                self.contrast
            )));
        }
        if !(0.0..=10.0).contains(&self.blur) {
            return Err(RenderError::InvalidConfig(format!(
                "blur must be between 0 and 10, got {}",
                self.blur
            )));
        }
        if !(0.0..=255.0).contains(&self.edge_threshold) {
            return Err(RenderError::InvalidConfig(format!(
                "edge threshold must be between 0 and 255, got {}",
                self.edge_threshold
            )));
        }
        if !(0.0..=255.0).contains(&self.contour_threshold) {
            return Err(RenderError::InvalidConfig(format!(
                "contour threshold must be between 0 and 255, got {}",
                self.contour_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_width() {
        let mut config = RenderConfig::default();
        config.width = 19;
        assert!(config.validate().is_err());

        config.width = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_brightness_and_contrast() {
        let mut config = RenderConfig::default();
        config.brightness = -101.0;
        assert!(config.validate().is_err());

        config.brightness = 0.0;
        config.contrast = 100.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_blur_and_thresholds() {
        let mut config = RenderConfig::default();
        config.blur = 11.0;
        assert!(config.validate().is_err());

        config.blur = 0.0;
        config.edge_threshold = 256.0;
        assert!(config.validate().is_err());

        config.edge_threshold = 100.0;
        config.contour_threshold = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dither_names() {
        assert_eq!(
            "floyd".parse::<DitherAlgorithm>().unwrap(),
            DitherAlgorithm::FloydSteinberg
        );
        assert_eq!(
            "atkinson".parse::<DitherAlgorithm>().unwrap(),
            DitherAlgorithm::Atkinson
        );
        assert_eq!("noise".parse::<DitherAlgorithm>().unwrap(), DitherAlgorithm::Noise);
        assert_eq!(
            "ordered".parse::<DitherAlgorithm>().unwrap(),
            DitherAlgorithm::Ordered
        );
        assert!("floyd-steinberg".parse::<DitherAlgorithm>().is_err());
    }

    #[test]
    fn test_edge_mode_names() {
        assert_eq!("none".parse::<EdgeMode>().unwrap(), EdgeMode::None);
        assert_eq!("sobel".parse::<EdgeMode>().unwrap(), EdgeMode::Sobel);
        assert_eq!("dog".parse::<EdgeMode>().unwrap(), EdgeMode::Contour);
        assert!("canny".parse::<EdgeMode>().is_err());
    }

    #[test]
    fn test_ramp_names() {
        assert_eq!("standard".parse::<RampKind>().unwrap(), RampKind::Standard);
        assert_eq!("manual".parse::<RampKind>().unwrap(), RampKind::Manual('0'));
        assert_eq!("detailed".parse::<RampKind>().unwrap(), RampKind::Detailed);
        assert!("ansi".parse::<RampKind>().is_err());
    }
}
