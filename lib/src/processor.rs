use image::{RgbaImage, imageops};
use imageproc::filter::gaussian_blur_f32;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::ascii::AsciiArt;
use crate::config::{DitherAlgorithm, EdgeMode, RenderConfig};
use crate::dither;
use crate::edges;
use crate::error::RenderError;
use crate::filters::{grayscale_grid, tone_map_grid};
use crate::lut::{glyph_rows, resolve_ramp};

/// Character cell aspect compensation: monospaced glyphs are taller than
/// wide, so the row count is squashed by this factor to keep the picture's
/// proportions.
const FONT_ASPECT: f32 = 0.55;

/// Derived output grid size for a source image and a configured width.
///
/// Height is never configured directly:
/// `H = round(source_h / source_w * width * 0.55)`.
pub fn output_dimensions(source_width: u32, source_height: u32, width: u32) -> (u32, u32) {
    let height =
        (source_height as f32 / source_width as f32 * width as f32 * FONT_ASPECT).round() as u32;
    (width, height)
}

/// Downscales (and optionally pre-blurs) the source to one sample per
/// character cell.
fn sample_grid(source: &RgbaImage, width: u32, height: u32, blur: f32) -> RgbaImage {
    let blurred;
    let input = if blur > 0.0 {
        blurred = gaussian_blur_f32(source, blur);
        &blurred
    } else {
        source
    };
    imageops::resize(input, width, height, imageops::FilterType::Lanczos3)
}

/// Converts a source image to ASCII art.
///
/// The source is resampled to the derived character-grid size first
/// (Gaussian pre-blur when configured, then a Lanczos3 resize). Hosts that
/// run their own rasterizer can call [`process_samples`] with an
/// exact-size grid instead.
///
/// # Errors
/// [`RenderError::InvalidConfig`] for out-of-range settings,
/// [`RenderError::EmptyInput`] when the source or the derived grid has no
/// cells.
pub fn process_image(source: &RgbaImage, config: &RenderConfig) -> Result<AsciiArt, RenderError> {
    config.validate()?;

    let (source_width, source_height) = source.dimensions();
    if source_width == 0 || source_height == 0 {
        return Err(RenderError::EmptyInput);
    }

    let (width, height) = output_dimensions(source_width, source_height, config.width);
    if height == 0 {
        return Err(RenderError::EmptyInput);
    }

    debug!("resampling {source_width}x{source_height} -> {width}x{height} (blur {})", config.blur);
    let samples = sample_grid(source, width, height, config.blur);
    process_samples(&samples, config)
}

/// Converts an already-resampled grid (one pixel per character cell) to
/// ASCII art.
///
/// Dispatch, decided once per render: the contour edge mode runs alone;
/// otherwise the Sobel edge mode supersedes dithering; otherwise the
/// selected dither algorithm runs if enabled; otherwise each cell is
/// quantized directly.
pub fn process_samples(samples: &RgbaImage, config: &RenderConfig) -> Result<AsciiArt, RenderError> {
    config.validate()?;

    let (width, height) = samples.dimensions();
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyInput);
    }

    // Contour mode draws stroke characters from its own grayscale and
    // ignores the ramp, dithering and ignore-white entirely. Its output
    // loses the 1-cell border, so grids without an interior are rejected.
    if config.edge_mode == EdgeMode::Contour {
        if width < 3 || height < 3 {
            return Err(RenderError::EmptyInput);
        }
        debug!("contour render: {width}x{height} cells, threshold {}", config.contour_threshold);
        let gray = grayscale_grid(samples, config.invert);
        return Ok(AsciiArt::new(edges::contour_rows(&gray, config.contour_threshold)));
    }

    let ramp = resolve_ramp(config.ramp);
    let original = tone_map_grid(samples, config);
    let mut working = original.clone();

    let rows = if config.edge_mode == EdgeMode::Sobel {
        debug!("sobel render: {width}x{height} cells, threshold {}", config.edge_threshold);
        let map = edges::edge_map(&working, config.edge_threshold);
        glyph_rows(&map, &original, &ramp, config.ignore_white)
    } else if config.dithering {
        debug!("dither render: {width}x{height} cells, {:?}", config.dither);
        match config.dither {
            DitherAlgorithm::FloydSteinberg => {
                dither::floyd_steinberg(&mut working, &original, &ramp, config.ignore_white)
            }
            DitherAlgorithm::Atkinson => {
                dither::atkinson(&mut working, &original, &ramp, config.ignore_white)
            }
            DitherAlgorithm::Noise => {
                let mut rng = match config.noise_seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                dither::noise(&working, &original, &ramp, config.ignore_white, &mut rng)
            }
            DitherAlgorithm::Ordered => {
                dither::ordered(&working, &original, &ramp, config.ignore_white)
            }
        }
    } else {
        debug!("plain render: {width}x{height} cells");
        glyph_rows(&working, &original, &ramp, config.ignore_white)
    };

    Ok(AsciiArt::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RampKind;
    use image::Rgba;

    fn flat_image(width: u32, height: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([value, value, value, 255]))
    }

    fn plain_config(ramp: RampKind) -> RenderConfig {
        RenderConfig {
            dithering: false,
            ramp,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_output_dimensions_derivation() {
        // H = round(source_h / source_w * W * 0.55)
        assert_eq!(output_dimensions(100, 100, 100), (100, 55));
        assert_eq!(output_dimensions(64, 48, 100), (100, 41));
        assert_eq!(output_dimensions(1920, 1080, 120), (120, 37));
    }

    #[test]
    fn test_mid_gray_grid_quantizes_uniformly() {
        // 4x4 field of 128 on the 9-level ramp: every cell lands on
        // round(128/255 * 8) = 4, the '+' glyph.
        let samples = flat_image(4, 4, 128);
        let config = plain_config(RampKind::Standard);

        let art = process_samples(&samples, &config).unwrap();
        assert_eq!(art.rows(), ["++++", "++++", "++++", "++++"]);
    }

    #[test]
    fn test_black_corner_on_white_field_ignore_white() {
        // White cells bypass on their original luminance; the black corner
        // has zero quantization error, so nothing bleeds.
        let mut samples = flat_image(4, 4, 255);
        samples.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        let config = RenderConfig {
            ramp: RampKind::Standard,
            ..RenderConfig::default()
        };
        assert!(config.dithering);

        let art = process_samples(&samples, &config).unwrap();
        assert_eq!(art.rows(), ["@   ", "    ", "    ", "    "]);
    }

    #[test]
    fn test_ignore_white_disabled_renders_white() {
        let samples = flat_image(3, 3, 255);
        let mut config = plain_config(RampKind::Standard);
        config.ignore_white = false;

        let art = process_samples(&samples, &config).unwrap();
        assert_eq!(art.rows(), ["...", "...", "..."]);
    }

    #[test]
    fn test_row_counts_per_mode() {
        let samples = flat_image(20, 10, 128);

        let mut config = plain_config(RampKind::Standard);
        let art = process_samples(&samples, &config).unwrap();
        assert_eq!(art.height(), 10);
        assert_eq!(art.width(), 20);

        config.edge_mode = EdgeMode::Sobel;
        let art = process_samples(&samples, &config).unwrap();
        assert_eq!(art.height(), 10);
        assert_eq!(art.width(), 20);

        // Contour drops the 1-cell border on every side.
        config.edge_mode = EdgeMode::Contour;
        let art = process_samples(&samples, &config).unwrap();
        assert_eq!(art.height(), 8);
        assert_eq!(art.width(), 18);
    }

    #[test]
    fn test_sobel_flat_field_is_all_lightest() {
        let samples = flat_image(5, 5, 128);
        let mut config = plain_config(RampKind::Standard);
        config.edge_mode = EdgeMode::Sobel;
        config.edge_threshold = 10.0;

        let art = process_samples(&samples, &config).unwrap();
        for row in art.rows() {
            assert_eq!(row, ".....");
        }
    }

    #[test]
    fn test_sobel_supersedes_dithering() {
        let samples = flat_image(5, 5, 128);
        let mut config = RenderConfig {
            ramp: RampKind::Standard,
            edge_mode: EdgeMode::Sobel,
            edge_threshold: 10.0,
            ..RenderConfig::default()
        };
        config.dithering = true;

        // The edge mode wins: every non-edge cell maps to the lightest
        // glyph instead of going through the dither path.
        let art = process_samples(&samples, &config).unwrap();
        for row in art.rows() {
            assert_eq!(row, ".....");
        }
    }

    #[test]
    fn test_ordered_render_is_reproducible() {
        let samples = flat_image(8, 8, 128);
        let config = RenderConfig {
            dither: DitherAlgorithm::Ordered,
            ramp: RampKind::Standard,
            ..RenderConfig::default()
        };

        let a = process_samples(&samples, &config).unwrap();
        let b = process_samples(&samples, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_noise_render_respects_seed() {
        let samples = flat_image(12, 12, 143);
        let mut config = RenderConfig {
            dither: DitherAlgorithm::Noise,
            ramp: RampKind::Standard,
            noise_seed: Some(42),
            ..RenderConfig::default()
        };

        let a = process_samples(&samples, &config).unwrap();
        let b = process_samples(&samples, &config).unwrap();
        assert_eq!(a, b);

        config.noise_seed = Some(43);
        let c = process_samples(&samples, &config).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_manual_ramp_two_levels() {
        let mut samples = flat_image(2, 1, 30);
        samples.put_pixel(1, 0, Rgba([220, 220, 220, 255]));
        let config = plain_config(RampKind::Manual('#'));

        let art = process_samples(&samples, &config).unwrap();
        assert_eq!(art.rows(), ["# "]);
    }

    #[test]
    fn test_empty_samples_rejected() {
        let samples = RgbaImage::new(0, 0);
        let config = RenderConfig::default();
        assert!(matches!(
            process_samples(&samples, &config),
            Err(RenderError::EmptyInput)
        ));
    }

    #[test]
    fn test_invalid_config_rejected_before_work() {
        let samples = flat_image(4, 4, 128);
        let mut config = RenderConfig::default();
        config.width = 5;
        assert!(matches!(
            process_samples(&samples, &config),
            Err(RenderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_contour_needs_an_interior() {
        let samples = flat_image(2, 2, 128);
        let mut config = RenderConfig::default();
        config.edge_mode = EdgeMode::Contour;
        assert!(matches!(
            process_samples(&samples, &config),
            Err(RenderError::EmptyInput)
        ));
    }

    #[test]
    fn test_process_image_derives_height() {
        let source = flat_image(200, 100, 128);
        let mut config = plain_config(RampKind::Standard);
        config.width = 40;

        let art = process_image(&source, &config).unwrap();
        // round(100/200 * 40 * 0.55) = 11
        assert_eq!(art.height(), 11);
        assert_eq!(art.width(), 40);
    }

    #[test]
    fn test_process_image_rejects_degenerate_height() {
        // A source so wide the derived height rounds to zero.
        let source = flat_image(1000, 1, 128);
        let mut config = RenderConfig::default();
        config.width = 20;
        assert!(matches!(
            process_image(&source, &config),
            Err(RenderError::EmptyInput)
        ));
    }

    #[test]
    fn test_process_image_with_blur_keeps_dimensions() {
        let source = flat_image(100, 100, 128);
        let mut config = plain_config(RampKind::Standard);
        config.width = 30;
        config.blur = 2.0;

        let art = process_image(&source, &config).unwrap();
        assert_eq!(art.width(), 30);
        assert_eq!(art.height(), 17); // round(30 * 0.55)
    }
}
