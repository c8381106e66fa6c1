use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::config::RenderConfig;

/// Render-scoped grid of luminance values in [0, 255].
///
/// One render keeps two copies: an original (post tone-mapping, never
/// mutated) that drives the ignore-white decision, and a working copy the
/// error-diffusion strategies mutate in place. Deposited values are always
/// clamped back into [0, 255].
#[derive(Debug, Clone, PartialEq)]
pub struct LuminanceGrid {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl LuminanceGrid {
    /// Wraps a row-major value buffer of exactly `width * height` cells.
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Self {
        assert_eq!(data.len(), width * height);
        Self { width, height, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Adds `delta` to a cell, clamping the result into [0, 255].
    #[inline]
    pub fn deposit(&mut self, x: usize, y: usize, delta: f32) {
        let idx = y * self.width + x;
        self.data[idx] = (self.data[idx] + delta).clamp(0.0, 255.0);
    }
}

/// BT.601 luminance of one RGBA sample.
///
/// `L = 0.299R + 0.587G + 0.114B`. The weights sum to exactly 1, so a
/// uniform gray sample keeps its channel value and pure white lands on
/// exactly 255.0 (the ignore-white rule compares against that).
#[inline]
pub fn luminance(pixel: &Rgba<u8>) -> f32 {
    0.299 * pixel[0] as f32 + 0.587 * pixel[1] as f32 + 0.114 * pixel[2] as f32
}

/// Contrast remapping factor for a slider value in [-100, 100].
///
/// `factor = 259(c + 255) / (255(259 - c))`. The division is singular only
/// at c = 259, outside the validated range.
#[inline]
pub fn contrast_factor(contrast: f32) -> f32 {
    (259.0 * (contrast + 255.0)) / (255.0 * (259.0 - contrast))
}

/// Tone-maps one sample: luminance, optional inversion, then contrast and
/// brightness, clamped into [0, 255].
#[inline]
pub fn tone_map(pixel: &Rgba<u8>, factor: f32, brightness: f32, invert: bool) -> f32 {
    let mut lum = luminance(pixel);
    if invert {
        lum = 255.0 - lum;
    }
    (factor * (lum - 128.0) + 128.0 + brightness).clamp(0.0, 255.0)
}

/// Tone-maps a full sample grid into a fresh [`LuminanceGrid`].
pub fn tone_map_grid(samples: &RgbaImage, config: &RenderConfig) -> LuminanceGrid {
    let (width, height) = samples.dimensions();
    let factor = contrast_factor(config.contrast);

    // Per-cell work with no cross-cell dependency; parallelize freely.
    let data: Vec<f32> = (0..(width * height) as usize)
        .into_par_iter()
        .map(|idx| {
            let x = idx as u32 % width;
            let y = idx as u32 / width;
            tone_map(samples.get_pixel(x, y), factor, config.brightness, config.invert)
        })
        .collect();

    LuminanceGrid::new(width as usize, height as usize, data)
}

/// Plain grayscale with optional inversion only.
///
/// The contour edge mode samples this instead of the adjusted luminance;
/// contrast and brightness are intentionally not applied on that path.
pub fn grayscale_grid(samples: &RgbaImage, invert: bool) -> LuminanceGrid {
    let (width, height) = samples.dimensions();

    let data: Vec<f32> = (0..(width * height) as usize)
        .into_par_iter()
        .map(|idx| {
            let x = idx as u32 % width;
            let y = idx as u32 / width;
            let lum = luminance(samples.get_pixel(x, y));
            if invert { 255.0 - lum } else { lum }
        })
        .collect();

    LuminanceGrid::new(width as usize, height as usize, data)
}
