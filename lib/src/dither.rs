//! Error-diffusion and pattern dithering strategies.
//!
//! All four strategies walk the working luminance grid in raster order
//! (row-major, left to right, top to bottom) and emit one glyph per cell.
//! Floyd-Steinberg and Atkinson push quantization error into cells that
//! have not been visited yet, so they must not be parallelized across rows.
//! Noise perturbs each cell independently; ordered dithering thresholds
//! against a fixed Bayer pattern and is purely positional.
//!
//! Cells whose original (pre-dither) luminance is exactly 255 are emitted
//! as blanks when ignore-white is on. A bypassed cell never quantizes, so
//! it never contributes error to its neighbors.

use rand::Rng;

use crate::filters::LuminanceGrid;
use crate::lut;

/// 4x4 Bayer threshold matrix.
pub const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Floyd-Steinberg error diffusion.
///
/// Per cell: quantize, emit the glyph, then spread the rounding error to
/// the right (7/16), bottom-left (3/16), bottom (5/16) and bottom-right
/// (1/16). Neighbors outside the grid are skipped; there is no wraparound.
pub fn floyd_steinberg(
    working: &mut LuminanceGrid,
    original: &LuminanceGrid,
    ramp: &[char],
    ignore_white: bool,
) -> Vec<String> {
    let (width, height) = (working.width(), working.height());
    let levels = ramp.len();
    let mut rows = Vec::with_capacity(height);

    for y in 0..height {
        let mut line = String::with_capacity(width);
        for x in 0..width {
            if ignore_white && original.get(x, y) == 255.0 {
                line.push(' ');
                continue;
            }

            let value = working.get(x, y);
            let level = lut::quantize(value, levels);
            line.push(ramp[level]);

            let new_pixel = level as f32 / (levels - 1) as f32 * 255.0;
            let error = value - new_pixel;

            if x + 1 < width {
                working.deposit(x + 1, y, error * (7.0 / 16.0));
            }
            if y + 1 < height {
                if x > 0 {
                    working.deposit(x - 1, y + 1, error * (3.0 / 16.0));
                }
                working.deposit(x, y + 1, error * (5.0 / 16.0));
                if x + 1 < width {
                    working.deposit(x + 1, y + 1, error * (1.0 / 16.0));
                }
            }
        }
        rows.push(line);
    }

    rows
}

/// Atkinson error diffusion.
///
/// Six neighbors (right, right+1, bottom-left, bottom, bottom-right, and
/// two rows down in the same column) receive error/8 each. Only 6/8 of the
/// error propagates; the dropped quarter gives the characteristic lighter
/// look.
pub fn atkinson(
    working: &mut LuminanceGrid,
    original: &LuminanceGrid,
    ramp: &[char],
    ignore_white: bool,
) -> Vec<String> {
    let (width, height) = (working.width(), working.height());
    let levels = ramp.len();
    let mut rows = Vec::with_capacity(height);

    for y in 0..height {
        let mut line = String::with_capacity(width);
        for x in 0..width {
            if ignore_white && original.get(x, y) == 255.0 {
                line.push(' ');
                continue;
            }

            let value = working.get(x, y);
            let level = lut::quantize(value, levels);
            line.push(ramp[level]);

            let new_pixel = level as f32 / (levels - 1) as f32 * 255.0;
            let diffusion = (value - new_pixel) / 8.0;

            if x + 1 < width {
                working.deposit(x + 1, y, diffusion);
            }
            if x + 2 < width {
                working.deposit(x + 2, y, diffusion);
            }
            if y + 1 < height {
                if x > 0 {
                    working.deposit(x - 1, y + 1, diffusion);
                }
                working.deposit(x, y + 1, diffusion);
                if x + 1 < width {
                    working.deposit(x + 1, y + 1, diffusion);
                }
            }
            if y + 2 < height {
                working.deposit(x, y + 2, diffusion);
            }
        }
        rows.push(line);
    }

    rows
}

/// Random-offset dithering.
///
/// Each cell is perturbed by uniform noise spanning one quantization step,
/// `±(255/N)/2`, then quantized. No error propagation. Determinism is
/// entirely up to the injected generator.
pub fn noise<R: Rng>(
    working: &LuminanceGrid,
    original: &LuminanceGrid,
    ramp: &[char],
    ignore_white: bool,
    rng: &mut R,
) -> Vec<String> {
    let (width, height) = (working.width(), working.height());
    let levels = ramp.len();
    let amplitude = 255.0 / levels as f32;
    let mut rows = Vec::with_capacity(height);

    for y in 0..height {
        let mut line = String::with_capacity(width);
        for x in 0..width {
            if ignore_white && original.get(x, y) == 255.0 {
                line.push(' ');
                continue;
            }

            let jitter = (rng.r#gen::<f32>() - 0.5) * amplitude;
            let noisy = (working.get(x, y) + jitter).clamp(0.0, 255.0);
            line.push(ramp[lut::quantize(noisy, levels)]);
        }
        rows.push(line);
    }

    rows
}

/// Ordered dithering against the 4x4 Bayer matrix.
///
/// `v = clamp(value/255 + (bayer[y%4][x%4] + 0.5)/16 - 0.5, 0, 1)`,
/// `index = floor(v * N)` clamped to the ramp. Purely positional, so
/// identical input and config always produce identical output.
pub fn ordered(
    working: &LuminanceGrid,
    original: &LuminanceGrid,
    ramp: &[char],
    ignore_white: bool,
) -> Vec<String> {
    let (width, height) = (working.width(), working.height());
    let levels = ramp.len();
    let mut rows = Vec::with_capacity(height);

    for y in 0..height {
        let mut line = String::with_capacity(width);
        for x in 0..width {
            if ignore_white && original.get(x, y) == 255.0 {
                line.push(' ');
                continue;
            }

            let p = working.get(x, y) / 255.0;
            let t = (BAYER_4X4[y % 4][x % 4] as f32 + 0.5) / 16.0;
            let v = (p + t - 0.5).clamp(0.0, 1.0);
            let level = ((v * levels as f32).floor() as usize).min(levels - 1);
            line.push(ramp[level]);
        }
        rows.push(line);
    }

    rows
}
