//! Sobel edge detection: gradient-magnitude maps and directional contours.

use rayon::prelude::*;

use crate::filters::LuminanceGrid;

/// Value carried by cells with no edge; quantizes to the lightest glyph.
const NO_EDGE: f32 = 255.0;

/// Maximum achievable Sobel magnitude for 8-bit inputs (sqrt(2) * 4 * 255).
const MAX_MAGNITUDE: f32 = 1442.0;

/// Sobel gradients at an interior cell.
///
/// Gx detects horizontal intensity change, Gy vertical:
/// ```text
/// Gx = [-1  0  1]    Gy = [-1 -2 -1]
///      [-2  0  2]         [ 0  0  0]
///      [-1  0  1]         [ 1  2  1]
/// ```
#[inline]
fn sobel_at(lum: &LuminanceGrid, x: usize, y: usize) -> (f32, f32) {
    let nw = lum.get(x - 1, y - 1);
    let n = lum.get(x, y - 1);
    let ne = lum.get(x + 1, y - 1);
    let w = lum.get(x - 1, y);
    let e = lum.get(x + 1, y);
    let sw = lum.get(x - 1, y + 1);
    let s = lum.get(x, y + 1);
    let se = lum.get(x + 1, y + 1);

    let gx = -nw + ne - 2.0 * w + 2.0 * e - sw + se;
    let gy = -nw - 2.0 * n - ne + sw + 2.0 * s + se;
    (gx, gy)
}

/// Thresholds the normalized gradient magnitude into a 0/255 edge map.
///
/// Edge cells carry 0 so they quantize to the darkest glyph of the ramp,
/// everything else carries 255. The 1-cell border is excluded from the
/// convolution and left at the no-edge value.
pub fn edge_map(lum: &LuminanceGrid, threshold: f32) -> LuminanceGrid {
    let (width, height) = (lum.width(), lum.height());

    // Pure per-cell reads over an immutable grid; parallelize freely.
    let data: Vec<f32> = (0..width * height)
        .into_par_iter()
        .map(|idx| {
            let x = idx % width;
            let y = idx / width;
            if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                return NO_EDGE;
            }
            let (gx, gy) = sobel_at(lum, x, y);
            let magnitude = (gx * gx + gy * gy).sqrt();
            let normalized = magnitude / MAX_MAGNITUDE * 255.0;
            if normalized > threshold { 0.0 } else { NO_EDGE }
        })
        .collect();

    LuminanceGrid::new(width, height, data)
}

/// Stroke character for a gradient direction.
///
/// The gradient angle is rotated 90 degrees and folded into [0, 180) so
/// the stroke runs along the edge rather than along the gradient; opposite
/// gradient directions of the same edge land in the same bucket.
fn stroke_for(gx: f32, gy: f32) -> char {
    let angle = gy.atan2(gx).to_degrees();
    let adjusted = (angle + 90.0).rem_euclid(180.0);

    if !(22.5..157.5).contains(&adjusted) {
        '-'
    } else if adjusted < 67.5 {
        '/'
    } else if adjusted < 112.5 {
        '|'
    } else {
        '\\'
    }
}

/// Directional contour rows.
///
/// Cells whose gradient magnitude exceeds the threshold become stroke
/// characters, the rest blanks. Only interior cells are rendered, so the
/// output shrinks by one cell on every side. No ramp, dithering or
/// ignore-white logic applies here.
pub fn contour_rows(gray: &LuminanceGrid, threshold: f32) -> Vec<String> {
    let (width, height) = (gray.width(), gray.height());
    if width < 3 || height < 3 {
        return Vec::new();
    }

    let mut rows = Vec::with_capacity(height - 2);
    for y in 1..height - 1 {
        let mut line = String::with_capacity(width - 2);
        for x in 1..width - 1 {
            let (gx, gy) = sobel_at(gray, x, y);
            let magnitude = (gx * gx + gy * gy).sqrt();
            line.push(if magnitude > threshold {
                stroke_for(gx, gy)
            } else {
                ' '
            });
        }
        rows.push(line);
    }

    rows
}
