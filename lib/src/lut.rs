//! Glyph ramp catalog and luminance quantization.
//!
//! Every ramp is ordered darkest (most ink) at index 0 to lightest at the
//! end, so luminance 0 always maps to the heaviest character.

use crate::config::RampKind;
use crate::filters::LuminanceGrid;

/// 9-level general purpose ramp.
pub const STANDARD_RAMP: &str = "@%#*+=-:.";

/// Shaded block glyphs plus space.
pub const BLOCKS_RAMP: &str = "█▓▒░ ";

/// Two-level ramp.
pub const BINARY_RAMP: &str = "01";

/// The 16 hex digits.
pub const HEX_RAMP: &str = "0123456789ABCDEF";

/// 69-level ramp, the default. Quantization resolution is high enough that
/// smooth gradients survive even without dithering.
pub const DETAILED_RAMP: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'.";

/// Materializes the glyph ramp for a selection.
pub fn resolve_ramp(kind: RampKind) -> Vec<char> {
    match kind {
        RampKind::Standard => STANDARD_RAMP.chars().collect(),
        RampKind::Blocks => BLOCKS_RAMP.chars().collect(),
        RampKind::Binary => BINARY_RAMP.chars().collect(),
        RampKind::Hex => HEX_RAMP.chars().collect(),
        RampKind::Manual(c) => vec![c, ' '],
        RampKind::Detailed => DETAILED_RAMP.chars().collect(),
    }
}

/// Quantizes a luminance value in [0, 255] to a ramp index.
///
/// `index = round(value / 255 * (N - 1))`, clamped to the ramp. This is the
/// single quantization rule for every path except ordered dithering and the
/// contour mode, which derive their own indices.
#[inline]
pub fn quantize(value: f32, levels: usize) -> usize {
    let index = (value / 255.0 * (levels - 1) as f32).round() as usize;
    index.min(levels - 1)
}

/// Glyph for a luminance value.
#[inline]
pub fn glyph(ramp: &[char], value: f32) -> char {
    ramp[quantize(value, ramp.len())]
}

/// Maps a value grid straight through the ramp, no dithering.
///
/// Cells whose value in `original` is exactly 255 become blanks when
/// `ignore_white` is set; the decision never looks at `values`, so diffused
/// or remapped data cannot un-blank a white cell.
pub fn glyph_rows(
    values: &LuminanceGrid,
    original: &LuminanceGrid,
    ramp: &[char],
    ignore_white: bool,
) -> Vec<String> {
    let (width, height) = (values.width(), values.height());
    let mut rows = Vec::with_capacity(height);

    for y in 0..height {
        let mut line = String::with_capacity(width);
        for x in 0..width {
            if ignore_white && original.get(x, y) == 255.0 {
                line.push(' ');
            } else {
                line.push(glyph(ramp, values.get(x, y)));
            }
        }
        rows.push(line);
    }

    rows
}
