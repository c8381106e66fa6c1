//! ascii-gen - CPU-based image to ASCII art converter
//!
//! Converts a raster image into a grid of printable characters whose local
//! glyph choice approximates the image's luminance or edge structure. The
//! pipeline: tone mapping (grayscale, invert, contrast, brightness), four
//! dithering strategies (Floyd-Steinberg, Atkinson, noise, ordered Bayer),
//! two Sobel-based edge modes, and character-ramp quantization.
//!
//! # Example
//! ```no_run
//! use ascii_gen::{RenderConfig, process_image};
//!
//! let input = image::open("photo.jpg").unwrap().to_rgba8();
//! let config = RenderConfig::default();
//! let art = process_image(&input, &config).unwrap();
//! println!("{art}");
//! ```
//!
//! Rendering is CPU-bound and synchronous, with no internal cancellation
//! points. Interactive hosts should run it off their latency-sensitive
//! thread and, when settings change mid-flight, start the next render and
//! discard the stale result rather than queue behind it.

pub mod ascii;
pub mod config;
pub mod dither;
pub mod edges;
pub mod error;
pub mod filters;
pub mod lut;
pub mod processor;

// Re-export main types for convenience
pub use ascii::AsciiArt;
pub use config::{DitherAlgorithm, EdgeMode, RampKind, RenderConfig};
pub use error::RenderError;
pub use processor::{output_dimensions, process_image, process_samples};
