use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use ascii_gen::{RampKind, RenderConfig, process_image};
use clap::Parser;
use log::debug;

/// Convert an image to ASCII art on stdout
#[derive(Parser, Debug)]
#[command(name = "ascii-gen", version, about = "Image to ASCII art converter")]
struct Args {
    /// Input image (any format the image crate can decode)
    input: PathBuf,

    /// Output width in characters (20-300)
    #[arg(short, long, default_value_t = 100)]
    width: u32,

    /// Brightness offset (-100 to 100)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    brightness: f32,

    /// Contrast amount (-100 to 100)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    contrast: f32,

    /// Gaussian pre-blur sigma in source pixels (0-10)
    #[arg(long, default_value_t = 0.0)]
    blur: f32,

    /// Disable dithering
    #[arg(long)]
    no_dither: bool,

    /// Dither algorithm: floyd, atkinson, noise, ordered
    #[arg(long, default_value = "floyd")]
    dither: String,

    /// Invert luminance
    #[arg(long)]
    invert: bool,

    /// Render pure white cells as glyphs instead of blanks
    #[arg(long)]
    keep_white: bool,

    /// Character ramp: standard, blocks, binary, hex, manual, detailed
    #[arg(long, default_value = "detailed")]
    charset: String,

    /// Character used by the manual ramp
    #[arg(long, default_value_t = '0')]
    char: char,

    /// Edge mode: none, sobel, dog
    #[arg(long, default_value = "none")]
    edges: String,

    /// Sobel edge threshold (0-255)
    #[arg(long, default_value_t = 100.0)]
    edge_threshold: f32,

    /// Contour edge threshold (0-255)
    #[arg(long, default_value_t = 100.0)]
    contour_threshold: f32,

    /// Seed for the noise dither (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write the text to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn build_config(args: &Args) -> Result<RenderConfig, Box<dyn Error>> {
    let mut ramp: RampKind = args.charset.parse()?;
    if matches!(ramp, RampKind::Manual(_)) {
        ramp = RampKind::Manual(args.char);
    }

    Ok(RenderConfig {
        width: args.width,
        brightness: args.brightness,
        contrast: args.contrast,
        blur: args.blur,
        dithering: !args.no_dither,
        dither: args.dither.parse()?,
        invert: args.invert,
        ignore_white: !args.keep_white,
        ramp,
        edge_mode: args.edges.parse()?,
        edge_threshold: args.edge_threshold,
        contour_threshold: args.contour_threshold,
        noise_seed: args.seed,
    })
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = build_config(args)?;
    debug!("loading {}", args.input.display());

    let source = image::open(&args.input)?.to_rgba8();
    let art = process_image(&source, &config)?;

    match &args.output {
        Some(path) => fs::write(path, art.text() + "\n")?,
        None => println!("{art}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascii_gen::{DitherAlgorithm, EdgeMode};

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["ascii-gen", "input.png"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_defaults_mirror_library_defaults() {
        let args = parse(&[]);
        let config = build_config(&args).unwrap();
        let defaults = RenderConfig::default();

        assert_eq!(config.width, defaults.width);
        assert_eq!(config.dithering, defaults.dithering);
        assert_eq!(config.dither, defaults.dither);
        assert_eq!(config.ignore_white, defaults.ignore_white);
        assert_eq!(config.ramp, defaults.ramp);
        assert_eq!(config.edge_mode, defaults.edge_mode);
    }

    #[test]
    fn test_manual_charset_takes_char() {
        let args = parse(&["--charset", "manual", "--char", "#"]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.ramp, RampKind::Manual('#'));
    }

    #[test]
    fn test_mode_names_parse() {
        let args = parse(&["--dither", "ordered", "--edges", "dog"]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.dither, DitherAlgorithm::Ordered);
        assert_eq!(config.edge_mode, EdgeMode::Contour);
    }

    #[test]
    fn test_unknown_names_rejected() {
        let args = parse(&["--dither", "bayer"]);
        assert!(build_config(&args).is_err());

        let args = parse(&["--charset", "ansi"]);
        assert!(build_config(&args).is_err());
    }
}
