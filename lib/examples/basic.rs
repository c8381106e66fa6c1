/// Basic example: render a synthetic test image in several modes
///
/// Builds a radial gradient with a dark circle and prints the ASCII output
/// for the default dithered render, ordered dithering, and both edge modes.
use ascii_gen::{DitherAlgorithm, EdgeMode, RampKind, RenderConfig, process_image};
use image::{Rgba, RgbaImage};

fn main() {
    // Create a 240x160 test image: light background, dark filled circle.
    let width = 240;
    let height = 160;
    let mut img = RgbaImage::new(width, height);

    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 55.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            let value = if dist < radius {
                // Dark circle with a soft falloff toward the rim
                (40.0 + (dist / radius) * 60.0) as u8
            } else {
                // Light gradient background
                (200 + (x * 55 / width) as u8).min(255)
            };
            img.put_pixel(x, y, Rgba([value, value, value, 255]));
        }
    }

    let mut config = RenderConfig {
        width: 72,
        ramp: RampKind::Standard,
        ..RenderConfig::default()
    };

    println!("--- Floyd-Steinberg (default) ---");
    println!("{}", process_image(&img, &config).expect("render failed"));

    config.dither = DitherAlgorithm::Ordered;
    println!("\n--- Ordered (Bayer) ---");
    println!("{}", process_image(&img, &config).expect("render failed"));

    config.edge_mode = EdgeMode::Sobel;
    config.edge_threshold = 40.0;
    println!("\n--- Sobel edges ---");
    println!("{}", process_image(&img, &config).expect("render failed"));

    config.edge_mode = EdgeMode::Contour;
    config.contour_threshold = 60.0;
    println!("\n--- Directional contours ---");
    println!("{}", process_image(&img, &config).expect("render failed"));
}
