/// Basic example: Convert a simple test image to Braille art
///
/// This draws a few shapes, crops part of the image and prints the result
/// for every preset.
use braille_rendr::{BrailleConfig, CropRect, Preset, process_region};
use image::{Rgba, RgbaImage};

fn main() {
    println!("Braille Renderer - Basic Example");
    println!("================================\n");

    let width = 160;
    let height = 160;

    // Light gray background
    let mut img = RgbaImage::from_pixel(width, height, Rgba([220, 220, 220, 255]));

    // Dark ring in the center
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 50.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            if (dist - radius).abs() < 6.0 {
                img.put_pixel(x, y, Rgba([20, 20, 20, 255]));
            }
        }
    }

    // Diagonal stroke
    for i in 1..width {
        img.put_pixel(i, i, Rgba([200, 0, 0, 255]));
        img.put_pixel(i - 1, i, Rgba([200, 0, 0, 255]));
    }

    println!("Created test image: {}x{}\n", width, height);

    let crop = CropRect::new(10, 10, 140, 140);

    for preset in Preset::ALL {
        let config = BrailleConfig::for_region(preset, crop.width, crop.height);
        println!(
            "{} -> {}x{} pixels, threshold {}",
            preset.label(),
            config.target_width,
            config.target_height,
            config.threshold
        );

        match process_region(&img, crop, &config) {
            Ok(grid) => println!("{grid}\n"),
            Err(e) => eprintln!("Conversion failed: {e}\n"),
        }
    }

    // Edge outline of the same crop
    let config = BrailleConfig {
        detect_edges: true,
        invert_colors: true,
        ..BrailleConfig::for_region(Preset::Twitch, crop.width, crop.height)
    };
    println!("Edges (inverted):");
    match process_region(&img, crop, &config) {
        Ok(grid) => println!("{grid}"),
        Err(e) => eprintln!("Conversion failed: {e}"),
    }
}
