mod app;

use app::BrailleApp;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    // Configure logging
    env_logger::init();
    log::info!("Starting Braille Renderer");

    // Configure viewport/window
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Braille Renderer")
            .with_icon(load_icon()),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Braille Renderer",
        options,
        Box::new(|cc| Box::new(BrailleApp::new(cc))),
    )
}

/// Load application icon: a single Braille cell with all eight dots raised
fn load_icon() -> egui::IconData {
    let icon_size = 32;
    let mut pixels = vec![0u8; icon_size * icon_size * 4];

    // 2x4 dot centers on an 8 pixel grid
    let centers: Vec<(f32, f32)> = (0..4)
        .flat_map(|row| (0..2).map(move |col| (12.0 + col as f32 * 8.0, 4.0 + row as f32 * 8.0)))
        .collect();

    for y in 0..icon_size {
        for x in 0..icon_size {
            let idx = (y * icon_size + x) * 4;
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);

            let is_dot = centers
                .iter()
                .any(|&(cx, cy)| (px - cx).powi(2) + (py - cy).powi(2) <= 6.25);

            let [r, g, b] = if is_dot { [255, 255, 255] } else { [20, 20, 60] };
            pixels[idx] = r;
            pixels[idx + 1] = g;
            pixels[idx + 2] = b;
            pixels[idx + 3] = 255;
        }
    }

    egui::IconData {
        rgba: pixels,
        width: icon_size as u32,
        height: icon_size as u32,
    }
}
