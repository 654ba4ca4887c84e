use braille_rendr::{
    BinaryBitmap, BrailleConfig, CropRect, PixelBuffer, Preset, encode, preprocess,
};
use eframe::egui;
use image::RgbaImage;
use std::time::Instant;

/// Main application state for the Braille renderer GUI
pub struct BrailleApp {
    /// Input image (original)
    input_image: Option<RgbaImage>,
    /// Selected region in input image pixels
    crop: Option<CropRect>,
    /// Image-space position where the current drag started
    drag_start: Option<egui::Pos2>,

    /// Output size preset
    preset: Preset,
    /// Conversion options; target size is filled in from the preset on each run
    config: BrailleConfig,

    /// Thresholded and scaled bitmap of the last run
    bitmap: Option<BinaryBitmap>,
    /// Braille text of the last run
    output_text: Option<String>,

    /// Texture handle for input image display
    input_texture: Option<egui::TextureHandle>,
    /// Texture handle for the bitmap preview
    preview_texture: Option<egui::TextureHandle>,

    /// Flag indicating options or crop changed and reprocessing is needed
    needs_reprocess: bool,
    /// Last processing time in milliseconds
    last_process_time_ms: f64,
    /// Error message to display (if any)
    error_message: Option<String>,
}

impl Default for BrailleApp {
    fn default() -> Self {
        Self {
            input_image: None,
            crop: None,
            drag_start: None,
            preset: Preset::default(),
            config: BrailleConfig::default(),
            bitmap: None,
            output_text: None,
            input_texture: None,
            preview_texture: None,
            needs_reprocess: false,
            last_process_time_ms: 0.0,
            error_message: None,
        }
    }
}

impl BrailleApp {
    /// Create a new Braille renderer application
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// Load an image from file path
    pub fn load_image(&mut self, path: &std::path::Path) {
        match image::open(path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                log::info!(
                    "Loaded {} ({}x{})",
                    path.display(),
                    rgba.width(),
                    rgba.height()
                );

                self.input_image = Some(rgba);
                self.input_texture = None; // Clear old texture
                self.crop = None;
                self.drag_start = None;
                self.clear_output();
                self.error_message = None;
            }
            Err(e) => {
                log::warn!("Failed to load {}: {}", path.display(), e);
                self.error_message = Some(format!("Failed to load image: {}", e));
            }
        }
    }

    /// Save the Braille text to a file
    pub fn save_output(&self, path: &std::path::Path) -> Result<(), String> {
        match &self.output_text {
            Some(text) => std::fs::write(path, text).map_err(|e| format!("Failed to save: {}", e)),
            None => Err("No output to save".to_string()),
        }
    }

    fn clear_output(&mut self) {
        self.bitmap = None;
        self.output_text = None;
        self.preview_texture = None;
        self.needs_reprocess = false;
    }

    /// Convert the selected region with the current options
    fn process(&mut self) {
        self.needs_reprocess = false;
        let (Some(input), Some(crop)) = (&self.input_image, self.crop) else {
            return;
        };
        if crop.is_empty() {
            // Nothing selected: drop the result of the previous selection
            self.clear_output();
            return;
        }

        let start = Instant::now();
        let (target_width, target_height) = self.preset.target_dimensions(crop.width, crop.height);
        self.config.target_width = target_width;
        self.config.target_height = target_height;

        let result = PixelBuffer::from_region(input, crop)
            .and_then(|buffer| preprocess(&buffer, &self.config));

        match result {
            Ok(bitmap) => {
                let grid = encode(&bitmap);
                self.last_process_time_ms = start.elapsed().as_secs_f64() * 1000.0;
                log::info!(
                    "Rendered {}x{} glyphs in {:.1} ms",
                    grid.width(),
                    grid.height(),
                    self.last_process_time_ms
                );

                self.output_text = Some(grid.to_string());
                self.bitmap = Some(bitmap);
                self.preview_texture = None; // Clear old texture
                self.error_message = None;
            }
            Err(e) => {
                log::warn!("Conversion failed: {}", e);
                self.bitmap = None;
                self.output_text = None;
                self.preview_texture = None;
                self.error_message = Some(format!("Conversion failed: {}", e));
            }
        }
    }

    /// Render the control panel UI
    fn render_controls(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;

        ui.heading("Settings");
        ui.separator();

        ui.collapsing("Output Size", |ui| {
            for preset in Preset::ALL {
                if ui
                    .radio_value(&mut self.preset, preset, preset.label())
                    .changed()
                {
                    // The old selection has the wrong aspect ratio
                    self.crop = None;
                    self.clear_output();
                }
            }
        });

        ui.add_space(8.0);

        ui.collapsing("Conversion", |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.config.threshold, 1..=99).text("Threshold"))
                .on_hover_text("Pixels darker than this percentage of white become dots")
                .changed();

            changed |= ui
                .checkbox(&mut self.config.detect_edges, "Detect Edges")
                .on_hover_text("Trace outlines instead of filling dark areas")
                .changed();

            changed |= ui
                .checkbox(&mut self.config.invert_colors, "Invert Colors")
                .on_hover_text("Swap dark and light before thresholding")
                .changed();
        });

        ui.add_space(16.0);
        ui.separator();

        if let Some(crop) = self.crop {
            ui.label(format!(
                "Selection: {}x{} at ({}, {})",
                crop.width, crop.height, crop.x, crop.y
            ));
        } else if self.input_image.is_some() {
            ui.label("Drag on the image to select a region");
        }

        if let Some(bitmap) = &self.bitmap {
            ui.label(format!(
                "Bitmap: {}x{} ({}x{} characters)",
                bitmap.width(),
                bitmap.height(),
                bitmap.width() / 2,
                bitmap.height() / 4
            ));
        }

        // Show processing time
        if self.last_process_time_ms > 0.0 {
            ui.label(format!("Last process: {:.1} ms", self.last_process_time_ms));
        }

        changed
    }

    /// Convert RgbaImage to egui ColorImage
    fn rgba_to_color_image(img: &RgbaImage) -> egui::ColorImage {
        let (width, height) = img.dimensions();
        egui::ColorImage::from_rgba_unmultiplied([width as usize, height as usize], img.as_raw())
    }

    /// Show the input image and let the user drag a crop rectangle on it
    ///
    /// Returns true when a drag finished and the selection changed.
    fn render_crop_area(&mut self, ui: &mut egui::Ui) -> bool {
        let Some(img) = &self.input_image else {
            ui.label("No image loaded");
            return false;
        };
        let bounds = img.dimensions();

        let texture = self.input_texture.get_or_insert_with(|| {
            ui.ctx().load_texture(
                "input",
                Self::rgba_to_color_image(img),
                egui::TextureOptions::default(),
            )
        });

        let size = texture.size_vec2();
        let max_size = ui.available_size();
        let scale = ((max_size.x / size.x).min(max_size.y / size.y)).min(4.0);
        let (rect, response) = ui.allocate_exact_size(size * scale, egui::Sense::drag());

        ui.painter().image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let to_image = |p: egui::Pos2| {
            let local = (p - rect.min) / scale;
            egui::pos2(
                local.x.clamp(0.0, bounds.0 as f32),
                local.y.clamp(0.0, bounds.1 as f32),
            )
        };

        let mut finished = false;
        if response.drag_started() {
            self.drag_start = response.interact_pointer_pos().map(to_image);
        }
        if response.dragged()
            && let (Some(start), Some(pos)) = (self.drag_start, response.interact_pointer_pos())
        {
            self.crop = Some(selection_rect(
                start,
                to_image(pos),
                self.preset.aspect_ratio(),
                bounds,
            ));
        }
        if response.drag_released() {
            self.drag_start = None;
            finished = self.crop.is_some();
        }

        if let Some(crop) = self.crop {
            let min = rect.min + egui::vec2(crop.x as f32, crop.y as f32) * scale;
            let extent = egui::vec2(crop.width as f32, crop.height as f32) * scale;
            ui.painter().rect_stroke(
                egui::Rect::from_min_size(min, extent),
                0.0,
                egui::Stroke::new(1.5, egui::Color32::YELLOW),
            );
        }

        ui.label(format!("{}x{} (scale: {:.1}x)", bounds.0, bounds.1, scale));
        finished
    }

    /// Show the thresholded bitmap and the Braille text
    fn render_output(&mut self, ui: &mut egui::Ui) {
        let Some(bitmap) = &self.bitmap else {
            ui.label("No output yet");
            return;
        };

        let texture = self.preview_texture.get_or_insert_with(|| {
            let rgba = image::DynamicImage::ImageLuma8(bitmap.to_image()).to_rgba8();
            ui.ctx().load_texture(
                "preview",
                Self::rgba_to_color_image(&rgba),
                egui::TextureOptions::NEAREST,
            )
        });

        ui.label("Preview");
        ui.image((texture.id(), texture.size_vec2() * 3.0));
        ui.add_space(8.0);

        if let Some(text) = &self.output_text {
            ui.horizontal(|ui| {
                ui.label("Result");
                if ui.button("Copy").clicked() {
                    ui.output_mut(|o| o.copied_text = text.clone());
                }
            });
            egui::ScrollArea::both().show(ui, |ui| {
                ui.label(egui::RichText::new(text).monospace());
            });
        }
    }
}

/// Crop rectangle spanned by a drag from `start` to `end` in image pixels
///
/// With an aspect ratio the height follows the dragged width, shrinking both
/// when the rectangle would leave the image.
pub fn selection_rect(
    start: egui::Pos2,
    end: egui::Pos2,
    aspect: Option<f32>,
    bounds: (u32, u32),
) -> CropRect {
    let (max_x, max_y) = (bounds.0 as f32, bounds.1 as f32);
    let right = end.x >= start.x;
    let down = end.y >= start.y;

    let mut width = (end.x - start.x).abs();
    let mut height = (end.y - start.y).abs();

    if let Some(aspect) = aspect {
        let room_x = if right { max_x - start.x } else { start.x };
        let room_y = if down { max_y - start.y } else { start.y };
        width = width.min(room_x);
        height = width / aspect;
        if height > room_y {
            height = room_y;
            width = height * aspect;
        }
    }

    let x = if right { start.x } else { start.x - width };
    let y = if down { start.y } else { start.y - height };

    CropRect::new(
        x.max(0.0).round() as u32,
        y.max(0.0).round() as u32,
        width.round() as u32,
        height.round() as u32,
    )
    .clamp_to(bounds.0, bounds.1)
}

impl eframe::App for BrailleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif"])
                            .pick_file()
                        {
                            self.load_image(&path);
                        }
                        ui.close_menu();
                    }

                    if ui.button("Save Text...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Text", &["txt"])
                            .save_file()
                            && let Err(e) = self.save_output(&path)
                        {
                            self.error_message = Some(e);
                        }
                        ui.close_menu();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.error_message = Some(
                            "Braille Renderer\nPicture to Unicode Braille art\n\nBuilt with Rust + egui".to_string()
                        );
                        ui.close_menu();
                    }
                });
            });
        });

        // Left panel: Controls
        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(250.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.render_controls(ui) {
                        self.needs_reprocess = true;
                    }
                });
            });

        // Right panel: Output
        egui::SidePanel::right("output_panel")
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                self.render_output(ui);
            });

        // Central panel: Crop area
        egui::CentralPanel::default().show(ctx, |ui| {
            // Show error message if any
            if let Some(ref msg) = self.error_message {
                ui.colored_label(egui::Color32::RED, msg);
                if ui.button("Clear Error").clicked() {
                    self.error_message = None;
                }
                ui.separator();
            }

            if self.render_crop_area(ui) {
                self.needs_reprocess = true;
            }
        });

        if self.needs_reprocess {
            self.process();
        }
    }
}
