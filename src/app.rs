use eframe::egui;
use std::path::PathBuf;
use tracing::info;

use pixel_viewer::zoom::WheelAccumulator;
use pixel_viewer::{
    AppConfig, Area, Corner, Document, PanSpeed, SCROLL_SPEED_PRESETS, ScreenRect,
    ScrollDirection, ViewEngine, ViewMode, ViewSettings, Viewport,
};

use crate::image_loader::{ImageLoader, ImageResult};
use crate::ui;

/// A mouse wheel notch is about this many points.
const WHEEL_NOTCH: f32 = 50.0;

pub struct PixelViewer {
    loader: ImageLoader,
    engine: ViewEngine,
    config: AppConfig,

    // Image State
    current_path: Option<PathBuf>,
    image: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
    texture_options: egui::TextureOptions,
    loading: bool,
    error_msg: Option<String>,

    // restored on the first successful load, once positions can be resolved
    pending_settings: Option<ViewSettings>,

    // UI State
    wheel: WheelAccumulator,
    show_help: bool,
    show_config: bool,
}

impl PixelViewer {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        initial_path: Option<PathBuf>,
    ) -> Self {
        let mut engine = ViewEngine::new(Viewport::default());
        engine.apply_settings(&config.view);

        let mut viewer = Self {
            loader: ImageLoader::new(cc.egui_ctx.clone()),
            engine,
            pending_settings: Some(config.view.clone()),
            config,
            current_path: None,
            image: None,
            texture: None,
            texture_options: egui::TextureOptions::LINEAR,
            loading: false,
            error_msg: None,
            wheel: WheelAccumulator::default(),
            show_help: false,
            show_config: false,
        };

        if let Some(path) = initial_path {
            viewer.load_file(path);
        }

        viewer
    }

    fn load_file(&mut self, path: PathBuf) {
        self.current_path = Some(path.clone());
        self.loading = true;
        self.error_msg = None;
        self.loader.request(path);
    }

    fn open_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new().pick_file() {
            self.load_file(path);
        }
    }

    fn receive_images(&mut self, ctx: &egui::Context) {
        while let Some(result) = self.loader.try_recv() {
            match result {
                ImageResult::Success(path, image) => {
                    if Some(&path) != self.current_path.as_ref() {
                        continue;
                    }
                    info!("showing {} ({}x{})", path.display(), image.size[0], image.size[1]);
                    self.loading = false;

                    let [width, height] = image.size;
                    let document = Document::new(width as u32, height as u32)
                        .with_pixel_aspect(self.engine.pixel_aspect());
                    self.texture = Some(ctx.load_texture(
                        path.to_string_lossy(),
                        image.clone(),
                        self.texture_options,
                    ));
                    self.image = Some(image);
                    self.engine.load_document(document);
                    if let Some(settings) = self.pending_settings.take() {
                        self.engine.apply_settings(&settings);
                    }
                }
                ImageResult::Error(path, err) => {
                    if Some(&path) == self.current_path.as_ref() {
                        self.loading = false;
                        self.error_msg = Some(err);
                        self.texture = None;
                        self.image = None;
                        self.engine.unload_document();
                    }
                }
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let pressed = |key: egui::Key| ctx.input(|i| i.key_pressed(key));
        let modifiers = ctx.input(|i| i.modifiers);

        if pressed(egui::Key::F1) {
            self.show_help = !self.show_help;
        }
        if pressed(egui::Key::F2) || pressed(egui::Key::Tab) {
            self.show_config = !self.show_config;
        }
        if pressed(egui::Key::F3) || (modifiers.command && pressed(egui::Key::O)) {
            self.open_dialog();
        }
        if pressed(egui::Key::F10) || pressed(egui::Key::Q) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if pressed(egui::Key::F11) {
            let fullscreen = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
        }

        if !self.engine.document().is_valid() {
            return;
        }

        if pressed(egui::Key::F) {
            self.engine.toggle_fit_fill();
        }
        if pressed(egui::Key::Z) || pressed(egui::Key::Slash) {
            self.engine.toggle_one_to_one();
        }
        if pressed(egui::Key::I) {
            let integer = !self.engine.state().integer_zoom;
            self.engine.set_integer_zoom(integer);
        }
        if pressed(egui::Key::P) {
            self.engine.toggle_panel();
        }
        if pressed(egui::Key::Plus) || pressed(egui::Key::Equals) {
            self.engine.change_zoom_centered(1.0);
        }
        if pressed(egui::Key::Minus) {
            self.engine.change_zoom_centered(-1.0);
        }
        if pressed(egui::Key::Home) {
            self.engine.move_to_corner(Corner::TopLeft);
        }
        if pressed(egui::Key::End) {
            self.engine.move_to_corner(Corner::BottomRight);
        }
        if pressed(egui::Key::S) {
            self.engine.start_scroll(None, None);
        }

        const NUMBER_KEYS: [egui::Key; 9] = [
            egui::Key::Num1,
            egui::Key::Num2,
            egui::Key::Num3,
            egui::Key::Num4,
            egui::Key::Num5,
            egui::Key::Num6,
            egui::Key::Num7,
            egui::Key::Num8,
            egui::Key::Num9,
        ];
        for (key, speed) in NUMBER_KEYS.into_iter().zip(SCROLL_SPEED_PRESETS) {
            if pressed(key) {
                self.engine.start_scroll(Some(speed), None);
            }
        }

        let arrows = [
            (egui::Key::ArrowRight, ScrollDirection::Right),
            (egui::Key::ArrowLeft, ScrollDirection::Left),
            (egui::Key::ArrowDown, ScrollDirection::Down),
            (egui::Key::ArrowUp, ScrollDirection::Up),
        ];
        for (key, direction) in arrows {
            if !pressed(key) {
                continue;
            }
            if modifiers.alt {
                self.engine.start_scroll(None, Some(direction));
                continue;
            }
            let speed = if modifiers.shift {
                PanSpeed::Slow
            } else if modifiers.command {
                PanSpeed::Fast
            } else {
                PanSpeed::Normal
            };
            let (dx, dy) = direction.vector();
            self.engine.cursor_pan(f64::from(dx), f64::from(dy), speed);
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, response: &egui::Response, rect: egui::Rect) {
        if !self.engine.document().is_valid() {
            return;
        }

        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            let delta = response.drag_delta();
            if delta != egui::Vec2::ZERO {
                self.engine.drag_pan(f64::from(delta.x), f64::from(delta.y));
            }
        }

        if !response.hovered() {
            self.wheel.reset();
            return;
        }
        let notches = f64::from(ctx.input(|i| i.raw_scroll_delta.y) / WHEEL_NOTCH);
        if let Some(steps) = self.wheel.feed(notches) {
            let pivot = ctx
                .input(|i| i.pointer.hover_pos())
                .unwrap_or(rect.center())
                - rect.min;
            self.engine
                .change_zoom(steps, f64::from(pivot.x), f64::from(pivot.y));
        }
    }

    /// Crisp pixels when magnifying, smooth filtering when shrinking.
    fn update_texture_filter(&mut self) {
        let options = if self.engine.state().zoom >= 0.9999 {
            egui::TextureOptions::NEAREST
        } else {
            egui::TextureOptions::LINEAR
        };
        if options == self.texture_options {
            return;
        }
        self.texture_options = options;
        if let (Some(texture), Some(image)) = (self.texture.as_mut(), self.image.as_ref()) {
            texture.set(image.clone(), options);
        }
    }

    fn draw_image(&self, painter: &egui::Painter, rect: egui::Rect) {
        let Some(texture) = &self.texture else {
            return;
        };
        let (width, height) = (f64::from(rect.width()), f64::from(rect.height()));
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

        if self.engine.mode() == ViewMode::Panel {
            for panel in self.engine.panels() {
                let clip = to_egui_rect(panel.clip, rect.min);
                let target = area_rect(&panel.area, width, height, rect.min);
                painter
                    .with_clip_rect(clip.intersect(rect))
                    .image(texture.id(), target, uv, egui::Color32::WHITE);
            }
        } else {
            let target = area_rect(&self.engine.current_area(), width, height, rect.min);
            painter.image(texture.id(), target, uv, egui::Color32::WHITE);
        }
    }

    fn persist(&mut self, ctx: &egui::Context) {
        let window_info = ctx.input(|i| i.viewport().clone());
        let mut changed = false;

        if let Some(pos) = window_info.inner_rect.map(|r| r.min) {
            let new_pos = [pos.x, pos.y];
            if self.config.window_pos != Some(new_pos) {
                self.config.window_pos = Some(new_pos);
                changed = true;
            }
        }

        if let Some(size) = window_info.inner_rect.map(|r| r.size()) {
            let new_size = [size.x, size.y];
            if self.config.window_size != Some(new_size) {
                self.config.window_size = Some(new_size);
                changed = true;
            }
        }

        // only settle on view settings once motion has stopped
        let settled = !self.engine.is_animating() && !self.engine.is_scrolling();
        if settled && self.engine.document().is_valid() && self.pending_settings.is_none() {
            let view = self.engine.capture_settings();
            if view != self.config.view {
                self.config.view = view;
                changed = true;
            }
        }

        if changed {
            self.config.save();
        }
    }
}

fn to_egui_rect(rect: ScreenRect, offset: egui::Pos2) -> egui::Rect {
    egui::Rect::from_min_size(
        offset + egui::vec2(rect.x as f32, rect.y as f32),
        egui::vec2(rect.width as f32, rect.height as f32),
    )
}

fn area_rect(area: &Area, width: f64, height: f64, offset: egui::Pos2) -> egui::Rect {
    to_egui_rect(area.to_screen_rect(width, height), offset)
}

impl eframe::App for PixelViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. Handle Async Results
        self.receive_images(ctx);

        // 2. Handle File Drops
        let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.load_file(path);
        }

        // 3. Keyboard
        self.handle_keys(ctx);

        // 4. Image area
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.engine
                    .set_viewport(f64::from(rect.width()), f64::from(rect.height()));

                let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
                self.handle_pointer(ctx, &response, rect);

                if self.engine.tick() {
                    ctx.request_repaint();
                }
                self.update_texture_filter();

                if self.loading {
                    ui.put(rect, egui::Spinner::new());
                    return;
                }

                if let Some(err) = &self.error_msg {
                    ui.put(rect, egui::Label::new(format!("Error: {err}")));
                    return;
                }

                if self.texture.is_some() {
                    self.draw_image(ui.painter(), rect);
                } else {
                    let button = ui.put(
                        egui::Rect::from_center_size(rect.center(), egui::vec2(160.0, 32.0)),
                        egui::Button::new("Open Image"),
                    );
                    if button.clicked() {
                        self.open_dialog();
                    }
                    ui.painter().text(
                        rect.center() + egui::vec2(0.0, 40.0),
                        egui::Align2::CENTER_CENTER,
                        "Drag & Drop an image here (F1 for help)",
                        egui::FontId::proportional(14.0),
                        egui::Color32::GRAY,
                    );
                }
            });

        // 5. Windows
        ui::help_window(ctx, &mut self.show_help);
        ui::config_window(ctx, &mut self.show_config, &mut self.engine);

        self.persist(ctx);
    }
}
