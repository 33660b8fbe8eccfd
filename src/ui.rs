use eframe::egui;

use pixel_viewer::{ViewEngine, ViewMode};

const HELP_TEXT: &[(&str, &str)] = &[
    ("F1", "show/hide help window"),
    ("F2 or Tab", "show/hide display configuration window"),
    ("F3 or Ctrl+O", "open an image"),
    ("F10 or Q", "quit application immediately"),
    ("F11", "toggle fullscreen"),
    ("F", "toggle fit-to-screen / fill-screen mode"),
    ("Z or /", "toggle 1:1 view / fit-to-screen mode"),
    ("I", "toggle integer scaling"),
    ("P", "toggle panel mode for very wide or tall images"),
    ("+ / -", "zoom in/out"),
    ("mouse wheel", "zoom in/out around the cursor"),
    ("left mouse button", "move visible area"),
    ("middle mouse button", "move visible area"),
    ("cursor keys", "move visible area (normal speed)"),
    ("Ctrl+cursor", "move visible area (faster)"),
    ("Shift+cursor", "move visible area (slower)"),
    ("Alt+cursor", "start auto-scrolling in specified direction"),
    ("S", "stop auto-scrolling, or start in auto-detected direction"),
    ("1...9", "set auto-scroll speed, start scrolling in auto direction"),
    ("Home / End", "move to upper-left / lower-right corner"),
];

pub fn help_window(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("PixelView Help")
        .open(open)
        .collapsible(false)
        .resizable(false)
        .pivot(egui::Align2::CENTER_CENTER)
        .default_pos(ctx.screen_rect().center())
        .show(ctx, |ui| {
            egui::Grid::new("help").striped(true).show(ui, |ui| {
                for (keys, action) in HELP_TEXT {
                    ui.monospace(*keys);
                    ui.label(*action);
                    ui.end_row();
                }
            });
        });
}

/// Slider over a 0..100 position; disabled while the axis is centered.
fn position_slider(
    ui: &mut egui::Ui,
    label: &str,
    percent: f64,
    centered: bool,
) -> Option<f64> {
    let mut value = percent;
    let response = ui.add_enabled(
        !centered,
        egui::Slider::new(&mut value, 0.0..=100.0)
            .suffix("%")
            .fixed_decimals(2)
            .text(label),
    );
    response.changed().then_some(value)
}

pub fn config_window(ctx: &egui::Context, open: &mut bool, engine: &mut ViewEngine) {
    egui::Window::new("Display Configuration")
        .open(open)
        .resizable(false)
        .show(ctx, |ui| {
            let mode = engine.mode();
            ui.horizontal(|ui| {
                ui.label("view mode:");
                if ui.radio(mode == ViewMode::Free, "free").clicked() {
                    engine.set_mode(ViewMode::Free);
                }
                if ui.radio(mode == ViewMode::Fit, "fit to screen").clicked() {
                    engine.set_mode(ViewMode::Fit);
                }
                if ui.radio(mode == ViewMode::Fill, "fill screen").clicked() {
                    engine.set_mode(ViewMode::Fill);
                }
                let panel = ui.add_enabled(
                    engine.panel_available() || mode == ViewMode::Panel,
                    egui::RadioButton::new(mode == ViewMode::Panel, "panels"),
                );
                if panel.clicked() && mode != ViewMode::Panel {
                    engine.toggle_panel();
                }
            });

            let mut integer = engine.state().integer_zoom && engine.can_do_integer_zoom();
            let checkbox = ui.add_enabled(
                engine.can_do_integer_zoom(),
                egui::Checkbox::new(&mut integer, "integer scaling"),
            );
            if checkbox.changed() {
                engine.set_integer_zoom(integer);
            }

            let mut aspect = engine.pixel_aspect();
            let slider = ui.add(
                egui::Slider::new(&mut aspect, 0.5..=2.0)
                    .logarithmic(true)
                    .fixed_decimals(3)
                    .text("pixel aspect"),
            );
            if slider.changed() {
                engine.set_pixel_aspect(aspect);
            }
            slider.context_menu(|ui| {
                if ui.button("reset to square pixels").clicked() {
                    engine.set_pixel_aspect(1.0);
                    ui.close_menu();
                }
            });

            let mut crop = (engine.state().max_crop * 100.0).round();
            let slider = ui.add_enabled(
                engine.state().integer_zoom,
                egui::Slider::new(&mut crop, 0.0..=50.0)
                    .step_by(1.0)
                    .suffix("%")
                    .text("max. crop"),
            );
            if slider.changed() {
                engine.set_max_crop(crop / 100.0);
            }

            let mut zoom = engine.state().zoom;
            let min_zoom = engine.state().min_zoom.max(1.0 / 16.0);
            let slider = ui.add(
                egui::Slider::new(&mut zoom, min_zoom..=16.0)
                    .logarithmic(true)
                    .fixed_decimals(2)
                    .suffix("x")
                    .text("zoom factor"),
            );
            if slider.changed() {
                engine.set_zoom(zoom);
            }

            let state = engine.state();
            let (centered_x, centered_y) = (state.min_origin_x >= 0.0, state.min_origin_y >= 0.0);
            if let Some(percent) = position_slider(ui, "X position", engine.rel_x(), centered_x) {
                engine.set_rel_x(percent);
            }
            if let Some(percent) = position_slider(ui, "Y position", engine.rel_y(), centered_y) {
                engine.set_rel_y(percent);
            }

            let mut speed = engine.state().scroll.speed.round();
            let slider = ui.add(
                egui::Slider::new(&mut speed, 1.0..=200.0)
                    .step_by(1.0)
                    .suffix(" px/frame")
                    .text("scroll speed"),
            );
            if slider.changed() {
                engine.state_mut().scroll.speed = speed;
            }
        });
}
