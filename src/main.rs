#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod image_loader;
mod ui;

use app::PixelViewer;
use pixel_viewer::AppConfig;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = AppConfig::load();

    // First command line argument is the image to open
    let initial_path = std::env::args().nth(1).map(PathBuf::from);

    let mut viewport = eframe::egui::ViewportBuilder::default()
        .with_drag_and_drop(true)
        .with_inner_size(config.window_size.unwrap_or([1024.0, 768.0]));

    if let Some(pos) = config.window_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "PixelView",
        options,
        Box::new(|cc| Ok(Box::new(PixelViewer::new(cc, config, initial_path)))),
    )
}
