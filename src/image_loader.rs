use eframe::egui;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use tracing::{debug, warn};

pub enum ImageCommand {
    Load(PathBuf),
}

pub enum ImageResult {
    Success(PathBuf, egui::ColorImage),
    Error(PathBuf, String),
}

/// Decodes images on a background thread so the frame loop never blocks.
pub struct ImageLoader {
    tx: Sender<ImageCommand>,
    rx: Receiver<ImageResult>,
}

impl ImageLoader {
    pub fn new(ctx: egui::Context) -> Self {
        let (tx_ui, rx_worker) = channel::<ImageCommand>();
        let (tx_worker, rx_ui) = channel::<ImageResult>();

        thread::spawn(move || {
            while let Ok(cmd) = rx_worker.recv() {
                match cmd {
                    ImageCommand::Load(path) => {
                        let result = decode(&path);
                        if tx_worker.send(result).is_err() {
                            // UI side is gone; nothing left to decode for
                            break;
                        }
                        ctx.request_repaint();
                    }
                }
            }
        });

        Self {
            tx: tx_ui,
            rx: rx_ui,
        }
    }

    pub fn request(&self, path: PathBuf) {
        debug!("requesting load of {}", path.display());
        if let Err(err) = self.tx.send(ImageCommand::Load(path)) {
            warn!("image loader thread is not running: {err}");
        }
    }

    pub fn try_recv(&self) -> Option<ImageResult> {
        self.rx.try_recv().ok()
    }
}

fn decode(path: &Path) -> ImageResult {
    match image::open(path) {
        Ok(dynamic_image) => {
            let width = dynamic_image.width() as usize;
            let height = dynamic_image.height() as usize;
            debug!("decoded {} ({width}x{height})", path.display());
            let pixels = dynamic_image.to_rgba8().into_raw();
            let color_image = egui::ColorImage::from_rgba_unmultiplied([width, height], &pixels);
            ImageResult::Success(path.to_path_buf(), color_image)
        }
        Err(err) => {
            warn!("decoding {} failed: {err}", path.display());
            ImageResult::Error(path.to_path_buf(), format!("Load error: {err}"))
        }
    }
}
