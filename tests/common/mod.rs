#![allow(dead_code)]

use pixel_viewer::{Document, ViewEngine, ViewMode, Viewport};

/// Engine with a `width` x `height` document on a `screen_width` x
/// `screen_height` viewport, in fit mode.
pub fn engine_with(width: u32, height: u32, screen_width: f64, screen_height: f64) -> ViewEngine {
    let mut engine = ViewEngine::new(Viewport::new(screen_width, screen_height));
    engine.load_document(Document::new(width, height));
    engine
}

/// Same as [`engine_with`] but switched to free mode at `zoom`.
pub fn free_engine(
    width: u32,
    height: u32,
    screen_width: f64,
    screen_height: f64,
    zoom: f64,
) -> ViewEngine {
    let mut engine = engine_with(width, height, screen_width, screen_height);
    engine.set_zoom(zoom);
    assert_eq!(engine.mode(), ViewMode::Free, "set_zoom must switch to free mode");
    engine
}

/// Distance of `zoom` (or its reciprocal when shrinking) from the nearest integer.
pub fn integer_error(zoom: f64) -> f64 {
    let factor = if zoom < 1.0 { 1.0 / zoom } else { zoom };
    (factor - factor.round()).abs()
}

/// Runs frames until the engine reports it is idle, with an upper bound.
pub fn run_until_idle(engine: &mut ViewEngine, max_frames: usize) -> usize {
    for frame in 0..max_frames {
        if !engine.tick() {
            return frame;
        }
    }
    panic!("engine still busy after {max_frames} frames");
}
