mod common;

use approx::assert_abs_diff_eq;
use common::{engine_with, free_engine};
use pixel_viewer::{AppConfig, ConfigError, Document, ViewEngine, ViewMode, ViewSettings, Viewport};

fn assert_areas_close(a: pixel_viewer::Area, b: pixel_viewer::Area, tolerance: f64) {
    for (x, y) in a.components().into_iter().zip(b.components()) {
        assert_abs_diff_eq!(x, y, epsilon = tolerance);
    }
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = AppConfig {
        window_pos: Some([10.0, 20.0]),
        window_size: Some([640.0, 480.0]),
        view: ViewSettings {
            mode: ViewMode::Fill,
            integer: true,
            max_crop: 0.2,
            scroll_speed: 16.0,
            ..ViewSettings::default()
        },
    };
    config.save_to(&path).unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded.window_pos, config.window_pos);
    assert_eq!(loaded.window_size, config.window_size);
    assert_eq!(loaded.view, config.view);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = AppConfig::load_from(&dir.path().join("nope.json"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_garbage_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "mode fill\nzoom 2\n").unwrap();
    assert!(matches!(AppConfig::load_from(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn test_out_of_range_values_are_clamped_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"view": {"mode": "free", "zoom": 0.0, "max_crop": 0.9, "aspect": 500.0}}"#,
    )
    .unwrap();
    let view = AppConfig::load_from(&path).unwrap().view;
    assert_eq!(view.mode, ViewMode::Free);
    assert!(view.zoom > 0.0);
    assert_abs_diff_eq!(view.max_crop, 0.5);
    assert_abs_diff_eq!(view.aspect, 100.0);
}

#[test]
fn test_free_view_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut original = free_engine(1000, 800, 800.0, 600.0, 2.0);
    original.set_rel_x(37.5);
    original.set_rel_y(80.0);
    original.start_scroll(Some(12.0), None);
    original.stop_scroll();

    let config = AppConfig {
        view: original.capture_settings(),
        ..AppConfig::default()
    };
    config.save_to(&path).unwrap();
    let loaded = AppConfig::load_from(&path).unwrap();

    let mut restored = engine_with(1000, 800, 800.0, 600.0);
    restored.apply_settings(&loaded.view);

    assert_eq!(restored.mode(), ViewMode::Free);
    assert_abs_diff_eq!(restored.state().zoom, 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(restored.state().scroll.speed, 12.0);
    assert_areas_close(restored.target_area(), original.target_area(), 1e-9);
    assert_abs_diff_eq!(restored.rel_x(), 37.5, epsilon = 1e-9);
    assert_abs_diff_eq!(restored.rel_y(), 80.0, epsilon = 1e-9);
}

#[test]
fn test_uneven_free_position_is_restored_exactly() {
    let mut original = free_engine(1000, 800, 800.0, 600.0, 2.0);
    original.set_rel_x(37.3);
    original.set_rel_y(81.7);
    let settings = original.capture_settings();

    let mut restored = engine_with(1000, 800, 800.0, 600.0);
    restored.apply_settings(&settings);
    assert_areas_close(restored.target_area(), original.target_area(), 1e-9);
}

#[test]
fn test_autofit_view_survives_reload() {
    let mut original = engine_with(333, 200, 1024.0, 768.0);
    original.set_integer_zoom(true);
    original.set_mode(ViewMode::Fill);
    original.set_max_crop(0.3);
    let settings = original.capture_settings();

    let mut restored = engine_with(333, 200, 1024.0, 768.0);
    restored.apply_settings(&settings);
    assert_eq!(restored.target_area(), original.target_area());
}

#[test]
fn test_pixel_aspect_is_restored() {
    let mut original = ViewEngine::new(Viewport::new(800.0, 600.0));
    original.load_document(Document::new(640, 200));
    original.set_pixel_aspect(0.5);
    let settings = original.capture_settings();
    assert_abs_diff_eq!(settings.aspect, 0.5);

    let mut restored = ViewEngine::new(Viewport::new(800.0, 600.0));
    restored.load_document(Document::new(640, 200));
    restored.apply_settings(&settings);
    assert!(!restored.is_square_pixels());
    assert_eq!(restored.target_area(), original.target_area());
}
