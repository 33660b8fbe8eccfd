mod common;

use approx::assert_abs_diff_eq;
use common::{engine_with, free_engine, run_until_idle};
use pixel_viewer::{ScrollDirection, ViewMode};

#[test]
fn test_auto_detect_prefers_first_direction_on_tie() {
    let mut engine = free_engine(1000, 800, 800.0, 600.0, 2.0);
    engine.start_scroll(None, None);
    assert!(engine.is_scrolling());
    let scroll = engine.state().scroll;
    assert_eq!((scroll.dir_x, scroll.dir_y), (1, 0));
}

#[test]
fn test_auto_detect_picks_longest_way() {
    let mut engine = free_engine(1000, 800, 800.0, 600.0, 2.0);
    engine.set_rel_x(90.0);
    engine.set_rel_y(10.0);
    // right: 120, left: 1080, down: 900, up: 100
    engine.start_scroll(None, None);
    let scroll = engine.state().scroll;
    assert_eq!((scroll.dir_x, scroll.dir_y), (-1, 0));
}

#[test]
fn test_scroll_stops_exactly_at_edge() {
    let mut engine = free_engine(1000, 800, 800.0, 600.0, 2.0);
    engine.start_scroll(Some(7.0), Some(ScrollDirection::Right));
    let min_origin_x = engine.state().min_origin_x;

    let mut frames = 0;
    while engine.tick() {
        let s = engine.state();
        assert!(s.origin_x >= min_origin_x && s.origin_x <= 0.0);
        frames += 1;
        assert!(frames < 1000, "scrolling never stopped");
    }
    assert!(!engine.is_scrolling());
    assert_abs_diff_eq!(engine.state().origin_x, min_origin_x, epsilon = 1e-9);
    assert_abs_diff_eq!(engine.state().origin_y, -500.0, epsilon = 1e-9);
}

#[test]
fn test_scroll_up_stops_at_top() {
    let mut engine = free_engine(1000, 800, 800.0, 600.0, 2.0);
    engine.start_scroll(Some(24.0), Some(ScrollDirection::Up));
    run_until_idle(&mut engine, 100);
    assert_abs_diff_eq!(engine.state().origin_y, 0.0, epsilon = 1e-9);
}

#[test]
fn test_s_key_toggles_scrolling() {
    let mut engine = free_engine(1000, 800, 800.0, 600.0, 2.0);
    engine.start_scroll(None, None);
    assert!(engine.is_scrolling());
    engine.start_scroll(None, None);
    assert!(!engine.is_scrolling());
}

#[test]
fn test_speed_preset_while_scrolling_keeps_direction() {
    let mut engine = free_engine(1000, 800, 800.0, 600.0, 2.0);
    engine.start_scroll(None, Some(ScrollDirection::Down));
    engine.start_scroll(Some(12.0), None);
    let scroll = engine.state().scroll;
    assert_eq!((scroll.dir_x, scroll.dir_y), (0, 1));
    assert_abs_diff_eq!(scroll.speed, 12.0);
}

#[test]
fn test_nothing_to_scroll_in_fit_mode() {
    let mut engine = engine_with(100, 100, 800.0, 600.0);
    engine.start_scroll(None, None);
    assert!(!engine.is_scrolling());
    assert_eq!(engine.mode(), ViewMode::Fit);
}

#[test]
fn test_fill_mode_scrolls_along_cropped_axis() {
    let mut engine = engine_with(1600, 600, 800.0, 600.0);
    engine.set_mode(ViewMode::Fill);
    engine.start_scroll(None, None);
    assert_eq!(engine.mode(), ViewMode::Free);
    let scroll = engine.state().scroll;
    assert_eq!((scroll.dir_x, scroll.dir_y), (1, 0));
    assert_abs_diff_eq!(engine.state().origin_x, -400.0, epsilon = 1e-9);
}

#[test]
fn test_panel_mode_refuses_scrolling() {
    let mut engine = engine_with(10000, 100, 1000.0, 1000.0);
    engine.toggle_panel();
    assert_eq!(engine.mode(), ViewMode::Panel);
    engine.start_scroll(None, Some(ScrollDirection::Right));
    assert!(!engine.is_scrolling());
}

#[test]
fn test_zooming_stops_scrolling() {
    let mut engine = free_engine(1000, 800, 800.0, 600.0, 2.0);
    engine.start_scroll(None, None);
    engine.change_zoom_centered(1.0);
    assert!(!engine.is_scrolling());
}
