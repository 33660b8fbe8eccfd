//! Stepped zooming around a pivot point.
//!
//! Free zoom moves along a geometric scale with ratio sqrt(2) per step.
//! Integer zoom moves along the linear scale 1/3, 1/2, 1, 2, 3, ...

use std::f64::consts::SQRT_2;

use crate::engine::{ViewActions, ViewEngine};

/// Wheel deltas below this are treated as noise.
pub const MIN_DIRECTION: f64 = 0.01;

/// A zoom this close to a step counts as sitting on it.
pub const STEP_SNAP: f64 = 0.125;

/// Maps a zoom factor onto its (fractional) step index.
pub fn zoom_to_step(zoom: f64, integer: bool) -> f64 {
    if !integer {
        zoom.ln() / SQRT_2.ln()
    } else if zoom >= 1.0 {
        zoom - 1.0
    } else {
        1.0 - 1.0 / zoom
    }
}

/// Inverse of [`zoom_to_step`].
pub fn step_to_zoom(step: f64, integer: bool) -> f64 {
    if !integer {
        SQRT_2.powf(step)
    } else if step >= 0.0 {
        step + 1.0
    } else {
        1.0 / (1.0 - step)
    }
}

/// Zoom factor one step away from `zoom` in `direction`.
///
/// A zoom sitting on a step moves a full step. One between steps is
/// measured from the step below it, so zooming in lands on the next step
/// up and zooming out skips past the step below.
pub fn next_zoom(zoom: f64, direction: f64, integer: bool) -> f64 {
    let step = zoom_to_step(zoom, integer);
    let nearest = step.round();
    let base = if (step - nearest).abs() < STEP_SNAP {
        nearest
    } else {
        step.floor()
    };
    step_to_zoom(base + direction, integer)
}

/// Collects fractional wheel deltas (in notches) until they add up to
/// whole zoom steps, so touchpads with many small deltas zoom at the same
/// rate as a notched wheel.
#[derive(Debug, Default, Clone, Copy)]
pub struct WheelAccumulator {
    pending: f64,
}

impl WheelAccumulator {
    /// Adds `notches` and returns the whole steps ready to apply, if any.
    pub fn feed(&mut self, notches: f64) -> Option<f64> {
        if !notches.is_finite() {
            return None;
        }
        self.pending += notches;
        let steps = self.pending.trunc();
        if steps.abs() < 1.0 {
            return None;
        }
        self.pending -= steps;
        Some(steps)
    }

    pub fn reset(&mut self) {
        self.pending = 0.0;
    }
}

impl ViewEngine {
    /// Zooms one step in (`direction > 0`) or out, keeping the image point
    /// under `(pivot_x, pivot_y)` in place.
    pub fn change_zoom(&mut self, direction: f64, pivot_x: f64, pivot_y: f64) {
        if direction.abs() < MIN_DIRECTION {
            return;
        }
        let integer = self.state.integer_zoom && self.can_do_integer_zoom();
        self.state.zoom = next_zoom(self.state.zoom, direction, integer);
        self.view_cfg(
            ViewActions::RESET_TO_FREE
                | ViewActions::STOP_SCROLL
                | ViewActions::ANIMATE
                | ViewActions::SKIP_RECOMPUTE,
        );
        self.update_view(true, pivot_x, pivot_y);
    }

    /// [`ViewEngine::change_zoom`] around the screen centre.
    pub fn change_zoom_centered(&mut self, direction: f64) {
        let (x, y) = (self.viewport.width * 0.5, self.viewport.height * 0.5);
        self.change_zoom(direction, x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn free_steps_are_sqrt2_apart() {
        assert!(close(next_zoom(1.0, 1.0, false), SQRT_2));
        assert!(close(next_zoom(2.0, -1.0, false), SQRT_2));
        assert!(close(next_zoom(2.0, 2.0, false), 4.0));
    }

    #[test]
    fn integer_steps_walk_factors_and_divisors() {
        assert!(close(next_zoom(1.0, 1.0, true), 2.0));
        assert!(close(next_zoom(1.0, -1.0, true), 0.5));
        assert!(close(next_zoom(0.5, -1.0, true), 1.0 / 3.0));
        assert!(close(next_zoom(0.5, 1.0, true), 1.0));
    }

    #[test]
    fn near_step_is_not_wasted() {
        // 3.05 counts as sitting on 3, so one step in reaches 4
        assert!(close(next_zoom(3.05, 1.0, true), 4.0));
        // 2.5 lies between steps and is measured from 2
        assert!(close(next_zoom(2.5, 1.0, true), 3.0));
        assert!(close(next_zoom(2.5, -1.0, true), 1.0));
        assert!(close(next_zoom(1.5, -1.0, false), 1.0));
        assert!(close(next_zoom(1.5, 1.0, false), 2.0));
    }

    #[test]
    fn small_wheel_deltas_add_up_to_whole_steps() {
        let mut wheel = WheelAccumulator::default();
        assert_eq!(wheel.feed(0.4), None);
        assert_eq!(wheel.feed(0.4), None);
        assert_eq!(wheel.feed(0.4), Some(1.0));
        assert_eq!(wheel.feed(-0.5), None);
        assert_eq!(wheel.feed(2.5), Some(2.0));
    }

    #[test]
    fn reversing_the_wheel_cancels_pending_motion() {
        let mut wheel = WheelAccumulator::default();
        assert_eq!(wheel.feed(0.9), None);
        assert_eq!(wheel.feed(-0.9), None);
        assert_eq!(wheel.feed(-1.2), Some(-1.0));

        wheel.feed(0.9);
        wheel.reset();
        assert_eq!(wheel.feed(0.5), None);
    }
}
