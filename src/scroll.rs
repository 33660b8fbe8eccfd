//! Constant-velocity auto-scrolling that stops at the image edges.

use tracing::debug;

use crate::engine::{ViewActions, ViewEngine};
use crate::view_state::{ViewMode, ViewState};

/// Speeds (pixels per frame) selected by the number keys 1 to 9.
pub const SCROLL_SPEED_PRESETS: [f64; 9] = [1.0, 2.0, 3.0, 4.0, 6.0, 8.0, 12.0, 16.0, 24.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Right,
    Left,
    Down,
    Up,
}

impl ScrollDirection {
    /// Order in which auto-detection tries directions; earlier wins ties.
    pub const ALL: [Self; 4] = [Self::Right, Self::Left, Self::Down, Self::Up];

    pub fn vector(self) -> (i8, i8) {
        match self {
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Down => (0, 1),
            Self::Up => (0, -1),
        }
    }

    /// Distance left to scroll before reaching the edge, or `None` if the
    /// axis shows all of its content.
    pub fn remaining_distance(self, state: &ViewState) -> Option<f64> {
        let (origin, min_origin) = match self {
            Self::Right | Self::Left => (state.origin_x, state.min_origin_x),
            Self::Down | Self::Up => (state.origin_y, state.min_origin_y),
        };
        if min_origin >= 0.0 {
            return None;
        }
        Some(match self {
            Self::Right | Self::Down => origin - min_origin,
            Self::Left | Self::Up => -origin,
        })
    }
}

/// Picks the direction with the most content left to scroll through.
pub fn detect_direction(state: &ViewState) -> Option<ScrollDirection> {
    let mut best = None;
    let mut best_distance = 0.0;
    for direction in ScrollDirection::ALL {
        if let Some(distance) = direction.remaining_distance(state) {
            if distance > best_distance {
                best = Some(direction);
                best_distance = distance;
            }
        }
    }
    best
}

/// Moves one axis by a frame's worth of scrolling. Reaching either end of
/// `[min_origin, 0]` parks the origin on it and stops the axis.
fn step_axis(origin: &mut f64, dir: &mut i8, min_origin: f64, speed: f64) {
    if *dir == 0 {
        return;
    }
    if min_origin >= 0.0 {
        *dir = 0;
        return;
    }
    let next = *origin - f64::from(*dir) * speed;
    if next <= min_origin {
        *origin = min_origin;
        *dir = 0;
    } else if next >= 0.0 {
        *origin = 0.0;
        *dir = 0;
    } else {
        *origin = next;
    }
}

impl ViewEngine {
    /// Starts, retunes or stops auto-scrolling.
    ///
    /// - `speed` replaces the scroll speed when given.
    /// - `direction` starts scrolling that way.
    /// - Without a direction, an idle scroller picks the direction with the
    ///   most remaining content; a running one stops unless only the speed
    ///   was being changed.
    pub fn start_scroll(&mut self, speed: Option<f64>, direction: Option<ScrollDirection>) {
        if self.state.mode == ViewMode::Panel {
            self.state.scroll.stop();
            return;
        }
        if let Some(speed) = speed.filter(|s| s.is_finite() && *s > 0.0) {
            self.state.scroll.speed = speed;
        }

        let direction = match direction {
            Some(direction) => Some(direction),
            None if !self.is_scrolling() => detect_direction(&self.state),
            None if speed.is_none() => {
                self.state.scroll.stop();
                return;
            }
            None => return,
        };
        let Some(direction) = direction else {
            debug!("nothing to scroll");
            return;
        };

        (self.state.scroll.dir_x, self.state.scroll.dir_y) = direction.vector();
        debug!(?direction, speed = self.state.scroll.speed, "auto-scroll started");
        self.view_cfg(ViewActions::RESET_TO_FREE | ViewActions::SNAP);
    }

    pub fn stop_scroll(&mut self) {
        self.state.scroll.stop();
    }

    /// Advances auto-scroll by one frame. Returns true while scrolling.
    pub(crate) fn advance_scroll(&mut self) -> bool {
        if !self.is_scrolling() {
            return false;
        }
        if self.state.mode == ViewMode::Panel || !self.document.is_valid() {
            self.state.scroll.stop();
            return false;
        }

        let s = &mut self.state;
        let speed = s.scroll.speed;
        step_axis(&mut s.origin_x, &mut s.scroll.dir_x, s.min_origin_x, speed);
        step_axis(&mut s.origin_y, &mut s.scroll.dir_y, s.min_origin_y, speed);

        self.animation.suppress();
        self.update_view(false, 0.0, 0.0);
        self.is_scrolling()
    }
}
