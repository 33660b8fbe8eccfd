use crate::engine::{ViewActions, ViewEngine};

/// Pan step size tiers for keyboard panning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl PanSpeed {
    /// Pixels moved per request.
    pub fn pixels(self) -> f64 {
        match self {
            Self::Slow => 16.0,
            Self::Normal => 64.0,
            Self::Fast => 256.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    BottomRight,
}

impl ViewEngine {
    /// Moves the visible area by one step in direction `(dx, dy)`; a
    /// positive `dx` reveals content further to the right.
    pub fn cursor_pan(&mut self, dx: f64, dy: f64, speed: PanSpeed) {
        let step = speed.pixels();
        self.state.origin_x = self.state.origin_x.floor() - dx * step;
        self.state.origin_y = self.state.origin_y.floor() - dy * step;
        self.view_cfg(ViewActions::RESET_TO_FREE | ViewActions::STOP_SCROLL | ViewActions::ANIMATE);
    }

    /// Moves the image along with a mouse drag of `(dx, dy)` screen pixels.
    pub fn drag_pan(&mut self, dx: f64, dy: f64) {
        self.state.origin_x += dx;
        self.state.origin_y += dy;
        self.view_cfg(ViewActions::RESET_TO_FREE | ViewActions::STOP_SCROLL | ViewActions::SNAP);
    }

    pub fn move_to_corner(&mut self, corner: Corner) {
        (self.state.origin_x, self.state.origin_y) = match corner {
            Corner::TopLeft => (0.0, 0.0),
            Corner::BottomRight => (self.state.min_origin_x, self.state.min_origin_y),
        };
        self.view_cfg(ViewActions::RESET_TO_FREE | ViewActions::STOP_SCROLL | ViewActions::ANIMATE);
    }
}
