/// Affine map from the unit quad onto the displayed rectangle, in
/// normalized device coordinates (Y up).
///
/// A point `(u, v)` of the unit quad lands at
/// `(scale_x * u + offset_x, scale_y * v + offset_y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Axis-aligned rectangle in screen pixels, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Area {
    fn default() -> Self {
        Self::FULL_SCREEN
    }
}

impl Area {
    /// The whole viewport.
    pub const FULL_SCREEN: Self = Self {
        scale_x: 2.0,
        scale_y: -2.0,
        offset_x: -1.0,
        offset_y: 1.0,
    };

    /// Builds the transform for a view rectangle placed at `(x0, y0)` with
    /// size `view_width` x `view_height` on a `screen_width` x `screen_height`
    /// viewport.
    pub fn from_view(
        x0: f64,
        y0: f64,
        view_width: f64,
        view_height: f64,
        screen_width: f64,
        screen_height: f64,
    ) -> Self {
        Self {
            scale_x: 2.0 * view_width / screen_width,
            scale_y: -2.0 * view_height / screen_height,
            offset_x: 2.0 * x0 / screen_width - 1.0,
            offset_y: 1.0 - 2.0 * y0 / screen_height,
        }
    }

    /// Inverse of [`Area::from_view`]: the rectangle this area covers on
    /// a `screen_width` x `screen_height` viewport.
    pub fn to_screen_rect(&self, screen_width: f64, screen_height: f64) -> ScreenRect {
        ScreenRect {
            x: (self.offset_x + 1.0) * 0.5 * screen_width,
            y: (1.0 - self.offset_y) * 0.5 * screen_height,
            width: self.scale_x * 0.5 * screen_width,
            height: -self.scale_y * 0.5 * screen_height,
        }
    }

    pub fn components(&self) -> [f64; 4] {
        [self.scale_x, self.scale_y, self.offset_x, self.offset_y]
    }

    pub fn components_mut(&mut self) -> [&mut f64; 4] {
        [
            &mut self.scale_x,
            &mut self.scale_y,
            &mut self.offset_x,
            &mut self.offset_y,
        ]
    }

    /// Sum of absolute component differences.
    pub fn distance(&self, other: &Self) -> f64 {
        self.components()
            .iter()
            .zip(other.components().iter())
            .map(|(a, b)| (a - b).abs())
            .sum()
    }
}

impl ScreenRect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_view_matches_full_screen() {
        let area = Area::from_view(0.0, 0.0, 800.0, 600.0, 800.0, 600.0);
        assert_eq!(area, Area::FULL_SCREEN);
    }

    #[test]
    fn screen_rect_inverts_from_view() {
        let area = Area::from_view(-120.0, 35.0, 1600.0, 400.0, 800.0, 600.0);
        let rect = area.to_screen_rect(800.0, 600.0);
        assert!((rect.x + 120.0).abs() < 1e-9);
        assert!((rect.y - 35.0).abs() < 1e-9);
        assert!((rect.width - 1600.0).abs() < 1e-9);
        assert!((rect.height - 400.0).abs() < 1e-9);
    }
}
