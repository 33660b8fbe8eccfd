use serde::{Deserialize, Serialize};

/// Metadata of the loaded bitmap. A zero width or height means "no document".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Document {
    pub width: u32,
    pub height: u32,
    /// Width of one pixel relative to its height; 1.0 = square pixels.
    pub pixel_aspect: f64,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            pixel_aspect: 1.0,
        }
    }
}

impl Document {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_pixel_aspect(mut self, pixel_aspect: f64) -> Self {
        self.pixel_aspect = pixel_aspect;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn is_square_pixels(&self) -> bool {
        (0.9999..=1.0001).contains(&self.pixel_aspect)
    }

    /// Image size with non-square pixels folded in. Neither axis ever
    /// shrinks below its pixel count.
    pub fn raw_size(&self) -> (f64, f64) {
        (
            f64::from(self.width) * self.pixel_aspect.max(1.0),
            f64::from(self.height) / self.pixel_aspect.min(1.0),
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// User-controlled pan and zoom.
    Free,
    /// Whole image visible, letterboxed or pillarboxed.
    #[default]
    Fit,
    /// Viewport fully covered, overflow cropped.
    Fill,
    /// Extreme-aspect image split into parallel strips.
    Panel,
}

impl ViewMode {
    /// Modes whose zoom and origin are derived from the viewport. Panel
    /// mode frames the whole image like [`ViewMode::Fit`].
    pub fn is_autofit(self) -> bool {
        matches!(self, Self::Fit | Self::Fill | Self::Panel)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub dir_x: i8,
    pub dir_y: i8,
    /// Pixels per frame.
    pub speed: f64,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            dir_x: 0,
            dir_y: 0,
            speed: 4.0,
        }
    }
}

impl ScrollState {
    pub fn is_scrolling(&self) -> bool {
        self.dir_x != 0 || self.dir_y != 0
    }

    pub fn stop(&mut self) {
        self.dir_x = 0;
        self.dir_y = 0;
    }
}

/// All view parameters plus the geometry derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub previous_mode: ViewMode,
    pub integer_zoom: bool,
    /// Fraction of autofit content that may be cropped, in `[0, 0.5]`.
    pub max_crop: f64,
    pub zoom: f64,
    pub origin_x: f64,
    pub origin_y: f64,

    // derived by `update_view`
    pub view_width: f64,
    pub view_height: f64,
    pub min_zoom: f64,
    pub min_origin_x: f64,
    pub min_origin_y: f64,

    pub scroll: ScrollState,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Fit,
            previous_mode: ViewMode::Fit,
            integer_zoom: false,
            max_crop: 0.0,
            zoom: 1.0,
            origin_x: 0.0,
            origin_y: 0.0,
            view_width: 0.0,
            view_height: 0.0,
            min_zoom: 1.0 / 16.0,
            min_origin_x: 0.0,
            min_origin_y: 0.0,
            scroll: ScrollState::default(),
        }
    }
}

impl ViewState {
    /// Drops per-document geometry while keeping user preferences.
    pub fn reset(&mut self) {
        let prefs = Self {
            mode: self.mode,
            previous_mode: self.mode,
            integer_zoom: self.integer_zoom,
            max_crop: self.max_crop,
            scroll: ScrollState {
                speed: self.scroll.speed,
                ..ScrollState::default()
            },
            ..Self::default()
        };
        *self = prefs;
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoom < 0.9999 || self.zoom > 1.0001
    }
}
