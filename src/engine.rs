//! The view transform engine.
//!
//! [`ViewEngine`] owns the document metadata, the viewport size and the
//! [`ViewState`], and turns them into the [`Area`] transforms the renderer
//! draws with. Input handlers mutate state through the engine's methods;
//! the render loop calls [`ViewEngine::tick`] once per frame.

use bitflags::bitflags;
use tracing::debug;

use crate::animation::AnimationController;
use crate::area::Area;
use crate::config::ViewSettings;
use crate::panel::{Panel, compute_panel_geometry};
use crate::view_state::{Document, ViewMode, ViewState, Viewport};

/// Zoom factors closer than this to an integer count as that integer.
pub const INTEGER_SNAP: f64 = 0.001;

/// Rounding offset that biases autofit minification to the next larger divisor.
const SHRINK_ROUNDING: f64 = 0.999;

bitflags! {
    /// State changes applied by [`ViewEngine::view_cfg`] before the view
    /// is recomputed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ViewActions: u8 {
        /// Switch to free pan/zoom mode.
        const RESET_TO_FREE = 1 << 0;
        /// Ease toward the new target.
        const ANIMATE = 1 << 1;
        /// Jump to the new target on the next frame.
        const SNAP = 1 << 2;
        /// Stop auto-scrolling.
        const STOP_SCROLL = 1 << 3;
        /// Do not call `update_view` afterwards.
        const SKIP_RECOMPUTE = 1 << 4;
    }
}

#[derive(Debug, Default)]
pub struct ViewEngine {
    pub(crate) document: Document,
    pub(crate) viewport: Viewport,
    pub(crate) state: ViewState,
    pub(crate) current_area: Area,
    pub(crate) target_area: Area,
    pub(crate) panels: Vec<Panel>,
    pub(crate) animation: AnimationController,
}

impl ViewEngine {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Direct access for collaborators that restore persisted state.
    /// Values written here must already be range-checked.
    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    pub fn mode(&self) -> ViewMode {
        self.state.mode
    }

    pub fn current_area(&self) -> Area {
        self.current_area
    }

    pub fn target_area(&self) -> Area {
        self.target_area
    }

    /// Strip layout for the current document and viewport; empty when
    /// panel mode is unavailable.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel_available(&self) -> bool {
        !self.panels.is_empty()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_animating()
    }

    pub fn is_scrolling(&self) -> bool {
        self.state.scroll.is_scrolling()
    }

    pub fn pixel_aspect(&self) -> f64 {
        self.document.pixel_aspect
    }

    pub fn is_square_pixels(&self) -> bool {
        self.document.is_square_pixels()
    }

    pub fn can_do_integer_zoom(&self) -> bool {
        self.is_square_pixels()
    }

    /// Integer zoom is honored only for square pixels outside panel mode.
    pub fn want_integer_zoom(&self) -> bool {
        self.state.integer_zoom && self.can_do_integer_zoom() && self.state.mode != ViewMode::Panel
    }

    /// Replaces the document. View geometry is reset; preferences stay.
    pub fn load_document(&mut self, document: Document) {
        debug!(
            width = document.width,
            height = document.height,
            aspect = document.pixel_aspect,
            "loading document into view"
        );
        self.document = document;
        self.state.reset();
        self.panels.clear();
        self.view_cfg(ViewActions::SNAP);
    }

    /// Forgets the document but keeps its pixel aspect as a preference.
    pub fn unload_document(&mut self) {
        self.document = Document::default().with_pixel_aspect(self.document.pixel_aspect);
        self.state.reset();
        self.panels.clear();
        self.animation.suppress();
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        let viewport = Viewport::new(width, height);
        if viewport == self.viewport {
            return;
        }
        // keep the image point at the screen centre in place
        if self.viewport.is_valid() {
            self.state.origin_x += (viewport.width - self.viewport.width) * 0.5;
            self.state.origin_y += (viewport.height - self.viewport.height) * 0.5;
        }
        self.viewport = viewport;
        self.view_cfg(ViewActions::SNAP);
    }

    /// Applies `actions` and, unless told otherwise, recomputes the view
    /// around the screen centre.
    pub fn view_cfg(&mut self, actions: ViewActions) {
        if actions.contains(ViewActions::RESET_TO_FREE) {
            self.state.mode = ViewMode::Free;
        }
        if actions.contains(ViewActions::ANIMATE) {
            self.animation.start();
        }
        if actions.contains(ViewActions::SNAP) {
            self.animation.suppress();
        }
        if actions.contains(ViewActions::STOP_SCROLL) {
            self.state.scroll.stop();
        }
        if !actions.contains(ViewActions::SKIP_RECOMPUTE) {
            self.update_view_centered();
        }
    }

    pub fn update_view_centered(&mut self) {
        let (x, y) = (self.viewport.width * 0.5, self.viewport.height * 0.5);
        self.update_view(true, x, y);
    }

    /// Recomputes zoom, origin and the target transform.
    ///
    /// With `use_pivot`, the image point under `(pivot_x, pivot_y)` stays
    /// under it across a zoom change. No-op without a document or viewport.
    pub fn update_view(&mut self, use_pivot: bool, pivot_x: f64, pivot_y: f64) {
        if !self.document.is_valid() || !self.viewport.is_valid() {
            return;
        }
        let (raw_width, raw_height) = self.document.raw_size();
        let (screen_width, screen_height) = (self.viewport.width, self.viewport.height);
        self.panels = compute_panel_geometry(raw_width, raw_height, screen_width, screen_height);

        if self.state.mode == ViewMode::Panel && self.panels.is_empty() {
            debug!("panel layout unavailable, falling back to free mode");
            self.state.mode = ViewMode::Free;
        }
        if self.state.previous_mode == ViewMode::Panel && self.state.mode != ViewMode::Panel {
            self.animation.suppress();
        }
        self.state.previous_mode = self.state.mode;

        let integer = self.want_integer_zoom();
        let s = &mut self.state;
        let autofit = s.mode.is_autofit();

        let pivot_rel_x = relative_position(pivot_x - s.origin_x, s.view_width);
        let pivot_rel_y = relative_position(pivot_y - s.origin_y, s.view_height);

        if autofit {
            let crop = if integer { 1.0 - s.max_crop } else { 1.0 };
            let zoom_x = screen_width / (raw_width * crop);
            let zoom_y = screen_height / (raw_height * crop);
            s.zoom = if s.mode == ViewMode::Fill {
                zoom_x.max(zoom_y)
            } else {
                zoom_x.min(zoom_y)
            };
        }

        let mut min_zoom = (screen_width / raw_width)
            .min(screen_height / raw_height)
            .min(1.0);
        if integer {
            min_zoom = 1.0 / (1.0 / min_zoom).ceil();
        }
        s.min_zoom = min_zoom;
        s.zoom = s.zoom.max(min_zoom);
        if integer {
            s.zoom = quantize_zoom(s.zoom, autofit);
        }

        let previous_view = (s.view_width, s.view_height);
        s.view_width = raw_width * s.zoom;
        s.view_height = raw_height * s.zoom;
        // an unchanged view size would reproduce the same origin, minus rounding noise
        if use_pivot && previous_view != (s.view_width, s.view_height) {
            s.origin_x = pivot_x - pivot_rel_x * s.view_width;
            s.origin_y = pivot_y - pivot_rel_y * s.view_height;
        }

        (s.origin_x, s.min_origin_x) = clamp_axis(s.origin_x, s.view_width, screen_width, autofit);
        (s.origin_y, s.min_origin_y) =
            clamp_axis(s.origin_y, s.view_height, screen_height, autofit);

        self.target_area = Area::from_view(
            s.origin_x.floor(),
            s.origin_y.floor(),
            s.view_width,
            s.view_height,
            screen_width,
            screen_height,
        );
    }

    /// Advances auto-scroll and animation by one frame.
    ///
    /// Returns true while another frame is needed.
    pub fn tick(&mut self) -> bool {
        let scrolling = self.advance_scroll();
        let animating = self
            .animation
            .advance(&mut self.current_area, &self.target_area);
        scrolling || animating
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        if mode == ViewMode::Free {
            self.view_cfg(ViewActions::RESET_TO_FREE);
        } else {
            self.state.mode = mode;
            self.view_cfg(ViewActions::STOP_SCROLL | ViewActions::ANIMATE);
        }
    }

    pub fn toggle_fit_fill(&mut self) {
        let mode = if self.state.mode == ViewMode::Fit {
            ViewMode::Fill
        } else {
            ViewMode::Fit
        };
        self.set_mode(mode);
    }

    /// Switches between a 1:1 free view and fit-to-screen.
    pub fn toggle_one_to_one(&mut self) {
        if self.state.mode == ViewMode::Free && !self.state.is_zoomed() {
            self.set_mode(ViewMode::Fit);
        } else {
            self.state.zoom = 1.0;
            self.view_cfg(
                ViewActions::RESET_TO_FREE | ViewActions::STOP_SCROLL | ViewActions::ANIMATE,
            );
        }
    }

    pub fn toggle_panel(&mut self) {
        if self.state.mode == ViewMode::Panel {
            self.set_mode(ViewMode::Fit);
        } else if self.panel_available() {
            self.set_mode(ViewMode::Panel);
        } else {
            debug!("panel mode requested but unavailable for this image");
        }
    }

    pub fn set_integer_zoom(&mut self, integer: bool) {
        self.state.integer_zoom = integer;
        self.view_cfg(ViewActions::STOP_SCROLL | ViewActions::ANIMATE);
    }

    pub fn set_max_crop(&mut self, max_crop: f64) {
        self.state.max_crop = max_crop.clamp(0.0, 0.5);
        self.view_cfg(ViewActions::STOP_SCROLL | ViewActions::ANIMATE);
    }

    pub fn set_pixel_aspect(&mut self, aspect: f64) {
        if !aspect.is_finite() {
            return;
        }
        self.document.pixel_aspect = aspect.clamp(0.01, 100.0);
        self.view_cfg(ViewActions::STOP_SCROLL | ViewActions::SNAP);
    }

    /// Sets an explicit zoom factor in free mode.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !(zoom.is_finite() && zoom > 0.0) {
            return;
        }
        self.state.zoom = zoom;
        self.view_cfg(ViewActions::RESET_TO_FREE | ViewActions::STOP_SCROLL | ViewActions::SNAP);
    }

    /// Horizontal position as a 0..100 percentage of the scrollable range.
    pub fn rel_x(&self) -> f64 {
        relative_percent(self.state.origin_x, self.state.min_origin_x)
    }

    /// Vertical position as a 0..100 percentage of the scrollable range.
    pub fn rel_y(&self) -> f64 {
        relative_percent(self.state.origin_y, self.state.min_origin_y)
    }

    pub fn set_rel_x(&mut self, percent: f64) {
        self.state.origin_x = self.state.min_origin_x * percent.clamp(0.0, 100.0) / 100.0;
        self.view_cfg(ViewActions::RESET_TO_FREE | ViewActions::STOP_SCROLL | ViewActions::SNAP);
    }

    pub fn set_rel_y(&mut self, percent: f64) {
        self.state.origin_y = self.state.min_origin_y * percent.clamp(0.0, 100.0) / 100.0;
        self.view_cfg(ViewActions::RESET_TO_FREE | ViewActions::STOP_SCROLL | ViewActions::SNAP);
    }

    /// Snapshot of the persistent view fields.
    pub fn capture_settings(&self) -> ViewSettings {
        ViewSettings {
            mode: self.state.mode,
            integer: self.state.integer_zoom,
            aspect: self.document.pixel_aspect,
            max_crop: self.state.max_crop,
            zoom: self.state.zoom,
            rel_x: self.rel_x(),
            rel_y: self.rel_y(),
            scroll_speed: self.state.scroll.speed,
        }
    }

    /// Restores persisted view fields. Free-mode positions are rebuilt from
    /// the relative percentages once the clamp bounds are known.
    pub fn apply_settings(&mut self, settings: &ViewSettings) {
        let settings = settings.sanitized();
        self.document.pixel_aspect = settings.aspect;
        self.state.mode = settings.mode;
        self.state.integer_zoom = settings.integer;
        self.state.max_crop = settings.max_crop;
        self.state.zoom = settings.zoom;
        self.state.scroll.speed = settings.scroll_speed;
        self.state.scroll.stop();
        self.view_cfg(ViewActions::SNAP);

        if self.state.mode == ViewMode::Free {
            self.state.origin_x = self.state.min_origin_x * settings.rel_x / 100.0;
            self.state.origin_y = self.state.min_origin_y * settings.rel_y / 100.0;
            self.update_view_centered();
        }
    }
}

/// Position of `offset` within a view of `size`, or the centre for
/// degenerate views.
fn relative_position(offset: f64, size: f64) -> f64 {
    if size > 1.0 { offset / size } else { 0.5 }
}

fn relative_percent(origin: f64, min_origin: f64) -> f64 {
    if min_origin >= 0.0 {
        50.0
    } else {
        (100.0 * origin / min_origin).clamp(0.0, 100.0)
    }
}

/// Clamps one axis' origin, returning `(origin, min_origin)`.
///
/// Content that fits the screen, or any content in autofit modes, is centered.
fn clamp_axis(origin: f64, view_size: f64, screen_size: f64, center: bool) -> (f64, f64) {
    let min_origin = (screen_size - view_size).min(0.0);
    if center || min_origin >= 0.0 {
        ((screen_size - view_size) * 0.5, min_origin)
    } else {
        (origin.clamp(min_origin, 0.0), min_origin)
    }
}

/// Rounds `zoom` to an integer factor or integer divisor.
///
/// Autofit rounds toward the smaller displayed size so fitted content never
/// exceeds the permitted crop; everything else rounds to nearest.
pub(crate) fn quantize_zoom(zoom: f64, autofit: bool) -> f64 {
    let shrink = zoom < 1.0;
    let factor = if shrink { 1.0 / zoom } else { zoom };
    let nearest = factor.round();
    let factor = if autofit && (factor - nearest).abs() >= INTEGER_SNAP {
        let offset = if shrink { SHRINK_ROUNDING } else { 0.0 };
        (factor + offset).floor()
    } else {
        nearest
    }
    .max(1.0);
    if shrink { 1.0 / factor } else { factor }
}
