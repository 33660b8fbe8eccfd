//! Multi-strip layout for images whose aspect ratio is far more extreme
//! than the viewport's.
//!
//! The image is scaled so that its long ("major") axis spans `n` viewport
//! lengths and then cut into `n` strips, which are stacked along the
//! viewport's short ("minor") axis with even gaps between them.

use crate::area::{Area, ScreenRect};

/// Panel layouts with fewer strips than this are not worth showing.
pub const MIN_PANELS: usize = 3;

/// One strip of a panel layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    /// Transform for the full image quad, positioned so that this strip's
    /// slice of the image lands inside `clip`.
    pub area: Area,
    /// Part of the viewport this strip occupies; drawing must be clipped to it.
    pub clip: ScreenRect,
}

#[derive(Debug, Clone, Copy)]
struct Axes {
    horizontal: bool,
    disp_major: f64,
    disp_minor: f64,
    raw_major: f64,
    raw_minor: f64,
}

impl Axes {
    fn new(raw_width: f64, raw_height: f64, screen_width: f64, screen_height: f64) -> Self {
        let horizontal = raw_width / raw_height >= screen_width / screen_height;
        if horizontal {
            Self {
                horizontal,
                disp_major: screen_width,
                disp_minor: screen_height,
                raw_major: raw_width,
                raw_minor: raw_height,
            }
        } else {
            Self {
                horizontal,
                disp_major: screen_height,
                disp_minor: screen_width,
                raw_major: raw_height,
                raw_minor: raw_width,
            }
        }
    }

    /// View size `(major, minor)` when the image is spread over `count` strips.
    fn view_size(&self, count: usize) -> (f64, f64) {
        let view_major = self.disp_major * count as f64;
        (view_major, view_major * self.raw_minor / self.raw_major)
    }

    fn fits(&self, count: usize) -> bool {
        let (_, view_minor) = self.view_size(count);
        (count as f64) * view_minor < self.disp_minor
    }
}

/// Computes the strip layout for an image of `raw_width` x `raw_height`
/// (aspect-corrected) on the given viewport.
///
/// Returns an empty list when fewer than [`MIN_PANELS`] strips would fit,
/// which means panel mode is unavailable.
pub fn compute_panel_geometry(
    raw_width: f64,
    raw_height: f64,
    screen_width: f64,
    screen_height: f64,
) -> Vec<Panel> {
    if !(raw_width > 0.0 && raw_height > 0.0 && screen_width > 0.0 && screen_height > 0.0) {
        return Vec::new();
    }
    let axes = Axes::new(raw_width, raw_height, screen_width, screen_height);

    let mut count = 1;
    while axes.fits(count) {
        count += 1;
    }
    // `count` is the first layout that no longer fits
    count -= 1;
    if count < MIN_PANELS {
        return Vec::new();
    }

    let (view_major, view_minor) = axes.view_size(count);
    let step = (axes.disp_major - view_major) / (count - 1) as f64;
    let gap = (axes.disp_minor - count as f64 * view_minor) / (count + 1) as f64;

    (0..count)
        .map(|i| {
            let major0 = i as f64 * step;
            let minor0 = gap + i as f64 * (view_minor + gap);
            if axes.horizontal {
                Panel {
                    area: Area::from_view(
                        major0,
                        minor0,
                        view_major,
                        view_minor,
                        screen_width,
                        screen_height,
                    ),
                    clip: ScreenRect {
                        x: 0.0,
                        y: minor0,
                        width: screen_width,
                        height: view_minor,
                    },
                }
            } else {
                Panel {
                    area: Area::from_view(
                        minor0,
                        major0,
                        view_minor,
                        view_major,
                        screen_width,
                        screen_height,
                    ),
                    clip: ScreenRect {
                        x: minor0,
                        y: 0.0,
                        width: view_minor,
                        height: screen_height,
                    },
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_image_has_no_panels() {
        assert!(compute_panel_geometry(500.0, 500.0, 800.0, 600.0).is_empty());
    }

    #[test]
    fn never_one_or_two_panels() {
        for width in (1000..40000).step_by(250) {
            let n = compute_panel_geometry(f64::from(width), 1000.0, 1000.0, 1000.0).len();
            assert!(n == 0 || n >= MIN_PANELS, "{width}: got {n} panels");
        }
    }

    #[test]
    fn tall_image_is_split_into_columns() {
        let panels = compute_panel_geometry(100.0, 10000.0, 1000.0, 1000.0);
        assert_eq!(panels.len(), 9);
        for pair in panels.windows(2) {
            assert!(pair[0].clip.right() <= pair[1].clip.x);
            assert_eq!(pair[0].clip.height, 1000.0);
        }
    }
}
