use crate::area::Area;

/// Fraction of the remaining distance covered per frame (tuned for 60 Hz).
pub const EASE_FACTOR: f64 = 0.125;

/// Convergence threshold as a fraction of the target's displayed size.
pub const STOP_FRACTION: f64 = 1.0 / 256.0;

/// Applies one frame of exponential easing of `current` toward `target`.
///
/// Returns true if the area is still animating (requires repaint).
pub fn ease_area(current: &mut Area, target: &Area) -> bool {
    for (value, goal) in current.components_mut().into_iter().zip(target.components()) {
        *value += EASE_FACTOR * (goal - *value);
    }
    let threshold = target.scale_x.min(-target.scale_y) * STOP_FRACTION;
    current.distance(target) >= threshold
}

/// Drives `current_area` toward `target_area` once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationController {
    animating: bool,
}

impl AnimationController {
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn start(&mut self) {
        self.animating = true;
    }

    /// Makes the next frame jump straight to the target.
    pub fn suppress(&mut self) {
        self.animating = false;
    }

    /// Advances one frame. Returns true while another frame is needed.
    pub fn advance(&mut self, current: &mut Area, target: &Area) -> bool {
        if self.animating {
            self.animating = ease_area(current, target);
        } else {
            *current = *target;
        }
        self.animating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero() -> Area {
        Area {
            scale_x: 0.0,
            scale_y: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    #[test]
    fn converges_from_zero_within_bounded_frames() {
        let target = Area::FULL_SCREEN;
        let mut current = zero();
        let mut frames = 0;
        while ease_area(&mut current, &target) {
            frames += 1;
            assert!(frames < 64, "easing did not converge");
        }
        assert!(frames >= 40, "easing converged suspiciously fast: {frames}");
    }

    #[test]
    fn suppressed_controller_snaps() {
        let target = Area::FULL_SCREEN;
        let mut current = zero();
        let mut anim = AnimationController::default();
        assert!(!anim.advance(&mut current, &target));
        assert_eq!(current, target);
    }

    #[test]
    fn running_controller_stops_by_itself() {
        let target = Area::from_view(10.0, 20.0, 300.0, 200.0, 800.0, 600.0);
        let mut current = Area::FULL_SCREEN;
        let mut anim = AnimationController::default();
        anim.start();
        let mut frames = 0;
        while anim.advance(&mut current, &target) {
            frames += 1;
            assert!(frames < 200, "animation never stopped");
        }
        assert!(!anim.is_animating());
        assert!(current.distance(&target) < 0.01);
    }
}
