//! Smoothed follow camera with decaying shake.

use serde::Serialize;

use crate::{field, map::Vec2};

pub const FOLLOW_RATE: f32 = 3.0;
pub const SHAKE_DECAY: f32 = 0.9;
/// World pixels shown at once: 80x50 cells of 10x12.
pub const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
const SHAKE_FLOOR: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Camera {
    /// World position of the viewport's top-left corner, before shake.
    pub position: Vec2,
    pub viewport: Vec2,
    shake: f32,
    offset: (f32, f32),
}

impl Camera {
    /// Starts already centered on `target`.
    pub fn new(viewport: Vec2, target: Vec2) -> Self {
        Self {
            position: target - viewport * 0.5,
            viewport,
            shake: 0.0,
            offset: (0.0, 0.0),
        }
    }

    pub fn shake(&mut self, intensity: f32) {
        if intensity.is_finite() {
            self.shake = self.shake.max(intensity);
        }
    }

    pub fn shake_magnitude(&self) -> f32 {
        self.shake
    }

    /// Eases toward centering `target`; the factor `3·dt` is capped at 1 so a
    /// long frame snaps instead of overshooting.
    pub fn follow(&mut self, target: Vec2, dt: f32) {
        let goal = target - self.viewport * 0.5;
        let factor = (FOLLOW_RATE * dt).clamp(0.0, 1.0);
        self.position = self.position + (goal - self.position) * factor;
    }

    /// Recomputes the shake offset for this frame and lets the shake decay.
    pub fn update_shake(&mut self, time: f64) {
        if self.shake > 0.0 {
            self.offset = field::shake_offset(time, self.shake);
            self.shake *= SHAKE_DECAY;
            if self.shake < SHAKE_FLOOR {
                self.shake = 0.0;
            }
        } else {
            self.offset = (0.0, 0.0);
        }
    }

    pub fn shake_offset(&self) -> (f32, f32) {
        self.offset
    }

    /// Top-left corner with shake applied.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.position.x - self.offset.0, self.position.y - self.offset.1)
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.origin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec2::new(800.0, 600.0), Vec2::new(400.0, 300.0))
    }

    #[test]
    fn test_starts_centered() {
        let cam = camera();
        assert_eq!(cam.position, Vec2::ZERO);
        assert_eq!(cam.to_screen(Vec2::new(400.0, 300.0)), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_follow_moves_a_fraction() {
        let mut cam = camera();
        cam.follow(Vec2::new(500.0, 300.0), 0.1);
        assert!((cam.position.x - 30.0).abs() < 1e-4);
        assert_eq!(cam.position.y, 0.0);
    }

    #[test]
    fn test_long_frame_snaps() {
        let mut cam = camera();
        cam.follow(Vec2::new(1400.0, 900.0), 2.0);
        assert_eq!(cam.position, Vec2::new(1000.0, 600.0));
    }

    #[test]
    fn test_shake_takes_the_stronger_and_decays_out() {
        let mut cam = camera();
        cam.shake(5.0);
        cam.shake(3.0);
        assert_eq!(cam.shake_magnitude(), 5.0);
        cam.update_shake(1.0);
        assert!((cam.shake_magnitude() - 4.5).abs() < 1e-6);
        for _ in 0..200 {
            cam.update_shake(1.0);
        }
        assert_eq!(cam.shake_magnitude(), 0.0);
        cam.update_shake(2.0);
        assert_eq!(cam.shake_offset(), (0.0, 0.0));
    }

    #[test]
    fn test_shake_offset_is_bounded() {
        let mut cam = camera();
        cam.shake(10.0);
        cam.update_shake(0.37);
        let (x, y) = cam.shake_offset();
        assert!(x.abs() <= 10.0 && y.abs() <= 10.0);
    }
}
