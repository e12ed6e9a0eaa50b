use glam::Vec2;
use serde::Serialize;

/// Virtual 2D camera used by the intro cinematics.
///
/// `center` is the world point shown at the middle of the viewport; `zoom`
/// scales world units around it (1.0 = neutral, >1 = zoomed in).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera2D {
    /// Visible width in world units at zoom 1.
    pub width: f32,
    /// Visible height in world units at zoom 1.
    pub height: f32,
    pub center: Vec2,
    pub zoom: f32,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            center: Vec2::new(width / 2.0, height / 2.0),
            zoom: 1.0,
        }
    }

    /// The neutral framing: world center at zoom 1.
    pub fn neutral_center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_neutral(&self) -> bool {
        (self.center - self.neutral_center()).length() < 1e-3 && (self.zoom - 1.0).abs() < 1e-4
    }

    pub fn look_at(&mut self, target: Vec2) {
        self.center = target;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(0.01);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_camera_is_neutral() {
        let cam = Camera2D::new(1400.0, 1000.0);
        assert!(cam.is_neutral());
        assert_eq!(cam.center, Vec2::new(700.0, 500.0));
    }

    #[test]
    fn moved_or_zoomed_camera_is_not_neutral() {
        let mut cam = Camera2D::new(100.0, 100.0);
        cam.look_at(Vec2::new(200.0, 200.0));
        assert!(!cam.is_neutral());

        let mut cam = Camera2D::new(100.0, 100.0);
        cam.set_zoom(2.0);
        assert!(!cam.is_neutral());
        cam.set_zoom(1.0);
        assert!(cam.is_neutral());
    }

    #[test]
    fn zoom_has_a_floor() {
        let mut cam = Camera2D::new(100.0, 100.0);
        cam.set_zoom(-3.0);
        assert_eq!(cam.zoom, 0.01);
    }
}
