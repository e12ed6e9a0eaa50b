use glam::Vec2;

use crate::api::config::{SessionConfig, StarConfig};
use crate::core::window::SlidingWindow;

/// The simulated star: position, windows, cooldown and grace.
///
/// Created once per session and replaced wholesale on restart.
#[derive(Debug, Clone)]
pub struct Star {
    pub position: Vec2,
    /// Where the star sits when undisturbed.
    pub rest: Vec2,
    pub radius: f32,
    pub base_cooldown: f32,
    /// Current spawn interval, shrunk by unnecessary movement.
    pub cooldown: f32,
    /// Ticks of relaxed penalties left.
    pub grace: u32,
    movement: SlidingWindow,
    stability: SlidingWindow,
    bounds_min: Vec2,
    bounds_max: Vec2,
}

impl Star {
    pub fn new(config: &SessionConfig) -> Self {
        let star = &config.star;
        let rest = config.star_rest();
        Self {
            position: rest,
            rest,
            radius: star.radius,
            base_cooldown: star.base_cooldown,
            cooldown: star.base_cooldown,
            grace: 0,
            movement: SlidingWindow::new(star.movement_window),
            stability: SlidingWindow::new(star.stability_window),
            bounds_min: Vec2::splat(star.radius),
            bounds_max: Vec2::new(
                (config.world_width - star.radius).max(star.radius),
                (config.world_height - star.radius).max(star.radius),
            ),
        }
    }

    pub fn with_grace(mut self, grace: u32) -> Self {
        self.grace = grace;
        self
    }

    /// Sum of the movement window.
    pub fn current_movement(&self) -> f32 {
        self.movement.sum()
    }

    /// Sum of the stability window.
    pub fn current_stability(&self) -> f32 {
        self.stability.sum()
    }

    pub fn movement_window(&self) -> &SlidingWindow {
        &self.movement
    }

    pub fn stability_window(&self) -> &SlidingWindow {
        &self.stability
    }

    pub(crate) fn record(&mut self, movement: f32, stability: f32) {
        self.movement.push(movement);
        self.stability.push(stability);
    }

    pub fn in_grace(&self) -> bool {
        self.grace > 0
    }

    pub fn tick_grace(&mut self) {
        self.grace = self.grace.saturating_sub(1);
    }

    /// Distance from the rest position.
    pub fn offset(&self) -> f32 {
        self.position.distance(self.rest)
    }

    /// Clamp a candidate position into a disk of `radius` around rest, then
    /// into the screen bounds.
    pub fn clamp_travel(&self, candidate: Vec2, radius: f32) -> Vec2 {
        let from_rest = candidate - self.rest;
        let limited = if from_rest.length() > radius {
            self.rest + from_rest.normalize_or_zero() * radius
        } else {
            candidate
        };
        limited.clamp(self.bounds_min, self.bounds_max)
    }

    /// Graded instability in [0, 1]: how close the stability sum is to terminal.
    pub fn instability_ratio(&self, config: &StarConfig) -> f32 {
        if config.stability_threshold <= 0.0 {
            return 1.0;
        }
        (self.current_stability() / config.stability_threshold).clamp(0.0, 1.0)
    }

    /// Terminal predicate: the stability sum exceeds the threshold.
    pub fn is_terminally_unstable(&self, config: &StarConfig) -> bool {
        self.current_stability() > config.stability_threshold
    }

    /// Color temperature in [0, 1]: 1 is calm yellow, 0 is fully red.
    /// Drops as flares get more frequent or stability degrades.
    pub fn heat(&self, config: &StarConfig) -> f32 {
        let cooldown_ratio = if self.base_cooldown > 0.0 {
            self.cooldown / self.base_cooldown
        } else {
            1.0
        };
        (cooldown_ratio * (1.0 - self.instability_ratio(config))).clamp(0.0, 1.0)
    }

    /// Ease back toward rest by a fixed fraction of the remaining offset.
    pub fn settle(&mut self, rate: f32) {
        self.position += (self.rest - self.position) * rate.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_rest_with_base_cooldown() {
        let config = SessionConfig::default();
        let star = Star::new(&config);
        assert_eq!(star.position, config.star_rest());
        assert_eq!(star.cooldown, 100.0);
        assert_eq!(star.current_movement(), 0.0);
        assert!(!star.in_grace());
    }

    #[test]
    fn clamp_travel_limits_to_disk() {
        let star = Star::new(&SessionConfig::default());
        let far = star.rest + Vec2::new(100.0, 0.0);
        let clamped = star.clamp_travel(far, 25.0);
        assert!((clamped.distance(star.rest) - 25.0).abs() < 1e-3);
        assert!(clamped.x > star.rest.x);
    }

    #[test]
    fn clamp_travel_respects_screen_bounds() {
        let config = SessionConfig::default();
        let star = Star::new(&config);
        // Huge disk: only the screen clamp applies.
        let clamped = star.clamp_travel(Vec2::new(-500.0, 5000.0), 1e6);
        assert_eq!(clamped.x, config.star.radius);
        assert_eq!(clamped.y, config.world_height - config.star.radius);
    }

    #[test]
    fn settle_never_overshoots() {
        let mut star = Star::new(&SessionConfig::default());
        star.position = star.rest + Vec2::new(10.0, -6.0);
        let mut last = star.offset();
        for _ in 0..500 {
            star.settle(0.01);
            let d = star.offset();
            assert!(d < last);
            last = d;
        }
    }

    #[test]
    fn heat_drops_with_shrunk_cooldown() {
        let config = SessionConfig::default();
        let mut star = Star::new(&config);
        assert!((star.heat(&config.star) - 1.0).abs() < 1e-6);
        star.cooldown = 50.0;
        assert!((star.heat(&config.star) - 0.5).abs() < 1e-6);
    }
}
