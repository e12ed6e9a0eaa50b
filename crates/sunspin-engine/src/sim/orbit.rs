use std::f32::consts::TAU;

use glam::Vec2;

use crate::api::config::OrbitConfig;

/// Wrap an angle into [0, 2π).
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Mutable state of the orbiting body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitingBody {
    pub alive: bool,
    /// Orbital angle in [0, 2π).
    pub angle: f32,
    /// Current angular speed in radians per tick, before the unstable boost.
    pub speed: f32,
}

impl OrbitingBody {
    pub fn new(angle: f32, speed: f32) -> Self {
        Self {
            alive: true,
            angle: normalize_angle(angle),
            speed,
        }
    }
}

/// Tilted ellipse geometry and angular integration around the star.
#[derive(Debug, Clone)]
pub struct OrbitModel {
    config: OrbitConfig,
    tilt_sin: f32,
    tilt_cos: f32,
}

impl OrbitModel {
    pub fn new(config: &OrbitConfig) -> Self {
        let tilt = config.tilt_degrees.to_radians();
        Self {
            config: config.clone(),
            tilt_sin: tilt.sin(),
            tilt_cos: tilt.cos(),
        }
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    /// Orbit center for a star at `star`.
    pub fn center(&self, star: Vec2) -> Vec2 {
        star + Vec2::new(0.0, self.config.center_offset_y)
    }

    /// Point on the tilted ellipse at `angle`, relative to the star.
    pub fn position_at(&self, star: Vec2, angle: f32) -> Vec2 {
        let x = self.config.semi_major * angle.cos();
        let y = self.config.semi_minor * angle.sin();
        let rotated = Vec2::new(
            x * self.tilt_cos - y * self.tilt_sin,
            x * self.tilt_sin + y * self.tilt_cos + self.config.distance,
        );
        self.center(star) + rotated
    }

    pub fn body_position(&self, body: &OrbitingBody, star: Vec2) -> Vec2 {
        self.position_at(star, body.angle)
    }

    /// True while the body is on the far side of the ellipse (drawn behind the star).
    pub fn is_behind(&self, body: &OrbitingBody, star: Vec2) -> bool {
        self.body_position(body, star).y < self.center(star).y
    }

    /// Advance one tick. Returns the elapsed years for this tick (0 when dead).
    ///
    /// Angular speed relaxes toward the base rate; unstable ticks add a boost
    /// on top. Years accrue from forward progress in the travel direction, so
    /// wrapping through 0 never counts backwards.
    pub fn advance(&self, body: &mut OrbitingBody, unstable: bool) -> f64 {
        if !body.alive {
            return 0.0;
        }
        body.speed += (self.config.base_speed - body.speed) * self.config.speed_relax;
        let rate = if unstable {
            body.speed + self.config.unstable_boost
        } else {
            body.speed
        };

        let previous = body.angle;
        body.angle = normalize_angle(previous + self.config.direction * rate);
        debug_assert!((0.0..TAU).contains(&body.angle));

        let travel = if self.config.direction < 0.0 { -1.0 } else { 1.0 };
        let progress = normalize_angle((body.angle - previous) * travel);
        (progress / TAU) as f64 * self.config.years_per_orbit as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_handles_negative_and_wrap() {
        assert!((normalize_angle(-0.5) - (TAU - 0.5)).abs() < 1e-5);
        assert!((normalize_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
        let tiny = normalize_angle(-1e-9);
        assert!((0.0..TAU).contains(&tiny));
    }

    #[test]
    fn angle_stays_in_range_clockwise() {
        let config = OrbitConfig::default();
        let model = OrbitModel::new(&config);
        let mut body = OrbitingBody::new(0.001, 0.05);
        for i in 0..5000 {
            model.advance(&mut body, i % 3 == 0);
            assert!((0.0..TAU).contains(&body.angle), "angle {} at tick {i}", body.angle);
        }
    }

    #[test]
    fn years_are_monotonic_across_wraps() {
        let config = OrbitConfig::default();
        let model = OrbitModel::new(&config);
        let mut body = OrbitingBody::new(0.02, config.base_speed);
        let mut years = 0.0f64;
        for _ in 0..2000 {
            let step = model.advance(&mut body, false);
            assert!(step >= 0.0);
            assert!(step < 0.01);
            years += step;
        }
        // 2000 ticks at 0.01 rad per tick is about 3.18 orbits.
        assert!((years - 20.0 / TAU as f64).abs() < 0.01, "years {years}");
    }

    #[test]
    fn counter_clockwise_direction_also_counts_forward() {
        let config = OrbitConfig {
            direction: 1.0,
            ..OrbitConfig::default()
        };
        let model = OrbitModel::new(&config);
        let mut body = OrbitingBody::new(TAU - 0.005, config.base_speed);
        let step = model.advance(&mut body, false);
        assert!(body.angle < 0.01);
        assert!((step - 0.01 / TAU as f64).abs() < 1e-4);
    }

    #[test]
    fn unstable_ticks_move_faster() {
        let model = OrbitModel::new(&OrbitConfig::default());
        let mut calm = OrbitingBody::new(1.0, 0.01);
        let mut shaky = calm;
        let a = model.advance(&mut calm, false);
        let b = model.advance(&mut shaky, true);
        assert!(b > a * 1.9);
    }

    #[test]
    fn speed_relaxes_toward_base() {
        let config = OrbitConfig::default();
        let model = OrbitModel::new(&config);
        let mut body = OrbitingBody::new(1.0, 0.05);
        for _ in 0..500 {
            model.advance(&mut body, false);
        }
        assert!((body.speed - config.base_speed).abs() < 1e-4);
    }

    #[test]
    fn geometry_and_behind_flag() {
        let config = OrbitConfig::default();
        let model = OrbitModel::new(&config);
        let star = Vec2::new(700.0, 500.0);
        let right = model.position_at(star, 0.0);
        assert!((right - Vec2::new(1300.0, 540.0)).length() < 1e-3);
        // Screen y grows downward: angle π/2 is in front, 3π/2 behind.
        assert!(!model.is_behind(&OrbitingBody::new(std::f32::consts::FRAC_PI_2, 0.0), star));
        assert!(model.is_behind(&OrbitingBody::new(3.0 * std::f32::consts::FRAC_PI_2, 0.0), star));
    }

    #[test]
    fn dead_body_does_not_move() {
        let model = OrbitModel::new(&OrbitConfig::default());
        let mut body = OrbitingBody::new(1.0, 0.01);
        body.alive = false;
        assert_eq!(model.advance(&mut body, true), 0.0);
        assert_eq!(body.angle, 1.0);
    }
}
