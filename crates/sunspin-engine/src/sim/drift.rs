use glam::Vec2;

use crate::api::config::DriftConfig;
use crate::api::types::EndCause;
use crate::core::window::SlidingWindow;
use crate::input::sensor::SensorReading;

/// Outcome of one drift check.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriftVerdict {
    /// Rotation or drift is outside its stable band this tick.
    pub unstable: bool,
    pub counter: u32,
    pub terminal: Option<EndCause>,
}

/// Spin-rate smoothing plus a leaky drift integrator with an instability counter.
#[derive(Debug, Clone)]
pub struct DriftMonitor {
    config: DriftConfig,
    rotations: SlidingWindow,
    fixed_rotation: Option<f32>,
    drift: Vec2,
    counter: u32,
}

impl DriftMonitor {
    /// `initial_rotation` seeds the spin history so the first ticks read a sane rate.
    pub fn new(config: &DriftConfig, initial_rotation: f32, fixed_rotation: Option<f32>) -> Self {
        let mut rotations = SlidingWindow::new(config.rotation_window);
        rotations.push(initial_rotation);
        Self {
            config: config.clone(),
            rotations,
            fixed_rotation,
            drift: Vec2::ZERO,
            counter: 0,
        }
    }

    /// Smoothed spin rate in radians per tick.
    pub fn rotation(&self) -> f32 {
        match self.fixed_rotation {
            Some(rate) => rate,
            None => self.rotations.mean().unwrap_or(self.config.initial_rotation),
        }
    }

    pub fn drift(&self) -> Vec2 {
        self.drift
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Counter progress toward the terminal limit, in [0, 1].
    pub fn instability_ratio(&self) -> f32 {
        if self.config.instability_limit == 0 {
            return 0.0;
        }
        (self.counter as f32 / self.config.instability_limit as f32).min(1.0)
    }

    /// Fold one tick of sensor input into rotation and drift.
    ///
    /// A missing reading leaves the spin history untouched and lets drift leak.
    /// It does not count as a zero-rate sample, so dropped serial lines cannot
    /// pull the average under `rotation_min` on their own.
    /// With a fixed rotation the sensor is ignored entirely.
    pub fn feed(&mut self, reading: Option<&SensorReading>) {
        if self.fixed_rotation.is_some() {
            return;
        }
        let delta = match reading {
            Some(reading) => {
                if let Some(rate) = reading.rotation {
                    self.rotations.push(rate);
                }
                reading.drift
            }
            None => Vec2::ZERO,
        };
        self.drift += delta - self.drift * self.config.drift_decay;
    }

    fn is_unstable(&self) -> bool {
        let rotation = self.rotation();
        rotation < self.config.rotation_min
            || rotation > self.config.rotation_max
            || self.drift.x.abs() > self.config.drift_max
            || self.drift.y.abs() > self.config.drift_max
    }

    /// Update the counter for this tick and report whether the session must end.
    pub fn check(&mut self) -> DriftVerdict {
        let unstable = self.is_unstable();
        if unstable {
            self.counter += 1;
        } else {
            self.counter = self.counter.saturating_sub(1);
        }

        let terminal = if self.drift.length() > self.config.drift_super {
            Some(EndCause::DriftBreach)
        } else if self.counter > self.config.instability_limit {
            Some(EndCause::OrbitDestabilized)
        } else {
            None
        };

        DriftVerdict {
            unstable,
            counter: self.counter,
            terminal,
        }
    }
}
