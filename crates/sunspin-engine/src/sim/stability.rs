use glam::Vec2;

use crate::api::config::{HazardConfig, StarConfig};
use crate::api::types::HazardId;
use crate::sim::hazard::Hazard;
use crate::sim::star::Star;

/// Result of tracking one tick of movement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackReport {
    /// Distance the star actually travelled after clamping.
    pub moved: f32,
    pub countered: Vec<HazardId>,
}

/// Turns per-tick movement into window samples, cooldown changes and counters.
#[derive(Debug, Clone)]
pub struct StabilityTracker {
    star: StarConfig,
    counter_dot_threshold: f32,
}

impl StabilityTracker {
    pub fn new(star: &StarConfig, hazards: &HazardConfig) -> Self {
        Self {
            star: star.clone(),
            counter_dot_threshold: hazards.counter_dot_threshold,
        }
    }

    /// Weight applied to movement entering the movement window.
    /// Grace outranks hazards here.
    fn movement_weight(in_grace: bool, hazards_present: bool) -> f32 {
        if in_grace {
            0.1
        } else if hazards_present {
            0.2
        } else {
            1.0
        }
    }

    /// Weight applied to movement entering the stability window.
    /// Hazards outrank grace here.
    fn stability_weight(in_grace: bool, hazards_present: bool) -> f32 {
        if hazards_present {
            0.5
        } else if in_grace {
            0.2
        } else {
            1.0
        }
    }

    /// Apply one tick of movement input.
    ///
    /// Ticks without input leave the windows, the cooldown and every hazard
    /// untouched, so a fidget penalty holds until the player moves again.
    pub fn track(&self, star: &mut Star, hazards: &mut [Hazard], delta: Vec2) -> TrackReport {
        if delta == Vec2::ZERO {
            return TrackReport::default();
        }
        let hazards_present = hazards.iter().any(Hazard::is_pending);
        let in_grace = star.in_grace();

        let previous = star.position;
        star.position = star.clamp_travel(previous + delta, self.star.max_distance);
        let moved = star.position.distance(previous);

        star.record(
            moved * Self::movement_weight(in_grace, hazards_present),
            moved * Self::stability_weight(in_grace, hazards_present),
        );

        if !hazards_present && !in_grace {
            let ratio = if self.star.movement_threshold > 0.0 {
                (star.current_movement() / self.star.movement_threshold).min(1.0)
            } else {
                1.0
            };
            let shrunk = star.base_cooldown * (1.0 - ratio * self.star.max_cooldown_reduction);
            star.cooldown = shrunk.max(self.star.min_cooldown);
        } else {
            star.cooldown = (star.cooldown + self.star.cooldown_relax_step).min(star.base_cooldown);
        }

        let countered = self.resolve_counters(star, hazards, delta);
        TrackReport { moved, countered }
    }

    /// Counter every pending flare the input opposes strongly enough.
    fn resolve_counters(&self, star: &mut Star, hazards: &mut [Hazard], delta: Vec2) -> Vec<HazardId> {
        let magnitude = delta.length();
        if magnitude <= 0.0 {
            return Vec::new();
        }
        let heading = delta / magnitude;

        let mut countered = Vec::new();
        for hazard in hazards.iter_mut().filter(|h| h.is_pending()) {
            let opposes = heading.dot(hazard.direction) < self.counter_dot_threshold;
            let strong_enough = magnitude >= hazard.push_strength * self.star.speed;
            if opposes && strong_enough && hazard.counter() {
                log::debug!("Flare {} countered", hazard.id.0);
                countered.push(hazard.id);
            }
        }
        if !countered.is_empty() {
            star.grace = self.star.grace_ticks;
        }
        countered
    }
}
