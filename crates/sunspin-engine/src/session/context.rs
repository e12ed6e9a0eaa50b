use std::f32::consts::TAU;

use glam::Vec2;

use crate::animation::intro::IntroHandoff;
use crate::api::config::SessionConfig;
use crate::api::types::{EndCause, HazardId};
use crate::input::sensor::SensorReading;
use crate::sim::drift::DriftMonitor;
use crate::sim::hazard::HazardEngine;
use crate::sim::orbit::{OrbitModel, OrbitingBody};
use crate::sim::stability::StabilityTracker;
use crate::sim::star::Star;

/// What one gameplay tick produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub moved: f32,
    pub countered: Vec<HazardId>,
    pub spawned: Option<HazardId>,
    pub unstable: bool,
    /// Set on the tick the session ends.
    pub ended: Option<EndCause>,
}

/// All per-session mutable state. Restart builds a fresh one.
pub struct SessionContext {
    pub star: Star,
    pub body: OrbitingBody,
    pub hazards: HazardEngine,
    pub drift: DriftMonitor,
    tracker: StabilityTracker,
    orbit: OrbitModel,
    pub years: f64,
    /// Accumulated star spin, radians in [0, 2π).
    pub spin_phase: f32,
    pub ticks: u64,
    pub outcome: Option<EndCause>,
    practice_mode: bool,
}

impl SessionContext {
    /// `generation` counts restarts; it perturbs the hazard seed.
    pub fn new(config: &SessionConfig, handoff: &IntroHandoff, generation: u64) -> Self {
        let orbit = OrbitModel::new(&config.orbit);
        Self {
            star: Star::new(config).with_grace(handoff.grace_ticks),
            body: OrbitingBody::new(handoff.body_angle, handoff.body_speed),
            hazards: HazardEngine::new(config, config.seed.wrapping_add(generation)),
            drift: DriftMonitor::new(&config.drift, handoff.spin_rate, config.fixed_rotation),
            tracker: StabilityTracker::new(&config.star, &config.hazards),
            orbit,
            years: 0.0,
            spin_phase: handoff.spin_phase,
            ticks: 0,
            outcome: None,
            practice_mode: config.practice_mode,
        }
    }

    pub fn orbit(&self) -> &OrbitModel {
        &self.orbit
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn body_position(&self) -> Vec2 {
        self.orbit.body_position(&self.body, self.star.position)
    }

    /// Fill ratio of the instability bar: the worse of stability and drift.
    pub fn instability(&self, config: &SessionConfig) -> f32 {
        self.star
            .instability_ratio(&config.star)
            .max(self.drift.instability_ratio())
    }

    /// Run one gameplay tick. No-op once the session has ended.
    ///
    /// Order: movement tracking, drift check, hazards, orbit, spin.
    pub fn step(&mut self, movement: Vec2, reading: Option<&SensorReading>, config: &SessionConfig) -> TickReport {
        let mut report = TickReport::default();
        if self.is_over() {
            return report;
        }

        let tracked = self.tracker.track(&mut self.star, self.hazards.hazards_mut(), movement);
        report.moved = tracked.moved;
        report.countered = tracked.countered;

        self.drift.feed(reading);
        let verdict = self.drift.check();
        report.unstable = verdict.unstable;

        let hazards = self.hazards.update(&mut self.star, &mut self.body, &self.orbit, config);
        report.spawned = hazards.spawned;

        self.years += self.orbit.advance(&mut self.body, verdict.unstable);
        self.spin_phase = (self.spin_phase + self.drift.rotation()).rem_euclid(TAU);
        self.ticks += 1;

        let drift_end = match verdict.terminal {
            Some(cause) if self.practice_mode => {
                log::debug!("Drift check would end the session ({:?}), ignored in practice", cause);
                None
            }
            other => other,
        };

        report.ended = hazards.ended.or(drift_end);
        if let Some(cause) = report.ended {
            if self.body.alive {
                self.body.alive = false;
                log::info!("Orbiting body lost: {:?}", cause);
            }
            self.outcome = Some(cause);
            log::info!(
                "Session over after {} ticks, {:.2} years: {:?}",
                self.ticks,
                self.years,
                cause
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::intro::IntroCurves;

    fn context(config: &SessionConfig) -> SessionContext {
        let handoff = IntroCurves::new(config).handoff(0.0);
        SessionContext::new(config, &handoff, 0)
    }

    #[test]
    fn fresh_context_starts_at_rest_with_grace() {
        let config = SessionConfig::default();
        let ctx = context(&config);
        assert_eq!(ctx.star.position, config.star_rest());
        assert_eq!(ctx.star.grace, config.star.opening_grace_ticks);
        assert!(ctx.hazards.hazards().is_empty());
        assert_eq!(ctx.drift.counter(), 0);
        assert!(ctx.body.alive);
        assert!(!ctx.is_over());
    }

    #[test]
    fn years_accumulate_while_running() {
        let config = SessionConfig {
            practice_mode: true,
            ..SessionConfig::default()
        };
        let mut ctx = context(&config);
        let mut last = 0.0;
        for _ in 0..600 {
            ctx.step(Vec2::ZERO, None, &config);
            assert!(ctx.years >= last);
            last = ctx.years;
        }
        assert!(ctx.years > 0.0);
        assert!(!ctx.is_over());
    }

    #[test]
    fn idle_player_loses_to_first_flare() {
        let config = SessionConfig::default();
        let mut ctx = context(&config);
        let mut ended = None;
        for _ in 0..1000 {
            if let Some(cause) = ctx.step(Vec2::ZERO, None, &config).ended {
                ended = Some(cause);
                break;
            }
        }
        assert_eq!(ended, Some(EndCause::FlareStrike));
        assert!(!ctx.body.alive);

        // Further steps are inert.
        let years = ctx.years;
        let report = ctx.step(Vec2::new(1.0, 0.0), None, &config);
        assert_eq!(report, TickReport::default());
        assert_eq!(ctx.years, years);
    }

    #[test]
    fn countering_every_flare_keeps_the_session_alive() {
        let config = SessionConfig::default();
        let mut ctx = context(&config);
        for _ in 0..1500 {
            // Push back against the first pending flare with enough force.
            let movement = ctx
                .hazards
                .hazards()
                .iter()
                .find(|h| h.is_pending())
                .map(|h| -h.direction * config.star.speed)
                .unwrap_or(Vec2::ZERO);
            let report = ctx.step(movement, None, &config);
            assert_eq!(report.ended, None);
        }
        assert!(ctx.body.alive);
    }

    #[test]
    fn wild_rotation_destabilizes_orbit() {
        let config = SessionConfig::default();
        let mut ctx = context(&config);
        let reading = SensorReading {
            movement: Vec2::ZERO,
            rotation: Some(5.0),
            drift: Vec2::ZERO,
        };
        let mut ended = None;
        // Opening grace keeps the flare at bay long enough for the drift check.
        for _ in 0..400 {
            if let Some(cause) = ctx.step(Vec2::ZERO, Some(&reading), &config).ended {
                ended = Some(cause);
                break;
            }
        }
        assert!(ended.is_some());
        assert!(ctx.is_over());
    }

    #[test]
    fn practice_mode_never_ends() {
        let config = SessionConfig {
            practice_mode: true,
            ..SessionConfig::default()
        };
        let mut ctx = context(&config);
        let reading = SensorReading {
            movement: Vec2::ZERO,
            rotation: Some(5.0),
            drift: Vec2::new(50.0, 0.0),
        };
        for _ in 0..2000 {
            assert_eq!(ctx.step(Vec2::ZERO, Some(&reading), &config).ended, None);
        }
        assert!(ctx.body.alive);
        assert!(ctx.instability(&config) > 0.9);
    }
}
