use glam::Vec2;
use serde::Serialize;

use crate::api::config::SessionConfig;
use crate::api::types::{EndCause, HazardId};
use crate::core::rng::Rng;
use crate::sim::orbit::{OrbitModel, OrbitingBody};
use crate::sim::star::Star;

/// Lifecycle of a hazard.
///
/// Warning counts down to Active. Warning and Active flares may be countered.
/// `TargetingBody` is the lethal strike aimed at the orbiting body and never
/// pushes the star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum HazardState {
    Warning { ticks_left: u32 },
    Active,
    Countered,
    TargetingBody { target: Vec2 },
}

/// A directional flare (or body strike) emitted from the star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hazard {
    pub id: HazardId,
    /// Emission angle in radians, screen space (y down).
    pub angle: f32,
    /// Unit push direction.
    pub direction: Vec2,
    /// Per-tick push magnitude.
    pub push_strength: f32,
    pub state: HazardState,
}

impl Hazard {
    pub fn flare(id: HazardId, angle: f32, push_strength: f32, warning_ticks: u32) -> Self {
        let state = if warning_ticks == 0 {
            HazardState::Active
        } else {
            HazardState::Warning { ticks_left: warning_ticks }
        };
        Self {
            id,
            angle,
            direction: Vec2::from_angle(angle),
            push_strength,
            state,
        }
    }

    pub fn body_strike(id: HazardId, from: Vec2, target: Vec2) -> Self {
        let direction = (target - from).normalize_or_zero();
        Self {
            id,
            angle: direction.y.atan2(direction.x),
            direction,
            push_strength: 0.0,
            state: HazardState::TargetingBody { target },
        }
    }

    /// Warning or Active: still pushing and still counterable.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, HazardState::Warning { .. } | HazardState::Active)
    }

    pub fn is_active(&self) -> bool {
        self.state == HazardState::Active
    }

    pub fn targets_body(&self) -> bool {
        matches!(self.state, HazardState::TargetingBody { .. })
    }

    /// Mark countered. No-op unless pending.
    pub fn counter(&mut self) -> bool {
        if self.is_pending() {
            self.state = HazardState::Countered;
            true
        } else {
            false
        }
    }

    /// Count one tick of warning down. Returns true on the tick it turns Active.
    fn advance(&mut self) -> bool {
        if let HazardState::Warning { ticks_left } = self.state {
            let left = ticks_left.saturating_sub(1);
            if left == 0 {
                self.state = HazardState::Active;
                return true;
            }
            self.state = HazardState::Warning { ticks_left: left };
        }
        false
    }

    /// Fraction of the warning elapsed, 1.0 once active.
    pub fn charge(&self, warning_ticks: u32) -> f32 {
        match self.state {
            HazardState::Warning { ticks_left } if warning_ticks > 0 => {
                1.0 - ticks_left as f32 / warning_ticks as f32
            }
            _ => 1.0,
        }
    }
}

/// What one engine update produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HazardReport {
    pub spawned: Option<HazardId>,
    /// Set when this update destroyed the orbiting body.
    pub ended: Option<EndCause>,
}

/// Spawns, advances and resolves hazards against the star.
#[derive(Debug, Clone)]
pub struct HazardEngine {
    hazards: Vec<Hazard>,
    countdown: f32,
    rng: Rng,
    next_id: u32,
    practice_mode: bool,
    /// Practice mode only: a collapse warning is already out for this excursion.
    collapse_warned: bool,
}

impl HazardEngine {
    pub fn new(config: &SessionConfig, seed: u64) -> Self {
        Self {
            hazards: Vec::new(),
            countdown: config.star.base_cooldown,
            rng: Rng::new(seed),
            next_id: 1,
            practice_mode: config.practice_mode,
            collapse_warned: false,
        }
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn hazards_mut(&mut self) -> &mut [Hazard] {
        &mut self.hazards
    }

    /// Any Warning or Active flare in play.
    pub fn has_pending(&self) -> bool {
        self.hazards.iter().any(Hazard::is_pending)
    }

    /// Ticks until the next spawn attempt.
    pub fn countdown(&self) -> f32 {
        self.countdown
    }

    fn allocate_id(&mut self) -> HazardId {
        let id = HazardId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn a flare with an explicit direction and strength.
    pub fn spawn_flare(&mut self, angle: f32, push_strength: f32, warning_ticks: u32) -> HazardId {
        let id = self.allocate_id();
        self.hazards.push(Hazard::flare(id, angle, push_strength, warning_ticks));
        log::debug!("Flare {} spawned at {:.2} rad, push {:.2}", id.0, angle, push_strength);
        id
    }

    /// Spawn a flare with a sampled direction and strength.
    pub fn spawn_random(&mut self, config: &SessionConfig) -> HazardId {
        let angle = self.rng.range_f32(0.0, std::f32::consts::TAU);
        let push = self.rng.range_f32(config.hazards.min_push, config.hazards.max_push);
        self.spawn_flare(angle, push, config.hazards.warning_ticks)
    }

    fn strike_body(&mut self, star: &Star, body: &mut OrbitingBody, orbit: &OrbitModel, cause: EndCause) -> EndCause {
        let target = orbit.body_position(body, star.position);
        let id = self.allocate_id();
        self.hazards.push(Hazard::body_strike(id, star.position, target));
        body.alive = false;
        log::info!("Orbiting body destroyed: {:?}", cause);
        cause
    }

    /// Advance every hazard by one tick.
    ///
    /// Order: grace countdown, countered cleanup, terminal stability check,
    /// spawn, warning/push, activation check, return to rest.
    pub fn update(
        &mut self,
        star: &mut Star,
        body: &mut OrbitingBody,
        orbit: &OrbitModel,
        config: &SessionConfig,
    ) -> HazardReport {
        let mut report = HazardReport::default();
        if !body.alive {
            return report;
        }

        star.tick_grace();
        self.hazards.retain(|h| h.state != HazardState::Countered);

        if star.is_terminally_unstable(&config.star) {
            if !self.practice_mode {
                report.ended = Some(self.strike_body(star, body, orbit, EndCause::StarCollapse));
                return report;
            }
            if !self.collapse_warned {
                log::warn!(
                    "Star stability past threshold ({:.1}); practice mode keeps the session alive",
                    star.current_stability()
                );
                self.collapse_warned = true;
            }
        } else {
            self.collapse_warned = false;
        }

        self.countdown -= 1.0;
        if self.countdown <= 0.0 {
            if !self.has_pending() {
                report.spawned = Some(self.spawn_random(config));
            }
            self.countdown = star.cooldown;
        }

        let mut struck = false;
        for hazard in self.hazards.iter_mut().filter(|h| h.is_pending()) {
            if hazard.advance() {
                log::debug!("Flare {} is active", hazard.id.0);
            }
            let pushed = star.position + hazard.direction * hazard.push_strength;
            star.position = star.clamp_travel(pushed, config.star.max_flare_distance);
            if hazard.is_active() && !self.practice_mode {
                struck = true;
            }
        }
        if struck {
            report.ended = Some(self.strike_body(star, body, orbit, EndCause::FlareStrike));
            return report;
        }

        if self.hazards.is_empty() {
            star.settle(config.star.return_rate);
        }
        report
    }
}
