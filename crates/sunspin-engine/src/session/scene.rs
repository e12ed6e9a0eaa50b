//! Render-agnostic scene description emitted once per tick.
//!
//! Everything a renderer needs to draw the frame, and nothing it has to
//! compute itself: eased animation parameters, camera framing and hazard
//! geometry are all resolved here.

use glam::Vec2;
use serde::Serialize;

use crate::animation::intro::IntroFrame;
use crate::animation::phase::{AnimationPhase, PhaseName, SubPhase};
use crate::api::config::SessionConfig;
use crate::api::types::{EndCause, HazardId};
use crate::renderer::camera::Camera2D;
use crate::session::context::SessionContext;
use crate::sim::hazard::{Hazard, HazardState};

/// Ticks per half blink period of a warning flare.
const WARNING_BLINK_TICKS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StarView {
    pub position: Vec2,
    pub radius: f32,
    /// Accumulated spin, radians.
    pub spin_phase: f32,
    pub spin_rate: f32,
    /// 1 calm, 0 fully agitated.
    pub heat: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyView {
    pub position: Vec2,
    pub radius: f32,
    pub angle: f32,
    pub alpha: f32,
    /// Draw before the star.
    pub behind_star: bool,
    pub alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HazardKind {
    Warning,
    Active,
    Countered,
    TargetingBody,
}

impl HazardKind {
    pub fn code(self) -> f32 {
        match self {
            HazardKind::Warning => 1.0,
            HazardKind::Active => 2.0,
            HazardKind::Countered => 3.0,
            HazardKind::TargetingBody => 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HazardView {
    pub id: HazardId,
    pub kind: HazardKind,
    /// Where the flare leaves the star surface.
    pub origin: Vec2,
    /// Far end of the drawn flare.
    pub tip: Vec2,
    /// Warning charge, 0 → 1; 1 once active.
    pub intensity: f32,
    /// Blink phase for warnings: drawn only when true.
    pub visible: bool,
}

impl HazardView {
    fn from_hazard(hazard: &Hazard, star: Vec2, radius: f32, config: &SessionConfig) -> Self {
        let origin = star + hazard.direction * radius;
        let intensity = hazard.charge(config.hazards.warning_ticks);
        let (kind, tip, visible) = match hazard.state {
            HazardState::Warning { ticks_left } => (
                HazardKind::Warning,
                origin + hazard.direction * config.hazards.flare_length * intensity,
                (ticks_left / WARNING_BLINK_TICKS) % 2 == 0,
            ),
            HazardState::Active => (
                HazardKind::Active,
                origin + hazard.direction * config.hazards.flare_length,
                true,
            ),
            HazardState::Countered => (HazardKind::Countered, origin, false),
            HazardState::TargetingBody { target } => (HazardKind::TargetingBody, target, true),
        };
        Self {
            id: hazard.id,
            kind,
            origin,
            tip,
            intensity,
            visible,
        }
    }
}

/// One-shot explosion at game over, drawn from the star's last frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExplosionIntent {
    pub origin: Vec2,
    /// Star spin phase when the session ended.
    pub spin_phase: f32,
    /// 0 at game over, 1 when the effect has burned out.
    pub progress: f32,
    /// True only on the first game-over tick.
    pub started: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDescription {
    pub tick: u64,
    pub phase: PhaseName,
    pub sub_phase: SubPhase,
    /// Progress through the current timed sub-phase.
    pub phase_progress: f32,
    pub camera: Camera2D,
    pub text_offset: Option<f32>,
    pub star: StarView,
    pub body: Option<BodyView>,
    pub hazards: Vec<HazardView>,
    /// Instability bar fill, 0 → 1.
    pub instability: f32,
    pub years: f64,
    pub sensor_control: bool,
    pub practice_mode: bool,
    pub end_cause: Option<EndCause>,
    pub explosion: Option<ExplosionIntent>,
}

impl SceneDescription {
    /// Scene for Title, Rising and EarthIntro.
    pub fn intro(
        tick: u64,
        phase: &AnimationPhase,
        frame: &IntroFrame,
        spin_phase: f32,
        sensor_control: bool,
        config: &SessionConfig,
    ) -> Self {
        let rest_center = config.star_rest() + Vec2::new(0.0, config.orbit.center_offset_y);
        Self {
            tick,
            phase: phase.name(),
            sub_phase: phase.sub_phase(),
            phase_progress: phase.progress(&config.intro),
            camera: frame.camera,
            text_offset: frame.text_offset,
            star: StarView {
                position: frame.star_position,
                radius: config.star.radius,
                spin_phase,
                spin_rate: frame.spin_rate,
                heat: 1.0,
            },
            body: frame.body.map(|body| BodyView {
                position: body.position,
                radius: config.orbit.body_radius,
                angle: body.angle,
                alpha: body.alpha,
                behind_star: body.position.y < rest_center.y,
                alive: true,
            }),
            hazards: Vec::new(),
            instability: 0.0,
            years: 0.0,
            sensor_control,
            practice_mode: config.practice_mode,
            end_cause: None,
            explosion: None,
        }
    }

    /// Scene for GamePlay and GameOver, read from the live session.
    pub fn session(
        tick: u64,
        phase: &AnimationPhase,
        ctx: &SessionContext,
        sensor_control: bool,
        config: &SessionConfig,
    ) -> Self {
        let star = &ctx.star;
        let body_position = ctx.body_position();
        let body_alive = ctx.body.alive;

        let explosion = match *phase {
            AnimationPhase::GameOver { ticks, .. } if ticks < config.intro.explosion_ticks => {
                Some(ExplosionIntent {
                    origin: star.position,
                    spin_phase: ctx.spin_phase,
                    progress: phase.progress(&config.intro),
                    started: ticks == 0,
                })
            }
            _ => None,
        };

        Self {
            tick,
            phase: phase.name(),
            sub_phase: phase.sub_phase(),
            phase_progress: phase.progress(&config.intro),
            camera: Camera2D::new(config.world_width, config.world_height),
            text_offset: None,
            star: StarView {
                position: star.position,
                radius: star.radius,
                spin_phase: ctx.spin_phase,
                spin_rate: ctx.drift.rotation(),
                heat: star.heat(&config.star),
            },
            body: Some(BodyView {
                position: body_position,
                radius: config.orbit.body_radius,
                angle: ctx.body.angle,
                alpha: if body_alive { 1.0 } else { 0.0 },
                behind_star: ctx.orbit().is_behind(&ctx.body, star.position),
                alive: body_alive,
            }),
            hazards: ctx
                .hazards
                .hazards()
                .iter()
                .map(|h| HazardView::from_hazard(h, star.position, star.radius, config))
                .collect(),
            instability: ctx.instability(config),
            years: ctx.years,
            sensor_control,
            practice_mode: config.practice_mode,
            end_cause: ctx.outcome,
            explosion,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
