use glam::Vec2;
use serde::Serialize;

use crate::animation::phase::{AnimationPhase, IntroStage, RisingStage};
use crate::api::config::SessionConfig;
use crate::extensions::easing::{delayed, ease, ease_vec2, lerp, lerp_vec2, progress, Easing};
use crate::renderer::camera::Camera2D;
use crate::sim::orbit::{normalize_angle, OrbitModel};

/// Orbiting body as drawn during the intro.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntroBody {
    pub position: Vec2,
    pub angle: f32,
    pub alpha: f32,
}

/// Everything the intro phases contribute to one scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntroFrame {
    pub camera: Camera2D,
    pub star_position: Vec2,
    pub spin_rate: f32,
    /// Scroll position of the rising text, 0 → 1.
    pub text_offset: Option<f32>,
    pub body: Option<IntroBody>,
}

/// Values gameplay starts from so the intro flows into it without a jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroHandoff {
    pub body_angle: f32,
    /// Angular speed the ZoomOut ended on, radians per tick.
    pub body_speed: f32,
    pub spin_rate: f32,
    pub spin_phase: f32,
    pub grace_ticks: u32,
}

/// Eased parameter curves for Title, Rising and EarthIntro.
///
/// All functions are pure in the phase value; the same phase always yields the
/// same frame.
#[derive(Debug, Clone)]
pub struct IntroCurves {
    config: SessionConfig,
    orbit: OrbitModel,
    rest: Vec2,
}

impl IntroCurves {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            config: config.clone(),
            orbit: OrbitModel::new(&config.orbit),
            rest: config.star_rest(),
        }
    }

    fn neutral_camera(&self) -> Camera2D {
        Camera2D::new(self.config.world_width, self.config.world_height)
    }

    /// Star start point for the rise: just below the bottom edge.
    pub fn star_start(&self) -> Vec2 {
        Vec2::new(self.rest.x, self.config.world_height + self.config.star.radius)
    }

    /// Body angle during ZoomOut at normalized time `t`.
    pub fn body_angle_at(&self, t: f32) -> f32 {
        let intro = &self.config.intro;
        let swept = intro.body_arc * Easing::QuadIn.apply(t);
        normalize_angle(intro.body_start_angle + self.config.orbit.direction * swept)
    }

    fn body_at(&self, angle: f32, alpha: f32) -> IntroBody {
        IntroBody {
            position: self.orbit.position_at(self.rest, angle),
            angle,
            alpha,
        }
    }

    /// Point the camera holds on while the body fades in.
    pub fn body_start_position(&self) -> Vec2 {
        self.orbit.position_at(self.rest, self.config.intro.body_start_angle)
    }

    pub fn spin_rate(&self, phase: &AnimationPhase) -> f32 {
        let intro = &self.config.intro;
        match *phase {
            AnimationPhase::Rising {
                stage: RisingStage::SunSpin,
                ticks,
            } => lerp(intro.spin_floor, intro.spin_target, progress(ticks, intro.spin_ticks)),
            AnimationPhase::EarthIntro { .. } => intro.spin_target,
            _ => intro.spin_floor,
        }
    }

    pub fn star_position(&self, phase: &AnimationPhase) -> Vec2 {
        match *phase {
            AnimationPhase::Title
            | AnimationPhase::Rising {
                stage: RisingStage::Text | RisingStage::Pause,
                ..
            } => self.star_start(),
            AnimationPhase::Rising {
                stage: RisingStage::SunSpin,
                ticks,
            } => ease_vec2(
                self.star_start(),
                self.rest,
                progress(ticks, self.config.intro.spin_ticks),
                Easing::CubicOut,
            ),
            _ => self.rest,
        }
    }

    /// Frame for a pre-gameplay phase. `None` for GamePlay and GameOver.
    pub fn frame(&self, phase: &AnimationPhase) -> Option<IntroFrame> {
        let intro = &self.config.intro;
        let mut camera = self.neutral_camera();
        let mut text_offset = None;
        let mut body = None;

        match *phase {
            AnimationPhase::Title => {}
            AnimationPhase::Rising { stage, ticks } => {
                if stage == RisingStage::Text {
                    text_offset = Some(progress(ticks, intro.text_ticks));
                }
            }
            AnimationPhase::EarthIntro {
                stage: IntroStage::ZoomIn,
                ticks,
            } => {
                let t = progress(ticks, intro.zoom_in_ticks);
                camera.look_at(ease_vec2(self.rest, self.body_start_position(), t, Easing::SmoothStep));
                camera.set_zoom(ease(1.0, intro.zoom_scale, delayed(t, intro.zoom_delay), Easing::SmoothStep));
                body = Some(self.body_at(intro.body_start_angle, 0.0));
            }
            AnimationPhase::EarthIntro {
                stage: IntroStage::EarthFadeIn,
                ticks,
            } => {
                let t = progress(ticks, intro.fade_in_ticks);
                camera.look_at(self.body_start_position());
                camera.set_zoom(intro.zoom_scale);
                body = Some(self.body_at(intro.body_start_angle, Easing::QuadIn.apply(t)));
            }
            AnimationPhase::EarthIntro {
                stage: IntroStage::ZoomOut,
                ticks,
            } => {
                let t = progress(ticks, intro.zoom_out_ticks);
                let angle = self.body_angle_at(t);
                camera.look_at(self.zoom_out_center(t));
                camera.set_zoom(ease(intro.zoom_scale, 1.0, t, Easing::SmoothStep));
                body = Some(self.body_at(angle, 1.0));
            }
            AnimationPhase::GamePlay | AnimationPhase::GameOver { .. } => return None,
        }

        Some(IntroFrame {
            camera,
            star_position: self.star_position(phase),
            spin_rate: self.spin_rate(phase),
            text_offset,
            body,
        })
    }

    /// Camera center while zooming out: follow the body with fading strength
    /// for the first half, then glide back to neutral.
    fn zoom_out_center(&self, t: f32) -> Vec2 {
        let intro = &self.config.intro;
        let neutral = self.neutral_camera().neutral_center();
        let follow = |t: f32| {
            let strength = lerp(intro.follow_start, intro.follow_end, (t / 0.5).min(1.0));
            let body = self.orbit.position_at(self.rest, self.body_angle_at(t));
            lerp_vec2(neutral, body, strength)
        };
        if t <= 0.5 {
            follow(t)
        } else {
            let half = follow(0.5);
            ease_vec2(half, neutral, (t - 0.5) / 0.5, Easing::SmoothStep)
        }
    }

    /// Gameplay starting values. `spin_phase` carries the star's accumulated spin.
    pub fn handoff(&self, spin_phase: f32) -> IntroHandoff {
        let intro = &self.config.intro;
        let end = self.body_angle_at(1.0);
        let speed = if intro.zoom_out_ticks == 0 {
            self.config.orbit.base_speed
        } else {
            let last_step = 1.0 - 1.0 / intro.zoom_out_ticks as f32;
            let before = self.body_angle_at(last_step);
            // Unwrapped difference; the arc per tick is far below π.
            let diff = normalize_angle(end - before + std::f32::consts::PI) - std::f32::consts::PI;
            diff.abs()
        };
        IntroHandoff {
            body_angle: end,
            body_speed: speed,
            spin_rate: intro.spin_target,
            spin_phase,
            grace_ticks: self.config.star.opening_grace_ticks,
        }
    }

    /// Session-start values for a restart from GameOver: no intro spin and
    /// no opening grace.
    pub fn restart_handoff(&self) -> IntroHandoff {
        IntroHandoff {
            grace_ticks: 0,
            ..self.handoff(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curves() -> IntroCurves {
        IntroCurves::new(&SessionConfig::default())
    }

    fn zoom_out(ticks: u32) -> AnimationPhase {
        AnimationPhase::EarthIntro {
            stage: IntroStage::ZoomOut,
            ticks,
        }
    }

    #[test]
    fn star_rises_monotonically_to_rest() {
        let c = curves();
        let config = SessionConfig::default();
        let mut last = f32::MAX;
        for ticks in 0..=config.intro.spin_ticks {
            let p = c.star_position(&AnimationPhase::Rising {
                stage: RisingStage::SunSpin,
                ticks,
            });
            assert!(p.y <= last);
            last = p.y;
        }
        assert!((last - config.star_rest().y).abs() < 1e-3);
    }

    #[test]
    fn spin_ramps_from_floor_to_target() {
        let c = curves();
        let intro = SessionConfig::default().intro;
        let at = |ticks| {
            c.spin_rate(&AnimationPhase::Rising {
                stage: RisingStage::SunSpin,
                ticks,
            })
        };
        assert!((at(0) - intro.spin_floor).abs() < 1e-6);
        assert!((at(intro.spin_ticks) - intro.spin_target).abs() < 1e-6);
        assert!((at(intro.spin_ticks + 30) - intro.spin_target).abs() < 1e-6);
    }

    #[test]
    fn zoom_in_ends_on_body_at_full_zoom() {
        let c = curves();
        let intro = SessionConfig::default().intro;
        let frame = c
            .frame(&AnimationPhase::EarthIntro {
                stage: IntroStage::ZoomIn,
                ticks: intro.zoom_in_ticks,
            })
            .unwrap();
        assert!((frame.camera.center - c.body_start_position()).length() < 1e-3);
        assert!((frame.camera.zoom - intro.zoom_scale).abs() < 1e-5);
        assert_eq!(frame.body.unwrap().alpha, 0.0);
    }

    #[test]
    fn fade_in_reaches_full_alpha() {
        let c = curves();
        let intro = SessionConfig::default().intro;
        let phase = |ticks| AnimationPhase::EarthIntro {
            stage: IntroStage::EarthFadeIn,
            ticks,
        };
        assert_eq!(c.frame(&phase(0)).unwrap().body.unwrap().alpha, 0.0);
        let end = c.frame(&phase(intro.fade_in_ticks)).unwrap();
        assert!((end.body.unwrap().alpha - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zoom_out_starts_where_fade_in_ended() {
        let c = curves();
        let start = c.frame(&zoom_out(0)).unwrap();
        assert!((start.camera.center - c.body_start_position()).length() < 1e-3);
        assert!((start.camera.zoom - SessionConfig::default().intro.zoom_scale).abs() < 1e-5);
    }

    #[test]
    fn zoom_out_ends_at_neutral_camera() {
        let c = curves();
        let intro = SessionConfig::default().intro;
        let end = c.frame(&zoom_out(intro.zoom_out_ticks)).unwrap();
        assert!(end.camera.is_neutral());
    }

    #[test]
    fn zoom_out_camera_moves_without_jumps() {
        let c = curves();
        let intro = SessionConfig::default().intro;
        let mut prev = c.frame(&zoom_out(0)).unwrap().camera.center;
        for ticks in 1..=intro.zoom_out_ticks {
            let center = c.frame(&zoom_out(ticks)).unwrap().camera.center;
            assert!((center - prev).length() < 20.0, "jump at tick {ticks}");
            prev = center;
        }
    }

    #[test]
    fn handoff_matches_final_zoom_out_frame() {
        let c = curves();
        let config = SessionConfig::default();
        let handoff = c.handoff(1.5);
        let end = c.frame(&zoom_out(config.intro.zoom_out_ticks)).unwrap();
        let body = end.body.unwrap();
        assert!((handoff.body_angle - body.angle).abs() < 1e-6);
        // QuadIn over 180 ticks ends at about 2 * arc / 180.
        assert!((handoff.body_speed - 0.01).abs() < 5e-4, "speed {}", handoff.body_speed);
        assert_eq!(handoff.spin_rate, config.intro.spin_target);
        assert_eq!(handoff.spin_phase, 1.5);
        assert_eq!(handoff.grace_ticks, config.star.opening_grace_ticks);
    }

    #[test]
    fn restart_handoff_has_no_grace() {
        let c = curves();
        let restart = c.restart_handoff();
        assert_eq!(restart.grace_ticks, 0);
        assert_eq!(restart.spin_phase, 0.0);
        assert_eq!(restart.body_angle, c.handoff(0.0).body_angle);
    }

    #[test]
    fn text_offset_only_during_text() {
        let c = curves();
        let text = c
            .frame(&AnimationPhase::Rising {
                stage: RisingStage::Text,
                ticks: 0,
            })
            .unwrap();
        assert_eq!(text.text_offset, Some(0.0));
        let pause = c
            .frame(&AnimationPhase::Rising {
                stage: RisingStage::Pause,
                ticks: 0,
            })
            .unwrap();
        assert_eq!(pause.text_offset, None);
        assert!(c.frame(&AnimationPhase::GamePlay).is_none());
    }
}
