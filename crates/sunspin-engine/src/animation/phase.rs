//! Top-level presentation phases and their pure transition function.
//!
//! Each phase carries its own timer, so a transition is just building a new
//! value. Nothing here touches session state; the orchestrator applies the
//! returned [`PhaseEffect`].

use serde::Serialize;

use crate::api::config::IntroConfig;
use crate::api::types::EndCause;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RisingStage {
    Text,
    Pause,
    SunSpin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntroStage {
    ZoomIn,
    EarthFadeIn,
    ZoomOut,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationPhase {
    Title,
    Rising { stage: RisingStage, ticks: u32 },
    EarthIntro { stage: IntroStage, ticks: u32 },
    GamePlay,
    GameOver { cause: EndCause, ticks: u32 },
}

/// Flat phase label for the scene description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PhaseName {
    Title,
    Rising,
    EarthIntro,
    GamePlay,
    GameOver,
}

impl PhaseName {
    pub fn code(self) -> f32 {
        match self {
            PhaseName::Title => 0.0,
            PhaseName::Rising => 1.0,
            PhaseName::EarthIntro => 2.0,
            PhaseName::GamePlay => 3.0,
            PhaseName::GameOver => 4.0,
        }
    }
}

/// Flat sub-phase label for the scene description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubPhase {
    None,
    Text,
    Pause,
    SunSpin,
    ZoomIn,
    EarthFadeIn,
    ZoomOut,
}

impl SubPhase {
    pub fn code(self) -> f32 {
        match self {
            SubPhase::None => 0.0,
            SubPhase::Text => 1.0,
            SubPhase::Pause => 2.0,
            SubPhase::SunSpin => 3.0,
            SubPhase::ZoomIn => 4.0,
            SubPhase::EarthFadeIn => 5.0,
            SubPhase::ZoomOut => 6.0,
        }
    }
}

/// What happened this tick that the phase machine cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseSignals {
    pub any_key: bool,
    pub restart: bool,
    pub return_to_title: bool,
    /// Set once the running session has ended.
    pub ended: Option<EndCause>,
}

/// Side effect the orchestrator must apply alongside a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEffect {
    /// Intro finished: build the session from the intro hand-off.
    BeginSession,
    /// Rebuild the session from scratch.
    RestartSession,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub phase: AnimationPhase,
    pub effect: Option<PhaseEffect>,
}

impl Transition {
    fn stay(phase: AnimationPhase) -> Self {
        Self { phase, effect: None }
    }

    fn to(phase: AnimationPhase, effect: PhaseEffect) -> Self {
        Self {
            phase,
            effect: Some(effect),
        }
    }
}

impl AnimationPhase {
    pub fn name(&self) -> PhaseName {
        match self {
            AnimationPhase::Title => PhaseName::Title,
            AnimationPhase::Rising { .. } => PhaseName::Rising,
            AnimationPhase::EarthIntro { .. } => PhaseName::EarthIntro,
            AnimationPhase::GamePlay => PhaseName::GamePlay,
            AnimationPhase::GameOver { .. } => PhaseName::GameOver,
        }
    }

    pub fn sub_phase(&self) -> SubPhase {
        match self {
            AnimationPhase::Rising { stage, .. } => match stage {
                RisingStage::Text => SubPhase::Text,
                RisingStage::Pause => SubPhase::Pause,
                RisingStage::SunSpin => SubPhase::SunSpin,
            },
            AnimationPhase::EarthIntro { stage, .. } => match stage {
                IntroStage::ZoomIn => SubPhase::ZoomIn,
                IntroStage::EarthFadeIn => SubPhase::EarthFadeIn,
                IntroStage::ZoomOut => SubPhase::ZoomOut,
            },
            _ => SubPhase::None,
        }
    }

    /// Only GamePlay advances the simulation.
    pub fn runs_gameplay(&self) -> bool {
        matches!(self, AnimationPhase::GamePlay)
    }

    /// Ticks spent in the current (sub-)phase.
    pub fn ticks(&self) -> u32 {
        match *self {
            AnimationPhase::Rising { ticks, .. }
            | AnimationPhase::EarthIntro { ticks, .. }
            | AnimationPhase::GameOver { ticks, .. } => ticks,
            AnimationPhase::Title | AnimationPhase::GamePlay => 0,
        }
    }

    /// Length of the current timed sub-phase, if it has one.
    pub fn duration(&self, config: &IntroConfig) -> Option<u32> {
        match self {
            AnimationPhase::Rising { stage, .. } => Some(match stage {
                RisingStage::Text => config.text_ticks,
                RisingStage::Pause => config.pause_ticks,
                RisingStage::SunSpin => config.spin_ticks + config.spin_hold_ticks,
            }),
            AnimationPhase::EarthIntro { stage, .. } => Some(match stage {
                IntroStage::ZoomIn => config.zoom_in_ticks,
                IntroStage::EarthFadeIn => config.fade_in_ticks,
                IntroStage::ZoomOut => config.zoom_out_ticks,
            }),
            AnimationPhase::GameOver { .. } => Some(config.explosion_ticks),
            AnimationPhase::Title | AnimationPhase::GamePlay => None,
        }
    }

    /// Normalized progress through the current sub-phase.
    pub fn progress(&self, config: &IntroConfig) -> f32 {
        match self.duration(config) {
            Some(duration) => crate::extensions::easing::progress(self.ticks(), duration),
            None => 0.0,
        }
    }

    /// Compute the phase for the next tick.
    pub fn next(self, signals: &PhaseSignals, config: &IntroConfig) -> Transition {
        match self {
            AnimationPhase::Title => {
                if signals.any_key {
                    Transition::stay(AnimationPhase::Rising {
                        stage: RisingStage::Text,
                        ticks: 0,
                    })
                } else {
                    Transition::stay(self)
                }
            }
            AnimationPhase::Rising { stage, ticks } => {
                let ticks = ticks + 1;
                let phase = AnimationPhase::Rising { stage, ticks };
                if phase.duration(config).is_some_and(|d| ticks < d) {
                    return Transition::stay(phase);
                }
                Transition::stay(match stage {
                    RisingStage::Text => AnimationPhase::Rising {
                        stage: RisingStage::Pause,
                        ticks: 0,
                    },
                    RisingStage::Pause => AnimationPhase::Rising {
                        stage: RisingStage::SunSpin,
                        ticks: 0,
                    },
                    RisingStage::SunSpin => AnimationPhase::EarthIntro {
                        stage: IntroStage::ZoomIn,
                        ticks: 0,
                    },
                })
            }
            AnimationPhase::EarthIntro { stage, ticks } => {
                let ticks = ticks + 1;
                let phase = AnimationPhase::EarthIntro { stage, ticks };
                if phase.duration(config).is_some_and(|d| ticks < d) {
                    return Transition::stay(phase);
                }
                match stage {
                    IntroStage::ZoomIn => Transition::stay(AnimationPhase::EarthIntro {
                        stage: IntroStage::EarthFadeIn,
                        ticks: 0,
                    }),
                    IntroStage::EarthFadeIn => Transition::stay(AnimationPhase::EarthIntro {
                        stage: IntroStage::ZoomOut,
                        ticks: 0,
                    }),
                    IntroStage::ZoomOut => {
                        Transition::to(AnimationPhase::GamePlay, PhaseEffect::BeginSession)
                    }
                }
            }
            AnimationPhase::GamePlay => match signals.ended {
                Some(cause) => Transition::stay(AnimationPhase::GameOver { cause, ticks: 0 }),
                None => Transition::stay(self),
            },
            AnimationPhase::GameOver { cause, ticks } => {
                if signals.restart {
                    Transition::to(AnimationPhase::GamePlay, PhaseEffect::RestartSession)
                } else if signals.return_to_title {
                    // Title return is not wired to a title flow yet; treat as restart.
                    log::warn!("Return to title requested; restarting the session instead");
                    Transition::to(AnimationPhase::GamePlay, PhaseEffect::RestartSession)
                } else {
                    Transition::stay(AnimationPhase::GameOver {
                        cause,
                        ticks: ticks.saturating_add(1),
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(mut phase: AnimationPhase, signals: &PhaseSignals, config: &IntroConfig, n: u32) -> AnimationPhase {
        for _ in 0..n {
            phase = phase.next(signals, config).phase;
        }
        phase
    }

    #[test]
    fn title_waits_for_a_key() {
        let config = IntroConfig::default();
        let idle = PhaseSignals::default();
        assert_eq!(run(AnimationPhase::Title, &idle, &config, 1000), AnimationPhase::Title);
        let key = PhaseSignals {
            any_key: true,
            ..PhaseSignals::default()
        };
        let next = AnimationPhase::Title.next(&key, &config);
        assert_eq!(
            next.phase,
            AnimationPhase::Rising {
                stage: RisingStage::Text,
                ticks: 0
            }
        );
        assert_eq!(next.effect, None);
    }

    #[test]
    fn intro_sequence_follows_declared_order() {
        let config = IntroConfig::default();
        let idle = PhaseSignals::default();
        let mut phase = AnimationPhase::Rising {
            stage: RisingStage::Text,
            ticks: 0,
        };
        let mut seen = vec![phase.sub_phase()];
        let mut effect = None;
        for _ in 0..10_000 {
            let t = phase.next(&idle, &config);
            phase = t.phase;
            if seen.last() != Some(&phase.sub_phase()) {
                seen.push(phase.sub_phase());
            }
            if t.effect.is_some() {
                effect = t.effect;
                break;
            }
        }
        assert_eq!(
            seen,
            vec![
                SubPhase::Text,
                SubPhase::Pause,
                SubPhase::SunSpin,
                SubPhase::ZoomIn,
                SubPhase::EarthFadeIn,
                SubPhase::ZoomOut,
                SubPhase::None,
            ]
        );
        assert_eq!(phase, AnimationPhase::GamePlay);
        assert_eq!(effect, Some(PhaseEffect::BeginSession));
    }

    #[test]
    fn sub_phase_lasts_its_duration() {
        let config = IntroConfig::default();
        let idle = PhaseSignals::default();
        let start = AnimationPhase::Rising {
            stage: RisingStage::Text,
            ticks: 0,
        };
        let before = run(start, &idle, &config, config.text_ticks - 1);
        assert_eq!(before.sub_phase(), SubPhase::Text);
        let after = run(start, &idle, &config, config.text_ticks);
        assert_eq!(
            after,
            AnimationPhase::Rising {
                stage: RisingStage::Pause,
                ticks: 0
            }
        );
    }

    #[test]
    fn gameplay_ends_into_game_over() {
        let config = IntroConfig::default();
        let ended = PhaseSignals {
            ended: Some(EndCause::FlareStrike),
            ..PhaseSignals::default()
        };
        let t = AnimationPhase::GamePlay.next(&ended, &config);
        assert_eq!(
            t.phase,
            AnimationPhase::GameOver {
                cause: EndCause::FlareStrike,
                ticks: 0
            }
        );
        assert!(!t.phase.runs_gameplay());
    }

    #[test]
    fn game_over_restarts_on_request() {
        let config = IntroConfig::default();
        let over = AnimationPhase::GameOver {
            cause: EndCause::StarCollapse,
            ticks: 3,
        };
        let idle = over.next(&PhaseSignals::default(), &config);
        assert_eq!(idle.phase.ticks(), 4);
        assert_eq!(idle.effect, None);

        let restart = PhaseSignals {
            restart: true,
            ..PhaseSignals::default()
        };
        let t = over.next(&restart, &config);
        assert_eq!(t.phase, AnimationPhase::GamePlay);
        assert_eq!(t.effect, Some(PhaseEffect::RestartSession));

        let title = PhaseSignals {
            return_to_title: true,
            ..PhaseSignals::default()
        };
        assert_eq!(over.next(&title, &config).effect, Some(PhaseEffect::RestartSession));
    }

    #[test]
    fn codes_are_distinct() {
        let subs = [
            SubPhase::None,
            SubPhase::Text,
            SubPhase::Pause,
            SubPhase::SunSpin,
            SubPhase::ZoomIn,
            SubPhase::EarthFadeIn,
            SubPhase::ZoomOut,
        ];
        for (i, a) in subs.iter().enumerate() {
            for b in &subs[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }
}
