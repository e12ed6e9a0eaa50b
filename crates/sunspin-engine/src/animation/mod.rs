pub mod intro;
pub mod phase;

pub use intro::{IntroBody, IntroCurves, IntroFrame, IntroHandoff};
pub use phase::{
    AnimationPhase, IntroStage, PhaseEffect, PhaseName, PhaseSignals, RisingStage, SubPhase, Transition,
};
