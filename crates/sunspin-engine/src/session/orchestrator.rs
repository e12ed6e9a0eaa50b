use glam::Vec2;

use crate::animation::intro::IntroCurves;
use crate::animation::phase::{AnimationPhase, PhaseEffect, PhaseSignals};
use crate::api::config::SessionConfig;
use crate::api::types::SessionEvent;
use crate::input::queue::{ControlState, InputEvent, KeyAction};
use crate::input::sensor::{SensorReading, SensorSource};
use crate::session::context::SessionContext;
use crate::session::scene::SceneDescription;

/// Drives one player session: input, sensor, phase machine and simulation.
///
/// Call [`SessionOrchestrator::tick`] once per logical tick with the input
/// events that arrived since the previous call.
pub struct SessionOrchestrator<S: SensorSource> {
    config: SessionConfig,
    curves: IntroCurves,
    phase: AnimationPhase,
    context: SessionContext,
    controls: ControlState,
    sensor: S,
    /// Restarts so far.
    generation: u64,
    /// Star spin accumulated during the intro, carried into gameplay.
    intro_spin: f32,
    tick: u64,
    events: Vec<SessionEvent>,
    scene: SceneDescription,
}

impl<S: SensorSource> SessionOrchestrator<S> {
    pub fn new(config: SessionConfig, sensor: S) -> Self {
        let curves = IntroCurves::new(&config);
        let context = SessionContext::new(&config, &curves.handoff(0.0), 0);
        let phase = AnimationPhase::Title;
        let controls = ControlState::new(false);
        let scene = Self::describe(0, &phase, &curves, &context, 0.0, controls.sensor_control, &config);
        Self {
            config,
            curves,
            phase,
            context,
            controls,
            sensor,
            generation: 0,
            intro_spin: 0.0,
            tick: 0,
            events: Vec::new(),
            scene,
        }
    }

    /// Start with movement driven by the sensor instead of the arrow keys.
    pub fn with_sensor_control(mut self, enabled: bool) -> Self {
        self.controls.sensor_control = enabled;
        self.scene.sensor_control = enabled;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> &AnimationPhase {
        &self.phase
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn scene(&self) -> &SceneDescription {
        &self.scene
    }

    /// Events raised during the most recent tick.
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn sensor_control(&self) -> bool {
        self.controls.sensor_control
    }

    fn describe(
        tick: u64,
        phase: &AnimationPhase,
        curves: &IntroCurves,
        context: &SessionContext,
        intro_spin: f32,
        sensor_control: bool,
        config: &SessionConfig,
    ) -> SceneDescription {
        match curves.frame(phase) {
            Some(frame) => SceneDescription::intro(tick, phase, &frame, intro_spin, sensor_control, config),
            None => SceneDescription::session(tick, phase, context, sensor_control, config),
        }
    }

    /// Star movement for this tick from whichever source is in control.
    fn movement(&self, reading: Option<&SensorReading>) -> Vec2 {
        if self.controls.sensor_control && self.config.fixed_rotation.is_none() {
            reading.map(|r| r.movement).unwrap_or(Vec2::ZERO)
        } else {
            self.controls.keyboard_movement(self.config.star.speed)
        }
    }

    fn run_gameplay(&mut self, reading: Option<&SensorReading>) {
        let movement = self.movement(reading);
        let report = self.context.step(movement, reading, &self.config);

        if let Some(id) = report.spawned {
            if let Some(hazard) = self.context.hazards.hazards().iter().find(|h| h.id == id) {
                self.events.push(SessionEvent::new(
                    SessionEvent::HAZARD_SPAWNED,
                    id.0 as f32,
                    hazard.angle,
                    hazard.push_strength,
                ));
            }
        }
        for id in &report.countered {
            self.events
                .push(SessionEvent::new(SessionEvent::HAZARD_COUNTERED, id.0 as f32, 0.0, 0.0));
        }
        if let Some(cause) = report.ended {
            self.events.push(SessionEvent::new(
                SessionEvent::SESSION_ENDED,
                cause.code(),
                self.context.years as f32,
                self.context.ticks as f32,
            ));
        }
    }

    fn apply_effect(&mut self, effect: PhaseEffect) {
        match effect {
            PhaseEffect::BeginSession => {
                let handoff = self.curves.handoff(self.intro_spin);
                self.context = SessionContext::new(&self.config, &handoff, self.generation);
                log::info!("Gameplay started at body angle {:.3}", handoff.body_angle);
            }
            PhaseEffect::RestartSession => {
                self.generation += 1;
                let handoff = self.curves.restart_handoff();
                self.context = SessionContext::new(&self.config, &handoff, self.generation);
                self.events.push(SessionEvent::new(
                    SessionEvent::SESSION_RESTARTED,
                    self.generation as f32,
                    0.0,
                    0.0,
                ));
                log::info!("Session restarted (generation {})", self.generation);
            }
        }
    }

    /// Advance one logical tick and return the resulting scene.
    pub fn tick(&mut self, input: &[InputEvent]) -> &SceneDescription {
        self.events.clear();

        let mut signals = PhaseSignals::default();
        for event in input {
            if let Some(action) = self.controls.apply(event) {
                signals.any_key = true;
                match action {
                    KeyAction::Restart => signals.restart = true,
                    KeyAction::ReturnToTitle => signals.return_to_title = true,
                    KeyAction::ToggleSensorControl | KeyAction::Movement | KeyAction::Other => {}
                }
            }
        }

        // Always drain the sensor so stale samples never leak into a later phase.
        let reading = self
            .sensor
            .poll()
            .map(|sample| SensorReading::from_sample(&sample, &self.config.drift));

        if self.phase.runs_gameplay() {
            self.run_gameplay(reading.as_ref());
        } else if !matches!(self.phase, AnimationPhase::GameOver { .. }) {
            let spin = self.intro_spin + self.curves.spin_rate(&self.phase);
            self.intro_spin = spin.rem_euclid(std::f32::consts::TAU);
        }
        signals.ended = self.context.outcome;

        let transition = self.phase.next(&signals, &self.config.intro);
        if transition.phase.name() != self.phase.name() || transition.phase.sub_phase() != self.phase.sub_phase() {
            log::info!(
                "Phase {:?}/{:?} -> {:?}/{:?}",
                self.phase.name(),
                self.phase.sub_phase(),
                transition.phase.name(),
                transition.phase.sub_phase()
            );
            self.events.push(SessionEvent::new(
                SessionEvent::PHASE_CHANGED,
                transition.phase.name().code(),
                transition.phase.sub_phase().code(),
                0.0,
            ));
        }
        self.phase = transition.phase;
        if let Some(effect) = transition.effect {
            self.apply_effect(effect);
        }

        self.tick += 1;
        self.scene = Self::describe(
            self.tick,
            &self.phase,
            &self.curves,
            &self.context,
            self.intro_spin,
            self.controls.sensor_control,
            &self.config,
        );
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::phase::{PhaseName, SubPhase};
    use crate::api::types::EndCause;
    use crate::input::queue::keys;
    use crate::input::sensor::{LatestLine, NoSensor};

    fn press(key_code: u32) -> Vec<InputEvent> {
        vec![InputEvent::KeyDown { key_code }, InputEvent::KeyUp { key_code }]
    }

    fn to_gameplay<S: SensorSource>(session: &mut SessionOrchestrator<S>) {
        session.tick(&press(32));
        for _ in 0..10_000 {
            if session.phase().runs_gameplay() {
                return;
            }
            session.tick(&[]);
        }
        panic!("intro never finished");
    }

    fn to_game_over<S: SensorSource>(session: &mut SessionOrchestrator<S>) {
        for _ in 0..10_000 {
            if matches!(session.phase(), AnimationPhase::GameOver { .. }) {
                return;
            }
            session.tick(&[]);
        }
        panic!("session never ended");
    }

    #[test]
    fn title_waits_for_any_key() {
        let mut session = SessionOrchestrator::new(SessionConfig::default(), NoSensor);
        for _ in 0..100 {
            session.tick(&[]);
        }
        assert_eq!(session.scene().phase, PhaseName::Title);
        let scene = session.tick(&press(keys::LEFT));
        assert_eq!(scene.phase, PhaseName::Rising);
        assert_eq!(scene.sub_phase, SubPhase::Text);
        assert_eq!(session.events()[0].kind, SessionEvent::PHASE_CHANGED);
    }

    #[test]
    fn intro_hands_off_without_a_jump() {
        let mut session = SessionOrchestrator::new(SessionConfig::default(), NoSensor);
        to_gameplay(&mut session);
        let scene = session.scene();
        assert_eq!(scene.phase, PhaseName::GamePlay);
        assert!(scene.camera.is_neutral());
        assert_eq!(scene.star.position, session.config().star_rest());

        let handoff = IntroCurves::new(session.config()).handoff(0.0);
        assert!((session.context().body.angle - handoff.body_angle).abs() < 1e-6);
        assert!((session.context().body.speed - handoff.body_speed).abs() < 1e-6);
        assert_eq!(session.context().ticks, 0);
    }

    #[test]
    fn idle_session_ends_and_restart_reinitializes() {
        let mut session = SessionOrchestrator::new(SessionConfig::default(), NoSensor);
        to_gameplay(&mut session);
        to_game_over(&mut session);
        assert_eq!(session.scene().end_cause, Some(EndCause::FlareStrike));
        assert!(session.scene().explosion.is_some());

        // GameOver ignores arbitrary keys.
        session.tick(&press(keys::LEFT));
        assert!(matches!(session.phase(), AnimationPhase::GameOver { .. }));

        session.tick(&press(keys::R));
        assert!(session.phase().runs_gameplay());
        assert_eq!(session.generation(), 1);
        assert!(session
            .events()
            .iter()
            .any(|e| e.kind == SessionEvent::SESSION_RESTARTED));

        let ctx = session.context();
        let config = session.config();
        assert_eq!(ctx.star.position, config.star_rest());
        assert_eq!(ctx.star.current_movement(), 0.0);
        assert_eq!(ctx.star.current_stability(), 0.0);
        assert_eq!(ctx.star.cooldown, config.star.base_cooldown);
        assert_eq!(ctx.star.grace, 0);
        assert!(!ctx.star.in_grace());
        assert!(ctx.hazards.hazards().is_empty());
        assert_eq!(ctx.drift.counter(), 0);
        assert_eq!(ctx.years, 0.0);
        assert!(ctx.body.alive);
        assert!(!ctx.is_over());
    }

    #[test]
    fn return_to_title_key_restarts() {
        let mut session = SessionOrchestrator::new(SessionConfig::default(), NoSensor);
        to_gameplay(&mut session);
        to_game_over(&mut session);
        session.tick(&press(keys::T));
        assert!(session.phase().runs_gameplay());
        assert!(!session.context().is_over());
    }

    #[test]
    fn arrow_keys_move_the_star() {
        let mut session = SessionOrchestrator::new(SessionConfig::default(), NoSensor);
        to_gameplay(&mut session);
        let start = session.context().star.position;
        session.tick(&[InputEvent::KeyDown { key_code: keys::RIGHT }]);
        session.tick(&[]);
        let moved = session.context().star.position - start;
        assert!(moved.x > 0.0);
        session.tick(&[InputEvent::KeyUp { key_code: keys::RIGHT }]);
    }

    #[test]
    fn sensor_moves_the_star_when_in_control() {
        let mut session = SessionOrchestrator::new(SessionConfig::default(), LatestLine::new()).with_sensor_control(true);
        to_gameplay(&mut session);
        let start = session.context().star.position;
        session.sensor_mut().push_line("0 2000 0");
        session.tick(&[]);
        let moved = session.context().star.position - start;
        // One unit of travel, minus the 1% settle toward rest.
        assert!((moved.y - 0.99).abs() < 1e-3, "moved {moved:?}");

        // Tab hands control back to the keyboard; sensor lines stop moving the star.
        session.tick(&press(keys::TAB));
        assert!(!session.sensor_control());
        let before = session.context().star.position;
        session.sensor_mut().push_line("0 2000 0");
        session.tick(&[]);
        assert!((session.context().star.position - before).length() < 0.1);
    }

    #[test]
    fn practice_session_never_ends() {
        let config = SessionConfig {
            practice_mode: true,
            ..SessionConfig::default()
        };
        let mut session = SessionOrchestrator::new(config, NoSensor);
        to_gameplay(&mut session);
        for _ in 0..3000 {
            session.tick(&[]);
        }
        assert!(session.phase().runs_gameplay());
        assert!(session.scene().years > 0.0);
    }
}
