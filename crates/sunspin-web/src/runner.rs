use sunspin_engine::{
    FixedTimestep, InputEvent, InputQueue, LatestLine, ProtocolLayout, ScenePacker, SessionConfig, SessionEvent,
    SessionOrchestrator,
};

/// Wires the session to the host loop.
///
/// Wall-clock frame deltas go through a fixed timestep; input queued since
/// the previous frame is delivered to the first logical tick only. After the
/// steps run, the latest scene is packed into a flat buffer the host reads
/// through raw pointers.
pub struct SessionRunner {
    session: SessionOrchestrator<LatestLine>,
    input: InputQueue,
    timestep: FixedTimestep,
    packer: ScenePacker,
    /// Events raised by every step of the last frame.
    frame_events: Vec<SessionEvent>,
}

impl SessionRunner {
    pub fn new(config: SessionConfig) -> Self {
        let timestep = FixedTimestep::new(config.fixed_dt);
        let packer = ScenePacker::new(ProtocolLayout::default());
        let mut runner = Self {
            session: SessionOrchestrator::new(config, LatestLine::new()),
            input: InputQueue::new(),
            timestep,
            packer,
            frame_events: Vec::new(),
        };
        runner.packer.pack(runner.session.scene(), &[]);
        runner
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Feed one raw sensor line. Returns whether it parsed.
    pub fn push_sensor_line(&mut self, line: &str) -> bool {
        self.session.sensor_mut().push_line(line)
    }

    /// Run one frame: zero or more logical ticks, then repack the scene.
    pub fn tick(&mut self, dt: f32) {
        let steps = self.timestep.accumulate(dt);
        if steps == 0 {
            // Keep queued input for the next frame that actually ticks.
            return;
        }

        let input = self.input.drain();
        self.frame_events.clear();
        for step in 0..steps {
            let batch: &[InputEvent] = if step == 0 { &input } else { &[] };
            self.session.tick(batch);
            self.frame_events.extend_from_slice(self.session.events());
        }

        self.packer.pack(self.session.scene(), &self.frame_events);
    }

    pub fn session(&self) -> &SessionOrchestrator<LatestLine> {
        &self.session
    }

    pub fn frame_events(&self) -> &[SessionEvent] {
        &self.frame_events
    }

    /// Scene as JSON, for hosts that prefer it over the packed buffer.
    pub fn scene_json(&self) -> String {
        match self.session.scene().to_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("Failed to serialize scene: {}", err);
                String::from("{}")
            }
        }
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.packer.as_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.packer.layout().buffer_total_floats as u32
    }

    pub fn world_width(&self) -> f32 {
        self.session.config().world_width
    }

    pub fn world_height(&self) -> f32 {
        self.session.config().world_height
    }

    // ---- Capacity accessors ----

    pub fn max_hazards(&self) -> u32 {
        self.packer.layout().max_hazards as u32
    }

    pub fn max_events(&self) -> u32 {
        self.packer.layout().max_events as u32
    }

    pub fn packed(&self) -> &[f32] {
        self.packer.buffer()
    }
}
