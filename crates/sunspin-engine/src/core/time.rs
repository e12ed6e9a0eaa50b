/// Number of logical ticks per second all tick-counted durations assume.
pub const TICKS_PER_SECOND: u32 = 60;

/// Convert a duration in seconds to whole logical ticks (rounded).
pub fn seconds_to_ticks(seconds: f32) -> u32 {
    (seconds * TICKS_PER_SECOND as f32).round().max(0.0) as u32
}

/// Fixed timestep accumulator.
///
/// Turns variable wall-clock frame deltas into a whole number of logical
/// ticks. Every logical tick still runs individually; the cap only drops
/// wall-clock time after a long stall.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: 10,
        }
    }

    /// Add frame time to the accumulator. Returns the number of ticks to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }
}
