//! Sensor line protocol.
//!
//! One record per line, whitespace-separated ASCII floats. Seven fields is a
//! full accelerometer record, three fields is a compact drift/rotation record.
//! Anything else is discarded and the tick runs with no input.

use glam::Vec2;

use crate::api::config::DriftConfig;

/// Field count of a full accelerometer record.
pub const FULL_ARITY: usize = 7;
/// Field count of a compact drift/rotation record.
pub const COMPACT_ARITY: usize = 3;

/// A parsed sensor record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorSample {
    /// `ax ay` lead; the remaining fields are carried but unused by the core.
    Full([f32; FULL_ARITY]),
    /// `drift_x drift_y rotation`.
    Compact([f32; COMPACT_ARITY]),
}

/// Why a line was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    #[error("empty sensor line")]
    Empty,
    #[error("expected 7 or 3 fields, got {0}")]
    Arity(usize),
    #[error("field {field:?} is not a finite number")]
    NotNumeric { field: String },
}

impl SensorSample {
    /// Parse one line of the sensor protocol.
    pub fn parse(line: &str) -> Result<Self, SampleError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            return Err(SampleError::Empty);
        }
        if fields.len() != FULL_ARITY && fields.len() != COMPACT_ARITY {
            return Err(SampleError::Arity(fields.len()));
        }

        let mut values = [0.0f32; FULL_ARITY];
        for (slot, field) in values.iter_mut().zip(&fields) {
            *slot = field
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| SampleError::NotNumeric { field: (*field).to_string() })?;
        }

        if fields.len() == FULL_ARITY {
            Ok(SensorSample::Full(values))
        } else {
            Ok(SensorSample::Compact([values[0], values[1], values[2]]))
        }
    }
}

/// Per-tick input derived from one sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorReading {
    /// Star movement delta for the stability tracker.
    pub movement: Vec2,
    /// Instantaneous spin rate, when the record carries one.
    pub rotation: Option<f32>,
    /// Drift delta for the drift integrator.
    pub drift: Vec2,
}

impl SensorReading {
    pub fn from_sample(sample: &SensorSample, config: &DriftConfig) -> Self {
        match *sample {
            SensorSample::Full(fields) => Self {
                movement: Vec2::new(fields[0], fields[1]) * config.full_scale,
                rotation: None,
                drift: Vec2::ZERO,
            },
            SensorSample::Compact([dx, dy, rot]) => {
                let drift = Vec2::new(dx, dy) * config.compact_scale;
                Self {
                    movement: drift,
                    rotation: Some(rot * config.compact_scale),
                    drift,
                }
            }
        }
    }
}

/// Non-blocking source of sensor samples. `poll` never waits.
pub trait SensorSource {
    /// The most recent sample not yet consumed, if any.
    fn poll(&mut self) -> Option<SensorSample>;
}

/// Keeps only the newest successfully parsed line.
///
/// The transport pushes raw lines as they arrive; each tick takes whatever
/// is newest. Malformed lines are logged and dropped without disturbing the
/// pending sample.
#[derive(Debug, Default)]
pub struct LatestLine {
    pending: Option<SensorSample>,
    discarded: u64,
}

impl LatestLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw line. Returns whether it was accepted.
    pub fn push_line(&mut self, line: &str) -> bool {
        match SensorSample::parse(line.trim()) {
            Ok(sample) => {
                self.pending = Some(sample);
                true
            }
            Err(err) => {
                self.discarded += 1;
                log::warn!("Discarding sensor line {:?}: {}", line, err);
                false
            }
        }
    }

    /// Lines rejected since creation.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }
}

impl SensorSource for LatestLine {
    fn poll(&mut self) -> Option<SensorSample> {
        self.pending.take()
    }
}

/// No device attached: every poll is empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSensor;

impl SensorSource for NoSensor {
    fn poll(&mut self) -> Option<SensorSample> {
        None
    }
}
