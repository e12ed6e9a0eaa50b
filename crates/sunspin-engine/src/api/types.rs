use bytemuck::{Pod, Zeroable};
use serde::Serialize;

/// Identifier of a hazard within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HazardId(pub u32);

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndCause {
    /// Windowed stability exceeded the terminal threshold.
    StarCollapse,
    /// A flare went active without being countered.
    FlareStrike,
    /// The rotation/drift instability counter ran past its limit.
    OrbitDestabilized,
    /// Drift exceeded the absolute super threshold.
    DriftBreach,
}

impl EndCause {
    pub fn code(self) -> f32 {
        match self {
            EndCause::StarCollapse => 1.0,
            EndCause::FlareStrike => 2.0,
            EndCause::OrbitDestabilized => 3.0,
            EndCause::DriftBreach => 4.0,
        }
    }
}

/// A session event forwarded to the host alongside the scene.
/// `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SessionEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SessionEvent {
    pub const FLOATS: usize = 4;

    pub const PHASE_CHANGED: f32 = 1.0;
    pub const HAZARD_SPAWNED: f32 = 2.0;
    pub const HAZARD_COUNTERED: f32 = 3.0;
    pub const SESSION_ENDED: f32 = 4.0;
    pub const SESSION_RESTARTED: f32 = 5.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}
