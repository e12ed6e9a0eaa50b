pub mod animation;
pub mod api;
pub mod bridge;
pub mod core;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod session;
pub mod sim;

// Re-export key types at crate root for convenience
pub use animation::{AnimationPhase, IntroCurves, IntroHandoff, PhaseName, SubPhase};
pub use api::config::{DriftConfig, HazardConfig, IntroConfig, OrbitConfig, SessionConfig, StarConfig};
pub use api::types::{EndCause, HazardId, SessionEvent};
pub use bridge::protocol::{ProtocolLayout, ScenePacker};
pub use crate::core::time::FixedTimestep;
pub use input::queue::{keys, ControlState, InputEvent, InputQueue, KeyAction};
pub use input::sensor::{LatestLine, NoSensor, SampleError, SensorReading, SensorSample, SensorSource};
pub use renderer::camera::Camera2D;
pub use session::{SceneDescription, SessionContext, SessionOrchestrator};
pub use sim::{DriftMonitor, Hazard, HazardEngine, HazardState, OrbitModel, OrbitingBody, StabilityTracker, Star};

pub use extensions::{ease, ease_vec2, lerp, lerp_vec2, Easing};
