pub mod config;
pub mod types;

pub use config::{DriftConfig, HazardConfig, IntroConfig, OrbitConfig, SessionConfig, StarConfig};
pub use types::{EndCause, HazardId, SessionEvent};
