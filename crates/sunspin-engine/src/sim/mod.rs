pub mod drift;
pub mod hazard;
pub mod orbit;
pub mod stability;
pub mod star;

pub use drift::{DriftMonitor, DriftVerdict};
pub use hazard::{Hazard, HazardEngine, HazardReport, HazardState};
pub use orbit::{normalize_angle, OrbitModel, OrbitingBody};
pub use stability::{StabilityTracker, TrackReport};
pub use star::Star;
