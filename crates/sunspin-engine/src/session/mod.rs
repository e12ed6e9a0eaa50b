pub mod context;
pub mod orchestrator;
pub mod scene;

pub use context::{SessionContext, TickReport};
pub use orchestrator::SessionOrchestrator;
pub use scene::{BodyView, ExplosionIntent, HazardKind, HazardView, SceneDescription, StarView};
