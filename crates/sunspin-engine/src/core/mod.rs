pub mod rng;
pub mod time;
pub mod window;

pub use rng::Rng;
pub use time::{FixedTimestep, TICKS_PER_SECOND, seconds_to_ticks};
pub use window::SlidingWindow;
