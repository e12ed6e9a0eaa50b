pub mod queue;
pub mod sensor;

pub use queue::{keys, ControlState, InputEvent, InputQueue, KeyAction};
pub use sensor::{LatestLine, NoSensor, SampleError, SensorReading, SensorSample, SensorSource};
