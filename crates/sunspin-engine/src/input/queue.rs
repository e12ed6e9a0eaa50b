use glam::Vec2;

/// Browser `keyCode` values the session reacts to.
pub mod keys {
    pub const TAB: u32 = 9;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const R: u32 = 82;
    pub const T: u32 = 84;
}

/// Raw input events delivered by the host between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
}

/// Discrete intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Restart a finished session.
    Restart,
    /// Request to go back to the title screen.
    ReturnToTitle,
    /// Switch movement between the sensor and the arrow keys.
    ToggleSensorControl,
    /// Arrow keys: held state only, no discrete action.
    Movement,
    /// Any other key. Still counts as "a key" for the title screen.
    Other,
}

impl KeyAction {
    pub fn from_key_code(key_code: u32) -> Self {
        match key_code {
            keys::R => KeyAction::Restart,
            keys::T => KeyAction::ReturnToTitle,
            keys::TAB => KeyAction::ToggleSensorControl,
            keys::LEFT | keys::UP | keys::RIGHT | keys::DOWN => KeyAction::Movement,
            _ => KeyAction::Other,
        }
    }
}

/// A queue of input events.
/// The host writes events into the queue; the session drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Held-key state and control-source selection, folded from input events.
#[derive(Debug, Clone, Default)]
pub struct ControlState {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    /// When false, arrow keys drive the star instead of the sensor.
    pub sensor_control: bool,
}

impl ControlState {
    pub fn new(sensor_control: bool) -> Self {
        Self {
            sensor_control,
            ..Self::default()
        }
    }

    /// Fold one event into the held-key state. Returns the decoded action for key presses.
    pub fn apply(&mut self, event: &InputEvent) -> Option<KeyAction> {
        match *event {
            InputEvent::KeyDown { key_code } => {
                self.set_held(key_code, true);
                let action = KeyAction::from_key_code(key_code);
                if action == KeyAction::ToggleSensorControl {
                    self.sensor_control = !self.sensor_control;
                    log::info!("Sensor control: {}", self.sensor_control);
                }
                Some(action)
            }
            InputEvent::KeyUp { key_code } => {
                self.set_held(key_code, false);
                None
            }
        }
    }

    fn set_held(&mut self, key_code: u32, held: bool) {
        match key_code {
            keys::LEFT => self.left = held,
            keys::RIGHT => self.right = held,
            keys::UP => self.up = held,
            keys::DOWN => self.down = held,
            _ => {}
        }
    }

    /// Keyboard-equivalent movement for this tick (y grows downward).
    pub fn keyboard_movement(&self, speed: f32) -> Vec2 {
        let axis = |neg: bool, pos: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down)) * speed
    }
}
