//! `#[wasm_bindgen]` exports for the Sunspin session.
//!
//! wasm-bindgen cannot export the runner directly, so a single
//! `thread_local!` instance backs free functions the host calls each frame.

pub mod runner;

pub use runner::SessionRunner;

use std::cell::RefCell;

use sunspin_engine::{InputEvent, SessionConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SessionRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. Returns `None` (and logs) before `game_init`.
fn with_runner<R>(f: impl FnOnce(&mut SessionRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("Session not initialized. Call game_init() first.");
                None
            }
        }
    })
}

/// Create the session. `config_json` may be empty; invalid JSON falls back to defaults.
#[wasm_bindgen]
pub fn game_init(config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        SessionConfig::default()
    } else {
        match SessionConfig::from_json(config_json) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Invalid session config, using defaults: {}", err);
                SessionConfig::default()
            }
        }
    };
    let practice = config.practice_mode;

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(SessionRunner::new(config));
    });
    log::info!("sunspin: initialized (practice mode: {})", practice);
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn game_key_up(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
}

/// Feed one line from the serial transport.
#[wasm_bindgen]
pub fn game_sensor_line(line: &str) -> bool {
    with_runner(|r| r.push_sensor_line(line)).unwrap_or(false)
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_scene_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_scene_json() -> String {
    with_runner(|r| r.scene_json()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height()).unwrap_or(0.0)
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_hazards() -> u32 {
    with_runner(|r| r.max_hazards()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events()).unwrap_or(0)
}
