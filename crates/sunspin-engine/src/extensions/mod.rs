// extensions/mod.rs
//
// Math helpers shared by the animation and camera code.

pub mod easing;

pub use easing::{delayed, ease, ease_vec2, lerp, lerp_vec2, progress, Easing};
