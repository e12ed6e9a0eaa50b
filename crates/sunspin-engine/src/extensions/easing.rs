// extensions/easing.rs
//
// Pure easing curves for the intro cinematics.
// No dependencies on session state.

/// Easing curve applied to a normalized progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    /// Slow start; ends at full speed.
    QuadIn,
    /// Stronger slow end.
    CubicOut,
    /// Hermite 3t² − 2t³: zero velocity at both ends.
    SmoothStep,
}

impl Easing {
    /// Apply the curve to `t`, clamped to [0, 1]. Monotonic for every variant.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Normalized progress of `elapsed` through `duration` ticks, in [0, 1].
#[inline]
pub fn progress(elapsed: u32, duration: u32) -> f32 {
    if duration == 0 {
        1.0
    } else {
        (elapsed as f32 / duration as f32).min(1.0)
    }
}

/// Remap `t` so the output stays 0 until `delay`, then runs 0 → 1 over the rest.
#[inline]
pub fn delayed(t: f32, delay: f32) -> f32 {
    if delay >= 1.0 {
        return if t >= 1.0 { 1.0 } else { 0.0 };
    }
    ((t - delay) / (1.0 - delay)).clamp(0.0, 1.0)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec2(a: glam::Vec2, b: glam::Vec2, t: f32) -> glam::Vec2 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

/// Interpolate Vec2 with easing.
#[inline]
pub fn ease_vec2(a: glam::Vec2, b: glam::Vec2, t: f32, easing: Easing) -> glam::Vec2 {
    lerp_vec2(a, b, easing.apply(t))
}
