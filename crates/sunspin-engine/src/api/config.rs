use serde::{Deserialize, Serialize};

use crate::core::time::{seconds_to_ticks, TICKS_PER_SECOND};

/// Session-wide configuration. Every tunable the simulation reads lives here.
///
/// All durations are in logical ticks; all distances in world units.
/// Missing JSON fields fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in world units.
    pub world_width: f32,
    /// World height in world units.
    pub world_height: f32,
    /// Seed for hazard direction/strength sampling.
    pub seed: u64,
    /// Practice mode: state keeps updating but the orbiting body is never destroyed.
    pub practice_mode: bool,
    /// Constant spin rate replacing the sensor entirely. Disables drift.
    pub fixed_rotation: Option<f32>,
    pub star: StarConfig,
    pub hazards: HazardConfig,
    pub orbit: OrbitConfig,
    pub drift: DriftConfig,
    pub intro: IntroConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / TICKS_PER_SECOND as f32,
            world_width: 1400.0,
            world_height: 1000.0,
            seed: 42,
            practice_mode: false,
            fixed_rotation: None,
            star: StarConfig::default(),
            hazards: HazardConfig::default(),
            orbit: OrbitConfig::default(),
            drift: DriftConfig::default(),
            intro: IntroConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Rest position of the star: the world center.
    pub fn star_rest(&self) -> glam::Vec2 {
        glam::Vec2::new(self.world_width / 2.0, self.world_height / 2.0)
    }
}

/// Star movement, windows and cooldown tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    pub radius: f32,
    /// Keyboard movement per tick; also the counter-force multiplier.
    pub speed: f32,
    /// Travel radius around rest for player movement.
    pub max_distance: f32,
    /// Travel radius around rest for hazard pushes.
    pub max_flare_distance: f32,
    pub movement_window: usize,
    pub movement_threshold: f32,
    pub stability_window: usize,
    pub stability_threshold: f32,
    pub base_cooldown: f32,
    pub min_cooldown: f32,
    /// Largest fraction the cooldown may shrink from baseline.
    pub max_cooldown_reduction: f32,
    /// Per-tick cooldown recovery while hazards or grace are running.
    pub cooldown_relax_step: f32,
    /// Grace granted after a successful counter.
    pub grace_ticks: u32,
    /// Grace granted when gameplay begins.
    pub opening_grace_ticks: u32,
    /// Fraction of the remaining offset recovered per hazard-free tick.
    pub return_rate: f32,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            radius: 137.5,
            speed: 1.1,
            max_distance: 25.0,
            max_flare_distance: 15.0,
            movement_window: 20,
            movement_threshold: 8.0,
            stability_window: 50,
            stability_threshold: 30.0,
            base_cooldown: 100.0,
            min_cooldown: 20.0,
            max_cooldown_reduction: 0.75,
            cooldown_relax_step: 1.0,
            grace_ticks: 25,
            opening_grace_ticks: 2 * TICKS_PER_SECOND,
            return_rate: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    pub min_push: f32,
    pub max_push: f32,
    pub warning_ticks: u32,
    /// Input must oppose a flare with a dot product below this to counter it.
    pub counter_dot_threshold: f32,
    /// Drawn length of a directional flare.
    pub flare_length: f32,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            min_push: 0.4,
            max_push: 0.8,
            warning_ticks: 2 * TICKS_PER_SECOND,
            counter_dot_threshold: -0.5,
            flare_length: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub semi_major: f32,
    pub semi_minor: f32,
    pub tilt_degrees: f32,
    /// Extra vertical offset applied after the tilt.
    pub distance: f32,
    /// Orbit center sits this far below the star.
    pub center_offset_y: f32,
    pub base_speed: f32,
    /// Added to the angular speed on unstable ticks.
    pub unstable_boost: f32,
    /// +1 counter-clockwise in angle space, -1 clockwise.
    pub direction: f32,
    pub years_per_orbit: f32,
    /// Fraction of the gap to base speed closed per tick.
    pub speed_relax: f32,
    pub body_radius: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            semi_major: 600.0,
            semi_minor: 140.0,
            tilt_degrees: 0.0,
            distance: 0.0,
            center_offset_y: 40.0,
            base_speed: 0.01,
            unstable_boost: 0.01,
            direction: -1.0,
            years_per_orbit: 1.0,
            speed_relax: 0.02,
            body_radius: 32.0,
        }
    }
}

/// Rotation/drift stability check fed by compact sensor samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    pub rotation_window: usize,
    pub initial_rotation: f32,
    pub rotation_min: f32,
    pub rotation_max: f32,
    pub drift_max: f32,
    /// Drift magnitude that ends the session immediately.
    pub drift_super: f32,
    /// Fraction of accumulated drift bled off per tick.
    pub drift_decay: f32,
    pub instability_limit: u32,
    /// Scale applied to full-mode accelerometer fields.
    pub full_scale: f32,
    /// Scale applied to compact-mode fields.
    pub compact_scale: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            rotation_window: 10,
            initial_rotation: 0.1,
            rotation_min: 0.0,
            rotation_max: 2.0,
            drift_max: 40.0,
            drift_super: 120.0,
            drift_decay: 0.01,
            instability_limit: 3 * TICKS_PER_SECOND,
            full_scale: 0.001,
            compact_scale: 1.0 / 2000.0,
        }
    }
}

/// Timing and curve parameters for the title/intro cinematics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub text_ticks: u32,
    pub pause_ticks: u32,
    pub spin_ticks: u32,
    pub spin_hold_ticks: u32,
    pub spin_floor: f32,
    pub spin_target: f32,
    pub zoom_in_ticks: u32,
    pub fade_in_ticks: u32,
    pub zoom_out_ticks: u32,
    pub zoom_scale: f32,
    /// Fraction of ZoomIn that passes before the zoom starts ramping.
    pub zoom_delay: f32,
    pub body_start_angle: f32,
    /// Angle the body travels during ZoomOut.
    pub body_arc: f32,
    pub follow_start: f32,
    pub follow_end: f32,
    pub explosion_ticks: u32,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            text_ticks: 4 * TICKS_PER_SECOND,
            pause_ticks: TICKS_PER_SECOND,
            spin_ticks: 3 * TICKS_PER_SECOND,
            spin_hold_ticks: TICKS_PER_SECOND,
            spin_floor: 0.02,
            spin_target: 0.1,
            zoom_in_ticks: 2 * TICKS_PER_SECOND,
            fade_in_ticks: seconds_to_ticks(1.5),
            zoom_out_ticks: 3 * TICKS_PER_SECOND,
            zoom_scale: 2.5,
            zoom_delay: 0.25,
            body_start_angle: std::f32::consts::FRAC_PI_2,
            body_arc: 0.9,
            follow_start: 1.0,
            follow_end: 0.5,
            explosion_ticks: 50,
        }
    }
}
