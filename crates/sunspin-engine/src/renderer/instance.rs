use bytemuck::{Pod, Zeroable};

use crate::session::scene::{BodyView, ExplosionIntent, HazardView, StarView};

#[inline]
fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Star record in the packed scene buffer. 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StarInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Accumulated spin in radians.
    pub spin_phase: f32,
    pub spin_rate: f32,
    /// 1.0 calm yellow, 0.0 fully red.
    pub heat: f32,
    pub _pad: [f32; 2],
}

impl StarInstance {
    pub const FLOATS: usize = 8;

    pub fn from_view(view: &StarView) -> Self {
        Self {
            x: view.position.x,
            y: view.position.y,
            radius: view.radius,
            spin_phase: view.spin_phase,
            spin_rate: view.spin_rate,
            heat: view.heat,
            _pad: [0.0; 2],
        }
    }
}

/// Orbiting body record. `present` is 0 when nothing should be drawn.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub present: f32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub angle: f32,
    pub alpha: f32,
    /// 1.0 when drawn before the star.
    pub behind: f32,
    pub alive: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;

    pub fn from_view(view: Option<&BodyView>) -> Self {
        match view {
            Some(body) => Self {
                present: 1.0,
                x: body.position.x,
                y: body.position.y,
                radius: body.radius,
                angle: body.angle,
                alpha: body.alpha,
                behind: flag(body.behind_star),
                alive: flag(body.alive),
            },
            None => Self::default(),
        }
    }
}

/// Flare segment from the star surface to its tip.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct HazardInstance {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    /// See `HazardKind::code`.
    pub kind: f32,
    pub intensity: f32,
    pub visible: f32,
    pub id: f32,
}

impl HazardInstance {
    pub const FLOATS: usize = 8;

    pub fn from_view(view: &HazardView) -> Self {
        Self {
            x0: view.origin.x,
            y0: view.origin.y,
            x1: view.tip.x,
            y1: view.tip.y,
            kind: view.kind.code(),
            intensity: view.intensity,
            visible: flag(view.visible),
            id: view.id.0 as f32,
        }
    }
}

/// Game-over explosion record.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ExplosionInstance {
    /// 0 inactive, 1 running, 2 on the first tick.
    pub active: f32,
    pub x: f32,
    pub y: f32,
    pub progress: f32,
    pub spin_phase: f32,
    pub _pad: [f32; 3],
}

impl ExplosionInstance {
    pub const FLOATS: usize = 8;

    pub fn from_intent(intent: Option<&ExplosionIntent>) -> Self {
        match intent {
            Some(e) => Self {
                active: if e.started { 2.0 } else { 1.0 },
                x: e.origin.x,
                y: e.origin.y,
                progress: e.progress,
                spin_phase: e.spin_phase,
                _pad: [0.0; 3],
            },
            None => Self::default(),
        }
    }
}
