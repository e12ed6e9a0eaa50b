/// Packed scene buffer layout.
/// Must stay in sync with the host-side reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Star: 8 floats]
/// [Body: 8 floats]
/// [Explosion: 8 floats]
/// [Hazards: max_hazards × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header on every pack so the reader can
/// compute offsets without a separate handshake.
use crate::api::types::SessionEvent;
use crate::renderer::instance::{BodyInstance, ExplosionInstance, HazardInstance, StarInstance};
use crate::session::scene::SceneDescription;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PHASE: usize = 2;
pub const HEADER_SUB_PHASE: usize = 3;
pub const HEADER_PHASE_PROGRESS: usize = 4;
pub const HEADER_CAMERA_X: usize = 5;
pub const HEADER_CAMERA_Y: usize = 6;
pub const HEADER_CAMERA_ZOOM: usize = 7;
pub const HEADER_INSTABILITY: usize = 8;
pub const HEADER_YEARS: usize = 9;
pub const HEADER_FLAGS: usize = 10;
pub const HEADER_END_CAUSE: usize = 11;
pub const HEADER_MAX_HAZARDS: usize = 12;
pub const HEADER_HAZARD_COUNT: usize = 13;
pub const HEADER_TEXT_OFFSET: usize = 14;
pub const HEADER_EVENT_COUNT: usize = 15;

/// Bits of `HEADER_FLAGS`.
pub const FLAG_SENSOR_CONTROL: u32 = 1;
pub const FLAG_PRACTICE_MODE: u32 = 1 << 1;
pub const FLAG_SESSION_OVER: u32 = 1 << 2;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

pub const DEFAULT_MAX_HAZARDS: usize = 16;
pub const DEFAULT_MAX_EVENTS: usize = 32;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_hazards: usize,
    pub max_events: usize,

    pub star_offset: usize,
    pub body_offset: usize,
    pub explosion_offset: usize,
    pub hazard_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_hazards: usize, max_events: usize) -> Self {
        let star_offset = HEADER_FLOATS;
        let body_offset = star_offset + StarInstance::FLOATS;
        let explosion_offset = body_offset + BodyInstance::FLOATS;
        let hazard_data_offset = explosion_offset + ExplosionInstance::FLOATS;
        let event_data_offset = hazard_data_offset + max_hazards * HazardInstance::FLOATS;
        let buffer_total_floats = event_data_offset + max_events * SessionEvent::FLOATS;

        Self {
            max_hazards,
            max_events,
            star_offset,
            body_offset,
            explosion_offset,
            hazard_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }
}

impl Default for ProtocolLayout {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HAZARDS, DEFAULT_MAX_EVENTS)
    }
}

/// Writes scene descriptions into a flat f32 buffer following [`ProtocolLayout`].
pub struct ScenePacker {
    layout: ProtocolLayout,
    buffer: Vec<f32>,
}

impl ScenePacker {
    pub fn new(layout: ProtocolLayout) -> Self {
        let buffer = vec![0.0; layout.buffer_total_floats];
        Self { layout, buffer }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    /// Raw pointer to the buffer for shared-memory reads.
    pub fn as_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn write<T: bytemuck::Pod>(&mut self, offset: usize, records: &[T]) {
        let floats: &[f32] = bytemuck::cast_slice(records);
        self.buffer[offset..offset + floats.len()].copy_from_slice(floats);
    }

    /// Overwrite the whole buffer with `scene` and this tick's `events`.
    /// Hazards and events beyond capacity are dropped.
    pub fn pack(&mut self, scene: &SceneDescription, events: &[SessionEvent]) {
        self.buffer.fill(0.0);

        let hazard_count = scene.hazards.len().min(self.layout.max_hazards);
        if hazard_count < scene.hazards.len() {
            log::warn!(
                "Scene has {} hazards, packing only {}",
                scene.hazards.len(),
                self.layout.max_hazards
            );
        }
        let event_count = events.len().min(self.layout.max_events);

        let mut flags = 0u32;
        if scene.sensor_control {
            flags |= FLAG_SENSOR_CONTROL;
        }
        if scene.practice_mode {
            flags |= FLAG_PRACTICE_MODE;
        }
        if scene.end_cause.is_some() {
            flags |= FLAG_SESSION_OVER;
        }

        let header = &mut self.buffer[..HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_FRAME_COUNTER] = scene.tick as f32;
        header[HEADER_PHASE] = scene.phase.code();
        header[HEADER_SUB_PHASE] = scene.sub_phase.code();
        header[HEADER_PHASE_PROGRESS] = scene.phase_progress;
        header[HEADER_CAMERA_X] = scene.camera.center.x;
        header[HEADER_CAMERA_Y] = scene.camera.center.y;
        header[HEADER_CAMERA_ZOOM] = scene.camera.zoom;
        header[HEADER_INSTABILITY] = scene.instability;
        header[HEADER_YEARS] = scene.years as f32;
        header[HEADER_FLAGS] = flags as f32;
        header[HEADER_END_CAUSE] = scene.end_cause.map_or(0.0, |c| c.code());
        header[HEADER_MAX_HAZARDS] = self.layout.max_hazards as f32;
        header[HEADER_HAZARD_COUNT] = hazard_count as f32;
        header[HEADER_TEXT_OFFSET] = scene.text_offset.unwrap_or(-1.0);
        header[HEADER_EVENT_COUNT] = event_count as f32;

        self.write(self.layout.star_offset, &[StarInstance::from_view(&scene.star)]);
        self.write(self.layout.body_offset, &[BodyInstance::from_view(scene.body.as_ref())]);
        self.write(
            self.layout.explosion_offset,
            &[ExplosionInstance::from_intent(scene.explosion.as_ref())],
        );

        let hazards: Vec<HazardInstance> = scene.hazards[..hazard_count]
            .iter()
            .map(HazardInstance::from_view)
            .collect();
        self.write(self.layout.hazard_data_offset, &hazards);
        self.write(self.layout.event_data_offset, &events[..event_count]);
    }
}
