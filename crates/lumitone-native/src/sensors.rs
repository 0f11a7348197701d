//! Keyboard and mouse stand-ins for the phone sensors.
//!
//! Up/Down step an ambient light level, Space held means "something is near
//! the screen", and dragging with the left button is a touch. The light level
//! is also re-reported on a fixed period so calibration sees a steady stream
//! of readings, the way a real sensor polls.

use lumitone_core::{SensorEvent, Vec2};
use std::time::Duration;

pub const LIGHT_MIN: f32 = 0.0;
pub const LIGHT_MAX: f32 = 1000.0;
pub const LIGHT_STEP: f32 = 25.0;
pub const LIGHT_START: f32 = 500.0;
pub const LIGHT_SAMPLE_PERIOD: Duration = Duration::from_millis(250);

#[derive(Clone, Debug)]
pub struct SimulatedSensors {
    level: f32,
    near: bool,
    pressed: bool,
    cursor: Vec2,
}

impl Default for SimulatedSensors {
    fn default() -> Self {
        Self {
            level: LIGHT_START,
            near: false,
            pressed: false,
            cursor: Vec2::ZERO,
        }
    }
}

impl SimulatedSensors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn is_near(&self) -> bool {
        self.near
    }

    pub fn brighten(&mut self) -> SensorEvent {
        self.level = (self.level + LIGHT_STEP).min(LIGHT_MAX);
        SensorEvent::Light(self.level)
    }

    pub fn dim(&mut self) -> SensorEvent {
        self.level = (self.level - LIGHT_STEP).max(LIGHT_MIN);
        SensorEvent::Light(self.level)
    }

    /// Periodic re-report of the current level.
    pub fn sample(&self) -> SensorEvent {
        SensorEvent::Light(self.level)
    }

    /// Key repeat while Space is held must not re-fire, so only edges
    /// produce an event.
    pub fn cover(&mut self, near: bool) -> Option<SensorEvent> {
        if self.near == near {
            return None;
        }
        self.near = near;
        Some(SensorEvent::Proximity { near })
    }

    pub fn cursor_moved(&mut self, pos: Vec2) -> Option<SensorEvent> {
        self.cursor = pos;
        self.pressed.then_some(SensorEvent::TouchMove(pos))
    }

    /// Pressing counts as the first touch move at the current cursor.
    pub fn press(&mut self, down: bool) -> Option<SensorEvent> {
        self.pressed = down;
        down.then_some(SensorEvent::TouchMove(self.cursor))
    }
}
