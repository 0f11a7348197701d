use crate::constants::*;
use crate::error::ConfigError;
use std::time::Duration;

/// Process-wide tuning for one session. Set once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub init_freq: f32,
    pub init_vol: f32,
    pub max_freq: f32,
    pub max_vol: f32,
    pub smoothing_window: usize,
    pub calibration_window: Duration,
    pub render_tick: Duration,
    /// Height of the touch surface, captured when the session is created.
    pub screen_height: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            init_freq: INIT_FREQ,
            init_vol: INIT_VOL,
            max_freq: MAX_FREQ,
            max_vol: MAX_VOL,
            smoothing_window: NUM_SMA_SAMPLE,
            calibration_window: CALIBRATION_WINDOW,
            render_tick: RENDER_TICK,
            screen_height: 640.0,
        }
    }
}

impl SessionConfig {
    pub fn with_screen_height(mut self, height: f32) -> Self {
        self.screen_height = height;
        self
    }

    pub fn with_calibration_window(mut self, window: Duration) -> Self {
        self.calibration_window = window;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_height <= 0.0 || !self.screen_height.is_finite() {
            return Err(ConfigError::ScreenHeight(self.screen_height));
        }
        if self.max_freq <= 0.0 || !self.max_freq.is_finite() {
            return Err(ConfigError::MaxFrequency(self.max_freq));
        }
        if self.max_vol <= 0.0 || !self.max_vol.is_finite() {
            return Err(ConfigError::MaxVolume(self.max_vol));
        }
        if !(0.0..=self.max_freq).contains(&self.init_freq) {
            return Err(ConfigError::InitialOutOfRange {
                name: "frequency",
                value: self.init_freq,
                max: self.max_freq,
            });
        }
        if !(0.0..=self.max_vol).contains(&self.init_vol) {
            return Err(ConfigError::InitialOutOfRange {
                name: "volume",
                value: self.init_vol,
                max: self.max_vol,
            });
        }
        if self.smoothing_window == 0 {
            return Err(ConfigError::EmptySmoothingWindow);
        }
        if self.calibration_window.is_zero() {
            return Err(ConfigError::ZeroDuration("calibration window"));
        }
        if self.render_tick.is_zero() {
            return Err(ConfigError::ZeroDuration("render tick"));
        }
        Ok(())
    }
}
