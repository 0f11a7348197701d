use crate::smoothing::SmoothingBuffer;

/// Maps smoothed ambient light to an oscillator frequency.
///
/// Readings are clamped into `[0, ceiling]`, pushed into a moving-average
/// window, and the mean is scaled so that the ceiling maps to `max_freq`.
/// The ceiling comes from calibration and is frozen: a brighter reading is
/// clamped down, it never raises the ceiling.
#[derive(Clone, Debug)]
pub struct BrightnessToPitch {
    buffer: SmoothingBuffer,
    ceiling: Option<f32>,
    max_freq: f32,
}

impl BrightnessToPitch {
    pub fn new(window: usize, max_freq: f32) -> Self {
        Self {
            buffer: SmoothingBuffer::new(window),
            ceiling: None,
            max_freq,
        }
    }

    /// Install the calibrated ceiling. Non-finite values count as missing.
    pub fn seed_ceiling(&mut self, ceiling: Option<f32>) {
        self.ceiling = ceiling.filter(|c| c.is_finite());
    }

    pub fn ceiling(&self) -> Option<f32> {
        self.ceiling
    }

    /// Frequency for one light reading, or `None` when no usable ceiling
    /// exists yet and this reading cannot provide one.
    pub fn map(&mut self, value: f32) -> Option<f32> {
        if !value.is_finite() {
            log::trace!("[pitch] dropping non-finite reading");
            return None;
        }
        let ceiling = match self.ceiling {
            Some(c) if c > 0.0 => c,
            _ => {
                // Calibration saw nothing usable: the first positive reading
                // becomes the ceiling.
                if value <= 0.0 {
                    log::debug!("[pitch] no ceiling yet, skipping reading {value}");
                    return None;
                }
                log::info!("[pitch] adopting first reading {value:.1} as ceiling");
                self.ceiling = Some(value);
                value
            }
        };
        let clamped = value.clamp(0.0, ceiling);
        let mean = self.buffer.push(clamped).average()?;
        Some((mean / ceiling * self.max_freq).clamp(0.0, self.max_freq))
    }

    pub fn buffer(&self) -> &SmoothingBuffer {
        &self.buffer
    }
}
