use lumitone_core::DETUNE_CENTS;

/// Square-wave oscillator feeding a gain stage, rendered one sample at a time
/// on the audio thread.
///
/// The oscillator keeps running while the output is detached, so
/// reconnecting picks up mid-cycle just like a WebAudio graph would.
#[derive(Clone, Debug)]
pub struct SquareSynth {
    pub frequency: f32,
    pub gain: f32,
    pub connected: bool,
    sample_rate: f32,
    phase: f32, // cycles, 0..1
}

impl SquareSynth {
    pub fn new(sample_rate: f32, frequency: f32, gain: f32) -> Self {
        Self {
            frequency,
            gain,
            connected: false,
            sample_rate: sample_rate.max(1.0),
            phase: 0.0,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Frequency actually heard: the nominal one shifted up by the detune.
    pub fn detuned_frequency(&self) -> f32 {
        self.frequency * 2f32.powf(DETUNE_CENTS / 1200.0)
    }

    pub fn next_sample(&mut self) -> f32 {
        // Anything above Nyquist folds back; pin it there instead.
        let step = (self.detuned_frequency() / self.sample_rate).clamp(0.0, 0.5);
        let level = if self.phase < 0.5 { 1.0 } else { -1.0 };
        self.phase = (self.phase + step).fract();
        if self.connected {
            level * self.gain
        } else {
            0.0
        }
    }
}
