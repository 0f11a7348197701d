use crate::synth::SquareSynth;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use lumitone_core::{AudioSink, SinkError};
use std::sync::{Arc, Mutex};

/// [`AudioSink`] over the default cpal output device.
///
/// The session sets parameters on the UI thread; the stream callback reads
/// them under the same lock while it renders.
pub struct CpalSink {
    synth: Arc<Mutex<SquareSynth>>,
    _stream: cpal::Stream,
}

impl CpalSink {
    pub fn open(init_freq: f32, init_vol: f32) -> anyhow::Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow::anyhow!("no audio output device"))?;
        let config = device.default_output_config()?;
        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let synth = Arc::new(Mutex::new(SquareSynth::new(sample_rate, init_freq, init_vol)));
        let stream_config: cpal::StreamConfig = config.config();
        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &stream_config, channels, Arc::clone(&synth))?
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &stream_config, channels, Arc::clone(&synth))?
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &stream_config, channels, Arc::clone(&synth))?
            }
            other => anyhow::bail!("unsupported sample format {other:?}"),
        };
        stream.play()?;
        log::info!(
            "[audio] {} @ {}Hz, {} channel(s)",
            device.name().unwrap_or_else(|_| "output".into()),
            sample_rate,
            channels
        );
        Ok(Self {
            synth,
            _stream: stream,
        })
    }

    fn with_synth(&self, f: impl FnOnce(&mut SquareSynth)) -> Result<(), SinkError> {
        let mut guard = self.synth.lock().map_err(|_| SinkError::Unavailable)?;
        f(&mut guard);
        Ok(())
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    synth: Arc<Mutex<SquareSynth>>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample + FromSample<f32> + Send + 'static,
{
    let channels = channels.max(1);
    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let Ok(mut synth) = synth.lock() else {
                data.fill(T::EQUILIBRIUM);
                return;
            };
            for frame in data.chunks_mut(channels) {
                frame.fill(T::from_sample(synth.next_sample()));
            }
        },
        |err| log::error!("[audio] stream error: {err}"),
        None,
    )
}

fn check_finite(param: &'static str, value: f32) -> Result<(), SinkError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SinkError::Param {
            param,
            reason: format!("non-finite value {value}"),
        })
    }
}

impl AudioSink for CpalSink {
    fn set_frequency(&mut self, hz: f32) -> Result<(), SinkError> {
        check_finite("frequency", hz)?;
        self.with_synth(|s| s.frequency = hz.max(0.0))
    }

    fn set_gain(&mut self, level: f32) -> Result<(), SinkError> {
        check_finite("gain", level)?;
        self.with_synth(|s| s.gain = level)
    }

    fn connect(&mut self) -> Result<(), SinkError> {
        self.with_synth(|s| s.connected = true)
    }

    fn disconnect(&mut self) -> Result<(), SinkError> {
        self.with_synth(|s| s.connected = false)
    }
}
