use lumitone_core::{AudioSink, SinkError, DETUNE_CENTS};
use wasm_bindgen::JsValue;
use web_sys as web;

/// WebAudio graph: square oscillator -> gain -> destination.
///
/// The gain stage is built detached; the session's mute gate attaches it
/// once calibration has finished.
pub struct WebAudioSink {
    ctx: web::AudioContext,
    oscillator: web::OscillatorNode,
    gain: web::GainNode,
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx).map_err(|e| anyhow::anyhow!("GainNode error: {:?}", e))?;
    g.gain().set_value(value);
    Ok(g)
}

impl WebAudioSink {
    pub fn new(init_freq: f32, init_vol: f32) -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        _ = ctx.resume();

        let oscillator = web::OscillatorNode::new(&ctx)
            .map_err(|e| anyhow::anyhow!("OscillatorNode error: {:?}", e))?;
        oscillator.set_type(web::OscillatorType::Square);
        oscillator.frequency().set_value(init_freq);
        oscillator.detune().set_value(DETUNE_CENTS);

        let gain = create_gain(&ctx, init_vol)?;
        oscillator
            .connect_with_audio_node(&gain)
            .map_err(|e| anyhow::anyhow!("connect oscillator: {:?}", e))?;
        oscillator
            .start()
            .map_err(|e| anyhow::anyhow!("start oscillator: {:?}", e))?;
        log::info!(
            "[audio] square oscillator at {:.0}Hz, detune {:.0}c, gain {}",
            init_freq,
            DETUNE_CENTS,
            init_vol
        );
        Ok(Self {
            ctx,
            oscillator,
            gain,
        })
    }

    pub fn context(&self) -> &web::AudioContext {
        &self.ctx
    }
}

fn routing_error(e: JsValue) -> SinkError {
    SinkError::Routing(format!("{:?}", e))
}

impl AudioSink for WebAudioSink {
    fn set_frequency(&mut self, hz: f32) -> Result<(), SinkError> {
        if !hz.is_finite() {
            return Err(SinkError::Param {
                param: "frequency",
                reason: format!("non-finite value {hz}"),
            });
        }
        self.oscillator.frequency().set_value(hz);
        Ok(())
    }

    fn set_gain(&mut self, level: f32) -> Result<(), SinkError> {
        if !level.is_finite() {
            return Err(SinkError::Param {
                param: "gain",
                reason: format!("non-finite value {level}"),
            });
        }
        self.gain.gain().set_value(level);
        Ok(())
    }

    fn connect(&mut self) -> Result<(), SinkError> {
        self.gain
            .connect_with_audio_node(&self.ctx.destination())
            .map(|_| ())
            .map_err(routing_error)
    }

    fn disconnect(&mut self) -> Result<(), SinkError> {
        self.gain
            .disconnect_with_audio_node(&self.ctx.destination())
            .map_err(routing_error)
    }
}
