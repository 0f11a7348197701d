use crate::error::SinkError;
use std::cell::Cell;
use std::rc::Rc;

/// Oscillator + gain pair the pipeline drives.
///
/// Implementations own the synthesis graph (waveform, detune, output device);
/// the pipeline only sets the two parameters and the output routing.
pub trait AudioSink {
    fn set_frequency(&mut self, hz: f32) -> Result<(), SinkError>;
    fn set_gain(&mut self, level: f32) -> Result<(), SinkError>;
    /// Route the gain stage to the output.
    fn connect(&mut self) -> Result<(), SinkError>;
    /// Detach the gain stage from the output without touching its level.
    fn disconnect(&mut self) -> Result<(), SinkError>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioParams {
    pub frequency: f32,
    pub gain: f32,
    pub muted: bool,
}

/// Read side of the parameters published by a session, handed to renderers.
#[derive(Clone, Debug)]
pub struct ParamsHandle(Rc<Cell<AudioParams>>);

impl ParamsHandle {
    pub(crate) fn new(initial: AudioParams) -> Self {
        Self(Rc::new(Cell::new(initial)))
    }

    pub fn get(&self) -> AudioParams {
        self.0.get()
    }

    pub(crate) fn update(&self, f: impl FnOnce(&mut AudioParams)) {
        let mut p = self.0.get();
        f(&mut p);
        self.0.set(p);
    }
}
