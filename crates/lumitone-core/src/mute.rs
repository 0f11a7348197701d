use crate::error::SinkError;
use crate::sink::AudioSink;

/// Binary gate over the sink's output routing, driven by the proximity sensor.
///
/// Tracks whether the gain stage is attached so repeated identical signals
/// never reach the sink twice. Starts detached.
#[derive(Clone, Copy, Debug, Default)]
pub struct MuteGate {
    connected: bool,
}

impl MuteGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Near detaches, far reattaches. Returns whether routing changed; on a
    /// sink failure the tracked state is left as it was.
    pub fn on_proximity<S: AudioSink + ?Sized>(
        &mut self,
        near: bool,
        sink: &mut S,
    ) -> Result<bool, SinkError> {
        let want_connected = !near;
        if want_connected == self.connected {
            return Ok(false);
        }
        if want_connected {
            sink.connect()?;
        } else {
            sink.disconnect()?;
        }
        self.connected = want_connected;
        Ok(true)
    }
}
