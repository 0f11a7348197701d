//! One running instance of the toy: calibration first, then the sensor
//! mappers driving an [`AudioSink`].
//!
//! The session owns every piece of mutable state and every subscription it
//! makes, so a host can tear it down with [`Session::dispose`]. Handlers are
//! plain closures over shared `Rc<RefCell<_>>` state; all dispatch happens on
//! one thread and each handler runs to completion.

use crate::calibration::{Calibration, CalibrationReport, CalibrationSignal};
use crate::config::SessionConfig;
use crate::error::{ConfigError, SessionError};
use crate::events::{EventKind, EventSource, SensorEvent, SubscriptionHandle};
use crate::gain::TouchToGain;
use crate::mute::MuteGate;
use crate::pitch::BrightnessToPitch;
use crate::sink::{AudioParams, AudioSink, ParamsHandle};
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Created, calibration not started.
    Idle,
    Calibrating,
    Running,
    Disposed,
}

struct Pipeline<S> {
    params: ParamsHandle,
    pitch: BrightnessToPitch,
    gain: TouchToGain,
    gate: MuteGate,
    sink: S,
}

impl<S: AudioSink> Pipeline<S> {
    fn on_light(&mut self, value: f32) {
        let Some(freq) = self.pitch.map(value) else {
            return;
        };
        self.params.update(|p| p.frequency = freq);
        if let Err(e) = self.sink.set_frequency(freq) {
            log::warn!("[audio] set_frequency({freq:.1}) failed: {e}");
        }
    }

    fn on_touch(&mut self, point: Vec2) {
        let gain = self.gain.map(point);
        self.params.update(|p| p.gain = gain);
        if let Err(e) = self.sink.set_gain(gain) {
            log::warn!("[audio] set_gain({gain:.4}) failed: {e}");
        }
    }

    fn on_proximity(&mut self, near: bool) {
        match self.gate.on_proximity(near, &mut self.sink) {
            Ok(true) => {
                log::debug!("[session] output {}", if near { "muted" } else { "unmuted" });
                let muted = !self.gate.is_connected();
                self.params.update(|p| p.muted = muted);
            }
            Ok(false) => {}
            Err(e) => log::warn!("[audio] proximity routing failed: {e}"),
        }
    }
}

pub struct Session<S: AudioSink + 'static> {
    config: SessionConfig,
    params: ParamsHandle,
    pipeline: Rc<RefCell<Pipeline<S>>>,
    calibration: Option<Rc<RefCell<Calibration>>>,
    calibration_sub: Option<SubscriptionHandle>,
    subscriptions: Vec<SubscriptionHandle>,
    phase: SessionPhase,
}

impl<S: AudioSink + 'static> Session<S> {
    /// Validate `config` and push the initial parameters to `sink`. The output
    /// stays detached until calibration completes.
    pub fn new(config: SessionConfig, mut sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let initial = AudioParams {
            frequency: config.init_freq,
            gain: config.init_vol,
            // Output attaches when calibration locks.
            muted: true,
        };
        if let Err(e) = sink.set_frequency(initial.frequency) {
            log::warn!("[audio] initial frequency rejected: {e}");
        }
        if let Err(e) = sink.set_gain(initial.gain) {
            log::warn!("[audio] initial gain rejected: {e}");
        }
        let params = ParamsHandle::new(initial);
        let pipeline = Pipeline {
            params: params.clone(),
            pitch: BrightnessToPitch::new(config.smoothing_window, config.max_freq),
            gain: TouchToGain::new(config.screen_height, config.max_vol),
            gate: MuteGate::new(),
            sink,
        };
        Ok(Self {
            config,
            params,
            pipeline: Rc::new(RefCell::new(pipeline)),
            calibration: None,
            calibration_sub: None,
            subscriptions: Vec::new(),
            phase: SessionPhase::Idle,
        })
    }

    /// Start the calibration window at `now`. Only raw light readings are
    /// observed until it locks.
    pub fn begin_calibration(
        &mut self,
        source: &mut dyn EventSource,
        now: Instant,
    ) -> Result<CalibrationSignal, SessionError> {
        match self.phase {
            SessionPhase::Idle => {}
            SessionPhase::Disposed => return Err(SessionError::Disposed),
            _ => return Err(SessionError::AlreadyStarted),
        }
        let (cal, signal) = Calibration::new(self.config.calibration_window, now);
        let cal = Rc::new(RefCell::new(cal));
        let cal_for_events = cal.clone();
        let handle = source.subscribe(
            EventKind::Light,
            Box::new(move |ev: &SensorEvent| {
                if let SensorEvent::Light(value) = ev {
                    cal_for_events.borrow_mut().observe(*value);
                }
            }),
        );
        log::info!(
            "[calibration] sampling for {:.1}s",
            self.config.calibration_window.as_secs_f32()
        );
        self.calibration = Some(cal);
        self.calibration_sub = Some(handle);
        self.phase = SessionPhase::Calibrating;
        Ok(signal)
    }

    /// Advance time. Locks calibration once its window has elapsed and brings
    /// the mappers online; otherwise does nothing.
    pub fn poll(&mut self, source: &mut dyn EventSource, now: Instant) -> SessionPhase {
        if self.phase != SessionPhase::Calibrating {
            return self.phase;
        }
        let report = match self.calibration.as_ref() {
            Some(cal) => cal.borrow_mut().poll(now),
            None => None,
        };
        if let Some(report) = report {
            self.activate(source, report);
        }
        self.phase
    }

    fn activate(&mut self, source: &mut dyn EventSource, report: CalibrationReport) {
        if let Some(handle) = self.calibration_sub.take() {
            source.unsubscribe(handle);
        }
        {
            let mut p = self.pipeline.borrow_mut();
            let p = &mut *p;
            p.pitch.seed_ceiling(report.ceiling);
            if report.ceiling.is_none() {
                log::warn!("[calibration] no light readings; first reading will set the ceiling");
            }
            if let Err(e) = p.gate.on_proximity(false, &mut p.sink) {
                log::warn!("[audio] could not attach output: {e}");
            }
            let muted = !p.gate.is_connected();
            p.params.update(|params| params.muted = muted);
        }

        let pipeline = self.pipeline.clone();
        let light = source.subscribe(
            EventKind::Light,
            Box::new(move |ev: &SensorEvent| {
                if let SensorEvent::Light(value) = ev {
                    pipeline.borrow_mut().on_light(*value);
                }
            }),
        );
        let pipeline = self.pipeline.clone();
        let proximity = source.subscribe(
            EventKind::Proximity,
            Box::new(move |ev: &SensorEvent| {
                if let SensorEvent::Proximity { near } = ev {
                    pipeline.borrow_mut().on_proximity(*near);
                }
            }),
        );
        let pipeline = self.pipeline.clone();
        let touch = source.subscribe(
            EventKind::TouchMove,
            Box::new(move |ev: &SensorEvent| {
                if let SensorEvent::TouchMove(point) = ev {
                    pipeline.borrow_mut().on_touch(*point);
                }
            }),
        );
        self.subscriptions.extend([light, proximity, touch]);
        self.phase = SessionPhase::Running;
        log::info!("[session] running");

        if let Some(cal) = &self.calibration {
            cal.borrow_mut().notify();
        }
    }

    /// Unsubscribe every listener and detach the output. The session ignores
    /// all further polls.
    pub fn dispose(&mut self, source: &mut dyn EventSource) {
        if self.phase == SessionPhase::Disposed {
            return;
        }
        if let Some(handle) = self.calibration_sub.take() {
            source.unsubscribe(handle);
        }
        for handle in self.subscriptions.drain(..) {
            source.unsubscribe(handle);
        }
        // Dropping the controller releases anyone still awaiting the signal.
        self.calibration = None;
        {
            let mut p = self.pipeline.borrow_mut();
            let p = &mut *p;
            if let Err(e) = p.gate.on_proximity(true, &mut p.sink) {
                log::warn!("[audio] could not detach output: {e}");
            }
            let muted = !p.gate.is_connected();
            p.params.update(|params| params.muted = muted);
        }
        self.phase = SessionPhase::Disposed;
        log::info!("[session] disposed");
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn params(&self) -> AudioParams {
        self.params.get()
    }

    /// Read-only view of the parameters for a renderer.
    pub fn params_handle(&self) -> ParamsHandle {
        self.params.clone()
    }

    /// Ceiling the pitch mapper normalizes against, once calibration locked.
    pub fn ceiling(&self) -> Option<f32> {
        self.pipeline.borrow().pitch.ceiling()
    }

    /// Ceiling observed so far by a running calibration window.
    pub fn calibration_ceiling(&self) -> Option<f32> {
        self.calibration.as_ref().and_then(|c| c.borrow().ceiling())
    }

    pub fn is_output_connected(&self) -> bool {
        self.pipeline.borrow().gate.is_connected()
    }
}
