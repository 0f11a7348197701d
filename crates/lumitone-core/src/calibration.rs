//! Startup calibration: watch raw light readings for a fixed window and keep
//! the brightest one as the normalization ceiling.
//!
//! The controller is a two-state machine. While `Sampling` every reading may
//! raise the ceiling; once the window has elapsed it moves to `Locked` and
//! the ceiling is frozen for the rest of the session. Completion is published
//! once through a [`CalibrationSignal`].

use futures::channel::oneshot;
use instant::Instant;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationPhase {
    Sampling,
    Locked,
}

/// Outcome of a finished calibration window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationReport {
    /// Brightest reading seen, `None` if no light event arrived.
    pub ceiling: Option<f32>,
    pub samples: usize,
}

pub struct Calibration {
    max_bright: Option<f32>,
    samples: usize,
    phase: CalibrationPhase,
    started_at: Instant,
    window: Duration,
    done: Option<oneshot::Sender<CalibrationReport>>,
}

impl Calibration {
    pub fn new(window: Duration, now: Instant) -> (Self, CalibrationSignal) {
        let (tx, rx) = oneshot::channel();
        let cal = Self {
            max_bright: None,
            samples: 0,
            phase: CalibrationPhase::Sampling,
            started_at: now,
            window,
            done: Some(tx),
        };
        (cal, CalibrationSignal(rx))
    }

    /// Feed one raw reading. Ignored once locked or when not finite.
    pub fn observe(&mut self, value: f32) -> bool {
        if self.phase == CalibrationPhase::Locked || !value.is_finite() {
            return false;
        }
        self.samples += 1;
        match self.max_bright {
            Some(max) if max >= value => {}
            _ => self.max_bright = Some(value),
        }
        true
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.window
    }

    fn elapsed(&self, now: Instant) -> Duration {
        if now > self.started_at {
            now.duration_since(self.started_at)
        } else {
            Duration::ZERO
        }
    }

    /// Lock if the window has elapsed; returns the report on the transition.
    pub fn poll(&mut self, now: Instant) -> Option<CalibrationReport> {
        if self.phase == CalibrationPhase::Sampling && self.is_due(now) {
            Some(self.lock())
        } else {
            None
        }
    }

    /// Freeze the ceiling. Calling again returns the same report.
    pub fn lock(&mut self) -> CalibrationReport {
        if self.phase == CalibrationPhase::Sampling {
            self.phase = CalibrationPhase::Locked;
            log::info!(
                "[calibration] locked after {} samples, ceiling={:?}",
                self.samples,
                self.max_bright
            );
        }
        self.report()
    }

    /// Resolve the completion signal. Only the first call after locking has
    /// any effect.
    pub fn notify(&mut self) -> bool {
        if self.phase != CalibrationPhase::Locked {
            return false;
        }
        let report = self.report();
        match self.done.take() {
            // Receiver may already be gone; nobody is waiting then.
            Some(tx) => tx.send(report).is_ok(),
            None => false,
        }
    }

    pub fn report(&self) -> CalibrationReport {
        CalibrationReport {
            ceiling: self.max_bright,
            samples: self.samples,
        }
    }

    pub fn ceiling(&self) -> Option<f32> {
        self.max_bright
    }

    pub fn phase(&self) -> CalibrationPhase {
        self.phase
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.window.saturating_sub(self.elapsed(now))
    }
}

/// One-shot completion of a calibration window.
///
/// Resolves to `Some(report)` when calibration locks, or `None` if the
/// controller was dropped first (the session was disposed mid-window).
pub struct CalibrationSignal(oneshot::Receiver<CalibrationReport>);

impl CalibrationSignal {
    /// Non-blocking check, for hosts that poll from their own loop.
    pub fn try_take(&mut self) -> Option<CalibrationReport> {
        self.0.try_recv().ok().flatten()
    }
}

impl Future for CalibrationSignal {
    type Output = Option<CalibrationReport>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx).map(Result::ok)
    }
}
