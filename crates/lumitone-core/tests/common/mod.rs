// Test doubles shared by the host-side integration tests.

#![allow(dead_code)]
use lumitone_core::{AudioSink, SinkError};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Frequency(f32),
    Gain(f32),
    Connect,
    Disconnect,
}

/// Sink that records every call; clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub calls: Rc<RefCell<Vec<Call>>>,
    pub fail_routing: bool,
}

impl RecordingSink {
    pub fn failing_routing() -> Self {
        Self {
            fail_routing: true,
            ..Self::default()
        }
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn last(&self) -> Option<Call> {
        self.calls.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl AudioSink for RecordingSink {
    fn set_frequency(&mut self, hz: f32) -> Result<(), SinkError> {
        self.calls.borrow_mut().push(Call::Frequency(hz));
        Ok(())
    }

    fn set_gain(&mut self, level: f32) -> Result<(), SinkError> {
        self.calls.borrow_mut().push(Call::Gain(level));
        Ok(())
    }

    fn connect(&mut self) -> Result<(), SinkError> {
        if self.fail_routing {
            return Err(SinkError::Routing("connect refused".into()));
        }
        self.calls.borrow_mut().push(Call::Connect);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), SinkError> {
        if self.fail_routing {
            return Err(SinkError::Routing("disconnect refused".into()));
        }
        self.calls.borrow_mut().push(Call::Disconnect);
        Ok(())
    }
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-3 * b.abs().max(1.0)
}
