use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Shared stop flag for a repeating render task. Once stopped the task must
/// not re-arm.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// Fixed-delay pacing: the next tick is due one period after the previous
/// tick ran, not after it was scheduled, so a slow paint never queues up.
#[derive(Clone, Debug)]
pub struct TickPacer {
    period: Duration,
    next_due: Instant,
    stop: StopHandle,
}

impl TickPacer {
    pub fn new(period: Duration, now: Instant, stop: StopHandle) -> Self {
        Self {
            period,
            next_due: now,
            stop,
        }
    }

    /// True when a paint should run at `now`; re-arms for `now + period`.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.stop.is_stopped() || now < self.next_due {
            return false;
        }
        self.next_due = now + self.period;
        true
    }

    /// Deadline for the host's event loop, `None` once stopped.
    pub fn next_due(&self) -> Option<Instant> {
        (!self.stop.is_stopped()).then_some(self.next_due)
    }
}

struct TaskState<C> {
    callback: Option<C>,
    pending: Option<i32>,
    stop: StopHandle,
}

/// Owner side of a timer task that re-arms itself after every step.
///
/// The callback usually holds a clone of the task, so the two keep each other
/// alive until [`RepeatingTask::cancel`] takes the callback out. `cancel` must
/// run outside the callback; it hands back the pending timer id so the host
/// can clear it.
pub struct RepeatingTask<C> {
    state: Rc<RefCell<TaskState<C>>>,
}

impl<C> Clone for RepeatingTask<C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<C> RepeatingTask<C> {
    pub fn new(stop: StopHandle) -> Self {
        Self {
            state: Rc::new(RefCell::new(TaskState {
                callback: None,
                pending: None,
                stop,
            })),
        }
    }

    /// Returns `false` and drops `callback` when the task was already
    /// stopped, so no cycle is left behind.
    pub fn install(&self, callback: C) -> bool {
        let mut s = self.state.borrow_mut();
        if s.stop.is_stopped() {
            return false;
        }
        s.callback = Some(callback);
        true
    }

    /// One step: `paint`, then hand the callback to `arm`, which schedules
    /// the next step and returns its timer id. Does nothing once stopped.
    pub fn step(&self, paint: impl FnOnce(), arm: impl FnOnce(&C) -> Option<i32>) -> bool {
        {
            let mut s = self.state.borrow_mut();
            // Whatever was pending has fired by now.
            s.pending = None;
            if s.stop.is_stopped() || s.callback.is_none() {
                return false;
            }
        }
        paint();
        let mut guard = self.state.borrow_mut();
        let s = &mut *guard;
        let Some(cb) = s.callback.as_ref() else {
            return false;
        };
        s.pending = arm(cb);
        true
    }

    /// Stop the task and release its callback. Returns the timer id still
    /// pending, if any.
    pub fn cancel(&self) -> Option<i32> {
        let (callback, pending) = {
            let mut s = self.state.borrow_mut();
            s.stop.stop();
            (s.callback.take(), s.pending.take())
        };
        drop(callback);
        pending
    }

    pub fn is_armed(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    pub fn is_stopped(&self) -> bool {
        self.state.borrow().stop.is_stopped()
    }
}
