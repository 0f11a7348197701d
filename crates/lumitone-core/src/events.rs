//! Sensor events and the subscription seam between the pipeline and its hosts.
//!
//! The web front-end backs [`EventSource`] with DOM listeners; the native
//! front-end and the tests use the in-process [`Dispatcher`].

use fnv::FnvHashMap;
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SensorEvent {
    /// Ambient light level (lux).
    Light(f32),
    Proximity { near: bool },
    /// Touch position in screen pixels, origin top-left.
    TouchMove(Vec2),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Light,
    Proximity,
    TouchMove,
}

impl SensorEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SensorEvent::Light(_) => EventKind::Light,
            SensorEvent::Proximity { .. } => EventKind::Proximity,
            SensorEvent::TouchMove(_) => EventKind::TouchMove,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

pub type Handler = Box<dyn FnMut(&SensorEvent)>;

pub trait EventSource {
    fn subscribe(&mut self, kind: EventKind, handler: Handler) -> SubscriptionHandle;
    /// Returns `false` when the handle is unknown or already removed.
    fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool;
}

type HandlerList = SmallVec<[(SubscriptionHandle, Handler); 2]>;

/// Observer-style [`EventSource`] for hosts that deliver events themselves.
#[derive(Default)]
pub struct Dispatcher {
    next_id: u64,
    handlers: FnvHashMap<EventKind, HandlerList>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every handler subscribed to the event's kind, in subscription
    /// order. Returns how many handlers ran.
    pub fn dispatch(&mut self, event: &SensorEvent) -> usize {
        let Some(list) = self.handlers.get_mut(&event.kind()) else {
            return 0;
        };
        for (_, handler) in list.iter_mut() {
            handler(event);
        }
        list.len()
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, |l| l.len())
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(|l| l.is_empty())
    }
}

impl EventSource for Dispatcher {
    fn subscribe(&mut self, kind: EventKind, handler: Handler) -> SubscriptionHandle {
        self.next_id += 1;
        let handle = SubscriptionHandle(self.next_id);
        self.handlers.entry(kind).or_default().push((handle, handler));
        handle
    }

    fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        for list in self.handlers.values_mut() {
            if let Some(pos) = list.iter().position(|(h, _)| *h == handle) {
                drop(list.remove(pos));
                return true;
            }
        }
        false
    }
}
