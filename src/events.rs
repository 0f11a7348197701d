use crate::listeners::ListenerRegistry;
use lumitone_core::{EventKind, EventSource, Handler, SensorEvent, SubscriptionHandle, Vec2};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Listener {
    target: web::EventTarget,
    event_type: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// [`EventSource`] backed by DOM listeners.
///
/// Light and proximity come from the window, touch moves from the document.
/// Each subscription owns its closure; unsubscribing removes the listener
/// and drops the closure. [`DomEventSource::detach_all`] also removes the
/// non-sensor listeners registered through [`DomEventSource::listen`].
pub struct DomEventSource {
    window: web::Window,
    document: web::Document,
    listeners: ListenerRegistry<Listener>,
}

impl DomEventSource {
    pub fn new(window: web::Window, document: web::Document) -> Self {
        Self {
            window,
            document,
            listeners: ListenerRegistry::default(),
        }
    }

    /// Register a raw DOM listener owned by this source.
    pub fn listen(
        &mut self,
        target: web::EventTarget,
        event_type: &'static str,
        closure: Closure<dyn FnMut(web::Event)>,
    ) -> SubscriptionHandle {
        if let Err(e) =
            target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
        {
            log::warn!("[events] addEventListener({}) failed: {:?}", event_type, e);
        }
        let handle = self.listeners.insert(Listener {
            target,
            event_type,
            closure,
        });
        log::debug!("[events] +{} (#{})", event_type, handle.raw());
        handle
    }

    /// Browsers keep a fresh AudioContext suspended until a user gesture.
    pub fn resume_audio_on_gesture(&mut self, audio_ctx: &web::AudioContext) {
        for event_type in ["touchstart", "click"] {
            let ctx = audio_ctx.clone();
            let closure = Closure::wrap(Box::new(move |_: web::Event| {
                _ = ctx.resume();
            }) as Box<dyn FnMut(web::Event)>);
            self.listen(self.document.clone().into(), event_type, closure);
        }
    }

    /// Remove every listener still registered. Returns how many were removed.
    pub fn detach_all(&mut self) -> usize {
        let all = self.listeners.drain();
        let n = all.len();
        for (handle, l) in all {
            l.detach(handle);
        }
        n
    }

    fn binding(&self, kind: EventKind) -> (web::EventTarget, &'static str) {
        match kind {
            EventKind::Light => (self.window.clone().into(), "devicelight"),
            EventKind::Proximity => (self.window.clone().into(), "userproximity"),
            EventKind::TouchMove => (self.document.clone().into(), "touchmove"),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Listener {
    fn detach(self, handle: SubscriptionHandle) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event_type, self.closure.as_ref().unchecked_ref());
        log::debug!("[events] -{} (#{})", self.event_type, handle.raw());
    }
}

fn translate(kind: EventKind, ev: &web::Event) -> Option<SensorEvent> {
    match kind {
        EventKind::Light => ev
            .dyn_ref::<web::DeviceLightEvent>()
            .map(|e| SensorEvent::Light(e.value() as f32)),
        EventKind::Proximity => ev
            .dyn_ref::<web::UserProximityEvent>()
            .map(|e| SensorEvent::Proximity { near: e.near() }),
        EventKind::TouchMove => {
            let touch = ev.dyn_ref::<web::TouchEvent>()?.target_touches().item(0)?;
            Some(SensorEvent::TouchMove(Vec2::new(
                touch.screen_x() as f32,
                touch.screen_y() as f32,
            )))
        }
    }
}

impl EventSource for DomEventSource {
    fn subscribe(&mut self, kind: EventKind, mut handler: Handler) -> SubscriptionHandle {
        let (target, event_type) = self.binding(kind);

        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Some(sensor) = translate(kind, &ev) {
                handler(&sensor);
            }
        }) as Box<dyn FnMut(web::Event)>);
        self.listen(target, event_type, closure)
    }

    fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        let Some(l) = self.listeners.remove(handle) else {
            return false;
        };
        l.detach(handle);
        true
    }
}
