// Host-side tests for the in-process event dispatcher.

use lumitone_core::*;
use std::cell::RefCell;
use std::rc::Rc;

fn noop() -> Handler {
    Box::new(|_: &SensorEvent| {})
}

#[test]
fn unsubscribe_succeeds_once() {
    let mut d = Dispatcher::new();
    let h = d.subscribe(EventKind::Light, noop());
    assert_eq!(d.listener_count(EventKind::Light), 1);
    assert!(d.unsubscribe(h));
    assert!(!d.unsubscribe(h));
    assert!(d.is_empty());
}

#[test]
fn unknown_handle_is_harmless() {
    let mut d = Dispatcher::new();
    d.subscribe(EventKind::Proximity, noop());
    assert!(!d.unsubscribe(SubscriptionHandle::from_raw(99)));
    assert_eq!(d.listener_count(EventKind::Proximity), 1);
}

#[test]
fn handlers_run_in_subscription_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut d = Dispatcher::new();
    for tag in ["first", "second", "third"] {
        let seen = seen.clone();
        d.subscribe(
            EventKind::Light,
            Box::new(move |_: &SensorEvent| seen.borrow_mut().push(tag)),
        );
    }
    assert_eq!(d.dispatch(&SensorEvent::Light(10.0)), 3);
    assert_eq!(*seen.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn dispatch_only_reaches_matching_kind() {
    let hits = Rc::new(RefCell::new(0));
    let mut d = Dispatcher::new();
    let counter = hits.clone();
    let h = d.subscribe(
        EventKind::TouchMove,
        Box::new(move |_: &SensorEvent| *counter.borrow_mut() += 1),
    );
    assert_eq!(d.dispatch(&SensorEvent::Proximity { near: true }), 0);
    assert_eq!(d.dispatch(&SensorEvent::TouchMove(Vec2::new(1.0, 2.0))), 1);
    d.unsubscribe(h);
    assert_eq!(d.dispatch(&SensorEvent::TouchMove(Vec2::new(1.0, 2.0))), 0);
    assert_eq!(*hits.borrow(), 1);
}
