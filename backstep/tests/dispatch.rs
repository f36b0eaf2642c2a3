//! Dispatch order, enablement and removal.

use backstep::{BackCallback, BackDispatcher, testing::OrderRecorder};

mod common;
use common::{PassthroughHandler, SelfRemovingHandler, counting};

#[test]
fn test_add_callback() {
    let dispatcher = BackDispatcher::new();
    let (counter, callback) = counting(true);

    dispatcher.add_callback(&callback);
    assert!(dispatcher.has_enabled_callbacks());

    dispatcher.dispatch();
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_remove_callback() {
    let dispatcher = BackDispatcher::new();
    let (counter, callback) = counting(true);

    dispatcher.add_callback(&callback);
    assert!(dispatcher.has_enabled_callbacks());
    dispatcher.dispatch();
    assert_eq!(counter.count(), 1);

    callback.remove();
    assert!(!dispatcher.has_enabled_callbacks());
    dispatcher.dispatch();
    assert_eq!(counter.count(), 1, "removed callback must not run");
}

#[test]
fn test_remove_through_registration() {
    let dispatcher = BackDispatcher::new();
    let (counter, callback) = counting(true);

    let registration = dispatcher.add_callback(&callback);
    registration.remove();
    assert!(!dispatcher.has_enabled_callbacks());
    assert!(!callback.is_registered());

    dispatcher.dispatch();
    assert_eq!(counter.count(), 0);
}

#[test]
fn test_remove_callback_in_callback() {
    let dispatcher = BackDispatcher::new();
    let counter = backstep::testing::CountingHandler::new();
    let callback = BackCallback::new(SelfRemovingHandler {
        counter: counter.clone(),
    });

    dispatcher.add_callback(&callback);
    assert!(dispatcher.has_enabled_callbacks());
    dispatcher.dispatch();
    assert_eq!(counter.count(), 1);

    assert!(!dispatcher.has_enabled_callbacks());
    dispatcher.dispatch();
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_multiple_calls() {
    let dispatcher = BackDispatcher::new();
    let (counter, callback) = counting(true);

    dispatcher.add_callback(&callback);
    dispatcher.dispatch();
    dispatcher.dispatch();
    assert_eq!(counter.count(), 2);
}

#[test]
fn test_most_recent_gets_priority() {
    let dispatcher = BackDispatcher::new();
    let (older, older_cb) = counting(true);
    let (newer, newer_cb) = counting(true);

    dispatcher.add_callback(&older_cb);
    dispatcher.add_callback(&newer_cb);
    dispatcher.dispatch();

    assert_eq!(newer.count(), 1);
    assert_eq!(older.count(), 0);
}

#[test]
fn test_disabled_callback_is_skipped() {
    let dispatcher = BackDispatcher::new();
    let (enabled, enabled_cb) = counting(true);
    let (disabled, disabled_cb) = counting(false);

    dispatcher.add_callback(&enabled_cb);
    dispatcher.add_callback(&disabled_cb);
    dispatcher.dispatch();

    assert_eq!(disabled.count(), 0);
    assert_eq!(enabled.count(), 1);
}

#[test]
fn test_disable_falls_through_and_enable_restores() {
    let dispatcher = BackDispatcher::new();
    let recorder = OrderRecorder::new();
    let a = BackCallback::new(recorder.handler("a"));
    let b = BackCallback::new(recorder.handler("b"));
    dispatcher.add_callback(&a);
    dispatcher.add_callback(&b);

    b.disable();
    dispatcher.dispatch();
    b.enable();
    dispatcher.dispatch();

    assert_eq!(recorder.order(), vec!["a", "b"]);
}

#[test]
fn test_passthrough_callback() {
    let dispatcher = BackDispatcher::new();
    let (previous, previous_cb) = counting(true);
    let passthrough = backstep::testing::CountingHandler::new();
    let passthrough_cb = BackCallback::new(PassthroughHandler {
        counter: passthrough.clone(),
        dispatcher: dispatcher.downgrade(),
    });

    dispatcher.add_callback(&previous_cb);
    dispatcher.add_callback(&passthrough_cb);
    dispatcher.dispatch();

    assert_eq!(passthrough.count(), 1);
    assert_eq!(previous.count(), 1, "inner dispatch reaches the next callback");
}

#[test]
fn test_has_enabled_callbacks_tracks_flags() {
    let dispatcher = BackDispatcher::new();
    assert!(!dispatcher.has_enabled_callbacks());

    let (_, a) = counting(false);
    dispatcher.add_callback(&a);
    assert!(!dispatcher.has_enabled_callbacks());

    a.enable();
    assert!(dispatcher.has_enabled_callbacks());
    a.disable();
    assert!(!dispatcher.has_enabled_callbacks());
}

#[test]
fn test_no_enabled_callbacks_is_noop() {
    let dispatcher = BackDispatcher::new();
    dispatcher.dispatch();

    let (counter, callback) = counting(false);
    dispatcher.add_callback(&callback);
    dispatcher.dispatch();
    assert_eq!(counter.count(), 0);
}

#[test]
fn test_re_adding_moves_to_top() {
    let dispatcher = BackDispatcher::new();
    let recorder = OrderRecorder::new();
    let a = BackCallback::new(recorder.handler("a"));
    let b = BackCallback::new(recorder.handler("b"));
    dispatcher.add_callback(&a);
    dispatcher.add_callback(&b);
    dispatcher.add_callback(&a);

    assert_eq!(dispatcher.len(), 2);
    dispatcher.dispatch();
    assert_eq!(recorder.order(), vec!["a"]);
}

#[test]
fn test_same_callback_on_two_dispatchers() {
    let first = BackDispatcher::new();
    let second = BackDispatcher::new();
    let (counter, callback) = counting(true);

    first.add_callback(&callback);
    second.add_callback(&callback);

    callback.remove();
    assert!(first.is_empty());
    assert!(second.is_empty());

    first.dispatch();
    second.dispatch();
    assert_eq!(counter.count(), 0);
}
