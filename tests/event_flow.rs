//! Integration tests for consume-once delivery
//!
//! Drives whole flows through the reference host: rotations, navigation
//! returns, late observers and destroyed owners.

use std::{cell::RefCell, rc::Rc};

use rxevent::prelude::*;

fn created() -> Lifecycle {
  let owner = Lifecycle::new();
  owner.handle_event(LifecycleEvent::Create).unwrap();
  owner
}

fn started() -> Lifecycle {
  let owner = created();
  owner.handle_event(LifecycleEvent::Start).unwrap();
  owner
}

fn rotate(owner: &Lifecycle) {
  owner.handle_event(LifecycleEvent::Pause).unwrap();
  owner.handle_event(LifecycleEvent::Stop).unwrap();
  owner.handle_event(LifecycleEvent::Start).unwrap();
  owner.handle_event(LifecycleEvent::Resume).unwrap();
}

type Log<T> = Rc<RefCell<Vec<T>>>;

fn log<T>() -> Log<T> { Rc::new(RefCell::new(Vec::new())) }

#[test]
fn plain_values_replay_but_events_do_not() {
  let owner = started();
  let plain = LiveValue::new();
  let events = LiveValue::new();

  let plain_log = log();
  let c_plain = plain_log.clone();
  let _plain =
    plain.observe(&owner, FnMutObserver(move |v: &'static str| c_plain.borrow_mut().push(v)));
  let event_log = log();
  let c_events = event_log.clone();
  observe_event(&events, &owner, move |v: &'static str| c_events.borrow_mut().push(v));

  plain.set_value("toast");
  events.set_value(Event::new("toast"));

  // The screen is recreated and observes the same holders again.
  let next_screen = started();
  let c_plain = plain_log.clone();
  let _plain2 = plain
    .observe(&next_screen, FnMutObserver(move |v: &'static str| c_plain.borrow_mut().push(v)));
  let c_events = event_log.clone();
  observe_event(&events, &next_screen, move |v: &'static str| c_events.borrow_mut().push(v));

  assert_eq!(*plain_log.borrow(), vec!["toast", "toast"]);
  assert_eq!(*event_log.borrow(), vec!["toast"]);
}

#[test]
fn rotation_does_not_refire_event() {
  let owner = started();
  let toasts = LiveValue::new();
  let shown = log();
  let c_shown = shown.clone();
  let sub = observe_event(&toasts, &owner, move |msg: String| c_shown.borrow_mut().push(msg));

  toasts.set_value(Event::new(String::from("saved")));
  rotate(&owner);
  rotate(&owner);

  assert_eq!(*shown.borrow(), vec![String::from("saved")]);
  assert!(!sub.is_closed());
  assert!(toasts.value().is_some_and(|e| e.has_been_handled()));
}

#[test]
fn event_posted_while_stopped_fires_on_return() {
  let owner = started();
  let navigation = LiveValue::new();
  let visited = log();
  let c_visited = visited.clone();
  observe_event(&navigation, &owner, move |to: &'static str| c_visited.borrow_mut().push(to));

  owner.handle_event(LifecycleEvent::Stop).unwrap();
  navigation.set_value(Event::new("details"));
  assert!(visited.borrow().is_empty());

  owner.handle_event(LifecycleEvent::Start).unwrap();
  rotate(&owner);
  assert_eq!(*visited.borrow(), vec!["details"]);
}

#[test]
fn two_adapters_on_one_holder_share_the_envelope() {
  let owner = started();
  let holder = LiveValue::new();
  let hits = log();
  let (h1, h2) = (hits.clone(), hits.clone());
  observe_event(&holder, &owner, move |v: u32| h1.borrow_mut().push(("first", v)));
  observe_event(&holder, &owner, move |v: u32| h2.borrow_mut().push(("second", v)));

  holder.set_value(Event::new(7));
  holder.set_value(Event::new(8));

  assert_eq!(*hits.borrow(), vec![("first", 7), ("first", 8)]);
}

#[test]
fn attaching_to_destroyed_owner_never_fires() {
  let owner = started();
  owner.handle_event(LifecycleEvent::Destroy).unwrap();

  let events = LiveValue::with_value(Event::new(1));
  let optional = LiveValue::with_value(OptionalEvent::new(Some(1)));
  let signals = LiveValue::with_value(Signal::new());
  let fired = Rc::new(RefCell::new(false));

  let (f1, f2, f3) = (fired.clone(), fired.clone(), fired.clone());
  let a = observe_event(&events, &owner, move |_: i32| *f1.borrow_mut() = true);
  let b = observe_optional_event(&optional, &owner, move |_: Option<i32>| *f2.borrow_mut() = true);
  let c = observe_signal(&signals, &owner, move || *f3.borrow_mut() = true);

  events.set_value(Event::new(2));
  optional.set_value(OptionalEvent::empty());
  signals.set_value(Signal::new());

  assert!(!*fired.borrow());
  assert!(a.is_closed() && b.is_closed() && c.is_closed());
  assert!(!events.has_observers());
}

#[test]
fn owner_destruction_detaches_adapters() {
  let owner = started();
  let signals = LiveValue::new();
  let count = Rc::new(RefCell::new(0));
  let c_count = count.clone();
  let sub = observe_signal(&signals, &owner, move || *c_count.borrow_mut() += 1);

  signals.set_value(Signal::new());
  owner.handle_event(LifecycleEvent::Destroy).unwrap();
  signals.set_value(Signal::new());

  assert_eq!(*count.borrow(), 1);
  assert!(sub.is_closed());
  assert!(!signals.has_observers());
}

#[test]
fn optional_event_delivers_absent_payload_once() {
  let owner = started();
  let holder = LiveValue::new();
  let seen = log();
  let c_seen = seen.clone();
  observe_optional_event(&holder, &owner, move |v: Option<&'static str>| {
    c_seen.borrow_mut().push(v)
  });

  holder.set_value(OptionalEvent::empty());
  rotate(&owner);
  holder.set_value(OptionalEvent::new(Some("retry")));
  rotate(&owner);

  assert_eq!(*seen.borrow(), vec![None, Some("retry")]);
}

#[test]
fn manual_detach_and_guard() {
  let owner = started();
  let holder = LiveValue::new();
  let seen = log();

  let c_seen = seen.clone();
  let sub = observe_event(&holder, &owner, move |v: i32| c_seen.borrow_mut().push(("manual", v)));
  holder.set_value(Event::new(1));
  sub.unsubscribe();

  {
    let c_seen = seen.clone();
    let _guard =
      observe_event(&holder, &owner, move |v: i32| c_seen.borrow_mut().push(("guard", v)))
        .unsubscribe_when_dropped();
    holder.set_value(Event::new(2));
  }
  holder.set_value(Event::new(3));

  assert_eq!(*seen.borrow(), vec![("manual", 1), ("guard", 2)]);
  assert!(holder.value().is_some_and(|e| e.peek() == Some(3)));
}

#[test]
fn forever_helpers_ignore_lifecycle() {
  let events = LiveValue::new();
  let optional = LiveValue::new();
  let signals = LiveValue::new();
  let seen = log();

  let (s1, s2, s3) = (seen.clone(), seen.clone(), seen.clone());
  let a = observe_event_forever(&events, move |v: i32| s1.borrow_mut().push(format!("event {v}")));
  let b = observe_optional_event_forever(&optional, move |v: Option<i32>| {
    s2.borrow_mut().push(format!("optional {v:?}"))
  });
  let c = observe_signal_forever(&signals, move || s3.borrow_mut().push(String::from("signal")));

  events.set_value(Event::new(1));
  optional.set_value(OptionalEvent::empty());
  signals.set_value(Signal::new());
  a.unsubscribe();
  b.unsubscribe();
  c.unsubscribe();
  events.set_value(Event::new(2));

  assert_eq!(*seen.borrow(), vec!["event 1", "optional None", "signal"]);
}

#[test]
fn callback_can_publish_follow_up_event() {
  let owner = started();
  let first = LiveValue::new();
  let second = LiveValue::new();
  let seen = log();

  let relay = second.clone();
  observe_event(&first, &owner, move |v: i32| relay.set_value(Event::new(v * 10)));
  let c_seen = seen.clone();
  observe_event(&second, &owner, move |v: i32| c_seen.borrow_mut().push(v));

  first.set_value(Event::new(4));
  rotate(&owner);
  assert_eq!(*seen.borrow(), vec![40]);
}

#[test]
fn not_started_owner_holds_delivery() {
  let owner = created();
  let holder = LiveValue::with_value(Event::new("queued"));
  let seen = log();
  let c_seen = seen.clone();
  observe_event(&holder, &owner, move |v: &'static str| c_seen.borrow_mut().push(v));
  assert!(seen.borrow().is_empty());
  assert!(!holder.has_active_observers());

  owner.handle_event(LifecycleEvent::Start).unwrap();
  assert_eq!(*seen.borrow(), vec!["queued"]);
}
