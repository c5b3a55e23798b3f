//! Attachment helpers
//!
//! Bind an adapter to a value holder for the lifetime of a lifecycle owner.
//! The returned handle identifies the attached adapter: keep it to detach
//! manually, wrap it with
//! [`unsubscribe_when_dropped`](crate::subscription::SubscriptionExt::unsubscribe_when_dropped)
//! for RAII detachment, or drop it and let the owner's destruction detach.
//!
//! Activation window, detachment on destruction and replay on reactivation
//! are the holder's behavior, not this module's.
//!
#![cfg_attr(feature = "local-host", doc = "```rust")]
#![cfg_attr(not(feature = "local-host"), doc = "```ignore")]
//! use std::{cell::RefCell, rc::Rc};
//!
//! use rxevent::prelude::*;
//!
//! let screen = Lifecycle::new();
//! screen.handle_event(LifecycleEvent::Create).unwrap();
//! screen.handle_event(LifecycleEvent::Start).unwrap();
//!
//! let toasts = LiveValue::new();
//! let shown = Rc::new(RefCell::new(Vec::new()));
//! let c_shown = shown.clone();
//! observe_event(&toasts, &screen, move |msg: &'static str| c_shown.borrow_mut().push(msg));
//!
//! toasts.set_value(Event::new("saved"));
//! // Rotation: the screen stops and starts again, the holder replays.
//! screen.handle_event(LifecycleEvent::Stop).unwrap();
//! screen.handle_event(LifecycleEvent::Start).unwrap();
//!
//! assert_eq!(*shown.borrow(), vec!["saved"]);
//! ```

use tracing::debug;

use crate::{
  adapter::{EventObserver, OptionalEventObserver, SignalObserver},
  envelope::{Event, OptionalEvent, Signal},
  holder::ValueHolder,
  lifecycle::LifecycleOwner,
};

fn log_destroyed_owner<L: LifecycleOwner>(owner: &L, kind: &'static str) {
  if owner.current_state().is_destroyed() {
    debug!(kind, "owner already destroyed, attachment is a no-op");
  }
}

/// Call `callback` with the payload of each fresh [`Event`] delivered by
/// `holder` while `owner` is active.
pub fn observe_event<H, L, T, F>(holder: &H, owner: &L, callback: F) -> H::Unsub
where
  H: ValueHolder<Event<T>>,
  L: LifecycleOwner,
  F: FnMut(T) + 'static,
{
  log_destroyed_owner(owner, "event");
  holder.observe(owner, EventObserver::new(callback))
}

/// Call `callback` with the payload of each fresh [`OptionalEvent`]
/// delivered by `holder` while `owner` is active.
pub fn observe_optional_event<H, L, T, F>(holder: &H, owner: &L, callback: F) -> H::Unsub
where
  H: ValueHolder<OptionalEvent<T>>,
  L: LifecycleOwner,
  F: FnMut(Option<T>) + 'static,
{
  log_destroyed_owner(owner, "optional event");
  holder.observe(owner, OptionalEventObserver::new(callback))
}

/// Call `callback` for each fresh [`Signal`] delivered by `holder` while
/// `owner` is active.
pub fn observe_signal<H, L, F>(holder: &H, owner: &L, callback: F) -> H::Unsub
where
  H: ValueHolder<Signal>,
  L: LifecycleOwner,
  F: FnMut() + 'static,
{
  log_destroyed_owner(owner, "signal");
  holder.observe(owner, SignalObserver::new(callback))
}

/// Like [`observe_event`] without an owner: active until unsubscribed.
pub fn observe_event_forever<H, T, F>(holder: &H, callback: F) -> H::Unsub
where
  H: ValueHolder<Event<T>>,
  F: FnMut(T) + 'static,
{
  holder.observe_forever(EventObserver::new(callback))
}

/// Like [`observe_optional_event`] without an owner.
pub fn observe_optional_event_forever<H, T, F>(holder: &H, callback: F) -> H::Unsub
where
  H: ValueHolder<OptionalEvent<T>>,
  F: FnMut(Option<T>) + 'static,
{
  holder.observe_forever(OptionalEventObserver::new(callback))
}

/// Like [`observe_signal`] without an owner.
pub fn observe_signal_forever<H, F>(holder: &H, callback: F) -> H::Unsub
where
  H: ValueHolder<Signal>,
  F: FnMut() + 'static,
{
  holder.observe_forever(SignalObserver::new(callback))
}
