//! # rxevent: consume-once events for replaying value holders
//!
//! Observable value holders replay their last value to every observer that
//! becomes active, after a screen rotation or a navigation return for
//! example. That is right for state and wrong for one-shot notifications: a
//! toast would show again, a navigation would trigger twice. `rxevent`
//! wraps such notifications in consume-once envelopes and provides observer
//! adapters that only call back the first time an envelope is retrieved.
//!
//! ## Quick Start
//!
#![cfg_attr(feature = "local-host", doc = "```rust")]
#![cfg_attr(not(feature = "local-host"), doc = "```ignore")]
//! use std::{cell::Cell, rc::Rc};
//!
//! use rxevent::prelude::*;
//!
//! let screen = Lifecycle::new();
//! screen.handle_event(LifecycleEvent::Create).unwrap();
//! screen.handle_event(LifecycleEvent::Start).unwrap();
//!
//! let refresh = LiveValue::new();
//! let count = Rc::new(Cell::new(0));
//! let c_count = count.clone();
//! observe_signal(&refresh, &screen, move || c_count.set(c_count.get() + 1));
//!
//! refresh.set_value(Signal::new());
//! // A second observer attached later sees the replayed, already consumed
//! // signal and does nothing.
//! observe_signal(&refresh, &screen, || panic!("replayed"));
//! assert_eq!(count.get(), 1);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Event`] / [`OptionalEvent`] / [`Signal`] | Consume-once envelopes |
//! | [`EventObserver`] and friends | Adapters that fire on fresh envelopes only |
//! | [`observe_event`] and friends | Attach an adapter for an owner's lifetime |
//! | [`ValueHolder`] / [`LifecycleOwner`] | The host seam the helpers run against |
//! | [`LiveValue`] / [`Lifecycle`] | Reference host (feature `local-host`) |
//!
//! ## Feature Flags
//!
//! - **`local-host`** (default): the single-threaded reference host in
//!   [`host`].
//!
//! [`Event`]: envelope::Event
//! [`OptionalEvent`]: envelope::OptionalEvent
//! [`Signal`]: envelope::Signal
//! [`EventObserver`]: adapter::EventObserver
//! [`observe_event`]: attach::observe_event
//! [`ValueHolder`]: holder::ValueHolder
//! [`LifecycleOwner`]: lifecycle::LifecycleOwner
//! [`LiveValue`]: host::LiveValue
//! [`Lifecycle`]: host::Lifecycle

pub mod adapter;
pub mod attach;
pub mod envelope;
pub mod error;
pub mod holder;
#[cfg(feature = "local-host")]
pub mod host;
pub mod lifecycle;
pub mod observer;
pub mod prelude;
pub mod stream;
pub mod subscription;

pub use prelude::*;
