//! Observer adapters
//!
//! Each adapter wraps a caller callback and consumes the envelope it is
//! notified with. The callback runs only if this adapter was the first to
//! consume that envelope. Consumption state lives on the envelope, so
//! several adapters observing the same envelope share it: whichever is
//! notified first fires, the others skip.

use tracing::trace;

use crate::{
  envelope::{Event, OptionalEvent, Signal},
  observer::Observer,
};

/// Invokes its callback with the payload of every fresh [`Event`].
#[derive(Clone)]
pub struct EventObserver<F> {
  callback: F,
}

impl<F> EventObserver<F> {
  #[inline]
  pub fn new(callback: F) -> Self { Self { callback } }
}

impl<T, F> Observer<Event<T>> for EventObserver<F>
where
  F: FnMut(T),
{
  fn next(&mut self, event: Event<T>) {
    match event.try_consume() {
      Some(value) => (self.callback)(value),
      None => trace!(?event, "skipping consumed event"),
    }
  }
}

/// Invokes its callback with the (possibly absent) payload of every fresh
/// [`OptionalEvent`].
#[derive(Clone)]
pub struct OptionalEventObserver<F> {
  callback: F,
}

impl<F> OptionalEventObserver<F> {
  #[inline]
  pub fn new(callback: F) -> Self { Self { callback } }
}

impl<T, F> Observer<OptionalEvent<T>> for OptionalEventObserver<F>
where
  F: FnMut(Option<T>),
{
  fn next(&mut self, event: OptionalEvent<T>) {
    match event.try_consume() {
      Some(value) => (self.callback)(value),
      None => trace!(?event, "skipping consumed optional event"),
    }
  }
}

/// Invokes its callback once for every fresh [`Signal`].
#[derive(Clone)]
pub struct SignalObserver<F> {
  callback: F,
}

impl<F> SignalObserver<F> {
  #[inline]
  pub fn new(callback: F) -> Self { Self { callback } }
}

impl<F> Observer<Signal> for SignalObserver<F>
where
  F: FnMut(),
{
  fn next(&mut self, signal: Signal) {
    if signal.try_consume().is_some() {
      (self.callback)();
    } else {
      trace!(?signal, "skipping consumed signal");
    }
  }
}
