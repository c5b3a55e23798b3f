//! Consume-once envelopes
//!
//! An envelope wraps one emission so that it can be retrieved at most once,
//! no matter how often a replaying holder hands it out. All three envelope
//! types share the same core: a payload slot behind a lock that flips from
//! `Fresh` to `Consumed` exactly once and moves the payload out when it does.
//!
//! Envelopes are handles. Cloning one does not copy the payload, every clone
//! observes the same consumption. A publisher creates one envelope per
//! emission and pushes it into a holder, the holder clones it for each
//! observer it notifies.
//!
//! | Type | Payload | One-shot accessor |
//! |------|---------|-------------------|
//! | [`Event<T>`] | `T` | [`Event::try_consume`] |
//! | [`OptionalEvent<T>`] | `Option<T>` | [`OptionalEvent::data`] |
//! | [`Signal`] | none | [`Signal::try_consume`] |

use std::{
  fmt::{Debug, Formatter},
  mem,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

mod event;
mod optional;
mod signal;

pub use event::Event;
pub use optional::OptionalEvent;
pub use signal::Signal;

use crate::error::AlreadyConsumed;

enum Slot<T> {
  Fresh(T),
  Consumed,
}

/// Shared core of every envelope type.
pub(crate) struct ConsumeOnce<T>(Arc<Mutex<Slot<T>>>);

impl<T> ConsumeOnce<T> {
  pub(crate) fn new(value: T) -> Self {
    Self(Arc::new(Mutex::new(Slot::Fresh(value))))
  }

  // A panicking observer cannot leave the slot half-written, so a poisoned
  // lock still guards a valid slot.
  fn slot(&self) -> MutexGuard<'_, Slot<T>> {
    self.0.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Flip to `Consumed` and move the payload out, exactly once.
  pub(crate) fn consume(&self) -> Result<T, AlreadyConsumed> {
    match mem::replace(&mut *self.slot(), Slot::Consumed) {
      Slot::Fresh(value) => Ok(value),
      Slot::Consumed => Err(AlreadyConsumed),
    }
  }

  pub(crate) fn is_consumed(&self) -> bool { matches!(*self.slot(), Slot::Consumed) }

  /// Copy of the payload while it is still fresh. The lock is released
  /// before the copy reaches the caller.
  pub(crate) fn peek(&self) -> Option<T>
  where
    T: Clone,
  {
    let slot = self.slot();
    match &*slot {
      Slot::Fresh(value) => Some(value.clone()),
      Slot::Consumed => None,
    }
  }

  pub(crate) fn ptr_eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.0, &other.0) }
}

impl<T> Clone for ConsumeOnce<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Debug for ConsumeOnce<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let state = if self.is_consumed() { "consumed" } else { "fresh" };
    f.write_str(state)
  }
}
