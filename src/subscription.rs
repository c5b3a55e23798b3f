//! Subscription handles
//!
//! Every attachment to a holder or lifecycle owner yields a handle that can
//! detach it again. Handles are control objects, they carry no data and are
//! `'static`.

mod boxed;
mod dynamic;

pub use boxed::*;
pub use dynamic::*;

/// A handle to an attached observer.
pub trait Subscription {
  /// Detach the observer. Calling this on an already closed handle is a
  /// no-op.
  fn unsubscribe(self);

  /// Whether the observer is detached, either manually or by its owner.
  fn is_closed(&self) -> bool;
}

/// The unit subscription is a handle to nothing: always closed.
impl Subscription for () {
  #[inline]
  fn unsubscribe(self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

impl<S: Subscription> Subscription for Option<S> {
  #[inline]
  fn unsubscribe(self) {
    if let Some(inner) = self {
      inner.unsubscribe();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.as_ref().is_none_or(S::is_closed) }
}

/// Provides the `unsubscribe_when_dropped()` method on every subscription.
pub trait SubscriptionExt: Subscription + Sized {
  /// Activates "RAII" behavior for this subscription. That means
  /// `unsubscribe()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  fn unsubscribe_when_dropped(self) -> SubscriptionGuard<Self> { SubscriptionGuard::new(self) }
}

impl<S: Subscription> SubscriptionExt for S {}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: Subscription>(Option<T>);

impl<T: Subscription> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(Some(subscription)) }

  #[inline]
  pub fn is_closed(&self) -> bool { self.0.is_closed() }
}

impl<T: Subscription> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.take().unsubscribe() }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use super::*;

  struct Flag(Rc<Cell<bool>>);

  impl Subscription for Flag {
    fn unsubscribe(self) { self.0.set(true); }

    fn is_closed(&self) -> bool { self.0.get() }
  }

  #[test]
  fn unit_is_always_closed() {
    assert!(().is_closed());
    ().unsubscribe();
  }

  #[test]
  fn option_delegates() {
    let closed = Rc::new(Cell::new(false));
    let sub = Some(Flag(closed.clone()));
    assert!(!sub.is_closed());
    sub.unsubscribe();
    assert!(closed.get());
    assert!(None::<Flag>.is_closed());
  }

  #[test]
  fn guard_unsubscribes_on_drop() {
    let closed = Rc::new(Cell::new(false));
    {
      let guard = Flag(closed.clone()).unsubscribe_when_dropped();
      assert!(!guard.is_closed());
    }
    assert!(closed.get());
  }
}
