//! Value holder seam
//!
//! A value holder stores a current value, notifies its observers when it
//! changes and replays the last value to observers that become active. The
//! host framework owns all of that behavior. This crate consumes it through
//! [`ValueHolder`], which is the only thing the attachment helpers need.

use crate::{lifecycle::LifecycleOwner, observer::Observer, subscription::Subscription};

/// An observable value holder with host-managed subscriber lifecycle.
///
/// Implementations are expected to:
/// - deliver values only while the owner is active,
/// - replay the last value when an observer becomes active,
/// - detach observers when their owner is destroyed,
/// - ignore `observe` calls with an owner that is already destroyed and
///   return a closed handle.
pub trait ValueHolder<T> {
  type Unsub: Subscription;

  /// Attach `observer` for the lifetime of `owner`.
  fn observe<L, O>(&self, owner: &L, observer: O) -> Self::Unsub
  where
    L: LifecycleOwner,
    O: Observer<T> + 'static;

  /// Attach `observer` with no owner: it is always active and stays attached
  /// until the returned handle is unsubscribed.
  fn observe_forever<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<T> + 'static;

  /// The last value pushed into the holder, if any.
  fn value(&self) -> Option<T>;
}
