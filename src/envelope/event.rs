use std::fmt::{Debug, Formatter};

use super::ConsumeOnce;
use crate::error::AlreadyConsumed;

/// A consume-once envelope around a value that is always present.
///
/// The first call to [`try_consume`](Event::try_consume) on any clone moves
/// the value out. Every later call, on this handle or any clone, returns
/// `None`.
///
/// ```rust
/// use rxevent::prelude::*;
///
/// let event = Event::new("A");
/// assert_eq!(event.try_consume(), Some("A"));
/// assert_eq!(event.try_consume(), None);
/// ```
pub struct Event<T>(ConsumeOnce<T>);

impl<T> Event<T> {
  #[inline]
  pub fn new(value: T) -> Self { Self(ConsumeOnce::new(value)) }

  /// Returns the value on the first call, `None` afterwards.
  #[inline]
  pub fn try_consume(&self) -> Option<T> { self.0.consume().ok() }

  /// Tagged form of [`try_consume`](Event::try_consume).
  #[inline]
  pub fn consume(&self) -> Result<T, AlreadyConsumed> { self.0.consume() }

  #[inline]
  pub fn has_been_handled(&self) -> bool { self.0.is_consumed() }

  /// A copy of the value without consuming it. Returns `None` once the value
  /// has been handed out.
  #[inline]
  pub fn peek(&self) -> Option<T>
  where
    T: Clone,
  {
    self.0.peek()
  }

  /// Whether both handles refer to the same emission.
  #[inline]
  pub fn same_event(&self, other: &Self) -> bool { self.0.ptr_eq(&other.0) }
}

impl<T> Clone for Event<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> From<T> for Event<T> {
  #[inline]
  fn from(value: T) -> Self { Self::new(value) }
}

impl<T> Debug for Event<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("Event").field(&self.0).finish()
  }
}
