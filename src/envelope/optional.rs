use std::fmt::{Debug, Formatter};

use super::ConsumeOnce;
use crate::error::AlreadyConsumed;

/// A consume-once envelope whose payload may be absent.
///
/// [`data`](OptionalEvent::data) returns `None` in two cases: the payload was
/// absent, or the envelope was already consumed. Query
/// [`has_been_handled`](OptionalEvent::has_been_handled) *before* calling it
/// to tell the two apart, or use [`try_consume`](OptionalEvent::try_consume)
/// which keeps them separate.
///
/// ```rust
/// use rxevent::prelude::*;
///
/// let event = OptionalEvent::<u32>::empty();
/// assert!(!event.has_been_handled());
/// assert_eq!(event.data(), None);
/// assert!(event.has_been_handled());
/// ```
pub struct OptionalEvent<T>(ConsumeOnce<Option<T>>);

impl<T> OptionalEvent<T> {
  #[inline]
  pub fn new(value: Option<T>) -> Self { Self(ConsumeOnce::new(value)) }

  /// An envelope carrying no payload.
  #[inline]
  pub fn empty() -> Self { Self::new(None) }

  #[inline]
  pub fn has_been_handled(&self) -> bool { self.0.is_consumed() }

  /// Marks the envelope handled and returns the payload, if this was the
  /// first access and a payload was present.
  #[inline]
  pub fn data(&self) -> Option<T> { self.0.consume().ok().flatten() }

  /// `Some(payload)` on the first access, `None` afterwards. The inner
  /// option is the payload itself.
  #[inline]
  pub fn try_consume(&self) -> Option<Option<T>> { self.0.consume().ok() }

  #[inline]
  pub fn consume(&self) -> Result<Option<T>, AlreadyConsumed> { self.0.consume() }

  /// A copy of the payload without consuming it. The outer `None` means the
  /// envelope was already consumed.
  #[inline]
  pub fn peek(&self) -> Option<Option<T>>
  where
    T: Clone,
  {
    self.0.peek()
  }

  #[inline]
  pub fn same_event(&self, other: &Self) -> bool { self.0.ptr_eq(&other.0) }
}

impl<T> Clone for OptionalEvent<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> From<Option<T>> for OptionalEvent<T> {
  #[inline]
  fn from(value: Option<T>) -> Self { Self::new(value) }
}

impl<T> Default for OptionalEvent<T> {
  #[inline]
  fn default() -> Self { Self::empty() }
}

impl<T> Debug for OptionalEvent<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("OptionalEvent").field(&self.0).finish()
  }
}
