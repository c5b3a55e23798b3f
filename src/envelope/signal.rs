use std::fmt::{Debug, Formatter};

use super::ConsumeOnce;
use crate::error::AlreadyConsumed;

/// A payload-less consume-once envelope: only the presence of a pending
/// signal matters.
#[derive(Clone)]
pub struct Signal(ConsumeOnce<()>);

impl Signal {
  #[inline]
  pub fn new() -> Self { Self(ConsumeOnce::new(())) }

  /// `Some(())` on the first call, `None` afterwards.
  #[inline]
  pub fn try_consume(&self) -> Option<()> { self.0.consume().ok() }

  #[inline]
  pub fn consume(&self) -> Result<(), AlreadyConsumed> { self.0.consume() }

  #[inline]
  pub fn has_been_handled(&self) -> bool { self.0.is_consumed() }

  #[inline]
  pub fn is_pending(&self) -> bool { !self.has_been_handled() }

  #[inline]
  pub fn same_event(&self, other: &Self) -> bool { self.0.ptr_eq(&other.0) }
}

impl Default for Signal {
  #[inline]
  fn default() -> Self { Self::new() }
}

impl Debug for Signal {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("Signal").field(&self.0).finish()
  }
}
