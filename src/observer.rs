//! Observer trait and implementations
//!
//! A value holder never completes or fails, it only notifies observers that
//! its value changed. The observer surface is therefore reduced to `next`,
//! plus `is_closed` so that holders can prune observers that gave up.

// ============================================================================
// Observer Trait
// ============================================================================

/// Observer trait: the consumer of values pushed by a holder.
pub trait Observer<Item> {
  /// Receive the next value from the holder
  fn next(&mut self, value: Item);

  /// Returns `true` if the observer will not accept more values.
  #[inline]
  fn is_closed(&self) -> bool { false }
}

// ============================================================================
// DynObserver Trait - Object-safe Observer
// ============================================================================

/// Object-safe mirror of [`Observer`], so holders can store heterogeneous
/// observers behind one pointer type.
pub trait DynObserver<Item> {
  fn box_next(&mut self, value: Item);
  fn box_is_closed(&self) -> bool;
}

impl<T, Item> DynObserver<Item> for T
where
  T: Observer<Item>,
{
  #[inline]
  fn box_next(&mut self, value: Item) { self.next(value); }
  #[inline]
  fn box_is_closed(&self) -> bool { self.is_closed() }
}

/// Boxed value observer, as stored by holders and lifecycle owners
pub type BoxedObserver<'a, Item> = Box<dyn DynObserver<Item> + 'a>;

impl<'a, Item> Observer<Item> for BoxedObserver<'a, Item> {
  #[inline]
  fn next(&mut self, value: Item) { (**self).box_next(value) }

  #[inline]
  fn is_closed(&self) -> bool { (**self).box_is_closed() }
}

// ============================================================================
// FnMutObserver - Closure adapter
// ============================================================================

/// Closure adapter: the closure becomes the `next` handler.
#[derive(Clone)]
pub struct FnMutObserver<F>(pub F);

impl<F, Item> Observer<Item> for FnMutObserver<F>
where
  F: FnMut(Item),
{
  #[inline]
  fn next(&mut self, v: Item) { (self.0)(v); }
}
