use smallvec::SmallVec;

/// A container for managing attached items with ID-based tracking.
///
/// Holders and lifecycle owners keep their observers here:
/// - Add new items and get a unique ID
/// - Remove specific items by ID (e.g., when a handle is unsubscribed)
/// - Drain everything at once (e.g., when the owner is destroyed)
///
/// # Design
///
/// - **SmallVec Optimization**: Uses `SmallVec<[_; 2]>` to avoid heap
///   allocation for the common case of 0-2 items.
/// - **Pre-allocation Pattern**: Supports `reserve_id()` + `insert()` to handle
///   cyclic dependencies where the ID is needed before the item exists.
///
/// # Examples
///
/// ```rust
/// use rxevent::subscription::DynamicSubscriptions;
///
/// let mut subs: DynamicSubscriptions<()> = DynamicSubscriptions::default();
///
/// let id1 = subs.add(());
/// assert_eq!(subs.len(), 1);
///
/// // The watcher of an observer needs the observer's ID before it exists.
/// let id2 = subs.reserve_id();
/// subs.insert(id2, ());
/// assert_eq!(subs.len(), 2);
///
/// assert!(subs.remove(id1).is_some());
/// assert_eq!(subs.len(), 1);
/// ```
pub struct DynamicSubscriptions<U> {
  next_id: usize,
  items: SmallVec<[(usize, U); 2]>,
}

impl<U> Default for DynamicSubscriptions<U> {
  fn default() -> Self { Self { next_id: 0, items: SmallVec::new() } }
}

impl<U> DynamicSubscriptions<U> {
  #[inline]
  pub fn new() -> Self { Self::default() }

  /// Add an item and return its unique ID.
  #[inline]
  pub fn add(&mut self, item: U) -> usize {
    let id = self.reserve_id();
    self.items.push((id, item));
    id
  }

  /// Reserve the next ID without adding an item.
  #[inline]
  pub fn reserve_id(&mut self) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    id
  }

  /// Insert an item with a pre-reserved ID.
  #[inline]
  pub fn insert(&mut self, id: usize, item: U) { self.items.push((id, item)); }

  /// Remove an item by ID.
  pub fn remove(&mut self, id: usize) -> Option<U> {
    self
      .items
      .iter()
      .position(|(i, _)| *i == id)
      .map(|pos| self.items.remove(pos).1)
  }

  #[inline]
  pub fn contains(&self, id: usize) -> bool { self.items.iter().any(|(i, _)| *i == id) }

  #[inline]
  pub fn get(&self, id: usize) -> Option<&U> {
    self
      .items
      .iter()
      .find(|(i, _)| *i == id)
      .map(|(_, item)| item)
  }

  #[inline]
  pub fn len(&self) -> usize { self.items.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  #[inline]
  pub fn drain(&mut self) -> impl Iterator<Item = U> + '_ {
    self.items.drain(..).map(|(_, item)| item)
  }

  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = &U> { self.items.iter().map(|(_, item)| item) }

  /// Iterate over `(id, item)` pairs in insertion order.
  #[inline]
  pub fn entries(&self) -> impl Iterator<Item = (usize, &U)> {
    self.items.iter().map(|(id, item)| (*id, item))
  }
}
