use std::{
  cell::{Cell, RefCell},
  fmt::{Debug, Formatter},
  rc::{Rc, Weak},
};

use tracing::debug;

use crate::{
  holder::ValueHolder,
  lifecycle::{LifecycleOwner, LifecycleState},
  observer::{BoxedObserver, FnMutObserver, Observer},
  subscription::{BoxedSubscription, DynamicSubscriptions, Subscription},
};

/// One attached observer and its delivery bookkeeping.
struct Entry<T> {
  observer: RefCell<BoxedObserver<'static, T>>,
  active: Cell<bool>,
  /// Version of the last value handed to this observer, 0 for none.
  last_version: Cell<u64>,
  /// Lifecycle watch of the owner, absent for `observe_forever`.
  watch: RefCell<Option<BoxedSubscription>>,
}

struct Inner<T> {
  value: Option<T>,
  /// Bumped by every `set_value`, 0 until the first value.
  version: u64,
  observers: DynamicSubscriptions<Rc<Entry<T>>>,
  dispatching: bool,
  invalidated: bool,
}

/// A replaying value holder.
///
/// Stores the last value and pushes every new one to its active observers.
/// Each observer sees a given value at most once, but an observer that
/// becomes active (its owner reaches
/// [`Started`](LifecycleState::Started)) is handed the current value if it
/// has not seen it yet. That replay is exactly what makes plain values unfit
/// for one-shot notifications and what the envelopes guard against.
///
/// Setting a value from inside an observer callback does not nest: the
/// running dispatch restarts so that every active observer ends up with the
/// newest value once.
pub struct LiveValue<T>(Rc<RefCell<Inner<T>>>);

impl<T> Clone for LiveValue<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T: Clone + 'static> LiveValue<T> {
  /// A holder without a value. Observers are not notified until the first
  /// `set_value`.
  pub fn new() -> Self {
    Self(Rc::new(RefCell::new(Inner {
      value: None,
      version: 0,
      observers: DynamicSubscriptions::default(),
      dispatching: false,
      invalidated: false,
    })))
  }

  pub fn with_value(value: T) -> Self {
    let holder = Self::new();
    {
      let mut inner = holder.0.borrow_mut();
      inner.value = Some(value);
      inner.version = 1;
    }
    holder
  }

  /// Store `value` and notify every active observer.
  pub fn set_value(&self, value: T) {
    let previous = {
      let mut inner = self.0.borrow_mut();
      inner.version += 1;
      inner.value.replace(value)
    };
    drop(previous);
    self.dispatch(None);
  }

  #[inline]
  pub fn value(&self) -> Option<T> { self.0.borrow().value.clone() }

  #[inline]
  pub fn version(&self) -> u64 { self.0.borrow().version }

  #[inline]
  pub fn has_observers(&self) -> bool { !self.0.borrow().observers.is_empty() }

  pub fn has_active_observers(&self) -> bool {
    self
      .0
      .borrow()
      .observers
      .iter()
      .any(|entry| entry.active.get())
  }

  fn attach(&self, entry: Entry<T>) -> LiveSubscription<T> {
    let id = self.0.borrow_mut().observers.add(Rc::new(entry));
    self.dispatch(Some(id));
    LiveSubscription { inner: Rc::downgrade(&self.0), id }
  }

  fn on_owner_state(&self, id: usize, state: LifecycleState) {
    if state.is_destroyed() {
      debug!(id, "owner destroyed, detaching observer");
      self.remove(id);
      return;
    }
    let entry = self.0.borrow().observers.get(id).cloned();
    let Some(entry) = entry else { return };
    let was_active = entry.active.replace(state.is_active());
    if !was_active && state.is_active() {
      self.dispatch(Some(id));
    }
  }

  fn remove(&self, id: usize) {
    let entry = self.0.borrow_mut().observers.remove(id);
    if let Some(entry) = entry {
      entry.active.set(false);
      let watch = entry.watch.borrow_mut().take();
      watch.unsubscribe();
    }
  }

  fn dispatch(&self, mut initiator: Option<usize>) {
    {
      let mut inner = self.0.borrow_mut();
      if inner.dispatching {
        inner.invalidated = true;
        return;
      }
      inner.dispatching = true;
    }
    loop {
      let targets: Vec<Rc<Entry<T>>> = {
        let mut inner = self.0.borrow_mut();
        inner.invalidated = false;
        match initiator.take() {
          Some(id) => inner.observers.get(id).cloned().into_iter().collect(),
          None => inner.observers.iter().cloned().collect(),
        }
      };
      for entry in targets {
        self.consider_notify(&entry);
        if self.0.borrow().invalidated {
          break;
        }
      }
      let mut inner = self.0.borrow_mut();
      if !inner.invalidated {
        inner.dispatching = false;
        break;
      }
    }
  }

  fn consider_notify(&self, entry: &Entry<T>) {
    if !entry.active.get() {
      return;
    }
    let (value, version) = {
      let inner = self.0.borrow();
      match &inner.value {
        Some(value) if entry.last_version.get() < inner.version => (value.clone(), inner.version),
        _ => return,
      }
    };
    entry.last_version.set(version);
    if let Ok(mut observer) = entry.observer.try_borrow_mut() {
      if !observer.is_closed() {
        observer.next(value);
      }
    }
  }
}

impl<T: Clone + 'static> Default for LiveValue<T> {
  #[inline]
  fn default() -> Self { Self::new() }
}

impl<T: Debug> Debug for LiveValue<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.borrow();
    f.debug_struct("LiveValue")
      .field("value", &inner.value)
      .field("version", &inner.version)
      .field("observer_count", &inner.observers.len())
      .finish()
  }
}

impl<T> Entry<T> {
  fn new<O>(observer: O, active: bool) -> Self
  where
    O: Observer<T> + 'static,
  {
    let observer: BoxedObserver<'static, T> = Box::new(observer);
    Self {
      observer: RefCell::new(observer),
      active: Cell::new(active),
      last_version: Cell::new(0),
      watch: RefCell::new(None),
    }
  }
}

impl<T: Clone + 'static> ValueHolder<T> for LiveValue<T> {
  type Unsub = LiveSubscription<T>;

  fn observe<L, O>(&self, owner: &L, observer: O) -> Self::Unsub
  where
    L: LifecycleOwner,
    O: Observer<T> + 'static,
  {
    let state = owner.current_state();
    if state.is_destroyed() {
      return LiveSubscription { inner: Weak::new(), id: 0 };
    }

    let entry = Entry::new(observer, false);
    let id = self.0.borrow_mut().observers.reserve_id();
    let holder = Rc::downgrade(&self.0);
    let watch = owner.watch(FnMutObserver(move |state: LifecycleState| {
      if let Some(inner) = holder.upgrade() {
        LiveValue(inner).on_owner_state(id, state);
      }
    }));
    *entry.watch.borrow_mut() = Some(BoxedSubscription::new(watch));
    entry.active.set(state.is_active());

    self.0.borrow_mut().observers.insert(id, Rc::new(entry));
    self.dispatch(Some(id));
    LiveSubscription { inner: Rc::downgrade(&self.0), id }
  }

  fn observe_forever<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<T> + 'static,
  {
    self.attach(Entry::new(observer, true))
  }

  #[inline]
  fn value(&self) -> Option<T> { LiveValue::value(self) }
}

/// Handle to an observer attached to a [`LiveValue`].
///
/// Unsubscribing detaches the observer and its lifecycle watch. The handle
/// reports closed once the observer is gone for any reason, including the
/// owner's destruction.
pub struct LiveSubscription<T> {
  inner: Weak<RefCell<Inner<T>>>,
  id: usize,
}

impl<T: Clone + 'static> Subscription for LiveSubscription<T> {
  fn unsubscribe(self) {
    if let Some(inner) = self.inner.upgrade() {
      LiveValue(inner).remove(self.id);
    }
  }

  fn is_closed(&self) -> bool {
    self.inner.upgrade().is_none_or(|inner| {
      let inner = inner.borrow();
      !inner.observers.contains(self.id)
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{host::Lifecycle, lifecycle::LifecycleEvent};

  fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, FnMutObserver<impl FnMut(T)>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let c_seen = seen.clone();
    (seen, FnMutObserver(move |v: T| c_seen.borrow_mut().push(v)))
  }

  fn started() -> Lifecycle {
    let owner = Lifecycle::new();
    owner.handle_event(LifecycleEvent::Create).unwrap();
    owner.handle_event(LifecycleEvent::Start).unwrap();
    owner
  }

  #[test]
  fn active_observer_receives_current_and_new_values() {
    let holder = LiveValue::with_value(1);
    let owner = started();
    let (seen, observer) = recorder::<i32>();
    let sub = holder.observe(&owner, observer);

    holder.set_value(2);
    assert_eq!(*seen.borrow(), vec![1, 2]);
    assert!(!sub.is_closed());
    assert!(holder.has_active_observers());
  }

  #[test]
  fn inactive_observer_waits_and_gets_latest_only() {
    let holder = LiveValue::new();
    let owner = Lifecycle::new();
    owner.handle_event(LifecycleEvent::Create).unwrap();
    let (seen, observer) = recorder::<&'static str>();
    let _sub = holder.observe(&owner, observer);

    holder.set_value("a");
    holder.set_value("b");
    assert!(seen.borrow().is_empty());
    assert!(!holder.has_active_observers());

    owner.handle_event(LifecycleEvent::Start).unwrap();
    assert_eq!(*seen.borrow(), vec!["b"]);
  }

  #[test]
  fn reactivation_replays_unseen_value_only() {
    let holder = LiveValue::new();
    let owner = started();
    let (seen, observer) = recorder::<i32>();
    let _sub = holder.observe(&owner, observer);

    holder.set_value(10);
    owner.handle_event(LifecycleEvent::Stop).unwrap();
    owner.handle_event(LifecycleEvent::Start).unwrap();
    assert_eq!(*seen.borrow(), vec![10]);

    owner.handle_event(LifecycleEvent::Stop).unwrap();
    holder.set_value(11);
    owner.handle_event(LifecycleEvent::Start).unwrap();
    assert_eq!(*seen.borrow(), vec![10, 11]);
  }

  #[test]
  fn new_observer_gets_replay() {
    let holder = LiveValue::with_value(5);
    let owner = started();
    let (first, observer) = recorder::<i32>();
    let _a = holder.observe(&owner, observer);
    let (second, observer) = recorder::<i32>();
    let _b = holder.observe(&owner, observer);
    assert_eq!(*first.borrow(), vec![5]);
    assert_eq!(*second.borrow(), vec![5]);
  }

  #[test]
  fn destroy_detaches() {
    let holder = LiveValue::with_value(0);
    let owner = started();
    let (seen, observer) = recorder::<i32>();
    let sub = holder.observe(&owner, observer);
    assert_eq!(owner.watcher_count(), 1);

    owner.handle_event(LifecycleEvent::Destroy).unwrap();
    assert!(sub.is_closed());
    assert!(!holder.has_observers());
    assert_eq!(owner.watcher_count(), 0);

    holder.set_value(1);
    assert_eq!(*seen.borrow(), vec![0]);
  }

  #[test]
  fn destroyed_owner_is_ignored() {
    let holder = LiveValue::with_value(0);
    let owner = started();
    owner.handle_event(LifecycleEvent::Destroy).unwrap();
    let (seen, observer) = recorder::<i32>();
    let sub = holder.observe(&owner, observer);
    holder.set_value(1);
    assert!(sub.is_closed());
    assert!(seen.borrow().is_empty());
    assert!(!holder.has_observers());
  }

  #[test]
  fn unsubscribe_detaches_watch_too() {
    let holder = LiveValue::with_value(0);
    let owner = started();
    let (seen, observer) = recorder::<i32>();
    let sub = holder.observe(&owner, observer);
    sub.unsubscribe();
    assert_eq!(owner.watcher_count(), 0);
    holder.set_value(1);
    assert_eq!(*seen.borrow(), vec![0]);
  }

  #[test]
  fn observe_forever_ignores_lifecycles() {
    let holder = LiveValue::new();
    let (seen, observer) = recorder::<char>();
    let sub = holder.observe_forever(observer);
    holder.set_value('x');
    holder.set_value('y');
    assert_eq!(*seen.borrow(), vec!['x', 'y']);
    sub.unsubscribe();
    holder.set_value('z');
    assert_eq!(seen.borrow().len(), 2);
  }

  #[test]
  fn reentrant_set_value_delivers_latest_once() {
    let holder = LiveValue::new();
    let driver = holder.clone();
    let _bump = holder.observe_forever(FnMutObserver(move |v: u32| {
      if v == 1 {
        driver.set_value(2);
      }
    }));
    let (seen, observer) = recorder::<u32>();
    let _sub = holder.observe_forever(observer);

    holder.set_value(1);
    assert_eq!(*seen.borrow(), vec![2]);
    assert_eq!(holder.value(), Some(2));
    assert_eq!(holder.version(), 2);
  }

  #[test]
  fn unsubscribe_from_callback() {
    let holder = LiveValue::new();
    let slot: Rc<RefCell<Option<LiveSubscription<i32>>>> = Rc::default();
    let c_slot = slot.clone();
    let count = Rc::new(Cell::new(0));
    let c_count = count.clone();
    let sub = holder.observe_forever(FnMutObserver(move |_: i32| {
      c_count.set(c_count.get() + 1);
      if let Some(sub) = c_slot.borrow_mut().take() {
        sub.unsubscribe();
      }
    }));
    *slot.borrow_mut() = Some(sub);

    holder.set_value(1);
    holder.set_value(2);
    assert_eq!(count.get(), 1);
    assert!(!holder.has_observers());
  }
}
