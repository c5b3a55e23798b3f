use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
  rc::{Rc, Weak},
};

use tracing::{debug, warn};

use crate::{
  error::LifecycleError,
  lifecycle::{LifecycleEvent, LifecycleOwner, LifecycleState},
  observer::{BoxedObserver, Observer},
  subscription::{DynamicSubscriptions, Subscription},
};

type Watcher = Rc<RefCell<BoxedObserver<'static, LifecycleState>>>;

struct Registry {
  state: LifecycleState,
  watchers: DynamicSubscriptions<Watcher>,
  /// A notification round is running.
  handling: bool,
  /// The state changed during the running round.
  pending: bool,
}

/// A lifecycle owner whose state is moved by hand.
///
/// Starts at [`Initialized`](LifecycleState::Initialized). Watchers are
/// notified synchronously on every change. A watcher that changes the state
/// again does not nest: the running round stops and a new one delivers the
/// newest state to every watcher.
#[derive(Clone)]
pub struct Lifecycle(Rc<RefCell<Registry>>);

impl Lifecycle {
  pub fn new() -> Self {
    Self(Rc::new(RefCell::new(Registry {
      state: LifecycleState::Initialized,
      watchers: DynamicSubscriptions::default(),
      handling: false,
      pending: false,
    })))
  }

  #[inline]
  pub fn current_state(&self) -> LifecycleState { self.0.borrow().state }

  /// Move to the state `event` leads to.
  #[inline]
  pub fn handle_event(&self, event: LifecycleEvent) -> Result<(), LifecycleError> {
    self.set_state(event.target_state())
  }

  /// Move to `target`. Setting the current state again is a no-op.
  ///
  /// Fails if the lifecycle is already destroyed, or if it is asked to be
  /// destroyed before it was ever created.
  pub fn set_state(&self, target: LifecycleState) -> Result<(), LifecycleError> {
    {
      let mut registry = self.0.borrow_mut();
      let current = registry.state;
      if current == target {
        return Ok(());
      }
      if current.is_destroyed() {
        warn!(?target, "rejecting transition out of a destroyed lifecycle");
        return Err(LifecycleError::Destroyed { target });
      }
      if target.is_destroyed() && current == LifecycleState::Initialized {
        warn!("rejecting destruction of a lifecycle that was never created");
        return Err(LifecycleError::NotCreated);
      }
      debug!(from = ?current, to = ?target, "lifecycle transition");
      registry.state = target;
      if registry.handling {
        registry.pending = true;
        return Ok(());
      }
      registry.handling = true;
    }
    self.sync();
    Ok(())
  }

  /// Number of attached watchers.
  #[inline]
  pub fn watcher_count(&self) -> usize { self.0.borrow().watchers.len() }

  fn sync(&self) {
    loop {
      let (state, watchers) = {
        let mut registry = self.0.borrow_mut();
        registry.pending = false;
        let watchers: Vec<(usize, Watcher)> = registry
          .watchers
          .entries()
          .map(|(id, w)| (id, w.clone()))
          .collect();
        (registry.state, watchers)
      };

      for (id, watcher) in watchers {
        {
          let registry = self.0.borrow();
          if registry.pending {
            break;
          }
          if !registry.watchers.contains(id) {
            continue;
          }
        }
        if let Ok(mut watcher) = watcher.try_borrow_mut() {
          if !watcher.is_closed() {
            watcher.next(state);
          }
        }
      }

      let released = {
        let mut registry = self.0.borrow_mut();
        if registry.pending {
          continue;
        }
        registry.handling = false;
        if registry.state.is_destroyed() {
          registry.watchers.drain().collect()
        } else {
          Vec::new()
        }
      };
      if !released.is_empty() {
        debug!(count = released.len(), "lifecycle destroyed, releasing watchers");
      }
      // Dropped outside the borrow, a watcher may own handles into us.
      drop(released);
      break;
    }
  }
}

impl Default for Lifecycle {
  #[inline]
  fn default() -> Self { Self::new() }
}

impl Debug for Lifecycle {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let registry = self.0.borrow();
    f.debug_struct("Lifecycle")
      .field("state", &registry.state)
      .field("watcher_count", &registry.watchers.len())
      .finish()
  }
}

impl LifecycleOwner for Lifecycle {
  type Unsub = LifecycleWatch;

  #[inline]
  fn current_state(&self) -> LifecycleState { Lifecycle::current_state(self) }

  fn watch<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<LifecycleState> + 'static,
  {
    let mut registry = self.0.borrow_mut();
    if registry.state.is_destroyed() {
      return LifecycleWatch { registry: Weak::new(), id: 0 };
    }
    let observer: BoxedObserver<'static, LifecycleState> = Box::new(observer);
    let id = registry.watchers.add(Rc::new(RefCell::new(observer)));
    LifecycleWatch { registry: Rc::downgrade(&self.0), id }
  }
}

/// Handle to a watcher attached to a [`Lifecycle`].
pub struct LifecycleWatch {
  registry: Weak<RefCell<Registry>>,
  id: usize,
}

impl Subscription for LifecycleWatch {
  fn unsubscribe(self) {
    if let Some(registry) = self.registry.upgrade() {
      let watcher = registry.borrow_mut().watchers.remove(self.id);
      drop(watcher);
    }
  }

  fn is_closed(&self) -> bool {
    self
      .registry
      .upgrade()
      .is_none_or(|registry| {
        let registry = registry.borrow();
        !registry.watchers.contains(self.id)
      })
  }
}
