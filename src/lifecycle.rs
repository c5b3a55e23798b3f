//! Lifecycle owner seam
//!
//! A lifecycle owner is a screen, view or any other host entity whose
//! activation timeline bounds a subscription. This crate never tracks a
//! lifecycle itself, it only reads one through [`LifecycleOwner`].

use crate::{observer::Observer, subscription::Subscription};

/// Position on an owner's activation timeline.
///
/// The order is meaningful: `Destroyed < Initialized < Created < Started <
/// Resumed`. Observers bound to an owner receive values while the owner is
/// at least [`Started`](LifecycleState::Started).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleState {
  /// Terminal. Nothing bound to the owner is notified again.
  Destroyed,
  Initialized,
  Created,
  Started,
  Resumed,
}

impl LifecycleState {
  #[inline]
  pub fn is_at_least(self, state: LifecycleState) -> bool { self >= state }

  /// Whether observers bound to an owner in this state receive values.
  #[inline]
  pub fn is_active(self) -> bool { self.is_at_least(LifecycleState::Started) }

  #[inline]
  pub fn is_destroyed(self) -> bool { self == LifecycleState::Destroyed }
}

/// Host transitions, each moving the owner to a fixed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
  Create,
  Start,
  Resume,
  Pause,
  Stop,
  Destroy,
}

impl LifecycleEvent {
  /// The state an owner is in right after this event.
  pub fn target_state(self) -> LifecycleState {
    match self {
      LifecycleEvent::Create | LifecycleEvent::Stop => LifecycleState::Created,
      LifecycleEvent::Start | LifecycleEvent::Pause => LifecycleState::Started,
      LifecycleEvent::Resume => LifecycleState::Resumed,
      LifecycleEvent::Destroy => LifecycleState::Destroyed,
    }
  }
}

/// An entity with an activation timeline that subscriptions can be bound to.
pub trait LifecycleOwner {
  type Unsub: Subscription + 'static;

  fn current_state(&self) -> LifecycleState;

  /// Notify `observer` with every state the owner moves to, until the
  /// returned handle is unsubscribed or the owner is destroyed. The
  /// `Destroyed` state is the last value an observer receives.
  fn watch<O>(&self, observer: O) -> Self::Unsub
  where
    O: Observer<LifecycleState> + 'static;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn states_are_ordered() {
    use LifecycleState::*;
    assert!(Destroyed < Initialized);
    assert!(Created < Started);
    assert!(Resumed.is_at_least(Started));
    assert!(!Created.is_active());
    assert!(Started.is_active());
    assert!(Resumed.is_active());
    assert!(!Destroyed.is_active());
    assert!(Destroyed.is_destroyed());
  }

  #[test]
  fn events_map_to_states() {
    assert_eq!(LifecycleEvent::Create.target_state(), LifecycleState::Created);
    assert_eq!(LifecycleEvent::Pause.target_state(), LifecycleState::Started);
    assert_eq!(LifecycleEvent::Stop.target_state(), LifecycleState::Created);
    assert_eq!(LifecycleEvent::Destroy.target_state(), LifecycleState::Destroyed);
  }
}
