//! Event streams
//!
//! Bridges a holder of [`Event`]s into the async world: every fresh event
//! delivered while the owner is active is consumed and its payload queued
//! for a [`Stream`] consumer. The stream ends once the owner is destroyed
//! and the queue is drained.
//!
#![cfg_attr(feature = "local-host", doc = "```rust")]
#![cfg_attr(not(feature = "local-host"), doc = "```ignore")]
//! use futures::{executor::block_on, StreamExt};
//! use rxevent::prelude::*;
//!
//! let screen = Lifecycle::new();
//! screen.handle_event(LifecycleEvent::Create).unwrap();
//! screen.handle_event(LifecycleEvent::Start).unwrap();
//!
//! let navigation = LiveValue::new();
//! let mut targets = event_stream(&navigation, &screen);
//! navigation.set_value(Event::new("settings"));
//! screen.handle_event(LifecycleEvent::Destroy).unwrap();
//!
//! assert_eq!(block_on(targets.next()), Some("settings"));
//! assert_eq!(block_on(targets.next()), None);
//! ```

use std::{
  cell::RefCell,
  collections::VecDeque,
  pin::Pin,
  rc::Rc,
  task::{Context, Poll, Waker},
};

use futures::Stream;

use crate::{
  adapter::EventObserver,
  envelope::Event,
  holder::ValueHolder,
  lifecycle::{LifecycleOwner, LifecycleState},
  observer::FnMutObserver,
  subscription::{BoxedSubscription, Subscription},
};

/// State shared between the attached adapter and the stream consumer.
struct StreamState<T> {
  queue: VecDeque<T>,
  waker: Option<Waker>,
  is_closed: bool,
}

impl<T> StreamState<T> {
  fn wake(&mut self) {
    if let Some(waker) = self.waker.take() {
      waker.wake();
    }
  }
}

/// A `Stream` of consumed event payloads, created by [`event_stream`].
///
/// Dropping the stream detaches it from the holder and the owner.
pub struct EventStream<T, U: Subscription> {
  state: Rc<RefCell<StreamState<T>>>,
  unsub: Option<U>,
  watch: Option<BoxedSubscription>,
}

/// Attach to `holder` for the lifetime of `owner` and expose the payload of
/// every fresh event as a stream item.
pub fn event_stream<H, L, T>(holder: &H, owner: &L) -> EventStream<T, H::Unsub>
where
  H: ValueHolder<Event<T>>,
  L: LifecycleOwner,
  T: 'static,
{
  let state = Rc::new(RefCell::new(StreamState {
    queue: VecDeque::new(),
    waker: None,
    is_closed: false,
  }));

  let sink = state.clone();
  let unsub = holder.observe(
    owner,
    EventObserver::new(move |value: T| {
      let mut state = sink.borrow_mut();
      state.queue.push_back(value);
      state.wake();
    }),
  );

  let watch = if unsub.is_closed() {
    state.borrow_mut().is_closed = true;
    None
  } else {
    let closer = state.clone();
    let watch = owner.watch(FnMutObserver(move |lifecycle: LifecycleState| {
      if lifecycle.is_destroyed() {
        let mut state = closer.borrow_mut();
        state.is_closed = true;
        state.wake();
      }
    }));
    Some(BoxedSubscription::new(watch))
  };

  EventStream { state, unsub: Some(unsub), watch }
}

impl<T, U: Subscription> EventStream<T, U> {
  /// Payloads received but not yet polled.
  #[inline]
  pub fn pending(&self) -> usize { self.state.borrow().queue.len() }
}

impl<T, U> Stream for EventStream<T, U>
where
  U: Subscription + Unpin,
{
  type Item = T;

  fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
    let this = self.get_mut();
    let mut state = this.state.borrow_mut();

    if let Some(item) = state.queue.pop_front() {
      return Poll::Ready(Some(item));
    }

    if state.is_closed {
      return Poll::Ready(None);
    }

    state.waker = Some(cx.waker().clone());
    Poll::Pending
  }
}

impl<T, U: Subscription> Drop for EventStream<T, U> {
  fn drop(&mut self) {
    if let Some(unsub) = self.unsub.take() {
      unsub.unsubscribe();
    }
    if let Some(watch) = self.watch.take() {
      watch.unsubscribe();
    }
  }
}
