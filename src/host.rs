//! Reference host
//!
//! A minimal single-threaded implementation of the host seam: [`Lifecycle`]
//! is a lifecycle owner driven by hand, [`LiveValue`] is a replaying value
//! holder. Real applications plug in their framework's primitives instead,
//! these exist so that the consume-once layer can run headless and be
//! tested against the host contract.
//!
//! Both types are `Rc`-based handles. Delivery happens synchronously on the
//! thread that changes the value or the lifecycle, which is the UI-thread
//! contract the envelopes were designed for.

mod lifecycle_registry;
mod live_value;

pub use lifecycle_registry::{Lifecycle, LifecycleWatch};
pub use live_value::{LiveSubscription, LiveValue};
