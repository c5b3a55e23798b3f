//! Error types
//!
//! Consuming an envelope twice is an ordinary condition, so the `Option`
//! accessors report it silently. The tagged accessors surface it as
//! [`AlreadyConsumed`] for callers that want to branch on it explicitly.

use thiserror::Error;

use crate::lifecycle::LifecycleState;

/// Returned by the tagged `consume` accessors once the envelope has been
/// handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("event has already been consumed")]
pub struct AlreadyConsumed;

/// A lifecycle transition that the reference host refuses to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
  /// `Destroyed` is terminal.
  #[error("lifecycle is destroyed, cannot move to {target:?}")]
  Destroyed { target: LifecycleState },
  /// Only a created lifecycle can be destroyed.
  #[error("lifecycle was never created, cannot be destroyed")]
  NotCreated,
}
