#[cfg(feature = "local-host")]
pub use crate::host::*;
pub use crate::{
  adapter::*, attach::*, envelope::*, error::*, holder::*, lifecycle::*, observer::*, stream::*,
  subscription::*,
};
