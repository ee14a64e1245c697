//! Error types for scanner state serialization.

use thiserror::Error;

/// Errors from writing scanner state into a host-supplied buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    /// The buffer cannot hold the serialized junction stack.
    #[error("state buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },
}
