//! Structural errors raised by the core itself.
//!
//! Domain errors are never represented here: they are caller-defined values
//! carried by [`Event::Error`](crate::observer::Event::Error) and broadcast
//! verbatim.

use thiserror::Error;

/// Misuse of a subject or relay, reported synchronously at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RxError {
  /// The current value was read after the subject terminated or the relay
  /// was disposed.
  #[error("the subject has already terminated, no current value is available")]
  AlreadyTerminal,

  /// A replay buffer must hold at least one value.
  #[error("replay buffer size must be greater than zero, got {0}")]
  InvalidBufferSize(usize),
}
