//! Side-effect hooks and async bridges.
//!
//! Nothing here transforms values: `lifecycle` observes a subscription,
//! `into_future` and `into_stream` hand its notifications to `futures`.

pub mod into_future;
pub mod into_stream;
pub mod lifecycle;
