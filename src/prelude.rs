//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Factories, reachable as `observable::just(..)` and friends
pub use crate::observable;
// Core traits
pub use crate::observable::{BoxedObservable, Observable, ObservableExt, Single, SingleEmitter};
// Observer trait and adapters
pub use crate::observer::{Callbacks, Event, EventObserver, FnMutObserver, Observer, ObserverAll};
// Async bridges
pub use crate::ops::{
  into_future::{SingleError, SingleFuture},
  into_stream::IntoStream,
};
// Relays
pub use crate::relay::*;
// Subject
pub use crate::subject::*;
// Subscription
pub use crate::subscription::*;
pub use crate::{error::RxError, subscriber::Subscriber};
