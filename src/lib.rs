//! # rxcore: a small reactive core
//!
//! Observables, subjects, relays and disposables, delivered synchronously on
//! the calling thread.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxcore::prelude::*;
//!
//! let bag = DisposeBag::new();
//! let subject: BehaviorSubject<&str> = BehaviorSubject::new("Initial value");
//!
//! subject
//!   .subscribe(|v| println!("Value: {}", v))
//!   .disposed_by(&bag);
//! subject.next("X");
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A re-runnable recipe that emits values, then an error or completion |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`DisposeBag`] | Disposes every subscription it owns when dropped |
//! | [`PublishSubject`] / [`BehaviorSubject`] / [`ReplaySubject`] | Hot observables that are also observers |
//! | [`PublishRelay`] / [`BehaviorRelay`] / [`ReplayRelay`] | Subjects that never terminate |
//!
//! ## Logging
//!
//! The crate emits `tracing` events: `TRACE` for subject termination and
//! disposal, `DEBUG` from the [`debug`](observable::ObservableExt::debug)
//! hook. Install any `tracing` subscriber to see them.
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`DisposeBag`]: subscription::DisposeBag
//! [`PublishSubject`]: subject::PublishSubject
//! [`BehaviorSubject`]: subject::BehaviorSubject
//! [`ReplaySubject`]: subject::ReplaySubject
//! [`PublishRelay`]: relay::PublishRelay
//! [`BehaviorRelay`]: relay::BehaviorRelay
//! [`ReplayRelay`]: relay::ReplayRelay

pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod relay;
pub mod subject;
pub mod subscriber;
pub mod subscription;

// Re-export the prelude module
pub use prelude::*;

#[cfg(doctest)]
mod __markdown_doctests {
  mod readme {
    #![doc = include_str!("../README.md")]
  }
}
