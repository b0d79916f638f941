//! Observables and the subscribe surface.
//!
//! An [`Observable`] is a re-runnable recipe: every subscription runs it
//! again from the start, unless the observable is a subject. The factory
//! functions of this module cover the usual sources:
//!
//! | Factory | Emits |
//! |---------|-------|
//! | [`just`] | one value, then completes |
//! | [`of!`](crate::of) / [`from_iter`] | every element in order, then completes |
//! | [`empty`] | completes immediately |
//! | [`never`] | nothing, stays open until disposed |
//! | [`throw`] | an error |
//! | [`range`] | `count` sequential integers, then completes |
//! | [`create`] | whatever the producer pushes |
//! | [`defer`] | a fresh observable built for each subscription |
//! | [`single`] | one success value or one failure |
//!
//! Delivery is synchronous: `subscribe` returns only after the source has
//! pushed everything it pushes at subscribe time.

use std::rc::Rc;

use crate::{
  observer::{Callbacks, Event, EventObserver, FnMutObserver, Observer, ObserverAll},
  ops::{
    into_stream::IntoStream,
    lifecycle::{DebugLog, DoOnSubscribe},
  },
  subscriber::Subscriber,
  subscription::{BoxedDisposable, Subscription, SubscriptionState},
};

mod create;
mod defer;
mod from_iter;
mod single;
mod trivial;

pub use create::*;
pub use defer::*;
pub use from_iter::*;
pub use single::*;
pub use trivial::*;

// ============================================================================
// Observable Trait
// ============================================================================

/// A producer of a sequence of values.
///
/// Implementors only describe how one subscription is served; the
/// caller-facing methods live on [`ObservableExt`].
pub trait Observable {
  type Item;
  type Err;

  /// Starts emitting into `subscriber` and returns the teardown to run when
  /// the subscription ends.
  ///
  /// The subscriber drops everything pushed after a terminal event or after
  /// disposal, so implementations may emit without checking; long or
  /// unbounded sources should still stop once
  /// [`Subscriber::is_closed`] returns `true`.
  fn actual_subscribe(&self, subscriber: Subscriber<Self::Item, Self::Err>) -> BoxedDisposable;
}

/// Type-erased observable.
pub type BoxedObservable<Item, Err> = Box<dyn Observable<Item = Item, Err = Err>>;

impl<T: ?Sized + Observable> Observable for Box<T> {
  type Item = T::Item;
  type Err = T::Err;

  #[inline]
  fn actual_subscribe(&self, subscriber: Subscriber<Self::Item, Self::Err>) -> BoxedDisposable {
    (**self).actual_subscribe(subscriber)
  }
}

impl<T: ?Sized + Observable> Observable for Rc<T> {
  type Item = T::Item;
  type Err = T::Err;

  #[inline]
  fn actual_subscribe(&self, subscriber: Subscriber<Self::Item, Self::Err>) -> BoxedDisposable {
    (**self).actual_subscribe(subscriber)
  }
}

/// Wraps `observer` into a subscriber, runs the source and attaches its
/// teardown.
pub(crate) fn subscribe_observer<S, O>(
  source: &S, observer: O, on_disposed: Option<Box<dyn FnOnce()>>,
) -> Subscription
where
  S: ?Sized + Observable,
  S::Item: 'static,
  S::Err: 'static,
  O: Observer<S::Item, S::Err> + 'static,
{
  let state = Rc::new(SubscriptionState::new(on_disposed));
  let subscriber = Subscriber::new(observer, state.clone());
  let teardown = source.actual_subscribe(subscriber);
  state.add(teardown);
  Subscription::new(state)
}

// ============================================================================
// ObservableExt
// ============================================================================

/// Subscribe methods and lifecycle hooks for every [`Observable`].
pub trait ObservableExt: Observable + Sized
where
  Self::Item: 'static,
  Self::Err: 'static,
{
  /// Subscribes a full [`Observer`].
  fn subscribe_with<O>(&self, observer: O) -> Subscription
  where
    O: Observer<Self::Item, Self::Err> + 'static,
  {
    subscribe_observer(self, observer, None)
  }

  /// Subscribes a next-only closure; errors and completion are ignored.
  ///
  /// ```rust
  /// use std::{cell::RefCell, rc::Rc};
  ///
  /// use rxcore::prelude::*;
  ///
  /// let seen = Rc::new(RefCell::new(vec![]));
  /// let c_seen = seen.clone();
  /// rxcore::of!(1, 2, 3).subscribe(move |v| c_seen.borrow_mut().push(v));
  /// assert_eq!(*seen.borrow(), vec![1, 2, 3]);
  /// ```
  fn subscribe<N>(&self, next: N) -> Subscription
  where
    N: FnMut(Self::Item) + 'static,
  {
    self.subscribe_with(FnMutObserver(next))
  }

  fn subscribe_all<N, E, C>(&self, next: N, error: E, complete: C) -> Subscription
  where
    N: FnMut(Self::Item) + 'static,
    E: FnMut(Self::Err) + 'static,
    C: FnMut() + 'static,
  {
    self.subscribe_with(ObserverAll::new(next, error, complete))
  }

  /// Subscribes a closure receiving every notification as an [`Event`].
  fn subscribe_event<F>(&self, f: F) -> Subscription
  where
    F: FnMut(Event<Self::Item, Self::Err>) + 'static,
  {
    self.subscribe_with(EventObserver(f))
  }

  /// Subscribes a [`Callbacks`] set. Its `on_disposed` hook runs once the
  /// subscription ends, whichever way it ends.
  fn subscribe_callbacks(&self, mut callbacks: Callbacks<Self::Item, Self::Err>) -> Subscription {
    let on_disposed = callbacks.take_on_disposed();
    subscribe_observer(self, callbacks, on_disposed)
  }

  /// Erases the concrete observable type.
  fn box_it(self) -> BoxedObservable<Self::Item, Self::Err>
  where
    Self: 'static,
  {
    Box::new(self)
  }

  /// Runs `f` every time the observable is subscribed, before the source
  /// starts emitting.
  fn do_on_subscribe<F>(self, f: F) -> DoOnSubscribe<Self, F>
  where
    F: Fn(),
  {
    DoOnSubscribe::new(self, f)
  }

  /// Logs subscription, every event and disposal through `tracing` at
  /// `DEBUG` level, tagged with `label`.
  fn debug(self, label: impl Into<String>) -> DebugLog<Self> { DebugLog::new(self, label.into()) }

  /// Subscribes and exposes the notifications as a `futures` stream of
  /// `Result<Item, Err>`.
  fn into_stream(self) -> IntoStream<Self::Item, Self::Err> { IntoStream::new(&self) }
}

impl<T> ObservableExt for T
where
  T: Observable,
  T::Item: 'static,
  T::Err: 'static,
{
}
