//! Relays: subjects that can only carry values.
//!
//! A relay wraps the matching subject with `Err = Infallible` and exposes
//! `accept` as its only way in, so it can never error or complete. It still
//! stops when disposed; later subscriptions end at once with no event.

use std::{convert::Infallible, fmt::Debug};

use crate::{
  error::RxError,
  observable::Observable,
  subject::{BehaviorSubject, PublishSubject, ReplaySubject},
  subscriber::Subscriber,
  subscription::{BoxedDisposable, Disposable, EmptyDisposable},
};

macro_rules! impl_relay {
  ($name:ident) => {
    impl<Item> Clone for $name<Item> {
      fn clone(&self) -> Self { Self(self.0.clone()) }
    }

    impl<Item> $name<Item> {
      pub fn observer_count(&self) -> usize { self.0.observer_count() }

      #[inline]
      pub fn has_observers(&self) -> bool { self.0.has_observers() }
    }

    impl<Item: Clone + 'static> $name<Item> {
      /// Broadcasts `value` to the current subscribers. Ignored after the
      /// relay was disposed.
      #[inline]
      pub fn accept(&self, value: Item) { self.0.next(value); }
    }

    impl<Item: Clone + 'static> Observable for $name<Item> {
      type Item = Item;
      type Err = Infallible;

      /// A disposed relay closes new subscriptions without any event.
      fn actual_subscribe(&self, mut subscriber: Subscriber<Item, Infallible>) -> BoxedDisposable {
        if self.0.is_disposed() {
          subscriber.dispose();
          return Box::new(EmptyDisposable::default());
        }
        self.0.actual_subscribe(subscriber)
      }
    }

    impl<Item: Clone + 'static> Disposable for $name<Item> {
      #[inline]
      fn dispose(&mut self) { self.0.dispose(); }

      #[inline]
      fn is_disposed(&self) -> bool { self.0.is_disposed() }
    }

    impl<Item> Debug for $name<Item> {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!($name))
          .field("observers", &self.0.observer_count())
          .finish()
      }
    }
  };
}

/// Relays values accepted after subscription.
pub struct PublishRelay<Item>(PublishSubject<Item, Infallible>);

impl<Item> PublishRelay<Item> {
  pub fn new() -> Self { Self(PublishSubject::new()) }
}

impl<Item> Default for PublishRelay<Item> {
  fn default() -> Self { Self::new() }
}

/// Holds a current value and hands it to every new subscriber.
///
/// ```rust
/// use rxcore::prelude::*;
///
/// let relay = BehaviorRelay::new("Initial value");
/// relay.accept("New initial value");
/// assert_eq!(relay.value(), Ok("New initial value"));
/// ```
pub struct BehaviorRelay<Item>(BehaviorSubject<Item, Infallible>);

impl<Item> BehaviorRelay<Item> {
  pub fn new(seed: Item) -> Self { Self(BehaviorSubject::new(seed)) }

  /// The current value. Fails with [`RxError::AlreadyTerminal`] once the relay
  /// was disposed.
  pub fn value(&self) -> Result<Item, RxError>
  where
    Item: Clone,
  {
    self.0.value()
  }
}

/// Replays the last accepted values to new subscribers.
pub struct ReplayRelay<Item>(ReplaySubject<Item, Infallible>);

impl<Item> ReplayRelay<Item> {
  /// Keeps the last `buffer_size` values; zero is rejected.
  pub fn new(buffer_size: usize) -> Result<Self, RxError> { ReplaySubject::new(buffer_size).map(Self) }

  pub fn unbounded() -> Self { Self(ReplaySubject::unbounded()) }
}

impl_relay!(PublishRelay);
impl_relay!(BehaviorRelay);
impl_relay!(ReplayRelay);

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  fn record<R>(relay: &R) -> Rc<RefCell<Vec<Event<&'static str, std::convert::Infallible>>>>
  where
    R: Observable<Item = &'static str, Err = std::convert::Infallible>,
  {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    relay.subscribe_event(move |e| c_log.borrow_mut().push(e));
    log
  }

  #[test]
  fn publish_relay_only_forwards_new_values() {
    let relay = PublishRelay::new();
    relay.accept("Knock knock, anyone home?");
    let log = record(&relay);
    relay.accept("1");
    assert_eq!(*log.borrow(), vec![Event::Next("1")]);
  }

  #[test]
  fn behavior_relay_replays_the_current_value() {
    let relay = BehaviorRelay::new("Initial value");
    relay.accept("New initial value");
    let first = record(&relay);
    relay.accept("1");
    let second = record(&relay);
    relay.accept("2");

    assert_eq!(
      *first.borrow(),
      vec![Event::Next("New initial value"), Event::Next("1"), Event::Next("2")]
    );
    assert_eq!(*second.borrow(), vec![Event::Next("1"), Event::Next("2")]);
    assert_eq!(relay.value(), Ok("2"));
  }

  #[test]
  fn behavior_relay_value_fails_after_dispose() {
    let mut relay = BehaviorRelay::new("A");
    let log = record(&relay);
    relay.dispose();
    relay.accept("B");
    assert_eq!(*log.borrow(), vec![Event::Next("A")]);
    assert_eq!(relay.value(), Err(RxError::AlreadyTerminal));
    assert!(relay.is_disposed());
  }

  /// Subscribes after `relay` was disposed and returns what arrived plus
  /// whether `on_disposed` ran.
  fn subscribe_late<R>(relay: &R) -> (Vec<String>, bool)
  where
    R: Observable<Item = &'static str, Err = std::convert::Infallible>,
  {
    let log = Rc::new(RefCell::new(vec![]));
    let disposed = Rc::new(RefCell::new(false));
    let (l1, l2, c_disposed) = (log.clone(), log.clone(), disposed.clone());
    let sub = relay.subscribe_callbacks(
      Callbacks::new()
        .on_next(move |v: &'static str| l1.borrow_mut().push(v.to_string()))
        .on_completed(move || l2.borrow_mut().push("completed".to_string()))
        .on_disposed(move || *c_disposed.borrow_mut() = true),
    );
    assert!(sub.is_disposed());
    let events = log.borrow().clone();
    let ran = *disposed.borrow();
    (events, ran)
  }

  #[test]
  fn disposed_relays_never_complete_late_subscribers() {
    let mut publish = PublishRelay::new();
    publish.accept("a");
    publish.dispose();
    assert_eq!(subscribe_late(&publish), (vec![], true));

    let mut behavior = BehaviorRelay::new("A");
    behavior.dispose();
    assert_eq!(subscribe_late(&behavior), (vec![], true));

    let mut replay = ReplayRelay::unbounded();
    replay.accept("a");
    replay.dispose();
    assert_eq!(subscribe_late(&replay), (vec![], true));
    assert_eq!(replay.observer_count(), 0);
  }

  #[test]
  fn replay_relay_buffers() {
    let relay = ReplayRelay::new(1).unwrap();
    relay.accept("a");
    relay.accept("b");
    let log = record(&relay);
    assert_eq!(*log.borrow(), vec![Event::Next("b")]);
    assert_eq!(relay.observer_count(), 1);
    assert!(ReplayRelay::<i32>::new(0).is_err());
  }
}
