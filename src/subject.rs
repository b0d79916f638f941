//! Subjects: hot observables that are also observers.
//!
//! A subject multicasts whatever is pushed into it to every current
//! subscriber, in registration order. The three flavors differ only in what
//! a late subscriber receives first:
//!
//! | Subject | Late subscriber gets |
//! |---------|----------------------|
//! | [`PublishSubject`] | future events only |
//! | [`BehaviorSubject`] | the current value, then future events |
//! | [`ReplaySubject`] | the last `n` values, then future events |
//!
//! Once a subject saw `error` or `complete` it stays terminated: new
//! subscribers immediately receive the stored terminal event (a replay
//! subject replays its buffer first) and nothing is broadcast anymore.
//!
//! Disposing a subject ends it without an error. Its current subscriptions
//! are disposed and later subscribers receive the stored error, or
//! `Completed` when no error was pushed.

/// Implements the surface shared by every subject flavor on a newtype over
/// `SubjectCore`.
macro_rules! impl_subject {
  ($name:ident) => {
    impl<Item, Err> Clone for $name<Item, Err> {
      fn clone(&self) -> Self { Self(self.0.clone()) }
    }

    impl<Item, Err> $name<Item, Err> {
      /// Number of subscribers that still receive events.
      pub fn observer_count(&self) -> usize { self.0.observer_count() }

      #[inline]
      pub fn has_observers(&self) -> bool { self.observer_count() > 0 }

      /// `true` after `error`, `complete` or `dispose`.
      pub fn is_terminated(&self) -> bool { self.0.is_terminated() }
    }

    impl<Item: Clone + 'static, Err: Clone + 'static> $name<Item, Err> {
      #[inline]
      pub fn next(&self, value: Item) { self.0.emit($crate::observer::Event::Next(value)); }

      #[inline]
      pub fn error(&self, err: Err) { self.0.emit($crate::observer::Event::Error(err)); }

      #[inline]
      pub fn complete(&self) { self.0.emit($crate::observer::Event::Completed); }
    }

    impl<Item: Clone + 'static, Err: Clone + 'static> $crate::observable::Observable
      for $name<Item, Err>
    {
      type Item = Item;
      type Err = Err;

      #[inline]
      fn actual_subscribe(
        &self, subscriber: $crate::subscriber::Subscriber<Item, Err>,
      ) -> $crate::subscription::BoxedDisposable {
        self.0.subscribe(subscriber)
      }
    }

    impl<Item: Clone + 'static, Err: Clone + 'static> $crate::observer::Observer<Item, Err>
      for $name<Item, Err>
    {
      #[inline]
      fn next(&mut self, value: Item) { self.0.emit($crate::observer::Event::Next(value)); }

      #[inline]
      fn error(&mut self, err: Err) { self.0.emit($crate::observer::Event::Error(err)); }

      #[inline]
      fn complete(&mut self) { self.0.emit($crate::observer::Event::Completed); }

      #[inline]
      fn is_closed(&self) -> bool { self.0.is_terminated() }
    }

    impl<Item: Clone + 'static, Err: Clone + 'static> $crate::subscription::Disposable
      for $name<Item, Err>
    {
      #[inline]
      fn dispose(&mut self) { self.0.dispose(); }

      #[inline]
      fn is_disposed(&self) -> bool { self.0.is_disposed() }
    }

    impl<Item, Err> std::fmt::Debug for $name<Item, Err> {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!($name))
          .field("observers", &self.0.observer_count())
          .field("terminated", &self.0.is_terminated())
          .finish()
      }
    }
  };
}

mod behavior_subject;
mod publish_subject;
mod replay_subject;
pub(crate) mod subject_core;
mod subject_subscription;
mod subscribers;

pub use behavior_subject::BehaviorSubject;
pub use publish_subject::PublishSubject;
pub use replay_subject::ReplaySubject;
