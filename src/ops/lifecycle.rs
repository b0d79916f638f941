//! Lifecycle hooks: side effects around a subscription that leave the
//! values untouched.

use std::{fmt::Debug, rc::Rc};

use tracing::debug;

use crate::{
  observable::{subscribe_observer, Observable},
  observer::{Event, Observer},
  subscriber::Subscriber,
  subscription::BoxedDisposable,
};

// ==================== DoOnSubscribe ====================

/// Runs a callback every time the source is subscribed.
#[derive(Clone)]
pub struct DoOnSubscribe<S, F> {
  source: S,
  callback: F,
}

impl<S, F> DoOnSubscribe<S, F> {
  pub(crate) fn new(source: S, callback: F) -> Self { Self { source, callback } }
}

impl<S, F> Observable for DoOnSubscribe<S, F>
where
  S: Observable,
  F: Fn(),
{
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(&self, subscriber: Subscriber<Self::Item, Self::Err>) -> BoxedDisposable {
    (self.callback)();
    self.source.actual_subscribe(subscriber)
  }
}

// ==================== DebugLog ====================

/// Logs the lifecycle of every subscription at `DEBUG` level.
///
/// Each record carries the label, so several debugged sources can be told
/// apart in the same log.
#[derive(Clone)]
pub struct DebugLog<S> {
  source: S,
  label: Rc<str>,
}

impl<S> DebugLog<S> {
  pub(crate) fn new(source: S, label: String) -> Self { Self { source, label: label.into() } }
}

impl<S> Observable for DebugLog<S>
where
  S: Observable,
  S::Item: Debug + 'static,
  S::Err: Debug + 'static,
{
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(&self, subscriber: Subscriber<Self::Item, Self::Err>) -> BoxedDisposable {
    debug!(label = %self.label, "subscribed");
    let label = self.label.clone();
    let on_disposed: Box<dyn FnOnce()> = Box::new(move || debug!(label = %label, "disposed"));
    let upstream = subscribe_observer(
      &self.source,
      DebugObserver { label: self.label.clone(), downstream: subscriber },
      Some(on_disposed),
    );
    Box::new(upstream)
  }
}

struct DebugObserver<Item, Err> {
  label: Rc<str>,
  downstream: Subscriber<Item, Err>,
}

impl<Item: Debug, Err: Debug> Observer<Item, Err> for DebugObserver<Item, Err> {
  fn next(&mut self, value: Item) { self.on(Event::Next(value)); }

  fn error(&mut self, err: Err) { self.on(Event::Error(err)); }

  fn complete(&mut self) { self.on(Event::Completed); }

  fn is_closed(&self) -> bool { self.downstream.is_closed() }

  fn on(&mut self, event: Event<Item, Err>) {
    debug!(label = %self.label, event = ?event, "event");
    self.downstream.on(event);
  }
}
