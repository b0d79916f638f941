//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three methods: next (for values), error (for errors), and
//! complete (for stream completion). The closure adapters in this module are
//! what the `subscribe*` methods of
//! [`ObservableExt`](crate::observable::ObservableExt) build for you.

use std::fmt::{Debug, Formatter};

// ============================================================================
// Event
// ============================================================================

/// One notification of a sequence.
///
/// `Error` and `Completed` are terminal: nothing follows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event<Item, Err> {
  Next(Item),
  Error(Err),
  Completed,
}

impl<Item, Err> Event<Item, Err> {
  /// The carried value, if this is a `Next` event.
  pub fn element(&self) -> Option<&Item> {
    match self {
      Event::Next(v) => Some(v),
      _ => None,
    }
  }

  pub fn into_element(self) -> Option<Item> {
    match self {
      Event::Next(v) => Some(v),
      _ => None,
    }
  }

  /// The carried error, if this is an `Error` event.
  pub fn error(&self) -> Option<&Err> {
    match self {
      Event::Error(e) => Some(e),
      _ => None,
    }
  }

  #[inline]
  pub fn is_terminal(&self) -> bool { !matches!(self, Event::Next(_)) }

  #[inline]
  pub fn is_completed(&self) -> bool { matches!(self, Event::Completed) }

  pub fn by_ref(&self) -> Event<&Item, &Err> {
    match self {
      Event::Next(v) => Event::Next(v),
      Event::Error(e) => Event::Error(e),
      Event::Completed => Event::Completed,
    }
  }
}

// ============================================================================
// Observer Trait
// ============================================================================

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives values, errors, and completion notifications from
/// an Observable. Implementations do not need to guard against events after
/// termination: every observer is wrapped in a
/// [`Subscriber`](crate::subscriber::Subscriber) that enforces it.
pub trait Observer<Item, Err> {
  /// Receive the next value from the observable
  fn next(&mut self, value: Item);

  /// Handle an error from the observable. No more events follow.
  fn error(&mut self, err: Err);

  /// Handle completion of the observable. No more events follow.
  fn complete(&mut self);

  /// Returns `true` if the observer will not accept more values.
  ///
  /// Sources such as `from_iter` use this to stop producing early.
  fn is_closed(&self) -> bool { false }

  /// Dispatches an [`Event`] to the matching method.
  fn on(&mut self, event: Event<Item, Err>) {
    match event {
      Event::Next(v) => self.next(v),
      Event::Error(e) => self.error(e),
      Event::Completed => self.complete(),
    }
  }
}

/// Boxed observer, as stored by a subscriber.
pub type BoxedObserver<Item, Err> = Box<dyn Observer<Item, Err>>;

impl<Item, Err, O: ?Sized + Observer<Item, Err>> Observer<Item, Err> for Box<O> {
  #[inline]
  fn next(&mut self, value: Item) { (**self).next(value) }

  #[inline]
  fn error(&mut self, err: Err) { (**self).error(err) }

  #[inline]
  fn complete(&mut self) { (**self).complete() }

  #[inline]
  fn is_closed(&self) -> bool { (**self).is_closed() }
}

// ============================================================================
// Closure adapters
// ============================================================================

/// Next-only observer. Errors and completion are ignored.
#[derive(Clone)]
pub struct FnMutObserver<F>(pub F);

impl<F, Item, Err> Observer<Item, Err> for FnMutObserver<F>
where
  F: FnMut(Item),
{
  #[inline]
  fn next(&mut self, v: Item) { (self.0)(v); }

  #[inline]
  fn error(&mut self, _err: Err) {}

  #[inline]
  fn complete(&mut self) {}
}

/// Observer built from three closures.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  pub fn new(next: N, error: E, complete: C) -> Self { Self { next, error, complete } }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnMut(Err),
  C: FnMut(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value) }

  #[inline]
  fn error(&mut self, err: Err) { (self.error)(err) }

  #[inline]
  fn complete(&mut self) { (self.complete)() }
}

/// Observer that receives every notification as an [`Event`].
#[derive(Clone)]
pub struct EventObserver<F>(pub F);

impl<F, Item, Err> Observer<Item, Err> for EventObserver<F>
where
  F: FnMut(Event<Item, Err>),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.0)(Event::Next(value)) }

  #[inline]
  fn error(&mut self, err: Err) { (self.0)(Event::Error(err)) }

  #[inline]
  fn complete(&mut self) { (self.0)(Event::Completed) }
}

/// A set of optional callbacks, including the `on_disposed` hook.
///
/// `on_disposed` runs exactly once, when the subscription ends: after an
/// error, after completion, or on explicit disposal.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxcore::prelude::*;
///
/// let log = Rc::new(RefCell::new(vec![]));
/// let (l1, l2) = (log.clone(), log.clone());
/// observable::just("A").subscribe_callbacks(
///   Callbacks::new()
///     .on_next(move |v: &'static str| l1.borrow_mut().push(v.to_string()))
///     .on_disposed(move || l2.borrow_mut().push("disposed".to_string())),
/// );
/// assert_eq!(*log.borrow(), vec!["A", "disposed"]);
/// ```
pub struct Callbacks<Item, Err> {
  on_next: Option<Box<dyn FnMut(Item)>>,
  on_error: Option<Box<dyn FnMut(Err)>>,
  on_completed: Option<Box<dyn FnMut()>>,
  on_disposed: Option<Box<dyn FnOnce()>>,
}

impl<Item, Err> Default for Callbacks<Item, Err> {
  fn default() -> Self { Self { on_next: None, on_error: None, on_completed: None, on_disposed: None } }
}

impl<Item, Err> Callbacks<Item, Err> {
  pub fn new() -> Self { Self::default() }

  pub fn on_next(mut self, f: impl FnMut(Item) + 'static) -> Self {
    self.on_next = Some(Box::new(f));
    self
  }

  pub fn on_error(mut self, f: impl FnMut(Err) + 'static) -> Self {
    self.on_error = Some(Box::new(f));
    self
  }

  pub fn on_completed(mut self, f: impl FnMut() + 'static) -> Self {
    self.on_completed = Some(Box::new(f));
    self
  }

  pub fn on_disposed(mut self, f: impl FnOnce() + 'static) -> Self {
    self.on_disposed = Some(Box::new(f));
    self
  }

  /// Detaches the disposal hook; the subscription runs it instead of the
  /// observer.
  pub(crate) fn take_on_disposed(&mut self) -> Option<Box<dyn FnOnce()>> { self.on_disposed.take() }
}

impl<Item, Err> Observer<Item, Err> for Callbacks<Item, Err> {
  fn next(&mut self, value: Item) {
    if let Some(f) = self.on_next.as_mut() {
      f(value);
    }
  }

  fn error(&mut self, err: Err) {
    if let Some(f) = self.on_error.as_mut() {
      f(err);
    }
  }

  fn complete(&mut self) {
    if let Some(f) = self.on_completed.as_mut() {
      f();
    }
  }
}

impl<Item, Err> Debug for Callbacks<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Callbacks")
      .field("on_next", &self.on_next.is_some())
      .field("on_error", &self.on_error.is_some())
      .field("on_completed", &self.on_completed.is_some())
      .field("on_disposed", &self.on_disposed.is_some())
      .finish()
  }
}

// ============================================================================
// Tests
// ============================================================================
