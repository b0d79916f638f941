//! Disposables: the handles that cancel a subscription or release a resource.
//!
//! Every `subscribe` call returns a [`Subscription`]. Disposing it stops
//! delivery, runs the source's teardown and finally the observer's
//! `on_disposed` hook. All disposables are idempotent: disposing twice is a
//! no-op.

use std::{
  cell::{Cell, RefCell},
  fmt::{Debug, Formatter},
  rc::Rc,
};

use smallvec::SmallVec;

mod dispose_bag;
mod dynamic;

pub use dispose_bag::DisposeBag;
pub use dynamic::DynamicSubscriptions;

/// A one-shot cancellation handle.
pub trait Disposable {
  /// Runs the teardown. Calling it again has no effect.
  fn dispose(&mut self);

  fn is_disposed(&self) -> bool;
}

/// Type-erased disposable, as returned by
/// [`Observable::actual_subscribe`](crate::observable::Observable::actual_subscribe).
pub type BoxedDisposable = Box<dyn Disposable>;

impl<T: ?Sized + Disposable> Disposable for Box<T> {
  #[inline]
  fn dispose(&mut self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

impl Debug for Box<dyn Disposable> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Box<dyn Disposable>")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}

/// Convenience methods available on every sized disposable.
pub trait DisposableExt: Disposable + Sized + 'static {
  /// Hands the disposable to `bag`, which disposes it when the bag itself is
  /// disposed or dropped.
  #[inline]
  fn disposed_by(self, bag: &DisposeBag) { bag.insert(self); }

  #[inline]
  fn into_boxed(self) -> BoxedDisposable { Box::new(self) }
}

impl<T: Disposable + 'static> DisposableExt for T {}

// ============================================================================
// Atomic disposables
// ============================================================================

/// Disposable that wraps a single teardown action.
///
/// ```rust
/// use std::{cell::Cell, rc::Rc};
///
/// use rxcore::prelude::*;
///
/// let hits = Rc::new(Cell::new(0));
/// let c_hits = hits.clone();
/// let mut d = ClosureDisposable::new(move || c_hits.set(c_hits.get() + 1));
/// d.dispose();
/// d.dispose();
/// assert_eq!(hits.get(), 1);
/// ```
pub struct ClosureDisposable<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> ClosureDisposable<F> {
  pub fn new(teardown: F) -> Self { Self(Some(teardown)) }
}

impl<F: FnOnce()> Disposable for ClosureDisposable<F> {
  #[inline]
  fn dispose(&mut self) {
    if let Some(teardown) = self.0.take() {
      teardown();
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.is_none() }
}

/// A disposable with nothing to tear down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmptyDisposable {
  disposed: bool,
}

impl Disposable for EmptyDisposable {
  #[inline]
  fn dispose(&mut self) { self.disposed = true; }

  #[inline]
  fn is_disposed(&self) -> bool { self.disposed }
}

// ============================================================================
// Subscription
// ============================================================================

/// Lifecycle shared by a [`Subscriber`](crate::subscriber::Subscriber) and the
/// [`Subscription`] handed back to the caller.
pub(crate) struct SubscriptionState {
  closed: Cell<bool>,
  teardown: RefCell<SmallVec<[BoxedDisposable; 2]>>,
  on_disposed: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl SubscriptionState {
  pub(crate) fn new(on_disposed: Option<Box<dyn FnOnce()>>) -> Self {
    Self {
      closed: Cell::new(false),
      teardown: RefCell::new(SmallVec::new()),
      on_disposed: RefCell::new(on_disposed),
    }
  }

  #[inline]
  pub(crate) fn is_closed(&self) -> bool { self.closed.get() }

  /// Registers a teardown. A teardown added after the subscription closed
  /// (a source that terminated synchronously) runs immediately.
  pub(crate) fn add(&self, mut teardown: BoxedDisposable) {
    if self.closed.get() {
      teardown.dispose();
    } else {
      let mut list = self.teardown.borrow_mut();
      list.retain(|t| !t.is_disposed());
      list.push(teardown);
    }
  }

  pub(crate) fn dispose(&self) {
    if self.closed.replace(true) {
      return;
    }
    let teardown = std::mem::take(&mut *self.teardown.borrow_mut());
    for mut t in teardown {
      t.dispose();
    }
    let hook = self.on_disposed.borrow_mut().take();
    if let Some(hook) = hook {
      hook();
    }
  }
}

/// Handle returned by every `subscribe` call.
///
/// Cloning the handle does not create a new subscription; all clones dispose
/// the same one.
#[derive(Clone)]
pub struct Subscription(Rc<SubscriptionState>);

impl Subscription {
  pub(crate) fn new(state: Rc<SubscriptionState>) -> Self { Self(state) }
}

impl Disposable for Subscription {
  #[inline]
  fn dispose(&mut self) { self.0.dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.is_closed() }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription")
      .field("is_disposed", &self.is_disposed())
      .field("teardown_count", &self.0.teardown.borrow().len())
      .finish()
  }
}
