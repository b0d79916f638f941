use crate::{
  observable::Observable,
  rc::{MutRc, RcDerefMut},
  subscriber::Subscriber,
  subscription::{BoxedDisposable, EmptyDisposable},
};

/// Creates an observable that builds a fresh source with `factory` for each
/// subscription.
///
/// The factory runs at subscribe time, never before and never cached.
/// Clones of the returned observable share one factory, including whatever
/// state it captures.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxcore::prelude::*;
///
/// let mut flip = false;
/// let deferred = observable::defer(move || {
///   flip = !flip;
///   if flip { rxcore::of!(1, 2, 3) } else { rxcore::of!(4, 5, 6) }
/// });
///
/// let seen = Rc::new(RefCell::new(vec![]));
/// for _ in 0..2 {
///   let c_seen = seen.clone();
///   deferred.subscribe(move |v| c_seen.borrow_mut().push(v));
/// }
/// assert_eq!(*seen.borrow(), vec![1, 2, 3, 4, 5, 6]);
/// ```
pub fn defer<F, O>(factory: F) -> Defer<F>
where
  F: FnMut() -> O,
  O: Observable,
{
  Defer(MutRc::own(factory))
}

pub struct Defer<F>(MutRc<F>);

impl<F> Clone for Defer<F> {
  fn clone(&self) -> Self { Defer(self.0.clone()) }
}

impl<F, O> Observable for Defer<F>
where
  F: FnMut() -> O,
  O: Observable,
{
  type Item = O::Item;
  type Err = O::Err;

  /// A factory that subscribes to its own `Defer` while running cannot be
  /// entered again; that inner subscription completes immediately.
  fn actual_subscribe(&self, subscriber: Subscriber<Self::Item, Self::Err>) -> BoxedDisposable {
    let source = self.0.try_rc_deref_mut().map(|mut factory| (&mut *factory)());
    match source {
      Some(source) => source.actual_subscribe(subscriber),
      None => {
        subscriber.complete();
        Box::new(EmptyDisposable::default())
      }
    }
  }
}
