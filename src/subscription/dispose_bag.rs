use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
};

use smallvec::SmallVec;

use super::{BoxedDisposable, Disposable};

/// Owns a set of disposables and disposes all of them together.
///
/// The bag disposes its members when [`dispose`](Disposable::dispose) is
/// called or when it is dropped, whichever happens first. A disposable
/// inserted into an already disposed bag is disposed on the spot.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxcore::prelude::*;
///
/// let seen = Rc::new(RefCell::new(vec![]));
/// let subject: PublishSubject<i32> = PublishSubject::new();
/// {
///   let bag = DisposeBag::new();
///   let c_seen = seen.clone();
///   subject
///     .subscribe(move |v| c_seen.borrow_mut().push(v))
///     .disposed_by(&bag);
///   subject.next(1);
/// }
/// subject.next(2);
/// assert_eq!(*seen.borrow(), vec![1]);
/// ```
#[derive(Default)]
pub struct DisposeBag {
  inner: RefCell<Inner>,
}

#[derive(Default)]
struct Inner {
  disposed: bool,
  members: SmallVec<[BoxedDisposable; 4]>,
}

impl DisposeBag {
  pub fn new() -> Self { Self::default() }

  /// Takes ownership of `disposable`.
  pub fn insert<D: Disposable + 'static>(&self, disposable: D) {
    let mut boxed: BoxedDisposable = Box::new(disposable);
    {
      let mut inner = self.inner.borrow_mut();
      if !inner.disposed {
        inner.members.retain(|d| !d.is_disposed());
        inner.members.push(boxed);
        return;
      }
    }
    boxed.dispose();
  }

  /// Number of members still held by the bag.
  pub fn len(&self) -> usize { self.inner.borrow().members.len() }

  pub fn is_empty(&self) -> bool { self.inner.borrow().members.is_empty() }

  fn dispose_all(&self) {
    let members = {
      let mut inner = self.inner.borrow_mut();
      if inner.disposed {
        return;
      }
      inner.disposed = true;
      std::mem::take(&mut inner.members)
    };
    for mut d in members {
      d.dispose();
    }
  }
}

impl Disposable for DisposeBag {
  #[inline]
  fn dispose(&mut self) { self.dispose_all(); }

  #[inline]
  fn is_disposed(&self) -> bool { self.inner.borrow().disposed }
}

impl Drop for DisposeBag {
  fn drop(&mut self) { self.dispose_all(); }
}

impl Debug for DisposeBag {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.inner.borrow();
    f.debug_struct("DisposeBag")
      .field("disposed", &inner.disposed)
      .field("len", &inner.members.len())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use super::*;
  use crate::subscription::{ClosureDisposable, DisposableExt};

  fn counter() -> (Rc<Cell<u32>>, impl Fn() -> ClosureDisposable<Box<dyn FnOnce()>>) {
    let hits = Rc::new(Cell::new(0));
    let c_hits = hits.clone();
    let make = move || {
      let hits = c_hits.clone();
      ClosureDisposable::new(Box::new(move || hits.set(hits.get() + 1)) as Box<dyn FnOnce()>)
    };
    (hits, make)
  }

  #[test]
  fn drop_disposes_every_member() {
    let (hits, make) = counter();
    {
      let bag = DisposeBag::new();
      bag.insert(make());
      make().disposed_by(&bag);
      assert_eq!(bag.len(), 2);
      assert_eq!(hits.get(), 0);
    }
    assert_eq!(hits.get(), 2);
  }

  #[test]
  fn explicit_dispose_happens_once() {
    let (hits, make) = counter();
    let mut bag = DisposeBag::new();
    bag.insert(make());
    bag.dispose();
    bag.dispose();
    drop(bag);
    assert_eq!(hits.get(), 1);
  }

  #[test]
  fn insert_after_dispose_disposes_immediately() {
    let (hits, make) = counter();
    let mut bag = DisposeBag::new();
    bag.dispose();
    bag.insert(make());
    assert_eq!(hits.get(), 1);
    assert!(bag.is_empty());
    assert!(bag.is_disposed());
  }

  #[test]
  fn disposed_members_are_pruned() {
    let (_, make) = counter();
    let bag = DisposeBag::new();
    let mut first = make();
    first.dispose();
    bag.insert(first);
    bag.insert(make());
    assert_eq!(bag.len(), 1);
  }
}
