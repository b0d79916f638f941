use std::convert::Infallible;

use super::subject_core::{Retention, SubjectCore};
use crate::error::RxError;

/// A subject that always holds a current value.
///
/// New subscribers receive the current value first, then every later one.
/// `error` discards the current value; a terminated subject only delivers its
/// terminal event.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxcore::prelude::*;
///
/// let subject: BehaviorSubject<&str> = BehaviorSubject::new("Initial value");
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
/// subject.subscribe(move |v| c_seen.borrow_mut().push(v));
/// subject.next("X");
///
/// assert_eq!(*seen.borrow(), vec!["Initial value", "X"]);
/// assert_eq!(subject.value(), Ok("X"));
/// ```
pub struct BehaviorSubject<Item, Err = Infallible>(SubjectCore<Item, Err>);

impl<Item, Err> BehaviorSubject<Item, Err> {
  pub fn new(seed: Item) -> Self { Self(SubjectCore::new(Retention::Latest, Some(seed))) }

  /// The current value.
  ///
  /// Fails with [`RxError::AlreadyTerminal`] once the subject saw `error`,
  /// `complete` or was disposed.
  pub fn value(&self) -> Result<Item, RxError>
  where
    Item: Clone,
  {
    self.0.latest().ok_or(RxError::AlreadyTerminal)
  }
}

impl_subject!(BehaviorSubject);
