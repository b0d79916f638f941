use std::convert::Infallible;

use super::subject_core::{Retention, SubjectCore};

/// A subject that only relays events pushed after subscription.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxcore::prelude::*;
///
/// let subject: PublishSubject<&str> = PublishSubject::new();
/// subject.next("Is anyone listening?");
///
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
/// let _sub = subject.subscribe(move |v| c_seen.borrow_mut().push(v));
/// subject.next("1");
/// subject.next("2");
///
/// assert_eq!(*seen.borrow(), vec!["1", "2"]);
/// ```
pub struct PublishSubject<Item, Err = Infallible>(SubjectCore<Item, Err>);

impl<Item, Err> PublishSubject<Item, Err> {
  pub fn new() -> Self { Self(SubjectCore::new(Retention::Nothing, None)) }
}

impl<Item, Err> Default for PublishSubject<Item, Err> {
  fn default() -> Self { Self::new() }
}

impl_subject!(PublishSubject);
