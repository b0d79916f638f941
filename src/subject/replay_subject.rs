use std::convert::Infallible;

use super::subject_core::{Retention, SubjectCore};
use crate::error::RxError;

/// A subject that replays its most recent values to new subscribers.
///
/// Replay happens before the terminal event too, so a completed or failed
/// replay subject still hands out its buffer. Disposing clears the buffer.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxcore::prelude::*;
///
/// let subject: ReplaySubject<i32> = ReplaySubject::new(2)?;
/// for v in 1..=3 {
///   subject.next(v);
/// }
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
/// subject.subscribe(move |v| c_seen.borrow_mut().push(v));
/// assert_eq!(*seen.borrow(), vec![2, 3]);
/// # Ok::<(), RxError>(())
/// ```
pub struct ReplaySubject<Item, Err = Infallible>(SubjectCore<Item, Err>);

impl<Item, Err> ReplaySubject<Item, Err> {
  /// Keeps the last `buffer_size` values.
  ///
  /// A zero-sized buffer is rejected with [`RxError::InvalidBufferSize`].
  pub fn new(buffer_size: usize) -> Result<Self, RxError> {
    if buffer_size == 0 {
      return Err(RxError::InvalidBufferSize(buffer_size));
    }
    Ok(Self(SubjectCore::new(Retention::Buffer(Some(buffer_size)), None)))
  }

  /// Keeps every value.
  pub fn unbounded() -> Self { Self(SubjectCore::new(Retention::Buffer(None), None)) }
}

impl_subject!(ReplaySubject);
