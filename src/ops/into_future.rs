//! Bridge from a [`Single`](crate::observable::Single) to a `Future`.
//!
//! The future resolves with:
//!
//! - `Ok(value)` when the single succeeded,
//! - `Err(SingleError::Failed(err))` when it failed,
//! - `Err(SingleError::Empty)` when the source completed without a value,
//! - `Err(SingleError::Disposed)` when the subscription ended without any
//!   result, for example because the producer dropped its emitter.

use std::{
  future::Future,
  pin::Pin,
  task::{Context, Poll, Waker},
};

use thiserror::Error;

use crate::{
  observable::{subscribe_observer, Observable},
  observer::Observer,
  rc::{MutRc, RcDerefMut},
  subscription::{Disposable, Subscription},
};

/// Why a [`SingleFuture`] resolved without a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SingleError<Err> {
  #[error("single failed: {0}")]
  Failed(Err),
  #[error("single completed without a value")]
  Empty,
  #[error("single subscription ended without a result")]
  Disposed,
}

enum Outcome<Item, Err> {
  Pending,
  Ready(Result<Item, SingleError<Err>>),
  Taken,
}

struct SharedState<Item, Err> {
  outcome: Outcome<Item, Err>,
  waker: Option<Waker>,
}

impl<Item, Err> SharedState<Item, Err> {
  fn resolve(&mut self, result: Result<Item, SingleError<Err>>) {
    if matches!(self.outcome, Outcome::Pending) {
      self.outcome = Outcome::Ready(result);
      if let Some(waker) = self.waker.take() {
        waker.wake();
      }
    }
  }
}

/// Future returned by [`Single::into_future`](crate::observable::Single::into_future).
///
/// Dropping the future disposes the subscription.
pub struct SingleFuture<Item, Err> {
  shared: MutRc<SharedState<Item, Err>>,
  subscription: Subscription,
}

impl<Item: 'static, Err: 'static> SingleFuture<Item, Err> {
  pub(crate) fn new<S>(source: &S) -> Self
  where
    S: Observable<Item = Item, Err = Err>,
  {
    let shared = MutRc::own(SharedState { outcome: Outcome::Pending, waker: None });
    let observer = SingleObserver { shared: shared.clone(), value: None };
    let subscription = subscribe_observer(source, observer, None);
    SingleFuture { shared, subscription }
  }
}

impl<Item, Err> Future for SingleFuture<Item, Err> {
  type Output = Result<Item, SingleError<Err>>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    let mut shared = self.shared.rc_deref_mut();
    match std::mem::replace(&mut shared.outcome, Outcome::Taken) {
      Outcome::Ready(result) => Poll::Ready(result),
      Outcome::Pending => {
        shared.outcome = Outcome::Pending;
        shared.waker = Some(cx.waker().clone());
        Poll::Pending
      }
      // Polled again after completion.
      Outcome::Taken => Poll::Ready(Err(SingleError::Disposed)),
    }
  }
}

impl<Item, Err> Drop for SingleFuture<Item, Err> {
  fn drop(&mut self) { self.subscription.dispose(); }
}

struct SingleObserver<Item, Err> {
  shared: MutRc<SharedState<Item, Err>>,
  value: Option<Item>,
}

impl<Item, Err> Observer<Item, Err> for SingleObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    if self.value.is_none() {
      self.value = Some(value);
    }
  }

  fn error(&mut self, err: Err) { self.shared.rc_deref_mut().resolve(Err(SingleError::Failed(err))); }

  fn complete(&mut self) {
    let result = self.value.take().ok_or(SingleError::Empty);
    self.shared.rc_deref_mut().resolve(result);
  }
}

impl<Item, Err> Drop for SingleObserver<Item, Err> {
  fn drop(&mut self) {
    if let Some(mut shared) = self.shared.try_rc_deref_mut() {
      shared.resolve(Err(SingleError::Disposed));
    }
  }
}
