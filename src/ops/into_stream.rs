//! Bridge from an observable to a `futures` `Stream`.
//!
//! ```rust
//! use futures::{executor::block_on, StreamExt};
//! use rxcore::prelude::*;
//!
//! let values: Vec<_> = block_on(rxcore::of!(1, 2, 3).into_stream().collect());
//! assert_eq!(values, vec![Ok(1), Ok(2), Ok(3)]);
//! ```

use std::{
  collections::VecDeque,
  pin::Pin,
  task::{Context, Poll, Waker},
};

use futures::Stream;

use crate::{
  observable::{subscribe_observer, Observable},
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscription::{Disposable, Subscription},
};

struct IntoStreamState<Item, Err> {
  queue: VecDeque<Result<Item, Err>>,
  waker: Option<Waker>,
  is_closed: bool,
}

impl<Item, Err> IntoStreamState<Item, Err> {
  fn push(&mut self, item: Option<Result<Item, Err>>) {
    match item {
      Some(item) => self.queue.push_back(item),
      None => self.is_closed = true,
    }
    if let Some(waker) = self.waker.take() {
      waker.wake();
    }
  }
}

/// A `Stream` of the notifications of an observable.
///
/// Yields `Ok(value)` for each value and `Err(err)` for an error, then ends.
/// Completion ends the stream. Values pushed before the stream is polled are
/// buffered. Dropping the stream disposes the subscription.
pub struct IntoStream<Item, Err> {
  state: MutRc<IntoStreamState<Item, Err>>,
  subscription: Subscription,
}

impl<Item: 'static, Err: 'static> IntoStream<Item, Err> {
  pub(crate) fn new<S>(source: &S) -> Self
  where
    S: Observable<Item = Item, Err = Err>,
  {
    let state = MutRc::own(IntoStreamState { queue: VecDeque::new(), waker: None, is_closed: false });
    let observer = IntoStreamObserver { state: state.clone() };
    let subscription = subscribe_observer(source, observer, None);
    IntoStream { state, subscription }
  }
}

impl<Item, Err> IntoStream<Item, Err> {
  /// Number of notifications buffered and not yet polled.
  pub fn buffered(&self) -> usize { self.state.rc_deref().queue.len() }
}

impl<Item, Err> Stream for IntoStream<Item, Err> {
  type Item = Result<Item, Err>;

  fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    let mut state = self.state.rc_deref_mut();
    if let Some(item) = state.queue.pop_front() {
      return Poll::Ready(Some(item));
    }
    if state.is_closed {
      return Poll::Ready(None);
    }
    state.waker = Some(cx.waker().clone());
    Poll::Pending
  }
}

impl<Item, Err> Drop for IntoStream<Item, Err> {
  fn drop(&mut self) { self.subscription.dispose(); }
}

struct IntoStreamObserver<Item, Err> {
  state: MutRc<IntoStreamState<Item, Err>>,
}

impl<Item, Err> Observer<Item, Err> for IntoStreamObserver<Item, Err> {
  fn next(&mut self, value: Item) { self.state.rc_deref_mut().push(Some(Ok(value))); }

  fn error(&mut self, err: Err) {
    let mut state = self.state.rc_deref_mut();
    state.push(Some(Err(err)));
    state.push(None);
  }

  fn complete(&mut self) { self.state.rc_deref_mut().push(None); }
}

impl<Item, Err> Drop for IntoStreamObserver<Item, Err> {
  fn drop(&mut self) {
    // A source that goes away without terminating still ends the stream.
    if let Some(mut state) = self.state.try_rc_deref_mut() {
      state.push(None);
    }
  }
}

#[cfg(test)]
mod tests {
  use futures::{executor::block_on, StreamExt};

  use crate::prelude::*;

  #[test]
  fn error_ends_the_stream() {
    let stream = observable::create(|s: Subscriber<i32, &'static str>| {
      s.next(1);
      s.error("E");
      EmptyDisposable::default()
    })
    .into_stream();
    let items: Vec<_> = block_on(stream.collect());
    assert_eq!(items, vec![Ok(1), Err("E")]);
  }

  #[test]
  fn subject_values_arrive_after_subscription() {
    let subject: PublishSubject<i32> = PublishSubject::new();
    let mut stream = subject.clone().into_stream();
    subject.next(1);
    subject.next(2);
    assert_eq!(super::IntoStream::buffered(&stream), 2);
    subject.complete();

    block_on(async {
      assert_eq!(stream.next().await, Some(Ok(1)));
      assert_eq!(stream.next().await, Some(Ok(2)));
      assert_eq!(stream.next().await, None);
    });
  }

  #[test]
  fn dropping_the_stream_unsubscribes() {
    let subject: PublishSubject<i32> = PublishSubject::new();
    let stream = subject.clone().into_stream();
    assert_eq!(subject.observer_count(), 1);
    drop(stream);
    assert_eq!(subject.observer_count(), 0);
  }
}
