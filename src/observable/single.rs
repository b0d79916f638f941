use std::marker::PhantomData;

use crate::{
  observable::{Observable, ObservableExt},
  observer::{Event, EventObserver},
  ops::into_future::SingleFuture,
  subscriber::Subscriber,
  subscription::{BoxedDisposable, Disposable, Subscription},
};

/// Creates an observable that produces exactly one value or one error.
///
/// The producer receives a [`SingleEmitter`] and returns the teardown for the
/// subscription. Only the first `success` or `failure` call counts.
///
/// ```rust
/// use rxcore::prelude::*;
///
/// let load = observable::single(|emitter: SingleEmitter<String, String>| {
///   emitter.success("contents".to_string());
///   EmptyDisposable::default()
/// });
/// load.subscribe_result(|r| assert_eq!(r, Ok("contents".to_string())));
/// ```
pub fn single<F, D, Item, Err>(producer: F) -> Single<F, Item, Err>
where
  F: Fn(SingleEmitter<Item, Err>) -> D,
  D: Disposable + 'static,
{
  Single { producer, _hint: PhantomData }
}

pub struct Single<F, Item, Err> {
  producer: F,
  _hint: PhantomData<fn() -> (Item, Err)>,
}

impl<F: Clone, Item, Err> Clone for Single<F, Item, Err> {
  fn clone(&self) -> Self { Single { producer: self.producer.clone(), _hint: PhantomData } }
}

/// The producer side of a [`Single`].
pub struct SingleEmitter<Item, Err>(Subscriber<Item, Err>);

impl<Item, Err> SingleEmitter<Item, Err> {
  /// Emits `value` and completes.
  pub fn success(&self, value: Item) {
    self.0.next(value);
    self.0.complete();
  }

  pub fn failure(&self, err: Err) { self.0.error(err); }

  /// `true` once a result was delivered or the subscription was disposed.
  pub fn is_closed(&self) -> bool { self.0.is_closed() }
}

impl<Item, Err> Clone for SingleEmitter<Item, Err> {
  fn clone(&self) -> Self { SingleEmitter(self.0.clone()) }
}

impl<F, D, Item, Err> Observable for Single<F, Item, Err>
where
  F: Fn(SingleEmitter<Item, Err>) -> D,
  D: Disposable + 'static,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(&self, subscriber: Subscriber<Item, Err>) -> BoxedDisposable {
    Box::new((self.producer)(SingleEmitter(subscriber)))
  }
}

impl<F, D, Item, Err> Single<F, Item, Err>
where
  F: Fn(SingleEmitter<Item, Err>) -> D,
  D: Disposable + 'static,
  Item: 'static,
  Err: 'static,
{
  /// Subscribes a closure receiving the outcome as a `Result`.
  pub fn subscribe_result<R>(&self, mut on_result: R) -> Subscription
  where
    R: FnMut(Result<Item, Err>) + 'static,
  {
    self.subscribe_with(EventObserver(move |e: Event<Item, Err>| match e {
      Event::Next(v) => on_result(Ok(v)),
      Event::Error(e) => on_result(Err(e)),
      Event::Completed => {}
    }))
  }

  /// Subscribes and resolves with the outcome.
  ///
  /// Subscribing happens right away, so a producer that succeeds
  /// synchronously has already resolved the future when it is returned.
  pub fn into_future(self) -> SingleFuture<Item, Err> { SingleFuture::new(&self) }
}
