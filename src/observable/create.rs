use std::marker::PhantomData;

use crate::{
  observable::Observable,
  subscriber::Subscriber,
  subscription::{BoxedDisposable, Disposable},
};

/// Creates an observable from a producer function.
///
/// The producer runs synchronously on every subscription. It may push any
/// number of events through the subscriber, keep the subscriber to push
/// more later, and returns the teardown that runs when the subscription
/// ends. Anything pushed after a terminal event or after disposal is
/// dropped.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxcore::prelude::*;
///
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
/// observable::create(|s: Subscriber<&'static str, String>| {
///   s.next("1");
///   s.error("E".to_string());
///   s.next("?");
///   EmptyDisposable::default()
/// })
/// .subscribe_event(move |e| c_seen.borrow_mut().push(e));
///
/// assert_eq!(*seen.borrow(), vec![Event::Next("1"), Event::Error("E".to_string())]);
/// ```
pub fn create<F, D, Item, Err>(producer: F) -> Create<F, Item, Err>
where
  F: Fn(Subscriber<Item, Err>) -> D,
  D: Disposable + 'static,
{
  Create { producer, _hint: PhantomData }
}

pub struct Create<F, Item, Err> {
  producer: F,
  _hint: PhantomData<fn() -> (Item, Err)>,
}

impl<F: Clone, Item, Err> Clone for Create<F, Item, Err> {
  fn clone(&self) -> Self { Create { producer: self.producer.clone(), _hint: PhantomData } }
}

impl<F, D, Item, Err> Observable for Create<F, Item, Err>
where
  F: Fn(Subscriber<Item, Err>) -> D,
  D: Disposable + 'static,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(&self, subscriber: Subscriber<Item, Err>) -> BoxedDisposable {
    Box::new((self.producer)(subscriber))
  }
}
