use std::{convert::Infallible, marker::PhantomData};

use crate::{
  observable::Observable,
  subscriber::Subscriber,
  subscription::{BoxedDisposable, EmptyDisposable},
};

/// Creates an observable that completes immediately without emitting.
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::empty::<i32>().subscribe_all(|_| {}, |_| {}, || println!("completed"));
/// ```
pub fn empty<Item>() -> Empty<Item> { Empty(PhantomData) }

/// Creates an observable that never emits and never terminates.
///
/// The subscription stays open until it is disposed.
pub fn never<Item>() -> Never<Item> { Never(PhantomData) }

/// Creates an observable that emits `err` and nothing else.
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::throw::<i32, _>("oops").subscribe_all(|_| {}, |e| println!("{e}"), || {});
/// ```
pub fn throw<Item, Err: Clone>(err: Err) -> Throw<Item, Err> { Throw { err, _item: PhantomData } }

pub struct Empty<Item>(PhantomData<fn() -> Item>);

impl<Item> Clone for Empty<Item> {
  fn clone(&self) -> Self { Empty(PhantomData) }
}

impl<Item> Observable for Empty<Item> {
  type Item = Item;
  type Err = Infallible;

  fn actual_subscribe(&self, subscriber: Subscriber<Item, Infallible>) -> BoxedDisposable {
    subscriber.complete();
    Box::new(EmptyDisposable::default())
  }
}

pub struct Never<Item>(PhantomData<fn() -> Item>);

impl<Item> Clone for Never<Item> {
  fn clone(&self) -> Self { Never(PhantomData) }
}

impl<Item> Observable for Never<Item> {
  type Item = Item;
  type Err = Infallible;

  #[inline]
  fn actual_subscribe(&self, _subscriber: Subscriber<Item, Infallible>) -> BoxedDisposable {
    Box::new(EmptyDisposable::default())
  }
}

pub struct Throw<Item, Err> {
  err: Err,
  _item: PhantomData<fn() -> Item>,
}

impl<Item, Err: Clone> Clone for Throw<Item, Err> {
  fn clone(&self) -> Self { Throw { err: self.err.clone(), _item: PhantomData } }
}

impl<Item, Err: Clone> Observable for Throw<Item, Err> {
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(&self, subscriber: Subscriber<Item, Err>) -> BoxedDisposable {
    subscriber.error(self.err.clone());
    Box::new(EmptyDisposable::default())
  }
}
