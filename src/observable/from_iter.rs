use std::{convert::Infallible, ops::RangeInclusive};

use crate::{
  observable::Observable,
  subscriber::Subscriber,
  subscription::{BoxedDisposable, EmptyDisposable},
};

/// Creates an observable that emits every element of `iter`, then completes.
///
/// The collection is cloned for each subscription, so every subscriber sees
/// the full sequence. Emission stops early once the subscriber is disposed.
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::from_iter(vec![0, 1, 2, 3]).subscribe(|v| println!("{v},"));
/// ```
pub fn from_iter<Iter>(iter: Iter) -> FromIter<Iter>
where
  Iter: IntoIterator + Clone,
{
  FromIter(iter)
}

/// Emits `value` once, then completes.
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::just("A").subscribe(|v| println!("{v}"));
/// ```
pub fn just<Item: Clone>(value: Item) -> Just<Item> { Just(value) }

/// Emits `count` consecutive integers starting at `start`, then completes.
///
/// Values that would overflow `i64` are not produced.
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::range(1, 5).subscribe(|v| println!("{v}"));
/// // 1 2 3 4 5
/// ```
pub fn range(start: i64, count: usize) -> FromIter<RangeInclusive<i64>> {
  let Some(steps) = count.checked_sub(1) else {
    return from_iter(RangeInclusive::new(1, 0));
  };
  let last = i64::try_from(steps).map_or(i64::MAX, |steps| start.saturating_add(steps));
  from_iter(start..=last)
}

/// Creates an observable from a fixed list of values.
///
/// ```
/// use rxcore::prelude::*;
///
/// rxcore::of!("A", "B", "C").subscribe(|v| println!("{v}"));
/// ```
#[macro_export]
macro_rules! of {
  ($($v:expr),+ $(,)?) => {
    $crate::observable::from_iter([$($v),+])
  };
}

#[derive(Clone)]
pub struct FromIter<Iter>(Iter);

impl<Iter> Observable for FromIter<Iter>
where
  Iter: IntoIterator + Clone,
{
  type Item = Iter::Item;
  type Err = Infallible;

  fn actual_subscribe(&self, subscriber: Subscriber<Self::Item, Infallible>) -> BoxedDisposable {
    let mut iter = self.0.clone().into_iter();
    while !subscriber.is_closed() {
      match iter.next() {
        Some(v) => subscriber.next(v),
        None => break,
      }
    }
    subscriber.complete();
    Box::new(EmptyDisposable::default())
  }
}

#[derive(Clone)]
pub struct Just<Item>(Item);

impl<Item: Clone> Observable for Just<Item> {
  type Item = Item;
  type Err = Infallible;

  fn actual_subscribe(&self, subscriber: Subscriber<Item, Infallible>) -> BoxedDisposable {
    subscriber.next(self.0.clone());
    subscriber.complete();
    Box::new(EmptyDisposable::default())
  }
}
