use std::{
  cell::{Cell, RefCell},
  collections::VecDeque,
  rc::Rc,
};

use crate::{
  observer::{BoxedObserver, Event, Observer},
  subscription::{ClosureDisposable, Disposable, SubscriptionState},
};

/// Every observer handed to `subscribe` is converted into a `Subscriber`
/// before it reaches the source.
///
/// The subscriber is the engine side of a subscription. It guarantees that
/// the wrapped observer:
///
/// - receives nothing after a terminal event or after the subscription was
///   disposed; late calls are silently dropped,
/// - receives events one at a time: an event pushed while the observer is
///   still handling the previous one is queued and delivered right after,
///   in push order.
///
/// A terminal event closes the subscription, which runs the source teardown
/// and then the `on_disposed` hook.
///
/// Subscribers are cheap handles; clones push into the same observer. A
/// `create` producer may keep one and emit later, and should check
/// [`is_closed`](Self::is_closed) before doing expensive work.
pub struct Subscriber<Item, Err> {
  inner: Rc<Inner<Item, Err>>,
  state: Rc<SubscriptionState>,
}

struct Inner<Item, Err> {
  observer: RefCell<Option<BoxedObserver<Item, Err>>>,
  pending: RefCell<VecDeque<Event<Item, Err>>>,
  delivering: Cell<bool>,
  stopped: Cell<bool>,
}

impl<Item, Err> Inner<Item, Err> {
  fn release(&self) {
    let observer = self.observer.borrow_mut().take();
    self.pending.borrow_mut().clear();
    drop(observer);
  }
}

impl<Item: 'static, Err: 'static> Subscriber<Item, Err> {
  pub(crate) fn new<O>(observer: O, state: Rc<SubscriptionState>) -> Self
  where
    O: Observer<Item, Err> + 'static,
  {
    let inner = Rc::new(Inner {
      observer: RefCell::new(Some(Box::new(observer) as BoxedObserver<Item, Err>)),
      pending: RefCell::new(VecDeque::new()),
      delivering: Cell::new(false),
      stopped: Cell::new(false),
    });
    let weak = Rc::downgrade(&inner);
    state.add(Box::new(ClosureDisposable::new(move || {
      if let Some(inner) = weak.upgrade() {
        inner.release();
      }
    })));
    Self { inner, state }
  }
}

impl<Item, Err> Subscriber<Item, Err> {
  #[inline]
  pub fn next(&self, value: Item) { self.deliver(Event::Next(value)); }

  #[inline]
  pub fn error(&self, err: Err) { self.deliver(Event::Error(err)); }

  #[inline]
  pub fn complete(&self) { self.deliver(Event::Completed); }

  #[inline]
  pub fn on(&self, event: Event<Item, Err>) { self.deliver(event); }

  /// `true` once a terminal event was accepted or the subscription was
  /// disposed.
  #[inline]
  pub fn is_closed(&self) -> bool { self.inner.stopped.get() || self.state.is_closed() }

  fn deliver(&self, event: Event<Item, Err>) {
    let inner = &*self.inner;
    if self.is_closed() {
      return;
    }
    if event.is_terminal() {
      inner.stopped.set(true);
    }
    inner.pending.borrow_mut().push_back(event);
    if inner.delivering.replace(true) {
      return;
    }

    loop {
      if self.state.is_closed() {
        inner.pending.borrow_mut().clear();
        break;
      }
      let Some(event) = inner.pending.borrow_mut().pop_front() else {
        break;
      };
      let Some(mut observer) = inner.observer.borrow_mut().take() else {
        inner.pending.borrow_mut().clear();
        break;
      };

      let terminal = event.is_terminal();
      observer.on(event);

      if terminal {
        drop(observer);
        inner.pending.borrow_mut().clear();
        inner.delivering.set(false);
        self.state.dispose();
        return;
      }
      if self.state.is_closed() {
        // Disposed from inside the callback.
        drop(observer);
        inner.pending.borrow_mut().clear();
        break;
      }
      *inner.observer.borrow_mut() = Some(observer);
    }
    inner.delivering.set(false);
  }
}

impl<Item, Err> Clone for Subscriber<Item, Err> {
  fn clone(&self) -> Self { Self { inner: self.inner.clone(), state: self.state.clone() } }
}

impl<Item, Err> Observer<Item, Err> for Subscriber<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { self.deliver(Event::Next(value)) }

  #[inline]
  fn error(&mut self, err: Err) { self.deliver(Event::Error(err)) }

  #[inline]
  fn complete(&mut self) { self.deliver(Event::Completed) }

  #[inline]
  fn is_closed(&self) -> bool { Subscriber::is_closed(self) }
}

/// Disposing a subscriber from the source side ends the subscription exactly
/// as if the caller had disposed it.
impl<Item, Err> Disposable for Subscriber<Item, Err> {
  #[inline]
  fn dispose(&mut self) { self.state.dispose(); }

  #[inline]
  fn is_disposed(&self) -> bool { self.state.is_closed() }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use super::*;
  use crate::observer::{Callbacks, EventObserver};

  type Log = Rc<RefCell<Vec<Event<i32, &'static str>>>>;

  fn subscriber_with_log() -> (Subscriber<i32, &'static str>, Log, Rc<SubscriptionState>, Log) {
    let log: Log = Rc::new(RefCell::new(vec![]));
    let disposed: Log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    let c_disposed = disposed.clone();
    let state = Rc::new(SubscriptionState::new(Some(Box::new(move || {
      c_disposed.borrow_mut().push(Event::Completed)
    }))));
    let subscriber =
      Subscriber::new(EventObserver(move |e| c_log.borrow_mut().push(e)), state.clone());
    (subscriber, log, state, disposed)
  }

  #[test]
  fn nothing_after_terminal() {
    let (s, log, state, disposed) = subscriber_with_log();
    s.next(1);
    s.error("E");
    s.complete();
    s.next(2);
    assert_eq!(*log.borrow(), vec![Event::Next(1), Event::Error("E")]);
    assert!(state.is_closed());
    assert_eq!(disposed.borrow().len(), 1);
  }

  #[test]
  fn nothing_after_dispose() {
    let (s, log, state, disposed) = subscriber_with_log();
    s.next(1);
    state.dispose();
    s.next(2);
    s.complete();
    assert_eq!(*log.borrow(), vec![Event::Next(1)]);
    assert!(s.is_closed());
    assert_eq!(disposed.borrow().len(), 1);
  }

  #[test]
  fn reentrant_events_are_queued_in_order() {
    let log: Log = Rc::new(RefCell::new(vec![]));
    let slot: Rc<RefCell<Option<Subscriber<i32, &'static str>>>> = Rc::new(RefCell::new(None));
    let (c_log, c_slot) = (log.clone(), slot.clone());
    let state = Rc::new(SubscriptionState::new(None));
    let s = Subscriber::new(
      EventObserver(move |e: Event<i32, &'static str>| {
        c_log.borrow_mut().push(e);
        if e == Event::Next(1) {
          let me = c_slot.borrow().clone().unwrap();
          me.next(2);
          me.complete();
          me.next(3);
        }
      }),
      state,
    );
    *slot.borrow_mut() = Some(s.clone());

    s.next(1);
    assert_eq!(*log.borrow(), vec![Event::Next(1), Event::Next(2), Event::Completed]);
    slot.borrow_mut().take();
  }

  #[test]
  fn dispose_inside_callback_stops_delivery() {
    let log = Rc::new(RefCell::new(vec![]));
    let holder: Rc<RefCell<Option<Subscriber<i32, ()>>>> = Rc::new(RefCell::new(None));
    let (c_log, c_holder) = (log.clone(), holder.clone());
    let state = Rc::new(SubscriptionState::new(None));
    let s = Subscriber::new(
      Callbacks::new().on_next(move |v: i32| {
        c_log.borrow_mut().push(v);
        let me = c_holder.borrow().clone().unwrap();
        me.next(v + 100);
        let mut me = me;
        me.dispose();
      }),
      state.clone(),
    );
    *holder.borrow_mut() = Some(s.clone());

    s.next(1);
    s.next(2);
    assert_eq!(*log.borrow(), vec![1]);
    assert!(state.is_closed());
    holder.borrow_mut().take();
  }
}
