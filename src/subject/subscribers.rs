use smallvec::SmallVec;

use crate::{observer::Event, subscriber::Subscriber, subscription::DynamicSubscriptions};

/// Registration order snapshot taken before a broadcast.
pub(crate) type Targets<Item, Err> = SmallVec<[Subscriber<Item, Err>; 4]>;

/// The observers registered on a subject, keyed by registration id.
///
/// Iteration follows registration order, which is also notification order.
pub(crate) struct Subscribers<Item, Err> {
  inner: DynamicSubscriptions<Subscriber<Item, Err>>,
}

impl<Item, Err> Default for Subscribers<Item, Err> {
  fn default() -> Self { Self { inner: DynamicSubscriptions::default() } }
}

impl<Item, Err> Subscribers<Item, Err> {
  #[inline]
  pub(crate) fn add(&mut self, subscriber: Subscriber<Item, Err>) -> usize {
    self.inner.add(subscriber)
  }

  #[inline]
  pub(crate) fn remove(&mut self, id: usize) -> Option<Subscriber<Item, Err>> { self.inner.remove(id) }

  /// Number of observers that can still receive events.
  pub(crate) fn live_count(&self) -> usize { self.inner.iter().filter(|s| !s.is_closed()).count() }

  /// Copies the live observers out, so the caller can deliver without
  /// holding the subject borrow. Closed observers are pruned on the way.
  pub(crate) fn snapshot(&mut self) -> Targets<Item, Err> {
    self.inner.retain(|s| !s.is_closed());
    self.inner.iter().cloned().collect()
  }

  /// Removes every observer, for terminal events and disposal.
  pub(crate) fn take_all(&mut self) -> Targets<Item, Err> {
    self.inner.drain().filter(|s| !s.is_closed()).collect()
  }
}

/// Delivers `event` to every target in order.
///
/// The event is cloned for all targets except the last one, which receives
/// the event itself.
pub(crate) fn broadcast<Item: Clone, Err: Clone>(targets: Targets<Item, Err>, event: Event<Item, Err>) {
  let mut iter = targets.into_iter().peekable();
  while let Some(target) = iter.next() {
    if iter.peek().is_some() {
      target.on(event.clone());
    } else {
      target.on(event);
      break;
    }
  }
}
