use smallvec::SmallVec;

/// Id-keyed arena of registrations.
///
/// Items keep their insertion order, so iteration order is registration
/// order. Removing an item by its id never disturbs the order of the others.
///
/// ```rust
/// use rxcore::subscription::DynamicSubscriptions;
///
/// let mut subs: DynamicSubscriptions<&str> = DynamicSubscriptions::default();
/// let a = subs.add("a");
/// let _b = subs.add("b");
/// assert_eq!(subs.remove(a), Some("a"));
/// assert_eq!(subs.iter().copied().collect::<Vec<_>>(), vec!["b"]);
/// ```
pub struct DynamicSubscriptions<U> {
  next_id: usize,
  items: SmallVec<[(usize, U); 2]>,
}

impl<U> Default for DynamicSubscriptions<U> {
  fn default() -> Self { Self { next_id: 0, items: SmallVec::new() } }
}

impl<U> DynamicSubscriptions<U> {
  /// Add an item and return its unique ID. Ids are never reused.
  #[inline]
  pub fn add(&mut self, item: U) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    self.items.push((id, item));
    id
  }

  pub fn remove(&mut self, id: usize) -> Option<U> {
    self
      .items
      .iter()
      .position(|(i, _)| *i == id)
      .map(|pos| self.items.remove(pos).1)
  }

  /// Keeps only the items for which `keep` returns `true`.
  pub fn retain(&mut self, mut keep: impl FnMut(&U) -> bool) { self.items.retain(|(_, item)| keep(item)); }

  #[inline]
  pub fn drain(&mut self) -> impl Iterator<Item = U> + '_ {
    self.items.drain(..).map(|(_, item)| item)
  }

  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = &U> { self.items.iter().map(|(_, item)| item) }
}
