use super::subject_core::SubjectState;
use crate::{
  rc::{RcDerefMut, WeakMutRc},
  subscription::Disposable,
};

/// Teardown of one subject registration.
///
/// Disposing removes exactly the registration it was created for. It only
/// holds a weak handle, so a subscription never keeps its subject alive.
pub(crate) struct SubjectSubscription<Item, Err> {
  state: WeakMutRc<SubjectState<Item, Err>>,
  id: Option<usize>,
}

impl<Item, Err> SubjectSubscription<Item, Err> {
  pub(crate) fn new(state: WeakMutRc<SubjectState<Item, Err>>, id: usize) -> Self {
    Self { state, id: Some(id) }
  }
}

impl<Item, Err> Disposable for SubjectSubscription<Item, Err> {
  fn dispose(&mut self) {
    let Some(id) = self.id.take() else { return };
    let Some(state) = self.state.upgrade() else { return };
    // A registration that cannot be removed right now is pruned by the next
    // broadcast, since its subscriber is already closed.
    let removed = state
      .try_rc_deref_mut()
      .and_then(|mut s| s.observers.remove(id));
    drop(removed);
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.id.is_none() }
}
