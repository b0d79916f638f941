use std::collections::VecDeque;

use tracing::trace;

use super::{
  subject_subscription::SubjectSubscription,
  subscribers::{broadcast, Subscribers, Targets},
};
use crate::{
  observer::Event,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscriber::Subscriber,
  subscription::{BoxedDisposable, Disposable, EmptyDisposable},
};

/// How many past values a subject keeps for late subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Retention {
  /// Publish: nothing.
  Nothing,
  /// Behavior: exactly the current value.
  Latest,
  /// Replay: the last `n` values, or all of them.
  Buffer(Option<usize>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Terminal<Err> {
  Error(Err),
  Completed,
}

impl<Err> Terminal<Err> {
  fn into_event<Item>(self) -> Event<Item, Err> {
    match self {
      Terminal::Error(e) => Event::Error(e),
      Terminal::Completed => Event::Completed,
    }
  }
}

pub(crate) struct SubjectState<Item, Err> {
  pub(crate) observers: Subscribers<Item, Err>,
  history: VecDeque<Item>,
  retention: Retention,
  terminal: Option<Terminal<Err>>,
  /// A terminal event was accepted but is still queued.
  closing: bool,
  disposed: bool,
  emitting: bool,
  pending: VecDeque<Event<Item, Err>>,
}

impl<Item, Err> SubjectState<Item, Err> {
  fn record(&mut self, value: Item) {
    match self.retention {
      Retention::Nothing => {}
      Retention::Latest => {
        self.history.clear();
        self.history.push_back(value);
      }
      Retention::Buffer(limit) => {
        self.history.push_back(value);
        if let Some(limit) = limit {
          while self.history.len() > limit {
            self.history.pop_front();
          }
        }
      }
    }
  }

  fn accepts_events(&self) -> bool { self.terminal.is_none() && !self.closing && !self.disposed }
}

/// The state machine shared by every subject flavor.
///
/// All state sits behind one `MutRc`. Events pushed while a broadcast is in
/// progress, for example by an observer callback, are queued and broadcast
/// in push order once the current one finishes. The borrow is never held
/// while an observer runs.
pub(crate) struct SubjectCore<Item, Err>(MutRc<SubjectState<Item, Err>>);

impl<Item, Err> Clone for SubjectCore<Item, Err> {
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<Item, Err> SubjectCore<Item, Err> {
  pub(crate) fn new(retention: Retention, seed: Option<Item>) -> Self {
    let mut history = VecDeque::new();
    history.extend(seed);
    Self(MutRc::own(SubjectState {
      observers: Subscribers::default(),
      history,
      retention,
      terminal: None,
      closing: false,
      disposed: false,
      emitting: false,
      pending: VecDeque::new(),
    }))
  }

  pub(crate) fn observer_count(&self) -> usize { self.0.rc_deref().observers.live_count() }

  pub(crate) fn is_terminated(&self) -> bool {
    let state = self.0.rc_deref();
    state.terminal.is_some() || state.closing
  }

  pub(crate) fn is_disposed(&self) -> bool { self.0.rc_deref().disposed }

  /// The current value of a subject that keeps one, `None` once terminated.
  pub(crate) fn latest(&self) -> Option<Item>
  where
    Item: Clone,
  {
    let state = self.0.rc_deref();
    if state.terminal.is_some() {
      return None;
    }
    state.history.back().cloned()
  }
}

impl<Item: Clone + 'static, Err: Clone + 'static> SubjectCore<Item, Err> {
  pub(crate) fn emit(&self, event: Event<Item, Err>) {
    {
      let mut state = self.0.rc_deref_mut();
      if !state.accepts_events() {
        return;
      }
      if event.is_terminal() {
        state.closing = true;
      }
      state.pending.push_back(event);
      if state.emitting {
        return;
      }
      state.emitting = true;
    }
    self.drain();
  }

  /// Broadcasts queued events until the queue is empty.
  fn drain(&self) {
    loop {
      let (event, targets) = {
        let mut state = self.0.rc_deref_mut();
        let Some(event) = state.pending.pop_front() else {
          state.emitting = false;
          return;
        };
        let targets = match &event {
          Event::Next(v) => {
            state.record(v.clone());
            state.observers.snapshot()
          }
          Event::Error(e) => {
            if state.retention == Retention::Latest {
              state.history.clear();
            }
            state.terminal = Some(Terminal::Error(e.clone()));
            state.closing = false;
            state.observers.take_all()
          }
          Event::Completed => {
            state.terminal = Some(Terminal::Completed);
            state.closing = false;
            state.observers.take_all()
          }
        };
        if event.is_terminal() {
          trace!(
            observers = targets.len(),
            errored = event.error().is_some(),
            "subject terminated"
          );
        }
        (event, targets)
      };
      broadcast(targets, event);
    }
  }

  /// Registers `subscriber`, first replaying what the subject retains.
  ///
  /// A terminated subject replays its buffer (replay flavor only), delivers
  /// the stored terminal event and keeps no registration.
  pub(crate) fn subscribe(&self, subscriber: Subscriber<Item, Err>) -> BoxedDisposable {
    let (replay, terminal, registration, drain_after) = {
      let mut state = self.0.rc_deref_mut();
      match state.terminal.clone() {
        Some(terminal) => {
          let replay = match state.retention {
            Retention::Buffer(_) if !state.disposed => state.history.clone(),
            _ => VecDeque::new(),
          };
          (replay, Some(terminal), None, false)
        }
        None => {
          let id = state.observers.add(subscriber.clone());
          // Hold the queue while replaying, so events pushed meanwhile reach
          // the new observer after its replay.
          let drain_after = !state.emitting;
          state.emitting = true;
          (state.history.clone(), None, Some(id), drain_after)
        }
      }
    };

    for v in replay {
      subscriber.next(v);
    }
    if let Some(terminal) = terminal {
      subscriber.on(terminal.into_event());
    }
    if drain_after {
      self.drain();
    }

    match registration {
      Some(id) => Box::new(SubjectSubscription::new(self.0.downgrade(), id)),
      None => Box::new(EmptyDisposable::default()),
    }
  }

  /// Ends the subject without an error event.
  ///
  /// Current subscriptions are disposed, which runs their `on_disposed`
  /// hooks. The retained history is dropped, so later subscribers only get
  /// the stored error, or `Completed` if none was pushed.
  pub(crate) fn dispose(&self) {
    let targets: Targets<Item, Err> = {
      let mut state = self.0.rc_deref_mut();
      if state.disposed {
        return;
      }
      state.disposed = true;
      state.closing = false;
      if state.terminal.is_none() {
        state.terminal = Some(Terminal::Completed);
      }
      state.history.clear();
      state.pending.clear();
      state.observers.take_all()
    };
    trace!(observers = targets.len(), "subject disposed");
    for mut target in targets {
      target.dispose();
    }
  }
}
