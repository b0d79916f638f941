//! End-to-end scenarios through the public API only.

use std::{
  cell::{Cell, RefCell},
  collections::HashMap,
  convert::Infallible,
  fmt::Debug,
  rc::Rc,
};

use futures::executor::block_on;
use rxcore::{of, prelude::*};

#[derive(Debug, Clone, PartialEq)]
enum MyError {
  AnError,
}

/// Collects labelled lines the way the scenarios print them.
#[derive(Clone, Default)]
struct Printer(Rc<RefCell<Vec<String>>>);

impl Printer {
  fn line(&self, line: impl Into<String>) { self.0.borrow_mut().push(line.into()); }

  /// Prints the element, else the error, else the event itself.
  fn event<Item: Debug, Err: Debug>(&self, label: &str, event: &Event<Item, Err>) {
    let text = match event {
      Event::Next(v) => format!("{v:?}"),
      Event::Error(e) => format!("{e:?}"),
      Event::Completed => "completed".to_string(),
    };
    self.line(format!("{label} {text}"));
  }

  fn lines(&self) -> Vec<String> { self.0.borrow().clone() }
}

#[test]
fn cold_sequences() {
  let p = Printer::default();

  let c = p.clone();
  observable::just(1).subscribe(move |v: i32| c.line(v.to_string()));
  let c = p.clone();
  of!(1, 2, 3).subscribe_event(move |e| c.event("of", &e));
  let c = p.clone();
  observable::from_iter(vec![4, 5]).subscribe(move |v: i32| c.line(v.to_string()));

  assert_eq!(
    p.lines(),
    vec!["1", "of 1", "of 2", "of 3", "of completed", "4", "5"]
  );
}

#[test]
fn empty_and_never() {
  let p = Printer::default();
  let bag = DisposeBag::new();

  let (c1, c2) = (p.clone(), p.clone());
  observable::empty::<()>()
    .subscribe_all(move |_| c1.line("next"), |_| {}, move || c2.line("Completed"))
    .disposed_by(&bag);

  let (c1, c2, c3, c4) = (p.clone(), p.clone(), p.clone(), p.clone());
  observable::never::<()>()
    .do_on_subscribe(move || c1.line("Subscribed"))
    .subscribe_callbacks(
      Callbacks::new()
        .on_next(move |_| c2.line("next"))
        .on_completed(move || c3.line("Completed"))
        .on_disposed(move || c4.line("Disposed")),
    )
    .disposed_by(&bag);

  assert_eq!(p.lines(), vec!["Completed", "Subscribed"]);
  drop(bag);
  assert_eq!(p.lines(), vec!["Completed", "Subscribed", "Disposed"]);
}

#[test]
fn range_drives_a_computation() {
  let fib = Rc::new(RefCell::new(vec![]));
  let c_fib = fib.clone();
  observable::range(1, 10).subscribe(move |i| {
    let n = i as f64;
    let v = ((1.61803_f64.powf(n) - 0.61803_f64.powf(n)) / 2.23606).round() as i64;
    c_fib.borrow_mut().push(v);
  });
  assert_eq!(*fib.borrow(), vec![0, 1, 2, 3, 5, 8, 13, 21, 34, 55]);
}

#[test]
fn explicit_dispose_after_synchronous_completion() {
  let p = Printer::default();
  let c = p.clone();
  let mut subscription = of!("A", "B", "C").subscribe_event(move |e| c.event("event", &e));
  subscription.dispose();
  subscription.dispose();
  assert_eq!(p.lines(), vec!["event \"A\"", "event \"B\"", "event \"C\"", "event completed"]);
}

#[test]
fn create_stops_at_the_first_terminal() {
  let p = Printer::default();
  let bag = DisposeBag::new();
  let (c1, c2, c3, c4) = (p.clone(), p.clone(), p.clone(), p.clone());

  observable::create(|observer: Subscriber<&'static str, MyError>| {
    observer.next("1");
    observer.error(MyError::AnError);
    observer.complete();
    observer.next("?");
    EmptyDisposable::default()
  })
  .subscribe_callbacks(
    Callbacks::new()
      .on_next(move |v| c1.line(v))
      .on_error(move |e| c2.line(format!("{e:?}")))
      .on_completed(move || c3.line("Completed"))
      .on_disposed(move || c4.line("Disposed")),
  )
  .disposed_by(&bag);

  assert_eq!(p.lines(), vec!["1", "AnError", "Disposed"]);
}

#[test]
fn deferred_alternates() {
  let bag = DisposeBag::new();
  let mut flip = false;
  let factory = observable::defer(move || {
    flip = !flip;
    if flip { of!(1, 2, 3) } else { of!(4, 5, 6) }
  });

  let rows = Rc::new(RefCell::new(vec![]));
  for _ in 0..=3 {
    let row = Rc::new(RefCell::new(String::new()));
    let c_row = row.clone();
    factory
      .subscribe(move |v: i32| c_row.borrow_mut().push_str(&v.to_string()))
      .disposed_by(&bag);
    rows.borrow_mut().push(row.borrow().clone());
  }
  assert_eq!(*rows.borrow(), vec!["123", "456", "123", "456"]);
}

#[derive(Debug, Clone, PartialEq)]
enum FileReadError {
  FileNotFound,
  EncodingFailed,
}

fn load_text(
  disk: Rc<HashMap<&'static str, Vec<u8>>>, name: &'static str,
) -> Single<impl Fn(SingleEmitter<String, FileReadError>) -> EmptyDisposable, String, FileReadError>
{
  observable::single(move |single: SingleEmitter<String, FileReadError>| {
    let Some(data) = disk.get(name) else {
      single.failure(FileReadError::FileNotFound);
      return EmptyDisposable::default();
    };
    match String::from_utf8(data.clone()) {
      Ok(contents) => single.success(contents),
      Err(_) => single.failure(FileReadError::EncodingFailed),
    }
    EmptyDisposable::default()
  })
}

#[test]
fn single_loads_text() {
  let disk = Rc::new(HashMap::from([
    ("Copyright", b"Copyright text".to_vec()),
    ("Binary", vec![0xff, 0xfe]),
  ]));
  let results = Rc::new(RefCell::new(vec![]));

  for name in ["Copyright", "Binary", "Missing"] {
    let c_results = results.clone();
    load_text(disk.clone(), name).subscribe_result(move |r| c_results.borrow_mut().push(r));
  }
  assert_eq!(
    *results.borrow(),
    vec![
      Ok("Copyright text".to_string()),
      Err(FileReadError::EncodingFailed),
      Err(FileReadError::FileNotFound),
    ]
  );

  let fut = load_text(disk, "Copyright").into_future();
  assert_eq!(block_on(fut), Ok("Copyright text".to_string()));
}

#[test]
fn publish_subject() {
  let p = Printer::default();
  let subject: PublishSubject<&'static str> = PublishSubject::new();
  subject.next("Is anyone listening?");

  let c = p.clone();
  let mut one = subject.subscribe(move |v| c.line(v));
  subject.next("1");
  subject.next("2");

  let c = p.clone();
  let mut two = subject.subscribe_event(move |e| c.event("2)", &e));
  subject.next("3");
  one.dispose();
  subject.next("4");

  subject.complete();
  subject.next("5");
  two.dispose();

  let bag = DisposeBag::new();
  let c = p.clone();
  subject.subscribe_event(move |e| c.event("3)", &e)).disposed_by(&bag);
  subject.next("?");

  assert_eq!(
    p.lines(),
    vec![
      "1",
      "2",
      "3",
      "2) \"3\"",
      "2) \"4\"",
      "2) completed",
      "3) completed",
    ]
  );
}

#[test]
fn behavior_subject() {
  let p = Printer::default();
  let bag = DisposeBag::new();
  let subject: BehaviorSubject<&'static str, MyError> = BehaviorSubject::new("Initial value");
  subject.next("X");

  let c = p.clone();
  subject.subscribe_event(move |e| c.event("1)", &e)).disposed_by(&bag);
  subject.error(MyError::AnError);
  let c = p.clone();
  subject.subscribe_event(move |e| c.event("2)", &e)).disposed_by(&bag);

  assert_eq!(p.lines(), vec!["1) \"X\"", "1) AnError", "2) AnError"]);
  assert_eq!(subject.value(), Err(RxError::AlreadyTerminal));
}

#[test]
fn replay_subject() {
  let p = Printer::default();
  let bag = DisposeBag::new();
  let mut subject: ReplaySubject<&'static str, MyError> = ReplaySubject::new(2).unwrap();
  subject.next("1");
  subject.next("2");
  subject.next("3");

  let c = p.clone();
  subject.subscribe_event(move |e| c.event("1)", &e)).disposed_by(&bag);
  let c = p.clone();
  subject.subscribe_event(move |e| c.event("2)", &e)).disposed_by(&bag);
  subject.next("4");
  subject.error(MyError::AnError);
  subject.dispose();

  let c = p.clone();
  subject.subscribe_event(move |e| c.event("3)", &e)).disposed_by(&bag);

  assert_eq!(
    p.lines(),
    vec![
      "1) \"2\"",
      "1) \"3\"",
      "2) \"2\"",
      "2) \"3\"",
      "1) \"4\"",
      "2) \"4\"",
      "1) AnError",
      "2) AnError",
      "3) AnError",
    ]
  );
}

#[test]
fn relays() {
  let p = Printer::default();
  let bag = DisposeBag::new();

  let publish = PublishRelay::new();
  publish.accept("Knock knock, anyone home?");
  let c = p.clone();
  publish.subscribe(move |v: &'static str| c.line(v)).disposed_by(&bag);
  publish.accept("1");

  let behavior = BehaviorRelay::new("Initial value");
  behavior.accept("New initial value");
  let c = p.clone();
  behavior
    .subscribe_event(move |e: Event<&'static str, Infallible>| c.event("1)", &e))
    .disposed_by(&bag);
  behavior.accept("1");
  let c = p.clone();
  behavior
    .subscribe_event(move |e: Event<&'static str, Infallible>| c.event("2)", &e))
    .disposed_by(&bag);
  behavior.accept("2");

  assert_eq!(
    p.lines(),
    vec![
      "1",
      "1) \"New initial value\"",
      "1) \"1\"",
      "2) \"1\"",
      "1) \"2\"",
      "2) \"2\"",
    ]
  );
  assert_eq!(behavior.value(), Ok("2"));
}

#[test]
fn bag_drop_stops_hot_subscriptions() {
  let subject: PublishSubject<i32> = PublishSubject::new();
  let seen = Rc::new(Cell::new(0));
  {
    let bag = DisposeBag::new();
    let c_seen = seen.clone();
    subject.subscribe(move |v| c_seen.set(c_seen.get() + v)).disposed_by(&bag);
    subject.next(1);
    assert!(subject.has_observers());
  }
  subject.next(10);
  assert_eq!(seen.get(), 1);
  assert!(!subject.has_observers());
}
