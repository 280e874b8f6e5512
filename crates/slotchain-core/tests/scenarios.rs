use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rstest::rstest;
use slotchain_core::{
    CompositionError, Connection, ScopedConnection, Signal, Step, TypeTag, compose, make_slot,
};

#[test]
fn scenario_a_static_slot_then_disconnect() {
    let mut signal = Signal::<i32>::new();
    let hits = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&hits);
    let record = make_slot(move |x: i32| sink.borrow_mut().push(x));
    let conn = signal.connect(make_slot(|x: i32| x) | record);

    signal.emit(5);
    conn.disconnect();
    signal.emit(5);

    assert_eq!(*hits.borrow(), vec![5]);
}

#[test]
fn scenario_b_runtime_pipeline_with_terminal_sink() {
    let mut signal = Signal::<i32>::new();
    let observed = Rc::new(Cell::new(None));

    let sink = Rc::clone(&observed);
    signal
        .connect_runtime()
        .add_slot(|x: i32| x * 3)
        .unwrap()
        .add_slot(|x: i32| x - 1)
        .unwrap()
        .add_slot(move |x: i32| sink.set(Some(x)))
        .unwrap();

    signal.emit(4);
    assert_eq!(observed.get(), Some(11));
}

#[test]
fn scenario_c_static_composition_connected_directly() {
    let mut signal = Signal::<i32>::new();
    let recorded = Rc::new(Cell::new(0));

    let sink = Rc::clone(&recorded);
    signal.connect(compose(make_slot(|x: i32| x * 2), make_slot(move |x: i32| sink.set(x))));

    signal.emit(21);
    assert_eq!(recorded.get(), 42);
}

#[test]
fn scenario_d_mismatched_append_leaves_pipeline_unchanged() {
    let mut signal = Signal::<i32>::new();
    let pipeline = signal.connect_runtime();
    pipeline.add_slot(|x: i32| f64::from(x) / 2.0).unwrap();
    let before = pipeline.len();

    let err = pipeline.add_slot(|s: String| s.len()).unwrap_err();
    assert_eq!(
        err,
        CompositionError::TypeMismatch {
            expected: TypeTag::of::<f64>(),
            found: TypeTag::of::<String>(),
        }
    );
    assert_eq!(pipeline.len(), before);

    // Still usable for a retry with the right input type.
    pipeline.add_slot(|x: f64| x.round() as i64).unwrap();
    assert_eq!(pipeline.len(), before + 1);
}

#[test]
fn hybrid_pipeline_embeds_static_chain() {
    let mut signal = Signal::<i32>::new();
    let observed = Rc::new(Cell::new(0));

    let fast = make_slot(|x: i32| x * 3) | make_slot(|x: i32| x - 1);
    let sink = Rc::clone(&observed);
    signal
        .connect_runtime()
        .add_static(fast)
        .unwrap()
        .add_slot(move |x: i32| sink.set(x))
        .unwrap();

    signal.emit(4);
    assert_eq!(observed.get(), 11);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(-9)]
#[case(1_000)]
fn emission_order_is_statics_then_pipelines(#[case] value: i32) {
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut signal = Signal::<i32>::new();

    let push = |label: &'static str| {
        let order = Rc::clone(&order);
        move |x: i32| order.borrow_mut().push((label, x))
    };

    signal.connect_runtime().add_slot(push("R")).unwrap();
    signal.connect(make_slot(push("S1")));
    signal.connect(make_slot(push("S2")));

    signal.emit(value);
    assert_eq!(
        *order.borrow(),
        vec![("S1", value), ("S2", value), ("R", value)]
    );
}

#[test]
fn scoped_connection_auto_revokes() {
    let mut signal = Signal::<i32>::new();
    let count = Rc::new(Cell::new(0));

    let counter = Rc::clone(&count);
    let guard: ScopedConnection =
        signal.connect_scoped(make_slot(move |_: i32| counter.set(counter.get() + 1)));
    let observer = guard.connection().cloned().unwrap_or_default();

    signal.emit(10);
    drop(guard);
    signal.emit(10);
    signal.emit(10);

    assert_eq!(count.get(), 1);
    assert!(!observer.is_connected());
}

#[test]
fn disconnect_is_monotonic_across_threads() {
    let mut signal = Signal::<i32>::new();
    let conn = signal.connect(make_slot(|_: i32| {}));
    let handles: Vec<Connection> = (0..4).map(|_| conn.clone()).collect();

    let resurrected = Arc::new(AtomicBool::new(false));
    let disconnected = Arc::new(AtomicBool::new(false));

    std::thread::scope(|scope| {
        for (i, handle) in handles.into_iter().enumerate() {
            let resurrected = Arc::clone(&resurrected);
            let disconnected = Arc::clone(&disconnected);
            scope.spawn(move || {
                for _ in 0..2_000 {
                    if i == 0 {
                        handle.disconnect();
                        disconnected.store(true, Ordering::Release);
                    } else {
                        let seen_disconnect = disconnected.load(Ordering::Acquire);
                        if seen_disconnect && handle.is_connected() {
                            resurrected.store(true, Ordering::Relaxed);
                        }
                    }
                }
            });
        }
    });

    assert!(!resurrected.load(Ordering::Relaxed));
    assert!(!conn.is_connected());
    assert_eq!(signal.status().statics.live, 0);
}

#[rstest]
#[case(-3)]
#[case(0)]
#[case(8)]
fn static_chains_are_associative(#[case] input: i32) {
    let a = || make_slot(|x: i32| x * 5);
    let b = || make_slot(|x: i32| i64::from(x) + 1);
    let c = || make_slot(|x: i64| x.to_string());

    let left = compose(compose(a(), b()), c());
    let right = compose(a(), compose(b(), c()));
    assert_eq!(left.call(input), right.call(input));
}

#[test]
fn status_tracks_live_and_dead_entries() {
    let mut signal = Signal::<u8>::new();
    let first = signal.connect(make_slot(|_: u8| {}));
    signal.connect(make_slot(|_: u8| {}));
    let pipe = signal.connect_runtime().connection();

    first.disconnect();
    pipe.disconnect();

    let status = signal.status();
    assert_eq!(status.statics.total, 2);
    assert_eq!(status.statics.live, 1);
    assert_eq!(status.pipelines.dead(), 1);
}
