mod common;

use std::collections::HashSet;

use common::Graph;
use statewalk::traversal::{RawEvent, RawTraversal};
use statewalk::{TransitionSystem, TraversalError, TraversalOrder};

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Init(u32),
    Start(u32),
    Edge(u32, u8, u32),
    /// A finished state, with the parent state it backtracks to.
    Finish(u32, Option<u32>),
}

/// Describe a raw event by states rather than records.
fn step(it: &RawTraversal<'_, Graph, ()>, event: &RawEvent<'_, u32, u8, usize>) -> Step {
    let state_of = |id| *it.record(id).unwrap().state();
    match event {
        RawEvent::Init { state } => Step::Init(*state),
        RawEvent::Start { state, .. } => Step::Start(*state),
        RawEvent::Edge {
            source,
            input,
            target,
            ..
        } => Step::Edge(state_of(*source), **input, *target),
        RawEvent::Finish {
            state, backtrack, ..
        } => Step::Finish(*state, backtrack.as_ref().map(|b| state_of(b.parent))),
    }
}

/// Run a raw traversal that schedules every state the first time it is reported.
fn explore_all(order: TraversalOrder, ts: &Graph, inputs: &[u8]) -> Vec<Step> {
    let mut it = RawTraversal::new(order, ts, inputs);
    let mut seen = HashSet::new();
    let mut steps = Vec::new();
    while let Some(event) = it.next() {
        steps.push(step(&it, &event));
        match event {
            RawEvent::Init { state } | RawEvent::Edge { target: state, .. } => {
                if seen.insert(state) {
                    it.schedule_exploration(state, ());
                }
            }
            _ => {}
        }
    }
    steps
}

#[test]
fn breadth_first_reports_all_initial_states_first() {
    let ts = Graph::new(&[0, 3]).edges(&[(0, 0, 1), (0, 1, 2), (1, 0, 2)]);

    let got = explore_all(TraversalOrder::BreadthFirst, &ts, &[0, 1]);

    use Step::*;
    assert_eq!(
        vec![
            Init(0),
            Init(3),
            Start(0),
            Edge(0, 0, 1),
            Edge(0, 1, 2),
            Finish(0, None),
            Start(3),
            Finish(3, None),
            Start(1),
            Edge(1, 0, 2),
            Finish(1, None),
            Start(2),
            Finish(2, None),
        ],
        got
    );
}

#[test]
fn breadth_first_star_follows_input_order() {
    let ts = Graph::new(&[0]).edges(&[(0, 1, 2), (0, 0, 1)]);

    use Step::*;
    let got = explore_all(TraversalOrder::BreadthFirst, &ts, &[0, 1]);
    assert_eq!(
        &[Init(0), Start(0), Edge(0, 0, 1), Edge(0, 1, 2), Finish(0, None)],
        &got[..5]
    );

    let got = explore_all(TraversalOrder::BreadthFirst, &ts, &[1, 0]);
    assert_eq!(
        &[Init(0), Start(0), Edge(0, 1, 2), Edge(0, 0, 1), Finish(0, None)],
        &got[..5]
    );
}

#[test]
fn depth_first_pulls_initial_states_lazily_and_backtracks() {
    let ts = Graph::new(&[0, 3]).edges(&[(0, 0, 1), (1, 0, 2)]);

    let got = explore_all(TraversalOrder::DepthFirst, &ts, &[0]);

    use Step::*;
    assert_eq!(
        vec![
            Init(0),
            Start(0),
            Edge(0, 0, 1),
            Start(1),
            Edge(1, 0, 2),
            Start(2),
            Finish(2, Some(1)),
            Finish(1, Some(0)),
            Finish(0, None),
            Init(3),
            Start(3),
            Finish(3, None),
        ],
        got
    );
}

#[test]
fn depth_first_resumes_parent_after_child() {
    let ts = Graph::new(&[0]).edges(&[(0, 0, 1), (0, 0, 2), (0, 1, 3)]);

    let got = explore_all(TraversalOrder::DepthFirst, &ts, &[0, 1]);

    use Step::*;
    assert_eq!(
        vec![
            Init(0),
            Start(0),
            Edge(0, 0, 1),
            Start(1),
            Finish(1, Some(0)),
            Edge(0, 0, 2),
            Start(2),
            Finish(2, Some(0)),
            Edge(0, 1, 3),
            Start(3),
            Finish(3, Some(0)),
            Finish(0, None),
        ],
        got
    );
}

#[test]
fn backtrack_carries_the_discovering_transition() {
    let ts = Graph::new(&[0]).edge(0, 7, 1);
    let inputs = [7];
    let mut it = RawTraversal::depth_first(&ts, &inputs);

    assert!(matches!(it.next(), Some(RawEvent::Init { state: 0 })));
    it.schedule_exploration(0, ());
    assert!(matches!(it.next(), Some(RawEvent::Start { state: 0, .. })));
    assert!(matches!(it.next(), Some(RawEvent::Edge { target: 1, .. })));
    it.schedule_exploration(1, ());
    assert!(matches!(it.next(), Some(RawEvent::Start { state: 1, .. })));

    match it.next() {
        Some(RawEvent::Finish {
            state: 1,
            backtrack: Some(b),
            ..
        }) => {
            assert_eq!(&7, b.input);
            assert_eq!((0, 7, 1), ts.describe(b.transition));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn duplicate_initial_states_are_reported_every_time() {
    let ts = Graph::new(&[4, 4]);

    let got = explore_all(TraversalOrder::BreadthFirst, &ts, &[0]);

    use Step::*;
    assert_eq!(vec![Init(4), Init(4), Start(4), Finish(4, None)], got);
}

#[test]
fn unscheduled_states_are_not_explored() {
    let ts = Graph::new(&[0]).edge(0, 0, 1);
    let inputs = [0];

    for order in [TraversalOrder::BreadthFirst, TraversalOrder::DepthFirst] {
        let events: Vec<_> = RawTraversal::<_, ()>::new(order, &ts, &inputs).collect();
        assert_eq!(vec![RawEvent::Init { state: 0 }], events);
    }
}

#[test]
fn skip_input_moves_to_the_next_input() {
    let ts = Graph::new(&[0]).edges(&[(0, 0, 1), (0, 0, 2), (0, 1, 3)]);
    let inputs = [0, 1];

    for order in [TraversalOrder::BreadthFirst, TraversalOrder::DepthFirst] {
        let mut it = RawTraversal::new(order, &ts, &inputs);
        it.next();
        it.schedule_exploration(0, ());
        it.next();

        assert!(matches!(it.next(), Some(RawEvent::Edge { target: 1, .. })));
        it.skip_input().unwrap();
        assert!(
            matches!(it.next(), Some(RawEvent::Edge { target: 3, .. })),
            "{order}"
        );
    }
}

#[test]
fn breadth_first_skip_state_finishes_immediately() {
    let ts = Graph::new(&[0]).edges(&[(0, 0, 1), (0, 0, 2), (0, 1, 3)]);
    let inputs = [0, 1];
    let mut it = RawTraversal::breadth_first(&ts, &inputs);
    it.next();
    it.schedule_exploration(0, ());
    it.next();
    it.next();

    it.skip_state().unwrap();

    assert!(matches!(it.next(), Some(RawEvent::Finish { state: 0, .. })));
    assert_eq!(None, it.next());
}

#[test]
fn depth_first_skip_state_discards_without_finish() {
    let ts = Graph::new(&[0, 5]).edges(&[(0, 0, 1), (0, 1, 3)]);
    let inputs = [0, 1];
    let mut it = RawTraversal::depth_first(&ts, &inputs);
    it.next();
    it.schedule_exploration(0, ());
    it.next();
    it.next();

    it.skip_state().unwrap();

    assert_eq!(Some(RawEvent::Init { state: 5 }), it.next());
    assert_eq!(None, it.next());
}

#[test]
fn skipping_without_active_state_is_an_error() {
    let ts = Graph::new(&[0]);
    let inputs = [0];

    for order in [TraversalOrder::BreadthFirst, TraversalOrder::DepthFirst] {
        let mut it: RawTraversal<'_, _, ()> = RawTraversal::new(order, &ts, &inputs);
        assert_eq!(Err(TraversalError::NoActiveState), it.skip_input());
        assert_eq!(Err(TraversalError::NoActiveState), it.skip_state());
    }
}

#[test]
fn exhausted_traversal_keeps_returning_none() {
    let ts = Graph::new(&[]);
    let inputs = [0];
    let mut it: RawTraversal<'_, _, ()> = RawTraversal::breadth_first(&ts, &inputs);

    assert_eq!(None, it.next());
    assert_eq!(None, it.next());
}

#[test]
fn record_data_can_be_updated_during_traversal() {
    let ts = Graph::new(&[0]).edge(0, 0, 1);
    let inputs = [0];
    let mut it = RawTraversal::breadth_first(&ts, &inputs);

    it.next();
    let root = it.schedule_exploration(0, 10u32);
    while let Some(event) = it.next() {
        if let RawEvent::Edge { source, target, .. } = event {
            let depth = *it.record(source).unwrap().data() + 1;
            let child = it.schedule_exploration(target, depth);
            *it.data_mut(root).unwrap() += 100;
            assert_eq!(Some(&11), it.record(child).map(|r| r.data()));
        }
    }

    assert_eq!(110, *it.record(root).unwrap().data());
    assert_eq!(2, it.record_count());
    assert_eq!(vec![0u32], ts.initial_states());
}
