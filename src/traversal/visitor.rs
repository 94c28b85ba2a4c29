//! Eager traversal steered by a visitor and bounded by a state limit.

use tracing::{debug, trace};

use super::frontier::{Arena, Frame, Frontier, Record};
use super::{TraversalConfig, TraversalOrder};
use crate::TransitionSystem;

/// A visitor's decision about an initial state or a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraversalAction<D> {
    /// Schedule the state (initial state, or successor of the transition) with the
    /// given data, subject to the state limit.
    Explore(D),
    /// Do not explore the state; continue with the next transition.
    Ignore,
    /// Skip the remaining transitions for the current input.
    AbortInput,
    /// Skip the remaining inputs of the current state.
    AbortState,
    /// Stop the whole traversal.
    AbortTraversal,
}

/// Decision hooks for [traverse].
///
/// On initial states, [TraversalAction::AbortInput] and [TraversalAction::AbortState]
/// behave like [TraversalAction::Ignore].
pub trait TraversalVisitor<S, I, T, D> {
    /// Called once per initial state, in the order of the transition system.
    fn process_initial(&mut self, state: &S) -> TraversalAction<D>;

    /// Called when a scheduled state is taken from the frontier. Returning false skips
    /// the state: none of its transitions are examined.
    fn start_exploration(&mut self, _state: &S, _data: &D) -> bool {
        true
    }

    /// Called once per enumerated transition of the state being explored, in alphabet
    /// then transition order.
    fn process_transition(
        &mut self,
        source: &S,
        data: &D,
        input: &I,
        transition: &T,
        successor: &S,
    ) -> TraversalAction<D>;
}

/// Traverse `ts` in the given order, asking `visitor` what to explore.
///
/// At most `state_limit` states are scheduled in total, initial states included. Once
/// the limit is reached, further [TraversalAction::Explore] decisions are dropped, but
/// states that were already scheduled are still explored.
///
/// Returns false iff an `Explore` decision was dropped because of the limit. An
/// [TraversalAction::AbortTraversal] returns the flag as it was at that point.
///
/// Depth-first traversal explores the initial states in order, each in pre-order; a
/// parent's remaining inputs resume after a child's subtree is done.
pub fn traverse<TS, V, D>(
    order: TraversalOrder,
    ts: &TS,
    state_limit: Option<usize>,
    inputs: &[TS::Input],
    visitor: &mut V,
) -> bool
where
    TS: TransitionSystem,
    V: TraversalVisitor<TS::State, TS::Input, TS::Transition, D> + ?Sized,
{
    debug!(%order, ?state_limit, inputs = inputs.len(), "starting bounded traversal");
    let mut run = BoundedRun::new(order, ts, inputs, state_limit);
    let complete = run.run(visitor);
    debug!(
        explored = run.explored,
        complete, "bounded traversal finished"
    );
    complete
}

/// [traverse] with the order and limit taken from a [TraversalConfig].
pub fn traverse_with<TS, V, D>(
    config: TraversalConfig,
    ts: &TS,
    inputs: &[TS::Input],
    visitor: &mut V,
) -> bool
where
    TS: TransitionSystem,
    V: TraversalVisitor<TS::State, TS::Input, TS::Transition, D> + ?Sized,
{
    traverse(config.order, ts, config.state_limit, inputs, visitor)
}

/// Breadth-first [traverse].
pub fn breadth_first<TS, V, D>(
    ts: &TS,
    state_limit: Option<usize>,
    inputs: &[TS::Input],
    visitor: &mut V,
) -> bool
where
    TS: TransitionSystem,
    V: TraversalVisitor<TS::State, TS::Input, TS::Transition, D> + ?Sized,
{
    traverse(TraversalOrder::BreadthFirst, ts, state_limit, inputs, visitor)
}

/// Depth-first [traverse].
pub fn depth_first<TS, V, D>(
    ts: &TS,
    state_limit: Option<usize>,
    inputs: &[TS::Input],
    visitor: &mut V,
) -> bool
where
    TS: TransitionSystem,
    V: TraversalVisitor<TS::State, TS::Input, TS::Transition, D> + ?Sized,
{
    traverse(TraversalOrder::DepthFirst, ts, state_limit, inputs, visitor)
}

/// State of one bounded traversal.
///
/// Uses the same records and frontier as the raw iterator, but pulls decisions from a
/// visitor instead of producing events.
struct BoundedRun<'a, TS, D>
where
    TS: TransitionSystem,
{
    ts: &'a TS,
    inputs: &'a [TS::Input],
    order: TraversalOrder,
    limit: Option<usize>,
    records: Arena<Record<TS::State, D>>,
    frontier: Frontier<Frame<'a, TS>>,
    explored: usize,
    complete: bool,
}

impl<'a, TS, D> BoundedRun<'a, TS, D>
where
    TS: TransitionSystem,
{
    fn new(
        order: TraversalOrder,
        ts: &'a TS,
        inputs: &'a [TS::Input],
        limit: Option<usize>,
    ) -> Self {
        Self {
            ts,
            inputs,
            order,
            limit,
            records: Arena::new(),
            frontier: Frontier::new(order),
            explored: 0,
            complete: true,
        }
    }

    fn schedule(&mut self, state: TS::State, data: D) {
        if self.limit == Some(self.explored) {
            trace!(explored = self.explored, "state limit reached");
            self.complete = false;
            return;
        }
        let id = self.records.push(Record { state, data });
        self.frontier.push(Frame::new(id, self.inputs, false));
        self.explored += 1;
    }

    fn run<V>(&mut self, visitor: &mut V) -> bool
    where
        V: TraversalVisitor<TS::State, TS::Input, TS::Transition, D> + ?Sized,
    {
        for state in self.ts.initial_states() {
            match visitor.process_initial(&state) {
                TraversalAction::Explore(data) => self.schedule(state, data),
                TraversalAction::AbortTraversal => return self.complete,
                TraversalAction::Ignore
                | TraversalAction::AbortInput
                | TraversalAction::AbortState => {}
            }
        }
        if self.order == TraversalOrder::DepthFirst {
            self.frontier.reverse();
        }

        let ts = self.ts;
        while let Some(frame) = self.frontier.head_mut() {
            let record = &self.records[frame.record];

            if !frame.started {
                frame.started = true;
                if !visitor.start_exploration(&record.state, &record.data) {
                    trace!(record = frame.record.index(), "exploration declined");
                    self.frontier.pop_head();
                    continue;
                }
            }

            let Some((input, transition)) = frame.next_transition(ts, &record.state) else {
                self.frontier.pop_head();
                continue;
            };
            let successor = ts.successor(&transition);

            match visitor.process_transition(
                &record.state,
                &record.data,
                input,
                &transition,
                &successor,
            ) {
                TraversalAction::Explore(data) => self.schedule(successor, data),
                TraversalAction::Ignore => {}
                TraversalAction::AbortInput => {
                    if let Some(frame) = self.frontier.head_mut() {
                        frame.cursor.skip_inner();
                    }
                }
                TraversalAction::AbortState => {
                    self.frontier.pop_head();
                }
                TraversalAction::AbortTraversal => return self.complete,
            }
        }
        self.complete
    }
}
