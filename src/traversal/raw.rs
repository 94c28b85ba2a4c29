//! The raw traversal iterator: a walker that explores only what its consumer schedules.

use tracing::{debug, trace};

use super::frontier::{Arena, Frame, Frontier, Record};
use super::{RecordId, TraversalOrder};
use crate::error::TraversalError;
use crate::TransitionSystem;

/// The transition along which a depth-first traversal returns to a parent record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backtrack<'a, I, T> {
    pub parent: RecordId,
    pub input: &'a I,
    pub transition: T,
}

/// One step of a raw traversal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawEvent<'a, S, I, T> {
    /// An initial state was pulled. It is explored only if the consumer schedules it.
    Init { state: S },

    /// A scheduled record is about to have its transitions enumerated.
    Start { record: RecordId, state: S },

    /// A transition of the record being explored. The target is explored only if the
    /// consumer schedules it.
    Edge {
        source: RecordId,
        input: &'a I,
        transition: T,
        target: S,
    },

    /// All inputs of the record were exhausted (or skipped).
    ///
    /// In depth-first order, `backtrack` holds the parent's transition that was being
    /// explored when this record was scheduled; it is None for roots.
    Finish {
        record: RecordId,
        state: S,
        backtrack: Option<Backtrack<'a, I, T>>,
    },
}

/// A lazy, pull-based traversal of a transition system.
///
/// The iterator itself decides nothing: every initial state and every edge target is
/// reported to the consumer, which calls [RawTraversal::schedule_exploration] for the
/// ones it wants explored. Deduplication, coloring, and limits are built on top.
///
/// Breadth-first: all `Init` events come first; scheduled records are then started in
/// FIFO order, each one fully enumerated before the next starts.
///
/// Depth-first: an `Init` event is produced only when the stack is empty. A record
/// scheduled during an `Edge` is started next, and its parent resumes where it left
/// off once the child finishes.
///
/// A traversal cannot be restarted; create a new one instead.
pub struct RawTraversal<'a, TS, D>
where
    TS: TransitionSystem,
{
    ts: &'a TS,
    inputs: &'a [TS::Input],
    order: TraversalOrder,
    initial: Option<<TS::InitialStates as IntoIterator>::IntoIter>,
    pub(crate) records: Arena<Record<TS::State, D>>,
    frontier: Frontier<Frame<'a, TS>>,
}

impl<'a, TS, D> RawTraversal<'a, TS, D>
where
    TS: TransitionSystem,
{
    pub fn new(order: TraversalOrder, ts: &'a TS, inputs: &'a [TS::Input]) -> Self {
        debug!(%order, inputs = inputs.len(), "starting raw traversal");
        Self {
            ts,
            inputs,
            order,
            initial: Some(ts.initial_states().into_iter()),
            records: Arena::new(),
            frontier: Frontier::new(order),
        }
    }

    /// Create a breadth-first traversal.
    pub fn breadth_first(ts: &'a TS, inputs: &'a [TS::Input]) -> Self {
        Self::new(TraversalOrder::BreadthFirst, ts, inputs)
    }

    /// Create a depth-first traversal.
    pub fn depth_first(ts: &'a TS, inputs: &'a [TS::Input]) -> Self {
        Self::new(TraversalOrder::DepthFirst, ts, inputs)
    }

    #[inline]
    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    /// Create a record for `state` and push it onto the frontier.
    ///
    /// No deduplication happens here: scheduling the same state twice explores it twice.
    pub fn schedule_exploration(&mut self, state: TS::State, data: D) -> RecordId {
        let id = self.records.push(Record { state, data });
        let track_last = self.order == TraversalOrder::DepthFirst;
        self.frontier.push(Frame::new(id, self.inputs, track_last));
        trace!(record = id.index(), pending = self.frontier.len(), "scheduled");
        id
    }

    /// Abandon the remaining transitions for the current input of the record at the head
    /// of the frontier. The walk resumes at the next input.
    pub fn skip_input(&mut self) -> Result<(), TraversalError> {
        let frame = self
            .frontier
            .head_mut()
            .ok_or(TraversalError::NoActiveState)?;
        trace!(record = frame.record.index(), "skipping input");
        frame.cursor.skip_inner();
        Ok(())
    }

    /// Abandon all remaining inputs of the record at the head of the frontier.
    ///
    /// Breadth-first: the record's `Finish` event is produced next (preceded by its
    /// `Start` event if it had not started yet).
    ///
    /// Depth-first: the record is discarded and no further events are produced for it,
    /// not even `Finish`.
    pub fn skip_state(&mut self) -> Result<(), TraversalError> {
        match self.order {
            TraversalOrder::BreadthFirst => {
                let frame = self
                    .frontier
                    .head_mut()
                    .ok_or(TraversalError::NoActiveState)?;
                trace!(record = frame.record.index(), "skipping state");
                frame.cursor.finish();
            }
            TraversalOrder::DepthFirst => {
                let frame = self
                    .frontier
                    .pop_head()
                    .ok_or(TraversalError::NoActiveState)?;
                trace!(record = frame.record.index(), "discarding state");
            }
        }
        Ok(())
    }

    /// Look up a record created by this traversal.
    #[inline]
    pub fn record(&self, id: RecordId) -> Option<&Record<TS::State, D>> {
        self.records.get(id)
    }

    /// Mutable access to the data attached to a record.
    #[inline]
    pub fn data_mut(&mut self, id: RecordId) -> Option<&mut D> {
        self.records.get_mut(id).map(Record::data_mut)
    }

    /// Number of records created so far.
    #[inline]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    fn next_init(&mut self) -> Option<RawEvent<'a, TS::State, TS::Input, TS::Transition>> {
        let state = self.initial.as_mut()?.next();
        if state.is_none() {
            self.initial = None;
        }
        state.map(|state| RawEvent::Init { state })
    }
}

impl<'a, TS, D> Iterator for RawTraversal<'a, TS, D>
where
    TS: TransitionSystem,
{
    type Item = RawEvent<'a, TS::State, TS::Input, TS::Transition>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.order == TraversalOrder::BreadthFirst || self.frontier.is_empty() {
            if let Some(event) = self.next_init() {
                return Some(event);
            }
        }

        let ts = self.ts;
        let frame = self.frontier.head_mut()?;
        let record = frame.record;
        let state = &self.records[record].state;

        if !frame.started {
            frame.started = true;
            return Some(RawEvent::Start {
                record,
                state: state.clone(),
            });
        }

        if let Some((input, transition)) = frame.next_transition(ts, state) {
            let target = ts.successor(&transition);
            return Some(RawEvent::Edge {
                source: record,
                input,
                transition,
                target,
            });
        }

        let state = state.clone();
        self.frontier.pop_head();
        let backtrack = match self.order {
            TraversalOrder::BreadthFirst => None,
            TraversalOrder::DepthFirst => self.frontier.head().and_then(|parent| {
                parent.last.clone().map(|(input, transition)| Backtrack {
                    parent: parent.record,
                    input,
                    transition,
                })
            }),
        };
        Some(RawEvent::Finish {
            record,
            state,
            backtrack,
        })
    }
}

/// Create a raw traversal in the given order.
pub fn raw_traversal<'a, TS, D>(
    order: TraversalOrder,
    ts: &'a TS,
    inputs: &'a [TS::Input],
) -> RawTraversal<'a, TS, D>
where
    TS: TransitionSystem,
{
    RawTraversal::new(order, ts, inputs)
}
