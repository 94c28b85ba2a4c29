//! Graph search on top of the raw traversal: coloring and edge classification.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::frontier::Arena;
use super::raw::{Backtrack, RawEvent, RawTraversal};
use super::{Color, RecordId, TraversalOrder};
use crate::error::TraversalError;
use crate::TransitionSystem;

/// Classification of an edge relative to the search forest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// The edge discovered its target.
    Tree,
    /// The target is an ancestor of the source (or the source itself).
    Back,
    /// The target is a descendant of the source, discovered through another path.
    Forward,
    /// The target is neither an ancestor nor a descendant.
    Cross,
}

/// The discriminant of a [SearchEvent].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SearchEventKind {
    Init,
    Start,
    Finish,
    TreeEdge,
    BackEdge,
    ForwardEdge,
    CrossEdge,
}

/// Per-state bookkeeping of a search.
#[derive(Clone, Debug)]
pub struct SearchRecord<S, D> {
    state: S,
    data: D,
    color: Color,
    discovery: Option<usize>,
}

impl<S, D> SearchRecord<S, D> {
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[inline]
    pub fn data(&self) -> &D {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Pre-order discovery number. Only depth-first searches number their records.
    #[inline]
    pub fn discovery_index(&self) -> Option<usize> {
        self.discovery
    }
}

/// One step of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchEvent<'a, I, T> {
    /// An initial state was pulled. Its record is new unless the state was already known.
    Init { record: RecordId },

    Start { record: RecordId },

    Edge {
        kind: EdgeKind,
        source: RecordId,
        input: &'a I,
        transition: T,
        target: RecordId,
    },

    /// See [RawEvent::Finish] for the meaning of `backtrack`.
    Finish {
        record: RecordId,
        backtrack: Option<Backtrack<'a, I, T>>,
    },
}

impl<'a, I, T> SearchEvent<'a, I, T> {
    pub fn kind(&self) -> SearchEventKind {
        match self {
            SearchEvent::Init { .. } => SearchEventKind::Init,
            SearchEvent::Start { .. } => SearchEventKind::Start,
            SearchEvent::Finish { .. } => SearchEventKind::Finish,
            SearchEvent::Edge { kind, .. } => match kind {
                EdgeKind::Tree => SearchEventKind::TreeEdge,
                EdgeKind::Back => SearchEventKind::BackEdge,
                EdgeKind::Forward => SearchEventKind::ForwardEdge,
                EdgeKind::Cross => SearchEventKind::CrossEdge,
            },
        }
    }

    /// The record this event is about: the source for edges.
    pub fn record(&self) -> RecordId {
        match self {
            SearchEvent::Init { record }
            | SearchEvent::Start { record }
            | SearchEvent::Finish { record, .. } => *record,
            SearchEvent::Edge { source, .. } => *source,
        }
    }
}

/// A breadth-first or depth-first search over a transition system.
///
/// Every initial state and every newly seen edge target gets exactly one record, which
/// is scheduled for exploration when it is created. Records start WHITE, turn GRAY on
/// `Start`, and BLACK on `Finish`.
///
/// Edges are classified by the color of their target at the time they are seen:
///
/// | target | breadth-first | depth-first |
/// |---|---|---|
/// | no record | tree | tree |
/// | WHITE | cross, target becomes GRAY | forward or cross, as for BLACK |
/// | GRAY | back | back |
/// | BLACK | back | cross if the source was discovered later, forward otherwise |
///
/// Breadth-first WHITE targets are records that are queued but not started; reaching
/// one a second time marks it GRAY right away.
pub struct Search<'a, TS, D>
where
    TS: TransitionSystem,
{
    raw: RawTraversal<'a, TS, RecordId>,
    records: Arena<SearchRecord<TS::State, D>>,
    index: FxHashMap<TS::State, RecordId>,
    next_discovery: usize,
}

impl<'a, TS, D> Search<'a, TS, D>
where
    TS: TransitionSystem,
    D: Default,
{
    pub fn new(order: TraversalOrder, ts: &'a TS, inputs: &'a [TS::Input]) -> Self {
        debug!(%order, "starting search");
        Self {
            raw: RawTraversal::new(order, ts, inputs),
            records: Arena::new(),
            index: FxHashMap::default(),
            next_discovery: 0,
        }
    }

    #[inline]
    pub fn order(&self) -> TraversalOrder {
        self.raw.order()
    }

    /// Abandon the remaining transitions for the current input of the record at the head
    /// of the frontier. See [RawTraversal::skip_input].
    pub fn skip_input(&mut self) -> Result<(), TraversalError> {
        self.raw.skip_input()
    }

    /// Abandon the record at the head of the frontier. See [RawTraversal::skip_state].
    ///
    /// A depth-first record skipped this way never receives a `Finish` event and keeps
    /// its current color.
    pub fn skip_state(&mut self) -> Result<(), TraversalError> {
        self.raw.skip_state()
    }

    #[inline]
    pub fn record(&self, id: RecordId) -> Option<&SearchRecord<TS::State, D>> {
        self.records.get(id)
    }

    #[inline]
    pub fn data_mut(&mut self, id: RecordId) -> Option<&mut D> {
        self.records.get_mut(id).map(SearchRecord::data_mut)
    }

    /// The record of `state`, if the search has seen it.
    #[inline]
    pub fn record_of(&self, state: &TS::State) -> Option<RecordId> {
        self.index.get(state).copied()
    }

    /// Number of distinct states seen so far.
    #[inline]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    fn discover(&mut self, state: TS::State) -> RecordId {
        let discovery = match self.raw.order() {
            TraversalOrder::BreadthFirst => None,
            TraversalOrder::DepthFirst => {
                let n = self.next_discovery;
                self.next_discovery += 1;
                Some(n)
            }
        };
        let id = self.records.push(SearchRecord {
            state: state.clone(),
            data: D::default(),
            color: Color::White,
            discovery,
        });
        self.index.insert(state.clone(), id);
        self.raw.schedule_exploration(state, id);
        id
    }

    fn classify(&mut self, source: RecordId, target: &TS::State) -> (EdgeKind, RecordId) {
        let Some(id) = self.record_of(target) else {
            return (EdgeKind::Tree, self.discover(target.clone()));
        };

        let kind = match (self.raw.order(), self.records[id].color) {
            (_, Color::Gray) => EdgeKind::Back,
            (TraversalOrder::BreadthFirst, Color::White) => {
                self.records[id].color.advance(Color::Gray);
                EdgeKind::Cross
            }
            (TraversalOrder::BreadthFirst, Color::Black) => EdgeKind::Back,
            (TraversalOrder::DepthFirst, _) => {
                if self.records[source].discovery > self.records[id].discovery {
                    EdgeKind::Cross
                } else {
                    EdgeKind::Forward
                }
            }
        };
        (kind, id)
    }

    /// The search record behind a raw record.
    #[inline]
    fn resolve(&self, raw: RecordId) -> RecordId {
        self.raw.records[raw].data
    }
}

impl<'a, TS, D> Iterator for Search<'a, TS, D>
where
    TS: TransitionSystem,
    D: Default,
{
    type Item = SearchEvent<'a, TS::Input, TS::Transition>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = match self.raw.next()? {
            RawEvent::Init { state } => {
                let record = match self.record_of(&state) {
                    Some(id) => id,
                    None => self.discover(state),
                };
                SearchEvent::Init { record }
            }
            RawEvent::Start { record, .. } => {
                let record = self.resolve(record);
                self.records[record].color.advance(Color::Gray);
                SearchEvent::Start { record }
            }
            RawEvent::Finish {
                record, backtrack, ..
            } => {
                let record = self.resolve(record);
                self.records[record].color.advance(Color::Black);
                let backtrack = backtrack.map(|b| Backtrack {
                    parent: self.resolve(b.parent),
                    input: b.input,
                    transition: b.transition,
                });
                SearchEvent::Finish { record, backtrack }
            }
            RawEvent::Edge {
                source,
                input,
                transition,
                target,
            } => {
                let source = self.resolve(source);
                let (kind, target) = self.classify(source, &target);
                trace!(
                    source = source.index(),
                    target = target.index(),
                    ?kind,
                    "classified edge"
                );
                SearchEvent::Edge {
                    kind,
                    source,
                    input,
                    transition,
                    target,
                }
            }
        };
        Some(event)
    }
}

impl<'a, TS, D> std::iter::FusedIterator for Search<'a, TS, D>
where
    TS: TransitionSystem,
    D: Default,
{
}

/// Create a breadth-first search.
pub fn bfs<'a, TS, D>(ts: &'a TS, inputs: &'a [TS::Input]) -> Search<'a, TS, D>
where
    TS: TransitionSystem,
    D: Default,
{
    Search::new(TraversalOrder::BreadthFirst, ts, inputs)
}

/// Create a depth-first search.
pub fn dfs<'a, TS, D>(ts: &'a TS, inputs: &'a [TS::Input]) -> Search<'a, TS, D>
where
    TS: TransitionSystem,
    D: Default,
{
    Search::new(TraversalOrder::DepthFirst, ts, inputs)
}

/// Create a search in the given order.
pub fn search<'a, TS, D>(
    order: TraversalOrder,
    ts: &'a TS,
    inputs: &'a [TS::Input],
) -> Search<'a, TS, D>
where
    TS: TransitionSystem,
    D: Default,
{
    Search::new(order, ts, inputs)
}
