//! Records and the frontier shared by every traversal.

use std::collections::VecDeque;

use super::{RecordId, TraversalOrder};
use crate::two_level::TwoLevelCursor;
use crate::TransitionSystem;

/// A state that was scheduled for exploration, together with its caller data.
#[derive(Clone, Debug)]
pub struct Record<S, D> {
    pub(crate) state: S,
    pub(crate) data: D,
}

impl<S, D> Record<S, D> {
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
}

/// Append-only storage for records. Records live until the traversal is dropped.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    items: Vec<T>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[inline]
    pub(crate) fn push(&mut self, item: T) -> RecordId {
        let id = RecordId(self.items.len());
        self.items.push(item);
        id
    }

    #[inline]
    pub(crate) fn get(&self, id: RecordId) -> Option<&T> {
        self.items.get(id.0)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: RecordId) -> Option<&mut T> {
        self.items.get_mut(id.0)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> std::ops::Index<RecordId> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: RecordId) -> &T {
        &self.items[id.0]
    }
}

impl<T> std::ops::IndexMut<RecordId> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, id: RecordId) -> &mut T {
        &mut self.items[id.0]
    }
}

pub(crate) type TransitionCursor<'a, TS> = TwoLevelCursor<
    std::slice::Iter<'a, <TS as TransitionSystem>::Input>,
    <<TS as TransitionSystem>::Transitions as IntoIterator>::IntoIter,
>;

/// A frontier entry: a record plus its position in the (input x transition) walk.
///
/// Keeping the cursor per entry is what lets a depth-first traversal suspend a state
/// while a child is explored and resume it afterwards.
pub(crate) struct Frame<'a, TS>
where
    TS: TransitionSystem,
{
    pub(crate) record: RecordId,
    pub(crate) started: bool,
    pub(crate) cursor: TransitionCursor<'a, TS>,

    /// The transition most recently produced by the cursor, kept only when
    /// `track_last` is set.
    pub(crate) last: Option<(&'a TS::Input, TS::Transition)>,
    track_last: bool,
}

impl<'a, TS> Frame<'a, TS>
where
    TS: TransitionSystem,
{
    pub(crate) fn new(record: RecordId, inputs: &'a [TS::Input], track_last: bool) -> Self {
        Self {
            record,
            started: false,
            cursor: TwoLevelCursor::new(inputs.iter()),
            last: None,
            track_last,
        }
    }

    /// Advance to the next transition of `state`, in alphabet then transition order.
    #[inline]
    pub(crate) fn next_transition(
        &mut self,
        ts: &TS,
        state: &TS::State,
    ) -> Option<(&'a TS::Input, TS::Transition)> {
        let next = self
            .cursor
            .next_with(|input| ts.transitions(state, input).into_iter());
        if self.track_last {
            self.last = next.clone();
        }
        next
    }
}

/// Pending frontier entries, consumed at the head.
///
/// Breadth-first: entries are appended at the back and the head is the front (FIFO).
/// Depth-first: entries are appended at the back and the head is the back (LIFO).
#[derive(Debug)]
pub(crate) struct Frontier<E> {
    order: TraversalOrder,
    entries: VecDeque<E>,
}

impl<E> Frontier<E> {
    pub(crate) fn new(order: TraversalOrder) -> Self {
        Self {
            order,
            entries: VecDeque::new(),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, entry: E) {
        self.entries.push_back(entry);
    }

    #[inline]
    pub(crate) fn head(&self) -> Option<&E> {
        match self.order {
            TraversalOrder::BreadthFirst => self.entries.front(),
            TraversalOrder::DepthFirst => self.entries.back(),
        }
    }

    #[inline]
    pub(crate) fn head_mut(&mut self) -> Option<&mut E> {
        match self.order {
            TraversalOrder::BreadthFirst => self.entries.front_mut(),
            TraversalOrder::DepthFirst => self.entries.back_mut(),
        }
    }

    #[inline]
    pub(crate) fn pop_head(&mut self) -> Option<E> {
        match self.order {
            TraversalOrder::BreadthFirst => self.entries.pop_front(),
            TraversalOrder::DepthFirst => self.entries.pop_back(),
        }
    }

    /// Reverse the pending entries, so that a stack filled in order is consumed in
    /// that same order.
    pub(crate) fn reverse(&mut self) {
        self.entries.make_contiguous().reverse();
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
