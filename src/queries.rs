//! Derived queries over transition systems, built on the traversal layers.

use rustc_hash::FxHashSet;

use crate::traversal::{RawEvent, RawTraversal, Search, SearchEvent, TraversalOrder};
use crate::two_level::TwoLevelIter;
use crate::{DeterministicTransitionSystem, TransitionSystem};

/// Every transition leaving `state`, across `inputs`, in alphabet then transition order.
pub fn all_transitions<'a, TS>(
    ts: &'a TS,
    state: &'a TS::State,
    inputs: &'a [TS::Input],
) -> impl Iterator<Item = (&'a TS::Input, TS::Transition)> + 'a
where
    TS: TransitionSystem + 'a,
{
    TwoLevelIter::new(inputs.iter(), move |input| {
        ts.transitions(state, *input).into_iter()
    })
}

/// The states reachable from the initial states, each once, in the order a search
/// starts exploring them.
pub struct SearchStates<'a, TS>
where
    TS: TransitionSystem,
{
    search: Search<'a, TS, ()>,
}

impl<'a, TS> Iterator for SearchStates<'a, TS>
where
    TS: TransitionSystem,
{
    type Item = TS::State;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let SearchEvent::Start { record } = self.search.next()? {
                if let Some(record) = self.search.record(record) {
                    return Some(record.state().clone());
                }
            }
        }
    }
}

/// Reachable states in the given search order.
pub fn search_states<'a, TS>(
    order: TraversalOrder,
    ts: &'a TS,
    inputs: &'a [TS::Input],
) -> SearchStates<'a, TS>
where
    TS: TransitionSystem,
{
    SearchStates {
        search: Search::new(order, ts, inputs),
    }
}

/// Reachable states in breadth-first order.
pub fn bfs_states<'a, TS>(ts: &'a TS, inputs: &'a [TS::Input]) -> SearchStates<'a, TS>
where
    TS: TransitionSystem,
{
    search_states(TraversalOrder::BreadthFirst, ts, inputs)
}

/// Reachable states in depth-first pre-order.
pub fn dfs_states<'a, TS>(ts: &'a TS, inputs: &'a [TS::Input]) -> SearchStates<'a, TS>
where
    TS: TransitionSystem,
{
    search_states(TraversalOrder::DepthFirst, ts, inputs)
}

/// A state paired with a shortest input word reaching it from an initial state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessSequence<'a, S, I> {
    pub state: S,
    pub access: Vec<&'a I>,
}

/// Breadth-first enumeration of access sequences, see [access_sequences].
pub struct AccessSequences<'a, TS>
where
    TS: TransitionSystem,
{
    raw: RawTraversal<'a, TS, Vec<&'a TS::Input>>,
    seen: FxHashSet<TS::State>,
}

impl<'a, TS> Iterator for AccessSequences<'a, TS>
where
    TS: TransitionSystem,
{
    type Item = AccessSequence<'a, TS::State, TS::Input>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.raw.next()? {
                RawEvent::Init { state } => {
                    if self.seen.insert(state.clone()) {
                        self.raw.schedule_exploration(state, Vec::new());
                    }
                }
                RawEvent::Start { record, state } => {
                    let access = self.raw.record(record)?.data().clone();
                    return Some(AccessSequence { state, access });
                }
                RawEvent::Edge {
                    source,
                    input,
                    target,
                    ..
                } => {
                    if self.seen.insert(target.clone()) {
                        let mut access = self.raw.record(source)?.data().clone();
                        access.push(input);
                        self.raw.schedule_exploration(target, access);
                    }
                }
                RawEvent::Finish { .. } => {}
            }
        }
    }
}

/// Enumerate every reachable state with a shortest access word, breadth-first.
///
/// Among words of equal length, the one that comes first in `inputs` order (compared
/// letter by letter) is chosen. Initial states have the empty word.
pub fn access_sequences<'a, TS>(ts: &'a TS, inputs: &'a [TS::Input]) -> AccessSequences<'a, TS>
where
    TS: TransitionSystem,
{
    AccessSequences {
        raw: RawTraversal::breadth_first(ts, inputs),
        seen: FxHashSet::default(),
    }
}

/// A (state, input) pair with its transition, if one is defined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransRef<'a, S, I, T> {
    pub state: &'a S,
    pub input: &'a I,
    pub transition: Option<T>,
}

/// The inputs of one state that do (`defined == true`) or do not have a transition.
pub struct DefinedTransitions<'a, TS>
where
    TS: TransitionSystem,
{
    ts: &'a TS,
    state: &'a TS::State,
    inputs: std::slice::Iter<'a, TS::Input>,
    defined: bool,
}

impl<'a, TS> Iterator for DefinedTransitions<'a, TS>
where
    TS: DeterministicTransitionSystem,
{
    type Item = TransRef<'a, TS::State, TS::Input, TS::Transition>;

    fn next(&mut self) -> Option<Self::Item> {
        for input in self.inputs.by_ref() {
            let transition = self.ts.transition(self.state, input);
            if transition.is_some() == self.defined {
                return Some(TransRef {
                    state: self.state,
                    input,
                    transition,
                });
            }
        }
        None
    }
}

/// The inputs for which `state` has a transition, with that transition.
pub fn defined_transitions<'a, TS>(
    ts: &'a TS,
    state: &'a TS::State,
    inputs: &'a [TS::Input],
) -> DefinedTransitions<'a, TS>
where
    TS: DeterministicTransitionSystem,
{
    DefinedTransitions {
        ts,
        state,
        inputs: inputs.iter(),
        defined: true,
    }
}

/// The inputs for which `state` has no transition.
pub fn undefined_transitions<'a, TS>(
    ts: &'a TS,
    state: &'a TS::State,
    inputs: &'a [TS::Input],
) -> DefinedTransitions<'a, TS>
where
    TS: DeterministicTransitionSystem,
{
    DefinedTransitions {
        ts,
        state,
        inputs: inputs.iter(),
        defined: false,
    }
}

/// [defined_transitions] for every state of `states`, in order.
pub fn all_defined_transitions<'a, TS>(
    ts: &'a TS,
    states: &'a [TS::State],
    inputs: &'a [TS::Input],
) -> impl Iterator<Item = TransRef<'a, TS::State, TS::Input, TS::Transition>> + 'a
where
    TS: DeterministicTransitionSystem + 'a,
{
    TwoLevelIter::new(states.iter(), move |state| {
        defined_transitions(ts, *state, inputs)
    })
    .map(|(_, t)| t)
}

/// [undefined_transitions] for every state of `states`, in order.
pub fn all_undefined_transitions<'a, TS>(
    ts: &'a TS,
    states: &'a [TS::State],
    inputs: &'a [TS::Input],
) -> impl Iterator<Item = TransRef<'a, TS::State, TS::Input, TS::Transition>> + 'a
where
    TS: DeterministicTransitionSystem + 'a,
{
    TwoLevelIter::new(states.iter(), move |state| {
        undefined_transitions(ts, *state, inputs)
    })
    .map(|(_, t)| t)
}
