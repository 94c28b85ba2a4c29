//! Defines the transition system consumed by every traversal.

use std::hash::Hash;

/// A finite (or at least finitely branching) transition system.
///
/// Unlike a graph, a transition system does not enumerate its states. It only
/// exposes where exploration starts and how to get from a state to its successors:
///   1. the initial states, in an order that is authoritative for traversal,
///   2. the transitions leaving a state for a given input, possibly none or many, and
///   3. the successor state reached by a transition.
///
/// The input alphabet is not part of the system; every traversal takes it from the
/// caller, so a subset or a reordering of the full alphabet can be explored.
///
/// Traversals may query the same (state, input) pair more than once. Implementations
/// must answer consistently for the duration of one traversal.
pub trait TransitionSystem {
    type State: Clone + Eq + Hash;
    type Input;
    type Transition: Clone;

    type InitialStates: IntoIterator<Item = Self::State>;
    type Transitions: IntoIterator<Item = Self::Transition>;

    /// Return the initial states.
    fn initial_states(&self) -> Self::InitialStates;

    /// Return the transitions leaving `state` on `input`.
    ///
    /// An empty result means that no transition is defined.
    fn transitions(&self, state: &Self::State, input: &Self::Input) -> Self::Transitions;

    /// Resolve a transition to the state it leads to.
    fn successor(&self, transition: &Self::Transition) -> Self::State;
}

/// A transition system with at most one transition per (state, input) pair.
pub trait DeterministicTransitionSystem: TransitionSystem {
    /// Return the transition leaving `state` on `input`, if one is defined.
    fn transition(&self, state: &Self::State, input: &Self::Input) -> Option<Self::Transition> {
        self.transitions(state, input).into_iter().next()
    }

    /// Return the state reached from `state` on `input`, if a transition is defined.
    fn successor_of(&self, state: &Self::State, input: &Self::Input) -> Option<Self::State> {
        self.transition(state, input).map(|t| self.successor(&t))
    }
}
