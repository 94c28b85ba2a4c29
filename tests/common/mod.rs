#![allow(dead_code)]

use statewalk::{DeterministicTransitionSystem, TransitionSystem};

/// An explicit transition system: numbered states, byte inputs, and transitions that are
/// indices into an edge list.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    initial: Vec<u32>,
    edges: Vec<(u32, u8, u32)>,
}

impl Graph {
    pub fn new(initial: &[u32]) -> Self {
        Self {
            initial: initial.to_vec(),
            edges: Vec::new(),
        }
    }

    pub fn edge(mut self, from: u32, input: u8, to: u32) -> Self {
        self.edges.push((from, input, to));
        self
    }

    pub fn edges(mut self, edges: &[(u32, u8, u32)]) -> Self {
        self.edges.extend_from_slice(edges);
        self
    }

    /// The (from, input, to) triple of a transition.
    pub fn describe(&self, transition: usize) -> (u32, u8, u32) {
        self.edges[transition]
    }

    /// States reachable from the initial states over `inputs`, by plain fixpoint.
    pub fn reachable(&self, inputs: &[u8]) -> std::collections::BTreeSet<u32> {
        let mut seen: std::collections::BTreeSet<u32> = self.initial.iter().copied().collect();
        loop {
            let before = seen.len();
            for &(from, input, to) in &self.edges {
                if seen.contains(&from) && inputs.contains(&input) {
                    seen.insert(to);
                }
            }
            if seen.len() == before {
                return seen;
            }
        }
    }
}

impl TransitionSystem for Graph {
    type State = u32;
    type Input = u8;
    type Transition = usize;
    type InitialStates = Vec<u32>;
    type Transitions = Vec<usize>;

    fn initial_states(&self) -> Vec<u32> {
        self.initial.clone()
    }

    fn transitions(&self, state: &u32, input: &u8) -> Vec<usize> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, (from, i, _))| from == state && i == input)
            .map(|(t, _)| t)
            .collect()
    }

    fn successor(&self, transition: &usize) -> u32 {
        self.edges[*transition].2
    }
}

impl DeterministicTransitionSystem for Graph {}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
