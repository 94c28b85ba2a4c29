//! Walks finite transition systems breadth-first or depth-first, under a policy chosen by
//! the caller.

pub mod error;
pub mod queries;
pub mod traversal;
pub mod two_level;

mod transition_system;
pub use transition_system::{DeterministicTransitionSystem, TransitionSystem};

pub use error::TraversalError;
pub use traversal::{
    Color, RecordId, TraversalAction, TraversalConfig, TraversalOrder, TraversalVisitor,
    NO_LIMIT,
};
